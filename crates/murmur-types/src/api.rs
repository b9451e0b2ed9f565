use serde::{Deserialize, Serialize};

use crate::models::User;

// -- JWT Claims --

/// JWT claims issued by the token service and checked by the REST
/// middleware. `sub` is the numeric user id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: u64,
    pub username: String,
    pub iat: usize,
    pub exp: usize,
}

/// Identity attached to a request once its bearer token has been validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthUser {
    pub user_id: u64,
    pub username: String,
}

impl From<Claims> for AuthUser {
    fn from(claims: Claims) -> Self {
        Self {
            user_id: claims.sub,
            username: claims.username,
        }
    }
}

// -- Auth --

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
    #[serde(default)]
    pub profile_picture: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Returned by both register and login.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: User,
}

// -- Messages --

#[derive(Debug, Deserialize)]
pub struct SendMessageRequest {
    pub content: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_request_picture_is_optional() {
        let req: RegisterRequest =
            serde_json::from_str(r#"{"username":"alice","password":"pw"}"#).unwrap();
        assert_eq!(req.username, "alice");
        assert!(req.profile_picture.is_empty());
    }

    #[test]
    fn test_auth_response_omits_hash() {
        let resp = AuthResponse {
            token: "t".into(),
            user: User {
                id: 1,
                username: "alice".into(),
                password_hash: "hash".into(),
                profile_picture: String::new(),
            },
        };
        let text = serde_json::to_string(&resp).unwrap();
        assert!(!text.contains("hash"));
        assert!(text.contains(r#""token":"t""#));
    }
}
