use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A registered account. Never mutated after registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    pub username: String,
    /// PHC-formatted Argon2 hash. Kept out of every response body.
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    pub profile_picture: String,
}

/// A chat message in the global room.
///
/// `username` and `profile_picture` are snapshots of the author taken when
/// the message was sent, so listing never has to look users up again.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: u64,
    pub user_id: u64,
    pub username: String,
    pub profile_picture: String,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_serialization_hides_password_hash() {
        let user = User {
            id: 7,
            username: "alice".into(),
            password_hash: "$argon2id$v=19$secret".into(),
            profile_picture: "https://example.com/a.png".into(),
        };

        let json = serde_json::to_value(&user).unwrap();
        assert_eq!(json["id"], 7);
        assert_eq!(json["username"], "alice");
        assert_eq!(json["profile_picture"], "https://example.com/a.png");
        assert!(json.get("password_hash").is_none());
    }

    #[test]
    fn test_message_wire_field_names() {
        let msg = Message {
            id: 1,
            user_id: 2,
            username: "bob".into(),
            profile_picture: String::new(),
            content: "hi".into(),
            timestamp: "2024-05-01T12:00:00Z".parse().unwrap(),
        };

        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json["user_id"], 2);
        assert_eq!(json["content"], "hi");
        assert_eq!(json["timestamp"], "2024-05-01T12:00:00Z");
    }
}
