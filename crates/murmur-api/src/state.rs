use std::sync::Arc;

use murmur_auth::{CredentialHasher, TokenService};
use murmur_store::{MessageStore, UserStore};

pub type AppState = Arc<AppStateInner>;

pub struct AppStateInner {
    pub users: Arc<UserStore>,
    pub messages: MessageStore,
    pub tokens: TokenService,
}

impl AppStateInner {
    /// Fresh, empty stores. Each call is isolated from every other.
    pub fn new(tokens: TokenService, hasher: CredentialHasher) -> AppState {
        let users = Arc::new(UserStore::new(hasher));
        Arc::new(Self {
            messages: MessageStore::new(users.clone()),
            users,
            tokens,
        })
    }
}
