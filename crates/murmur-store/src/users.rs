use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::debug;

use murmur_auth::CredentialHasher;
use murmur_types::models::User;

use crate::StoreError;

#[derive(Default)]
struct Users {
    by_id: HashMap<u64, User>,
    by_username: HashMap<String, u64>,
    last_id: u64,
}

/// Registered accounts, keyed by id with a username index.
pub struct UserStore {
    users: RwLock<Users>,
    hasher: CredentialHasher,
}

impl UserStore {
    pub fn new(hasher: CredentialHasher) -> Self {
        Self {
            users: RwLock::new(Users::default()),
            hasher,
        }
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Users>, StoreError> {
        self.users.read().map_err(|_| StoreError::LockPoisoned("users"))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Users>, StoreError> {
        self.users.write().map_err(|_| StoreError::LockPoisoned("users"))
    }

    /// Create an account. The password is hashed before the write lock is
    /// taken; the uniqueness check and insert happen under one write guard.
    pub fn register(
        &self,
        username: &str,
        password: &str,
        profile_picture: &str,
    ) -> Result<User, StoreError> {
        if username.is_empty() || password.is_empty() {
            return Err(StoreError::InvalidInput("username and password required"));
        }

        // Cheap early rejection so duplicates don't pay for a hash.
        let taken = self.read()?.by_username.contains_key(username);
        if taken {
            return Err(StoreError::Conflict);
        }

        let password_hash = self.hasher.hash(password)?;

        let mut users = self.write()?;
        if users.by_username.contains_key(username) {
            return Err(StoreError::Conflict);
        }

        users.last_id += 1;
        let user = User {
            id: users.last_id,
            username: username.to_string(),
            password_hash,
            profile_picture: profile_picture.to_string(),
        };
        users.by_username.insert(user.username.clone(), user.id);
        users.by_id.insert(user.id, user.clone());

        debug!("Registered user {} ({})", user.id, user.username);
        Ok(user)
    }

    pub fn find_by_username(&self, username: &str) -> Result<User, StoreError> {
        let users = self.read()?;
        users
            .by_username
            .get(username)
            .and_then(|id| users.by_id.get(id))
            .cloned()
            .ok_or(StoreError::NotFound("user"))
    }

    pub fn find_by_id(&self, id: u64) -> Result<User, StoreError> {
        self.read()?
            .by_id
            .get(&id)
            .cloned()
            .ok_or(StoreError::NotFound("user"))
    }

    /// Look up `username` and check `password` against its hash. An unknown
    /// user and a wrong password give the same error.
    pub fn authenticate(&self, username: &str, password: &str) -> Result<User, StoreError> {
        let user = match self.find_by_username(username) {
            Ok(user) => user,
            Err(StoreError::NotFound(_)) => return Err(StoreError::InvalidCredentials),
            Err(e) => return Err(e),
        };

        // Verification runs on a cloned record, outside the lock.
        if !self.hasher.verify(password, &user.password_hash) {
            return Err(StoreError::InvalidCredentials);
        }
        Ok(user)
    }

    pub fn len(&self) -> Result<usize, StoreError> {
        Ok(self.read()?.by_id.len())
    }

    pub fn is_empty(&self) -> Result<bool, StoreError> {
        Ok(self.len()? == 0)
    }
}
