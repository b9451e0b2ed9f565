//! In-memory user and message stores.
//!
//! Each store owns its own `RwLock`; lookups and listing share the read
//! side, registration and appends take the write side. Nothing survives a
//! restart.

pub mod messages;
pub mod users;

use thiserror::Error;

use murmur_auth::PasswordError;

pub use messages::MessageStore;
pub use users::UserStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{0}")]
    InvalidInput(&'static str),

    #[error("username already exists")]
    Conflict,

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("invalid credentials")]
    InvalidCredentials,

    #[error(transparent)]
    Hash(#[from] PasswordError),

    #[error("{0} lock poisoned")]
    LockPoisoned(&'static str),
}
