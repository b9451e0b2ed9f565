use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::Utc;
use tracing::debug;

use murmur_types::models::Message;

use crate::{StoreError, UserStore};

/// Append-only log for the single global room.
pub struct MessageStore {
    users: Arc<UserStore>,
    messages: RwLock<Vec<Message>>,
}

impl MessageStore {
    pub fn new(users: Arc<UserStore>) -> Self {
        Self {
            users,
            messages: RwLock::new(Vec::new()),
        }
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Vec<Message>>, StoreError> {
        self.messages
            .read()
            .map_err(|_| StoreError::LockPoisoned("messages"))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Vec<Message>>, StoreError> {
        self.messages
            .write()
            .map_err(|_| StoreError::LockPoisoned("messages"))
    }

    /// Append a message from `author_id`, snapshotting the author's current
    /// username and picture.
    pub fn append(&self, author_id: u64, content: &str) -> Result<Message, StoreError> {
        if content.is_empty() {
            return Err(StoreError::InvalidInput("message content required"));
        }

        // Separate, shorter acquisition of the user lock; released before
        // the message log is locked.
        let author = self.users.find_by_id(author_id)?;

        let mut messages = self.write()?;
        // Nothing is ever removed, so ids stay dense and unique.
        let message = Message {
            id: messages.len() as u64 + 1,
            user_id: author.id,
            username: author.username,
            profile_picture: author.profile_picture,
            content: content.to_string(),
            timestamp: Utc::now(),
        };
        messages.push(message.clone());

        debug!("Message {} appended by user {}", message.id, message.user_id);
        Ok(message)
    }

    /// Every message, oldest first.
    pub fn list_all(&self) -> Result<Vec<Message>, StoreError> {
        Ok(self.read()?.clone())
    }

    pub fn len(&self) -> Result<usize, StoreError> {
        Ok(self.read()?.len())
    }

    pub fn is_empty(&self) -> Result<bool, StoreError> {
        Ok(self.read()?.is_empty())
    }
}
