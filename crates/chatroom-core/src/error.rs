//! Error types for account and room operations.

use thiserror::Error;

/// Result type for chatroom backend operations.
pub type Result<T> = std::result::Result<T, ChatError>;

/// Errors that can occur while serving a boundary request.
///
/// None of these are retried and none are fatal to the process; each one is
/// the terminal outcome of the request that produced it.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ChatError {
    #[error("Username already exists")]
    DuplicateUsername,

    #[error("Failed to hash password: {0}")]
    HashingFailure(String),

    #[error("User not found")]
    UserNotFound,

    #[error("Incorrect password")]
    IncorrectPassword,

    #[error("Room name cannot be empty.")]
    EmptyName,

    #[error("Room name already exists")]
    DuplicateRoomName,

    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),
}

impl From<sqlx::Error> for ChatError {
    fn from(err: sqlx::Error) -> Self {
        ChatError::StorageUnavailable(err.to_string())
    }
}

impl From<bcrypt::BcryptError> for ChatError {
    fn from(err: bcrypt::BcryptError) -> Self {
        ChatError::HashingFailure(err.to_string())
    }
}

impl ChatError {
    /// Stable snake_case name of the error kind, surfaced next to the message.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            ChatError::DuplicateUsername => "duplicate_username",
            ChatError::HashingFailure(_) => "hashing_failure",
            ChatError::UserNotFound => "user_not_found",
            ChatError::IncorrectPassword => "incorrect_password",
            ChatError::EmptyName => "empty_name",
            ChatError::DuplicateRoomName => "duplicate_room_name",
            ChatError::StorageUnavailable(_) => "storage_unavailable",
        }
    }
}

/// True when the storage engine rejected a write on a `UNIQUE` constraint.
pub(crate) fn is_unique_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => db_err.is_unique_violation(),
        _ => false,
    }
}
