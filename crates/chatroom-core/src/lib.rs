//! Chatroom backend: accounts and rooms over an embedded SQLite store.

pub mod auth;
pub mod backend;
pub mod config;
pub mod db;
pub mod envelope;
pub mod error;
pub mod models;
pub mod rooms;

// Re-export commonly used types
pub use auth::AccountService;
pub use backend::Backend;
pub use config::{ChatConfig, MAX_CONNECTIONS_ENV, PASSWORD_HASH_COST, STORAGE_TIMEOUT_ENV};
pub use db::Database;
pub use envelope::{Envelope, RoomCreated, RoomList, UserPayload};
pub use error::{ChatError, Result};
pub use models::{Room, User};
pub use rooms::RoomDirectory;
