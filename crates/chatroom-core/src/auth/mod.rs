//! Account Service
//!
//! Handles user registration and credential checks against the `users` table.
//! Passwords are stored only as salted bcrypt hashes; the plaintext is never
//! written and the hash is never returned.

use bcrypt::{hash, verify};
use tracing::{info, warn};

use crate::db::Database;
use crate::error::{is_unique_violation, ChatError, Result};
use crate::models::User;

#[derive(Clone, Debug)]
pub struct AccountService {
    db: Database,
    cost: u32,
}

impl AccountService {
    pub fn new(db: Database, cost: u32) -> Self {
        Self { db, cost }
    }

    /// Register a new user.
    ///
    /// Fails with [`ChatError::DuplicateUsername`] when the name is taken and
    /// [`ChatError::HashingFailure`] when bcrypt rejects the input or cost.
    pub async fn register(&self, username: &str, password: &str) -> Result<User> {
        let password_hash = hash_password(password.to_owned(), self.cost).await?;

        let inserted = self
            .db
            .bounded(
                sqlx::query("INSERT INTO users (username, password_hash) VALUES (?, ?)")
                    .bind(username)
                    .bind(&password_hash)
                    .execute(self.db.pool()),
            )
            .await?;

        let id = match inserted {
            Ok(result) => result.last_insert_rowid(),
            Err(e) if is_unique_violation(&e) => {
                warn!("[Auth] Registration rejected, username taken: {}", username);
                return Err(ChatError::DuplicateUsername);
            }
            Err(e) => return Err(e.into()),
        };

        info!("[Auth] User registered: {} (id {})", username, id);

        Ok(User {
            id,
            username: username.to_owned(),
        })
    }

    /// Check a username/password pair.
    ///
    /// "User not found" and "Incorrect password" stay distinguishable all the
    /// way to the boundary, which lets a caller enumerate usernames.
    pub async fn authenticate(&self, username: &str, password: &str) -> Result<User> {
        let row: Option<(i64, String, String)> = self
            .db
            .bounded(
                sqlx::query_as("SELECT id, username, password_hash FROM users WHERE username = ?")
                    .bind(username)
                    .fetch_optional(self.db.pool()),
            )
            .await??;

        let Some((id, username, password_hash)) = row else {
            warn!("[Auth] Login attempt for unknown user: {}", username);
            return Err(ChatError::UserNotFound);
        };

        if !verify_password(password.to_owned(), password_hash).await {
            warn!("[Auth] Failed login attempt for {}", username);
            return Err(ChatError::IncorrectPassword);
        }

        info!("[Auth] User logged in: {}", username);
        Ok(User { id, username })
    }
}

/// bcrypt is CPU bound; keep it off the async workers.
async fn hash_password(password: String, cost: u32) -> Result<String> {
    tokio::task::spawn_blocking(move || hash(password, cost))
        .await
        .map_err(|e| ChatError::HashingFailure(e.to_string()))?
        .map_err(ChatError::from)
}

/// A hash that cannot be parsed counts as a failed comparison.
async fn verify_password(password: String, password_hash: String) -> bool {
    let outcome = tokio::task::spawn_blocking(move || verify(password, &password_hash)).await;

    match outcome {
        Ok(Ok(matched)) => matched,
        Ok(Err(e)) => {
            warn!("[Auth] Stored hash could not be compared: {}", e);
            false
        }
        Err(e) => {
            warn!("[Auth] Password comparison task failed: {}", e);
            false
        }
    }
}
