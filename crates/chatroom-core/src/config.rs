//! Backend configuration

use std::path::PathBuf;
use std::time::Duration;

/// bcrypt work factor used for every stored password.
pub const PASSWORD_HASH_COST: u32 = 10;

const DEFAULT_MAX_CONNECTIONS: u32 = 5;
const DEFAULT_STORAGE_TIMEOUT: Duration = Duration::from_secs(5);

/// Pool size override read by `ChatConfig::default`.
pub const MAX_CONNECTIONS_ENV: &str = "CHATROOM_DB_MAX_CONNECTIONS";
/// Per-call storage timeout override, in whole seconds.
pub const STORAGE_TIMEOUT_ENV: &str = "CHATROOM_STORAGE_TIMEOUT_SECS";

/// Configuration for the chatroom backend
#[derive(Clone, Debug)]
pub struct ChatConfig {
    /// SQLite database file
    pub db_path: PathBuf,
    /// Pool size for the storage handle
    pub max_connections: u32,
    /// bcrypt cost for new password hashes
    pub bcrypt_cost: u32,
    /// Upper bound on a single storage call
    pub storage_timeout: Duration,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            db_path: chatroom_common::db_path(),
            max_connections: env_parse(MAX_CONNECTIONS_ENV)
                .map(|max: u32| max.max(1))
                .unwrap_or(DEFAULT_MAX_CONNECTIONS),
            bcrypt_cost: PASSWORD_HASH_COST,
            // A zero timeout would fail every call, so one second is the floor.
            storage_timeout: env_parse(STORAGE_TIMEOUT_ENV)
                .map(|secs: u64| Duration::from_secs(secs.max(1)))
                .unwrap_or(DEFAULT_STORAGE_TIMEOUT),
        }
    }
}

impl ChatConfig {
    /// Create config with the database under a custom base directory
    pub fn with_base_dir(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            db_path: base_dir.into().join(chatroom_common::DB_FILE_NAME),
            max_connections: DEFAULT_MAX_CONNECTIONS,
            bcrypt_cost: PASSWORD_HASH_COST,
            storage_timeout: DEFAULT_STORAGE_TIMEOUT,
        }
    }

    /// Override the bcrypt cost
    pub fn with_bcrypt_cost(mut self, cost: u32) -> Self {
        self.bcrypt_cost = cost;
        self
    }

    /// Override the per-call storage timeout
    pub fn with_storage_timeout(mut self, timeout: Duration) -> Self {
        self.storage_timeout = timeout;
        self
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|v| v.parse().ok())
}
