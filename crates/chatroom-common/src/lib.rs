//! Centralized directory structure management for Chatroom
//!
//! Directory layout:
//! ```text
//! <data root>/
//! ├── local/           # SQLite database (chat.db)
//! └── logs/            # Rolling log output from the desktop shell
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Environment variable that overrides every other root source.
pub const ROOT_ENV: &str = "CHATROOM_ROOT";

/// File name of the SQLite database inside `local/`.
pub const DB_FILE_NAME: &str = "chat.db";

#[derive(Serialize, Deserialize, Debug, Default)]
struct ChatroomPrefs {
    data_root: Option<PathBuf>,
}

/// Get the global preference file path
fn prefs_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("chatroom").join("config.json"))
}

fn read_root_pref(path: &Path) -> Option<PathBuf> {
    if !path.exists() {
        return None;
    }

    match fs::read_to_string(path) {
        Ok(content) => match serde_json::from_str::<ChatroomPrefs>(&content) {
            Ok(prefs) => prefs.data_root,
            Err(e) => {
                warn!("Failed to parse preference file at {:?}: {}", path, e);
                None
            }
        },
        Err(e) => {
            warn!("Failed to read preference file at {:?}: {}", path, e);
            None
        }
    }
}

fn write_root_pref(path: &Path, root: PathBuf) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let prefs = ChatroomPrefs {
        data_root: Some(root),
    };
    fs::write(path, serde_json::to_string_pretty(&prefs)?)?;
    Ok(())
}

/// Load the persistent data root from the preference file
pub fn load_persistent_root() -> Option<PathBuf> {
    read_root_pref(&prefs_path()?)
}

/// Save a path as the persistent data root
pub fn save_persistent_root(root: PathBuf) -> anyhow::Result<()> {
    let path = prefs_path().ok_or_else(|| anyhow::anyhow!("Could not determine config dir"))?;
    write_root_pref(&path, root)
}

/// Get the data root from environment, persistent preference, or platform default
pub fn data_root() -> PathBuf {
    if let Ok(val) = std::env::var(ROOT_ENV) {
        return PathBuf::from(val);
    }

    if let Some(root) = load_persistent_root() {
        return root;
    }

    dirs::data_dir()
        .map(|d| d.join("chatroom"))
        .unwrap_or_else(|| PathBuf::from("chatroom_data"))
}

/// Local data directory (SQLite)
pub fn local_dir() -> PathBuf {
    data_root().join("local")
}

/// Log output directory
pub fn logs_dir() -> PathBuf {
    data_root().join("logs")
}

/// Database file path
pub fn db_path() -> PathBuf {
    local_dir().join(DB_FILE_NAME)
}

/// Ensure a single directory exists
pub fn ensure_dir(path: &Path) -> anyhow::Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)?;
        info!("Created directory: {:?}", path);
    }
    Ok(())
}

/// Initialize the complete directory structure.
/// Call once at startup before opening the database or the log file.
pub fn init_structure() -> anyhow::Result<PathBuf> {
    let root = data_root();

    ensure_dir(&root)?;
    ensure_dir(&local_dir())?;
    ensure_dir(&logs_dir())?;

    let canonical = fs::canonicalize(&root).unwrap_or_else(|_| root.clone());
    info!("Chatroom directory structure initialized at: {:?}", canonical);

    Ok(canonical)
}
