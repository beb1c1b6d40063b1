//! Room Directory
//!
//! Creation and listing of chat rooms. Room names are trimmed before they are
//! validated or stored, so `"  Lobby  "` and `"Lobby"` name the same room.

use tracing::{debug, info, warn};

use crate::db::Database;
use crate::error::{is_unique_violation, ChatError, Result};
use crate::models::Room;

#[derive(Clone, Debug)]
pub struct RoomDirectory {
    db: Database,
}

impl RoomDirectory {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    pub async fn create_room(&self, name: &str) -> Result<Room> {
        let room_name = name.trim();
        if room_name.is_empty() {
            return Err(ChatError::EmptyName);
        }

        let inserted = self
            .db
            .bounded(
                sqlx::query("INSERT INTO rooms (room_name) VALUES (?)")
                    .bind(room_name)
                    .execute(self.db.pool()),
            )
            .await?;

        match inserted {
            Ok(result) => {
                let room = Room {
                    id: result.last_insert_rowid(),
                    room_name: room_name.to_owned(),
                };
                info!("[Rooms] Created room {:?} (id {})", room.room_name, room.id);
                Ok(room)
            }
            Err(e) if is_unique_violation(&e) => {
                warn!("[Rooms] Duplicate room name: {:?}", room_name);
                Err(ChatError::DuplicateRoomName)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Every room, oldest first.
    pub async fn list_rooms(&self) -> Result<Vec<Room>> {
        let rooms: Vec<Room> = self
            .db
            .bounded(
                sqlx::query_as("SELECT id, room_name FROM rooms ORDER BY id")
                    .fetch_all(self.db.pool()),
            )
            .await??;

        debug!("[Rooms] Listed {} rooms", rooms.len());
        Ok(rooms)
    }
}
