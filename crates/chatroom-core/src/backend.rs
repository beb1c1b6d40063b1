//! Boundary dispatcher.
//!
//! Each method is one named operation the display layer can invoke. Service
//! results are flattened into an [`Envelope`] here, so a failed request is
//! reported to the caller and never propagates further.

use tracing::warn;

use crate::auth::AccountService;
use crate::config::ChatConfig;
use crate::db::Database;
use crate::envelope::{Envelope, RoomCreated, RoomList, UserPayload};
use crate::error::Result;
use crate::rooms::RoomDirectory;

#[derive(Clone, Debug)]
pub struct Backend {
    db: Database,
    accounts: AccountService,
    rooms: RoomDirectory,
}

impl Backend {
    /// Open the storage handle and wire both services to it.
    pub async fn open(config: &ChatConfig) -> Result<Self> {
        let db = Database::open(config).await?;
        Ok(Self::new(db, config))
    }

    pub fn new(db: Database, config: &ChatConfig) -> Self {
        Self {
            accounts: AccountService::new(db.clone(), config.bcrypt_cost),
            rooms: RoomDirectory::new(db.clone()),
            db,
        }
    }

    pub async fn register(&self, username: &str, password: &str) -> Envelope<UserPayload> {
        let result = self.accounts.register(username, password).await;
        envelope("register", result.map(|user| UserPayload { user }))
    }

    pub async fn login(&self, username: &str, password: &str) -> Envelope<UserPayload> {
        let result = self.accounts.authenticate(username, password).await;
        envelope("login", result.map(|user| UserPayload { user }))
    }

    pub async fn create_room(&self, room_name: &str) -> Envelope<RoomCreated> {
        let result = self.rooms.create_room(room_name).await;
        envelope("create_room", result.map(|room| RoomCreated { room_id: room.id }))
    }

    pub async fn get_rooms(&self) -> Envelope<RoomList> {
        let result = self.rooms.list_rooms().await;
        envelope("get_rooms", result.map(|rooms| RoomList { rooms }))
    }

    /// Release the storage handle. Called once, on process exit.
    pub async fn shutdown(&self) {
        self.db.close().await;
    }
}

fn envelope<T>(op: &str, result: Result<T>) -> Envelope<T> {
    if let Err(e) = &result {
        warn!("[Boundary] {} failed ({}): {}", op, e.kind(), e);
    }
    result.into()
}
