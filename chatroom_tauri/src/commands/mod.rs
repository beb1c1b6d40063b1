//! Tauri Commands
//!
//! The boundary operations the display process can invoke. Each command always
//! resolves; failures travel inside the envelope as `{ success: false, error }`.

use chatroom_core::{Backend, Envelope, RoomCreated, RoomList, UserPayload};
use tauri::State;

/// App state owning the backend (and through it, the storage handle)
pub struct ChatAppState {
    pub backend: Backend,
}

#[tauri::command]
pub async fn register(
    username: String,
    password: String,
    state: State<'_, ChatAppState>,
) -> Result<Envelope<UserPayload>, String> {
    Ok(state.backend.register(&username, &password).await)
}

#[tauri::command]
pub async fn login(
    username: String,
    password: String,
    state: State<'_, ChatAppState>,
) -> Result<Envelope<UserPayload>, String> {
    Ok(state.backend.login(&username, &password).await)
}

#[tauri::command]
pub async fn create_room(
    room_name: String,
    state: State<'_, ChatAppState>,
) -> Result<Envelope<RoomCreated>, String> {
    Ok(state.backend.create_room(&room_name).await)
}

#[tauri::command]
pub async fn get_rooms(state: State<'_, ChatAppState>) -> Result<Envelope<RoomList>, String> {
    Ok(state.backend.get_rooms().await)
}
