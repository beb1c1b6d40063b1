//! Success/error wrapper returned from every boundary operation.
//!
//! Serialized shapes:
//! ```text
//! { "success": true,  ...payload fields }
//! { "success": false, "error": "User not found", "kind": "user_not_found" }
//! ```

use serde::Serialize;

use crate::error::{ChatError, Result};
use crate::models::{Room, User};

#[derive(Debug, Clone, Serialize)]
pub struct Envelope<T> {
    pub success: bool,
    #[serde(flatten)]
    pub payload: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<&'static str>,
}

impl<T> Envelope<T> {
    pub fn ok(payload: T) -> Self {
        Self {
            success: true,
            payload: Some(payload),
            error: None,
            kind: None,
        }
    }

    pub fn err(error: &ChatError) -> Self {
        Self {
            success: false,
            payload: None,
            error: Some(error.to_string()),
            kind: Some(error.kind()),
        }
    }
}

impl<T> From<Result<T>> for Envelope<T> {
    fn from(result: Result<T>) -> Self {
        match result {
            Ok(payload) => Envelope::ok(payload),
            Err(e) => Envelope::err(&e),
        }
    }
}

/// Payload of `register` and `login`.
#[derive(Debug, Clone, Serialize)]
pub struct UserPayload {
    pub user: User,
}

/// Payload of `create_room`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomCreated {
    pub room_id: i64,
}

/// Payload of `get_rooms`.
#[derive(Debug, Clone, Serialize)]
pub struct RoomList {
    pub rooms: Vec<Room>,
}
