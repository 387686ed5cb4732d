//! Wire records for the board commands.
//!
//! Field names follow what the front end sends over IPC: card records and
//! `{columnId, position}` slots, with `columnId` for removals.

use crate::domain::{CardId, NewCardRequest, Position};
use crate::error::{ErrorKind, KanbanError};
use serde::{Deserialize, Serialize};

/// Card reference sent with move and remove requests.
///
/// Only `id` is used; the rest is whatever the client last rendered.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CardRef {
    pub id: CardId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddCardRequest {
    pub card: NewCardRequest,
    pub pos: Position,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoveCardRequest {
    pub card: CardRef,
    pub from: Position,
    pub to: Position,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoveCardRequest {
    pub card: CardRef,
    #[serde(rename = "columnId")]
    pub column_id: i64,
}

/// Failure reported back across the command boundary
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub kind: ErrorKind,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl From<KanbanError> for ErrorResponse {
    fn from(err: KanbanError) -> Self {
        Self {
            kind: err.kind(),
            message: err.to_string(),
        }
    }
}

impl std::fmt::Display for ErrorResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}
