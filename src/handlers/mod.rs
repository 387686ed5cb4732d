//! Command handlers - the request/response boundary in front of the store.
//!
//! Each handler decodes its request, checks shape only, delegates to
//! [`BoardStore`] and maps failures to [`ErrorResponse`].

use crate::domain::{Board, NewCardRequest, Position};
use crate::error::{ErrorKind, KanbanError};
use crate::store::BoardStore;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;

pub mod requests;

pub use requests::{AddCardRequest, CardRef, ErrorResponse, MoveCardRequest, RemoveCardRequest};

pub const GET_BOARD: &str = "get_board";
pub const ADD_CARD: &str = "handle_add_card";
pub const MOVE_CARD: &str = "handle_move_card";
pub const REMOVE_CARD: &str = "handle_remove_card";

/// Logs and converts a store failure
fn reject(command: &str, err: KanbanError) -> ErrorResponse {
    let response = ErrorResponse::from(err);
    tracing::warn!(
        command,
        kind = %response.kind,
        error = %response.message,
        "Command failed"
    );
    response
}

/// Returns a snapshot of the whole board
pub async fn get_board(store: &BoardStore) -> Result<Board, ErrorResponse> {
    Ok(store.get_board().await)
}

/// Adds a card at the given slot
pub async fn handle_add_card(
    store: &BoardStore,
    card: NewCardRequest,
    pos: Position,
) -> Result<(), ErrorResponse> {
    tracing::info!(column = pos.column_id, index = pos.position, "Adding card");
    store
        .add_card(card, pos)
        .await
        .map(|_| ())
        .map_err(|e| reject(ADD_CARD, e))
}

/// Moves a card between slots
pub async fn handle_move_card(
    store: &BoardStore,
    card: CardRef,
    from: Position,
    to: Position,
) -> Result<(), ErrorResponse> {
    tracing::info!(card = %card.id, "Moving card");
    store
        .move_card(card.id, from, to)
        .await
        .map_err(|e| reject(MOVE_CARD, e))
}

/// Removes a card from a column
pub async fn handle_remove_card(
    store: &BoardStore,
    card: CardRef,
    column_id: i64,
) -> Result<(), ErrorResponse> {
    tracing::info!(card = %card.id, column = column_id, "Removing card");
    store
        .remove_card(card.id, column_id)
        .await
        .map_err(|e| reject(REMOVE_CARD, e))
}

/// Routes a named command with JSON arguments
#[async_trait]
pub trait CommandHandler: Send + Sync {
    async fn dispatch(&self, command: &str, args: Value) -> Result<Value, ErrorResponse>;
}

/// The four board commands bound to one shared store
#[derive(Debug, Clone)]
pub struct BoardCommands {
    store: Arc<BoardStore>,
}

impl BoardCommands {
    pub fn new(store: Arc<BoardStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Arc<BoardStore> {
        &self.store
    }
}

fn decode<T: DeserializeOwned>(command: &str, args: Value) -> Result<T, ErrorResponse> {
    serde_json::from_value(args).map_err(|e| reject(command, KanbanError::from(e)))
}

fn encode<T: serde::Serialize>(command: &str, value: &T) -> Result<Value, ErrorResponse> {
    serde_json::to_value(value).map_err(|e| {
        tracing::warn!(command, error = %e, "Failed to encode response");
        ErrorResponse::new(ErrorKind::Internal, e.to_string())
    })
}

#[async_trait]
impl CommandHandler for BoardCommands {
    async fn dispatch(&self, command: &str, args: Value) -> Result<Value, ErrorResponse> {
        tracing::debug!(command, "Dispatching command");

        match command {
            GET_BOARD => {
                let board = get_board(&self.store).await?;
                encode(command, &board)
            }
            ADD_CARD => {
                let req: AddCardRequest = decode(command, args)?;
                handle_add_card(&self.store, req.card, req.pos).await?;
                Ok(Value::Null)
            }
            MOVE_CARD => {
                let req: MoveCardRequest = decode(command, args)?;
                handle_move_card(&self.store, req.card, req.from, req.to).await?;
                Ok(Value::Null)
            }
            REMOVE_CARD => {
                let req: RemoveCardRequest = decode(command, args)?;
                handle_remove_card(&self.store, req.card, req.column_id).await?;
                Ok(Value::Null)
            }
            _ => Err(reject(
                command,
                KanbanError::invalid_argument("command", format!("unknown command '{}'", command)),
            )),
        }
    }
}
