//! # Kanban Core
//!
//! In-memory board store behind a kanban front end.
//!
//! The front end renders columns of cards and forwards add, move and remove
//! actions as named commands (`get_board`, `handle_add_card`,
//! `handle_move_card`, `handle_remove_card`). This crate owns the board those
//! commands act on and keeps it consistent: every card lives in exactly one
//! column, card ids are unique, and a failed command leaves the board as it was.

pub mod domain;
pub mod error;
pub mod handlers;
pub mod store;

// Re-export commonly used types
pub use domain::{
    board::{Board, BoardConfig, Column},
    card::{Card, CardId, NewCardRequest},
    position::Position,
};
pub use error::{ErrorKind, KanbanError, Result};
pub use handlers::{BoardCommands, CommandHandler, ErrorResponse};
pub use store::{BoardStore, IdAllocator};
