pub mod board;
pub mod card;
pub mod position;

pub use board::{Board, BoardConfig, Column};
pub use card::{Card, CardId, NewCardRequest};
pub use position::Position;
