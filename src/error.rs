use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, KanbanError>;

#[derive(Debug, Error)]
pub enum KanbanError {
    #[error("Column not found: {id}")]
    ColumnNotFound { id: i64 },

    #[error("Card {id} not found in column {column}")]
    CardNotFound { id: i64, column: i64 },

    #[error("Card title must not be empty")]
    EmptyTitle,

    #[error("Invalid value for {field}: {message}")]
    InvalidArgument { field: String, message: String },

    #[error("Card id already in use: {id}")]
    DuplicateCardId { id: i64 },

    #[error("Column id already in use: {id}")]
    DuplicateColumnId { id: i64 },

    #[error("Card {id} is not at position {index} of column {column}")]
    StaleCard { id: i64, column: i64, index: usize },

    #[error("Card id space exhausted")]
    IdsExhausted,

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl KanbanError {
    pub fn invalid_argument(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Coarse classification reported across the command boundary
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::ColumnNotFound { .. } | Self::CardNotFound { .. } => ErrorKind::NotFound,
            Self::EmptyTitle | Self::InvalidArgument { .. } | Self::Json(_) => {
                ErrorKind::InvalidArgument
            }
            Self::DuplicateCardId { .. } | Self::DuplicateColumnId { .. } | Self::StaleCard { .. } => {
                ErrorKind::Conflict
            }
            Self::IdsExhausted | Self::Config(_) => ErrorKind::Internal,
        }
    }
}

/// Error classes a caller can branch on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorKind {
    NotFound,
    InvalidArgument,
    Conflict,
    Internal,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound => write!(f, "NotFound"),
            Self::InvalidArgument => write!(f, "InvalidArgument"),
            Self::Conflict => write!(f, "Conflict"),
            Self::Internal => write!(f, "Internal"),
        }
    }
}
