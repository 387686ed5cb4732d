use crate::error::{KanbanError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for a card, unique across the whole board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardId(i64);

impl CardId {
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl From<i64> for CardId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A card as stored on the board
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub id: CardId,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Card {
    pub fn new(id: i64, title: impl Into<String>) -> Self {
        Self {
            id: CardId::new(id),
            title: title.into(),
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Input for creating a card.
///
/// `id` is advisory: the store keeps it only when no other card already
/// uses it, and allocates one itself when it is absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCardRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<CardId>,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl NewCardRequest {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: None,
            title: title.into(),
            description: None,
        }
    }

    pub fn with_id(mut self, id: i64) -> Self {
        self.id = Some(CardId::new(id));
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Rejects titles that are empty or whitespace only
    pub fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() {
            return Err(KanbanError::EmptyTitle);
        }
        Ok(())
    }

    /// Builds the stored card once the final id is known
    pub fn into_card(self, id: CardId) -> Card {
        Card {
            id,
            title: self.title,
            description: self.description,
        }
    }
}
