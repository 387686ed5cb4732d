use crate::domain::card::{Card, CardId};
use crate::domain::position::Position;
use crate::error::{KanbanError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use tokio::fs;

/// A named, ordered sequence of cards. Order is the top-to-bottom display order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub cards: Vec<Card>,
}

impl Column {
    pub fn new(id: i64, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            cards: Vec::new(),
        }
    }

    pub fn with_card(mut self, card: Card) -> Self {
        self.cards.push(card);
        self
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Index of the card with the given id, if it lives in this column
    pub fn index_of(&self, id: CardId) -> Option<usize> {
        self.cards.iter().position(|card| card.id == id)
    }

    /// Inserts at `index`, clamped to append when past the end
    fn insert_clamped(&mut self, index: usize, card: Card) -> usize {
        let index = index.min(self.cards.len());
        self.cards.insert(index, card);
        index
    }
}

/// Seed used to build the board at startup
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardConfig {
    pub columns: Vec<Column>,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            columns: vec![
                Column::new(0, "Backlog")
                    .with_card(Card::new(0, "Add kanban board").with_description("Use react-kanban")),
                Column::new(1, "In Progress"),
            ],
        }
    }
}

impl BoardConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| KanbanError::Config(format!("invalid board seed: {}", e)))
    }

    /// Reads a JSON board seed from disk
    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).await.map_err(|e| {
            KanbanError::Config(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::from_json_str(&contents)
    }
}

/// The root aggregate: an ordered sequence of columns.
///
/// Every mutating method either applies completely or returns an error
/// with the board untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    pub columns: Vec<Column>,
}

impl Board {
    /// Builds a board from a seed, rejecting seeds that break the board invariants
    pub fn from_config(config: BoardConfig) -> Result<Self> {
        let has_blank_title = config
            .columns
            .iter()
            .flat_map(|col| col.cards.iter())
            .any(|card| card.title.trim().is_empty());
        if has_blank_title {
            return Err(KanbanError::EmptyTitle);
        }

        let board = Self {
            columns: config.columns,
        };
        board.validate()?;
        Ok(board)
    }

    /// Checks that column ids and card ids are each unique
    pub fn validate(&self) -> Result<()> {
        let mut column_ids = HashSet::new();
        let mut card_ids = HashSet::new();

        for column in &self.columns {
            if !column_ids.insert(column.id) {
                return Err(KanbanError::DuplicateColumnId { id: column.id });
            }
            for card in &column.cards {
                if !card_ids.insert(card.id) {
                    return Err(KanbanError::DuplicateCardId { id: card.id.value() });
                }
            }
        }

        Ok(())
    }

    pub fn column(&self, id: i64) -> Option<&Column> {
        self.columns.iter().find(|col| col.id == id)
    }

    fn column_mut(&mut self, id: i64) -> Result<&mut Column> {
        self.columns
            .iter_mut()
            .find(|col| col.id == id)
            .ok_or(KanbanError::ColumnNotFound { id })
    }

    fn require_column(&self, id: i64) -> Result<&Column> {
        self.column(id).ok_or(KanbanError::ColumnNotFound { id })
    }

    /// Current position of a card anywhere on the board
    pub fn find_card(&self, id: CardId) -> Option<Position> {
        self.columns.iter().find_map(|col| {
            col.index_of(id)
                .map(|index| Position::new(col.id, index))
        })
    }

    pub fn contains_card(&self, id: CardId) -> bool {
        self.find_card(id).is_some()
    }

    pub fn card_count(&self) -> usize {
        self.columns.iter().map(Column::len).sum()
    }

    /// Largest card id on the board, if any card exists
    pub fn max_card_id(&self) -> Option<CardId> {
        self.columns
            .iter()
            .flat_map(|col| col.cards.iter().map(|card| card.id))
            .max()
    }

    /// Inserts a card at `at`, shifting later cards down.
    ///
    /// Returns the position the card actually landed on after clamping.
    pub fn insert_card(&mut self, card: Card, at: Position) -> Result<Position> {
        self.require_column(at.column_id)?;
        if self.contains_card(card.id) {
            return Err(KanbanError::DuplicateCardId { id: card.id.value() });
        }

        let column = self.column_mut(at.column_id)?;
        let index = column.insert_clamped(at.position, card);
        Ok(Position::new(at.column_id, index))
    }

    /// Moves the card at `from` to `to`.
    ///
    /// The card is removed first and the destination index is clamped against
    /// the column as it stands after the removal, so a same-column move lands
    /// on exactly the slot named by `to.position`.
    pub fn move_card(&mut self, id: CardId, from: Position, to: Position) -> Result<Position> {
        let source = self.require_column(from.column_id)?;
        self.require_column(to.column_id)?;

        match source.cards.get(from.position) {
            Some(card) if card.id == id => {}
            _ => {
                return Err(KanbanError::StaleCard {
                    id: id.value(),
                    column: from.column_id,
                    index: from.position,
                })
            }
        }

        let card = self.column_mut(from.column_id)?.cards.remove(from.position);
        let index = self.column_mut(to.column_id)?.insert_clamped(to.position, card);
        Ok(Position::new(to.column_id, index))
    }

    /// Removes a card from the named column, shifting later cards up
    pub fn remove_card(&mut self, id: CardId, column_id: i64) -> Result<Card> {
        let column = self.column_mut(column_id)?;
        let index = column.index_of(id).ok_or(KanbanError::CardNotFound {
            id: id.value(),
            column: column_id,
        })?;
        Ok(column.cards.remove(index))
    }
}
