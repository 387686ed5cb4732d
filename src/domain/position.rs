use serde::{Deserialize, Serialize};

/// A slot in a column: the column id plus a zero-based index into its cards
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    #[serde(
        rename = "columnId",
        alias = "fromColumnId",
        alias = "toColumnId"
    )]
    pub column_id: i64,
    #[serde(alias = "fromPosition", alias = "toPosition")]
    pub position: usize,
}

impl Position {
    pub fn new(column_id: i64, position: usize) -> Self {
        Self {
            column_id,
            position,
        }
    }

    /// Top of the given column
    pub fn top(column_id: i64) -> Self {
        Self::new(column_id, 0)
    }
}
