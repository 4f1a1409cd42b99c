use crate::error::ItemboxError;
use itembox_schema::Item;
use sqlx::FromRow;
use sqlx::sqlite::SqliteQueryResult;

#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct DbItem {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
}

impl From<DbItem> for Item {
    fn from(row: DbItem) -> Self {
        Self {
            id: row.id,
            name: row.name,
            description: row.description,
        }
    }
}

/// Result of an `UPDATE`/`DELETE` against the items table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WriteOutcome {
    pub rows_affected: u64,
}

impl WriteOutcome {
    /// Turns a write that touched no rows into `ItemboxError::NotFound`.
    pub fn require_row(self) -> Result<Self, ItemboxError> {
        if self.rows_affected == 0 {
            Err(ItemboxError::NotFound)
        } else {
            Ok(self)
        }
    }
}

impl From<SqliteQueryResult> for WriteOutcome {
    fn from(result: SqliteQueryResult) -> Self {
        Self {
            rows_affected: result.rows_affected(),
        }
    }
}
