//! SQL DDL for initializing the database schema.

/// `items` table. `AUTOINCREMENT` keeps ids of deleted rows from being handed out again.
pub const SQLITE_INIT: &str = r#"
CREATE TABLE IF NOT EXISTS items (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    description TEXT
);
"#;
