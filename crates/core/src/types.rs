/// All database primary keys are SQLite INTEGER (rowid-backed).
pub type DbId = i64;
