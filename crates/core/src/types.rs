/// All database primary keys are SQLite INTEGER (rowid) columns.
pub type DbId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Offsets into a match video, in seconds.
pub type Seconds = f64;
