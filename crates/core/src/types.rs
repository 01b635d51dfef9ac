/// Backend record identifiers are opaque strings (the `_id` wire field).
pub type RecordId = String;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
