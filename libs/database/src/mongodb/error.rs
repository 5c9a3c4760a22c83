use mongodb::error::{Error, ErrorKind, WriteFailure};

/// Server error code for a unique index violation.
pub const DUPLICATE_KEY_CODE: i32 = 11000;

/// Error type for MongoDB connection management
#[derive(Debug, thiserror::Error)]
pub enum MongoError {
    #[error("MongoDB error: {0}")]
    Mongo(#[from] Error),

    #[error("Connection failed: {0}")]
    ConnectionFailed(String),
}

/// True when `err` reports a unique index violation (E11000).
pub fn is_duplicate_key(err: &Error) -> bool {
    match err.kind.as_ref() {
        ErrorKind::Write(WriteFailure::WriteError(e)) => e.code == DUPLICATE_KEY_CODE,
        ErrorKind::Command(e) => e.code == DUPLICATE_KEY_CODE,
        _ => false,
    }
}
