use sqlx::Error as SqlxError;

use crate::application::repos::RepoError;

/// Translate driver errors into the repository taxonomy. SQLite reports
/// constraint failures through the database message, so the mapping matches
/// on the message prefix rather than an error code.
pub(super) fn map_sqlx_error(err: SqlxError) -> RepoError {
    match err {
        SqlxError::RowNotFound => RepoError::NotFound,
        SqlxError::PoolTimedOut => RepoError::Timeout,
        SqlxError::Database(db) => {
            let message = db.message().to_string();
            if message.contains("UNIQUE constraint failed")
                || message.contains("CHECK constraint failed")
                || message.contains("FOREIGN KEY constraint failed")
            {
                RepoError::Integrity { message }
            } else {
                RepoError::Persistence(message)
            }
        }
        other => RepoError::Persistence(other.to_string()),
    }
}
