use std::path::PathBuf;

use thiserror::Error;

/// Construction-fatal errors raised while building a [`crate::dictionary::Dictionary`].
///
/// A missing frequency file is *not* represented here: per the construction
/// protocol it is recoverable (default-cost fallback, logged at `warn`).
#[derive(Debug, Error)]
pub enum DictionaryError {
    #[error("dictionary file not found or unreadable: {0}")]
    DictMissing(PathBuf, #[source] std::io::Error),

    #[error("frequency file {0} is not valid JSON")]
    FreqMalformed(PathBuf, #[source] serde_json::Error),

    #[error("failed to read frequency file {0}")]
    FreqUnreadable(PathBuf, #[source] std::io::Error),
}
