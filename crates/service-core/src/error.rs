use thiserror::Error;

/// Error taxonomy for the service graph.
///
/// Connectors classify failures at the subscribe boundary; nothing here
/// propagates through listener fan-out. `Parse`, `UnknownProduct` and
/// `MissingDepth` are log-and-skip conditions, `InvalidTransition` leaves
/// the stored value unchanged, and `Io` is fatal for the input side only.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("malformed input line {line:?}: {reason}")]
    Parse { line: String, reason: String },

    #[error("unknown product: {0}")]
    UnknownProduct(String),

    #[error("order book for {0} is missing depth on one side")]
    MissingDepth(String),

    #[error("invalid transition for {key}: {from} -> {to}")]
    InvalidTransition {
        key: String,
        from: String,
        to: String,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl ServiceError {
    pub fn parse(line: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Parse {
            line: line.into(),
            reason: reason.into(),
        }
    }

    /// Whether the error should abort the feed that produced it.
    ///
    /// Per-line classification errors are skippable; IO errors are not.
    #[inline]
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Io(_))
    }
}
