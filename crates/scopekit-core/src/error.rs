/// Failures a scope request can end in.
///
/// Every variant is recoverable: the request is answered with an error and
/// no partial grid.
#[derive(Debug, thiserror::Error)]
pub enum ScopeError {
    #[error("Invalid scope type: {0}")]
    InvalidScopeType(String),
    /// Unrecognised scope variant (waveform mode, vectorscope policy).
    #[error("invalid {name}: {value}")]
    InvalidOption { name: &'static str, value: String },
    #[error("malformed image: {reason}")]
    MalformedImage {
        reason: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
    #[error("computation fault: {0}")]
    ComputationFault(String),
}

impl ScopeError {
    pub(crate) fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedImage {
            reason: reason.into(),
            source: None,
        }
    }

    /// Malformed image caused by a lower-level decoding error.
    pub fn malformed_with<E>(reason: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::MalformedImage {
            reason: reason.into(),
            source: Some(Box::new(source)),
        }
    }
}

pub type ScopeResult<T> = Result<T, ScopeError>;
