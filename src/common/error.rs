use thiserror::Error;

/// Console error taxonomy. Every failure is resolved where it is detected and
/// handed to the nearest caller; there is no retry anywhere in this layer.
#[derive(Debug, Error)]
pub enum ConsoleError {
    /// Missing or invalid command, context, or params. No remote calls made.
    #[error("{0}")]
    Parameter(String),

    /// Target node absent from the registry, or role/context mismatch.
    /// Raised before any request channel call.
    #[error("{0}")]
    Routing(String),

    /// A targeted node's command body reported failure; forwarded verbatim.
    #[error("{0}")]
    Remote(String),

    /// Filesystem validation failed (dump destination not writable).
    #[error("{0}")]
    Validation(String),

    /// Command verb not in the fixed command set.
    #[error("unknown command: {0}")]
    UnknownCommand(String),
}

impl ConsoleError {
    pub fn parameter(msg: impl Into<String>) -> Self {
        ConsoleError::Parameter(msg.into())
    }

    pub fn routing(msg: impl Into<String>) -> Self {
        ConsoleError::Routing(msg.into())
    }

    pub fn remote(msg: impl Into<String>) -> Self {
        ConsoleError::Remote(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        ConsoleError::Validation(msg.into())
    }
}
