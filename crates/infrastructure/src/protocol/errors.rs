use thiserror::Error;

/// Wire-level failures. Status clients fold every one of these into an
/// offline result; the Votifier client maps them onto vote errors.
#[derive(Error, Debug)]
pub enum ProtocolError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Timed out")]
    Timeout,

    #[error("Malformed response: {0}")]
    Malformed(String),

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Server only speaks the legacy ping")]
    LegacyServer,

    #[error("Server closed the connection without responding")]
    NoResponse,

    #[error("Rejected by server: {0}")]
    Rejected(String),

    #[error("Invalid key: {0}")]
    InvalidKey(String),
}

pub type ProtocolResult<T> = Result<T, ProtocolError>;
