//! Errors crossing the core traits: transport calls ([`crate::Bot`]) and chain handlers.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DbotError {
    /// The transport rejected or failed a send, delete or acknowledge.
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Handler error: {0}")]
    Handler(#[from] HandlerError),
}

impl DbotError {
    pub fn transport(err: impl std::fmt::Display) -> Self {
        Self::Transport(err.to_string())
    }
}

#[derive(Error, Debug)]
pub enum HandlerError {
    /// A handler found the update inconsistent with what it expected.
    #[error("Unexpected state: {0}")]
    State(String),
}

pub type Result<T> = std::result::Result<T, DbotError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = DbotError::transport("Bad Request: message to delete not found");
        assert_eq!(
            err.to_string(),
            "Transport error: Bad Request: message to delete not found"
        );

        let err: DbotError = HandlerError::State("no session".to_string()).into();
        assert_eq!(err.to_string(), "Handler error: Unexpected state: no session");
    }
}
