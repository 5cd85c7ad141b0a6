//! Errors of the simulator session.
use thiserror::Error;

/// Errors raised while talking to a training service.
#[derive(Error, Debug, PartialEq)]
pub enum SessionError {
    /// The training service rejected a request or has nothing more to send.
    #[error("Training service error: {0}")]
    Service(String),

    /// The simulator interface is not usable.
    #[error("Simulator interface error: {0}")]
    Interface(String),
}
