//! Error types for the session layer.

use handoff_platform::ResultCode;

/// Errors that can occur while acquiring or exchanging a credential.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// Steam reported zero bytes written: no ticket was issued.
    #[error("steam returned an empty auth session ticket")]
    EmptyTicket,

    /// Steam claimed to write more bytes than the buffer holds.
    /// The buffer contents cannot be trusted.
    #[error("steam reported {written} ticket bytes for a {capacity}-byte buffer")]
    TicketOverflow { written: usize, capacity: usize },

    /// EOS finished the login with a non-success code.
    #[error("eos login failed: {0}")]
    LoginFailed(ResultCode),

    /// The SDK dropped the login without ever completing it.
    #[error("eos login was abandoned before completing")]
    LoginAbandoned,
}
