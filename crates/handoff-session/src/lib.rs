//! Steam → EOS credential handling for Handoff.
//!
//! This crate owns the two halves of the identity handoff that involve
//! actual data rather than SDK lifecycle calls:
//!
//! 1. **Proof acquisition**: asking Steam for an auth session ticket and
//!    turning the raw buffer into an [`IdentityProof`], then into the
//!    base64 [`ExternalToken`] EOS expects
//! 2. **Credential exchange**: presenting that token to the EOS auth
//!    interface and tracking the in-flight login as a [`PendingLogin`]
//!
//! # How it fits in the stack
//!
//! ```text
//! Bridge (above)  ← sequences SDK init, owns the platform, pumps ticks
//!     ↕
//! Session Layer (this crate)  ← ticket bytes, login request, completion
//!     ↕
//! Platform Layer (below)  ← SteamClient / EosAuth traits and SDK types
//! ```

mod error;
mod exchange;
mod proof;

pub use error::SessionError;
pub use exchange::{
    LOGIN_SCOPES, LoginOutcome, LoginPoll, PendingLogin, begin_login,
    steam_login_options,
};
pub use proof::{DEFAULT_TICKET_CAPACITY, ExternalToken, IdentityProof};
