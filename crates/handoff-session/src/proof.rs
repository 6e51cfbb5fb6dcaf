//! Identity proofs: Steam auth session tickets and their text encoding.
//!
//! Steam writes the ticket into a caller-supplied buffer and returns the
//! number of bytes it wrote. [`IdentityProof::acquire`] wraps that call and
//! turns its two failure signals (zero bytes, or more bytes than the buffer
//! holds) into [`SessionError`] values, so an `IdentityProof` that exists is
//! always non-empty and within capacity.

use std::fmt;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use handoff_platform::{AuthTicketHandle, NetworkingIdentity, SteamClient};

use crate::SessionError;

/// Buffer size handed to Steam. Session tickets are a few hundred bytes.
pub const DEFAULT_TICKET_CAPACITY: usize = 1024;

/// A Steam auth session ticket for the local user.
///
/// Invariant: `0 < len() <= capacity()`.
#[derive(Clone)]
pub struct IdentityProof {
    bytes: Vec<u8>,
    capacity: usize,
    handle: AuthTicketHandle,
}

impl IdentityProof {
    /// Asks Steam for a ticket using a `capacity`-byte buffer.
    ///
    /// # Errors
    /// - [`SessionError::EmptyTicket`]: Steam wrote nothing
    /// - [`SessionError::TicketOverflow`]: Steam reported more bytes than
    ///   the buffer holds
    pub fn acquire<S: SteamClient>(
        steam: &mut S,
        capacity: usize,
        identity: &NetworkingIdentity,
    ) -> Result<Self, SessionError> {
        let mut buf = vec![0u8; capacity];
        let (handle, reported) = steam.auth_session_ticket(&mut buf, identity);
        let written = usize::try_from(reported).unwrap_or(usize::MAX);
        if written > capacity {
            return Err(SessionError::TicketOverflow { written, capacity });
        }
        buf.truncate(written);
        Self::from_parts(buf, capacity, handle)
    }

    /// Builds a proof from bytes already copied out of a ticket buffer.
    ///
    /// # Errors
    /// Same as [`acquire`](Self::acquire).
    pub fn from_parts(
        bytes: Vec<u8>,
        capacity: usize,
        handle: AuthTicketHandle,
    ) -> Result<Self, SessionError> {
        if bytes.is_empty() {
            return Err(SessionError::EmptyTicket);
        }
        if bytes.len() > capacity {
            return Err(SessionError::TicketOverflow {
                written: bytes.len(),
                capacity,
            });
        }
        Ok(Self {
            bytes,
            capacity,
            handle,
        })
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Number of ticket bytes. Never zero.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Always `false`; present for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Size of the buffer Steam wrote into.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Steam's handle for this ticket, needed to cancel it.
    pub fn handle(&self) -> AuthTicketHandle {
        self.handle
    }

    /// Consumes the proof and encodes it as standard padded base64, the
    /// form EOS expects for a Steam session ticket.
    pub fn into_token(self) -> ExternalToken {
        ExternalToken(STANDARD.encode(&self.bytes))
    }
}

impl fmt::Debug for IdentityProof {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IdentityProof")
            .field("len", &self.bytes.len())
            .field("capacity", &self.capacity)
            .field("handle", &self.handle)
            .finish()
    }
}

/// Text-encoded identity proof, ready to hand to EOS as a login token.
#[derive(Clone, PartialEq, Eq)]
pub struct ExternalToken(String);

impl ExternalToken {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for ExternalToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ExternalToken({} chars)", self.0.len())
    }
}
