//! Unified error type for the bridge.

use std::fmt;

use handoff_platform::PlatformError;
use handoff_session::SessionError;

use crate::ConfigError;

/// The handshake step a failure happened in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureStage {
    SteamInit,
    Ticket,
    EosInit,
    PlatformCreate,
    AuthInterface,
}

impl fmt::Display for FailureStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::SteamInit => "steam-init",
            Self::Ticket => "ticket",
            Self::EosInit => "eos-init",
            Self::PlatformCreate => "platform-create",
            Self::AuthInterface => "auth-interface",
        };
        f.write_str(name)
    }
}

/// Errors returned by [`Bridge`](crate::Bridge) operations.
///
/// Handshake failures are also logged at error level by the bridge before
/// they are returned, so a host may ignore the `Result` entirely. Login
/// completes later, so its failures show up in
/// [`BridgeState`](crate::BridgeState) instead.
#[derive(Debug, thiserror::Error)]
pub enum BridgeError {
    #[error("failed to initialize steamworks: {0}")]
    SteamInit(#[source] PlatformError),

    #[error("failed to acquire steam auth session ticket: {0}")]
    Ticket(#[source] SessionError),

    #[error("failed to initialize eos platform: {0}")]
    EosInit(#[source] PlatformError),

    #[error("failed to create eos platform")]
    PlatformCreate,

    #[error("eos auth interface is not available")]
    AuthUnavailable,

    #[error("bridge was already started")]
    AlreadyStarted,

    #[error("bridge has been shut down")]
    ShutDown,

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl BridgeError {
    /// The handshake step this error belongs to, if any.
    pub fn stage(&self) -> Option<FailureStage> {
        match self {
            Self::SteamInit(_) => Some(FailureStage::SteamInit),
            Self::Ticket(_) => Some(FailureStage::Ticket),
            Self::EosInit(_) => Some(FailureStage::EosInit),
            Self::PlatformCreate => Some(FailureStage::PlatformCreate),
            Self::AuthUnavailable => Some(FailureStage::AuthInterface),
            Self::AlreadyStarted | Self::ShutDown | Self::Config(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use handoff_platform::ResultCode;

    use super::*;

    #[test]
    fn test_stage_maps_each_handshake_error() {
        let err = BridgeError::SteamInit(PlatformError::SteamInit("x".into()));
        assert_eq!(err.stage(), Some(FailureStage::SteamInit));
        assert_eq!(
            BridgeError::AuthUnavailable.stage(),
            Some(FailureStage::AuthInterface)
        );
        assert_eq!(
            BridgeError::Ticket(SessionError::EmptyTicket).stage(),
            Some(FailureStage::Ticket)
        );
        assert_eq!(BridgeError::AlreadyStarted.stage(), None);
    }

    #[test]
    fn test_display_includes_source_message() {
        let err = BridgeError::EosInit(PlatformError::Sdk {
            operation: "EOS_Initialize",
            code: ResultCode::AlreadyConfigured,
        });
        assert_eq!(
            err.to_string(),
            "failed to initialize eos platform: EOS_Initialize returned AlreadyConfigured"
        );
    }

    #[test]
    fn test_from_config_error_is_transparent() {
        let parse = serde_json::from_str::<u8>("nope").unwrap_err();
        let err: BridgeError = ConfigError::Parse(parse).into();
        assert!(matches!(err, BridgeError::Config(_)));
        assert!(err.to_string().starts_with("invalid config:"));
    }
}
