//! Value types exchanged with Steamworks and the EOS SDK.
//!
//! These mirror the SDK structs closely enough that a binding adapter is a
//! field-by-field copy, but they are plain owned Rust values: no raw
//! pointers, no lifetimes tied to SDK memory.

use std::fmt;
use std::ops::{BitOr, BitOrAssign};

use crate::PlatformError;

// ---------------------------------------------------------------------------
// Result codes
// ---------------------------------------------------------------------------

/// Outcome of an EOS call.
///
/// Only the codes the bridge can plausibly see are named. Anything else
/// arrives as [`ResultCode::Other`] with the raw SDK value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResultCode {
    Success,
    NoConnection,
    InvalidCredentials,
    InvalidUser,
    InvalidAuth,
    AccessDenied,
    InvalidParameters,
    NotConfigured,
    AlreadyConfigured,
    TimedOut,
    Canceled,
    UnexpectedError,
    /// A code without a named variant.
    Other(i32),
}

impl ResultCode {
    /// `true` only for [`ResultCode::Success`].
    pub fn is_success(self) -> bool {
        matches!(self, Self::Success)
    }

    /// Converts a non-success code into a [`PlatformError::Sdk`] tagged
    /// with the call that produced it.
    pub fn check(self, operation: &'static str) -> Result<(), PlatformError> {
        if self.is_success() {
            Ok(())
        } else {
            Err(PlatformError::Sdk {
                operation,
                code: self,
            })
        }
    }
}

impl fmt::Display for ResultCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Other(raw) => write!(f, "Result({raw})"),
            named => fmt::Debug::fmt(named, f),
        }
    }
}

// ---------------------------------------------------------------------------
// Logging
// ---------------------------------------------------------------------------

/// EOS log verbosity, ordered from quietest to noisiest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LogLevel {
    Off,
    Fatal,
    Error,
    Warning,
    Info,
    Verbose,
    VeryVerbose,
}

/// EOS log category selector for [`crate::EosSdk::set_log_level`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogCategory {
    Core,
    Auth,
    Http,
    Messaging,
    Overlay,
    /// Every category at once.
    AllCategories,
}

/// A single log line from the EOS SDK.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogMessage {
    /// SDK category name, e.g. `"LogEOSAuth"`.
    pub category: String,
    pub message: String,
    pub level: LogLevel,
}

// ---------------------------------------------------------------------------
// Platform creation
// ---------------------------------------------------------------------------

/// Arguments to the global `EOS_Initialize` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InitializeOptions {
    pub product_name: String,
    pub product_version: String,
}

/// Client id/secret pair issued by the EOS developer portal.
#[derive(Clone, PartialEq, Eq)]
pub struct ClientCredentials {
    pub client_id: String,
    pub client_secret: String,
}

impl fmt::Debug for ClientCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientCredentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .finish()
    }
}

/// Arguments to `EOS_Platform_Create`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformOptions {
    pub product_id: String,
    pub sandbox_id: String,
    pub deployment_id: String,
    pub client_credentials: ClientCredentials,
}

// ---------------------------------------------------------------------------
// Auth
// ---------------------------------------------------------------------------

/// How a login proves who the user is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LoginCredentialType {
    Password,
    ExchangeCode,
    PersistentAuth,
    DeviceCode,
    Developer,
    RefreshToken,
    AccountPortal,
    /// Authority is another platform's proof of identity.
    ExternalAuth,
}

/// Which platform issued an external credential.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExternalCredentialType {
    /// Steam encrypted app ticket.
    SteamAppTicket,
    /// Steam auth session ticket (`GetAuthSessionTicket`).
    SteamSessionTicket,
    DiscordAccessToken,
    GogSessionTicket,
}

/// Login credentials.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub credential_type: LoginCredentialType,
    /// Only meaningful for [`LoginCredentialType::ExternalAuth`].
    pub external_type: Option<ExternalCredentialType>,
    /// Account id for credential types that need one.
    pub id: Option<String>,
    pub token: String,
}

/// Bitset of data categories a login is allowed to read.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct AuthScopeFlags(u32);

impl AuthScopeFlags {
    pub const NO_FLAGS: Self = Self(0);
    pub const BASIC_PROFILE: Self = Self(0x1);
    pub const FRIENDS_LIST: Self = Self(0x2);
    pub const PRESENCE: Self = Self(0x4);
    pub const FRIENDS_MANAGEMENT: Self = Self(0x8);
    pub const EMAIL: Self = Self(0x10);
    pub const COUNTRY: Self = Self(0x20);

    const NAMED: [(Self, &'static str); 6] = [
        (Self::BASIC_PROFILE, "BasicProfile"),
        (Self::FRIENDS_LIST, "FriendsList"),
        (Self::PRESENCE, "Presence"),
        (Self::FRIENDS_MANAGEMENT, "FriendsManagement"),
        (Self::EMAIL, "Email"),
        (Self::COUNTRY, "Country"),
    ];

    /// Raw SDK bit pattern.
    pub const fn bits(self) -> u32 {
        self.0
    }

    /// Builds flags from a raw SDK bit pattern.
    pub const fn from_bits(bits: u32) -> Self {
        Self(bits)
    }

    /// Union of two flag sets. Usable in `const` context, unlike `|`.
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    /// `true` if every bit of `other` is set in `self`.
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl BitOr for AuthScopeFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for AuthScopeFlags {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl fmt::Debug for AuthScopeFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("NoFlags");
        }
        let mut first = true;
        let mut known = 0;
        for (flag, name) in Self::NAMED {
            if self.contains(flag) {
                if !first {
                    f.write_str(" | ")?;
                }
                f.write_str(name)?;
                first = false;
                known |= flag.0;
            }
        }
        let unknown = self.0 & !known;
        if unknown != 0 {
            if !first {
                f.write_str(" | ")?;
            }
            write!(f, "{unknown:#x}")?;
        }
        Ok(())
    }
}

/// Arguments to `EOS_Auth_Login`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginOptions {
    pub credentials: Credentials,
    pub scope_flags: AuthScopeFlags,
}

/// An Epic account id as returned by a successful login.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EpicAccountId(pub String);

impl fmt::Display for EpicAccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// What the SDK reports when a login finishes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCallbackInfo {
    pub result_code: ResultCode,
    /// Set only when `result_code` is `Success`.
    pub local_user_id: Option<EpicAccountId>,
}

impl LoginCallbackInfo {
    pub fn success(local_user_id: EpicAccountId) -> Self {
        Self {
            result_code: ResultCode::Success,
            local_user_id: Some(local_user_id),
        }
    }

    pub fn failure(result_code: ResultCode) -> Self {
        Self {
            result_code,
            local_user_id: None,
        }
    }
}

// ---------------------------------------------------------------------------
// Steam
// ---------------------------------------------------------------------------

/// Handle Steam returns alongside an auth session ticket. Needed to cancel
/// the ticket later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AuthTicketHandle(pub u32);

impl AuthTicketHandle {
    /// `k_HAuthTicketInvalid`.
    pub const INVALID: Self = Self(0);

    pub fn is_valid(self) -> bool {
        self != Self::INVALID
    }
}

/// Who the ticket is meant for. `Unset` means "any remote party", which is
/// what a ticket destined for a third-party backend needs, and the only
/// recipient the bridge asks Steam for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NetworkingIdentity {
    #[default]
    Unset,
}
