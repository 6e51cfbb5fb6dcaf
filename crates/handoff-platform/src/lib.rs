//! Platform seams for Handoff.
//!
//! Handoff never links Steamworks or the EOS SDK directly. Instead this
//! crate describes the slice of each SDK the bridge needs as a set of
//! traits, plus the plain value types that cross those calls:
//!
//! - [`SteamClient`]: Steam init, session ticket, shutdown
//! - [`EosSdk`]: the EOS global entry points (init, logging, create)
//! - [`EosPlatform`]: a created platform instance (auth, tick, release)
//! - [`EosAuth`]: the auth interface and its asynchronous login
//!
//! A host links the real SDKs by implementing these traits over its
//! bindings. Tests and demos use the in-process implementations in
//! [`sim`] (feature `sim`).
//!
//! # Threading
//!
//! None of the traits require `Send`. Both SDKs expect every call to come
//! from the thread that drives the game loop, and the bridge honours that by
//! taking `&mut self` everywhere.
//!
//! # Feature Flags
//!
//! - `sim`: scripted in-process Steam and EOS implementations

mod error;
#[cfg(feature = "sim")]
pub mod sim;
mod types;

pub use error::PlatformError;
pub use types::{
    AuthScopeFlags, AuthTicketHandle, ClientCredentials, Credentials,
    EpicAccountId, ExternalCredentialType, InitializeOptions,
    LogCategory, LogLevel, LogMessage, LoginCallbackInfo,
    LoginCredentialType, LoginOptions, NetworkingIdentity, PlatformOptions,
    ResultCode,
};

use tokio::sync::oneshot;

/// Receiving half of a login completion.
///
/// The SDK keeps the matching [`LoginResponder`] and fires it from inside
/// [`EosPlatform::tick`]. Poll it with `try_recv` or await it.
pub type LoginCompletion = oneshot::Receiver<LoginCallbackInfo>;

/// Sending half of a login completion, held by the SDK until the login
/// finishes. Sending into a dropped completion is harmless.
pub type LoginResponder = oneshot::Sender<LoginCallbackInfo>;

/// Creates a connected responder/completion pair for one login request.
pub fn login_channel() -> (LoginResponder, LoginCompletion) {
    oneshot::channel()
}

/// Receives every log line the EOS SDK emits.
///
/// EOS may log from its own worker threads, so the callback must be
/// thread-safe even though the bridge itself is single-threaded.
pub type LogCallback = Box<dyn Fn(&LogMessage) + Send + Sync>;

/// The Steamworks client API.
pub trait SteamClient {
    /// Starts the Steam client library and connects to the running client.
    fn init(&mut self) -> Result<(), PlatformError>;

    /// Requests an auth session ticket for the local user.
    ///
    /// Steam writes the ticket into `buf` and returns its handle plus the
    /// number of bytes written. Zero bytes means no ticket was issued.
    fn auth_session_ticket(
        &mut self,
        buf: &mut [u8],
        identity: &NetworkingIdentity,
    ) -> (AuthTicketHandle, u32);

    /// Shuts the Steam client library down.
    fn shutdown(&mut self);
}

/// The global EOS SDK entry points.
pub trait EosSdk {
    /// The platform instance produced by [`create`](Self::create).
    type Platform: EosPlatform;

    /// Initializes the SDK. Must be called once per process.
    fn initialize(&mut self, options: &InitializeOptions) -> ResultCode;

    /// Sets the verbosity for one log category (or all of them).
    fn set_log_level(
        &mut self,
        category: LogCategory,
        level: LogLevel,
    ) -> ResultCode;

    /// Installs the callback that receives SDK log lines.
    fn set_log_callback(&mut self, callback: LogCallback) -> ResultCode;

    /// Creates a platform instance, or `None` if the SDK refused.
    fn create(&mut self, options: &PlatformOptions) -> Option<Self::Platform>;

    /// Tears the SDK down. Every platform must be released first.
    fn shutdown(&mut self) -> ResultCode;
}

/// A live EOS platform instance.
pub trait EosPlatform {
    /// The auth interface type owned by this platform.
    type Auth: EosAuth;

    /// Returns the auth interface, or `None` if the SDK could not provide one.
    fn auth_interface(&mut self) -> Option<&mut Self::Auth>;

    /// Advances the SDK: performs pending I/O and fires queued completions
    /// on the calling thread.
    fn tick(&mut self);

    /// Releases the instance. Consumes it so it cannot be ticked afterwards.
    fn release(self);
}

/// The EOS auth interface.
pub trait EosAuth {
    /// Starts an asynchronous login.
    ///
    /// Returns immediately. The completion resolves during a later
    /// [`EosPlatform::tick`].
    fn login(&mut self, options: &LoginOptions) -> LoginCompletion;
}
