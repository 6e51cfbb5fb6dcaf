//! Scripted in-process Steam and EOS.
//!
//! Every SDK call is appended to a shared [`Journal`], so tests can assert
//! on exactly which calls were made and in which order. Behaviour is set up
//! front with builder methods:
//!
//! ```rust
//! use handoff_platform::sim::{Journal, SimEos, SimSteam};
//! use handoff_platform::ResultCode;
//!
//! let journal = Journal::default();
//! let steam = SimSteam::new(journal.clone()).with_ticket(vec![7; 512]);
//! let eos = SimEos::new(journal.clone())
//!     .with_login_result(ResultCode::InvalidAuth)
//!     .with_login_delay_ticks(3);
//! # let _ = (steam, eos);
//! ```
//!
//! The sim is single-threaded (`Rc`/`RefCell`), matching the thread model
//! the real SDKs require of their callers.

use std::cell::RefCell;
use std::rc::Rc;

use rand::Rng;
use tracing::trace;

use crate::{
    AuthTicketHandle, EosAuth, EosPlatform, EosSdk, EpicAccountId,
    InitializeOptions, LogCallback, LogCategory, LogLevel, LogMessage,
    LoginCallbackInfo, LoginCompletion, LoginOptions, LoginResponder,
    NetworkingIdentity, PlatformError, PlatformOptions, ResultCode,
    SteamClient, login_channel,
};

// ---------------------------------------------------------------------------
// Journal
// ---------------------------------------------------------------------------

/// One recorded SDK call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SdkCall {
    SteamInit,
    SteamTicket { capacity: usize },
    SteamShutdown,
    EosInitialize(InitializeOptions),
    EosSetLogLevel(LogCategory, LogLevel),
    EosSetLogCallback,
    EosCreate { product_id: String },
    EosShutdown,
    AuthInterface,
    Login(LoginOptions),
    Tick,
    Release,
}

/// Shared, ordered record of SDK calls. Cloning shares the same record.
#[derive(Debug, Clone, Default)]
pub struct Journal(Rc<RefCell<Vec<SdkCall>>>);

impl Journal {
    fn record(&self, call: SdkCall) {
        trace!(?call, "sim sdk call");
        self.0.borrow_mut().push(call);
    }

    /// Snapshot of every call so far.
    pub fn calls(&self) -> Vec<SdkCall> {
        self.0.borrow().clone()
    }

    /// How many recorded calls satisfy `pred`.
    pub fn count(&self, pred: impl Fn(&SdkCall) -> bool) -> usize {
        self.0.borrow().iter().filter(|c| pred(c)).count()
    }

    /// `true` if any recorded call satisfies `pred`.
    pub fn any(&self, pred: impl Fn(&SdkCall) -> bool) -> bool {
        self.0.borrow().iter().any(pred)
    }

    /// Every recorded login request, in order.
    pub fn logins(&self) -> Vec<LoginOptions> {
        self.0
            .borrow()
            .iter()
            .filter_map(|c| match c {
                SdkCall::Login(options) => Some(options.clone()),
                _ => None,
            })
            .collect()
    }

    /// Number of [`SdkCall::Tick`] entries.
    pub fn ticks(&self) -> usize {
        self.count(|c| matches!(c, SdkCall::Tick))
    }
}

// ---------------------------------------------------------------------------
// Steam
// ---------------------------------------------------------------------------

/// Size of a typical Steam auth session ticket.
const DEFAULT_TICKET_LEN: usize = 240;

/// Scripted Steam client.
#[derive(Debug)]
pub struct SimSteam {
    journal: Journal,
    init_error: Option<String>,
    ticket: Vec<u8>,
    reported_len: Option<u32>,
    next_handle: u32,
}

impl SimSteam {
    /// A Steam client that initializes and hands out a 240-byte ticket.
    pub fn new(journal: Journal) -> Self {
        Self {
            journal,
            init_error: None,
            ticket: (0..DEFAULT_TICKET_LEN).map(|i| i as u8).collect(),
            reported_len: None,
            next_handle: 1,
        }
    }

    /// Makes [`SteamClient::init`] fail with `reason`.
    pub fn failing_init(mut self, reason: impl Into<String>) -> Self {
        self.init_error = Some(reason.into());
        self
    }

    /// Sets the ticket bytes. An empty ticket makes Steam report zero bytes.
    pub fn with_ticket(mut self, ticket: Vec<u8>) -> Self {
        self.ticket = ticket;
        self
    }

    /// Overrides the byte count Steam reports, regardless of what it wrote.
    pub fn reporting_len(mut self, len: u32) -> Self {
        self.reported_len = Some(len);
        self
    }
}

impl SteamClient for SimSteam {
    fn init(&mut self) -> Result<(), PlatformError> {
        self.journal.record(SdkCall::SteamInit);
        match &self.init_error {
            Some(reason) => Err(PlatformError::SteamInit(reason.clone())),
            None => Ok(()),
        }
    }

    fn auth_session_ticket(
        &mut self,
        buf: &mut [u8],
        _identity: &NetworkingIdentity,
    ) -> (AuthTicketHandle, u32) {
        self.journal.record(SdkCall::SteamTicket {
            capacity: buf.len(),
        });

        let written = self.ticket.len().min(buf.len());
        buf[..written].copy_from_slice(&self.ticket[..written]);
        let reported = self.reported_len.unwrap_or(written as u32);

        if reported == 0 {
            return (AuthTicketHandle::INVALID, 0);
        }
        let handle = AuthTicketHandle(self.next_handle);
        self.next_handle += 1;
        (handle, reported)
    }

    fn shutdown(&mut self) {
        self.journal.record(SdkCall::SteamShutdown);
    }
}

// ---------------------------------------------------------------------------
// EOS
// ---------------------------------------------------------------------------

/// Log state shared between the SDK and the platforms it creates.
#[derive(Default)]
struct LogState {
    level: Option<LogLevel>,
    callback: Option<LogCallback>,
}

type SharedLog = Rc<RefCell<LogState>>;

/// Delivers `message` through the installed callback if the configured
/// level lets it through. The SDK default is `Warning`.
fn emit(log: &SharedLog, level: LogLevel, category: &str, message: &str) {
    let state = log.borrow();
    let threshold = state.level.unwrap_or(LogLevel::Warning);
    if level == LogLevel::Off || level > threshold {
        return;
    }
    if let Some(callback) = &state.callback {
        callback(&LogMessage {
            category: category.to_string(),
            message: message.to_string(),
            level,
        });
    }
}

/// What a scripted login does once its delay runs out.
#[derive(Debug, Clone, Copy)]
struct LoginScript {
    result: ResultCode,
    delay_ticks: u32,
}

/// Scripted EOS SDK.
pub struct SimEos {
    journal: Journal,
    init_result: ResultCode,
    create_fails: bool,
    auth_available: bool,
    login: LoginScript,
    log: SharedLog,
}

impl SimEos {
    /// An SDK where every call succeeds and logins complete on the first
    /// tick after they are issued.
    pub fn new(journal: Journal) -> Self {
        Self {
            journal,
            init_result: ResultCode::Success,
            create_fails: false,
            auth_available: true,
            login: LoginScript {
                result: ResultCode::Success,
                delay_ticks: 1,
            },
            log: SharedLog::default(),
        }
    }

    /// Result returned by [`EosSdk::initialize`].
    pub fn with_init_result(mut self, result: ResultCode) -> Self {
        self.init_result = result;
        self
    }

    /// Makes [`EosSdk::create`] return `None`.
    pub fn failing_create(mut self) -> Self {
        self.create_fails = true;
        self
    }

    /// Makes [`EosPlatform::auth_interface`] return `None`.
    pub fn without_auth(mut self) -> Self {
        self.auth_available = false;
        self
    }

    /// Result code every login completes with.
    pub fn with_login_result(mut self, result: ResultCode) -> Self {
        self.login.result = result;
        self
    }

    /// Number of ticks after the request before a login completes.
    /// Values below 1 are treated as 1.
    pub fn with_login_delay_ticks(mut self, ticks: u32) -> Self {
        self.login.delay_ticks = ticks.max(1);
        self
    }
}

impl EosSdk for SimEos {
    type Platform = SimPlatform;

    fn initialize(&mut self, options: &InitializeOptions) -> ResultCode {
        self.journal.record(SdkCall::EosInitialize(options.clone()));
        self.init_result
    }

    fn set_log_level(
        &mut self,
        category: LogCategory,
        level: LogLevel,
    ) -> ResultCode {
        self.journal.record(SdkCall::EosSetLogLevel(category, level));
        if category == LogCategory::AllCategories {
            self.log.borrow_mut().level = Some(level);
        }
        ResultCode::Success
    }

    fn set_log_callback(&mut self, callback: LogCallback) -> ResultCode {
        self.journal.record(SdkCall::EosSetLogCallback);
        self.log.borrow_mut().callback = Some(callback);
        ResultCode::Success
    }

    fn create(&mut self, options: &PlatformOptions) -> Option<SimPlatform> {
        self.journal.record(SdkCall::EosCreate {
            product_id: options.product_id.clone(),
        });
        if self.create_fails {
            emit(
                &self.log,
                LogLevel::Error,
                "LogEOS",
                "Failed to create platform",
            );
            return None;
        }
        emit(
            &self.log,
            LogLevel::Info,
            "LogEOS",
            &format!("Platform created for product {}", options.product_id),
        );
        Some(SimPlatform {
            journal: self.journal.clone(),
            auth: self.auth_available.then(|| SimAuth {
                journal: self.journal.clone(),
                script: self.login,
                log: Rc::clone(&self.log),
                pending: Vec::new(),
            }),
        })
    }

    fn shutdown(&mut self) -> ResultCode {
        self.journal.record(SdkCall::EosShutdown);
        ResultCode::Success
    }
}

/// Platform instance created by [`SimEos`].
pub struct SimPlatform {
    journal: Journal,
    auth: Option<SimAuth>,
}

impl SimPlatform {
    /// Logins issued but not yet completed.
    pub fn pending_logins(&self) -> usize {
        self.auth.as_ref().map_or(0, |a| a.pending.len())
    }
}

impl EosPlatform for SimPlatform {
    type Auth = SimAuth;

    fn auth_interface(&mut self) -> Option<&mut SimAuth> {
        self.journal.record(SdkCall::AuthInterface);
        self.auth.as_mut()
    }

    fn tick(&mut self) {
        self.journal.record(SdkCall::Tick);
        if let Some(auth) = &mut self.auth {
            auth.advance();
        }
    }

    fn release(self) {
        self.journal.record(SdkCall::Release);
    }
}

struct PendingSimLogin {
    responder: LoginResponder,
    ticks_left: u32,
}

/// Auth interface of a [`SimPlatform`].
pub struct SimAuth {
    journal: Journal,
    script: LoginScript,
    log: SharedLog,
    pending: Vec<PendingSimLogin>,
}

impl SimAuth {
    /// Counts down every pending login and fires the ones that are due.
    fn advance(&mut self) {
        let mut still_pending = Vec::with_capacity(self.pending.len());
        for mut login in self.pending.drain(..) {
            login.ticks_left -= 1;
            if login.ticks_left > 0 {
                still_pending.push(login);
                continue;
            }
            let info = if self.script.result.is_success() {
                LoginCallbackInfo::success(random_account_id())
            } else {
                LoginCallbackInfo::failure(self.script.result)
            };
            emit(
                &self.log,
                LogLevel::Verbose,
                "LogEOSAuth",
                &format!("Login completed: {}", info.result_code),
            );
            // The caller may have dropped its completion already.
            if login.responder.send(info).is_err() {
                trace!("sim login completed after its receiver was dropped");
            }
        }
        self.pending = still_pending;
    }
}

impl EosAuth for SimAuth {
    fn login(&mut self, options: &LoginOptions) -> LoginCompletion {
        self.journal.record(SdkCall::Login(options.clone()));
        emit(&self.log, LogLevel::Info, "LogEOSAuth", "Login requested");

        let (responder, completion) = login_channel();
        self.pending.push(PendingSimLogin {
            responder,
            ticks_left: self.script.delay_ticks,
        });
        completion
    }
}

/// Random 32-character hex id, the same shape as a real Epic account id.
fn random_account_id() -> EpicAccountId {
    let bytes: [u8; 16] = rand::rng().random();
    EpicAccountId(bytes.iter().map(|b| format!("{b:02x}")).collect())
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::{
        AuthScopeFlags, ClientCredentials, Credentials, LoginCredentialType,
    };

    fn platform_options() -> PlatformOptions {
        PlatformOptions {
            product_id: "prod".into(),
            sandbox_id: "sandbox".into(),
            deployment_id: "deploy".into(),
            client_credentials: ClientCredentials {
                client_id: "id".into(),
                client_secret: "secret".into(),
            },
        }
    }

    fn login_options() -> LoginOptions {
        LoginOptions {
            credentials: Credentials {
                credential_type: LoginCredentialType::ExternalAuth,
                external_type: None,
                id: None,
                token: "dG9rZW4=".into(),
            },
            scope_flags: AuthScopeFlags::BASIC_PROFILE,
        }
    }

    #[test]
    fn test_steam_ticket_truncates_to_buffer() {
        let journal = Journal::default();
        let mut steam = SimSteam::new(journal.clone()).with_ticket(vec![9; 64]);
        let mut buf = [0u8; 16];

        let (handle, written) =
            steam.auth_session_ticket(&mut buf, &NetworkingIdentity::Unset);

        assert!(handle.is_valid());
        assert_eq!(written, 16);
        assert_eq!(buf, [9; 16]);
        assert_eq!(
            journal.calls(),
            vec![SdkCall::SteamTicket { capacity: 16 }]
        );
    }

    #[test]
    fn test_steam_empty_ticket_reports_zero_and_invalid_handle() {
        let mut steam = SimSteam::new(Journal::default()).with_ticket(Vec::new());
        let mut buf = [0u8; 32];

        let (handle, written) =
            steam.auth_session_ticket(&mut buf, &NetworkingIdentity::Unset);

        assert_eq!(written, 0);
        assert_eq!(handle, AuthTicketHandle::INVALID);
    }

    #[test]
    fn test_steam_failing_init_returns_error() {
        let mut steam = SimSteam::new(Journal::default()).failing_init("no client");

        let err = steam.init().unwrap_err();

        assert!(err.to_string().contains("no client"));
    }

    #[test]
    fn test_login_completes_only_after_delay_ticks() {
        let journal = Journal::default();
        let mut eos = SimEos::new(journal.clone()).with_login_delay_ticks(2);
        let mut platform = eos.create(&platform_options()).expect("created");

        let mut completion = platform
            .auth_interface()
            .expect("auth available")
            .login(&login_options());

        platform.tick();
        assert!(completion.try_recv().is_err(), "one tick is not enough");
        assert_eq!(platform.pending_logins(), 1);

        platform.tick();
        let info = completion.try_recv().expect("completed on second tick");
        assert!(info.result_code.is_success());
        assert_eq!(info.local_user_id.expect("user id").0.len(), 32);
        assert_eq!(platform.pending_logins(), 0);
        assert_eq!(journal.ticks(), 2);
    }

    #[test]
    fn test_login_failure_has_no_user_id() {
        let mut eos = SimEos::new(Journal::default())
            .with_login_result(ResultCode::InvalidAuth);
        let mut platform = eos.create(&platform_options()).expect("created");
        let mut completion = platform
            .auth_interface()
            .expect("auth available")
            .login(&login_options());

        platform.tick();

        let info = completion.try_recv().expect("completed");
        assert_eq!(info, LoginCallbackInfo::failure(ResultCode::InvalidAuth));
    }

    #[test]
    fn test_dropped_completion_does_not_break_tick() {
        let mut eos = SimEos::new(Journal::default());
        let mut platform = eos.create(&platform_options()).expect("created");
        let completion = platform
            .auth_interface()
            .expect("auth available")
            .login(&login_options());
        drop(completion);

        platform.tick();

        assert_eq!(platform.pending_logins(), 0);
    }

    #[test]
    fn test_create_failure_and_missing_auth() {
        let mut failing = SimEos::new(Journal::default()).failing_create();
        assert!(failing.create(&platform_options()).is_none());

        let mut no_auth = SimEos::new(Journal::default()).without_auth();
        let mut platform = no_auth.create(&platform_options()).expect("created");
        assert!(platform.auth_interface().is_none());
    }

    #[test]
    fn test_log_callback_respects_level() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let mut eos = SimEos::new(Journal::default());
        eos.set_log_callback(Box::new(move |msg: &LogMessage| {
            sink.lock().unwrap().push(msg.message.clone());
        }));

        // Default threshold (Warning) hides the Info line from create.
        eos.create(&platform_options()).expect("created");
        assert!(seen.lock().unwrap().is_empty());

        eos.set_log_level(LogCategory::AllCategories, LogLevel::VeryVerbose);
        eos.create(&platform_options()).expect("created");
        assert_eq!(
            *seen.lock().unwrap(),
            vec!["Platform created for product prod".to_string()]
        );
    }
}
