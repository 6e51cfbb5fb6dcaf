//! Credential exchange: presenting a Steam ticket to EOS.
//!
//! The login itself is asynchronous inside the SDK. [`begin_login`] issues
//! it and returns a [`PendingLogin`]; the SDK resolves it later, from inside
//! a platform tick. Callers either [`poll`](PendingLogin::poll) it after
//! each tick (the frame-driven path the bridge uses) or
//! [`wait`](PendingLogin::wait) on it from async code.

use handoff_platform::{
    AuthScopeFlags, Credentials, EosAuth, EpicAccountId,
    ExternalCredentialType, LoginCallbackInfo, LoginCompletion,
    LoginCredentialType, LoginOptions, ResultCode,
};
use tokio::sync::oneshot::error::TryRecvError;
use tracing::{debug, warn};

use crate::{ExternalToken, SessionError};

/// Scopes requested for every Steam-backed login.
pub const LOGIN_SCOPES: AuthScopeFlags = AuthScopeFlags::BASIC_PROFILE
    .union(AuthScopeFlags::FRIENDS_LIST)
    .union(AuthScopeFlags::PRESENCE);

/// Builds the login request for a Steam session ticket.
pub fn steam_login_options(token: &ExternalToken) -> LoginOptions {
    LoginOptions {
        credentials: Credentials {
            credential_type: LoginCredentialType::ExternalAuth,
            external_type: Some(ExternalCredentialType::SteamSessionTicket),
            id: None,
            token: token.as_str().to_string(),
        },
        scope_flags: LOGIN_SCOPES,
    }
}

/// Issues the login and returns without waiting for it.
pub fn begin_login<A: EosAuth>(auth: &mut A, token: &ExternalToken) -> PendingLogin {
    let options = steam_login_options(token);
    debug!(
        token_len = token.len(),
        scopes = ?options.scope_flags,
        "issuing eos external-auth login"
    );
    PendingLogin {
        completion: auth.login(&options),
    }
}

/// How a finished login turned out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginOutcome {
    LoggedIn(EpicAccountId),
    Failed(ResultCode),
}

impl From<LoginCallbackInfo> for LoginOutcome {
    fn from(info: LoginCallbackInfo) -> Self {
        match (info.result_code, info.local_user_id) {
            (ResultCode::Success, Some(id)) => Self::LoggedIn(id),
            (ResultCode::Success, None) => {
                // A success with no account is unusable downstream.
                warn!("eos reported login success without a user id");
                Self::Failed(ResultCode::UnexpectedError)
            }
            (code, _) => Self::Failed(code),
        }
    }
}

/// Result of polling a [`PendingLogin`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginPoll {
    /// The SDK has not completed the login yet.
    Pending,
    /// The login completed.
    Ready(LoginOutcome),
    /// The SDK dropped the request without completing it.
    Abandoned,
}

/// An EOS login that has been issued but not observed as complete.
#[derive(Debug)]
pub struct PendingLogin {
    completion: LoginCompletion,
}

impl PendingLogin {
    /// Wraps a raw SDK completion.
    pub fn new(completion: LoginCompletion) -> Self {
        Self { completion }
    }

    /// Checks for completion without blocking. Call after each platform
    /// tick; once this returns `Ready` or `Abandoned` the login is spent.
    pub fn poll(&mut self) -> LoginPoll {
        match self.completion.try_recv() {
            Ok(info) => LoginPoll::Ready(info.into()),
            Err(TryRecvError::Empty) => LoginPoll::Pending,
            Err(TryRecvError::Closed) => LoginPoll::Abandoned,
        }
    }

    /// Waits for completion. Something must still be ticking the platform
    /// or this never resolves.
    ///
    /// # Errors
    /// - [`SessionError::LoginFailed`]: EOS rejected the login
    /// - [`SessionError::LoginAbandoned`]: the SDK dropped the request
    pub async fn wait(self) -> Result<EpicAccountId, SessionError> {
        let info = self
            .completion
            .await
            .map_err(|_| SessionError::LoginAbandoned)?;
        match LoginOutcome::from(info) {
            LoginOutcome::LoggedIn(id) => Ok(id),
            LoginOutcome::Failed(code) => Err(SessionError::LoginFailed(code)),
        }
    }
}

#[cfg(test)]
mod tests {
    use handoff_platform::login_channel;

    use super::*;

    #[test]
    fn test_login_scopes_are_profile_friends_presence() {
        assert_eq!(
            LOGIN_SCOPES,
            AuthScopeFlags::BASIC_PROFILE
                | AuthScopeFlags::FRIENDS_LIST
                | AuthScopeFlags::PRESENCE
        );
        assert!(!LOGIN_SCOPES.contains(AuthScopeFlags::EMAIL));
    }

    #[test]
    fn test_outcome_from_success_without_id_is_failure() {
        let info = LoginCallbackInfo {
            result_code: ResultCode::Success,
            local_user_id: None,
        };
        assert_eq!(
            LoginOutcome::from(info),
            LoginOutcome::Failed(ResultCode::UnexpectedError)
        );
    }

    #[test]
    fn test_poll_pending_then_ready() {
        let (tx, rx) = login_channel();
        let mut pending = PendingLogin::new(rx);
        assert_eq!(pending.poll(), LoginPoll::Pending);

        tx.send(LoginCallbackInfo::success(EpicAccountId("abc".into())))
            .unwrap();

        assert_eq!(
            pending.poll(),
            LoginPoll::Ready(LoginOutcome::LoggedIn(EpicAccountId("abc".into())))
        );
    }

    #[test]
    fn test_poll_dropped_responder_is_abandoned() {
        let (tx, rx) = login_channel();
        let mut pending = PendingLogin::new(rx);

        drop(tx);

        assert_eq!(pending.poll(), LoginPoll::Abandoned);
    }

    #[tokio::test]
    async fn test_wait_resolves_failure_code() {
        let (tx, rx) = login_channel();
        tx.send(LoginCallbackInfo::failure(ResultCode::AccessDenied))
            .unwrap();

        let result = PendingLogin::new(rx).wait().await;

        assert!(matches!(
            result,
            Err(SessionError::LoginFailed(ResultCode::AccessDenied))
        ));
    }

    #[tokio::test]
    async fn test_wait_dropped_responder_is_abandoned() {
        let (tx, rx) = login_channel();
        drop(tx);

        let result = PendingLogin::new(rx).wait().await;

        assert!(matches!(result, Err(SessionError::LoginAbandoned)));
    }
}
