//! The bridge: Steam ticket → EOS login, then keep EOS ticking.
//!
//! A host drives a [`Bridge`] with three calls that line up with its own
//! lifecycle:
//!
//! ```text
//! start()        scene start   steam init → ticket → eos init → create → login
//! update(dt)     every frame   tick eos every `tick_interval`, deliver login
//! shutdown()     scene end     release platform → eos shutdown → steam shutdown
//! ```
//!
//! Every handshake failure is logged at error level and stops the handshake.
//! Nothing is retried and partial state stays up until `shutdown`, so a
//! Steam session opened before an EOS failure is only closed at teardown.
//!
//! # Teardown during an in-flight login
//!
//! If `shutdown` runs before the login completes, the pending completion is
//! dropped. A completion the SDK fires afterwards lands on a closed channel
//! and is discarded; the host never sees a scene change after teardown.

use std::time::Duration;

use handoff_platform::{
    EosPlatform, EosSdk, EpicAccountId, LogCategory, LogLevel,
    NetworkingIdentity, ResultCode, SteamClient,
};
use handoff_session::{
    ExternalToken, IdentityProof, LoginOutcome, LoginPoll, PendingLogin,
    begin_login,
};
use handoff_tick::PumpTimer;
use tracing::{debug, error, info, warn};

use crate::logging::eos_log_callback;
use crate::{BridgeConfig, BridgeError, FailureStage, SceneHost};

/// Where the bridge is in its lifecycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BridgeState {
    /// Built, `start` not called yet.
    Idle,
    /// Login issued, waiting for EOS to complete it.
    LoggingIn,
    /// Login succeeded.
    LoggedIn(EpicAccountId),
    /// EOS completed the login with a failure code.
    LoginFailed(ResultCode),
    /// EOS dropped the login without completing it.
    LoginAbandoned,
    /// A synchronous handshake step failed.
    Failed(FailureStage),
    /// `shutdown` has run.
    ShutDown,
}

/// Bridges a Steam identity into an EOS session for one scene.
///
/// Owns the EOS platform instance: it exists exactly between a successful
/// create in [`start`](Self::start) and [`shutdown`](Self::shutdown). Only
/// one bridge should be live per process, since EOS can be initialized
/// only once.
///
/// Dropping the bridge runs `shutdown`.
pub struct Bridge<S, E, H>
where
    S: SteamClient,
    E: EosSdk,
    H: SceneHost,
{
    config: BridgeConfig,
    steam: S,
    eos: E,
    host: H,
    platform: Option<E::Platform>,
    pump: PumpTimer,
    login: Option<PendingLogin>,
    state: BridgeState,
    torn_down: bool,
}

impl<S, E, H> Bridge<S, E, H>
where
    S: SteamClient,
    E: EosSdk,
    H: SceneHost,
{
    /// Creates an idle bridge. No SDK is touched until [`start`](Self::start).
    pub fn new(config: BridgeConfig, steam: S, eos: E, host: H) -> Self {
        let config = config.validated();
        let pump = PumpTimer::with_interval(config.tick_interval());
        Self {
            config,
            steam,
            eos,
            host,
            platform: None,
            pump,
            login: None,
            state: BridgeState::Idle,
            torn_down: false,
        }
    }

    /// Runs the handshake up to issuing the EOS login.
    ///
    /// Returns once the login request is queued; the outcome arrives through
    /// later [`update`](Self::update) calls. On failure the error is logged,
    /// the state becomes [`BridgeState::Failed`], and the remaining steps are
    /// skipped.
    ///
    /// # Errors
    /// - [`BridgeError::AlreadyStarted`] / [`BridgeError::ShutDown`]: wrong
    ///   lifecycle state; no SDK call is made
    /// - any handshake error, see [`FailureStage`]
    pub fn start(&mut self) -> Result<(), BridgeError> {
        if self.torn_down {
            warn!("start called after shutdown");
            return Err(BridgeError::ShutDown);
        }
        if self.state != BridgeState::Idle {
            warn!(state = ?self.state, "start called twice");
            return Err(BridgeError::AlreadyStarted);
        }

        match self.handshake() {
            Ok(()) => Ok(()),
            Err(err) => {
                if let Some(stage) = err.stage() {
                    self.state = BridgeState::Failed(stage);
                    error!(%stage, error = %err, "identity handoff aborted");
                }
                Err(err)
            }
        }
    }

    fn handshake(&mut self) -> Result<(), BridgeError> {
        self.steam.init().map_err(BridgeError::SteamInit)?;
        info!("steamworks initialized");

        let proof = IdentityProof::acquire(
            &mut self.steam,
            self.config.ticket_capacity,
            &NetworkingIdentity::Unset,
        )
        .map_err(BridgeError::Ticket)?;
        info!(size = proof.len(), "steam auth session ticket acquired");
        let token = proof.into_token();

        self.initialize_eos()?;
        self.authenticate(&token)
    }

    fn initialize_eos(&mut self) -> Result<(), BridgeError> {
        info!(
            product = %self.config.product_name,
            version = %self.config.product_version,
            "initializing eos"
        );
        self.eos
            .initialize(&self.config.initialize_options())
            .check("EOS_Initialize")
            .map_err(BridgeError::EosInit)?;

        // Logging setup failures only cost diagnostics.
        if let Err(err) = self
            .eos
            .set_log_level(LogCategory::AllCategories, LogLevel::VeryVerbose)
            .check("EOS_Logging_SetLogLevel")
        {
            warn!(error = %err, "could not raise eos log level");
        }
        if let Err(err) = self
            .eos
            .set_log_callback(eos_log_callback())
            .check("EOS_Logging_SetCallback")
        {
            warn!(error = %err, "could not install eos log forwarding");
        }

        let platform = self
            .eos
            .create(&self.config.platform_options())
            .ok_or(BridgeError::PlatformCreate)?;
        self.platform = Some(platform);
        self.pump.reset();
        info!("eos platform initialized, logging in with steam");
        Ok(())
    }

    fn authenticate(&mut self, token: &ExternalToken) -> Result<(), BridgeError> {
        let platform = self
            .platform
            .as_mut()
            .ok_or(BridgeError::PlatformCreate)?;
        let auth = platform
            .auth_interface()
            .ok_or(BridgeError::AuthUnavailable)?;

        self.login = Some(begin_login(auth, token));
        self.state = BridgeState::LoggingIn;
        info!("eos login started");
        Ok(())
    }

    /// Feeds one frame's elapsed time.
    ///
    /// Ticks the EOS platform whenever the accumulated time reaches the
    /// configured interval, then delivers the login outcome if the tick
    /// completed it. Does nothing while no platform exists.
    pub fn update(&mut self, dt: Duration) {
        let Some(platform) = self.platform.as_mut() else {
            return;
        };
        if !self.pump.advance(dt) {
            return;
        }
        platform.tick();
        self.deliver_login();
    }

    fn deliver_login(&mut self) {
        let Some(pending) = self.login.as_mut() else {
            return;
        };
        match pending.poll() {
            LoginPoll::Pending => {}
            LoginPoll::Ready(outcome) => {
                self.login = None;
                self.on_login_complete(outcome);
            }
            LoginPoll::Abandoned => {
                self.login = None;
                self.state = BridgeState::LoginAbandoned;
                error!("eos dropped the login without completing it");
            }
        }
    }

    fn on_login_complete(&mut self, outcome: LoginOutcome) {
        match outcome {
            LoginOutcome::LoggedIn(user_id) => {
                info!(%user_id, "authenticated with eos");
                self.host.load_scene(&self.config.post_login_scene);
                self.state = BridgeState::LoggedIn(user_id);
            }
            LoginOutcome::Failed(code) => {
                error!(result = %code, "eos login failed");
                self.state = BridgeState::LoginFailed(code);
            }
        }
    }

    /// Releases the EOS platform, shuts EOS down, then shuts Steam down.
    ///
    /// Safe to call more than once; only the first call touches the SDKs.
    /// Steam is shut down even if the handshake never got that far.
    pub fn shutdown(&mut self) {
        if self.torn_down {
            debug!("shutdown already ran");
            return;
        }
        self.torn_down = true;

        if self.login.take().is_some() {
            warn!("eos login still in flight at shutdown, dropping it");
        }

        if let Some(platform) = self.platform.take() {
            platform.release();
            self.pump.reset();
            if let Err(err) = self.eos.shutdown().check("EOS_Shutdown") {
                warn!(error = %err, "eos shutdown reported an error");
            }
            debug!("eos platform released and shut down");
        }

        self.steam.shutdown();
        debug!("steamworks shut down");
        self.state = BridgeState::ShutDown;
    }

    /// Current lifecycle state.
    pub fn state(&self) -> &BridgeState {
        &self.state
    }

    /// The Epic account id, once login has succeeded.
    pub fn local_user_id(&self) -> Option<&EpicAccountId> {
        match &self.state {
            BridgeState::LoggedIn(id) => Some(id),
            _ => None,
        }
    }

    /// `true` while the bridge holds a live EOS platform.
    pub fn has_platform(&self) -> bool {
        self.platform.is_some()
    }

    /// The live EOS platform, if any.
    pub fn platform(&self) -> Option<&E::Platform> {
        self.platform.as_ref()
    }

    /// `true` between issuing the login and observing its completion.
    pub fn login_in_flight(&self) -> bool {
        self.login.is_some()
    }

    pub fn config(&self) -> &BridgeConfig {
        &self.config
    }

    pub fn pump(&self) -> &PumpTimer {
        &self.pump
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }
}

impl<S, E, H> Drop for Bridge<S, E, H>
where
    S: SteamClient,
    E: EosSdk,
    H: SceneHost,
{
    fn drop(&mut self) {
        self.shutdown();
    }
}
