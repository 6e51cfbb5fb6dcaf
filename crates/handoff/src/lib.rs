//! # Handoff
//!
//! Bridges a Steam identity into an Epic Online Services session.
//!
//! A game host builds one [`Bridge`] per scene from a [`BridgeConfig`], a
//! Steam client, an EOS SDK and a [`SceneHost`], then calls
//! [`start`](Bridge::start) once, [`update`](Bridge::update) every frame and
//! [`shutdown`](Bridge::shutdown) (or just drops the bridge) at the end.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::time::Duration;
//! use handoff::prelude::*;
//!
//! # fn run<S: SteamClient, E: EosSdk>(steam: S, eos: E) -> Result<(), BridgeError> {
//! let config = BridgeConfig::from_json_file("handoff.json")?;
//! let mut bridge = Bridge::new(config, steam, eos, |scene: &str| {
//!     println!("load {scene}");
//! });
//! bridge.start()?;
//! loop {
//!     bridge.update(Duration::from_millis(16));
//! #   break;
//! }
//! # Ok(())
//! # }
//! ```

mod bridge;
mod config;
mod error;
mod host;
pub mod logging;

pub use bridge::{Bridge, BridgeState};
pub use config::{BridgeConfig, ConfigError};
pub use error::{BridgeError, FailureStage};
pub use host::SceneHost;

pub mod prelude {
    //! Everything a host needs to wire up a bridge.

    pub use crate::{
        Bridge, BridgeConfig, BridgeError, BridgeState, FailureStage,
        SceneHost,
    };
    pub use handoff_platform::{
        EosAuth, EosPlatform, EosSdk, EpicAccountId, ResultCode, SteamClient,
    };
}
