//! Bridge configuration.
//!
//! Every field has a default, so a host only supplies what differs. The
//! seven identity strings come from the Steamworks partner site and the EOS
//! developer portal; the bridge treats them as opaque.

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use handoff_platform::{ClientCredentials, InitializeOptions, PlatformOptions};
use handoff_session::DEFAULT_TICKET_CAPACITY;
use handoff_tick::PumpConfig;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Errors loading a [`BridgeConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The config text is not valid JSON for a [`BridgeConfig`].
    #[error("invalid config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Static settings for one bridge instance.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BridgeConfig {
    /// Name passed to `EOS_Initialize`.
    pub product_name: String,
    /// Version passed to `EOS_Initialize`.
    pub product_version: String,
    pub product_id: String,
    pub sandbox_id: String,
    pub deployment_id: String,
    pub client_id: String,
    pub client_secret: String,

    /// Size of the buffer Steam writes the session ticket into.
    pub ticket_capacity: usize,

    /// Minimum frame time between two EOS ticks, in milliseconds.
    pub tick_interval_ms: u64,

    /// Scene the host is asked to load once login succeeds.
    pub post_login_scene: String,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            product_name: "MyUnityApplication".to_string(),
            product_version: "1.0".to_string(),
            product_id: String::new(),
            sandbox_id: String::new(),
            deployment_id: String::new(),
            client_id: String::new(),
            client_secret: String::new(),
            ticket_capacity: DEFAULT_TICKET_CAPACITY,
            tick_interval_ms: PumpConfig::DEFAULT_INTERVAL.as_millis() as u64,
            post_login_scene: "test2".to_string(),
        }
    }
}

impl BridgeConfig {
    /// Parses a config from JSON text. Missing fields take their defaults.
    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Reads and parses a JSON config file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&text)
    }

    /// Fixes values the bridge cannot run with.
    ///
    /// - zero `ticket_capacity` → [`DEFAULT_TICKET_CAPACITY`]
    /// - zero `tick_interval_ms` → the pump default (100 ms)
    ///
    /// Empty identity fields are only warned about. EOS rejects them with
    /// a precise result code, which is more useful than guessing here.
    pub fn validated(mut self) -> Self {
        if self.ticket_capacity == 0 {
            warn!(
                default = DEFAULT_TICKET_CAPACITY,
                "ticket_capacity is zero, using default"
            );
            self.ticket_capacity = DEFAULT_TICKET_CAPACITY;
        }
        if self.tick_interval_ms == 0 {
            let default_ms = PumpConfig::DEFAULT_INTERVAL.as_millis() as u64;
            warn!(default_ms, "tick_interval_ms is zero, using default");
            self.tick_interval_ms = default_ms;
        }
        for (field, value) in [
            ("product_id", &self.product_id),
            ("sandbox_id", &self.sandbox_id),
            ("deployment_id", &self.deployment_id),
            ("client_id", &self.client_id),
            ("client_secret", &self.client_secret),
        ] {
            if value.is_empty() {
                warn!(field, "eos identifier is empty");
            }
        }
        self
    }

    /// Pump interval as a `Duration`.
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    /// Arguments for `EOS_Initialize`.
    pub fn initialize_options(&self) -> InitializeOptions {
        InitializeOptions {
            product_name: self.product_name.clone(),
            product_version: self.product_version.clone(),
        }
    }

    /// Arguments for `EOS_Platform_Create`.
    pub fn platform_options(&self) -> PlatformOptions {
        PlatformOptions {
            product_id: self.product_id.clone(),
            sandbox_id: self.sandbox_id.clone(),
            deployment_id: self.deployment_id.clone(),
            client_credentials: ClientCredentials {
                client_id: self.client_id.clone(),
                client_secret: self.client_secret.clone(),
            },
        }
    }
}

impl fmt::Debug for BridgeConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BridgeConfig")
            .field("product_name", &self.product_name)
            .field("product_version", &self.product_version)
            .field("product_id", &self.product_id)
            .field("sandbox_id", &self.sandbox_id)
            .field("deployment_id", &self.deployment_id)
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .field("ticket_capacity", &self.ticket_capacity)
            .field("tick_interval_ms", &self.tick_interval_ms)
            .field("post_login_scene", &self.post_login_scene)
            .finish()
    }
}
