use std::time::Duration;

use handoff::prelude::*;
use handoff_platform::sim::{Journal, SimEos, SimSteam};
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{info, warn};

// ---------------------------------------------------------------------------
// Host engine stand-in
// ---------------------------------------------------------------------------

const FRAME: Duration = Duration::from_millis(16);

/// Gives up if login has not settled after this many frames (~5 s).
const MAX_FRAMES: u32 = 300;

fn load_scene(name: &str) {
    info!(scene = name, "host switching scene");
}

fn settled(state: &BridgeState) -> bool {
    !matches!(state, BridgeState::Idle | BridgeState::LoggingIn)
}

fn sample_config() -> BridgeConfig {
    BridgeConfig {
        product_id: "demo-product".into(),
        sandbox_id: "demo-sandbox".into(),
        deployment_id: "demo-deployment".into(),
        client_id: "demo-client".into(),
        client_secret: "demo-secret".into(),
        ..BridgeConfig::default()
    }
}

// ---------------------------------------------------------------------------
// Main loop
// ---------------------------------------------------------------------------

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    handoff::logging::init_logging("info")?;

    // First argument: optional JSON config file.
    let config = match std::env::args().nth(1) {
        Some(path) => BridgeConfig::from_json_file(path)?,
        None => sample_config(),
    };

    let journal = Journal::default();
    let steam = SimSteam::new(journal.clone());
    let eos = SimEos::new(journal.clone()).with_login_delay_ticks(3);
    let mut bridge = Bridge::new(config, steam, eos, load_scene);

    if let Err(err) = bridge.start() {
        bridge.shutdown();
        return Err(err.into());
    }

    let mut frames = tokio::time::interval(FRAME);
    frames.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut last = Instant::now();

    for _ in 0..MAX_FRAMES {
        frames.tick().await;
        let now = Instant::now();
        bridge.update(now - last);
        last = now;

        if settled(bridge.state()) {
            break;
        }
    }

    match bridge.state() {
        BridgeState::LoggedIn(user_id) => info!(%user_id, "handoff complete"),
        state => warn!(?state, "handoff did not complete"),
    }

    bridge.shutdown();
    info!(sdk_calls = journal.calls().len(), "demo finished");
    Ok(())
}
