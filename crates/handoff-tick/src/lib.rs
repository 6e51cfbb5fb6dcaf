//! Frame-driven pump timer for Handoff.
//!
//! The EOS SDK only makes progress when its platform is ticked, but ticking
//! it every rendered frame is wasteful. [`PumpTimer`] sits between the
//! host's per-frame update and the SDK tick: the host feeds it the frame
//! delta, and it says when a tick is due.
//!
//! # Semantics
//!
//! ```text
//! acc += dt
//! if acc >= interval { acc = 0; fire }
//! ```
//!
//! The remainder is discarded on fire rather than carried over, so a long
//! hitch produces exactly one tick instead of a burst of catch-up ticks.
//! The timer is driven entirely by the caller; it never reads a clock.
//!
//! # Integration
//!
//! ```rust
//! use std::time::Duration;
//! use handoff_tick::PumpTimer;
//!
//! let mut pump = PumpTimer::default();
//! let mut ticks = 0;
//! for _ in 0..60 {
//!     // one 60 Hz frame
//!     if pump.advance(Duration::from_micros(16_667)) {
//!         ticks += 1;
//!     }
//! }
//! assert_eq!(ticks, 10);
//! ```

use std::time::Duration;

use tracing::{trace, warn};

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Configuration for a [`PumpTimer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PumpConfig {
    /// Minimum accumulated frame time between two ticks.
    pub interval: Duration,
}

impl Default for PumpConfig {
    fn default() -> Self {
        Self {
            interval: PumpConfig::DEFAULT_INTERVAL,
        }
    }
}

impl PumpConfig {
    /// 100 ms, i.e. the platform is ticked at most ten times a second.
    pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(100);

    /// Create a config with a specific interval.
    pub fn with_interval(interval: Duration) -> Self {
        Self { interval }
    }

    /// Replaces a zero interval with [`Self::DEFAULT_INTERVAL`].
    ///
    /// A zero interval would tick on every call, including calls with a
    /// zero delta, which defeats the point of the timer.
    pub fn validated(mut self) -> Self {
        if self.interval.is_zero() {
            warn!(
                default_ms = Self::DEFAULT_INTERVAL.as_millis() as u64,
                "pump interval is zero, using default"
            );
            self.interval = Self::DEFAULT_INTERVAL;
        }
        self
    }
}

// ---------------------------------------------------------------------------
// Timer
// ---------------------------------------------------------------------------

/// Accumulates frame time and reports when the platform should be ticked.
#[derive(Debug, Clone)]
pub struct PumpTimer {
    interval: Duration,
    accumulated: Duration,
    ticks_fired: u64,
}

impl Default for PumpTimer {
    fn default() -> Self {
        Self::new(PumpConfig::default())
    }
}

impl PumpTimer {
    /// Create a timer from config. The accumulator starts at zero.
    pub fn new(config: PumpConfig) -> Self {
        let config = config.validated();
        Self {
            interval: config.interval,
            accumulated: Duration::ZERO,
            ticks_fired: 0,
        }
    }

    /// Create a timer with a specific interval.
    pub fn with_interval(interval: Duration) -> Self {
        Self::new(PumpConfig::with_interval(interval))
    }

    /// Adds one frame's elapsed time. Returns `true` when a tick is due,
    /// in which case the accumulator has been reset to zero.
    pub fn advance(&mut self, dt: Duration) -> bool {
        self.accumulated = self.accumulated.saturating_add(dt);
        if self.accumulated < self.interval {
            return false;
        }
        self.accumulated = Duration::ZERO;
        self.ticks_fired += 1;
        trace!(tick = self.ticks_fired, "pump tick due");
        true
    }

    /// Clears the accumulator without firing.
    pub fn reset(&mut self) {
        self.accumulated = Duration::ZERO;
    }

    /// Time accumulated since the last tick (or reset).
    pub fn accumulated(&self) -> Duration {
        self.accumulated
    }

    /// The configured interval.
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Total ticks reported by [`advance`](Self::advance).
    pub fn ticks_fired(&self) -> u64 {
        self.ticks_fired
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validated_zero_interval_uses_default() {
        let cfg = PumpConfig::with_interval(Duration::ZERO).validated();
        assert_eq!(cfg.interval, PumpConfig::DEFAULT_INTERVAL);
    }

    #[test]
    fn test_validated_keeps_nonzero_interval() {
        let cfg = PumpConfig::with_interval(Duration::from_millis(250)).validated();
        assert_eq!(cfg.interval, Duration::from_millis(250));
    }

    #[test]
    fn test_advance_saturates_instead_of_overflowing() {
        let mut pump = PumpTimer::with_interval(Duration::MAX);
        assert!(!pump.advance(Duration::from_secs(1)));
        assert!(pump.advance(Duration::MAX));
        assert_eq!(pump.accumulated(), Duration::ZERO);
    }
}
