//! # Timing Module
//!
//! Clocks and the minimum-interval gates that give the player, the enemies and
//! the projectiles their own update cadence.

use serde::{Deserialize, Serialize};
use std::cell::Cell;
use std::time::{Duration, Instant};

/// Monotonic time source consumed by the timing gates.
pub trait Clock {
    fn now(&self) -> Instant;
}

/// Wall clock backed by [`Instant::now`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Clock that only moves when told to. Used by tests and headless runs.
///
/// # Examples
///
/// ```
/// use dunjy_krawl::{Clock, ManualClock};
/// use std::time::Duration;
///
/// let clock = ManualClock::new();
/// let start = clock.now();
/// clock.advance(Duration::from_millis(250));
/// assert_eq!(clock.now() - start, Duration::from_millis(250));
/// ```
#[derive(Debug, Clone)]
pub struct ManualClock {
    origin: Instant,
    elapsed: Cell<Duration>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
            elapsed: Cell::new(Duration::ZERO),
        }
    }

    /// Moves the clock forward.
    pub fn advance(&self, by: Duration) {
        self.elapsed.set(self.elapsed.get() + by);
    }

    /// Total time advanced since creation.
    pub fn elapsed(&self) -> Duration {
        self.elapsed.get()
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.origin + self.elapsed.get()
    }
}

/// Minimum-interval throttle for one update group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimingGate {
    interval: Duration,
    last_pass: Option<Instant>,
}

impl TimingGate {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_pass: None,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Checks whether an update may run at `now`.
    ///
    /// A gate that has never passed opens immediately. On success the gate
    /// restarts its interval from `now`; on failure it is left untouched.
    ///
    /// # Examples
    ///
    /// ```
    /// use dunjy_krawl::TimingGate;
    /// use std::time::{Duration, Instant};
    ///
    /// let mut gate = TimingGate::new(Duration::from_millis(100));
    /// let t0 = Instant::now();
    /// assert!(gate.try_pass(t0));
    /// assert!(!gate.try_pass(t0 + Duration::from_millis(99)));
    /// assert!(gate.try_pass(t0 + Duration::from_millis(100)));
    /// ```
    pub fn try_pass(&mut self, now: Instant) -> bool {
        if let Some(last) = self.last_pass {
            if now.saturating_duration_since(last) < self.interval {
                return false;
            }
        }
        self.last_pass = Some(now);
        true
    }

    /// Forgets the last pass so the next check opens immediately.
    pub fn reset(&mut self) {
        self.last_pass = None;
    }
}

/// Update intervals for the three gated groups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    /// Milliseconds between player steps
    pub player_interval_ms: u64,
    /// Milliseconds between enemy steps
    pub enemy_interval_ms: u64,
    /// Milliseconds between projectile steps
    pub projectile_interval_ms: u64,
}

impl TimingConfig {
    pub fn new() -> Self {
        Self {
            player_interval_ms: crate::config::PLAYER_MOVE_INTERVAL_MS,
            enemy_interval_ms: crate::config::ENEMY_MOVE_INTERVAL_MS,
            projectile_interval_ms: crate::config::PROJECTILE_MOVE_INTERVAL_MS,
        }
    }
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// The three gates owned by a running session.
#[derive(Debug, Clone)]
pub struct UpdateGates {
    pub player: TimingGate,
    pub enemies: TimingGate,
    pub projectiles: TimingGate,
}

impl UpdateGates {
    pub fn new(config: &TimingConfig) -> Self {
        Self {
            player: TimingGate::new(Duration::from_millis(config.player_interval_ms)),
            enemies: TimingGate::new(Duration::from_millis(config.enemy_interval_ms)),
            projectiles: TimingGate::new(Duration::from_millis(config.projectile_interval_ms)),
        }
    }

    pub fn reset(&mut self) {
        self.player.reset();
        self.enemies.reset();
        self.projectiles.reset();
    }
}
