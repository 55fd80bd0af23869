//! Simulation time model.
//!
//! # Design
//!
//! Time is represented as a monotonically increasing `Tick` counter advanced
//! once per host frame.  The mapping to wall-clock seconds is held in
//! `FrameClock`:
//!
//!   elapsed_secs = tick * dt_secs
//!
//! Using an integer tick as the canonical time unit keeps arrival assertions
//! and test expectations exact; only per-frame integration (steering, door
//! tweens, cadence accumulators) consumes the floating-point `dt_secs`.
//!
//! The default frame duration is 1/60 s.  Behavior cadences (for example the
//! hide/chase re-evaluation period) are independent of the frame rate; they
//! accumulate `dt_secs` and fire on their own period.

use std::fmt;

// ── Tick ─────────────────────────────────────────────────────────────────────

/// An absolute simulation tick counter.
///
/// Stored as `u64`: at 60 ticks per second a u64 lasts ~9.7 billion years,
/// so overflow is not a practical concern.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);

    /// Return the tick `n` steps after `self`.
    #[inline]
    pub fn offset(self, n: u64) -> Tick {
        Tick(self.0 + n)
    }

    /// Ticks elapsed from `earlier` to `self`.
    #[inline]
    pub fn since(self, earlier: Tick) -> u64 {
        self.0 - earlier.0
    }
}

impl std::ops::Add<u64> for Tick {
    type Output = Tick;
    #[inline]
    fn add(self, rhs: u64) -> Tick {
        Tick(self.0 + rhs)
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

// ── FrameClock ───────────────────────────────────────────────────────────────

/// Tracks the current tick and the fixed frame duration.
///
/// `FrameClock` is cheap to copy and intentionally holds no heap data.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FrameClock {
    /// How many real seconds one tick represents.  Default: 1/60.
    pub dt_secs: f32,
    /// The current tick — advanced by `FrameClock::advance()` each frame.
    pub current_tick: Tick,
}

impl FrameClock {
    /// Create a clock with the given fixed frame duration.
    pub fn new(dt_secs: f32) -> Self {
        Self { dt_secs, current_tick: Tick::ZERO }
    }

    /// Advance the clock by one tick.
    #[inline]
    pub fn advance(&mut self) {
        self.current_tick = Tick(self.current_tick.0 + 1);
    }

    /// Elapsed simulated seconds since tick 0.
    #[inline]
    pub fn elapsed_secs(&self) -> f32 {
        self.current_tick.0 as f32 * self.dt_secs
    }

    /// How many ticks span `secs` seconds? (rounds up — never early)
    #[inline]
    pub fn ticks_for_secs(&self, secs: f32) -> u64 {
        (secs / self.dt_secs).ceil() as u64
    }
}

impl fmt::Display for FrameClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({:.2} s)", self.current_tick, self.elapsed_secs())
    }
}

// ── SimConfig ────────────────────────────────────────────────────────────────

/// Top-level simulation configuration.
///
/// Typically built in the application crate and passed to the simulation
/// runner.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimConfig {
    /// Seconds per tick.  Must be > 0.  Default: 1/60.
    pub dt_secs: f32,

    /// Total ticks to simulate.  For 60 seconds at 60 Hz: 3600.
    pub total_ticks: u64,

    /// Write output every N ticks.  1 = every tick; 0 = never.
    pub output_interval_ticks: u64,
}

impl SimConfig {
    /// The tick at which the simulation ends (exclusive upper bound).
    #[inline]
    pub fn end_tick(&self) -> Tick {
        Tick(self.total_ticks)
    }

    /// Construct a `FrameClock` pre-configured for this run.
    pub fn make_clock(&self) -> FrameClock {
        FrameClock::new(self.dt_secs)
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            dt_secs:               1.0 / 60.0,
            total_ticks:           3_600,
            output_interval_ticks: 1,
        }
    }
}
