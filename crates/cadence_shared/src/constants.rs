//! # Timing Constants
//!
//! Defaults baked into the binary. Every one of them can be overridden from
//! the TOML config, see [`crate::config`].

// =============================================================================
// LOOP
// =============================================================================

/// Target rate of accepted `loop` ticks (ticks per second).
pub const TARGET_FPS: u32 = 30;

// =============================================================================
// HOST
// =============================================================================

/// Refresh rate of the emulated display driving the tick source (Hz).
pub const DEFAULT_REFRESH_RATE: u32 = 60;

/// Highest refresh rate the config accepts (Hz).
pub const MAX_REFRESH_RATE: u32 = 1_000;

/// How long the demo binary drives the loop before shutting down.
pub const DEFAULT_RUN_FOR_MS: u64 = 2_000;

/// Minimum time between two accepted ticks for a given rate, in milliseconds.
///
/// A rate of zero yields an infinite interval, so nothing is ever accepted.
#[inline]
#[must_use]
pub fn frame_interval_ms(rate: u32) -> f64 {
    1000.0 / f64::from(rate)
}
