//! # Frame Clock
//!
//! Real-time host for the loop: emulates a display refreshing at a fixed
//! rate and runs pending callbacks once per refresh, on the calling thread.
//!
//! ## Design
//!
//! - Sleep for most of the wait, spin for the last few hundred microseconds
//! - Timestamps are milliseconds since the clock was created
//! - A frame that overruns its slot skips the missed refreshes instead of
//!   bursting to catch up

use std::time::{Duration, Instant};

use super::{FrameQueue, TickCallback, TickHandle, TickSource};

/// Below this much remaining wait, spin instead of sleeping.
const SPIN_THRESHOLD: Duration = Duration::from_micros(500);

/// Floor for the refresh period; `drive` must always move forward.
const MIN_FRAME_DURATION: Duration = Duration::from_nanos(1);

/// Counters for one `run_*` call.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameClockStats {
    /// Refreshes that happened.
    pub frames: u64,
    /// Callbacks run across all frames.
    pub callbacks: u64,
    /// Callbacks that returned an error.
    pub errors: u64,
    /// Refreshes skipped because a frame overran.
    pub missed_frames: u64,
}

/// Paced tick source for real hosts.
pub struct FrameClock {
    queue: FrameQueue,
    origin: Instant,
    frame_duration: Duration,
}

impl FrameClock {
    /// Creates a clock refreshing `refresh_rate` times per second.
    ///
    /// A rate of zero is treated as 1 Hz. A frame never lasts less than one
    /// nanosecond, however high the rate.
    #[must_use]
    pub fn new(refresh_rate: u32) -> Self {
        let refresh_rate = u64::from(refresh_rate.max(1));
        Self {
            queue: FrameQueue::default(),
            origin: Instant::now(),
            frame_duration: Duration::from_nanos(1_000_000_000 / refresh_rate)
                .max(MIN_FRAME_DURATION),
        }
    }

    /// Duration of one refresh.
    #[must_use]
    pub const fn frame_duration(&self) -> Duration {
        self.frame_duration
    }

    /// Milliseconds since the clock was created.
    #[must_use]
    pub fn now_ms(&self) -> f64 {
        self.origin.elapsed().as_secs_f64() * 1000.0
    }

    /// Number of callbacks waiting for the next refresh.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Runs refreshes until `duration` has passed.
    pub fn run_for(&self, duration: Duration) -> FrameClockStats {
        self.drive(Instant::now() + duration, false)
    }

    /// Runs refreshes until nothing is pending, or `limit` has passed.
    pub fn run_until_idle(&self, limit: Duration) -> FrameClockStats {
        self.drive(Instant::now() + limit, true)
    }

    fn drive(&self, deadline: Instant, stop_when_idle: bool) -> FrameClockStats {
        let mut stats = FrameClockStats::default();
        let mut next_frame = Instant::now() + self.frame_duration;

        while next_frame <= deadline {
            if stop_when_idle && self.queue.len() == 0 {
                break;
            }

            wait_until(next_frame);
            let outcome = self.queue.run_frame(self.now_ms());

            stats.frames += 1;
            stats.callbacks += outcome.invoked as u64;
            stats.errors += outcome.errors.len() as u64;
            for error in &outcome.errors {
                tracing::error!(%error, kind = %error.kind(), "frame callback failed");
            }

            next_frame += self.frame_duration;
            let now = Instant::now();
            if next_frame < now {
                let behind = now.duration_since(next_frame);
                let missed = behind.as_nanos() / self.frame_duration.as_nanos() + 1;
                let missed = u32::try_from(missed).unwrap_or(u32::MAX);
                tracing::debug!(missed, "frame overran, skipping refreshes");
                stats.missed_frames += u64::from(missed);
                next_frame += self.frame_duration * missed;
            }
        }

        stats
    }
}

impl TickSource for FrameClock {
    fn request_tick(&self, callback: TickCallback) -> TickHandle {
        self.queue.push(callback)
    }

    fn cancel(&self, handle: TickHandle) -> bool {
        self.queue.cancel(handle)
    }
}

/// Blocks until `target`.
fn wait_until(target: Instant) {
    let now = Instant::now();
    if target <= now {
        return;
    }

    let remaining = target - now;
    if remaining > SPIN_THRESHOLD {
        std::thread::sleep(remaining - SPIN_THRESHOLD);
    }

    while Instant::now() < target {
        std::hint::spin_loop();
    }
}
