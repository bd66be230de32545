//! # Tick Sources
//!
//! The loop needs exactly one thing from its host: "call me back before the
//! next frame, with the frame's timestamp". [`TickSource`] is that contract.
//!
//! - [`ManualTickSource`]: frames are produced by the caller with explicit
//!   timestamps (tests, replays)
//! - [`FrameClock`]: frames are paced in real time at a display refresh rate

mod frame_clock;
mod manual;

pub use frame_clock::{FrameClock, FrameClockStats};
pub use manual::ManualTickSource;

use cadence_core::DispatchError;
use parking_lot::Mutex;

/// Callback run once by the host with the frame timestamp in milliseconds.
pub type TickCallback = Box<dyn FnOnce(f64) -> Result<(), DispatchError> + Send>;

/// Identifies one pending request so it can be withdrawn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TickHandle(u64);

/// Host facility that runs a callback once per frame opportunity.
pub trait TickSource: Send + Sync {
    /// Schedules `callback` for the next frame.
    ///
    /// Implementations must never run the callback from inside this call.
    fn request_tick(&self, callback: TickCallback) -> TickHandle;

    /// Withdraws a pending request. Returns `false` if it already ran or was
    /// already cancelled.
    fn cancel(&self, handle: TickHandle) -> bool;
}

/// What happened during one or more frames.
#[derive(Debug, Default)]
pub struct FrameOutcome {
    /// Callbacks that ran.
    pub invoked: usize,
    /// Failures returned by callbacks, in the order they ran.
    pub errors: Vec<DispatchError>,
}

impl FrameOutcome {
    /// Whether every callback succeeded.
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }

    /// Folds another outcome into this one.
    pub fn merge(&mut self, other: FrameOutcome) {
        self.invoked += other.invoked;
        self.errors.extend(other.errors);
    }
}

/// Pending callbacks shared by both tick sources.
#[derive(Default)]
struct FrameQueue {
    inner: Mutex<QueueInner>,
}

#[derive(Default)]
struct QueueInner {
    next_id: u64,
    pending: Vec<(TickHandle, TickCallback)>,
}

impl FrameQueue {
    fn push(&self, callback: TickCallback) -> TickHandle {
        let mut inner = self.inner.lock();
        let handle = TickHandle(inner.next_id);
        inner.next_id += 1;
        inner.pending.push((handle, callback));
        handle
    }

    fn cancel(&self, handle: TickHandle) -> bool {
        let mut inner = self.inner.lock();
        let before = inner.pending.len();
        inner.pending.retain(|(pending, _)| *pending != handle);
        inner.pending.len() != before
    }

    fn len(&self) -> usize {
        self.inner.lock().pending.len()
    }

    /// Runs every callback pending when the frame starts. Requests made by
    /// those callbacks land in the next frame.
    fn run_frame(&self, timestamp: f64) -> FrameOutcome {
        let due = std::mem::take(&mut self.inner.lock().pending);
        let mut outcome = FrameOutcome::default();
        for (_, callback) in due {
            outcome.invoked += 1;
            if let Err(error) = callback(timestamp) {
                outcome.errors.push(error);
            }
        }
        outcome
    }
}
