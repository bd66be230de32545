//! Synthetic clock: the caller decides when frames happen and what time it is.

use super::{FrameOutcome, FrameQueue, TickCallback, TickHandle, TickSource};

/// Tick source driven by explicit timestamps.
///
/// ```
/// use std::sync::Arc;
/// use cadence::{GameLoop, ManualTickSource};
/// use cadence::core::EventBus;
///
/// let ticks = Arc::new(ManualTickSource::new());
/// let game_loop = GameLoop::new(EventBus::new(), ticks.clone());
///
/// game_loop.start();
/// assert_eq!(ticks.pending(), 1);
/// ticks.frame(40.0);
/// assert_eq!(game_loop.state().last_tick_time, 40.0);
/// ```
#[derive(Default)]
pub struct ManualTickSource {
    queue: FrameQueue,
}

impl ManualTickSource {
    /// Creates a source with nothing pending.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs one frame at `timestamp` (milliseconds).
    pub fn frame(&self, timestamp: f64) -> FrameOutcome {
        self.queue.run_frame(timestamp)
    }

    /// Runs `count` frames at `start`, `start + spacing`, ...
    pub fn run_frames(&self, start: f64, spacing: f64, count: usize) -> FrameOutcome {
        let mut outcome = FrameOutcome::default();
        let mut timestamp = start;
        for _ in 0..count {
            outcome.merge(self.frame(timestamp));
            timestamp += spacing;
        }
        outcome
    }

    /// Number of callbacks waiting for the next frame.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.queue.len()
    }
}

impl TickSource for ManualTickSource {
    fn request_tick(&self, callback: TickCallback) -> TickHandle {
        self.queue.push(callback)
    }

    fn cancel(&self, handle: TickHandle) -> bool {
        self.queue.cancel(handle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use std::sync::Arc;

    #[test]
    fn test_callbacks_see_frame_timestamp() {
        let source = ManualTickSource::new();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        source.request_tick(Box::new(move |timestamp| {
            sink.lock().push(timestamp);
            Ok(())
        }));

        let outcome = source.frame(123.5);
        assert_eq!(outcome.invoked, 1);
        assert_eq!(*seen.lock(), [123.5]);
        assert_eq!(source.pending(), 0);
    }

    #[test]
    fn test_requests_made_during_frame_wait_for_next_frame() {
        let source = Arc::new(ManualTickSource::new());
        let seen = Arc::new(Mutex::new(Vec::new()));

        let again = Arc::clone(&source);
        let sink = Arc::clone(&seen);
        source.request_tick(Box::new(move |first| {
            sink.lock().push(first);
            let sink = Arc::clone(&sink);
            again.request_tick(Box::new(move |second| {
                sink.lock().push(second);
                Ok(())
            }));
            Ok(())
        }));

        source.frame(10.0);
        assert_eq!(*seen.lock(), [10.0]);
        assert_eq!(source.pending(), 1);

        source.frame(20.0);
        assert_eq!(*seen.lock(), [10.0, 20.0]);
    }

    #[test]
    fn test_run_frames_spacing() {
        let source = ManualTickSource::new();
        let outcome = source.run_frames(0.0, 16.0, 3);
        assert_eq!(outcome.invoked, 0);
        assert!(outcome.is_ok());
    }
}
