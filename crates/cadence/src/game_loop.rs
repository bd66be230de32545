//! # Cadence Game Loop
//!
//! Frame-rate-limited scheduler that is started, paused and observed through
//! the event bus.
//!
//! ```text
//! host frame ──> tick(timestamp)
//!                 ├─ delta = timestamp - last_tick_time
//!                 ├─ delta >= 1000 / target_fps ?
//!                 │    ├─ yes: fire LoopTick { delta }, last_tick_time = timestamp
//!                 │    └─ no:  skip
//!                 └─ still running ? request next host frame
//! ```
//!
//! ## State machine
//!
//! | state   | `start()`                      | `pause()`                       |
//! |---------|--------------------------------|---------------------------------|
//! | Stopped | -> Running, `TogglePlay{true}` | no-op                           |
//! | Running | no-op                          | -> Stopped, `TogglePlay{false}` |
//!
//! `pause()` is cooperative: the host frame already requested still runs one
//! tick, then the loop stops rescheduling.

use std::sync::{Arc, Weak};

use cadence_core::{DispatchError, EventBus, LoopTick, RequestTogglePlay, TogglePlay};
use cadence_shared::{frame_interval_ms, LoopConfig};
use parking_lot::Mutex;

use crate::stats::TickStats;
use crate::tick::{TickHandle, TickSource};

/// Observable loop state.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LoopState {
    /// Whether the loop reschedules itself.
    pub running: bool,
    /// Host timestamp (ms) of the last accepted tick, 0 right after `start`.
    pub last_tick_time: f64,
    /// Whether the `RequestTogglePlay` listener has been installed. Flips
    /// once, on the first `start`, and never back.
    pub control_listener_installed: bool,
}

struct Core {
    state: LoopState,
    /// Bumped by every `start`; callbacks from an older run are ignored.
    epoch: u64,
    pending: Option<TickHandle>,
    awaiting_first_tick: bool,
    stats: TickStats,
}

struct LoopInner {
    bus: EventBus,
    ticks: Arc<dyn TickSource>,
    frame_interval_ms: f64,
    core: Mutex<Core>,
}

/// Throttled update loop.
///
/// Cheap to clone; every clone drives the same loop. Listeners and pending
/// host callbacks only hold weak references, so dropping every handle stops
/// the loop for good.
#[derive(Clone)]
pub struct GameLoop {
    inner: Arc<LoopInner>,
}

impl GameLoop {
    /// Creates a stopped loop targeting the default 30 ticks per second.
    #[must_use]
    pub fn new(bus: EventBus, ticks: Arc<dyn TickSource>) -> Self {
        Self::with_config(bus, ticks, &LoopConfig::default())
    }

    /// Creates a stopped loop with an explicit configuration.
    #[must_use]
    pub fn with_config(bus: EventBus, ticks: Arc<dyn TickSource>, config: &LoopConfig) -> Self {
        Self {
            inner: Arc::new(LoopInner {
                bus,
                ticks,
                frame_interval_ms: frame_interval_ms(config.target_fps),
                core: Mutex::new(Core {
                    state: LoopState {
                        running: false,
                        last_tick_time: 0.0,
                        control_listener_installed: false,
                    },
                    epoch: 0,
                    pending: None,
                    awaiting_first_tick: false,
                    stats: TickStats::new(),
                }),
            }),
        }
    }

    /// Starts the loop. Does nothing if it is already running.
    ///
    /// The first call also installs a permanent `RequestTogglePlay` listener
    /// on the bus, which is how consumers without a loop handle control it.
    pub fn start(&self) {
        let install_control = {
            let mut core = self.inner.core.lock();
            if core.state.running {
                return;
            }

            core.state.running = true;
            core.state.last_tick_time = 0.0;
            core.awaiting_first_tick = true;
            core.epoch += 1;

            // A frame still pending from before the last pause belongs to the
            // old run.
            if let Some(stale) = core.pending.take() {
                self.inner.ticks.cancel(stale);
            }
            let epoch = core.epoch;
            core.pending = Some(self.request_tick(epoch));

            !std::mem::replace(&mut core.state.control_listener_installed, true)
        };

        tracing::info!("loop started");
        self.notify(true);

        if install_control {
            self.install_control_listener();
        }
    }

    /// Pauses the loop. Does nothing if it is not running.
    ///
    /// The host frame that is already requested is not withdrawn.
    pub fn pause(&self) {
        {
            let mut core = self.inner.core.lock();
            if !core.state.running {
                return;
            }
            core.state.running = false;
        }

        tracing::info!("loop paused");
        self.notify(false);
    }

    /// Whether the loop is running.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.inner.core.lock().state.running
    }

    /// Snapshot of the loop state.
    #[must_use]
    pub fn state(&self) -> LoopState {
        self.inner.core.lock().state
    }

    /// Snapshot of the tick counters.
    #[must_use]
    pub fn stats(&self) -> TickStats {
        self.inner.core.lock().stats
    }

    /// Minimum spacing of accepted ticks, in milliseconds.
    #[must_use]
    pub fn frame_interval_ms(&self) -> f64 {
        self.inner.frame_interval_ms
    }

    /// The bus this loop talks through.
    #[must_use]
    pub fn bus(&self) -> &EventBus {
        &self.inner.bus
    }

    /// One host frame.
    ///
    /// A failing `loop` dispatch still counts as an accepted tick: it advances
    /// `last_tick_time` and the next frame is requested before the error is
    /// handed back to the tick source.
    fn tick(&self, epoch: u64, timestamp: f64) -> Result<(), DispatchError> {
        let delta = {
            let mut core = self.inner.core.lock();
            if core.epoch != epoch {
                tracing::debug!(epoch, current = core.epoch, "dropping frame from an earlier run");
                return Ok(());
            }
            core.pending = None;

            let delta = timestamp - core.state.last_tick_time;
            if delta >= self.inner.frame_interval_ms {
                if std::mem::take(&mut core.awaiting_first_tick) {
                    core.stats.record_first();
                } else {
                    core.stats.record_accepted(delta);
                }
                Some(delta)
            } else {
                core.stats.record_skipped();
                tracing::trace!(delta, "frame throttled");
                None
            }
        };

        let outcome = match delta {
            Some(delta) => self.inner.bus.fire(LoopTick { delta }),
            None => Ok(()),
        };

        let mut core = self.inner.core.lock();
        if core.epoch == epoch {
            if delta.is_some() {
                core.state.last_tick_time = timestamp;
            }
            if core.state.running {
                core.pending = Some(self.request_tick(epoch));
            }
        }

        outcome
    }

    fn request_tick(&self, epoch: u64) -> TickHandle {
        let inner = Arc::downgrade(&self.inner);
        self.inner.ticks.request_tick(Box::new(move |timestamp| {
            match Weak::upgrade(&inner) {
                Some(inner) => GameLoop { inner }.tick(epoch, timestamp),
                None => Ok(()),
            }
        }))
    }

    fn notify(&self, play: bool) {
        if let Err(error) = self.inner.bus.fire(TogglePlay { play }) {
            tracing::error!(%error, play, "togglePlay listener failed");
        }
    }

    fn install_control_listener(&self) {
        let inner = Arc::downgrade(&self.inner);
        self.inner.bus.on(move |request: &RequestTogglePlay| {
            let Some(inner) = inner.upgrade() else {
                return;
            };
            let game_loop = GameLoop { inner };
            if request.play {
                game_loop.start();
            } else {
                game_loop.pause();
            }
        });
        tracing::debug!("requestTogglePlay listener installed");
    }
}

impl std::fmt::Debug for GameLoop {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameLoop")
            .field("state", &self.state())
            .field("frame_interval_ms", &self.inner.frame_interval_ms)
            .finish_non_exhaustive()
    }
}
