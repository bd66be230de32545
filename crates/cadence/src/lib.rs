//! # Cadence
//!
//! Frame-rate-limited update loop whose whole control surface is the event
//! bus.
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────────┐ request_tick  ┌───────────────┐ fire(LoopTick)  ┌──────────────┐
//! │  TickSource   │<──────────────│   GameLoop    │────────────────>│              │
//! │ (host frames) │──────────────>│  30 Hz gate   │ fire(TogglePlay)│   EventBus   │
//! └───────────────┘ callback(ms)  └───────────────┘────────────────>│              │
//!                                         ▲                         └──────┬───────┘
//!                                         │ &RequestTogglePlay             │
//!                                         └────────────────────────────────┤
//!                                                                          ▼
//!                                                              screens / any consumer
//! ```
//!
//! ## Modules
//!
//! - `game_loop`: start/pause state machine and the throttled tick
//! - `tick`: the host dependency and its two implementations
//! - `stats`: accepted/skipped tick accounting
//! - `screens`: headless landing screen and play button

#![deny(missing_docs)]
#![deny(unsafe_code)]

pub mod game_loop;
pub mod screens;
pub mod stats;
pub mod tick;

// Re-export the layers below
pub use cadence_core as core;
pub use cadence_shared as shared;

// Re-export commonly used types
pub use game_loop::{GameLoop, LoopState};
pub use screens::{LandingScreen, PlayButton};
pub use stats::TickStats;
pub use tick::{
    FrameClock, FrameClockStats, FrameOutcome, ManualTickSource, TickCallback, TickHandle,
    TickSource,
};
