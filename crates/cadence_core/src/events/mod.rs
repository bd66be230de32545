//! # Cadence Event System
//!
//! In-process publish/subscribe with a closed set of typed events.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐  fire(TogglePlay)   ┌─────────────┐   &TogglePlay   ┌─────────────┐
//! │    Loop     │────────────────────>│  EventBus   │────────────────>│ PlayButton  │
//! └─────────────┘                     │             │                 └─────────────┘
//!        ▲                            │  Registry   │                        │
//!        │     &RequestTogglePlay     │  (1 slot    │  fire(RequestTogglePlay)
//!        └────────────────────────────│   per kind) │<───────────────────────┘
//!                                     └─────────────┘
//! ```
//!
//! Nobody holds a reference to anybody else, only to the bus.
//!
//! ## Module Structure
//!
//! - [`catalog`]: event kinds and their payloads
//! - [`listener`]: the shared callable stored in the registry
//! - [`registry`]: ordered per-kind listener lists
//! - [`bus`]: `EventBus`, the public `register`/`fire` surface

pub mod bus;
pub mod catalog;
pub mod listener;
pub mod registry;

pub use bus::EventBus;
pub use catalog::{Event, EventKind, Login, LoopTick, Registry, RequestTogglePlay, TogglePlay};
pub use listener::Listener;
pub use registry::{ListenerList, Position};
