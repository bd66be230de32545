//! # Cadence Core
//!
//! Typed publish/subscribe event bus. Producers and consumers never hold a
//! reference to each other; they only share an [`EventBus`] handle.
//!
//! ## Rules
//!
//! 1. **Closed catalog** - every event kind and its payload are declared in
//!    one place, see [`events::catalog`]
//! 2. **Typed dispatch** - `fire` and `register` are generic over the payload,
//!    so a wrong payload for a kind does not compile
//! 3. **Deterministic order** - listeners run in registry order, synchronously
//!
//! ## Example
//!
//! ```rust
//! use cadence_core::{EventBus, TogglePlay};
//!
//! let bus = EventBus::new();
//! bus.on(|event: &TogglePlay| println!("playing: {}", event.play));
//! bus.fire(TogglePlay { play: true }).expect("no fallible listeners");
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]

pub mod error;
pub mod events;

pub use cadence_shared::DispatchPolicy;
pub use error::{DispatchError, ListenerError, ListenerFailure, ListenerResult};
pub use events::{
    Event, EventBus, EventKind, Listener, ListenerList, Login, LoopTick, Position, Registry,
    RequestTogglePlay, TogglePlay,
};
