//! # Cadence Shared
//!
//! Constants and configuration used by both the event bus and the loop.
//!
//! ## RULE
//!
//! This crate must NEVER depend on `cadence_core` or `cadence`.
//! If a type needs a listener or a tick source, it does not belong here.

#![deny(missing_docs)]
#![deny(unsafe_code)]

pub mod config;
pub mod constants;
pub mod error;

pub use config::{CadenceConfig, DispatchConfig, DispatchPolicy, HostConfig, LoopConfig};
pub use constants::{
    frame_interval_ms, DEFAULT_REFRESH_RATE, DEFAULT_RUN_FOR_MS, MAX_REFRESH_RATE, TARGET_FPS,
};
pub use error::{ConfigError, ConfigResult};
