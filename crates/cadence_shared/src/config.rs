//! # Runtime Configuration
//!
//! Loaded once at startup from TOML. Every section and every key is optional;
//! anything missing falls back to [`crate::constants`].
//!
//! ```toml
//! [loop]
//! target_fps = 30
//!
//! [host]
//! refresh_rate = 60
//! run_for_ms = 2000
//!
//! [dispatch]
//! policy = "fail_fast"
//! ```

use std::path::Path;

use serde::Deserialize;

use crate::constants::{DEFAULT_REFRESH_RATE, DEFAULT_RUN_FOR_MS, MAX_REFRESH_RATE, TARGET_FPS};
use crate::error::{ConfigError, ConfigResult};

/// What the bus does when a listener fails during dispatch.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DispatchPolicy {
    /// The first failing listener aborts the rest of the dispatch and its
    /// error is returned from `fire`.
    #[default]
    FailFast,
    /// Every listener runs; failures are logged and returned together.
    Isolated,
}

/// Loop section.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoopConfig {
    /// Maximum rate of accepted `loop` ticks per second.
    pub target_fps: u32,
}

impl Default for LoopConfig {
    fn default() -> Self {
        Self {
            target_fps: TARGET_FPS,
        }
    }
}

/// Host (tick source) section.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HostConfig {
    /// Refresh rate of the emulated display in Hz.
    pub refresh_rate: u32,
    /// How long the demo drives the loop, in milliseconds.
    pub run_for_ms: u64,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            refresh_rate: DEFAULT_REFRESH_RATE,
            run_for_ms: DEFAULT_RUN_FOR_MS,
        }
    }
}

/// Dispatch section.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DispatchConfig {
    /// Listener failure policy for the bus.
    pub policy: DispatchPolicy,
}

/// Top-level configuration.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CadenceConfig {
    /// `[loop]` section.
    #[serde(rename = "loop")]
    pub game_loop: LoopConfig,
    /// `[host]` section.
    pub host: HostConfig,
    /// `[dispatch]` section.
    pub dispatch: DispatchConfig,
}

impl CadenceConfig {
    /// Parses and validates a config from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed TOML or unknown keys and
    /// [`ConfigError::Invalid`] for out-of-range values.
    pub fn from_toml_str(source: &str) -> ConfigResult<Self> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a config file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, otherwise the
    /// same errors as [`CadenceConfig::from_toml_str`].
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&source)
    }

    /// Checks value ranges that the schema alone cannot express.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first offending key.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.game_loop.target_fps == 0 {
            return Err(ConfigError::Invalid("loop.target_fps must be > 0".into()));
        }
        if self.host.refresh_rate == 0 || self.host.refresh_rate > MAX_REFRESH_RATE {
            return Err(ConfigError::Invalid(format!(
                "host.refresh_rate must be in 1..={MAX_REFRESH_RATE}"
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = CadenceConfig::from_toml_str("").unwrap();
        assert_eq!(config, CadenceConfig::default());
        assert_eq!(config.game_loop.target_fps, 30);
        assert_eq!(config.host.refresh_rate, 60);
        assert_eq!(config.dispatch.policy, DispatchPolicy::FailFast);
    }

    #[test]
    fn test_full_config() {
        let config = CadenceConfig::from_toml_str(
            r#"
            [loop]
            target_fps = 24

            [host]
            refresh_rate = 144
            run_for_ms = 500

            [dispatch]
            policy = "isolated"
            "#,
        )
        .unwrap();

        assert_eq!(config.game_loop.target_fps, 24);
        assert_eq!(config.host.refresh_rate, 144);
        assert_eq!(config.host.run_for_ms, 500);
        assert_eq!(config.dispatch.policy, DispatchPolicy::Isolated);
    }

    #[test]
    fn test_partial_section_keeps_other_defaults() {
        let config = CadenceConfig::from_toml_str("[host]\nrun_for_ms = 10\n").unwrap();
        assert_eq!(config.host.run_for_ms, 10);
        assert_eq!(config.host.refresh_rate, DEFAULT_REFRESH_RATE);
        assert_eq!(config.game_loop.target_fps, TARGET_FPS);
    }

    #[test]
    fn test_unknown_key_rejected() {
        let err = CadenceConfig::from_toml_str("[loop]\nfps = 30\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_zero_rates_rejected() {
        let err = CadenceConfig::from_toml_str("[loop]\ntarget_fps = 0\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));

        let err = CadenceConfig::from_toml_str("[host]\nrefresh_rate = 0\n").unwrap_err();
        assert!(err.to_string().contains("host.refresh_rate"));
    }

    #[test]
    fn test_refresh_rate_upper_bound() {
        let source = format!("[host]\nrefresh_rate = {MAX_REFRESH_RATE}\n");
        assert!(CadenceConfig::from_toml_str(&source).is_ok());

        let err = CadenceConfig::from_toml_str("[host]\nrefresh_rate = 2000000\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
        assert!(err.to_string().contains("host.refresh_rate"));
    }

    #[test]
    fn test_unknown_policy_rejected() {
        let err = CadenceConfig::from_toml_str("[dispatch]\npolicy = \"retry\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = CadenceConfig::load("/definitely/not/here/cadence.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
