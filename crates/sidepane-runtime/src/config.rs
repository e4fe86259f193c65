#![forbid(unsafe_code)]

//! Policy-as-data configuration for the panel layout.
//!
//! [`LayoutPolicy`] gathers every tunable of the gesture and the controller
//! so a host can load them at startup instead of recompiling.
//!
//! # Loading
//!
//! ```toml
//! # sidepane.toml
//! min_width = 120
//! max_width = 640
//! auto_collapse_threshold = 40
//! toggle_cooldown_ms = 250
//! ```
//!
//! ```rust,ignore
//! let policy = LayoutPolicy::from_toml_file("sidepane.toml")?;
//! let policy = LayoutPolicy::from_json_str(json)?;
//! ```
//!
//! # Defaults
//!
//! Every field defaults to the built-in behavior, so `LayoutPolicy::default()`
//! matches a layout constructed without any configuration.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use sidepane_layout::panel::{
    DEFAULT_MAX_WIDTH, DEFAULT_MAX_WIDTH_FRACTION, DEFAULT_MIN_WIDTH, DEFAULT_WIDTH_FRACTION,
};
use sidepane_layout::splitter::COLLAPSE_ZONE_FACTOR;
use sidepane_layout::{LayoutBounds, SplitterConfig};

/// Every tunable of the panel layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutPolicy {
    pub min_width: u32,
    pub max_width: u32,
    pub auto_collapse_threshold: u32,
    pub collapse_zone_factor: f64,
    /// Container fraction used when no width was stored.
    pub default_width_fraction: f64,
    /// Container fraction capping the width after a resize.
    pub max_width_fraction: f64,
    pub collapse_delay_ms: u64,
    pub toggle_cooldown_ms: u64,
    /// Length of the animated collapse/expand transition.
    pub transition_ms: u64,
}

impl Default for LayoutPolicy {
    fn default() -> Self {
        Self {
            min_width: DEFAULT_MIN_WIDTH,
            max_width: DEFAULT_MAX_WIDTH,
            auto_collapse_threshold: 50,
            collapse_zone_factor: COLLAPSE_ZONE_FACTOR,
            default_width_fraction: DEFAULT_WIDTH_FRACTION,
            max_width_fraction: DEFAULT_MAX_WIDTH_FRACTION,
            collapse_delay_ms: 100,
            toggle_cooldown_ms: 300,
            transition_ms: 300,
        }
    }
}

impl LayoutPolicy {
    /// Load from a TOML string.
    #[cfg(feature = "policy-config")]
    pub fn from_toml_str(s: &str) -> Result<Self, PolicyConfigError> {
        toml::from_str(s).map_err(PolicyConfigError::Toml)
    }

    /// Load from a TOML file on disk.
    #[cfg(feature = "policy-config")]
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, PolicyConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(PolicyConfigError::Io)?;
        Self::from_toml_str(&content)
    }

    /// Load from a JSON string.
    pub fn from_json_str(s: &str) -> Result<Self, PolicyConfigError> {
        serde_json::from_str(s).map_err(PolicyConfigError::Json)
    }

    /// Load from a JSON file on disk.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, PolicyConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(PolicyConfigError::Io)?;
        Self::from_json_str(&content)
    }

    /// Validate all parameters.
    ///
    /// Returns a list of problems; an empty list means the policy is valid.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        if self.min_width == 0 {
            errors.push("min_width must be > 0".to_owned());
        }
        if self.max_width < self.min_width {
            errors.push(format!(
                "max_width ({}) must be >= min_width ({})",
                self.max_width, self.min_width
            ));
        }
        if !self.collapse_zone_factor.is_finite() || self.collapse_zone_factor < 1.0 {
            errors.push(format!(
                "collapse_zone_factor must be finite and >= 1.0, got {}",
                self.collapse_zone_factor
            ));
        }
        if !(self.default_width_fraction > 0.0 && self.default_width_fraction <= 1.0) {
            errors.push(format!(
                "default_width_fraction must be in (0, 1], got {}",
                self.default_width_fraction
            ));
        }
        if !(self.max_width_fraction > 0.0 && self.max_width_fraction <= 1.0) {
            errors.push(format!(
                "max_width_fraction must be in (0, 1], got {}",
                self.max_width_fraction
            ));
        }
        errors
    }

    /// Fail with every problem `validate` reports.
    pub fn validated(self) -> Result<Self, LayoutPolicyError> {
        let problems = self.validate();
        if problems.is_empty() {
            Ok(self)
        } else {
            Err(LayoutPolicyError { problems })
        }
    }

    #[must_use]
    pub fn bounds(&self) -> LayoutBounds {
        LayoutBounds {
            min_width: self.min_width,
            max_width: self.max_width,
            max_width_fraction: self.max_width_fraction,
        }
    }

    #[must_use]
    pub fn splitter_config(&self) -> SplitterConfig {
        SplitterConfig {
            min_width: self.min_width,
            max_width: self.max_width,
            auto_collapse_threshold: self.auto_collapse_threshold,
            collapse_zone_factor: self.collapse_zone_factor,
            collapse_delay: Duration::from_millis(self.collapse_delay_ms),
            toggle_cooldown: Duration::from_millis(self.toggle_cooldown_ms),
        }
    }

    #[must_use]
    pub fn transition(&self) -> Duration {
        Duration::from_millis(self.transition_ms)
    }
}

/// A [`LayoutPolicy`] that failed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutPolicyError {
    pub problems: Vec<String>,
}

impl std::fmt::Display for LayoutPolicyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid layout policy: {}", self.problems.join("; "))
    }
}

impl std::error::Error for LayoutPolicyError {}

/// Errors that can occur when loading a policy.
#[derive(Debug)]
pub enum PolicyConfigError {
    /// I/O error reading a file.
    Io(std::io::Error),
    /// TOML parse error.
    #[cfg(feature = "policy-config")]
    Toml(toml::de::Error),
    /// JSON parse error.
    Json(serde_json::Error),
}

impl std::fmt::Display for PolicyConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            #[cfg(feature = "policy-config")]
            Self::Toml(e) => write!(f, "TOML parse error: {e}"),
            Self::Json(e) => write!(f, "JSON parse error: {e}"),
        }
    }
}

impl std::error::Error for PolicyConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            #[cfg(feature = "policy-config")]
            Self::Toml(e) => Some(e),
            Self::Json(e) => Some(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid_and_match_gesture_defaults() {
        let policy = LayoutPolicy::default();
        assert!(policy.validate().is_empty());
        assert_eq!(policy.splitter_config(), SplitterConfig::default());
        assert_eq!(policy.bounds(), LayoutBounds::default());
        assert_eq!(policy.transition(), Duration::from_millis(300));
    }

    #[test]
    fn validate_collects_every_problem() {
        let policy = LayoutPolicy {
            min_width: 0,
            collapse_zone_factor: f64::NAN,
            default_width_fraction: 0.0,
            ..LayoutPolicy::default()
        };
        let problems = policy.validate();
        assert_eq!(problems.len(), 3, "{problems:?}");
        let err = policy.validated().expect_err("invalid policy");
        assert!(err.to_string().contains("min_width"));
    }

    #[test]
    fn json_partial_override_keeps_defaults() {
        let policy = LayoutPolicy::from_json_str(r#"{"min_width": 150, "transition_ms": 0}"#)
            .expect("valid json");
        assert_eq!(policy.min_width, 150);
        assert_eq!(policy.transition_ms, 0);
        assert_eq!(policy.max_width, DEFAULT_MAX_WIDTH);
    }

    #[test]
    fn json_rejects_malformed_input() {
        assert!(matches!(
            LayoutPolicy::from_json_str("{"),
            Err(PolicyConfigError::Json(_))
        ));
    }

    #[test]
    fn json_file_loads_without_toml_feature() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("policy.json");
        std::fs::write(&path, r#"{"auto_collapse_threshold": 40}"#).expect("write policy");
        let policy = LayoutPolicy::from_json_file(&path).expect("valid policy file");
        assert_eq!(policy.auto_collapse_threshold, 40);
        assert!(matches!(
            LayoutPolicy::from_json_file(dir.path().join("missing.json")),
            Err(PolicyConfigError::Io(_))
        ));
    }

    #[cfg(feature = "policy-config")]
    #[test]
    fn toml_overrides() {
        let policy = LayoutPolicy::from_toml_str("max_width = 640\ncollapse_zone_factor = 1.0\n")
            .expect("valid toml");
        assert_eq!(policy.max_width, 640);
        assert_eq!(policy.splitter_config().collapse_zone_factor, 1.0);
    }
}
