//! # pageaudit-settings
//!
//! **Tier 0 (Pure Settings)**
//!
//! Clap-free settings for the audit engine and its network collaborators.
//! These types mirror CLI arguments without Clap dependencies, so library
//! consumers can construct them directly or load them from TOML.
//!
//! ## What belongs here
//! * Pure data types with Serde derive
//! * Network limits and timeouts, score weights
//! * Default values and validation
//!
//! ## What does NOT belong here
//! * Clap parsing or profile resolution (use the `pageaudit` binary)
//! * Business logic

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_USER_AGENT: &str =
    concat!("pageaudit/", env!("CARGO_PKG_VERSION"), " (+https://github.com/pageaudit/pageaudit)");

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Failed to read settings file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse settings TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid setting {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Everything the orchestrator needs to run one audit.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AuditSettings {
    #[serde(default)]
    pub network: NetworkSettings,

    #[serde(default)]
    pub scoring: ScoreWeights,
}

impl AuditSettings {
    /// Parse settings from a TOML string. Missing keys take defaults.
    pub fn from_toml(s: &str) -> Result<Self, SettingsError> {
        let settings: Self = toml::from_str(s)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, SettingsError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Settings for a pure, offline inspection.
    pub fn offline() -> Self {
        Self {
            network: NetworkSettings {
                enabled: false,
                ..Default::default()
            },
            ..Default::default()
        }
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        self.network.validate()?;
        self.scoring.validate()
    }
}

/// Limits and timeouts for the network collaborators.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkSettings {
    /// Run auxiliary probes (robots.txt, sitemap, TLS, headers, links, images).
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Probe at most this many links per kind.
    #[serde(default = "default_max_links")]
    pub max_links_to_probe: usize,

    /// Size at most this many images.
    #[serde(default = "default_max_images")]
    pub max_images_to_size: usize,

    /// Timeout for fetching the audited document.
    #[serde(default = "default_fetch_timeout_ms")]
    pub fetch_timeout_ms: u64,

    /// Timeout for each auxiliary probe.
    #[serde(default = "default_probe_timeout_ms")]
    pub probe_timeout_ms: u64,

    /// Total budget for the auxiliary phase.
    #[serde(default = "default_aux_deadline_ms")]
    pub aux_deadline_ms: u64,

    #[serde(default = "default_max_redirects")]
    pub max_redirects: usize,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for NetworkSettings {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            max_links_to_probe: default_max_links(),
            max_images_to_size: default_max_images(),
            fetch_timeout_ms: default_fetch_timeout_ms(),
            probe_timeout_ms: default_probe_timeout_ms(),
            aux_deadline_ms: default_aux_deadline_ms(),
            max_redirects: default_max_redirects(),
            user_agent: default_user_agent(),
        }
    }
}

impl NetworkSettings {
    fn validate(&self) -> Result<(), SettingsError> {
        for (field, value) in [
            ("network.fetch_timeout_ms", self.fetch_timeout_ms),
            ("network.probe_timeout_ms", self.probe_timeout_ms),
            ("network.aux_deadline_ms", self.aux_deadline_ms),
        ] {
            if value == 0 {
                return Err(SettingsError::Invalid {
                    field,
                    reason: "must be greater than zero".to_string(),
                });
            }
        }
        if self.user_agent.trim().is_empty() {
            return Err(SettingsError::Invalid {
                field: "network.user_agent",
                reason: "must not be empty".to_string(),
            });
        }
        Ok(())
    }
}

fn default_enabled() -> bool {
    true
}

fn default_max_links() -> usize {
    10
}

fn default_max_images() -> usize {
    10
}

fn default_fetch_timeout_ms() -> u64 {
    10_000
}

fn default_probe_timeout_ms() -> u64 {
    5_000
}

fn default_aux_deadline_ms() -> u64 {
    15_000
}

fn default_max_redirects() -> usize {
    5
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

/// Per-severity deductions and the passed-check bonus.
///
/// The defaults are a heuristic tally, not a calibrated model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreWeights {
    #[serde(default = "default_critical")]
    pub critical: u32,
    #[serde(default = "default_high")]
    pub high: u32,
    #[serde(default = "default_medium")]
    pub medium: u32,
    #[serde(default = "default_low")]
    pub low: u32,
    /// Bonus per passed check.
    #[serde(default = "default_pass_bonus")]
    pub pass_bonus: f64,
    /// Upper bound on the total passed-check bonus.
    #[serde(default = "default_pass_bonus_cap")]
    pub pass_bonus_cap: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            critical: default_critical(),
            high: default_high(),
            medium: default_medium(),
            low: default_low(),
            pass_bonus: default_pass_bonus(),
            pass_bonus_cap: default_pass_bonus_cap(),
        }
    }
}

impl ScoreWeights {
    fn validate(&self) -> Result<(), SettingsError> {
        for (field, value) in [
            ("scoring.pass_bonus", self.pass_bonus),
            ("scoring.pass_bonus_cap", self.pass_bonus_cap),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(SettingsError::Invalid {
                    field,
                    reason: format!("must be a finite, non-negative number, got {value}"),
                });
            }
        }
        Ok(())
    }
}

fn default_critical() -> u32 {
    15
}

fn default_high() -> u32 {
    8
}

fn default_medium() -> u32 {
    4
}

fn default_low() -> u32 {
    1
}

fn default_pass_bonus() -> f64 {
    0.5
}

fn default_pass_bonus_cap() -> f64 {
    10.0
}
