use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use pageaudit_format::OutputFormat;
use pageaudit_settings::AuditSettings;
use serde::{Deserialize, Serialize};

use crate::cli::AuditArgs;

/// `<config_dir>/pageaudit/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserConfig {
    #[serde(default)]
    pub settings: AuditSettings,
    #[serde(default)]
    pub profiles: BTreeMap<String, Profile>,
}

/// Named overrides. Every field is optional and falls back to the settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub format: Option<String>, // "json", "md", "text"
    pub network: Option<bool>,
    pub max_links: Option<usize>,
    pub max_images: Option<usize>,
    pub timeout_ms: Option<u64>,
    pub user_agent: Option<String>,
    pub fail_under: Option<u8>,
}

pub fn config_path() -> Option<PathBuf> {
    Some(dirs::config_dir()?.join("pageaudit").join("config.toml"))
}

/// Reads the user config. A missing file is not an error; a broken one is.
pub fn load_config() -> Result<Option<UserConfig>> {
    match config_path() {
        Some(path) if path.exists() => load_config_from(&path).map(Some),
        _ => Ok(None),
    }
}

pub fn load_config_from(path: &Path) -> Result<UserConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    let config: UserConfig = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config {}", path.display()))?;
    config
        .settings
        .validate()
        .with_context(|| format!("Invalid settings in {}", path.display()))?;
    Ok(config)
}

pub fn resolve_profile<'a>(
    config: &'a Option<UserConfig>,
    name: Option<&String>,
) -> Option<&'a Profile> {
    config.as_ref().and_then(|c| {
        let key = name.map(|s| s.as_str()).unwrap_or("default");
        c.profiles.get(key)
    })
}

/// CLI flag > profile > base settings.
pub fn resolve_settings(
    args: &AuditArgs,
    profile: Option<&Profile>,
    base: AuditSettings,
) -> AuditSettings {
    let mut settings = base;
    let net = &mut settings.network;
    if let Some(enabled) = profile.and_then(|p| p.network) {
        net.enabled = enabled;
    }
    if args.no_network {
        net.enabled = false;
    }
    if let Some(n) = args.max_links.or_else(|| profile.and_then(|p| p.max_links)) {
        net.max_links_to_probe = n;
    }
    if let Some(n) = args.max_images.or_else(|| profile.and_then(|p| p.max_images)) {
        net.max_images_to_size = n;
    }
    if let Some(ms) = args.timeout_ms.or_else(|| profile.and_then(|p| p.timeout_ms)) {
        net.fetch_timeout_ms = ms;
    }
    if let Some(ua) = profile.and_then(|p| p.user_agent.clone()) {
        net.user_agent = ua;
    }
    settings
}

pub fn resolve_format(args: &AuditArgs, profile: Option<&Profile>) -> OutputFormat {
    args.format
        .map(OutputFormat::from)
        .or_else(|| {
            profile
                .and_then(|p| p.format.as_deref())
                .and_then(|s| s.parse().ok())
        })
        .unwrap_or(OutputFormat::Json)
}

pub fn resolve_fail_under(args: &AuditArgs, profile: Option<&Profile>) -> Option<u8> {
    args.fail_under.or_else(|| profile.and_then(|p| p.fail_under))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::FormatArg;

    #[test]
    fn cli_flags_override_profile() {
        let args = AuditArgs {
            max_links: Some(3),
            format: Some(FormatArg::Text),
            ..Default::default()
        };
        let profile = Profile {
            max_links: Some(20),
            max_images: Some(7),
            format: Some("md".into()),
            ..Default::default()
        };
        let s = resolve_settings(&args, Some(&profile), AuditSettings::default());
        assert_eq!(s.network.max_links_to_probe, 3);
        assert_eq!(s.network.max_images_to_size, 7);
        assert_eq!(resolve_format(&args, Some(&profile)), OutputFormat::Text);
    }

    #[test]
    fn profile_overrides_base_and_no_network_wins() {
        let profile = Profile {
            network: Some(true),
            timeout_ms: Some(1234),
            ..Default::default()
        };
        let args = AuditArgs {
            no_network: true,
            ..Default::default()
        };
        let s = resolve_settings(&args, Some(&profile), AuditSettings::default());
        assert!(!s.network.enabled);
        assert_eq!(s.network.fetch_timeout_ms, 1234);
    }

    #[test]
    fn defaults_without_profile() {
        let args = AuditArgs::default();
        assert_eq!(resolve_format(&args, None), OutputFormat::Json);
        assert_eq!(resolve_fail_under(&args, None), None);
        let s = resolve_settings(&args, None, AuditSettings::default());
        assert_eq!(s, AuditSettings::default());
    }

    #[test]
    fn config_toml_parses_settings_and_profiles() {
        let toml = r#"
            [settings.network]
            max_links_to_probe = 4

            [settings.scoring]
            critical = 20

            [profiles.default]
            format = "md"

            [profiles.ci]
            network = false
            fail_under = 80
        "#;
        let config: UserConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.settings.network.max_links_to_probe, 4);
        assert_eq!(config.settings.scoring.critical, 20);
        let config = Some(config);
        assert_eq!(
            resolve_profile(&config, None).and_then(|p| p.format.as_deref()),
            Some("md")
        );
        let ci = resolve_profile(&config, Some(&"ci".to_string())).unwrap();
        assert_eq!(ci.fail_under, Some(80));
        assert!(resolve_profile(&config, Some(&"missing".to_string())).is_none());
    }
}
