use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use pageaudit_core::AuditSource;
use pageaudit_settings::AuditSettings;

use crate::cli::AuditArgs;
use crate::config::{
    load_config, resolve_fail_under, resolve_format, resolve_profile, resolve_settings,
};

/// Exit code when `--fail-under` is set and the score is below it.
pub const EXIT_BELOW_THRESHOLD: i32 = 2;

pub(crate) fn handle(
    args: AuditArgs,
    profile_name: Option<&String>,
    config_path: Option<&Path>,
) -> Result<i32> {
    let user_config = load_config()?;
    let profile = resolve_profile(&user_config, profile_name);
    if profile.is_none() && profile_name.is_some_and(|n| n != "default") {
        tracing::warn!(profile = ?profile_name, "profile not found in config, using defaults");
    }

    let base = match config_path {
        Some(path) => AuditSettings::from_file(path)
            .with_context(|| format!("Invalid settings in {}", path.display()))?,
        None => user_config
            .as_ref()
            .map(|c| c.settings.clone())
            .unwrap_or_default(),
    };
    let settings = resolve_settings(&args, profile, base);
    let format = resolve_format(&args, profile);
    let fail_under = resolve_fail_under(&args, profile);

    let source = match &args.html_file {
        Some(path) => AuditSource::Html {
            html: read_html(path)?,
            url: args.url.clone(),
        },
        None => AuditSource::Url(args.target.clone().unwrap_or_default()),
    };
    let subject = match &source {
        AuditSource::Url(url) => url.clone(),
        AuditSource::Html { .. } => args
            .html_file
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_default(),
    };

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Failed to start async runtime")?;
    let result = runtime
        .block_on(pageaudit_core::audit_source(source, &settings))
        .with_context(|| format!("Failed to audit {subject}"))?;

    pageaudit_format::write_report(&result, format, args.output.as_deref())
        .context("Failed to write report")?;

    if let Some(min) = fail_under
        && result.score < min
    {
        eprintln!("Score {} is below --fail-under {}", result.score, min);
        return Ok(EXIT_BELOW_THRESHOLD);
    }
    Ok(0)
}

fn read_html(path: &Path) -> Result<String> {
    if path.as_os_str() == "-" {
        let mut html = String::new();
        std::io::stdin()
            .read_to_string(&mut html)
            .context("Failed to read HTML from stdin")?;
        return Ok(html);
    }
    let bytes =
        std::fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
