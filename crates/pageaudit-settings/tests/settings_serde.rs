//! Serde and file-loading tests for pageaudit-settings.

use std::io::Write;

use pageaudit_settings::{AuditSettings, ScoreWeights, SettingsError};
use proptest::prelude::*;

// ============================================================================
// File loading
// ============================================================================

#[test]
fn given_settings_file_when_loaded_then_values_apply() {
    // Given a TOML file with both tables
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        "[network]\nenabled = false\nmax_images_to_size = 2\n\n[scoring]\ncritical = 20\n"
    )
    .unwrap();

    // When loading it
    let s = AuditSettings::from_file(file.path()).unwrap();

    // Then overridden fields change and the rest keep defaults
    assert!(!s.network.enabled);
    assert_eq!(s.network.max_images_to_size, 2);
    assert_eq!(s.scoring.critical, 20);
    assert_eq!(s.scoring.high, ScoreWeights::default().high);
}

#[test]
fn given_missing_file_when_loaded_then_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = AuditSettings::from_file(&dir.path().join("nope.toml")).unwrap_err();
    assert!(matches!(err, SettingsError::Io(_)));
}

#[test]
fn given_default_settings_when_serialized_to_json_then_field_names_are_snake_case() {
    let v = serde_json::to_value(AuditSettings::default()).unwrap();
    assert_eq!(v["network"]["max_links_to_probe"], 10);
    assert_eq!(v["network"]["aux_deadline_ms"], 15000);
    assert_eq!(v["scoring"]["pass_bonus_cap"], 10.0);
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #[test]
    fn toml_roundtrip_preserves_limits(links in 0usize..500, images in 0usize..500, timeout in 1u64..60_000) {
        let src = format!(
            "[network]\nmax_links_to_probe = {links}\nmax_images_to_size = {images}\nprobe_timeout_ms = {timeout}\n"
        );
        let s = AuditSettings::from_toml(&src).unwrap();
        prop_assert_eq!(s.network.max_links_to_probe, links);
        prop_assert_eq!(s.network.max_images_to_size, images);
        prop_assert_eq!(s.network.probe_timeout_ms, timeout);
    }
}
