//! Integration tests for configuration loading

use edsan::config::{load_config, RulesKind};
use std::io::Write;
use tempfile::NamedTempFile;

fn write_config(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn test_load_full_config() {
    let file = write_config(
        r#"
[application]
log_level = "debug"

[input]
bundle_dir = "fhir"

[extraction]
rules = "builtin"
reference_scope = "run"

[consolidation]
default_ward = "Urgences"

[output]
dir = "eds"

[logging]
local_enabled = true
local_path = "logs"
local_rotation = "hourly"
"#,
    );

    let config = load_config(file.path()).unwrap();
    assert_eq!(config.application.log_level, "debug");
    assert_eq!(config.input.bundle_dir, "fhir");
    assert_eq!(config.extraction.rules, RulesKind::Builtin);
    assert_eq!(config.consolidation.default_ward, "Urgences");
    assert_eq!(config.output.dir, "eds");
    assert!(config.logging.local_enabled);
    assert_eq!(config.logging.local_rotation, "hourly");
}

#[test]
fn test_defaults_applied_for_missing_sections() {
    let file = write_config(
        r#"
[input]
bundle_dir = "fhir"

[output]
dir = "eds"
"#,
    );

    let config = load_config(file.path()).unwrap();
    assert_eq!(config.application.log_level, "info");
    assert_eq!(config.extraction.rules, RulesKind::Builtin);
    assert_eq!(config.consolidation.default_ward, "Service Général");
    assert!(!config.logging.local_enabled);
}

#[test]
fn test_env_var_substitution() {
    std::env::set_var("EDSAN_IT_BUNDLE_DIR", "/data/fhir");
    let file = write_config(
        r#"
[input]
bundle_dir = "${EDSAN_IT_BUNDLE_DIR}"

[output]
dir = "eds"
"#,
    );

    let config = load_config(file.path()).unwrap();
    assert_eq!(config.input.bundle_dir, "/data/fhir");
    std::env::remove_var("EDSAN_IT_BUNDLE_DIR");
}

#[test]
fn test_missing_env_var_is_an_error() {
    std::env::remove_var("EDSAN_IT_UNSET_VAR");
    let file = write_config(
        r#"
[input]
bundle_dir = "${EDSAN_IT_UNSET_VAR}"

[output]
dir = "eds"
"#,
    );

    let err = load_config(file.path()).unwrap_err();
    assert!(err.to_string().contains("EDSAN_IT_UNSET_VAR"));
}

#[test]
fn test_mapping_rules_require_mapping_file() {
    let file = write_config(
        r#"
[input]
bundle_dir = "fhir"

[extraction]
rules = "mapping"

[output]
dir = "eds"
"#,
    );

    let err = load_config(file.path()).unwrap_err();
    assert!(err.to_string().contains("mapping_file"));
}

#[test]
fn test_invalid_rotation_rejected() {
    let file = write_config(
        r#"
[input]
bundle_dir = "fhir"

[output]
dir = "eds"

[logging]
local_rotation = "weekly"
"#,
    );

    assert!(load_config(file.path()).is_err());
}
