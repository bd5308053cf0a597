use std::path::PathBuf;

use stack_panel::{AppError, PanelConfig};

#[test]
fn empty_toml_yields_defaults() {
    let config = PanelConfig::from_toml_str("").expect("defaults apply");

    assert_eq!(config, PanelConfig::default());
    assert_eq!(config.stack_dir, PathBuf::from(".sysStack"));
    assert_eq!(config.start_script, "start.sh");
    assert_eq!(config.stop_script, "stop.sh");
    assert_eq!(config.debug_script, "start-debug.sh");
    assert_eq!(
        config.properties_path,
        PathBuf::from("backend/src/main/resources/application.properties")
    );
}

#[test]
fn parses_full_config() {
    let config = PanelConfig::from_toml_str(
        r#"
stack_dir = "ops/scripts"
start_script = "up.sh"
stop_script = "down.sh"
debug_script = "up-debug.sh"
properties_path = "svc/application.properties"
title = "Ops Panel"
footer = "internal"
"#,
    )
    .expect("config parses");

    assert_eq!(config.start_script_path(), PathBuf::from("ops/scripts/up.sh"));
    assert_eq!(config.stop_script_path(), PathBuf::from("ops/scripts/down.sh"));
    assert_eq!(
        config.debug_script_path(),
        PathBuf::from("ops/scripts/up-debug.sh")
    );
    assert_eq!(config.title, "Ops Panel");
    assert_eq!(config.footer, "internal");
}

#[test]
fn script_paths_cover_all_three_scripts() {
    let config = PanelConfig::default();
    let paths = config.script_paths();

    assert_eq!(
        paths,
        vec![
            PathBuf::from(".sysStack/start.sh"),
            PathBuf::from(".sysStack/stop.sh"),
            PathBuf::from(".sysStack/start-debug.sh"),
        ]
    );
}

#[test]
fn rejects_script_name_with_path_separator() {
    let err = PanelConfig::from_toml_str(r#"start_script = "../evil.sh""#)
        .expect_err("separators rejected");
    assert!(matches!(err, AppError::Config(_)), "got {err}");
}

#[test]
fn rejects_empty_script_name() {
    let err = PanelConfig::from_toml_str(r#"stop_script = """#).expect_err("empty rejected");
    assert!(matches!(err, AppError::Config(_)));
}

#[test]
fn rejects_unknown_field() {
    let err = PanelConfig::from_toml_str("unknown_knob = 1").expect_err("unknown rejected");
    assert!(matches!(err, AppError::Config(_)));
}

#[test]
fn load_or_default_tolerates_missing_file() {
    let temp = tempfile::tempdir().expect("tempdir");
    let config =
        PanelConfig::load_or_default(temp.path().join("absent.toml")).expect("defaults apply");
    assert_eq!(config, PanelConfig::default());
}

#[test]
fn load_or_default_reads_existing_file() {
    let temp = tempfile::tempdir().expect("tempdir");
    let path = temp.path().join("stack-panel.toml");
    std::fs::write(&path, r#"title = "From File""#).expect("write config");

    let config = PanelConfig::load_or_default(&path).expect("config loads");
    assert_eq!(config.title, "From File");
    assert_eq!(config.start_script, "start.sh", "other fields stay default");
}

#[test]
fn load_or_default_reports_invalid_toml() {
    let temp = tempfile::tempdir().expect("tempdir");
    let path = temp.path().join("stack-panel.toml");
    std::fs::write(&path, "title = [").expect("write config");

    let err = PanelConfig::load_or_default(&path).expect_err("invalid toml rejected");
    assert!(matches!(err, AppError::Config(_)));
}
