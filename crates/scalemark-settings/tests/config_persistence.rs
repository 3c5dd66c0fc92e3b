//! Config file round trips through JSON and TOML.

use std::path::PathBuf;

use scalemark_settings::{Config, SettingsError, Theme};

fn customised() -> Config {
    let mut config = Config::new();
    config.ui.theme = Theme::Dark;
    config.ui.stage_width = 1280.0;
    config.ui.default_length_hint = "50cm".to_string();
    config.export.draw_border = false;
    config.add_recent_file(PathBuf::from("/plans/floor.png"));
    config
}

#[test]
fn test_toml_round_trip_in_new_directory() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("config.toml");
    let config = customised();

    config.save_to_file(&path).unwrap();
    let loaded = Config::load_from_file(&path).unwrap();

    assert_eq!(loaded, config);
}

#[test]
fn test_json_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    let config = customised();

    config.save_to_file(&path).unwrap();
    let text = std::fs::read_to_string(&path).unwrap();
    assert!(text.contains("\"theme\": \"dark\""));

    assert_eq!(Config::load_from_file(&path).unwrap(), config);
}

#[test]
fn test_missing_file_falls_back_to_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let config = Config::load_or_default(&dir.path().join("absent.toml")).unwrap();
    assert_eq!(config, Config::default());
}

#[test]
fn test_invalid_file_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[ui]\nstage_width = 0.0\nstage_height = 700.0\n").unwrap();

    let err = Config::load_or_default(&path).unwrap_err();
    assert!(matches!(err, SettingsError::InvalidSetting { .. }));

    std::fs::write(&path, "not = [valid").unwrap();
    assert!(matches!(
        Config::load_from_file(&path),
        Err(SettingsError::TomlError(_))
    ));
}

#[test]
fn test_invalid_config_is_not_saved() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    let mut config = Config::new();
    config.export.file_name.clear();

    assert!(config.save_to_file(&path).is_err());
    assert!(!path.exists());
}

#[test]
fn test_default_path_ends_in_app_directory() {
    if let Ok(path) = Config::default_path() {
        assert!(path.ends_with("scalemark/config.toml"));
    }
}
