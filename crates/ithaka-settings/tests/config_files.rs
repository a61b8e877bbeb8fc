//! Configuration file round trips through real files.

use ithaka_cropper::AspectRatioPreset;
use ithaka_settings::EditorConfig;
use tempfile::TempDir;

fn customized() -> EditorConfig {
    let mut config = EditorConfig::new();
    config.crop.snap_grid_size = 20.0;
    config.crop.keyboard_step = 8.0;
    config.crop.default_preset = AspectRatioPreset::Custom(2.5);
    config.history.max_depth = 120;
    config
}

#[test]
fn test_toml_round_trip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("editor.toml");

    let config = customized();
    config.save_to_file(&path).unwrap();
    let loaded = EditorConfig::load_from_file(&path).unwrap();
    assert_eq!(loaded, config);

    let text = std::fs::read_to_string(&path).unwrap();
    assert!(text.contains("[crop]"));
    assert!(text.contains("default_preset = \"custom:2.5\""));
}

#[test]
fn test_json_round_trip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("editor.json");

    let config = customized();
    config.save_to_file(&path).unwrap();
    assert_eq!(EditorConfig::load_from_file(&path).unwrap(), config);
}

#[test]
fn test_save_creates_parent_directories() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("ithaka").join("nested").join("editor.toml");
    EditorConfig::new().save_to_file(&path).unwrap();
    assert!(path.exists());
}

#[test]
fn test_unsupported_extension() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("editor.yaml");
    std::fs::write(&path, "crop: {}").unwrap();

    let err = EditorConfig::load_from_file(&path).unwrap_err();
    assert!(err.is_config_error());
    assert!(EditorConfig::new().save_to_file(&path).is_err());
}

#[test]
fn test_invalid_values_are_rejected_on_load() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("editor.toml");
    std::fs::write(&path, "[history]\nmax_depth = 0\n").unwrap();

    let err = EditorConfig::load_from_file(&path).unwrap_err();
    assert!(err.to_string().contains("history.max_depth"));
}

#[test]
fn test_invalid_values_are_rejected_on_save() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("editor.json");
    let mut config = EditorConfig::new();
    config.crop.keyboard_step = -1.0;

    assert!(config.save_to_file(&path).is_err());
    assert!(!path.exists());
}

#[test]
fn test_malformed_file_reports_format() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("editor.json");
    std::fs::write(&path, "{ not json").unwrap();

    let err = EditorConfig::load_from_file(&path).unwrap_err();
    assert!(err.to_string().starts_with("Invalid JSON config"));
}

#[test]
fn test_unknown_preset_is_a_parse_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("editor.toml");
    std::fs::write(&path, "[crop]\ndefault_preset = \"panorama\"\n").unwrap();

    assert!(EditorConfig::load_from_file(&path).is_err());
}

#[test]
fn test_missing_file_loads_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("absent.toml");
    assert_eq!(EditorConfig::load_or_default(&path).unwrap(), EditorConfig::default());

    // Reading a missing file directly is an I/O error.
    assert!(EditorConfig::load_from_file(&path).is_err());
}
