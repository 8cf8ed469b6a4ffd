use std::io::Write;
use tempfile::NamedTempFile;
use timecode_tools::config::{Config, load_from_path, save_to_path};

#[test]
fn test_load_config_valid() {
    let mut temp_file = NamedTempFile::new().unwrap();
    let config_content = r#"
        [launch]
        datum_column = 4
        marker = "GMT"
        skip_header = false

        [drying]
        seconds_per_cm2 = 2.5
    "#;
    temp_file.write_all(config_content.as_bytes()).unwrap();

    let config = load_from_path(temp_file.path()).expect("Failed to load valid config");

    assert_eq!(config.launch.datum_column, 4);
    assert_eq!(config.launch.marker, "GMT");
    assert!(!config.launch.skip_header);
    assert_eq!(config.drying.seconds_per_cm2, 2.5);
    assert!(config.state.state_dir_override.is_none());
}

#[test]
fn test_load_config_partial_section_uses_defaults() {
    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file.write_all(b"[launch]\nmarker = \"Z\"\n").unwrap();

    let config = load_from_path(temp_file.path()).unwrap();

    assert_eq!(config.launch.marker, "Z");
    assert_eq!(config.launch.datum_column, 3);
    assert_eq!(config.drying.seconds_per_cm2, 1.0);
}

#[test]
fn test_load_config_empty_file_is_default() {
    let temp_file = NamedTempFile::new().unwrap();

    let config = load_from_path(temp_file.path()).unwrap();
    assert_eq!(config, Config::default());
}

#[test]
fn test_load_config_rejects_negative_rate() {
    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file
        .write_all(b"[drying]\nseconds_per_cm2 = -1.0\n")
        .unwrap();

    let result = load_from_path(temp_file.path());
    assert!(result.is_err());
    assert!(
        result
            .unwrap_err()
            .to_string()
            .contains("Drying rate must be a non-negative number")
    );
}

#[test]
fn test_save_then_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");

    let mut config = Config::default();
    config.launch.marker = "GMT".to_string();
    config.drying.seconds_per_cm2 = 0.25;
    save_to_path(&config, &path).unwrap();

    assert_eq!(load_from_path(&path).unwrap(), config);
}
