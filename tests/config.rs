// SPDX-License-Identifier: MPL-2.0
use media_exif::config::{self, Config, ExifConfig, DEFAULT_LOG_LEVEL};
use media_exif::infrastructure::{select_parser, ParserKind};
use std::path::PathBuf;
use tempfile::tempdir;

#[test]
fn test_settings_file_round_trip() {
    let dir = tempdir().expect("Failed to create temporary directory");
    let path = dir.path().join("MediaExif").join("settings.toml");

    let config = Config {
        exif: ExifConfig {
            use_exiftool: false,
            exiftool_program: PathBuf::from("/usr/local/bin/exiftool"),
        },
        log_level: Some("trace".to_string()),
    };
    config::save_to_path(&config, &path).expect("Failed to write config file");

    let written = std::fs::read_to_string(&path).expect("Failed to read config file");
    assert!(written.contains("[exif]"));
    assert!(written.contains("use_exiftool = false"));

    let loaded = config::load_from_path(&path).expect("Failed to load config");
    assert_eq!(loaded, config);
}

#[test]
fn test_empty_file_yields_defaults() {
    let dir = tempdir().expect("Failed to create temporary directory");
    let path = dir.path().join("settings.toml");
    std::fs::write(&path, "").expect("Failed to write empty config");

    let loaded = config::load_from_path(&path).expect("Failed to load config");
    assert_eq!(loaded, Config::default());
    assert_eq!(loaded.log_level(), DEFAULT_LOG_LEVEL);
}

#[test]
fn test_config_drives_parser_selection() {
    let dir = tempdir().expect("Failed to create temporary directory");
    let path = dir.path().join("settings.toml");
    std::fs::write(&path, "[exif]\nuse_exiftool = false\n").expect("Failed to write config");

    let loaded = config::load_from_path(&path).expect("Failed to load config");
    assert_eq!(select_parser(&loaded.exif).kind(), ParserKind::Internal);
}
