//! Configuration files on disk and CLI-style overrides

use cat_eyes::{
    config::{Config, EXAMPLE_CONFIG},
    filters::MotionFilter,
    scene::Scene,
    Error,
};
use std::path::PathBuf;

fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("cat-eyes-{}-{}", std::process::id(), name))
}

#[test]
fn test_file_round_trip() {
    let path = temp_path("round_trip.yaml");
    let mut config = Config::default();
    config.camera.device_index = 2;
    config.filter.smoothing = 0.3;
    config.display.caption = "hello".to_string();

    config.to_file(&path).unwrap();
    let loaded = Config::from_file(&path).unwrap();
    std::fs::remove_file(&path).unwrap();

    assert_eq!(loaded.camera.device_index, 2);
    assert_eq!(loaded.filter.smoothing, 0.3);
    assert_eq!(loaded.filter.x_band, config.filter.x_band);
    assert_eq!(loaded.display.caption, "hello");
    assert_eq!(loaded.detector.model_path, config.detector.model_path);
}

#[test]
fn test_example_file_is_valid() {
    let path = temp_path("example.yaml");
    std::fs::write(&path, EXAMPLE_CONFIG).unwrap();
    let config = Config::from_file(&path).unwrap();
    std::fs::remove_file(&path).unwrap();

    config.validate().unwrap();
    MotionFilter::from_config(&config.filter).unwrap();
    assert_eq!(Scene::from_config(&config).size(), (640, 480));
}

#[test]
fn test_missing_file_is_io_error() {
    let err = Config::from_file(temp_path("does-not-exist.yaml")).unwrap_err();
    assert!(matches!(err, Error::Io(_)));
    assert!(err.is_fatal());
}

#[test]
fn test_wrong_types_are_rejected() {
    let err = Config::from_yaml("display:\n  width: wide\n").unwrap_err();
    assert!(matches!(err, Error::Config(_)));
}

#[test]
fn test_invalid_filter_is_caught_before_building() {
    let config = Config::from_yaml("filter:\n  smoothing: 0.0\n").unwrap();
    assert!(config.validate().is_err());
    assert!(matches!(MotionFilter::from_config(&config.filter), Err(Error::Config(_))));
}

#[test]
fn test_config_and_filter_reject_with_same_message() {
    let mut config = Config::default();
    config.filter.smoothing = 1.5;
    let from_config = config.validate().unwrap_err().to_string();
    let from_filter = MotionFilter::from_config(&config.filter).unwrap_err().to_string();
    assert_eq!(from_config, from_filter);
    assert!(from_config.contains("Smoothing"));

    let mut config = Config::default();
    config.filter.x_band = (0.9, 0.1);
    let from_config = config.validate().unwrap_err().to_string();
    let from_filter = MotionFilter::from_config(&config.filter).unwrap_err().to_string();
    assert_eq!(from_config, from_filter);
    assert!(from_config.contains("band for x"));
}

#[test]
fn test_overrides_survive_yaml_output() {
    let mut config = Config::default();
    config.camera.device_index = 1;
    config.detector.model_path = PathBuf::from("/opt/cascades/face.xml");

    let yaml = config.to_yaml().unwrap();
    assert!(yaml.contains("device_index: 1"));
    assert!(yaml.contains("/opt/cascades/face.xml"));

    let reparsed = Config::from_yaml(&yaml).unwrap();
    assert_eq!(reparsed.detector.model_path, PathBuf::from("/opt/cascades/face.xml"));
}
