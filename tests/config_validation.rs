//! Integration tests for configuration validation

#![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

use mqtt_codec::config::{
    CodecConfig, ConversionConfig, FrameConfig, LoggingConfig, DEFAULT_MAX_FRAME_SIZE,
    MAX_REMAINING_LENGTH,
};
use mqtt_codec::service::conversion::{convert, ConversionContext, Value, ValueKind};
use mqtt_codec::ProtocolError;
use tracing::Level;

#[test]
fn test_default_config_validates() {
    let config = CodecConfig::default();
    let errors = config.validate();
    assert!(
        errors.is_empty(),
        "Default config should be valid, but got errors: {:?}",
        errors
    );
}

#[test]
fn test_zero_max_frame_size() {
    let mut config = CodecConfig::default();
    config.codec.max_frame_size = 0;

    let errors = config.validate();
    assert!(!errors.is_empty());
    assert!(errors.iter().any(|e| e.contains("Max frame size cannot be 0")));
}

#[test]
fn test_max_frame_size_above_protocol_limit() {
    let mut config = CodecConfig::default();
    config.codec.max_frame_size = MAX_REMAINING_LENGTH + 1;

    let errors = config.validate();
    assert!(errors.iter().any(|e| e.contains("Max frame size too large")));

    config.codec.max_frame_size = MAX_REMAINING_LENGTH;
    assert!(config.validate().is_empty());
}

#[test]
fn test_empty_queue_prefix() {
    let mut config = CodecConfig::default();
    config.conversion.queue_prefix = String::new();

    let errors = config.validate();
    assert!(errors.iter().any(|e| e.contains("cannot be empty")));
}

#[test]
fn test_queue_prefix_with_whitespace() {
    let mut config = CodecConfig::default();
    config.conversion.queue_prefix = "/my queue/".to_string();

    let errors = config.validate();
    assert!(errors.iter().any(|e| e.contains("must not contain whitespace")));
}

#[test]
fn test_empty_app_name() {
    let mut config = CodecConfig::default();
    config.logging.app_name = String::new();

    let errors = config.validate();
    assert!(errors
        .iter()
        .any(|e| e.contains("Application name cannot be empty")));
}

#[test]
fn test_long_app_name() {
    let mut config = CodecConfig::default();
    config.logging.app_name = "a".repeat(65);

    let errors = config.validate();
    assert!(errors.iter().any(|e| e.contains("Application name too long")));
}

#[test]
fn test_validate_strict_with_valid_config() {
    let config = CodecConfig::default();
    assert!(config.validate_strict().is_ok());
}

#[test]
fn test_validate_strict_with_invalid_config() {
    let mut config = CodecConfig::default();
    config.codec.max_frame_size = 0;

    let result = config.validate_strict();
    assert!(matches!(result, Err(ProtocolError::ConfigError(_))));

    if let Err(e) = result {
        assert!(e.to_string().contains("Configuration validation failed"));
    }
}

#[test]
fn test_multiple_validation_errors() {
    let mut config = CodecConfig::default();
    config.codec.max_frame_size = 0;
    config.conversion.queue_prefix = String::new();
    config.logging.app_name = String::new();

    let errors = config.validate();
    assert_eq!(errors.len(), 3, "Expected 3 errors, got {:?}", errors);
}

#[test]
fn test_default_with_overrides() {
    let config = CodecConfig::default_with_overrides(|c| {
        c.codec.max_frame_size = 4096;
        c.logging.json_format = true;
    });

    assert_eq!(config.codec.max_frame_size, 4096);
    assert!(config.logging.json_format);
    assert_eq!(config.conversion.queue_prefix, "/queue/");
    assert_eq!(config.codec.codec().max_frame_size(), 4096);
}

#[test]
fn test_partial_toml_uses_defaults() {
    let config = CodecConfig::from_toml(
        r#"
        [codec]
        max_frame_size = 1024
        "#,
    )
    .expect("partial config should parse");

    assert_eq!(config.codec.max_frame_size, 1024);
    assert_eq!(config.logging.log_level, Level::INFO);
    assert_eq!(config.logging.app_name, "mqtt-codec");
}

#[test]
fn test_invalid_toml_rejected() {
    let result = CodecConfig::from_toml("[codec\nmax_frame_size = ");
    assert!(matches!(result, Err(ProtocolError::ConfigError(_))));

    let result = CodecConfig::from_toml(
        r#"
        [logging]
        app_name = "x"
        log_level = "loud"
        json_format = false
        "#,
    );
    assert!(matches!(result, Err(ProtocolError::ConfigError(_))));
}

#[test]
fn test_example_config_parses_back() {
    let example = CodecConfig::example_config();
    assert!(example.contains("max_frame_size"));
    assert!(example.contains("queue_prefix"));

    let parsed = CodecConfig::from_toml(&example).expect("example config should parse");
    assert_eq!(parsed.codec.max_frame_size, DEFAULT_MAX_FRAME_SIZE);
}

#[test]
fn test_save_and_load_file() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("codec.toml");

    let config = CodecConfig {
        codec: FrameConfig {
            max_frame_size: 65_536,
        },
        conversion: ConversionConfig {
            queue_prefix: "/q/".to_string(),
        },
        logging: LoggingConfig {
            app_name: "broker-edge".to_string(),
            log_level: Level::DEBUG,
            json_format: true,
        },
    };
    config.save_to_file(&path).expect("save config");

    let loaded = CodecConfig::from_file(&path).expect("load config");
    assert_eq!(loaded.codec.max_frame_size, 65_536);
    assert_eq!(loaded.conversion.queue_prefix, "/q/");
    assert_eq!(loaded.logging.app_name, "broker-edge");
    assert_eq!(loaded.logging.log_level, Level::DEBUG);
    assert!(loaded.logging.json_format);
}

#[test]
fn test_missing_file_rejected() {
    let dir = tempfile::tempdir().expect("temp dir");
    let result = CodecConfig::from_file(dir.path().join("absent.toml"));
    assert!(matches!(result, Err(ProtocolError::ConfigError(_))));
}

#[test]
fn test_env_overrides() {
    // Only this test touches these variables.
    std::env::set_var("MQTT_CODEC_MAX_FRAME_SIZE", "2048");
    std::env::set_var("MQTT_CODEC_QUEUE_PREFIX", "/jobs/");
    std::env::set_var("MQTT_CODEC_LOG_LEVEL", "warn");

    let config = CodecConfig::from_env().expect("env config");
    assert_eq!(config.codec.max_frame_size, 2048);
    assert_eq!(config.conversion.queue_prefix, "/jobs/");
    assert_eq!(config.logging.log_level, Level::WARN);

    std::env::set_var("MQTT_CODEC_MAX_FRAME_SIZE", "lots");
    assert!(matches!(
        CodecConfig::from_env(),
        Err(ProtocolError::ConfigError(_))
    ));

    std::env::remove_var("MQTT_CODEC_MAX_FRAME_SIZE");
    std::env::remove_var("MQTT_CODEC_QUEUE_PREFIX");
    std::env::remove_var("MQTT_CODEC_LOG_LEVEL");
}

#[test]
fn test_conversion_context_follows_config() {
    let config = CodecConfig::default_with_overrides(|c| {
        c.conversion.queue_prefix = "/work/".to_string();
    });
    let ctx = ConversionContext::from_config(&config.conversion);

    match convert(&ctx, &Value::from("jobs"), ValueKind::Destination) {
        Some(Value::Destination(dest)) => {
            assert_eq!(dest.name(), "jobs");
            assert_eq!(dest.address(), "/work/jobs");
        }
        other => panic!("expected destination, got {other:?}"),
    }
}
