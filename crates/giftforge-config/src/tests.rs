//! Tests for engine configuration.

use super::*;

#[test]
fn test_toml_parsing() {
    let toml = r#"
        allow_reciprocal = true
        tier_mode = "min_floor"
        random_seed = 42

        [termination]
        max_attempts = 500
        timeout_ms = 1500
    "#;

    let config = EngineConfig::from_toml_str(toml).unwrap();
    assert!(config.allow_reciprocal);
    assert_eq!(config.tier_mode, TierMode::MinFloor);
    assert_eq!(config.random_seed, Some(42));
    assert_eq!(config.max_attempts(), 500);
    assert_eq!(config.time_limit(), Duration::from_millis(1500));
}

#[test]
fn test_yaml_parsing() {
    let yaml = r#"
        allow_reciprocal: false
        tier_mode: "off"
        random_seed: 42
        termination:
          max_attempts: 10
    "#;

    let config = EngineConfig::from_yaml_str(yaml).unwrap();
    assert_eq!(config.tier_mode, TierMode::Off);
    assert_eq!(config.random_seed, Some(42));
    assert_eq!(config.max_attempts(), 10);
}

#[test]
fn test_defaults() {
    let config = EngineConfig::from_toml_str("").unwrap();
    assert!(!config.allow_reciprocal);
    assert_eq!(config.tier_mode, TierMode::Off);
    assert_eq!(config.random_seed, None);
    assert_eq!(config.max_attempts(), DEFAULT_MAX_ATTEMPTS);
    assert_eq!(
        config.time_limit(),
        Duration::from_millis(DEFAULT_TIMEOUT_MS)
    );
}

#[test]
fn test_builder() {
    let config = EngineConfig::new()
        .with_random_seed(123)
        .with_allow_reciprocal(true)
        .with_tier_mode(TierMode::MinFloor)
        .with_max_attempts(64)
        .with_timeout_ms(10);

    assert_eq!(config.random_seed, Some(123));
    assert!(config.allow_reciprocal);
    assert_eq!(config.max_attempts(), 64);
    assert_eq!(config.time_limit(), Duration::from_millis(10));
}

#[test]
fn test_zero_budget_rejected() {
    let config = EngineConfig::new().with_max_attempts(0);
    assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

    let config = EngineConfig::new().with_timeout_ms(0);
    assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
}

#[test]
fn test_parsed_zero_budget_rejected() {
    let toml = EngineConfig::from_toml_str("[termination]\nmax_attempts = 0\n");
    assert!(matches!(toml, Err(ConfigError::Invalid(_))));

    let yaml = EngineConfig::from_yaml_str("termination:\n  timeout_ms: 0\n");
    assert!(matches!(yaml, Err(ConfigError::Invalid(_))));
}

#[test]
fn test_unknown_tier_mode_rejected() {
    let result = EngineConfig::from_toml_str(r#"tier_mode = "strict""#);
    assert!(matches!(result, Err(ConfigError::Toml(_))));
}

#[test]
fn test_missing_file() {
    let result = EngineConfig::load("definitely/not/here/giftforge.toml");
    assert!(matches!(result, Err(ConfigError::Io(_))));
}
