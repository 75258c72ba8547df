mod common;

use common::temp_config_manager;
use kakeibo::config::Config;

#[test]
fn missing_file_loads_defaults() {
    let manager = temp_config_manager();
    let config = manager.load().unwrap();
    assert_eq!(config, Config::default());
    assert_eq!(config.currency_symbol, "¥");
    assert!(!manager.path().exists());
}

#[test]
fn save_round_trips_preferences() {
    let manager = temp_config_manager();
    let mut config = Config::default();
    config.set_value("high_contrast_mode", "yes").unwrap();
    config.set_value("currency_symbol", " JPY ").unwrap();

    manager.save(&config).unwrap();

    let loaded = manager.load().unwrap();
    assert!(loaded.high_contrast_mode);
    assert_eq!(loaded.currency_symbol, "JPY");
    let siblings: Vec<_> = std::fs::read_dir(manager.path().parent().unwrap())
        .unwrap()
        .map(|entry| entry.unwrap().file_name())
        .collect();
    assert_eq!(siblings, vec!["config.json"]);
}

#[test]
fn partial_file_fills_in_defaults() {
    let manager = temp_config_manager();
    std::fs::write(manager.path(), r#"{ "quiet_mode": true }"#).unwrap();

    let loaded = manager.load().unwrap();
    assert!(loaded.quiet_mode);
    assert_eq!(loaded.currency_symbol, "¥");
}

#[test]
fn bad_values_are_rejected() {
    let mut config = Config::default();
    assert!(config.set_value("currency_symbol", "   ").is_err());
    assert!(config.set_value("quiet_mode", "sometimes").is_err());
    assert!(config.set_value("theme", "dark").is_err());
    assert_eq!(config, Config::default());
}
