use financia_config::{Config, ConfigError, ConfigManager};
use tempfile::tempdir;

#[test]
fn default_config_targets_brazilian_portuguese() {
    let cfg = Config::default();

    assert_eq!(cfg.locale, "pt-BR");
    assert_eq!(cfg.currency, "BRL");
    assert_eq!(cfg.storage_slot, "financia_transactions");
    assert_eq!(cfg.recent_window, 10);
    assert!(cfg.ai.enabled);
}

#[test]
fn config_manager_persists_and_loads_config() {
    let dir = tempdir().expect("tempdir");
    let manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).expect("manager");

    let mut cfg = Config::default();
    cfg.set("currency", "usd").expect("set currency");
    cfg.set("locale", "en-US").expect("set locale");
    cfg.set("ai.enabled", "off").expect("disable ai");

    manager.save(&cfg).expect("save config");
    let loaded = manager.load().expect("load config");

    assert_eq!(loaded, cfg);
    assert_eq!(loaded.currency, "USD");
    assert!(!loaded.ai.enabled);
    assert!(manager.config_path().ends_with("config/config.json"));
}

#[test]
fn missing_fields_fall_back_to_defaults() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("config.json");
    std::fs::write(&path, r#"{"locale":"en-US"}"#).expect("write partial config");

    let loaded = ConfigManager::new(path).load().expect("load partial config");
    assert_eq!(loaded.locale, "en-US");
    assert_eq!(loaded.currency, "BRL");
    assert_eq!(loaded.ai.model, "gemini-3-flash-preview");
}

#[test]
fn set_rejects_unknown_keys_and_bad_values() {
    let mut cfg = Config::default();
    assert!(matches!(
        cfg.set("theme", "dark"),
        Err(ConfigError::UnknownKey(_))
    ));
    assert!(matches!(
        cfg.set("recent_window", "ten"),
        Err(ConfigError::InvalidValue { .. })
    ));
    assert!(matches!(
        cfg.set("locale", "   "),
        Err(ConfigError::InvalidValue { .. })
    ));
    for key in Config::KEYS {
        assert!(cfg.get(key).is_ok(), "{key} should be readable");
    }
}

#[test]
fn zero_timeout_is_rejected() {
    let mut cfg = Config::default();
    assert!(matches!(
        cfg.set("ai.timeout_secs", "0"),
        Err(ConfigError::InvalidValue { .. })
    ));
    assert_eq!(cfg.ai.timeout_secs, 30);
    cfg.set("ai.timeout_secs", "5").expect("set timeout");
    assert_eq!(cfg.ai.timeout_secs, 5);
}

#[test]
fn api_key_variable_can_be_renamed() {
    let mut cfg = Config::default();
    cfg.set("ai.api_key_env", " MY_GEMINI_KEY ").expect("set key env");
    assert_eq!(cfg.ai.api_key_env, "MY_GEMINI_KEY");
    assert_eq!(cfg.get("ai.api_key_env").expect("get key env"), "MY_GEMINI_KEY");
    assert!(matches!(
        cfg.set("ai.api_key_env", ""),
        Err(ConfigError::InvalidValue { .. })
    ));
}

#[test]
fn endpoint_trailing_slash_is_trimmed() {
    let mut cfg = Config::default();
    cfg.set("ai.endpoint", "http://127.0.0.1:9000/v1beta/")
        .expect("set endpoint");
    assert_eq!(cfg.ai.endpoint, "http://127.0.0.1:9000/v1beta");
}
