use super::*;

#[test]
fn test_bot_config_defaults() {
    let cfg = BotConfig::default();
    assert_eq!(cfg.api_url, "https://api.telegram.org");
    assert_eq!(cfg.request_timeout_secs, 10);
    assert_eq!(cfg.poll_timeout_secs, 30);
    assert_eq!(cfg.poll_interval(), Duration::from_secs(1));
    assert_eq!(cfg.queue_capacity, 64);
    assert_eq!(cfg.error_capacity, 16);
    assert!(cfg.validate().is_ok());
}

#[test]
fn test_parse_overrides() {
    let cfg = parse(
        r#"
        [telegram]
        bot_token = "123:abc"
        poll_timeout_secs = 5
        poll_interval_ms = 250
    "#,
    )
    .unwrap();
    assert_eq!(cfg.telegram.bot_token, "123:abc");
    assert_eq!(cfg.telegram.poll_timeout_secs, 5);
    assert_eq!(cfg.telegram.poll_interval(), Duration::from_millis(250));
    // Untouched fields keep their defaults.
    assert_eq!(cfg.telegram.request_timeout_secs, 10);
    assert_eq!(cfg.telegram.queue_capacity, 64);
}

#[test]
fn test_parse_empty_uses_defaults() {
    let cfg = parse("").unwrap();
    assert!(cfg.telegram.bot_token.is_empty());
    assert_eq!(cfg.telegram.api_url, "https://api.telegram.org");
}

#[test]
fn test_parse_invalid_toml() {
    let err = parse("[telegram\nbot_token = 1").unwrap_err();
    assert!(matches!(err, TgError::Config(_)));
}

#[test]
fn test_load_missing_file_uses_defaults() {
    let cfg = load("/nonexistent/__tgbot_test_config__.toml").unwrap();
    assert_eq!(cfg.telegram.queue_capacity, 64);
}

#[test]
fn test_load_from_file() {
    let path = std::env::temp_dir().join("__tgbot_test_config__.toml");
    std::fs::write(&path, "[telegram]\nqueue_capacity = 8\n").unwrap();

    let cfg = load(path.to_str().unwrap()).unwrap();
    assert_eq!(cfg.telegram.queue_capacity, 8);

    let _ = std::fs::remove_file(&path);
}

#[test]
fn test_load_unreadable_path_is_io_error() {
    // A directory exists but cannot be read as a file.
    let dir = std::env::temp_dir();
    let err = load(dir.to_str().unwrap()).unwrap_err();
    assert!(matches!(err, TgError::Io(_)), "got {err:?}");
}

#[test]
fn test_validate_api_url_scheme() {
    let mut cfg = BotConfig::default();
    cfg.api_url = "http://localhost:8081".into();
    assert!(cfg.validate().is_ok());

    cfg.api_url = "ftp://api.telegram.org".into();
    match cfg.validate() {
        Err(TgError::Config(msg)) => assert!(msg.contains("ftp://api.telegram.org")),
        other => panic!("expected config error, got {other:?}"),
    }
}

#[test]
fn test_validate_rejects_zero_capacity() {
    let mut cfg = BotConfig::default();
    cfg.queue_capacity = 0;
    assert!(matches!(cfg.validate(), Err(TgError::Config(_))));

    let mut cfg = BotConfig::default();
    cfg.error_capacity = 0;
    assert!(matches!(cfg.validate(), Err(TgError::Config(_))));
}

#[test]
fn test_validate_rejects_zero_timeout_and_bad_url() {
    let mut cfg = BotConfig::default();
    cfg.request_timeout_secs = 0;
    assert!(cfg.validate().is_err());

    let mut cfg = BotConfig::default();
    cfg.api_url = "api.telegram.org".into();
    assert!(cfg.validate().is_err());
}

#[test]
fn test_validate_accepts_empty_token() {
    assert!(BotConfig::default().validate().is_ok());
}

#[test]
fn test_debug_redacts_token() {
    let cfg = BotConfig::with_token("123456:SECRET");
    let dbg = format!("{cfg:?}");
    assert!(!dbg.contains("SECRET"), "token leaked: {dbg}");
    assert!(dbg.contains("<redacted>"));
}
