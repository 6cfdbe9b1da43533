use super::*;

#[test]
fn test_http_config_default() {
    let config = HttpConfig::default();
    assert!(config.user_agent.contains("lolbuilds-cli"));
    assert_eq!(config.timeout, Some(Duration::from_secs(30)));
}

#[test]
fn test_http_config_without_timeout() {
    let config = HttpConfig {
        timeout: None,
        ..HttpConfig::default()
    };
    assert!(config.timeout.is_none());
    // タイムアウトなしでもクライアントは構築できる
    let _client = config.build_client();
}
