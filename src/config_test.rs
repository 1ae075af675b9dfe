use super::*;

/// # Safety
/// Only `from_env_reads_overrides_and_defaults` touches these variables, so
/// no other test in this binary races with it.
unsafe fn clear_chat_env() {
    unsafe {
        std::env::remove_var("CHAT_ENDPOINT");
        std::env::remove_var("CHAT_REQUEST_TIMEOUT_SECS");
        std::env::remove_var("CHAT_CONNECT_TIMEOUT_SECS");
    }
}

#[test]
fn from_env_reads_overrides_and_defaults() {
    unsafe { clear_chat_env() };
    let cfg = SessionConfig::from_env().unwrap();
    assert_eq!(cfg.endpoint, DEFAULT_ENDPOINT);
    assert_eq!(cfg.timeouts, RequestTimeouts::default());

    unsafe {
        std::env::set_var("CHAT_ENDPOINT", "https://widgets.example.test/api/agent");
        std::env::set_var("CHAT_REQUEST_TIMEOUT_SECS", "15");
        std::env::set_var("CHAT_CONNECT_TIMEOUT_SECS", "3");
    }
    let cfg = SessionConfig::from_env().unwrap();
    assert_eq!(cfg.endpoint, "https://widgets.example.test/api/agent");
    assert_eq!(cfg.timeouts, RequestTimeouts { request_secs: 15, connect_secs: 3 });

    unsafe {
        std::env::set_var("CHAT_REQUEST_TIMEOUT_SECS", "0");
        std::env::set_var("CHAT_CONNECT_TIMEOUT_SECS", "soon");
    }
    let cfg = SessionConfig::from_env().unwrap();
    assert_eq!(cfg.timeouts, RequestTimeouts::default());

    unsafe { std::env::set_var("CHAT_ENDPOINT", "not a url") };
    assert!(matches!(SessionConfig::from_env(), Err(SessionError::InvalidEndpoint { .. })));

    unsafe { clear_chat_env() };
}

#[test]
fn new_accepts_http_and_https() {
    assert!(SessionConfig::new("http://localhost:3000/api/chat").is_ok());
    assert!(SessionConfig::new("https://example.test/proxy").is_ok());
}

#[test]
fn new_trims_whitespace() {
    let cfg = SessionConfig::new("  http://localhost/api/chat \n").unwrap();
    assert_eq!(cfg.endpoint, "http://localhost/api/chat");
}

#[test]
fn new_rejects_relative_path() {
    let err = SessionConfig::new("/api/chat").unwrap_err();
    assert!(matches!(err, SessionError::InvalidEndpoint { ref url, .. } if url == "/api/chat"));
}

#[test]
fn new_rejects_non_http_scheme() {
    let err = SessionConfig::new("ftp://example.test/chat").unwrap_err();
    assert!(err.to_string().contains("unsupported scheme 'ftp'"));
}

#[test]
fn with_timeouts_overrides_defaults() {
    let cfg = SessionConfig::new("http://localhost/api/chat")
        .unwrap()
        .with_timeouts(RequestTimeouts { request_secs: 5, connect_secs: 1 });
    assert_eq!(cfg.timeouts.request_secs, 5);
    assert_eq!(cfg.timeouts.connect_secs, 1);
}
