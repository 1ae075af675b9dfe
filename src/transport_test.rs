use super::*;
use crate::config::RequestTimeouts;

#[test]
fn new_keeps_configured_endpoint() {
    let config = SessionConfig::new("http://127.0.0.1:9/api/chat").unwrap();
    let transport = HttpTransport::new(&config).unwrap();
    assert_eq!(transport.endpoint(), "http://127.0.0.1:9/api/chat");
    assert_eq!(transport.request_timeout_secs, config.timeouts.request_secs);
}

#[tokio::test]
async fn unreachable_endpoint_is_request_error() {
    // Port 9 (discard) is not expected to accept connections on test hosts.
    let config = SessionConfig::new("http://127.0.0.1:9/api/chat")
        .unwrap()
        .with_timeouts(RequestTimeouts { request_secs: 5, connect_secs: 2 });
    let transport = HttpTransport::new(&config).unwrap();
    let request = ChatRequest::new(
        crate::types::Message::user("hello"),
        crate::identity::Identifier::empty(),
        crate::identity::Identifier::empty(),
    );

    let err = transport.send(&request).await.unwrap_err();
    assert!(matches!(err, TransportError::Request(_) | TransportError::Timeout { .. }));
    assert!(err.retryable());
}
