use super::*;

fn ids() -> (Identifier, Identifier) {
    (Identifier::from_stored("user0001").unwrap(), Identifier::from_stored("session0001").unwrap())
}

// =============================================================================
// Message
// =============================================================================

#[test]
fn message_constructors_set_role() {
    assert_eq!(Message::user("hi").role(), Role::User);
    assert_eq!(Message::agent("hello").role(), Role::Agent);
    assert_eq!(Message::agent("hello").content(), "hello");
}

#[test]
fn message_serializes_lowercase_role() {
    let json = serde_json::to_value(Message::agent("x")).unwrap();
    assert_eq!(json, serde_json::json!({ "role": "agent", "content": "x" }));
}

// =============================================================================
// ChatRequest
// =============================================================================

#[test]
fn chat_request_matches_proxy_contract() {
    let (user_id, session_id) = ids();
    let request = ChatRequest::new(Message::user("hello"), user_id, session_id);

    assert_eq!(
        serde_json::to_value(&request).unwrap(),
        serde_json::json!({
            "data": { "message": { "role": "user", "content": "hello" } },
            "stateful": true,
            "stream": false,
            "user_id": "user0001",
            "session_id": "session0001",
            "verbose": false
        })
    );
}

#[test]
fn chat_request_with_detached_identity_sends_empty_ids() {
    let request = ChatRequest::new(Message::user("x"), Identifier::empty(), Identifier::empty());
    let json = serde_json::to_value(&request).unwrap();
    assert_eq!(json["user_id"], "");
    assert_eq!(json["session_id"], "");
}

// =============================================================================
// parse_agent_reply
// =============================================================================

#[test]
fn parse_agent_reply_extracts_content() {
    let body = r#"{"output_data":{"content":"hi there"}}"#;
    assert_eq!(parse_agent_reply(body).unwrap(), "hi there");
}

#[test]
fn parse_agent_reply_keeps_empty_string_content() {
    let body = r#"{"output_data":{"content":""}}"#;
    assert_eq!(parse_agent_reply(body).unwrap(), "");
}

#[test]
fn parse_agent_reply_missing_output_data_uses_fallback() {
    assert_eq!(parse_agent_reply("{}").unwrap(), FALLBACK_REPLY);
}

#[test]
fn parse_agent_reply_null_content_uses_fallback() {
    let body = r#"{"output_data":{"content":null}}"#;
    assert_eq!(parse_agent_reply(body).unwrap(), FALLBACK_REPLY);
}

#[test]
fn parse_agent_reply_null_output_data_uses_fallback() {
    assert_eq!(parse_agent_reply(r#"{"output_data":null}"#).unwrap(), FALLBACK_REPLY);
}

#[test]
fn parse_agent_reply_ignores_extra_fields() {
    let body = r#"{"output_data":{"content":"ok","tokens":12},"trace_id":"t"}"#;
    assert_eq!(parse_agent_reply(body).unwrap(), "ok");
}

#[test]
fn parse_agent_reply_rejects_non_json() {
    assert!(matches!(parse_agent_reply("<html>bad gateway</html>"), Err(TransportError::Parse(_))));
}

#[test]
fn fallback_text_is_exact() {
    assert_eq!(FALLBACK_REPLY, "No valid response received from agent.");
}
