use super::*;

#[test]
fn envelope_decode_defaults_missing_data_to_null() {
    let envelope = Envelope::decode(r#"{"event":"finalize"}"#).expect("decode");
    assert_eq!(envelope.event, "finalize");
    assert_eq!(envelope.data, Value::Null);
}

#[test]
fn envelope_decode_rejects_malformed_json() {
    let err = Envelope::decode("{not json").expect_err("should fail");
    assert!(matches!(err, EventError::Decode(_)));
}

#[test]
fn envelope_decode_rejects_missing_event_name() {
    let err = Envelope::decode(r#"{"data":1}"#).expect_err("should fail");
    assert!(matches!(err, EventError::Decode(_)));
}

#[test]
fn envelope_encode_writes_event_and_data() {
    let envelope = Envelope::new("send_text", serde_json::json!("hi"));
    let text = envelope.encode().expect("encode");
    let value: Value = serde_json::from_str(&text).expect("json");
    assert_eq!(value, serde_json::json!({"event": "send_text", "data": "hi"}));
}

#[test]
fn envelope_payload_reports_event_name_on_mismatch() {
    let envelope = Envelope::new("text_received", serde_json::json!(42));
    let err = envelope.payload::<TokenEvent>().expect_err("should fail");
    match err {
        EventError::Payload { event, .. } => assert_eq!(event, "text_received"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn wire_event_decode_goes_through_envelope() {
    let event = ServerEvent::decode(r#"{"event":"text_received","data":{"id":"e-1","text":"Hel"}}"#)
        .expect("decode");
    assert_eq!(event, ServerEvent::TextReceived(TokenEvent::new("e-1", "Hel")));
}
