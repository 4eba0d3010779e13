//! Protocol message envelopes and the wire codec
//!
//! A message is one JSON object carrying `seq` and a `type` discriminant
//! (`request`, `response`, `event`). The discriminants are never stored:
//! they are derived from the payload sum types, so an envelope cannot
//! disagree with its body. Encoding matches exhaustively on the payload
//! variants; decoding reads the raw envelope first, resolves the
//! discriminants through the strict tables, and then invokes the matching
//! typed decoder.
//!
//! Framing (Content-Length headers) and seq allocation belong to the
//! transport, not here; every function is a pure value transformation.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::trace;

use crate::error::{Error, Result};
use crate::events::{EventBody, EventKind};
use crate::requests::{Command, RequestArguments};
use crate::responses::ResponseBody;

// ============================================================================
// Payload codec helpers
// ============================================================================

pub(crate) fn encode_object<T: Serialize>(payload: &T) -> Result<Option<Value>> {
    Ok(Some(serde_json::to_value(payload)?))
}

/// Encodes a payload whose whole object is dropped from the wire when every
/// field is absent (conditional presence).
pub(crate) fn encode_object_if_nonempty<T: Serialize>(payload: &T) -> Result<Option<Value>> {
    let value = serde_json::to_value(payload)?;
    match &value {
        Value::Object(map) if map.is_empty() => Ok(None),
        _ => Ok(Some(value)),
    }
}

/// Decodes a required payload object; a missing payload is reported as the
/// absent wire field, everything else through the classified taxonomy.
pub(crate) fn decode_object<T: DeserializeOwned>(context: &'static str, value: Value) -> Result<T> {
    if value.is_null() {
        return Err(missing_payload(context));
    }
    serde_json::from_value(value).map_err(|e| Error::classify(context, e))
}

/// Decodes a conditionally present payload object; absence means all fields
/// absent.
pub(crate) fn decode_optional_object<T: DeserializeOwned + Default>(
    context: &'static str,
    value: Value,
) -> Result<T> {
    if value.is_null() {
        return Ok(T::default());
    }
    serde_json::from_value(value).map_err(|e| Error::classify(context, e))
}

// Argument payloads sit under `arguments`, everything else under `body`;
// the payload type names carry that distinction.
fn missing_payload(context: &'static str) -> Error {
    if context.ends_with("Arguments") {
        Error::MissingField("arguments".to_string())
    } else {
        Error::MissingField("body".to_string())
    }
}

// ============================================================================
// Envelopes
// ============================================================================

/// A request message; `command` is derived from the arguments variant
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    pub seq: i64,
    pub arguments: RequestArguments,
}

impl Request {
    pub fn new(seq: i64, arguments: RequestArguments) -> Self {
        Request { seq, arguments }
    }

    pub fn command(&self) -> Command {
        self.arguments.command()
    }
}

/// Success or failure of a response; failure takes one shape for every
/// command
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseResult {
    Success { body: ResponseBody },
    Error { command: Command, error: Option<String> },
}

/// A response message; `success` and `command` are derived from the result
#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    pub seq: i64,
    /// Must equal the `seq` of the request being answered; correlation is
    /// the transport's job
    pub request_seq: i64,
    /// Short human-readable summary, mostly used on failures
    pub message: Option<String>,
    pub result: ResponseResult,
}

impl Response {
    pub fn success(seq: i64, request_seq: i64, body: ResponseBody) -> Self {
        Response {
            seq,
            request_seq,
            message: None,
            result: ResponseResult::Success { body },
        }
    }

    pub fn error(seq: i64, request_seq: i64, command: Command, error: impl Into<String>) -> Self {
        Response {
            seq,
            request_seq,
            message: None,
            result: ResponseResult::Error {
                command,
                error: Some(error.into()),
            },
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn is_success(&self) -> bool {
        matches!(self.result, ResponseResult::Success { .. })
    }

    pub fn command(&self) -> Command {
        match &self.result {
            ResponseResult::Success { body } => body.command(),
            ResponseResult::Error { command, .. } => *command,
        }
    }
}

/// An event message; `event` is derived from the body variant
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    pub seq: i64,
    pub body: EventBody,
}

impl Event {
    pub fn new(seq: i64, body: EventBody) -> Self {
        Event { seq, body }
    }

    pub fn kind(&self) -> EventKind {
        self.body.kind()
    }
}

/// Any protocol message; the `type` discriminant is the variant
#[derive(Debug, Clone, PartialEq)]
pub enum ProtocolMessage {
    Request(Request),
    Response(Response),
    Event(Event),
}

impl From<Request> for ProtocolMessage {
    fn from(request: Request) -> Self {
        ProtocolMessage::Request(request)
    }
}

impl From<Response> for ProtocolMessage {
    fn from(response: Response) -> Self {
        ProtocolMessage::Response(response)
    }
}

impl From<Event> for ProtocolMessage {
    fn from(event: Event) -> Self {
        ProtocolMessage::Event(event)
    }
}

// ============================================================================
// Encode
// ============================================================================

impl ProtocolMessage {
    pub fn seq(&self) -> i64 {
        match self {
            ProtocolMessage::Request(r) => r.seq,
            ProtocolMessage::Response(r) => r.seq,
            ProtocolMessage::Event(e) => e.seq,
        }
    }

    /// Encodes the concrete message as a JSON value.
    pub fn to_value(&self) -> Result<Value> {
        let mut envelope = Map::new();
        envelope.insert("seq".to_string(), Value::from(self.seq()));
        match self {
            ProtocolMessage::Request(request) => {
                envelope.insert("type".to_string(), Value::from("request"));
                envelope.insert(
                    "command".to_string(),
                    Value::from(request.command().as_str()),
                );
                if let Some(arguments) = request.arguments.to_wire_value()? {
                    envelope.insert("arguments".to_string(), arguments);
                }
            }
            ProtocolMessage::Response(response) => {
                envelope.insert("type".to_string(), Value::from("response"));
                envelope.insert("request_seq".to_string(), Value::from(response.request_seq));
                envelope.insert(
                    "command".to_string(),
                    Value::from(response.command().as_str()),
                );
                if let Some(message) = &response.message {
                    envelope.insert("message".to_string(), Value::from(message.clone()));
                }
                match &response.result {
                    ResponseResult::Success { body } => {
                        envelope.insert("success".to_string(), Value::from(true));
                        if let Some(body) = body.to_wire_value()? {
                            envelope.insert("body".to_string(), body);
                        }
                    }
                    ResponseResult::Error { error, .. } => {
                        envelope.insert("success".to_string(), Value::from(false));
                        if let Some(error) = error {
                            let mut body = Map::new();
                            body.insert("error".to_string(), Value::from(error.clone()));
                            envelope.insert("body".to_string(), Value::Object(body));
                        }
                    }
                }
            }
            ProtocolMessage::Event(event) => {
                envelope.insert("type".to_string(), Value::from("event"));
                envelope.insert("event".to_string(), Value::from(event.kind().as_str()));
                if let Some(body) = event.body.to_wire_value()? {
                    envelope.insert("body".to_string(), body);
                }
            }
        }
        Ok(Value::Object(envelope))
    }

    /// Encodes the concrete message as a wire string.
    pub fn to_wire(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.to_value()?)?)
    }

    /// Decodes a message from its wire string.
    pub fn from_wire(wire: &str) -> Result<Self> {
        let value: Value =
            serde_json::from_str(wire).map_err(|e| Error::InvalidMessage(e.to_string()))?;
        Self::from_value(value)
    }

    /// Decodes a message from a JSON value.
    pub fn from_value(value: Value) -> Result<Self> {
        let raw: RawMessage =
            serde_json::from_value(value).map_err(|e| Error::classify("ProtocolMessage", e))?;
        match raw.kind.as_str() {
            "request" => {
                let command = raw
                    .command
                    .as_deref()
                    .ok_or_else(|| Error::MissingField("command".to_string()))?;
                let command = Command::from_wire(command)?;
                trace!(seq = raw.seq, %command, "decoding request");
                let arguments = RequestArguments::from_wire(command, raw.arguments)?;
                Ok(ProtocolMessage::Request(Request {
                    seq: raw.seq,
                    arguments,
                }))
            }
            "response" => {
                let command = raw
                    .command
                    .as_deref()
                    .ok_or_else(|| Error::MissingField("command".to_string()))?;
                let command = Command::from_wire(command)?;
                let request_seq = raw
                    .request_seq
                    .ok_or_else(|| Error::MissingField("request_seq".to_string()))?;
                let success = raw
                    .success
                    .ok_or_else(|| Error::MissingField("success".to_string()))?;
                trace!(seq = raw.seq, request_seq, %command, success, "decoding response");
                let result = if success {
                    ResponseResult::Success {
                        body: ResponseBody::from_wire(command, raw.body)?,
                    }
                } else {
                    ResponseResult::Error {
                        command,
                        error: decode_error_body(raw.body)?,
                    }
                };
                Ok(ProtocolMessage::Response(Response {
                    seq: raw.seq,
                    request_seq,
                    message: raw.message,
                    result,
                }))
            }
            "event" => {
                let event = raw
                    .event
                    .as_deref()
                    .ok_or_else(|| Error::MissingField("event".to_string()))?;
                let kind = EventKind::from_wire(event)?;
                trace!(seq = raw.seq, %kind, "decoding event");
                let body = EventBody::from_wire(kind, raw.body)?;
                Ok(ProtocolMessage::Event(Event {
                    seq: raw.seq,
                    body,
                }))
            }
            other => Err(Error::UnknownEnumerant {
                table: "type",
                value: other.to_string(),
            }),
        }
    }
}

/// The envelope as it appears on the wire, before any discriminant is
/// resolved
#[derive(Debug, Deserialize)]
struct RawMessage {
    seq: i64,
    #[serde(rename = "type")]
    kind: String,
    command: Option<String>,
    event: Option<String>,
    request_seq: Option<i64>,
    success: Option<bool>,
    message: Option<String>,
    #[serde(default)]
    arguments: Value,
    #[serde(default)]
    body: Value,
}

/// Pulls the optional `error` string out of a failed response's body.
fn decode_error_body(body: Value) -> Result<Option<String>> {
    match body {
        Value::Null => Ok(None),
        Value::Object(mut map) => match map.remove("error") {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(error)) => Ok(Some(error)),
            Some(other) => Err(Error::TypeMismatch {
                context: "ErrorResponse",
                detail: format!("error must be a string, got {other}"),
            }),
        },
        other => Err(Error::TypeMismatch {
            context: "ErrorResponse",
            detail: format!("body must be an object, got {other}"),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::requests::ContinueArguments;
    use crate::responses::ContinueResponseBody;
    use crate::events::ExitedEventBody;

    #[test]
    fn test_request_wire_shape() {
        let message = ProtocolMessage::Request(Request::new(
            4,
            RequestArguments::Continue(ContinueArguments {
                thread_id: 7,
                single_thread: None,
            }),
        ));
        let json = message.to_wire().unwrap();
        assert!(json.contains(r#""type":"request""#));
        assert!(json.contains(r#""command":"continue""#));
        assert!(json.contains(r#""threadId":7"#));
        assert!(!json.contains("singleThread"));
    }

    #[test]
    fn test_request_without_arguments_omits_key() {
        let message = ProtocolMessage::Request(Request::new(1, RequestArguments::Threads));
        let value = message.to_value().unwrap();
        assert_eq!(
            value,
            serde_json::json!({ "seq": 1, "type": "request", "command": "threads" })
        );
    }

    #[test]
    fn test_response_success_wire_shape() {
        let message = ProtocolMessage::Response(Response::success(
            9,
            4,
            ResponseBody::Continue(ContinueResponseBody {
                all_threads_continued: Some(true),
            }),
        ));
        let value = message.to_value().unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "seq": 9,
                "type": "response",
                "request_seq": 4,
                "success": true,
                "command": "continue",
                "body": { "allThreadsContinued": true }
            })
        );
    }

    #[test]
    fn test_response_error_wire_shape() {
        let message = ProtocolMessage::Response(
            Response::error(2, 1, Command::Launch, "cannot start").with_message("failed"),
        );
        let value = message.to_value().unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "seq": 2,
                "type": "response",
                "request_seq": 1,
                "success": false,
                "command": "launch",
                "message": "failed",
                "body": { "error": "cannot start" }
            })
        );
    }

    #[test]
    fn test_error_response_decodes_to_error_shape() {
        let wire = r#"{"seq":1,"type":"response","request_seq":1,"success":false,"command":"launch","body":{"error":"cannot start"}}"#;
        let message = ProtocolMessage::from_wire(wire).unwrap();
        match message {
            ProtocolMessage::Response(response) => {
                assert!(!response.is_success());
                assert_eq!(response.command(), Command::Launch);
                match response.result {
                    ResponseResult::Error { error, .. } => {
                        assert_eq!(error.as_deref(), Some("cannot start"));
                    }
                    ResponseResult::Success { .. } => panic!("Expected error result"),
                }
            }
            other => panic!("Expected response, got {other:?}"),
        }
    }

    #[test]
    fn test_event_round_trip() {
        let message = ProtocolMessage::Event(Event::new(
            11,
            EventBody::Exited(ExitedEventBody { exit_code: 0 }),
        ));
        let wire = message.to_wire().unwrap();
        let parsed = ProtocolMessage::from_wire(&wire).unwrap();
        assert_eq!(parsed, message);
    }

    #[test]
    fn test_unknown_type_discriminant_rejected() {
        let err =
            ProtocolMessage::from_wire(r#"{"seq":1,"type":"notification"}"#).unwrap_err();
        assert_eq!(
            err,
            Error::UnknownEnumerant {
                table: "type",
                value: "notification".to_string(),
            }
        );
    }

    #[test]
    fn test_unknown_command_rejected() {
        let err = ProtocolMessage::from_wire(r#"{"seq":1,"type":"request","command":"halt"}"#)
            .unwrap_err();
        assert_eq!(
            err,
            Error::UnknownEnumerant {
                table: "command",
                value: "halt".to_string(),
            }
        );
    }

    #[test]
    fn test_missing_seq_rejected() {
        let err = ProtocolMessage::from_wire(r#"{"type":"request","command":"threads"}"#)
            .unwrap_err();
        assert_eq!(err, Error::MissingField("seq".to_string()));
    }

    #[test]
    fn test_non_json_input_rejected() {
        match ProtocolMessage::from_wire("Content-Length: 42") {
            Err(Error::InvalidMessage(_)) => {}
            other => panic!("Expected InvalidMessage, got {other:?}"),
        }
    }
}
