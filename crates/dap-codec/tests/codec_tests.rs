//! DAP codec tests
//!
//! End-to-end checks of the wire codec against the protocol contract:
//! - Round-trip law: decode(encode(m)) == m with optionals absent and present
//! - Omission law: absent optionals never appear on the wire
//! - Strict enum law: near-miss wire strings are rejected
//! - Envelope consistency and error-shape routing
//!
//! Run with: cargo test --package dap-codec --test codec_tests

use dap_codec::{
    Breakpoint, BreakpointsResponseBody, CancelArguments, Capabilities, Command,
    ContinueArguments, DataBreakpointInfoResponseBody, DisconnectArguments, Error, Event,
    EventBody, EventKind, ExceptionBreakMode, ExceptionInfoArguments, InitializeRequestArguments,
    Nullable, ProtocolMessage, Request, RequestArguments, Response, ResponseBody, ResponseResult,
    SetBreakpointsArguments, Source, SourceBreakpoint, StackFrame, StackTraceArguments,
    StackTraceResponseBody, StoppedEventBody,
};
use serde_json::json;

fn round_trip(message: ProtocolMessage) {
    let wire = message.to_wire().unwrap();
    let parsed = ProtocolMessage::from_wire(&wire).unwrap();
    assert_eq!(parsed, message, "round-trip changed the message: {wire}");
}

// ============================================================================
// Round-trip law
// ============================================================================

#[test]
fn test_round_trip_request_minimal_optionals() {
    round_trip(ProtocolMessage::Request(Request::new(
        1,
        RequestArguments::SetBreakpoints(SetBreakpointsArguments {
            source: Source::with_path("/src/main.rs"),
            breakpoints: None,
            lines: None,
            source_modified: None,
        }),
    )));
}

#[test]
fn test_round_trip_request_all_optionals() {
    round_trip(ProtocolMessage::Request(Request::new(
        2,
        RequestArguments::SetBreakpoints(SetBreakpointsArguments {
            source: Source {
                name: Some("main.rs".to_string()),
                path: Some("/src/main.rs".to_string()),
                ..Source::default()
            },
            breakpoints: Some(vec![SourceBreakpoint {
                line: 10,
                column: Some(4),
                condition: Some("x > 1".to_string()),
                hit_condition: Some("3".to_string()),
                log_message: Some("hit {x}".to_string()),
            }]),
            lines: Some(vec![10]),
            source_modified: Some(false),
        }),
    )));
}

#[test]
fn test_round_trip_initialize_request() {
    round_trip(ProtocolMessage::Request(Request::new(
        1,
        RequestArguments::Initialize(InitializeRequestArguments {
            client_id: Some("vscode".to_string()),
            client_name: Some("Visual Studio Code".to_string()),
            locale: Some("en-US".to_string()),
            lines_start_at1: Some(true),
            columns_start_at1: Some(true),
            supports_variable_type: Some(true),
            ..InitializeRequestArguments::new("lldb")
        }),
    )));
}

#[test]
fn test_round_trip_response_with_body() {
    round_trip(ProtocolMessage::Response(Response::success(
        5,
        3,
        ResponseBody::StackTrace(StackTraceResponseBody {
            stack_frames: vec![StackFrame {
                id: 1,
                name: "main".to_string(),
                source: Source::with_path("/src/main.rs"),
                line: 12,
                column: 1,
                end_line: None,
                end_column: None,
                can_restart: None,
                instruction_pointer_reference: None,
                module_id: Some(4.into()),
                presentation_hint: None,
            }],
            total_frames: Some(1),
        }),
    )));
}

#[test]
fn test_round_trip_bodyless_response() {
    round_trip(ProtocolMessage::Response(Response::success(
        8,
        7,
        ResponseBody::ConfigurationDone,
    )));
}

#[test]
fn test_round_trip_error_response() {
    round_trip(ProtocolMessage::Response(
        Response::error(9, 7, Command::Attach, "no such process").with_message("attach failed"),
    ));
}

#[test]
fn test_round_trip_bodyless_event() {
    round_trip(ProtocolMessage::Event(Event::new(
        1,
        EventBody::Initialized,
    )));
}

// ============================================================================
// Omission law & exact wire shapes
// ============================================================================

#[test]
fn test_stopped_event_exact_wire_shape() {
    let message = ProtocolMessage::Event(Event::new(
        6,
        EventBody::Stopped(StoppedEventBody {
            thread_id: Some(3),
            ..StoppedEventBody::reason("breakpoint")
        }),
    ));
    let value = message.to_value().unwrap();
    assert_eq!(
        value,
        json!({
            "seq": 6,
            "type": "event",
            "event": "stopped",
            "body": { "reason": "breakpoint", "threadId": 3 }
        })
    );
}

#[test]
fn test_absent_optionals_never_serialized() {
    let message = ProtocolMessage::Request(Request::new(
        3,
        RequestArguments::StackTrace(StackTraceArguments {
            thread_id: 1,
            start_frame: None,
            levels: None,
            format: None,
        }),
    ));
    let wire = message.to_wire().unwrap();
    assert!(wire.contains(r#""threadId":1"#));
    assert!(!wire.contains("startFrame"));
    assert!(!wire.contains("levels"));
    assert!(!wire.contains("format"));
    assert!(!wire.contains("null"));
}

#[test]
fn test_conditional_arguments_omitted() {
    let message = ProtocolMessage::Request(Request::new(
        2,
        RequestArguments::Disconnect(DisconnectArguments::default()),
    ));
    let value = message.to_value().unwrap();
    assert_eq!(
        value,
        json!({ "seq": 2, "type": "request", "command": "disconnect" })
    );

    // And absence decodes back to the all-absent arguments
    let parsed = ProtocolMessage::from_value(value).unwrap();
    assert_eq!(parsed, message);
}

#[test]
fn test_conditional_arguments_kept_when_any_field_set() {
    let message = ProtocolMessage::Request(Request::new(
        2,
        RequestArguments::Cancel(CancelArguments {
            request_id: Some(41),
            progress_id: None,
        }),
    ));
    let value = message.to_value().unwrap();
    assert_eq!(
        value,
        json!({
            "seq": 2,
            "type": "request",
            "command": "cancel",
            "arguments": { "requestId": 41 }
        })
    );
}

#[test]
fn test_data_breakpoint_info_null_emitted() {
    let message = ProtocolMessage::Response(Response::success(
        4,
        3,
        ResponseBody::DataBreakpointInfo(DataBreakpointInfoResponseBody {
            data_id: Nullable::Null,
            description: "no breakpoint possible".to_string(),
            access_types: None,
            can_persist: None,
        }),
    ));
    let value = message.to_value().unwrap();
    assert_eq!(
        value["body"],
        json!({ "dataId": null, "description": "no breakpoint possible" })
    );
    // The key must be present even though the value is null
    assert!(value["body"].as_object().unwrap().contains_key("dataId"));

    let parsed = ProtocolMessage::from_value(value).unwrap();
    assert_eq!(parsed, message);
}

// ============================================================================
// Envelope consistency
// ============================================================================

#[test]
fn test_discriminants_derived_from_payload() {
    let request = Request::new(
        1,
        RequestArguments::Continue(ContinueArguments {
            thread_id: 2,
            single_thread: None,
        }),
    );
    assert_eq!(request.command(), Command::Continue);

    let response = Response::success(
        2,
        1,
        ResponseBody::SetBreakpoints(BreakpointsResponseBody {
            breakpoints: vec![Breakpoint::verified(10)],
        }),
    );
    assert_eq!(response.command(), Command::SetBreakpoints);
    assert!(response.is_success());

    let event = Event::new(3, EventBody::Initialized);
    assert_eq!(event.kind(), EventKind::Initialized);
}

#[test]
fn test_error_response_routed_by_success_flag() {
    // Same command as a success response, but success=false must select
    // the error shape, not the per-command body
    let wire = r#"{"seq":1,"type":"response","request_seq":1,"success":false,"command":"stackTrace","body":{"error":"thread gone"}}"#;
    let message = ProtocolMessage::from_wire(wire).unwrap();
    match message {
        ProtocolMessage::Response(Response {
            result: ResponseResult::Error { command, error },
            ..
        }) => {
            assert_eq!(command, Command::StackTrace);
            assert_eq!(error.as_deref(), Some("thread gone"));
        }
        other => panic!("Expected error response, got {other:?}"),
    }
}

#[test]
fn test_error_response_without_error_string() {
    let wire = r#"{"seq":1,"type":"response","request_seq":1,"success":false,"command":"next"}"#;
    let message = ProtocolMessage::from_wire(wire).unwrap();
    match message {
        ProtocolMessage::Response(Response {
            result: ResponseResult::Error { error, .. },
            ..
        }) => assert_eq!(error, None),
        other => panic!("Expected error response, got {other:?}"),
    }
}

// ============================================================================
// Strict decode & error taxonomy
// ============================================================================

#[test]
fn test_strict_enum_near_miss_rejected() {
    let wire = r#"{"seq":1,"type":"response","request_seq":1,"success":true,"command":"exceptionInfo","body":{"exceptionId":"E0","breakMode":"neverr"}}"#;
    let err = ProtocolMessage::from_wire(wire).unwrap_err();
    match err {
        Error::UnknownEnumerant { value, .. } => assert_eq!(value, "neverr"),
        other => panic!("Expected UnknownEnumerant, got {other:?}"),
    }
}

#[test]
fn test_missing_required_field_reported() {
    // setBreakpoints arguments without the required source
    let wire = r#"{"seq":1,"type":"request","command":"setBreakpoints","arguments":{"lines":[1]}}"#;
    let err = ProtocolMessage::from_wire(wire).unwrap_err();
    assert_eq!(err, Error::MissingField("source".to_string()));
}

#[test]
fn test_missing_arguments_object_reported() {
    let wire = r#"{"seq":1,"type":"request","command":"pause"}"#;
    let err = ProtocolMessage::from_wire(wire).unwrap_err();
    assert_eq!(err, Error::MissingField("arguments".to_string()));
}

#[test]
fn test_wrong_json_type_reported() {
    let wire = r#"{"seq":1,"type":"request","command":"pause","arguments":{"threadId":"three"}}"#;
    let err = ProtocolMessage::from_wire(wire).unwrap_err();
    match err {
        Error::TypeMismatch { context, .. } => assert_eq!(context, "PauseArguments"),
        other => panic!("Expected TypeMismatch, got {other:?}"),
    }
}

#[test]
fn test_round_trip_exception_info() {
    let message = ProtocolMessage::Request(Request::new(
        7,
        RequestArguments::ExceptionInfo(ExceptionInfoArguments { thread_id: 2 }),
    ));
    round_trip(message);

    let wire = r#"{"seq":8,"type":"response","request_seq":7,"success":true,"command":"exceptionInfo","body":{"exceptionId":"E0706","breakMode":"unhandled"}}"#;
    let message = ProtocolMessage::from_wire(wire).unwrap();
    match message {
        ProtocolMessage::Response(Response {
            result: ResponseResult::Success { body: ResponseBody::ExceptionInfo(info) },
            ..
        }) => {
            assert_eq!(info.exception_id, "E0706");
            assert_eq!(info.break_mode, ExceptionBreakMode::Unhandled);
        }
        other => panic!("Expected exceptionInfo response, got {other:?}"),
    }
}

// ============================================================================
// Launch flattening & capabilities
// ============================================================================

#[test]
fn test_launch_adapter_options_survive_round_trip() {
    let wire_value = json!({
        "seq": 2,
        "type": "request",
        "command": "launch",
        "arguments": {
            "program": "/bin/app",
            "args": ["--verbose"],
            "noDebug": true
        }
    });
    let message = ProtocolMessage::from_value(wire_value.clone()).unwrap();
    match &message {
        ProtocolMessage::Request(request) => match &request.arguments {
            RequestArguments::Launch(args) => {
                assert_eq!(args.no_debug, Some(true));
                assert_eq!(args.adapter_options["program"], json!("/bin/app"));
                assert!(!args.adapter_options.contains_key("noDebug"));
            }
            other => panic!("Expected launch arguments, got {other:?}"),
        },
        other => panic!("Expected request, got {other:?}"),
    }
    assert_eq!(message.to_value().unwrap(), wire_value);
}

#[test]
fn test_initialize_response_capabilities_round_trip() {
    let caps = Capabilities {
        supports_configuration_done_request: Some(true),
        supports_data_breakpoints: Some(true),
        support_terminate_debuggee: Some(false),
        ..Capabilities::default()
    };
    round_trip(ProtocolMessage::Response(Response::success(
        2,
        1,
        ResponseBody::Initialize(Some(caps)),
    )));

    // No capabilities at all: the body key disappears entirely
    let message =
        ProtocolMessage::Response(Response::success(2, 1, ResponseBody::Initialize(None)));
    let value = message.to_value().unwrap();
    assert!(!value.as_object().unwrap().contains_key("body"));
    round_trip(message);
}
