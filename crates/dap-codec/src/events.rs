//! Event kinds and body payloads
//!
//! `EventKind` is the wire discriminant table for the 17 event kinds;
//! `EventBody` is the matching sum type. Events flow adapter to client only
//! and carry no correlation to requests.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Error, Result};
use crate::message::{decode_object, decode_optional_object, encode_object, encode_object_if_nonempty};
use crate::types::{Breakpoint, Capabilities, Module, ModuleReason, OutputGroup, Source, StartMethod};

// ============================================================================
// Event discriminant table
// ============================================================================

/// Every event kind the protocol defines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Initialized,
    Stopped,
    Continued,
    Exited,
    Terminated,
    Thread,
    Output,
    Breakpoint,
    Module,
    LoadedSource,
    Process,
    Capabilities,
    ProgressStart,
    ProgressUpdate,
    ProgressEnd,
    Invalidated,
    Memory,
}

impl EventKind {
    /// All event kinds, in catalogue order.
    pub const ALL: [EventKind; 17] = [
        EventKind::Initialized,
        EventKind::Stopped,
        EventKind::Continued,
        EventKind::Exited,
        EventKind::Terminated,
        EventKind::Thread,
        EventKind::Output,
        EventKind::Breakpoint,
        EventKind::Module,
        EventKind::LoadedSource,
        EventKind::Process,
        EventKind::Capabilities,
        EventKind::ProgressStart,
        EventKind::ProgressUpdate,
        EventKind::ProgressEnd,
        EventKind::Invalidated,
        EventKind::Memory,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            EventKind::Initialized => "initialized",
            EventKind::Stopped => "stopped",
            EventKind::Continued => "continued",
            EventKind::Exited => "exited",
            EventKind::Terminated => "terminated",
            EventKind::Thread => "thread",
            EventKind::Output => "output",
            EventKind::Breakpoint => "breakpoint",
            EventKind::Module => "module",
            EventKind::LoadedSource => "loadedSource",
            EventKind::Process => "process",
            EventKind::Capabilities => "capabilities",
            EventKind::ProgressStart => "progressStart",
            EventKind::ProgressUpdate => "progressUpdate",
            EventKind::ProgressEnd => "progressEnd",
            EventKind::Invalidated => "invalidated",
            EventKind::Memory => "memory",
        }
    }

    pub fn from_wire(s: &str) -> Result<EventKind> {
        match s {
            "initialized" => Ok(EventKind::Initialized),
            "stopped" => Ok(EventKind::Stopped),
            "continued" => Ok(EventKind::Continued),
            "exited" => Ok(EventKind::Exited),
            "terminated" => Ok(EventKind::Terminated),
            "thread" => Ok(EventKind::Thread),
            "output" => Ok(EventKind::Output),
            "breakpoint" => Ok(EventKind::Breakpoint),
            "module" => Ok(EventKind::Module),
            "loadedSource" => Ok(EventKind::LoadedSource),
            "process" => Ok(EventKind::Process),
            "capabilities" => Ok(EventKind::Capabilities),
            "progressStart" => Ok(EventKind::ProgressStart),
            "progressUpdate" => Ok(EventKind::ProgressUpdate),
            "progressEnd" => Ok(EventKind::ProgressEnd),
            "invalidated" => Ok(EventKind::Invalidated),
            "memory" => Ok(EventKind::Memory),
            other => Err(Error::UnknownEnumerant {
                table: "event",
                value: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Body payloads
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StoppedEventBody {
    /// Free-form reason (`breakpoint`, `step`, `exception`, `pause`, ...)
    pub reason: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thread_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preserve_focus_hint: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub all_threads_stopped: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hit_breakpoint_ids: Option<Vec<i64>>,
}

impl StoppedEventBody {
    pub fn reason(reason: impl Into<String>) -> Self {
        StoppedEventBody {
            reason: reason.into(),
            description: None,
            thread_id: None,
            preserve_focus_hint: None,
            text: None,
            all_threads_stopped: None,
            hit_breakpoint_ids: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ContinuedEventBody {
    pub thread_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub all_threads_continued: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ExitedEventBody {
    pub exit_code: i64,
}

/// Body of a terminated event; the whole object is omitted when empty
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TerminatedEventBody {
    /// Opaque value handed back in the next launch/attach `__restart`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub restart: Option<Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ThreadEventBody {
    /// Free-form reason (`started`, `exited`)
    pub reason: String,
    pub thread_id: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OutputEventBody {
    /// Free-form category (`console`, `stdout`, `stderr`, `telemetry`, ...)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub output: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group: Option<OutputGroup>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variables_reference: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<Source>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl OutputEventBody {
    pub fn stdout(output: impl Into<String>) -> Self {
        OutputEventBody {
            category: Some("stdout".to_string()),
            output: output.into(),
            group: None,
            variables_reference: None,
            source: None,
            line: None,
            column: None,
            data: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BreakpointEventBody {
    /// Free-form reason (`changed`, `new`, `removed`)
    pub reason: String,
    pub breakpoint: Breakpoint,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ModuleEventBody {
    pub reason: ModuleReason,
    pub module: Module,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LoadedSourceEventBody {
    pub reason: ModuleReason,
    pub source: Source,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProcessEventBody {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_process_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_local_process: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_method: Option<StartMethod>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pointer_size: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CapabilitiesEventBody {
    pub capabilities: Capabilities,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProgressStartEventBody {
    pub progress_id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cancellable: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub percentage: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProgressUpdateEventBody {
    pub progress_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub percentage: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProgressEndEventBody {
    pub progress_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct InvalidatedEventBody {
    /// Which UI areas to refresh (`all`, `stack`, `threads`, `variables`);
    /// open vocabulary, so plain strings
    #[serde(skip_serializing_if = "Option::is_none")]
    pub areas: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thread_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stack_frame_id: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MemoryEventBody {
    pub memory_reference: String,
    pub offset: i64,
    pub count: i64,
}

// ============================================================================
// Event payload sum type
// ============================================================================

/// The typed body of an event; the variant is the event kind
#[derive(Debug, Clone, PartialEq)]
pub enum EventBody {
    Initialized,
    Stopped(StoppedEventBody),
    Continued(ContinuedEventBody),
    Exited(ExitedEventBody),
    Terminated(TerminatedEventBody),
    Thread(ThreadEventBody),
    Output(OutputEventBody),
    Breakpoint(BreakpointEventBody),
    Module(ModuleEventBody),
    LoadedSource(LoadedSourceEventBody),
    Process(ProcessEventBody),
    Capabilities(CapabilitiesEventBody),
    ProgressStart(ProgressStartEventBody),
    ProgressUpdate(ProgressUpdateEventBody),
    ProgressEnd(ProgressEndEventBody),
    Invalidated(InvalidatedEventBody),
    Memory(MemoryEventBody),
}

impl EventBody {
    /// The event kind this payload belongs to. Derived from the variant.
    pub fn kind(&self) -> EventKind {
        match self {
            EventBody::Initialized => EventKind::Initialized,
            EventBody::Stopped(_) => EventKind::Stopped,
            EventBody::Continued(_) => EventKind::Continued,
            EventBody::Exited(_) => EventKind::Exited,
            EventBody::Terminated(_) => EventKind::Terminated,
            EventBody::Thread(_) => EventKind::Thread,
            EventBody::Output(_) => EventKind::Output,
            EventBody::Breakpoint(_) => EventKind::Breakpoint,
            EventBody::Module(_) => EventKind::Module,
            EventBody::LoadedSource(_) => EventKind::LoadedSource,
            EventBody::Process(_) => EventKind::Process,
            EventBody::Capabilities(_) => EventKind::Capabilities,
            EventBody::ProgressStart(_) => EventKind::ProgressStart,
            EventBody::ProgressUpdate(_) => EventKind::ProgressUpdate,
            EventBody::ProgressEnd(_) => EventKind::ProgressEnd,
            EventBody::Invalidated(_) => EventKind::Invalidated,
            EventBody::Memory(_) => EventKind::Memory,
        }
    }

    /// Encodes the `body` value for the wire, or `None` for bodyless kinds.
    pub(crate) fn to_wire_value(&self) -> Result<Option<Value>> {
        match self {
            EventBody::Initialized => Ok(None),
            // Conditional presence, matching established adapter behavior
            EventBody::Terminated(body) => encode_object_if_nonempty(body),
            EventBody::Stopped(body) => encode_object(body),
            EventBody::Continued(body) => encode_object(body),
            EventBody::Exited(body) => encode_object(body),
            EventBody::Thread(body) => encode_object(body),
            EventBody::Output(body) => encode_object(body),
            EventBody::Breakpoint(body) => encode_object(body),
            EventBody::Module(body) => encode_object(body),
            EventBody::LoadedSource(body) => encode_object(body),
            EventBody::Process(body) => encode_object(body),
            EventBody::Capabilities(body) => encode_object(body),
            EventBody::ProgressStart(body) => encode_object(body),
            EventBody::ProgressUpdate(body) => encode_object(body),
            EventBody::ProgressEnd(body) => encode_object(body),
            EventBody::Invalidated(body) => encode_object(body),
            EventBody::Memory(body) => encode_object(body),
        }
    }

    /// Decodes the `body` value for a resolved event kind.
    pub(crate) fn from_wire(kind: EventKind, body: Value) -> Result<Self> {
        let body = match kind {
            EventKind::Initialized => EventBody::Initialized,
            EventKind::Stopped => EventBody::Stopped(decode_object("StoppedEventBody", body)?),
            EventKind::Continued => {
                EventBody::Continued(decode_object("ContinuedEventBody", body)?)
            }
            EventKind::Exited => EventBody::Exited(decode_object("ExitedEventBody", body)?),
            EventKind::Terminated => {
                EventBody::Terminated(decode_optional_object("TerminatedEventBody", body)?)
            }
            EventKind::Thread => EventBody::Thread(decode_object("ThreadEventBody", body)?),
            EventKind::Output => EventBody::Output(decode_object("OutputEventBody", body)?),
            EventKind::Breakpoint => {
                EventBody::Breakpoint(decode_object("BreakpointEventBody", body)?)
            }
            EventKind::Module => EventBody::Module(decode_object("ModuleEventBody", body)?),
            EventKind::LoadedSource => {
                EventBody::LoadedSource(decode_object("LoadedSourceEventBody", body)?)
            }
            EventKind::Process => EventBody::Process(decode_object("ProcessEventBody", body)?),
            EventKind::Capabilities => {
                EventBody::Capabilities(decode_object("CapabilitiesEventBody", body)?)
            }
            EventKind::ProgressStart => {
                EventBody::ProgressStart(decode_object("ProgressStartEventBody", body)?)
            }
            EventKind::ProgressUpdate => {
                EventBody::ProgressUpdate(decode_object("ProgressUpdateEventBody", body)?)
            }
            EventKind::ProgressEnd => {
                EventBody::ProgressEnd(decode_object("ProgressEndEventBody", body)?)
            }
            EventKind::Invalidated => {
                EventBody::Invalidated(decode_object("InvalidatedEventBody", body)?)
            }
            EventKind::Memory => EventBody::Memory(decode_object("MemoryEventBody", body)?),
        };
        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_table_round_trips() {
        for kind in EventKind::ALL {
            assert_eq!(EventKind::from_wire(kind.as_str()).unwrap(), kind);
        }
    }

    #[test]
    fn test_event_unknown_rejected() {
        let err = EventKind::from_wire("progresSend").unwrap_err();
        assert_eq!(
            err,
            Error::UnknownEnumerant {
                table: "event",
                value: "progresSend".to_string(),
            }
        );
    }

    #[test]
    fn test_body_variant_reports_own_kind() {
        let body = EventBody::Stopped(StoppedEventBody::reason("breakpoint"));
        assert_eq!(body.kind(), EventKind::Stopped);
        assert_eq!(EventBody::Initialized.kind(), EventKind::Initialized);
    }

    #[test]
    fn test_stopped_body_minimal_encoding() {
        let body = EventBody::Stopped(StoppedEventBody {
            thread_id: Some(3),
            ..StoppedEventBody::reason("breakpoint")
        });
        let value = body.to_wire_value().unwrap().unwrap();
        assert_eq!(
            value,
            serde_json::json!({ "reason": "breakpoint", "threadId": 3 })
        );
    }

    #[test]
    fn test_terminated_body_conditional() {
        let body = EventBody::Terminated(TerminatedEventBody::default());
        assert_eq!(body.to_wire_value().unwrap(), None);

        let body = EventBody::Terminated(TerminatedEventBody {
            restart: Some(serde_json::json!({ "port": 9229 })),
        });
        let value = body.to_wire_value().unwrap().unwrap();
        assert_eq!(value, serde_json::json!({ "restart": { "port": 9229 } }));
    }

    #[test]
    fn test_module_event_reason_strict() {
        let raw = serde_json::json!({
            "reason": "reloaded",
            "module": { "id": 1, "name": "libm" }
        });
        let err = EventBody::from_wire(EventKind::Module, raw).unwrap_err();
        assert_eq!(
            err,
            Error::UnknownEnumerant {
                table: "ModuleEventBody",
                value: "reloaded".to_string(),
            }
        );
    }
}
