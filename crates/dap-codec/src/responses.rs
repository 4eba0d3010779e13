//! Response bodies for every request command
//!
//! `ResponseBody` mirrors `Command` variant for variant, so a success
//! response always carries the body shape its command promises. The four
//! set-*-breakpoints commands answer with one shared body record. Failed
//! responses never reach this module; they take the single error shape on
//! the envelope instead.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::Result;
use crate::message::{decode_object, decode_optional_object, encode_object, encode_object_if_nonempty};
use crate::requests::Command;
use crate::types::{
    Breakpoint, BreakpointLocation, Capabilities, CompletionItem, DataBreakpointAccessType,
    DisassembledInstruction, ExceptionBreakMode, ExceptionDetails, GotoTarget, Module, Nullable,
    Scope, Source, StackFrame, StepInTarget, Thread, Variable, VariablePresentationHint,
};

// ============================================================================
// Body payloads
// ============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RunInTerminalResponseBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub process_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shell_process_id: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BreakpointLocationsResponseBody {
    pub breakpoints: Vec<BreakpointLocation>,
}

/// Shared by setBreakpoints, setFunctionBreakpoints, setDataBreakpoints,
/// and setInstructionBreakpoints
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BreakpointsResponseBody {
    pub breakpoints: Vec<Breakpoint>,
}

/// Body of a setExceptionBreakpoints response; the whole object is omitted
/// when the adapter reports no per-filter breakpoint information
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SetExceptionBreakpointsResponseBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub breakpoints: Option<Vec<Breakpoint>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DataBreakpointInfoResponseBody {
    /// Always on the wire; explicit `null` means no data breakpoint is
    /// possible for the queried expression
    pub data_id: Nullable<String>,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_types: Option<Vec<DataBreakpointAccessType>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub can_persist: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ContinueResponseBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub all_threads_continued: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StackTraceResponseBody {
    pub stack_frames: Vec<StackFrame>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_frames: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ScopesResponseBody {
    pub scopes: Vec<Scope>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VariablesResponseBody {
    pub variables: Vec<Variable>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SetVariableResponseBody {
    pub value: String,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub variable_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variables_reference: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub named_variables: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub indexed_variables: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SourceResponseBody {
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ThreadsResponseBody {
    pub threads: Vec<Thread>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ModulesResponseBody {
    pub modules: Vec<Module>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_modules: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LoadedSourcesResponseBody {
    pub sources: Vec<Source>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EvaluateResponseBody {
    pub result: String,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub variable_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub presentation_hint: Option<VariablePresentationHint>,
    pub variables_reference: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub named_variables: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub indexed_variables: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub memory_reference: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SetExpressionResponseBody {
    pub value: String,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub variable_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub presentation_hint: Option<VariablePresentationHint>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variables_reference: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub named_variables: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub indexed_variables: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StepInTargetsResponseBody {
    pub targets: Vec<StepInTarget>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GotoTargetsResponseBody {
    pub targets: Vec<GotoTarget>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CompletionsResponseBody {
    pub targets: Vec<CompletionItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ExceptionInfoResponseBody {
    pub exception_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub break_mode: ExceptionBreakMode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<ExceptionDetails>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ReadMemoryResponseBody {
    pub address: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unreadable_bytes: Option<i64>,
    /// Base64-encoded memory contents
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WriteMemoryResponseBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bytes_written: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DisassembleResponseBody {
    pub instructions: Vec<DisassembledInstruction>,
}

// ============================================================================
// Response payload sum type
// ============================================================================

/// The typed body of a successful response; the variant is the command
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseBody {
    Cancel,
    RunInTerminal(RunInTerminalResponseBody),
    /// The whole body is optional for initialize
    Initialize(Option<Capabilities>),
    ConfigurationDone,
    Launch,
    Attach,
    Restart,
    Disconnect,
    Terminate,
    BreakpointLocations(BreakpointLocationsResponseBody),
    SetBreakpoints(BreakpointsResponseBody),
    SetFunctionBreakpoints(BreakpointsResponseBody),
    SetExceptionBreakpoints(SetExceptionBreakpointsResponseBody),
    DataBreakpointInfo(DataBreakpointInfoResponseBody),
    SetDataBreakpoints(BreakpointsResponseBody),
    SetInstructionBreakpoints(BreakpointsResponseBody),
    Continue(ContinueResponseBody),
    Next,
    StepIn,
    StepOut,
    StepBack,
    ReverseContinue,
    RestartFrame,
    Goto,
    Pause,
    StackTrace(StackTraceResponseBody),
    Scopes(ScopesResponseBody),
    Variables(VariablesResponseBody),
    SetVariable(SetVariableResponseBody),
    Source(SourceResponseBody),
    Threads(ThreadsResponseBody),
    TerminateThreads,
    Modules(ModulesResponseBody),
    LoadedSources(LoadedSourcesResponseBody),
    Evaluate(EvaluateResponseBody),
    SetExpression(SetExpressionResponseBody),
    StepInTargets(StepInTargetsResponseBody),
    GotoTargets(GotoTargetsResponseBody),
    Completions(CompletionsResponseBody),
    ExceptionInfo(ExceptionInfoResponseBody),
    ReadMemory(ReadMemoryResponseBody),
    WriteMemory(WriteMemoryResponseBody),
    Disassemble(DisassembleResponseBody),
}

impl ResponseBody {
    /// The command this body answers. Derived from the variant.
    pub fn command(&self) -> Command {
        match self {
            ResponseBody::Cancel => Command::Cancel,
            ResponseBody::RunInTerminal(_) => Command::RunInTerminal,
            ResponseBody::Initialize(_) => Command::Initialize,
            ResponseBody::ConfigurationDone => Command::ConfigurationDone,
            ResponseBody::Launch => Command::Launch,
            ResponseBody::Attach => Command::Attach,
            ResponseBody::Restart => Command::Restart,
            ResponseBody::Disconnect => Command::Disconnect,
            ResponseBody::Terminate => Command::Terminate,
            ResponseBody::BreakpointLocations(_) => Command::BreakpointLocations,
            ResponseBody::SetBreakpoints(_) => Command::SetBreakpoints,
            ResponseBody::SetFunctionBreakpoints(_) => Command::SetFunctionBreakpoints,
            ResponseBody::SetExceptionBreakpoints(_) => Command::SetExceptionBreakpoints,
            ResponseBody::DataBreakpointInfo(_) => Command::DataBreakpointInfo,
            ResponseBody::SetDataBreakpoints(_) => Command::SetDataBreakpoints,
            ResponseBody::SetInstructionBreakpoints(_) => Command::SetInstructionBreakpoints,
            ResponseBody::Continue(_) => Command::Continue,
            ResponseBody::Next => Command::Next,
            ResponseBody::StepIn => Command::StepIn,
            ResponseBody::StepOut => Command::StepOut,
            ResponseBody::StepBack => Command::StepBack,
            ResponseBody::ReverseContinue => Command::ReverseContinue,
            ResponseBody::RestartFrame => Command::RestartFrame,
            ResponseBody::Goto => Command::Goto,
            ResponseBody::Pause => Command::Pause,
            ResponseBody::StackTrace(_) => Command::StackTrace,
            ResponseBody::Scopes(_) => Command::Scopes,
            ResponseBody::Variables(_) => Command::Variables,
            ResponseBody::SetVariable(_) => Command::SetVariable,
            ResponseBody::Source(_) => Command::Source,
            ResponseBody::Threads(_) => Command::Threads,
            ResponseBody::TerminateThreads => Command::TerminateThreads,
            ResponseBody::Modules(_) => Command::Modules,
            ResponseBody::LoadedSources(_) => Command::LoadedSources,
            ResponseBody::Evaluate(_) => Command::Evaluate,
            ResponseBody::SetExpression(_) => Command::SetExpression,
            ResponseBody::StepInTargets(_) => Command::StepInTargets,
            ResponseBody::GotoTargets(_) => Command::GotoTargets,
            ResponseBody::Completions(_) => Command::Completions,
            ResponseBody::ExceptionInfo(_) => Command::ExceptionInfo,
            ResponseBody::ReadMemory(_) => Command::ReadMemory,
            ResponseBody::WriteMemory(_) => Command::WriteMemory,
            ResponseBody::Disassemble(_) => Command::Disassemble,
        }
    }

    /// Encodes the `body` value for the wire, or `None` when the command
    /// answers without a body.
    pub(crate) fn to_wire_value(&self) -> Result<Option<Value>> {
        match self {
            ResponseBody::Cancel
            | ResponseBody::ConfigurationDone
            | ResponseBody::Launch
            | ResponseBody::Attach
            | ResponseBody::Restart
            | ResponseBody::Disconnect
            | ResponseBody::Terminate
            | ResponseBody::Next
            | ResponseBody::StepIn
            | ResponseBody::StepOut
            | ResponseBody::StepBack
            | ResponseBody::ReverseContinue
            | ResponseBody::RestartFrame
            | ResponseBody::Goto
            | ResponseBody::Pause
            | ResponseBody::TerminateThreads => Ok(None),

            ResponseBody::Initialize(None) => Ok(None),
            ResponseBody::Initialize(Some(capabilities)) => encode_object(capabilities),
            ResponseBody::SetExceptionBreakpoints(body) => encode_object_if_nonempty(body),

            ResponseBody::RunInTerminal(body) => encode_object(body),
            ResponseBody::BreakpointLocations(body) => encode_object(body),
            ResponseBody::SetBreakpoints(body) => encode_object(body),
            ResponseBody::SetFunctionBreakpoints(body) => encode_object(body),
            ResponseBody::DataBreakpointInfo(body) => encode_object(body),
            ResponseBody::SetDataBreakpoints(body) => encode_object(body),
            ResponseBody::SetInstructionBreakpoints(body) => encode_object(body),
            ResponseBody::Continue(body) => encode_object(body),
            ResponseBody::StackTrace(body) => encode_object(body),
            ResponseBody::Scopes(body) => encode_object(body),
            ResponseBody::Variables(body) => encode_object(body),
            ResponseBody::SetVariable(body) => encode_object(body),
            ResponseBody::Source(body) => encode_object(body),
            ResponseBody::Threads(body) => encode_object(body),
            ResponseBody::Modules(body) => encode_object(body),
            ResponseBody::LoadedSources(body) => encode_object(body),
            ResponseBody::Evaluate(body) => encode_object(body),
            ResponseBody::SetExpression(body) => encode_object(body),
            ResponseBody::StepInTargets(body) => encode_object(body),
            ResponseBody::GotoTargets(body) => encode_object(body),
            ResponseBody::Completions(body) => encode_object(body),
            ResponseBody::ExceptionInfo(body) => encode_object(body),
            ResponseBody::ReadMemory(body) => encode_object(body),
            ResponseBody::WriteMemory(body) => encode_object(body),
            ResponseBody::Disassemble(body) => encode_object(body),
        }
    }

    /// Decodes the `body` value for a resolved command.
    pub(crate) fn from_wire(command: Command, body: Value) -> Result<Self> {
        let body = match command {
            Command::Cancel => ResponseBody::Cancel,
            Command::RunInTerminal => ResponseBody::RunInTerminal(decode_object(
                "RunInTerminalResponseBody",
                body,
            )?),
            Command::Initialize => {
                if body.is_null() {
                    ResponseBody::Initialize(None)
                } else {
                    ResponseBody::Initialize(Some(decode_object("Capabilities", body)?))
                }
            }
            Command::ConfigurationDone => ResponseBody::ConfigurationDone,
            Command::Launch => ResponseBody::Launch,
            Command::Attach => ResponseBody::Attach,
            Command::Restart => ResponseBody::Restart,
            Command::Disconnect => ResponseBody::Disconnect,
            Command::Terminate => ResponseBody::Terminate,
            Command::BreakpointLocations => ResponseBody::BreakpointLocations(decode_object(
                "BreakpointLocationsResponseBody",
                body,
            )?),
            Command::SetBreakpoints => {
                ResponseBody::SetBreakpoints(decode_object("BreakpointsResponseBody", body)?)
            }
            Command::SetFunctionBreakpoints => ResponseBody::SetFunctionBreakpoints(
                decode_object("BreakpointsResponseBody", body)?,
            ),
            Command::SetExceptionBreakpoints => ResponseBody::SetExceptionBreakpoints(
                decode_optional_object("SetExceptionBreakpointsResponseBody", body)?,
            ),
            Command::DataBreakpointInfo => ResponseBody::DataBreakpointInfo(decode_object(
                "DataBreakpointInfoResponseBody",
                body,
            )?),
            Command::SetDataBreakpoints => {
                ResponseBody::SetDataBreakpoints(decode_object("BreakpointsResponseBody", body)?)
            }
            Command::SetInstructionBreakpoints => ResponseBody::SetInstructionBreakpoints(
                decode_object("BreakpointsResponseBody", body)?,
            ),
            Command::Continue => {
                ResponseBody::Continue(decode_object("ContinueResponseBody", body)?)
            }
            Command::Next => ResponseBody::Next,
            Command::StepIn => ResponseBody::StepIn,
            Command::StepOut => ResponseBody::StepOut,
            Command::StepBack => ResponseBody::StepBack,
            Command::ReverseContinue => ResponseBody::ReverseContinue,
            Command::RestartFrame => ResponseBody::RestartFrame,
            Command::Goto => ResponseBody::Goto,
            Command::Pause => ResponseBody::Pause,
            Command::StackTrace => {
                ResponseBody::StackTrace(decode_object("StackTraceResponseBody", body)?)
            }
            Command::Scopes => ResponseBody::Scopes(decode_object("ScopesResponseBody", body)?),
            Command::Variables => {
                ResponseBody::Variables(decode_object("VariablesResponseBody", body)?)
            }
            Command::SetVariable => {
                ResponseBody::SetVariable(decode_object("SetVariableResponseBody", body)?)
            }
            Command::Source => ResponseBody::Source(decode_object("SourceResponseBody", body)?),
            Command::Threads => ResponseBody::Threads(decode_object("ThreadsResponseBody", body)?),
            Command::TerminateThreads => ResponseBody::TerminateThreads,
            Command::Modules => ResponseBody::Modules(decode_object("ModulesResponseBody", body)?),
            Command::LoadedSources => {
                ResponseBody::LoadedSources(decode_object("LoadedSourcesResponseBody", body)?)
            }
            Command::Evaluate => {
                ResponseBody::Evaluate(decode_object("EvaluateResponseBody", body)?)
            }
            Command::SetExpression => {
                ResponseBody::SetExpression(decode_object("SetExpressionResponseBody", body)?)
            }
            Command::StepInTargets => {
                ResponseBody::StepInTargets(decode_object("StepInTargetsResponseBody", body)?)
            }
            Command::GotoTargets => {
                ResponseBody::GotoTargets(decode_object("GotoTargetsResponseBody", body)?)
            }
            Command::Completions => {
                ResponseBody::Completions(decode_object("CompletionsResponseBody", body)?)
            }
            Command::ExceptionInfo => {
                ResponseBody::ExceptionInfo(decode_object("ExceptionInfoResponseBody", body)?)
            }
            Command::ReadMemory => {
                ResponseBody::ReadMemory(decode_object("ReadMemoryResponseBody", body)?)
            }
            Command::WriteMemory => {
                ResponseBody::WriteMemory(decode_object("WriteMemoryResponseBody", body)?)
            }
            Command::Disassemble => {
                ResponseBody::Disassemble(decode_object("DisassembleResponseBody", body)?)
            }
        };
        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_body_variant_reports_own_command() {
        let body = ResponseBody::Threads(ThreadsResponseBody {
            threads: vec![Thread {
                id: 1,
                name: "main".to_string(),
            }],
        });
        assert_eq!(body.command(), Command::Threads);
        assert_eq!(ResponseBody::Launch.command(), Command::Launch);
    }

    #[test]
    fn test_data_breakpoint_info_null_data_id_always_emitted() {
        let body = ResponseBody::DataBreakpointInfo(DataBreakpointInfoResponseBody {
            data_id: Nullable::Null,
            description: "no data breakpoint possible".to_string(),
            access_types: None,
            can_persist: None,
        });
        let value = body.to_wire_value().unwrap().unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "dataId": null,
                "description": "no data breakpoint possible"
            })
        );
    }

    #[test]
    fn test_data_breakpoint_info_decode_distinguishes_null_from_value() {
        let raw = serde_json::json!({ "dataId": null, "description": "none" });
        let body = ResponseBody::from_wire(Command::DataBreakpointInfo, raw).unwrap();
        match body {
            ResponseBody::DataBreakpointInfo(info) => assert!(info.data_id.is_null()),
            other => panic!("Expected DataBreakpointInfo, got {other:?}"),
        }

        let raw = serde_json::json!({ "dataId": "var0", "description": "watch" });
        let body = ResponseBody::from_wire(Command::DataBreakpointInfo, raw).unwrap();
        match body {
            ResponseBody::DataBreakpointInfo(info) => {
                assert_eq!(info.data_id, Nullable::Value("var0".to_string()));
            }
            other => panic!("Expected DataBreakpointInfo, got {other:?}"),
        }
    }

    #[test]
    fn test_set_exception_breakpoints_body_conditional() {
        let body =
            ResponseBody::SetExceptionBreakpoints(SetExceptionBreakpointsResponseBody::default());
        assert_eq!(body.to_wire_value().unwrap(), None);

        let decoded = ResponseBody::from_wire(Command::SetExceptionBreakpoints, Value::Null).unwrap();
        assert_eq!(decoded, body);
    }

    #[test]
    fn test_initialize_body_whole_object_optional() {
        assert_eq!(ResponseBody::Initialize(None).to_wire_value().unwrap(), None);

        let caps = Capabilities {
            supports_configuration_done_request: Some(true),
            ..Capabilities::default()
        };
        let value = ResponseBody::Initialize(Some(caps))
            .to_wire_value()
            .unwrap()
            .unwrap();
        assert_eq!(
            value,
            serde_json::json!({ "supportsConfigurationDoneRequest": true })
        );
    }

    #[test]
    fn test_no_body_commands_encode_nothing() {
        for body in [
            ResponseBody::Launch,
            ResponseBody::Pause,
            ResponseBody::TerminateThreads,
        ] {
            assert_eq!(body.to_wire_value().unwrap(), None);
        }
    }
}
