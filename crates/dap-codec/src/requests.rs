//! Request commands and argument payloads
//!
//! `Command` is the wire discriminant table for the 43 request kinds;
//! `RequestArguments` is the matching sum type whose variant determines the
//! command, so a request can never carry a discriminant that disagrees with
//! its payload. Argument shapes shared by several commands (the stepping
//! family, continue/reverseContinue) are one record embedded by the variants
//! that need it.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{Error, Result};
use crate::message::{decode_object, decode_optional_object, encode_object, encode_object_if_nonempty};
use crate::types::{
    DataBreakpoint, ExceptionFilterOptions, ExceptionOptions, FunctionBreakpoint,
    InstructionBreakpoint, RunInTerminalKind, Source, SourceBreakpoint, StackFrameFormat,
    SteppingGranularity, ValueFormat, VariablesFilter,
};

// ============================================================================
// Command discriminant table
// ============================================================================

/// Every request command the protocol defines
///
/// The wire strings are an external contract; the table below is the single
/// authority for both directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    Cancel,
    RunInTerminal,
    Initialize,
    ConfigurationDone,
    Launch,
    Attach,
    Restart,
    Disconnect,
    Terminate,
    BreakpointLocations,
    SetBreakpoints,
    SetFunctionBreakpoints,
    SetExceptionBreakpoints,
    DataBreakpointInfo,
    SetDataBreakpoints,
    SetInstructionBreakpoints,
    Continue,
    Next,
    StepIn,
    StepOut,
    StepBack,
    ReverseContinue,
    RestartFrame,
    Goto,
    Pause,
    StackTrace,
    Scopes,
    Variables,
    SetVariable,
    Source,
    Threads,
    TerminateThreads,
    Modules,
    LoadedSources,
    Evaluate,
    SetExpression,
    StepInTargets,
    GotoTargets,
    Completions,
    ExceptionInfo,
    ReadMemory,
    WriteMemory,
    Disassemble,
}

impl Command {
    /// All commands, in catalogue order. Handy for table checks.
    pub const ALL: [Command; 43] = [
        Command::Cancel,
        Command::RunInTerminal,
        Command::Initialize,
        Command::ConfigurationDone,
        Command::Launch,
        Command::Attach,
        Command::Restart,
        Command::Disconnect,
        Command::Terminate,
        Command::BreakpointLocations,
        Command::SetBreakpoints,
        Command::SetFunctionBreakpoints,
        Command::SetExceptionBreakpoints,
        Command::DataBreakpointInfo,
        Command::SetDataBreakpoints,
        Command::SetInstructionBreakpoints,
        Command::Continue,
        Command::Next,
        Command::StepIn,
        Command::StepOut,
        Command::StepBack,
        Command::ReverseContinue,
        Command::RestartFrame,
        Command::Goto,
        Command::Pause,
        Command::StackTrace,
        Command::Scopes,
        Command::Variables,
        Command::SetVariable,
        Command::Source,
        Command::Threads,
        Command::TerminateThreads,
        Command::Modules,
        Command::LoadedSources,
        Command::Evaluate,
        Command::SetExpression,
        Command::StepInTargets,
        Command::GotoTargets,
        Command::Completions,
        Command::ExceptionInfo,
        Command::ReadMemory,
        Command::WriteMemory,
        Command::Disassemble,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Command::Cancel => "cancel",
            Command::RunInTerminal => "runInTerminal",
            Command::Initialize => "initialize",
            Command::ConfigurationDone => "configurationDone",
            Command::Launch => "launch",
            Command::Attach => "attach",
            Command::Restart => "restart",
            Command::Disconnect => "disconnect",
            Command::Terminate => "terminate",
            Command::BreakpointLocations => "breakpointLocations",
            Command::SetBreakpoints => "setBreakpoints",
            Command::SetFunctionBreakpoints => "setFunctionBreakpoints",
            Command::SetExceptionBreakpoints => "setExceptionBreakpoints",
            Command::DataBreakpointInfo => "dataBreakpointInfo",
            Command::SetDataBreakpoints => "setDataBreakpoints",
            Command::SetInstructionBreakpoints => "setInstructionBreakpoints",
            Command::Continue => "continue",
            Command::Next => "next",
            Command::StepIn => "stepIn",
            Command::StepOut => "stepOut",
            Command::StepBack => "stepBack",
            Command::ReverseContinue => "reverseContinue",
            Command::RestartFrame => "restartFrame",
            Command::Goto => "goto",
            Command::Pause => "pause",
            Command::StackTrace => "stackTrace",
            Command::Scopes => "scopes",
            Command::Variables => "variables",
            Command::SetVariable => "setVariable",
            Command::Source => "source",
            Command::Threads => "threads",
            Command::TerminateThreads => "terminateThreads",
            Command::Modules => "modules",
            Command::LoadedSources => "loadedSources",
            Command::Evaluate => "evaluate",
            Command::SetExpression => "setExpression",
            Command::StepInTargets => "stepInTargets",
            Command::GotoTargets => "gotoTargets",
            Command::Completions => "completions",
            Command::ExceptionInfo => "exceptionInfo",
            Command::ReadMemory => "readMemory",
            Command::WriteMemory => "writeMemory",
            Command::Disassemble => "disassemble",
        }
    }

    pub fn from_wire(s: &str) -> Result<Command> {
        match s {
            "cancel" => Ok(Command::Cancel),
            "runInTerminal" => Ok(Command::RunInTerminal),
            "initialize" => Ok(Command::Initialize),
            "configurationDone" => Ok(Command::ConfigurationDone),
            "launch" => Ok(Command::Launch),
            "attach" => Ok(Command::Attach),
            "restart" => Ok(Command::Restart),
            "disconnect" => Ok(Command::Disconnect),
            "terminate" => Ok(Command::Terminate),
            "breakpointLocations" => Ok(Command::BreakpointLocations),
            "setBreakpoints" => Ok(Command::SetBreakpoints),
            "setFunctionBreakpoints" => Ok(Command::SetFunctionBreakpoints),
            "setExceptionBreakpoints" => Ok(Command::SetExceptionBreakpoints),
            "dataBreakpointInfo" => Ok(Command::DataBreakpointInfo),
            "setDataBreakpoints" => Ok(Command::SetDataBreakpoints),
            "setInstructionBreakpoints" => Ok(Command::SetInstructionBreakpoints),
            "continue" => Ok(Command::Continue),
            "next" => Ok(Command::Next),
            "stepIn" => Ok(Command::StepIn),
            "stepOut" => Ok(Command::StepOut),
            "stepBack" => Ok(Command::StepBack),
            "reverseContinue" => Ok(Command::ReverseContinue),
            "restartFrame" => Ok(Command::RestartFrame),
            "goto" => Ok(Command::Goto),
            "pause" => Ok(Command::Pause),
            "stackTrace" => Ok(Command::StackTrace),
            "scopes" => Ok(Command::Scopes),
            "variables" => Ok(Command::Variables),
            "setVariable" => Ok(Command::SetVariable),
            "source" => Ok(Command::Source),
            "threads" => Ok(Command::Threads),
            "terminateThreads" => Ok(Command::TerminateThreads),
            "modules" => Ok(Command::Modules),
            "loadedSources" => Ok(Command::LoadedSources),
            "evaluate" => Ok(Command::Evaluate),
            "setExpression" => Ok(Command::SetExpression),
            "stepInTargets" => Ok(Command::StepInTargets),
            "gotoTargets" => Ok(Command::GotoTargets),
            "completions" => Ok(Command::Completions),
            "exceptionInfo" => Ok(Command::ExceptionInfo),
            "readMemory" => Ok(Command::ReadMemory),
            "writeMemory" => Ok(Command::WriteMemory),
            "disassemble" => Ok(Command::Disassemble),
            other => Err(Error::UnknownEnumerant {
                table: "command",
                value: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Argument payloads
// ============================================================================

/// Arguments of a cancel request. The whole object is omitted from the wire
/// when both fields are absent.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CancelArguments {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub progress_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RunInTerminalRequestArguments {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<RunInTerminalKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub cwd: String,
    pub args: Vec<String>,
    /// Environment overlay; a `null` value unsets the variable, so the map
    /// value keeps null distinct from absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub env: Option<BTreeMap<String, Option<String>>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct InitializeRequestArguments {
    #[serde(rename = "clientID", skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_name: Option<String>,
    #[serde(rename = "adapterID")]
    pub adapter_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lines_start_at1: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub columns_start_at1: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supports_variable_type: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supports_variable_paging: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supports_run_in_terminal_request: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supports_memory_references: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supports_progress_reporting: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supports_invalidated_event: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supports_memory_event: Option<bool>,
}

impl InitializeRequestArguments {
    pub fn new(adapter_id: impl Into<String>) -> Self {
        InitializeRequestArguments {
            client_id: None,
            client_name: None,
            adapter_id: adapter_id.into(),
            locale: None,
            lines_start_at1: None,
            columns_start_at1: None,
            supports_variable_type: None,
            supports_variable_paging: None,
            supports_run_in_terminal_request: None,
            supports_memory_references: None,
            supports_progress_reporting: None,
            supports_invalidated_event: None,
            supports_memory_event: None,
        }
    }
}

/// Arguments of a launch request
///
/// Beyond `noDebug` and `__restart` the object is adapter-defined; the
/// remaining keys are kept verbatim in `adapter_options` and flattened back
/// on encode.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LaunchRequestArguments {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub no_debug: Option<bool>,
    #[serde(rename = "__restart", skip_serializing_if = "Option::is_none")]
    pub restart: Option<Value>,
    #[serde(flatten)]
    pub adapter_options: Map<String, Value>,
}

/// Arguments of an attach request; adapter-defined apart from `__restart`
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AttachRequestArguments {
    #[serde(rename = "__restart", skip_serializing_if = "Option::is_none")]
    pub restart: Option<Value>,
    #[serde(flatten)]
    pub adapter_options: Map<String, Value>,
}

/// Arguments of a restart request; omitted entirely when empty
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RestartArguments {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub no_debug: Option<bool>,
    #[serde(rename = "__restart", skip_serializing_if = "Option::is_none")]
    pub restart: Option<Value>,
}

/// Arguments of a disconnect request; omitted entirely when empty
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DisconnectArguments {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub restart: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub terminate_debuggee: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suspend_debuggee: Option<bool>,
}

/// Arguments of a terminate request; omitted entirely when empty
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TerminateArguments {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub restart: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BreakpointLocationsArguments {
    pub source: Source,
    pub line: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_line: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_column: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SetBreakpointsArguments {
    pub source: Source,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub breakpoints: Option<Vec<SourceBreakpoint>>,
    /// Deprecated line list kept for older clients
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lines: Option<Vec<i64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_modified: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SetFunctionBreakpointsArguments {
    pub breakpoints: Vec<FunctionBreakpoint>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SetExceptionBreakpointsArguments {
    pub filters: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter_options: Option<Vec<ExceptionFilterOptions>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exception_options: Option<Vec<ExceptionOptions>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DataBreakpointInfoArguments {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variables_reference: Option<i64>,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SetDataBreakpointsArguments {
    pub breakpoints: Vec<DataBreakpoint>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SetInstructionBreakpointsArguments {
    pub breakpoints: Vec<InstructionBreakpoint>,
}

/// Shared by continue and reverseContinue
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ContinueArguments {
    pub thread_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub single_thread: Option<bool>,
}

/// Shared by next, stepOut, and stepBack
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StepArguments {
    pub thread_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub single_thread: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub granularity: Option<SteppingGranularity>,
}

impl StepArguments {
    pub fn thread(thread_id: i64) -> Self {
        StepArguments {
            thread_id,
            single_thread: None,
            granularity: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StepInArguments {
    pub thread_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub single_thread: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub granularity: Option<SteppingGranularity>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RestartFrameArguments {
    pub frame_id: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GotoArguments {
    pub thread_id: i64,
    pub target_id: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PauseArguments {
    pub thread_id: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StackTraceArguments {
    pub thread_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_frame: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub levels: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<StackFrameFormat>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ScopesArguments {
    pub frame_id: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VariablesArguments {
    pub variables_reference: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<VariablesFilter>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<ValueFormat>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SetVariableArguments {
    pub variables_reference: i64,
    pub name: String,
    pub value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<ValueFormat>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SourceArguments {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<Source>,
    pub source_reference: i64,
}

/// Arguments of terminateThreads; always emitted, even when empty
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TerminateThreadsArguments {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thread_ids: Option<Vec<i64>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ModulesArguments {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_module: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub module_count: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EvaluateArguments {
    pub expression: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frame_id: Option<i64>,
    /// Free-form context hint (`watch`, `repl`, `hover`, `clipboard`, ...)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<ValueFormat>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SetExpressionArguments {
    pub expression: String,
    pub value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frame_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<ValueFormat>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StepInTargetsArguments {
    pub frame_id: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GotoTargetsArguments {
    pub source: Source,
    pub line: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CompletionsArguments {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frame_id: Option<i64>,
    pub text: String,
    pub column: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ExceptionInfoArguments {
    pub thread_id: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ReadMemoryArguments {
    pub memory_reference: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<i64>,
    pub count: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WriteMemoryArguments {
    pub memory_reference: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_partial: Option<bool>,
    /// Base64-encoded bytes to write
    pub data: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DisassembleArguments {
    pub memory_reference: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instruction_offset: Option<i64>,
    pub instruction_count: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolve_symbols: Option<bool>,
}

// ============================================================================
// Request payload sum type
// ============================================================================

/// The typed arguments of a request; the variant is the command
#[derive(Debug, Clone, PartialEq)]
pub enum RequestArguments {
    Cancel(CancelArguments),
    RunInTerminal(RunInTerminalRequestArguments),
    Initialize(InitializeRequestArguments),
    ConfigurationDone,
    Launch(LaunchRequestArguments),
    Attach(AttachRequestArguments),
    Restart(RestartArguments),
    Disconnect(DisconnectArguments),
    Terminate(TerminateArguments),
    BreakpointLocations(BreakpointLocationsArguments),
    SetBreakpoints(SetBreakpointsArguments),
    SetFunctionBreakpoints(SetFunctionBreakpointsArguments),
    SetExceptionBreakpoints(SetExceptionBreakpointsArguments),
    DataBreakpointInfo(DataBreakpointInfoArguments),
    SetDataBreakpoints(SetDataBreakpointsArguments),
    SetInstructionBreakpoints(SetInstructionBreakpointsArguments),
    Continue(ContinueArguments),
    Next(StepArguments),
    StepIn(StepInArguments),
    StepOut(StepArguments),
    StepBack(StepArguments),
    ReverseContinue(ContinueArguments),
    RestartFrame(RestartFrameArguments),
    Goto(GotoArguments),
    Pause(PauseArguments),
    StackTrace(StackTraceArguments),
    Scopes(ScopesArguments),
    Variables(VariablesArguments),
    SetVariable(SetVariableArguments),
    Source(SourceArguments),
    Threads,
    TerminateThreads(TerminateThreadsArguments),
    Modules(ModulesArguments),
    LoadedSources,
    Evaluate(EvaluateArguments),
    SetExpression(SetExpressionArguments),
    StepInTargets(StepInTargetsArguments),
    GotoTargets(GotoTargetsArguments),
    Completions(CompletionsArguments),
    ExceptionInfo(ExceptionInfoArguments),
    ReadMemory(ReadMemoryArguments),
    WriteMemory(WriteMemoryArguments),
    Disassemble(DisassembleArguments),
}

impl RequestArguments {
    /// The command this payload belongs to. Derived, never stored, so the
    /// discriminant cannot disagree with the payload.
    pub fn command(&self) -> Command {
        match self {
            RequestArguments::Cancel(_) => Command::Cancel,
            RequestArguments::RunInTerminal(_) => Command::RunInTerminal,
            RequestArguments::Initialize(_) => Command::Initialize,
            RequestArguments::ConfigurationDone => Command::ConfigurationDone,
            RequestArguments::Launch(_) => Command::Launch,
            RequestArguments::Attach(_) => Command::Attach,
            RequestArguments::Restart(_) => Command::Restart,
            RequestArguments::Disconnect(_) => Command::Disconnect,
            RequestArguments::Terminate(_) => Command::Terminate,
            RequestArguments::BreakpointLocations(_) => Command::BreakpointLocations,
            RequestArguments::SetBreakpoints(_) => Command::SetBreakpoints,
            RequestArguments::SetFunctionBreakpoints(_) => Command::SetFunctionBreakpoints,
            RequestArguments::SetExceptionBreakpoints(_) => Command::SetExceptionBreakpoints,
            RequestArguments::DataBreakpointInfo(_) => Command::DataBreakpointInfo,
            RequestArguments::SetDataBreakpoints(_) => Command::SetDataBreakpoints,
            RequestArguments::SetInstructionBreakpoints(_) => Command::SetInstructionBreakpoints,
            RequestArguments::Continue(_) => Command::Continue,
            RequestArguments::Next(_) => Command::Next,
            RequestArguments::StepIn(_) => Command::StepIn,
            RequestArguments::StepOut(_) => Command::StepOut,
            RequestArguments::StepBack(_) => Command::StepBack,
            RequestArguments::ReverseContinue(_) => Command::ReverseContinue,
            RequestArguments::RestartFrame(_) => Command::RestartFrame,
            RequestArguments::Goto(_) => Command::Goto,
            RequestArguments::Pause(_) => Command::Pause,
            RequestArguments::StackTrace(_) => Command::StackTrace,
            RequestArguments::Scopes(_) => Command::Scopes,
            RequestArguments::Variables(_) => Command::Variables,
            RequestArguments::SetVariable(_) => Command::SetVariable,
            RequestArguments::Source(_) => Command::Source,
            RequestArguments::Threads => Command::Threads,
            RequestArguments::TerminateThreads(_) => Command::TerminateThreads,
            RequestArguments::Modules(_) => Command::Modules,
            RequestArguments::LoadedSources => Command::LoadedSources,
            RequestArguments::Evaluate(_) => Command::Evaluate,
            RequestArguments::SetExpression(_) => Command::SetExpression,
            RequestArguments::StepInTargets(_) => Command::StepInTargets,
            RequestArguments::GotoTargets(_) => Command::GotoTargets,
            RequestArguments::Completions(_) => Command::Completions,
            RequestArguments::ExceptionInfo(_) => Command::ExceptionInfo,
            RequestArguments::ReadMemory(_) => Command::ReadMemory,
            RequestArguments::WriteMemory(_) => Command::WriteMemory,
            RequestArguments::Disassemble(_) => Command::Disassemble,
        }
    }

    /// Encodes the `arguments` value for the wire, or `None` when the
    /// command carries no arguments object.
    pub(crate) fn to_wire_value(&self) -> Result<Option<Value>> {
        match self {
            // Conditional presence: the object is dropped when every field
            // is absent, matching established adapter behavior.
            RequestArguments::Cancel(args) => encode_object_if_nonempty(args),
            RequestArguments::Restart(args) => encode_object_if_nonempty(args),
            RequestArguments::Disconnect(args) => encode_object_if_nonempty(args),
            RequestArguments::Terminate(args) => encode_object_if_nonempty(args),

            RequestArguments::ConfigurationDone
            | RequestArguments::Threads
            | RequestArguments::LoadedSources => Ok(None),

            RequestArguments::RunInTerminal(args) => encode_object(args),
            RequestArguments::Initialize(args) => encode_object(args),
            RequestArguments::Launch(args) => encode_object(args),
            RequestArguments::Attach(args) => encode_object(args),
            RequestArguments::BreakpointLocations(args) => encode_object(args),
            RequestArguments::SetBreakpoints(args) => encode_object(args),
            RequestArguments::SetFunctionBreakpoints(args) => encode_object(args),
            RequestArguments::SetExceptionBreakpoints(args) => encode_object(args),
            RequestArguments::DataBreakpointInfo(args) => encode_object(args),
            RequestArguments::SetDataBreakpoints(args) => encode_object(args),
            RequestArguments::SetInstructionBreakpoints(args) => encode_object(args),
            RequestArguments::Continue(args) => encode_object(args),
            RequestArguments::Next(args) => encode_object(args),
            RequestArguments::StepIn(args) => encode_object(args),
            RequestArguments::StepOut(args) => encode_object(args),
            RequestArguments::StepBack(args) => encode_object(args),
            RequestArguments::ReverseContinue(args) => encode_object(args),
            RequestArguments::RestartFrame(args) => encode_object(args),
            RequestArguments::Goto(args) => encode_object(args),
            RequestArguments::Pause(args) => encode_object(args),
            RequestArguments::StackTrace(args) => encode_object(args),
            RequestArguments::Scopes(args) => encode_object(args),
            RequestArguments::Variables(args) => encode_object(args),
            RequestArguments::SetVariable(args) => encode_object(args),
            RequestArguments::Source(args) => encode_object(args),
            RequestArguments::TerminateThreads(args) => encode_object(args),
            RequestArguments::Modules(args) => encode_object(args),
            RequestArguments::Evaluate(args) => encode_object(args),
            RequestArguments::SetExpression(args) => encode_object(args),
            RequestArguments::StepInTargets(args) => encode_object(args),
            RequestArguments::GotoTargets(args) => encode_object(args),
            RequestArguments::Completions(args) => encode_object(args),
            RequestArguments::ExceptionInfo(args) => encode_object(args),
            RequestArguments::ReadMemory(args) => encode_object(args),
            RequestArguments::WriteMemory(args) => encode_object(args),
            RequestArguments::Disassemble(args) => encode_object(args),
        }
    }

    /// Decodes the `arguments` value for a resolved command.
    pub(crate) fn from_wire(command: Command, arguments: Value) -> Result<Self> {
        let args = match command {
            Command::Cancel => {
                RequestArguments::Cancel(decode_optional_object("CancelArguments", arguments)?)
            }
            Command::RunInTerminal => RequestArguments::RunInTerminal(decode_object(
                "RunInTerminalRequestArguments",
                arguments,
            )?),
            Command::Initialize => RequestArguments::Initialize(decode_object(
                "InitializeRequestArguments",
                arguments,
            )?),
            Command::ConfigurationDone => RequestArguments::ConfigurationDone,
            Command::Launch => {
                RequestArguments::Launch(decode_object("LaunchRequestArguments", arguments)?)
            }
            Command::Attach => {
                RequestArguments::Attach(decode_object("AttachRequestArguments", arguments)?)
            }
            Command::Restart => {
                RequestArguments::Restart(decode_optional_object("RestartArguments", arguments)?)
            }
            Command::Disconnect => RequestArguments::Disconnect(decode_optional_object(
                "DisconnectArguments",
                arguments,
            )?),
            Command::Terminate => RequestArguments::Terminate(decode_optional_object(
                "TerminateArguments",
                arguments,
            )?),
            Command::BreakpointLocations => RequestArguments::BreakpointLocations(decode_object(
                "BreakpointLocationsArguments",
                arguments,
            )?),
            Command::SetBreakpoints => RequestArguments::SetBreakpoints(decode_object(
                "SetBreakpointsArguments",
                arguments,
            )?),
            Command::SetFunctionBreakpoints => RequestArguments::SetFunctionBreakpoints(
                decode_object("SetFunctionBreakpointsArguments", arguments)?,
            ),
            Command::SetExceptionBreakpoints => RequestArguments::SetExceptionBreakpoints(
                decode_object("SetExceptionBreakpointsArguments", arguments)?,
            ),
            Command::DataBreakpointInfo => RequestArguments::DataBreakpointInfo(decode_object(
                "DataBreakpointInfoArguments",
                arguments,
            )?),
            Command::SetDataBreakpoints => RequestArguments::SetDataBreakpoints(decode_object(
                "SetDataBreakpointsArguments",
                arguments,
            )?),
            Command::SetInstructionBreakpoints => RequestArguments::SetInstructionBreakpoints(
                decode_object("SetInstructionBreakpointsArguments", arguments)?,
            ),
            Command::Continue => {
                RequestArguments::Continue(decode_object("ContinueArguments", arguments)?)
            }
            Command::Next => RequestArguments::Next(decode_object("StepArguments", arguments)?),
            Command::StepIn => {
                RequestArguments::StepIn(decode_object("StepInArguments", arguments)?)
            }
            Command::StepOut => {
                RequestArguments::StepOut(decode_object("StepArguments", arguments)?)
            }
            Command::StepBack => {
                RequestArguments::StepBack(decode_object("StepArguments", arguments)?)
            }
            Command::ReverseContinue => {
                RequestArguments::ReverseContinue(decode_object("ContinueArguments", arguments)?)
            }
            Command::RestartFrame => {
                RequestArguments::RestartFrame(decode_object("RestartFrameArguments", arguments)?)
            }
            Command::Goto => RequestArguments::Goto(decode_object("GotoArguments", arguments)?),
            Command::Pause => RequestArguments::Pause(decode_object("PauseArguments", arguments)?),
            Command::StackTrace => {
                RequestArguments::StackTrace(decode_object("StackTraceArguments", arguments)?)
            }
            Command::Scopes => {
                RequestArguments::Scopes(decode_object("ScopesArguments", arguments)?)
            }
            Command::Variables => {
                RequestArguments::Variables(decode_object("VariablesArguments", arguments)?)
            }
            Command::SetVariable => {
                RequestArguments::SetVariable(decode_object("SetVariableArguments", arguments)?)
            }
            Command::Source => {
                RequestArguments::Source(decode_object("SourceArguments", arguments)?)
            }
            Command::Threads => RequestArguments::Threads,
            Command::TerminateThreads => RequestArguments::TerminateThreads(decode_object(
                "TerminateThreadsArguments",
                arguments,
            )?),
            Command::Modules => {
                RequestArguments::Modules(decode_object("ModulesArguments", arguments)?)
            }
            Command::LoadedSources => RequestArguments::LoadedSources,
            Command::Evaluate => {
                RequestArguments::Evaluate(decode_object("EvaluateArguments", arguments)?)
            }
            Command::SetExpression => {
                RequestArguments::SetExpression(decode_object("SetExpressionArguments", arguments)?)
            }
            Command::StepInTargets => {
                RequestArguments::StepInTargets(decode_object("StepInTargetsArguments", arguments)?)
            }
            Command::GotoTargets => {
                RequestArguments::GotoTargets(decode_object("GotoTargetsArguments", arguments)?)
            }
            Command::Completions => {
                RequestArguments::Completions(decode_object("CompletionsArguments", arguments)?)
            }
            Command::ExceptionInfo => {
                RequestArguments::ExceptionInfo(decode_object("ExceptionInfoArguments", arguments)?)
            }
            Command::ReadMemory => {
                RequestArguments::ReadMemory(decode_object("ReadMemoryArguments", arguments)?)
            }
            Command::WriteMemory => {
                RequestArguments::WriteMemory(decode_object("WriteMemoryArguments", arguments)?)
            }
            Command::Disassemble => {
                RequestArguments::Disassemble(decode_object("DisassembleArguments", arguments)?)
            }
        };
        Ok(args)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_table_round_trips() {
        for command in Command::ALL {
            let parsed = Command::from_wire(command.as_str()).unwrap();
            assert_eq!(parsed, command);
        }
    }

    #[test]
    fn test_command_unknown_rejected() {
        let err = Command::from_wire("continuee").unwrap_err();
        assert_eq!(
            err,
            crate::error::Error::UnknownEnumerant {
                table: "command",
                value: "continuee".to_string(),
            }
        );
    }

    #[test]
    fn test_arguments_variant_reports_own_command() {
        let args = RequestArguments::Continue(ContinueArguments {
            thread_id: 1,
            single_thread: None,
        });
        assert_eq!(args.command(), Command::Continue);
        assert_eq!(args.command().as_str(), "continue");

        assert_eq!(RequestArguments::Threads.command(), Command::Threads);
    }

    #[test]
    fn test_cancel_arguments_omitted_when_empty() {
        let args = RequestArguments::Cancel(CancelArguments::default());
        assert_eq!(args.to_wire_value().unwrap(), None);

        // Either field alone keeps the object
        let args = RequestArguments::Cancel(CancelArguments {
            request_id: Some(12),
            progress_id: None,
        });
        let value = args.to_wire_value().unwrap().unwrap();
        assert_eq!(value, serde_json::json!({ "requestId": 12 }));
    }

    #[test]
    fn test_terminate_threads_arguments_always_emitted() {
        let args = RequestArguments::TerminateThreads(TerminateThreadsArguments::default());
        let value = args.to_wire_value().unwrap().unwrap();
        assert_eq!(value, serde_json::json!({}));
    }

    #[test]
    fn test_launch_arguments_flatten_round_trip() {
        let raw = serde_json::json!({
            "program": "/bin/app",
            "stopOnEntry": true,
            "noDebug": false
        });
        let args: LaunchRequestArguments = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(args.no_debug, Some(false));
        assert_eq!(
            args.adapter_options.get("program"),
            Some(&Value::String("/bin/app".to_string()))
        );
        assert!(!args.adapter_options.contains_key("noDebug"));

        let back = serde_json::to_value(&args).unwrap();
        assert_eq!(back, raw);
    }

    #[test]
    fn test_initialize_arguments_wire_keys() {
        let args = InitializeRequestArguments {
            client_id: Some("vscode".to_string()),
            ..InitializeRequestArguments::new("gdb")
        };
        let json = serde_json::to_string(&args).unwrap();
        assert!(json.contains(r#""adapterID":"gdb""#));
        assert!(json.contains(r#""clientID":"vscode""#));
        assert!(!json.contains("adapter_id"));
    }

    #[test]
    fn test_run_in_terminal_env_null_distinct_from_absent() {
        let mut env = BTreeMap::new();
        env.insert("KEEP".to_string(), Some("1".to_string()));
        env.insert("UNSET".to_string(), None);
        let args = RunInTerminalRequestArguments {
            kind: Some(RunInTerminalKind::Integrated),
            title: None,
            cwd: "/work".to_string(),
            args: vec!["sh".to_string()],
            env: Some(env),
        };
        let json = serde_json::to_string(&args).unwrap();
        assert!(json.contains(r#""UNSET":null"#));
        assert!(json.contains(r#""KEEP":"1""#));
        assert!(!json.contains("title"));
    }

    #[test]
    fn test_missing_arguments_for_required_command() {
        let err = RequestArguments::from_wire(Command::Pause, Value::Null).unwrap_err();
        assert_eq!(
            err,
            crate::error::Error::MissingField("arguments".to_string())
        );
    }

    #[test]
    fn test_missing_arguments_for_conditional_command() {
        let args = RequestArguments::from_wire(Command::Disconnect, Value::Null).unwrap();
        assert_eq!(
            args,
            RequestArguments::Disconnect(DisconnectArguments::default())
        );
    }
}
