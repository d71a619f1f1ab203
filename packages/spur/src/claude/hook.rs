//! Types for reading Claude Code hook payloads and writing hook responses.
//!
//! Payloads are read leniently: every field Spur does not strictly need has a
//! default, and unknown fields are ignored. Responses are always produced by
//! serializing these types, never by assembling JSON text by hand.

use std::path::PathBuf;

use bon::Builder;
use derive_more::Display;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::todos::{self, Todo};

fn default_cwd() -> PathBuf {
    PathBuf::from(".")
}

/// Payload for the `UserPromptSubmit` hook.
#[derive(Debug, Clone, Deserialize)]
pub struct UserPromptSubmitPayload {
    /// The user's prompt.
    #[serde(default)]
    pub prompt: String,

    /// The current working directory.
    #[serde(default = "default_cwd")]
    pub cwd: PathBuf,

    /// The session ID.
    #[serde(default, alias = "sessionId")]
    pub session_id: Option<String>,
}

/// Payload for the `Stop` hook.
#[derive(Debug, Clone, Deserialize)]
pub struct StopPayload {
    /// The current working directory.
    #[serde(default = "default_cwd")]
    pub cwd: PathBuf,

    /// The session ID.
    #[serde(default, alias = "sessionId")]
    pub session_id: Option<String>,

    /// Why the agent stopped, if the host reports it.
    #[serde(default, alias = "stopReason")]
    pub stop_reason: Option<String>,

    /// Whether the agent is already continuing because of a stop hook.
    #[serde(default, alias = "stopHookActive")]
    pub stop_hook_active: bool,

    /// The session's todo list, if the host includes it.
    #[serde(default)]
    pub todos: Option<Vec<Todo>>,

    /// Inline transcript events.
    #[serde(default)]
    pub transcript: Option<Vec<Value>>,

    /// Path to the JSONL transcript.
    #[serde(default, alias = "transcriptPath")]
    pub transcript_path: Option<PathBuf>,
}

impl StopPayload {
    /// The todo list for the session.
    ///
    /// Uses `todos` when the host sends it; otherwise falls back to the most
    /// recent todo list written in the transcript, inline or on disk.
    pub fn resolve_todos(&self) -> Vec<Todo> {
        if let Some(todos) = &self.todos {
            return todos.clone();
        }

        let from_transcript = match (&self.transcript, &self.transcript_path) {
            (Some(events), _) => todos::latest_from_transcript(events),
            (None, Some(path)) => todos::latest_from_transcript(&todos::load_transcript(path)),
            (None, None) => None,
        };
        from_transcript.unwrap_or_default()
    }
}

/// Payload for the `PostToolUse` hook.
#[derive(Debug, Clone, Deserialize)]
pub struct PostToolUsePayload {
    /// The current working directory.
    #[serde(default = "default_cwd")]
    pub cwd: PathBuf,

    /// The name of the tool that ran.
    #[serde(default)]
    pub tool_name: String,

    /// The input to the tool.
    #[serde(default)]
    pub tool_input: ToolInput,
}

/// The subset of tool input Spur reads.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ToolInput {
    /// The file the tool operated on, for file tools.
    #[serde(default)]
    pub file_path: Option<PathBuf>,
}

impl PostToolUsePayload {
    /// Tools that modify a file on disk.
    pub const EDIT_TOOLS: &[&str] = &["Write", "Edit", "MultiEdit"];

    /// Matcher that selects [`Self::EDIT_TOOLS`] in Claude Code's settings.
    pub fn edit_tool_matcher() -> String {
        Self::EDIT_TOOLS.join("|")
    }

    /// The file this tool use modified, resolved against `cwd`.
    ///
    /// Returns `None` for tools that do not modify files.
    pub fn edited_file(&self) -> Option<PathBuf> {
        if !Self::EDIT_TOOLS.contains(&self.tool_name.as_str()) {
            return None;
        }
        self.tool_input
            .file_path
            .as_ref()
            .map(|path| self.cwd.join(path))
    }
}

/// Payload for the `SessionStart` hook.
#[derive(Debug, Clone, Deserialize)]
pub struct SessionStartPayload {
    /// The current working directory.
    #[serde(default = "default_cwd")]
    pub cwd: PathBuf,

    /// What started the session (`startup`, `resume`, `clear`, ...).
    #[serde(default)]
    pub source: Option<String>,
}

/// Hook events Spur responds to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize, Deserialize)]
pub enum HookEvent {
    UserPromptSubmit,
    Stop,
    PostToolUse,
    SessionStart,
}

/// The decision a hook can make about the operation that triggered it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Decision {
    /// Prevent the operation; `reason` tells the agent what to do instead.
    Block,
}

/// The top-level structure of a hook response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HookResponse {
    /// Hook specific output.
    pub hook_specific_output: HookSpecificOutput,
}

impl HookResponse {
    /// A response that adds context for the agent.
    pub fn context(event: HookEvent, additional_context: impl Into<String>) -> Self {
        HookSpecificOutput::builder()
            .hook_event_name(event)
            .additional_context(additional_context)
            .build()
            .into()
    }

    /// A response that blocks the operation with a reason for the agent.
    pub fn block(event: HookEvent, reason: impl Into<String>) -> Self {
        HookSpecificOutput::builder()
            .hook_event_name(event)
            .decision(Decision::Block)
            .reason(reason)
            .build()
            .into()
    }
}

impl From<HookSpecificOutput> for HookResponse {
    fn from(hook_specific_output: HookSpecificOutput) -> Self {
        Self {
            hook_specific_output,
        }
    }
}

/// The event-specific part of a hook response.
///
/// Absent fields are omitted from the serialized output rather than written
/// as `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Builder)]
#[serde(rename_all = "camelCase")]
pub struct HookSpecificOutput {
    /// The event this response answers.
    pub hook_event_name: HookEvent,

    /// Text added to the agent's context.
    #[builder(into)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_context: Option<String>,

    /// Whether to block the operation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub decision: Option<Decision>,

    /// Why the operation was blocked, shown to the agent.
    #[builder(into)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// Configures a hook in Claude Code's settings.
#[derive(Debug, Serialize, Clone, Builder)]
#[non_exhaustive]
pub struct Config {
    /// The type of hook to run; Spur hooks are always `command` hooks.
    #[builder(skip = String::from("command"))]
    pub r#type: String,

    /// The command to run.
    #[builder(into)]
    pub command: String,

    /// Terminate the command after this many seconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u32>,
}

/// Configures hook matching strategy in Claude Code's settings.json.
#[derive(Debug, Serialize, Clone, Builder)]
#[non_exhaustive]
pub struct Matcher {
    /// Tool name pattern; only meaningful for tool hooks such as `PostToolUse`.
    #[builder(default = "", into)]
    #[serde(skip_serializing_if = "String::is_empty")]
    pub matcher: String,

    /// The hooks to run when the matcher matches.
    #[builder(with = |i: impl IntoIterator<Item = Config>| i.into_iter().collect())]
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub hooks: Vec<Config>,
}
