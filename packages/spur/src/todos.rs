//! Todo lists and the transcript they are recorded in.
//!
//! The agent tracks its work with the `TodoWrite` tool. Each call replaces the
//! whole list, so the latest call in the transcript is the current state.

use std::{fs, path::Path};

use derive_more::Display;
use itertools::Itertools;
use serde::Deserialize;
use serde_json::Value;

/// The tool the agent uses to record its todo list.
pub const TODO_WRITE_TOOL: &str = "TodoWrite";

/// A single todo item.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    /// What needs doing.
    #[serde(default)]
    pub content: String,

    /// Where the item stands.
    #[serde(default)]
    pub status: TodoStatus,

    /// Present-tense description shown while the item is in progress.
    #[serde(default, alias = "active_form")]
    pub active_form: Option<String>,
}

impl Todo {
    /// Whether the item still needs work.
    pub fn is_open(&self) -> bool {
        matches!(self.status, TodoStatus::Pending | TodoStatus::InProgress)
    }
}

/// The status of a todo item.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TodoStatus {
    #[default]
    #[display("pending")]
    Pending,

    #[display("in_progress")]
    InProgress,

    #[display("completed")]
    Completed,

    /// Any status this version does not know about; never counted as open.
    #[serde(other)]
    #[display("other")]
    Other,
}

/// The todos that are still pending or in progress.
pub fn outstanding(todos: &[Todo]) -> Vec<&Todo> {
    todos.iter().filter(|todo| todo.is_open()).collect()
}

/// Whether the host reports that the user interrupted the agent.
///
/// Stopping because the user asked for it is never blocked.
pub fn is_user_interrupt(stop_reason: Option<&str>) -> bool {
    stop_reason
        .map(str::to_lowercase)
        .is_some_and(|reason| reason.contains("interrupt") || reason.contains("cancel"))
}

/// The message that tells the agent to keep going.
pub fn block_reason(open: &[&Todo]) -> String {
    let items = open
        .iter()
        .map(|todo| format!("- [{}] {}", todo.status, todo.content))
        .join("\n");
    format!(
        "You still have {} unfinished todo(s):\n{items}\n\nContinue working until every todo is completed. \
         If an item is no longer relevant, mark it completed or remove it with TodoWrite before stopping.",
        open.len()
    )
}

/// The todo list from the most recent `TodoWrite` call in a transcript.
///
/// Returns `None` if the transcript never records a todo list.
pub fn latest_from_transcript(events: &[Value]) -> Option<Vec<Todo>> {
    events.iter().rev().find_map(todos_in_event)
}

/// Read a JSONL transcript from disk.
///
/// An unreadable file yields an empty transcript, and lines that do not parse
/// as JSON are skipped.
#[tracing::instrument]
pub fn load_transcript(path: &Path) -> Vec<Value> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(err) => {
            tracing::warn!(?err, "transcript.unreadable");
            return Vec::new();
        }
    };

    content
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .filter_map(|(index, line)| match serde_json::from_str::<Value>(line) {
            Ok(event) => Some(event),
            Err(err) => {
                tracing::debug!(line = index + 1, ?err, "transcript.skip_line");
                None
            }
        })
        .collect()
}

/// The todo list written by the last `TodoWrite` call in a single event.
///
/// Transcript events nest tool calls inside `message.content`; some hosts
/// also record the tool call as the event itself.
fn todos_in_event(event: &Value) -> Option<Vec<Todo>> {
    let nested = event
        .pointer("/message/content")
        .and_then(Value::as_array)
        .and_then(|items| items.iter().rev().find_map(todos_in_tool_use));
    nested.or_else(|| todos_in_tool_use(event))
}

fn todos_in_tool_use(item: &Value) -> Option<Vec<Todo>> {
    if item.get("type").and_then(Value::as_str) != Some("tool_use") {
        return None;
    }
    if item.get("name").and_then(Value::as_str) != Some(TODO_WRITE_TOOL) {
        return None;
    }

    let todos = item.pointer("/input/todos")?;
    match serde_json::from_value::<Vec<Todo>>(todos.clone()) {
        Ok(todos) => Some(todos),
        Err(err) => {
            tracing::debug!(?err, "transcript.invalid_todos");
            None
        }
    }
}
