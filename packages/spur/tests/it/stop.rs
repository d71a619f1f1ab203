//! Stop Hook Tests

use serde_json::{Value, json};

use crate::{Expected, Project, assert_expected};

fn stop_hook(extra: Value) -> String {
    let mut input = json!({
        "hook_event_name": "Stop",
        "session_id": "test",
        "cwd": "/tmp",
    });
    if let (Value::Object(input), Value::Object(extra)) = (&mut input, extra) {
        input.extend(extra);
    }
    input.to_string()
}

fn todo_write_event(todos: Value) -> Value {
    json!({
        "type": "assistant",
        "message": {
            "role": "assistant",
            "content": [{ "type": "tool_use", "id": "toolu_1", "name": "TodoWrite", "input": { "todos": todos } }]
        }
    })
}

#[test]
fn test_blocks_with_open_todos() {
    let project = Project::new();
    let run = project.hook(
        "stop",
        &stop_hook(json!({
            "todos": [
                { "content": "write the parser", "status": "completed", "activeForm": "Writing the parser" },
                { "content": "write the tests", "status": "in_progress", "activeForm": "Writing the tests" },
                { "content": "update the docs", "status": "pending", "activeForm": "Updating the docs" }
            ]
        })),
    );

    assert_expected(&run, Expected::Block("Stop"));
    let reason = run.response()["hookSpecificOutput"]["reason"]
        .as_str()
        .unwrap_or_default()
        .to_string();
    assert!(reason.contains("2 unfinished"), "reason: {reason}");
    assert!(reason.contains("write the tests"), "reason: {reason}");
    assert!(reason.contains("update the docs"), "reason: {reason}");
    assert!(!reason.contains("write the parser"), "reason: {reason}");
}

#[test]
fn test_all_completed_is_passthrough() {
    let project = Project::new();
    let run = project.hook(
        "stop",
        &stop_hook(json!({
            "todos": [{ "content": "done", "status": "completed" }]
        })),
    );
    assert_expected(&run, Expected::Passthrough);
}

#[test]
fn test_no_todos_is_passthrough() {
    let project = Project::new();
    let run = project.hook("stop", &stop_hook(json!({})));
    assert_expected(&run, Expected::Passthrough);
}

#[test]
fn test_already_continuing_is_passthrough() {
    let project = Project::new();
    let run = project.hook(
        "stop",
        &stop_hook(json!({
            "stop_hook_active": true,
            "todos": [{ "content": "still open", "status": "pending" }]
        })),
    );
    assert_expected(&run, Expected::Passthrough);
}

#[test]
fn test_user_interrupt_is_passthrough() {
    let project = Project::new();
    let run = project.hook(
        "stop",
        &stop_hook(json!({
            "stopReason": "user_interrupt",
            "todos": [{ "content": "still open", "status": "pending" }]
        })),
    );
    assert_expected(&run, Expected::Passthrough);
}

#[test]
fn test_inline_transcript() {
    let project = Project::new();
    let run = project.hook(
        "stop",
        &stop_hook(json!({
            "transcript": [
                todo_write_event(json!([{ "content": "from transcript", "status": "pending" }])),
                { "type": "user", "message": { "role": "user", "content": "thanks" } }
            ]
        })),
    );

    assert_expected(&run, Expected::Block("Stop"));
    assert!(run.stdout.contains("from transcript"), "stdout: {}", run.stdout);
}

#[test]
fn test_transcript_file_uses_latest_todos() {
    let project = Project::new();
    let lines = [
        todo_write_event(json!([{ "content": "first draft", "status": "pending" }])).to_string(),
        String::from("{ this line is not json"),
        todo_write_event(json!([
            { "content": "first draft", "status": "completed" },
            { "content": "second pass", "status": "in_progress" }
        ]))
        .to_string(),
    ];
    let transcript = project.write("transcript.jsonl", &lines.join("\n"));

    let run = project.hook(
        "stop",
        &stop_hook(json!({ "transcript_path": transcript })),
    );

    assert_expected(&run, Expected::Block("Stop"));
    let reason = run.response()["hookSpecificOutput"]["reason"]
        .as_str()
        .unwrap_or_default()
        .to_string();
    assert!(reason.contains("1 unfinished"), "reason: {reason}");
    assert!(reason.contains("second pass"), "reason: {reason}");
}

#[test]
fn test_missing_transcript_file_is_passthrough() {
    let project = Project::new();
    let missing = project.path().join("missing.jsonl");
    let run = project.hook("stop", &stop_hook(json!({ "transcript_path": missing })));
    assert_expected(&run, Expected::Passthrough);
}
