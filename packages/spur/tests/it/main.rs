//! Integration tests for the hook binary.
//!
//! These tests run `spur` the way Claude Code does:
//! - The hook payload is written to stdin as JSON
//! - A response is a single JSON line on stdout; no response is empty stdout
//! - Each test gets its own project directory and config directory

mod prompt;
mod stop;

use std::io::Write as _;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use pretty_assertions::assert_eq as pretty_assert_eq;
use serde_json::Value;
use tempfile::TempDir;
use xshell::Shell;

/// Expected outcome from running a hook through spur.
#[derive(Debug, Clone, PartialEq)]
pub enum Expected {
    /// Passthrough: exit 0, no output.
    Passthrough,

    /// Context: exit 0, `additionalContext` for the named event.
    Context(&'static str),

    /// Block: exit 0, `decision: block` for the named event.
    Block(&'static str),
}

/// The result of running the binary.
#[derive(Debug, Clone)]
pub struct Run {
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl Run {
    /// Parse stdout as a hook response.
    pub fn response(&self) -> Value {
        serde_json::from_str(self.stdout.trim())
            .unwrap_or_else(|err| panic!("parse hook response {:?}: {err}", self.stdout))
    }

    /// The `additionalContext` of the hook response.
    pub fn additional_context(&self) -> String {
        self.response()["hookSpecificOutput"]["additionalContext"]
            .as_str()
            .unwrap_or_else(|| panic!("no additionalContext in {:?}", self.stdout))
            .to_string()
    }
}

/// A scratch project for a test.
///
/// The user-level config directory points inside the scratch directory so
/// the developer's own settings never leak into a test.
pub struct Project {
    pub dir: TempDir,
    pub sh: Shell,
}

impl Project {
    pub fn new() -> Self {
        let dir = TempDir::new().expect("create project dir");
        let sh = Shell::new().expect("create shell");
        sh.change_dir(dir.path());
        Self { dir, sh }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write a file relative to the project root.
    pub fn write(&self, path: &str, content: &str) -> PathBuf {
        let path = self.path().join(path);
        self.sh.write_file(&path, content).expect("write project file");
        path
    }

    fn config_home(&self) -> PathBuf {
        self.path().join(".test-config")
    }

    /// Run a hook with the given input.
    pub fn hook(&self, hook: &str, input: &str) -> Run {
        self.hook_with_env(hook, input, &[])
    }

    /// Run a hook with the given input and extra environment variables.
    pub fn hook_with_env(&self, hook: &str, input: &str, env: &[(&str, &str)]) -> Run {
        run_spur(&["claude", "hook", hook], Some(input), &self.config_home(), env)
    }

    /// Run a spur subcommand in the project directory.
    pub fn spur(&self, args: &[&str]) -> Run {
        run_spur(args, None, &self.config_home(), &[])
    }
}

/// Build a UserPromptSubmit hook JSON payload.
pub fn prompt_hook(prompt: &str, cwd: &Path) -> String {
    serde_json::json!({
        "hook_event_name": "UserPromptSubmit",
        "session_id": "test",
        "transcript_path": "/tmp/test",
        "permission_mode": "default",
        "cwd": cwd,
        "prompt": prompt
    })
    .to_string()
}

/// Build a PostToolUse hook JSON payload.
pub fn post_tool_use_hook(tool_name: &str, file_path: &Path, cwd: &Path) -> String {
    serde_json::json!({
        "hook_event_name": "PostToolUse",
        "session_id": "test",
        "transcript_path": "/tmp/test",
        "cwd": cwd,
        "tool_name": tool_name,
        "tool_input": {
            "file_path": file_path,
            "content": "ignored"
        },
        "tool_response": { "success": true }
    })
    .to_string()
}

/// Build a SessionStart hook JSON payload.
pub fn session_start_hook(cwd: &Path) -> String {
    serde_json::json!({
        "hook_event_name": "SessionStart",
        "session_id": "test",
        "transcript_path": "/tmp/test",
        "cwd": cwd,
        "source": "startup"
    })
    .to_string()
}

fn run_spur(args: &[&str], input: Option<&str>, config_home: &Path, env: &[(&str, &str)]) -> Run {
    let mut command = Command::new(env!("CARGO_BIN_EXE_spur"));
    command
        .args(args)
        .env_remove("ENABLE_LSP_TOOL")
        .env_remove("SPUR_LOG")
        .env("XDG_CONFIG_HOME", config_home)
        .envs(env.iter().copied())
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());
    if let Some(cwd) = config_home.parent() {
        command.current_dir(cwd);
    }

    let mut child = command.spawn().expect("failed to spawn spur");
    {
        let mut stdin = child.stdin.take().expect("failed to get stdin");
        if let Some(input) = input {
            stdin
                .write_all(input.as_bytes())
                .expect("failed to write to stdin");
        }
    }

    let output = child.wait_with_output().expect("failed to wait for spur");
    Run {
        exit_code: output.status.code().unwrap_or(-1),
        stdout: String::from_utf8_lossy(&output.stdout).to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).to_string(),
    }
}

pub fn assert_expected(run: &Run, expected: Expected) {
    match expected {
        Expected::Passthrough => {
            pretty_assert_eq!(
                run.exit_code,
                0,
                "expected passthrough (exit 0), stderr: {}",
                run.stderr
            );
            assert!(
                run.stdout.is_empty(),
                "expected no output for passthrough, got: {}",
                run.stdout
            );
        }
        Expected::Context(event) => {
            pretty_assert_eq!(run.exit_code, 0, "expected context (exit 0), stderr: {}", run.stderr);
            let response = run.response();
            let output = &response["hookSpecificOutput"];
            pretty_assert_eq!(output["hookEventName"], event);
            assert!(
                output["additionalContext"].is_string(),
                "expected additionalContext in output, got: {}",
                run.stdout
            );
            assert!(
                output.get("decision").is_none(),
                "expected no decision in output, got: {}",
                run.stdout
            );
        }
        Expected::Block(event) => {
            pretty_assert_eq!(run.exit_code, 0, "expected block (exit 0), stderr: {}", run.stderr);
            let response = run.response();
            let output = &response["hookSpecificOutput"];
            pretty_assert_eq!(output["hookEventName"], event);
            pretty_assert_eq!(output["decision"], "block");
            assert!(
                output["reason"].is_string(),
                "expected reason in output, got: {}",
                run.stdout
            );
        }
    }
}
