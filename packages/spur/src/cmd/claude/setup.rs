//! Set up Spur hooks for Claude Code.

use std::env;
use std::fs;
use std::path::PathBuf;

use clap::Args;
use color_eyre::{
    Result,
    eyre::{Context, OptionExt, bail},
};
use serde_json::{Value, json};
use spur::claude::hook;
use tracing::instrument;

#[derive(Args, Clone, Debug)]
pub struct Config {
    /// Path to the .claude directory.
    #[arg(long, default_value = ".claude")]
    claude_dir: PathBuf,
}

/// Seconds Claude Code waits for a Spur hook before giving up on it.
const HOOK_TIMEOUT: u32 = 5;

#[instrument]
pub fn main(config: Config) -> Result<()> {
    fs::create_dir_all(&config.claude_dir).context("create .claude directory")?;

    let dotclaude = config
        .claude_dir
        .canonicalize()
        .with_context(|| format!("canonicalize claude dir: {:?}", config.claude_dir))?;
    let settings_file = dotclaude.join("settings.local.json");
    tracing::debug!(?dotclaude, ?settings_file, "read existing settings");

    let spur_path = env::current_exe()
        .context("get current executable path")?
        .to_str()
        .ok_or_eyre("convert current executable path to string")?
        .to_string();

    let hook_for = |name: &str| {
        hook::Config::builder()
            .command(format!("{spur_path} claude hook {name}"))
            .timeout(HOOK_TIMEOUT)
            .build()
    };
    let desired_hooks = [
        (
            "UserPromptSubmit",
            hook::Matcher::builder().hooks([hook_for("prompt")]).build(),
        ),
        (
            "Stop",
            hook::Matcher::builder().hooks([hook_for("stop")]).build(),
        ),
        (
            "PostToolUse",
            hook::Matcher::builder()
                .matcher(hook::PostToolUsePayload::edit_tool_matcher())
                .hooks([hook_for("diagnostics")])
                .build(),
        ),
        (
            "SessionStart",
            hook::Matcher::builder()
                .hooks([hook_for("session-start")])
                .build(),
        ),
    ];
    tracing::debug!(?desired_hooks, "generate desired hooks");

    let mut settings = if settings_file.exists() {
        let content =
            fs::read_to_string(&settings_file).context("read existing settings.local.json")?;
        serde_json::from_str::<Value>(&content).context("parse existing settings.local.json")?
    } else {
        json!({})
    };
    tracing::debug!(?settings, "read existing settings");

    // Settings stay a `Value` so keys Spur does not know about survive the
    // merge; `preserve_order` keeps the user's key order intact.
    let Value::Object(settings) = &mut settings else {
        bail!("expected settings to be an object, got: {settings:?}");
    };
    let hooks = settings.entry("hooks").or_insert_with(|| json!({}));
    let Value::Object(hooks) = hooks else {
        bail!("expected hooks to be an object, got: {hooks:?}");
    };
    for (event, matcher) in desired_hooks {
        let entry = hooks.entry(event).or_insert_with(|| json!([]));
        let Value::Array(matchers) = entry else {
            bail!("expected matchers to be an array, got: {entry:?}");
        };
        let matcher = json!(matcher);
        tracing::debug!(?event, ?matcher, ?matchers, "merge hooks");
        if !matchers.contains(&matcher) {
            matchers.push(matcher);
        }
    }

    let settings_json = serde_json::to_string_pretty(&settings).context("serialize settings")?;
    fs::write(&settings_file, settings_json).context("write settings file")?;
    tracing::debug!(?settings, ?settings_file, "wrote merged settings file");

    println!("✓ Wrote hooks configuration to {}", settings_file.display());
    println!();
    println!("Next steps:");
    println!("1. Run /hooks in Claude Code to verify hooks are registered");
    println!("2. Set ENABLE_LSP_TOOL=1 to get language server guidance at session start");
    println!("3. Use claude --debug to see hook execution logs");

    Ok(())
}
