//! Responds to Claude Code hooks.
//!
//! Each hook reads one JSON payload from stdin and either prints a single
//! JSON response on stdout or prints nothing.

use std::io;

use clap::{ArgAction, Args, Subcommand, builder::FalseyValueParser};
use color_eyre::{Result, eyre::Context};
use indoc::formatdoc;
use serde::de::DeserializeOwned;
use spur::{
    classify::{self, Classification, Mode},
    claude::hook::{
        HookEvent, HookResponse, PostToolUsePayload, SessionStartPayload, StopPayload,
        UserPromptSubmitPayload,
    },
    context, diagnostics, project, settings, todos,
};
use tap::Pipe;
use tracing::instrument;

#[derive(Args, Clone, Debug)]
pub struct Config {
    #[command(subcommand)]
    hook: Hook,
}

#[derive(Subcommand, Clone, Debug)]
enum Hook {
    /// `UserPromptSubmit`: inject context for the prompt's mode.
    Prompt,

    /// `Stop`: keep the agent working while todos are open.
    Stop,

    /// `PostToolUse`: report linter diagnostics for the edited file.
    Diagnostics,

    /// `SessionStart`: suggest a language server for the project.
    SessionStart(SessionStartConfig),
}

#[derive(Args, Clone, Debug)]
struct SessionStartConfig {
    /// Emit language server guidance.
    #[arg(
        long,
        env = "ENABLE_LSP_TOOL",
        action = ArgAction::SetTrue,
        value_parser = FalseyValueParser::new(),
    )]
    enable_lsp_tool: bool,
}

#[instrument]
pub fn main(config: Config) -> Result<()> {
    let response = match config.hook {
        Hook::Prompt => read_payload().and_then(respond_prompt)?,
        Hook::Stop => read_payload().and_then(respond_stop)?,
        Hook::Diagnostics => read_payload().and_then(respond_diagnostics)?,
        Hook::SessionStart(config) => {
            read_payload().and_then(|payload| respond_session_start(payload, &config))?
        }
    };

    match response {
        Some(response) => {
            let response = serde_json::to_string(&response).context("serialize response")?;
            println!("{response}");
        }
        None => tracing::debug!("hook.passthrough"),
    }
    Ok(())
}

fn read_payload<T: DeserializeOwned>() -> Result<T> {
    serde_json::from_reader::<_, T>(io::stdin()).context("read hook event")
}

#[instrument(skip_all)]
fn respond_prompt(payload: UserPromptSubmitPayload) -> Result<Option<HookResponse>> {
    let Some(detection) = classify::classify(&payload.prompt) else {
        return Ok(None);
    };

    let validation = match detection.classification {
        Classification::Mode(Mode::Ultrawork) => {
            project::sniff(&payload.cwd).validation_suggestion()
        }
        _ => String::new(),
    };

    context::render(detection.classification, &validation)
        .pipe(|context| HookResponse::context(HookEvent::UserPromptSubmit, context))
        .pipe(Some)
        .pipe(Ok)
}

#[instrument(skip_all)]
fn respond_stop(payload: StopPayload) -> Result<Option<HookResponse>> {
    if payload.stop_hook_active {
        tracing::debug!("stop.already_continuing");
        return Ok(None);
    }
    if todos::is_user_interrupt(payload.stop_reason.as_deref()) {
        tracing::debug!(stop_reason = ?payload.stop_reason, "stop.user_interrupt");
        return Ok(None);
    }

    let todos = payload.resolve_todos();
    let open = todos::outstanding(&todos);
    tracing::debug!(total = todos.len(), open = open.len(), "stop.todos");
    if open.is_empty() {
        return Ok(None);
    }

    Ok(Some(HookResponse::block(
        HookEvent::Stop,
        todos::block_reason(&open),
    )))
}

#[instrument(skip_all)]
fn respond_diagnostics(payload: PostToolUsePayload) -> Result<Option<HookResponse>> {
    let Some(file) = payload.edited_file() else {
        tracing::debug!(tool = %payload.tool_name, "diagnostics.not_an_edit");
        return Ok(None);
    };

    let settings = settings::load(&payload.cwd).context("load settings")?;
    let diagnostics = diagnostics::lint(
        &payload.cwd,
        &file,
        &settings.diagnostics.linters,
        settings.diagnostics.max_chars,
    )
    .context("lint edited file")?;

    Ok(diagnostics.map(|diagnostics| {
        HookResponse::context(
            HookEvent::PostToolUse,
            diagnostics::context_for(&file, &diagnostics),
        )
    }))
}

#[instrument(skip(payload))]
fn respond_session_start(
    payload: SessionStartPayload,
    config: &SessionStartConfig,
) -> Result<Option<HookResponse>> {
    if !config.enable_lsp_tool {
        return Ok(None);
    }

    let kind = project::sniff(&payload.cwd);
    let Some(server) = kind.language_server() else {
        return Ok(None);
    };

    let context = formatdoc! {"
        [LSP TOOL ENABLED]

        This looks like a {kind} project. Code navigation works best with the `{name}` language server.
        If it is not installed, install it with:

            {install}
        ",
        name = server.name,
        install = server.install,
    };
    Ok(Some(HookResponse::context(HookEvent::SessionStart, context)))
}
