//! Documentation for Spur's modes and settings.

use clap::Args;
use color_eyre::Result;
use color_print::{cformat, cstr};
use itertools::Itertools;
use spur::{classify::Classification, project};

#[derive(Args, Clone, Debug)]
pub struct Config {}

pub fn main(_config: Config) -> Result<()> {
    println!("{INTRO}");
    println!("{}", modes());
    println!("{}", projects());
    println!("{SETTINGS}");
    Ok(())
}

const INTRO: &str = cstr!("\
<bold><blue>Spur</blue></bold>

  Spur watches the prompts you send to Claude Code and injects instructions that
  match what you asked for. Say <cyan>ultrawork</cyan> and the agent works at maximum
  effort; ask <cyan>where is</cyan> something and it searches exhaustively first.

<bold>Hooks</bold>

  <green>UserPromptSubmit</green>  <cyan>spur claude hook prompt</cyan>
                    Classifies the prompt and injects the matching context.
  <green>Stop</green>              <cyan>spur claude hook stop</cyan>
                    Blocks stopping while todos are pending or in progress.
  <green>PostToolUse</green>       <cyan>spur claude hook diagnostics</cyan>
                    Runs a linter on files changed by Write, Edit, or MultiEdit.
  <green>SessionStart</green>      <cyan>spur claude hook session-start</cyan>
                    With <cyan>ENABLE_LSP_TOOL</cyan> set, suggests a language server.

  Run <cyan>spur claude setup</cyan> to register all of them.
");

/// The classification table, in evaluation order.
fn modes() -> String {
    let rows = Classification::ALL
        .iter()
        .enumerate()
        .map(|(index, classification)| {
            let kind = match classification {
                Classification::Mode(_) => "mode",
                Classification::Hint(_) => "hint",
            };
            cformat!(
                "  {}. <green>{:<12}</green> <dim>{}</dim>\n     {}",
                index + 1,
                classification.to_string(),
                kind,
                classification.triggers().iter().join(", "),
            )
        })
        .join("\n");

    cformat!(
        "<bold>Modes and Hints</bold>\n\n  \
         Checked in this order against the lower-cased prompt; the first match wins.\n  \
         Triggers are regular expressions matched on word boundaries.\n\n{}\n\n  \
         Try one out with <cyan>spur test --prompt \"where is the config loaded\"</cyan>.\n",
        rows,
    )
}

/// How the ultrawork validation command is chosen.
fn projects() -> String {
    let rows = project::MARKERS
        .iter()
        .map(|(marker, kind)| {
            cformat!(
                "  <cyan>{:<16}</cyan> {:<8} <dim>{}</dim>",
                marker,
                kind.to_string(),
                kind.validation_command().unwrap_or_default(),
            )
        })
        .join("\n");

    cformat!(
        "<bold>Validation Commands</bold>\n\n  \
         Ultrawork tells the agent how to validate its work, based on the first marker\n  \
         file found in the working directory:\n\n{}\n\n  \
         Without a marker the agent is told to run <dim>{}</dim>.\n",
        rows,
        project::GENERIC_VALIDATION,
    )
}

const SETTINGS: &str = cstr!("\
<bold>Settings</bold>

  Settings are loaded from these locations; later files override earlier ones:

    <cyan>$CONFIG_DIR/config.yaml</cyan>     <dim>User-level settings</dim>
    <cyan>.spur.yaml</cyan>                  <dim>Project root</dim>

  <dim>$CONFIG_DIR by platform:</dim>
    <dim>Linux:</dim>   <cyan>~/.config/spur</cyan>
    <dim>macOS:</dim>   <cyan>~/Library/Application Support/com.spur.spur</cyan>
    <dim>Windows:</dim> <cyan>%APPDATA%\\spur\\spur</cyan>

  <yellow>version: 1</yellow>
  <yellow>diagnostics:</yellow>
    <yellow>max_chars: 2000</yellow>            <dim># Truncate linter output after this many characters</dim>
    <yellow>linters:</yellow>                   <dim># Linter command per file extension; the file path is appended</dim>
      <yellow>py: \"ruff check --quiet\"</yellow>

  Run <cyan>spur validate</cyan> to see the resolved settings.

<bold>Debugging</bold>

  Set <cyan>SPUR_LOG=debug</cyan> to log each step to stderr.
");
