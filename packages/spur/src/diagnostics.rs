//! Run a linter against a file the agent just edited.
//!
//! Linters are optional collaborators: when the configured program is not
//! installed the file is silently skipped. Whatever the linter prints is
//! passed through verbatim, truncated to a fixed number of characters.

use std::{
    collections::BTreeMap,
    io,
    path::Path,
    process::{Command, Output},
};

use color_eyre::{
    Result,
    eyre::{Context, bail, eyre},
};
use itertools::Itertools;

/// Default truncation ceiling for diagnostics, in characters.
pub const DEFAULT_MAX_CHARS: usize = 2000;

/// Appended to diagnostics that were cut at the ceiling.
pub const TRUNCATION_MARKER: &str = "\n... (truncated)";

/// Linters used when settings do not override them, keyed by file extension.
pub fn builtin_linters() -> BTreeMap<String, String> {
    [
        ("sh", "shellcheck -f gcc"),
        ("bash", "shellcheck -f gcc"),
        ("py", "ruff check --quiet"),
        ("js", "eslint --format unix"),
        ("jsx", "eslint --format unix"),
        ("ts", "eslint --format unix"),
        ("tsx", "eslint --format unix"),
        ("go", "gofmt -l -e"),
        ("json", "jq empty"),
        ("yaml", "yamllint -f parsable"),
        ("yml", "yamllint -f parsable"),
    ]
    .into_iter()
    .map(|(ext, command)| (ext.to_string(), command.to_string()))
    .collect()
}

/// Truncate `text` to at most `max_chars` characters.
///
/// Text at or under the ceiling is returned unchanged; longer text is cut at
/// the ceiling and [`TRUNCATION_MARKER`] is appended.
pub fn truncate(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        None => text.to_string(),
        Some((cut, _)) => format!("{}{TRUNCATION_MARKER}", &text[..cut]),
    }
}

/// A linter command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Linter {
    /// The program to run.
    pub program: String,

    /// Arguments passed before the file path.
    pub args: Vec<String>,
}

impl Linter {
    /// Parse a linter from a shell-style command line.
    pub fn parse(command: &str) -> Result<Self> {
        let mut words = shell_words::split(command)
            .with_context(|| format!("parse linter command: {command:?}"))?
            .into_iter();
        let program = words
            .next()
            .ok_or_else(|| eyre!("linter command is empty"))?;
        Ok(Self {
            program,
            args: words.collect(),
        })
    }

    /// Select the linter configured for the extension of `file`.
    pub fn for_file(file: &Path, linters: &BTreeMap<String, String>) -> Result<Option<Self>> {
        let Some(ext) = file.extension().and_then(|ext| ext.to_str()) else {
            return Ok(None);
        };
        linters
            .get(&ext.to_lowercase())
            .map(|command| Self::parse(command))
            .transpose()
    }

    /// The command line as it would be typed, without the file argument.
    pub fn command_line(&self) -> String {
        std::iter::once(&self.program)
            .chain(&self.args)
            .map(|word| shell_words::quote(word))
            .join(" ")
    }

    /// Run the linter against `file` from `cwd`.
    ///
    /// Returns `Ok(None)` if the linter is not installed.
    /// A missing `cwd` is an error rather than a missing linter.
    #[tracing::instrument]
    pub fn run(&self, cwd: &Path, file: &Path) -> Result<Option<Output>> {
        if !cwd.is_dir() {
            bail!("working directory does not exist: {cwd:?}");
        }

        let result = Command::new(&self.program)
            .args(&self.args)
            .arg(file)
            .current_dir(cwd)
            .output();
        match result {
            Ok(output) => Ok(Some(output)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(program = %self.program, "linter.not_installed");
                Ok(None)
            }
            Err(err) => Err(err).with_context(|| format!("run linter {:?}", self.program)),
        }
    }
}

/// Summarize linter output into diagnostics for the agent.
///
/// Returns `None` when the linter printed nothing and exited successfully.
pub fn report(linter: &Linter, output: &Output, max_chars: usize) -> Option<String> {
    // Only trailing line breaks are dropped; indentation is often meaningful.
    let combined = [&output.stdout, &output.stderr]
        .into_iter()
        .map(|stream| String::from_utf8_lossy(stream))
        .filter(|stream| !stream.trim().is_empty())
        .map(|stream| stream.trim_end_matches(['\n', '\r']).to_string())
        .join("\n");

    if !combined.is_empty() {
        return Some(truncate(&combined, max_chars));
    }
    if !output.status.success() {
        let status = output
            .status
            .code()
            .map(|code| code.to_string())
            .unwrap_or_else(|| String::from("unknown"));
        return Some(format!(
            "`{}` exited with status {status}",
            linter.command_line()
        ));
    }
    None
}

/// Lint `file` with the configured linter and return the diagnostics text.
///
/// Returns `None` when the file has no linter, the linter is not installed,
/// the linter could not be started, or it reported nothing.
#[tracing::instrument(skip(linters))]
pub fn lint(
    cwd: &Path,
    file: &Path,
    linters: &BTreeMap<String, String>,
    max_chars: usize,
) -> Result<Option<String>> {
    let Some(linter) = Linter::for_file(file, linters)? else {
        tracing::debug!("diagnostics.no_linter");
        return Ok(None);
    };

    let output = match linter.run(cwd, file) {
        Ok(Some(output)) => output,
        Ok(None) => return Ok(None),
        Err(err) => {
            tracing::warn!(?err, "diagnostics.spawn_failed");
            return Ok(None);
        }
    };

    let diagnostics = report(&linter, &output, max_chars);
    tracing::debug!(?diagnostics, "diagnostics.report");
    Ok(diagnostics)
}

/// Frame diagnostics for the agent.
pub fn context_for(file: &Path, diagnostics: &str) -> String {
    format!(
        "Diagnostics for {}:\n{diagnostics}\n\nFix these issues before moving on.",
        file.display()
    )
}
