//! Settings file discovery and YAML parsing.

use std::{
    collections::BTreeMap,
    ffi::OsStr,
    fs::read_to_string,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use color_eyre::{
    SectionExt,
    eyre::{Context, Result},
};
use directories::ProjectDirs;
use monostate::MustBe;
use serde::{Deserialize, Serialize};
use tap::Tap;

use crate::diagnostics;

/// Name of the project-level settings file, relative to the hook's `cwd`.
pub const PROJECT_FILE: &str = ".spur.yaml";

/// Name of the user-level settings file inside the config directory.
pub const USER_FILE: &str = "config.yaml";

/// Get the project directories for the application.
#[tracing::instrument]
pub fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "spur", "spur")
}

/// A settings file as written on disk.
///
/// Every setting is optional; unset values fall back to earlier files and
/// finally to the built-in defaults.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SettingsFile {
    /// Schema version; only version 1 exists.
    pub version: MustBe!(1),

    /// Diagnostics hook settings.
    #[serde(default)]
    pub diagnostics: DiagnosticsFile,
}

/// The `diagnostics` section of a settings file.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DiagnosticsFile {
    /// Truncation ceiling for linter output, in characters.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_chars: Option<usize>,

    /// Linter command lines keyed by file extension.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub linters: BTreeMap<String, String>,
}

/// Settings after every file has been applied over the defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Settings {
    /// Diagnostics hook settings.
    pub diagnostics: DiagnosticsSettings,
}

/// Resolved diagnostics settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiagnosticsSettings {
    /// Truncation ceiling for linter output, in characters.
    pub max_chars: usize,

    /// Linter command lines keyed by file extension.
    pub linters: BTreeMap<String, String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            diagnostics: DiagnosticsSettings {
                max_chars: diagnostics::DEFAULT_MAX_CHARS,
                linters: diagnostics::builtin_linters(),
            },
        }
    }
}

impl Settings {
    /// Apply a settings file over these settings.
    ///
    /// Scalar values replace the current ones; linters are merged by
    /// extension.
    pub fn apply(mut self, file: SettingsFile) -> Self {
        if let Some(max_chars) = file.diagnostics.max_chars {
            self.diagnostics.max_chars = max_chars;
        }
        self.diagnostics.linters.extend(file.diagnostics.linters);
        self
    }
}

/// The settings files consulted for a project, in the order they apply.
///
/// Files that do not exist are included; they load as empty.
pub fn sources(cwd: &Path) -> Vec<PathBuf> {
    let mut sources = vec![];
    if let Some(dirs) = project_dirs() {
        sources.push(dirs.config_dir().join(USER_FILE));
    }
    sources.push(cwd.join(PROJECT_FILE));
    sources
}

/// Load settings for a project.
///
/// Loading order (later files override earlier ones):
/// 1. User-level settings from `ProjectDirs::config_dir()/config.yaml` if it exists
/// 2. `.spur.yaml` in `cwd` if it exists
#[tracing::instrument]
pub fn load(cwd: &Path) -> Result<Settings> {
    load_attributed(cwd).map(|(settings, _)| settings)
}

/// Load settings for a project, along with the files that contributed.
#[tracing::instrument]
pub fn load_attributed(cwd: &Path) -> Result<(Settings, Vec<PathBuf>)> {
    let mut settings = Settings::default();
    let mut loaded = vec![];

    for path in sources(cwd) {
        let file = load_from(&path).with_context(|| format!("load settings from: {path:?}"))?;
        if let Some(file) = file {
            settings = settings.apply(file);
            loaded.push(path);
        }
    }

    tracing::debug!(?settings, ?loaded, "settings.resolved");
    Ok((settings, loaded))
}

/// Load a single settings file.
///
/// Returns `None` if the file does not exist or is not a YAML file.
#[tracing::instrument]
pub fn load_from(path: &Path) -> Result<Option<SettingsFile>> {
    if path.extension() != Some(OsStr::new("yaml")) {
        tracing::debug!("skipping non-yaml file");
        return Ok(None);
    }

    let content = match read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e).context(format!("read settings file: {path:?}")),
    };

    serde_yaml::from_str::<SettingsFile>(&content)
        .with_context(|| format!("parse settings file: {path:?}"))
        .with_context(|| content.header("File content:"))
        .tap(|file| tracing::debug!(?file, "parsed settings file"))
        .map(Some)
}
