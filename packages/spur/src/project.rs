//! Project-type sniffing from marker files.

use std::path::Path;

use derive_more::Display;
use tap::Tap;

/// The kind of project found in a directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum ProjectKind {
    /// A JavaScript or TypeScript package (`package.json`).
    #[display("node")]
    Node,

    /// A Python project (`pyproject.toml`).
    #[display("python")]
    Python,

    /// A Go module (`go.mod`).
    #[display("go")]
    Go,

    /// A Rust crate or workspace (`Cargo.toml`).
    #[display("rust")]
    Rust,

    /// A project driven by a `Makefile`.
    #[display("make")]
    Make,

    /// Nothing recognized.
    #[display("generic")]
    Generic,
}

/// Validation suggestion when no marker file is present.
pub const GENERIC_VALIDATION: &str = "the project's build and test commands";

/// Marker files in the order they are checked.
///
/// The first marker present decides the project kind, even if later markers
/// are present too: a repository with both `package.json` and `go.mod` is a
/// [`ProjectKind::Node`] project.
pub const MARKERS: &[(&str, ProjectKind)] = &[
    ("package.json", ProjectKind::Node),
    ("pyproject.toml", ProjectKind::Python),
    ("go.mod", ProjectKind::Go),
    ("Cargo.toml", ProjectKind::Rust),
    ("Makefile", ProjectKind::Make),
];

impl ProjectKind {
    /// The command that validates work in this kind of project, if known.
    pub fn validation_command(self) -> Option<&'static str> {
        match self {
            ProjectKind::Node => Some("npm run build && npm test"),
            ProjectKind::Python => Some("python -m pytest"),
            ProjectKind::Go => Some("go build ./... && go test ./..."),
            ProjectKind::Rust => Some("cargo build && cargo test"),
            ProjectKind::Make => Some("make && make test"),
            ProjectKind::Generic => None,
        }
    }

    /// How to validate work in this kind of project, phrased for a sentence.
    pub fn validation_suggestion(self) -> String {
        match self.validation_command() {
            Some(command) => format!("`{command}`"),
            None => String::from(GENERIC_VALIDATION),
        }
    }

    /// The language server for this kind of project, with its install command.
    pub fn language_server(self) -> Option<LanguageServer> {
        let (name, install) = match self {
            ProjectKind::Node => (
                "typescript-language-server",
                "npm install -g typescript-language-server typescript",
            ),
            ProjectKind::Python => ("pyright", "npm install -g pyright"),
            ProjectKind::Go => ("gopls", "go install golang.org/x/tools/gopls@latest"),
            ProjectKind::Rust => ("rust-analyzer", "rustup component add rust-analyzer"),
            ProjectKind::Make | ProjectKind::Generic => return None,
        };
        Some(LanguageServer { name, install })
    }
}

/// A language server and the command that installs it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LanguageServer {
    /// The executable name.
    pub name: &'static str,

    /// A shell command that installs it.
    pub install: &'static str,
}

/// Determine the project kind of `dir` from the marker files it contains.
///
/// Failing to check a marker (for example, permission denied) counts as the
/// marker being absent.
#[tracing::instrument]
pub fn sniff(dir: &Path) -> ProjectKind {
    MARKERS
        .iter()
        .find(|(marker, _)| is_present(&dir.join(marker)))
        .map(|(_, kind)| *kind)
        .unwrap_or(ProjectKind::Generic)
        .tap(|kind| tracing::debug!(%kind, "project.sniffed"))
}

fn is_present(path: &Path) -> bool {
    match path.try_exists() {
        Ok(exists) => exists,
        Err(error) => {
            tracing::debug!(?error, ?path, "project.marker.unreadable");
            false
        }
    }
}
