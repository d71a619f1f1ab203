//! Build script for spur that generates version information.
//!
//! This generates a version string that:
//! - Uses `git describe --always` to get the base version (tag or commit hash)
//! - If the working tree is dirty, appends a content hash of the changed files
//! - Falls back to the crate version when built outside a git checkout

use std::env;
use std::fs;
use std::hash::{DefaultHasher, Hasher as _};
use std::iter;
use std::path::Path;
use std::process::Command;
use std::str::FromStr;

fn main() {
    let version = match compute_version() {
        Ok(version) => version,
        Err(error) => {
            println!("cargo:warning=using crate version: {error}");
            env::var("CARGO_PKG_VERSION").unwrap_or_else(|_| String::from("unknown"))
        }
    };
    println!("cargo:rustc-env=SPUR_VERSION={version}");
}

fn compute_version() -> Result<String, String> {
    let base_version = git_describe()?;
    let changed_files = changed_files()?;

    if changed_files.is_empty() {
        return Ok(base_version);
    }

    let content_hash = content_hash(changed_files)?;
    let short_hash = &content_hash[..7.min(content_hash.len())];

    Ok(format!("{base_version}-{short_hash}"))
}

fn content_hash(mut files: Vec<StatusEntry>) -> Result<String, String> {
    files.sort();
    files.dedup();

    let repo_root = repo_root()?;

    let mut hashes = Vec::new();
    for file in files {
        let path = Path::new(&repo_root).join(file.path);
        let mut hasher = DefaultHasher::new();
        if let Ok(content) = fs::read(&path) {
            hasher.write(path.as_os_str().as_encoded_bytes());
            hasher.write(&content);
            hashes.push(hasher.finish());
        }
    }
    hashes.sort();
    hashes.dedup();

    let mut hasher = DefaultHasher::new();
    for hash in hashes {
        hasher.write_u64(hash);
    }

    Ok(format!("{:x}", hasher.finish()))
}

fn run(prog: &str, argv: &[&str]) -> Result<String, String> {
    let invocation = iter::once(prog)
        .chain(argv.iter().copied())
        .collect::<Vec<_>>()
        .join(" ");

    let output = Command::new(prog)
        .args(argv)
        .output()
        .map_err(|e| format!("failed to execute `{invocation}`: {e}"))?;
    if !output.status.success() {
        return Err(format!("`{invocation}` exited with non-zero status"));
    }

    let output = String::from_utf8(output.stdout)
        .map_err(|e| format!("could not parse output of `{invocation}` as UTF-8: {e}"))?;
    Ok(output.trim_end().to_string())
}

fn git_describe() -> Result<String, String> {
    run("git", &["describe", "--always", "--tags", "--dirty=-dirty"])
}

fn repo_root() -> Result<String, String> {
    run("git", &["rev-parse", "--show-toplevel"])
}

fn changed_files() -> Result<Vec<StatusEntry>, String> {
    run("git", &["status", "--porcelain"])?
        .lines()
        .map(str::parse::<StatusEntry>)
        .collect()
}

/// One line of `git status --porcelain`; only the path feeds the hash, the
/// status columns are kept so entries sort and dedup deterministically.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
struct StatusEntry {
    status: String,
    path: String,
}

impl FromStr for StatusEntry {
    type Err = String;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let (status, rest) = line
            .split_at_checked(3)
            .ok_or_else(|| format!("status line too short: {line:?}"))?;

        // Renames and copies are reported as `old -> new`; the new path is the
        // one that exists on disk.
        let path = match rest.split_once(" -> ") {
            Some((_, new)) => new,
            None => rest,
        };

        Ok(StatusEntry {
            status: status.trim_end().to_string(),
            path: path.to_string(),
        })
    }
}
