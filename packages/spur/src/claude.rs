//! Integration with Claude Code.

pub mod hook;
