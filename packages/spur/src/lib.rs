//! Main library for Spur, used by its CLI.

pub mod claude;
pub mod classify;
pub mod context;
pub mod diagnostics;
pub mod project;
pub mod settings;
pub mod snippet;
pub mod template;
pub mod todos;
