//! CLI subcommands.

pub mod build;
pub mod hmr;
pub mod types;
