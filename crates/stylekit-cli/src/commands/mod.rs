//! Subcommand implementations.

pub mod build;
pub mod codegen;
pub mod cssgen;
pub mod init;
pub mod list_artifacts;
pub mod output;
