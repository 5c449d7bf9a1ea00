//! CLI commands.

pub mod build;
pub mod convert;
pub mod init;
