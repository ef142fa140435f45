//! CLI subcommand implementations.

pub mod demo;
pub mod pricing;
pub mod send_email;
