//! store CLI library
//!
//! This module exports the CLI components for use in the binary and in tests.

pub mod commands;
pub mod exit_code;
pub mod output;
