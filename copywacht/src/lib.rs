// copywacht/src/lib.rs
//! # copywacht CLI
//!
//! This crate provides the command-line interface over `copywacht-core`:
//! argument parsing, logger bootstrap, per-subcommand runners and the
//! exit-code contract CI depends on.

pub mod cli;
pub mod commands;
pub mod logger;
pub mod ui;
