//! Core library for the `loadrig` CLI.
//!
//! This crate provides the building blocks used by the binary: CLI argument
//! types, configuration parsing, session validation, the HTTP transport,
//! closed-loop load workers, and statistics aggregation. The primary
//! user-facing interface is the `loadrig` command-line application; library
//! APIs may evolve as the CLI grows.
pub mod args;
pub mod config;
pub mod error;
pub mod http;
pub mod load;
pub mod metrics;
pub mod session;
pub mod shutdown;
pub mod shutdown_handlers;
