//! Command-line driver for the inventory store.
//!
//! Configuration comes from the environment; the binary runs the demonstration
//! sequence against a fresh store, saves it, prints the report and finally
//! offers the literal prompt.

pub mod config;
pub mod demo;
pub mod literal;

pub use config::{Config, ConfigError};
pub use demo::{DemoSummary, run_demo};
pub use literal::{Literal, LiteralError, parse_literal, prompt_literal};
