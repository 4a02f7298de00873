//! # CLI Module
//!
//! Command-line front end of the `routegen` binary.
//!
//! ## Commands
//!
//! ### `generate`
//!
//! ```bash
//! routegen generate --schema api.yaml --output gen --format yaml --report
//! ```
//!
//! Writes `routegen.json` (or `routegen.yaml`) into the output directory. If
//! any method fails the run exits with status 1 and writes nothing, unless
//! `--allow-partial` is given.
//!
//! ### `check`
//!
//! ```bash
//! routegen check --schema api.yaml
//! ```
//!
//! Runs the full pipeline without writing and reports every issue.
//!
//! ### `inspect`
//!
//! ```bash
//! routegen inspect --schema api.yaml
//! routegen inspect --schema api.yaml --dump json
//! ```
//!
//! ## Configuration
//!
//! Every command reads `routegen.toml` next to the schema (or `--config`), then
//! applies `--options-key`, `--fallback-status`, `--unmapped`,
//! `--error-code-scope` and `--max-depth`.

mod commands;

pub use commands::{run, Cli, Commands, ConfigArgs};

#[cfg(test)]
mod tests;
