//! # Generator Module
//!
//! Assembles the loaded schema, resolved bindings, translated paths and error
//! contracts into the artifact bundle a backend is generated from.
//!
//! ## Pipeline
//!
//! ```text
//! Schema ─┬─ per method ─► path::translate ─► binding::resolve_message ─► OperationDescriptor
//!         └─ per enum ───► taxonomy::emit_enum ───────────────────────────► ErrorContract
//!                                      │
//!                                      ▼
//!                     reduction (duplicate ids, route conflicts, codes)
//!                                      │
//!                                      ▼
//!                                  Artifacts
//! ```
//!
//! ## Artifacts
//!
//! - **Operations** - operation id, handler name, route, decode and encode contracts
//! - **Interfaces** - per-service method signatures
//! - **Registrations** - operation id to handler, verb and router pattern
//! - **Extra data** - generic method options keyed by operation id
//! - **Errors** - one error contract per annotated enum
//!
//! ## Failure Policy
//!
//! A method that fails (bad path, conflicting binding, unresolved selector)
//! is reported in [`Generation::failures`] and appears in no table. Failures
//! spanning several methods abort the run with [`SchemaIssues`](crate::error::SchemaIssues).
//!
//! ## Usage
//!
//! ```rust,ignore
//! use routegen::config::GeneratorConfig;
//! use routegen::generator::{generate, write_artifacts, OutputFormat};
//! use routegen::schema::{load_schema, load_schema_file};
//!
//! let raw = load_schema_file("api.yaml".as_ref())?;
//! let schema = load_schema(&raw)?;
//! let generation = generate(&schema, &GeneratorConfig::default())?;
//! write_artifacts("gen".as_ref(), &generation.artifacts, OutputFormat::Json)?;
//! ```

mod artifacts;
mod generate;
mod operation;
mod reduce;
mod templates;
mod write;

pub use artifacts::*;
pub use generate::{generate, Generation};
pub use operation::{operation_id, to_snake_case};
pub use templates::{render_report, ErrorRow, RouteReportTemplate, RouteRow};
pub use write::{serialize_artifacts, write_artifacts, write_report, OutputFormat};
