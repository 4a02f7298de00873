//! # routegen
//!
//! **routegen** turns an interface definition (services, messages and enums
//! annotated with transport metadata) into the artifacts a backend is built
//! against: operation identifiers, router-native routes, per-field request
//! bindings with their struct tags, server interfaces, registration tables and
//! error contracts.
//!
//! ## Architecture
//!
//! - **[`schema`]** - Loads the annotated schema document into an immutable IR
//! - **[`binding`]** - Resolves where each request field is read from and its tag set
//! - **[`path`]** - Translates IDL path templates into router-native patterns
//! - **[`taxonomy`]** - Derives error contracts from annotated enums
//! - **[`generator`]** - Assembles everything into the [`generator::Artifacts`] bundle
//! - **[`config`]** - `routegen.toml` settings
//! - **[`cli`]** - The `routegen` command line
//!
//! ### Generation Flow
//!
//! ```mermaid
//! sequenceDiagram
//!     participant User
//!     participant CLI as CLI<br/>(routegen)
//!     participant Load as schema::load_schema
//!     participant Gen as generator::generate
//!     participant Path as path::translate
//!     participant Bind as binding::resolve_message
//!     participant Tax as taxonomy::emit_schema
//!     participant FS as File System
//!
//!     User->>CLI: routegen generate --schema api.yaml
//!     CLI->>Load: load_schema(&raw)
//!     Load->>Load: Check extension placement,<br/>resolve type references
//!     Load-->>CLI: Schema (or SchemaIssues)
//!     CLI->>Gen: generate(&schema, &config)
//!     loop every method
//!         Gen->>Path: translate(template)
//!         Path-->>Gen: PathTemplate
//!         Gen->>Bind: resolve_message(request)
//!         Bind-->>Gen: Vec<FieldBinding>
//!     end
//!     Gen->>Tax: emit_schema(&schema)
//!     Tax-->>Gen: Vec<ErrorContract>
//!     Gen->>Gen: Reduce: duplicate ids,<br/>route conflicts, error codes
//!     Gen-->>CLI: Generation
//!     CLI->>FS: routegen.json / routes.txt
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use routegen::config::GeneratorConfig;
//! use routegen::generator::generate;
//! use routegen::schema::{load_schema, parse_schema_str};
//!
//! let raw = parse_schema_str(
//!     r#"
//! package: demo.v1
//! services:
//!   - name: UserService
//!     methods:
//!       - name: GetUser
//!         input_type: GetUserRequest
//!         output_type: User
//!         extensions:
//!           http: { get: "/users/{user_id}" }
//! messages:
//!   - name: GetUserRequest
//!     fields:
//!       - { name: user_id, number: 1, type: string }
//!   - name: User
//!     fields:
//!       - { name: id, number: 1, type: string }
//! "#,
//!     true,
//! )
//! .unwrap();
//!
//! let schema = load_schema(&raw).unwrap();
//! let generation = generate(&schema, &GeneratorConfig::default()).unwrap();
//! let route = generation.artifacts.registration("demo.v1.UserService/GetUser").unwrap();
//! assert_eq!(route.pattern.as_deref(), Some("/users/:user_id"));
//! ```
//!
//! ## Errors
//!
//! Every failure is a [`error::GenerationError`] carrying an
//! [`error::ErrorKind`] and the schema location it belongs to. A failing method
//! is dropped from every table while the others are still generated; failures
//! that span methods abort the run.
//!
//! ## Logging
//!
//! The binary logs through `tracing` to stderr. See [`logging`] for the
//! `ROUTEGEN_LOG_*` variables.

pub mod binding;
pub mod cli;
pub mod config;
pub mod error;
pub mod generator;
pub mod logging;
pub mod path;
pub mod schema;
pub mod taxonomy;

pub use config::GeneratorConfig;
pub use error::{ErrorKind, GenerationError, SchemaIssues, SchemaLocation};
pub use generator::{generate, Artifacts, Generation};
pub use schema::{load_schema, load_schema_file, Schema};
