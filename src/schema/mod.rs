//! # Schema IR Loader
//!
//! Turns the compiled schema document (services, messages, enums and their
//! extension fields) into the normalized, immutable [`Schema`] IR every later
//! pass reads.
//!
//! The loader performs no I/O of its own: [`load_schema`] works on an already
//! parsed [`RawSchema`]. [`load_schema_file`] is a convenience for the CLI.
//!
//! ## Extensions
//!
//! Extensions are validated against a fixed catalogue (see [`extensions`]). A
//! known extension attached to the wrong element kind, or carrying a value that
//! does not decode, is reported as `MalformedSchema`. Unknown extensions are
//! ignored so schemas annotated for other plugins still load.

pub mod extensions;
mod load;
mod raw;
mod types;

pub use load::*;
pub use raw::*;
pub use types::*;
