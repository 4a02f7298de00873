//! # Error Taxonomy
//!
//! Turns enums annotated with HTTP status metadata into error contracts.
//!
//! For each value:
//!
//! - `code` is the declared enum number
//! - `status` is the value's own `status`, else the enum's `default_status`,
//!   else the configured fallback (500 by default)
//! - `reason` is the value's `reason`, else the value name
//! - `message` is the value's `message`, else empty
//!
//! Codes must be unique within an enum, or across the whole schema when the
//! generator is configured with `error_code_scope = "schema"`.
//!
//! [`StatusError`] is the runtime side of the contract: an error value that
//! keeps its identity through `join` and `join_with_message`.
//!
//! ```rust
//! use routegen::taxonomy::StatusError;
//!
//! let not_found = StatusError::new(1, 404, "NOT_FOUND", "");
//! let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing row");
//! let wrapped = not_found.join_with_message("user 42 not found", [io]);
//! assert!(wrapped.is(&not_found));
//! assert_eq!(wrapped.status(), 404);
//! ```

mod emit;
mod runtime;

pub use emit::{
    check_global_codes, emit_enum, emit_schema, ContractOperation, ErrorContract, ErrorDescriptor,
    StatusSource, CONTRACT_OPERATIONS,
};
pub use runtime::StatusError;

#[cfg(test)]
mod tests;
