use serde::Serialize;
use std::collections::BTreeMap;

use crate::error::{ErrorKind, GenerationError, SchemaLocation};
use crate::schema::{Enum, Schema};

/// Where a value's HTTP status came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusSource {
    Value,
    Enum,
    Fallback,
}

/// Effective error metadata for one enum value
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorDescriptor {
    pub enum_name: String,
    pub name: String,
    pub code: i32,
    pub status: u16,
    pub reason: String,
    pub message: String,
    pub status_source: StatusSource,
}

/// Composition operation every generated error type exposes
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContractOperation {
    pub name: &'static str,
    pub params: &'static [&'static str],
    /// Whether the result carries a new message instead of the original one
    pub replaces_message: bool,
}

/// Operations of the error-type contract
pub const CONTRACT_OPERATIONS: &[ContractOperation] = &[
    ContractOperation {
        name: "join",
        params: &["causes..."],
        replaces_message: false,
    },
    ContractOperation {
        name: "join_with_message",
        params: &["message", "causes..."],
        replaces_message: true,
    },
    ContractOperation {
        name: "is",
        params: &["target"],
        replaces_message: false,
    },
];

/// Error-type contract emitted for one enum
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorContract {
    pub enum_name: String,
    pub values: Vec<ErrorDescriptor>,
    pub operations: Vec<ContractOperation>,
}

impl ErrorContract {
    pub fn value(&self, name: &str) -> Option<&ErrorDescriptor> {
        self.values.iter().find(|v| v.name == name)
    }
}

/// Build the error contract for one enum
///
/// # Errors
///
/// `DuplicateErrorCode` when two values of the enum share a code.
pub fn emit_enum(e: &Enum, fallback_status: u16) -> Result<ErrorContract, GenerationError> {
    let mut seen: BTreeMap<i32, &str> = BTreeMap::new();
    let mut values = Vec::with_capacity(e.values.len());

    for value in &e.values {
        if let Some(first) = seen.insert(value.number, &value.name) {
            return Err(GenerationError::new(
                ErrorKind::DuplicateErrorCode,
                SchemaLocation::enumeration(&e.name).value(&value.name),
                format!("code {} is already used by {first}", value.number),
            ));
        }

        let (status, status_source) = value
            .status
            .map(|s| (s, StatusSource::Value))
            .or_else(|| e.default_status.map(|s| (s, StatusSource::Enum)))
            .unwrap_or((fallback_status, StatusSource::Fallback));

        values.push(ErrorDescriptor {
            enum_name: e.name.clone(),
            name: value.name.clone(),
            code: value.number,
            status,
            reason: value
                .reason
                .clone()
                .filter(|r| !r.is_empty())
                .unwrap_or_else(|| value.name.clone()),
            message: value.message.clone().unwrap_or_default(),
            status_source,
        });
    }

    Ok(ErrorContract {
        enum_name: e.name.clone(),
        values,
        operations: CONTRACT_OPERATIONS.to_vec(),
    })
}

/// Build contracts for every error enum in the schema
///
/// Enums without taxonomy metadata are plain data enums and are skipped.
/// Failing enums are reported and left out; the rest are still emitted.
pub fn emit_schema(schema: &Schema, fallback_status: u16) -> (Vec<ErrorContract>, Vec<GenerationError>) {
    let mut contracts = Vec::new();
    let mut failures = Vec::new();
    for e in schema.enums.iter().filter(|e| e.is_error_enum()) {
        match emit_enum(e, fallback_status) {
            Ok(contract) => contracts.push(contract),
            Err(err) => failures.push(err),
        }
    }
    (contracts, failures)
}

/// Check code uniqueness across every emitted contract
pub fn check_global_codes(contracts: &[ErrorContract]) -> Vec<GenerationError> {
    let mut seen: BTreeMap<i32, (&str, &str)> = BTreeMap::new();
    let mut errors = Vec::new();
    for value in contracts.iter().flat_map(|c| &c.values) {
        match seen.get(&value.code) {
            Some((enum_name, name)) => errors.push(GenerationError::new(
                ErrorKind::DuplicateErrorCode,
                SchemaLocation::enumeration(&value.enum_name).value(&value.name),
                format!(
                    "code {} is already used by {enum_name}.{name}",
                    value.code
                ),
            )),
            None => {
                seen.insert(value.code, (value.enum_name.as_str(), value.name.as_str()));
            }
        }
    }
    errors
}
