//! Raw schema document as handed over by the schema compiler.
//!
//! These types mirror the compiled descriptor graph one-to-one and carry
//! extension fields as untyped JSON values. Nothing outside the loader reads
//! them.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Extension fields attached to a schema element, keyed by extension name
pub type Extensions = BTreeMap<String, Value>;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawSchema {
    #[serde(default)]
    pub package: String,
    #[serde(default)]
    pub services: Vec<RawService>,
    #[serde(default)]
    pub messages: Vec<RawMessage>,
    #[serde(default)]
    pub enums: Vec<RawEnum>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawService {
    pub name: String,
    #[serde(default)]
    pub extensions: Extensions,
    #[serde(default)]
    pub methods: Vec<RawMethod>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawMethod {
    pub name: String,
    pub input_type: String,
    pub output_type: String,
    #[serde(default)]
    pub extensions: Extensions,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawMessage {
    pub name: String,
    #[serde(default)]
    pub extensions: Extensions,
    #[serde(default)]
    pub oneofs: Vec<RawOneof>,
    #[serde(default)]
    pub fields: Vec<RawField>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawOneof {
    pub name: String,
    #[serde(default)]
    pub extensions: Extensions,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawField {
    pub name: String,
    pub number: u32,
    /// Scalar type name (`string`, `int64`, ...)
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub ty: Option<String>,
    /// Message or enum type reference
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub type_name: Option<String>,
    /// `optional`, `required` or `repeated`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub json_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub oneof: Option<String>,
    #[serde(default)]
    pub extensions: Extensions,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawEnum {
    pub name: String,
    #[serde(default)]
    pub extensions: Extensions,
    #[serde(default)]
    pub values: Vec<RawEnumValue>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawEnumValue {
    pub name: String,
    pub number: i32,
    #[serde(default)]
    pub extensions: Extensions,
}

/// Value of the `http` method extension
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawHttpRule {
    #[serde(default)]
    pub get: Option<String>,
    #[serde(default)]
    pub post: Option<String>,
    #[serde(default)]
    pub put: Option<String>,
    #[serde(default)]
    pub delete: Option<String>,
    #[serde(default)]
    pub patch: Option<String>,
    #[serde(default)]
    pub custom: Option<RawCustomPattern>,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub response_body: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawCustomPattern {
    pub kind: String,
    pub path: String,
}

/// One entry of the `extra` method extension
///
/// Exactly one of the value fields must be set.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawOption {
    pub key: String,
    #[serde(default)]
    pub flag: Option<bool>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub number: Option<f64>,
    #[serde(default)]
    pub map: Option<BTreeMap<String, String>>,
}
