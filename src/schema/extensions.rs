//! Catalogue of the custom extensions the generator understands.
//!
//! Each extension may only be attached to certain element kinds. Extensions
//! not listed here belong to other plugins and pass through untouched.

use serde::de::DeserializeOwned;
use serde_json::Value;
use std::fmt;
use tracing::debug;

use super::raw::Extensions;
use super::types::Location;
use crate::error::{GenerationError, SchemaLocation};

/// Schema element kinds an extension can be attached to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementKind {
    Service,
    Method,
    Message,
    Oneof,
    Field,
    Enum,
    EnumValue,
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ElementKind::Service => "service",
            ElementKind::Method => "method",
            ElementKind::Message => "message",
            ElementKind::Oneof => "oneof",
            ElementKind::Field => "field",
            ElementKind::Enum => "enum",
            ElementKind::EnumValue => "enum value",
        };
        f.write_str(s)
    }
}

/// A known extension and the element kinds it may decorate
#[derive(Debug, Clone, Copy)]
pub struct ExtensionDef {
    pub name: &'static str,
    pub kinds: &'static [ElementKind],
}

pub const HTTP: &str = "http";
pub const EXTRA: &str = "extra";
pub const LOCATION: &str = "location";
pub const TAG: &str = "tag";
pub const AUTO_TAGS: &str = "auto_tags";
pub const DEFAULT_LOCATION: &str = "default_location";
pub const DEFAULT_AUTO_TAGS: &str = "default_auto_tags";
pub const DEFAULT_STATUS: &str = "default_status";
pub const STATUS: &str = "status";
pub const REASON: &str = "reason";
pub const MESSAGE: &str = "message";

pub const CATALOGUE: &[ExtensionDef] = &[
    ExtensionDef { name: HTTP, kinds: &[ElementKind::Method] },
    ExtensionDef { name: EXTRA, kinds: &[ElementKind::Method] },
    ExtensionDef { name: LOCATION, kinds: &[ElementKind::Field] },
    ExtensionDef { name: TAG, kinds: &[ElementKind::Field] },
    ExtensionDef { name: AUTO_TAGS, kinds: &[ElementKind::Field] },
    ExtensionDef {
        name: DEFAULT_LOCATION,
        kinds: &[ElementKind::Message, ElementKind::Oneof],
    },
    ExtensionDef {
        name: DEFAULT_AUTO_TAGS,
        kinds: &[ElementKind::Message, ElementKind::Oneof],
    },
    ExtensionDef { name: DEFAULT_STATUS, kinds: &[ElementKind::Enum] },
    ExtensionDef { name: STATUS, kinds: &[ElementKind::EnumValue] },
    ExtensionDef { name: REASON, kinds: &[ElementKind::EnumValue] },
    ExtensionDef { name: MESSAGE, kinds: &[ElementKind::EnumValue] },
];

pub fn lookup(name: &str) -> Option<&'static ExtensionDef> {
    CATALOGUE.iter().find(|def| def.name == name)
}

/// Report every known extension attached to an element kind it does not support
pub fn check_placement(
    kind: ElementKind,
    extensions: &Extensions,
    location: &SchemaLocation,
    issues: &mut Vec<GenerationError>,
) {
    for name in extensions.keys() {
        match lookup(name) {
            Some(def) if def.kinds.contains(&kind) => {}
            Some(def) => {
                let allowed: Vec<String> = def.kinds.iter().map(|k| k.to_string()).collect();
                issues.push(GenerationError::malformed(
                    location.clone().extension(name),
                    format!(
                        "extension '{}' cannot be attached to a {kind} (allowed on: {})",
                        def.name,
                        allowed.join(", ")
                    ),
                ));
            }
            None => debug!(extension = %name, %location, "Ignoring unknown extension"),
        }
    }
}

/// Decode an extension value into `T`, reporting a `MalformedSchema` issue on failure
pub fn decode<T: DeserializeOwned>(
    extensions: &Extensions,
    name: &str,
    location: &SchemaLocation,
    issues: &mut Vec<GenerationError>,
) -> Option<T> {
    let value = extensions.get(name)?;
    match serde_json::from_value::<T>(value.clone()) {
        Ok(v) => Some(v),
        Err(err) => {
            issues.push(GenerationError::malformed(
                location.clone().extension(name),
                format!("invalid value for extension '{name}': {err}"),
            ));
            None
        }
    }
}

/// Decode a binding-location extension (`URI`, `QUERY`, `BODY`, `HEADER`, `FORM`)
pub fn decode_location(
    extensions: &Extensions,
    name: &str,
    location: &SchemaLocation,
    issues: &mut Vec<GenerationError>,
) -> Option<Location> {
    let raw: String = decode(extensions, name, location, issues)?;
    match raw.parse::<Location>() {
        Ok(loc) => Some(loc),
        Err(msg) => {
            issues.push(GenerationError::malformed(
                location.clone().extension(name),
                msg,
            ));
            None
        }
    }
}

/// Decode an HTTP status extension, accepting numbers and numeric strings
pub fn decode_status(
    extensions: &Extensions,
    name: &str,
    location: &SchemaLocation,
    issues: &mut Vec<GenerationError>,
) -> Option<u16> {
    let value = extensions.get(name)?;
    let status = match value {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse::<u64>().ok(),
        _ => None,
    };
    match status {
        Some(code) if (100..=599).contains(&code) => Some(code as u16),
        _ => {
            issues.push(GenerationError::malformed(
                location.clone().extension(name),
                format!("'{value}' is not an HTTP status code (100-599)"),
            ));
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use serde_json::json;

    fn exts(pairs: &[(&str, Value)]) -> Extensions {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn test_location_extension_on_service_is_malformed() {
        let mut issues = Vec::new();
        let loc = SchemaLocation::service("UserService");
        check_placement(
            ElementKind::Service,
            &exts(&[(LOCATION, json!("URI"))]),
            &loc,
            &mut issues,
        );
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].kind, ErrorKind::MalformedSchema);
        assert!(issues[0].message.contains("cannot be attached to a service"));
    }

    #[test]
    fn test_unknown_extensions_are_ignored() {
        let mut issues = Vec::new();
        check_placement(
            ElementKind::Field,
            &exts(&[("validate.rules", json!({"min_len": 1}))]),
            &SchemaLocation::message("M").field("f"),
            &mut issues,
        );
        assert!(issues.is_empty());
    }

    #[test]
    fn test_default_location_allowed_on_message_and_oneof() {
        let mut issues = Vec::new();
        let e = exts(&[(DEFAULT_LOCATION, json!("QUERY"))]);
        check_placement(ElementKind::Message, &e, &SchemaLocation::message("M"), &mut issues);
        check_placement(
            ElementKind::Oneof,
            &e,
            &SchemaLocation::message("M").oneof("o"),
            &mut issues,
        );
        assert!(issues.is_empty());
    }

    #[test]
    fn test_decode_status_range() {
        let mut issues = Vec::new();
        let loc = SchemaLocation::enumeration("E");
        assert_eq!(
            decode_status(&exts(&[(STATUS, json!(404))]), STATUS, &loc, &mut issues),
            Some(404)
        );
        assert_eq!(
            decode_status(&exts(&[(STATUS, json!("503"))]), STATUS, &loc, &mut issues),
            Some(503)
        );
        assert!(issues.is_empty());
        assert_eq!(
            decode_status(&exts(&[(STATUS, json!(42))]), STATUS, &loc, &mut issues),
            None
        );
        assert_eq!(issues.len(), 1);
    }

    #[test]
    fn test_decode_location_rejects_unknown() {
        let mut issues = Vec::new();
        let loc = SchemaLocation::message("M").field("f");
        assert_eq!(
            decode_location(&exts(&[(LOCATION, json!("cookie"))]), LOCATION, &loc, &mut issues),
            None
        );
        assert_eq!(issues[0].kind, ErrorKind::MalformedSchema);
    }
}
