#![allow(clippy::unwrap_used, clippy::expect_used)]

use super::*;
use crate::error::ErrorKind;
use crate::schema::{Enum, EnumValue, Schema};
use std::error::Error;
use std::io;

fn value(name: &str, number: i32) -> EnumValue {
    EnumValue {
        name: name.to_string(),
        number,
        status: None,
        reason: None,
        message: None,
    }
}

fn reasons() -> Enum {
    let mut not_found = value("USER_NOT_FOUND", 1);
    not_found.status = Some(404);
    not_found.reason = Some("NOT_FOUND".to_string());
    not_found.message = Some("user does not exist".to_string());
    Enum {
        name: "ErrorReason".to_string(),
        default_status: Some(500),
        values: vec![not_found, value("INTERNAL", 2)],
    }
}

#[test]
fn test_value_override_and_enum_default() {
    let contract = emit_enum(&reasons(), 500).unwrap();
    let nf = contract.value("USER_NOT_FOUND").unwrap();
    assert_eq!(
        (nf.code, nf.status, nf.reason.as_str(), nf.message.as_str()),
        (1, 404, "NOT_FOUND", "user does not exist")
    );
    assert_eq!(nf.status_source, StatusSource::Value);

    let internal = contract.value("INTERNAL").unwrap();
    assert_eq!(
        (internal.status, internal.reason.as_str(), internal.message.as_str()),
        (500, "INTERNAL", "")
    );
    assert_eq!(internal.status_source, StatusSource::Enum);
}

#[test]
fn test_fallback_status() {
    let mut e = reasons();
    e.default_status = None;
    let contract = emit_enum(&e, 503).unwrap();
    let internal = contract.value("INTERNAL").unwrap();
    assert_eq!(internal.status, 503);
    assert_eq!(internal.status_source, StatusSource::Fallback);
}

#[test]
fn test_contract_operations() {
    let contract = emit_enum(&reasons(), 500).unwrap();
    let names: Vec<_> = contract.operations.iter().map(|o| o.name).collect();
    assert_eq!(names, vec!["join", "join_with_message", "is"]);
}

#[test]
fn test_duplicate_code_in_enum() {
    let mut e = reasons();
    e.values.push(value("AGAIN", 1));
    let err = emit_enum(&e, 500).unwrap_err();
    assert_eq!(err.kind, ErrorKind::DuplicateErrorCode);
    assert_eq!(err.location.to_string(), "enum:ErrorReason/value:AGAIN");
}

#[test]
fn test_plain_enums_skipped() {
    let schema = Schema {
        enums: vec![
            reasons(),
            Enum {
                name: "Color".to_string(),
                default_status: None,
                values: vec![value("RED", 0), value("BLUE", 1)],
            },
        ],
        ..Schema::default()
    };
    let (contracts, failures) = emit_schema(&schema, 500);
    assert!(failures.is_empty());
    assert_eq!(contracts.len(), 1);
    assert_eq!(contracts[0].enum_name, "ErrorReason");
}

#[test]
fn test_global_codes() {
    let a = emit_enum(&reasons(), 500).unwrap();
    let mut other = reasons();
    other.name = "BillingReason".to_string();
    other.values.truncate(1);
    let b = emit_enum(&other, 500).unwrap();

    assert!(check_global_codes(std::slice::from_ref(&a)).is_empty());
    let errors = check_global_codes(&[a, b]);
    assert_eq!(errors.len(), 1);
    assert!(errors[0].message.contains("ErrorReason.USER_NOT_FOUND"));
}

#[test]
fn test_status_error_join_preserves_identity() {
    let contract = emit_enum(&reasons(), 500).unwrap();
    let not_found = StatusError::from_descriptor(contract.value("USER_NOT_FOUND").unwrap());

    let joined = not_found.join([io::Error::new(io::ErrorKind::NotFound, "row missing")]);
    assert!(joined.is(&not_found));
    assert_eq!(joined.status(), 404);
    assert_eq!(joined.message(), "user does not exist");
    assert_eq!(joined.source().unwrap().to_string(), "row missing");

    let replaced = joined.join_with_message("user 7 missing", Vec::<io::Error>::new());
    assert!(replaced.is(&not_found));
    assert_eq!(replaced.message(), "user 7 missing");
    assert_eq!(replaced.causes().count(), 1);
}

#[test]
fn test_status_error_is_distinguishes_reasons() {
    let a = StatusError::new(1, 404, "NOT_FOUND", "");
    let b = StatusError::new(1, 404, "GONE", "");
    assert!(!a.is(&b));
}

#[test]
fn test_matches_walks_joined_causes() {
    let not_found = StatusError::new(1, 404, "NOT_FOUND", "");
    let internal = StatusError::new(2, 500, "INTERNAL", "");

    let inner = not_found.join_with_message("lookup failed", Vec::<io::Error>::new());
    let outer = internal.join([io::Error::other("first"), io::Error::other("second")]);
    let nested = internal.join([inner]);

    assert!(StatusError::matches(&nested, &internal));
    assert!(StatusError::matches(&nested, &not_found));
    assert!(!StatusError::matches(&outer, &not_found));
}

#[test]
fn test_matches_finds_target_among_later_causes() {
    let not_found = StatusError::new(1, 404, "NOT_FOUND", "");
    let internal = StatusError::new(2, 500, "INTERNAL", "");
    let gone = StatusError::new(3, 410, "GONE", "");

    let wrapped = internal
        .join([io::Error::other("cache miss")])
        .join([not_found.join_with_message("lookup failed", Vec::<io::Error>::new())]);
    assert_eq!(wrapped.causes().count(), 2);
    assert_eq!(wrapped.source().unwrap().to_string(), "cache miss");
    assert!(StatusError::matches(&wrapped, &not_found));

    let siblings = internal.join([gone.clone(), not_found.clone()]);
    assert!(StatusError::matches(&siblings, &not_found));
    assert!(StatusError::matches(&siblings, &gone));
    assert!(!StatusError::matches(&siblings, &StatusError::new(4, 409, "CONFLICT", "")));
}

#[test]
fn test_display() {
    let e = StatusError::new(1, 404, "NOT_FOUND", "nope");
    assert_eq!(
        e.to_string(),
        "error: code = 1 status = 404 reason = NOT_FOUND message = nope"
    );
}
