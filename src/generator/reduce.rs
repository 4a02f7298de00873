use std::collections::HashMap;

use super::artifacts::OperationDescriptor;
use crate::config::ErrorCodeScope;
use crate::error::{ErrorKind, GenerationError, SchemaLocation};
use crate::path;
use crate::taxonomy::{check_global_codes, ErrorContract};

/// Cross-method checks run once every method has been built
///
/// Any error here aborts the run.
pub(crate) fn reduce(
    operations: &[OperationDescriptor],
    errors: &[ErrorContract],
    scope: ErrorCodeScope,
) -> Vec<GenerationError> {
    let mut issues = duplicate_operation_ids(operations);
    issues.extend(route_conflicts(operations));
    if scope == ErrorCodeScope::Schema {
        issues.extend(check_global_codes(errors));
    }
    issues
}

fn location(op: &OperationDescriptor) -> SchemaLocation {
    SchemaLocation::service(&op.service).method(&op.method)
}

fn duplicate_operation_ids(operations: &[OperationDescriptor]) -> Vec<GenerationError> {
    let mut seen: HashMap<&str, &OperationDescriptor> = HashMap::new();
    let mut issues = Vec::new();
    for op in operations {
        match seen.get(op.operation_id.as_str()) {
            Some(first) => issues.push(GenerationError::new(
                ErrorKind::DuplicateOperation,
                location(op),
                format!(
                    "operation id '{}' is already used by {}.{}",
                    op.operation_id, first.service, first.method
                ),
            )),
            None => {
                seen.insert(&op.operation_id, op);
            }
        }
    }
    issues
}

/// Routes that would land in the same router slot
fn route_conflicts(operations: &[OperationDescriptor]) -> Vec<GenerationError> {
    let mut seen: HashMap<(&str, String), &OperationDescriptor> = HashMap::new();
    let mut issues = Vec::new();
    for op in operations {
        let Some(route) = &op.route else { continue };
        let key = (route.verb.as_str(), path::shape(&route.segments));
        match seen.get(&key) {
            Some(first) => issues.push(GenerationError::new(
                ErrorKind::DuplicateOperation,
                location(op),
                format!(
                    "route {} {} conflicts with {}.{}",
                    route.verb, route.pattern, first.service, first.method
                ),
            )),
            None => {
                seen.insert(key, op);
            }
        }
    }
    issues
}
