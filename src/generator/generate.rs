use tracing::{info, warn};

use super::artifacts::{
    Artifacts, ExtraDataEntry, MethodSignature, RegistrationEntry, ServiceInterface,
};
use super::operation::build_operation;
use super::reduce::reduce;
use crate::config::GeneratorConfig;
use crate::error::{GenerationError, SchemaIssues};
use crate::schema::Schema;
use crate::taxonomy::emit_schema;

/// Result of a generation run that was not aborted
#[derive(Debug, Clone, PartialEq)]
pub struct Generation {
    pub artifacts: Artifacts,
    /// Per-method and per-enum failures; the failing element is absent from `artifacts`
    pub failures: Vec<GenerationError>,
}

impl Generation {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Emit every artifact for a loaded schema
///
/// Methods are built independently in declaration order. A method that fails
/// is recorded in [`Generation::failures`] and left out of every table.
///
/// # Errors
///
/// Returns [`SchemaIssues`] for failures that span methods: duplicate
/// operation ids, conflicting routes and, with schema-scoped error codes,
/// codes shared between enums.
pub fn generate(schema: &Schema, config: &GeneratorConfig) -> Result<Generation, SchemaIssues> {
    let mut artifacts = Artifacts {
        package: schema.package.clone(),
        ..Artifacts::default()
    };
    let mut failures = Vec::new();

    for service in &schema.services {
        let mut interface = ServiceInterface {
            name: service.name.clone(),
            qualified_name: schema.qualified(&service.name),
            methods: Vec::new(),
        };

        for method in &service.methods {
            let op = match build_operation(schema, service, method, config) {
                Ok(Some(op)) => op,
                Ok(None) => continue,
                Err(err) => {
                    warn!(error = %err, "Method left out of generated artifacts");
                    failures.push(err);
                    continue;
                }
            };

            interface.methods.push(MethodSignature {
                method: op.method.clone(),
                handler_name: op.handler_name.clone(),
                request: method.request.clone(),
                response: method.response.clone(),
                operation_id: op.operation_id.clone(),
            });
            artifacts.registrations.push(RegistrationEntry {
                operation_id: op.operation_id.clone(),
                service: op.service.clone(),
                handler_name: op.handler_name.clone(),
                verb: op.route.as_ref().map(|r| r.verb.clone()),
                pattern: op.route.as_ref().map(|r| r.pattern.clone()),
            });
            if !op.extra.is_empty() {
                artifacts.extra_data.push(ExtraDataEntry {
                    operation_id: op.operation_id.clone(),
                    options: op.extra.clone(),
                });
            }
            artifacts.operations.push(op);
        }

        artifacts.interfaces.push(interface);
    }

    let (errors, enum_failures) = emit_schema(schema, config.fallback_status);
    for err in &enum_failures {
        warn!(error = %err, "Enum left out of generated error contracts");
    }
    failures.extend(enum_failures);
    artifacts.errors = errors;

    let issues = reduce(&artifacts.operations, &artifacts.errors, config.error_code_scope);
    if !issues.is_empty() {
        return Err(SchemaIssues(issues));
    }

    info!(
        operations = artifacts.operations.len(),
        error_contracts = artifacts.errors.len(),
        failures = failures.len(),
        "Generation complete"
    );
    Ok(Generation {
        artifacts,
        failures,
    })
}
