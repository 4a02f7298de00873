use std::collections::HashSet;
use tracing::debug;

use super::artifacts::{DecodeContract, EncodeContract, OperationDescriptor, RouteDescriptor};
use crate::binding::{resolve_message, BindingContext};
use crate::config::{GeneratorConfig, UnmappedPolicy};
use crate::error::{ErrorKind, GenerationError, SchemaLocation};
use crate::path::{translate, PathBinding};
use crate::schema::{
    BodySelector, FieldKind, HttpRule, Message, Method, ResponseSelector, Schema, Service,
};

/// Operation identifier of a method
///
/// HTTP-mapped methods are always `{package}.{Service}/{Method}`. Methods routed
/// through generic options use the text option under `options_key` when present.
pub fn operation_id(schema: &Schema, service: &Service, method: &Method, options_key: &str) -> String {
    method
        .http
        .is_none()
        .then(|| method.option(options_key))
        .flatten()
        .and_then(|v| v.as_text())
        .map(str::to_string)
        .unwrap_or_else(|| format!("{}/{}", schema.qualified(&service.name), method.name))
}

/// `GetUser` -> `get_user`, `ListHTTPRoutes` -> `list_http_routes`
pub fn to_snake_case(name: &str) -> String {
    let chars: Vec<char> = name.chars().collect();
    let mut out = String::with_capacity(name.len() + 4);
    for (i, &c) in chars.iter().enumerate() {
        if c.is_ascii_uppercase() {
            let prev = i.checked_sub(1).map(|p| chars[p]);
            let next = chars.get(i + 1).copied();
            let boundary = match prev {
                Some(p) if p.is_ascii_lowercase() || p.is_ascii_digit() => true,
                Some(p) if p.is_ascii_uppercase() => next.is_some_and(|n| n.is_ascii_lowercase()),
                _ => false,
            };
            if boundary && !out.ends_with('_') {
                out.push('_');
            }
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

/// Build the descriptor for one method
///
/// `Ok(None)` means the method is unmapped and skipped by policy.
pub(crate) fn build_operation(
    schema: &Schema,
    service: &Service,
    method: &Method,
    config: &GeneratorConfig,
) -> Result<Option<OperationDescriptor>, GenerationError> {
    let location = SchemaLocation::service(&service.name).method(&method.name);

    if method.is_unmapped() {
        return match config.unmapped {
            UnmappedPolicy::Skip => {
                debug!(%location, "Skipping unmapped method");
                Ok(None)
            }
            UnmappedPolicy::Error => Err(GenerationError::new(
                ErrorKind::UnmappedMethod,
                location,
                "method has neither an HTTP mapping nor generic options",
            )),
        };
    }

    let request = lookup_message(schema, &method.request, &location)?;
    let response = lookup_message(schema, &method.response, &location)?;

    let (route, decode) = match &method.http {
        Some(rule) => {
            let (route, decode) = http_contracts(schema, rule, request, config, &location)?;
            (Some(route), Some(decode))
        }
        None => (None, None),
    };

    let selector = method
        .http
        .as_ref()
        .map(|r| r.response.clone())
        .unwrap_or(ResponseSelector::Entire);
    let encode = encode_contract(response, selector, &location)?;

    let descriptor = OperationDescriptor {
        operation_id: operation_id(schema, service, method, &config.options_key),
        service: service.name.clone(),
        method: method.name.clone(),
        handler_name: to_snake_case(&method.name),
        route,
        decode,
        encode,
        extra: method.options.clone(),
    };
    debug!(
        operation_id = %descriptor.operation_id,
        pattern = descriptor.route.as_ref().map(|r| r.pattern.as_str()).unwrap_or("-"),
        "Built operation"
    );
    Ok(Some(descriptor))
}

fn lookup_message<'s>(
    schema: &'s Schema,
    name: &str,
    location: &SchemaLocation,
) -> Result<&'s Message, GenerationError> {
    schema.message(name).ok_or_else(|| {
        GenerationError::unresolved(location.clone(), format!("message '{name}' is not loaded"))
    })
}

fn http_contracts(
    schema: &Schema,
    rule: &HttpRule,
    request: &Message,
    config: &GeneratorConfig,
    location: &SchemaLocation,
) -> Result<(RouteDescriptor, DecodeContract), GenerationError> {
    let template = translate(&rule.path, config.max_depth)
        .map_err(|e| GenerationError::new(e.kind(), location.clone(), e.to_string()))?;

    for binding in &template.bindings {
        check_path_binding(schema, request, binding, config.max_depth, location)?;
    }
    if let BodySelector::Field(name) = &rule.body {
        if request.field(name).is_none() {
            return Err(GenerationError::unresolved(
                location.clone().field(name),
                format!("body field '{name}' is not a field of {}", request.name),
            ));
        }
    }

    let path_fields: HashSet<&str> = template.top_level_fields().collect();
    let fields = resolve_message(
        request,
        BindingContext {
            body: &rule.body,
            path_fields: &path_fields,
        },
    )
    .map_err(|e| GenerationError::new(e.kind(), location.clone().field(e.field()), e.to_string()))?;

    let route = RouteDescriptor {
        verb: rule.verb.as_str().to_string(),
        template: rule.path.clone(),
        pattern: template.pattern(),
        segments: template.segments.clone(),
        catch_all: template.catch_all().map(|b| b.name.clone()),
    };
    let decode = DecodeContract {
        request: request.name.clone(),
        body: rule.body.clone(),
        fields,
        path_bindings: template.bindings,
    };
    Ok((route, decode))
}

/// Walk a placeholder's field path through nested request messages
fn check_path_binding(
    schema: &Schema,
    request: &Message,
    binding: &PathBinding,
    max_depth: usize,
    location: &SchemaLocation,
) -> Result<(), GenerationError> {
    if binding.field_path.len() > max_depth {
        return Err(GenerationError::new(
            ErrorKind::SchemaTooDeep,
            location.clone(),
            format!(
                "path field '{}' is nested deeper than {max_depth} levels",
                binding.field_path.join(".")
            ),
        ));
    }

    let mut message = request;
    let last = binding.field_path.len() - 1;
    for (i, component) in binding.field_path.iter().enumerate() {
        let field = message.field(component).ok_or_else(|| {
            GenerationError::unresolved(
                location.clone().field(component),
                format!(
                    "path placeholder '{}' names no field '{component}' in {}",
                    binding.name, message.name
                ),
            )
        })?;
        if i == last {
            if field.repeated || matches!(field.kind, FieldKind::Message(_)) {
                return Err(GenerationError::unresolved(
                    location.clone().field(component),
                    format!(
                        "path placeholder '{}' names '{component}', which is a {}{} and not a scalar",
                        binding.name,
                        if field.repeated { "repeated " } else { "" },
                        field.kind.type_name()
                    ),
                ));
            }
            break;
        }
        message = match &field.kind {
            FieldKind::Message(name) => lookup_message(schema, name, location)?,
            other => {
                return Err(GenerationError::unresolved(
                    location.clone().field(component),
                    format!(
                        "path placeholder '{}' descends into '{component}', which is a {} and not a message",
                        binding.name,
                        other.type_name()
                    ),
                ))
            }
        };
    }
    Ok(())
}

fn encode_contract(
    response: &Message,
    selector: ResponseSelector,
    location: &SchemaLocation,
) -> Result<EncodeContract, GenerationError> {
    let (output_type, repeated) = match &selector {
        ResponseSelector::Entire => (response.name.clone(), false),
        ResponseSelector::Field(name) => {
            let field = response.field(name).ok_or_else(|| {
                GenerationError::unresolved(
                    location.clone().field(name),
                    format!("response field '{name}' is not a field of {}", response.name),
                )
            })?;
            (field.kind.type_name().to_string(), field.repeated)
        }
    };
    Ok(EncodeContract {
        response: response.name.clone(),
        selector,
        output_type,
        repeated,
    })
}
