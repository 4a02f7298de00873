use anyhow::Context;
use http::Method as HttpMethod;
use std::collections::HashSet;
use std::path::Path;
use tracing::{debug, info};

use super::extensions::{self as ext, ElementKind};
use super::raw::{
    RawEnum, RawField, RawHttpRule, RawMessage, RawMethod, RawOption, RawSchema, RawService,
};
use super::types::{
    BindingDefaults, BodySelector, Enum, EnumValue, Field, FieldKind, HttpRule, Message, Method,
    MethodOption, Oneof, OptionValue, ResponseSelector, Schema, Service,
};
use crate::error::{GenerationError, SchemaIssues, SchemaLocation};

/// Read a raw schema document from disk (YAML or JSON, chosen by extension)
pub fn load_schema_file(path: &Path) -> anyhow::Result<RawSchema> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read schema: {}", path.display()))?;
    let is_yaml = path
        .extension()
        .map(|s| s == "yaml" || s == "yml")
        .unwrap_or(false);
    parse_schema_str(&content, is_yaml)
        .with_context(|| format!("Failed to parse schema: {}", path.display()))
}

/// Parse a raw schema document from a string
pub fn parse_schema_str(content: &str, is_yaml: bool) -> anyhow::Result<RawSchema> {
    let raw = if is_yaml {
        serde_yaml::from_str(content)?
    } else {
        serde_json::from_str(content)?
    };
    Ok(raw)
}

/// Build the normalized IR from a raw schema document
///
/// Every issue found is collected; the IR is only returned when there are none.
///
/// # Errors
///
/// Returns [`SchemaIssues`] holding `MalformedSchema` and `UnresolvedReference`
/// failures. Duplicate type declarations come first, then services, messages
/// and enums, each section in declaration order.
pub fn load_schema(raw: &RawSchema) -> Result<Schema, SchemaIssues> {
    let mut loader = Loader::new(raw);
    let services: Vec<Service> = raw.services.iter().map(|s| loader.service(s)).collect();
    let messages: Vec<Message> = raw.messages.iter().map(|m| loader.message(m)).collect();
    let enums: Vec<Enum> = raw.enums.iter().map(|e| loader.enumeration(e)).collect();

    if !loader.issues.is_empty() {
        return Err(SchemaIssues(loader.issues));
    }

    info!(
        package = %raw.package,
        services = services.len(),
        messages = messages.len(),
        enums = enums.len(),
        "Schema loaded"
    );

    Ok(Schema {
        package: raw.package.clone(),
        services,
        messages,
        enums,
    })
}

struct Loader<'a> {
    package: &'a str,
    message_names: HashSet<&'a str>,
    enum_names: HashSet<&'a str>,
    issues: Vec<GenerationError>,
}

impl<'a> Loader<'a> {
    fn new(raw: &'a RawSchema) -> Self {
        let mut issues = Vec::new();
        let mut message_names = HashSet::new();
        for m in &raw.messages {
            if !message_names.insert(m.name.as_str()) {
                issues.push(GenerationError::malformed(
                    SchemaLocation::message(&m.name),
                    "message declared more than once",
                ));
            }
        }
        let mut enum_names = HashSet::new();
        for e in &raw.enums {
            if !enum_names.insert(e.name.as_str()) || message_names.contains(e.name.as_str()) {
                issues.push(GenerationError::malformed(
                    SchemaLocation::enumeration(&e.name),
                    "type name declared more than once",
                ));
            }
        }
        Loader {
            package: raw.package.as_str(),
            message_names,
            enum_names,
            issues,
        }
    }

    /// Resolve a type reference to the declared name it denotes
    ///
    /// Accepts the declared name, a leading-dot fully qualified name, or a name
    /// qualified with the schema package.
    fn resolve(&self, names: &HashSet<&'a str>, reference: &str) -> Option<String> {
        let trimmed = reference.trim_start_matches('.');
        let unqualified = if self.package.is_empty() {
            None
        } else {
            trimmed
                .strip_prefix(self.package)
                .and_then(|rest| rest.strip_prefix('.'))
        };
        let qualified = if self.package.is_empty() {
            None
        } else {
            Some(format!("{}.{}", self.package, trimmed))
        };

        let found = [Some(reference), Some(trimmed), unqualified, qualified.as_deref()]
            .into_iter()
            .flatten()
            .find(|candidate| names.contains(candidate))
            .map(str::to_string);
        found
    }

    fn service(&mut self, raw: &RawService) -> Service {
        let location = SchemaLocation::service(&raw.name);
        ext::check_placement(ElementKind::Service, &raw.extensions, &location, &mut self.issues);

        let mut seen = HashSet::new();
        let mut methods = Vec::with_capacity(raw.methods.len());
        for m in &raw.methods {
            if !seen.insert(m.name.as_str()) {
                self.issues.push(GenerationError::malformed(
                    location.clone().method(&m.name),
                    "method declared more than once in service",
                ));
                continue;
            }
            if let Some(method) = self.method(&location, m) {
                methods.push(method);
            }
        }
        Service {
            name: raw.name.clone(),
            methods,
        }
    }

    fn method(&mut self, service: &SchemaLocation, raw: &RawMethod) -> Option<Method> {
        let location = service.clone().method(&raw.name);
        ext::check_placement(ElementKind::Method, &raw.extensions, &location, &mut self.issues);

        let request = self.resolve(&self.message_names, &raw.input_type);
        if request.is_none() {
            self.issues.push(GenerationError::unresolved(
                location.clone(),
                format!("request type '{}' is not a known message", raw.input_type),
            ));
        }
        let response = self.resolve(&self.message_names, &raw.output_type);
        if response.is_none() {
            self.issues.push(GenerationError::unresolved(
                location.clone(),
                format!("response type '{}' is not a known message", raw.output_type),
            ));
        }

        let http = ext::decode::<RawHttpRule>(&raw.extensions, ext::HTTP, &location, &mut self.issues)
            .and_then(|rule| self.http_rule(&location, rule));
        let options = ext::decode::<Vec<RawOption>>(
            &raw.extensions,
            ext::EXTRA,
            &location,
            &mut self.issues,
        )
        .map(|opts| self.options(&location, opts))
        .unwrap_or_default();

        Some(Method {
            name: raw.name.clone(),
            request: request?,
            response: response?,
            http,
            options,
        })
    }

    fn http_rule(&mut self, location: &SchemaLocation, raw: RawHttpRule) -> Option<HttpRule> {
        let location = location.clone().extension(ext::HTTP);
        let mut verbs: Vec<(HttpMethod, String)> = Vec::new();
        for (verb, path) in [
            (HttpMethod::GET, raw.get),
            (HttpMethod::POST, raw.post),
            (HttpMethod::PUT, raw.put),
            (HttpMethod::DELETE, raw.delete),
            (HttpMethod::PATCH, raw.patch),
        ] {
            if let Some(path) = path {
                verbs.push((verb, path));
            }
        }
        if let Some(custom) = raw.custom {
            match HttpMethod::from_bytes(custom.kind.to_ascii_uppercase().as_bytes()) {
                Ok(verb) => verbs.push((verb, custom.path)),
                Err(_) => {
                    self.issues.push(GenerationError::malformed(
                        location,
                        format!("'{}' is not a valid HTTP verb", custom.kind),
                    ));
                    return None;
                }
            }
        }

        if verbs.len() != 1 {
            self.issues.push(GenerationError::malformed(
                location,
                format!(
                    "HTTP mapping must declare exactly one verb, found {}",
                    verbs.len()
                ),
            ));
            return None;
        }
        let (verb, path) = verbs.remove(0);

        let carries_body = !matches!(
            verb,
            HttpMethod::GET | HttpMethod::DELETE | HttpMethod::HEAD | HttpMethod::OPTIONS
        );
        let body = match raw.body.as_deref().map(str::trim) {
            None | Some("") if carries_body => BodySelector::Entire,
            None | Some("") => BodySelector::None,
            Some("*") => BodySelector::Entire,
            Some(field) => BodySelector::Field(field.to_string()),
        };
        if !carries_body && body != BodySelector::None {
            self.issues.push(GenerationError::malformed(
                location,
                format!("{verb} mappings cannot carry a request body"),
            ));
            return None;
        }
        let response = match raw.response_body.as_deref().map(str::trim) {
            None | Some("") | Some("*") => ResponseSelector::Entire,
            Some(field) => ResponseSelector::Field(field.to_string()),
        };

        Some(HttpRule {
            verb,
            path,
            body,
            response,
        })
    }

    fn options(&mut self, location: &SchemaLocation, raw: Vec<RawOption>) -> Vec<MethodOption> {
        let location = location.clone().extension(ext::EXTRA);
        let mut seen = HashSet::new();
        let mut out = Vec::with_capacity(raw.len());
        for opt in raw {
            if opt.key.trim().is_empty() {
                self.issues.push(GenerationError::malformed(
                    location.clone(),
                    "option key must not be empty",
                ));
                continue;
            }
            if !seen.insert(opt.key.clone()) {
                self.issues.push(GenerationError::malformed(
                    location.clone(),
                    format!("option '{}' declared more than once", opt.key),
                ));
                continue;
            }
            let mut values = Vec::new();
            if let Some(flag) = opt.flag {
                values.push(OptionValue::Flag(flag));
            }
            if let Some(text) = opt.text {
                values.push(OptionValue::Text(text));
            }
            if let Some(number) = opt.number {
                values.push(OptionValue::Number(number));
            }
            if let Some(map) = opt.map {
                values.push(OptionValue::StringMap(map));
            }
            if values.len() != 1 {
                self.issues.push(GenerationError::malformed(
                    location.clone(),
                    format!(
                        "option '{}' must carry exactly one of flag, text, number or map",
                        opt.key
                    ),
                ));
                continue;
            }
            out.push(MethodOption {
                key: opt.key,
                value: values.remove(0),
            });
        }
        out
    }

    fn defaults(
        &mut self,
        extensions: &super::raw::Extensions,
        location: &SchemaLocation,
    ) -> BindingDefaults {
        BindingDefaults {
            location: ext::decode_location(
                extensions,
                ext::DEFAULT_LOCATION,
                location,
                &mut self.issues,
            ),
            auto_tags: ext::decode(extensions, ext::DEFAULT_AUTO_TAGS, location, &mut self.issues),
        }
    }

    fn message(&mut self, raw: &RawMessage) -> Message {
        let location = SchemaLocation::message(&raw.name);
        ext::check_placement(ElementKind::Message, &raw.extensions, &location, &mut self.issues);
        let defaults = self.defaults(&raw.extensions, &location);

        let mut oneofs = Vec::with_capacity(raw.oneofs.len());
        for o in &raw.oneofs {
            let oneof_location = location.clone().oneof(&o.name);
            if oneofs.iter().any(|existing: &Oneof| existing.name == o.name) {
                self.issues.push(GenerationError::malformed(
                    oneof_location,
                    "oneof declared more than once",
                ));
                continue;
            }
            ext::check_placement(ElementKind::Oneof, &o.extensions, &oneof_location, &mut self.issues);
            let defaults = self.defaults(&o.extensions, &oneof_location);
            oneofs.push(Oneof {
                name: o.name.clone(),
                defaults,
            });
        }

        let mut numbers = HashSet::new();
        let mut names = HashSet::new();
        let mut fields = Vec::with_capacity(raw.fields.len());
        for f in &raw.fields {
            let field_location = location.clone().field(&f.name);
            if !names.insert(f.name.as_str()) {
                self.issues.push(GenerationError::malformed(
                    field_location,
                    "field declared more than once",
                ));
                continue;
            }
            if !numbers.insert(f.number) {
                self.issues.push(GenerationError::malformed(
                    field_location,
                    format!("wire number {} is already used in this message", f.number),
                ));
                continue;
            }
            if let Some(oneof) = &f.oneof {
                if !oneofs.iter().any(|o| &o.name == oneof) {
                    self.issues.push(GenerationError::unresolved(
                        field_location.clone(),
                        format!("oneof '{oneof}' is not declared in the message"),
                    ));
                }
            }
            if let Some(field) = self.field(&field_location, f) {
                fields.push(field);
            }
        }

        debug!(message = %raw.name, fields = fields.len(), "Loaded message");
        Message {
            name: raw.name.clone(),
            fields,
            oneofs,
            defaults,
        }
    }

    fn field(&mut self, location: &SchemaLocation, raw: &RawField) -> Option<Field> {
        ext::check_placement(ElementKind::Field, &raw.extensions, location, &mut self.issues);

        let repeated = match raw.label.as_deref() {
            None | Some("optional") | Some("required") => false,
            Some("repeated") => true,
            Some(other) => {
                self.issues.push(GenerationError::malformed(
                    location.clone(),
                    format!("unknown field label '{other}'"),
                ));
                false
            }
        };

        let kind = match (&raw.type_name, &raw.ty) {
            (Some(reference), _) => {
                if let Some(name) = self.resolve(&self.message_names, reference) {
                    FieldKind::Message(name)
                } else if let Some(name) = self.resolve(&self.enum_names, reference) {
                    FieldKind::Enum(name)
                } else {
                    self.issues.push(GenerationError::unresolved(
                        location.clone(),
                        format!("type '{reference}' is not a known message or enum"),
                    ));
                    return None;
                }
            }
            (None, Some(scalar)) => FieldKind::Scalar(scalar.clone()),
            (None, None) => {
                self.issues.push(GenerationError::malformed(
                    location.clone(),
                    "field declares neither a scalar type nor a type reference",
                ));
                return None;
            }
        };

        Some(Field {
            name: raw.name.clone(),
            wire_name: raw.json_name.clone().unwrap_or_else(|| raw.name.clone()),
            number: raw.number,
            kind,
            repeated,
            oneof: raw.oneof.clone(),
            location: ext::decode_location(&raw.extensions, ext::LOCATION, location, &mut self.issues),
            tag: ext::decode(&raw.extensions, ext::TAG, location, &mut self.issues),
            auto_tags: ext::decode(&raw.extensions, ext::AUTO_TAGS, location, &mut self.issues),
        })
    }

    fn enumeration(&mut self, raw: &RawEnum) -> Enum {
        let location = SchemaLocation::enumeration(&raw.name);
        ext::check_placement(ElementKind::Enum, &raw.extensions, &location, &mut self.issues);
        let default_status =
            ext::decode_status(&raw.extensions, ext::DEFAULT_STATUS, &location, &mut self.issues);

        let mut names = HashSet::new();
        let mut values = Vec::with_capacity(raw.values.len());
        for v in &raw.values {
            let value_location = location.clone().value(&v.name);
            if !names.insert(v.name.as_str()) {
                self.issues.push(GenerationError::malformed(
                    value_location,
                    "enum value declared more than once",
                ));
                continue;
            }
            ext::check_placement(ElementKind::EnumValue, &v.extensions, &value_location, &mut self.issues);
            values.push(EnumValue {
                name: v.name.clone(),
                number: v.number,
                status: ext::decode_status(&v.extensions, ext::STATUS, &value_location, &mut self.issues),
                reason: ext::decode(&v.extensions, ext::REASON, &value_location, &mut self.issues),
                message: ext::decode(&v.extensions, ext::MESSAGE, &value_location, &mut self.issues),
            });
        }

        Enum {
            name: raw.name.clone(),
            default_status,
            values,
        }
    }
}
