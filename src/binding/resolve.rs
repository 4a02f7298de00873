use serde::Serialize;
use std::collections::HashSet;
use thiserror::Error;

use super::tags::{parse_fragment, Tag, TagSet};
use crate::error::ErrorKind;
use crate::schema::{BodySelector, Field, FieldKind, Location, Message};

/// Which layer of the precedence chain decided a field's location
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LocationSource {
    /// Bound by a path placeholder
    Path,
    /// Explicit annotation on the field
    Field,
    /// Default of the field's oneof group
    Oneof,
    /// Default of the enclosing message
    Message,
    /// Implicit default of the HTTP method
    MethodDefault,
}

/// Resolved binding for one request field
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldBinding {
    pub field: String,
    pub wire_name: String,
    pub number: u32,
    pub location: Location,
    pub source: LocationSource,
    pub tags: TagSet,
    /// `tags` rendered as a struct-tag string
    pub tag_string: String,
    pub kind: FieldKind,
    pub repeated: bool,
}

/// What the resolver needs to know about the method the message is bound for
#[derive(Debug, Clone, Copy)]
pub struct BindingContext<'a> {
    pub body: &'a BodySelector,
    /// Top-level request fields bound by path placeholders
    pub path_fields: &'a HashSet<&'a str>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BindingError {
    #[error("field '{field}' is bound by the path but annotated as {explicit}")]
    Conflicting { field: String, explicit: Location },
    #[error("field '{field}' is bound by the path and also selected as the body")]
    BodyFromPath { field: String },
    #[error("tag key '{key}' appears more than once on field '{field}'")]
    DuplicateTagKey { field: String, key: String },
    #[error("malformed tag fragment on field '{field}': {reason}")]
    MalformedTag { field: String, reason: String },
}

impl BindingError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            BindingError::Conflicting { .. } | BindingError::BodyFromPath { .. } => {
                ErrorKind::ConflictingBinding
            }
            BindingError::DuplicateTagKey { .. } => ErrorKind::DuplicateTagKey,
            BindingError::MalformedTag { .. } => ErrorKind::MalformedSchema,
        }
    }

    pub fn field(&self) -> &str {
        match self {
            BindingError::Conflicting { field, .. }
            | BindingError::BodyFromPath { field }
            | BindingError::DuplicateTagKey { field, .. }
            | BindingError::MalformedTag { field, .. } => field,
        }
    }
}

/// Location a field falls back to when nothing in the schema says otherwise
///
/// Body-less methods read everything from the query string. A body selector
/// naming one field puts that field in the body and the rest in the query.
pub fn implicit_default(body: &BodySelector, field: &Field) -> Location {
    match body {
        BodySelector::Entire => Location::Body,
        BodySelector::Field(name) if *name == field.name => Location::Body,
        BodySelector::Field(_) | BodySelector::None => Location::Query,
    }
}

/// Resolve every field of a request message, in declaration order
pub fn resolve_message(
    message: &Message,
    ctx: BindingContext<'_>,
) -> Result<Vec<FieldBinding>, BindingError> {
    message
        .fields
        .iter()
        .map(|field| resolve_field(message, field, ctx))
        .collect()
}

pub fn resolve_field(
    message: &Message,
    field: &Field,
    ctx: BindingContext<'_>,
) -> Result<FieldBinding, BindingError> {
    let oneof = message.oneof_of(field);
    let (location, source) = if ctx.path_fields.contains(field.name.as_str()) {
        if matches!(ctx.body, BodySelector::Field(name) if *name == field.name) {
            return Err(BindingError::BodyFromPath {
                field: field.name.clone(),
            });
        }
        match field.location {
            Some(explicit) if explicit != Location::Uri => {
                return Err(BindingError::Conflicting {
                    field: field.name.clone(),
                    explicit,
                })
            }
            _ => (Location::Uri, LocationSource::Path),
        }
    } else {
        field
            .location
            .map(|l| (l, LocationSource::Field))
            .or_else(|| oneof.and_then(|o| o.defaults.location).map(|l| (l, LocationSource::Oneof)))
            .or_else(|| message.defaults.location.map(|l| (l, LocationSource::Message)))
            .unwrap_or_else(|| (implicit_default(ctx.body, field), LocationSource::MethodDefault))
    };

    let auto_tags = field
        .auto_tags
        .as_deref()
        .or_else(|| oneof.and_then(|o| o.defaults.auto_tags.as_deref()))
        .or(message.defaults.auto_tags.as_deref());

    let tags = build_tags(field, location, auto_tags)?;
    Ok(FieldBinding {
        field: field.name.clone(),
        wire_name: field.wire_name.clone(),
        number: field.number,
        location,
        source,
        tag_string: tags.render(),
        tags,
        kind: field.kind.clone(),
        repeated: field.repeated,
    })
}

fn build_tags(
    field: &Field,
    location: Location,
    auto_tags: Option<&str>,
) -> Result<TagSet, BindingError> {
    let mut tags = TagSet::new();
    let mut push = |tag: Tag| {
        tags.push(tag).map_err(|dup| BindingError::DuplicateTagKey {
            field: field.name.clone(),
            key: dup.key,
        })
    };

    if location == Location::Body {
        push(Tag::new("json", &field.wire_name))?;
    }
    match &field.tag {
        Some(fragment) => {
            for tag in parse(field, fragment)? {
                push(tag)?;
            }
        }
        None => {
            if let Some(key) = location.tag_key() {
                push(Tag::new(key, &field.wire_name))?;
            }
        }
    }
    if let Some(fragment) = auto_tags {
        for tag in parse(field, fragment)? {
            push(tag)?;
        }
    }
    Ok(tags)
}

fn parse(field: &Field, fragment: &str) -> Result<Vec<Tag>, BindingError> {
    parse_fragment(fragment).map_err(|reason| BindingError::MalformedTag {
        field: field.name.clone(),
        reason,
    })
}
