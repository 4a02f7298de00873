use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::collections::HashSet;
use thiserror::Error;

use crate::error::ErrorKind;

/// Field identifier inside a placeholder
#[allow(clippy::expect_used)]
static IDENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("identifier regex should be valid"));

/// One router-native path segment
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Segment {
    /// Matched exactly
    Literal(String),
    /// Matches one segment, bound to the named field (`:name`)
    Dynamic(String),
    /// Matches the remainder of the path, bound to the named field (`*name`)
    CatchAll(String),
}

impl Segment {
    fn render(&self) -> String {
        match self {
            Segment::Literal(s) => s.clone(),
            Segment::Dynamic(name) => format!(":{name}"),
            Segment::CatchAll(name) => format!("*{name}"),
        }
    }

    fn shape(&self) -> &str {
        match self {
            Segment::Literal(s) => s,
            Segment::Dynamic(_) => ":",
            Segment::CatchAll(_) => "*",
        }
    }
}

/// A bound placeholder: router parameter name and the request field it fills
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PathBinding {
    /// Flattened router parameter name (`a.b` becomes `a_b`)
    pub name: String,
    /// Field path in the request message (`["a", "b"]`)
    pub field_path: Vec<String>,
    pub catch_all: bool,
}

impl PathBinding {
    /// Whether the placeholder references a top-level request field
    pub fn is_top_level(&self) -> bool {
        self.field_path.len() == 1
    }
}

/// A translated path template
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PathTemplate {
    /// The original IDL template
    pub template: String,
    pub segments: Vec<Segment>,
    /// Bound placeholders, left to right
    pub bindings: Vec<PathBinding>,
}

impl PathTemplate {
    /// Router-native pattern (`/users/:user_id`, `/files/*file_path`)
    pub fn pattern(&self) -> String {
        render(&self.segments, Segment::render)
    }

    /// Pattern with parameter names erased, used to detect colliding routes
    pub fn shape(&self) -> String {
        shape(&self.segments)
    }

    pub fn binding(&self, name: &str) -> Option<&PathBinding> {
        self.bindings.iter().find(|b| b.name == name)
    }

    pub fn catch_all(&self) -> Option<&PathBinding> {
        self.bindings.iter().find(|b| b.catch_all)
    }

    /// Top-level request fields the path binds
    pub fn top_level_fields(&self) -> impl Iterator<Item = &str> {
        self.bindings
            .iter()
            .filter(|b| b.is_top_level())
            .map(|b| b.field_path[0].as_str())
    }
}

/// `/users/:` for both `/users/:id` and `/users/:user_id`
pub fn shape(segments: &[Segment]) -> String {
    render(segments, |s| s.shape().to_string())
}

fn render(segments: &[Segment], f: impl Fn(&Segment) -> String) -> String {
    if segments.is_empty() {
        return "/".to_string();
    }
    segments.iter().fold(String::new(), |mut acc, s| {
        acc.push('/');
        acc.push_str(&f(s));
        acc
    })
}

/// Path translation failure
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathError {
    #[error("invalid path template '{template}': {reason}")]
    Invalid { template: String, reason: String },
    #[error("field reference '{reference}' in '{template}' is {depth} levels deep (max {max})")]
    TooDeep {
        template: String,
        reference: String,
        depth: usize,
        max: usize,
    },
}

impl PathError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            PathError::Invalid { .. } => ErrorKind::InvalidPathTemplate,
            PathError::TooDeep { .. } => ErrorKind::SchemaTooDeep,
        }
    }
}

/// Translate an IDL path template into router-native segments
///
/// Single left-to-right pass over the `/`-separated segments. Placeholder
/// grammar:
///
/// - `{name}`, `{name=*}`: dynamic segment bound to `name`
/// - `{name=**}`: catch-all bound to `name`, last segment only
/// - `{name=a/b/**}`: literal `a`, `b`, then a catch-all bound to `name`
/// - `{name=v1}`: literal `v1`, nothing bound
/// - `{a.b}`: dynamic segment bound to `a_b` (field path `a.b`)
///
/// # Errors
///
/// `PathError::Invalid` for grammar violations, a second catch-all or a
/// catch-all that is not last; `PathError::TooDeep` when a dotted reference has
/// more than `max_depth` components.
pub fn translate(template: &str, max_depth: usize) -> Result<PathTemplate, PathError> {
    Scanner {
        template,
        max_depth,
        segments: Vec::new(),
        bindings: Vec::new(),
        names: HashSet::new(),
    }
    .run()
}

struct Scanner<'t> {
    template: &'t str,
    max_depth: usize,
    segments: Vec<Segment>,
    bindings: Vec<PathBinding>,
    names: HashSet<String>,
}

impl<'t> Scanner<'t> {
    fn invalid(&self, reason: impl Into<String>) -> PathError {
        PathError::Invalid {
            template: self.template.to_string(),
            reason: reason.into(),
        }
    }

    fn run(mut self) -> Result<PathTemplate, PathError> {
        let rest = self
            .template
            .strip_prefix('/')
            .ok_or_else(|| self.invalid("template must start with '/'"))?;

        if !rest.is_empty() {
            for raw in self.split(rest)? {
                if self.catch_all_seen() {
                    return Err(if raw.contains("**") {
                        self.invalid("only one catch-all placeholder is allowed")
                    } else {
                        self.invalid("catch-all placeholder must be the last segment")
                    });
                }
                self.segment(raw)?;
            }
        }

        Ok(PathTemplate {
            template: self.template.to_string(),
            segments: self.segments,
            bindings: self.bindings,
        })
    }

    fn catch_all_seen(&self) -> bool {
        matches!(self.segments.last(), Some(Segment::CatchAll(_)))
    }

    /// Split on `/` outside of braces
    fn split<'s>(&self, path: &'s str) -> Result<Vec<&'s str>, PathError> {
        let mut parts = Vec::new();
        let mut depth = 0usize;
        let mut start = 0;
        for (i, c) in path.char_indices() {
            match c {
                '{' => {
                    if depth > 0 {
                        return Err(self.invalid("nested '{' inside a placeholder"));
                    }
                    depth += 1;
                }
                '}' => {
                    if depth == 0 {
                        return Err(self.invalid("unbalanced '}'"));
                    }
                    depth -= 1;
                }
                '/' if depth == 0 => {
                    parts.push(&path[start..i]);
                    start = i + 1;
                }
                _ => {}
            }
        }
        if depth != 0 {
            return Err(self.invalid("unterminated placeholder"));
        }
        parts.push(&path[start..]);
        Ok(parts)
    }

    fn segment(&mut self, raw: &str) -> Result<(), PathError> {
        if raw.is_empty() {
            return Err(self.invalid("empty path segment"));
        }
        match raw.strip_prefix('{').and_then(|s| s.strip_suffix('}')) {
            Some(inner) => self.placeholder(inner),
            None => {
                self.literal(raw)?;
                Ok(())
            }
        }
    }

    fn literal(&mut self, raw: &str) -> Result<(), PathError> {
        if raw.contains('{') || raw.contains('}') {
            return Err(self.invalid(format!(
                "placeholder must span the whole segment, found '{raw}'"
            )));
        }
        if raw.starts_with(':') || raw.starts_with('*') {
            return Err(self.invalid(format!(
                "literal segment '{raw}' would be read as a router wildcard"
            )));
        }
        self.segments.push(Segment::Literal(raw.to_string()));
        Ok(())
    }

    fn placeholder(&mut self, inner: &str) -> Result<(), PathError> {
        let (reference, sub_path) = match inner.split_once('=') {
            Some((r, s)) => (r.trim(), Some(s.trim())),
            None => (inner.trim(), None),
        };
        let field_path = self.field_path(reference)?;
        let name = field_path.join("_");

        match sub_path {
            None | Some("*") => self.bind(Segment::Dynamic(name.clone()), name, field_path),
            Some("**") => self.bind(Segment::CatchAll(name.clone()), name, field_path),
            Some("") => Err(self.invalid(format!("placeholder '{reference}' has an empty sub-path"))),
            Some(sub) => {
                let parts: Vec<&str> = sub.split('/').collect();
                let wildcards = parts.iter().filter(|p| **p == "*" || **p == "**").count();
                if wildcards > 1 {
                    return Err(self.invalid(format!(
                        "sub-path of '{reference}' may contain at most one wildcard"
                    )));
                }
                let last = parts.len() - 1;
                for (i, part) in parts.iter().enumerate() {
                    match *part {
                        "**" if i != last => {
                            return Err(self.invalid("catch-all placeholder must be the last segment"));
                        }
                        "**" => self.bind(Segment::CatchAll(name.clone()), name.clone(), field_path.clone())?,
                        "*" => self.bind(Segment::Dynamic(name.clone()), name.clone(), field_path.clone())?,
                        "" => return Err(self.invalid("empty path segment")),
                        lit => self.literal(lit)?,
                    }
                }
                Ok(())
            }
        }
    }

    fn field_path(&self, reference: &str) -> Result<Vec<String>, PathError> {
        if reference.is_empty() {
            return Err(self.invalid("placeholder name must not be empty"));
        }
        let parts: Vec<String> = reference.split('.').map(str::to_string).collect();
        if let Some(bad) = parts.iter().find(|p| !IDENT.is_match(p)) {
            return Err(self.invalid(format!(
                "'{bad}' in placeholder '{reference}' is not a valid field name"
            )));
        }
        if parts.len() > self.max_depth {
            return Err(PathError::TooDeep {
                template: self.template.to_string(),
                reference: reference.to_string(),
                depth: parts.len(),
                max: self.max_depth,
            });
        }
        Ok(parts)
    }

    fn bind(
        &mut self,
        segment: Segment,
        name: String,
        field_path: Vec<String>,
    ) -> Result<(), PathError> {
        let catch_all = matches!(segment, Segment::CatchAll(_));
        if catch_all && self.bindings.iter().any(|b| b.catch_all) {
            return Err(self.invalid("only one catch-all placeholder is allowed"));
        }
        if !self.names.insert(name.clone()) {
            return Err(self.invalid(format!("placeholder '{name}' is bound more than once")));
        }
        self.segments.push(segment);
        self.bindings.push(PathBinding {
            name,
            field_path,
            catch_all,
        });
        Ok(())
    }
}
