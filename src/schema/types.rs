use http::Method as HttpMethod;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Part of an inbound request a field value is read from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Location {
    Uri,
    Query,
    Body,
    Header,
    Form,
}

impl Location {
    /// Struct-tag key the binding library reads for this location
    ///
    /// Body fields are bound through the serialization tag and have no
    /// location tag of their own.
    pub fn tag_key(&self) -> Option<&'static str> {
        match self {
            Location::Uri => Some("uri"),
            Location::Query => Some("query"),
            Location::Header => Some("header"),
            Location::Form => Some("form"),
            Location::Body => None,
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Location::Uri => write!(f, "uri"),
            Location::Query => write!(f, "query"),
            Location::Body => write!(f, "body"),
            Location::Header => write!(f, "header"),
            Location::Form => write!(f, "form"),
        }
    }
}

impl FromStr for Location {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "URI" | "PATH" => Ok(Location::Uri),
            "QUERY" => Ok(Location::Query),
            "BODY" => Ok(Location::Body),
            "HEADER" => Ok(Location::Header),
            "FORM" => Ok(Location::Form),
            other => Err(format!("unknown binding location '{other}'")),
        }
    }
}

/// Normalized, immutable schema for one generation run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Schema {
    pub package: String,
    pub services: Vec<Service>,
    pub messages: Vec<Message>,
    pub enums: Vec<Enum>,
}

impl Schema {
    pub fn message(&self, name: &str) -> Option<&Message> {
        self.messages.iter().find(|m| m.name == name)
    }

    pub fn enumeration(&self, name: &str) -> Option<&Enum> {
        self.enums.iter().find(|e| e.name == name)
    }

    /// Fully qualified service name (`pkg.Service`)
    pub fn qualified(&self, name: &str) -> String {
        if self.package.is_empty() {
            name.to_string()
        } else {
            format!("{}.{}", self.package, name)
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Service {
    pub name: String,
    pub methods: Vec<Method>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Method {
    pub name: String,
    /// Canonical name of the request message
    pub request: String,
    /// Canonical name of the response message
    pub response: String,
    pub http: Option<HttpRule>,
    pub options: Vec<MethodOption>,
}

impl Method {
    pub fn is_unmapped(&self) -> bool {
        self.http.is_none() && self.options.is_empty()
    }

    pub fn option(&self, key: &str) -> Option<&OptionValue> {
        self.options.iter().find(|o| o.key == key).map(|o| &o.value)
    }
}

/// HTTP mapping of a method
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRule {
    pub verb: HttpMethod,
    /// IDL path template, untranslated
    pub path: String,
    pub body: BodySelector,
    pub response: ResponseSelector,
}

/// Which part of the request message the HTTP body carries
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "field", rename_all = "snake_case")]
pub enum BodySelector {
    /// `body: "*"`
    Entire,
    /// `body: "field_name"`
    Field(String),
    /// No body
    None,
}

/// Which part of the response message the HTTP body carries
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "field", rename_all = "snake_case")]
pub enum ResponseSelector {
    Entire,
    Field(String),
}

/// Generic method option used by non-HTTP transports
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MethodOption {
    pub key: String,
    pub value: OptionValue,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum OptionValue {
    Flag(bool),
    Text(String),
    Number(f64),
    StringMap(BTreeMap<String, String>),
}

impl OptionValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            OptionValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

/// Binding defaults declared on a message or oneof
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BindingDefaults {
    pub location: Option<Location>,
    pub auto_tags: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    pub name: String,
    /// Declaration order, which is also wire-tag order in output
    pub fields: Vec<Field>,
    pub oneofs: Vec<Oneof>,
    pub defaults: BindingDefaults,
}

impl Message {
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn oneof(&self, name: &str) -> Option<&Oneof> {
        self.oneofs.iter().find(|o| o.name == name)
    }

    /// Oneof group the field belongs to, if any
    pub fn oneof_of(&self, field: &Field) -> Option<&Oneof> {
        field.oneof.as_deref().and_then(|name| self.oneof(name))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Oneof {
    pub name: String,
    pub defaults: BindingDefaults,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "type", rename_all = "snake_case")]
pub enum FieldKind {
    Scalar(String),
    Message(String),
    Enum(String),
}

impl FieldKind {
    /// Type name as it appears in generated signatures
    pub fn type_name(&self) -> &str {
        match self {
            FieldKind::Scalar(t) | FieldKind::Message(t) | FieldKind::Enum(t) => t,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub name: String,
    /// Name used on the wire and in generated tags
    pub wire_name: String,
    pub number: u32,
    pub kind: FieldKind,
    pub repeated: bool,
    pub oneof: Option<String>,
    pub location: Option<Location>,
    pub tag: Option<String>,
    pub auto_tags: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Enum {
    pub name: String,
    pub default_status: Option<u16>,
    pub values: Vec<EnumValue>,
}

impl Enum {
    /// Whether the enum declares any error-taxonomy metadata
    pub fn is_error_enum(&self) -> bool {
        self.default_status.is_some()
            || self
                .values
                .iter()
                .any(|v| v.status.is_some() || v.reason.is_some() || v.message.is_some())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EnumValue {
    pub name: String,
    pub number: i32,
    pub status: Option<u16>,
    pub reason: Option<String>,
    pub message: Option<String>,
}
