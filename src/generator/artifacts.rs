use serde::Serialize;

use crate::binding::FieldBinding;
use crate::path::{PathBinding, Segment};
use crate::schema::{BodySelector, MethodOption, ResponseSelector};
use crate::taxonomy::ErrorContract;

/// Everything one generation run emits
///
/// All tables are in schema declaration order, so two runs over the same
/// schema serialize identically.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Artifacts {
    pub package: String,
    pub operations: Vec<OperationDescriptor>,
    pub interfaces: Vec<ServiceInterface>,
    pub registrations: Vec<RegistrationEntry>,
    pub extra_data: Vec<ExtraDataEntry>,
    pub errors: Vec<ErrorContract>,
}

impl Artifacts {
    pub fn operation(&self, operation_id: &str) -> Option<&OperationDescriptor> {
        self.operations
            .iter()
            .find(|o| o.operation_id == operation_id)
    }

    pub fn registration(&self, operation_id: &str) -> Option<&RegistrationEntry> {
        self.registrations
            .iter()
            .find(|r| r.operation_id == operation_id)
    }

    /// Generic options recorded for an operation
    pub fn extra_data(&self, operation_id: &str) -> Option<&[MethodOption]> {
        self.extra_data
            .iter()
            .find(|e| e.operation_id == operation_id)
            .map(|e| e.options.as_slice())
    }

    pub fn interface(&self, service: &str) -> Option<&ServiceInterface> {
        self.interfaces.iter().find(|i| i.name == service)
    }

    pub fn error_contract(&self, enum_name: &str) -> Option<&ErrorContract> {
        self.errors.iter().find(|e| e.enum_name == enum_name)
    }
}

/// One callable operation and the contracts its handler is generated against
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OperationDescriptor {
    /// Stable key routing an inbound call to its handler
    pub operation_id: String,
    pub service: String,
    pub method: String,
    pub handler_name: String,
    /// Present for HTTP-mapped methods only
    pub route: Option<RouteDescriptor>,
    /// Present for HTTP-mapped methods only
    pub decode: Option<DecodeContract>,
    pub encode: EncodeContract,
    /// Generic options, in declaration order
    pub extra: Vec<MethodOption>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteDescriptor {
    pub verb: String,
    /// Path template as written in the schema
    pub template: String,
    /// Router-native pattern
    pub pattern: String,
    pub segments: Vec<Segment>,
    pub catch_all: Option<String>,
}

/// How to build the request message from an inbound HTTP request
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DecodeContract {
    pub request: String,
    pub body: BodySelector,
    /// Per-field bindings in declaration order
    pub fields: Vec<FieldBinding>,
    pub path_bindings: Vec<PathBinding>,
}

impl DecodeContract {
    pub fn field(&self, name: &str) -> Option<&FieldBinding> {
        self.fields.iter().find(|f| f.field == name)
    }
}

/// How to write the response message back
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EncodeContract {
    pub response: String,
    pub selector: ResponseSelector,
    /// Type written to the wire: the response message, or the selected field's type
    pub output_type: String,
    pub repeated: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegistrationEntry {
    pub operation_id: String,
    pub service: String,
    pub handler_name: String,
    pub verb: Option<String>,
    pub pattern: Option<String>,
}

/// Server interface a service implementation must satisfy
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServiceInterface {
    pub name: String,
    pub qualified_name: String,
    pub methods: Vec<MethodSignature>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MethodSignature {
    pub method: String,
    pub handler_name: String,
    pub request: String,
    pub response: String,
    pub operation_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExtraDataEntry {
    pub operation_id: String,
    pub options: Vec<MethodOption>,
}
