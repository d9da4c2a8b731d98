use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Top-level API description document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Spec {
    #[serde(default)]
    pub openapi: String,

    /// Path template -> operations available on it
    #[serde(default)]
    pub paths: BTreeMap<String, PathItem>,

    #[serde(default)]
    pub components: Option<Components>,
}

/// Reusable objects shared across the document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Components {
    /// Named schema definitions addressed by `#/components/schemas/<name>`
    #[serde(default)]
    pub schemas: BTreeMap<String, SchemaRef>,
}

/// Operations available on a single path template
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct PathItem {
    #[serde(default)]
    pub get: Option<Operation>,
    #[serde(default)]
    pub put: Option<Operation>,
    #[serde(default)]
    pub post: Option<Operation>,
    #[serde(default)]
    pub delete: Option<Operation>,
    #[serde(default)]
    pub options: Option<Operation>,
    #[serde(default)]
    pub head: Option<Operation>,
    #[serde(default)]
    pub patch: Option<Operation>,
    #[serde(default)]
    pub trace: Option<Operation>,
}

impl PathItem {
    /// Operations present on this path item, keyed by uppercase HTTP method
    pub fn operations(&self) -> Vec<(&'static str, &Operation)> {
        let candidates = [
            ("GET", &self.get),
            ("PUT", &self.put),
            ("POST", &self.post),
            ("DELETE", &self.delete),
            ("OPTIONS", &self.options),
            ("HEAD", &self.head),
            ("PATCH", &self.patch),
            ("TRACE", &self.trace),
        ];

        candidates
            .into_iter()
            .filter_map(|(method, op)| op.as_ref().map(|op| (method, op)))
            .collect()
    }
}

/// A single API operation (method + path)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Operation {
    #[serde(default)]
    pub tags: Vec<String>,

    #[serde(default)]
    pub summary: Option<String>,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default, rename = "operationId")]
    pub operation_id: Option<String>,

    #[serde(default)]
    pub deprecated: bool,

    #[serde(default)]
    pub parameters: Vec<Parameter>,

    #[serde(default, rename = "requestBody")]
    pub request_body: Option<RequestBody>,

    /// Status code -> response description
    #[serde(default)]
    pub responses: BTreeMap<String, Response>,

    /// Callback name -> out-of-band path item
    #[serde(default)]
    pub callbacks: BTreeMap<String, PathItem>,

    #[serde(default)]
    pub servers: Vec<Server>,
}

/// An operation input described by its name and location (query, path, header, cookie)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Parameter {
    pub name: String,

    #[serde(rename = "in")]
    pub location: String,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub required: bool,

    #[serde(default)]
    pub deprecated: bool,

    #[serde(default)]
    pub schema: Option<SchemaRef>,

    #[serde(default)]
    pub content: BTreeMap<String, MediaType>,

    #[serde(default)]
    pub example: Option<Value>,
}

/// Request payload description
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct RequestBody {
    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub required: bool,

    /// Media type -> payload description
    #[serde(default)]
    pub content: BTreeMap<String, MediaType>,
}

/// Payload description for one media type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct MediaType {
    #[serde(default)]
    pub schema: Option<SchemaRef>,

    #[serde(default)]
    pub example: Option<Value>,
}

/// A single response of an operation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Response {
    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub headers: BTreeMap<String, Header>,

    #[serde(default)]
    pub content: BTreeMap<String, MediaType>,
}

/// A response header description
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Header {
    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub required: bool,

    #[serde(default)]
    pub deprecated: bool,

    #[serde(default)]
    pub schema: Option<SchemaRef>,
}

/// A server hosting the API or an operation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Server {
    pub url: String,

    #[serde(default)]
    pub description: Option<String>,
}

/// Either a `$ref` to a named schema or an inline schema definition.
///
/// The `Reference` variant must come first so that untagged deserialization
/// claims any map carrying a `$ref` key before falling back to `Inline`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SchemaRef {
    Reference {
        #[serde(rename = "$ref")]
        reference: String,
    },
    Inline(Box<Schema>),
}

impl SchemaRef {
    /// Full reference string if this is a `$ref`, e.g. `#/components/schemas/Pet`
    pub fn reference(&self) -> Option<&str> {
        match self {
            SchemaRef::Reference { reference } => Some(reference),
            SchemaRef::Inline(_) => None,
        }
    }

    /// Final segment of the reference string, used to look the schema up in components
    pub fn name(&self) -> Option<&str> {
        self.reference()
            .map(|r| r.rsplit('/').next().unwrap_or(r))
    }

    /// Inline schema if this is not a `$ref`
    pub fn as_inline(&self) -> Option<&Schema> {
        match self {
            SchemaRef::Reference { .. } => None,
            SchemaRef::Inline(schema) => Some(schema),
        }
    }
}

/// A schema definition: https://swagger.io/specification/#schema-object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Schema {
    #[serde(default, rename = "type")]
    pub schema_type: Option<String>,

    #[serde(default)]
    pub format: Option<String>,

    #[serde(default)]
    pub title: Option<String>,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub default: Option<Value>,

    #[serde(default)]
    pub nullable: bool,

    #[serde(default)]
    pub deprecated: bool,

    #[serde(default, rename = "readOnly")]
    pub read_only: bool,

    #[serde(default, rename = "writeOnly")]
    pub write_only: bool,

    #[serde(default, rename = "enum")]
    pub enum_values: Vec<Value>,

    /// Property names that must be present on conforming objects
    #[serde(default)]
    pub required: Vec<String>,

    #[serde(default)]
    pub properties: BTreeMap<String, SchemaRef>,

    #[serde(default)]
    pub items: Option<Box<SchemaRef>>,

    #[serde(default, rename = "allOf")]
    pub all_of: Vec<SchemaRef>,

    #[serde(default, rename = "oneOf")]
    pub one_of: Vec<SchemaRef>,

    #[serde(default, rename = "anyOf")]
    pub any_of: Vec<SchemaRef>,

    #[serde(default)]
    pub not: Option<Box<SchemaRef>>,

    #[serde(default)]
    pub minimum: Option<f64>,

    #[serde(default)]
    pub maximum: Option<f64>,

    #[serde(default, rename = "exclusiveMinimum")]
    pub exclusive_minimum: bool,

    #[serde(default, rename = "exclusiveMaximum")]
    pub exclusive_maximum: bool,

    #[serde(default, rename = "multipleOf")]
    pub multiple_of: Option<f64>,

    #[serde(default, rename = "minLength")]
    pub min_length: Option<u64>,

    #[serde(default, rename = "maxLength")]
    pub max_length: Option<u64>,

    #[serde(default)]
    pub pattern: Option<String>,

    #[serde(default, rename = "minItems")]
    pub min_items: Option<u64>,

    #[serde(default, rename = "maxItems")]
    pub max_items: Option<u64>,

    #[serde(default, rename = "uniqueItems")]
    pub unique_items: bool,

    #[serde(default)]
    pub example: Option<Value>,
}
