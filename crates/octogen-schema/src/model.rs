//! Raw path metadata extracted from an OpenAPI schema.

use std::fmt;

/// A single path template and the verbs declared on it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathMetadata {
    /// URL path template, e.g. `/marketplace_listing/accounts/{account_id}`.
    pub path: String,

    /// Verbs the processor understood, in schema order.
    pub verbs: Vec<VerbResult>,
}

impl PathMetadata {
    /// Create path metadata with no verbs.
    #[must_use]
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            verbs: Vec::new(),
        }
    }
}

/// One HTTP method on a path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerbResult {
    /// The HTTP method.
    pub method: HttpMethod,

    /// Media type from an `accept` header parameter's schema default.
    pub accept_header: Option<String>,

    /// Declared parameters that had a name, location and type.
    pub parameters: Vec<Parameter>,

    /// Declared responses that carried content.
    pub responses: Vec<Response>,
}

impl VerbResult {
    /// Create an empty verb entry.
    #[must_use]
    pub const fn new(method: HttpMethod) -> Self {
        Self {
            method,
            accept_header: None,
            parameters: Vec::new(),
            responses: Vec::new(),
        }
    }
}

/// HTTP methods that may appear under an OpenAPI path item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Put,
    Post,
    Delete,
    Patch,
    Head,
    Options,
}

impl HttpMethod {
    /// Parse a path item key, ignoring case.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "get" => Some(Self::Get),
            "put" => Some(Self::Put),
            "post" => Some(Self::Post),
            "delete" => Some(Self::Delete),
            "patch" => Some(Self::Patch),
            "head" => Some(Self::Head),
            "options" => Some(Self::Options),
            _ => None,
        }
    }

    /// Upper-case method name as sent on the wire.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Put => "PUT",
            Self::Post => "POST",
            Self::Delete => "DELETE",
            Self::Patch => "PATCH",
            Self::Head => "HEAD",
            Self::Options => "OPTIONS",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A declared operation parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
    /// Name as written in the schema (`account_id`).
    pub name: String,

    /// Where the parameter is sent.
    pub location: ParameterLocation,

    /// Primitive type tag from `schema.type`.
    pub kind: PrimitiveType,

    /// Whether the parameter must be supplied.
    pub required: bool,
}

/// The `in` field of a parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParameterLocation {
    Path,
    Query,
    Header,
    Cookie,
}

impl ParameterLocation {
    /// Parse an `in` value. Unknown locations yield `None`.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "path" => Some(Self::Path),
            "query" => Some(Self::Query),
            "header" => Some(Self::Header),
            "cookie" => Some(Self::Cookie),
            _ => None,
        }
    }
}

/// Scalar type tag from a JSON schema `type` field.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PrimitiveType {
    String,
    Integer,
    Boolean,
    Number,
    /// Any other tag, kept verbatim.
    Other(String),
}

impl PrimitiveType {
    /// Classify a `type` tag.
    #[must_use]
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "string" => Self::String,
            "integer" => Self::Integer,
            "boolean" => Self::Boolean,
            "number" => Self::Number,
            other => Self::Other(other.to_string()),
        }
    }

    /// The tag as it appears in the schema.
    #[must_use]
    pub fn tag(&self) -> &str {
        match self {
            Self::String => "string",
            Self::Integer => "integer",
            Self::Boolean => "boolean",
            Self::Number => "number",
            Self::Other(tag) => tag,
        }
    }
}

/// A response entry that declared content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    /// Status code key, e.g. `"200"` or `"default"`.
    pub status_code: String,

    /// Media type key under `content`.
    pub content_type: String,

    /// Parsed body shape, if it was an object or a list of objects.
    pub content: Option<ResponseContent>,
}

impl Response {
    /// Whether the status code is in the 2xx range.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status_code.len() == 3 && self.status_code.starts_with('2')
    }
}

/// The shape of a response body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResponseContent {
    /// A single object.
    Object(ObjectSchema),
    /// A JSON array of objects.
    Array(ObjectSchema),
}

/// An object schema flattened to its named properties.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ObjectSchema {
    pub properties: Vec<Property>,
}

/// A named property of an object schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Property {
    pub name: String,
    pub kind: PropertyType,
}

impl Property {
    /// Create a primitive-typed property.
    #[must_use]
    pub fn primitive(name: impl Into<String>, kind: PrimitiveType) -> Self {
        Self {
            name: name.into(),
            kind: PropertyType::Primitive(kind),
        }
    }
}

/// Type of an object property.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropertyType {
    Primitive(PrimitiveType),
    Object(ObjectSchema),
    Array(Box<PropertyType>),
}
