//! API metadata builder.
//!
//! Converts raw [`PathMetadata`] into per-resource naming and method
//! metadata. The builder is a list of steps, each taking the path and the
//! partially built result and returning the next result.

use std::collections::HashMap;

use octogen_schema::{
    HttpMethod, ObjectSchema, ParameterLocation, PathMetadata, PrimitiveType, PropertyType,
    ResponseContent, VerbResult,
};

use crate::naming;

/// Directory generated client files are placed under.
const CLIENTS_DIR: &str = "Octokit/Clients";

/// Everything needed to emit one client file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApiClientFileMetadata {
    /// Path template the resource was built from.
    pub path: String,

    /// Relative output path, e.g. `Octokit/Clients/MarketplaceListingAccounts.cs`.
    pub file_name: String,

    pub class_name: String,

    /// Always `I` + `class_name`.
    pub interface_name: String,

    /// One method per verb, in verb order.
    pub methods: Vec<ApiMethodResult>,
}

/// A single generated client method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiMethodResult {
    /// Method name from the verb table.
    pub name: String,

    pub verb: HttpMethod,

    /// Required path parameters, in declaration order.
    pub parameters: Vec<ApiParameterResult>,

    pub return_type: ResponseType,

    /// Media type to request instead of the connection default.
    pub accept_header: Option<String>,
}

/// A method parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiParameterResult {
    /// C# identifier, e.g. `accountId`.
    pub name: String,

    /// Name as declared in the schema and used in the path template.
    pub original_name: String,

    pub kind: PrimitiveType,
}

/// What a method returns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResponseType {
    /// A single model instance.
    Object(ApiModel),
    /// A read-only list of model instances.
    List(ApiModel),
    /// No usable response schema.
    Unknown,
}

impl ResponseType {
    /// The model carried by this response, if any.
    #[must_use]
    pub const fn model(&self) -> Option<&ApiModel> {
        match self {
            Self::Object(model) | Self::List(model) => Some(model),
            Self::Unknown => None,
        }
    }

    const fn model_mut(&mut self) -> Option<&mut ApiModel> {
        match self {
            Self::Object(model) | Self::List(model) => Some(model),
            Self::Unknown => None,
        }
    }
}

/// A response model class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiModel {
    pub name: String,
    pub properties: Vec<ApiProperty>,
}

/// A model property.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiProperty {
    /// C# property name.
    pub name: String,

    /// Field name in the JSON payload.
    pub json_name: String,

    pub kind: ApiPropertyType,
}

/// Type of a model property.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiPropertyType {
    Primitive(PrimitiveType),
    /// A nested model class.
    Model(ApiModel),
    List(Box<ApiPropertyType>),
}

impl ApiModel {
    /// Build a model from an object schema, naming nested objects
    /// `{name}{Property}`.
    #[must_use]
    pub fn from_schema(name: &str, schema: &ObjectSchema) -> Self {
        let properties = schema
            .properties
            .iter()
            .map(|property| {
                let prop_name = naming::property_name(&property.name);
                let kind = property_type(&format!("{name}{prop_name}"), &property.kind);
                ApiProperty {
                    name: prop_name,
                    json_name: property.name.clone(),
                    kind,
                }
            })
            .collect();

        Self {
            name: name.to_string(),
            properties,
        }
    }

    /// This model followed by every nested model, depth first.
    #[must_use]
    pub fn flatten(&self) -> Vec<&Self> {
        let mut models = vec![self];
        for property in &self.properties {
            collect_nested(&property.kind, &mut models);
        }
        models
    }
}

fn property_type(nested_name: &str, kind: &PropertyType) -> ApiPropertyType {
    match kind {
        PropertyType::Primitive(primitive) => ApiPropertyType::Primitive(primitive.clone()),
        PropertyType::Object(object) => {
            ApiPropertyType::Model(ApiModel::from_schema(nested_name, object))
        }
        PropertyType::Array(item) => {
            ApiPropertyType::List(Box::new(property_type(nested_name, item)))
        }
    }
}

fn collect_nested<'a>(kind: &'a ApiPropertyType, models: &mut Vec<&'a ApiModel>) {
    match kind {
        ApiPropertyType::Primitive(_) => {}
        ApiPropertyType::Model(model) => models.extend(model.flatten()),
        ApiPropertyType::List(item) => collect_nested(item, models),
    }
}

/// A single builder step.
pub type BuildStep = fn(&PathMetadata, ApiClientFileMetadata) -> ApiClientFileMetadata;

/// Runs registered steps in order to produce [`ApiClientFileMetadata`].
#[derive(Debug, Clone)]
pub struct ApiBuilder {
    steps: Vec<BuildStep>,
}

impl Default for ApiBuilder {
    /// Builder with the naming, method and model naming steps registered.
    fn default() -> Self {
        let mut builder = Self::empty();
        builder.register(add_type_names);
        builder.register(add_method_for_each_verb);
        builder.register(disambiguate_model_names);
        builder
    }
}

impl ApiBuilder {
    /// Create a builder with no steps.
    #[must_use]
    pub const fn empty() -> Self {
        Self { steps: Vec::new() }
    }

    /// Append a step.
    pub fn register(&mut self, step: BuildStep) -> &mut Self {
        self.steps.push(step);
        self
    }

    /// Run every step over the path.
    #[must_use]
    pub fn build(&self, metadata: &PathMetadata) -> ApiClientFileMetadata {
        let initial = ApiClientFileMetadata {
            path: metadata.path.clone(),
            ..ApiClientFileMetadata::default()
        };
        self.steps
            .iter()
            .fold(initial, |data, step| step(metadata, data))
    }
}

/// Derive class, interface and file names from the path.
#[must_use]
pub fn add_type_names(
    metadata: &PathMetadata,
    mut data: ApiClientFileMetadata,
) -> ApiClientFileMetadata {
    let class_name = naming::class_name(&metadata.path);
    data.interface_name = format!("I{class_name}");
    data.file_name = format!("{CLIENTS_DIR}/{class_name}.cs");
    data.class_name = class_name;
    data
}

/// Add one method per verb.
///
/// Needs `class_name`, so it must run after [`add_type_names`].
#[must_use]
pub fn add_method_for_each_verb(
    metadata: &PathMetadata,
    mut data: ApiClientFileMetadata,
) -> ApiClientFileMetadata {
    for verb in &metadata.verbs {
        let method = ApiMethodResult {
            name: method_name(verb.method).to_string(),
            verb: verb.method,
            parameters: method_parameters(verb),
            return_type: return_type(&data.class_name, verb),
            accept_header: verb.accept_header.clone(),
        };
        data.methods.push(method);
    }
    data
}

/// Rename models whose derived names clash but whose shapes differ.
///
/// `owner.plan` and `owner_plan` both derive `{Model}OwnerPlan`; the later
/// shape gets a numeric suffix. Identical shapes keep the shared name and
/// are emitted once.
#[must_use]
pub fn disambiguate_model_names(
    _metadata: &PathMetadata,
    mut data: ApiClientFileMetadata,
) -> ApiClientFileMetadata {
    let mut seen: HashMap<String, Vec<ApiProperty>> = HashMap::new();
    for method in &mut data.methods {
        if let Some(model) = method.return_type.model_mut() {
            claim_model_name(model, &mut seen);
        }
    }
    data
}

// Children first, so a parent's recorded shape carries their final names.
fn claim_model_name(model: &mut ApiModel, seen: &mut HashMap<String, Vec<ApiProperty>>) {
    for property in &mut model.properties {
        claim_nested_names(&mut property.kind, seen);
    }

    let base = model.name.clone();
    let mut suffix = 1;
    loop {
        match seen
            .get(&model.name)
            .map(|shape| *shape == model.properties)
        {
            None => {
                seen.insert(model.name.clone(), model.properties.clone());
                return;
            }
            Some(true) => return,
            Some(false) => {
                suffix += 1;
                model.name = format!("{base}{suffix}");
            }
        }
    }
}

fn claim_nested_names(kind: &mut ApiPropertyType, seen: &mut HashMap<String, Vec<ApiProperty>>) {
    match kind {
        ApiPropertyType::Primitive(_) => {}
        ApiPropertyType::Model(model) => claim_model_name(model, seen),
        ApiPropertyType::List(item) => claim_nested_names(item, seen),
    }
}

/// Method name for a verb. Verbs without a convention get `???`.
#[must_use]
pub const fn method_name(verb: HttpMethod) -> &'static str {
    match verb {
        HttpMethod::Get => "Get",
        HttpMethod::Delete => "Delete",
        HttpMethod::Put => "GetOrCreate",
        _ => "???",
    }
}

// Only required path parameters are supported for now; query parameters
// and optional values are dropped.
fn method_parameters(verb: &VerbResult) -> Vec<ApiParameterResult> {
    verb.parameters
        .iter()
        .filter(|p| p.required && p.location == ParameterLocation::Path)
        .map(|p| ApiParameterResult {
            name: naming::parameter_identifier(&p.name),
            original_name: p.name.clone(),
            kind: p.kind.clone(),
        })
        .collect()
}

fn return_type(class_name: &str, verb: &VerbResult) -> ResponseType {
    let content = verb
        .responses
        .iter()
        .filter(|r| r.is_success())
        .find_map(|r| r.content.as_ref());

    let model_name = match verb.method {
        HttpMethod::Get => format!("{class_name}Response"),
        other => {
            let verb_name = naming::pascal_case(&other.as_str().to_ascii_lowercase());
            format!("{class_name}{verb_name}Response")
        }
    };

    match content {
        Some(ResponseContent::Object(object)) => {
            ResponseType::Object(ApiModel::from_schema(&model_name, object))
        }
        Some(ResponseContent::Array(object)) => {
            ResponseType::List(ApiModel::from_schema(&model_name, object))
        }
        None => ResponseType::Unknown,
    }
}
