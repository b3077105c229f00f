//! Path item processing.
//!
//! Walks a single OpenAPI path item and extracts the verbs, parameters and
//! response shapes the generator understands. Anything it cannot use is
//! recorded in [`Diagnostics`] and skipped; processing never aborts.

use serde_json::{Map, Value};

use crate::diagnostics::{Diagnostics, WarningKind};
use crate::model::{
    HttpMethod, ObjectSchema, Parameter, ParameterLocation, PathMetadata, PrimitiveType, Property,
    PropertyType, Response, ResponseContent, VerbResult,
};
use crate::reader::{PathEntry, SchemaDocument};

/// Deepest nesting of objects and arrays a property may describe.
const MAX_NESTING: usize = 8;

/// Path item fields that are not verbs.
const PATH_ITEM_FIELDS: &[&str] = &["parameters", "summary", "description", "servers"];

static NULL: Value = Value::Null;

/// Process one path entry into [`PathMetadata`].
///
/// Only `get` verbs are extracted. Other verbs, malformed parameters and
/// untyped properties are skipped with a warning.
pub fn process(
    doc: &SchemaDocument,
    entry: &PathEntry<'_>,
    diagnostics: &mut Diagnostics,
) -> PathMetadata {
    let mut ctx = Ctx {
        doc,
        path: entry.path,
        diagnostics,
    };
    let mut metadata = PathMetadata::new(entry.path);

    let item = match doc.resolve(entry.value) {
        Ok(item) => item,
        Err(pointer) => {
            ctx.warn("", WarningKind::UnresolvedRef(pointer));
            return metadata;
        }
    };
    let Some(item) = item.as_object() else {
        return metadata;
    };

    let shared = item
        .get("parameters")
        .map(|params| ctx.parameters(params, "parameters"))
        .unwrap_or_default();

    for (key, value) in item {
        if PATH_ITEM_FIELDS.contains(&key.as_str()) {
            continue;
        }

        if HttpMethod::parse(key) != Some(HttpMethod::Get) {
            ctx.warn("", WarningKind::UnsupportedVerb(key.clone()));
            continue;
        }

        let Some(verb) = value.as_object() else {
            ctx.warn("", WarningKind::MalformedVerb(key.clone()));
            continue;
        };

        metadata
            .verbs
            .push(ctx.verb(HttpMethod::Get, key, verb, &shared));
    }

    metadata
}

/// A parameter entry after parsing.
#[derive(Debug, Clone)]
enum ParsedParameter {
    /// `accept` header default, used as the verb's media type.
    Accept(String),
    Parameter(Parameter),
}

/// Per-path processing state.
struct Ctx<'a, 'd> {
    doc: &'a SchemaDocument,
    path: &'a str,
    diagnostics: &'d mut Diagnostics,
}

impl<'a> Ctx<'a, '_> {
    fn warn(&mut self, context: &str, kind: WarningKind) {
        self.diagnostics.warn(self.path, context, kind);
    }

    fn resolve(&mut self, context: &str, value: &'a Value) -> Option<&'a Value> {
        match self.doc.resolve(value) {
            Ok(resolved) => Some(resolved),
            Err(pointer) => {
                self.warn(context, WarningKind::UnresolvedRef(pointer));
                None
            }
        }
    }

    fn verb(
        &mut self,
        method: HttpMethod,
        key: &str,
        verb: &'a Map<String, Value>,
        shared: &[ParsedParameter],
    ) -> VerbResult {
        let mut result = VerbResult::new(method);

        let own = verb
            .get("parameters")
            .map(|params| self.parameters(params, &format!("{key} parameters")))
            .unwrap_or_default();

        for parsed in merge_parameters(shared, own) {
            match parsed {
                ParsedParameter::Accept(media_type) => result.accept_header = Some(media_type),
                ParsedParameter::Parameter(parameter) => result.parameters.push(parameter),
            }
        }

        if let Some(responses) = verb.get("responses").and_then(Value::as_object) {
            for (status, raw) in responses {
                let context = format!("{key} responses {status}");
                let Some(response) = self.resolve(&context, raw) else {
                    continue;
                };
                result
                    .responses
                    .extend(self.response(&context, status, response));
            }
        }

        result
    }

    fn parameters(&mut self, params: &'a Value, context: &str) -> Vec<ParsedParameter> {
        let Some(params) = params.as_array() else {
            return Vec::new();
        };

        params
            .iter()
            .filter_map(|raw| {
                let raw = self.resolve(context, raw)?;
                self.parameter(context, raw)
            })
            .collect()
    }

    fn parameter(&mut self, context: &str, raw: &'a Value) -> Option<ParsedParameter> {
        let Some(name) = raw.get("name").and_then(Value::as_str) else {
            self.warn(context, WarningKind::ParameterMissingField("name"));
            return None;
        };
        let Some(location) = raw.get("in").and_then(Value::as_str) else {
            self.warn(context, WarningKind::ParameterMissingField("in"));
            return None;
        };
        let Some(location) = ParameterLocation::parse(location) else {
            self.warn(
                context,
                WarningKind::UnknownParameterLocation(location.to_string()),
            );
            return None;
        };

        let schema = match raw.get("schema") {
            Some(schema) => self.resolve(context, schema)?,
            None => &NULL,
        };

        if location == ParameterLocation::Header && name.eq_ignore_ascii_case("accept") {
            if let Some(default) = schema.get("default").and_then(Value::as_str) {
                return Some(ParsedParameter::Accept(default.to_string()));
            }
        }

        let Some(tag) = type_tag(schema) else {
            self.warn(context, WarningKind::ParameterWithoutType(name.to_string()));
            return None;
        };

        let required = raw
            .get("required")
            .and_then(Value::as_bool)
            .unwrap_or(location == ParameterLocation::Path);

        Some(ParsedParameter::Parameter(Parameter {
            name: name.to_string(),
            location,
            kind: PrimitiveType::from_tag(tag),
            required,
        }))
    }

    fn response(&mut self, context: &str, status: &str, raw: &'a Value) -> Vec<Response> {
        let Some(content) = raw.get("content").and_then(Value::as_object) else {
            return Vec::new();
        };

        let mut responses = Vec::with_capacity(content.len());
        for (content_type, media) in content {
            let body = match media.get("schema") {
                Some(schema) => self
                    .resolve(context, schema)
                    .and_then(|schema| self.response_content(context, schema)),
                None => None,
            };
            responses.push(Response {
                status_code: status.to_string(),
                content_type: content_type.clone(),
                content: body,
            });
        }
        responses
    }

    fn response_content(&mut self, context: &str, schema: &'a Value) -> Option<ResponseContent> {
        match type_tag(schema) {
            Some("array") => {
                let items = self.resolve(context, schema.get("items")?)?;
                let properties = properties(items)?;
                if !is_object(items) {
                    return None;
                }
                Some(ResponseContent::Array(self.object(context, properties, 0)))
            }
            _ if is_object(schema) => {
                let properties = properties(schema)?;
                Some(ResponseContent::Object(self.object(context, properties, 0)))
            }
            _ => None,
        }
    }

    fn object(
        &mut self,
        context: &str,
        properties: &'a Map<String, Value>,
        depth: usize,
    ) -> ObjectSchema {
        let mut object = ObjectSchema::default();
        for (name, raw) in properties {
            let Some(schema) = self.resolve(context, raw) else {
                continue;
            };
            if let Some(kind) = self.property_type(context, name, schema, depth) {
                object.properties.push(Property {
                    name: name.clone(),
                    kind,
                });
            }
        }
        object
    }

    fn property_type(
        &mut self,
        context: &str,
        name: &str,
        schema: &'a Value,
        depth: usize,
    ) -> Option<PropertyType> {
        if is_object(schema) {
            // Free-form objects map to a plain object reference.
            let Some(properties) = properties(schema) else {
                return Some(PropertyType::Primitive(PrimitiveType::Other(
                    "object".into(),
                )));
            };
            if depth + 1 >= MAX_NESTING {
                self.warn(context, WarningKind::NestingTooDeep(name.to_string()));
                return None;
            }
            return Some(PropertyType::Object(self.object(
                context,
                properties,
                depth + 1,
            )));
        }

        match type_tag(schema) {
            Some("array") => {
                if depth + 1 >= MAX_NESTING {
                    self.warn(context, WarningKind::NestingTooDeep(name.to_string()));
                    return None;
                }
                let item = match schema.get("items") {
                    Some(items) => {
                        let items = self.resolve(context, items)?;
                        self.property_type(context, name, items, depth + 1)?
                    }
                    None => PropertyType::Primitive(PrimitiveType::Other("object".into())),
                };
                Some(PropertyType::Array(Box::new(item)))
            }
            Some(tag) => Some(PropertyType::Primitive(PrimitiveType::from_tag(tag))),
            None => {
                self.warn(context, WarningKind::PropertyWithoutType(name.to_string()));
                None
            }
        }
    }
}

/// Overlay verb parameters on path-level ones; same name and location replaces.
fn merge_parameters(
    shared: &[ParsedParameter],
    own: Vec<ParsedParameter>,
) -> Vec<ParsedParameter> {
    let mut merged = shared.to_vec();
    for parsed in own {
        let existing = match &parsed {
            ParsedParameter::Accept(_) => merged
                .iter()
                .position(|p| matches!(p, ParsedParameter::Accept(_))),
            ParsedParameter::Parameter(param) => merged.iter().position(|p| {
                matches!(p, ParsedParameter::Parameter(other)
                    if other.name == param.name && other.location == param.location)
            }),
        };
        match existing {
            Some(index) => merged[index] = parsed,
            None => merged.push(parsed),
        }
    }
    merged
}

/// Read a schema `type`, taking the first non-null entry of a type list.
fn type_tag(schema: &Value) -> Option<&str> {
    match schema.get("type")? {
        Value::String(tag) => Some(tag),
        Value::Array(tags) => tags
            .iter()
            .filter_map(Value::as_str)
            .find(|tag| *tag != "null"),
        _ => None,
    }
}

fn is_object(schema: &Value) -> bool {
    match type_tag(schema) {
        Some(tag) => tag == "object",
        None => schema.get("properties").is_some(),
    }
}

fn properties(schema: &Value) -> Option<&Map<String, Value>> {
    schema.get("properties").and_then(Value::as_object)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    fn run(doc: &Value, path: &str) -> (PathMetadata, Diagnostics) {
        let doc = SchemaDocument::from_value(doc.clone());
        let mut diagnostics = Diagnostics::new();
        let entries = doc.paths().unwrap();
        let entry = entries.iter().find(|e| e.path == path).unwrap();
        let metadata = process(&doc, entry, &mut diagnostics);
        (metadata, diagnostics)
    }

    fn account_schema() -> Value {
        json!({
            "paths": {
                "/marketplace_listing/accounts/{account_id}": {
                    "get": {
                        "parameters": [
                            {
                                "name": "accept",
                                "in": "header",
                                "schema": {"type": "string", "default": "application/vnd.github.v3+json"}
                            },
                            {
                                "name": "account_id",
                                "in": "path",
                                "required": true,
                                "schema": {"type": "integer"}
                            }
                        ],
                        "responses": {
                            "200": {
                                "content": {
                                    "application/json": {
                                        "schema": {
                                            "type": "object",
                                            "properties": {
                                                "id": {"type": "integer"},
                                                "login": {"type": "string"}
                                            }
                                        }
                                    }
                                }
                            },
                            "404": {"description": "Not Found"}
                        }
                    }
                }
            }
        })
    }

    #[test]
    fn test_get_verb_extracted() {
        let (metadata, diagnostics) =
            run(&account_schema(), "/marketplace_listing/accounts/{account_id}");

        assert!(diagnostics.is_empty());
        assert_eq!(metadata.verbs.len(), 1);

        let verb = &metadata.verbs[0];
        assert_eq!(verb.method, HttpMethod::Get);
        assert_eq!(
            verb.accept_header.as_deref(),
            Some("application/vnd.github.v3+json")
        );
        assert_eq!(
            verb.parameters,
            vec![Parameter {
                name: "account_id".into(),
                location: ParameterLocation::Path,
                kind: PrimitiveType::Integer,
                required: true,
            }]
        );
    }

    #[test]
    fn test_object_response_properties() {
        let (metadata, _) = run(&account_schema(), "/marketplace_listing/accounts/{account_id}");

        let responses = &metadata.verbs[0].responses;
        assert_eq!(responses.len(), 1, "404 without content is skipped");
        assert_eq!(responses[0].status_code, "200");
        assert_eq!(responses[0].content_type, "application/json");

        let Some(ResponseContent::Object(object)) = &responses[0].content else {
            panic!("expected object content");
        };
        assert_eq!(
            object.properties,
            vec![
                Property::primitive("id", PrimitiveType::Integer),
                Property::primitive("login", PrimitiveType::String),
            ]
        );
    }

    #[test]
    fn test_unsupported_verbs_skipped() {
        let doc = json!({
            "paths": {
                "/user": {
                    "summary": "the user",
                    "patch": {"responses": {}},
                    "get": {"responses": {}},
                    "teleport": {}
                }
            }
        });

        let (metadata, diagnostics) = run(&doc, "/user");
        assert_eq!(metadata.verbs.len(), 1);

        let kinds: Vec<_> = diagnostics.warnings().iter().map(|w| &w.kind).collect();
        assert_eq!(
            kinds,
            [
                &WarningKind::UnsupportedVerb("patch".into()),
                &WarningKind::UnsupportedVerb("teleport".into()),
            ]
        );
    }

    #[test]
    fn test_uppercase_get_recognised() {
        let doc = json!({"paths": {"/meta": {"GET": {}}}});
        let (metadata, diagnostics) = run(&doc, "/meta");
        assert_eq!(metadata.verbs.len(), 1);
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_malformed_verb_skipped() {
        let doc = json!({"paths": {"/meta": {"get": "nope"}}});
        let (metadata, diagnostics) = run(&doc, "/meta");
        assert!(metadata.verbs.is_empty());
        assert_eq!(
            diagnostics.warnings()[0].kind,
            WarningKind::MalformedVerb("get".into())
        );
    }

    #[test]
    fn test_malformed_parameter_dropped_valid_kept() {
        let doc = json!({
            "paths": {
                "/orgs/{org}": {
                    "get": {
                        "parameters": [
                            {"in": "path", "schema": {"type": "string"}},
                            {"name": "org", "in": "path", "required": true, "schema": {"type": "string"}},
                            {"name": "per_page", "schema": {"type": "integer"}}
                        ]
                    }
                },
                "/meta": {"get": {}}
            }
        });

        let (metadata, diagnostics) = run(&doc, "/orgs/{org}");
        let names: Vec<_> = metadata.verbs[0]
            .parameters
            .iter()
            .map(|p| p.name.as_str())
            .collect();
        assert_eq!(names, ["org"]);

        let kinds: Vec<_> = diagnostics.warnings().iter().map(|w| &w.kind).collect();
        assert_eq!(
            kinds,
            [
                &WarningKind::ParameterMissingField("name"),
                &WarningKind::ParameterMissingField("in"),
            ]
        );

        let (meta, _) = run(&doc, "/meta");
        assert_eq!(meta.verbs.len(), 1, "other paths still processed");
    }

    #[test]
    fn test_parameter_without_type_dropped() {
        let doc = json!({
            "paths": {
                "/search": {
                    "get": {
                        "parameters": [
                            {"name": "q", "in": "query"},
                            {"name": "sort", "in": "body", "schema": {"type": "string"}},
                            {"name": "page", "in": "query", "schema": {"type": "integer"}}
                        ]
                    }
                }
            }
        });

        let (metadata, diagnostics) = run(&doc, "/search");
        let params = &metadata.verbs[0].parameters;
        assert_eq!(params.len(), 1);
        assert_eq!(params[0].name, "page");
        assert!(!params[0].required);
        assert_eq!(diagnostics.warnings().len(), 2);
        assert_eq!(
            diagnostics.warnings()[1].kind,
            WarningKind::UnknownParameterLocation("body".into())
        );
    }

    #[test]
    fn test_accept_header_without_default_is_parameter() {
        let doc = json!({
            "paths": {
                "/meta": {
                    "get": {
                        "parameters": [
                            {"name": "Accept", "in": "header", "schema": {"type": "string"}}
                        ]
                    }
                }
            }
        });

        let (metadata, _) = run(&doc, "/meta");
        let verb = &metadata.verbs[0];
        assert!(verb.accept_header.is_none());
        assert_eq!(verb.parameters[0].location, ParameterLocation::Header);
    }

    #[test]
    fn test_path_parameter_required_by_default() {
        let doc = json!({
            "paths": {
                "/users/{username}": {
                    "get": {
                        "parameters": [
                            {"name": "username", "in": "path", "schema": {"type": "string"}}
                        ]
                    }
                }
            }
        });

        let (metadata, _) = run(&doc, "/users/{username}");
        assert!(metadata.verbs[0].parameters[0].required);
    }

    #[test]
    fn test_refs_and_shared_parameters() {
        let doc = json!({
            "components": {
                "parameters": {
                    "owner": {"name": "owner", "in": "path", "required": true, "schema": {"type": "string"}},
                    "repo": {"name": "repo", "in": "path", "required": true, "schema": {"$ref": "#/components/schemas/name"}}
                },
                "schemas": {
                    "name": {"type": "string"},
                    "repository": {
                        "type": "object",
                        "properties": {"full_name": {"$ref": "#/components/schemas/name"}}
                    }
                }
            },
            "paths": {
                "/repos/{owner}/{repo}": {
                    "parameters": [{"$ref": "#/components/parameters/owner"}],
                    "get": {
                        "parameters": [
                            {"$ref": "#/components/parameters/repo"},
                            {"$ref": "#/components/parameters/missing"}
                        ],
                        "responses": {
                            "200": {
                                "content": {
                                    "application/json": {
                                        "schema": {"$ref": "#/components/schemas/repository"}
                                    }
                                }
                            }
                        }
                    }
                }
            }
        });

        let (metadata, diagnostics) = run(&doc, "/repos/{owner}/{repo}");
        let verb = &metadata.verbs[0];

        let names: Vec<_> = verb.parameters.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["owner", "repo"]);

        assert_eq!(
            verb.responses[0].content,
            Some(ResponseContent::Object(ObjectSchema {
                properties: vec![Property::primitive("full_name", PrimitiveType::String)],
            }))
        );

        assert_eq!(
            diagnostics.warnings()[0].kind,
            WarningKind::UnresolvedRef("#/components/parameters/missing".into())
        );
    }

    #[test]
    fn test_verb_parameter_overrides_shared() {
        let doc = json!({
            "paths": {
                "/gists/{gist_id}": {
                    "parameters": [
                        {"name": "gist_id", "in": "path", "schema": {"type": "string"}}
                    ],
                    "get": {
                        "parameters": [
                            {"name": "gist_id", "in": "path", "required": true, "schema": {"type": "integer"}}
                        ]
                    }
                }
            }
        });

        let (metadata, _) = run(&doc, "/gists/{gist_id}");
        let params = &metadata.verbs[0].parameters;
        assert_eq!(params.len(), 1);
        assert_eq!(params[0].kind, PrimitiveType::Integer);
    }

    #[test]
    fn test_array_response_and_nested_properties() {
        let doc = json!({
            "paths": {
                "/marketplace_listing/plans": {
                    "get": {
                        "responses": {
                            "200": {
                                "content": {
                                    "application/json": {
                                        "schema": {
                                            "type": "array",
                                            "items": {
                                                "type": "object",
                                                "properties": {
                                                    "name": {"type": "string"},
                                                    "bullets": {"type": "array", "items": {"type": "string"}},
                                                    "owner": {
                                                        "type": "object",
                                                        "properties": {"login": {"type": "string"}}
                                                    },
                                                    "extra": {"type": "object"},
                                                    "mystery": {"description": "untyped"}
                                                }
                                            }
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        });

        let (metadata, diagnostics) = run(&doc, "/marketplace_listing/plans");
        let Some(ResponseContent::Array(object)) = &metadata.verbs[0].responses[0].content else {
            panic!("expected array content");
        };

        let props: Vec<_> = object.properties.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(props, ["name", "bullets", "owner", "extra"]);

        assert_eq!(
            object.properties[1].kind,
            PropertyType::Array(Box::new(PropertyType::Primitive(PrimitiveType::String)))
        );
        assert_eq!(
            object.properties[3].kind,
            PropertyType::Primitive(PrimitiveType::Other("object".into()))
        );
        assert_eq!(
            object.properties[2].kind,
            PropertyType::Object(ObjectSchema {
                properties: vec![Property::primitive("login", PrimitiveType::String)],
            })
        );
        assert_eq!(
            diagnostics.warnings()[0].kind,
            WarningKind::PropertyWithoutType("mystery".into())
        );
    }

    #[test]
    fn test_self_referencing_schema_terminates() {
        let doc = json!({
            "components": {
                "schemas": {
                    "node": {
                        "type": "object",
                        "properties": {
                            "id": {"type": "integer"},
                            "parent": {"$ref": "#/components/schemas/node"}
                        }
                    }
                }
            },
            "paths": {
                "/nodes": {
                    "get": {
                        "responses": {
                            "200": {
                                "content": {
                                    "application/json": {
                                        "schema": {"$ref": "#/components/schemas/node"}
                                    }
                                }
                            }
                        }
                    }
                }
            }
        });

        let (metadata, diagnostics) = run(&doc, "/nodes");
        assert!(metadata.verbs[0].responses[0].content.is_some());
        assert_eq!(diagnostics.warnings().len(), 1);
        assert_eq!(
            diagnostics.warnings()[0].kind,
            WarningKind::NestingTooDeep("parent".into())
        );
    }

    #[test]
    fn test_self_referencing_array_terminates() {
        let doc = json!({
            "components": {
                "schemas": {
                    "tree": {"type": "array", "items": {"$ref": "#/components/schemas/tree"}}
                }
            },
            "paths": {
                "/trees": {
                    "get": {
                        "responses": {
                            "200": {
                                "content": {
                                    "application/json": {
                                        "schema": {
                                            "type": "object",
                                            "properties": {
                                                "id": {"type": "integer"},
                                                "children": {"$ref": "#/components/schemas/tree"}
                                            }
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        });

        let (metadata, diagnostics) = run(&doc, "/trees");
        let Some(ResponseContent::Object(object)) = &metadata.verbs[0].responses[0].content else {
            panic!("expected object content");
        };
        assert_eq!(
            object.properties,
            vec![Property::primitive("id", PrimitiveType::Integer)]
        );
        assert_eq!(
            diagnostics.warnings()[0].kind,
            WarningKind::NestingTooDeep("children".into())
        );
        assert_eq!(diagnostics.warnings().len(), 1);
    }

    #[test]
    fn test_properties_keep_schema_order() {
        let doc = json!({
            "paths": {
                "/user": {
                    "get": {
                        "responses": {
                            "200": {
                                "content": {
                                    "application/json": {
                                        "schema": {
                                            "type": "object",
                                            "properties": {
                                                "login": {"type": "string"},
                                                "id": {"type": "integer"},
                                                "avatar_url": {"type": "string"}
                                            }
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        });

        let (metadata, _) = run(&doc, "/user");
        let Some(ResponseContent::Object(object)) = &metadata.verbs[0].responses[0].content else {
            panic!("expected object content");
        };
        let props: Vec<_> = object.properties.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(props, ["login", "id", "avatar_url"]);
    }

    #[test]
    fn test_non_object_response_has_no_content() {
        let doc = json!({
            "paths": {
                "/zen": {
                    "get": {
                        "responses": {
                            "200": {"content": {"text/plain": {"schema": {"type": "string"}}}}
                        }
                    }
                }
            }
        });

        let (metadata, _) = run(&doc, "/zen");
        let response = &metadata.verbs[0].responses[0];
        assert_eq!(response.content_type, "text/plain");
        assert!(response.content.is_none());
    }

    #[test]
    fn test_nullable_type_list() {
        let schema = json!({"type": ["null", "integer"]});
        assert_eq!(type_tag(&schema), Some("integer"));
        assert_eq!(type_tag(&json!({"type": ["null"]})), None);
    }
}
