//! API metadata -> C# syntax tree.

use octogen_schema::{HttpMethod, PrimitiveType};

use crate::ast::{
    ClassDecl, CompilationUnit, ConstructorDecl, Expr, InterfaceDecl, InterpolatedPart, Member,
    MethodDecl, MethodSignature, Namespace, ParameterDecl, PropertyDecl, Stmt, TypeDecl,
    TypeSyntax,
};
use crate::builder::{ApiClientFileMetadata, ApiMethodResult, ApiModel, ApiPropertyType, ResponseType};
use crate::error::{Error, Result};
use crate::uri::{UriPart, UriTemplate};

/// Base class every generated client extends.
pub const BASE_CLIENT: &str = "ApiClient";

/// Connection type passed to the client constructor.
pub const CONNECTION_TYPE: &str = "IApiConnection";

const USINGS: &[&str] = &["System", "System.Collections.Generic", "System.Threading.Tasks"];

/// Build the compilation unit for one client file.
///
/// Contains the response models, the interface and the implementation
/// class, in that order.
///
/// # Errors
/// Returns an error if the path yields no class name, or a GET method's URI
/// can't be reconstructed from the path template.
pub fn compilation_unit(
    metadata: &ApiClientFileMetadata,
    namespace: &str,
) -> Result<CompilationUnit> {
    if metadata.class_name.is_empty() {
        return Err(Error::EmptyClassName {
            path: metadata.path.clone(),
        });
    }

    let mut members: Vec<TypeDecl> = models(metadata)
        .into_iter()
        .map(|model| TypeDecl::Class(model_class(model)))
        .collect();
    members.push(TypeDecl::Interface(interface(metadata)));
    members.push(TypeDecl::Class(client_class(metadata)?));

    Ok(CompilationUnit {
        usings: USINGS.iter().map(ToString::to_string).collect(),
        namespace: Namespace {
            name: namespace.to_string(),
            members,
        },
    })
}

/// Map a schema primitive to a C# type.
#[must_use]
pub fn primitive_type(kind: &PrimitiveType) -> TypeSyntax {
    match kind {
        PrimitiveType::Number => TypeSyntax::named("long"),
        PrimitiveType::Integer => TypeSyntax::named("int"),
        PrimitiveType::Boolean => TypeSyntax::named("bool"),
        PrimitiveType::String => TypeSyntax::named("string"),
        PrimitiveType::Other(tag) => TypeSyntax::named(tag.as_str()),
    }
}

/// Every distinct model used by the client's methods, nested ones included.
fn models(metadata: &ApiClientFileMetadata) -> Vec<&ApiModel> {
    let mut models: Vec<&ApiModel> = Vec::new();
    for model in metadata
        .methods
        .iter()
        .filter_map(|method| method.return_type.model())
        .flat_map(ApiModel::flatten)
    {
        if !models.iter().any(|m| m.name == model.name) {
            models.push(model);
        }
    }
    models
}

fn model_class(model: &ApiModel) -> ClassDecl {
    ClassDecl {
        name: model.name.clone(),
        bases: Vec::new(),
        members: model
            .properties
            .iter()
            .map(|property| {
                Member::Property(PropertyDecl {
                    ty: property_type(&property.kind),
                    name: property.name.clone(),
                })
            })
            .collect(),
    }
}

fn property_type(kind: &ApiPropertyType) -> TypeSyntax {
    match kind {
        ApiPropertyType::Primitive(primitive) => primitive_type(primitive),
        ApiPropertyType::Model(model) => TypeSyntax::named(model.name.as_str()),
        ApiPropertyType::List(item) => TypeSyntax::generic("IReadOnlyList", property_type(item)),
    }
}

fn interface(metadata: &ApiClientFileMetadata) -> InterfaceDecl {
    InterfaceDecl {
        name: metadata.interface_name.clone(),
        methods: metadata.methods.iter().map(signature).collect(),
    }
}

fn signature(method: &ApiMethodResult) -> MethodSignature {
    let return_type = match &method.return_type {
        ResponseType::Object(model) => {
            TypeSyntax::generic("Task", TypeSyntax::named(model.name.as_str()))
        }
        ResponseType::List(model) => TypeSyntax::generic(
            "Task",
            TypeSyntax::generic("IReadOnlyList", TypeSyntax::named(model.name.as_str())),
        ),
        ResponseType::Unknown => TypeSyntax::named("Task"),
    };

    MethodSignature {
        return_type,
        name: method.name.clone(),
        parameters: method
            .parameters
            .iter()
            .map(|p| ParameterDecl {
                ty: primitive_type(&p.kind),
                name: p.name.clone(),
            })
            .collect(),
    }
}

fn client_class(metadata: &ApiClientFileMetadata) -> Result<ClassDecl> {
    let mut members = vec![Member::Constructor(ConstructorDecl {
        name: metadata.class_name.clone(),
        parameters: vec![ParameterDecl {
            ty: TypeSyntax::named(CONNECTION_TYPE),
            name: "apiConnection".into(),
        }],
        base_args: vec![Expr::ident("apiConnection")],
        body: Vec::new(),
    })];

    for method in &metadata.methods {
        let body = match method.verb {
            HttpMethod::Get => get_body(&metadata.path, method)?,
            _ => not_implemented_body(),
        };
        members.push(Member::Method(MethodDecl {
            signature: signature(method),
            body,
        }));
    }

    Ok(ClassDecl {
        name: metadata.class_name.clone(),
        bases: vec![
            TypeSyntax::named(BASE_CLIENT),
            TypeSyntax::named(metadata.interface_name.as_str()),
        ],
        members,
    })
}

/// `var uri = ...; return ApiConnection.Get<T>(new Uri(uri, UriKind.Relative));`
fn get_body(path: &str, method: &ApiMethodResult) -> Result<Vec<Stmt>> {
    let template = UriTemplate::parse(path, &method.parameters)?;
    let uri = template.as_literal().map_or_else(
        || {
            Expr::Interpolated(
                template
                    .parts()
                    .iter()
                    .map(|part| match part {
                        UriPart::Text(text) => InterpolatedPart::Text(text.clone()),
                        UriPart::Parameter(ident) => InterpolatedPart::Identifier(ident.clone()),
                    })
                    .collect(),
            )
        },
        Expr::StringLiteral,
    );

    let (operation, model) = match &method.return_type {
        ResponseType::Object(model) => ("Get", model.name.as_str()),
        ResponseType::List(model) => ("GetAll", model.name.as_str()),
        ResponseType::Unknown => ("Get", "object"),
    };

    let mut args = vec![Expr::New {
        ty: TypeSyntax::named("Uri"),
        args: vec![Expr::ident("uri"), Expr::ident("UriKind").member("Relative")],
    }];
    if let Some(accept) = &method.accept_header {
        args.push(Expr::Null);
        args.push(Expr::StringLiteral(accept.clone()));
    }

    let call = Expr::ident("ApiConnection")
        .member(operation)
        .call(vec![TypeSyntax::named(model)], args);

    Ok(vec![
        Stmt::Var {
            name: "uri".into(),
            init: uri,
        },
        Stmt::Return(call),
    ])
}

/// Non-GET verbs are not generated yet; their bodies only throw.
fn not_implemented_body() -> Vec<Stmt> {
    vec![Stmt::Throw(Expr::New {
        ty: TypeSyntax::named("NotImplementedException"),
        args: Vec::new(),
    })]
}
