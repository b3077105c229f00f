//! C# syntax tree.
//!
//! Just enough of the language to describe generated clients: a
//! compilation unit with one namespace holding classes and interfaces,
//! auto-properties, constructors, methods and a handful of statements and
//! expressions. Rendering lives in the `emit` module.

/// A whole source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompilationUnit {
    pub usings: Vec<String>,
    pub namespace: Namespace,
}

/// A namespace declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Namespace {
    pub name: String,
    pub members: Vec<TypeDecl>,
}

/// A top-level type declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeDecl {
    Class(ClassDecl),
    Interface(InterfaceDecl),
}

/// `public class Name : Base, IName { ... }`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassDecl {
    pub name: String,
    pub bases: Vec<TypeSyntax>,
    pub members: Vec<Member>,
}

impl ClassDecl {
    /// Find a method by name.
    #[must_use]
    pub fn method(&self, name: &str) -> Option<&MethodDecl> {
        self.members.iter().find_map(|member| match member {
            Member::Method(method) if method.signature.name == name => Some(method),
            _ => None,
        })
    }

    /// Iterate over the auto-properties.
    pub fn properties(&self) -> impl Iterator<Item = &PropertyDecl> {
        self.members.iter().filter_map(|member| match member {
            Member::Property(property) => Some(property),
            _ => None,
        })
    }
}

/// `public interface IName { ... }`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterfaceDecl {
    pub name: String,
    pub methods: Vec<MethodSignature>,
}

/// A class member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Member {
    Property(PropertyDecl),
    Constructor(ConstructorDecl),
    Method(MethodDecl),
}

/// `public T Name { get; set; }`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyDecl {
    pub ty: TypeSyntax,
    pub name: String,
}

/// `public Name(params) : base(args) { body }`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstructorDecl {
    pub name: String,
    pub parameters: Vec<ParameterDecl>,
    pub base_args: Vec<Expr>,
    pub body: Vec<Stmt>,
}

/// Return type, name and parameters of a method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodSignature {
    pub return_type: TypeSyntax,
    pub name: String,
    pub parameters: Vec<ParameterDecl>,
}

/// A public method with a body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodDecl {
    pub signature: MethodSignature,
    pub body: Vec<Stmt>,
}

/// A method or constructor parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterDecl {
    pub ty: TypeSyntax,
    pub name: String,
}

/// A type reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeSyntax {
    /// A keyword or simple type name: `int`, `Uri`.
    Named(String),
    /// `Name<Args>`
    Generic { name: String, args: Vec<TypeSyntax> },
}

impl TypeSyntax {
    /// A simple type name.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self::Named(name.into())
    }

    /// A generic type with one argument.
    #[must_use]
    pub fn generic(name: impl Into<String>, arg: Self) -> Self {
        Self::Generic {
            name: name.into(),
            args: vec![arg],
        }
    }
}

/// A statement inside a method body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Stmt {
    /// `var name = init;`
    Var { name: String, init: Expr },
    /// `return expr;`
    Return(Expr),
    /// `throw expr;`
    Throw(Expr),
}

/// An expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    /// `"text"`
    StringLiteral(String),
    /// `$"text{ident}text"`
    Interpolated(Vec<InterpolatedPart>),
    /// `null`
    Null,
    Identifier(String),
    /// `target.name`
    MemberAccess { target: Box<Expr>, name: String },
    /// `target<type_args>(args)`
    Invocation {
        target: Box<Expr>,
        type_args: Vec<TypeSyntax>,
        args: Vec<Expr>,
    },
    /// `new Type(args)`
    New { ty: TypeSyntax, args: Vec<Expr> },
}

impl Expr {
    /// An identifier expression.
    #[must_use]
    pub fn ident(name: impl Into<String>) -> Self {
        Self::Identifier(name.into())
    }

    /// `self.name`
    #[must_use]
    pub fn member(self, name: impl Into<String>) -> Self {
        Self::MemberAccess {
            target: Box::new(self),
            name: name.into(),
        }
    }

    /// `self<type_args>(args)`
    #[must_use]
    pub fn call(self, type_args: Vec<TypeSyntax>, args: Vec<Self>) -> Self {
        Self::Invocation {
            target: Box::new(self),
            type_args,
            args,
        }
    }
}

/// A piece of an interpolated string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InterpolatedPart {
    Text(String),
    /// An identifier hole: `{name}`.
    Identifier(String),
}
