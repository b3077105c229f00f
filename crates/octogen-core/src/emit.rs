//! C# syntax tree -> source text.
//!
//! Declarations and statements render line by line through [`CodeWriter`];
//! types and expressions render inline through `Display`.

use std::fmt::{self, Write as _};

use crate::ast::{
    ClassDecl, CompilationUnit, ConstructorDecl, Expr, InterfaceDecl, InterpolatedPart, Member,
    MethodDecl, MethodSignature, Namespace, ParameterDecl, PropertyDecl, Stmt, TypeDecl,
    TypeSyntax,
};

const INDENT: &str = "    ";

/// Line-oriented writer that tracks brace indentation.
#[derive(Debug, Default)]
pub struct CodeWriter {
    buf: String,
    depth: usize,
}

impl CodeWriter {
    /// Create an empty writer.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            buf: String::new(),
            depth: 0,
        }
    }

    /// Write one indented line.
    pub fn line(&mut self, text: &str) {
        for _ in 0..self.depth {
            self.buf.push_str(INDENT);
        }
        self.buf.push_str(text);
        self.buf.push('\n');
    }

    /// Write an empty line.
    pub fn blank(&mut self) {
        self.buf.push('\n');
    }

    /// Write `{` and indent.
    pub fn open(&mut self) {
        self.line("{");
        self.depth += 1;
    }

    /// Dedent and write `}`.
    pub fn close(&mut self) {
        self.depth = self.depth.saturating_sub(1);
        self.line("}");
    }

    /// Take the written text.
    #[must_use]
    pub fn finish(self) -> String {
        self.buf
    }
}

/// Render a syntax node as source.
pub trait Emit {
    /// Write this node to `w`.
    fn emit(&self, w: &mut CodeWriter);

    /// Render this node to a fresh string.
    fn to_source(&self) -> String {
        let mut w = CodeWriter::new();
        self.emit(&mut w);
        w.finish()
    }
}

impl Emit for CompilationUnit {
    fn emit(&self, w: &mut CodeWriter) {
        for using in &self.usings {
            w.line(&format!("using {using};"));
        }
        if !self.usings.is_empty() {
            w.blank();
        }
        self.namespace.emit(w);
    }
}

impl Emit for Namespace {
    fn emit(&self, w: &mut CodeWriter) {
        w.line(&format!("namespace {}", self.name));
        w.open();
        for (i, member) in self.members.iter().enumerate() {
            if i > 0 {
                w.blank();
            }
            member.emit(w);
        }
        w.close();
    }
}

impl Emit for TypeDecl {
    fn emit(&self, w: &mut CodeWriter) {
        match self {
            Self::Class(class) => class.emit(w),
            Self::Interface(interface) => interface.emit(w),
        }
    }
}

impl Emit for ClassDecl {
    fn emit(&self, w: &mut CodeWriter) {
        if self.bases.is_empty() {
            w.line(&format!("public class {}", self.name));
        } else {
            w.line(&format!(
                "public class {} : {}",
                self.name,
                comma_separated(&self.bases)
            ));
        }
        w.open();
        let mut previous: Option<&Member> = None;
        for member in &self.members {
            // Properties stay grouped; everything else is spaced out.
            let grouped = matches!(
                (previous, member),
                (Some(Member::Property(_)), Member::Property(_))
            );
            if previous.is_some() && !grouped {
                w.blank();
            }
            member.emit(w);
            previous = Some(member);
        }
        w.close();
    }
}

impl Emit for InterfaceDecl {
    fn emit(&self, w: &mut CodeWriter) {
        w.line(&format!("public interface {}", self.name));
        w.open();
        for method in &self.methods {
            w.line(&format!("{method};"));
        }
        w.close();
    }
}

impl Emit for Member {
    fn emit(&self, w: &mut CodeWriter) {
        match self {
            Self::Property(property) => property.emit(w),
            Self::Constructor(ctor) => ctor.emit(w),
            Self::Method(method) => method.emit(w),
        }
    }
}

impl Emit for PropertyDecl {
    fn emit(&self, w: &mut CodeWriter) {
        w.line(&format!("public {} {} {{ get; set; }}", self.ty, self.name));
    }
}

impl Emit for ConstructorDecl {
    fn emit(&self, w: &mut CodeWriter) {
        let mut header = format!(
            "public {}({})",
            self.name,
            comma_separated(&self.parameters)
        );
        if !self.base_args.is_empty() {
            let _ = write!(header, " : base({})", comma_separated(&self.base_args));
        }
        w.line(&header);
        emit_body(&self.body, w);
    }
}

impl Emit for MethodDecl {
    fn emit(&self, w: &mut CodeWriter) {
        w.line(&format!("public {}", self.signature));
        emit_body(&self.body, w);
    }
}

impl Emit for Stmt {
    fn emit(&self, w: &mut CodeWriter) {
        match self {
            Self::Var { name, init } => w.line(&format!("var {name} = {init};")),
            Self::Return(expr) => w.line(&format!("return {expr};")),
            Self::Throw(expr) => w.line(&format!("throw {expr};")),
        }
    }
}

fn emit_body(body: &[Stmt], w: &mut CodeWriter) {
    w.open();
    for stmt in body {
        stmt.emit(w);
    }
    w.close();
}

impl fmt::Display for MethodSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}({})",
            self.return_type,
            self.name,
            comma_separated(&self.parameters)
        )
    }
}

impl fmt::Display for ParameterDecl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.ty, self.name)
    }
}

impl fmt::Display for TypeSyntax {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Named(name) => f.write_str(name),
            Self::Generic { name, args } => write!(f, "{name}<{}>", comma_separated(args)),
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::StringLiteral(text) => write!(f, "\"{}\"", escape_string(text, false)),
            Self::Interpolated(parts) => {
                f.write_str("$\"")?;
                for part in parts {
                    match part {
                        InterpolatedPart::Text(text) => f.write_str(&escape_string(text, true))?,
                        InterpolatedPart::Identifier(ident) => write!(f, "{{{ident}}}")?,
                    }
                }
                f.write_str("\"")
            }
            Self::Null => f.write_str("null"),
            Self::Identifier(name) => f.write_str(name),
            Self::MemberAccess { target, name } => write!(f, "{target}.{name}"),
            Self::Invocation {
                target,
                type_args,
                args,
            } => {
                write!(f, "{target}")?;
                if !type_args.is_empty() {
                    write!(f, "<{}>", comma_separated(type_args))?;
                }
                write!(f, "({})", comma_separated(args))
            }
            Self::New { ty, args } => write!(f, "new {ty}({})", comma_separated(args)),
        }
    }
}

/// Escape text for a regular or interpolated C# string literal.
fn escape_string(text: &str, interpolated: bool) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '{' if interpolated => out.push_str("{{"),
            '}' if interpolated => out.push_str("}}"),
            c => out.push(c),
        }
    }
    out
}

fn comma_separated<T: fmt::Display>(items: &[T]) -> String {
    items
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
