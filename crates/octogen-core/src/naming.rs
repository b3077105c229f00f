//! Identifier derivation for generated C# code.
//!
//! Class names come from path segments, parameter identifiers from schema
//! parameter names and property names from response fields. All of these
//! are pure functions of their input.

/// C# reserved keywords that need an `@` prefix when used as identifiers.
const CSHARP_KEYWORDS: &[&str] = &[
    "abstract", "as", "base", "bool", "break", "byte", "case", "catch", "char", "checked", "class",
    "const", "continue", "decimal", "default", "delegate", "do", "double", "else", "enum",
    "event", "explicit", "extern", "false", "finally", "fixed", "float", "for", "foreach", "goto",
    "if", "implicit", "in", "int", "interface", "internal", "is", "lock", "long", "namespace",
    "new", "null", "object", "operator", "out", "override", "params", "private", "protected",
    "public", "readonly", "ref", "return", "sbyte", "sealed", "short", "sizeof", "stackalloc",
    "static", "string", "struct", "switch", "this", "throw", "true", "try", "typeof", "uint",
    "ulong", "unchecked", "unsafe", "ushort", "using", "virtual", "void", "volatile", "while",
];

/// Check if a path segment is a `{placeholder}`.
#[must_use]
pub fn is_placeholder(segment: &str) -> bool {
    segment.len() >= 2 && segment.starts_with('{') && segment.ends_with('}')
}

/// `PascalCase` a name, splitting on `_`, `-` and any other non-alphanumeric
/// character.
///
/// ```
/// use octogen_core::naming::pascal_case;
///
/// assert_eq!(pascal_case("marketplace_listing"), "MarketplaceListing");
/// assert_eq!(pascal_case("check-runs"), "CheckRuns");
/// ```
#[must_use]
pub fn pascal_case(name: &str) -> String {
    name.split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|part| !part.is_empty())
        .map(capitalize)
        .collect()
}

/// `camelCase` a name: `PascalCase` with the first character lowered.
#[must_use]
pub fn camel_case(name: &str) -> String {
    let pascal = pascal_case(name);
    let mut chars = pascal.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_ascii_lowercase().to_string() + chars.as_str()
    })
}

/// Derive the class name for a path template.
///
/// Empty and placeholder segments are skipped; the rest are `PascalCased`
/// and concatenated.
#[must_use]
pub fn class_name(path: &str) -> String {
    path.split('/')
        .filter(|segment| !segment.is_empty() && !is_placeholder(segment))
        .map(pascal_case)
        .collect()
}

/// Derive a method parameter identifier, escaping C# keywords.
#[must_use]
pub fn parameter_identifier(name: &str) -> String {
    escape_keyword(legalize(camel_case(name)))
}

/// Derive a C# property name from a JSON field name.
///
/// GitHub uses `+1` and `-1` as reaction field names; those become
/// `Plus1` and `Minus1`.
#[must_use]
pub fn property_name(field: &str) -> String {
    let pascal = if let Some(rest) = field.strip_prefix('+') {
        format!("Plus{}", pascal_case(rest))
    } else if let Some(rest) = field.strip_prefix('-') {
        format!("Minus{}", pascal_case(rest))
    } else {
        pascal_case(field)
    };
    legalize(pascal)
}

/// Prefix identifiers that would start with a digit or be empty.
fn legalize(ident: String) -> String {
    match ident.chars().next() {
        Some(c) if c.is_ascii_digit() => format!("_{ident}"),
        None => "_".to_string(),
        _ => ident,
    }
}

fn escape_keyword(ident: String) -> String {
    if CSHARP_KEYWORDS.contains(&ident.as_str()) {
        format!("@{ident}")
    } else {
        ident
    }
}

fn capitalize(part: &str) -> String {
    let mut chars = part.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_ascii_uppercase().to_string() + chars.as_str()
    })
}
