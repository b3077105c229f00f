//! URI template reconstruction.
//!
//! A path template such as `/repos/{owner}/{repo}/hooks` is turned into the
//! parts of a C# interpolated string in two passes:
//!
//! 1. [`tokenize`] splits the template into alternating text and
//!    placeholder tokens.
//! 2. [`UriTemplate::interpolate`] swaps each placeholder for the identifier
//!    of its method parameter and merges adjacent text.

use crate::builder::ApiParameterResult;
use crate::error::{Error, Result};

/// A token of a path template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token<'a> {
    Text(&'a str),
    /// Placeholder name without braces.
    Placeholder(&'a str),
}

/// A part of a reconstructed URI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UriPart {
    Text(String),
    /// C# identifier of the parameter supplying this value.
    Parameter(String),
}

/// Split a path template into tokens, dropping the leading `/`.
///
/// # Errors
/// Returns [`Error::MalformedTemplate`] on an unterminated `{`, a stray `}`,
/// a nested `{` or an empty `{}`.
pub fn tokenize(path: &str) -> Result<Vec<Token<'_>>> {
    let template = path.strip_prefix('/').unwrap_or(path);
    let malformed = |reason: &str| Error::MalformedTemplate {
        path: path.to_string(),
        reason: reason.to_string(),
    };

    let mut tokens = Vec::new();
    let mut start = 0;
    let mut in_placeholder = false;

    for (i, c) in template.char_indices() {
        match (c, in_placeholder) {
            ('{', false) => {
                if i > start {
                    tokens.push(Token::Text(&template[start..i]));
                }
                start = i + 1;
                in_placeholder = true;
            }
            ('}', true) => {
                if i == start {
                    return Err(malformed("empty placeholder"));
                }
                tokens.push(Token::Placeholder(&template[start..i]));
                start = i + 1;
                in_placeholder = false;
            }
            ('{', true) => return Err(malformed("nested '{'")),
            ('}', false) => return Err(malformed("unmatched '}'")),
            _ => {}
        }
    }

    if in_placeholder {
        return Err(malformed("unterminated placeholder"));
    }
    if start < template.len() {
        tokens.push(Token::Text(&template[start..]));
    }

    Ok(tokens)
}

/// A path template resolved against method parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UriTemplate {
    parts: Vec<UriPart>,
}

impl UriTemplate {
    /// Tokenize `path` and resolve its placeholders against `parameters`.
    ///
    /// # Errors
    /// Returns [`Error::MalformedTemplate`] if the path can't be tokenized and
    /// [`Error::MissingParameter`] if a placeholder has no parameter whose
    /// original name matches.
    pub fn parse(path: &str, parameters: &[ApiParameterResult]) -> Result<Self> {
        let tokens = tokenize(path)?;
        Self::interpolate(path, &tokens, parameters)
    }

    /// Resolve tokens into URI parts.
    ///
    /// # Errors
    /// Returns [`Error::MissingParameter`] for an unmatched placeholder.
    pub fn interpolate(
        path: &str,
        tokens: &[Token<'_>],
        parameters: &[ApiParameterResult],
    ) -> Result<Self> {
        let mut parts: Vec<UriPart> = Vec::with_capacity(tokens.len());

        for token in tokens {
            match token {
                Token::Text(text) => {
                    if let Some(UriPart::Text(last)) = parts.last_mut() {
                        last.push_str(text);
                    } else {
                        parts.push(UriPart::Text((*text).to_string()));
                    }
                }
                Token::Placeholder(name) => {
                    let parameter = parameters
                        .iter()
                        .find(|p| p.original_name == *name)
                        .ok_or_else(|| Error::MissingParameter {
                            path: path.to_string(),
                            placeholder: (*name).to_string(),
                        })?;
                    parts.push(UriPart::Parameter(parameter.name.clone()));
                }
            }
        }

        Ok(Self { parts })
    }

    /// The resolved parts.
    #[must_use]
    pub fn parts(&self) -> &[UriPart] {
        &self.parts
    }

    /// The whole URI if it contains no parameters.
    #[must_use]
    pub fn as_literal(&self) -> Option<String> {
        self.parts
            .iter()
            .map(|part| match part {
                UriPart::Text(text) => Some(text.as_str()),
                UriPart::Parameter(_) => None,
            })
            .collect()
    }

    /// Substitute concrete values for each parameter identifier.
    ///
    /// Parameters without a value render as an empty string.
    #[must_use]
    pub fn render<F>(&self, mut value: F) -> String
    where
        F: FnMut(&str) -> Option<String>,
    {
        self.parts
            .iter()
            .map(|part| match part {
                UriPart::Text(text) => text.clone(),
                UriPart::Parameter(ident) => value(ident).unwrap_or_default(),
            })
            .collect()
    }
}
