//! # octogen-core
//!
//! Turns processed OpenAPI paths into typed C# API clients.
//!
//! The pipeline is:
//! 1. Build: [`PathMetadata`](octogen_schema::PathMetadata) -> [`ApiClientFileMetadata`]
//! 2. Codegen: metadata -> C# syntax tree ([`ast::CompilationUnit`])
//! 3. Emit: syntax tree -> source text (via [`Emit`])
//!
//! [`Generator`] drives all three for every path in a schema.

pub mod ast;
pub mod builder;
pub mod codegen;
pub mod config;
mod emit;
mod error;
mod generate;
pub mod naming;
pub mod uri;

pub use builder::{
    ApiBuilder, ApiClientFileMetadata, ApiMethodResult, ApiModel, ApiParameterResult,
    ApiProperty, ApiPropertyType, ResponseType,
};
pub use config::Config;
pub use emit::{CodeWriter, Emit};
pub use error::{Error, Result};
pub use generate::{GeneratedFile, GenerationReport, Generator, GeneratorOptions, ResourceFailure};
