//! # octogen-schema
//!
//! OpenAPI schema reading for octogen. Parses the JSON description into
//! path entries, walks each path's verbs, parameters and responses, and
//! collects warnings for fragments it cannot use instead of failing.

mod diagnostics;
mod error;
mod filter;
pub mod model;
mod processor;
mod reader;

pub use diagnostics::{Diagnostics, Warning, WarningKind};
pub use error::{Error, Result};
pub use filter::PathFilter;
pub use model::{
    HttpMethod, ObjectSchema, Parameter, ParameterLocation, PathMetadata, PrimitiveType, Property,
    PropertyType, Response, ResponseContent, VerbResult,
};
pub use processor::process;
pub use reader::{PathEntry, SchemaDocument};
