//! Generation driver.
//!
//! Runs filter -> process -> build -> codegen -> emit for every path in a
//! schema. Each resource is emitted into its own [`GeneratedFile`]; a
//! failure in one resource is recorded and the rest carry on.

use std::collections::HashMap;

use octogen_schema::{Diagnostics, PathFilter, PathMetadata, SchemaDocument, Warning};

use crate::builder::ApiBuilder;
use crate::codegen;
use crate::emit::Emit;
use crate::error::{Error, Result};

/// Options for a generation run.
#[derive(Debug, Clone)]
pub struct GeneratorOptions {
    /// Paths in scope.
    pub filter: PathFilter,

    /// Namespace for generated types.
    pub namespace: String,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            filter: PathFilter::default(),
            namespace: "Octokit".into(),
        }
    }
}

/// A generated source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    /// Output path relative to the output root.
    pub file_name: String,
    pub class_name: String,
    pub contents: String,
}

/// A resource that could not be generated.
#[derive(Debug)]
pub struct ResourceFailure {
    pub path: String,
    pub error: Error,
}

/// Outcome of a generation run.
#[derive(Debug, Default)]
pub struct GenerationReport {
    pub files: Vec<GeneratedFile>,

    /// Schema fragments skipped while processing.
    pub warnings: Vec<Warning>,

    pub failures: Vec<ResourceFailure>,

    /// Paths in scope that had no supported verbs.
    pub skipped: usize,
}

impl GenerationReport {
    /// Check if every in-scope resource was generated.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Runs the generation pipeline.
#[derive(Debug, Default)]
pub struct Generator {
    options: GeneratorOptions,
    builder: ApiBuilder,
}

impl Generator {
    /// Create a generator with the default builder steps.
    #[must_use]
    pub fn new(options: GeneratorOptions) -> Self {
        Self {
            options,
            builder: ApiBuilder::default(),
        }
    }

    /// Generate every in-scope resource of a schema.
    ///
    /// # Errors
    /// Returns error only if the schema has no `paths` object; problems in
    /// individual resources are collected in the report.
    pub fn run(&self, doc: &SchemaDocument) -> Result<GenerationReport> {
        let entries = self.options.filter.apply(doc.paths()?);

        let mut diagnostics = Diagnostics::new();
        let mut report = GenerationReport::default();
        let mut seen: HashMap<String, String> = HashMap::new();

        for entry in &entries {
            let metadata = octogen_schema::process(doc, entry, &mut diagnostics);
            if metadata.verbs.is_empty() {
                report.skipped += 1;
                continue;
            }

            match self.generate_path(&metadata) {
                Ok(file) => {
                    if let Some(first_path) = seen.get(&file.class_name) {
                        report.failures.push(ResourceFailure {
                            path: metadata.path.clone(),
                            error: Error::DuplicateClass {
                                class_name: file.class_name,
                                path: metadata.path,
                                first_path: first_path.clone(),
                            },
                        });
                        continue;
                    }
                    seen.insert(file.class_name.clone(), metadata.path);
                    report.files.push(file);
                }
                Err(error) => report.failures.push(ResourceFailure {
                    path: metadata.path,
                    error,
                }),
            }
        }

        report.warnings = diagnostics.into_warnings();
        Ok(report)
    }

    /// Generate the client file for a single path.
    ///
    /// # Errors
    /// Returns error if a URI can't be reconstructed for one of its methods.
    pub fn generate_path(&self, metadata: &PathMetadata) -> Result<GeneratedFile> {
        let api = self.builder.build(metadata);
        let unit = codegen::compilation_unit(&api, &self.options.namespace)?;

        Ok(GeneratedFile {
            file_name: api.file_name,
            class_name: api.class_name,
            contents: unit.to_source(),
        })
    }
}
