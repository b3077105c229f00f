//! Default command: generate client files from a schema.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use octogen_core::{Config, GeneratedFile, GenerationReport, Generator};
use octogen_schema::SchemaDocument;

use super::Cli;
use crate::output;

/// Run the generator with the given CLI arguments.
pub fn run(cli: &Cli) -> Result<()> {
    let config = load_config(cli.config.as_deref())?;

    let schema_path = cli
        .schema
        .clone()
        .unwrap_or_else(|| config.generator.schema.clone());
    let doc = SchemaDocument::load(&schema_path)
        .with_context(|| format!("Failed to read schema {}", schema_path.display()))?;

    let report = Generator::new(config.generator_options())
        .run(&doc)
        .with_context(|| format!("Failed to process schema {}", schema_path.display()))?;

    for warning in &report.warnings {
        output::warn(&warning.to_string());
    }

    let mut write_failures = 0;
    if cli.write {
        let output_dir = cli
            .output
            .clone()
            .unwrap_or_else(|| config.generator.output_dir.clone());
        for file in &report.files {
            if let Err(e) = write_file(&output_dir, file) {
                output::error(&format!("{e:#}"));
                write_failures += 1;
            }
        }
    } else {
        for file in &report.files {
            output::essential(&format!("// {}", file.file_name));
            output::essential(&file.contents);
        }
    }

    for failure in &report.failures {
        output::error(&format!("{}: {}", failure.path, failure.error));
    }

    print_summary(&report, cli.write, report.files.len() - write_failures);

    let mut problems = Vec::new();
    if !report.is_success() {
        problems.push(format!(
            "{} failed to generate",
            output::count(report.failures.len(), "resource")
        ));
    }
    if write_failures > 0 {
        problems.push(format!(
            "{} failed to write",
            output::count(write_failures, "file")
        ));
    }
    if !problems.is_empty() {
        bail!("{}", problems.join(", "));
    }

    Ok(())
}

fn load_config(explicit: Option<&Path>) -> Result<Config> {
    match explicit {
        Some(path) => {
            if !path.exists() {
                bail!("Config file not found: {}", path.display());
            }
            Config::load(path).with_context(|| format!("Failed to load {}", path.display()))
        }
        None => Config::load(Config::FILE_NAME).context("Failed to load octogen.toml"),
    }
}

fn write_file(output_dir: &Path, file: &GeneratedFile) -> Result<()> {
    let target: PathBuf = output_dir.join(&file.file_name);
    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    fs::write(&target, &file.contents)
        .with_context(|| format!("Failed to write {}", target.display()))?;

    output::success(&format!(
        "Wrote {}",
        output::file_path(&target.display().to_string())
    ));
    Ok(())
}

fn print_summary(report: &GenerationReport, wrote: bool, files: usize) {
    let verb = if wrote { "Generated" } else { "Rendered" };
    output::info(&format!("{verb} {}", output::count(files, "file")));

    if !report.warnings.is_empty() {
        output::detail(&format!(
            "  {} skipped",
            output::count(report.warnings.len(), "schema fragment")
        ));
    }
    if report.skipped > 0 {
        output::detail(&format!(
            "  {} without supported verbs",
            output::count(report.skipped, "path")
        ));
    }
}
