//! Configuration management for octogen.

use std::fs;
use std::path::{Path, PathBuf};

use octogen_schema::PathFilter;
use serde::Deserialize;

use crate::error::{Error, Result};
use crate::generate::GeneratorOptions;

/// octogen configuration loaded from `octogen.toml`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Input, output and naming settings.
    #[serde(default)]
    pub generator: GeneratorConfig,

    /// Path scoping.
    #[serde(default)]
    pub paths: PathsConfig,
}

impl Config {
    /// Default config file name, looked up in the working directory.
    pub const FILE_NAME: &'static str = "octogen.toml";

    /// Load config from a TOML file.
    ///
    /// # Errors
    /// Returns error if file can't be read or parsed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content).map_err(|e| Error::Config {
            file: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Ok(config)
    }

    /// Generator options derived from this config.
    #[must_use]
    pub fn generator_options(&self) -> GeneratorOptions {
        GeneratorOptions {
            filter: PathFilter::new(self.paths.include.iter().cloned()),
            namespace: self.generator.namespace.clone(),
        }
    }
}

/// Input, output and naming settings.
#[derive(Debug, Clone, Deserialize)]
pub struct GeneratorConfig {
    /// OpenAPI schema to read.
    #[serde(default = "default_schema")]
    pub schema: PathBuf,

    /// Root directory generated files are written under.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Namespace for generated types.
    #[serde(default = "default_namespace")]
    pub namespace: String,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            schema: default_schema(),
            output_dir: default_output_dir(),
            namespace: default_namespace(),
        }
    }
}

fn default_schema() -> PathBuf {
    PathBuf::from("schema/api.github.com.json")
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_namespace() -> String {
    "Octokit".into()
}

/// Path scoping settings.
#[derive(Debug, Clone, Deserialize)]
pub struct PathsConfig {
    /// Path prefixes to generate. Empty means every path.
    #[serde(default = "default_include")]
    pub include: Vec<String>,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            include: default_include(),
        }
    }
}

fn default_include() -> Vec<String> {
    vec!["/marketplace_listing/".into()]
}
