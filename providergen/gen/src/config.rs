//! Definition loading.
//!
//! The generator runs against the built-in Sentry definitions unless a
//! definitions file is given. Files are JSON or YAML, chosen by extension,
//! and deserialize into [`Definitions`] through its serde derives.

use std::fs;
use std::path::Path;

use providergen_define::Definitions;
use providergen_definitions::define_sentry_provider;
use tracing::debug;

use crate::errors::GeneratorError;

/// Supported definitions file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefinitionsFormat {
    Json,
    Yaml,
}

impl DefinitionsFormat {
    /// Picks the format from a file extension (`json`, `yaml` or `yml`).
    ///
    /// ## Errors
    ///
    /// Returns `GeneratorError::ConfigError` for any other extension.
    pub fn from_path(path: &Path) -> Result<Self, GeneratorError> {
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Ok(Self::Json),
            Some("yaml" | "yml") => Ok(Self::Yaml),
            _ => Err(GeneratorError::ConfigError(format!(
                "Unsupported definitions file '{}': expected a .json, .yaml or .yml extension",
                path.display()
            ))),
        }
    }
}

/// Parses definitions from `content` in the given format.
///
/// ## Errors
///
/// Returns `GeneratorError::ConfigError` if the content does not deserialize.
pub fn parse_definitions(content: &str, format: DefinitionsFormat) -> Result<Definitions, GeneratorError> {
    match format {
        DefinitionsFormat::Json => serde_json::from_str(content)
            .map_err(|e| GeneratorError::ConfigError(format!("Invalid JSON definitions: {}", e))),
        DefinitionsFormat::Yaml => serde_yaml::from_str(content)
            .map_err(|e| GeneratorError::ConfigError(format!("Invalid YAML definitions: {}", e))),
    }
}

/// Loads definitions from `path`, or the built-in set when `path` is `None`.
///
/// ## Errors
///
/// Returns `GeneratorError::ConfigError` if the file cannot be read, has an
/// unsupported extension, or does not deserialize.
pub fn load_definitions(path: Option<&Path>) -> Result<Definitions, GeneratorError> {
    let Some(path) = path else {
        debug!("using built-in definitions");
        return Ok(define_sentry_provider());
    };

    let format = DefinitionsFormat::from_path(path)?;
    let content = fs::read_to_string(path).map_err(|e| {
        GeneratorError::ConfigError(format!("Unable to read definitions file '{}': {}", path.display(), e))
    })?;
    let definitions = parse_definitions(&content, format)?;
    debug!(
        path = %path.display(),
        data_sources = definitions.data_sources.len(),
        resources = definitions.resources.len(),
        "loaded definitions file"
    );
    Ok(definitions)
}
