//! Output validation, formatting and file writing for generated code.
//!
//! Every artifact goes through the same three steps before it reaches disk:
//!
//! - **Validation**: the token stream must parse as a complete Rust file (`syn`)
//! - **Formatting**: output is rendered with `prettyplease` and prefixed with
//!   the generated-code header
//! - **Atomic writes**: content lands in a temp file that is renamed over the
//!   target, so readers never see a partial file

use std::fs;
use std::path::{Path, PathBuf};

use proc_macro2::TokenStream;

use crate::errors::GeneratorError;

/// First line of every generated file.
pub const GENERATED_HEADER: &str = "// Code generated by providergen. DO NOT EDIT.";

/// A rendered artifact and the path it belongs at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    pub path: PathBuf,
    pub content: String,
}

impl GeneratedFile {
    /// Validates and formats `tokens` into a file destined for `path`.
    ///
    /// ## Errors
    ///
    /// Returns `GeneratorError::CodeGenError` if the tokens are not a valid Rust file.
    pub fn render(path: impl Into<PathBuf>, tokens: &TokenStream) -> Result<Self, GeneratorError> {
        let file = validate_code(tokens)?;
        Ok(Self {
            path: path.into(),
            content: format_code(&file),
        })
    }

    /// Writes the file atomically.
    ///
    /// ## Errors
    ///
    /// Returns `GeneratorError::WriteError` if any filesystem step fails.
    pub fn write(&self) -> Result<(), GeneratorError> {
        write_atomic(&self.path, &self.content)
    }
}

/// Validates generated code using syn.
///
/// ## Errors
///
/// Returns `GeneratorError::CodeGenError` if the code fails to parse.
pub fn validate_code(tokens: &TokenStream) -> Result<syn::File, GeneratorError> {
    syn::parse2(tokens.clone())
        .map_err(|e| GeneratorError::CodeGenError(format!("Generated code is invalid: {}", e)))
}

/// Formats a parsed file with prettyplease, prepending [`GENERATED_HEADER`].
pub fn format_code(file: &syn::File) -> String {
    let formatted = prettyplease::unparse(file);
    format!("{GENERATED_HEADER}\n\n{formatted}")
}

/// Writes content to a file atomically using temp file + rename.
///
/// Parent directories are created as needed. The temp file is removed when
/// the write or the rename fails.
///
/// ## Errors
///
/// Returns `GeneratorError::WriteError` if:
/// - Parent directories cannot be created
/// - The temp file cannot be written
/// - The rename operation fails
pub fn write_atomic(path: &Path, content: &str) -> Result<(), GeneratorError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|e| GeneratorError::WriteError {
            path: parent.display().to_string(),
            source: e,
        })?;
    }

    let temp_path = path.with_extension("rs.tmp");
    fs::write(&temp_path, content).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        GeneratorError::WriteError {
            path: temp_path.display().to_string(),
            source: e,
        }
    })?;

    fs::rename(&temp_path, path).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        GeneratorError::WriteError {
            path: path.display().to_string(),
            source: e,
        }
    })?;

    Ok(())
}
