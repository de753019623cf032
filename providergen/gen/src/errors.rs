//! Error types for the providergen generator.

use thiserror::Error;

/// Errors that can occur during code generation.
#[derive(Debug, Error)]
pub enum GeneratorError {
    /// A request, import or lifecycle reference names an attribute the entity does not declare.
    #[error("{entity}: {context} references unknown attribute '{attribute}'")]
    UnknownAttribute {
        /// The data source or resource name.
        entity: String,
        /// The name that failed to resolve.
        attribute: String,
        /// Where the reference appeared (e.g. `read request`).
        context: String,
    },

    /// Two sibling attributes share a name.
    #[error("{entity}: attribute '{attribute}' is declared more than once")]
    DuplicateAttribute { entity: String, attribute: String },

    /// Two data sources, or two resources, share a name.
    #[error("{kind} '{name}' is declared more than once")]
    DuplicateEntity { kind: String, name: String },

    /// Primitive extraction was requested for a non-primitive attribute.
    ///
    /// Only `string`, `int` and `bool` attributes can be passed to a remote
    /// operation as request parameters.
    #[error("Attribute '{attribute}' of type '{kind}' cannot be extracted as a primitive")]
    NonPrimitiveExtraction { attribute: String, kind: String },

    /// A name cannot be turned into a Rust identifier.
    #[error("Invalid identifier '{name}': {reason}")]
    InvalidIdentifier { name: String, reason: String },

    /// A verbatim code fragment does not lex as Rust tokens.
    #[error("Invalid code fragment in {context}: {reason}")]
    InvalidFragment { context: String, reason: String },

    /// Failed to generate code
    #[error("Code generation failed: {0}")]
    CodeGenError(String),

    /// Failed to write output file
    #[error("Failed to write output file '{path}': {source}")]
    WriteError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    /// One or more generation tasks failed.
    #[error("{} generation task(s) failed: {}", failures.len(), failures.join(", "))]
    TasksFailed {
        /// Names of the failed tasks.
        failures: Vec<String>,
    },
}
