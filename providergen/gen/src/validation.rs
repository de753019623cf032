//! Validation module for provider definitions.
//!
//! Definitions are checked before any code is generated so that a broken
//! reference fails the entity up front rather than half way through emission.
//!
//! ## Validation Checks
//!
//! - **Identifiers**: entity and attribute names must be usable as Rust identifiers
//! - **Duplicates**: sibling attributes (at every nesting depth) and entities of
//!   the same kind must have distinct names
//! - **References**: every request, lifecycle and import-state attribute must
//!   name a declared top-level attribute
//! - **Request parameters**: referenced request attributes must be primitives
//!
//! ## Examples
//!
//! ```
//! use providergen_define::prelude::*;
//! use providergen_gen::validation::validate_data_source;
//!
//! let ds = DataSource {
//!     name: "organization".to_string(),
//!     description: "Retrieves an organization.".to_string(),
//!     api: DataSourceApi {
//!         model: "Organization".to_string(),
//!         read_method: "GetOrganization".to_string(),
//!         read_request_attributes: vec!["slug".to_string()],
//!         read_strategy: ReadStrategy::Simple,
//!     },
//!     generate: GenerateOptions::default(),
//!     attributes: vec![Attribute::string("slug", "The slug.").required()],
//! };
//!
//! assert!(validate_data_source(&ds).is_ok());
//! ```

use std::collections::HashSet;

use providergen_define::{Attribute, AttributeKind, DataSource, Definitions, Resource};

use crate::errors::GeneratorError;
use crate::naming::{field_ident, validate_identifier};

/// Validates a data source definition.
///
/// ## Errors
///
/// - `GeneratorError::InvalidIdentifier` for unusable entity or attribute names
/// - `GeneratorError::DuplicateAttribute` when siblings share a name
/// - `GeneratorError::UnknownAttribute` when a read request attribute is not declared
/// - `GeneratorError::NonPrimitiveExtraction` when it names a non-primitive attribute
pub fn validate_data_source(data_source: &DataSource) -> Result<(), GeneratorError> {
    validate_identifier(&data_source.name)?;
    validate_attributes(&data_source.name, &data_source.attributes)?;
    validate_request(
        &data_source.name,
        "read request",
        &data_source.attributes,
        &data_source.api.read_request_attributes,
    )
}

/// Validates a resource definition.
///
/// Checks the same rules as [`validate_data_source`] for every configured
/// lifecycle operation, plus the import-state attributes. Import-state
/// attributes are only looked up, not required to be primitives.
///
/// ## Errors
///
/// See [`validate_data_source`].
pub fn validate_resource(resource: &Resource) -> Result<(), GeneratorError> {
    validate_identifier(&resource.name)?;
    validate_attributes(&resource.name, &resource.attributes)?;

    let api = &resource.api;
    validate_request(&resource.name, "create request", &resource.attributes, &api.create.request_attributes)?;
    validate_request(&resource.name, "read request", &resource.attributes, &api.read.request_attributes)?;
    if let Some(update) = &api.update {
        validate_request(&resource.name, "update request", &resource.attributes, &update.request_attributes)?;
    }
    if let Some(delete) = &api.delete {
        validate_request(&resource.name, "delete request", &resource.attributes, &delete.request_attributes)?;
    }

    for name in &resource.import_state_attributes {
        lookup(&resource.name, "import state", &resource.attributes, name)?;
    }
    Ok(())
}

/// Validates every entity and checks entity names are unique per kind.
///
/// Stops at the first problem. The orchestrator validates per entity instead
/// so that one broken entity does not block the others.
///
/// ## Errors
///
/// - `GeneratorError::DuplicateEntity` when two entities of one kind share a name
/// - any error of [`validate_data_source`] or [`validate_resource`]
pub fn validate_definitions(definitions: &Definitions) -> Result<(), GeneratorError> {
    check_unique_entities("data source", definitions.data_sources.iter().map(|d| d.name.as_str()))?;
    check_unique_entities("resource", definitions.resources.iter().map(|r| r.name.as_str()))?;

    for data_source in &definitions.data_sources {
        validate_data_source(data_source)?;
    }
    for resource in &definitions.resources {
        validate_resource(resource)?;
    }
    Ok(())
}

/// Checks entity names of one kind are unique.
///
/// ## Errors
///
/// Returns `GeneratorError::DuplicateEntity` naming the first repeated name.
pub fn check_unique_entities<'a>(
    kind: &str,
    names: impl IntoIterator<Item = &'a str>,
) -> Result<(), GeneratorError> {
    let mut seen = HashSet::new();
    for name in names {
        if !seen.insert(name) {
            return Err(GeneratorError::DuplicateEntity {
                kind: kind.to_string(),
                name: name.to_string(),
            });
        }
    }
    Ok(())
}

fn validate_attributes(entity: &str, attributes: &[Attribute]) -> Result<(), GeneratorError> {
    let mut seen = HashSet::new();
    for attribute in attributes {
        field_ident(&attribute.name)?;
        if !seen.insert(attribute.name.as_str()) {
            return Err(GeneratorError::DuplicateAttribute {
                entity: entity.to_string(),
                attribute: attribute.name.clone(),
            });
        }
        validate_attributes(entity, attribute.children())?;
    }
    Ok(())
}

fn validate_request(
    entity: &str,
    context: &str,
    attributes: &[Attribute],
    requested: &[String],
) -> Result<(), GeneratorError> {
    for name in requested {
        let attribute = lookup(entity, context, attributes, name)?;
        match attribute.kind.kind() {
            AttributeKind::String | AttributeKind::Int | AttributeKind::Bool => {}
            kind @ (AttributeKind::List | AttributeKind::Set | AttributeKind::SetNested | AttributeKind::Object) => {
                return Err(GeneratorError::NonPrimitiveExtraction {
                    attribute: name.clone(),
                    kind: kind.to_string(),
                });
            }
        }
    }
    Ok(())
}

fn lookup<'a>(
    entity: &str,
    context: &str,
    attributes: &'a [Attribute],
    name: &str,
) -> Result<&'a Attribute, GeneratorError> {
    attributes
        .iter()
        .find(|a| a.name == name)
        .ok_or_else(|| GeneratorError::UnknownAttribute {
            entity: entity.to_string(),
            attribute: name.to_string(),
            context: context.to_string(),
        })
}
