//! Providergen Definition Library
//!
//! This crate provides the types used to declare provider entities: data
//! sources and resources, the attributes they expose, and the remote API
//! operations they are bound to. These definitions are consumed by the
//! `providergen` binary to generate schema, model and lifecycle code.
//!
//! ## Core Types
//!
//! - [`Attribute`] - A declared attribute with its flags, overrides and [`AttributeType`]
//! - [`AttributeType`] - The closed set of value shapes (`string`, `int`, `bool`,
//!   `list`, `set`, `set_nested`, `object`)
//! - [`AttributeKind`] - Payload-free discriminant of [`AttributeType`]
//! - [`ComputedOptionalRequired`] - Configuration/state participation
//! - [`DataSource`] / [`DataSourceApi`] / [`ReadStrategy`] - Read-only entities
//! - [`Resource`] / [`ResourceApi`] / [`ApiOperation`] / [`PaginatedRead`] - Managed entities
//! - [`Definitions`] - Every declared entity
//!
//! ## Examples
//!
//! ```
//! use providergen_define::{Attribute, DataSource, DataSourceApi, GenerateOptions, ReadStrategy};
//!
//! let organization = DataSource {
//!     name: "organization".to_string(),
//!     description: "Retrieves an organization.".to_string(),
//!     api: DataSourceApi {
//!         model: "Organization".to_string(),
//!         read_method: "GetOrganization".to_string(),
//!         read_request_attributes: vec!["slug".to_string()],
//!         read_strategy: ReadStrategy::Simple,
//!     },
//!     generate: GenerateOptions { model_fillers: true },
//!     attributes: vec![
//!         Attribute::string("slug", "The unique URL slug for the organization.").required(),
//!         Attribute::string("internal_id", "The internal ID for this organization.").source(["id"]),
//!     ],
//! };
//!
//! assert_eq!(organization.attributes.len(), 2);
//! ```

mod attribute;
mod entity;
pub mod prelude;

pub use attribute::{Attribute, AttributeKind, AttributeType, ComputedOptionalRequired, ElementType, SourceType};
pub use entity::{
    ApiOperation, DataSource, DataSourceApi, Definitions, GenerateOptions, PaginateOptions, PaginatedRead,
    ReadStrategy, Resource, ResourceApi,
};
