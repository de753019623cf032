//! Convenient re-exports for declaring provider entities.
//!
//! ## Examples
//!
//! ```
//! use providergen_define::prelude::*;
//!
//! let team = Resource {
//!     name: "team".to_string(),
//!     description: "Manages a team.".to_string(),
//!     api: ResourceApi {
//!         model: None,
//!         create: ApiOperation::new("CreateOrganizationTeam", ["organization"]),
//!         read: ApiOperation::new("GetOrganizationTeam", ["organization", "slug"]),
//!         paginated_read: None,
//!         update: None,
//!         delete: None,
//!     },
//!     import_state_attributes: vec!["organization".to_string(), "slug".to_string()],
//!     attributes: vec![
//!         Attribute::string("organization", "The organization slug.").required(),
//!         Attribute::string("slug", "The team slug.").required(),
//!     ],
//! };
//!
//! assert!(team.api.delete.is_none());
//! ```

pub use crate::{
    ApiOperation, Attribute, AttributeKind, AttributeType, ComputedOptionalRequired, DataSource, DataSourceApi,
    Definitions, ElementType, GenerateOptions, PaginateOptions, PaginatedRead, ReadStrategy, Resource, ResourceApi,
    SourceType,
};
