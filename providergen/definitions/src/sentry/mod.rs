//! Sentry provider entity declarations.
//!
//! The declarations mirror the Sentry REST API records (`Organization`,
//! `Project`, `Team`, `ProjectKey`, `ProjectOwnership`) that the generated
//! code fills its models from.

mod data_sources;
mod resources;

pub use data_sources::{
    data_sources, define_all_projects_data_source, define_organization_data_source, define_project_data_source,
};
pub use resources::{define_client_key_resource, define_project_ownership_resource, define_team_resource, resources};

use providergen_define::Definitions;

/// Every declared Sentry entity.
///
/// ## Examples
///
/// ```rust
/// use providergen_definitions::sentry::define_sentry_provider;
///
/// let definitions = define_sentry_provider();
/// assert_eq!(definitions.data_sources.len(), 3);
/// assert!(definitions.resources.iter().any(|r| r.name == "team"));
/// ```
pub fn define_sentry_provider() -> Definitions {
    Definitions {
        data_sources: data_sources(),
        resources: resources(),
    }
}
