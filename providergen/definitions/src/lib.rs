//! Providergen Entity Definitions
//!
//! This crate contains the actual data source and resource declarations that
//! use the primitives from `providergen-define`. Declarations are data only;
//! every piece of generated code is derived from them by `providergen-gen`.
//!
//! ## Available Providers
//!
//! - [`sentry`] - Sentry organizations, projects, teams, client keys and ownership
//!
//! ## Examples
//!
//! ```
//! use providergen_definitions::define_sentry_provider;
//!
//! let definitions = define_sentry_provider();
//! let all_projects = definitions
//!     .data_sources
//!     .iter()
//!     .find(|ds| ds.name == "all_projects")
//!     .unwrap();
//! assert_eq!(all_projects.api.read_method, "ListOrganizationProjects");
//! ```

pub mod sentry;

pub use sentry::define_sentry_provider;
