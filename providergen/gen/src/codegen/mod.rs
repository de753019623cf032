//! Code generation modules for providergen.
//!
//! Each submodule turns part of a definition into `proc_macro2::TokenStream`s
//! targeting the provider runtime (`schema`, `supertypes`, `datasource`,
//! `resource`, `diag` and friends, all reached through `super::prelude`).
//!
//! ## Submodules
//!
//! - [`attribute`] - Schema metadata, value types, extraction and conversion per attribute
//! - [`model`] - Record types and `fill` operations, recursing into nested sets
//! - [`call`] - Checked remote calls shared by every lifecycle body
//! - [`data_source`] - Complete data source files (simple and paginated reads)
//! - [`resource`] - Complete resource files (CRUD lifecycle and import state)
//! - [`provider`] - The `provider_gen.rs` constructor tables
//! - [`fragment`] - Lexing of verbatim code carried by definitions
//!
//! ## Output Format
//!
//! All generators return `TokenStream`, which is then validated with
//! `syn::parse2` and formatted with `prettyplease` by [`crate::output`].

pub mod attribute;
pub mod call;
pub mod data_source;
pub mod fragment;
pub mod model;
pub mod provider;
pub mod resource;

pub use data_source::generate_data_source;
pub use model::{CompiledModel, compile_model};
pub use provider::generate_provider;
pub use resource::generate_resource;
