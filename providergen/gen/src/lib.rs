//! providergen code generator library.
//!
//! This crate generates Terraform-style provider source from the data source
//! and resource definitions built with `providergen-define`. For every entity
//! the generated file includes:
//!
//! - The entity type with a boxed constructor
//! - `metadata` and `schema` implementations
//! - The read (data sources) or create/read/update/delete (resources) lifecycle
//! - Import-state handling for resources with one to three identifying attributes
//! - A model record per attribute list, with `fill` operations converting
//!   upstream API records into provider values
//!
//! A single `provider_gen.rs` aggregate lists a constructor for every entity.
//!
//! ## Modules
//!
//! - [`codegen`] - Token generation for attributes, models, lifecycles and the aggregate
//! - [`validation`] - Pre-generation checks on definitions
//! - [`orchestrator`] - Parallel task planning and execution
//! - [`output`] - Validation, formatting and atomic file writing
//! - [`config`] - Loading definitions from JSON or YAML files
//! - [`naming`] - Identifier and type-name derivation
//! - [`errors`] - Error types for the generator
//!
//! ## Example Usage
//!
//! ```no_run
//! use providergen_definitions::define_sentry_provider;
//! use providergen_gen::orchestrator::{RunOptions, run};
//!
//! let definitions = define_sentry_provider();
//! let options = RunOptions {
//!     output_dir: "internal/provider".into(),
//!     filter: None,
//!     dry_run: true,
//! };
//!
//! let report = run(&definitions, &options).unwrap();
//! for file in &report.files {
//!     println!("{}", file.content);
//! }
//! ```

pub mod codegen;
pub mod config;
pub mod errors;
pub mod naming;
pub mod orchestrator;
pub mod output;
pub mod validation;

#[cfg(test)]
mod test_utils;
