//! Provider aggregate generation.
//!
//! `provider_gen.rs` lists a constructor for every declared resource and data
//! source. The provider registers these tables, so they are always built from
//! the complete definition set regardless of any generation filter.

use proc_macro2::TokenStream;
use providergen_define::Definitions;
use quote::quote;

use crate::errors::GeneratorError;
use crate::naming::{
    data_source_module_name, data_source_type_name, field_ident, resource_module_name, resource_type_name, type_ident,
};

/// Generates the aggregate file for `definitions`.
///
/// Both tables are sorted by entity name so output does not depend on
/// declaration order.
///
/// ## Errors
///
/// Returns `GeneratorError::InvalidIdentifier` if an entity name cannot form a module or type name.
pub fn generate_provider(definitions: &Definitions) -> Result<TokenStream, GeneratorError> {
    let mut resource_names: Vec<&str> = definitions.resources.iter().map(|r| r.name.as_str()).collect();
    resource_names.sort_unstable();
    let mut data_source_names: Vec<&str> = definitions.data_sources.iter().map(|d| d.name.as_str()).collect();
    data_source_names.sort_unstable();

    let resources = resource_names
        .iter()
        .map(|name| {
            let module = field_ident(&resource_module_name(name))?;
            let ty = type_ident(&resource_type_name(name))?;
            Ok(quote! { super::#module::#ty::new })
        })
        .collect::<Result<Vec<_>, GeneratorError>>()?;

    let data_sources = data_source_names
        .iter()
        .map(|name| {
            let module = field_ident(&data_source_module_name(name))?;
            let ty = type_ident(&data_source_type_name(name))?;
            Ok(quote! { super::#module::#ty::new })
        })
        .collect::<Result<Vec<_>, GeneratorError>>()?;

    Ok(quote! {
        use super::prelude::*;

        pub static AUTO_GENERATED_RESOURCES: &[fn() -> Box<dyn resource::Resource>] = &[
            #(#resources,)*
        ];

        pub static AUTO_GENERATED_DATA_SOURCES: &[fn() -> Box<dyn datasource::DataSource>] = &[
            #(#data_sources,)*
        ];
    })
}
