//! Data source file generation.
//!
//! A data source file holds the data source type, its constructor, the
//! `metadata`/`schema`/`read` implementations and the compiled model tree.
//! The read body depends on the configured [`ReadStrategy`]:
//!
//! - `simple` performs one checked call and fills the model once.
//! - `paginate` follows the pagination cursor, accumulating every page, then
//!   fills the model once from the accumulated records.

use proc_macro2::TokenStream;
use providergen_define::{DataSource, ReadStrategy};
use quote::quote;
use tracing::debug;

use super::attribute::emit_schema_attributes;
use super::call::{FailureMode, emit_bail_on_error, emit_checked_call, emit_request_args};
use super::fragment;
use super::model::compile_model;
use crate::errors::GeneratorError;
use crate::naming::{data_source_model_name, data_source_type_name, method_ident, params_type_ident, type_ident};

/// Generates the complete file for `data_source`.
///
/// ## Errors
///
/// - `GeneratorError::UnknownAttribute` if a read request attribute is not declared
/// - `GeneratorError::NonPrimitiveExtraction` if a read request attribute is not a primitive
/// - `GeneratorError::InvalidIdentifier` / `InvalidFragment` for unusable names or hooks
pub fn generate_data_source(data_source: &DataSource) -> Result<TokenStream, GeneratorError> {
    debug!(data_source = %data_source.name, "generating data source");

    let type_name = type_ident(&data_source_type_name(&data_source.name))?;
    let model_name = data_source_model_name(&data_source.name);
    let model_ident = type_ident(&model_name)?;

    let metadata_suffix = format!("{{}}_{}", data_source.name);
    let description = &data_source.description;
    let attributes = emit_schema_attributes(&model_name, &data_source.attributes)?;
    let read_body = generate_read_body(data_source)?;
    let bail = emit_bail_on_error();

    let source_model = type_ident(&data_source.api.model)?;
    let source_type = match &data_source.api.read_strategy {
        ReadStrategy::Simple => quote! { apiclient::#source_model },
        ReadStrategy::Paginate(options) => {
            let read_model = type_ident(options.read_model.as_deref().unwrap_or(&data_source.api.model))?;
            quote! { [apiclient::#read_model] }
        }
    };
    let model = compile_model(
        &model_name,
        &data_source.attributes,
        &source_type,
        data_source.generate.model_fillers,
    )?;
    model.warn_on_duplicate_names(&data_source.name);

    Ok(quote! {
        use std::collections::HashMap;

        use super::prelude::*;

        #[derive(Debug, Default)]
        pub struct #type_name {
            base: BaseDataSource,
        }

        impl #type_name {
            pub fn new() -> Box<dyn datasource::DataSource> {
                Box::new(Self::default())
            }
        }

        impl datasource::DataSource for #type_name {
            fn metadata(&self, req: &datasource::MetadataRequest, resp: &mut datasource::MetadataResponse) {
                resp.type_name = format!(#metadata_suffix, req.provider_type_name);
            }

            fn schema(&self, _req: &datasource::SchemaRequest, resp: &mut datasource::SchemaResponse) {
                resp.schema = schema::Schema {
                    markdown_description: #description.to_string(),
                    attributes: #attributes,
                    ..Default::default()
                };
            }

            async fn read(&self, req: &datasource::ReadRequest, resp: &mut datasource::ReadResponse) {
                let mut data = #model_ident::default();

                resp.diagnostics.append(req.config.get(&mut data));
                #bail

                #read_body

                resp.diagnostics.append(resp.state.set(&data));
            }
        }

        #model
    })
}

fn generate_read_body(data_source: &DataSource) -> Result<TokenStream, GeneratorError> {
    let api = &data_source.api;
    let method = method_ident(&api.read_method)?;
    let args = emit_request_args(
        &data_source.name,
        "read request",
        &data_source.attributes,
        &api.read_request_attributes,
        "data",
    )?;
    let bail = emit_bail_on_error();

    match &api.read_strategy {
        ReadStrategy::Simple => {
            let call = quote! { self.base.client.#method(#(#args),*) };
            let checked = emit_checked_call(&call, "read", FailureMode::Diagnostic);
            Ok(quote! {
                #checked

                resp.diagnostics.append(data.fill(body));
                #bail
            })
        }
        ReadStrategy::Paginate(options) => {
            let read_model = type_ident(options.read_model.as_deref().unwrap_or(&api.model))?;
            let params_type = params_type_ident(&api.read_method)?;
            let init = fragment::lex_optional(options.read_init_loop.as_deref(), "read_init_loop")?;
            let pre = fragment::lex_optional(options.read_pre_iterate.as_deref(), "read_pre_iterate")?;
            let post = fragment::lex_optional(options.read_post_iterate.as_deref(), "read_post_iterate")?;

            let call = quote! { self.base.client.#method(#(#args,)* &params) };
            let checked = emit_checked_call(&call, "read", FailureMode::Diagnostic);

            Ok(quote! {
                let mut model_instances: Vec<apiclient::#read_model> = Vec::new();
                let mut params = apiclient::#params_type::default();

                #init

                loop {
                    #pre

                    #checked

                    model_instances.extend_from_slice(body);

                    params.cursor = sentryclient::parse_next_pagination_cursor(&http_resp);
                    if params.cursor.is_none() {
                        break;
                    }

                    #post
                }

                resp.diagnostics.append(data.fill(&model_instances));
                #bail
            })
        }
    }
}
