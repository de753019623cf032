//! Resource file generation.
//!
//! A resource file holds the resource type, its constructor, the full
//! create/read/update/delete lifecycle, an optional import-state
//! implementation and the compiled model tree.
//!
//! ## Lifecycle Rules
//!
//! | Operation | Not configured | Configured |
//! |---|---|---|
//! | Create | n/a | plan -> request body -> call -> fill -> state |
//! | Read | n/a | direct call, or list-and-match with bounded retry |
//! | Update | `Not Supported` error, no call | plan -> request body -> call -> fill -> state |
//! | Delete | `Not Supported` warning, no call | call; 404 counts as success |
//!
//! Import-state is emitted for one, two or three identifying attributes only.

use proc_macro2::{Literal, TokenStream};
use providergen_define::{ApiOperation, PaginatedRead, Resource};
use quote::quote;
use tracing::debug;

use super::attribute::emit_schema_attributes;
use super::call::{FailureMode, emit_bail_on_error, emit_checked_call, emit_request_args};
use super::fragment;
use super::model::compile_model;
use crate::errors::GeneratorError;
use crate::naming::{
    camel_case, field_ident, method_ident, params_type_ident, resource_model_name, resource_type_name, type_ident,
};

/// Message recorded when a list-and-match read exhausts every page.
pub const NOT_FOUND_IN_LIST: &str = "Unable to read, could not find resource in the list";

/// Generates the complete file for `resource`.
///
/// ## Errors
///
/// - `GeneratorError::UnknownAttribute` if any lifecycle or import reference is not declared
/// - `GeneratorError::NonPrimitiveExtraction` if a request attribute is not a primitive
/// - `GeneratorError::InvalidIdentifier` / `InvalidFragment` for unusable names or hooks
pub fn generate_resource(resource: &Resource) -> Result<TokenStream, GeneratorError> {
    debug!(resource = %resource.name, "generating resource");

    let type_name = type_ident(&resource_type_name(&resource.name))?;
    let model_name = resource_model_name(&resource.name);

    let metadata_suffix = format!("{{}}_{}", resource.name);
    let description = &resource.description;
    let attributes = emit_schema_attributes(&model_name, &resource.attributes)?;

    let create = generate_create(resource, &model_name)?;
    let read = generate_read(resource, &model_name)?;
    let update = generate_update(resource, &model_name)?;
    let delete = generate_delete(resource, &model_name)?;
    let import_state = generate_import_state(resource)?;

    let source_model = type_ident(&source_model_name(resource))?;
    let model = compile_model(&model_name, &resource.attributes, &quote! { apiclient::#source_model }, true)?;
    model.warn_on_duplicate_names(&resource.name);

    let import_impl = import_state.map(|body| {
        quote! {
            impl resource::ResourceWithImportState for #type_name {
                #body
            }
        }
    });

    Ok(quote! {
        use std::collections::HashMap;

        use super::prelude::*;

        #[derive(Debug, Default)]
        pub struct #type_name {
            base: BaseResource,
        }

        impl #type_name {
            pub fn new() -> Box<dyn resource::Resource> {
                Box::new(Self::default())
            }
        }

        impl resource::Resource for #type_name {
            fn metadata(&self, req: &resource::MetadataRequest, resp: &mut resource::MetadataResponse) {
                resp.type_name = format!(#metadata_suffix, req.provider_type_name);
            }

            fn schema(&self, _req: &resource::SchemaRequest, resp: &mut resource::SchemaResponse) {
                resp.schema = schema::Schema {
                    markdown_description: #description.to_string(),
                    attributes: #attributes,
                    ..Default::default()
                };
            }

            #create

            #read

            #update

            #delete
        }

        #import_impl

        #model
    })
}

/// Upstream record type of the resource, defaulting to its camel-cased name.
fn source_model_name(resource: &Resource) -> String {
    resource
        .api
        .model
        .clone()
        .unwrap_or_else(|| camel_case(&resource.name))
}

fn operation_call(
    resource: &Resource,
    operation: &ApiOperation,
    context: &str,
    trailing: TokenStream,
) -> Result<TokenStream, GeneratorError> {
    let method = method_ident(&operation.method)?;
    let args = emit_request_args(
        &resource.name,
        context,
        &resource.attributes,
        &operation.request_attributes,
        "data",
    )?;
    Ok(quote! { self.base.client.#method(#(#args,)* #trailing) })
}

fn generate_create(resource: &Resource, model_name: &str) -> Result<TokenStream, GeneratorError> {
    let model = type_ident(model_name)?;
    let call = operation_call(resource, &resource.api.create, "create request", quote! { &request_body })?;
    let checked = emit_checked_call(&call, "create", FailureMode::Diagnostic);
    let bail = emit_bail_on_error();

    Ok(quote! {
        async fn create(&self, req: &resource::CreateRequest, resp: &mut resource::CreateResponse) {
            let mut data = #model::default();

            resp.diagnostics.append(req.plan.get(&mut data));
            #bail

            let (request_body, diags) = self.get_create_json_request_body(&data);
            resp.diagnostics.append(diags);
            #bail

            #checked

            resp.diagnostics.append(data.fill(body));
            #bail

            resp.diagnostics.append(resp.state.set(&data));
        }
    })
}

fn generate_read(resource: &Resource, model_name: &str) -> Result<TokenStream, GeneratorError> {
    let model = type_ident(model_name)?;
    let bail = emit_bail_on_error();

    let fetch = match &resource.api.paginated_read {
        None => {
            let call = operation_call(resource, &resource.api.read, "read request", TokenStream::new())?;
            let checked = emit_checked_call(&call, "read", FailureMode::Diagnostic);
            quote! {
                #checked

                resp.diagnostics.append(data.fill(body));
                #bail
            }
        }
        Some(paginated) => generate_list_and_match(resource, paginated)?,
    };

    Ok(quote! {
        async fn read(&self, req: &resource::ReadRequest, resp: &mut resource::ReadResponse) {
            let mut data = #model::default();

            resp.diagnostics.append(req.state.get(&mut data));
            #bail

            #fetch

            resp.diagnostics.append(resp.state.set(&data));
        }
    })
}

/// Pages through the list operation until an item matches, retrying the whole
/// scan a bounded number of times.
///
/// The scan continues only while the has-more flag is set and the cursor is
/// non-empty; otherwise it ends with [`NOT_FOUND_IN_LIST`].
fn generate_list_and_match(resource: &Resource, paginated: &PaginatedRead) -> Result<TokenStream, GeneratorError> {
    let read = &resource.api.read;
    let params_type = params_type_ident(&read.method)?;
    let call = operation_call(resource, read, "read request", quote! { &params })?;
    let checked = emit_checked_call(&call, "read", FailureMode::Propagate);
    let bail = emit_bail_on_error();

    let has_more = field_ident(&paginated.has_more_field)?;
    let cursor = field_ident(&paginated.cursor_field)?;
    let limit = Literal::u32_unsuffixed(paginated.page_limit);
    let attempts = Literal::u32_unsuffixed(paginated.retry_attempts);
    let delay = Literal::u64_unsuffixed(paginated.retry_delay_secs);
    let init = fragment::lex_optional(paginated.init_loop.as_deref(), "paginated read init_loop")?;
    let pre = fragment::lex_optional(paginated.pre_iterate.as_deref(), "paginated read pre_iterate")?;
    let post = fragment::lex_optional(paginated.post_iterate.as_deref(), "paginated read post_iterate")?;

    Ok(quote! {
        let result = retry::with_fixed_delay(#attempts, std::time::Duration::from_secs(#delay), || async {
            let mut params = apiclient::#params_type {
                limit: Some(#limit),
                ..Default::default()
            };

            #init

            loop {
                #pre

                #checked

                if let Some(item) = body.data.iter().find(|item| self.resource_match(&data, item)) {
                    return Ok(item.clone());
                }

                if !body.#has_more.unwrap_or(false) {
                    break;
                }
                match body.#cursor.as_deref() {
                    Some(cursor) if !cursor.is_empty() => params.after = Some(cursor.to_string()),
                    _ => break,
                }

                #post
            }

            Err(#NOT_FOUND_IN_LIST.to_string())
        })
        .await;

        let response_data = match result {
            Ok(item) => item,
            Err(err) => {
                resp.diagnostics.add_error("Client Error", err);
                return;
            }
        };

        resp.diagnostics.append(data.fill(&response_data));
        #bail
    })
}

fn generate_update(resource: &Resource, model_name: &str) -> Result<TokenStream, GeneratorError> {
    let Some(update) = &resource.api.update else {
        return Ok(quote! {
            async fn update(&self, _req: &resource::UpdateRequest, resp: &mut resource::UpdateResponse) {
                resp.diagnostics.add_error("Not Supported", "Update is not supported for this resource");
            }
        });
    };

    let model = type_ident(model_name)?;
    let call = operation_call(resource, update, "update request", quote! { &request_body })?;
    let checked = emit_checked_call(&call, "update", FailureMode::Diagnostic);
    let bail = emit_bail_on_error();

    Ok(quote! {
        async fn update(&self, req: &resource::UpdateRequest, resp: &mut resource::UpdateResponse) {
            let mut data = #model::default();

            resp.diagnostics.append(req.plan.get(&mut data));
            #bail

            let (request_body, diags) = self.get_update_json_request_body(&data);
            resp.diagnostics.append(diags);
            #bail

            #checked

            resp.diagnostics.append(data.fill(body));
            #bail

            resp.diagnostics.append(resp.state.set(&data));
        }
    })
}

fn generate_delete(resource: &Resource, model_name: &str) -> Result<TokenStream, GeneratorError> {
    let Some(delete) = &resource.api.delete else {
        return Ok(quote! {
            async fn delete(&self, _req: &resource::DeleteRequest, resp: &mut resource::DeleteResponse) {
                resp.diagnostics.add_warning(
                    "Not Supported",
                    "Delete is not supported for this resource. Please manually delete the resource.",
                );
            }
        });
    };

    let model = type_ident(model_name)?;
    let call = operation_call(resource, delete, "delete request", TokenStream::new())?;
    let bail = emit_bail_on_error();

    Ok(quote! {
        async fn delete(&self, req: &resource::DeleteRequest, resp: &mut resource::DeleteResponse) {
            let mut data = #model::default();

            resp.diagnostics.append(req.state.get(&mut data));
            #bail

            let http_resp = match #call.await {
                Ok(http_resp) => http_resp,
                Err(err) => {
                    resp.diagnostics.add_error("Client Error", format!("Unable to delete, got error: {err}"));
                    return;
                }
            };
            if http_resp.status() == http::StatusCode::NOT_FOUND {
                return;
            }
            if http_resp.status() != http::StatusCode::OK {
                resp.diagnostics.add_error(
                    "Client Error",
                    format!(
                        "Unable to delete, got status code {}: {}",
                        http_resp.status().as_u16(),
                        http_resp.text()
                    ),
                );
            }
        }
    })
}

/// Emits the `import_state` method, or `None` when the arity is not 1, 2 or 3.
fn generate_import_state(resource: &Resource) -> Result<Option<TokenStream>, GeneratorError> {
    let names = &resource.import_state_attributes;
    for name in names {
        if !resource.attributes.iter().any(|a| &a.name == name) {
            return Err(GeneratorError::UnknownAttribute {
                entity: resource.name.clone(),
                attribute: name.clone(),
                context: "import state".to_string(),
            });
        }
    }

    let split = match names.as_slice() {
        [only] => {
            return Ok(Some(quote! {
                fn import_state(&self, req: &resource::ImportStateRequest, resp: &mut resource::ImportStateResponse) {
                    resource::import_state_passthrough_id(path::root(#only), req, resp);
                }
            }));
        }
        [first, second] => quote! {
            let (first, second) = match tfutils::split_two_part_id(&req.id, #first, #second) {
                Ok(parts) => parts,
                Err(err) => {
                    resp.diagnostics.add_error("Invalid ID", format!("Error parsing ID: {err}"));
                    return;
                }
            };
        },
        [first, second, third] => quote! {
            let (first, second, third) = match tfutils::split_three_part_id(&req.id, #first, #second, #third) {
                Ok(parts) => parts,
                Err(err) => {
                    resp.diagnostics.add_error("Invalid ID", format!("Error parsing ID: {err}"));
                    return;
                }
            };
        },
        _ => {
            if !names.is_empty() {
                debug!(resource = %resource.name, arity = names.len(), "no import state for this arity");
            }
            return Ok(None);
        }
    };

    let parts = ["first", "second", "third"].map(|part| proc_macro2::Ident::new(part, proc_macro2::Span::call_site()));
    let assignments = names.iter().zip(parts.iter()).map(|(name, part)| {
        quote! {
            let diags = resp.state.set_attribute(path::root(#name), #part);
            resp.diagnostics.append(diags);
        }
    });

    Ok(Some(quote! {
        fn import_state(&self, req: &resource::ImportStateRequest, resp: &mut resource::ImportStateResponse) {
            #split

            #(#assignments)*
        }
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{format_tokens, make_resource};
    use providergen_define::Attribute;

    fn generate(resource: &Resource) -> String {
        format_tokens(&generate_resource(resource).unwrap())
    }

    /// Slice of `code` spanning the named lifecycle method.
    fn method_body<'a>(code: &'a str, name: &str) -> &'a str {
        let start = code
            .find(&format!("fn {name}("))
            .unwrap_or_else(|| panic!("no fn {name} in:\n{code}"));
        let rest = &code[start..];
        match rest.find("\n    }\n") {
            Some(end) => &rest[..end],
            None => rest,
        }
    }

    // === create tests ===

    #[test]
    fn create_builds_request_body_then_fills() {
        let code = generate(&make_resource());
        let create = method_body(&code, "create");

        let plan = create.find("req.plan.get(&mut data)").unwrap();
        let body = create.find("self.get_create_json_request_body(&data)").unwrap();
        let call = create.find("create_organization_team(").unwrap();
        let fill = create.find("data.fill(body)").unwrap();
        let state = create.find("resp.state.set(&data)").unwrap();
        assert!(plan < body && body < call && call < fill && fill < state);
        assert!(create.contains("&request_body"));
        assert!(create.contains("Unable to create, got error: {err}"));
    }

    // === read tests ===

    #[test]
    fn direct_read_fills_from_body() {
        let code = generate(&make_resource());
        let read = method_body(&code, "read");

        assert!(read.contains("req.state.get(&mut data)"));
        assert!(read.contains("get_organization_team("));
        assert!(read.contains("data.fill(body)"));
        assert!(!read.contains("retry::"));
    }

    #[test]
    fn list_and_match_read_retries_and_pages() {
        let mut resource = make_resource();
        resource.api.read = ApiOperation::new("ListOrganizationTeams", ["organization"]);
        resource.api.paginated_read = Some(PaginatedRead::default());
        let code = generate(&resource);
        let read = method_body(&code, "read");

        assert!(read.contains("retry::with_fixed_delay("));
        assert!(read.contains("std::time::Duration::from_secs(5)"));
        assert!(read.contains("10,") || read.contains("(10"));
        assert!(read.contains("apiclient::ListOrganizationTeamsParams"));
        assert!(read.contains("limit: Some(100)"));
        assert!(read.contains("self.resource_match(&data, item)"));
        assert!(read.contains("if !body.has_more.unwrap_or(false)"));
        assert!(read.contains("match body.last_id.as_deref()"));
        assert!(read.contains("Some(cursor) if !cursor.is_empty() =>"));
        assert!(read.contains("params.after = Some(cursor.to_string())"));
        assert!(read.contains("_ => break"));
        assert!(read.contains(NOT_FOUND_IN_LIST));
        assert!(read.contains("data.fill(&response_data)"));
    }

    #[test]
    fn list_and_match_uses_configured_fields() {
        let mut resource = make_resource();
        resource.api.paginated_read = Some(PaginatedRead {
            cursor_field: "next_cursor".to_string(),
            has_more_field: "more".to_string(),
            page_limit: 25,
            retry_attempts: 3,
            retry_delay_secs: 1,
            pre_iterate: Some("tracing::trace!(\"listing page\");".to_string()),
            ..Default::default()
        });
        let code = generate(&resource);
        let read = method_body(&code, "read");

        assert!(read.contains("body.more.unwrap_or(false)"));
        assert!(read.contains("body.next_cursor.as_deref()"));
        assert!(read.contains("limit: Some(25)"));
        assert!(read.contains("Duration::from_secs(1)"));
        assert!(read.contains("listing page"));
    }

    #[test]
    fn list_and_match_failures_propagate_into_retry() {
        let mut resource = make_resource();
        resource.api.paginated_read = Some(PaginatedRead::default());
        let code = generate(&resource);
        let read = method_body(&code, "read");

        assert!(read.contains("return Err("));
        assert!(read.contains("resp.diagnostics.add_error(\"Client Error\", err);"));
    }

    // === update tests ===

    #[test]
    fn missing_update_reports_error_without_call() {
        let mut resource = make_resource();
        resource.api.update = None;
        let code = generate(&resource);
        let update = method_body(&code, "update");

        assert!(update.contains("add_error("));
        assert!(update.contains(r#""Not Supported""#));
        assert!(update.contains(r#""Update is not supported for this resource""#));
        assert!(!update.contains("self.base.client"));
        assert!(update.contains("_req: &resource::UpdateRequest"));
    }

    #[test]
    fn configured_update_uses_plan() {
        let code = generate(&make_resource());
        let update = method_body(&code, "update");

        assert!(update.contains("req.plan.get(&mut data)"));
        assert!(update.contains("self.get_update_json_request_body(&data)"));
        assert!(update.contains("update_organization_team("));
        assert!(update.contains("Unable to update, got empty response body"));
    }

    // === delete tests ===

    #[test]
    fn missing_delete_warns_without_call() {
        let mut resource = make_resource();
        resource.api.delete = None;
        let code = generate(&resource);
        let delete = method_body(&code, "delete");

        assert!(delete.contains("add_warning("));
        assert!(delete.contains("Delete is not supported for this resource. Please manually delete the resource."));
        assert!(!delete.contains("self.base.client"));
    }

    #[test]
    fn delete_treats_not_found_as_success() {
        let code = generate(&make_resource());
        let delete = method_body(&code, "delete");

        let not_found = delete.find("http::StatusCode::NOT_FOUND").unwrap();
        let ok_check = delete.find("http::StatusCode::OK").unwrap();
        assert!(not_found < ok_check);
        assert!(delete.contains("delete_organization_team("));
        assert!(delete.contains("Unable to delete, got status code {}: {}"));
        assert!(!delete.contains("data.fill("));
    }

    // === import state tests ===

    #[test]
    fn import_state_single_attribute_passes_through() {
        let mut resource = make_resource();
        resource.import_state_attributes = vec!["slug".to_string()];
        let code = generate(&resource);

        assert!(code.contains("impl resource::ResourceWithImportState for TeamResource"));
        assert!(code.contains(r#"resource::import_state_passthrough_id(path::root("slug"), req, resp);"#));
    }

    #[test]
    fn import_state_two_parts_sets_positionally() {
        let code = generate(&make_resource());

        let split = code.find("tfutils::split_two_part_id(").unwrap();
        let organization = code[split..].find(r#""organization""#).unwrap();
        let slug = code[split..].find(r#""slug""#).unwrap();
        assert!(organization < slug);
        assert!(code.contains(r#"format!("Error parsing ID: {err}")"#));
        let first = code.find(r#"path::root("organization"), first"#).unwrap();
        let second = code.find(r#"path::root("slug"), second"#).unwrap();
        assert!(first < second);
    }

    #[test]
    fn import_state_three_parts() {
        let mut resource = make_resource();
        resource.attributes.push(Attribute::string("id", "The ID."));
        resource.import_state_attributes = vec!["organization".to_string(), "slug".to_string(), "id".to_string()];
        let code = generate(&resource);

        assert!(code.contains("tfutils::split_three_part_id("));
        assert!(code.contains(r#"path::root("id"), third"#));
    }

    #[test]
    fn import_state_omitted_for_other_arities() {
        let mut resource = make_resource();
        resource.import_state_attributes = vec![];
        assert!(!generate(&resource).contains("ResourceWithImportState"));

        resource.attributes.push(Attribute::string("id", "The ID."));
        resource.attributes.push(Attribute::string("extra", "Extra."));
        resource.import_state_attributes = ["organization", "slug", "id", "extra"].map(String::from).to_vec();
        assert!(!generate(&resource).contains("ResourceWithImportState"));
    }

    #[test]
    fn unknown_import_attribute_fails() {
        let mut resource = make_resource();
        resource.import_state_attributes = vec!["organization".to_string(), "team_slug".to_string()];
        let err = generate_resource(&resource).unwrap_err();
        match err {
            GeneratorError::UnknownAttribute { context, attribute, .. } => {
                assert_eq!(context, "import state");
                assert_eq!(attribute, "team_slug");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    // === model tests ===

    #[test]
    fn resource_model_always_fills_from_model() {
        let code = generate(&make_resource());
        assert!(code.contains("pub struct TeamResourceModel"));
        assert!(code.contains("pub fn fill(&mut self, data: &apiclient::Team) -> diag::Diagnostics"));
    }

    #[test]
    fn resource_model_defaults_to_camel_cased_name() {
        let mut resource = make_resource();
        resource.name = "project_ownership".to_string();
        resource.api.model = None;
        let code = generate(&resource);
        assert!(code.contains("data: &apiclient::ProjectOwnership"));
        assert!(code.contains(r#"format!("{}_project_ownership", req.provider_type_name)"#));
    }

    #[test]
    fn generated_file_is_valid_rust() {
        let mut resource = make_resource();
        resource.api.paginated_read = Some(PaginatedRead::default());
        resource.api.delete = None;
        assert!(syn::parse2::<syn::File>(generate_resource(&resource).unwrap()).is_ok());
    }
}
