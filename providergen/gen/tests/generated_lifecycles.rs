//! Lifecycle behavior of generated data sources and resources.
//!
//! Generated files are parsed back with `syn` so the assertions can count
//! fields and statements instead of matching formatting.

use providergen_define::prelude::*;
use providergen_gen::codegen::{generate_data_source, generate_resource};
use quote::ToTokens;
use syn::{Expr, ImplItem, Item, ItemImpl, ItemStruct, Stmt};

fn parse(tokens: proc_macro2::TokenStream) -> syn::File {
    syn::parse2(tokens).expect("generated code should parse")
}

fn format(file: &syn::File) -> String {
    prettyplease::unparse(file)
}

fn find_struct<'a>(file: &'a syn::File, name: &str) -> &'a ItemStruct {
    file.items
        .iter()
        .find_map(|item| match item {
            Item::Struct(s) if s.ident == name => Some(s),
            _ => None,
        })
        .unwrap_or_else(|| panic!("no struct {name}"))
}

/// Method `method` of the inherent impl of `name`.
fn find_inherent_impl<'a>(file: &'a syn::File, name: &str, method: &str) -> &'a syn::ImplItemFn {
    file.items
        .iter()
        .filter_map(|item| match item {
            Item::Impl(i) if i.trait_.is_none() && self_type_is(i, name) => Some(i),
            _ => None,
        })
        .flat_map(|i| i.items.iter())
        .find_map(|item| match item {
            ImplItem::Fn(f) if f.sig.ident == method => Some(f),
            _ => None,
        })
        .unwrap_or_else(|| panic!("no {name}::{method}"))
}

/// Method `method` of the `impl <trait_name> for <name>` block.
fn find_trait_method<'a>(file: &'a syn::File, trait_name: &str, method: &str) -> &'a syn::ImplItemFn {
    file.items
        .iter()
        .filter_map(|item| match item {
            Item::Impl(i) => i.trait_.as_ref().map(|(_, path, _)| (i, path)),
            _ => None,
        })
        .filter(|(_, path)| path.segments.last().is_some_and(|s| s.ident == trait_name))
        .flat_map(|(i, _)| i.items.iter())
        .find_map(|item| match item {
            ImplItem::Fn(f) if f.sig.ident == method => Some(f),
            _ => None,
        })
        .unwrap_or_else(|| panic!("no {trait_name}::{method}"))
}

fn self_type_is(item: &ItemImpl, name: &str) -> bool {
    item.self_ty.to_token_stream().to_string() == name
}

/// Destinations of the assignment statements of a fill body, in order.
fn assignment_targets(method: &syn::ImplItemFn) -> Vec<String> {
    method
        .block
        .stmts
        .iter()
        .filter_map(|stmt| match stmt {
            Stmt::Expr(Expr::Assign(assign), Some(_)) => Some(assign.left.to_token_stream().to_string()),
            _ => None,
        })
        .collect()
}

// === simple data source ===

fn organization_data_source() -> DataSource {
    DataSource {
        name: "organization".to_string(),
        description: "Sentry Organization data source.".to_string(),
        api: DataSourceApi {
            model: "Organization".to_string(),
            read_method: "GetOrganization".to_string(),
            read_request_attributes: vec!["slug".to_string()],
            read_strategy: ReadStrategy::Simple,
        },
        generate: GenerateOptions { model_fillers: true },
        attributes: vec![
            Attribute::string("slug", "The unique URL slug for this organization.").required(),
            Attribute::string("internal_id", "The internal ID for this organization.").source(["id"]),
            Attribute::string("name", "The human readable name for this organization."),
            Attribute::string("id", "The unique URL slug for this organization.")
                .deprecated("Use `slug` instead.")
                .source(["slug"]),
        ],
    }
}

#[test]
fn simple_read_record_has_one_field_per_attribute() {
    let file = parse(generate_data_source(&organization_data_source()).unwrap());
    let model = find_struct(&file, "OrganizationDataSourceModel");

    let fields: Vec<String> = model
        .fields
        .iter()
        .map(|f| f.ident.as_ref().unwrap().to_string())
        .collect();
    assert_eq!(fields, vec!["slug", "internal_id", "name", "id"]);
}

#[test]
fn simple_read_fill_has_one_conversion_per_attribute_in_order() {
    let file = parse(generate_data_source(&organization_data_source()).unwrap());
    let fill = find_inherent_impl(&file, "OrganizationDataSourceModel", "fill");

    assert_eq!(
        assignment_targets(fill),
        vec!["self . slug", "self . internal_id", "self . name", "self . id"]
    );
    let code = format(&file);
    assert!(code.contains("self.internal_id = supertypes::StringValue::new(data.id.clone());"));
    assert!(code.contains("self.id = supertypes::StringValue::new(data.slug.clone());"));
}

#[test]
fn simple_read_schema_has_one_entry_per_attribute() {
    let file = parse(generate_data_source(&organization_data_source()).unwrap());
    let schema = find_trait_method(&file, "DataSource", "schema");
    let code = schema.block.to_token_stream().to_string();

    assert_eq!(code.matches(". into ()").count(), 4);
    let positions: Vec<usize> = ["\"slug\"", "\"internal_id\"", "\"name\"", "\"id\""]
        .iter()
        .map(|name| code.find(name).unwrap())
        .collect();
    assert!(positions.windows(2).all(|w| w[0] < w[1]));
    assert!(code.contains("**Deprecated** Use `slug` instead."));
}

// === paginated data source ===

fn all_projects_data_source() -> DataSource {
    DataSource {
        name: "all_projects".to_string(),
        description: "Sentry all projects data source.".to_string(),
        api: DataSourceApi {
            model: "Project".to_string(),
            read_method: "ListOrganizationProjects".to_string(),
            read_request_attributes: vec!["organization".to_string()],
            read_strategy: ReadStrategy::Paginate(PaginateOptions::default()),
        },
        generate: GenerateOptions { model_fillers: true },
        attributes: vec![
            Attribute::string("organization", "The slug of the organization.")
                .required()
                .skip_fill(),
            Attribute::set_nested(
                "projects",
                "The list of projects.",
                "Project",
                vec![Attribute::string("slug", "The slug."), Attribute::string("name", "The name.")],
            )
            .source(Vec::<String>::new()),
        ],
    }
}

#[test]
fn paginated_read_loop_accumulates_then_fills_once() {
    let file = parse(generate_data_source(&all_projects_data_source()).unwrap());
    let read = find_trait_method(&file, "DataSource", "read");

    let body = read.block.to_token_stream().to_string();
    let loop_at = body.find("loop {").unwrap();
    let extend = body.find("model_instances . extend_from_slice (body)").unwrap();
    let cursor = body.find("sentryclient :: parse_next_pagination_cursor (& http_resp)").unwrap();
    let brk = body.find("break").unwrap();
    let fill = body.find("data . fill (& model_instances)").unwrap();

    assert!(loop_at < extend && extend < cursor && cursor < brk && brk < fill);
    assert_eq!(body.matches("loop {").count(), 1);
    assert_eq!(body.matches(". fill (").count(), 1);
}

#[test]
fn paginated_read_nested_model_fills_from_whole_page_set() {
    let file = parse(generate_data_source(&all_projects_data_source()).unwrap());
    let fill = find_inherent_impl(&file, "AllProjectsDataSourceModel", "fill");

    assert_eq!(assignment_targets(fill), vec!["self . projects"]);
    let code = format(&file);
    assert!(code.contains("pub fn fill(&mut self, data: &[apiclient::Project]) -> diag::Diagnostics"));
    find_struct(&file, "AllProjectsDataSourceModelProjectsItem");
}

// === import state ===

fn team_resource() -> Resource {
    providergen_definitions::sentry::define_team_resource()
}

#[test]
fn import_splits_into_two_positional_parts() {
    let file = parse(generate_resource(&team_resource()).unwrap());
    let import = find_trait_method(&file, "ResourceWithImportState", "import_state");
    let body = import.block.to_token_stream().to_string();

    assert!(body.contains("tfutils :: split_two_part_id (& req . id , \"organization\" , \"slug\")"));
    let first = body.find("path :: root (\"organization\") , first").unwrap();
    let second = body.find("path :: root (\"slug\") , second").unwrap();
    assert!(first < second);
    assert_eq!(body.matches("set_attribute").count(), 2);
    assert!(body.contains("\"Invalid ID\""));
}

// === unsupported operations ===

#[test]
fn unconfigured_delete_warns_without_calls() {
    let resource = providergen_definitions::sentry::define_project_ownership_resource();
    assert!(resource.api.delete.is_none());

    let file = parse(generate_resource(&resource).unwrap());
    let delete = find_trait_method(&file, "Resource", "delete");
    let body = delete.block.to_token_stream().to_string();

    assert!(!body.contains("self . base . client"));
    assert!(!body.contains(". await"));
    assert!(body.contains("add_warning"));
    assert!(!body.contains("add_error"));
}

#[test]
fn unconfigured_update_errors_without_calls() {
    let mut resource = team_resource();
    resource.api.update = None;

    let file = parse(generate_resource(&resource).unwrap());
    let update = find_trait_method(&file, "Resource", "update");
    let body = update.block.to_token_stream().to_string();

    assert!(!body.contains("self . base . client"));
    assert!(body.contains("add_error"));
    assert!(body.contains("\"Update is not supported for this resource\""));
}
