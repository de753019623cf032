//! Shared test utilities for providergen-gen tests.
//!
//! Fixtures mirror the shapes of the built-in Sentry definitions so that
//! assertions read like the generated provider code.

use proc_macro2::TokenStream;
use providergen_define::{
    ApiOperation, Attribute, AttributeKind, DataSource, DataSourceApi, GenerateOptions, PaginateOptions,
    ReadStrategy, Resource, ResourceApi,
};
use quote::quote;

/// Formats a complete file's tokens with prettyplease.
///
/// Panics if the tokens are not a valid Rust file.
pub fn format_tokens(tokens: &TokenStream) -> String {
    let file = syn::parse2::<syn::File>(tokens.clone())
        .unwrap_or_else(|e| panic!("generated tokens did not parse: {e}\n{tokens}"));
    prettyplease::unparse(&file)
}

/// Formats a single expression.
///
/// The expression is wrapped in a `const` item for parsing and unwrapped again
/// afterwards, so short expressions come back on one line.
pub fn format_expr(tokens: &TokenStream) -> String {
    let code = format_tokens(&quote! { const _: () = #tokens; });
    code.trim_start_matches("const _: () = ")
        .trim_end()
        .trim_end_matches(';')
        .to_string()
}

/// Formats a sequence of statements inside a wrapper function.
pub fn format_statements(tokens: &TokenStream) -> String {
    format_tokens(&quote! {
        fn __wrapper() {
            #tokens
        }
    })
}

/// Returns an attribute of the given kind named after it.
pub fn sample_attribute(kind: AttributeKind) -> Attribute {
    match kind {
        AttributeKind::String => Attribute::string("name", "A string."),
        AttributeKind::Int => Attribute::int("count", "An int."),
        AttributeKind::Bool => Attribute::bool("enabled", "A bool."),
        AttributeKind::List => Attribute::list("tags", "A list."),
        AttributeKind::Set => Attribute::set("features", "A set."),
        AttributeKind::SetNested => Attribute::set_nested(
            "teams",
            "A nested set.",
            "Team",
            vec![Attribute::string("slug", "The slug.")],
        ),
        AttributeKind::Object => Attribute::object("options", "An object."),
    }
}

/// A project-like attribute list with one `teams` set of string-only children.
pub fn project_attributes() -> Vec<Attribute> {
    vec![
        Attribute::string("slug", "The unique URL slug for this project.").required(),
        Attribute::string("name", "The name of this project."),
        Attribute::set_nested(
            "teams",
            "The teams for this project.",
            "Team",
            vec![
                Attribute::string("id", "The ID of this team."),
                Attribute::string("slug", "The slug of this team."),
                Attribute::string("name", "The name of this team."),
            ],
        ),
    ]
}

/// A data source read with a single call.
pub fn make_simple_data_source() -> DataSource {
    DataSource {
        name: "organization".to_string(),
        description: "Retrieves an organization.".to_string(),
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
        ],
    }
}

/// A data source read by following the pagination cursor.
pub fn make_paginated_data_source() -> DataSource {
    DataSource {
        name: "all_projects".to_string(),
        description: "Retrieves all projects for an organization.".to_string(),
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
                "The projects of this organization.",
                "Project",
                vec![
                    Attribute::string("slug", "The slug of this project."),
                    Attribute::string("name", "The name of this project."),
                ],
            )
            .source(Vec::<String>::new()),
        ],
    }
}

/// A team resource with the full lifecycle and a two-part import ID.
pub fn make_resource() -> Resource {
    Resource {
        name: "team".to_string(),
        description: "Sentry Team resource.".to_string(),
        api: ResourceApi {
            model: Some("Team".to_string()),
            create: ApiOperation::new("CreateOrganizationTeam", ["organization"]),
            read: ApiOperation::new("GetOrganizationTeam", ["organization", "slug"]),
            paginated_read: None,
            update: Some(ApiOperation::new("UpdateOrganizationTeam", ["organization", "slug"])),
            delete: Some(ApiOperation::new("DeleteOrganizationTeam", ["organization", "slug"])),
        },
        import_state_attributes: vec!["organization".to_string(), "slug".to_string()],
        attributes: vec![
            Attribute::string("organization", "The organization of this resource.")
                .required()
                .skip_fill(),
            Attribute::string("name", "The name of this team.").required(),
            Attribute::string("slug", "The unique URL slug for this team.").computed_optional(),
            Attribute::string("internal_id", "The internal ID for this team.").source(["id"]),
            Attribute::bool("is_member", "Whether the requesting user is a member of this team."),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn sample_attribute_matches_requested_kind() {
        for kind in AttributeKind::iter() {
            assert_eq!(sample_attribute(kind).kind.kind(), kind);
        }
    }

    #[test]
    fn format_expr_unwraps_short_expressions() {
        assert_eq!(format_expr(&quote! { data.slug.value_string() }), "data.slug.value_string()");
    }

    #[test]
    fn fixtures_reference_declared_attributes() {
        let ds = make_simple_data_source();
        assert!(ds.attributes.iter().any(|a| a.name == "slug"));

        let resource = make_resource();
        for name in &resource.import_state_attributes {
            assert!(resource.attributes.iter().any(|a| &a.name == name));
        }
    }
}
