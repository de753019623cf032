use providergen_define::prelude::*;

/// Teams attached to a project, shared by the `project` and `all_projects` data sources.
fn project_teams() -> Attribute {
    Attribute::set_nested(
        "teams",
        "The teams of this project.",
        "Team",
        vec![
            Attribute::string("internal_id", "The internal ID of this team.").source(["id"]),
            Attribute::string("name", "The name of this team."),
            Attribute::string("slug", "The slug of this team."),
        ],
    )
}

/// Retrieves a single organization by slug.
pub fn define_organization_data_source() -> DataSource {
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
            Attribute::string("slug", "The unique URL slug for the organization.").required(),
            Attribute::string("internal_id", "The internal ID for this organization.").source(["id"]),
            Attribute::string("name", "The human readable name for this organization."),
            Attribute::string("id", "The unique URL slug for this organization.")
                .deprecated("Use `slug` instead.")
                .source(["slug"]),
        ],
    }
}

/// Retrieves a single project within an organization.
pub fn define_project_data_source() -> DataSource {
    DataSource {
        name: "project".to_string(),
        description: "Retrieves a project.".to_string(),
        api: DataSourceApi {
            model: "Project".to_string(),
            read_method: "GetOrganizationProject".to_string(),
            read_request_attributes: vec!["organization".to_string(), "slug".to_string()],
            read_strategy: ReadStrategy::Simple,
        },
        generate: GenerateOptions { model_fillers: true },
        attributes: vec![
            Attribute::string("organization", "The organization slug.")
                .required()
                .source(["organization", "slug"]),
            Attribute::string("slug", "The unique URL slug for the project.").required(),
            Attribute::string("internal_id", "The internal ID of this project.").source(["id"]),
            Attribute::string("name", "The name of this project."),
            Attribute::string("platform", "The platform of this project.").nullable(),
            Attribute::string("color", "The color of this project."),
            Attribute::bool("is_public", "Whether this project is public."),
            Attribute::string("date_created", "The date this project was created.").source_type(SourceType::Time),
            Attribute::set("features", "The features of this project."),
            project_teams(),
            Attribute::string("id", "The unique URL slug for this project.")
                .deprecated("Use `slug` instead.")
                .source(["slug"]),
        ],
    }
}

/// Lists every project in an organization, following pagination.
pub fn define_all_projects_data_source() -> DataSource {
    DataSource {
        name: "all_projects".to_string(),
        description: "List of projects in an organization.".to_string(),
        api: DataSourceApi {
            model: "Project".to_string(),
            read_method: "ListOrganizationProjects".to_string(),
            read_request_attributes: vec!["organization".to_string()],
            read_strategy: ReadStrategy::Paginate(PaginateOptions::default()),
        },
        generate: GenerateOptions { model_fillers: true },
        attributes: vec![
            Attribute::string("organization", "The organization slug or internal ID to list projects for.")
                .required()
                .skip_fill(),
            Attribute::set_nested(
                "projects",
                "The projects in this organization.",
                "Project",
                vec![
                    Attribute::string("slug", "The unique URL slug for the project."),
                    Attribute::string("internal_id", "The internal ID of this project.").source(["id"]),
                    Attribute::string("name", "The name of this project."),
                    Attribute::string("platform", "The platform of this project.").nullable(),
                    Attribute::string("date_created", "The date this project was created.")
                        .source_type(SourceType::Time),
                    Attribute::set("features", "The features of this project."),
                    project_teams(),
                ],
            )
            .source(Vec::<String>::new()),
        ],
    }
}

/// Every declared data source.
pub fn data_sources() -> Vec<DataSource> {
    vec![
        define_organization_data_source(),
        define_project_data_source(),
        define_all_projects_data_source(),
    ]
}
