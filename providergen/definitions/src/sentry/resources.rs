use providergen_define::prelude::*;

const REQUIRES_REPLACE: &str = "planmodifiers::string::requires_replace()";
const USE_STATE_FOR_UNKNOWN: &str = "planmodifiers::string::use_state_for_unknown()";

/// A team within an organization. Supports the full lifecycle.
pub fn define_team_resource() -> Resource {
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
                .plan_modifier(REQUIRES_REPLACE)
                .skip_fill(),
            Attribute::string("name", "The name of this team.").required(),
            Attribute::string("slug", "The unique URL slug for this team.")
                .computed_optional()
                .validator("validators::string::length_at_least(1)")
                .plan_modifier(USE_STATE_FOR_UNKNOWN),
            Attribute::string("internal_id", "The internal ID for this team.")
                .source(["id"])
                .plan_modifier(USE_STATE_FOR_UNKNOWN),
            Attribute::bool("has_access", "Whether the requesting user has access to this team."),
            Attribute::bool("is_pending", "Whether the team membership is pending."),
            Attribute::bool("is_member", "Whether the requesting user is a member of this team."),
        ],
    }
}

/// A client key of a project. Client keys are read back by listing the
/// project's keys and matching on the stored identifier.
pub fn define_client_key_resource() -> Resource {
    Resource {
        name: "key".to_string(),
        description: "Return a client key bound to a project.".to_string(),
        api: ResourceApi {
            model: Some("ProjectKey".to_string()),
            create: ApiOperation::new("CreateProjectClientKey", ["organization", "project"]),
            read: ApiOperation::new("ListProjectClientKeys", ["organization", "project"]),
            paginated_read: Some(PaginatedRead::default()),
            update: Some(ApiOperation::new(
                "UpdateProjectClientKey",
                ["organization", "project", "id"],
            )),
            delete: Some(ApiOperation::new(
                "DeleteProjectClientKey",
                ["organization", "project", "id"],
            )),
        },
        import_state_attributes: vec!["organization".to_string(), "project".to_string(), "id".to_string()],
        attributes: vec![
            Attribute::string("organization", "The organization the resource belongs to.")
                .required()
                .plan_modifier(REQUIRES_REPLACE)
                .skip_fill(),
            Attribute::string("project", "The project the resource belongs to.")
                .required()
                .plan_modifier(REQUIRES_REPLACE)
                .skip_fill(),
            Attribute::string("id", "The ID of this resource.").plan_modifier(USE_STATE_FOR_UNKNOWN),
            Attribute::string("name", "The name of the client key.").required(),
            Attribute::bool("is_active", "Flag indicating the key is active."),
            Attribute::string("public", "The public key.").plan_modifier(USE_STATE_FOR_UNKNOWN),
            Attribute::string("secret", "The secret key.")
                .sensitive()
                .plan_modifier(USE_STATE_FOR_UNKNOWN),
            Attribute::string("dsn_public", "The DSN tells the SDK where to send the events to.")
                .source(["dsn", "public"]),
            Attribute::int("rate_limit_window", "Length of time in seconds that will be considered when checking the rate limit.")
                .optional()
                .source(["rate_limit", "window"]),
        ],
    }
}

/// Ownership rules of a project. Ownership cannot be removed, only replaced.
pub fn define_project_ownership_resource() -> Resource {
    Resource {
        name: "project_ownership".to_string(),
        description: "Manages the ownership rules of a project.".to_string(),
        api: ResourceApi {
            model: Some("ProjectOwnership".to_string()),
            create: ApiOperation::new("UpdateProjectOwnership", ["organization", "project"]),
            read: ApiOperation::new("GetProjectOwnership", ["organization", "project"]),
            paginated_read: None,
            update: Some(ApiOperation::new("UpdateProjectOwnership", ["organization", "project"])),
            delete: None,
        },
        import_state_attributes: vec!["organization".to_string(), "project".to_string()],
        attributes: vec![
            Attribute::string("organization", "The organization of this resource.")
                .required()
                .plan_modifier(REQUIRES_REPLACE)
                .skip_fill(),
            Attribute::string("project", "The project of this resource.")
                .required()
                .plan_modifier(REQUIRES_REPLACE)
                .skip_fill(),
            Attribute::string("raw", "Raw input for ownership configuration.").optional(),
            Attribute::bool("fallthrough", "Whether to fall through to all project members.").computed_optional(),
            Attribute::string("auto_assignment", "Auto-assignment mode for issues.").computed_optional(),
            Attribute::bool(
                "codeowners_auto_sync",
                "Whether CODEOWNERS files are synced automatically.",
            )
            .computed_optional(),
        ],
    }
}

/// Every declared resource.
pub fn resources() -> Vec<Resource> {
    vec![
        define_team_resource(),
        define_client_key_resource(),
        define_project_ownership_resource(),
    ]
}
