//! Identifier and type-name derivation.
//!
//! Every name that reaches generated code passes through this module so the
//! value-type emitter, the schema emitter and the model compiler always agree
//! on the same spelling.
//!
//! ## Conventions
//!
//! | Input | Output | Example |
//! |---|---|---|
//! | entity name | `UpperCamelCase` type | `all_projects` -> `AllProjects` |
//! | attribute name | field identifier | `type` -> `r#type` |
//! | nested attribute | `<Parent><Camel>Item` | `Project` + `teams` -> `ProjectTeamsItem` |
//! | remote method | `snake_case` method | `GetOrganization` -> `get_organization` |
//! | remote method | `<Method>Params` | `ListOrganizationProjects` -> `ListOrganizationProjectsParams` |

use heck::{ToSnakeCase, ToUpperCamelCase};
use proc_macro2::{Ident, Span, TokenStream};
use quote::quote;

use crate::errors::GeneratorError;

/// Keywords that must be written as raw identifiers.
const RAW_KEYWORDS: &[&str] = &[
    "abstract", "as", "async", "await", "become", "box", "break", "const", "continue", "do", "dyn", "else", "enum",
    "extern", "false", "final", "fn", "for", "gen", "if", "impl", "in", "let", "loop", "macro", "match", "mod",
    "move", "mut", "override", "priv", "pub", "ref", "return", "static", "struct", "trait", "true", "try", "type",
    "typeof", "unsafe", "unsized", "use", "virtual", "where", "while", "yield",
];

/// Keywords that cannot be used as identifiers at all, not even raw.
const RESERVED: &[&str] = &["self", "Self", "super", "crate", "_"];

/// Converts a snake_case or kebab-case name to `UpperCamelCase`.
///
/// ## Examples
///
/// ```
/// use providergen_gen::naming::camel_case;
///
/// assert_eq!(camel_case("all_projects"), "AllProjects");
/// assert_eq!(camel_case("is_public"), "IsPublic");
/// ```
pub fn camel_case(name: &str) -> String {
    name.to_upper_camel_case()
}

/// Name of the synthesized type for a nested attribute.
///
/// The same function is used when the nested type is declared and when it is
/// referenced, so both spellings always match.
pub fn nested_type_name(parent: &str, attribute: &str) -> String {
    format!("{parent}{}Item", camel_case(attribute))
}

pub fn data_source_type_name(entity: &str) -> String {
    format!("{}DataSource", camel_case(entity))
}

pub fn data_source_model_name(entity: &str) -> String {
    format!("{}DataSourceModel", camel_case(entity))
}

pub fn resource_type_name(entity: &str) -> String {
    format!("{}Resource", camel_case(entity))
}

pub fn resource_model_name(entity: &str) -> String {
    format!("{}ResourceModel", camel_case(entity))
}

/// Module (and file stem) holding a generated data source.
pub fn data_source_module_name(entity: &str) -> String {
    format!("data_source_{entity}")
}

/// Module (and file stem) holding a generated resource.
pub fn resource_module_name(entity: &str) -> String {
    format!("resource_{entity}")
}

/// Checks that `name` is a plain ASCII identifier.
pub fn validate_identifier(name: &str) -> Result<(), GeneratorError> {
    let invalid = |reason: &str| GeneratorError::InvalidIdentifier {
        name: name.to_string(),
        reason: reason.to_string(),
    };

    let mut chars = name.chars();
    match chars.next() {
        None => return Err(invalid("name is empty")),
        Some(first) if !(first.is_ascii_alphabetic() || first == '_') => {
            return Err(invalid("must start with a letter or underscore"));
        }
        Some(_) => {}
    }
    if !chars.all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err(invalid("only ASCII letters, digits and underscores are allowed"));
    }
    if RESERVED.contains(&name) {
        return Err(invalid("reserved keyword"));
    }
    Ok(())
}

/// Builds a value identifier (field, variable or method), escaping keywords.
pub fn field_ident(name: &str) -> Result<Ident, GeneratorError> {
    validate_identifier(name)?;
    if RAW_KEYWORDS.contains(&name) {
        Ok(Ident::new_raw(name, Span::call_site()))
    } else {
        Ok(Ident::new(name, Span::call_site()))
    }
}

/// Builds a type identifier from an already camel-cased name.
pub fn type_ident(name: &str) -> Result<Ident, GeneratorError> {
    validate_identifier(name)?;
    if RAW_KEYWORDS.contains(&name) {
        return Err(GeneratorError::InvalidIdentifier {
            name: name.to_string(),
            reason: "keywords cannot name a type".to_string(),
        });
    }
    Ok(Ident::new(name, Span::call_site()))
}

/// Client method identifier for a remote operation.
pub fn method_ident(method: &str) -> Result<Ident, GeneratorError> {
    field_ident(&method.to_snake_case())
}

/// Parameter type accompanying a remote operation, e.g. `ListOrganizationProjectsParams`.
pub fn params_type_ident(method: &str) -> Result<Ident, GeneratorError> {
    type_ident(&format!("{}Params", camel_case(method)))
}

/// Joins `root` and `path` into a field access expression.
///
/// An empty path yields `root` itself. `root` may be `self`.
///
/// ## Examples
///
/// ```
/// use providergen_gen::naming::field_path;
///
/// let path = vec!["organization".to_string(), "slug".to_string()];
/// let tokens = field_path("data", &path).unwrap();
/// assert_eq!(tokens.to_string(), "data . organization . slug");
/// ```
pub fn field_path(root: &str, path: &[String]) -> Result<TokenStream, GeneratorError> {
    let root = if root == "self" {
        Ident::new("self", Span::call_site())
    } else {
        field_ident(root)?
    };
    let segments = path.iter().map(|s| field_ident(s)).collect::<Result<Vec<_>, _>>()?;
    Ok(quote! { #root #(. #segments)* })
}
