//! Attribute definitions: the closed set of value shapes an entity can expose.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumDiscriminants, EnumIter, EnumString};

/// How an attribute participates in configuration and state.
///
/// The variant alone decides which schema flags are emitted:
///
/// | Variant | Flags |
/// |---|---|
/// | `Required` | `required` |
/// | `Optional` | `optional` |
/// | `Computed` | `computed` |
/// | `ComputedOptional` | `optional` + `computed` |
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ComputedOptionalRequired {
    Required,
    Optional,
    #[default]
    Computed,
    ComputedOptional,
}

impl ComputedOptionalRequired {
    /// Whether the `required` flag is set.
    pub fn is_required(self) -> bool {
        matches!(self, Self::Required)
    }

    /// Whether the `optional` flag is set.
    pub fn is_optional(self) -> bool {
        matches!(self, Self::Optional | Self::ComputedOptional)
    }

    /// Whether the `computed` flag is set.
    pub fn is_computed(self) -> bool {
        matches!(self, Self::Computed | Self::ComputedOptional)
    }
}

/// Element type of a `list` or `set` attribute.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ElementType {
    #[default]
    String,
}

/// Hint describing how the source value is represented upstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum SourceType {
    /// A timestamp rendered to its string form.
    Time,
}

/// The value shape of an attribute.
///
/// This set is closed: every consumer matches it exhaustively so a new
/// variant cannot be added without handling it everywhere.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, EnumDiscriminants)]
#[serde(tag = "type", rename_all = "snake_case")]
#[strum_discriminants(name(AttributeKind))]
#[strum_discriminants(derive(Hash, EnumIter))]
pub enum AttributeType {
    String,
    Int,
    Bool,
    List {
        #[serde(default)]
        element_type: ElementType,
    },
    Set {
        #[serde(default)]
        element_type: ElementType,
    },
    /// A set of nested records; the children form an independent model.
    SetNested {
        attributes: Vec<Attribute>,
        /// Upstream record type each element is filled from.
        model: String,
    },
    /// An opaque object value with no declared children.
    Object,
}

impl AttributeType {
    /// The discriminant of this attribute type.
    pub fn kind(&self) -> AttributeKind {
        AttributeKind::from(self)
    }
}

impl AttributeKind {
    /// The serialized name of the kind (e.g. `set_nested`).
    pub fn as_str(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Int => "int",
            Self::Bool => "bool",
            Self::List => "list",
            Self::Set => "set",
            Self::SetNested => "set_nested",
            Self::Object => "object",
        }
    }
}

impl std::fmt::Display for AttributeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single declared attribute of a data source, resource or nested model.
///
/// ## Examples
///
/// ```
/// use providergen_define::{Attribute, AttributeKind, ComputedOptionalRequired};
///
/// let attr = Attribute::string("internal_id", "The internal ID.").source(["id"]);
///
/// assert_eq!(attr.kind.kind(), AttributeKind::String);
/// assert_eq!(attr.computed_optional_required, ComputedOptionalRequired::Computed);
/// assert_eq!(attr.source_attribute, Some(vec!["id".to_string()]));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Attribute {
    pub name: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deprecation_message: Option<String>,
    /// Required in definitions files; builder constructors start from `Computed`.
    pub computed_optional_required: ComputedOptionalRequired,
    #[serde(default)]
    pub sensitive: bool,
    /// Verbatim validator expressions, in order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub validators: Vec<String>,
    /// Verbatim plan-modifier expressions, in order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub plan_modifiers: Vec<String>,
    #[serde(default)]
    pub nullable: bool,
    /// Field path read from the source record. An empty path reads the
    /// source value itself; `None` reads the field named after the attribute.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_attribute: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_type: Option<SourceType>,
    /// Field path written on the destination record.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination_attribute: Option<Vec<String>>,
    /// Excludes the attribute from the generated fill operation.
    #[serde(default)]
    pub skip_fill: bool,
    /// Verbatim statement used in place of the generated conversion.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_fill: Option<String>,
    #[serde(flatten)]
    pub kind: AttributeType,
}

impl Attribute {
    /// Creates a computed attribute of the given type.
    pub fn new(name: impl Into<String>, description: impl Into<String>, kind: AttributeType) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            deprecation_message: None,
            computed_optional_required: ComputedOptionalRequired::default(),
            sensitive: false,
            validators: Vec::new(),
            plan_modifiers: Vec::new(),
            nullable: false,
            source_attribute: None,
            source_type: None,
            destination_attribute: None,
            skip_fill: false,
            custom_fill: None,
            kind,
        }
    }

    pub fn string(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(name, description, AttributeType::String)
    }

    pub fn int(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(name, description, AttributeType::Int)
    }

    pub fn bool(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(name, description, AttributeType::Bool)
    }

    /// A list of strings.
    pub fn list(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(
            name,
            description,
            AttributeType::List {
                element_type: ElementType::String,
            },
        )
    }

    /// A set of strings.
    pub fn set(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(
            name,
            description,
            AttributeType::Set {
                element_type: ElementType::String,
            },
        )
    }

    /// A set of nested records filled from the upstream `model` type.
    pub fn set_nested(
        name: impl Into<String>,
        description: impl Into<String>,
        model: impl Into<String>,
        attributes: Vec<Attribute>,
    ) -> Self {
        Self::new(
            name,
            description,
            AttributeType::SetNested {
                attributes,
                model: model.into(),
            },
        )
    }

    pub fn object(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(name, description, AttributeType::Object)
    }

    pub fn required(mut self) -> Self {
        self.computed_optional_required = ComputedOptionalRequired::Required;
        self
    }

    pub fn optional(mut self) -> Self {
        self.computed_optional_required = ComputedOptionalRequired::Optional;
        self
    }

    pub fn computed(mut self) -> Self {
        self.computed_optional_required = ComputedOptionalRequired::Computed;
        self
    }

    pub fn computed_optional(mut self) -> Self {
        self.computed_optional_required = ComputedOptionalRequired::ComputedOptional;
        self
    }

    pub fn sensitive(mut self) -> Self {
        self.sensitive = true;
        self
    }

    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    pub fn deprecated(mut self, message: impl Into<String>) -> Self {
        self.deprecation_message = Some(message.into());
        self
    }

    pub fn validator(mut self, expr: impl Into<String>) -> Self {
        self.validators.push(expr.into());
        self
    }

    pub fn plan_modifier(mut self, expr: impl Into<String>) -> Self {
        self.plan_modifiers.push(expr.into());
        self
    }

    /// Overrides the source path. Pass an empty iterator to read the source value itself.
    pub fn source<I, S>(mut self, path: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.source_attribute = Some(path.into_iter().map(Into::into).collect());
        self
    }

    pub fn source_type(mut self, source_type: SourceType) -> Self {
        self.source_type = Some(source_type);
        self
    }

    /// Overrides the destination path.
    pub fn destination<I, S>(mut self, path: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.destination_attribute = Some(path.into_iter().map(Into::into).collect());
        self
    }

    pub fn skip_fill(mut self) -> Self {
        self.skip_fill = true;
        self
    }

    pub fn custom_fill(mut self, code: impl Into<String>) -> Self {
        self.custom_fill = Some(code.into());
        self
    }

    /// Children of a `set_nested` attribute, empty for every other kind.
    pub fn children(&self) -> &[Attribute] {
        match &self.kind {
            AttributeType::SetNested { attributes, .. } => attributes,
            AttributeType::String
            | AttributeType::Int
            | AttributeType::Bool
            | AttributeType::List { .. }
            | AttributeType::Set { .. }
            | AttributeType::Object => &[],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    #[test]
    fn computed_optional_required_flags() {
        use ComputedOptionalRequired::*;

        assert!(Required.is_required());
        assert!(!Required.is_optional() && !Required.is_computed());

        assert!(Optional.is_optional());
        assert!(!Optional.is_computed());

        assert!(Computed.is_computed());
        assert!(!Computed.is_optional());

        assert!(ComputedOptional.is_optional() && ComputedOptional.is_computed());
        assert!(!ComputedOptional.is_required());
    }

    #[test]
    fn computed_optional_required_round_trips_through_strum() {
        for variant in ComputedOptionalRequired::iter() {
            let parsed = ComputedOptionalRequired::from_str(&variant.to_string()).unwrap();
            assert_eq!(parsed, variant);
        }
        assert_eq!(ComputedOptionalRequired::ComputedOptional.to_string(), "computed_optional");
    }

    #[test]
    fn attribute_kind_covers_every_variant() {
        let kinds: Vec<&str> = AttributeKind::iter().map(AttributeKind::as_str).collect();
        assert_eq!(kinds, vec!["string", "int", "bool", "list", "set", "set_nested", "object"]);
    }

    #[test]
    fn builder_sets_fields() {
        let attr = Attribute::string("platform", "The platform.")
            .nullable()
            .deprecated("Use `slug` instead.")
            .sensitive()
            .validator("validators::length_at_least(1)")
            .plan_modifier("planmodifiers::use_state_for_unknown()")
            .destination(["platform_name"]);

        assert!(attr.nullable);
        assert!(attr.sensitive);
        assert_eq!(attr.deprecation_message.as_deref(), Some("Use `slug` instead."));
        assert_eq!(attr.validators.len(), 1);
        assert_eq!(attr.plan_modifiers.len(), 1);
        assert_eq!(attr.destination_attribute, Some(vec!["platform_name".to_string()]));
    }

    #[test]
    fn empty_source_path_is_distinct_from_none() {
        let attr = Attribute::set_nested("projects", "All projects.", "Project", vec![])
            .source(Vec::<String>::new());
        assert_eq!(attr.source_attribute, Some(vec![]));
    }

    #[test]
    fn children_only_for_set_nested() {
        let nested = Attribute::set_nested(
            "teams",
            "Teams.",
            "Team",
            vec![Attribute::string("slug", "Slug.")],
        );
        assert_eq!(nested.children().len(), 1);
        assert!(Attribute::object("meta", "Meta.").children().is_empty());
    }

    #[test]
    fn deserializes_flattened_type_tag() {
        let json = r#"{
            "name": "features",
            "description": "The features.",
            "computed_optional_required": "computed",
            "type": "set",
            "element_type": "string"
        }"#;
        let attr: Attribute = serde_json::from_str(json).unwrap();
        assert_eq!(
            attr.kind,
            AttributeType::Set {
                element_type: ElementType::String
            }
        );
        assert!(!attr.nullable);
    }

    #[test]
    fn deserializes_nested_attributes_from_yaml() {
        let yaml = r#"
name: teams
description: The teams.
computed_optional_required: computed
type: set_nested
model: Team
attributes:
  - name: internal_id
    description: The internal ID.
    computed_optional_required: computed
    type: string
    source_attribute: [id]
"#;
        let attr: Attribute = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(attr.kind.kind(), AttributeKind::SetNested);
        assert_eq!(attr.children()[0].source_attribute, Some(vec!["id".to_string()]));
    }

    #[test]
    fn missing_requiredness_fails_to_deserialize() {
        let json = r#"{
            "name": "slug",
            "description": "The slug.",
            "type": "string"
        }"#;
        let err = serde_json::from_str::<Attribute>(json).unwrap_err();
        assert!(err.to_string().contains("computed_optional_required"));
    }
}
