//! Attribute compiler.
//!
//! Four emitters turn a single [`Attribute`] into code fragments:
//!
//! - [`emit_schema_metadata`] - the declarative schema entry
//! - [`emit_value_type`] - the wrapped value type used as a model field
//! - [`emit_primitive_extraction`] - reading a plain value out of a wrapped field
//! - [`emit_conversion`] - assigning an upstream value into a wrapped field
//!
//! Each emitter matches [`AttributeType`] without a wildcard arm. Adding a
//! variant fails the build here until every emitter handles it.

use proc_macro2::TokenStream;
use providergen_define::{Attribute, AttributeType, ComputedOptionalRequired, ElementType, SourceType};
use quote::quote;

use super::fragment;
use crate::errors::GeneratorError;
use crate::naming::{field_ident, field_path, nested_type_name, type_ident};

fn element_type(element: ElementType) -> TokenStream {
    match element {
        ElementType::String => quote! { String },
    }
}

fn flag_fields(cor: ComputedOptionalRequired) -> TokenStream {
    match cor {
        ComputedOptionalRequired::Required => quote! { required: true, },
        ComputedOptionalRequired::Optional => quote! { optional: true, },
        ComputedOptionalRequired::Computed => quote! { computed: true, },
        ComputedOptionalRequired::ComputedOptional => quote! { optional: true, computed: true, },
    }
}

/// Description as rendered in the schema, with the deprecation notice appended.
pub fn markdown_description(attribute: &Attribute) -> String {
    match &attribute.deprecation_message {
        Some(message) => format!("{} **Deprecated** {}", attribute.description, message),
        None => attribute.description.clone(),
    }
}

/// Emits the schema entry for `attribute`.
///
/// `parent` is the name of the model the attribute belongs to; nested
/// attributes derive their element type name from it.
///
/// ## Examples
///
/// ```
/// use providergen_define::Attribute;
/// use providergen_gen::codegen::attribute::emit_schema_metadata;
///
/// let attr = Attribute::string("slug", "The slug.").required();
/// let tokens = emit_schema_metadata("OrganizationDataSourceModel", &attr).unwrap();
/// let code = tokens.to_string();
/// assert!(code.contains("schema :: StringAttribute"));
/// assert!(code.contains("required : true"));
/// ```
pub fn emit_schema_metadata(parent: &str, attribute: &Attribute) -> Result<TokenStream, GeneratorError> {
    let description = markdown_description(attribute);
    let deprecation = attribute
        .deprecation_message
        .as_ref()
        .map(|message| quote! { deprecation_message: Some(#message.to_string()), });
    let flags = flag_fields(attribute.computed_optional_required);
    let sensitive = attribute.sensitive.then(|| quote! { sensitive: true, });

    let validators = if attribute.validators.is_empty() {
        None
    } else {
        let exprs = fragment::lex_all(&attribute.validators, &format!("validators of '{}'", attribute.name))?;
        Some(quote! { validators: vec![#(#exprs),*], })
    };
    let plan_modifiers = if attribute.plan_modifiers.is_empty() {
        None
    } else {
        let exprs = fragment::lex_all(&attribute.plan_modifiers, &format!("plan modifiers of '{}'", attribute.name))?;
        Some(quote! { plan_modifiers: vec![#(#exprs),*], })
    };

    let (schema_type, custom_type, nested) = match &attribute.kind {
        AttributeType::String => (
            quote! { schema::StringAttribute },
            quote! { supertypes::StringType::default() },
            None,
        ),
        AttributeType::Int => (
            quote! { schema::Int64Attribute },
            quote! { supertypes::Int64Type::default() },
            None,
        ),
        AttributeType::Bool => (
            quote! { schema::BoolAttribute },
            quote! { supertypes::BoolType::default() },
            None,
        ),
        AttributeType::List { element_type: element } => {
            let element = element_type(*element);
            (
                quote! { schema::ListAttribute },
                quote! { supertypes::ListTypeOf::<#element>::default() },
                None,
            )
        }
        AttributeType::Set { element_type: element } => {
            let element = element_type(*element);
            (
                quote! { schema::SetAttribute },
                quote! { supertypes::SetTypeOf::<#element>::default() },
                None,
            )
        }
        AttributeType::SetNested { attributes, .. } => {
            let child_name = nested_type_name(parent, &attribute.name);
            let child = type_ident(&child_name)?;
            let children = emit_schema_attributes(&child_name, attributes)?;
            (
                quote! { schema::SetNestedAttribute },
                quote! { supertypes::SetNestedObjectTypeOf::<#child>::default() },
                Some(quote! {
                    nested_object: schema::NestedAttributeObject {
                        attributes: #children,
                    },
                }),
            )
        }
        AttributeType::Object => (
            quote! { schema::ObjectAttribute },
            quote! { supertypes::ObjectType::default() },
            None,
        ),
    };

    Ok(quote! {
        #schema_type {
            markdown_description: #description.to_string(),
            #deprecation
            #flags
            #sensitive
            custom_type: #custom_type,
            #nested
            #validators
            #plan_modifiers
            ..Default::default()
        }
    })
}

/// Emits the schema attribute map for a list of sibling attributes.
pub fn emit_schema_attributes(parent: &str, attributes: &[Attribute]) -> Result<TokenStream, GeneratorError> {
    let entries = attributes
        .iter()
        .map(|attribute| {
            let name = &attribute.name;
            let entry = emit_schema_metadata(parent, attribute)?;
            Ok(quote! { (#name.to_string(), #entry.into()) })
        })
        .collect::<Result<Vec<_>, GeneratorError>>()?;

    Ok(quote! { HashMap::from([#(#entries),*]) })
}

/// Emits the wrapped value type of `attribute`.
pub fn emit_value_type(parent: &str, attribute: &Attribute) -> Result<TokenStream, GeneratorError> {
    let tokens = match &attribute.kind {
        AttributeType::String => quote! { supertypes::StringValue },
        AttributeType::Int => quote! { supertypes::Int64Value },
        AttributeType::Bool => quote! { supertypes::BoolValue },
        AttributeType::List { element_type: element } => {
            let element = element_type(*element);
            quote! { supertypes::ListValueOf<#element> }
        }
        AttributeType::Set { element_type: element } => {
            let element = element_type(*element);
            quote! { supertypes::SetValueOf<#element> }
        }
        AttributeType::SetNested { .. } => {
            let child = type_ident(&nested_type_name(parent, &attribute.name))?;
            quote! { supertypes::SetNestedObjectValueOf<#child> }
        }
        AttributeType::Object => quote! { supertypes::ObjectValue },
    };
    Ok(tokens)
}

/// Emits an expression reading the plain value of `attribute` from the model in `source_var`.
///
/// ## Errors
///
/// Returns `GeneratorError::NonPrimitiveExtraction` for every type other than
/// `string`, `int` and `bool`.
pub fn emit_primitive_extraction(attribute: &Attribute, source_var: &str) -> Result<TokenStream, GeneratorError> {
    let field = field_path(source_var, std::slice::from_ref(&attribute.name))?;
    match &attribute.kind {
        AttributeType::String => Ok(quote! { #field.value_string() }),
        AttributeType::Int => Ok(quote! { #field.value_int64() }),
        AttributeType::Bool => Ok(quote! { #field.value_bool() }),
        AttributeType::List { .. }
        | AttributeType::Set { .. }
        | AttributeType::SetNested { .. }
        | AttributeType::Object => Err(GeneratorError::NonPrimitiveExtraction {
            attribute: attribute.name.clone(),
            kind: attribute.kind.kind().to_string(),
        }),
    }
}

/// Emits the statement assigning the upstream value of `attribute` into its wrapped field.
///
/// The source is `source_var` followed by the attribute's source path (its own
/// field name unless overridden); the destination works the same way with the
/// destination path. A `custom_fill` statement replaces the generated one.
pub fn emit_conversion(
    parent: &str,
    attribute: &Attribute,
    source_var: &str,
    dest_var: &str,
) -> Result<TokenStream, GeneratorError> {
    if let Some(code) = &attribute.custom_fill {
        return fragment::lex(code, &format!("custom fill of '{}'", attribute.name));
    }

    let own_name = std::slice::from_ref(&attribute.name);
    let src = field_path(source_var, attribute.source_attribute.as_deref().unwrap_or(own_name))?;
    let dest = field_path(dest_var, attribute.destination_attribute.as_deref().unwrap_or(own_name))?;

    let tokens = match &attribute.kind {
        AttributeType::String if attribute.nullable => quote! {
            if let Some(value) = #src.as_ref() {
                #dest = supertypes::StringValue::new_or_null(value.clone());
            } else {
                #dest = supertypes::StringValue::null();
            }
        },
        AttributeType::String => match attribute.source_type {
            Some(SourceType::Time) => quote! { #dest = supertypes::StringValue::new(#src.to_string()); },
            None => quote! { #dest = supertypes::StringValue::new(#src.clone()); },
        },
        AttributeType::Int => quote! { #dest = supertypes::Int64Value::new(#src); },
        AttributeType::Bool => quote! { #dest = supertypes::BoolValue::new(#src); },
        AttributeType::List { .. } => quote! { #dest = supertypes::ListValueOf::from_slice(&#src); },
        AttributeType::Set { .. } => quote! { #dest = supertypes::SetValueOf::from_slice(&#src); },
        AttributeType::SetNested { .. } => {
            let child = type_ident(&nested_type_name(parent, &attribute.name))?;
            quote! {
                #dest = supertypes::SetNestedObjectValueOf::from_values(
                    #src
                        .iter()
                        .map(|item| {
                            let mut model = #child::default();
                            diags.append(model.fill(item));
                            model
                        })
                        .collect(),
                );
            }
        }
        AttributeType::Object => quote! { #dest = supertypes::ObjectValue::new(#src.clone()); },
    };
    Ok(tokens)
}

/// Emits the model field declaration for `attribute`.
pub fn emit_field(parent: &str, attribute: &Attribute) -> Result<TokenStream, GeneratorError> {
    let ident = field_ident(&attribute.name)?;
    let value_type = emit_value_type(parent, attribute)?;
    let doc = format!(" {}", markdown_description(attribute));
    Ok(quote! {
        #[doc = #doc]
        pub #ident: #value_type
    })
}
