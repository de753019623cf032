//! Model compiler.
//!
//! Turns an ordered attribute list into a record type plus an optional `fill`
//! operation, recursing into every `set_nested` attribute to produce an
//! independent child model.
//!
//! ## Generated Shape
//!
//! ```text
//! #[derive(Debug, Clone, Default, PartialEq)]
//! pub struct ProjectDataSourceModel {
//!     /// The name of this project.
//!     pub name: supertypes::StringValue,
//!     pub teams: supertypes::SetNestedObjectValueOf<ProjectDataSourceModelTeamsItem>,
//! }
//!
//! impl ProjectDataSourceModel {
//!     pub fn fill(&mut self, data: &apiclient::Project) -> diag::Diagnostics { ... }
//! }
//!
//! pub struct ProjectDataSourceModelTeamsItem { ... }
//! ```

use std::collections::HashMap;

use proc_macro2::TokenStream;
use providergen_define::{Attribute, AttributeType};
use quote::{ToTokens, quote};
use tracing::{debug, warn};

use super::attribute::{emit_conversion, emit_field};
use crate::errors::GeneratorError;
use crate::naming::{nested_type_name, type_ident};

/// A compiled model and the nested models it depends on.
#[derive(Debug, Clone)]
pub struct CompiledModel {
    /// Type name of the record.
    pub name: String,
    pub type_decl: TokenStream,
    pub fill_op: Option<TokenStream>,
    /// Child models, one per `set_nested` attribute in declaration order.
    pub nested: Vec<CompiledModel>,
}

impl CompiledModel {
    /// Every type name declared by this model tree, parent first.
    pub fn type_names(&self) -> Vec<&str> {
        let mut names = vec![self.name.as_str()];
        for child in &self.nested {
            names.extend(child.type_names());
        }
        names
    }

    /// Logs a warning for every type name the tree declares more than once.
    ///
    /// Collisions are reported but never renamed.
    pub fn warn_on_duplicate_names(&self, entity: &str) {
        let mut seen: HashMap<&str, usize> = HashMap::new();
        for name in self.type_names() {
            *seen.entry(name).or_default() += 1;
        }
        let mut duplicates: Vec<_> = seen.into_iter().filter(|(_, count)| *count > 1).collect();
        duplicates.sort();
        for (name, count) in duplicates {
            warn!(entity, type_name = name, count, "synthesized type name declared more than once");
        }
    }
}

impl ToTokens for CompiledModel {
    fn to_tokens(&self, tokens: &mut TokenStream) {
        self.type_decl.to_tokens(tokens);
        if let Some(fill) = &self.fill_op {
            fill.to_tokens(tokens);
        }
        for child in &self.nested {
            child.to_tokens(tokens);
        }
    }
}

/// Compiles a model named `name` from `attributes`.
///
/// `source_type` is the upstream record the `fill` operation reads from, e.g.
/// `apiclient::Project` or `[apiclient::Project]`. When `generate_fill` is
/// false no `fill` is emitted at any depth.
///
/// ## Errors
///
/// Fails when a name cannot be turned into an identifier or a verbatim fill
/// fragment does not lex.
pub fn compile_model(
    name: &str,
    attributes: &[Attribute],
    source_type: &TokenStream,
    generate_fill: bool,
) -> Result<CompiledModel, GeneratorError> {
    debug!(model = name, attributes = attributes.len(), "compiling model");

    let ident = type_ident(name)?;
    let fields = attributes
        .iter()
        .map(|attribute| emit_field(name, attribute))
        .collect::<Result<Vec<_>, _>>()?;

    let type_decl = quote! {
        #[derive(Debug, Clone, Default, PartialEq)]
        pub struct #ident {
            #(#fields,)*
        }
    };

    let fill_op = if generate_fill {
        Some(compile_fill(name, attributes, source_type)?)
    } else {
        None
    };

    let mut nested = Vec::new();
    for attribute in attributes {
        match &attribute.kind {
            AttributeType::SetNested {
                attributes: children,
                model,
            } => {
                let child_name = nested_type_name(name, &attribute.name);
                let model = type_ident(model)?;
                let child_source = quote! { apiclient::#model };
                nested.push(compile_model(&child_name, children, &child_source, generate_fill)?);
            }
            AttributeType::String
            | AttributeType::Int
            | AttributeType::Bool
            | AttributeType::List { .. }
            | AttributeType::Set { .. }
            | AttributeType::Object => {}
        }
    }

    Ok(CompiledModel {
        name: name.to_string(),
        type_decl,
        fill_op,
        nested,
    })
}

fn compile_fill(name: &str, attributes: &[Attribute], source_type: &TokenStream) -> Result<TokenStream, GeneratorError> {
    let ident = type_ident(name)?;
    let filled: Vec<&Attribute> = attributes.iter().filter(|a| !a.skip_fill).collect();

    let conversions = filled
        .iter()
        .map(|attribute| emit_conversion(name, attribute, "data", "self"))
        .collect::<Result<Vec<_>, _>>()?;

    // Only nested fills and custom statements append to the accumulator.
    let appends = filled
        .iter()
        .any(|a| a.custom_fill.is_some() || matches!(a.kind, AttributeType::SetNested { .. }));
    let diags_binding = if appends {
        quote! { let mut diags = diag::Diagnostics::default(); }
    } else {
        quote! { let diags = diag::Diagnostics::default(); }
    };

    Ok(quote! {
        impl #ident {
            pub fn fill(&mut self, data: &#source_type) -> diag::Diagnostics {
                #diags_binding
                #(#conversions)*
                diags
            }
        }
    })
}
