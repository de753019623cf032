//! Remote call emission shared by data sources and resources.
//!
//! Every lifecycle body performs the same checked round trip: issue the call,
//! then reject transport failures, non-200 statuses and empty bodies with
//! distinct messages. On success the decoded payload is bound to `body`.

use proc_macro2::TokenStream;
use providergen_define::Attribute;
use quote::quote;

use super::attribute::emit_primitive_extraction;
use crate::errors::GeneratorError;

/// How a failed call terminates the surrounding code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureMode {
    /// Record an error diagnostic on `resp` and return.
    Diagnostic,
    /// Return `Err(String)` from the enclosing closure.
    Propagate,
}

/// Resolves `requested` attribute names to primitive extractions from `source_var`.
///
/// ## Errors
///
/// - `GeneratorError::UnknownAttribute` when a name is not declared by `attributes`
/// - `GeneratorError::NonPrimitiveExtraction` when it names a non-primitive attribute
pub fn emit_request_args(
    entity: &str,
    context: &str,
    attributes: &[Attribute],
    requested: &[String],
    source_var: &str,
) -> Result<Vec<TokenStream>, GeneratorError> {
    requested
        .iter()
        .map(|name| {
            let attribute = attributes
                .iter()
                .find(|a| &a.name == name)
                .ok_or_else(|| GeneratorError::UnknownAttribute {
                    entity: entity.to_string(),
                    attribute: name.clone(),
                    context: context.to_string(),
                })?;
            emit_primitive_extraction(attribute, source_var)
        })
        .collect()
}

/// Emits a checked call to `call` (a future-returning expression), binding `body` on success.
///
/// `verb` names the operation in messages, e.g. `read` gives
/// `Unable to read, got error: ...`.
pub fn emit_checked_call(call: &TokenStream, verb: &str, mode: FailureMode) -> TokenStream {
    let transport = format!("Unable to {verb}, got error: {{err}}");
    let status = format!("Unable to {verb}, got status code {{}}: {{}}");
    let empty = format!("Unable to {verb}, got empty response body");

    match mode {
        FailureMode::Diagnostic => quote! {
            let http_resp = match #call.await {
                Ok(http_resp) => http_resp,
                Err(err) => {
                    resp.diagnostics.add_error("Client Error", format!(#transport));
                    return;
                }
            };
            if http_resp.status() != http::StatusCode::OK {
                resp.diagnostics.add_error(
                    "Client Error",
                    format!(#status, http_resp.status().as_u16(), http_resp.text()),
                );
                return;
            }
            let Some(body) = http_resp.json200() else {
                resp.diagnostics.add_error("Client Error", #empty);
                return;
            };
        },
        FailureMode::Propagate => quote! {
            let http_resp = #call.await.map_err(|err| format!(#transport))?;
            if http_resp.status() != http::StatusCode::OK {
                return Err(format!(#status, http_resp.status().as_u16(), http_resp.text()));
            }
            let Some(body) = http_resp.json200() else {
                return Err(#empty.to_string());
            };
        },
    }
}

/// Emits the early return taken when diagnostics already hold an error.
pub fn emit_bail_on_error() -> TokenStream {
    quote! {
        if resp.diagnostics.has_error() {
            return;
        }
    }
}
