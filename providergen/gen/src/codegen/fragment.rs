//! Verbatim code fragments.
//!
//! Validators, plan modifiers, loop hooks and custom fill statements are
//! declared as source text. They are lexed into tokens and spliced as-is; the
//! generator never interprets them.

use proc_macro2::TokenStream;

use crate::errors::GeneratorError;

/// Lexes `code` into tokens.
///
/// ## Errors
///
/// Returns `GeneratorError::InvalidFragment` when the text does not lex
/// (unbalanced delimiters, unterminated literals).
pub fn lex(code: &str, context: &str) -> Result<TokenStream, GeneratorError> {
    code.parse::<TokenStream>().map_err(|e| GeneratorError::InvalidFragment {
        context: context.to_string(),
        reason: e.to_string(),
    })
}

/// Lexes an optional fragment, yielding no tokens when absent.
pub fn lex_optional(code: Option<&str>, context: &str) -> Result<TokenStream, GeneratorError> {
    match code {
        Some(code) => lex(code, context),
        None => Ok(TokenStream::new()),
    }
}

/// Lexes each fragment of a list.
pub fn lex_all(fragments: &[String], context: &str) -> Result<Vec<TokenStream>, GeneratorError> {
    fragments.iter().map(|code| lex(code, context)).collect()
}
