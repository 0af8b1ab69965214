#![allow(unreachable_pub)]
#![allow(clippy::needless_pass_by_value)]

//! # Macros
//!
//! Procedural macros for the Folio workspace.
//!
//! Right now the crate ships a single attribute, [`macro@folio_error`], which turns a plain
//! enum into a `thiserror` error with context support. Every feature crate declares its
//! error type with it so failures read the same way in logs.

mod macros;

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

/// Attribute macro for declaring crate-level error enums.
///
/// # Features
///
/// * **Derives**: adds `#[derive(Debug, thiserror::Error)]` unless already present.
/// * **Context**: generates a companion `<ErrorName>Ext` trait with `.context(...)` for
///   `Result<T, ErrorName>` and for `Result<T, SourceError>` of every variant carrying a source.
/// * **Conversions**: `From<SourceError>` for source variants so `?` works on upstream errors.
/// * **Internal fallback**: `From<&'static str>` and `From<String>` when an `Internal` variant
///   exists.
/// * **Formatting helper**: a private `format_context` function for `#[error(...)]` strings.
///
/// # Requirements
///
/// 1. Only enums are accepted.
/// 2. Every variant uses named fields.
/// 3. A `context` field, when present, must be `Option<Cow<'static, str>>`.
/// 4. Variants with a `source` field (or a field marked `#[source]`/`#[from]`) must also carry
///    `context`.
///
/// # Example
///
/// ```rust,ignore
/// use folio_derive::folio_error;
/// use std::borrow::Cow;
///
/// #[folio_error]
/// pub enum CatalogError {
///     #[error("Catalog parse error{}: {source}", format_context(.context))]
///     Parse { source: serde_json::Error, context: Option<Cow<'static, str>> },
///
///     #[error("Internal catalog error{}: {message}", format_context(.context))]
///     Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
/// }
///
/// fn parse(raw: &str) -> Result<Vec<Project>, CatalogError> {
///     serde_json::from_str(raw).context("Decoding project list")
/// }
/// ```
#[proc_macro_attribute]
pub fn folio_error(_args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    macros::error::expand(input).into()
}
