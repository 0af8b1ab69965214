use std::borrow::Cow;

#[folio_derive::folio_error]
pub enum CatalogError {
    #[error("Malformed project catalog{}: {source}", format_context(.context))]
    Parse { source: serde_json::Error, context: Option<Cow<'static, str>> },

    #[error("Internal catalog error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}
