use std::borrow::Cow;

/// Failure caught by an [`crate::ErrorBoundary`].
#[folio_derive::folio_error]
#[derive(Clone)]
pub enum BoundaryError {
    /// The view returned an error.
    #[error("View failed{}: {message}", format_context(.context))]
    View { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// The view panicked; `message` is the panic payload when it was a string.
    #[error("View panicked{}: {message}", format_context(.context))]
    Panicked { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Internal boundary error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}
