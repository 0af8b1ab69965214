use std::borrow::Cow;

/// Raised by a [`crate::VisibilityObserver`] that cannot watch a section.
///
/// Never surfaced past [`crate::Section::mount`]: the section fails open instead.
#[folio_derive::folio_error]
pub enum ObserveError {
    /// The runtime has no intersection observation at all.
    #[error("Visibility observation unsupported{}", format_context(.context))]
    Unsupported { context: Option<Cow<'static, str>> },

    #[error("Failed to observe section '{section}'{}: {message}", format_context(.context))]
    Failed { section: String, message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Internal observer error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}
