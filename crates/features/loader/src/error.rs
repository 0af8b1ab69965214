use std::borrow::Cow;

#[folio_derive::folio_error]
pub enum LoaderError {
    /// Raised by a [`crate::ModuleSource`]; the loader logs it and marks the module failed.
    #[error("Failed to fetch module '{module}'{}: {message}", format_context(.context))]
    Fetch { module: String, message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Invalid module manifest{}: {message}", format_context(.context))]
    InvalidManifest { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Internal loader error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

impl LoaderError {
    /// Shorthand for a [`LoaderError::Fetch`] without context.
    pub fn fetch(module: impl Into<String>, message: impl Into<Cow<'static, str>>) -> Self {
        Self::Fetch { module: module.into(), message: message.into(), context: None }
    }
}
