use folio_loader::LoaderError;
use std::borrow::Cow;

#[folio_derive::folio_error]
pub enum PageError {
    #[error("Module loader error{}: {source}", format_context(.context))]
    Loader { source: LoaderError, context: Option<Cow<'static, str>> },

    /// A required collaborator was not given to the builder.
    #[error("Page is missing its {component}{}", format_context(.context))]
    Missing { component: &'static str, context: Option<Cow<'static, str>> },

    #[error("Internal page error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}
