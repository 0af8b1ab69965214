use std::borrow::Cow;

/// Errors raised while reading environment signals.
///
/// The prober never propagates these: an unreadable signal is replaced by its default.
#[folio_derive::folio_error]
pub enum CapabilityError {
    /// The runtime exposes the signal but reading it failed (threw, was malformed).
    #[error("Signal '{signal}' unreadable{}: {message}", format_context(.context))]
    Unreadable {
        signal: &'static str,
        message: Cow<'static, str>,
        context: Option<Cow<'static, str>>,
    },

    #[error("Internal capability error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}
