use folio_derive::folio_error;

#[folio_error]
pub enum FetchError {
    #[error("Module unavailable: {message}")]
    Unavailable { message: String, context: String },
}

fn main() {}
