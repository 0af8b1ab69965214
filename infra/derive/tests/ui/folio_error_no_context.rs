use folio_derive::folio_error;

#[folio_error]
pub enum FetchError {
    #[error("IO error: {source}")]
    Io {
        #[source]
        source: std::io::Error,
    },
}

fn main() {}
