mod boundary;
mod observe;

pub use boundary::{BoundaryError, BoundaryErrorExt};
pub use observe::{ObserveError, ObserveErrorExt};
