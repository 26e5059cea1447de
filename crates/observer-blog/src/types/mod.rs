//! WordPress API types.

mod document;
mod media;

pub use document::{DocumentKind, DocumentRef};
pub(crate) use document::DocumentResponse;
pub use media::Image;
pub(crate) use media::MediaResponse;
