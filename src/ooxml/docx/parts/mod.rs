/// Part implementations for Word documents.
///
/// Only the main document part is interpreted; styles, numbering, settings
/// and media of a loaded package travel through as blob parts.
pub mod document_part;

pub use document_part::parse_document;
