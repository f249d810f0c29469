/// Open Packaging Conventions (OPC) implementation.
///
/// Package structure (parts, relationships), content type management and the
/// ZIP-based physical packaging used by `.docx` files.
///
/// - `quick-xml` for `[Content_Types].xml` and `.rels` parsing
/// - `atoi_simd` for relationship id numbering
/// - `zip` for the physical archive
pub mod constants;
pub mod error;
pub mod package;
pub mod packuri;
pub mod part;
pub mod phys_pkg;
pub mod pkgreader;
pub mod pkgwriter;
pub mod rel;

// Re-export commonly used types
pub use package::OpcPackage;
pub use packuri::PackURI;
pub use part::{BlobPart, Part};
pub use rel::{Relationship, Relationships};
