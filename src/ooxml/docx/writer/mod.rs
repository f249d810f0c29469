//! Mutable document model for DOCX.
//!
//! The same types back documents built from scratch and documents loaded
//! from an existing package for in-place editing.

pub mod core_props;
pub mod doc;
pub mod numbering;
pub mod paragraph;
pub mod run;
pub mod section;
pub mod style;
pub mod table;

pub use core_props::CoreProperties;
pub use doc::{BodyElement, MutableDocument};
pub use numbering::{BulletList, generate_numbering_xml};
pub use paragraph::{MutableParagraph, ParagraphElement};
pub use run::{MutableRun, RunContent};
pub use section::SectionProperties;
pub use style::{MutableStyle, StyleType, TableLook, generate_styles_xml};
pub use table::{CellElement, MutableCell, MutableRow, MutableTable, RowElement, TableElement};
