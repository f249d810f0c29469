/// Word (.docx) document support.
///
/// This module reads, edits and writes Microsoft Word documents in the
/// Office Open XML (OOXML) format.
///
/// # Architecture
///
/// - `Package`: the .docx file package, owning the editable main document
/// - `writer`: the mutable document model (paragraphs, runs, tables, styles)
/// - `parts`: parsing of the `word/document.xml` part into that model
///
/// # Example
///
/// ```rust,no_run
/// use transferdoc::ooxml::docx::Package;
///
/// let mut package = Package::open("document.docx")?;
///
/// for para in package.document().paragraphs() {
///     println!("Paragraph: {}", para.text());
///     for run in para.runs() {
///         println!("  Run: {}", run.text());
///     }
/// }
///
/// for table in package.document_mut().tables_mut() {
///     for row in table.rows_mut() {
///         for cell in row.cells_mut() {
///             println!("Cell: {}", cell.text());
///         }
///     }
/// }
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub mod format;
pub mod package;
pub mod parts;
pub mod writer;

pub use format::ParagraphAlignment;
pub use package::Package;
pub use writer::{
    BodyElement, BulletList, CoreProperties, MutableCell, MutableDocument, MutableParagraph,
    MutableRow, MutableRun, MutableStyle, MutableTable, RunContent, StyleType,
    TableLook,
};
