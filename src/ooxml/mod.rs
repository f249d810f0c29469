//! Office Open XML (OOXML) format implementation.
//!
//! This module reads, edits and writes Word documents in the Office Open
//! XML format.
//!
//! The implementation is based on the Open Packaging Conventions (OPC) and
//! follows the structure of the python-docx library, adapted for Rust.
//!
//! # Architecture
//!
//! 1. **OPC Layer** (`opc`): Low-level package handling (ZIP, parts, relationships)
//! 2. **Errors** (`error`): Error type shared by the OOXML modules
//! 3. **Word** (`docx`): the WordprocessingML document model
//!
//! # Example: Working with Word Documents
//!
//! ```rust,no_run
//! use transferdoc::ooxml::docx::Package;
//!
//! let pkg = Package::open("document.docx")?;
//! let doc = pkg.document();
//!
//! println!("{}", doc.text());
//! println!("Document contains {} paragraphs", doc.paragraph_count());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
pub mod docx;
pub mod error;
pub mod opc;

// Re-export commonly used types from OPC layer
pub use opc::{OpcPackage, PackURI};

// Re-export error types
pub use error::{OoxmlError, Result};
