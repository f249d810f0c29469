//! Transferdoc - builds and personalizes technology-transfer reports as
//! Word (.docx) documents.
//!
//! # Features
//!
//! - **Report builder**: writes the complete transfer report, cover to
//!   signatures, with its own styles, tables and bullet lists
//! - **Personalization**: fills `[placeholders]` in the latest report in
//!   place, keeping run formatting, run order and run count
//! - **Faithful round trip**: markup the document model does not interpret
//!   is carried through a load/save cycle verbatim
//! - **OPC packaging**: reads and writes the ZIP container, content types
//!   and relationships of Office Open XML files
//!
//! # Example - Generating a report
//!
//! ```no_run
//! use transferdoc::report;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let today = chrono::Local::now().date_naive();
//! let path = report::generate(std::path::Path::new("."), today)?;
//! println!("Documento generado: {}", path.display());
//! # Ok(())
//! # }
//! ```
//!
//! # Example - Personalizing the latest report
//!
//! ```no_run
//! use transferdoc::{MatchMode, PersonalizationConfig, personalize};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = PersonalizationConfig::default();
//! let outcome = personalize::personalize(std::path::Path::new("."), &config, MatchMode::PerRun)?;
//! println!("{} paragraphs changed", outcome.report.total());
//! # Ok(())
//! # }
//! ```

/// Error types, XML helpers and log setup shared by every module
pub mod common;

/// Locating the most recent generated report
pub mod discovery;

/// Personalization settings
pub mod config;

/// OOXML (Office Open XML) packaging and the WordprocessingML document model
pub mod ooxml;

/// The discover, load, substitute, save workflow
pub mod personalize;

/// The technology-transfer report builder
pub mod report;

/// Placeholder substitution over documents
pub mod substitute;

// Re-export commonly used types for convenience
pub use common::{Error, Result};
pub use config::PersonalizationConfig;
pub use discovery::{DiscoveryPattern, find_latest};
pub use personalize::PersonalizeOutcome;
pub use substitute::{MatchMode, ReplacementMap, SubstitutionEngine, SubstitutionReport};
