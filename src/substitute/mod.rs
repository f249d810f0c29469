//! Placeholder substitution over Word documents.
//!
//! A [`ReplacementMap`] holds ordered `(placeholder, replacement)` pairs.
//! [`SubstitutionEngine`] applies them to every body paragraph and to every
//! paragraph of every body-level table cell, rewriting run text in place
//! while leaving formatting, run count and run order alone.
//!
//! Two matching modes exist:
//!
//! - [`MatchMode::PerRun`] replaces a placeholder only inside runs that
//!   contain it whole. A placeholder split across runs stays as it is.
//! - [`MatchMode::AcrossRuns`] also replaces occurrences that straddle run
//!   boundaries, writing the replacement into the first touched run.
//!
//! # Example
//!
//! ```rust
//! use transferdoc::ooxml::docx::{MutableDocument, MutableRun, MutableParagraph};
//! use transferdoc::substitute::{ReplacementMap, SubstitutionEngine};
//!
//! let mut map = ReplacementMap::new();
//! map.insert("[IP-servidor]", "192.168.1.100")?;
//!
//! let mut doc = MutableDocument::new();
//! doc.add_paragraph_with_text("Servidor: [IP-servidor]");
//!
//! let report = SubstitutionEngine::new(&map).apply_to_document(&mut doc);
//! assert_eq!(report.total(), 1);
//! assert_eq!(doc.text(), "Servidor: 192.168.1.100");
//! # Ok::<(), transferdoc::Error>(())
//! ```

mod engine;
mod map;

pub use engine::{MatchMode, SubstitutionEngine, SubstitutionReport};
pub use map::ReplacementMap;
