//! XML text helpers shared by the packaging and document layers.

pub mod escape;

pub use escape::{escape_text, escape_xml, resolve_entity, unescape_xml};
