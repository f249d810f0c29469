//! Core properties (`docProps/core.xml`) for documents built in memory.

use crate::common::xml::escape_text;
use crate::ooxml::opc::constants::namespace;
use chrono::{DateTime, SecondsFormat, Utc};

/// Document core properties (metadata).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CoreProperties {
    pub title: Option<String>,
    pub subject: Option<String>,
    /// Document creator/author
    pub creator: Option<String>,
    pub last_modified_by: Option<String>,
    pub revision: Option<u32>,
    pub created: Option<DateTime<Utc>>,
    pub modified: Option<DateTime<Utc>>,
}

impl CoreProperties {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: &str) -> Self {
        self.title = Some(title.to_string());
        self
    }

    pub fn subject(mut self, subject: &str) -> Self {
        self.subject = Some(subject.to_string());
        self
    }

    /// Set the document creator/author.
    pub fn creator(mut self, creator: &str) -> Self {
        self.creator = Some(creator.to_string());
        self
    }

    /// Stamp creation and modification time.
    pub fn timestamps(mut self, at: DateTime<Utc>) -> Self {
        self.created = Some(at);
        self.modified = Some(at);
        self
    }

    /// Generate core.xml content.
    pub fn to_xml(&self) -> String {
        let mut xml = String::with_capacity(768);
        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
        xml.push_str(r#"<cp:coreProperties xmlns:cp=""#);
        xml.push_str(namespace::OPC_CORE_PROPERTIES);
        xml.push_str(r#"" xmlns:dc=""#);
        xml.push_str(namespace::DC);
        xml.push_str(r#"" xmlns:dcterms=""#);
        xml.push_str(namespace::DCTERMS);
        xml.push_str(r#"" xmlns:xsi=""#);
        xml.push_str(namespace::XSI);
        xml.push_str(r#"">"#);

        let text_elements = [
            ("dc:title", &self.title),
            ("dc:subject", &self.subject),
            ("dc:creator", &self.creator),
            ("cp:lastModifiedBy", &self.last_modified_by),
        ];
        for (tag, value) in text_elements {
            if let Some(value) = value {
                xml.push('<');
                xml.push_str(tag);
                xml.push('>');
                xml.push_str(&escape_text(value));
                xml.push_str("</");
                xml.push_str(tag);
                xml.push('>');
            }
        }

        if let Some(revision) = self.revision {
            xml.push_str("<cp:revision>");
            xml.push_str(&revision.to_string());
            xml.push_str("</cp:revision>");
        }

        for (tag, value) in [
            ("dcterms:created", &self.created),
            ("dcterms:modified", &self.modified),
        ] {
            if let Some(at) = value {
                xml.push('<');
                xml.push_str(tag);
                xml.push_str(r#" xsi:type="dcterms:W3CDTF">"#);
                xml.push_str(&at.to_rfc3339_opts(SecondsFormat::Secs, true));
                xml.push_str("</");
                xml.push_str(tag);
                xml.push('>');
            }
        }

        xml.push_str("</cp:coreProperties>");
        xml
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_core_properties_xml() {
        let at = Utc.with_ymd_and_hms(2024, 3, 5, 10, 30, 0).unwrap();
        let props = CoreProperties::new()
            .title("Documento de Transferencia Tecnológica")
            .creator("Departamento de Desarrollo")
            .subject("R&D")
            .timestamps(at);

        let xml = props.to_xml();
        assert!(xml.contains("<dc:title>Documento de Transferencia Tecnológica</dc:title>"));
        assert!(xml.contains("<dc:creator>Departamento de Desarrollo</dc:creator>"));
        assert!(xml.contains("<dc:subject>R&amp;D</dc:subject>"));
        assert!(xml.contains(
            r#"<dcterms:created xsi:type="dcterms:W3CDTF">2024-03-05T10:30:00Z</dcterms:created>"#
        ));
        assert!(!xml.contains("cp:revision"));
        assert!(xml.ends_with("</cp:coreProperties>"));
    }
}
