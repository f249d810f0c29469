/// Document writer implementation for DOCX.
use crate::ooxml::error::{OoxmlError, Result};

use super::paragraph::MutableParagraph;
use super::section::SectionProperties;
use super::table::MutableTable;

const DOCUMENT_START: &str = concat!(
    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
    r#"<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main" "#,
    r#"xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">"#,
    "<w:body>"
);

const DOCUMENT_END: &str = "</w:body></w:document>";

/// Block-level content of the document body.
#[derive(Debug, Clone, PartialEq)]
pub enum BodyElement {
    Paragraph(MutableParagraph),
    Table(MutableTable),
    /// Section properties, content controls and other markup kept verbatim
    Raw(String),
}

/// A mutable Word document for writing and modification.
///
/// A document built in memory writes its own namespace declarations and
/// section properties. A document loaded from a package keeps the original
/// `<w:document>`/`<w:body>` start tags and every body child it does not
/// interpret, so saving it changes only what was edited.
#[derive(Debug, Clone, PartialEq)]
pub struct MutableDocument {
    /// Source up to and including `<w:body>`
    pub(crate) preamble: Option<String>,
    /// Body content in document order
    pub(crate) elements: Vec<BodyElement>,
    /// Source from `</w:body>` to the end
    pub(crate) postamble: Option<String>,
    /// Page setup written at the end of a built document's body; loaded
    /// documents carry their `w:sectPr` verbatim and leave this `None`
    section: Option<SectionProperties>,
}

impl MutableDocument {
    /// Create a new empty mutable document with US Letter page setup.
    pub fn new() -> Self {
        Self {
            preamble: None,
            elements: Vec::new(),
            postamble: None,
            section: Some(SectionProperties::default()),
        }
    }

    /// Parse the content of a `word/document.xml` part.
    pub fn from_xml(xml: &str) -> Result<Self> {
        crate::ooxml::docx::parts::document_part::parse_document(xml)
    }

    pub(crate) fn from_parts(
        preamble: String,
        elements: Vec<BodyElement>,
        postamble: String,
    ) -> Self {
        Self {
            preamble: Some(preamble),
            elements,
            postamble: Some(postamble),
            section: None,
        }
    }

    /// Add a new paragraph to the end of the document.
    pub fn add_paragraph(&mut self) -> &mut MutableParagraph {
        self.elements
            .push(BodyElement::Paragraph(MutableParagraph::new()));
        match self.elements.last_mut() {
            Some(BodyElement::Paragraph(p)) => p,
            _ => unreachable!(),
        }
    }

    /// Add a paragraph with text.
    pub fn add_paragraph_with_text(&mut self, text: &str) -> &mut MutableParagraph {
        let para = self.add_paragraph();
        if !text.is_empty() {
            para.add_run_with_text(text);
        }
        para
    }

    /// Add a paragraph with text and a paragraph style.
    pub fn add_styled_paragraph(&mut self, text: &str, style_id: &str) -> &mut MutableParagraph {
        let para = self.add_paragraph_with_text(text);
        para.set_style(style_id);
        para
    }

    /// Add a heading paragraph: level 0 uses "Title", levels 1-9 "HeadingN".
    pub fn add_heading(&mut self, text: &str, level: u8) -> Result<&mut MutableParagraph> {
        if level > 9 {
            return Err(OoxmlError::InvalidFormat(format!(
                "heading level must be 0-9, got {level}"
            )));
        }
        let style = if level == 0 {
            "Title".to_string()
        } else {
            format!("Heading{level}")
        };
        Ok(self.add_styled_paragraph(text, &style))
    }

    /// Add a table with specified rows and columns.
    pub fn add_table(&mut self, rows: usize, cols: usize) -> &mut MutableTable {
        self.elements
            .push(BodyElement::Table(MutableTable::new(rows, cols)));
        match self.elements.last_mut() {
            Some(BodyElement::Table(t)) => t,
            _ => unreachable!(),
        }
    }

    /// Add a paragraph holding a single page break.
    pub fn add_page_break(&mut self) -> &mut MutableParagraph {
        let para = self.add_paragraph();
        para.add_run().add_page_break();
        para
    }

    /// Body elements in document order.
    pub fn elements(&self) -> &[BodyElement] {
        &self.elements
    }

    /// Paragraphs directly in the body (not inside tables).
    pub fn paragraphs(&self) -> impl Iterator<Item = &MutableParagraph> {
        self.elements.iter().filter_map(|e| match e {
            BodyElement::Paragraph(p) => Some(p),
            _ => None,
        })
    }

    pub fn paragraphs_mut(&mut self) -> impl Iterator<Item = &mut MutableParagraph> {
        self.elements.iter_mut().filter_map(|e| match e {
            BodyElement::Paragraph(p) => Some(p),
            _ => None,
        })
    }

    /// Tables directly in the body.
    pub fn tables(&self) -> impl Iterator<Item = &MutableTable> {
        self.elements.iter().filter_map(|e| match e {
            BodyElement::Table(t) => Some(t),
            _ => None,
        })
    }

    pub fn tables_mut(&mut self) -> impl Iterator<Item = &mut MutableTable> {
        self.elements.iter_mut().filter_map(|e| match e {
            BodyElement::Table(t) => Some(t),
            _ => None,
        })
    }

    pub fn paragraph_count(&self) -> usize {
        self.paragraphs().count()
    }

    pub fn table_count(&self) -> usize {
        self.tables().count()
    }

    /// Get a body paragraph by index.
    pub fn paragraph(&mut self, index: usize) -> Option<&mut MutableParagraph> {
        self.paragraphs_mut().nth(index)
    }

    /// Get a body table by index.
    pub fn table(&mut self, index: usize) -> Option<&mut MutableTable> {
        self.tables_mut().nth(index)
    }

    /// Text of the body paragraphs, one per line.
    pub fn text(&self) -> String {
        self.paragraphs()
            .map(MutableParagraph::text)
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Serialize the document to XML.
    pub fn to_xml(&self) -> Result<String> {
        let mut xml = String::with_capacity(4096 + self.elements.len() * 128);
        xml.push_str(self.preamble.as_deref().unwrap_or(DOCUMENT_START));

        for element in &self.elements {
            match element {
                BodyElement::Paragraph(p) => p.to_xml(&mut xml)?,
                BodyElement::Table(t) => t.to_xml(&mut xml)?,
                BodyElement::Raw(source) => xml.push_str(source),
            }
        }

        // sectPr must be the last child of the body
        if let Some(ref section) = self.section {
            section.to_xml(&mut xml)?;
        }

        xml.push_str(self.postamble.as_deref().unwrap_or(DOCUMENT_END));
        Ok(xml)
    }
}

impl Default for MutableDocument {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_heading_styles() {
        let mut doc = MutableDocument::new();
        doc.add_heading("DOCUMENTO", 0).unwrap();
        doc.add_heading("1. RESUMEN", 1).unwrap();
        assert!(doc.add_heading("x", 10).is_err());

        let styles: Vec<_> = doc.paragraphs().map(|p| p.style()).collect();
        assert_eq!(styles, vec![Some("Title"), Some("Heading1")]);
    }

    #[test]
    fn test_counts_and_text() {
        let mut doc = MutableDocument::new();
        doc.add_paragraph_with_text("uno");
        doc.add_table(2, 2);
        doc.add_page_break();
        doc.add_paragraph_with_text("dos");
        assert_eq!(doc.paragraph_count(), 3);
        assert_eq!(doc.table_count(), 1);
        assert_eq!(doc.text(), "uno\n\ndos");
        assert_eq!(doc.paragraph(2).unwrap().text(), "dos");
    }

    #[test]
    fn test_built_document_xml() {
        let mut doc = MutableDocument::new();
        doc.add_paragraph_with_text("Hola");
        let xml = doc.to_xml().unwrap();
        assert!(xml.starts_with(DOCUMENT_START));
        assert!(xml.contains("<w:p><w:r><w:t xml:space=\"preserve\">Hola</w:t></w:r></w:p><w:sectPr>"));
        assert!(xml.ends_with("</w:sectPr></w:body></w:document>"));
    }

    #[test]
    fn test_loaded_document_keeps_envelope() {
        let doc = MutableDocument::from_parts(
            "<w:document xmlns:w=\"x\" mc:Ignorable=\"w14\"><w:body>".to_string(),
            vec![BodyElement::Raw("<w:sectPr/>".to_string())],
            "</w:body></w:document>".to_string(),
        );
        assert!(doc.section.is_none());
        assert_eq!(
            doc.to_xml().unwrap(),
            "<w:document xmlns:w=\"x\" mc:Ignorable=\"w14\"><w:body><w:sectPr/></w:body></w:document>"
        );
    }
}
