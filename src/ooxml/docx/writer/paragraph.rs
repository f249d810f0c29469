/// Paragraph types and implementation for DOCX documents.
use crate::common::xml::escape_xml;
use crate::ooxml::docx::format::{ParagraphAlignment, inches_to_twips, points_to_twips};
use crate::ooxml::error::Result;
use std::fmt::Write as FmtWrite;

use super::run::MutableRun;

/// Elements that can appear in a paragraph.
#[derive(Debug, Clone, PartialEq)]
pub enum ParagraphElement {
    Run(MutableRun),
    /// Hyperlinks, bookmarks, field and content-control markup kept verbatim
    Raw(String),
}

/// A mutable paragraph in a document.
#[derive(Debug, Clone, PartialEq)]
pub struct MutableParagraph {
    /// Original `<w:p ...>` start tag
    pub(crate) open_tag: Option<String>,
    /// Elements (runs and uninterpreted markup) in this paragraph
    pub(crate) elements: Vec<ParagraphElement>,
    /// Paragraph properties
    pub(crate) properties: ParagraphProperties,
}

impl MutableParagraph {
    pub(crate) fn new() -> Self {
        Self {
            open_tag: None,
            elements: Vec::new(),
            properties: ParagraphProperties::default(),
        }
    }

    /// Build a paragraph from runs.
    pub fn from_runs(runs: impl IntoIterator<Item = MutableRun>) -> Self {
        let mut paragraph = Self::new();
        paragraph
            .elements
            .extend(runs.into_iter().map(ParagraphElement::Run));
        paragraph
    }

    /// Add a new run to the paragraph.
    pub fn add_run(&mut self) -> &mut MutableRun {
        self.elements.push(ParagraphElement::Run(MutableRun::new()));
        match self.elements.last_mut() {
            Some(ParagraphElement::Run(run)) => run,
            _ => unreachable!("a run was just pushed"),
        }
    }

    /// Add a run with text.
    pub fn add_run_with_text(&mut self, text: &str) -> &mut MutableRun {
        let run = self.add_run();
        run.set_text(text);
        run
    }

    /// The paragraph's visible text: the text of its runs, concatenated in order.
    pub fn text(&self) -> String {
        self.runs().map(MutableRun::text).collect()
    }

    /// Runs in document order.
    pub fn runs(&self) -> impl Iterator<Item = &MutableRun> {
        self.elements.iter().filter_map(|element| match element {
            ParagraphElement::Run(run) => Some(run),
            ParagraphElement::Raw(_) => None,
        })
    }

    /// Mutable access to the runs in document order.
    pub fn runs_mut(&mut self) -> impl Iterator<Item = &mut MutableRun> {
        self.elements.iter_mut().filter_map(|element| match element {
            ParagraphElement::Run(run) => Some(run),
            ParagraphElement::Raw(_) => None,
        })
    }

    pub fn run_count(&self) -> usize {
        self.runs().count()
    }

    /// Style ID applied to the paragraph, if any.
    pub fn style(&self) -> Option<&str> {
        self.properties.style.as_deref()
    }

    /// Set the paragraph style.
    pub fn set_style(&mut self, style_id: &str) {
        self.properties.verbatim = None;
        self.properties.style = Some(style_id.to_string());
    }

    /// Set paragraph alignment.
    pub fn set_alignment(&mut self, alignment: ParagraphAlignment) {
        self.properties.verbatim = None;
        self.properties.alignment = Some(alignment);
    }

    /// Set spacing before the paragraph in points.
    pub fn set_space_before(&mut self, points: f64) {
        self.properties.verbatim = None;
        self.properties.space_before = Some(points_to_twips(points));
    }

    /// Set spacing after the paragraph in points.
    pub fn set_space_after(&mut self, points: f64) {
        self.properties.verbatim = None;
        self.properties.space_after = Some(points_to_twips(points));
    }

    /// Set left indentation in inches.
    pub fn set_indent_left(&mut self, inches: f64) {
        self.properties.verbatim = None;
        self.properties.indent_left = Some(inches_to_twips(inches));
    }

    /// Attach the paragraph to a numbering definition.
    pub fn set_numbering(&mut self, num_id: u32, level: u32) {
        self.properties.verbatim = None;
        self.properties.numbering = Some(NumberingProperties {
            num_id,
            ilvl: level,
        });
    }

    pub fn element_count(&self) -> usize {
        self.elements.len()
    }

    pub(crate) fn to_xml(&self, xml: &mut String) -> Result<()> {
        match self.open_tag {
            Some(ref tag) => xml.push_str(tag),
            None => xml.push_str("<w:p>"),
        }

        self.properties.to_xml(xml)?;

        for element in &self.elements {
            match element {
                ParagraphElement::Run(run) => run.to_xml(xml)?,
                ParagraphElement::Raw(source) => xml.push_str(source),
            }
        }

        xml.push_str("</w:p>");
        Ok(())
    }
}

/// Paragraph properties.
///
/// For loaded paragraphs `verbatim` carries the original `w:pPr` element and
/// `style` mirrors its `w:pStyle` value.
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct ParagraphProperties {
    pub(crate) style: Option<String>,
    pub(crate) alignment: Option<ParagraphAlignment>,
    pub(crate) numbering: Option<NumberingProperties>,
    pub(crate) space_before: Option<u32>,
    pub(crate) space_after: Option<u32>,
    pub(crate) indent_left: Option<u32>,
    pub(crate) verbatim: Option<String>,
}

impl ParagraphProperties {
    pub(crate) fn has_properties(&self) -> bool {
        self.style.is_some()
            || self.alignment.is_some()
            || self.numbering.is_some()
            || self.space_before.is_some()
            || self.space_after.is_some()
            || self.indent_left.is_some()
    }

    fn to_xml(&self, xml: &mut String) -> Result<()> {
        if let Some(ref source) = self.verbatim {
            xml.push_str(source);
            return Ok(());
        }
        if !self.has_properties() {
            return Ok(());
        }

        xml.push_str("<w:pPr>");
        if let Some(ref style) = self.style {
            write!(xml, "<w:pStyle w:val=\"{}\"/>", escape_xml(style))?;
        }
        if let Some(ref numbering) = self.numbering {
            write!(
                xml,
                "<w:numPr><w:ilvl w:val=\"{}\"/><w:numId w:val=\"{}\"/></w:numPr>",
                numbering.ilvl, numbering.num_id
            )?;
        }
        if self.space_before.is_some() || self.space_after.is_some() {
            xml.push_str("<w:spacing");
            if let Some(before) = self.space_before {
                write!(xml, " w:before=\"{before}\"")?;
            }
            if let Some(after) = self.space_after {
                write!(xml, " w:after=\"{after}\"")?;
            }
            xml.push_str("/>");
        }
        if let Some(left) = self.indent_left {
            write!(xml, "<w:ind w:left=\"{left}\"/>")?;
        }
        if let Some(alignment) = self.alignment {
            write!(xml, "<w:jc w:val=\"{}\"/>", alignment.as_str())?;
        }
        xml.push_str("</w:pPr>");
        Ok(())
    }
}

/// Numbering properties for list paragraphs.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct NumberingProperties {
    pub(crate) num_id: u32,
    pub(crate) ilvl: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(paragraph: &MutableParagraph) -> String {
        let mut xml = String::new();
        paragraph.to_xml(&mut xml).unwrap();
        xml
    }

    #[test]
    fn test_text_concatenates_runs() {
        let mut para = MutableParagraph::new();
        para.add_run_with_text("usuario@");
        para.elements
            .push(ParagraphElement::Raw("<w:bookmarkStart w:id=\"0\" w:name=\"ip\"/>".into()));
        para.add_run_with_text("[IP-servidor]");
        assert_eq!(para.text(), "usuario@[IP-servidor]");
        assert_eq!(para.run_count(), 2);
        assert_eq!(para.element_count(), 3);
    }

    #[test]
    fn test_empty_paragraph_xml() {
        assert_eq!(render(&MutableParagraph::new()), "<w:p></w:p>");
    }

    #[test]
    fn test_properties_in_schema_order() {
        let mut para = MutableParagraph::new();
        para.set_alignment(ParagraphAlignment::Center);
        para.set_indent_left(0.5);
        para.set_space_after(12.0);
        para.set_style("Title");
        para.set_numbering(1, 0);
        para.add_run_with_text("x");
        assert_eq!(
            render(&para),
            "<w:p><w:pPr><w:pStyle w:val=\"Title\"/>\
             <w:numPr><w:ilvl w:val=\"0\"/><w:numId w:val=\"1\"/></w:numPr>\
             <w:spacing w:after=\"240\"/><w:ind w:left=\"720\"/><w:jc w:val=\"center\"/></w:pPr>\
             <w:r><w:t xml:space=\"preserve\">x</w:t></w:r></w:p>"
        );
    }

    #[test]
    fn test_verbatim_properties_round_trip() {
        let mut para = MutableParagraph::new();
        para.open_tag = Some("<w:p w14:paraId=\"1A2B\">".into());
        para.properties.style = Some("Heading1".into());
        para.properties.verbatim =
            Some("<w:pPr><w:pStyle w:val=\"Heading1\"/><w:keepNext/></w:pPr>".into());
        assert_eq!(
            render(&para),
            "<w:p w14:paraId=\"1A2B\"><w:pPr><w:pStyle w:val=\"Heading1\"/><w:keepNext/></w:pPr></w:p>"
        );
        assert_eq!(para.style(), Some("Heading1"));
    }
}
