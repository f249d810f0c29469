/// Table types and implementation for DOCX documents.
use crate::common::xml::escape_xml;
use crate::ooxml::docx::format::inches_to_twips;
use crate::ooxml::error::Result;
use std::fmt::Write as FmtWrite;

use super::paragraph::MutableParagraph;
use super::run::MutableRun;

/// Text block width of a Letter page with 1" margins, in twips.
const BLOCK_WIDTH_TWIPS: u32 = 9360;

/// Table properties.
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct TableProperties {
    /// Table style ID (e.g. `LightShading-Accent1`)
    pub(crate) style: Option<String>,
    /// Original `w:tblPr` element of a loaded table
    pub(crate) verbatim: Option<String>,
}

/// Cell properties.
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct CellProperties {
    /// Cell width in twips
    pub(crate) width: Option<u32>,
    /// Original `w:tcPr` element of a loaded cell
    pub(crate) verbatim: Option<String>,
}

/// Children of a table.
#[derive(Debug, Clone, PartialEq)]
pub enum TableElement {
    Row(MutableRow),
    /// `w:tblGrid`, bookmarks and anything else kept verbatim
    Raw(String),
}

/// Children of a table row.
#[derive(Debug, Clone, PartialEq)]
pub enum RowElement {
    Cell(MutableCell),
    /// `w:trPr`, `w:tblPrEx` and anything else kept verbatim
    Raw(String),
}

/// Children of a table cell.
#[derive(Debug, Clone, PartialEq)]
pub enum CellElement {
    Paragraph(MutableParagraph),
    /// Nested tables and other block content kept verbatim
    Raw(String),
}

/// A mutable table.
#[derive(Debug, Clone, PartialEq)]
pub struct MutableTable {
    pub(crate) open_tag: Option<String>,
    /// Table properties
    pub(crate) properties: TableProperties,
    /// Grid column widths in twips, written for tables built in memory
    pub(crate) grid: Vec<u32>,
    /// Rows and uninterpreted markup
    pub(crate) elements: Vec<TableElement>,
}

impl MutableTable {
    /// Create a table with `rows` x `cols` empty cells spread over the page width.
    pub fn new(rows: usize, cols: usize) -> Self {
        let col_width = BLOCK_WIDTH_TWIPS / cols.max(1) as u32;
        let mut table = Self {
            open_tag: None,
            properties: TableProperties::default(),
            grid: vec![col_width; cols],
            elements: Vec::with_capacity(rows),
        };
        for _ in 0..rows {
            table
                .elements
                .push(TableElement::Row(MutableRow::new(cols, Some(col_width))));
        }
        table
    }

    /// Set the table style.
    pub fn set_style(&mut self, style_id: &str) {
        self.properties.verbatim = None;
        self.properties.style = Some(style_id.to_string());
    }

    /// Table style ID, if any.
    pub fn style(&self) -> Option<&str> {
        self.properties.style.as_deref()
    }

    /// Rows in document order.
    pub fn rows(&self) -> impl Iterator<Item = &MutableRow> {
        self.elements.iter().filter_map(|element| match element {
            TableElement::Row(row) => Some(row),
            TableElement::Raw(_) => None,
        })
    }

    pub fn rows_mut(&mut self) -> impl Iterator<Item = &mut MutableRow> {
        self.elements.iter_mut().filter_map(|element| match element {
            TableElement::Row(row) => Some(row),
            TableElement::Raw(_) => None,
        })
    }

    /// Get the number of rows.
    pub fn row_count(&self) -> usize {
        self.rows().count()
    }

    /// Get a row by index.
    pub fn row(&mut self, index: usize) -> Option<&mut MutableRow> {
        self.rows_mut().nth(index)
    }

    /// Get a cell by row and column index.
    pub fn cell(&mut self, row: usize, col: usize) -> Option<&mut MutableCell> {
        self.row(row)?.cell(col)
    }

    pub(crate) fn to_xml(&self, xml: &mut String) -> Result<()> {
        match self.open_tag {
            Some(ref tag) => xml.push_str(tag),
            None => xml.push_str("<w:tbl>"),
        }

        if let Some(ref source) = self.properties.verbatim {
            xml.push_str(source);
        } else {
            xml.push_str("<w:tblPr>");
            if let Some(ref style) = self.properties.style {
                write!(xml, "<w:tblStyle w:val=\"{}\"/>", escape_xml(style))?;
            }
            xml.push_str("<w:tblW w:w=\"0\" w:type=\"auto\"/>");
            xml.push_str(
                "<w:tblLook w:val=\"04A0\" w:firstRow=\"1\" w:lastRow=\"0\" \
                 w:firstColumn=\"1\" w:lastColumn=\"0\" w:noHBand=\"0\" w:noVBand=\"1\"/>",
            );
            xml.push_str("</w:tblPr>");
        }

        if !self.grid.is_empty() {
            xml.push_str("<w:tblGrid>");
            for width in &self.grid {
                write!(xml, "<w:gridCol w:w=\"{width}\"/>")?;
            }
            xml.push_str("</w:tblGrid>");
        }

        for element in &self.elements {
            match element {
                TableElement::Row(row) => row.to_xml(xml)?,
                TableElement::Raw(source) => xml.push_str(source),
            }
        }

        xml.push_str("</w:tbl>");
        Ok(())
    }
}

/// A mutable table row.
#[derive(Debug, Clone, PartialEq)]
pub struct MutableRow {
    pub(crate) open_tag: Option<String>,
    pub(crate) elements: Vec<RowElement>,
}

impl MutableRow {
    pub(crate) fn new(cols: usize, width: Option<u32>) -> Self {
        Self {
            open_tag: None,
            elements: (0..cols)
                .map(|_| RowElement::Cell(MutableCell::new(width)))
                .collect(),
        }
    }

    /// Cells in document order.
    pub fn cells(&self) -> impl Iterator<Item = &MutableCell> {
        self.elements.iter().filter_map(|element| match element {
            RowElement::Cell(cell) => Some(cell),
            RowElement::Raw(_) => None,
        })
    }

    pub fn cells_mut(&mut self) -> impl Iterator<Item = &mut MutableCell> {
        self.elements.iter_mut().filter_map(|element| match element {
            RowElement::Cell(cell) => Some(cell),
            RowElement::Raw(_) => None,
        })
    }

    /// Get a cell by index.
    pub fn cell(&mut self, index: usize) -> Option<&mut MutableCell> {
        self.cells_mut().nth(index)
    }

    /// Get the number of cells.
    pub fn cell_count(&self) -> usize {
        self.cells().count()
    }

    pub(crate) fn to_xml(&self, xml: &mut String) -> Result<()> {
        match self.open_tag {
            Some(ref tag) => xml.push_str(tag),
            None => xml.push_str("<w:tr>"),
        }
        for element in &self.elements {
            match element {
                RowElement::Cell(cell) => cell.to_xml(xml)?,
                RowElement::Raw(source) => xml.push_str(source),
            }
        }
        xml.push_str("</w:tr>");
        Ok(())
    }
}

/// A mutable table cell.
#[derive(Debug, Clone, PartialEq)]
pub struct MutableCell {
    pub(crate) open_tag: Option<String>,
    /// Cell properties
    pub(crate) properties: CellProperties,
    /// Paragraphs and uninterpreted block content
    pub(crate) elements: Vec<CellElement>,
}

impl MutableCell {
    /// A cell must end with a paragraph, so a new cell holds one empty paragraph.
    pub(crate) fn new(width: Option<u32>) -> Self {
        Self {
            open_tag: None,
            properties: CellProperties {
                width,
                verbatim: None,
            },
            elements: vec![CellElement::Paragraph(MutableParagraph::new())],
        }
    }

    /// Paragraphs directly inside the cell.
    pub fn paragraphs(&self) -> impl Iterator<Item = &MutableParagraph> {
        self.elements.iter().filter_map(|element| match element {
            CellElement::Paragraph(paragraph) => Some(paragraph),
            CellElement::Raw(_) => None,
        })
    }

    pub fn paragraphs_mut(&mut self) -> impl Iterator<Item = &mut MutableParagraph> {
        self.elements.iter_mut().filter_map(|element| match element {
            CellElement::Paragraph(paragraph) => Some(paragraph),
            CellElement::Raw(_) => None,
        })
    }

    /// Get the number of paragraphs.
    pub fn paragraph_count(&self) -> usize {
        self.paragraphs().count()
    }

    /// Get a paragraph by index.
    pub fn paragraph(&mut self, index: usize) -> Option<&mut MutableParagraph> {
        self.paragraphs_mut().nth(index)
    }

    /// Add a new paragraph to the cell.
    pub fn add_paragraph(&mut self) -> &mut MutableParagraph {
        self.elements
            .push(CellElement::Paragraph(MutableParagraph::new()));
        match self.elements.last_mut() {
            Some(CellElement::Paragraph(paragraph)) => paragraph,
            _ => unreachable!("a paragraph was just pushed"),
        }
    }

    /// Cell text: the text of its paragraphs joined by newlines.
    pub fn text(&self) -> String {
        self.paragraphs()
            .map(MutableParagraph::text)
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Set the preferred cell width in inches.
    pub fn set_width(&mut self, inches: f64) {
        self.properties.verbatim = None;
        self.properties.width = Some(inches_to_twips(inches));
    }

    /// Replace the cell content with a single paragraph holding one run of `text`.
    ///
    /// Newlines in `text` become line breaks inside the run. The cell
    /// properties are kept.
    pub fn set_text(&mut self, text: &str) -> &mut MutableRun {
        self.elements.clear();
        self.add_paragraph().add_run_with_text(text)
    }

    pub(crate) fn to_xml(&self, xml: &mut String) -> Result<()> {
        match self.open_tag {
            Some(ref tag) => xml.push_str(tag),
            None => xml.push_str("<w:tc>"),
        }

        if let Some(ref source) = self.properties.verbatim {
            xml.push_str(source);
        } else if let Some(width) = self.properties.width {
            write!(xml, "<w:tcPr><w:tcW w:w=\"{width}\" w:type=\"dxa\"/></w:tcPr>")?;
        }

        for element in &self.elements {
            match element {
                CellElement::Paragraph(paragraph) => paragraph.to_xml(xml)?,
                CellElement::Raw(source) => xml.push_str(source),
            }
        }

        xml.push_str("</w:tc>");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_table_shape() {
        let mut table = MutableTable::new(5, 2);
        assert_eq!(table.row_count(), 5);
        assert_eq!(table.grid, vec![4680, 4680]);
        let row = table.row(0).unwrap();
        assert_eq!(row.cell_count(), 2);
        assert_eq!(row.cell(1).unwrap().paragraph_count(), 1);
        assert!(table.cell(5, 0).is_none());
    }

    #[test]
    fn test_cell_set_text() {
        let mut cell = MutableCell::new(Some(1000));
        cell.add_paragraph().add_run_with_text("old");
        cell.set_text("1. Verificar logs\n2. Reiniciar").bold(true);
        assert_eq!(cell.paragraph_count(), 1);
        assert_eq!(cell.text(), "1. Verificar logs\n2. Reiniciar");
        let run = cell.paragraphs().next().unwrap().runs().next().unwrap();
        assert_eq!(run.properties.bold, Some(true));
        assert_eq!(cell.properties.width, Some(1000));
    }

    #[test]
    fn test_cell_width_in_inches() {
        let mut table = MutableTable::new(1, 2);
        table.cell(0, 0).unwrap().set_width(2.0);
        assert_eq!(table.cell(0, 0).unwrap().properties.width, Some(2880));
        assert_eq!(table.cell(0, 1).unwrap().properties.width, Some(4680));
    }

    #[test]
    fn test_cell_text_joins_paragraphs() {
        let mut cell = MutableCell::new(None);
        cell.paragraph(0).unwrap().add_run_with_text("a");
        cell.elements.push(CellElement::Raw("<w:tbl></w:tbl>".into()));
        cell.add_paragraph().add_run_with_text("b");
        assert_eq!(cell.text(), "a\nb");
    }

    #[test]
    fn test_table_xml() {
        let mut table = MutableTable::new(1, 1);
        table.set_style("LightGrid-Accent1");
        table.cell(0, 0).unwrap().set_text("Sistema:");
        let mut xml = String::new();
        table.to_xml(&mut xml).unwrap();
        assert!(xml.starts_with("<w:tbl><w:tblPr><w:tblStyle w:val=\"LightGrid-Accent1\"/>"));
        assert!(xml.contains("<w:tblGrid><w:gridCol w:w=\"9360\"/></w:tblGrid>"));
        assert!(xml.contains(
            "<w:tc><w:tcPr><w:tcW w:w=\"9360\" w:type=\"dxa\"/></w:tcPr><w:p><w:r>\
             <w:t xml:space=\"preserve\">Sistema:</w:t></w:r></w:p></w:tc>"
        ));
        assert!(xml.ends_with("</w:tr></w:tbl>"));
    }

    #[test]
    fn test_loaded_table_keeps_verbatim_parts() {
        let mut cell = MutableCell::new(None);
        cell.open_tag = Some("<w:tc>".into());
        cell.properties.verbatim = Some("<w:tcPr><w:shd w:fill=\"FF0000\"/></w:tcPr>".into());
        let table = MutableTable {
            open_tag: Some("<w:tbl>".into()),
            properties: TableProperties {
                style: None,
                verbatim: Some("<w:tblPr/>".into()),
            },
            grid: Vec::new(),
            elements: vec![
                TableElement::Raw("<w:tblGrid/>".into()),
                TableElement::Row(MutableRow {
                    open_tag: Some("<w:tr w:rsidR=\"1\">".into()),
                    elements: vec![
                        RowElement::Raw("<w:trPr/>".into()),
                        RowElement::Cell(cell),
                    ],
                }),
            ],
        };
        let mut xml = String::new();
        table.to_xml(&mut xml).unwrap();
        assert_eq!(
            xml,
            "<w:tbl><w:tblPr/><w:tblGrid/><w:tr w:rsidR=\"1\"><w:trPr/><w:tc>\
             <w:tcPr><w:shd w:fill=\"FF0000\"/></w:tcPr><w:p></w:p></w:tc></w:tr></w:tbl>"
        );
    }
}
