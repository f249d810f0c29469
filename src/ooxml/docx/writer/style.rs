/// Style writer support for DOCX documents.
///
/// This module provides the style definitions written to `word/styles.xml`:
/// the built-in styles a new document starts with and user-defined styles.
use crate::common::xml::escape_xml;
use crate::ooxml::error::Result;
use std::fmt::Write as FmtWrite;

/// Kind of a style definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StyleType {
    Paragraph,
    Character,
    Table,
}

impl StyleType {
    /// The `w:type` attribute value.
    #[inline]
    pub const fn to_xml(self) -> &'static str {
        match self {
            Self::Paragraph => "paragraph",
            Self::Character => "character",
            Self::Table => "table",
        }
    }
}

/// Borders and conditional formatting of a table style.
#[derive(Debug, Clone, PartialEq)]
pub struct TableLook {
    /// Border width in eighths of a point
    pub border_size: u32,
    /// Border color (hex RGB)
    pub border_color: String,
    /// Draw inside horizontal and vertical borders too
    pub inside_borders: bool,
    /// Header row shading (hex RGB)
    pub header_fill: Option<String>,
    /// Header row font color (hex RGB)
    pub header_color: Option<String>,
    /// Shading of odd banded rows (hex RGB)
    pub band_fill: Option<String>,
}

/// A mutable style definition for writing.
///
/// # Examples
///
/// ```
/// use transferdoc::ooxml::docx::writer::{MutableStyle, StyleType};
///
/// let mut style = MutableStyle::new("Codigo", "Codigo", StyleType::Paragraph);
/// style.set_based_on(Some("Normal".to_string()));
/// style.set_font_name(Some("Consolas".to_string()));
/// style.set_font_size(Some(20)); // 10pt (half-points)
/// assert_eq!(style.style_id(), "Codigo");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct MutableStyle {
    /// Style identifier (e.g., "Heading1")
    style_id: String,
    /// UI-visible name (e.g., "Heading 1")
    name: String,
    style_type: StyleType,
    /// Whether this is the default style for its type
    is_default: bool,
    /// Whether this is a custom (user-defined) style
    is_custom: bool,
    based_on: Option<String>,
    next: Option<String>,
    priority: Option<i32>,
    is_quick_style: bool,
    is_hidden: bool,
    /// Keep with the next paragraph (headings)
    keep_next: bool,
    font_name: Option<String>,
    /// Font size in half-points
    font_size: Option<u32>,
    bold: bool,
    italic: bool,
    color: Option<String>,
    alignment: Option<String>,
    /// Space before paragraph in twips
    space_before: Option<u32>,
    /// Space after paragraph in twips
    space_after: Option<u32>,
    indent_left: Option<u32>,
    indent_right: Option<u32>,
    /// Bottom paragraph border color
    border_bottom: Option<String>,
    /// Numbering instance the style attaches paragraphs to
    num_id: Option<u32>,
    table_look: Option<TableLook>,
}

impl MutableStyle {
    /// Create a new custom style with the given ID, name, and type.
    pub fn new(
        style_id: impl Into<String>,
        name: impl Into<String>,
        style_type: StyleType,
    ) -> Self {
        Self {
            style_id: style_id.into(),
            name: name.into(),
            style_type,
            is_default: false,
            is_custom: true,
            based_on: None,
            next: None,
            priority: None,
            is_quick_style: false,
            is_hidden: false,
            keep_next: false,
            font_name: None,
            font_size: None,
            bold: false,
            italic: false,
            color: None,
            alignment: None,
            space_before: None,
            space_after: None,
            indent_left: None,
            indent_right: None,
            border_bottom: None,
            num_id: None,
            table_look: None,
        }
    }

    #[inline]
    pub fn style_id(&self) -> &str {
        &self.style_id
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn style_type(&self) -> StyleType {
        self.style_type
    }

    #[inline]
    pub fn is_default(&self) -> bool {
        self.is_default
    }

    #[inline]
    pub fn is_custom(&self) -> bool {
        self.is_custom
    }

    pub fn based_on(&self) -> Option<&str> {
        self.based_on.as_deref()
    }

    pub fn font_name(&self) -> Option<&str> {
        self.font_name.as_deref()
    }

    pub fn font_size(&self) -> Option<u32> {
        self.font_size
    }

    pub fn set_default(&mut self, is_default: bool) {
        self.is_default = is_default;
    }

    pub fn set_custom(&mut self, is_custom: bool) {
        self.is_custom = is_custom;
    }

    pub fn set_based_on(&mut self, based_on: Option<String>) {
        self.based_on = based_on;
    }

    pub fn set_next(&mut self, next: Option<String>) {
        self.next = next;
    }

    pub fn set_priority(&mut self, priority: Option<i32>) {
        self.priority = priority;
    }

    pub fn set_quick_style(&mut self, is_quick_style: bool) {
        self.is_quick_style = is_quick_style;
    }

    pub fn set_hidden(&mut self, is_hidden: bool) {
        self.is_hidden = is_hidden;
    }

    pub fn set_keep_next(&mut self, keep_next: bool) {
        self.keep_next = keep_next;
    }

    pub fn set_font_name(&mut self, font_name: Option<String>) {
        self.font_name = font_name;
    }

    /// Set the font size in half-points.
    pub fn set_font_size(&mut self, font_size: Option<u32>) {
        self.font_size = font_size;
    }

    pub fn set_bold(&mut self, bold: bool) {
        self.bold = bold;
    }

    pub fn set_italic(&mut self, italic: bool) {
        self.italic = italic;
    }

    pub fn set_color(&mut self, color: Option<String>) {
        self.color = color;
    }

    pub fn set_alignment(&mut self, alignment: Option<String>) {
        self.alignment = alignment;
    }

    /// Space before in twips.
    pub fn set_space_before(&mut self, space_before: Option<u32>) {
        self.space_before = space_before;
    }

    /// Space after in twips.
    pub fn set_space_after(&mut self, space_after: Option<u32>) {
        self.space_after = space_after;
    }

    /// Left indent in twips.
    pub fn set_indent_left(&mut self, indent_left: Option<u32>) {
        self.indent_left = indent_left;
    }

    pub fn set_indent_right(&mut self, indent_right: Option<u32>) {
        self.indent_right = indent_right;
    }

    pub fn set_border_bottom(&mut self, color: Option<String>) {
        self.border_bottom = color;
    }

    pub fn set_num_id(&mut self, num_id: Option<u32>) {
        self.num_id = num_id;
    }

    pub fn set_table_look(&mut self, look: Option<TableLook>) {
        self.table_look = look;
    }

    fn has_paragraph_properties(&self) -> bool {
        self.keep_next
            || self.num_id.is_some()
            || self.border_bottom.is_some()
            || self.space_before.is_some()
            || self.space_after.is_some()
            || self.indent_left.is_some()
            || self.indent_right.is_some()
            || self.alignment.is_some()
    }

    fn has_run_properties(&self) -> bool {
        self.font_name.is_some()
            || self.bold
            || self.italic
            || self.color.is_some()
            || self.font_size.is_some()
    }

    pub(crate) fn to_xml(&self, xml: &mut String) -> Result<()> {
        write!(
            xml,
            r#"<w:style w:type="{}""#,
            self.style_type.to_xml()
        )?;
        if self.is_default {
            xml.push_str(r#" w:default="1""#);
        }
        if self.is_custom {
            xml.push_str(r#" w:customStyle="1""#);
        }
        write!(xml, r#" w:styleId="{}">"#, escape_xml(&self.style_id))?;

        write!(xml, r#"<w:name w:val="{}"/>"#, escape_xml(&self.name))?;
        if let Some(ref based_on) = self.based_on {
            write!(xml, r#"<w:basedOn w:val="{}"/>"#, escape_xml(based_on))?;
        }
        if let Some(ref next) = self.next {
            write!(xml, r#"<w:next w:val="{}"/>"#, escape_xml(next))?;
        }
        if let Some(priority) = self.priority {
            write!(xml, r#"<w:uiPriority w:val="{priority}"/>"#)?;
        }
        if self.is_hidden {
            xml.push_str("<w:semiHidden/><w:unhideWhenUsed/>");
        }
        if self.is_quick_style {
            xml.push_str("<w:qFormat/>");
        }

        if self.has_paragraph_properties() {
            xml.push_str("<w:pPr>");
            if self.keep_next {
                xml.push_str("<w:keepNext/><w:keepLines/>");
            }
            if let Some(num_id) = self.num_id {
                write!(xml, r#"<w:numPr><w:numId w:val="{num_id}"/></w:numPr>"#)?;
            }
            if let Some(ref color) = self.border_bottom {
                write!(
                    xml,
                    r#"<w:pBdr><w:bottom w:val="single" w:sz="8" w:space="4" w:color="{}"/></w:pBdr>"#,
                    escape_xml(color)
                )?;
            }
            if self.space_before.is_some() || self.space_after.is_some() {
                xml.push_str("<w:spacing");
                if let Some(before) = self.space_before {
                    write!(xml, r#" w:before="{before}""#)?;
                }
                if let Some(after) = self.space_after {
                    write!(xml, r#" w:after="{after}""#)?;
                }
                xml.push_str("/>");
            }
            if self.indent_left.is_some() || self.indent_right.is_some() {
                xml.push_str("<w:ind");
                if let Some(left) = self.indent_left {
                    write!(xml, r#" w:left="{left}""#)?;
                }
                if let Some(right) = self.indent_right {
                    write!(xml, r#" w:right="{right}""#)?;
                }
                xml.push_str("/>");
            }
            if let Some(ref alignment) = self.alignment {
                write!(xml, r#"<w:jc w:val="{}"/>"#, escape_xml(alignment))?;
            }
            xml.push_str("</w:pPr>");
        }

        if self.has_run_properties() {
            xml.push_str("<w:rPr>");
            if let Some(ref font_name) = self.font_name {
                let font_name = escape_xml(font_name);
                write!(
                    xml,
                    r#"<w:rFonts w:ascii="{font_name}" w:hAnsi="{font_name}" w:cs="{font_name}"/>"#
                )?;
            }
            if self.bold {
                xml.push_str("<w:b/><w:bCs/>");
            }
            if self.italic {
                xml.push_str("<w:i/><w:iCs/>");
            }
            if let Some(ref color) = self.color {
                write!(xml, r#"<w:color w:val="{}"/>"#, escape_xml(color))?;
            }
            if let Some(size) = self.font_size {
                write!(xml, r#"<w:sz w:val="{size}"/><w:szCs w:val="{size}"/>"#)?;
            }
            xml.push_str("</w:rPr>");
        }

        if self.style_type == StyleType::Table {
            self.write_table_properties(xml)?;
        }

        xml.push_str("</w:style>");
        Ok(())
    }

    fn write_table_properties(&self, xml: &mut String) -> Result<()> {
        let Some(ref look) = self.table_look else {
            xml.push_str(
                r#"<w:tblPr><w:tblInd w:w="0" w:type="dxa"/><w:tblCellMar><w:top w:w="0" w:type="dxa"/><w:left w:w="108" w:type="dxa"/><w:bottom w:w="0" w:type="dxa"/><w:right w:w="108" w:type="dxa"/></w:tblCellMar></w:tblPr>"#,
            );
            return Ok(());
        };

        xml.push_str(
            r#"<w:tblPr><w:tblStyleRowBandSize w:val="1"/><w:tblStyleColBandSize w:val="1"/><w:tblBorders>"#,
        );
        let color = escape_xml(&look.border_color);
        let sides: &[&str] = if look.inside_borders {
            &["top", "left", "bottom", "right", "insideH", "insideV"]
        } else {
            &["top", "bottom"]
        };
        for side in sides {
            write!(
                xml,
                r#"<w:{side} w:val="single" w:sz="{}" w:space="0" w:color="{color}"/>"#,
                look.border_size
            )?;
        }
        xml.push_str("</w:tblBorders></w:tblPr>");

        if look.header_fill.is_some() || look.header_color.is_some() {
            xml.push_str(r#"<w:tblStylePr w:type="firstRow"><w:rPr><w:b/><w:bCs/>"#);
            if let Some(ref header_color) = look.header_color {
                write!(xml, r#"<w:color w:val="{}"/>"#, escape_xml(header_color))?;
            }
            xml.push_str("</w:rPr>");
            if let Some(ref fill) = look.header_fill {
                write!(
                    xml,
                    r#"<w:tcPr><w:shd w:val="clear" w:color="auto" w:fill="{}"/></w:tcPr>"#,
                    escape_xml(fill)
                )?;
            }
            xml.push_str("</w:tblStylePr>");
        }
        if let Some(ref band_fill) = look.band_fill {
            write!(
                xml,
                r#"<w:tblStylePr w:type="band1Horz"><w:tcPr><w:shd w:val="clear" w:color="auto" w:fill="{}"/></w:tcPr></w:tblStylePr>"#,
                escape_xml(band_fill)
            )?;
        }
        Ok(())
    }

    /// The "Normal" paragraph style (base style).
    pub fn normal() -> Self {
        let mut style = Self::new("Normal", "Normal", StyleType::Paragraph);
        style.set_default(true);
        style.set_custom(false);
        style.set_quick_style(true);
        style.set_font_name(Some("Calibri".to_string()));
        style.set_font_size(Some(22)); // 11pt
        style
    }

    pub fn default_paragraph_font() -> Self {
        let mut style = Self::new(
            "DefaultParagraphFont",
            "Default Paragraph Font",
            StyleType::Character,
        );
        style.set_default(true);
        style.set_custom(false);
        style.set_priority(Some(1));
        style.set_hidden(true);
        style
    }

    /// The default table style every other table style is based on.
    pub fn table_normal() -> Self {
        let mut style = Self::new("TableNormal", "Normal Table", StyleType::Table);
        style.set_default(true);
        style.set_custom(false);
        style.set_priority(Some(99));
        style.set_hidden(true);
        style
    }

    pub fn title() -> Self {
        let mut style = Self::new("Title", "Title", StyleType::Paragraph);
        style.set_based_on(Some("Normal".to_string()));
        style.set_next(Some("Normal".to_string()));
        style.set_custom(false);
        style.set_priority(Some(10));
        style.set_quick_style(true);
        style.set_border_bottom(Some("4F81BD".to_string()));
        style.set_space_after(Some(300));
        style.set_font_name(Some("Calibri Light".to_string()));
        style.set_font_size(Some(52)); // 26pt
        style.set_color(Some("17365D".to_string()));
        style
    }

    /// "Heading N" for levels 1 and 2.
    pub fn heading(level: u8) -> Self {
        let mut style = Self::new(
            format!("Heading{level}"),
            format!("heading {level}"),
            StyleType::Paragraph,
        );
        style.set_based_on(Some("Normal".to_string()));
        style.set_next(Some("Normal".to_string()));
        style.set_custom(false);
        style.set_priority(Some(9));
        style.set_quick_style(true);
        style.set_keep_next(true);
        style.set_bold(true);
        style.set_font_name(Some("Calibri Light".to_string()));
        if level <= 1 {
            style.set_space_before(Some(480));
            style.set_space_after(Some(0));
            style.set_font_size(Some(28)); // 14pt
            style.set_color(Some("365F91".to_string()));
        } else {
            style.set_space_before(Some(200));
            style.set_space_after(Some(0));
            style.set_font_size(Some(26)); // 13pt
            style.set_color(Some("4F81BD".to_string()));
        }
        style
    }

    /// "List Bullet", attached to the bullet numbering instance.
    pub fn list_bullet(num_id: u32) -> Self {
        let mut style = Self::new("ListBullet", "List Bullet", StyleType::Paragraph);
        style.set_based_on(Some("Normal".to_string()));
        style.set_custom(false);
        style.set_priority(Some(99));
        style.set_num_id(Some(num_id));
        style
    }

    pub fn intense_quote() -> Self {
        let mut style = Self::new("IntenseQuote", "Intense Quote", StyleType::Paragraph);
        style.set_based_on(Some("Normal".to_string()));
        style.set_next(Some("Normal".to_string()));
        style.set_custom(false);
        style.set_priority(Some(30));
        style.set_quick_style(true);
        style.set_border_bottom(Some("4F81BD".to_string()));
        style.set_space_before(Some(200));
        style.set_space_after(Some(280));
        style.set_indent_left(Some(936));
        style.set_indent_right(Some(936));
        style.set_bold(true);
        style.set_italic(true);
        style.set_color(Some("4F81BD".to_string()));
        style
    }

    /// A built-in table style based on "TableNormal".
    pub fn table(style_id: &str, name: &str, look: TableLook) -> Self {
        let mut style = Self::new(style_id, name, StyleType::Table);
        style.set_based_on(Some("TableNormal".to_string()));
        style.set_custom(false);
        style.set_priority(Some(60));
        style.set_table_look(Some(look));
        style
    }
}

/// Generate a complete styles.xml document from a list of styles.
pub fn generate_styles_xml(styles: &[MutableStyle]) -> Result<String> {
    let mut xml = String::with_capacity(4096);

    xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
    xml.push_str(
        r#"<w:styles xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main" "#,
    );
    xml.push_str(
        r#"xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">"#,
    );

    xml.push_str("<w:docDefaults>");
    xml.push_str("<w:rPrDefault><w:rPr>");
    xml.push_str(r#"<w:rFonts w:ascii="Calibri" w:hAnsi="Calibri" w:cs="Calibri"/>"#);
    xml.push_str(r#"<w:sz w:val="22"/><w:szCs w:val="22"/>"#);
    xml.push_str(r#"<w:lang w:val="es-ES" w:eastAsia="en-US" w:bidi="ar-SA"/>"#);
    xml.push_str("</w:rPr></w:rPrDefault>");
    xml.push_str(r#"<w:pPrDefault><w:pPr><w:spacing w:after="200" w:line="276" w:lineRule="auto"/></w:pPr></w:pPrDefault>"#);
    xml.push_str("</w:docDefaults>");

    for style in styles {
        style.to_xml(&mut xml)?;
    }

    xml.push_str("</w:styles>");
    Ok(xml)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(style: &MutableStyle) -> String {
        let mut xml = String::new();
        style.to_xml(&mut xml).unwrap();
        xml
    }

    #[test]
    fn test_create_basic_style() {
        let style = MutableStyle::new("Seccion", "Seccion", StyleType::Paragraph);
        assert_eq!(style.style_id(), "Seccion");
        assert_eq!(style.name(), "Seccion");
        assert_eq!(style.style_type(), StyleType::Paragraph);
        assert!(style.is_custom());
    }

    #[test]
    fn test_custom_paragraph_style_xml() {
        let mut style = MutableStyle::new("Subtitulo", "Subtitulo", StyleType::Paragraph);
        style.set_based_on(Some("Normal".to_string()));
        style.set_font_name(Some("Calibri".to_string()));
        style.set_font_size(Some(28));
        style.set_bold(true);
        style.set_color(Some("404040".to_string()));
        style.set_space_before(Some(360));
        style.set_space_after(Some(120));

        let xml = render(&style);
        assert!(xml.starts_with(
            r#"<w:style w:type="paragraph" w:customStyle="1" w:styleId="Subtitulo">"#
        ));
        assert!(xml.contains(r#"<w:basedOn w:val="Normal"/>"#));
        assert!(xml.contains(r#"<w:spacing w:before="360" w:after="120"/>"#));
        assert!(xml.contains("<w:b/>"));
        assert!(xml.contains(r#"<w:color w:val="404040"/>"#));
        assert!(xml.contains(r#"<w:sz w:val="28"/>"#));
    }

    #[test]
    fn test_builtin_styles() {
        let normal = MutableStyle::normal();
        assert!(normal.is_default());
        assert!(!normal.is_custom());
        assert_eq!(normal.font_size(), Some(22));

        assert_eq!(MutableStyle::heading(1).style_id(), "Heading1");
        assert_eq!(MutableStyle::heading(2).style_id(), "Heading2");
        assert!(render(&MutableStyle::list_bullet(1)).contains(r#"<w:numId w:val="1"/>"#));
    }

    #[test]
    fn test_table_style_xml() {
        let style = MutableStyle::table(
            "LightGrid-Accent1",
            "Light Grid Accent 1",
            TableLook {
                border_size: 8,
                border_color: "4F81BD".to_string(),
                inside_borders: true,
                header_fill: None,
                header_color: None,
                band_fill: Some("D3DFEE".to_string()),
            },
        );
        let xml = render(&style);
        assert!(xml.contains(r#"<w:basedOn w:val="TableNormal"/>"#));
        assert!(xml.contains(r#"<w:insideV w:val="single" w:sz="8" w:space="0" w:color="4F81BD"/>"#));
        assert!(xml.contains(r#"<w:tblStylePr w:type="band1Horz">"#));
        assert!(!xml.contains("firstRow"));

        assert!(render(&MutableStyle::table_normal()).contains("<w:tblCellMar>"));
    }

    #[test]
    fn test_generate_styles_xml() {
        let styles = vec![MutableStyle::normal(), MutableStyle::heading(1)];
        let xml = generate_styles_xml(&styles).unwrap();
        assert!(xml.starts_with("<?xml version"));
        assert!(xml.contains("<w:docDefaults>"));
        assert!(xml.contains(r#"w:styleId="Normal""#));
        assert!(xml.contains(r#"w:styleId="Heading1""#));
        assert!(xml.ends_with("</w:styles>"));
    }

    #[test]
    fn test_xml_escaping() {
        let mut style = MutableStyle::new("T<&>", "N\"'", StyleType::Paragraph);
        style.set_based_on(Some("B&".to_string()));
        let xml = render(&style);
        assert!(xml.contains("T&lt;&amp;&gt;"));
        assert!(xml.contains("N&quot;&apos;"));
        assert!(xml.contains("B&amp;"));
    }
}
