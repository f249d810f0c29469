/// Numbering definitions (`word/numbering.xml`) for documents built in memory.
use crate::common::xml::escape_xml;
use crate::ooxml::error::Result;
use std::fmt::Write as FmtWrite;

/// A single-level bullet list: one abstract definition and one instance.
#[derive(Debug, Clone, PartialEq)]
pub struct BulletList {
    /// `w:numId` paragraphs refer to
    pub num_id: u32,
    pub abstract_num_id: u32,
    /// Bullet glyph
    pub symbol: char,
    /// Left indent of list paragraphs in twips
    pub indent_left: u32,
    /// Hanging indent of the bullet in twips
    pub hanging: u32,
    /// Paragraph style linked to the list level
    pub style_id: Option<String>,
}

impl Default for BulletList {
    fn default() -> Self {
        Self {
            num_id: 1,
            abstract_num_id: 0,
            symbol: '\u{2022}',
            indent_left: 360,
            hanging: 360,
            style_id: Some("ListBullet".to_string()),
        }
    }
}

impl BulletList {
    fn write_abstract(&self, xml: &mut String) -> Result<()> {
        write!(
            xml,
            r#"<w:abstractNum w:abstractNumId="{}"><w:multiLevelType w:val="singleLevel"/><w:lvl w:ilvl="0"><w:start w:val="1"/><w:numFmt w:val="bullet"/>"#,
            self.abstract_num_id
        )?;
        if let Some(ref style_id) = self.style_id {
            write!(xml, r#"<w:pStyle w:val="{}"/>"#, escape_xml(style_id))?;
        }
        write!(
            xml,
            r#"<w:lvlText w:val="{}"/><w:lvlJc w:val="left"/><w:pPr><w:ind w:left="{}" w:hanging="{}"/></w:pPr></w:lvl></w:abstractNum>"#,
            escape_xml(self.symbol.encode_utf8(&mut [0; 4])),
            self.indent_left,
            self.hanging
        )?;
        Ok(())
    }
}

/// Generate a complete numbering.xml document.
///
/// All abstract definitions precede the instances, as the schema requires.
pub fn generate_numbering_xml(lists: &[BulletList]) -> Result<String> {
    let mut xml = String::with_capacity(1024);
    xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
    xml.push_str(
        r#"<w:numbering xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">"#,
    );
    for list in lists {
        list.write_abstract(&mut xml)?;
    }
    for list in lists {
        write!(
            xml,
            r#"<w:num w:numId="{}"><w:abstractNumId w:val="{}"/></w:num>"#,
            list.num_id, list.abstract_num_id
        )?;
    }
    xml.push_str("</w:numbering>");
    Ok(xml)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bullet_numbering_xml() {
        let xml = generate_numbering_xml(&[BulletList::default()]).unwrap();
        assert!(xml.contains(r#"<w:numFmt w:val="bullet"/>"#));
        assert!(xml.contains("<w:lvlText w:val=\"\u{2022}\"/>"));
        assert!(xml.contains(r#"<w:pStyle w:val="ListBullet"/>"#));
        assert!(xml.ends_with(r#"<w:num w:numId="1"><w:abstractNumId w:val="0"/></w:num></w:numbering>"#));
        let abstract_at = xml.find("<w:abstractNum ").unwrap();
        let num_at = xml.find("<w:num ").unwrap();
        assert!(abstract_at < num_at);
    }
}
