/// Section properties (page setup) for documents built in memory.
use crate::ooxml::error::Result;
use std::fmt::Write as FmtWrite;

/// Section properties including page size and margins, all in twips.
#[derive(Debug, Clone, PartialEq)]
pub struct SectionProperties {
    /// Page width in twips (1440 = 1 inch)
    pub page_width: u32,
    pub page_height: u32,
    pub margin_top: u32,
    pub margin_bottom: u32,
    pub margin_left: u32,
    pub margin_right: u32,
    /// Header distance from top
    pub header_distance: u32,
    /// Footer distance from bottom
    pub footer_distance: u32,
}

impl Default for SectionProperties {
    fn default() -> Self {
        // US Letter: 8.5" x 11"
        Self {
            page_width: 12240,
            page_height: 15840,
            margin_top: 1440,
            margin_bottom: 1440,
            margin_left: 1440,
            margin_right: 1440,
            header_distance: 720,
            footer_distance: 720,
        }
    }
}

impl SectionProperties {
    pub(crate) fn to_xml(&self, xml: &mut String) -> Result<()> {
        write!(
            xml,
            "<w:sectPr><w:pgSz w:w=\"{}\" w:h=\"{}\"/>\
             <w:pgMar w:top=\"{}\" w:right=\"{}\" w:bottom=\"{}\" w:left=\"{}\" \
             w:header=\"{}\" w:footer=\"{}\" w:gutter=\"0\"/>\
             <w:cols w:space=\"720\"/><w:docGrid w:linePitch=\"360\"/></w:sectPr>",
            self.page_width,
            self.page_height,
            self.margin_top,
            self.margin_right,
            self.margin_bottom,
            self.margin_left,
            self.header_distance,
            self.footer_distance
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_letter_default() {
        let section = SectionProperties::default();
        assert_eq!(
            section.page_width - section.margin_left - section.margin_right,
            9360
        );
        let mut xml = String::new();
        section.to_xml(&mut xml).unwrap();
        assert!(xml.starts_with("<w:sectPr><w:pgSz w:w=\"12240\" w:h=\"15840\"/>"));
        assert!(xml.contains("w:left=\"1440\""));
    }
}
