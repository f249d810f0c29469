//! Shared formatting types for DOCX paragraphs and tables.

/// Paragraph alignment options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParagraphAlignment {
    Left,
    Center,
    Right,
    Justify,
}

impl ParagraphAlignment {
    pub(crate) fn as_str(&self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Center => "center",
            Self::Right => "right",
            Self::Justify => "both",
        }
    }
}

/// Convert points to twentieths of a point (twips).
#[inline]
pub(crate) fn points_to_twips(points: f64) -> u32 {
    (points * 20.0).round().max(0.0) as u32
}

/// Convert inches to twips.
#[inline]
pub(crate) fn inches_to_twips(inches: f64) -> u32 {
    (inches * 1440.0).round().max(0.0) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alignment_values() {
        assert_eq!(ParagraphAlignment::Center.as_str(), "center");
        assert_eq!(ParagraphAlignment::Justify.as_str(), "both");
    }

    #[test]
    fn test_unit_conversions() {
        assert_eq!(points_to_twips(12.0), 240);
        assert_eq!(points_to_twips(6.0), 120);
        assert_eq!(inches_to_twips(0.5), 720);
        assert_eq!(inches_to_twips(-1.0), 0);
    }
}
