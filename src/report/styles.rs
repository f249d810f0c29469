//! Style sheet of the generated report.

use crate::ooxml::docx::{MutableStyle, StyleType, TableLook};

const ACCENT1: &str = "4F81BD";

fn custom_paragraph(id: &str, font: &str, half_points: u32) -> MutableStyle {
    let mut style = MutableStyle::new(id, id, StyleType::Paragraph);
    style.set_based_on(Some("Normal".to_string()));
    style.set_quick_style(true);
    style.set_font_name(Some(font.to_string()));
    style.set_font_size(Some(half_points));
    style
}

fn table_styles() -> [MutableStyle; 5] {
    [
        MutableStyle::table(
            "LightShading-Accent1",
            "Light Shading Accent 1",
            TableLook {
                border_size: 8,
                border_color: ACCENT1.to_string(),
                inside_borders: false,
                header_fill: None,
                header_color: Some("365F91".to_string()),
                band_fill: Some("D3DFEE".to_string()),
            },
        ),
        MutableStyle::table(
            "LightGrid-Accent1",
            "Light Grid Accent 1",
            TableLook {
                border_size: 8,
                border_color: ACCENT1.to_string(),
                inside_borders: true,
                header_fill: None,
                header_color: None,
                band_fill: Some("D3DFEE".to_string()),
            },
        ),
        MutableStyle::table(
            "MediumShading1-Accent1",
            "Medium Shading 1 Accent 1",
            TableLook {
                border_size: 8,
                border_color: "7BA0CD".to_string(),
                inside_borders: false,
                header_fill: Some(ACCENT1.to_string()),
                header_color: Some("FFFFFF".to_string()),
                band_fill: Some("D3DFEE".to_string()),
            },
        ),
        MutableStyle::table(
            "MediumList1-Accent1",
            "Medium List 1 Accent 1",
            TableLook {
                border_size: 8,
                border_color: ACCENT1.to_string(),
                inside_borders: false,
                header_fill: None,
                header_color: Some("1F497D".to_string()),
                band_fill: Some("D3DFEE".to_string()),
            },
        ),
        MutableStyle::table(
            "MediumGrid3-Accent1",
            "Medium Grid 3 Accent 1",
            TableLook {
                border_size: 8,
                border_color: "FFFFFF".to_string(),
                inside_borders: true,
                header_fill: Some(ACCENT1.to_string()),
                header_color: Some("FFFFFF".to_string()),
                band_fill: Some("A7BFDE".to_string()),
            },
        ),
    ]
}

/// Every style the report refers to: the built-in ones Word expects plus
/// the report's own paragraph styles.
pub fn report_styles() -> Vec<MutableStyle> {
    let mut styles = vec![
        MutableStyle::normal(),
        MutableStyle::default_paragraph_font(),
        MutableStyle::table_normal(),
        MutableStyle::title(),
        MutableStyle::heading(1),
        MutableStyle::heading(2),
        MutableStyle::list_bullet(super::BULLET_NUM_ID),
        MutableStyle::intense_quote(),
    ];
    styles.extend(table_styles());

    let mut main_title = custom_paragraph("TituloPrincipal", "Calibri", 32);
    main_title.set_bold(true);
    main_title.set_color(Some("2E5495".to_string()));
    main_title.set_space_after(Some(240));

    let mut subtitle = custom_paragraph("Subtitulo", "Calibri", 28);
    subtitle.set_bold(true);
    subtitle.set_color(Some("404040".to_string()));
    subtitle.set_space_before(Some(360));
    subtitle.set_space_after(Some(120));

    let mut section = custom_paragraph("Seccion", "Calibri", 24);
    section.set_bold(true);
    section.set_space_before(Some(240));
    section.set_space_after(Some(120));

    let mut code = custom_paragraph("Codigo", "Consolas", 20);
    code.set_indent_left(Some(720));
    code.set_space_before(Some(120));
    code.set_space_after(Some(120));

    styles.extend([main_title, subtitle, section, code]);
    styles
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_style_ids_are_unique() {
        let styles = report_styles();
        let ids: HashSet<_> = styles.iter().map(MutableStyle::style_id).collect();
        assert_eq!(ids.len(), styles.len());
    }

    #[test]
    fn test_code_style() {
        let styles = report_styles();
        let code = styles.iter().find(|s| s.style_id() == "Codigo").unwrap();
        assert_eq!(code.font_name(), Some("Consolas"));
        assert_eq!(code.font_size(), Some(20));
        assert!(code.is_custom());
    }
}
