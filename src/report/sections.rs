//! One builder step per report section, appended in document order.

use crate::ooxml::docx::{MutableDocument, MutableTable, ParagraphAlignment};
use crate::ooxml::error::Result;

use super::content::*;

/// A table whose first row holds bold headers.
fn header_table<const N: usize>(
    doc: &mut MutableDocument,
    style: &str,
    headers: [&str; N],
    rows: &[[&str; N]],
) {
    let table = doc.add_table(rows.len() + 1, N);
    table.set_style(style);
    for (col, header) in headers.iter().enumerate() {
        if let Some(cell) = table.cell(0, col) {
            cell.set_text(header).bold(true);
        }
    }
    for (row, values) in rows.iter().enumerate() {
        for (col, value) in values.iter().enumerate() {
            if let Some(cell) = table.cell(row + 1, col) {
                cell.set_text(value);
            }
        }
    }
}

/// A two-column table with bold labels in the first column.
fn label_table<'a>(
    doc: &'a mut MutableDocument,
    style: &str,
    rows: &[(&str, &str)],
) -> &'a mut MutableTable {
    let table = doc.add_table(rows.len(), 2);
    table.set_style(style);
    for (idx, (label, value)) in rows.iter().enumerate() {
        if let Some(cell) = table.cell(idx, 0) {
            cell.set_text(label).bold(true);
        }
        if let Some(cell) = table.cell(idx, 1) {
            cell.set_text(value);
        }
    }
    table
}

/// A paragraph holding one Consolas run.
fn monospace_block(doc: &mut MutableDocument, text: &str, half_points: Option<u32>) {
    let run = doc.add_paragraph().add_run_with_text(text);
    run.font_name("Consolas");
    if let Some(size) = half_points {
        run.font_size(size);
    }
}

pub(super) fn cover(doc: &mut MutableDocument, date: &str) -> Result<()> {
    doc.add_heading(TITLE, 0)?
        .set_alignment(ParagraphAlignment::Center);
    doc.add_paragraph();

    let rows: Vec<(&str, &str)> = COVER
        .iter()
        .map(|&(label, value)| (label, value.unwrap_or(date)))
        .collect();
    label_table(doc, "LightShading-Accent1", &rows);

    doc.add_page_break();
    Ok(())
}

pub(super) fn index(doc: &mut MutableDocument) -> Result<()> {
    doc.add_heading("ÍNDICE", 1)?;
    doc.add_paragraph();

    for entry in INDEX {
        let numbered = entry.chars().take(3).any(|c| c == '.');
        doc.add_paragraph_with_text(entry)
            .set_indent_left(if numbered { 0.5 } else { 0.0 });
    }

    doc.add_page_break();
    Ok(())
}

pub(super) fn executive_summary(doc: &mut MutableDocument) -> Result<()> {
    doc.add_heading("1. RESUMEN EJECUTIVO", 1)?;
    let table = label_table(doc, "LightGrid-Accent1", &SUMMARY);
    for row in table.rows_mut() {
        if let Some(cell) = row.cell(0) {
            cell.set_width(2.0);
        }
        if let Some(cell) = row.cell(1) {
            cell.set_width(4.0);
        }
    }
    Ok(())
}

pub(super) fn architecture(doc: &mut MutableDocument) -> Result<()> {
    doc.add_heading("2. ARQUITECTURA DEL SISTEMA", 1)?;

    doc.add_heading("2.1 Diagrama de componentes", 2)?;
    doc.add_styled_paragraph("(Insertar diagrama arquitectónico aquí)", "IntenseQuote");
    monospace_block(doc, DIAGRAM, Some(20));

    doc.add_heading("2.2 Listado de microservicios", 2)?;
    header_table(doc, "MediumShading1-Accent1", SERVICE_HEADERS, &SERVICES);
    doc.add_paragraph_with_text("... (continuación para los 25 servicios)");
    Ok(())
}

pub(super) fn infrastructure(doc: &mut MutableDocument) -> Result<()> {
    doc.add_heading("3. INFRAESTRUCTURA DE PRODUCCIÓN", 1)?;
    doc.add_heading("3.1 Especificaciones del servidor", 2)?;
    monospace_block(doc, SERVER_SPEC, Some(20));
    Ok(())
}

pub(super) fn deployment(doc: &mut MutableDocument) -> Result<()> {
    doc.add_heading("4. PROCESO DE DESPLIEGUE ACTUAL", 1)?;

    doc.add_heading("4.1 Flujo completo", 2)?;
    monospace_block(doc, DEPLOY_FLOW, None);

    doc.add_heading("4.2 Comandos críticos", 2)?;
    for command in COMMANDS {
        if command.starts_with('#') {
            doc.add_paragraph_with_text(command).set_indent_left(0.0);
        } else if command.is_empty() {
            doc.add_paragraph();
        } else {
            doc.add_styled_paragraph(command, "Codigo");
        }
    }
    Ok(())
}

pub(super) fn configuration(doc: &mut MutableDocument) -> Result<()> {
    doc.add_heading("5. CONFIGURACIÓN Y VARIABLES DE ENTORNO", 1)?;
    header_table(doc, "LightGrid-Accent1", VARIABLE_HEADERS, &VARIABLES);
    Ok(())
}

pub(super) fn monitoring(doc: &mut MutableDocument) -> Result<()> {
    doc.add_heading("6. MONITOREO Y LOGS", 1)?;
    doc.add_heading("6.1 Métricas a monitorear", 2)?;
    monospace_block(doc, METRICS, None);
    Ok(())
}

pub(super) fn backup(doc: &mut MutableDocument) -> Result<()> {
    doc.add_heading("7. BACKUP Y RECUPERACIÓN", 1)?;
    header_table(doc, "MediumList1-Accent1", BACKUP_HEADERS, &BACKUPS);
    Ok(())
}

pub(super) fn security(doc: &mut MutableDocument) -> Result<()> {
    doc.add_heading("8. SEGURIDAD", 1)?;
    doc.add_heading("8.1 Hardening aplicado", 2)?;

    for (applied, measure) in HARDENING {
        let mark = if applied { '✓' } else { '○' };
        doc.add_paragraph()
            .add_run_with_text(&format!("{mark} {measure}"))
            .bold(applied);
    }
    Ok(())
}

pub(super) fn incidents(doc: &mut MutableDocument) -> Result<()> {
    doc.add_heading("9. PROCEDIMIENTOS DE INCIDENTES", 1)?;
    header_table(doc, "LightShading-Accent1", INCIDENT_HEADERS, &INCIDENTS);
    Ok(())
}

pub(super) fn improvements(doc: &mut MutableDocument) -> Result<()> {
    doc.add_heading("10. MEJORAS PLANEADAS / DEUDA TÉCNICA", 1)?;
    header_table(doc, "MediumGrid3-Accent1", IMPROVEMENT_HEADERS, &IMPROVEMENTS);
    Ok(())
}

pub(super) fn annexes(doc: &mut MutableDocument) -> Result<()> {
    doc.add_heading("11. ANEXOS", 1)?;
    doc.add_heading("A. Checklist pre-despliegue", 2)?;

    for item in PRE_DEPLOY_CHECKLIST {
        let paragraph = doc.add_paragraph();
        paragraph.set_style("ListBullet");
        paragraph.add_run_with_text(&format!("[ ] {item}"));
    }
    Ok(())
}

pub(super) fn signatures(doc: &mut MutableDocument, date: &str) -> Result<()> {
    doc.add_page_break();
    doc.add_heading("FIRMAS DE CONFORMIDAD", 1)?;

    let rows: Vec<[&str; 4]> = SIGNATURES
        .iter()
        .map(|&(role, name, dated)| {
            [role, name, SIGNATURE_LINE, if dated { date } else { "" }]
        })
        .collect();
    header_table(doc, "LightGrid-Accent1", SIGNATURE_HEADERS, &rows);

    doc.add_paragraph();
    for (label, value) in CLOSING_NOTES {
        let paragraph = doc.add_paragraph();
        paragraph.add_run_with_text(label).bold(true);
        paragraph.add_run_with_text(value.unwrap_or(date));
    }
    Ok(())
}
