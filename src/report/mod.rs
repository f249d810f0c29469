//! The technology-transfer report.
//!
//! [`build`] assembles the whole document from the literal content in
//! `content`, one section after another; [`generate`] writes it to disk as
//! `Transferencia_Tecnologica_{YYYYMMDD}.docx`. Nothing in the report depends
//! on input other than the build date.

mod content;
mod sections;
mod styles;

use std::path::{Path, PathBuf};

use chrono::{NaiveDate, NaiveTime};
use tracing::info;

use crate::common::{Error, Result, StorageOp};
use crate::ooxml::docx::{BulletList, CoreProperties, MutableDocument, Package};

pub use styles::report_styles;

/// Numbering instance behind the "List Bullet" style.
const BULLET_NUM_ID: u32 = 1;

/// File name of the report generated on `date`.
pub fn file_name(date: NaiveDate) -> String {
    format!("Transferencia_Tecnologica_{}.docx", date.format("%Y%m%d"))
}

/// Assemble the report package for `date`.
pub fn build(date: NaiveDate) -> crate::ooxml::Result<Package> {
    let printed = date.format("%d/%m/%Y").to_string();

    let mut doc = MutableDocument::new();
    sections::cover(&mut doc, &printed)?;
    sections::index(&mut doc)?;
    sections::executive_summary(&mut doc)?;
    sections::architecture(&mut doc)?;
    sections::infrastructure(&mut doc)?;
    sections::deployment(&mut doc)?;
    sections::configuration(&mut doc)?;
    sections::monitoring(&mut doc)?;
    sections::backup(&mut doc)?;
    sections::security(&mut doc)?;
    sections::incidents(&mut doc)?;
    sections::improvements(&mut doc)?;
    sections::annexes(&mut doc)?;
    sections::signatures(&mut doc, &printed)?;

    let core = CoreProperties::new()
        .title("Documento de Transferencia Tecnológica")
        .creator("Departamento de Desarrollo")
        .subject("Transferencia Sistema Web Microservicios")
        .timestamps(date.and_time(NaiveTime::MIN).and_utc());
    let bullets = BulletList {
        num_id: BULLET_NUM_ID,
        ..BulletList::default()
    };

    Package::from_document(doc, &report_styles(), &[bullets], &core)
}

/// Build the report for `date` and save it in `dir`. Returns the file path.
pub fn generate(dir: &Path, date: NaiveDate) -> Result<PathBuf> {
    let path = dir.join(file_name(date));
    let mut package = build(date).map_err(|e| Error::storage(StorageOp::Save, &path, e))?;
    package
        .save(&path)
        .map_err(|e| Error::storage(StorageOp::Save, &path, e))?;

    info!(
        path = %path.display(),
        paragraphs = package.document().paragraph_count(),
        tables = package.document().table_count(),
        "generated report"
    );
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ooxml::docx::BodyElement;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 5).unwrap()
    }

    #[test]
    fn test_file_name() {
        assert_eq!(file_name(date()), "Transferencia_Tecnologica_20240305.docx");
    }

    #[test]
    fn test_report_structure() {
        let package = build(date()).unwrap();
        let doc = package.document();

        assert_eq!(doc.table_count(), 8);
        let first = doc.paragraphs().next().unwrap();
        assert_eq!(first.style(), Some("Title"));
        assert_eq!(first.text(), "DOCUMENTO DE TRANSFERENCIA TECNOLÓGICA");

        let headings: Vec<String> = doc
            .paragraphs()
            .filter(|p| p.style() == Some("Heading1"))
            .map(|p| p.text())
            .collect();
        assert_eq!(headings.len(), 13);
        assert_eq!(headings[0], "ÍNDICE");
        assert_eq!(headings[12], "FIRMAS DE CONFORMIDAD");

        assert!(matches!(doc.elements()[2], BodyElement::Table(_)));
    }

    #[test]
    fn test_cover_table_and_dates() {
        let package = build(date()).unwrap();
        let cover = package.document().tables().next().unwrap();
        let rows: Vec<Vec<String>> = cover
            .rows()
            .map(|row| row.cells().map(|cell| cell.text()).collect())
            .collect();
        assert_eq!(rows.len(), 5);
        assert_eq!(rows[0], vec!["Sistema:", "[NOMBRE DEL SISTEMA WEB]"]);
        assert_eq!(rows[2], vec!["Fecha de transferencia:", "05/03/2024"]);

        let label = cover.rows().next().unwrap().cells().next().unwrap();
        let run = label.paragraphs().next().unwrap().runs().next().unwrap();
        assert_eq!(run.properties.bold, Some(true));

        assert!(package.document().text().contains("Última revisión: 05/03/2024"));
    }

    #[test]
    fn test_placeholders_are_present() {
        let package = build(date()).unwrap();
        let text = package.document().text();
        for placeholder in ["usuario@[IP-servidor]", "[puerto]", "cd /ruta/a/tu/proyecto"] {
            assert!(text.contains(placeholder), "missing {placeholder}");
        }
        assert!(text.contains("  - IP: [XXX.XXX.XXX.XXX]\n"));
    }

    #[test]
    fn test_checklists() {
        let package = build(date()).unwrap();
        let doc = package.document();

        let bullets: Vec<String> = doc
            .paragraphs()
            .filter(|p| p.style() == Some("ListBullet"))
            .map(|p| p.text())
            .collect();
        assert_eq!(bullets.len(), 7);
        assert_eq!(bullets[0], "[ ] Backups completados");

        let hardening: Vec<_> = doc
            .paragraphs()
            .filter(|p| p.text().starts_with('✓') || p.text().starts_with('○'))
            .map(|p| p.runs().next().unwrap().properties.bold)
            .collect();
        assert_eq!(
            hardening,
            vec![Some(true), Some(true), Some(true), Some(false), Some(true), Some(false)]
        );
    }

    #[test]
    fn test_critical_commands() {
        let package = build(date()).unwrap();
        let commands: Vec<String> = package
            .document()
            .paragraphs()
            .filter(|p| p.style() == Some("Codigo"))
            .map(|p| p.text())
            .collect();
        assert_eq!(commands.len(), 11);
        assert_eq!(commands[0], "ssh usuario@[IP-servidor] -p [puerto]");
        assert_eq!(
            commands.last().map(String::as_str),
            Some("curl -f http://localhost:5001/health || echo 'FAILED'")
        );
    }

    #[test]
    fn test_generate_writes_reopenable_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = generate(dir.path(), date()).unwrap();
        assert_eq!(path, dir.path().join("Transferencia_Tecnologica_20240305.docx"));

        let reopened = Package::open(&path).unwrap();
        assert_eq!(reopened.document().table_count(), 8);
        assert_eq!(
            reopened.document().text(),
            build(date()).unwrap().document().text()
        );
    }

    #[test]
    fn test_generate_into_missing_dir_is_a_save_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = generate(&dir.path().join("nope"), date()).unwrap_err();
        assert!(matches!(
            err,
            Error::LoadOrSave {
                op: StorageOp::Save,
                ..
            }
        ));
    }
}
