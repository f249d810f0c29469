//! Personalizing a generated report: discover, load, substitute, save.
//!
//! The input document is only ever read. The output goes next to it under
//! the name derived from the configuration, and nothing is written unless
//! every step before the save succeeded.

use std::path::{Path, PathBuf};

use tracing::info;

use crate::common::{Error, Result, StorageOp};
use crate::config::PersonalizationConfig;
use crate::discovery::{DiscoveryPattern, find_latest};
use crate::ooxml::docx::Package;
use crate::substitute::{MatchMode, SubstitutionEngine, SubstitutionReport};

/// Items the operator still has to review by hand after personalization.
pub const REMINDERS: [&str; 10] = [
    "1. Insertar diagramas arquitectónicos en la sección 2.1",
    "2. Completar todos los 25 microservicios en la tabla (actualmente solo 5)",
    "3. Verificar/actualizar comandos específicos de despliegue",
    "4. Agregar contactos de emergencia",
    "5. Revisar sección de mejoras planeadas/deuda técnica",
    "6. Actualizar campos de firmas con nombres reales",
    "7. Verificar configuraciones específicas de seguridad",
    "8. Revisar procedimientos de incidentes",
    "9. Actualizar información de backup según infraestructura real",
    "10. Validar métricas de monitoreo",
];

/// Result of a completed personalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonalizeOutcome {
    pub input: PathBuf,
    pub output: PathBuf,
    /// Paragraphs whose text changed
    pub report: SubstitutionReport,
    /// Size of the written document in bytes
    pub output_size: u64,
}

/// Path the personalized copy of `input` is written to.
pub fn output_path(input: &Path, config: &PersonalizationConfig) -> PathBuf {
    let name = config.output_file_name();
    match input.parent() {
        Some(dir) => dir.join(name),
        None => PathBuf::from(name),
    }
}

/// Personalize one document.
///
/// Fails with [`Error::WouldOverwriteInput`] before loading anything when
/// the derived output path names the input file.
pub fn personalize_document(
    input: &Path,
    config: &PersonalizationConfig,
    mode: MatchMode,
) -> Result<PersonalizeOutcome> {
    let output = output_path(input, config);
    if input.file_name() == output.file_name() {
        return Err(Error::WouldOverwriteInput(output));
    }

    let map = config.replacement_map()?;
    let mut package =
        Package::open(input).map_err(|e| Error::storage(StorageOp::Load, input, e))?;

    let report = SubstitutionEngine::new(&map)
        .with_mode(mode)
        .apply_to_document(package.document_mut());

    package
        .save(&output)
        .map_err(|e| Error::storage(StorageOp::Save, &output, e))?;
    let output_size = std::fs::metadata(&output)?.len();

    info!(
        input = %input.display(),
        output = %output.display(),
        paragraphs = report.total(),
        "personalized document"
    );
    Ok(PersonalizeOutcome {
        input: input.to_path_buf(),
        output,
        report,
        output_size,
    })
}

/// Personalize the most recent report in `dir`.
pub fn personalize(
    dir: &Path,
    config: &PersonalizationConfig,
    mode: MatchMode,
) -> Result<PersonalizeOutcome> {
    let input = find_latest(dir, &DiscoveryPattern::default())?;
    personalize_document(&input, config, mode)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn generated(dir: &Path) -> PathBuf {
        crate::report::generate(dir, NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()).unwrap()
    }

    #[test]
    fn test_output_path_is_next_to_input() {
        let config = PersonalizationConfig::default();
        assert_eq!(
            output_path(Path::new("/tmp/docs/in.docx"), &config),
            Path::new("/tmp/docs/Transferencia_MiSistemaWeb_v1_0_0_personalizado.docx")
        );
        assert_eq!(
            output_path(Path::new("in.docx"), &config),
            Path::new("Transferencia_MiSistemaWeb_v1_0_0_personalizado.docx")
        );
    }

    #[test]
    fn test_personalize_generated_report() {
        let dir = tempfile::tempdir().unwrap();
        let input = generated(dir.path());
        let before = std::fs::read(&input).unwrap();

        let outcome =
            personalize(dir.path(), &PersonalizationConfig::default(), MatchMode::PerRun).unwrap();

        assert_eq!(outcome.input, input);
        assert!(outcome.report.body_paragraphs > 0);
        assert!(outcome.report.table_paragraphs > 0);
        assert!(outcome.output_size > 0);
        assert_eq!(std::fs::read(&input).unwrap(), before);

        let text = Package::open(&outcome.output).unwrap().document().text();
        assert!(text.contains("ssh usuario@192.168.1.100 -p 22"));
        assert!(text.contains("cd /opt/misistema"));
        assert!(!text.contains("[IP-servidor]"));
    }

    #[test]
    fn test_refuses_to_overwrite_input() {
        let dir = tempfile::tempdir().unwrap();
        let config = PersonalizationConfig {
            system_name: "Tecnologica".to_string(),
            version: "20240115".to_string(),
            ..Default::default()
        };
        let input = dir
            .path()
            .join("Transferencia_Tecnologica_20240115_personalizado.docx");
        std::fs::write(&input, b"not a zip").unwrap();

        let err = personalize_document(&input, &config, MatchMode::PerRun).unwrap_err();
        assert!(matches!(err, Error::WouldOverwriteInput(_)));
        assert_eq!(std::fs::read(&input).unwrap(), b"not a zip");
    }

    #[test]
    fn test_corrupt_input_is_a_load_error_and_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("Transferencia_Tecnologica_20240101.docx");
        std::fs::write(&input, b"definitely not a docx").unwrap();
        let config = PersonalizationConfig::default();

        let err = personalize_document(&input, &config, MatchMode::PerRun).unwrap_err();
        assert!(matches!(
            err,
            Error::LoadOrSave {
                op: StorageOp::Load,
                ..
            }
        ));
        assert!(!output_path(&input, &config).exists());
    }
}
