//! Locating the most recent generated report in a directory.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use tracing::{debug, trace};

use crate::common::{Error, Result};

/// File name pattern of generated reports: `{prefix}*.{extension}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveryPattern {
    pub prefix: String,
    pub extension: String,
}

impl Default for DiscoveryPattern {
    fn default() -> Self {
        Self {
            prefix: "Transferencia_Tecnologica_".to_string(),
            extension: "docx".to_string(),
        }
    }
}

impl DiscoveryPattern {
    /// Whether a file name matches. Comparison is case-sensitive.
    pub fn matches(&self, file_name: &str) -> bool {
        file_name.len() > self.prefix.len() + self.extension.len()
            && file_name.starts_with(&self.prefix)
            && file_name
                .strip_suffix(self.extension.as_str())
                .is_some_and(|stem| stem.ends_with('.'))
    }

    /// The pattern as a glob, for messages.
    pub fn glob(&self) -> String {
        format!("{}*.{}", self.prefix, self.extension)
    }
}

/// Find the regular file in `dir` matching `pattern` with the latest
/// modification time.
///
/// Symbolic links are followed; links to regular files count as candidates
/// and dangling links are skipped.
///
/// Files with identical modification times are ordered by name and the
/// greater name wins. Returns [`Error::NotFound`] when nothing matches.
pub fn find_latest(dir: &Path, pattern: &DiscoveryPattern) -> Result<PathBuf> {
    let mut best: Option<(SystemTime, String, PathBuf)> = None;

    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let Ok(name) = entry.file_name().into_string() else {
            continue;
        };
        if !pattern.matches(&name) {
            continue;
        }
        let metadata = match fs::metadata(entry.path()) {
            Ok(metadata) => metadata,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                trace!(file = %name, "skipping dangling link");
                continue;
            },
            Err(err) => return Err(err.into()),
        };
        if !metadata.is_file() {
            continue;
        }
        let modified = metadata.modified()?;
        trace!(file = %name, ?modified, "discovery candidate");

        let newer = match &best {
            None => true,
            Some((best_time, best_name, _)) => (modified, &name) > (*best_time, best_name),
        };
        if newer {
            best = Some((modified, name, entry.path()));
        }
    }

    match best {
        Some((_, name, path)) => {
            debug!(file = %name, dir = %dir.display(), "found latest document");
            Ok(path)
        },
        None => Err(Error::NotFound {
            dir: dir.to_path_buf(),
            pattern: pattern.glob(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::time::Duration;

    fn touch(dir: &Path, name: &str, modified: SystemTime) {
        let file = File::create(dir.join(name)).unwrap();
        file.set_modified(modified).unwrap();
    }

    #[test]
    fn test_pattern_matching() {
        let pattern = DiscoveryPattern::default();
        assert!(pattern.matches("Transferencia_Tecnologica_20240101.docx"));
        assert!(pattern.matches("Transferencia_Tecnologica_x.docx"));
        assert!(!pattern.matches("Transferencia_Tecnologica_20240101.DOCX"));
        assert!(!pattern.matches("Transferencia_Tecnologica_20240101.docx.bak"));
        assert!(!pattern.matches("Transferencia_MiSistemaWeb_v1_0_0_personalizado.docx"));
        assert!(!pattern.matches("transferencia_tecnologica_20240101.docx"));
        assert!(!pattern.matches("Transferencia_Tecnologica_docx"));
        assert_eq!(pattern.glob(), "Transferencia_Tecnologica_*.docx");
    }

    #[test]
    fn test_latest_modification_wins_over_name_order() {
        let dir = tempfile::tempdir().unwrap();
        let base = SystemTime::UNIX_EPOCH + Duration::from_secs(1_700_000_000);
        touch(dir.path(), "Transferencia_Tecnologica_20230601.docx", base);
        touch(
            dir.path(),
            "Transferencia_Tecnologica_20230101.docx",
            base + Duration::from_secs(60),
        );

        let found = find_latest(dir.path(), &DiscoveryPattern::default()).unwrap();
        assert_eq!(
            found.file_name().unwrap(),
            "Transferencia_Tecnologica_20230101.docx"
        );
    }

    #[test]
    fn test_tie_goes_to_greater_name() {
        let dir = tempfile::tempdir().unwrap();
        let at = SystemTime::UNIX_EPOCH + Duration::from_secs(1_700_000_000);
        touch(dir.path(), "Transferencia_Tecnologica_b.docx", at);
        touch(dir.path(), "Transferencia_Tecnologica_a.docx", at);

        let found = find_latest(dir.path(), &DiscoveryPattern::default()).unwrap();
        assert_eq!(found.file_name().unwrap(), "Transferencia_Tecnologica_b.docx");
    }

    #[test]
    fn test_directories_and_other_files_are_ignored() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("Transferencia_Tecnologica_dir.docx")).unwrap();
        touch(dir.path(), "notas.txt", SystemTime::now());

        let err = find_latest(dir.path(), &DiscoveryPattern::default()).unwrap_err();
        match err {
            Error::NotFound { pattern, .. } => {
                assert_eq!(pattern, "Transferencia_Tecnologica_*.docx")
            },
            other => panic!("unexpected error: {other}"),
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinked_report_is_found() {
        let dir = tempfile::tempdir().unwrap();
        let store = tempfile::tempdir().unwrap();
        let target = store.path().join("informe.docx");
        File::create(&target).unwrap();
        let link = dir.path().join("Transferencia_Tecnologica_20240305.docx");
        std::os::unix::fs::symlink(&target, &link).unwrap();
        std::os::unix::fs::symlink(
            store.path().join("missing.docx"),
            dir.path().join("Transferencia_Tecnologica_20240306.docx"),
        )
        .unwrap();

        let found = find_latest(dir.path(), &DiscoveryPattern::default()).unwrap();
        assert_eq!(found, link);
    }

    #[test]
    fn test_empty_directory_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            find_latest(dir.path(), &DiscoveryPattern::default()),
            Err(Error::NotFound { .. })
        ));
    }
}
