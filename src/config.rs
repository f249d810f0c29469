//! Personalization settings.
//!
//! Values default to the tool's built-in constants. A YAML file can override
//! any subset of them; keys it leaves out keep their defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::common::{Error, Result};
use crate::substitute::ReplacementMap;

/// Settings that drive placeholder replacement and the output file name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PersonalizationConfig {
    pub system_name: String,
    pub version: String,
    /// Person responsible for the system
    pub responsible: String,
    pub server_ip: String,
    pub server_user: String,
    pub server_hostname: String,
    /// Deployment path on the server
    pub project_path: String,
    pub domain: String,
    pub primary_database: String,
}

impl Default for PersonalizationConfig {
    fn default() -> Self {
        Self {
            system_name: "MiSistemaWeb".to_string(),
            version: "v1.0.0".to_string(),
            responsible: "Juan Pérez".to_string(),
            server_ip: "192.168.1.100".to_string(),
            server_user: "deployuser".to_string(),
            server_hostname: "servidor-prod-01".to_string(),
            project_path: "/opt/misistema".to_string(),
            domain: "misistema.com".to_string(),
            primary_database: "bd_principal".to_string(),
        }
    }
}

impl PersonalizationConfig {
    /// Parse settings from YAML text.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        serde_saphyr::from_str(yaml).map_err(|e| Error::Config(e.to_string()))
    }

    /// Read settings from a YAML file.
    pub fn from_yaml_file(path: &Path) -> Result<Self> {
        let yaml = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("cannot read {}: {e}", path.display())))?;
        serde_saphyr::from_str(&yaml)
            .map_err(|e| Error::Config(format!("{}: {e}", path.display())))
    }

    /// The placeholder map for these settings, in application order.
    ///
    /// `usuario@[IP-servidor]` comes after `[IP-servidor]`, so by the time it
    /// is applied the shorter placeholder has already been replaced.
    pub fn replacement_map(&self) -> Result<ReplacementMap> {
        ReplacementMap::from_pairs([
            ("[NOMBRE DEL SISTEMA WEB]", self.system_name.clone()),
            ("[vX.X.X]", self.version.clone()),
            ("[Tu Nombre]", self.responsible.clone()),
            ("[Tu Nombre Completo]", self.responsible.clone()),
            ("[IP-servidor]", self.server_ip.clone()),
            (
                "usuario@[IP-servidor]",
                format!("{}@{}", self.server_user, self.server_ip),
            ),
            ("[nombre-servidor]", self.server_hostname.clone()),
            ("/ruta/a/tu/proyecto", self.project_path.clone()),
            ("[tudominio.com]", self.domain.clone()),
            ("[basedatos]", self.primary_database.clone()),
            (
                "[Especificar servidores/cloud]",
                "Servidor físico dedicado - DC Principal".to_string(),
            ),
            ("[Ej: 99.5% en horario comercial]", "99.9% (24/7)".to_string()),
            ("[Ej: RHEL 8.6 / Ubuntu 22.04]", "Ubuntu 22.04 LTS".to_string()),
            ("[XX GB - ej: 32GB]", "32GB".to_string()),
            ("[XX GB - ej: 500GB]", "500GB SSD".to_string()),
            ("[Especificaciones - ej: 8 cores]", "8 cores @ 3.2GHz".to_string()),
            ("[X.X.X - ej: 4.6.1]", "4.6.1".to_string()),
            ("[XXX.XXX.XXX.XXX]", self.server_ip.clone()),
            ("[/opt/aplicacion]", self.project_path.clone()),
            ("[puerto]", "22".to_string()),
            (
                "[Especificar acuerdos de nivel de servicio]",
                "99.9% uptime / Respuesta < 2s".to_string(),
            ),
        ])
    }

    /// File name of the personalized document.
    ///
    /// Spaces in the system name and dots in the version become underscores.
    pub fn output_file_name(&self) -> String {
        format!(
            "Transferencia_{}_{}_personalizado.docx",
            self.system_name.replace(' ', "_"),
            self.version.replace('.', "_")
        )
    }
}
