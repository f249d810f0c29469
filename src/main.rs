//! Command-line tool for generating and personalizing technology-transfer
//! reports.
//!
//! # Usage
//!
//! Generate today's report in the current directory:
//! ```sh
//! transferdoc generate
//! ```
//!
//! Personalize the most recent report, overriding some settings:
//! ```sh
//! transferdoc personalize --config sistema.yaml --server-ip 10.0.0.5
//! ```

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use chrono::{Local, NaiveDate};
use clap::{ArgAction, Args, Parser, Subcommand};
use transferdoc::common::telemetry;
use transferdoc::personalize::{REMINDERS, personalize_document};
use transferdoc::{DiscoveryPattern, Error, MatchMode, PersonalizationConfig, find_latest, report};

const RULE_WIDTH: usize = 60;

/// Build and personalize technology-transfer reports
#[derive(Parser, Debug)]
#[command(
    name = "transferdoc",
    about = "Build and personalize technology-transfer reports (.docx)",
    version
)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace); RUST_LOG overrides it
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate a new report named Transferencia_Tecnologica_YYYYMMDD.docx
    Generate {
        /// Directory to write the report to
        #[arg(long, value_name = "DIR", default_value = ".")]
        dir: PathBuf,

        /// Report date (YYYY-MM-DD), defaults to today
        #[arg(long, value_name = "DATE")]
        date: Option<NaiveDate>,
    },

    /// Fill the placeholders of the most recent report
    Personalize(PersonalizeArgs),
}

#[derive(Args, Debug)]
struct PersonalizeArgs {
    /// Directory searched for the latest report; the output is written there too
    #[arg(long, value_name = "DIR", default_value = ".")]
    dir: PathBuf,

    /// YAML file with personalization settings
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Also replace placeholders split across differently formatted runs
    #[arg(long)]
    across_runs: bool,

    /// System name
    #[arg(long)]
    system_name: Option<String>,

    /// System version
    #[arg(long)]
    system_version: Option<String>,

    /// Person responsible for the system
    #[arg(long)]
    responsible: Option<String>,

    #[arg(long)]
    server_ip: Option<String>,

    #[arg(long)]
    server_user: Option<String>,

    #[arg(long)]
    server_hostname: Option<String>,

    /// Deployment path on the server
    #[arg(long)]
    project_path: Option<String>,

    #[arg(long)]
    domain: Option<String>,

    #[arg(long)]
    primary_database: Option<String>,
}

impl PersonalizeArgs {
    /// Settings from the config file (or defaults) with command-line overrides applied.
    fn config(&self) -> transferdoc::Result<PersonalizationConfig> {
        let mut config = match self.config {
            Some(ref path) => PersonalizationConfig::from_yaml_file(path)?,
            None => PersonalizationConfig::default(),
        };

        let overrides = [
            (&self.system_name, &mut config.system_name),
            (&self.system_version, &mut config.version),
            (&self.responsible, &mut config.responsible),
            (&self.server_ip, &mut config.server_ip),
            (&self.server_user, &mut config.server_user),
            (&self.server_hostname, &mut config.server_hostname),
            (&self.project_path, &mut config.project_path),
            (&self.domain, &mut config.domain),
            (&self.primary_database, &mut config.primary_database),
        ];
        for (value, field) in overrides {
            if let Some(value) = value {
                field.clone_from(value);
            }
        }
        Ok(config)
    }

    fn mode(&self) -> MatchMode {
        if self.across_runs {
            MatchMode::AcrossRuns
        } else {
            MatchMode::PerRun
        }
    }
}

fn rule() {
    println!("{}", "=".repeat(RULE_WIDTH));
}

fn run_generate(dir: &Path, date: Option<NaiveDate>) -> transferdoc::Result<()> {
    println!("🚀 Generando documento de transferencia tecnológica...");

    let date = date.unwrap_or_else(|| Local::now().date_naive());
    let path = report::generate(dir, date)?;
    let absolute = std::fs::canonicalize(&path).unwrap_or_else(|_| path.clone());

    println!("✅ Documento generado: {}", report::file_name(date));
    println!("📁 Ruta: {}", absolute.display());
    println!("🎉 Documento generado exitosamente!");
    println!("\n📋 Pasos siguientes:");
    println!("1. Revisar el documento generado");
    println!("2. Completar los campos entre [corchetes]");
    println!("3. Insertar diagramas en las secciones indicadas");
    Ok(())
}

fn show_config(config: &PersonalizationConfig) {
    println!("\n🔧 Configuración actual:");
    println!("   Sistema: {} ({})", config.system_name, config.version);
    println!("   Responsable: {}", config.responsible);
    println!(
        "   Servidor: {} ({})",
        config.server_hostname, config.server_ip
    );
    println!("   Ruta proyecto: {}", config.project_path);
    println!("   Dominio: {}", config.domain);
}

fn show_reminders() {
    println!();
    rule();
    println!("📋 RECORDATORIOS - Revisar manualmente:");
    rule();
    for reminder in REMINDERS {
        println!("   {reminder}");
    }
    rule();
}

fn run_personalize(args: &PersonalizeArgs) -> transferdoc::Result<()> {
    println!("🚀 Script de Personalización de Documento de Transferencia");
    rule();

    let config = args.config()?;
    let input = find_latest(&args.dir, &DiscoveryPattern::default())?;
    let shown = input.file_name().map(Path::new).unwrap_or(input.as_path());
    println!("📄 Documento encontrado: {}", shown.display());

    show_config(&config);

    let outcome = personalize_document(&input, &config, args.mode())?;
    println!("\n✅ Personalización completada!");
    println!("📁 Documento personalizado: {}", outcome.output.display());
    println!("🔄 Reemplazos realizados: {}", outcome.report.total());
    println!("📊 Tamaño: {:.1} KB", outcome.output_size as f64 / 1024.0);

    show_reminders();
    println!("\n✨ ¡Documento listo para revisión final!");
    Ok(())
}

fn report_error(command: &Command, err: &Error) {
    match (command, err) {
        (_, Error::NotFound { .. }) => {
            println!("❌ Error: No se encontró ningún documento de transferencia");
            println!("   Ejecuta primero: transferdoc generate");
        },
        (Command::Generate { .. }, _) => println!("❌ Error al generar documento: {err}"),
        (Command::Personalize(_), _) => println!("❌ Error al personalizar documento: {err}"),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    if let Err(e) = telemetry::init(cli.verbose) {
        eprintln!("warning: {e}");
    }

    let result = match cli.command {
        Command::Generate { ref dir, date } => run_generate(dir, date),
        Command::Personalize(ref args) => run_personalize(args),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::debug!(error = ?e, "command failed");
            report_error(&cli.command, &e);
            ExitCode::FAILURE
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_overrides_apply_over_defaults() {
        let cli = Cli::parse_from([
            "transferdoc",
            "personalize",
            "--system-name",
            "Portal Clientes",
            "--server-ip",
            "10.0.0.5",
            "--across-runs",
        ]);
        let Command::Personalize(args) = cli.command else {
            panic!("expected personalize");
        };
        let config = args.config().unwrap();
        assert_eq!(config.system_name, "Portal Clientes");
        assert_eq!(config.server_ip, "10.0.0.5");
        assert_eq!(config.version, "v1.0.0");
        assert_eq!(args.mode(), MatchMode::AcrossRuns);
    }

    #[test]
    fn test_generate_date_parsing() {
        let cli = Cli::parse_from(["transferdoc", "-vv", "generate", "--date", "2024-03-05"]);
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Command::Generate { date, .. } => {
                assert_eq!(date, NaiveDate::from_ymd_opt(2024, 3, 5))
            },
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
