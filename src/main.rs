use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::info;

use rampkit::{
    default_config_path, init_logging, snapshot_dimensions, EditorConfig, JsonFileStore, Object2D,
    PersistedProject, ProjectStore, BUILD_DATE, VERSION,
};

#[derive(Parser, Debug)]
#[command(name = "rampkit", about = "Ramp and landing layout tools", version)]
struct Cli {
    /// Editor config file (.toml or .json)
    #[arg(long, env = "RAMPKIT_CONFIG", global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print every dimension line of a project as JSON, one per line
    Dimensions { project: PathBuf },
    /// Validate a project file and summarise its contents
    Check { project: PathBuf },
    /// Normalise every object and write the project back
    Normalise {
        project: PathBuf,
        /// Write here instead of overwriting the input
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
    /// Print the effective editor configuration
    Config,
    /// Print version and build date
    Version,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Summary {
    schema_version: u32,
    ramps: usize,
    landings: usize,
    selected_id: Option<String>,
    dimension_lines: usize,
}

fn load_config(path: Option<&Path>) -> anyhow::Result<EditorConfig> {
    let path = match path {
        Some(path) => path.to_path_buf(),
        None => match default_config_path() {
            Ok(path) => path,
            Err(_) => return Ok(EditorConfig::default()),
        },
    };
    EditorConfig::load_or_default(&path)
        .with_context(|| format!("Failed to load config {}", path.display()))
}

fn load_project(path: &Path) -> anyhow::Result<PersistedProject> {
    JsonFileStore::new(path)
        .load()
        .with_context(|| format!("Failed to load project {}", path.display()))
}

fn main() -> anyhow::Result<()> {
    init_logging()?;
    let cli = Cli::parse();

    match cli.command {
        Command::Dimensions { project } => {
            let snapshot = load_project(&project)?.into_snapshot();
            for segment in snapshot_dimensions(&snapshot) {
                println!("{}", serde_json::to_string(&segment)?);
            }
        }
        Command::Check { project } => {
            let persisted = load_project(&project)?;
            persisted.validate()?;
            let schema_version = persisted.schema_version;
            let snapshot = persisted.into_snapshot();
            let ramps = snapshot
                .objects
                .iter()
                .filter(|o| matches!(o, Object2D::Ramp(_)))
                .count();
            let summary = Summary {
                schema_version,
                ramps,
                landings: snapshot.objects.len() - ramps,
                selected_id: snapshot.selected_id.as_ref().map(|id| id.to_string()),
                dimension_lines: snapshot_dimensions(&snapshot).len(),
            };
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
        Command::Normalise { project, output } => {
            let persisted = load_project(&project)?;
            let (mode, tool) = (persisted.mode, persisted.tool);
            let snapshot = persisted.into_snapshot();
            let target = output.unwrap_or(project);
            JsonFileStore::new(&target)
                .save(&PersistedProject::from_snapshot(&snapshot, mode, tool))
                .with_context(|| format!("Failed to write project {}", target.display()))?;
            info!("Wrote {} objects to {}", snapshot.objects.len(), target.display());
        }
        Command::Config => {
            let config = load_config(cli.config.as_deref())?;
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
        Command::Version => {
            println!("rampkit {} (built {})", VERSION, BUILD_DATE);
        }
    }

    Ok(())
}
