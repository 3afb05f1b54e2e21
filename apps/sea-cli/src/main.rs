use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "sea-cli")]
#[command(about = "Seaflow CLI - vibroacoustic model and result inspection tool", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate project file syntax and structure
    Validate {
        /// Path to the project YAML or JSON file
        project_path: PathBuf,
    },
    /// List registered systems in a project
    Systems {
        /// Path to the project YAML or JSON file
        project_path: PathBuf,
    },
    /// Show a summary of an exported result bundle
    Summary {
        /// Path to the exported results (.json or .bin)
        results_path: PathBuf,
    },
    /// Re-encode an exported result bundle
    Convert {
        /// Path to the exported results (.json or .bin)
        input: PathBuf,
        /// Output path; the extension selects the encoding
        output: PathBuf,
    },
    /// Print one modal dataset from an exported result bundle
    Modal {
        /// Path to the exported results (.json or .bin)
        results_path: PathBuf,
        /// Dataset key, e.g. sys1_wave3
        key: String,
    },
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("Model error: {0}")]
    Model(#[from] sea_model::ModelError),

    #[error("Results error: {0}")]
    Results(#[from] sea_results::ResultsError),

    #[error("Unsupported project extension: {0}")]
    UnsupportedProject(String),

    #[error("Modal dataset not found: {0}")]
    ModalKeyNotFound(String),
}

type CliResult<T> = Result<T, CliError>;

fn main() -> CliResult<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Validate { project_path } => cmd_validate(&project_path),
        Commands::Systems { project_path } => cmd_systems(&project_path),
        Commands::Summary { results_path } => cmd_summary(&results_path),
        Commands::Convert { input, output } => cmd_convert(&input, &output),
        Commands::Modal { results_path, key } => cmd_modal(&results_path, &key),
    }
}

fn load_project(path: &Path) -> CliResult<sea_model::Project> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("yaml") | Some("yml") => Ok(sea_model::load_yaml(path)?),
        Some("json") => Ok(sea_model::load_json(path)?),
        other => Err(CliError::UnsupportedProject(
            other.unwrap_or("<none>").to_string(),
        )),
    }
}

fn cmd_validate(project_path: &Path) -> CliResult<()> {
    println!("Validating project: {}", project_path.display());
    let project = load_project(project_path)?;
    println!(
        "✓ Project '{}' is valid ({} systems, {} junctions, {} loads)",
        project.metadata.name,
        project.registry.systems().len(),
        project.registry.junctions().len(),
        project.registry.loads().len()
    );
    Ok(())
}

fn cmd_systems(project_path: &Path) -> CliResult<()> {
    let project = load_project(project_path)?;
    let systems = project.registry.systems();

    if systems.is_empty() {
        println!("No systems registered in project");
    } else {
        println!("Systems in project:");
        for registered in systems {
            println!("  {} - {}", registered.id, registered.entity.name());
        }
    }
    Ok(())
}

fn cmd_summary(results_path: &Path) -> CliResult<()> {
    let bundle = sea_results::load(results_path)?;
    let summary = bundle.summary();

    println!("Result summary for '{}':", summary.project);
    println!("  Frequency bands: {}", summary.frequency_bands);
    if let Some((lo, hi)) = summary.frequency_range_hz {
        println!("  Frequency range: {:.1} - {:.1} Hz", lo, hi);
    }
    println!("  Systems: {}", summary.num_systems);
    println!("  Junctions: {}", summary.num_junctions);
    println!("  Modal datasets: {}", summary.num_modal_datasets);
    println!("  Energy results: {}", summary.has_energy);
    println!("  Power-balance matrix: {}", summary.has_sea_matrix);
    if !summary.units.is_empty() {
        println!("  Units:");
        for (quantity, unit) in &summary.units {
            println!("    {} = {}", quantity, unit);
        }
    }
    Ok(())
}

fn cmd_convert(input: &Path, output: &Path) -> CliResult<()> {
    let bundle = sea_results::load(input)?;
    let written = match output.extension().and_then(|e| e.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case(sea_results::store::BINARY_EXTENSION) => {
            sea_results::save_binary(output, &bundle)?
        }
        _ => {
            sea_results::save_json(output, &bundle)?;
            output.to_path_buf()
        }
    };
    println!("✓ Converted {} -> {}", input.display(), written.display());
    Ok(())
}

fn cmd_modal(results_path: &Path, key: &str) -> CliResult<()> {
    let bundle = sea_results::load(results_path)?;
    let dataset = bundle
        .modal_data
        .get(key)
        .ok_or_else(|| CliError::ModalKeyNotFound(key.to_string()))?;

    println!(
        "Modal data for system {} ({}), wave type {}:",
        dataset.system_id, dataset.system_kind, dataset.wave_type
    );
    println!("{:>12} {:>14} {:>14}", "f [Hz]", "n(f)", "overlap");
    for ((f, density), overlap) in dataset
        .frequency
        .iter()
        .zip(&dataset.modal_density)
        .zip(&dataset.modal_overlap)
    {
        println!("{:>12.1} {:>14.6e} {:>14.6e}", f, density, overlap);
    }
    Ok(())
}
