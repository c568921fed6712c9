use clap::{Parser, Subcommand};
use cli::{load_config, load_images, render_summary, render_table, write_outputs, AnalysisJob};
use color_eyre::eyre::Result;
use shapes::{AnalysisConfig, BatchAnalyzer};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::{self, EnvFilter};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Classify the shapes in one or more images
    Analyze {
        /// Images to analyze, processed in the order given
        #[arg(required = true)]
        images: Vec<PathBuf>,
        /// Directory for annotated images (and JSON reports)
        #[arg(short, long, default_value = "annotated")]
        output_dir: PathBuf,
        /// Analysis settings as a TOML or JSON file
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Worker threads (defaults to all cores)
        #[arg(short, long)]
        threads: Option<usize>,
        /// Also write a JSON report per image
        #[arg(long)]
        json: bool,
    },
    /// Run a job file describing images, output directory and settings
    Run {
        /// Path to the TOML or JSON job file
        #[arg(short, long)]
        job: PathBuf,
    },
    /// Print the JSON schema of the analysis settings
    Schema,
    /// Write a default job file (format chosen by extension)
    Init {
        #[arg(short, long, default_value = "shapes.toml")]
        output: PathBuf,
    },
}

fn main() -> Result<()> {
    color_eyre::install()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info"))
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze { images, output_dir, config, threads, json } => {
            let config = match config {
                Some(path) => load_config(path)?,
                None => AnalysisConfig::default(),
            };
            analyze_images(&images, &output_dir, &config, threads, json)?;
        }
        Commands::Run { job } => {
            let job = AnalysisJob::from_file(&job)?;
            info!("Loaded job with {} images", job.images.len());
            let images: Vec<PathBuf> = job.images.iter().map(PathBuf::from).collect();
            analyze_images(
                &images,
                Path::new(&job.output_dir),
                &job.config,
                job.threads,
                job.write_json,
            )?;
        }
        Commands::Schema => {
            let schema = AnalysisConfig::schema();
            println!("{}", serde_json::to_string_pretty(&schema)?);
        }
        Commands::Init { output } => {
            AnalysisJob::default().to_file(&output)?;
            info!("Wrote default job to {:?}", output);
        }
    }

    Ok(())
}

fn analyze_images(
    paths: &[PathBuf],
    output_dir: &Path,
    config: &AnalysisConfig,
    threads: Option<usize>,
    write_json: bool,
) -> Result<()> {
    let images = load_images(paths)?;
    let analyzer = BatchAnalyzer::new(config, threads)?;
    info!("{}", analyzer.pipeline().info());

    let reports = analyzer.analyze_all(&images);

    for (i, (path, report)) in paths.iter().zip(&reports).enumerate() {
        println!("Image {}: {}", i + 1, path.display());
        println!("Objects Detected: {}", report.len());
        if !report.is_empty() {
            println!("{}", render_summary(report));
        }
        println!("{}", render_table(report));
        println!();

        write_outputs(output_dir, i + 1, path, report, write_json)?;
    }

    let total: usize = reports.iter().map(|r| r.len()).sum();
    info!("✅ Analyzed {} images, {} objects", reports.len(), total);
    Ok(())
}
