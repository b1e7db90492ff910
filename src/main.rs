use anyhow::{Context, Result, bail};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{error, info, warn};

use landgrid::artifact::{self, GridArtifact};
use landgrid::config::FileConfig;
use landgrid::grid::{DenseGrid, GridBuilder, GridSpec};
use landgrid::ingest::load_shapes;
use landgrid::logging;

/// Generate a global land/sea grid from Natural Earth GeoJSON
///
/// Examples:
///   # Default 0.02° grid from the four Natural Earth files in ./data
///   landgrid
///
///   # Coarser grid, custom inputs
///   landgrid -r 0.05 -i ne_10m_land.json -i ne_10m_reefs.json
///
///   # Use a config file
///   landgrid --config my-grid.toml
#[derive(Parser, Debug)]
#[command(name = "landgrid")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to config file (optional, auto-searches landgrid.toml if not provided)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Cell size in degrees
    #[arg(short = 'r', long)]
    resolution: Option<f64>,

    /// Directory that input and output paths are relative to
    #[arg(short = 'd', long)]
    data_dir: Option<PathBuf>,

    /// GeoJSON input file (repeatable; defaults to the Natural Earth set)
    #[arg(short = 'i', long = "input")]
    inputs: Vec<PathBuf>,

    /// Output path for the run-length encoded JSON grid
    #[arg(long)]
    output_json: Option<PathBuf>,

    /// Output path for the packed binary grid
    #[arg(long)]
    output_bin: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short = 'v', long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let total_start = Instant::now();

    let file_config: FileConfig = if let Some(ref config_path) = args.config {
        if config_path.exists() {
            let contents = std::fs::read_to_string(config_path)
                .context(format!("Failed to read config file: {:?}", config_path))?;
            toml::from_str(&contents).context("Failed to parse config file")?
        } else {
            bail!("Config file not found: {:?}", config_path);
        }
    } else {
        FileConfig::load().unwrap_or_default()
    };

    let config = FileConfig {
        resolution: args.resolution.unwrap_or(file_config.resolution),
        data_dir: args.data_dir.clone().unwrap_or(file_config.data_dir),
        inputs: if args.inputs.is_empty() {
            file_config.inputs
        } else {
            args.inputs.clone()
        },
        output_json: args.output_json.clone().unwrap_or(file_config.output_json),
        output_bin: args.output_bin.clone().unwrap_or(file_config.output_bin),
        description: file_config.description,
        verbose: args.verbose || file_config.verbose,
    };

    logging::init(config.verbose);

    let spec = GridSpec::new(config.resolution).context("Invalid grid resolution")?;

    println!("landgrid - Global Land Grid Generator");
    println!("=====================================");
    println!();
    println!(
        "Grid resolution: {}° ({:.2}km at equator)",
        spec.resolution(),
        spec.resolution() * 111.0
    );
    println!(
        "Grid size: {} x {} = {} cells",
        spec.width(),
        spec.height(),
        spec.cell_count()
    );
    println!();

    let (grid, sources) = build(&config, spec)?;

    let json_path = config.resolve(&config.output_json);
    let bin_path = config.resolve(&config.output_bin);
    let mut failures = 0;

    let spinner = create_spinner("Encoding run-length grid...");
    let start = Instant::now();
    let sparse = GridArtifact::from_grid(&spec, &grid).map(|a| {
        a.with_description(config.description.clone())
            .with_sources(sources)
    });
    match sparse.and_then(|a| artifact::write_json(&json_path, &a).map(|()| a)) {
        Ok(a) => {
            spinner.finish_with_message(format!(
                "Saved {} ({}) [{:.1}s]",
                json_path.display(),
                format_size(&json_path),
                start.elapsed().as_secs_f32()
            ));
            println!(
                "  Total land cells: {} ({:.2}%)",
                a.total_land_cells, a.land_percentage
            );
        }
        Err(e) => {
            spinner.finish_with_message(format!("Failed to write {}", json_path.display()));
            error!(path = %json_path.display(), error = %e, "sparse artifact failed");
            failures += 1;
        }
    }

    let spinner = create_spinner("Packing binary grid...");
    let start = Instant::now();
    match artifact::write_bits(&bin_path, &spec, &grid) {
        Ok(bytes) => spinner.finish_with_message(format!(
            "Saved {} ({} bytes) [{:.1}s]",
            bin_path.display(),
            bytes,
            start.elapsed().as_secs_f32()
        )),
        Err(e) => {
            spinner.finish_with_message(format!("Failed to write {}", bin_path.display()));
            error!(path = %bin_path.display(), error = %e, "binary artifact failed");
            failures += 1;
        }
    }

    println!();
    println!(
        "Done! Total time: {:.1}s",
        total_start.elapsed().as_secs_f32()
    );

    if failures > 0 {
        bail!("{} of 2 artifacts could not be written", failures);
    }

    Ok(())
}

/// Classify every available input onto a fresh grid
///
/// Returns the grid and the stems of the inputs that were actually read.
fn build(config: &FileConfig, spec: GridSpec) -> Result<(DenseGrid, Vec<String>)> {
    let mut builder = GridBuilder::new(spec);
    let mut sources = Vec::new();

    for input in &config.inputs {
        let path = config.resolve(input);
        if !path.exists() {
            warn!(path = %path.display(), "input not found, skipping");
            continue;
        }

        let spinner = create_spinner(&format!("Loading {}...", path.display()));
        let start = Instant::now();
        let source = load_shapes(&path).context(format!("Failed to load {:?}", path))?;
        let count = source.shapes.len();

        let skipped_before = builder.stats().skipped;
        builder.extend(source.shapes);
        let skipped = builder.stats().skipped - skipped_before;

        spinner.finish_with_message(format!(
            "Classified {} features from {} ({} rejected, {} skipped) [{:.1}s]",
            count,
            path.display(),
            source.rejected,
            skipped,
            start.elapsed().as_secs_f32()
        ));
        sources.push(source_name(&path));
    }

    if sources.is_empty() {
        bail!(
            "No input files found in {}. Download the Natural Earth GeoJSON files or pass --input",
            config.data_dir.display()
        );
    }

    let (grid, stats) = builder.finish();
    info!("{}", stats.summary());
    Ok((grid, sources))
}

fn source_name(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn format_size(path: &Path) -> String {
    match std::fs::metadata(path) {
        Ok(m) => format!("{:.2} MB", m.len() as f64 / (1024.0 * 1024.0)),
        Err(_) => "unknown size".to_string(),
    }
}

fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::with_template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(80));
    pb
}
