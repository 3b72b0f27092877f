//! stlquote CLI - STL analysis and 3D print quoting
//!
//! Reads an STL file, reports its geometry and estimates what it costs to
//! print.
//!
//! # Logging
//!
//! `RUST_LOG` takes precedence. Otherwise `-v` enables info, `-vv` debug
//! and `-vvv` trace output from the stlquote crates. Logs go to stderr.
//!
//! ```bash
//! stlquote estimate part.stl --material petg --layer-height 0.12
//! RUST_LOG=stlquote_stl=debug stlquote info part.stl --format json
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use stlquote::{
    encode_binary, snap_layer_height, DecodedModel, Diagnosis, FileContext, MaterialProfile,
    ModelReport, PipelineConfig,
};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "stlquote")]
#[command(author, version, about = "STL analysis and 3D print quoting", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format for results
    #[arg(long, global = true, default_value = "text")]
    format: OutputFormat,

    /// Suppress all non-error output
    #[arg(long, short, global = true)]
    quiet: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(long, short, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Human-readable text
    Text,
    /// JSON for scripting
    Json,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Material {
    Pla,
    Petg,
    Abs,
}

impl Material {
    fn profile(self) -> MaterialProfile {
        match self {
            Material::Pla => MaterialProfile::pla(),
            Material::Petg => MaterialProfile::petg(),
            Material::Abs => MaterialProfile::abs(),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Show geometry of an STL file
    Info {
        /// Input STL file
        file: PathBuf,
    },
    /// Estimate print time, material and cost
    Estimate {
        /// Input STL file
        file: PathBuf,
        /// Layer height (mm)
        #[arg(long)]
        layer_height: Option<f64>,
        /// Filament material
        #[arg(long, short)]
        material: Option<Material>,
        /// Electricity price (USD per kWh)
        #[arg(long)]
        price_per_kwh: Option<f64>,
        /// TOML configuration file
        #[arg(long, short)]
        config: Option<PathBuf>,
    },
    /// Find overhanging triangles
    Overhangs {
        /// Input STL file
        file: PathBuf,
        /// Normal Z below minus this value marks an overhang
        #[arg(long, default_value = "0.15")]
        threshold: f64,
        /// Write the overhang triangles to this binary STL
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Snap a layer height for a target layer count
    LayerHeight {
        /// Model height (mm)
        #[arg(long)]
        height: f64,
        /// Desired number of layers
        #[arg(long)]
        layers: u32,
    },
}

fn init_tracing(verbose: u8, quiet: bool) {
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        let level = match (quiet, verbose) {
            (true, _) => "error",
            (false, 0) => "warn",
            (false, 1) => "stlquote=info,stlquote_stl=info,stlquote_mesh=info,stlquote_estimate=info",
            (false, 2) => "stlquote=debug,stlquote_stl=debug,stlquote_mesh=debug,stlquote_estimate=debug",
            _ => "trace",
        };
        EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).compact())
        .with(filter)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    match &cli.command {
        Commands::Info { file } => show_info(file, &cli),
        Commands::Estimate {
            file,
            layer_height,
            material,
            price_per_kwh,
            config,
        } => {
            let config = build_config(config.as_deref(), *layer_height, *material, *price_per_kwh)?;
            show_estimate(file, &config, &cli)
        }
        Commands::Overhangs {
            file,
            threshold,
            output,
        } => show_overhangs(file, *threshold, output.as_deref(), &cli),
        Commands::LayerHeight { height, layers } => show_layer_height(*height, *layers, &cli),
    }
}

/// Merge a config file with command-line overrides.
fn build_config(
    path: Option<&Path>,
    layer_height: Option<f64>,
    material: Option<Material>,
    price_per_kwh: Option<f64>,
) -> Result<PipelineConfig> {
    let mut config = match path {
        Some(path) => PipelineConfig::load(path)?,
        None => PipelineConfig::default(),
    };
    if let Some(lh) = layer_height {
        config.estimate.layer_height_mm = lh;
    }
    if let Some(m) = material {
        config.estimate.material = m.profile();
    }
    if let Some(price) = price_per_kwh {
        config.estimate.price_per_kwh = price;
    }
    config.validate()?;
    Ok(config)
}

fn load(file: &Path) -> Result<(DecodedModel, u64)> {
    let bytes = fs::read(file).with_context(|| format!("Failed to read {}", file.display()))?;
    let model = DecodedModel::decode(&bytes)
        .with_context(|| format!("Failed to decode {}", file.display()))?;
    info!(
        file = %file.display(),
        format = %model.format,
        triangles = model.soup.num_triangles(),
        "loaded model"
    );
    Ok((model, bytes.len() as u64))
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn file_name(file: &Path) -> String {
    file.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| file.display().to_string())
}

fn show_info(file: &Path, cli: &Cli) -> Result<()> {
    let (model, size) = load(file)?;
    let report = model.report(&PipelineConfig::default())?;

    if cli.quiet {
        return Ok(());
    }
    match cli.format {
        OutputFormat::Json => print_json(&report),
        OutputFormat::Text => {
            println!("{}", FileContext::from_report(file_name(file), size, &report));
            println!("Format: {}", report.format);
            println!("Degenerate triangles: {}", report.degenerate_triangles);
            if let Some(b) = report.bounds {
                println!(
                    "Bounds: ({:.2}, {:.2}, {:.2}) to ({:.2}, {:.2}, {:.2})",
                    b.min[0], b.min[1], b.min[2], b.max[0], b.max[1], b.max[2]
                );
            }
            println!("Volume: {:.2} mm³", report.volume_mm3);
            println!("Surface area: {:.2} mm²", report.surface_area_mm2);
            Ok(())
        }
    }
}

fn show_estimate(file: &Path, config: &PipelineConfig, cli: &Cli) -> Result<()> {
    let (model, _) = load(file)?;
    let report = model.report(config)?;

    if cli.quiet {
        return Ok(());
    }
    match cli.format {
        OutputFormat::Json => print_json(&report),
        OutputFormat::Text => {
            print_estimate(&report);
            Ok(())
        }
    }
}

fn print_estimate(report: &ModelReport) {
    let est = &report.estimate;
    let d = report.dimensions;

    println!("Dimensions: {:.2} x {:.2} x {:.2} mm", d.width, d.depth, d.height);
    println!("Material: {}", est.material);
    println!("Layer height: {} mm ({} layers)", est.layer_height_mm, est.total_layers);
    println!("Print time: ~{} min", est.print_time_minutes);
    println!("Volume: {:.2} cm³", est.volume_cm3);
    println!("Weight: {:.2} g", est.weight_grams);
    println!("Filament: {:.2} m", est.filament_meters);
    if est.support.is_needed() {
        println!(
            "Support: {:.2} g {} ({} overhanging faces)",
            est.support.weight_grams, est.support.material, est.overhang_count
        );
    } else {
        println!("Support: none");
    }
    println!("Cost: ${:.2}", est.cost);

    match report.diagnosis() {
        Diagnosis::Ready => {}
        _ => println!("\n{}", report.user_message()),
    }
}

#[derive(Serialize)]
struct OverhangSummary {
    triangles: usize,
    overhangs: usize,
    threshold: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    output: Option<String>,
}

fn show_overhangs(file: &Path, threshold: f64, output: Option<&Path>, cli: &Cli) -> Result<()> {
    let config = PipelineConfig {
        overhang_threshold: threshold,
        ..Default::default()
    };
    config.validate()?;

    let (model, _) = load(file)?;
    let overhangs = model.overhang_soup(threshold);

    if let Some(out) = output {
        let bytes = encode_binary(&overhangs, "stlquote overhangs");
        fs::write(out, bytes).with_context(|| format!("Failed to write {}", out.display()))?;
        info!(file = %out.display(), triangles = overhangs.num_triangles(), "wrote overhangs");
    }

    if cli.quiet {
        return Ok(());
    }
    let summary = OverhangSummary {
        triangles: model.soup.num_triangles(),
        overhangs: overhangs.num_triangles(),
        threshold,
        output: output.map(|p| p.display().to_string()),
    };
    match cli.format {
        OutputFormat::Json => print_json(&summary),
        OutputFormat::Text => {
            println!(
                "{} of {} triangles overhang (threshold {})",
                summary.overhangs, summary.triangles, summary.threshold
            );
            if let Some(out) = &summary.output {
                println!("Exported overhangs to {out}");
            }
            Ok(())
        }
    }
}

#[derive(Serialize)]
struct LayerHeightSummary {
    height_mm: f64,
    desired_layers: u32,
    layer_height_mm: f64,
}

fn show_layer_height(height: f64, layers: u32, cli: &Cli) -> Result<()> {
    anyhow::ensure!(height.is_finite() && height >= 0.0, "height must be a non-negative number");

    let summary = LayerHeightSummary {
        height_mm: height,
        desired_layers: layers,
        layer_height_mm: snap_layer_height(height, layers),
    };
    if cli.quiet {
        return Ok(());
    }
    match cli.format {
        OutputFormat::Json => print_json(&summary),
        OutputFormat::Text => {
            println!("{} mm", summary.layer_height_mm);
            Ok(())
        }
    }
}
