use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use armvision::core::MarkerColor;
use armvision::io::{frame_view, load_frame, save_mask};
use armvision::joints::JointVector;
use armvision::{Pipeline, PipelineConfig, PipelineError};
use clap::{ArgAction, Parser};
use serde::Serialize;

#[cfg(not(feature = "tracing"))]
use log::{error, info, warn};
#[cfg(feature = "tracing")]
use tracing::{error, info, warn};

#[derive(Parser, Debug)]
#[command(
    name = "armvision",
    version,
    about = "Estimate arm joint displacements and the target position from camera frames"
)]
struct Cli {
    /// Pipeline config (JSON). Built-in defaults are used when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Reference image for the target, overriding the config.
    #[arg(long)]
    reference: Option<PathBuf>,

    /// Write the JSON report here instead of stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Write the per-color masks of every frame as PNG files into this directory.
    #[arg(long)]
    mask_dir: Option<PathBuf>,

    /// JSON log lines (with the `tracing` feature).
    #[arg(long)]
    json_log: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// Frame images, processed in order.
    #[arg(required = true)]
    frames: Vec<PathBuf>,
}

#[derive(Debug, Serialize)]
struct FrameReport {
    frame: String,
    joints: JointVector,
    target: Option<[f64; 2]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    target_error: Option<String>,
    degenerate: bool,
    missing: Vec<MarkerColor>,
}

#[derive(Debug, Serialize)]
struct SkippedFrame {
    frame: String,
    error: String,
}

#[derive(Debug, Serialize)]
struct Report {
    config_path: Option<String>,
    reference_image: String,
    frames: Vec<FrameReport>,
    skipped: Vec<SkippedFrame>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    #[cfg(not(feature = "tracing"))]
    {
        let level = armvision::core::level_from_verbosity(cli.verbose);
        if let Err(err) = armvision::core::init_with_level(level) {
            eprintln!("failed to install logger: {err}");
        }
        if cli.json_log {
            warn!("--json-log needs the `tracing` feature, using plain log lines");
        }
    }
    #[cfg(feature = "tracing")]
    armvision::core::init_tracing(cli.json_log);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err}");
            ExitCode::FAILURE
        }
    }
}

#[cfg_attr(feature = "tracing", tracing::instrument(level = "info", skip(cli)))]
fn run(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let mut cfg = match &cli.config {
        Some(path) => PipelineConfig::from_json_file(path)?,
        None => PipelineConfig::default(),
    };
    if let Some(reference) = &cli.reference {
        cfg.reference_image = reference.clone();
    }

    let pipeline = Pipeline::from_config(&cfg)?;
    if let Some(dir) = &cli.mask_dir {
        fs::create_dir_all(dir)?;
    }

    let mut report = Report {
        config_path: cli.config.as_ref().map(|p| p.display().to_string()),
        reference_image: cfg.reference_image.display().to_string(),
        frames: Vec::with_capacity(cli.frames.len()),
        skipped: Vec::new(),
    };

    for path in &cli.frames {
        match process_frame(&pipeline, path, cli.mask_dir.as_deref()) {
            Ok(frame) => report.frames.push(frame),
            Err(err) if err.is_frame_local() => {
                warn!("skipping {}: {err}", path.display());
                report.skipped.push(SkippedFrame {
                    frame: path.display().to_string(),
                    error: err.to_string(),
                });
            }
            Err(err) => return Err(err.into()),
        }
    }
    info!(
        "processed {} frame(s), skipped {}",
        report.frames.len(),
        report.skipped.len()
    );

    write_report(cli.output.as_deref(), &report)
}

fn process_frame(
    pipeline: &Pipeline,
    path: &Path,
    mask_dir: Option<&Path>,
) -> Result<FrameReport, PipelineError> {
    let img = load_frame(path)?;
    let result = pipeline.process_image(&img)?;
    let missing = result.estimate.missing();
    if !missing.is_empty() {
        warn!("{}: markers not visible: {missing:?}", path.display());
    }

    if let Some(dir) = mask_dir {
        dump_masks(pipeline, &img, path, dir)?;
    }

    Ok(FrameReport {
        frame: path.display().to_string(),
        joints: result.joints,
        target: result.target,
        target_error: result.target_error.as_ref().map(ToString::to_string),
        degenerate: result.is_degenerate(),
        missing,
    })
}

fn dump_masks(
    pipeline: &Pipeline,
    img: &image::RgbImage,
    path: &Path,
    dir: &Path,
) -> Result<(), PipelineError> {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "frame".to_string());
    let frame = frame_view(img)?;
    for (color, mask) in pipeline.masks(&frame) {
        let out = dir.join(format!("{stem}_{}.png", color.name()));
        if let Err(err) = save_mask(&mask, &out) {
            warn!("failed to write {}: {err}", out.display());
        }
    }
    Ok(())
}

fn write_report(path: Option<&Path>, report: &Report) -> Result<(), Box<dyn std::error::Error>> {
    let json = serde_json::to_string_pretty(report)?;
    match path {
        Some(path) => {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(path, json)?;
            info!("wrote report to {}", path.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}
