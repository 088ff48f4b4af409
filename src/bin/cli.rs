//! Command-line tools for the face stroke pipeline.
//!
//! Usage:
//!   face-strokes render <recording.json>              # Human-readable stroke summary
//!   face-strokes render <recording.bin> --json        # JSON strokes per frame
//!   face-strokes extract <frame.raw> -W 640 -H 480 -o gray.png

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use clap::{Parser, Subcommand};
use face_strokes::{CurveCollection, FaceOverlay, LumaExtractor, OverlayConfig, Recording, StrokeShape};
use log::{info, warn};
use serde::Serialize;

#[derive(Parser, Debug)]
#[command(name = "face-strokes")]
#[command(author, version, about = "Facial landmark to vector stroke tools", long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Show verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Replay recorded tracker snapshots through the overlay
    Render {
        /// Recording file (.json or .bin)
        #[arg(required = true)]
        recording: PathBuf,

        /// Overlay configuration (JSON)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Output as JSON
        #[arg(short, long)]
        json: bool,

        /// Multiply output points by this factor (e.g. 1/frame height)
        #[arg(long)]
        normalize: Option<f32>,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Convert a raw packed luma/chroma frame to a square grayscale PNG
    Extract {
        /// Raw frame file, two bytes per pixel
        #[arg(required = true)]
        input: PathBuf,

        /// Frame width in pixels
        #[arg(short = 'W', long, default_value = "640")]
        width: u32,

        /// Frame height in pixels
        #[arg(short = 'H', long, default_value = "480")]
        height: u32,

        /// PNG output path
        #[arg(short, long, default_value = "gray.png")]
        output: PathBuf,
    },
}

/// One replayed frame for JSON serialization
#[derive(Serialize)]
struct FrameOutput {
    timestamp_ms: u64,
    found: bool,
    strokes: CurveCollection,
}

fn main() {
    let args = Args::parse();

    let level = if args.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let result = match args.command {
        Command::Render {
            recording,
            config,
            json,
            normalize,
            output,
        } => render(&recording, config.as_deref(), json, normalize, output.as_deref()),
        Command::Extract {
            input,
            width,
            height,
            output,
        } => extract(&input, width, height, &output),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn render(
    recording_path: &Path,
    config_path: Option<&Path>,
    json: bool,
    normalize: Option<f32>,
    output_path: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = match config_path {
        Some(path) => {
            info!("Loading config from {:?}", path);
            OverlayConfig::load(path)?
        }
        None => OverlayConfig::default(),
    };

    info!("Loading recording {:?}", recording_path);
    let recording = Recording::load(recording_path)?;
    if recording.frames.is_empty() {
        warn!("Recording {:?} has no frames", recording_path);
    }

    let mut overlay = FaceOverlay::new(config);
    let start = Instant::now();
    let mut frames = Vec::with_capacity(recording.frames.len());

    for snapshot in &recording.frames {
        let now = start + Duration::from_millis(snapshot.timestamp_ms);
        let mut strokes = CurveCollection::new();
        overlay.draw_at(snapshot, &mut strokes, now);
        if let Some(scale) = normalize {
            strokes = strokes.normalized(scale);
        }
        frames.push(FrameOutput {
            timestamp_ms: snapshot.timestamp_ms,
            found: snapshot.found,
            strokes,
        });
    }
    info!("Rendered {} frame(s)", frames.len());

    let output_str = if json {
        serde_json::to_string_pretty(&frames)?
    } else {
        format_human_readable(&frames)
    };

    if let Some(path) = output_path {
        std::fs::write(path, &output_str)?;
        info!("Output written to {:?}", path);
    } else {
        println!("{}", output_str);
    }

    Ok(())
}

fn extract(
    input: &Path,
    width: u32,
    height: u32,
    output: &Path,
) -> Result<(), Box<dyn std::error::Error>> {
    let extractor = LumaExtractor::new(width, height)?;
    let packed = std::fs::read(input)?;
    if packed.len() > extractor.input_len() {
        warn!(
            "{:?} holds {} bytes, using the first {}",
            input,
            packed.len(),
            extractor.input_len()
        );
    }

    let gray = extractor.extract_new(&packed)?;
    let side = extractor.output_size();
    let buffer = image::GrayImage::from_raw(side, side, gray.into_raw())
        .ok_or("Extracted buffer does not match output size")?;
    buffer.save(output)?;
    info!("Wrote {}x{} grayscale frame to {:?}", side, side, output);

    Ok(())
}

fn format_human_readable(frames: &[FrameOutput]) -> String {
    let mut s = String::new();

    s.push_str(&format!("Frames: {}\n", frames.len()));

    for frame in frames {
        s.push_str(&format!("\n--- {} ms ---\n", frame.timestamp_ms));
        if !frame.found {
            s.push_str("No face.\n");
            continue;
        }
        for stroke in &frame.strokes.strokes {
            let form = match stroke.shape {
                StrokeShape::Polyline(ref poly) if poly.closed => "closed",
                StrokeShape::Polyline(_) => "open",
                StrokeShape::Segments(_) => "segments",
            };
            s.push_str(&format!(
                "  {:<14} {:>3} points ({})\n",
                format!("{:?}", stroke.kind),
                stroke.point_count(),
                form
            ));
        }
    }

    s
}
