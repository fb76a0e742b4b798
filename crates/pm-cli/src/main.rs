use std::fs;
use std::path::{Path, PathBuf};

use ab_glyph::FontArc;
use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use pick_metrology::{
    FileSink, FrameSource, ImageSequenceSource, MaskParams, ScheduledController, Session,
    SessionConfig, SpacingEstimator, run,
};

#[derive(Parser, Debug)]
#[command(name = "pick_meter")]
#[command(about = "Measure pick heights and spacing on a rotating cutting drum")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Play a frame sequence and write measurement reports.
    Measure(MeasureArgs),
    /// Run the spacing estimator on explicit x-positions.
    Spacing(SpacingArgs),
    /// Print the default configuration as JSON.
    PrintConfig,
}

#[derive(Args, Debug, Clone)]
struct MeasureArgs {
    /// Directory of frames, played back in file-name order.
    #[arg(long, required = true)]
    frames: PathBuf,
    #[arg(long, default_value_t = 30.0)]
    fps: f64,
    #[arg(long, default_value = "Outputs")]
    out: PathBuf,
    /// JSON session configuration; missing fields keep their defaults.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Brightness offset, 0-100.
    #[arg(long)]
    brightness: Option<u8>,
    /// Binary threshold, 0-255.
    #[arg(long)]
    threshold: Option<u8>,
    /// Measure on the first frame at or after this time. Repeatable.
    #[arg(long = "measure-at-ms")]
    measure_at_ms: Vec<f64>,
    /// Playback passes before stopping; 0 loops forever.
    #[arg(long, default_value_t = 1)]
    passes: usize,
    /// TrueType/OpenType font for annotation labels.
    #[arg(long)]
    font: Option<PathBuf>,
    #[arg(long)]
    frame_wait_ms: Option<u64>,
}

#[derive(Args, Debug, Clone)]
struct SpacingArgs {
    /// Tip x-position, working pixels. Repeatable.
    #[arg(long = "x", required = true)]
    xs: Vec<i32>,
    /// Lattice extent; defaults to just past the rightmost tip.
    #[arg(long)]
    width: Option<i32>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Measure(args) => run_measure(args),
        Command::Spacing(args) => run_spacing(&args),
        Command::PrintConfig => {
            let json = serde_json::to_string_pretty(&SessionConfig::default())
                .context("serializing default configuration")?;
            println!("{json}");
            Ok(())
        }
    }
}

fn run_measure(args: MeasureArgs) -> Result<()> {
    let config = build_config(&args)?;

    let mut source = ImageSequenceSource::open(&args.frames, args.fps)
        .with_context(|| format!("opening frames in {}", args.frames.display()))?;

    let mut sink = FileSink::new(&args.out, source.base_name());
    if let Some(path) = &args.font {
        sink = sink.with_font(load_font(path)?);
    } else {
        tracing::warn!("no --font given; annotation labels are skipped");
    }

    let mut controller = ScheduledController::new(args.passes).measure_at(args.measure_at_ms);
    let mut session = Session::new(config);

    let summary = run(&mut session, &mut source, &mut controller, &mut sink)
        .context("processing frame sequence")?;

    for paths in sink.written() {
        println!("report: {}", paths.report.display());
        println!("image:  {}", paths.image.display());
    }
    println!(
        "{} frame(s), {} pass(es), {} measurement(s)",
        summary.frames, summary.passes, summary.measurements
    );
    Ok(())
}

fn build_config(args: &MeasureArgs) -> Result<SessionConfig> {
    let mut config = match &args.config {
        Some(path) => read_json(path)?,
        None => SessionConfig::default(),
    };

    let brightness = args.brightness.unwrap_or(config.params.brightness);
    if brightness > MaskParams::MAX_BRIGHTNESS {
        tracing::warn!(
            "brightness {brightness} clamped to {}",
            MaskParams::MAX_BRIGHTNESS
        );
    }
    let threshold = args.threshold.unwrap_or(config.params.threshold);
    config.params = MaskParams::new(brightness, threshold);

    if let Some(ms) = args.frame_wait_ms {
        config.frame_wait_ms = ms;
    }
    if config.tips.scale < 1 {
        bail!("tips.scale must be at least 1, got {}", config.tips.scale);
    }
    Ok(config)
}

fn run_spacing(args: &SpacingArgs) -> Result<()> {
    let est = SpacingEstimator::default();
    let width = args.width.unwrap_or_else(|| {
        let right = args.xs.iter().copied().max().unwrap_or(0);
        right.saturating_add(1)
    });

    let s = est.estimate(&args.xs, width);
    println!("spacings:          {:?}", s.spacings);
    println!("median / MAD:      {} / {}", s.median, s.mad);
    println!("filtered spacings: {:?}", s.filtered_spacings);
    println!("average spacing:   {} px", s.average_spacing);
    println!("lattice:           {:?}", s.lattice);
    if let Some(why) = s.shortfall {
        println!("no lattice:        {why:?}");
    }
    Ok(())
}

fn load_font(path: &Path) -> Result<FontArc> {
    let bytes = fs::read(path).with_context(|| format!("reading font {}", path.display()))?;
    FontArc::try_from_vec(bytes).with_context(|| format!("parsing font {}", path.display()))
}

fn read_json(path: &Path) -> Result<SessionConfig> {
    let data = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_slice(&data).with_context(|| format!("parsing json {}", path.display()))
}
