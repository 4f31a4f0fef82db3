use anyhow::{Context, Result};
use clap::Parser;
use palette::Srgba;
use springcurve::color_utils::parse_color;
use springcurve::models::load_rate_trace;
use springcurve::{
    generate_svg, render_to_png, FrameDriver, MotionMode, RateSample, RenderStyle, Session,
    SimConfig, TouchEvent, TraceRecorder,
};
use std::fs;
use std::path::PathBuf;

/// Distance and speed, in pixels, under which a spring counts as at rest
const SETTLE_THRESHOLD: f64 = 0.01;

#[derive(Parser, Debug)]
#[command(name = "springcurve")]
#[command(about = "Animate a cubic Bezier curve whose interior control points follow damped springs", long_about = None)]
struct Args {
    /// JSON simulation config (stepSize, stiffness, damping, ...)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// JSON render style (colors and stroke widths)
    #[arg(long, value_name = "FILE")]
    style: Option<PathBuf>,

    /// Recorded angular-rate trace: JSON array of {"time", "rateX", "rateY"}
    #[arg(long, value_name = "FILE")]
    rate_trace: Option<PathBuf>,

    /// Touch at X,Y after SECONDS, or "up@SECONDS" to lift (repeatable)
    #[arg(long = "touch", value_name = "X,Y@SECONDS")]
    touches: Vec<TouchEvent>,

    /// Number of frames to simulate
    #[arg(short, long, default_value_t = 120)]
    frames: usize,

    /// Display refresh rate driving the simulation
    #[arg(long, default_value_t = 60.0)]
    fps: f64,

    /// Output file; .svg and .png render the final frame, .json writes the per-frame trace
    #[arg(short, long, value_name = "FILE", default_value = "springcurve.png")]
    output: PathBuf,

    /// PNG compression quality (0-100)
    #[arg(long, default_value_t = 50, value_parser = clap::value_parser!(u8).range(0..=100))]
    quality: u8,

    /// Pixel scale for PNG output
    #[arg(long, default_value_t = 1.0)]
    scale: f32,

    /// Background color for PNG output (#RRGGBB, #RRGGBBAA or "transparent")
    #[arg(long, value_parser = parse_color)]
    background: Option<Srgba<u8>>,

    /// Force the synthetic oscillator even when a rate trace is given
    #[arg(long)]
    synthetic: bool,

    /// Scale each integration step by the elapsed frame time
    #[arg(long)]
    variable_timestep: bool,
}

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => SimConfig::from_path(path)
            .with_context(|| format!("Failed to load config: {path:?}"))?,
        None => SimConfig::default(),
    };
    if args.synthetic {
        config.use_synthetic_motion = Some(true);
    }
    if args.variable_timestep {
        config.fixed_timestep = false;
    }
    config.validate().context("Invalid simulation config")?;

    let style = match &args.style {
        Some(path) => {
            let json = fs::read_to_string(path)
                .with_context(|| format!("Failed to read style file: {path:?}"))?;
            serde_json::from_str::<RenderStyle>(&json).context("Failed to parse style JSON")?
        }
        None => RenderStyle::default(),
    };

    let rate_trace: Vec<RateSample> = match &args.rate_trace {
        Some(path) => load_rate_trace(path)
            .with_context(|| format!("Failed to load rate trace: {path:?}"))?,
        None => Vec::new(),
    };
    let rate_available = !rate_trace.is_empty();

    let mut session = Session::new(&config, rate_available)?;
    if session.mode() == MotionMode::Synthetic
        && config.use_synthetic_motion != Some(true)
        && !rate_available
    {
        log::warn!("No angular-rate source available; falling back to synthetic motion");
    }
    log::info!(
        "Simulating {} frames at {} fps ({:?} motion)",
        args.frames,
        args.fps,
        session.mode()
    );

    let mut driver = FrameDriver::new(args.fps)?
        .with_rate_trace(&rate_trace)
        .with_touches(&args.touches);

    let extension = args
        .output
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or("png")
        .to_lowercase();
    let keep_trace = extension == "json";

    let mut recorder = TraceRecorder::new(keep_trace);
    driver.run(&mut session, args.frames, &mut recorder)?;
    let (trace, last_frame) = recorder.into_parts();

    let pending = driver.pending_inputs();
    if pending > 0 {
        log::warn!("{pending} scripted inputs fall after the last frame and were not delivered");
    }
    if session
        .springs()
        .iter()
        .all(|spring| spring.is_settled(SETTLE_THRESHOLD))
    {
        log::info!("Both springs settled on their targets");
    } else {
        log::debug!("Springs still moving after the last frame");
    }

    let frame = match last_frame {
        Some(frame) => frame,
        None => session.render_frame(),
    };

    match extension.as_str() {
        "svg" => {
            let svg_content = generate_svg(&frame, &style);
            fs::write(&args.output, svg_content)
                .with_context(|| format!("Failed to write SVG file: {:?}", args.output))?;
        }
        "json" => {
            let json = serde_json::to_string_pretty(&trace).context("Failed to serialize trace")?;
            fs::write(&args.output, json)
                .with_context(|| format!("Failed to write trace file: {:?}", args.output))?;
        }
        _ => {
            render_to_png(
                &frame,
                &style,
                &args.output,
                args.background,
                args.quality,
                args.scale,
            )
            .with_context(|| format!("Failed to render PNG: {:?}", args.output))?;
        }
    }

    log::info!(
        "Wrote {} after {} ticks",
        args.output.display(),
        session.ticks()
    );

    Ok(())
}
