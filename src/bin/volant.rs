use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use volant::{AnimatorConfig, FlightPath, MockSurface, ViewportAnimator, WingFrame};

#[derive(Parser, Debug)]
#[command(name = "volant", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Evaluate a single pose and print it as JSON.
    Pose(PoseArgs),
    /// Step the full animator and print one JSON line per frame.
    Simulate(SimulateArgs),
    /// Parse and validate a config file.
    Validate(ValidateArgs),
}

#[derive(Parser, Debug)]
struct PoseArgs {
    /// Tuning config JSON; defaults apply when omitted.
    #[arg(long = "in")]
    in_path: Option<PathBuf>,

    /// Elapsed time in seconds.
    #[arg(long, default_value_t = 0.0)]
    time: f64,

    /// Scroll progress in [0, 1].
    #[arg(long, default_value_t = 0.0)]
    scroll: f64,

    /// Window width in px (selects the breakpoint side).
    #[arg(long, default_value_t = 1280.0)]
    width: f64,
}

#[derive(Parser, Debug)]
struct SimulateArgs {
    /// Tuning config JSON; defaults apply when omitted.
    #[arg(long = "in")]
    in_path: Option<PathBuf>,

    /// Number of animation callbacks to step through.
    #[arg(long, default_value_t = 120)]
    frames: u64,

    /// Milliseconds between callbacks.
    #[arg(long, default_value_t = 16.0)]
    dt: f64,

    /// Scroll progress ramped to linearly over the run.
    #[arg(long, default_value_t = 1.0)]
    scroll_to: f64,
}

#[derive(Parser, Debug)]
struct ValidateArgs {
    /// Config JSON to check.
    #[arg(long = "in")]
    in_path: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::Pose(args) => cmd_pose(args),
        Command::Simulate(args) => cmd_simulate(args),
        Command::Validate(args) => cmd_validate(args),
    }
}

fn read_config_json(path: Option<&Path>) -> anyhow::Result<AnimatorConfig> {
    let Some(path) = path else {
        return Ok(AnimatorConfig::default());
    };
    let f = File::open(path).with_context(|| format!("open config '{}'", path.display()))?;
    let r = BufReader::new(f);
    let config: AnimatorConfig =
        serde_json::from_reader(r).with_context(|| "parse config JSON")?;
    config.validate()?;
    Ok(config)
}

fn cmd_pose(args: PoseArgs) -> anyhow::Result<()> {
    let config = read_config_json(args.in_path.as_deref())?;
    let path = FlightPath::new(config.flight);
    let pose = path.pose(args.time, args.scroll, args.width);

    let toggles = (args.time * 1000.0 / config.flap.interval_ms).floor() as u64;
    let wing = if toggles % 2 == 0 {
        WingFrame::Up
    } else {
        WingFrame::Down
    };

    let out = serde_json::json!({
        "wing": wing,
        "pose": pose,
        "css": pose.to_css_transform(),
    });
    println!("{}", serde_json::to_string_pretty(&out)?);
    Ok(())
}

fn cmd_simulate(args: SimulateArgs) -> anyhow::Result<()> {
    let config = read_config_json(args.in_path.as_deref())?;
    let mut animator = ViewportAnimator::new(config, Vec::new())?;
    let mut surface = MockSurface::new();

    animator.start(&mut surface);

    let max_scroll = surface.metrics.max_scroll();
    let denom = args.frames.saturating_sub(1).max(1) as f64;
    for i in 0..args.frames {
        let t_ms = i as f64 * args.dt;
        let ramp = i as f64 / denom;
        surface.scroll_y = max_scroll * args.scroll_to.clamp(0.0, 1.0) * ramp;
        animator.on_frame(t_ms, &mut surface);

        let line = serde_json::json!({
            "frame": i,
            "t_ms": t_ms,
            "wing": animator.wing_frame(),
            "pose": surface.last_pose(),
        });
        println!("{line}");
    }
    Ok(())
}

fn cmd_validate(args: ValidateArgs) -> anyhow::Result<()> {
    read_config_json(Some(&args.in_path))?;
    println!("ok: {}", args.in_path.display());
    Ok(())
}
