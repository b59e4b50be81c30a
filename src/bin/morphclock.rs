use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "morphclock", version)]
struct Cli {
    /// Print engine diagnostics to stderr.
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a single clock frame as SVG.
    Frame(FrameArgs),
    /// Check that the built-in font covers the configured format.
    Validate(ValidateArgs),
}

#[derive(Parser, Debug)]
struct FrameArgs {
    /// Wall-clock time, `HH:MM:SS` or `HH:MM:SS.mmm`.
    #[arg(long)]
    time: String,

    /// Canvas width in pixels.
    #[arg(long, default_value_t = 640.0)]
    width: f64,

    /// Canvas height in pixels.
    #[arg(long, default_value_t = 200.0)]
    height: f64,

    /// Output SVG path.
    #[arg(long)]
    out: PathBuf,

    /// Clock configuration JSON.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct ValidateArgs {
    /// Clock configuration JSON.
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    if cli.verbose {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_writer(std::io::stderr)
            .init();
    }
    match cli.cmd {
        Command::Frame(args) => cmd_frame(args),
        Command::Validate(args) => cmd_validate(args),
    }
}

fn read_config(path: Option<&Path>) -> anyhow::Result<morphclock::ClockConfig> {
    match path {
        Some(p) => morphclock::ClockConfig::from_path(p)
            .with_context(|| format!("load config '{}'", p.display())),
        None => Ok(morphclock::ClockConfig::default()),
    }
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let config = read_config(args.config.as_deref())?;
    let time: morphclock::ClockInstant = args
        .time
        .parse()
        .with_context(|| format!("parse --time '{}'", args.time))?;
    if !(args.width > 0.0 && args.height > 0.0) {
        anyhow::bail!("canvas size must be positive (got {}x{})", args.width, args.height);
    }

    let font = morphclock::segment_font().context("build reference font")?;
    let mut driver = morphclock::ClockDriver::with_config(font, &config)?;
    let size = morphclock::Size::new(args.width, args.height);
    driver.set_constraints(size);

    // Warm the state machines over the preceding second.
    let start = morphclock::ClockInstant(time.as_millis().saturating_sub(1_000));
    let mut now = start;
    while now < time {
        driver.update(now);
        now = now.plus_millis(16);
    }
    driver.update(time);

    let mut scene = morphclock::SceneRecorder::new();
    driver.render(&mut scene);
    let svg = morphclock::to_svg(scene.ops(), &config.palette, size).context("serialize frame")?;
    std::fs::write(&args.out, svg).with_context(|| format!("write '{}'", args.out.display()))?;

    eprintln!(
        "wrote {} ({} glyphs, {} draw ops)",
        args.out.display(),
        driver.frame().glyphs.len(),
        scene.ops().len()
    );
    Ok(())
}

fn cmd_validate(args: ValidateArgs) -> anyhow::Result<()> {
    let config = read_config(args.config.as_deref())?;
    let font = morphclock::build_segment_font(&[config.format]).context("validate reference font")?;
    let reachable = config.format.reachable();
    println!(
        "font '{}' covers {:?}: {} characters, {} reachable transitions ({} defined)",
        font.name(),
        config.format,
        reachable.chars.len(),
        reachable.transitions.len(),
        font.transition_count()
    );
    Ok(())
}
