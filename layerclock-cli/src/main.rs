use std::path::{Path, PathBuf};
use std::rc::Rc;

use anyhow::{Context as _, bail};
use clap::{Parser, Subcommand};
use layerclock::{
    AnimationArchive, ClockController, ControllerOpts, ManualClock, MediaClock, Size,
    StoppedPause, TimingSnapshot,
};

#[derive(Parser, Debug)]
#[command(name = "layerclock", version)]
struct Cli {
    /// Log controller transitions to stderr.
    #[arg(long, global = true, default_value_t = false)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the tree summary and its resolved natural duration.
    Inspect(InspectArgs),
    /// Print the transform fitting the root into a viewport.
    Fit(FitArgs),
    /// Replay controller operations against a manual clock, one snapshot per line.
    Script(ScriptArgs),
}

#[derive(Parser, Debug)]
struct InspectArgs {
    /// Input archive JSON.
    #[arg(long = "in")]
    in_path: PathBuf,
}

#[derive(Parser, Debug)]
struct FitArgs {
    /// Input archive JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Viewport width.
    #[arg(long)]
    width: f64,

    /// Viewport height.
    #[arg(long)]
    height: f64,
}

#[derive(Parser, Debug)]
struct ScriptArgs {
    /// Input archive JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Comma-separated ops: play, pause, stop, seek:P, speed:R, wait:SECS.
    #[arg(long)]
    ops: String,

    /// Initial clock reading in seconds.
    #[arg(long, default_value_t = 0.0)]
    start: f64,

    /// Keep the controller stopped when pause is toggled while stopped.
    #[arg(long, default_value_t = false)]
    ignore_pause_when_stopped: bool,
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum Op {
    Play,
    Pause,
    Stop,
    Seek(f64),
    Speed(f64),
    Wait(f64),
}

fn parse_op(raw: &str) -> anyhow::Result<Op> {
    let raw = raw.trim();
    let (name, arg) = match raw.split_once(':') {
        Some((n, a)) => (n, Some(a)),
        None => (raw, None),
    };
    let num = |a: Option<&str>| -> anyhow::Result<f64> {
        let a = a.with_context(|| format!("op '{name}' needs a value (e.g. '{name}:0.5')"))?;
        a.trim()
            .parse::<f64>()
            .with_context(|| format!("op '{name}' value '{a}' is not a number"))
    };
    let op = match name {
        "play" => Op::Play,
        "pause" => Op::Pause,
        "stop" => Op::Stop,
        "seek" => Op::Seek(num(arg)?),
        "speed" => Op::Speed(num(arg)?),
        "wait" => Op::Wait(num(arg)?),
        other => bail!("unknown op '{other}'"),
    };
    Ok(op)
}

#[derive(serde::Serialize)]
struct ScriptLine<'a> {
    op: &'a str,
    now: f64,
    local_time: f64,
    #[serde(flatten)]
    timing: TimingSnapshot,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Inspect(args) => cmd_inspect(args),
        Command::Fit(args) => cmd_fit(args),
        Command::Script(args) => cmd_script(args),
    }
}

fn init_tracing(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn load(path: &Path) -> anyhow::Result<AnimationArchive> {
    AnimationArchive::from_path(path).with_context(|| format!("load archive '{}'", path.display()))
}

fn cmd_inspect(args: InspectArgs) -> anyhow::Result<()> {
    let mut root = load(&args.in_path)?.into_root();
    let duration = layerclock::resolve_duration(&mut root)?;
    let out = serde_json::json!({
        "name": root.name,
        "nodes": root.node_count(),
        "depth": root.depth(),
        "duration": duration,
        "bounds": root.bounds,
    });
    println!("{}", serde_json::to_string_pretty(&out)?);
    Ok(())
}

fn cmd_fit(args: FitArgs) -> anyhow::Result<()> {
    let root = load(&args.in_path)?.into_root();
    let fit = layerclock::fit_transform(root.bounds, Size::new(args.width, args.height))?;
    let out = serde_json::json!({
        "ratio": fit.ratio,
        "translate": [fit.translate.x, fit.translate.y],
        "affine": fit.to_affine().as_coeffs(),
    });
    println!("{}", serde_json::to_string_pretty(&out)?);
    Ok(())
}

fn cmd_script(args: ScriptArgs) -> anyhow::Result<()> {
    let ops = args
        .ops
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|raw| parse_op(raw).map(|op| (raw, op)))
        .collect::<anyhow::Result<Vec<_>>>()?;

    let root = load(&args.in_path)?.into_root();
    let clock = Rc::new(ManualClock::new(args.start));
    let opts = ControllerOpts {
        pause_when_stopped: if args.ignore_pause_when_stopped {
            StoppedPause::Ignore
        } else {
            StoppedPause::Resume
        },
    };
    let mut ctl = ClockController::with_opts(root, Rc::clone(&clock), opts)?;
    ctl.resolve_duration()?;

    for (raw, op) in ops {
        match op {
            Op::Play => ctl.play(),
            Op::Pause => ctl.pause(),
            Op::Stop => ctl.stop(),
            Op::Seek(p) => ctl.seek(p).with_context(|| format!("op '{raw}'"))?,
            Op::Speed(r) => ctl.set_speed(r).with_context(|| format!("op '{raw}'"))?,
            Op::Wait(secs) => {
                if !secs.is_finite() || secs < 0.0 {
                    bail!("op '{raw}': wait must be finite and >= 0");
                }
                clock.advance(secs);
            }
        }
        let line = ScriptLine {
            op: raw,
            now: clock.now(),
            local_time: ctl.local_time(),
            timing: ctl.snapshot(),
        };
        println!("{}", serde_json::to_string(&line)?);
    }
    Ok(())
}
