//! Ballistic Intercept headless driver
//!
//! Runs a session to completion with the seeded autopilot standing in for
//! mouse clicks. Rendering is left to whoever consumes `--snapshot`.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use clap::Parser;

use ballistic_intercept::sim::{Autopilot, Session, SessionEvent};
use ballistic_intercept::{SessionConfig, Variant};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// JSON session config (missing fields come from the variant preset)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Rule set when no config file is given (scoring, intercept)
    #[arg(long, value_parser = parse_variant, default_value = "scoring")]
    variant: Variant,

    /// Autopilot RNG seed
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Max click jitter for the autopilot (0 = perfect aim)
    #[arg(long, value_parser = parse_jitter)]
    jitter: Option<f32>,

    /// Sleep for the configured tick period between ticks
    #[arg(long)]
    realtime: bool,

    /// Give up after this many ticks
    #[arg(long, default_value_t = 100_000)]
    max_ticks: u64,

    /// Print the final snapshot as JSON
    #[arg(long)]
    snapshot: bool,
}

fn parse_variant(s: &str) -> Result<Variant, String> {
    Variant::from_str(s).ok_or_else(|| format!("unknown variant `{s}` (expected scoring or intercept)"))
}

fn parse_jitter(s: &str) -> Result<f32, String> {
    let jitter: f32 = s.parse().map_err(|e| format!("invalid jitter `{s}`: {e}"))?;
    if jitter.is_finite() && jitter >= 0.0 {
        Ok(jitter)
    } else {
        Err(format!("jitter must be a finite, non-negative number (got `{s}`)"))
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    run(&args).inspect_err(|err| {
        for line in error_chain(err.as_ref()) {
            log::error!("{line}");
        }
    })
}

/// An error and its causes, one line each
fn error_chain(err: &dyn std::error::Error) -> Vec<String> {
    let mut lines = vec![err.to_string()];
    let mut source = err.source();
    while let Some(cause) = source {
        lines.push(format!("  caused by: {cause}"));
        source = cause.source();
    }
    lines
}

fn run(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let config = match &args.config {
        Some(path) => SessionConfig::load(path)?,
        None => SessionConfig::from_variant(args.variant),
    };
    let tick_period = Duration::from_millis(config.tick_ms);

    let mut session = Session::try_new(config)?;
    let mut pilot = Autopilot::new(args.seed);
    if let Some(jitter) = args.jitter {
        pilot = pilot.with_jitter(jitter);
    }

    log::info!(
        "Ballistic Intercept ({}) starting: {} attempts, seed {}",
        session.config().variant.as_str(),
        session.attempts_max(),
        pilot.seed()
    );

    while !session.is_finished() {
        if session.time_ticks() >= args.max_ticks {
            log::warn!("Stopping after {} ticks without finishing", args.max_ticks);
            break;
        }

        let started = Instant::now();
        if let Some(point) = pilot.aim(&session) {
            session.on_launch(point);
        }

        for event in session.tick() {
            match event {
                SessionEvent::Hit { attempt, hits, .. } => match hits {
                    Some(hits) => println!("Attempt {attempt}: hit! ({hits} so far)"),
                    None => println!("Attempt {attempt}: intercepted"),
                },
                SessionEvent::Miss { attempt } => println!("Attempt {attempt}: missed"),
                SessionEvent::Finished(summary) => match summary.hits {
                    Some(hits) => println!("Game Over! You hit the target {hits} times!"),
                    None => println!("Paths: {}, path: {}", session.attempts_max(), summary.attempts),
                },
            }
        }

        if args.realtime {
            if let Some(rest) = tick_period.checked_sub(started.elapsed()) {
                std::thread::sleep(rest);
            }
        }
    }

    if args.snapshot {
        println!("{}", serde_json::to_string_pretty(&session.snapshot())?);
    }

    Ok(())
}
