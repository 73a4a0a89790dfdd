//! Headless tour runner: builds the island, replays a scripted tour on a
//! simulated clock and logs every stop it visits.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use isle::tour::{parse_script, TourRunner};
use isle::{IsleEngine, IsleError, LogPanel, Options, Timeline};
use web_time::{Duration, Instant};

#[derive(Parser)]
#[command(name = "isle")]
#[command(about = "Headless island timeline tour")]
struct Cli {
    /// TOML options preset
    #[arg(long)]
    options: Option<PathBuf>,

    /// TOML timeline file (defaults to the bundled timeline)
    #[arg(long)]
    timeline: Option<PathBuf>,

    /// Tour steps, e.g. "next,next,goto:7,click:640:360,wait:500"
    #[arg(long, default_value = "")]
    script: String,

    /// Simulated frames per second
    #[arg(long, default_value = "60")]
    fps: u32,

    /// Seconds to keep running after the script finishes
    #[arg(long, default_value = "3")]
    seconds: f64,

    /// Fixed RNG seed for the island layout
    #[arg(long)]
    seed: Option<u64>,

    /// Print the options JSON schema and exit
    #[arg(long)]
    dump_schema: bool,
}

fn run(cli: Cli) -> Result<(), IsleError> {
    if cli.dump_schema {
        let schema = serde_json::to_string_pretty(&Options::json_schema())
            .map_err(|e| IsleError::OptionsParse(e.to_string()))?;
        log::info!("options schema:\n{schema}");
        return Ok(());
    }

    let mut options = match &cli.options {
        Some(path) => Options::load(path)?,
        None => Options::default(),
    };
    if cli.seed.is_some() {
        options.scene.seed = cli.seed;
    }

    let ring = options.scene.ring();
    let timeline = match &cli.timeline {
        Some(path) => Timeline::load(path, ring)?,
        None => Timeline::builtin(ring)?,
    };
    let steps = parse_script(&cli.script)?;

    let origin = Instant::now();
    let mut engine = IsleEngine::new(options, timeline, origin);
    let mut panel = LogPanel;
    let mut runner = TourRunner::new(cli.fps, origin);

    runner.run(&mut engine, &mut panel, &steps);
    let tail = Duration::try_from_secs_f64(cli.seconds.max(0.0))
        .map_err(|e| IsleError::Script(format!("bad --seconds: {e}")))?;
    runner.run_for(&mut engine, &mut panel, tail);

    if let Some(frame) = runner.last_frame() {
        log::info!(
            "tour finished after {} frames at stop {} (eye {:.2?})",
            runner.frames(),
            frame.current_index,
            frame.pose.eye
        );
    }
    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("info"),
    )
    .init();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}
