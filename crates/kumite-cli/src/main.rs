use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use kumite_core::domain::{TICK_INTERVAL_MS, format_duration};
use kumite_core::{DriverBuilder, MatchHandle, MatchSnapshot};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

mod console_sink;
mod input;
mod render;
mod setup;
mod simulate;

use console_sink::{ConsoleCueSink, SoundSwitch};
use input::{HELP, Intent, parse_line};
use setup::SetupArgs;
use simulate::{Simulation, read_script};

#[derive(Parser, Debug)]
#[command(name = "kumite", about = "WKF kumite scoreboard and match timer", version)]
struct Cli {
    #[arg(long, global = true, default_value_t = false)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Interactive scoreboard driven by a real clock.
    Run(RunArgs),
    /// Replay a command script with simulated time and print the result as JSON.
    Simulate(SimulateArgs),
}

#[derive(Args, Debug)]
struct RunArgs {
    #[command(flatten)]
    setup: SetupArgs,
    /// Start with audio cues muted.
    #[arg(long, default_value_t = false)]
    mute: bool,
    #[arg(long, env = "KUMITE_TICK_MS", default_value_t = TICK_INTERVAL_MS)]
    tick_ms: u64,
    /// Print the clock every second while it runs.
    #[arg(long, default_value_t = false)]
    live: bool,
}

#[derive(Args, Debug)]
struct SimulateArgs {
    #[command(flatten)]
    setup: SetupArgs,
    /// Script file; stdin when omitted or `-`.
    #[arg(long)]
    script: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Run(args) => run(args).await,
        Commands::Simulate(args) => simulate(args),
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose {
        "kumite=debug,kumite_core=debug"
    } else {
        "kumite=info,kumite_core=info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .try_init();
}

async fn run(args: RunArgs) -> Result<()> {
    let config = args.setup.to_config()?;
    let sound = SoundSwitch::new(!args.mute);
    let (handle, tasks) = DriverBuilder::new(config.clone())
        .tick_interval(Duration::from_millis(args.tick_ms))
        .event_sink(Arc::new(ConsoleCueSink::new(sound.clone())))
        .build()?
        .spawn();

    println!(
        "{} vs {} • {} match",
        config.aka_name(),
        config.ao_name(),
        format_duration(config.duration_ms() / 1000)
    );
    println!("{HELP}");
    println!("{}", render::status_line(&handle.latest()));

    let live = args.live.then(|| tokio::spawn(live_clock(handle.clone())));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await.context("read stdin")? {
        let intent = match parse_line(&line) {
            Ok(Some(intent)) => intent,
            Ok(None) => continue,
            Err(err) => {
                println!("? {err:#}");
                continue;
            }
        };
        let snapshot = match intent {
            Intent::Match(command) => handle.apply(command).await?,
            Intent::Status => handle.snapshot().await?,
            Intent::Setup => handle.new_match(config.clone()).await?,
            Intent::Wait(ms) => {
                tokio::time::sleep(Duration::from_millis(ms)).await;
                handle.snapshot().await?
            }
            Intent::ToggleSound => {
                let on = sound.toggle();
                println!("sound {}", if on { "on" } else { "off" });
                continue;
            }
            Intent::Help => {
                println!("{HELP}");
                continue;
            }
            Intent::Quit => break,
        };
        println!("{}", render::status_line(&snapshot));
    }

    if let Some(live) = live {
        live.abort();
    }
    drop(handle);
    tasks.join().await;
    Ok(())
}

/// Prints a status line whenever the displayed whole second changes.
async fn live_clock(handle: MatchHandle) {
    let mut updates = handle.subscribe();
    let mut last_second = None;
    while updates.changed().await.is_ok() {
        let snap: MatchSnapshot = updates.borrow_and_update().clone();
        let second = snap.remaining_ms.div_ceil(1000);
        if snap.running && last_second != Some(second) {
            println!("{}", render::status_line(&snap));
        }
        last_second = Some(second);
    }
}

fn simulate(args: SimulateArgs) -> Result<()> {
    let config = args.setup.to_config()?;
    let script = read_script(args.script.as_deref())?;
    let mut sim = Simulation::new(config);
    sim.run_script(&script)?;
    let snapshot = sim.snapshot();
    println!("{} event(s) emitted", sim.records().len());
    println!("{}", render::status_line(&snapshot));
    println!(
        "{}",
        serde_json::to_string_pretty(&snapshot).context("encode snapshot")?
    );
    Ok(())
}
