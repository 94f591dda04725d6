use clap::{Parser, Subcommand};
use fortuna_core::config::WheelConfig;
use fortuna_core::control::{self, Command};
use fortuna_core::item::ItemConfig;
use fortuna_core::{Wheel, WheelEvent};
use std::cell::Cell;
use std::io::Write;
use std::os::unix::net::UnixStream;
use std::rc::Rc;

const SIMULATION_STEP: f64 = 1.0 / 60.0;
const SIMULATION_LIMIT_SECS: f64 = 600.0;

#[derive(Parser, Debug)]
#[command(name = "fortunactl", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug, Clone)]
enum Commands {
    /// Spin the running wheel. Negative impulses spin anticlockwise.
    Spin {
        #[arg(allow_hyphen_values = true)]
        impulse: f64,
    },
    /// Stop the running wheel where it is
    Stop,
    /// Make the running wheel re-read its config file
    Reload,
    /// Spin a wheel offline and report where it stops
    Simulate {
        #[arg(allow_hyphen_values = true)]
        impulse: f64,
        /// Item weights, in wheel order
        #[arg(short = 'w', long, value_delimiter = ',', default_value = "1,1,1,1")]
        weights: Vec<f64>,
        /// Starting rotation in degrees
        #[arg(short = 'r', long, default_value_t = 0.0)]
        rotation: f64,
        /// Seed for the spin jitter, for repeatable runs
        #[arg(short = 's', long)]
        seed: Option<u64>,
    },
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Spin { impulse } => send_command(Command::Spin(impulse)),
        Commands::Stop => send_command(Command::Stop),
        Commands::Reload => send_command(Command::Reload),
        Commands::Simulate {
            impulse,
            weights,
            rotation,
            seed,
        } => simulate(impulse, weights, rotation, seed),
    }
}

fn send_command(cmd: Command) -> anyhow::Result<()> {
    let path = control::socket_path();
    let mut stream = UnixStream::connect(&path).map_err(|e| {
        anyhow::anyhow!(
            "Failed to connect to fortuna at {}: {}. Is the wheel running?",
            path.display(),
            e
        )
    })?;

    writeln!(stream, "{}", cmd)?;
    Ok(())
}

fn simulate(impulse: f64, weights: Vec<f64>, rotation: f64, seed: Option<u64>) -> anyhow::Result<()> {
    let mut config =
        WheelConfig::with_items(weights.into_iter().map(ItemConfig::weighted).collect());
    config.rotation = Some(rotation);

    let rng = seed.map_or_else(fastrand::Rng::new, fastrand::Rng::with_seed);
    let mut wheel = Wheel::new(&config).with_rng(rng);

    let rested = Rc::new(Cell::new(None));
    let sink = rested.clone();
    wheel.on_event(move |event| match event {
        WheelEvent::Spin {
            direction,
            velocity,
            ..
        } => println!("spin: {direction} at {velocity:.2} deg/s"),
        WheelEvent::Rest { item } => sink.set(Some(*item)),
    });

    wheel.spin(impulse);

    let mut elapsed = 0.0;
    while rested.get().is_none() && wheel.velocity() != 0.0 {
        wheel.tick(SIMULATION_STEP);
        elapsed += SIMULATION_STEP;
        if elapsed > SIMULATION_LIMIT_SECS {
            anyhow::bail!("wheel still spinning after {SIMULATION_LIMIT_SECS}s");
        }
    }

    match rested.get().flatten().or_else(|| wheel.current_item()) {
        Some(item) => println!(
            "rest: item {item} at {:.2} deg after {elapsed:.2}s",
            wheel.rotation()
        ),
        None => println!("rest: no items"),
    }
    Ok(())
}
