//! Stream harness CLI.
//!
//! This binary runs multiplier test cases through the latency-injecting harness. It performs:
//! 1. **List:** Print the built-in case table with sizes and stall delays.
//! 2. **Run:** Run selected (or all) cases against a device, with optional JSON config,
//!    seed and delay overrides, and per-cycle line tracing.

use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};
use tracing::error;
use tracing_subscriber::EnvFilter;

use imulsim_core::cases::{self, TestCase};
use imulsim_core::config::{Config, DeviceKind};
use imulsim_core::{ConfigError, SimError, run_case};

/// Exit status for a wrong response.
const EXIT_MISMATCH: u8 = 1;
/// Exit status for a hung run.
const EXIT_TIMEOUT: u8 = 2;
/// Exit status for invalid configuration.
const EXIT_CONFIG: u8 = 3;

#[derive(Parser, Debug)]
#[command(
    name = "imulsim",
    author,
    version,
    about = "Latency-injecting stream harness for integer multiplier models",
    long_about = "Replay request/response tables through a device under test with random source and sink stalls.\n\nExamples:\n  imulsim list\n  imulsim run\n  imulsim run --case small_pos_pos --trace\n  imulsim run --config cases.json --seed 42 --src-delay 100"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List the built-in test cases.
    List {
        /// Seed used to generate the random cases.
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Run test cases through the harness.
    Run(RunArgs),
}

#[derive(clap::Args, Debug)]
struct RunArgs {
    /// Case to run (repeatable); runs every case when omitted.
    #[arg(short, long = "case")]
    cases: Vec<String>,

    /// JSON configuration file.
    #[arg(short = 'f', long)]
    config: Option<String>,

    /// Seed for stall generators and random cases.
    #[arg(long)]
    seed: Option<u64>,

    /// Device under test; `pass-through` is a negative control that fails every
    /// multiplier case.
    #[arg(long, value_enum)]
    device: Option<DeviceArg>,

    /// Output queue depth of the multiplier.
    #[arg(long)]
    capacity: Option<usize>,

    /// Override every case's source stall delay.
    #[arg(long, allow_negative_numbers = true)]
    src_delay: Option<i64>,

    /// Override every case's sink stall delay.
    #[arg(long, allow_negative_numbers = true)]
    sink_delay: Option<i64>,

    /// Watchdog budget in cycles.
    #[arg(long)]
    max_cycles: Option<u64>,

    /// Print a line trace for every cycle.
    #[arg(long)]
    trace: bool,

    /// Print run statistics after each case.
    #[arg(long)]
    stats: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum DeviceArg {
    /// Functional-level integer multiplier.
    IntMulFl,
    /// Zero-latency wire; echoes 64-bit requests, so 32-bit multiplier responses never match.
    PassThrough,
}

impl From<DeviceArg> for DeviceKind {
    fn from(arg: DeviceArg) -> Self {
        match arg {
            DeviceArg::IntMulFl => Self::IntMulFl,
            DeviceArg::PassThrough => Self::PassThrough,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::List { seed }) => {
            init_logging(false);
            cmd_list(seed)
        }
        Some(Commands::Run(args)) => {
            init_logging(args.trace);
            cmd_run(&args)
        }
        None => {
            eprintln!("imulsim: pass a subcommand");
            eprintln!();
            eprintln!("  imulsim list                  List built-in cases");
            eprintln!("  imulsim run                   Run every case");
            eprintln!("  imulsim run --case <name>     Run one case");
            eprintln!();
            eprintln!("  imulsim --help  for full options");
            ExitCode::from(EXIT_CONFIG)
        }
    }
}

/// Installs a stderr subscriber; `RUST_LOG` wins over the default level.
fn init_logging(trace: bool) {
    let default = if trace { "trace" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Prints the built-in case table.
fn cmd_list(seed: Option<u64>) -> ExitCode {
    let seed = seed.unwrap_or(Config::default().sim.seed);
    println!("{:<20} {:>5} {:>10} {:>10}", "case", "msgs", "src_delay", "sink_delay");
    for case in cases::builtin_cases(seed) {
        println!(
            "{:<20} {:>5} {:>10} {:>10}",
            case.name,
            case.len(),
            case.src_delay,
            case.sink_delay
        );
    }
    ExitCode::SUCCESS
}

/// Runs the selected cases and reports one line per case.
fn cmd_run(args: &RunArgs) -> ExitCode {
    let (config, selected) = match prepare(args) {
        Ok(prepared) => prepared,
        Err(e) => {
            error!("{e}");
            return ExitCode::from(EXIT_CONFIG);
        }
    };

    let mut first_failure: Option<u8> = None;
    let mut failures = 0usize;
    for case in &selected {
        match run_case(case, &config.device, &config.sim) {
            Ok(report) => {
                println!(
                    "PASS {:<20} msgs={:<3} cycles={:<6} src_delay={:<4} sink_delay={}",
                    case.name,
                    report.transfers,
                    report.cycles,
                    case.src_delay,
                    case.sink_delay
                );
                for line in &report.trace {
                    println!("  {line}");
                }
                if args.stats {
                    println!("{}", report.stats);
                }
            }
            Err(e) => {
                println!("FAIL {:<20} {e}", case.name);
                failures += 1;
                let _ = first_failure.get_or_insert(exit_code(&e));
            }
        }
    }
    println!("{} passed, {} failed", selected.len() - failures, failures);
    first_failure.map_or(ExitCode::SUCCESS, ExitCode::from)
}

/// Loads configuration, applies command-line overrides and selects cases.
fn prepare(args: &RunArgs) -> Result<(Config, Vec<TestCase>), ConfigError> {
    let mut config = match &args.config {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };
    if let Some(seed) = args.seed {
        config.sim.seed = seed;
    }
    if let Some(max_cycles) = args.max_cycles {
        config.sim.max_cycles = max_cycles;
    }
    if let Some(device) = args.device {
        config.device.kind = device.into();
    }
    if let Some(capacity) = args.capacity {
        config.device.queue_capacity = capacity;
    }
    config.sim.line_trace |= args.trace;

    let mut table = cases::builtin_cases(config.sim.seed);
    for spec in std::mem::take(&mut config.cases) {
        table.push(spec.into_case()?);
    }

    let selected = if args.cases.is_empty() {
        table
    } else {
        args.cases
            .iter()
            .map(|name| cases::find_case(&table, name).cloned())
            .collect::<Result<Vec<_>, _>>()?
    };

    let selected = selected
        .into_iter()
        .map(|case| {
            let src = args.src_delay.unwrap_or(case.src_delay);
            let sink = args.sink_delay.unwrap_or(case.sink_delay);
            case.with_delays(src, sink)
        })
        .collect();
    Ok((config, selected))
}

const fn exit_code(err: &SimError) -> u8 {
    match err {
        SimError::Mismatch { .. } | SimError::Unexpected { .. } => EXIT_MISMATCH,
        SimError::Timeout { .. } => EXIT_TIMEOUT,
        SimError::Config(_) => EXIT_CONFIG,
    }
}
