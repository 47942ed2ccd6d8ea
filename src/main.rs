use anyhow::{anyhow, Result};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use rand::rngs::StdRng;
use rand::SeedableRng;

use ringq::config::Config;
use ringq::queue::{ArrayRingBuffer, Backend, LinkedQueue};
use ringq::synth::{render, GuitarString};
use ringq::util::{logging, report, script};

#[derive(Parser, Debug)]
#[command(name = "ringq", about = "Fixed-capacity ring buffer queue toolkit", version)]
struct Cli {
    /// Log debug events to stderr (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run a script of queue ops: enqueue:<v> (+<v>), dequeue (-), peek (?)
    Exec {
        /// Queue capacity (defaults to general.default_capacity)
        #[arg(short, long)]
        capacity: Option<usize>,

        /// Backend: array or linked (defaults to general.backend)
        #[arg(short, long)]
        backend: Option<String>,

        /// Print a JSON report instead of text
        #[arg(long)]
        json: bool,

        /// Exit with status 1 if any op failed
        #[arg(long)]
        strict: bool,

        /// Ops to apply in order
        #[arg(required = true, allow_hyphen_values = true)]
        ops: Vec<String>,
    },

    /// Pluck a Karplus-Strong string and print its samples
    Pluck {
        /// String frequency in Hz
        #[arg(short, long, default_value_t = 440.0)]
        frequency: f64,

        /// Number of samples to render
        #[arg(short = 'n', long, default_value_t = 16)]
        samples: usize,

        /// RNG seed (defaults to synth.seed, else random)
        #[arg(long)]
        seed: Option<u64>,

        /// Print JSON instead of one sample per line
        #[arg(long)]
        json: bool,
    },

    /// Print config file path and current values
    Config,

    /// Generate shell completions
    Completions {
        shell: Shell,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(if cli.verbose { "debug" } else { "warn" });

    match cli.command {
        Command::Exec { capacity, backend, json, strict, ops } => {
            run_exec(capacity, backend.as_deref(), json, strict, &ops)
        }
        Command::Pluck { frequency, samples, seed, json } => run_pluck(frequency, samples, seed, json),
        Command::Config => run_print_config(),
        Command::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "ringq", &mut std::io::stdout());
            Ok(())
        }
    }
}

fn run_exec(
    capacity: Option<usize>,
    backend:  Option<&str>,
    json:     bool,
    strict:   bool,
    raw_ops:  &[String],
) -> Result<()> {
    let cfg = Config::load();
    let capacity = capacity.unwrap_or(cfg.general.default_capacity);
    let backend = match backend {
        Some(name) => Backend::from_name(name).ok_or_else(|| anyhow!("unknown backend '{}'", name))?,
        None       => cfg.general.backend,
    };
    let ops = script::parse_ops(raw_ops)?;
    tracing::debug!(capacity, backend = backend.label(), ops = ops.len(), "exec");

    let run = match backend {
        Backend::Array => {
            let mut q = ArrayRingBuffer::new(capacity)?;
            script::run(&mut q, backend.label(), &ops)
        }
        Backend::Linked => {
            let mut q = LinkedQueue::new(capacity)?;
            script::run(&mut q, backend.label(), &ops)
        }
    };

    if json || cfg.general.json {
        println!("{}", serde_json::to_string_pretty(&report::exec_json(&run))?);
    } else {
        print!("{}", report::exec_text(&run));
    }

    if strict && run.failures() > 0 {
        std::process::exit(1);
    }
    Ok(())
}

fn run_pluck(frequency: f64, samples: usize, seed: Option<u64>, json: bool) -> Result<()> {
    let cfg = Config::load();
    let mut string = GuitarString::with_params(frequency, cfg.synth.sample_rate, cfg.synth.decay)?;
    let mut rng = match seed.or(cfg.synth.seed) {
        Some(s) => StdRng::seed_from_u64(s),
        None    => StdRng::from_rng(&mut rand::rng()),
    };
    string.pluck(&mut rng)?;
    let out = render(&mut string, samples)?;

    if json || cfg.general.json {
        let v = report::pluck_json(string.frequency(), string.period(), &out);
        println!("{}", serde_json::to_string_pretty(&v)?);
    } else {
        for s in &out {
            println!("{:.6}", s);
        }
    }
    Ok(())
}

fn run_print_config() -> Result<()> {
    let cfg = Config::load();
    let path = Config::config_path()
        .map(|p| p.to_string_lossy().into_owned())
        .unwrap_or_else(|| "(unknown)".to_string());
    print!("{}", report::config_text(&cfg, &path));
    Ok(())
}
