//! Prefetch-gate command-line driver.
//!
//! This binary provides a single entry point for driving a gate region from
//! the shell. It performs:
//! 1. **Synthetic runs:** Train the gate against a generated delta stream
//!    (alternating strided and noisy phases) and report accuracy and stats.
//! 2. **Region maintenance:** Clear the weight table of a region.
//! 3. **Flag control:** Read or write the caller-owned feature-flag word.

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::{fs, process};

use pfgate_core::common::constants::PERC_THRESHOLD_HI;
use pfgate_core::config::{Config, RegionBackend};
use pfgate_core::{GateError, PrefetchDecision, PrefetchGate};

/// The flag bit this driver treats as "training runs enabled".
///
/// The engine attaches no meaning to flag bits; this assignment belongs to
/// the tools coordinating through the region.
const FLAG_RUN_ENABLED: u8 = 0b1;

#[derive(Parser, Debug)]
#[command(
    name = "pfgate",
    version,
    about = "Shared-memory perceptron prefetch gate",
    long_about = "Drive a prefetch-gate region: train it against a synthetic access stream, clear it, or manage its feature flags.\n\nWithout --config or --region the gate runs over a private in-process table, which is useful for experiments but shares nothing.\n\nExamples:\n  pfgate run --steps 200000\n  pfgate --region /dev/shm/pfgate.tbl run\n  pfgate --region /dev/shm/pfgate.tbl clear\n  pfgate --region /dev/shm/pfgate.tbl flags 3"
)]
struct Cli {
    /// JSON configuration file for the gate.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Back the gate with this shared region file (overrides the configuration).
    #[arg(short, long, global = true)]
    region: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Train the gate against a synthetic access stream and report stats.
    Run {
        /// Number of accesses to simulate.
        #[arg(long, default_value_t = 100_000)]
        steps: u64,

        /// Length of each phase before the stream switches character.
        #[arg(long, default_value_t = 512)]
        phase: u64,

        /// Delta used during the predictable phases.
        #[arg(long, default_value_t = 4)]
        stride: i32,

        /// Seed for the noisy phases.
        #[arg(long, default_value_t = 123_456_789)]
        seed: u64,

        /// Stats sections to print (summary, training, flags); prints all when omitted.
        #[arg(long)]
        stats: Vec<String>,
    },

    /// Zero every weight cell of the region (feature flags survive).
    Clear,

    /// Read the feature-flag word, or write it when a value is given.
    Flags {
        /// New flag word; read-only when omitted.
        value: Option<u64>,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref(), cli.region);

    let result = match cli.command {
        Commands::Run {
            steps,
            phase,
            stride,
            seed,
            stats,
        } => cmd_run(&config, steps, phase, stride, seed, &stats),
        Commands::Clear => cmd_clear(&config),
        Commands::Flags { value } => cmd_flags(&config, value),
    };

    if let Err(e) = result {
        eprintln!("[!] {e}");
        process::exit(1);
    }
}

/// Builds the effective configuration from the optional JSON file and the
/// optional region override. Exits with code 1 when the file cannot be read
/// or parsed.
fn load_config(config_path: Option<&Path>, region: Option<PathBuf>) -> Config {
    let mut config = match config_path {
        Some(path) => {
            let text = fs::read_to_string(path).unwrap_or_else(|e| {
                eprintln!("[!] cannot read config {}: {e}", path.display());
                process::exit(1);
            });
            Config::from_json(&text).unwrap_or_else(|e| {
                eprintln!("[!] bad config {}: {e}", path.display());
                process::exit(1);
            })
        }
        None => Config::default(),
    };

    if let Some(path) = region {
        config.region.backend = RegionBackend::Shared;
        config.region.path = Some(path);
    }
    config
}

/// Checks the run-enable flag bit, claiming it on a fresh region and
/// repairing a corrupt word.
///
/// Returns whether training runs are enabled for this region.
fn ensure_enabled(gate: &PrefetchGate) -> Result<bool, GateError> {
    match gate.feature_flags() {
        Ok(0) => {
            // First run against a fresh region claims the enable bit.
            let _ = gate.set_feature_flags(u64::from(FLAG_RUN_ENABLED))?;
            Ok(true)
        }
        Ok(flags) => Ok((flags & FLAG_RUN_ENABLED) != 0),
        Err(GateError::InvalidFlagValue { value }) => {
            eprintln!("[!] flag word {value:#x} is corrupt; resetting to enabled");
            let _ = gate.set_feature_flags(u64::from(FLAG_RUN_ENABLED))?;
            Ok(true)
        }
        Err(e) => Err(e),
    }
}

/// Runs the synthetic workload: queries, grades, and trains the gate once
/// per simulated access, then prints the requested stats sections.
///
/// The stream alternates `phase`-long stretches of a constant stride (where
/// prefetching pays off) with equally long stretches of noise (where it
/// does not). The gate sees the last two deltas as its features.
fn cmd_run(
    config: &Config,
    steps: u64,
    phase: u64,
    stride: i32,
    seed: u64,
    stats: &[String],
) -> Result<(), GateError> {
    let gate = PrefetchGate::new(config)?;

    println!(
        "[*] Region: {:?}{}",
        config.region.backend,
        config
            .region
            .path
            .as_deref()
            .map(|p| format!(" ({})", p.display()))
            .unwrap_or_default()
    );

    if !ensure_enabled(&gate)? {
        println!("[*] Training disabled by feature flags; nothing to do");
        return Ok(());
    }

    let phase = phase.max(1);
    let mut noise = Lfsr::new(seed);
    let mut d1 = 0_i32;
    let mut d2 = 0_i32;
    let mut correct_total = 0_u64;
    let mut band_prefetch = 0_u64;
    let mut band_low = 0_u64;
    let mut band_deny = 0_u64;

    for step in 0..steps {
        let patterned = (step / phase) % 2 == 0;
        let delta = if patterned { stride } else { noise.next_delta() };

        let score = gate.query(&[d1, d2])?;
        match PrefetchDecision::from_score(score) {
            PrefetchDecision::Prefetch => band_prefetch += 1,
            PrefetchDecision::PrefetchLow => band_low += 1,
            PrefetchDecision::Deny => band_deny += 1,
        }

        // A prefetch is useful exactly when the stream is in a patterned
        // stretch; grade the prediction against that oracle and train.
        let predicted = score >= PERC_THRESHOLD_HI;
        let correct = predicted == patterned;
        if correct {
            correct_total += 1;
        }
        gate.update(d1, d2, 2, correct, score)?;

        d2 = d1;
        d1 = delta;
    }

    let accuracy = 100.0 * correct_total as f64 / steps.max(1) as f64;
    println!("[*] {steps} accesses (stride {stride}, phase length {phase})");
    println!("    decisions: prefetch {band_prefetch} | low {band_low} | deny {band_deny}");
    println!("    gate accuracy {accuracy:.2}%");

    gate.stats().snapshot().print_sections(stats);
    Ok(())
}

/// Zeroes the region's weight table.
fn cmd_clear(config: &Config) -> Result<(), GateError> {
    let gate = PrefetchGate::new(config)?;
    gate.clear();
    println!("[*] Weight table cleared");
    Ok(())
}

/// Reads or writes the region's feature-flag word.
fn cmd_flags(config: &Config, value: Option<u64>) -> Result<(), GateError> {
    let gate = PrefetchGate::new(config)?;
    match value {
        Some(value) => {
            let accepted = gate.set_feature_flags(value)?;
            println!("[*] Feature flags set to {accepted:#x}");
        }
        None => {
            let flags = gate.feature_flags()?;
            println!("[*] Feature flags: {flags:#x}");
        }
    }
    Ok(())
}

/// Noise source for the unpredictable phases.
///
/// A simple xorshift generator, avoiding the overhead of a real RNG;
/// deterministic for a given seed so runs are reproducible.
struct Lfsr {
    state: u64,
}

impl Lfsr {
    /// Creates a new generator; a zero seed is remapped, since the LFSR
    /// would otherwise never leave zero.
    fn new(seed: u64) -> Self {
        Self {
            state: if seed == 0 { 123_456_789 } else { seed },
        }
    }

    fn next(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x
    }

    /// A wide mixed-sign delta that rarely matches a trained stride.
    fn next_delta(&mut self) -> i32 {
        (self.next() % 509) as i32 - 254
    }
}
