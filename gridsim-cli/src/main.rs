mod expr;
mod qasm;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use gridsim::{DEFAULT_SHOTS, SamplingStrategy, simulate, write_report};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::fs::{self, File};
use std::io::{self, BufWriter, Read, Write};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Sampler {
    /// In-order Bernoulli sweeps over the basis states
    BernoulliSweep,
    /// Independent draws from the outcome distribution
    Categorical,
}

impl From<Sampler> for SamplingStrategy {
    fn from(s: Sampler) -> Self {
        match s {
            Sampler::BernoulliSweep => SamplingStrategy::BernoulliSweep,
            Sampler::Categorical => SamplingStrategy::Categorical,
        }
    }
}

/// Simulates an OpenQASM 2.0 circuit and reports state probabilities and shot counts
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// The input OpenQASM file to simulate. If not provided, reads from stdin.
    #[arg(short, long)]
    input_file: Option<PathBuf>,

    /// The output file to write JSON results to. If not provided, writes to stdout.
    #[arg(short, long)]
    output_file: Option<PathBuf>,

    /// Number of measurement shots.
    #[arg(short, long, default_value_t = DEFAULT_SHOTS)]
    shots: u64,

    /// Seed for the measurement RNG; entropy-seeded when omitted.
    #[arg(long)]
    seed: Option<u64>,

    #[arg(long, value_enum, default_value_t = Sampler::BernoulliSweep)]
    sampler: Sampler,

    /// Pretty-print the JSON report.
    #[arg(long)]
    pretty: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let mut qasm_input = String::new();
    if let Some(input_path) = &cli.input_file {
        qasm_input = fs::read_to_string(input_path)
            .with_context(|| format!("Failed to read circuit file: {}", input_path.display()))?;
    } else {
        io::stdin()
            .read_to_string(&mut qasm_input)
            .context("Failed to read circuit from stdin")?;
    }

    let grid = qasm::read_circuit(&qasm_input)?;
    info!(qubits = grid.num_qubits(), columns = grid.depth(), "circuit loaded");

    let mut rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let report = simulate(&grid, cli.shots, cli.sampler.into(), &mut rng)?;

    if let Some(output_path) = &cli.output_file {
        let file = File::create(output_path)
            .with_context(|| format!("Failed to create {}", output_path.display()))?;
        let mut writer = BufWriter::new(file);
        write_report(&report, cli.pretty, &mut writer)?;
        writer.flush()?;
        info!(path = %output_path.display(), "report written");
    } else {
        write_report(&report, cli.pretty, &mut io::stdout().lock())?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_defaults() {
        let cli = Cli::try_parse_from(["gridsim"]).unwrap();
        assert_eq!(cli.shots, 8192);
        assert!(cli.seed.is_none());
        assert!(matches!(cli.sampler, Sampler::BernoulliSweep));
    }

    #[test]
    fn cli_flags() {
        let cli = Cli::try_parse_from([
            "gridsim", "-i", "bell.qasm", "-s", "100", "--seed", "9", "--sampler", "categorical",
            "--pretty",
        ])
        .unwrap();
        assert_eq!(cli.input_file, Some(PathBuf::from("bell.qasm")));
        assert_eq!(cli.shots, 100);
        assert_eq!(cli.seed, Some(9));
        assert!(cli.pretty);
        assert_eq!(SamplingStrategy::from(cli.sampler), SamplingStrategy::Categorical);
    }

    #[test]
    fn bell_circuit_end_to_end() {
        let src = "OPENQASM 2.0;\ninclude \"qelib1.inc\";\nqreg q[2];\nh q[0];\ncx q[0],q[1];\n";
        let grid = qasm::read_circuit(src).unwrap();
        let mut rng = StdRng::seed_from_u64(1);
        let report = simulate(&grid, 1000, SamplingStrategy::BernoulliSweep, &mut rng).unwrap();
        let counts = report.counts();
        assert_eq!(counts.iter().sum::<u64>(), 1000);
        assert_eq!(counts[1] + counts[2], 0);
    }
}
