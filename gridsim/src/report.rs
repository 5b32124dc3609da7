use crate::error::Result;
use crate::grid::CircuitGrid;
use crate::sampler::SamplingStrategy;
use crate::state::{StateVector, evaluate};
use rand::Rng;
use serde::Serialize;
use std::io::Write;

/// Shot budget used when the caller does not choose one.
pub const DEFAULT_SHOTS: u64 = 8192;

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SimulationReport {
    pub num_qubits: usize,
    pub shots: u64,
    pub strategy: SamplingStrategy,
    pub state_vector: StateVector,
    pub outcomes: Vec<Outcome>,
}

/// One basis state as handed to a reporting or plotting consumer.
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Outcome {
    pub label: String,
    pub probability: f64,
    pub count: u64,
}

impl SimulationReport {
    pub fn counts(&self) -> Vec<u64> {
        self.outcomes.iter().map(|o| o.count).collect()
    }

    pub fn probabilities(&self) -> Vec<f64> {
        self.outcomes.iter().map(|o| o.probability).collect()
    }
}

/// Evaluates the grid and samples `shots` measurements of the final state.
pub fn simulate(
    grid: &CircuitGrid,
    shots: u64,
    strategy: SamplingStrategy,
    rng: &mut impl Rng,
) -> Result<SimulationReport> {
    let state_vector = evaluate(grid)?;
    let probabilities = state_vector.probabilities();
    let counts = strategy.sample(&probabilities, shots, rng)?;

    let outcomes = probabilities
        .iter()
        .zip(counts)
        .enumerate()
        .map(|(i, (&probability, count))| Outcome {
            label: state_vector.label(i),
            probability,
            count,
        })
        .collect();

    Ok(SimulationReport {
        num_qubits: grid.num_qubits(),
        shots,
        strategy,
        state_vector,
        outcomes,
    })
}

/// Serializes the report as JSON onto `writer`, followed by a newline.
pub fn write_report(
    report: &SimulationReport,
    pretty: bool,
    writer: &mut impl Write,
) -> std::io::Result<()> {
    if pretty {
        serde_json::to_writer_pretty(&mut *writer, report)?;
    } else {
        serde_json::to_writer(&mut *writer, report)?;
    }
    writeln!(writer)
}
