// src/error.rs

/// Everything that can go wrong while building, composing or sampling a circuit.
///
/// All variants are pure-computation failures: a composition either succeeds
/// completely or fails before any matrix is returned.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum GridError {
    #[error("unknown gate: {name}")]
    UnknownGate { name: String },
    #[error("invalid CNOT: control and target are both qubit {qubit}")]
    InvalidCnot { qubit: usize },
    #[error("malformed circuit grid: {0}")]
    MalformedGrid(String),
    #[error("gate `{gate}` needs {expected} parameter(s), got {found}")]
    MissingParameter {
        gate: String,
        expected: usize,
        found: usize,
    },
    #[error("qubit index {qubit} out of range for a {num_qubits}-qubit register")]
    QubitOutOfRange { qubit: usize, num_qubits: usize },
    #[error("a circuit needs at least one qubit")]
    InvalidQubitCount,
    #[error("probability distribution has no positive entry; sampling cannot terminate")]
    DegenerateDistribution,
}

pub type Result<T> = std::result::Result<T, GridError>;
