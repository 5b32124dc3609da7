pub mod cnot;
pub mod composer;
pub mod error;
pub mod gates;
pub mod grid;
pub mod report;
pub mod sampler;
pub mod state;

// Re-export key components for easier access from the binary or other libraries.
pub use cnot::build_cnot;
pub use composer::compose;
pub use error::{GridError, Result};
pub use gates::{ComplexMatrix, lookup};
pub use grid::{CircuitGrid, CircuitGridBuilder, GateToken};
pub use report::{DEFAULT_SHOTS, Outcome, SimulationReport, simulate, write_report};
pub use sampler::{SamplingStrategy, sample, sample_categorical};
pub use state::{StateVector, evaluate};
