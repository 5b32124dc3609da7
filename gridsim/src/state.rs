use crate::composer::{compose, tensor_all};
use crate::error::{GridError, Result};
use crate::gates::ComplexMatrix;
use crate::grid::CircuitGrid;
use nalgebra::DVector;
use num_complex::Complex64;
use serde::Serialize;
use tracing::info;

#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct StateVector {
    pub num_qubits: usize,
    #[serde(rename = "amplitudes")]
    pub amplitudes: Vec<Complex64>,
}

impl StateVector {
    pub fn len(&self) -> usize {
        self.amplitudes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.amplitudes.is_empty()
    }

    /// `|amplitude|^2` per basis index.
    pub fn probabilities(&self) -> Vec<f64> {
        self.amplitudes.iter().map(|a| a.norm_sqr()).collect()
    }

    /// Binary label of a basis index, qubit 0 first.
    pub fn label(&self, index: usize) -> String {
        format!("{:0width$b}", index, width = self.num_qubits)
    }
}

/// `|0...0>` built as `|0> ⊗ ... ⊗ |0>`, in the same factor order as the composer.
pub fn initial_state(num_qubits: usize) -> Result<DVector<Complex64>> {
    let zero = ComplexMatrix::from_column_slice(
        2,
        1,
        &[Complex64::new(1.0, 0.0), Complex64::new(0.0, 0.0)],
    );
    let column = tensor_all(std::iter::repeat_n(zero, num_qubits)).ok_or(GridError::InvalidQubitCount)?;
    Ok(DVector::from_column_slice(column.as_slice()))
}

/// Runs the grid on `|0...0>` and returns the final state.
pub fn evaluate(grid: &CircuitGrid) -> Result<StateVector> {
    let unitary = compose(grid)?;
    let state = &unitary * initial_state(grid.num_qubits())?;
    info!(qubits = grid.num_qubits(), columns = grid.depth(), "evaluated final state");
    Ok(StateVector {
        num_qubits: grid.num_qubits(),
        amplitudes: state.iter().copied().collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{CircuitGridBuilder, GateToken};
    use std::f64::consts::FRAC_1_SQRT_2;

    const EPSILON: f64 = 1e-9;

    fn approx_eq(a: Complex64, b: Complex64) -> bool {
        (a.re - b.re).abs() < EPSILON && (a.im - b.im).abs() < EPSILON
    }

    fn real(values: &[f64]) -> Vec<Complex64> {
        values.iter().map(|&v| Complex64::new(v, 0.0)).collect()
    }

    fn assert_state(state: &StateVector, expected: &[Complex64]) {
        assert_eq!(state.len(), expected.len());
        for (i, (a, b)) in state.amplitudes.iter().zip(expected).enumerate() {
            assert!(approx_eq(*a, *b), "amplitude {i}: {a} != {b}");
        }
    }

    #[test]
    fn test_state_vector_initialization() {
        for n in 1..=3 {
            let grid = CircuitGrid::from_rows(vec![vec![GateToken::Empty]; n]);
            let state = evaluate(&grid).unwrap();
            assert_eq!(state.num_qubits, n);
            let mut expected = vec![0.0; 1 << n];
            expected[0] = 1.0;
            assert_state(&state, &real(&expected));
        }
    }

    #[test]
    fn hadamard_on_one_qubit() {
        let grid = CircuitGrid::from_rows(vec![vec![GateToken::named("h")]]);
        let state = evaluate(&grid).unwrap();
        assert_state(&state, &real(&[FRAC_1_SQRT_2, FRAC_1_SQRT_2]));
    }

    #[test]
    fn test_bell_state_simulation() {
        let mut b = CircuitGridBuilder::new(2).unwrap();
        b.place_gate(0, GateToken::named("h")).unwrap();
        b.place_gate(1, GateToken::Empty).unwrap();
        b.place_cnot(0, 1).unwrap();
        let state = evaluate(&b.finish()).unwrap();

        assert_state(&state, &real(&[FRAC_1_SQRT_2, 0.0, 0.0, FRAC_1_SQRT_2]));
        let probs = state.probabilities();
        for (p, e) in probs.iter().zip([0.5, 0.0, 0.0, 0.5]) {
            assert!((p - e).abs() < EPSILON);
        }
    }

    #[test]
    fn x_on_last_qubit_sets_low_bit() {
        let grid = CircuitGrid::from_rows(vec![
            vec![GateToken::Empty],
            vec![GateToken::Empty],
            vec![GateToken::named("x")],
        ]);
        let state = evaluate(&grid).unwrap();
        assert!(approx_eq(state.amplitudes[1], Complex64::new(1.0, 0.0)));
        assert_eq!(state.label(1), "001");
    }

    #[test]
    fn labels_are_padded_to_register_width() {
        let state = StateVector {
            num_qubits: 3,
            amplitudes: vec![Complex64::new(0.0, 0.0); 8],
        };
        assert_eq!(state.label(0), "000");
        assert_eq!(state.label(4), "100");
        assert_eq!(state.label(7), "111");
    }

    #[test]
    fn initial_state_needs_qubits() {
        assert_eq!(initial_state(0).unwrap_err(), GridError::InvalidQubitCount);
        assert_eq!(initial_state(4).unwrap().len(), 16);
    }
}
