use crate::error::{GridError, Result};
use crate::gates::{ComplexMatrix, PAULI_X, to_matrix};
use num_complex::Complex64;

fn projector(bit: usize) -> ComplexMatrix {
    let mut p = ComplexMatrix::zeros(2, 2);
    p[(bit, bit)] = Complex64::new(1.0, 0.0);
    p
}

/// Builds the controlled-X block covering every qubit from
/// `min(control, target)` to `max(control, target)` inclusive.
///
/// The block is `2^(d+1)` square, where `d = |target - control|`; intervening
/// qubits see the identity. The lower qubit index is the most significant
/// tensor factor, matching the composer.
pub fn build_cnot(control: usize, target: usize) -> Result<ComplexMatrix> {
    if control == target {
        return Err(GridError::InvalidCnot { qubit: control });
    }

    let d = control.abs_diff(target);
    let n = 1usize << d;
    let outer = ComplexMatrix::identity(n, n);
    let inner = ComplexMatrix::identity(n / 2, n / 2);
    let x = to_matrix(&PAULI_X);

    let block = if control < target {
        // |0><0| ⊗ I + |1><1| ⊗ (I ⊗ X)
        projector(0).kronecker(&outer) + projector(1).kronecker(&inner.kronecker(&x))
    } else {
        // I ⊗ |0><0| + (X ⊗ I) ⊗ |1><1|
        outer.kronecker(&projector(0)) + x.kronecker(&inner).kronecker(&projector(1))
    };
    Ok(block)
}
