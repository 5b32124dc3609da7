use crate::cnot::build_cnot;
use crate::error::{GridError, Result};
use crate::gates::{ComplexMatrix, lookup};
use crate::grid::{CircuitGrid, GateToken};
use tracing::debug;

/// Folds a sequence of factors into one operator, the first factor being the
/// most significant (qubit 0 reads as the leftmost bit of a basis index).
pub fn tensor_all(factors: impl IntoIterator<Item = ComplexMatrix>) -> Option<ComplexMatrix> {
    factors
        .into_iter()
        .reduce(|acc, next| acc.kronecker(&next))
}

/// Finds the partner of the CNOT marker at row `start`, skipping bridges.
fn find_partner(column: &[&GateToken], start: usize, t: usize) -> Result<usize> {
    let wanted = match column[start] {
        GateToken::CnotControl => GateToken::CnotTarget,
        _ => GateToken::CnotControl,
    };
    for (q, token) in column.iter().enumerate().skip(start + 1) {
        match token {
            GateToken::CnotBridge => continue,
            tok if **tok == wanted => return Ok(q),
            other => {
                return Err(GridError::MalformedGrid(format!(
                    "column {t}: expected {wanted:?} or CnotBridge at qubit {q}, found {other:?}"
                )));
            }
        }
    }
    Err(GridError::MalformedGrid(format!(
        "column {t}: {:?} at qubit {start} has no matching {wanted:?}",
        column[start]
    )))
}

/// Builds the full-register operator for a single column.
pub fn compose_column(column: &[&GateToken], t: usize) -> Result<ComplexMatrix> {
    let mut pieces = Vec::with_capacity(column.len());
    let mut q = 0;
    while q < column.len() {
        match column[q] {
            GateToken::CnotControl | GateToken::CnotTarget => {
                let partner = find_partner(column, q, t)?;
                let (control, target) = if *column[q] == GateToken::CnotControl {
                    (q, partner)
                } else {
                    (partner, q)
                };
                debug!(column = t, control, target, "cnot block");
                pieces.push(build_cnot(control, target)?);
                q = partner + 1;
            }
            GateToken::CnotBridge => {
                return Err(GridError::MalformedGrid(format!(
                    "column {t}: CnotBridge at qubit {q} outside any CNOT span"
                )));
            }
            token => {
                pieces.push(lookup(token)?);
                q += 1;
            }
        }
    }
    tensor_all(pieces).ok_or_else(|| GridError::MalformedGrid("grid has no qubits".to_string()))
}

/// Composes the whole grid into one `2^n x 2^n` unitary.
///
/// Column matrices are multiplied with the latest column leftmost, so
/// `U = C_last * ... * C_first`. A grid with no columns yields the identity.
pub fn compose(grid: &CircuitGrid) -> Result<ComplexMatrix> {
    let n = grid.num_qubits();
    if n == 0 {
        return Err(GridError::InvalidQubitCount);
    }
    if !grid.is_rectangular() {
        return Err(GridError::MalformedGrid(
            "rows have different lengths".to_string(),
        ));
    }

    let dim = 1usize << n;
    let mut unitary = ComplexMatrix::identity(dim, dim);
    for t in 0..grid.depth() {
        let column = grid
            .column(t)
            .ok_or_else(|| GridError::MalformedGrid(format!("column {t} is incomplete")))?;
        let matrix = compose_column(&column, t)?;
        unitary = matrix * unitary;
    }
    debug!(qubits = n, columns = grid.depth(), "composed unitary");
    Ok(unitary)
}
