use crate::error::{GridError, Result};
use serde::Serialize;

/// One cell of the circuit grid: what a single qubit does during one time step.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum GateToken {
    /// Nothing happens on this qubit; composes as identity.
    Empty,
    /// A parameter-free gate such as `h` or `tdg`.
    Named(String),
    /// A gate reading `[theta, phi, lambda]` from `params`, e.g. `rx` or `u`.
    Parameterized(String, Vec<f64>),
    CnotControl,
    CnotTarget,
    /// Placeholder for a qubit strictly between a CNOT's control and target.
    CnotBridge,
}

impl GateToken {
    pub fn named(name: impl Into<String>) -> Self {
        GateToken::Named(name.into())
    }

    pub fn parameterized(name: impl Into<String>, params: Vec<f64>) -> Self {
        GateToken::Parameterized(name.into(), params)
    }

    pub fn is_cnot_marker(&self) -> bool {
        matches!(
            self,
            GateToken::CnotControl | GateToken::CnotTarget | GateToken::CnotBridge
        )
    }
}

/// The finished, immutable per-qubit token grid.
///
/// Stored row-major: `rows[q][t]` is the token on qubit `q` at time step `t`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CircuitGrid {
    rows: Vec<Vec<GateToken>>,
}

impl CircuitGrid {
    /// Wraps already assembled rows. Nothing is checked here; the composer
    /// rejects grids that break the shape or pairing rules.
    pub fn from_rows(rows: Vec<Vec<GateToken>>) -> Self {
        Self { rows }
    }

    pub fn num_qubits(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns (time steps). For a ragged grid this is the longest row.
    pub fn depth(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }

    pub fn is_rectangular(&self) -> bool {
        let depth = self.depth();
        self.rows.iter().all(|row| row.len() == depth)
    }

    pub fn rows(&self) -> &[Vec<GateToken>] {
        &self.rows
    }

    /// Tokens of column `t`, one per qubit in increasing index order.
    pub fn column(&self, t: usize) -> Option<Vec<&GateToken>> {
        self.rows.iter().map(|row| row.get(t)).collect()
    }
}

/// Incrementally assembles a [`CircuitGrid`] in circuit-program order.
#[derive(Debug, Clone)]
pub struct CircuitGridBuilder {
    rows: Vec<Vec<GateToken>>,
}

impl CircuitGridBuilder {
    pub fn new(num_qubits: usize) -> Result<Self> {
        if num_qubits == 0 {
            return Err(GridError::InvalidQubitCount);
        }
        Ok(Self {
            rows: vec![Vec::new(); num_qubits],
        })
    }

    pub fn num_qubits(&self) -> usize {
        self.rows.len()
    }

    fn check_qubit(&self, qubit: usize) -> Result<()> {
        if qubit >= self.rows.len() {
            return Err(GridError::QubitOutOfRange {
                qubit,
                num_qubits: self.rows.len(),
            });
        }
        Ok(())
    }

    /// Places a single-qubit token on `qubit`.
    ///
    /// When the row currently ends in a CNOT bridge, the token goes into the
    /// first `Empty` slot of that row (left behind by earlier padding) if there
    /// is one. Otherwise it is appended.
    pub fn place_gate(&mut self, qubit: usize, token: GateToken) -> Result<&mut Self> {
        self.check_qubit(qubit)?;
        if token.is_cnot_marker() {
            return Err(GridError::MalformedGrid(format!(
                "{token:?} cannot be placed as a single-qubit gate"
            )));
        }

        let row = &mut self.rows[qubit];
        if matches!(row.last(), Some(GateToken::CnotBridge)) {
            if let Some(slot) = row.iter_mut().find(|t| **t == GateToken::Empty) {
                *slot = token;
                return Ok(self);
            }
        }
        row.push(token);
        Ok(self)
    }

    /// Places a CNOT spanning every row from `min(control, target)` to
    /// `max(control, target)` in one new column.
    pub fn place_cnot(&mut self, control: usize, target: usize) -> Result<&mut Self> {
        self.check_qubit(control)?;
        self.check_qubit(target)?;
        if control == target {
            return Err(GridError::InvalidCnot { qubit: control });
        }

        let (lo, hi) = (control.min(target), control.max(target));
        // Bridged rows count too, so the markers and bridges share one column.
        let target_len = self.rows[lo..=hi].iter().map(Vec::len).max().unwrap_or(0);

        for q in lo..=hi {
            let row = &mut self.rows[q];
            row.resize(target_len, GateToken::Empty);
            row.push(if q == control {
                GateToken::CnotControl
            } else if q == target {
                GateToken::CnotTarget
            } else {
                GateToken::CnotBridge
            });
        }
        Ok(self)
    }

    /// Pads every row to the longest one and returns a copy of the grid.
    pub fn snapshot(&self) -> CircuitGrid {
        self.clone().finish()
    }

    pub fn finish(mut self) -> CircuitGrid {
        let depth = self.rows.iter().map(Vec::len).max().unwrap_or(0);
        for row in &mut self.rows {
            row.resize(depth, GateToken::Empty);
        }
        CircuitGrid::from_rows(self.rows)
    }
}
