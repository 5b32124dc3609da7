use crate::error::{GridError, Result};
use crate::grid::GateToken;
use nalgebra::DMatrix;
use num_complex::Complex64;
use std::f64::consts::FRAC_1_SQRT_2;

/// Dense square complex matrix; dimension is always a power of two.
pub type ComplexMatrix = DMatrix<Complex64>;

// custom type for the fixed single-qubit gate table
pub type GateMatrix = [[Complex64; 2]; 2];

const ZERO: Complex64 = Complex64::new(0.0, 0.0);
const ONE: Complex64 = Complex64::new(1.0, 0.0);

pub const IDENTITY: GateMatrix = [[ONE, ZERO], [ZERO, ONE]];

pub const HADAMARD: GateMatrix = [
    [
        Complex64::new(FRAC_1_SQRT_2, 0.0),
        Complex64::new(FRAC_1_SQRT_2, 0.0),
    ],
    [
        Complex64::new(FRAC_1_SQRT_2, 0.0),
        Complex64::new(-FRAC_1_SQRT_2, 0.0),
    ],
];

pub const PAULI_X: GateMatrix = [[ZERO, ONE], [ONE, ZERO]];

pub const PAULI_Y: GateMatrix = [
    [ZERO, Complex64::new(0.0, -1.0)],
    [Complex64::new(0.0, 1.0), ZERO],
];

pub const PAULI_Z: GateMatrix = [[ONE, ZERO], [ZERO, Complex64::new(-1.0, 0.0)]];

pub const S: GateMatrix = [[ONE, ZERO], [ZERO, Complex64::new(0.0, 1.0)]];

pub const SDG: GateMatrix = [[ONE, ZERO], [ZERO, Complex64::new(0.0, -1.0)]];

// e^{±iπ/4}
pub const T: GateMatrix = [
    [ONE, ZERO],
    [ZERO, Complex64::new(FRAC_1_SQRT_2, FRAC_1_SQRT_2)],
];

pub const TDG: GateMatrix = [
    [ONE, ZERO],
    [ZERO, Complex64::new(FRAC_1_SQRT_2, -FRAC_1_SQRT_2)],
];

pub fn to_matrix(gate: &GateMatrix) -> ComplexMatrix {
    ComplexMatrix::from_fn(2, 2, |r, c| gate[r][c])
}

/// Looks up the 2x2 matrix of a single-qubit token.
///
/// `Empty` is the identity. CNOT markers never reach here on their own; the
/// composer turns a control/target pair into one block.
pub fn lookup(token: &GateToken) -> Result<ComplexMatrix> {
    match token {
        GateToken::Empty => Ok(to_matrix(&IDENTITY)),
        GateToken::Named(name) => named_gate(name).map(to_matrix),
        GateToken::Parameterized(name, params) => parameterized_gate(name, params).map(|g| to_matrix(&g)),
        GateToken::CnotControl | GateToken::CnotTarget | GateToken::CnotBridge => Err(
            GridError::MalformedGrid(format!("{token:?} has no single-qubit matrix")),
        ),
    }
}

pub fn named_gate(name: &str) -> Result<&'static GateMatrix> {
    let gate = match name {
        "h" => &HADAMARD,
        "x" => &PAULI_X,
        "y" => &PAULI_Y,
        "z" => &PAULI_Z,
        "id" => &IDENTITY,
        "s" => &S,
        "sdg" => &SDG,
        "t" => &T,
        "tdg" => &TDG,
        _ => {
            return Err(GridError::UnknownGate {
                name: name.to_string(),
            });
        }
    };
    Ok(gate)
}

pub fn parameterized_gate(name: &str, params: &[f64]) -> Result<GateMatrix> {
    let arity = match name {
        "rx" | "ry" | "rz" | "p" => 1,
        "u" => 3,
        _ => {
            return Err(GridError::UnknownGate {
                name: name.to_string(),
            });
        }
    };
    if params.len() < arity {
        return Err(GridError::MissingParameter {
            gate: name.to_string(),
            expected: arity,
            found: params.len(),
        });
    }

    let theta = params[0];
    let (ct, st) = ((theta / 2.0).cos(), (theta / 2.0).sin());
    let gate = match name {
        // Rx(θ) = cos(θ/2) I - i sin(θ/2) X
        "rx" => [
            [Complex64::new(ct, 0.0), Complex64::new(0.0, -st)],
            [Complex64::new(0.0, -st), Complex64::new(ct, 0.0)],
        ],
        "ry" => [
            [Complex64::new(ct, 0.0), Complex64::new(-st, 0.0)],
            [Complex64::new(st, 0.0), Complex64::new(ct, 0.0)],
        ],
        // Rz(θ) = diag(e^{-iθ/2}, e^{+iθ/2})
        "rz" => [
            [Complex64::new(ct, -st), ZERO],
            [ZERO, Complex64::new(ct, st)],
        ],
        "p" => [[ONE, ZERO], [ZERO, Complex64::from_polar(1.0, theta)]],
        _ => {
            let (phi, lambda) = (params[1], params[2]);
            [
                [
                    Complex64::new(ct, 0.0),
                    -Complex64::from_polar(st, lambda),
                ],
                [
                    Complex64::from_polar(st, phi),
                    Complex64::from_polar(ct, lambda + phi),
                ],
            ]
        }
    };
    Ok(gate)
}
