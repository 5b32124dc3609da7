use crate::expr;
use anyhow::{Context, Result, anyhow, bail};
use gridsim::{CircuitGrid, CircuitGridBuilder, GateToken};
use tracing::debug;

/// Statements that carry no gate and are skipped outright.
const IGNORED: [&str; 5] = ["OPENQASM", "include", "creg", "barrier", "measure"];

/// Reads an OpenQASM 2.0 program into a circuit grid, in program order.
///
/// Supports `qreg`, `cx`, parameter-free gates (`h q[0];`) and parameterized
/// gates (`u(pi/2,0,pi) q[1];`). Gate names are not checked here; unknown
/// names surface when the grid is composed.
pub fn read_circuit(src: &str) -> Result<CircuitGrid> {
    let mut builder: Option<CircuitGridBuilder> = None;

    for (line_no, line) in src.lines().enumerate() {
        let line_no = line_no + 1;
        let trimmed = line.trim();
        if trimmed.is_empty()
            || trimmed.starts_with("//")
            || IGNORED.iter().any(|kw| trimmed.starts_with(kw))
        {
            continue;
        }
        let statement = trimmed.trim_end_matches(';').trim();

        if let Some(decl) = statement.strip_prefix("qreg") {
            if builder.is_some() {
                debug!(line = line_no, "ignoring additional qreg");
                continue;
            }
            let n = qubit_index(decl).with_context(|| format!("line {line_no}: bad qreg"))?;
            builder = Some(CircuitGridBuilder::new(n).with_context(|| format!("line {line_no}"))?);
            continue;
        }

        let b = builder
            .as_mut()
            .ok_or_else(|| anyhow!("line {line_no}: gate before any qreg declaration"))?;
        apply_statement(b, statement).with_context(|| format!("line {line_no}: `{trimmed}`"))?;
    }

    builder
        .map(CircuitGridBuilder::finish)
        .ok_or_else(|| anyhow!("no qreg declaration found"))
}

fn apply_statement(builder: &mut CircuitGridBuilder, statement: &str) -> Result<()> {
    let (head, operands) = split_operands(statement)?;

    if head == "cx" {
        let qubits: Vec<&str> = operands.split(',').collect();
        let [control, target] = qubits.as_slice() else {
            bail!("cx takes two operands");
        };
        builder.place_cnot(qubit_index(control)?, qubit_index(target)?)?;
        return Ok(());
    }

    let qubit = qubit_index(operands)?;
    let token = match head.find('(') {
        Some(open) => {
            let close = head.rfind(')').ok_or_else(|| anyhow!("unclosed parameter list"))?;
            let params = head[open + 1..close]
                .split(',')
                .map(|p| expr::eval(p).map_err(|e| anyhow!("bad parameter `{}`: {e}", p.trim())))
                .collect::<Result<Vec<f64>>>()?;
            GateToken::parameterized(head[..open].trim(), params)
        }
        None => GateToken::named(head),
    };
    builder.place_gate(qubit, token)?;
    Ok(())
}

/// Splits `name(args) q[0],q[1]` into the gate head and its operand list.
fn split_operands(statement: &str) -> Result<(&str, &str)> {
    // Parameter lists may contain spaces, so split after the closing paren.
    let split_at = match statement.rfind(')') {
        Some(close) => close + 1,
        None => statement
            .find(char::is_whitespace)
            .ok_or_else(|| anyhow!("missing operands"))?,
    };
    let (head, operands) = statement.split_at(split_at);
    let operands = operands.trim();
    if operands.is_empty() {
        bail!("missing operands");
    }
    Ok((head.trim(), operands))
}

/// Extracts `n` from `q[n]`.
fn qubit_index(operand: &str) -> Result<usize> {
    let start = operand.find('[').ok_or_else(|| anyhow!("expected `[` in `{operand}`"))?;
    let end = operand.find(']').ok_or_else(|| anyhow!("expected `]` in `{operand}`"))?;
    operand[start + 1..end]
        .trim()
        .parse::<usize>()
        .with_context(|| format!("bad qubit index in `{operand}`"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use GateToken::*;
    use std::f64::consts::PI;

    const HEADER: &str = "OPENQASM 2.0;\ninclude \"qelib1.inc\";\n";

    fn read(body: &str) -> Result<CircuitGrid> {
        read_circuit(&format!("{HEADER}{body}"))
    }

    #[test]
    fn reads_bell_circuit() {
        let grid = read("qreg q[2];\ncreg c[2];\nh q[0];\ncx q[0],q[1];\nmeasure q[0] -> c[0];\n").unwrap();
        assert_eq!(grid.num_qubits(), 2);
        assert_eq!(grid.rows()[0], vec![GateToken::named("h"), CnotControl]);
        assert_eq!(grid.rows()[1], vec![Empty, CnotTarget]);
    }

    #[test]
    fn reads_parameterized_gates() {
        let grid = read("qreg q[1];\nu(pi/2, 0, pi) q[0];\nrz(-pi/4) q[0];\n").unwrap();
        assert_eq!(
            grid.rows()[0],
            vec![
                GateToken::parameterized("u", vec![PI / 2.0, 0.0, PI]),
                GateToken::parameterized("rz", vec![-PI / 4.0]),
            ]
        );
    }

    #[test]
    fn skips_comments_and_barriers() {
        let grid = read("// prep\nqreg q[3];\nbarrier q[0],q[1],q[2];\n\nx q[2];\ncx q[2], q[0];\n").unwrap();
        assert_eq!(grid.rows()[0], vec![Empty, CnotTarget]);
        assert_eq!(grid.rows()[1], vec![Empty, CnotBridge]);
        assert_eq!(grid.rows()[2], vec![GateToken::named("x"), CnotControl]);
    }

    #[test]
    fn unknown_names_pass_through() {
        let grid = read("qreg q[1];\nfoo q[0];\n").unwrap();
        assert_eq!(grid.rows()[0], vec![GateToken::named("foo")]);
    }

    #[test]
    fn reports_line_numbers() {
        let err = read("qreg q[2];\ncx q[1],q[1];\n").unwrap_err();
        assert!(format!("{err:#}").contains("line 4"), "{err:#}");

        let err = read("h q[0];\n").unwrap_err();
        assert!(err.to_string().contains("before any qreg"));

        let err = read("qreg q[1];\nrx(sin(1)) q[0];\n").unwrap_err();
        assert!(format!("{err:#}").contains("bad parameter"), "{err:#}");

        let err = read("qreg q[1];\nh q[4];\n").unwrap_err();
        assert!(format!("{err:#}").contains("out of range"), "{err:#}");
    }

    #[test]
    fn requires_a_register() {
        assert!(read("").is_err());
    }
}
