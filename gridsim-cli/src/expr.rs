use chumsky::prelude::*;
use std::f64::consts::PI;

type BinOp = fn(f64, f64) -> f64;

/// Parser for gate parameter expressions.
///
/// Grammar: decimal literals, `pi`, unary minus, `+ - * /` and parentheses.
/// Evaluates straight to a number; there is no AST.
pub fn expr_parser() -> impl Parser<char, f64, Error = Simple<char>> {
    let expr = recursive(|expr| {
        let number = text::int(10)
            .then(just('.').ignore_then(text::digits(10)).or_not())
            .try_map(|(int, frac): (String, Option<String>), span| {
                let literal = match frac {
                    Some(frac) => format!("{int}.{frac}"),
                    None => int,
                };
                literal
                    .parse::<f64>()
                    .map_err(|e| Simple::custom(span, e.to_string()))
            })
            .padded();

        let pi = text::keyword("pi").to(PI).padded();

        let atom = number
            .or(pi)
            .or(expr.delimited_by(just('('), just(')')))
            .padded();

        let op = |c| just(c).padded();

        let unary = op('-')
            .repeated()
            .then(atom)
            .foldr(|_op, value: f64| -value);

        let product = unary
            .clone()
            .then(
                op('*')
                    .to((|a: f64, b: f64| a * b) as BinOp)
                    .or(op('/').to((|a: f64, b: f64| a / b) as BinOp))
                    .then(unary)
                    .repeated(),
            )
            .foldl(|lhs, (f, rhs)| f(lhs, rhs));

        product
            .clone()
            .then(
                op('+')
                    .to((|a: f64, b: f64| a + b) as BinOp)
                    .or(op('-').to((|a: f64, b: f64| a - b) as BinOp))
                    .then(product)
                    .repeated(),
            )
            .foldl(|lhs, (f, rhs)| f(lhs, rhs))
    });

    expr.then_ignore(end())
}

/// Evaluates one parameter expression such as `-pi/4` or `2*(pi+0.5)`.
pub fn eval(src: &str) -> Result<f64, String> {
    expr_parser().parse(src).map_err(|errors| {
        errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join("; ")
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(src: &str, expected: f64) {
        let value = eval(src).unwrap_or_else(|e| panic!("{src}: {e}"));
        assert!((value - expected).abs() < 1e-12, "{src} gave {value}");
    }

    #[test]
    fn literals_and_pi() {
        approx("0", 0.0);
        approx("1.25", 1.25);
        approx("pi", PI);
        approx(" pi ", PI);
    }

    #[test]
    fn precedence_and_grouping() {
        approx("pi/2", PI / 2.0);
        approx("-pi/4", -PI / 4.0);
        approx("1+2*3", 7.0);
        approx("(1+2)*3", 9.0);
        approx("2*(pi+0.5)", 2.0 * (PI + 0.5));
        approx("3*pi/4", 3.0 * PI / 4.0);
        approx("1-2-3", -4.0);
        approx("--1", 1.0);
    }

    #[test]
    fn rejects_anything_outside_the_grammar() {
        assert!(eval("").is_err());
        assert!(eval("pi pi").is_err());
        assert!(eval("sin(1)").is_err());
        assert!(eval("__import__('os')").is_err());
        assert!(eval("1 +").is_err());
        assert!(eval("(1").is_err());
    }
}
