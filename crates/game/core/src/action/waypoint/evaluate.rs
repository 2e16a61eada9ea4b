//! Waypoint expression evaluation.
//!
//! This module interprets a parsed [`Expr`] against the board bindings of a
//! single piece. The interpreter has no access to anything but those bindings,
//! so content cannot reach outside the sandbox.

use super::error::ExpressionError;
use super::parser::{BinaryOp, Clause, CompareOp, Expr, LogicOp, UnaryOp};
use super::value::Value;

/// Upper bound on the number of items a single `range(...)` may produce.
pub const MAX_RANGE_LEN: usize = 4096;

/// Upper bound on the values one evaluation may build, counting every range
/// item and every comprehension element (nested values included).
pub const MAX_EVAL_ITEMS: usize = 65536;

/// Values visible to a waypoint expression.
///
/// `x`/`y` are the piece position in its own player frame and `w`/`h` the
/// board extent. `any` is bound to NaN only when `any_ok` is set.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bindings {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
    pub any_ok: bool,
}

/// Evaluates `expr`; `src` is the original text, used for error reporting.
pub(crate) fn evaluate(
    src: &str,
    expr: &Expr,
    bindings: &Bindings,
) -> Result<Value, ExpressionError> {
    let mut interpreter = Interpreter {
        src,
        bindings,
        locals: Vec::new(),
        budget: MAX_EVAL_ITEMS,
    };
    interpreter.eval(expr)
}

struct Interpreter<'a> {
    src: &'a str,
    bindings: &'a Bindings,
    /// Comprehension variables, innermost last.
    locals: Vec<(String, Value)>,
    /// Values left to build before evaluation is refused.
    budget: usize,
}

impl Interpreter<'_> {
    fn eval(&mut self, expr: &Expr) -> Result<Value, ExpressionError> {
        match expr {
            Expr::Number(value) => Ok(Value::Number(*value)),

            Expr::Name(name) => self.lookup(name),

            Expr::Unary { op, operand } => {
                let value = self.eval(operand)?;
                match op {
                    UnaryOp::Not => Ok(Value::Bool(!value.is_truthy())),
                    UnaryOp::Plus => Ok(Value::Number(self.number(&value, "unary +")?)),
                    UnaryOp::Minus => Ok(Value::Number(-self.number(&value, "unary -")?)),
                }
            }

            Expr::Binary { op, lhs, rhs } => {
                let lhs = self.eval(lhs)?;
                let rhs = self.eval(rhs)?;
                self.binary(*op, lhs, rhs)
            }

            Expr::Compare { first, rest } => {
                let mut lhs = self.eval(first)?;
                for (op, operand) in rest {
                    let rhs = self.eval(operand)?;
                    if !self.compare(*op, &lhs, &rhs)? {
                        return Ok(Value::Bool(false));
                    }
                    lhs = rhs;
                }
                Ok(Value::Bool(true))
            }

            // Short-circuit and return the deciding operand.
            Expr::Logic { op, lhs, rhs } => {
                let lhs = self.eval(lhs)?;
                match (op, lhs.is_truthy()) {
                    (LogicOp::And, false) | (LogicOp::Or, true) => Ok(lhs),
                    _ => self.eval(rhs),
                }
            }

            Expr::Conditional {
                then,
                cond,
                otherwise,
            } => {
                if self.eval(cond)?.is_truthy() {
                    self.eval(then)
                } else {
                    self.eval(otherwise)
                }
            }

            Expr::Tuple(items) => Ok(Value::Tuple(self.eval_all(items)?)),

            Expr::List(items) => Ok(Value::List(self.eval_all(items)?)),

            Expr::Comprehension { element, clauses } => {
                let mut out = Vec::new();
                self.comprehend(element, clauses, &mut out)?;
                Ok(Value::List(out))
            }

            Expr::Range(args) => {
                let args = self.eval_all(args)?;
                self.range(&args)
            }
        }
    }

    fn eval_all(&mut self, items: &[Expr]) -> Result<Vec<Value>, ExpressionError> {
        items.iter().map(|item| self.eval(item)).collect()
    }

    fn lookup(&self, name: &str) -> Result<Value, ExpressionError> {
        if let Some((_, value)) = self.locals.iter().rev().find(|(local, _)| local == name) {
            return Ok(value.clone());
        }
        let b = self.bindings;
        match name {
            "x" => Ok(Value::Number(b.x)),
            "y" => Ok(Value::Number(b.y)),
            "w" => Ok(Value::Number(b.w)),
            "h" => Ok(Value::Number(b.h)),
            "any" if b.any_ok => Ok(Value::Number(f64::NAN)),
            "any" => Err(ExpressionError::WildcardNotAllowed {
                expr: self.src.to_string(),
            }),
            _ => Err(ExpressionError::UnknownName {
                expr: self.src.to_string(),
                name: name.to_string(),
            }),
        }
    }

    fn comprehend(
        &mut self,
        element: &Expr,
        clauses: &[Clause],
        out: &mut Vec<Value>,
    ) -> Result<(), ExpressionError> {
        let Some((clause, inner)) = clauses.split_first() else {
            let value = self.eval(element)?;
            self.spend(value.weight())?;
            out.push(value);
            return Ok(());
        };

        let iterable = self.eval(&clause.iter)?;
        let Some(items) = iterable.items() else {
            return Err(self.type_error(format!("cannot iterate over a {}", iterable.kind())));
        };

        for item in items {
            self.locals.push((clause.var.clone(), item.clone()));
            let result = self.comprehend_item(element, clause, inner, out);
            self.locals.pop();
            result?;
        }
        Ok(())
    }

    fn comprehend_item(
        &mut self,
        element: &Expr,
        clause: &Clause,
        inner: &[Clause],
        out: &mut Vec<Value>,
    ) -> Result<(), ExpressionError> {
        for filter in &clause.filters {
            if !self.eval(filter)?.is_truthy() {
                return Ok(());
            }
        }
        self.comprehend(element, inner, out)
    }

    fn spend(&mut self, values: usize) -> Result<(), ExpressionError> {
        self.budget = self
            .budget
            .checked_sub(values)
            .ok_or_else(|| ExpressionError::TooManyValues {
                expr: self.src.to_string(),
                limit: MAX_EVAL_ITEMS,
            })?;
        Ok(())
    }

    fn range(&mut self, args: &[Value]) -> Result<Value, ExpressionError> {
        let mut ints = Vec::with_capacity(args.len());
        for arg in args {
            match arg.as_number() {
                Some(value) if value.is_finite() && value.fract() == 0.0 => ints.push(value),
                _ => return Err(self.type_error(format!("range expects integers, got {}", arg))),
            }
        }

        let (start, stop, step) = match ints.as_slice() {
            [stop] => (0.0, *stop, 1.0),
            [start, stop] => (*start, *stop, 1.0),
            [start, stop, step] => (*start, *stop, *step),
            _ => return Err(self.type_error("range takes 1 to 3 arguments".to_string())),
        };
        if step == 0.0 {
            return Err(ExpressionError::Arithmetic {
                expr: self.src.to_string(),
                message: "range step must not be zero".to_string(),
            });
        }

        let span = ((stop - start) / step).ceil();
        let len = if span > 0.0 { span } else { 0.0 };
        if len > MAX_RANGE_LEN as f64 {
            return Err(ExpressionError::RangeTooLarge {
                expr: self.src.to_string(),
                len: len as usize,
                limit: MAX_RANGE_LEN,
            });
        }
        self.spend(len as usize)?;

        let items = (0..len as usize)
            .map(|i| Value::Number(start + step * i as f64))
            .collect();
        Ok(Value::List(items))
    }

    fn binary(&mut self, op: BinaryOp, lhs: Value, rhs: Value) -> Result<Value, ExpressionError> {
        match (op, lhs, rhs) {
            (BinaryOp::Add, Value::List(mut a), Value::List(b)) => {
                self.spend(b.iter().map(Value::weight).sum())?;
                a.extend(b);
                Ok(Value::List(a))
            }
            (BinaryOp::Add, Value::Tuple(mut a), Value::Tuple(b)) => {
                self.spend(b.iter().map(Value::weight).sum())?;
                a.extend(b);
                Ok(Value::Tuple(a))
            }
            (op, lhs, rhs) => {
                let (Some(a), Some(b)) = (lhs.as_number(), rhs.as_number()) else {
                    return Err(self.type_error(format!(
                        "unsupported operands for {:?}: {} and {}",
                        op,
                        lhs.kind(),
                        rhs.kind()
                    )));
                };
                self.arithmetic(op, a, b).map(Value::Number)
            }
        }
    }

    fn arithmetic(&self, op: BinaryOp, a: f64, b: f64) -> Result<f64, ExpressionError> {
        let nonzero = |what: &str| {
            if b == 0.0 {
                Err(ExpressionError::Arithmetic {
                    expr: self.src.to_string(),
                    message: format!("{} by zero", what),
                })
            } else {
                Ok(())
            }
        };
        let result = match op {
            BinaryOp::Add => a + b,
            BinaryOp::Sub => a - b,
            BinaryOp::Mul => a * b,
            BinaryOp::Div => nonzero("division").map(|()| a / b)?,
            BinaryOp::FloorDiv => nonzero("division").map(|()| (a / b).floor())?,
            // Result takes the sign of the divisor.
            BinaryOp::Mod => nonzero("modulo").map(|()| a - b * (a / b).floor())?,
            BinaryOp::Pow => a.powf(b),
        };
        // Only `any` may introduce the wildcard.
        if result.is_nan() && !a.is_nan() && !b.is_nan() {
            return Err(ExpressionError::Arithmetic {
                expr: self.src.to_string(),
                message: format!("{:?} of {} and {} is not a number", op, a, b),
            });
        }
        Ok(result)
    }

    fn compare(&self, op: CompareOp, lhs: &Value, rhs: &Value) -> Result<bool, ExpressionError> {
        match op {
            CompareOp::Eq => Ok(values_equal(lhs, rhs)),
            CompareOp::NotEq => Ok(!values_equal(lhs, rhs)),
            CompareOp::Lt => self.ordered(lhs, rhs).map(|(a, b)| a < b),
            CompareOp::Le => self.ordered(lhs, rhs).map(|(a, b)| a <= b),
            CompareOp::Gt => self.ordered(lhs, rhs).map(|(a, b)| a > b),
            CompareOp::Ge => self.ordered(lhs, rhs).map(|(a, b)| a >= b),
        }
    }

    fn ordered(&self, lhs: &Value, rhs: &Value) -> Result<(f64, f64), ExpressionError> {
        match (lhs.as_number(), rhs.as_number()) {
            (Some(a), Some(b)) => Ok((a, b)),
            _ => Err(self.type_error(format!(
                "cannot order {} and {}",
                lhs.kind(),
                rhs.kind()
            ))),
        }
    }

    fn number(&self, value: &Value, what: &str) -> Result<f64, ExpressionError> {
        value
            .as_number()
            .ok_or_else(|| self.type_error(format!("bad operand for {}: {}", what, value.kind())))
    }

    fn type_error(&self, message: String) -> ExpressionError {
        ExpressionError::Type {
            expr: self.src.to_string(),
            message,
        }
    }
}

/// Structural equality; numbers follow IEEE rules, so `any == any` is false.
fn values_equal(lhs: &Value, rhs: &Value) -> bool {
    match (lhs, rhs) {
        (Value::Tuple(a), Value::Tuple(b)) | (Value::List(a), Value::List(b)) => {
            a.len() == b.len() && a.iter().zip(b).all(|(a, b)| values_equal(a, b))
        }
        _ => match (lhs.as_number(), rhs.as_number()) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::waypoint::parser::parse;

    const BINDINGS: Bindings = Bindings {
        x: 2.0,
        y: 3.0,
        w: 8.0,
        h: 8.0,
        any_ok: false,
    };

    fn eval_with(src: &str, bindings: &Bindings) -> Result<Value, ExpressionError> {
        evaluate(src, &parse(src)?, bindings)
    }

    fn eval(src: &str) -> Value {
        eval_with(src, &BINDINGS).unwrap()
    }

    fn num(value: f64) -> Value {
        Value::Number(value)
    }

    #[test]
    fn arithmetic_follows_usual_precedence() {
        assert_eq!(eval("x + y * 2"), num(8.0));
        assert_eq!(eval("(x + y) * 2"), num(10.0));
        assert_eq!(eval("-x ** 2"), num(-4.0));
        assert_eq!(eval("2 ** 3 ** 2"), num(512.0));
        assert_eq!(eval("w - 1 - y"), num(4.0));
    }

    #[test]
    fn division_flavours() {
        assert_eq!(eval("7 / 2"), num(3.5));
        assert_eq!(eval("7 // 2"), num(3.0));
        assert_eq!(eval("-7 // 2"), num(-4.0));
        assert_eq!(eval("-7 % 3"), num(2.0));
        assert_eq!(eval("7 % -3"), num(-2.0));
    }

    #[test]
    fn division_by_zero_is_an_error() {
        assert!(matches!(
            eval_with("x / 0", &BINDINGS),
            Err(ExpressionError::Arithmetic { .. })
        ));
        assert!(matches!(
            eval_with("x % (y - 3)", &BINDINGS),
            Err(ExpressionError::Arithmetic { .. })
        ));
    }

    #[test]
    fn undefined_results_are_errors() {
        for src in ["(-1) ** 0.5", "10 ** 400 - 10 ** 400", "0 * 10 ** 400"] {
            assert!(
                matches!(eval_with(src, &BINDINGS), Err(ExpressionError::Arithmetic { .. })),
                "{src}"
            );
        }

        // The wildcard itself still flows through arithmetic.
        let permissive = Bindings {
            any_ok: true,
            ..BINDINGS
        };
        let Value::Number(value) = eval_with("any + 1", &permissive).unwrap() else {
            panic!("expected a number");
        };
        assert!(value.is_nan());
    }

    #[test]
    fn comparisons_chain_and_short_circuit() {
        assert_eq!(eval("0 <= x < w"), Value::Bool(true));
        assert_eq!(eval("0 <= x < 1"), Value::Bool(false));
        assert_eq!(eval("x == 2 and y"), num(3.0));
        assert_eq!(eval("0 or y"), num(3.0));
        assert_eq!(eval("not y"), Value::Bool(false));
        assert_eq!(eval("(1, 2) == [1, 2]"), Value::Bool(false));
        assert_eq!(eval("(1, 2) == (1, 2)"), Value::Bool(true));
        // The right-hand side is never evaluated.
        assert_eq!(eval("x > 5 and 1 / 0"), Value::Bool(false));
    }

    #[test]
    fn conditional_picks_branch() {
        assert_eq!(eval("(x, y + 2) if y == 3 else (x, y + 1)"), eval("(2, 5)"));
        assert_eq!(eval("(x, y + 2) if y == 1 else (x, y + 1)"), eval("(2, 4)"));
    }

    #[test]
    fn comprehension_expands_ranges() {
        assert_eq!(eval("[i for i in range(3)]"), eval("[0, 1, 2]"));
        assert_eq!(eval("[i for i in range(5, 0, -2)]"), eval("[5, 3, 1]"));
        assert_eq!(eval("[i for i in range(1, h - y)]"), eval("[1, 2, 3, 4]"));
        assert_eq!(
            eval("[(i, j) for i in range(2) for j in range(2) if i != j]"),
            eval("[(0, 1), (1, 0)]")
        );
        assert_eq!(eval("[i for i in range(0)]"), Value::List(vec![]));
    }

    #[test]
    fn sequences_concatenate() {
        assert_eq!(eval("[1] + [2, 3]"), eval("[1, 2, 3]"));
        assert_eq!(eval("(1,) + (2,)"), eval("(1, 2)"));
        assert!(matches!(
            eval_with("[1] + 1", &BINDINGS),
            Err(ExpressionError::Type { .. })
        ));
    }

    #[test]
    fn wildcard_requires_permission() {
        assert_eq!(
            eval_with("(any, y)", &BINDINGS),
            Err(ExpressionError::WildcardNotAllowed {
                expr: "(any, y)".to_string()
            })
        );

        let permissive = Bindings {
            any_ok: true,
            ..BINDINGS
        };
        let value = eval_with("(any, y)", &permissive).unwrap();
        let coord = value.as_coordinate().unwrap();
        assert!(coord.x.is_nan());
        assert_eq!(coord.y, 3.0);
    }

    #[test]
    fn unknown_names_are_binding_errors() {
        let err = eval_with("(x, z)", &BINDINGS).unwrap_err();
        assert_eq!(
            err,
            ExpressionError::UnknownName {
                expr: "(x, z)".to_string(),
                name: "z".to_string()
            }
        );
        assert!(err.is_binding_error());
    }

    #[test]
    fn comprehension_variables_do_not_leak() {
        assert!(matches!(
            eval_with("[i for i in range(2)] + [i]", &BINDINGS),
            Err(ExpressionError::UnknownName { .. })
        ));
    }

    #[test]
    fn range_is_bounded() {
        assert!(matches!(
            eval_with("range(100000)", &BINDINGS),
            Err(ExpressionError::RangeTooLarge { .. })
        ));
        assert!(matches!(
            eval_with("range(0.5)", &BINDINGS),
            Err(ExpressionError::Type { .. })
        ));
        assert!(matches!(
            eval_with("range(0, 4, 0)", &BINDINGS),
            Err(ExpressionError::Arithmetic { .. })
        ));
    }

    #[test]
    fn total_values_are_bounded() {
        for src in [
            "[(i, j) for i in range(4096) for j in range(1024)]",
            "[(i, j, k) for i in range(64) for j in range(64) for k in range(64)]",
            "[r for r in [range(4096)] for i in range(4096)]",
            "[r + r for r in [range(4096)] for i in range(16)]",
        ] {
            assert!(
                matches!(
                    eval_with(src, &BINDINGS),
                    Err(ExpressionError::TooManyValues { limit: MAX_EVAL_ITEMS, .. })
                ),
                "{src}"
            );
        }

        // A full-size range on its own is fine.
        let Value::List(items) = eval("[i for i in range(4096)]") else {
            panic!("expected a list");
        };
        assert_eq!(items.len(), MAX_RANGE_LEN);
    }
}
