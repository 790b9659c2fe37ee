use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BinaryOp {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl BinaryOp {
    pub fn symbol(self) -> char {
        match self {
            BinaryOp::Add => '+',
            BinaryOp::Subtract => '-',
            BinaryOp::Multiply => '*',
            BinaryOp::Divide => '/',
        }
    }

    /// IEEE-754 semantics: division by zero yields `inf` or `NaN`.
    pub fn apply(self, lhs: f64, rhs: f64) -> f64 {
        match self {
            BinaryOp::Add => lhs + rhs,
            BinaryOp::Subtract => lhs - rhs,
            BinaryOp::Multiply => lhs * rhs,
            BinaryOp::Divide => lhs / rhs,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnaryOp {
    Negate,
    Plus,
}

/// Parsed arithmetic expression.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Expr {
    Number(f64),
    Unary {
        op: UnaryOp,
        operand: Box<Expr>,
    },
    Binary {
        op: BinaryOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
}

impl Expr {
    pub fn unary(op: UnaryOp, operand: Expr) -> Self {
        Expr::Unary {
            op,
            operand: Box::new(operand),
        }
    }

    pub fn binary(op: BinaryOp, lhs: Expr, rhs: Expr) -> Self {
        Expr::Binary {
            op,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        }
    }

    /// Evaluate the tree. Never fails: every error is caught at parse time.
    pub fn eval(&self) -> f64 {
        match self {
            Expr::Number(value) => *value,
            Expr::Unary { op: UnaryOp::Negate, operand } => -operand.eval(),
            Expr::Unary { op: UnaryOp::Plus, operand } => operand.eval(),
            Expr::Binary { op, lhs, rhs } => op.apply(lhs.eval(), rhs.eval()),
        }
    }
}

/// Fully parenthesized canonical form, e.g. `((2 + 3) * 4)`.
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Number(value) => write!(f, "{}", value),
            Expr::Unary { op: UnaryOp::Negate, operand } => write!(f, "-{}", operand),
            Expr::Unary { op: UnaryOp::Plus, operand } => write!(f, "+{}", operand),
            Expr::Binary { op, lhs, rhs } => write!(f, "({} {} {})", lhs, op.symbol(), rhs),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_eval_nested() {
        // (2 + 3) * -4
        let expr = Expr::binary(
            BinaryOp::Multiply,
            Expr::binary(BinaryOp::Add, Expr::Number(2.0), Expr::Number(3.0)),
            Expr::unary(UnaryOp::Negate, Expr::Number(4.0)),
        );
        assert_eq!(expr.eval(), -20.0);
        assert_eq!(expr.to_string(), "((2 + 3) * -4)");
    }

    #[test]
    fn test_division_by_zero_follows_ieee() {
        assert_eq!(BinaryOp::Divide.apply(1.0, 0.0), f64::INFINITY);
        assert_eq!(BinaryOp::Divide.apply(-1.0, 0.0), f64::NEG_INFINITY);
        assert!(BinaryOp::Divide.apply(0.0, 0.0).is_nan());
    }
}
