//! Arithmetic expression evaluator.
//!
//! Evaluates expressions built from numeric literals, `+ - * /`, unary signs
//! and parentheses with floating-point semantics. The grammar is closed: no
//! identifiers, calls or other operators are recognized, so arbitrary input
//! can only ever produce a number or an [`EvalError`].
//!
//! # Example
//!
//! ```
//! let value = cot_eval::evaluate("(23 + 7) * (15 - 8)").unwrap();
//! assert_eq!(value, 210.0);
//! ```

pub mod ast;
pub mod parser;

pub use ast::{BinaryOp, Expr, UnaryOp};
pub use parser::{parse, EvalError, MAX_DEPTH};

/// Parse and evaluate an arithmetic expression.
pub fn evaluate(input: &str) -> Result<f64, EvalError> {
    Ok(parse(input)?.eval())
}
