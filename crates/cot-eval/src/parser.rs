use crate::ast::{BinaryOp, Expr, UnaryOp};
use lazy_static::lazy_static;
use pest::error::LineColLocation;
use pest::iterators::Pairs;
use pest::pratt_parser::{Assoc, Op, PrattParser};
use pest::Parser;
use pest_derive::Parser;
use thiserror::Error;

#[derive(Parser)]
#[grammar = "arithmetic.pest"]
struct ArithmeticParser;

lazy_static! {
    /// Lowest precedence first.
    static ref PRATT: PrattParser<Rule> = PrattParser::new()
        .op(Op::infix(Rule::add, Assoc::Left) | Op::infix(Rule::subtract, Assoc::Left))
        .op(Op::infix(Rule::multiply, Assoc::Left) | Op::infix(Rule::divide, Assoc::Left))
        .op(Op::prefix(Rule::neg) | Op::prefix(Rule::pos));
}

/// Deepest expression tree the parser will build.
///
/// Parenthesized groups, unary signs and chained binary operators each add a
/// level; parsing and evaluation recurse once per level.
pub const MAX_DEPTH: usize = 256;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvalError {
    #[error("empty expression")]
    Empty,
    #[error("invalid syntax at column {column}: {message}")]
    Syntax { column: usize, message: String },
    #[error("invalid number literal '{0}'")]
    InvalidNumber(String),
}

/// Parse an arithmetic expression into an [`Expr`] tree.
///
/// Only numeric literals, `+ - * /`, unary signs, parentheses and whitespace
/// are accepted; anything else is rejected.
pub fn parse(input: &str) -> Result<Expr, EvalError> {
    if input.trim().is_empty() {
        return Err(EvalError::Empty);
    }
    check_depth(input)?;

    let mut pairs = ArithmeticParser::parse(Rule::expression, input).map_err(|e| {
        let column = match e.line_col {
            LineColLocation::Pos((_, col)) => col,
            LineColLocation::Span((_, col), _) => col,
        };
        EvalError::Syntax {
            column,
            message: e.variant.message().into_owned(),
        }
    })?;

    let expr = pairs.next().ok_or(EvalError::Empty)?;
    build(expr.into_inner())
}

/// Nesting state of one parenthesis level
#[derive(Clone, Copy, Default)]
struct Level {
    base: usize,
    binary: usize,
    unary: usize,
}

impl Level {
    fn depth(&self) -> usize {
        self.base + self.binary + self.unary
    }
}

/// Lexical upper bound on tree depth, checked before pest ever sees the input.
fn check_depth(input: &str) -> Result<(), EvalError> {
    let mut outer: Vec<Level> = Vec::new();
    let mut level = Level::default();
    let mut operand_expected = true;

    for (offset, ch) in input.char_indices() {
        match ch {
            '(' => {
                outer.push(level);
                level = Level {
                    base: level.depth() + 1,
                    ..Level::default()
                };
                operand_expected = true;
            }
            ')' => {
                if let Some(parent) = outer.pop() {
                    level = Level { unary: 0, ..parent };
                }
                operand_expected = false;
            }
            '+' | '-' if operand_expected => level.unary += 1,
            '+' | '-' | '*' | '/' => {
                level.binary += 1;
                level.unary = 0;
                operand_expected = true;
            }
            c if c.is_whitespace() => continue,
            _ => {
                level.unary = 0;
                operand_expected = false;
            }
        }

        if level.depth() > MAX_DEPTH {
            return Err(EvalError::Syntax {
                column: offset + 1,
                message: format!("expression nested too deeply (limit {})", MAX_DEPTH),
            });
        }
    }

    Ok(())
}

fn build(pairs: Pairs<Rule>) -> Result<Expr, EvalError> {
    PRATT
        .map_primary(|primary| match primary.as_rule() {
            Rule::number => {
                let text = primary.as_str();
                text.parse::<f64>()
                    .map(Expr::Number)
                    .map_err(|_| EvalError::InvalidNumber(text.to_string()))
            }
            Rule::expr => build(primary.into_inner()),
            rule => Err(EvalError::Syntax {
                column: primary.as_span().start() + 1,
                message: format!("unexpected {:?}", rule),
            }),
        })
        .map_prefix(|op, operand| {
            let op = match op.as_rule() {
                Rule::neg => UnaryOp::Negate,
                _ => UnaryOp::Plus,
            };
            Ok(Expr::unary(op, operand?))
        })
        .map_infix(|lhs, op, rhs| {
            let op = match op.as_rule() {
                Rule::add => BinaryOp::Add,
                Rule::subtract => BinaryOp::Subtract,
                Rule::multiply => BinaryOp::Multiply,
                _ => BinaryOp::Divide,
            };
            Ok(Expr::binary(op, lhs?, rhs?))
        })
        .parse(pairs)
}
