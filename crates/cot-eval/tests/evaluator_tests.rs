//! Integration tests for the arithmetic evaluator.

use cot_eval::{evaluate, EvalError, MAX_DEPTH};

// =============================================================================
// Valid Expressions
// =============================================================================

#[test]
fn test_basic_arithmetic() {
    assert_eq!(evaluate("2 + 2").unwrap(), 4.0);
    assert_eq!(evaluate("5 * 4").unwrap(), 20.0);
    assert_eq!(evaluate("15 - 8").unwrap(), 7.0);
    assert_eq!(evaluate("7 / 2").unwrap(), 3.5);
}

#[test]
fn test_parentheses_and_precedence() {
    assert_eq!(evaluate("(23 + 7) * (15 - 8)").unwrap(), 210.0);
    assert_eq!(evaluate("2 + 3 * 4").unwrap(), 14.0);
    assert_eq!(evaluate("(2 + 3) * 4").unwrap(), 20.0);
    assert_eq!(evaluate("((((1))))").unwrap(), 1.0);
    assert_eq!(evaluate("100 / 10 / 5").unwrap(), 2.0);
}

#[test]
fn test_number_literals() {
    assert_eq!(evaluate("10").unwrap(), 10.0);
    assert_eq!(evaluate("3.25").unwrap(), 3.25);
    assert_eq!(evaluate(".5").unwrap(), 0.5);
    assert_eq!(evaluate("5.").unwrap(), 5.0);
    assert_eq!(evaluate("1e6").unwrap(), 1_000_000.0);
    assert_eq!(evaluate("2.5E-3").unwrap(), 0.0025);
}

#[test]
fn test_unary_signs() {
    assert_eq!(evaluate("-3").unwrap(), -3.0);
    assert_eq!(evaluate("+3").unwrap(), 3.0);
    assert_eq!(evaluate("5 - -3").unwrap(), 8.0);
    assert_eq!(evaluate("-(2 + 3)").unwrap(), -5.0);
    assert_eq!(evaluate("--4").unwrap(), 4.0);
}

#[test]
fn test_whitespace_is_ignored() {
    assert_eq!(evaluate("  2+2 ").unwrap(), 4.0);
    assert_eq!(evaluate("2\t*\n3").unwrap(), 6.0);
}

#[test]
fn test_ieee_float_behavior() {
    assert_eq!(evaluate("1 / 0").unwrap(), f64::INFINITY);
    assert!(evaluate("0 / 0").unwrap().is_nan());
    assert_eq!(evaluate("1e308 * 10").unwrap(), f64::INFINITY);
    assert!((evaluate("0.1 + 0.2").unwrap() - 0.3).abs() < 1e-10);
}

#[test]
fn test_evaluation_is_deterministic() {
    let expressions = ["(23 + 7) * (15 - 8)", "1 / 3", "0.1 + 0.2", "-7.5 * 2e3"];
    for expr in expressions {
        let first = evaluate(expr).unwrap();
        for _ in 0..5 {
            assert_eq!(evaluate(expr).unwrap().to_bits(), first.to_bits(), "Drift for: {}", expr);
        }
    }
}

// =============================================================================
// Rejected Input
// =============================================================================

#[test]
fn test_unbalanced_parentheses() {
    assert!(evaluate("2 + (3").is_err());
    assert!(evaluate("2 + 3)").is_err());
    assert!(evaluate("(").is_err());
}

#[test]
fn test_empty_input() {
    assert_eq!(evaluate(""), Err(EvalError::Empty));
    assert_eq!(evaluate("  "), Err(EvalError::Empty));
    assert!(evaluate("()").is_err());
}

#[test]
fn test_non_arithmetic_input_is_rejected() {
    let rejected = [
        "__import__('os').system('ls')",
        "abs(-3)",
        "x + 1",
        "2 ** 3",
        "7 // 2",
        "7 % 2",
        "2 +",
        "* 2",
        "2 (3)",
        "1_000",
        "0x10",
        "2e",
        "[1, 2]",
    ];
    for input in rejected {
        assert!(evaluate(input).is_err(), "Accepted: {}", input);
    }
}

// =============================================================================
// Nesting Limits
// =============================================================================

fn is_depth_error(result: Result<f64, EvalError>) -> bool {
    match result {
        Err(EvalError::Syntax { message, .. }) => message.contains("nested too deeply"),
        _ => false,
    }
}

#[test]
fn test_long_unary_chain_is_rejected() {
    let input = format!("{}1", "-".repeat(100_000));
    assert!(is_depth_error(evaluate(&input)));
}

#[test]
fn test_deep_signed_groups_are_rejected() {
    let open_only = "-(".repeat(5_000);
    assert!(is_depth_error(evaluate(&open_only)));

    let balanced = format!("{}1{}", "-(".repeat(800), ")".repeat(800));
    assert!(is_depth_error(evaluate(&balanced)));
}

#[test]
fn test_deep_plain_parentheses_are_rejected() {
    let input = format!("{}1{}", "(".repeat(100_000), ")".repeat(100_000));
    assert!(is_depth_error(evaluate(&input)));
}

#[test]
fn test_long_operator_chain_is_rejected() {
    let input = vec!["1"; MAX_DEPTH + 2].join(" + ");
    assert!(is_depth_error(evaluate(&input)));

    let input = vec!["1"; 100].join(" + ");
    assert_eq!(evaluate(&input).unwrap(), 100.0);
}

#[test]
fn test_moderate_nesting_still_evaluates() {
    let input = format!("{}1{}", "-(".repeat(100), ")".repeat(100));
    assert_eq!(evaluate(&input).unwrap(), 1.0);
}
