//! End-to-end calculator scenarios
//!
//! Drives the public API the way the calculator screen does:
//! - counting literals on their own
//! - solving typed expressions with and without a rounding target
//! - malformed input ending in the generic error state

#![allow(clippy::disallowed_methods)] // Test code - unwrap is acceptable

use sigfig_calc::{
    count_literals, count_significant_figures, round_to_significant_figures, CalcEngine,
    EvalexprEvaluator, Key, Outcome, RoundingTarget, Session, MAX_FIGURES,
};

fn engine() -> CalcEngine<EvalexprEvaluator> {
    CalcEngine::with_evalexpr().unwrap()
}

// ============================================================================
// Counter
// ============================================================================

#[test]
fn test_count_single_digit() {
    assert_eq!(count_significant_figures("7"), 1);
}

#[test]
fn test_count_decimal() {
    assert_eq!(count_significant_figures("673.52"), 5);
}

#[test]
fn test_count_leading_decimal_zeros() {
    assert_eq!(count_significant_figures("0.0025"), 2);
}

#[test]
fn test_count_ignores_result() {
    // Literal counts come from typed text, never from the evaluated answer
    let session = Session::new().set_input("0.0025×30.00").solve(&engine());
    let figures: Vec<_> = count_literals(session.input())
        .into_iter()
        .map(|c| c.figures)
        .collect();

    assert_eq!(figures, vec![2, 4]);
    let value = session.result().and_then(Outcome::value).unwrap();
    assert!((value - 0.075).abs() < 1e-12);
}

// ============================================================================
// Solve
// ============================================================================

#[test]
fn test_solve_log_expression() {
    let engine = engine();

    assert_eq!(
        engine.normalize("1.5/log(5+1)"),
        "1.5/math::log10(5.0+1.0)"
    );

    let value = engine.solve("1.5/log(5+1)", RoundingTarget::Off).unwrap();
    assert!((value - 1.5 / 6_f64.log10()).abs() < 1e-12);
}

#[test]
fn test_solve_rounds_to_target() {
    let session = Session::new()
        .select_target(RoundingTarget::Figures(3))
        .set_input("673.456")
        .solve(&engine());

    assert_eq!(session.result(), Some(Outcome::Value(673.0)));
}

#[test]
fn test_solve_malformed_is_error() {
    let session = Session::new().set_input("1/(2").solve(&engine());

    assert_eq!(session.result(), Some(Outcome::Error));
    assert_eq!(session.result().map(|r| r.to_string()).as_deref(), Some("Error"));
}

#[test]
fn test_keypad_session() {
    let keys = [
        Key::Open,
        Key::Digit(2),
        Key::Plus,
        Key::Digit(3),
        Key::Close,
        Key::Multiply,
        Key::Ln,
        Key::Open,
        Key::Euler,
        Key::Close,
    ];
    let session = keys
        .iter()
        .fold(Session::new(), |s, key| s.press(*key))
        .solve(&engine());

    assert_eq!(session.input(), "(2+3)×ln(e)");
    let value = session.result().and_then(Outcome::value).unwrap();
    assert!((value - 5.0).abs() < 1e-12);
}

#[test]
fn test_keypad_implicit_multiplication() {
    let engine = engine();
    let session = Session::new()
        .press(Key::Digit(2))
        .press(Key::Euler)
        .solve(&engine);

    assert_eq!(session.input(), "2e");
    let value = session.result().and_then(Outcome::value).unwrap();
    assert!((value - 2.0 * std::f64::consts::E).abs() < 1e-12);

    let value = engine.solve("2log(100)", RoundingTarget::Off).unwrap();
    assert!((value - 4.0).abs() < 1e-12);
}

// ============================================================================
// Rounder properties
// ============================================================================

#[test]
fn test_round_zero() {
    for sig in 1..=u32::from(MAX_FIGURES) {
        assert_eq!(round_to_significant_figures(0.0, sig), 0.0);
    }
}

#[test]
fn test_round_extreme_solutions() {
    let engine = engine();

    let value = engine
        .solve("1.602176634e-30", RoundingTarget::Figures(3))
        .unwrap();
    assert_eq!(value, 1.6e-30);

    let value = engine
        .solve("1.2345e300×1", RoundingTarget::Figures(2))
        .unwrap();
    assert_eq!(value, 1.2e300);
}

#[test]
fn test_rounded_results_are_stable() {
    let engine = engine();
    for expression in ["1÷3", "2^0.5", "ln(10)", "log(2)×1000", "-e^3"] {
        for sig in 1..=MAX_FIGURES {
            let target = RoundingTarget::figures(sig).unwrap();
            let once = engine.solve(expression, target).unwrap();
            assert_eq!(
                round_to_significant_figures(once, u32::from(sig)),
                once,
                "{} rounded to {}",
                expression,
                sig
            );
        }
    }
}
