//! CalcEngine - normalize, evaluate, round
//!
//! One synchronous call chain per solve. Any evaluator failure ends the
//! attempt; callers that only need to display something use
//! [`CalcEngine::outcome`], which folds every failure into [`Outcome::Error`].

use serde::Serialize;
use std::fmt;
use tracing::debug;

use crate::error::Result;
use crate::evaluator::{EvalexprEvaluator, Evaluator};
use crate::normalizer;
use crate::rounder::RoundingTarget;

/// Displayable result of a solve
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "status", content = "value", rename_all = "lowercase")]
pub enum Outcome {
    Value(f64),
    /// Generic failure; error subtypes are not exposed
    Error,
}

impl Outcome {
    pub fn value(self) -> Option<f64> {
        match self {
            Self::Value(v) => Some(v),
            Self::Error => None,
        }
    }

    pub fn is_error(self) -> bool {
        self == Self::Error
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value(v) => write!(f, "{}", v),
            Self::Error => write!(f, "Error"),
        }
    }
}

/// CalcEngine - expression solving with optional significant-figure rounding
///
/// # Example
/// ```
/// use sigfig_calc::{CalcEngine, RoundingTarget};
///
/// let engine = CalcEngine::with_evalexpr()?;
///
/// let exact = engine.solve("1.5/log(5+1)", RoundingTarget::Off)?;
/// assert!((exact - 1.5 / 6_f64.log10()).abs() < 1e-12);
///
/// let rounded = engine.solve("673.456", RoundingTarget::Figures(3))?;
/// assert_eq!(rounded, 673.0);
/// # Ok::<(), sigfig_calc::CalcError>(())
/// ```
pub struct CalcEngine<E: Evaluator> {
    evaluator: E,
}

impl CalcEngine<EvalexprEvaluator> {
    /// Engine backed by the evalexpr evaluator
    pub fn with_evalexpr() -> Result<Self> {
        Ok(Self::new(EvalexprEvaluator::new()?))
    }
}

impl<E: Evaluator> CalcEngine<E> {
    pub fn new(evaluator: E) -> Self {
        Self { evaluator }
    }

    /// Rewrite display input into this engine's evaluator syntax
    pub fn normalize(&self, input: &str) -> String {
        normalizer::normalize(input, self.evaluator.syntax())
    }

    /// Normalize and evaluate without rounding
    pub fn evaluate(&self, input: &str) -> Result<f64> {
        let normalized = self.normalize(input);
        debug!(input = input, normalized = %normalized, "normalized expression");

        let value = self.evaluator.evaluate(&normalized)?;
        debug!(normalized = %normalized, value = value, "evaluated");

        Ok(value)
    }

    /// Normalize, evaluate, then apply the rounding target
    pub fn solve(&self, input: &str, target: RoundingTarget) -> Result<f64> {
        let value = self.evaluate(input)?;
        if target.is_off() {
            return Ok(value);
        }

        let rounded = target.apply(value);
        debug!(value = value, target = %target, rounded = rounded, "rounded");
        Ok(rounded)
    }

    /// Like [`solve`](Self::solve), with failures collapsed to `Outcome::Error`
    pub fn outcome(&self, input: &str, target: RoundingTarget) -> Outcome {
        match self.solve(input, target) {
            Ok(value) => Outcome::Value(value),
            Err(e) => {
                debug!(input = input, error = %e, "solve failed");
                Outcome::Error
            },
        }
    }
}
