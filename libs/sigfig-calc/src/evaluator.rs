//! Expression evaluator seam
//!
//! The calculator does not parse arithmetic itself. Anything that can turn
//! a normalized expression into an `f64` implements [`Evaluator`]; the
//! default implementation is backed by evalexpr.
//!
//! Supported by the evalexpr backend:
//! - Arithmetic: +, -, *, /, ^
//! - Grouping: ( )
//! - Functions: `math::log10`, `math::ln`
//! - Constants: `math::e`

use crate::error::{CalcError, Result};
use crate::normalizer::EvaluatorSyntax;
use evalexpr::{ContextWithMutableVariables, HashMapContext, Value};

/// External expression evaluator
pub trait Evaluator {
    /// Names this evaluator expects for `log`, `ln` and `e`
    fn syntax(&self) -> EvaluatorSyntax;

    /// Evaluate an already-normalized expression
    fn evaluate(&self, expression: &str) -> Result<f64>;
}

/// evalexpr-backed evaluator
pub struct EvalexprEvaluator {
    context: HashMapContext,
}

impl EvalexprEvaluator {
    /// Create an evaluator with Euler's number bound under its evalexpr name
    pub fn new() -> Result<Self> {
        let mut context = HashMapContext::new();
        let euler = EvaluatorSyntax::EVALEXPR.euler;

        context
            .set_value(euler.to_string(), Value::Float(std::f64::consts::E))
            .map_err(|e| {
                CalcError::expression(format!("Failed to set constant {}: {}", euler, e))
            })?;

        Ok(Self { context })
    }

    /// Convert evalexpr Value to f64
    fn value_to_f64(value: Value, expression: &str) -> Result<f64> {
        let number = match value {
            Value::Float(f) => f,
            Value::Int(i) => i as f64,
            _ => {
                return Err(CalcError::expression(format!(
                    "Expression did not evaluate to a number: {}",
                    expression
                )))
            },
        };

        // evalexpr yields inf/NaN for x/0 and logs of non-positive values
        if number.is_finite() {
            Ok(number)
        } else {
            Err(CalcError::expression(format!(
                "Expression '{}' is undefined ({})",
                expression, number
            )))
        }
    }
}

impl Evaluator for EvalexprEvaluator {
    fn syntax(&self) -> EvaluatorSyntax {
        EvaluatorSyntax::EVALEXPR
    }

    fn evaluate(&self, expression: &str) -> Result<f64> {
        let result = evalexpr::eval_with_context(expression, &self.context).map_err(|e| {
            CalcError::expression(format!("Failed to evaluate '{}': {}", expression, e))
        })?;

        Self::value_to_f64(result, expression)
    }
}
