//! sigfig-calc - Significant figure calculator library
//!
//! Counts significant figures in numeric literals, solves calculator
//! expressions through an external evaluator, and rounds results to a chosen
//! number of significant figures.
//!
//! # Features
//!
//! - **Counter**: significant figures of a literal (`"0.0025"` -> 2)
//! - **Rounder**: round half away from zero to 1-5 significant figures
//! - **Normalizer**: keypad symbols (`÷ × log ln e`) to evaluator syntax
//! - **Engine**: normalize -> evaluate -> round, with a generic error outcome
//! - **Session**: immutable calculator state with pure transitions
//!
//! # Example
//!
//! ```rust
//! use sigfig_calc::{count_significant_figures, CalcEngine, Key, RoundingTarget, Session};
//!
//! assert_eq!(count_significant_figures("30.00"), 4);
//!
//! let engine = CalcEngine::with_evalexpr()?;
//! let session = Session::new()
//!     .press(Key::Digit(2))
//!     .press(Key::Divide)
//!     .press(Key::Digit(3))
//!     .select_target(RoundingTarget::Figures(2))
//!     .solve(&engine);
//!
//! assert_eq!(session.result().and_then(|r| r.value()), Some(0.67));
//! # Ok::<(), sigfig_calc::CalcError>(())
//! ```
//!
//! # Display symbols
//!
//! | Keypad | evalexpr |
//! |--------|----------|
//! | `÷` | `/` |
//! | `×` | `*` |
//! | `log` | `math::log10` |
//! | `ln` | `math::ln` |
//! | `e` | `math::e` |

pub mod counter;
pub mod engine;
pub mod error;
pub mod evaluator;
pub mod normalizer;
pub mod rounder;
pub mod session;

// Re-exports for convenience
pub use counter::{count_literals, count_significant_figures, LiteralCount};
pub use engine::{CalcEngine, Outcome};
pub use error::{CalcError, Result};
pub use evaluator::{EvalexprEvaluator, Evaluator};
pub use normalizer::{normalize, EvaluatorSyntax};
pub use rounder::{round_to_significant_figures, RoundingTarget, MAX_FIGURES};
pub use session::{Key, Session};
