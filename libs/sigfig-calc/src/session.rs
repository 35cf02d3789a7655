//! Interaction state of the calculator
//!
//! A [`Session`] is an immutable value. Every user action is a transition
//! that takes the current session and returns the next one, so each action
//! can be exercised without any UI attached.

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use crate::engine::{CalcEngine, Outcome};
use crate::error::{CalcError, Result};
use crate::evaluator::Evaluator;
use crate::rounder::RoundingTarget;

const DIGITS: [&str; 10] = ["0", "1", "2", "3", "4", "5", "6", "7", "8", "9"];

/// A keypad button that appends to the input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Digit(u8),
    Point,
    Divide,
    Multiply,
    Plus,
    Minus,
    Power,
    Open,
    Close,
    Log,
    Ln,
    Euler,
}

impl Key {
    /// Every keypad button, in keypad order
    pub const ALL: [Key; 21] = [
        Key::Divide,
        Key::Digit(1),
        Key::Digit(2),
        Key::Digit(3),
        Key::Power,
        Key::Multiply,
        Key::Digit(4),
        Key::Digit(5),
        Key::Digit(6),
        Key::Log,
        Key::Plus,
        Key::Digit(7),
        Key::Digit(8),
        Key::Digit(9),
        Key::Ln,
        Key::Minus,
        Key::Open,
        Key::Digit(0),
        Key::Close,
        Key::Euler,
        Key::Point,
    ];

    /// Digit button `0..=9`
    pub fn digit(d: u8) -> Result<Self> {
        if d < 10 {
            Ok(Key::Digit(d))
        } else {
            Err(CalcError::expression(format!("No digit key {}", d)))
        }
    }

    /// Text the button appends to the input
    ///
    /// `Digit` values above 9 are a caller bug; use [`Key::digit`] for
    /// unchecked numbers.
    pub fn symbol(self) -> &'static str {
        match self {
            Key::Digit(d) => {
                debug_assert!(d < 10, "digit key out of range: {}", d);
                DIGITS[usize::from(d % 10)]
            },
            Key::Point => ".",
            Key::Divide => "÷",
            Key::Multiply => "×",
            Key::Plus => "+",
            Key::Minus => "-",
            Key::Power => "^",
            Key::Open => "(",
            Key::Close => ")",
            Key::Log => "log",
            Key::Ln => "ln",
            Key::Euler => "e",
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for Key {
    type Err = CalcError;

    /// Accepts the button label, plus `/` and `*` for `÷` and `×`
    fn from_str(s: &str) -> Result<Self> {
        let key = match s {
            "/" => Key::Divide,
            "*" => Key::Multiply,
            _ => Key::ALL
                .into_iter()
                .find(|key| key.symbol() == s)
                .ok_or_else(|| CalcError::expression(format!("Unknown key '{}'", s)))?,
        };
        Ok(key)
    }
}

/// Current input, last result and rounding target
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Session {
    input: String,
    result: Option<Outcome>,
    target: RoundingTarget,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_target(target: RoundingTarget) -> Self {
        Self {
            target,
            ..Self::default()
        }
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    /// Result of the last solve, if any
    pub fn result(&self) -> Option<Outcome> {
        self.result
    }

    pub fn target(&self) -> RoundingTarget {
        self.target
    }

    /// Append a keypad symbol to the input
    #[must_use]
    pub fn press(mut self, key: Key) -> Self {
        self.input.push_str(key.symbol());
        self
    }

    /// Replace the input with typed text
    #[must_use]
    pub fn set_input(mut self, text: impl Into<String>) -> Self {
        self.input = text.into();
        self
    }

    /// Empty the input and drop the last result; the rounding target stays
    #[must_use]
    pub fn clear(self) -> Self {
        Self::with_target(self.target)
    }

    /// Remove the last keypad entry (`log` and `ln` go as a whole)
    #[must_use]
    pub fn backspace(mut self) -> Self {
        let cut = [Key::Log, Key::Ln]
            .into_iter()
            .map(Key::symbol)
            .find(|symbol| self.input.ends_with(symbol))
            .map(str::len)
            .or_else(|| self.input.chars().next_back().map(char::len_utf8))
            .unwrap_or(0);

        self.input.truncate(self.input.len() - cut);
        self
    }

    /// Select the rounding target used by the next solve
    #[must_use]
    pub fn select_target(mut self, target: RoundingTarget) -> Self {
        self.target = target;
        self
    }

    /// Solve the current input; the input is kept for further editing
    #[must_use]
    pub fn solve<E: Evaluator>(mut self, engine: &CalcEngine<E>) -> Self {
        self.result = Some(engine.outcome(&self.input, self.target));
        self
    }
}

#[cfg(test)]
#[allow(clippy::disallowed_methods)]
mod tests {
    use super::*;

    fn create_engine() -> CalcEngine<crate::evaluator::EvalexprEvaluator> {
        CalcEngine::with_evalexpr().unwrap()
    }

    fn press_all(session: Session, keys: &[Key]) -> Session {
        keys.iter().fold(session, |s, key| s.press(*key))
    }

    #[test]
    fn test_default_session() {
        let session = Session::new();
        assert_eq!(session.input(), "");
        assert_eq!(session.result(), None);
        assert_eq!(session.target(), RoundingTarget::Off);
    }

    #[test]
    fn test_press_builds_input() {
        let session = press_all(
            Session::new(),
            &[
                Key::Digit(1),
                Key::Point,
                Key::Digit(5),
                Key::Divide,
                Key::Log,
                Key::Open,
                Key::Digit(5),
                Key::Plus,
                Key::Digit(1),
                Key::Close,
            ],
        );
        assert_eq!(session.input(), "1.5÷log(5+1)");
    }

    #[test]
    fn test_backspace() {
        let session = Session::new().set_input("2×ln");
        let session = session.backspace();
        assert_eq!(session.input(), "2×");
        let session = session.backspace();
        assert_eq!(session.input(), "2");
        let session = session.backspace().backspace();
        assert_eq!(session.input(), "");
    }

    #[test]
    fn test_clear_keeps_target() {
        let engine = create_engine();
        let session = Session::new()
            .select_target(RoundingTarget::Figures(2))
            .set_input("1+1")
            .solve(&engine)
            .clear();

        assert_eq!(session.input(), "");
        assert_eq!(session.result(), None);
        assert_eq!(session.target(), RoundingTarget::Figures(2));
    }

    #[test]
    fn test_solve_with_target() {
        let engine = create_engine();
        let session = Session::new()
            .set_input("673.456")
            .select_target(RoundingTarget::Figures(3))
            .solve(&engine);

        assert_eq!(session.result(), Some(Outcome::Value(673.0)));
        assert_eq!(session.input(), "673.456");
    }

    #[test]
    fn test_solve_error_replaces_result() {
        let engine = create_engine();
        let session = Session::new().set_input("2×3").solve(&engine);
        assert_eq!(session.result(), Some(Outcome::Value(6.0)));

        let session = session.press(Key::Divide).press(Key::Open).solve(&engine);
        assert_eq!(session.result(), Some(Outcome::Error));
    }

    #[test]
    fn test_transitions_leave_original_untouched() {
        let before = Session::new().set_input("12");
        let after = before.clone().press(Key::Digit(3));

        assert_eq!(before.input(), "12");
        assert_eq!(after.input(), "123");
    }

    #[test]
    fn test_digit_constructor() {
        assert_eq!(Key::digit(0).unwrap(), Key::Digit(0));
        assert_eq!(Key::digit(9).unwrap().symbol(), "9");
        assert!(Key::digit(10).is_err());
        assert!(Key::digit(12).is_err());
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "digit key out of range")]
    fn test_out_of_range_digit_symbol() {
        let _ = Key::Digit(12).symbol();
    }

    #[test]
    fn test_key_parse() {
        assert_eq!("log".parse::<Key>().unwrap(), Key::Log);
        assert_eq!("÷".parse::<Key>().unwrap(), Key::Divide);
        assert_eq!("*".parse::<Key>().unwrap(), Key::Multiply);
        assert_eq!("7".parse::<Key>().unwrap(), Key::Digit(7));
        assert!("sin".parse::<Key>().is_err());

        for key in Key::ALL {
            assert_eq!(key.to_string().parse::<Key>().unwrap(), key);
        }
    }
}
