//! Precision rounding to a number of significant figures
//!
//! Ties round half away from zero. The even rule (banker's rounding) is not
//! applied.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{CalcError, Result};

/// Largest rounding target the calculator offers
pub const MAX_FIGURES: u8 = 5;

/// Round `value` to `sig` significant figures
///
/// Zero stays zero. Non-finite values and `sig == 0` are returned unchanged,
/// as is a value whose rounding would overflow `f64`.
///
/// Rounding works on the shortest decimal form of `value`, so ties are
/// decided on the digits as typed: `1.45` rounds to `1.5` even though the
/// stored double is slightly below it. The result is parsed back from the
/// rounded digits and is the nearest double to that decimal at any
/// magnitude, subnormals included.
///
/// ```
/// use sigfig_calc::round_to_significant_figures;
///
/// assert_eq!(round_to_significant_figures(673.456, 3), 673.0);
/// assert_eq!(round_to_significant_figures(-2.5, 1), -3.0);
/// assert_eq!(round_to_significant_figures(1.602176634e-30, 3), 1.6e-30);
/// ```
pub fn round_to_significant_figures(value: f64, sig: u32) -> f64 {
    if value == 0.0 {
        return 0.0;
    }
    if sig == 0 || !value.is_finite() {
        return value;
    }

    let Some(decimal) = Decimal::shortest(value) else {
        return value;
    };
    let sig = sig as usize;
    if decimal.digits.len() <= sig {
        return value;
    }

    let rounded = decimal.round(sig).to_string().parse::<f64>();
    match rounded {
        Ok(rounded) if rounded.is_finite() => rounded,
        _ => value,
    }
}

/// `[-]d.ddd x 10^exponent` with one digit per element
struct Decimal {
    negative: bool,
    digits: Vec<u8>,
    exponent: i32,
}

impl Decimal {
    /// Shortest digits that round-trip to `value` (`{:e}` formatting)
    fn shortest(value: f64) -> Option<Self> {
        let text = format!("{:e}", value);
        let (mantissa, exponent) = text.split_once('e')?;
        let exponent = exponent.parse().ok()?;
        let (negative, mantissa) = match mantissa.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, mantissa),
        };
        let digits = mantissa
            .bytes()
            .filter(u8::is_ascii_digit)
            .map(|b| b - b'0')
            .collect();

        Some(Self {
            negative,
            digits,
            exponent,
        })
    }

    /// Keep `sig` digits, half away from zero; `sig` must be below the digit count
    fn round(mut self, sig: usize) -> Self {
        let round_up = self.digits[sig] >= 5;
        self.digits.truncate(sig);

        if round_up {
            match self.digits.iter().rposition(|&d| d < 9) {
                Some(pos) => {
                    self.digits[pos] += 1;
                    self.digits[pos + 1..].fill(0);
                },
                None => {
                    // 99.. carries into the next power of ten
                    self.digits.fill(0);
                    self.digits[0] = 1;
                    self.exponent += 1;
                },
            }
        }
        self
    }
}

/// Integer mantissa form, e.g. `-673e0`, which `f64::from_str` reads exactly
impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.negative {
            f.write_str("-")?;
        }
        for digit in &self.digits {
            write!(f, "{}", digit)?;
        }
        let scale = self.exponent - (self.digits.len() as i32 - 1);
        write!(f, "e{}", scale)
    }
}

/// User-selected rounding for solved results
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "TargetRepr", into = "TargetRepr")]
pub enum RoundingTarget {
    /// Results are shown as evaluated
    #[default]
    Off,
    /// Round to this many significant figures, `1..=MAX_FIGURES`
    Figures(u8),
}

impl RoundingTarget {
    /// Validated constructor for `Figures`
    pub fn figures(count: u8) -> Result<Self> {
        if (1..=MAX_FIGURES).contains(&count) {
            Ok(Self::Figures(count))
        } else {
            Err(CalcError::invalid_target(format!(
                "{} (expected 1-{} or off)",
                count, MAX_FIGURES
            )))
        }
    }

    /// Apply the target to an evaluated value
    pub fn apply(self, value: f64) -> f64 {
        match self {
            Self::Off => value,
            Self::Figures(count) => round_to_significant_figures(value, u32::from(count)),
        }
    }

    pub fn is_off(self) -> bool {
        self == Self::Off
    }
}

/// `0` is the keypad's "off" button
impl TryFrom<u8> for RoundingTarget {
    type Error = CalcError;

    fn try_from(count: u8) -> Result<Self> {
        match count {
            0 => Ok(Self::Off),
            n => Self::figures(n),
        }
    }
}

impl FromStr for RoundingTarget {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("off") {
            return Ok(Self::Off);
        }
        let count: u8 = s
            .parse()
            .map_err(|_| CalcError::invalid_target(format!("'{}' (expected 1-5 or off)", s)))?;
        Self::try_from(count)
    }
}

impl fmt::Display for RoundingTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Off => write!(f, "off"),
            Self::Figures(count) => write!(f, "{}", count),
        }
    }
}

/// Config/JSON form: a bare number or the string `"off"`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum TargetRepr {
    Count(u8),
    Text(String),
}

impl TryFrom<TargetRepr> for RoundingTarget {
    type Error = CalcError;

    fn try_from(repr: TargetRepr) -> Result<Self> {
        match repr {
            TargetRepr::Count(count) => Self::try_from(count),
            TargetRepr::Text(text) => text.parse(),
        }
    }
}

impl From<RoundingTarget> for TargetRepr {
    fn from(target: RoundingTarget) -> Self {
        match target {
            RoundingTarget::Off => Self::Text("off".to_string()),
            RoundingTarget::Figures(count) => Self::Count(count),
        }
    }
}
