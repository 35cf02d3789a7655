//! Error types for sigfig-calc

use thiserror::Error;

/// Calculation errors
#[derive(Debug, Error)]
pub enum CalcError {
    #[error("Expression error: {0}")]
    Expression(String),

    #[error("Invalid rounding target: {0}")]
    InvalidTarget(String),
}

impl CalcError {
    pub fn expression(msg: impl Into<String>) -> Self {
        Self::Expression(msg.into())
    }

    pub fn invalid_target(msg: impl Into<String>) -> Self {
        Self::InvalidTarget(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, CalcError>;
