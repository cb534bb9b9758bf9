//! Error type shared by the engine, the data catalog and the clock.

use std::fmt;

pub type EngineResult<T> = Result<T, EngineError>;

#[derive(Debug, Clone, PartialEq)]
pub enum EngineError {
    /// An algebraic operation got a scalar where a vector was required, or the reverse
    InvalidOperand {
        operation: &'static str,
        expected: &'static str,
    },
    /// Scalar division by zero or a gravitational singularity
    DivisionByZero(String),
    /// A catalog record lacks a field needed to build a body
    MissingData { body: String, field: String },
    /// Name lookup found nothing
    NotFound(String),
    /// Non-physical construction or control input
    InvalidParameter { name: String, reason: String },
}

impl EngineError {
    pub(crate) fn invalid_parameter(name: impl Into<String>, reason: impl Into<String>) -> Self {
        EngineError::InvalidParameter {
            name: name.into(),
            reason: reason.into(),
        }
    }

    pub(crate) fn missing(body: impl Into<String>, field: impl Into<String>) -> Self {
        EngineError::MissingData {
            body: body.into(),
            field: field.into(),
        }
    }
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::InvalidOperand { operation, expected } => {
                write!(f, "invalid operand for {operation}: expected {expected}")?;
                if *operation == "mul" && *expected == "scalar" {
                    write!(f, " (use dot() or cross() for vector products)")?;
                }
                Ok(())
            }
            EngineError::DivisionByZero(what) => write!(f, "division by zero: {what}"),
            EngineError::MissingData { body, field } => {
                write!(f, "missing data for `{body}`: no `{field}` field")
            }
            EngineError::NotFound(name) => write!(f, "no body named `{name}`"),
            EngineError::InvalidParameter { name, reason } => {
                write!(f, "invalid parameter `{name}`: {reason}")
            }
        }
    }
}

impl std::error::Error for EngineError {}
