//! Crate-wide error taxonomy
//!
//! One variant per failure kind a primitive handler can surface; the
//! Terminal Result's `error` field is always `InterpError::message()`.

use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum InterpError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("not interactable: {0}")]
    NotInteractable(String),

    #[error("timeout: {0}")]
    Timeout(String),

    #[error("assertion failed: {0}")]
    AssertionFailed(String),

    #[error("divide by zero: {0}")]
    DivideByZero(String),

    #[error("decode error: {0}")]
    Decode(String),

    #[error("{0}")]
    Unknown(String),
}

pub type Result<T> = std::result::Result<T, InterpError>;

impl InterpError {
    #[inline]
    pub fn invalid_argument<S: Into<String>>(msg: S) -> Self {
        Self::InvalidArgument(msg.into())
    }

    #[inline]
    pub fn not_found<S: Into<String>>(msg: S) -> Self {
        Self::NotFound(msg.into())
    }

    #[inline]
    pub fn not_interactable<S: Into<String>>(msg: S) -> Self {
        Self::NotInteractable(msg.into())
    }

    #[inline]
    pub fn timeout<S: Into<String>>(msg: S) -> Self {
        Self::Timeout(msg.into())
    }

    #[inline]
    pub fn assertion_failed<S: Into<String>>(msg: S) -> Self {
        Self::AssertionFailed(msg.into())
    }

    #[inline]
    pub fn divide_by_zero<S: Into<String>>(msg: S) -> Self {
        Self::DivideByZero(msg.into())
    }

    #[inline]
    pub fn decode<S: Into<String>>(msg: S) -> Self {
        Self::Decode(msg.into())
    }

    #[inline]
    pub fn unknown<S: Into<String>>(msg: S) -> Self {
        Self::Unknown(msg.into())
    }

    /// Kind tag used on the Terminal Result and in log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidArgument(_) => "invalidArgument",
            Self::NotFound(_) => "notFound",
            Self::NotInteractable(_) => "notInteractable",
            Self::Timeout(_) => "timeout",
            Self::AssertionFailed(_) => "assertionFailed",
            Self::DivideByZero(_) => "divideByZero",
            Self::Decode(_) => "decode",
            Self::Unknown(_) => "unknown",
        }
    }

    /// Add context to an error, matching the teacher's `context()` helper.
    pub fn context<C: std::fmt::Display>(self, context: C) -> Self {
        let kind_msg = |msg: String| format!("{context}: {msg}");
        match self {
            Self::InvalidArgument(msg) => Self::InvalidArgument(kind_msg(msg)),
            Self::NotFound(msg) => Self::NotFound(kind_msg(msg)),
            Self::NotInteractable(msg) => Self::NotInteractable(kind_msg(msg)),
            Self::Timeout(msg) => Self::Timeout(kind_msg(msg)),
            Self::AssertionFailed(msg) => Self::AssertionFailed(kind_msg(msg)),
            Self::DivideByZero(msg) => Self::DivideByZero(kind_msg(msg)),
            Self::Decode(msg) => Self::Decode(kind_msg(msg)),
            Self::Unknown(msg) => Self::Unknown(kind_msg(msg)),
        }
    }

    pub fn message(&self) -> String {
        self.to_string()
    }
}

impl From<serde_json::Error> for InterpError {
    fn from(err: serde_json::Error) -> Self {
        InterpError::Decode(format!("json error: {err}"))
    }
}

impl From<std::io::Error> for InterpError {
    fn from(err: std::io::Error) -> Self {
        InterpError::Unknown(format!("io error: {err}"))
    }
}

#[cfg(test)]
mod error_test;
