//! Errors surfaced by switch and patterns-block evaluation.
//!
//! Inside a pattern every failure is a payload-free `Mismatch`. Once a
//! mismatch escapes a patterns block it becomes an `EvalError` of kind
//! `PatternMismatch`, carrying the rendered pattern and value so the failure
//! is attributable. Factory functions are the public way to build errors.

use std::fmt;

use shape_patterns::Pattern;
use shape_value::Value;

/// Result of evaluating a body or a value source.
pub type EvalResult = Result<Value, EvalError>;

/// Typed error category.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EvalErrorKind {
    /// A destructuring statement's value did not fit its pattern.
    PatternMismatch { pattern: String, value: String },
    /// No switch branch matched and there was no default.
    NonExhaustiveMatch { scrutinee: String },
    UndefinedVariable { name: String },
    /// Errors raised by caller-supplied bodies.
    Custom { message: String },
}

impl fmt::Display for EvalErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PatternMismatch { pattern, value } => {
                write!(f, "pattern mismatch: {value} does not match {pattern}")
            }
            Self::NonExhaustiveMatch { scrutinee } => {
                write!(f, "non-exhaustive match: no branch matched {scrutinee}")
            }
            Self::UndefinedVariable { name } => write!(f, "undefined variable: {name}"),
            Self::Custom { message } => write!(f, "{message}"),
        }
    }
}

/// Evaluation error.
#[derive(Clone, Debug)]
pub struct EvalError {
    pub kind: EvalErrorKind,
    /// Equals `kind.to_string()` for factory-built errors.
    pub message: String,
    /// Secondary context, outermost last.
    pub notes: Vec<String>,
}

impl EvalError {
    /// Error with `Custom` kind, for use by body callbacks.
    pub fn new(message: impl Into<String>) -> Self {
        let message = message.into();
        Self {
            kind: EvalErrorKind::Custom {
                message: message.clone(),
            },
            message,
            notes: Vec::new(),
        }
    }

    fn from_kind(kind: EvalErrorKind) -> Self {
        let message = kind.to_string();
        Self {
            kind,
            message,
            notes: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    pub fn is_pattern_mismatch(&self) -> bool {
        matches!(self.kind, EvalErrorKind::PatternMismatch { .. })
    }
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)?;
        for note in &self.notes {
            write!(f, "\n  note: {note}")?;
        }
        Ok(())
    }
}

impl std::error::Error for EvalError {}

// Factory functions

pub fn pattern_mismatch(pattern: &Pattern, value: &Value) -> EvalError {
    EvalError::from_kind(EvalErrorKind::PatternMismatch {
        pattern: pattern.to_string(),
        value: value.to_string(),
    })
}

pub fn non_exhaustive_match(scrutinee: &Value) -> EvalError {
    EvalError::from_kind(EvalErrorKind::NonExhaustiveMatch {
        scrutinee: scrutinee.to_string(),
    })
}

pub fn undefined_variable(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UndefinedVariable {
        name: name.to_string(),
    })
}
