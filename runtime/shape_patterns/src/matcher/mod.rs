//! Executable matchers.
//!
//! One matcher per pattern node. Matchers are stateless between attempts and
//! never mutate the candidate value; the only per-attempt state is the
//! `Bindings` threaded through `match_into`.
//!
//! # Failure Discipline
//!
//! Every failure, whatever its cause, is the same zero-sized `Mismatch`.
//! Composite matchers propagate it with `?`, so the first failing sub-matcher
//! aborts the whole attempt. `attempt_match` owns the `Bindings` for the
//! attempt and only returns them on total success.

mod class;

use std::fmt;
use std::sync::Arc;

use shape_value::{Name, Value};

use crate::bindings::Bindings;

pub use class::ClassMatcher;

/// The single failure signal of the matcher framework.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, thiserror::Error)]
#[error("pattern mismatch")]
pub struct Mismatch;

/// Result of one matching attempt.
pub type MatchOutcome = Result<Bindings, Mismatch>;

/// Shared, immutable matcher tree.
pub type SharedMatcher = Arc<dyn Matcher>;

/// Matches a candidate value, accumulating bindings.
pub trait Matcher: Send + Sync + fmt::Debug {
    /// Match `value`, adding bindings to `bindings`.
    ///
    /// On `Err`, `bindings` may hold entries from sub-matchers that succeeded
    /// before the failure; callers must discard it.
    fn match_into(&self, value: &Value, bindings: &mut Bindings) -> Result<(), Mismatch>;

    /// Match `value` as a top-level pattern.
    fn attempt_match(&self, value: &Value) -> MatchOutcome {
        let mut bindings = Bindings::new();
        self.match_into(value, &mut bindings)?;
        Ok(bindings)
    }
}

/// Matches a structurally equal value.
#[derive(Debug)]
pub struct LiteralMatcher {
    constant: Value,
}

impl LiteralMatcher {
    pub fn new(constant: Value) -> Self {
        LiteralMatcher { constant }
    }
}

impl Matcher for LiteralMatcher {
    fn match_into(&self, value: &Value, _: &mut Bindings) -> Result<(), Mismatch> {
        if *value == self.constant {
            Ok(())
        } else {
            tracing::trace!(expected = %self.constant, got = %value, "literal mismatch");
            Err(Mismatch)
        }
    }
}

/// Binds the candidate to a name. Never fails.
#[derive(Debug)]
pub struct NameMatcher {
    name: Name,
}

impl NameMatcher {
    pub fn new(name: Name) -> Self {
        NameMatcher { name }
    }
}

impl Matcher for NameMatcher {
    fn match_into(&self, value: &Value, bindings: &mut Bindings) -> Result<(), Mismatch> {
        bindings.bind(self.name.clone(), value.clone());
        Ok(())
    }
}

/// Matches anything without binding.
#[derive(Debug)]
pub struct WildcardMatcher;

impl Matcher for WildcardMatcher {
    fn match_into(&self, _: &Value, _: &mut Bindings) -> Result<(), Mismatch> {
        Ok(())
    }
}

/// Binds the whole candidate after the inner matcher succeeds.
#[derive(Debug)]
pub struct AliasMatcher {
    name: Name,
    inner: SharedMatcher,
}

impl AliasMatcher {
    pub fn new(name: Name, inner: SharedMatcher) -> Self {
        AliasMatcher { name, inner }
    }
}

impl Matcher for AliasMatcher {
    fn match_into(&self, value: &Value, bindings: &mut Bindings) -> Result<(), Mismatch> {
        self.inner.match_into(value, bindings)?;
        bindings.bind(self.name.clone(), value.clone());
        Ok(())
    }
}

/// Matches a list or tuple of exactly `items.len()` elements.
#[derive(Debug)]
pub struct SequenceMatcher {
    items: Vec<SharedMatcher>,
}

impl SequenceMatcher {
    pub fn new(items: Vec<SharedMatcher>) -> Self {
        SequenceMatcher { items }
    }
}

impl Matcher for SequenceMatcher {
    fn match_into(&self, value: &Value, bindings: &mut Bindings) -> Result<(), Mismatch> {
        let Some(elements) = value.as_sequence() else {
            tracing::trace!(got = %value.type_name(), "sequence pattern on non-sequence");
            return Err(Mismatch);
        };
        if elements.len() != self.items.len() {
            tracing::trace!(
                expected = self.items.len(),
                got = elements.len(),
                "sequence arity mismatch"
            );
            return Err(Mismatch);
        }
        for (matcher, element) in self.items.iter().zip(elements) {
            matcher.match_into(element, bindings)?;
        }
        Ok(())
    }
}
