//! First-match-wins dispatch over pattern branches.
//!
//! # States
//!
//! ```text
//! Evaluating(0) ──mismatch──▶ Evaluating(1) ──mismatch──▶ … ──▶ Exhausted
//!      │                           │                              │
//!    match                       match                  default? run it
//!      ▼                           ▼                   otherwise NonExhaustiveMatch
//!  Matched(0)                  Matched(1)
//! ```
//!
//! A branch mismatch is expected and never leaves the switch. Once a branch
//! matches, no later branch is evaluated, even if it would also match.

use shape_patterns::{Bindings, MatcherBuilder, Pattern, SharedMatcher};
use shape_value::Value;

use crate::environment::Environment;
use crate::errors::{non_exhaustive_match, EvalResult};
use crate::EvalError;

/// Boxed body for switches evaluated with [`Switch::eval`].
pub type BodyFn = Box<dyn Fn(&mut Environment) -> EvalResult + Send + Sync>;

/// Which arm a switch selected.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Arm {
    /// Index of the matching branch.
    Branch(usize),
    Default,
}

/// A selected arm with the bindings its pattern produced.
#[derive(Debug)]
pub struct Selected<'a, B> {
    pub arm: Arm,
    pub body: &'a B,
    pub bindings: Bindings,
}

struct Branch<B> {
    pattern: Pattern,
    matcher: SharedMatcher,
    body: B,
}

/// Ordered `(pattern, body)` branches with an optional default body.
///
/// Generic over the body type: callers with their own body representation
/// use [`Switch::run`] with an executor; boxed closures use [`Switch::eval`].
pub struct Switch<B> {
    builder: MatcherBuilder,
    branches: Vec<Branch<B>>,
    default: Option<B>,
}

impl<B> Switch<B> {
    /// Switch whose class patterns read schemas off type definitions.
    pub fn new() -> Self {
        Self::with_builder(MatcherBuilder::default())
    }

    pub fn with_builder(builder: MatcherBuilder) -> Self {
        Switch {
            builder,
            branches: Vec::new(),
            default: None,
        }
    }

    /// Append a branch. Its matcher is built once, here.
    #[must_use]
    pub fn case(mut self, pattern: Pattern, body: B) -> Self {
        let matcher = self.builder.build(&pattern);
        self.branches.push(Branch {
            pattern,
            matcher,
            body,
        });
        self
    }

    /// Set the body run when no branch matches.
    #[must_use]
    pub fn otherwise(mut self, body: B) -> Self {
        self.default = Some(body);
        self
    }

    pub fn len(&self) -> usize {
        self.branches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.branches.is_empty()
    }

    pub fn has_default(&self) -> bool {
        self.default.is_some()
    }

    /// Pick the first matching branch, or the default.
    pub fn select(&self, scrutinee: &Value) -> Result<Selected<'_, B>, EvalError> {
        for (index, branch) in self.branches.iter().enumerate() {
            if let Ok(bindings) = branch.matcher.attempt_match(scrutinee) {
                tracing::debug!(
                    arm = index,
                    pattern = %branch.pattern,
                    bound = bindings.len(),
                    "switch branch matched"
                );
                return Ok(Selected {
                    arm: Arm::Branch(index),
                    body: &branch.body,
                    bindings,
                });
            }
            tracing::trace!(arm = index, pattern = %branch.pattern, "switch branch skipped");
        }
        match &self.default {
            Some(body) => {
                tracing::debug!(%scrutinee, "switch fell through to default");
                Ok(Selected {
                    arm: Arm::Default,
                    body,
                    bindings: Bindings::new(),
                })
            }
            None => {
                tracing::debug!(%scrutinee, branches = self.branches.len(), "switch exhausted");
                Err(non_exhaustive_match(scrutinee))
            }
        }
    }

    /// Select an arm and execute its body with the arm's bindings in a fresh scope.
    pub fn run<F>(&self, scrutinee: &Value, env: &mut Environment, mut exec: F) -> EvalResult
    where
        F: FnMut(&B, &mut Environment) -> EvalResult,
    {
        let selected = self.select(scrutinee)?;
        let mut scoped = env.scoped();
        scoped.define_all(selected.bindings);
        exec(selected.body, &mut *scoped)
    }
}

impl Switch<BodyFn> {
    /// Run the selected boxed body.
    pub fn eval(&self, scrutinee: &Value, env: &mut Environment) -> EvalResult {
        self.run(scrutinee, env, |body, env| body(env))
    }
}

impl<B> Default for Switch<B> {
    fn default() -> Self {
        Self::new()
    }
}
