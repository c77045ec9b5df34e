//! Patterns blocks: sequential destructuring that fails hard.
//!
//! Each statement `pattern << source` evaluates its source in the current
//! environment, so a statement can destructure what an earlier one bound.
//! A mismatch is not caught: it ends the block and reaches the caller as a
//! `PatternMismatch` error naming the statement's pattern and value.

use shape_patterns::{MatcherBuilder, Pattern, SharedMatcher};
use shape_value::{Name, Value};

use crate::environment::Environment;
use crate::errors::{pattern_mismatch, undefined_variable, EvalResult};
use crate::EvalError;

/// Where a statement's value comes from, for blocks run with [`PatternsBlock::eval`].
#[derive(Clone, Debug)]
pub enum Source {
    Value(Value),
    /// A variable visible in the environment, including earlier bindings.
    Var(Name),
}

impl Source {
    pub fn var(name: impl Into<Name>) -> Self {
        Source::Var(name.into())
    }

    fn resolve(&self, env: &Environment) -> EvalResult {
        match self {
            Source::Value(value) => Ok(value.clone()),
            Source::Var(name) => env
                .lookup(name.as_str())
                .ok_or_else(|| undefined_variable(name.as_str())),
        }
    }
}

impl From<Value> for Source {
    fn from(value: Value) -> Self {
        Source::Value(value)
    }
}

struct Destructure<S> {
    pattern: Pattern,
    matcher: SharedMatcher,
    source: S,
}

/// Ordered `pattern << source` statements.
pub struct PatternsBlock<S> {
    builder: MatcherBuilder,
    statements: Vec<Destructure<S>>,
}

impl<S> PatternsBlock<S> {
    pub fn new() -> Self {
        Self::with_builder(MatcherBuilder::default())
    }

    pub fn with_builder(builder: MatcherBuilder) -> Self {
        PatternsBlock {
            builder,
            statements: Vec::new(),
        }
    }

    /// Append `pattern << source`.
    #[must_use]
    pub fn destructure(mut self, pattern: Pattern, source: S) -> Self {
        let matcher = self.builder.build(&pattern);
        self.statements.push(Destructure {
            pattern,
            matcher,
            source,
        });
        self
    }

    pub fn len(&self) -> usize {
        self.statements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }

    /// Run every statement in order, defining bindings in the current scope.
    ///
    /// Stops at the first failure, whether from evaluating a source or from
    /// a mismatch; statements after it do not run.
    pub fn run<F>(&self, env: &mut Environment, mut eval: F) -> Result<(), EvalError>
    where
        F: FnMut(&S, &Environment) -> EvalResult,
    {
        for (index, statement) in self.statements.iter().enumerate() {
            let value = eval(&statement.source, env)?;
            match statement.matcher.attempt_match(&value) {
                Ok(bindings) => {
                    tracing::trace!(
                        statement = index,
                        bound = bindings.len(),
                        "destructured"
                    );
                    env.define_all(bindings);
                }
                Err(_) => {
                    tracing::debug!(
                        statement = index,
                        pattern = %statement.pattern,
                        %value,
                        "patterns block mismatch"
                    );
                    return Err(pattern_mismatch(&statement.pattern, &value).with_note(
                        format!("in statement {} of patterns block", index + 1),
                    ));
                }
            }
        }
        Ok(())
    }
}

impl PatternsBlock<Source> {
    /// Run with sources resolved against `env`.
    pub fn eval(&self, env: &mut Environment) -> Result<(), EvalError> {
        self.run(env, |source, env| source.resolve(env))
    }
}

impl<S> Default for PatternsBlock<S> {
    fn default() -> Self {
        Self::new()
    }
}
