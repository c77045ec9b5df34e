//! Turning pattern descriptions into matcher trees.

use std::sync::Arc;

use shape_value::{DeclaredSchema, SchemaProvider, SharedSchemaProvider};

use crate::matcher::{
    AliasMatcher, ClassMatcher, LiteralMatcher, NameMatcher, SequenceMatcher, SharedMatcher,
    WildcardMatcher,
};
use crate::pattern::Pattern;

/// Builds matcher trees that share one constructor schema provider.
#[derive(Clone)]
pub struct MatcherBuilder {
    schemas: SharedSchemaProvider,
}

impl MatcherBuilder {
    /// Builder whose class matchers consult `schemas` for field order.
    pub fn new(schemas: impl SchemaProvider + 'static) -> Self {
        MatcherBuilder {
            schemas: Arc::new(schemas),
        }
    }

    pub fn with_shared(schemas: SharedSchemaProvider) -> Self {
        MatcherBuilder { schemas }
    }

    /// Build the matcher tree for `pattern`.
    ///
    /// A `Name` pattern spelled `_` builds the wildcard matcher.
    pub fn build(&self, pattern: &Pattern) -> SharedMatcher {
        match pattern {
            Pattern::Wildcard => Arc::new(WildcardMatcher),
            Pattern::Name(name) if name.is_wildcard() => Arc::new(WildcardMatcher),
            Pattern::Literal(value) => Arc::new(LiteralMatcher::new(value.clone())),
            Pattern::Name(name) => Arc::new(NameMatcher::new(name.clone())),
            Pattern::Alias(name, inner) => {
                Arc::new(AliasMatcher::new(name.clone(), self.build(inner)))
            }
            Pattern::Sequence(items) => Arc::new(SequenceMatcher::new(
                items.iter().map(|item| self.build(item)).collect(),
            )),
            Pattern::Class(class) => {
                let positional = class.positional.iter().map(|p| self.build(p)).collect();
                let keywords = class
                    .keywords
                    .iter()
                    .map(|(name, p)| (name.clone(), self.build(p)))
                    .collect();
                Arc::new(ClassMatcher::new(
                    class.target.clone(),
                    positional,
                    keywords,
                    Arc::clone(&self.schemas),
                ))
            }
        }
    }
}

impl Default for MatcherBuilder {
    fn default() -> Self {
        MatcherBuilder::new(DeclaredSchema)
    }
}

/// Build a matcher tree that reads constructor schemas off type definitions.
pub fn build(pattern: &Pattern) -> SharedMatcher {
    tracing::debug!(%pattern, depth = pattern.depth(), "building matcher");
    MatcherBuilder::default().build(pattern)
}
