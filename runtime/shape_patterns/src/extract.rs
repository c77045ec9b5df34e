//! Extraction protocol: custom decomposition for class patterns.
//!
//! An extractor is a plain function registered under a target name. A class
//! pattern whose target is an extractor hands the candidate value to it
//! instead of checking the value's type, so a tag such as `Half(n)` can match
//! an integer, a string, or anything else the function chooses to accept.

use std::fmt;

use rustc_hash::FxHashMap;

use shape_value::{Name, Value};

/// Extraction function.
///
/// Receives the candidate and the keyword field names requested by the
/// pattern. Returns `None` to reject the candidate.
pub type ExtractFn = fn(&Value, &[Name]) -> Option<Extracted>;

/// Fields produced by an extractor.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Extracted {
    /// Matched by index against positional sub-patterns.
    pub positional: Vec<Value>,
    /// Matched by name against keyword sub-patterns.
    pub keywords: FxHashMap<Name, Value>,
}

impl Extracted {
    pub fn positional(values: Vec<Value>) -> Self {
        Extracted {
            positional: values,
            keywords: FxHashMap::default(),
        }
    }

    #[must_use]
    pub fn with_keyword(mut self, name: impl Into<Name>, value: Value) -> Self {
        self.keywords.insert(name.into(), value);
        self
    }
}

/// A named extraction function.
#[derive(Clone)]
pub struct Extractor {
    name: Name,
    extract: ExtractFn,
}

impl Extractor {
    pub fn new(name: impl Into<Name>, extract: ExtractFn) -> Self {
        Extractor {
            name: name.into(),
            extract,
        }
    }

    pub fn name(&self) -> &Name {
        &self.name
    }

    #[inline]
    pub fn extract(&self, value: &Value, requested: &[Name]) -> Option<Extracted> {
        (self.extract)(value, requested)
    }
}

impl fmt::Debug for Extractor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Extractor({})", self.name)
    }
}

/// Extractors keyed by pattern target name.
#[derive(Clone, Debug, Default)]
pub struct ExtractorRegistry {
    extractors: FxHashMap<Name, Extractor>,
}

impl ExtractorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `extract` under `name`, replacing any earlier registration.
    pub fn register(&mut self, name: impl Into<Name>, extract: ExtractFn) -> Extractor {
        let extractor = Extractor::new(name, extract);
        if self
            .extractors
            .insert(extractor.name.clone(), extractor.clone())
            .is_some()
        {
            tracing::debug!(name = %extractor.name, "replaced extractor");
        }
        extractor
    }

    pub fn get(&self, name: &str) -> Option<Extractor> {
        self.extractors.get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.extractors.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.extractors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.extractors.is_empty()
    }
}
