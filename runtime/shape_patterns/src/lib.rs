//! Shape Patterns - the matcher framework.
//!
//! This crate provides:
//! - The pattern description handed over by the syntax layer (`Pattern`)
//! - Executable matchers built from it (`Matcher`, `build`, `MatcherBuilder`)
//! - Per-attempt binding accumulation (`Bindings`) and the single failure
//!   signal (`Mismatch`)
//! - Class-pattern targets: extractor functions (`Extractor`,
//!   `ExtractorRegistry`) and declared types whose constructor schema is the
//!   fallback (`Target`)
//!
//! # Architecture
//!
//! ```text
//! Pattern ──build──▶ SharedMatcher ──attempt_match(value)──▶ Ok(Bindings) | Err(Mismatch)
//! ```
//!
//! Matcher trees are built once and are immutable; they are `Send + Sync`
//! and may be shared across threads. Each attempt owns a fresh `Bindings`,
//! which is dropped whole if any sub-matcher fails, so callers never observe
//! partial bindings.

mod bindings;
mod build;
mod extract;
mod matcher;
mod pattern;

pub use bindings::Bindings;
pub use build::{build, MatcherBuilder};
pub use extract::{ExtractFn, Extracted, Extractor, ExtractorRegistry};
pub use matcher::{
    AliasMatcher, ClassMatcher, LiteralMatcher, MatchOutcome, Matcher, Mismatch, NameMatcher,
    SequenceMatcher, SharedMatcher, WildcardMatcher,
};
pub use pattern::{ClassPattern, Pattern, Target};

pub use shape_value::{Name, Value};
