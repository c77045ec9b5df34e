//! Shape Eval - the constructs that drive the matcher framework.
//!
//! This crate provides:
//! - `Switch`: first-match-wins dispatch with an optional default body
//! - `PatternsBlock`: sequential destructuring that fails hard
//! - `Environment`: the scope stack that receives match bindings
//! - `EvalError`: errors surfaced to callers, including `PatternMismatch`
//!
//! # Logging
//!
//! Branch selection and block failures are traced at `debug`; individual
//! matcher failures at `trace`. Call [`init_tracing`] once and set e.g.
//! `RUST_LOG=shape_patterns=trace,shape_eval=debug`.

mod block;
mod environment;
pub mod errors;
mod switch;

use std::sync::Once;

pub use block::{PatternsBlock, Source};
pub use environment::{Environment, LocalScope, Scope, ScopedEnvironment};
pub use errors::{
    non_exhaustive_match, pattern_mismatch, undefined_variable, EvalError, EvalErrorKind,
    EvalResult,
};
pub use switch::{Arm, BodyFn, Selected, Switch};

pub use shape_patterns::{
    build, Bindings, ClassPattern, Extracted, Extractor, ExtractorRegistry, MatcherBuilder,
    Matcher, Mismatch, Pattern, SharedMatcher, Target,
};
pub use shape_value::{
    Name, SharedTypeRegistry, TypeDecl, TypeRef, TypeRegistry, Value,
};

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for debug output.
///
/// Safe to call multiple times. Only installs a subscriber when `RUST_LOG`
/// is set.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .init();
        }
    });
}
