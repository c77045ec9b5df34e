//! Stack growth for recursion whose depth follows the data, not the code.
//!
//! Matcher recursion is bounded by the depth of the written pattern, so the
//! matchers themselves never need this. Value-level operations are different:
//! structural equality, hashing and rendering of a `Cons` chain recurse once
//! per link, and a list built at runtime can be arbitrarily long. Those walks
//! call [`ensure_sufficient_stack`] at every level.
//!
//! - **Native targets**: `stacker` grows the stack on demand.
//! - **WASM targets**: plain call.

/// Remaining stack below which a new segment is allocated (128KB).
const RED_ZONE: usize = 128 * 1024;

/// Size of each newly allocated stack segment (1MB).
const SEGMENT_SIZE: usize = 1024 * 1024;

/// Run `f`, first growing the stack if less than the red zone remains.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, SEGMENT_SIZE, f)
}

/// WASM manages its own stack; call straight through.
#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}
