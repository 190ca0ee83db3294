//! Stack growth for deep recursion.
//!
//! Both the parser (one frame per precedence level per nesting) and the
//! continuation-passing evaluator (one frame per instruction per value) recurse
//! in proportion to program and data size. Every recursive entry point goes
//! through [`ensure_sufficient_stack`], which grows the stack on demand.
//!
//! On `wasm32` the wrapper is a passthrough.

/// Grow the stack when less than this much remains.
const RED_ZONE: usize = 128 * 1024;

/// Size of each new stack segment.
const STACK_PER_RECURSION: usize = 2 * 1024 * 1024;

/// Run `f`, first growing the stack if the remaining space is below the red zone.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, STACK_PER_RECURSION, f)
}

#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}
