//! Stack safety for deep recursion.
//!
//! The grammar and the evaluator both recurse to the depth of the
//! expression tree. A pathological conscription (thousands of nested
//! parentheses) would overflow the thread stack; recursive entry points
//! wrap themselves in [`ensure_sufficient_stack`] so the stack grows on
//! demand instead.

/// Remaining stack below which we grow (64KB red zone).
#[cfg(not(target_arch = "wasm32"))]
const RED_ZONE: usize = 64 * 1024;

/// Amount allocated per growth step (1MB).
#[cfg(not(target_arch = "wasm32"))]
const STACK_PER_RECURSION: usize = 1024 * 1024;

/// Run `f`, growing the stack first when the remaining space is inside
/// the red zone.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, STACK_PER_RECURSION, f)
}

/// WASM manages its own stack; call through.
#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}
