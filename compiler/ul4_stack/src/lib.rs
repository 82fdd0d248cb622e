//! Stack growth for the UL4 tree walker.
//!
//! Template evaluation recurses once per nested expression and once per
//! nested `render` call. Nesting depth comes from user data (templates can
//! render templates passed in as variables), so the native stack is grown on
//! demand instead of trusting the thread's initial stack size.
//!
//! On `wasm32` the guard is a plain call.

/// Grow when less than this much stack remains.
const RED_ZONE: usize = 128 * 1024;

/// Size of each freshly allocated stack segment.
const SEGMENT_SIZE: usize = 2 * 1024 * 1024;

/// Run `f`, first growing the stack if fewer than [`RED_ZONE`] bytes remain.
///
/// Wrap every recursive evaluation entry point:
///
/// ```text
/// fn eval(&mut self, node: &Node) -> EvalResult {
///     with_stack_guard(|| self.eval_inner(node))
/// }
/// ```
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn with_stack_guard<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, SEGMENT_SIZE, f)
}

/// On `wasm32` the runtime owns the stack.
#[inline]
#[cfg(target_arch = "wasm32")]
pub fn with_stack_guard<R>(f: impl FnOnce() -> R) -> R {
    f()
}
