//! Native-stack safety for deep recursion.
//!
//! The evaluator re-enters itself for every nested form, so a deeply
//! nested script or a recursive user word would otherwise exhaust the
//! native call stack with no chance for `Result`-based recovery.
//! `stacker` moves the evaluation onto a freshly allocated segment
//! whenever the remaining headroom runs low.

/// Ensure sufficient stack space is available before executing `f`,
/// growing the stack if needed.
#[inline]
pub(crate) fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    /// Minimum headroom to keep available (100KB red zone).
    const RED_ZONE: usize = 100 * 1024;

    /// Stack space to allocate when growing (1MB).
    const STACK_PER_RECURSION: usize = 1024 * 1024;

    stacker::maybe_grow(RED_ZONE, STACK_PER_RECURSION, f)
}
