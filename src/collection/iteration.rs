//! Early-exit control for [`Collection::each`](super::Collection::each).

use std::ops::ControlFlow;

/// Return types an `each` iteratee may produce.
///
/// Iteration stops only on an explicit request to stop: `false` or
/// [`ControlFlow::Break`]. An iteratee returning `()` visits every item.
pub trait IterationControl {
    /// Returns `true` if iteration should move on to the next item.
    fn should_continue(self) -> bool;
}

impl IterationControl for () {
    #[inline]
    fn should_continue(self) -> bool {
        true
    }
}

impl IterationControl for bool {
    #[inline]
    fn should_continue(self) -> bool {
        self
    }
}

impl<B, C> IterationControl for ControlFlow<B, C> {
    #[inline]
    fn should_continue(self) -> bool {
        self.is_continue()
    }
}
