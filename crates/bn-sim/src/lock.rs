//! Fairness-ordered exclusive lock over the crossing segment.
//!
//! The original used a fair binary semaphore: without fairness, one
//! direction's worker re-acquired back-to-back windows until its queue
//! emptied while the other starved.  Here fairness is explicit ticket/FIFO
//! state rather than a property delegated to an OS primitive — if both
//! directions are waiting at a release, the one that has waited longer is
//! granted next, by construction.

use std::collections::VecDeque;

use bn_core::Direction;

/// First-requester-served exclusive lock between the two directions.
#[derive(Default)]
pub struct FairLock {
    owner:   Option<Direction>,
    waiters: VecDeque<Direction>,
}

impl FairLock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request the lock for `direction`.
    ///
    /// Returns `true` if ownership was granted immediately (lock free and
    /// nobody waiting ahead); otherwise `direction` joins the back of the
    /// FIFO wait line and will be granted by a later [`release`][Self::release].
    #[must_use]
    pub fn acquire(&mut self, direction: Direction) -> bool {
        if self.owner.is_none() && self.waiters.is_empty() {
            self.owner = Some(direction);
            true
        } else {
            self.waiters.push_back(direction);
            false
        }
    }

    /// Release the lock, handing it to the longest-waiting direction.
    ///
    /// Returns the new owner so the engine can open its window, or `None`
    /// if nobody was waiting (the lock becomes free).
    pub fn release(&mut self) -> Option<Direction> {
        self.owner = self.waiters.pop_front();
        self.owner
    }

    /// The direction currently holding the lock, if any.
    #[inline]
    pub fn owner(&self) -> Option<Direction> {
        self.owner
    }

    /// Number of directions queued behind the owner.
    #[inline]
    pub fn waiting(&self) -> usize {
        self.waiters.len()
    }
}
