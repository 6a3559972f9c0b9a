//! # Merge Candidate Queue

use core::cmp::Ordering;

use crate::alloc::collections::BinaryHeap;

/// A candidate merge of two adjacent symbols.
///
/// Candidates are never removed when their symbols change;
/// they go stale, and are discarded when popped.
#[derive(Debug, Clone, Copy)]
pub struct MergeCandidate {
    /// The index of the left symbol.
    pub left: usize,

    /// The index of the right symbol.
    pub right: usize,

    /// The byte length of the merged text, when the candidate was made.
    pub merged_len: usize,

    /// The score of the merged piece.
    pub score: f32,
}

impl PartialEq for MergeCandidate {
    fn eq(
        &self,
        other: &Self,
    ) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for MergeCandidate {}

impl PartialOrd for MergeCandidate {
    fn partial_cmp(
        &self,
        other: &Self,
    ) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for MergeCandidate {
    /// Higher scores first; then lower left indices.
    ///
    /// Scores compare by IEEE equality (``-0.0 == 0.0``);
    /// NaN scores rank below every number.
    fn cmp(
        &self,
        other: &Self,
    ) -> Ordering {
        self.score
            .partial_cmp(&other.score)
            .unwrap_or_else(|| other.score.is_nan().cmp(&self.score.is_nan()))
            .then_with(|| other.left.cmp(&self.left))
    }
}

/// Max-priority queue of [`MergeCandidate`]s, with a running stale estimate.
#[derive(Debug, Default)]
pub struct MergeQueue {
    heap: BinaryHeap<MergeCandidate>,
    stale: usize,
}

impl MergeQueue {
    /// Create an empty queue with room for `capacity` candidates.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            heap: BinaryHeap::with_capacity(capacity),
            stale: 0,
        }
    }

    /// The number of queued candidates, live or stale.
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Is the queue empty?
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// The current estimate of stale candidates in the queue.
    pub fn stale_estimate(&self) -> usize {
        self.stale
    }

    /// Push a candidate.
    pub fn push(
        &mut self,
        candidate: MergeCandidate,
    ) {
        self.heap.push(candidate);
    }

    /// Pop the best candidate.
    pub fn pop(&mut self) -> Option<MergeCandidate> {
        self.heap.pop()
    }

    /// Record that a merge has (probably) left a candidate stale.
    pub fn note_merge(&mut self) {
        self.stale += 1;
    }

    /// Record that a stale candidate was popped and discarded.
    pub fn note_stale_pop(&mut self) {
        self.stale = self.stale.saturating_sub(1);
    }

    /// Drop every candidate for which `is_live` is false,
    /// when the stale estimate outweighs the queue by `factor`.
    ///
    /// A `factor` of 0 never compacts.
    ///
    /// ## Returns
    /// `true` if the queue was compacted.
    pub fn maybe_compact<F>(
        &mut self,
        factor: usize,
        is_live: F,
    ) -> bool
    where
        F: FnMut(&MergeCandidate) -> bool,
    {
        if factor == 0 || self.stale.saturating_mul(factor) <= self.heap.len() {
            return false;
        }
        self.heap.retain(is_live);
        self.stale = 0;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alloc::vec::Vec;

    fn candidate(
        left: usize,
        score: f32,
    ) -> MergeCandidate {
        MergeCandidate {
            left,
            right: left + 1,
            merged_len: 2,
            score,
        }
    }

    fn drain(queue: &mut MergeQueue) -> Vec<(usize, f32)> {
        core::iter::from_fn(|| queue.pop())
            .map(|c| (c.left, c.score))
            .collect()
    }

    #[test]
    fn test_score_then_left_order() {
        let mut queue = MergeQueue::with_capacity(8);
        for c in [
            candidate(4, 1.0),
            candidate(0, -2.0),
            candidate(2, 1.0),
            candidate(7, 3.5),
            candidate(1, 1.0),
        ] {
            queue.push(c);
        }
        assert_eq!(queue.len(), 5);

        assert_eq!(
            drain(&mut queue),
            [(7, 3.5), (1, 1.0), (2, 1.0), (4, 1.0), (0, -2.0)]
        );
        assert!(queue.is_empty());
    }

    #[test]
    fn test_exact_float_compare() {
        // -0.0 and 0.0 are equal scores; the left index decides.
        assert!(candidate(0, -0.0) > candidate(1, 0.0));
        assert!(candidate(1, -0.0) < candidate(0, 0.0));

        // No epsilon.
        assert!(candidate(9, 1.0 + f32::EPSILON) > candidate(0, 1.0));
    }

    #[test]
    fn test_nan_ranks_lowest() {
        assert!(candidate(0, f32::NAN) < candidate(9, f32::NEG_INFINITY));
        assert!(candidate(0, f32::NAN) > candidate(1, f32::NAN));
        assert_eq!(candidate(3, f32::NAN), candidate(3, f32::NAN));

        let mut queue = MergeQueue::default();
        queue.push(candidate(0, f32::NAN));
        queue.push(candidate(1, -1e30));
        assert_eq!(queue.pop().map(|c| c.left), Some(1));
        assert_eq!(queue.pop().map(|c| c.left), Some(0));
    }

    #[test]
    fn test_compaction() {
        let mut queue = MergeQueue::default();
        for left in 0..6 {
            queue.push(candidate(left, left as f32));
        }

        queue.note_merge();
        queue.note_merge();
        queue.note_stale_pop();
        assert_eq!(queue.stale_estimate(), 1);

        // 1 * 3 <= 6
        assert!(!queue.maybe_compact(3, |_| false));
        assert_eq!(queue.len(), 6);

        queue.note_merge();
        queue.note_merge();
        assert!(!queue.maybe_compact(0, |_| false));

        // 3 * 3 > 6
        assert!(queue.maybe_compact(3, |c| c.left % 2 == 0));
        assert_eq!(queue.stale_estimate(), 0);
        assert_eq!(drain(&mut queue), [(4, 4.0), (2, 2.0), (0, 0.0)]);

        queue.note_stale_pop();
        assert_eq!(queue.stale_estimate(), 0);
    }
}
