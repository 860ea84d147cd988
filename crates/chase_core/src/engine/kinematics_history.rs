//! Kinematics History Buffer
//!
//! Fixed-capacity FIFO of a tracked actor's position/velocity samples.
//! The adversary brain owns one of these for the player.

use std::collections::VecDeque;

use crate::engine::physics_constants::predictor;

/// One observed tick: center position and velocity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KinematicSample {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
}

impl KinematicSample {
    pub fn new(x: f32, y: f32, vx: f32, vy: f32) -> Self {
        Self { x, y, vx, vy }
    }
}

#[derive(Debug, Clone)]
pub struct HistoryBuffer {
    samples: VecDeque<KinematicSample>,
    capacity: usize,
}

impl Default for HistoryBuffer {
    fn default() -> Self {
        Self::new(predictor::HISTORY_CAPACITY)
    }
}

impl HistoryBuffer {
    /// A zero capacity is bumped to 1. Preallocation stops at
    /// [`predictor::MAX_HISTORY_CAPACITY`]; larger buffers grow on demand.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        let prealloc = capacity.min(predictor::MAX_HISTORY_CAPACITY);
        Self { samples: VecDeque::with_capacity(prealloc), capacity }
    }

    /// Append a sample, evicting the oldest once over capacity.
    pub fn observe(&mut self, x: f32, y: f32, vx: f32, vy: f32) {
        self.samples.push_back(KinematicSample::new(x, y, vx, vy));
        while self.samples.len() > self.capacity {
            self.samples.pop_front();
        }
    }

    /// The last `k` samples (fewer if history is short), oldest first.
    pub fn recent(&self, k: usize) -> impl ExactSizeIterator<Item = &KinematicSample> + '_ {
        let skip = self.samples.len().saturating_sub(k);
        self.samples.range(skip..)
    }

    pub fn last(&self) -> Option<&KinematicSample> {
        self.samples.back()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Forget everything (respawn / level reload).
    pub fn clear(&mut self) {
        self.samples.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recent_returns_oldest_first() {
        let mut h = HistoryBuffer::new(60);
        for i in 0..5 {
            h.observe(i as f32, 0.0, 0.0, 0.0);
        }
        let xs: Vec<f32> = h.recent(3).map(|s| s.x).collect();
        assert_eq!(xs, vec![2.0, 3.0, 4.0]);
    }

    #[test]
    fn test_recent_with_short_history() {
        let mut h = HistoryBuffer::new(60);
        h.observe(1.0, 2.0, 3.0, 4.0);
        assert_eq!(h.recent(10).len(), 1);
        assert_eq!(HistoryBuffer::default().recent(10).len(), 0);
    }

    #[test]
    fn test_fifo_eviction_by_content() {
        let mut h = HistoryBuffer::new(3);
        for i in 0..7 {
            h.observe(i as f32, 0.0, i as f32 * 0.5, 0.0);
        }
        assert_eq!(h.len(), 3);
        let xs: Vec<f32> = h.recent(usize::MAX).map(|s| s.x).collect();
        assert_eq!(xs, vec![4.0, 5.0, 6.0]);
        assert_eq!(h.last().map(|s| s.vx), Some(3.0));
    }

    #[test]
    fn test_oversized_capacity_does_not_preallocate() {
        let mut h = HistoryBuffer::new(usize::MAX);
        assert_eq!(h.capacity(), usize::MAX);
        for i in 0..10 {
            h.observe(i as f32, 0.0, 0.0, 0.0);
        }
        assert_eq!(h.len(), 10);
    }

    #[test]
    fn test_clear() {
        let mut h = HistoryBuffer::new(4);
        h.observe(0.0, 0.0, 0.0, 0.0);
        h.clear();
        assert!(h.is_empty());
        assert_eq!(h.capacity(), 4);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Property: capacity is never exceeded and the retained samples are
            /// exactly the newest `min(n, capacity)` observations, in order.
            #[test]
            fn prop_capacity_and_fifo(capacity in 1usize..80, n in 0usize..300) {
                let mut h = HistoryBuffer::new(capacity);
                for i in 0..n {
                    h.observe(i as f32, 0.0, 0.0, 0.0);
                    prop_assert!(h.len() <= capacity);
                }
                let kept: Vec<f32> = h.recent(capacity).map(|s| s.x).collect();
                let expected: Vec<f32> =
                    (n.saturating_sub(capacity)..n).map(|i| i as f32).collect();
                prop_assert_eq!(kept, expected);
            }
        }
    }
}
