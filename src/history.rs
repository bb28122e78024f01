use std::collections::VecDeque;

use nalgebra::Point2;

/// Bounded FIFO of per-frame snapshots.
#[derive(Debug, Clone)]
pub struct History<T> {
    capacity: usize,
    entries: VecDeque<T>,
}

impl<T> History<T> {
    pub fn new(capacity: usize) -> Self {
        History {
            capacity,
            entries: VecDeque::with_capacity(capacity + 1),
        }
    }

    pub fn push(&mut self, entry: T) {
        self.entries.push_back(entry);
        while self.entries.len() > self.capacity {
            self.entries.pop_front();
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.entries.iter()
    }
}

/// One polyline per boid through every retained frame, oldest first.
pub fn trails(history: &History<Vec<Point2<f32>>>, boids: usize) -> Vec<Vec<Point2<f32>>> {
    (0..boids)
        .map(|index| {
            history
                .iter()
                .filter_map(|frame| frame.get(index).copied())
                .collect()
        })
        .collect()
}
