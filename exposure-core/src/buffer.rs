//! Bounded Sliding Window for STEL Averaging
//!
//! ## Overview
//!
//! STEL is a rolling 15 minute average. With a fixed recording interval that
//! becomes a rolling average over the last `ceil(900 / interval)` samples, so
//! the engine needs a FIFO that holds at most that many values and tells the
//! caller which value fell out (the "window sill") when a new one enters.
//!
//! ## Design Rationale
//!
//! The window length is only known once the session's recording interval is
//! known, so unlike a const-generic ring the capacity is fixed at
//! construction time instead of compile time. Storage is allocated once and
//! never grows:
//!
//! - O(1) push, returning the evicted value when full
//! - O(1) access to the newest value
//! - O(n) iteration oldest to newest
//! - One allocation per window, reused across periods via `clear()`
//!
//! ### Memory Layout
//!
//! ```text
//! SlidingWindow with capacity 5, after 7 pushes (values 1..=7):
//! ┌─────┬─────┬─────┬─────┬─────┐
//! │  6  │  7  │  3  │  4  │  5  │  ← storage
//! └─────┴─────┴─────┴─────┴─────┘
//!              ↑
//!              └── write_pos = 2 (also the oldest slot once full)
//! ```
//!
//! ## Usage Example
//!
//! ```rust
//! use exposure_core::buffer::SlidingWindow;
//!
//! let mut window = SlidingWindow::new(3);
//! assert_eq!(window.push(1.0), None);
//! assert_eq!(window.push(2.0), None);
//! assert_eq!(window.push(3.0), None);
//!
//! // Full: the oldest value is handed back
//! assert_eq!(window.push(4.0), Some(1.0));
//! let values: Vec<f64> = window.iter().copied().collect();
//! assert_eq!(values, vec![2.0, 3.0, 4.0]);
//! ```

use alloc::vec::Vec;

/// Fixed-capacity FIFO of sample values
///
/// ## Internal Invariants
///
/// - `storage.len() == len <= capacity`
/// - once full, `write_pos` is the index of the oldest value
/// - `capacity >= 1` (a zero request is rounded up to one)
///
/// ## Thread Safety
///
/// Not shared. Each computation owns its own window.
#[derive(Debug, Clone)]
pub struct SlidingWindow {
    /// Values in ring order. Grows until `capacity`, then overwritten in place.
    storage: Vec<f64>,

    /// Index where the next write will occur once full
    write_pos: usize,

    /// Maximum number of values held
    capacity: usize,
}

impl SlidingWindow {
    /// Creates an empty window holding at most `capacity` values
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            storage: Vec::with_capacity(capacity),
            write_pos: 0,
            capacity,
        }
    }

    /// Adds a value, returning the evicted oldest value if the window was full
    pub fn push(&mut self, value: f64) -> Option<f64> {
        if self.storage.len() < self.capacity {
            self.storage.push(value);
            return None;
        }

        let sill = core::mem::replace(&mut self.storage[self.write_pos], value);
        self.write_pos = (self.write_pos + 1) % self.capacity;
        Some(sill)
    }

    /// Number of values currently held
    pub fn len(&self) -> usize {
        self.storage.len()
    }

    /// Check if window is empty
    pub fn is_empty(&self) -> bool {
        self.storage.is_empty()
    }

    /// Check if the next push will evict a value
    pub fn is_full(&self) -> bool {
        self.storage.len() == self.capacity
    }

    /// Maximum number of values held
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Most recently pushed value
    pub fn last(&self) -> Option<f64> {
        if self.is_empty() {
            return None;
        }

        let idx = if !self.is_full() {
            self.storage.len() - 1
        } else if self.write_pos == 0 {
            self.capacity - 1
        } else {
            self.write_pos - 1
        };

        self.storage.get(idx).copied()
    }

    /// Iterate over values from oldest to newest
    pub fn iter(&self) -> impl Iterator<Item = &f64> + '_ {
        // Before the first wrap write_pos is 0, so this degenerates to storage order
        let (newer, older) = self.storage.split_at(self.write_pos);
        older.iter().chain(newer.iter())
    }

    /// Drop all values, keeping the allocation
    pub fn clear(&mut self) {
        self.storage.clear();
        self.write_pos = 0;
    }
}
