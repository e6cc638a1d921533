//! Array-backed binary min-heap keyed by weight.
//!
//! Comparisons are strict, so equal weights never move past each other and
//! the extraction order for a given input order is always the same.

use crate::buffer::doubled_capacity;
use hr_core::{CodecError, Result};
use tracing::trace;

/// Anything the heap can order.
pub trait Weighted {
    fn weight(&self) -> u64;
}

#[derive(Debug, Clone)]
pub struct MinHeap<T> {
    elements: Vec<T>,
}

impl<T> Default for MinHeap<T> {
    fn default() -> Self {
        Self { elements: Vec::new() }
    }
}

fn left(i: usize) -> usize {
    2 * i + 1
}

fn right(i: usize) -> usize {
    2 * i + 2
}

fn parent(i: usize) -> usize {
    (i - 1) / 2
}

impl<T: Weighted> MinHeap<T> {
    pub fn with_capacity(capacity: usize) -> Result<Self> {
        let mut elements = Vec::new();
        elements
            .try_reserve_exact(capacity)
            .map_err(|_| CodecError::alloc("heap array", capacity))?;
        Ok(Self { elements })
    }

    /// Heapify `source` in place, bottom-up from the last parent.
    pub fn build(source: Vec<T>) -> Self {
        let mut heap = Self { elements: source };
        let n = heap.len();
        for i in (0..n / 2).rev() {
            heap.heapify(i);
        }
        heap
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.elements.capacity()
    }

    pub fn peek(&self) -> Option<&T> {
        self.elements.first()
    }

    /// Checks the min-heap property over the whole array.
    pub fn is_valid(&self) -> bool {
        (1..self.len()).all(|i| self.elements[parent(i)].weight() <= self.elements[i].weight())
    }

    /// Restore the heap property downward from `i`.
    pub fn heapify(&mut self, mut i: usize) {
        let n = self.len();
        loop {
            let (l, r) = (left(i), right(i));
            let mut smallest = i;
            if l < n && self.elements[l].weight() < self.elements[smallest].weight() {
                smallest = l;
            }
            if r < n && self.elements[r].weight() < self.elements[smallest].weight() {
                smallest = r;
            }
            if smallest == i {
                return;
            }
            self.elements.swap(i, smallest);
            i = smallest;
        }
    }

    pub fn insert(&mut self, value: T) -> Result<()> {
        if self.elements.len() == self.elements.capacity() {
            let required = self.elements.len() + 1;
            let target = doubled_capacity(self.elements.capacity(), required)
                .ok_or_else(|| CodecError::alloc("heap array", required))?;
            self.elements
                .try_reserve_exact(target - self.elements.len())
                .map_err(|_| CodecError::alloc("heap array", target))?;
            trace!(capacity = self.elements.capacity(), "grew heap");
        }
        self.elements.push(value);

        let mut i = self.len() - 1;
        while i > 0 && self.elements[i].weight() < self.elements[parent(i)].weight() {
            self.elements.swap(i, parent(i));
            i = parent(i);
        }
        Ok(())
    }

    /// Remove the lightest element; `None` when empty.
    pub fn extract_min(&mut self) -> Option<T> {
        if self.elements.is_empty() {
            return None;
        }
        let min = self.elements.swap_remove(0);
        self.heapify(0);
        Some(min)
    }
}

impl Weighted for u64 {
    fn weight(&self) -> u64 {
        *self
    }
}
