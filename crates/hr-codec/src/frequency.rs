//! Symbol frequency analysis.
//!
//! Symbols are kept in first-occurrence order. That order seeds the heap, so
//! it decides how equal weights are tie-broken during tree construction.

use serde::Serialize;
use std::collections::HashMap;

/// A byte value and how many times it occurs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Symbol {
    pub byte: u8,
    pub count: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrequencyTable {
    symbols: Vec<Symbol>,
    slots: HashMap<u8, usize>,
}

impl FrequencyTable {
    /// Count every byte of `text`.
    pub fn from_bytes(text: &[u8]) -> Self {
        let mut table = Self::default();
        for &byte in text {
            match table.slots.get(&byte) {
                Some(&idx) => table.symbols[idx].count += 1,
                None => {
                    table.slots.insert(byte, table.symbols.len());
                    table.symbols.push(Symbol { byte, count: 1 });
                }
            }
        }
        table
    }

    /// Number of distinct bytes.
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Distinct symbols in first-seen order.
    pub fn symbols(&self) -> &[Symbol] {
        &self.symbols
    }

    pub fn count(&self, byte: u8) -> Option<u64> {
        self.slots.get(&byte).map(|&idx| self.symbols[idx].count)
    }

    /// Sum of all counts, equal to the analyzed input length.
    pub fn total(&self) -> u64 {
        self.symbols.iter().map(|s| s.count).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Symbol> {
        self.symbols.iter()
    }
}
