use std::collections::BTreeMap;

use super::K_NUM_SYMBOLS;

/// Occurrence count of every byte value present in some input.
///
/// Only symbols with a count of at least one are stored, ordered by symbol.
#[derive(Clone, Default, Debug, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: BTreeMap<u8, u64>,
}

impl FrequencyTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_bytes(data: &[u8]) -> Self {
        let mut histo = [0u64; K_NUM_SYMBOLS];
        for &byte in data {
            histo[byte as usize] += 1;
        }

        let counts = histo
            .iter()
            .enumerate()
            .filter(|(_, &count)| count > 0)
            .map(|(symbol, &count)| (symbol as u8, count))
            .collect();

        Self { counts }
    }

    /// Adds `count` occurrences of `symbol`. A zero count leaves the table untouched.
    pub fn insert(&mut self, symbol: u8, count: u64) {
        if count == 0 {
            return;
        }
        *self.counts.entry(symbol).or_insert(0) += count;
    }

    #[inline(always)]
    pub fn get(&self, symbol: u8) -> Option<u64> {
        self.counts.get(&symbol).copied()
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Pairs in ascending symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, u64)> + '_ {
        self.counts.iter().map(|(&symbol, &count)| (symbol, count))
    }

    /// Sum of all counts, or `None` if it does not fit in a `u64`.
    pub fn total(&self) -> Option<u64> {
        self.counts.values().try_fold(0u64, |acc, &count| acc.checked_add(count))
    }
}
