//! Byte frequency tables.
//!
//! A [`FrequencyTable`] is built in a single sequential pass over the input.
//! Only symbols with a non-zero count take part in tree construction.

use crate::error::{Error, Result};

/// Number of distinct byte symbols.
pub const ALPHABET_SIZE: usize = 256;

/// Occurrence count for every byte value.
#[derive(Clone, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: [u64; ALPHABET_SIZE],
}

impl FrequencyTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self {
            counts: [0; ALPHABET_SIZE],
        }
    }

    /// Count every byte of `data`.
    pub fn from_bytes(data: &[u8]) -> Self {
        let mut table = Self::new();
        // A count never exceeds `data.len()`, which fits in u64.
        for &b in data {
            table.counts[b as usize] += 1;
        }
        table
    }

    /// Record one occurrence of `symbol`.
    ///
    /// # Errors
    /// Returns `Error::FrequencyOverflow` if the count is already `u64::MAX`.
    pub fn record(&mut self, symbol: u8) -> Result<()> {
        let slot = &mut self.counts[symbol as usize];
        *slot = slot.checked_add(1).ok_or(Error::FrequencyOverflow)?;
        Ok(())
    }

    /// Set the count of `symbol` directly.
    ///
    /// Used when a table is rebuilt from persisted `(symbol, count)` pairs.
    pub fn set(&mut self, symbol: u8, count: u64) {
        self.counts[symbol as usize] = count;
    }

    /// Add the counts of `other` into `self`.
    ///
    /// This is the reduction step when counting is split over input chunks.
    /// On error `self` is left unchanged.
    ///
    /// # Errors
    /// Returns `Error::FrequencyOverflow` if any combined count exceeds `u64::MAX`.
    pub fn merge(&mut self, other: &FrequencyTable) -> Result<()> {
        let mut merged = self.counts;
        for (mine, theirs) in merged.iter_mut().zip(other.counts.iter()) {
            *mine = mine.checked_add(*theirs).ok_or(Error::FrequencyOverflow)?;
        }
        self.counts = merged;
        Ok(())
    }

    /// Occurrence count of `symbol`.
    pub fn count(&self, symbol: u8) -> u64 {
        self.counts[symbol as usize]
    }

    /// Sum of all counts; equals the length of the counted input.
    ///
    /// # Errors
    /// Returns `Error::FrequencyOverflow` if the sum exceeds `u64::MAX`.
    pub fn total(&self) -> Result<u64> {
        self.counts
            .iter()
            .try_fold(0u64, |acc, &c| acc.checked_add(c))
            .ok_or(Error::FrequencyOverflow)
    }

    /// Number of symbols with a non-zero count.
    pub fn distinct(&self) -> usize {
        self.counts.iter().filter(|&&c| c > 0).count()
    }

    /// True when no symbol has been observed.
    pub fn is_empty(&self) -> bool {
        self.counts.iter().all(|&c| c == 0)
    }

    /// Present symbols and their counts, in ascending symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, u64)> + '_ {
        self.counts
            .iter()
            .enumerate()
            .filter(|&(_, &c)| c > 0)
            .map(|(s, &c)| (s as u8, c))
    }
}

impl Default for FrequencyTable {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for FrequencyTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl FromIterator<(u8, u64)> for FrequencyTable {
    fn from_iter<I: IntoIterator<Item = (u8, u64)>>(iter: I) -> Self {
        let mut table = Self::new();
        for (symbol, count) in iter {
            table.set(symbol, count);
        }
        table
    }
}
