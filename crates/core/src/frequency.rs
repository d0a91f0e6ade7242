//! Symbol frequency analysis.
//!
//! A `FrequencyTable` counts how often each byte value occurs in the input.
//! It only exists for non-empty input, so every table holds at least one
//! symbol and later stages never see a degenerate alphabet of size zero.

use crate::error::{Error, Result};

/// Number of distinct byte symbols.
pub const ALPHABET_SIZE: usize = 256;

/// Occurrence counts for every byte value present in the input.
///
/// # Invariants
/// - `total` equals the sum of all counts (and the input length)
/// - `distinct` equals the number of non-zero counts, and is at least 1
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: [u64; ALPHABET_SIZE],
    distinct: usize,
    total: u64,
}

impl FrequencyTable {
    /// Count every byte of `data`.
    ///
    /// # Errors
    /// `Error::EmptyInput` if `data` is empty.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        if data.is_empty() {
            return Err(Error::EmptyInput);
        }

        let mut counts = [0u64; ALPHABET_SIZE];
        for &byte in data {
            counts[byte as usize] += 1;
        }

        let distinct = counts.iter().filter(|&&c| c > 0).count();

        Ok(Self {
            counts,
            distinct,
            total: data.len() as u64,
        })
    }

    /// Rebuild a table from stored `(symbol, count)` pairs.
    ///
    /// Zero counts are ignored and repeated symbols accumulate.
    ///
    /// # Errors
    /// `Error::EmptyInput` if no pair has a non-zero count.
    pub fn from_counts<I>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (u8, u64)>,
    {
        let mut counts = [0u64; ALPHABET_SIZE];
        for (symbol, count) in pairs {
            counts[symbol as usize] += count;
        }

        let distinct = counts.iter().filter(|&&c| c > 0).count();
        if distinct == 0 {
            return Err(Error::EmptyInput);
        }

        Ok(Self {
            counts,
            distinct,
            total: counts.iter().sum(),
        })
    }

    /// Occurrence count of `symbol` (0 if absent).
    pub fn count(&self, symbol: u8) -> u64 {
        self.counts[symbol as usize]
    }

    /// Whether `symbol` occurs in the input.
    pub fn contains(&self, symbol: u8) -> bool {
        self.count(symbol) > 0
    }

    /// Number of distinct symbols.
    pub fn len(&self) -> usize {
        self.distinct
    }

    /// Always false: a table is never built from empty input.
    pub fn is_empty(&self) -> bool {
        self.distinct == 0
    }

    /// Sum of all counts.
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Present symbols and their counts, in ascending symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, u64)> + '_ {
        self.counts
            .iter()
            .enumerate()
            .filter(|(_, &count)| count > 0)
            .map(|(symbol, &count)| (symbol as u8, count))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts() {
        let table = FrequencyTable::from_bytes(b"abracadabra").unwrap();

        assert_eq!(table.count(b'a'), 5);
        assert_eq!(table.count(b'b'), 2);
        assert_eq!(table.count(b'r'), 2);
        assert_eq!(table.count(b'c'), 1);
        assert_eq!(table.count(b'd'), 1);
        assert_eq!(table.count(b'z'), 0);
        assert!(!table.contains(b'z'));

        assert_eq!(table.len(), 5);
        assert_eq!(table.total(), 11);
        assert!(!table.is_empty());
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(FrequencyTable::from_bytes(b""), Err(Error::EmptyInput));
    }

    #[test]
    fn test_iteration_is_ascending() {
        let table = FrequencyTable::from_bytes(b"zzyxa").unwrap();
        let entries: Vec<_> = table.iter().collect();
        assert_eq!(entries, vec![(b'a', 1), (b'x', 1), (b'y', 1), (b'z', 2)]);
    }

    #[test]
    fn test_full_alphabet() {
        let data: Vec<u8> = (0..=255).chain(0..=255).collect();
        let table = FrequencyTable::from_bytes(&data).unwrap();

        assert_eq!(table.len(), ALPHABET_SIZE);
        assert_eq!(table.total(), 512);
        assert!(table.iter().all(|(_, count)| count == 2));
    }

    #[test]
    fn test_from_counts_matches_from_bytes() {
        let direct = FrequencyTable::from_bytes(b"hello").unwrap();
        let rebuilt =
            FrequencyTable::from_counts([(b'o', 1), (b'h', 1), (b'l', 2), (b'e', 1), (b'x', 0)])
                .unwrap();
        assert_eq!(direct, rebuilt);
    }

    #[test]
    fn test_from_counts_rejects_empty() {
        assert_eq!(FrequencyTable::from_counts([]), Err(Error::EmptyInput));
        assert_eq!(FrequencyTable::from_counts([(b'a', 0)]), Err(Error::EmptyInput));
    }

    #[test]
    fn test_single_symbol() {
        let table = FrequencyTable::from_bytes(b"aaaa").unwrap();
        assert_eq!(table.iter().collect::<Vec<_>>(), vec![(b'a', 4)]);
    }
}
