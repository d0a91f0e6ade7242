//! Prefix code assignment.
//!
//! Codes are read off the tree's root-to-leaf paths: a left branch appends
//! `0`, a right branch appends `1`. A tree that is a single leaf has no
//! branches at all; its symbol is given the one-bit code `0` so every symbol
//! still costs at least one bit in the packed output.

use std::collections::BTreeMap;
use std::fmt;

use tracing::{debug, trace};

use crate::frequency::FrequencyTable;
use crate::tree::{HuffmanNode, HuffmanTree};

/// A non-empty sequence of bits, first bit first.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Code {
    bits: Vec<bool>,
}

impl Code {
    /// Build a code from explicit bits.
    ///
    /// Returns `None` for an empty sequence.
    pub fn from_bits(bits: Vec<bool>) -> Option<Self> {
        if bits.is_empty() {
            None
        } else {
            Some(Self { bits })
        }
    }

    /// Number of bits (always at least 1).
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    /// Always false.
    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    pub fn bits(&self) -> impl Iterator<Item = bool> + '_ {
        self.bits.iter().copied()
    }

    pub fn as_slice(&self) -> &[bool] {
        &self.bits
    }

    /// Whether `self` is a prefix of `other` (a code is a prefix of itself).
    pub fn is_prefix_of(&self, other: &Code) -> bool {
        other.bits.starts_with(&self.bits)
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &bit in &self.bits {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}

/// Mapping from symbol to its prefix code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeTable {
    codes: BTreeMap<u8, Code>,
}

impl CodeTable {
    /// Derive the code of every leaf in `tree`.
    pub fn from_tree(tree: &HuffmanTree) -> Self {
        let mut codes = BTreeMap::new();

        if let HuffmanNode::Leaf { symbol, .. } = tree.root() {
            trace!(symbol = *symbol, code = "0", "single-symbol alphabet");
            codes.insert(*symbol, Code { bits: vec![false] });
            return Self { codes };
        }

        let mut stack: Vec<(&HuffmanNode, Vec<bool>)> = vec![(tree.root(), Vec::new())];
        while let Some((node, path)) = stack.pop() {
            match node {
                HuffmanNode::Leaf { symbol, .. } => {
                    let code = Code { bits: path };
                    trace!(symbol = *symbol, code = %code, "assigned code");
                    codes.insert(*symbol, code);
                }
                HuffmanNode::Internal { left, right, .. } => {
                    let mut right_path = path.clone();
                    right_path.push(true);
                    stack.push((right.as_ref(), right_path));

                    let mut left_path = path;
                    left_path.push(false);
                    stack.push((left.as_ref(), left_path));
                }
            }
        }

        let table = Self { codes };
        debug!(
            symbols = table.len(),
            max_code_len = table.max_code_len(),
            "assigned prefix codes"
        );
        table
    }

    pub fn get(&self, symbol: u8) -> Option<&Code> {
        self.codes.get(&symbol)
    }

    /// Number of symbols with a code.
    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// Codes in ascending symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, &Code)> + '_ {
        self.codes.iter().map(|(&symbol, code)| (symbol, code))
    }

    /// Length of the longest code (0 for an empty table).
    pub fn max_code_len(&self) -> usize {
        self.codes.values().map(Code::len).max().unwrap_or(0)
    }

    /// Bits needed to encode the input `freqs` was built from:
    /// the sum of `count * code length` over all symbols.
    pub fn encoded_bit_len(&self, freqs: &FrequencyTable) -> u64 {
        freqs
            .iter()
            .map(|(symbol, count)| count * self.get(symbol).map_or(0, |code| code.len() as u64))
            .sum()
    }

    /// Whether no code is a prefix of another.
    pub fn is_prefix_free(&self) -> bool {
        let codes: Vec<&Code> = self.codes.values().collect();
        codes.iter().enumerate().all(|(i, a)| {
            codes
                .iter()
                .enumerate()
                .all(|(j, b)| i == j || !a.is_prefix_of(b))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table_for(data: &[u8]) -> (FrequencyTable, CodeTable) {
        let freqs = FrequencyTable::from_bytes(data).unwrap();
        let tree = HuffmanTree::build(&freqs).unwrap();
        let codes = CodeTable::from_tree(&tree);
        (freqs, codes)
    }

    fn code_str(codes: &CodeTable, symbol: u8) -> String {
        codes.get(symbol).unwrap().to_string()
    }

    #[test]
    fn test_single_symbol_gets_zero() {
        let (freqs, codes) = table_for(b"aaaa");

        assert_eq!(codes.len(), 1);
        assert_eq!(code_str(&codes, b'a'), "0");
        assert_eq!(codes.max_code_len(), 1);
        assert_eq!(codes.encoded_bit_len(&freqs), 4);
    }

    #[test]
    fn test_two_symbols() {
        let (_, codes) = table_for(b"aab");
        // b (weight 1) is popped first and goes left.
        assert_eq!(code_str(&codes, b'b'), "0");
        assert_eq!(code_str(&codes, b'a'), "1");
    }

    #[test]
    fn test_known_codes() {
        let (freqs, codes) = table_for(b"aaaaabbcd");

        assert_eq!(code_str(&codes, b'a'), "1");
        assert_eq!(code_str(&codes, b'b'), "00");
        assert_eq!(code_str(&codes, b'c'), "010");
        assert_eq!(code_str(&codes, b'd'), "011");

        assert_eq!(codes.encoded_bit_len(&freqs), 5 + 2 * 2 + 3 + 3);
        assert_eq!(codes.max_code_len(), 3);
        assert!(codes.is_prefix_free());
    }

    #[test]
    fn test_frequent_symbols_get_shorter_codes() {
        let (freqs, codes) = table_for(b"eeeeeeeeeetttttaaaoon");

        let mut by_freq: Vec<(u8, u64)> = freqs.iter().collect();
        by_freq.sort_by(|a, b| b.1.cmp(&a.1));

        for pair in by_freq.windows(2) {
            let (hi, lo) = (pair[0].0, pair[1].0);
            assert!(codes.get(hi).unwrap().len() <= codes.get(lo).unwrap().len());
        }
    }

    #[test]
    fn test_full_alphabet_is_prefix_free() {
        let data: Vec<u8> = (0..=255u8).flat_map(|b| std::iter::repeat(b).take(b as usize % 7 + 1)).collect();
        let (_, codes) = table_for(&data);

        assert_eq!(codes.len(), 256);
        assert!(codes.is_prefix_free());
        assert!(codes.iter().all(|(_, code)| !code.is_empty()));
    }

    #[test]
    fn test_prefix_check_detects_violation() {
        let mut bad = BTreeMap::new();
        bad.insert(b'x', Code::from_bits(vec![false]).unwrap());
        bad.insert(b'y', Code::from_bits(vec![false, true]).unwrap());
        let table = CodeTable { codes: bad };

        assert!(!table.is_prefix_free());
    }

    #[test]
    fn test_code_helpers() {
        assert!(Code::from_bits(Vec::new()).is_none());

        let code = Code::from_bits(vec![true, false, true]).unwrap();
        assert_eq!(code.to_string(), "101");
        assert_eq!(code.len(), 3);
        assert_eq!(code.bits().collect::<Vec<_>>(), vec![true, false, true]);
        assert_eq!(code.as_slice(), &[true, false, true]);

        let prefix = Code::from_bits(vec![true, false]).unwrap();
        assert!(prefix.is_prefix_of(&code));
        assert!(!code.is_prefix_of(&prefix));
    }
}
