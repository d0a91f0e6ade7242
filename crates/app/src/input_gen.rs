//! Sample input generation.
//!
//! When no input file is given we compress generated text instead. The text
//! has the skew that makes Huffman coding pay off: letters drawn with
//! English-like weights, grouped into words, sentences and lines, with an
//! occasional run of one repeated character.
//!
//! All randomness comes from a seeded ChaCha8 RNG, so the same seed always
//! yields the same bytes.

use rand::distributions::{Distribution, WeightedIndex};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

const LETTERS: &[u8; 26] = b"etaoinshrdlcumwfgypbvkjxqz";

/// Rough English letter frequencies (per mille), matching `LETTERS`.
const LETTER_WEIGHTS: [u32; 26] = [
    127, 91, 82, 75, 70, 67, 63, 61, 60, 43, 40, 28, 28, 24, 24, 22, 20, 20, 19, 15, 10, 8, 2, 2,
    1, 1,
];

/// Generate `size_bytes` of text-like sample data.
pub fn generate_sample_data(seed: u64, size_bytes: usize) -> Vec<u8> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut data = Vec::with_capacity(size_bytes + 16);

    let letters = match WeightedIndex::new(LETTER_WEIGHTS) {
        Ok(dist) => dist,
        Err(_) => return vec![b'e'; size_bytes],
    };

    let mut words_in_sentence = 0;
    let mut sentence_start = true;

    while data.len() < size_bytes {
        // ~1 in 40 words is a run instead (e.g. "-----" or "aaaaaaa")
        if rng.gen_ratio(1, 40) {
            let byte = if rng.gen_bool(0.5) {
                b'-'
            } else {
                LETTERS[letters.sample(&mut rng)]
            };
            let run = rng.gen_range(4..=24);
            data.extend(std::iter::repeat(byte).take(run));
            data.push(b' ');
            continue;
        }

        let word_len = rng.gen_range(1..=9);
        for i in 0..word_len {
            let letter = LETTERS[letters.sample(&mut rng)];
            if i == 0 && sentence_start {
                data.push(letter.to_ascii_uppercase());
            } else {
                data.push(letter);
            }
        }
        sentence_start = false;
        words_in_sentence += 1;

        if words_in_sentence >= rng.gen_range(6..=18) {
            data.push(if rng.gen_ratio(1, 8) { b'!' } else { b'.' });
            data.push(if rng.gen_ratio(1, 5) { b'\n' } else { b' ' });
            words_in_sentence = 0;
            sentence_start = true;
        } else if rng.gen_ratio(1, 12) {
            data.extend_from_slice(b", ");
        } else {
            data.push(b' ');
        }
    }

    data.truncate(size_bytes);
    data
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_sample_data() {
        let data = generate_sample_data(42, 1000);
        assert_eq!(data.len(), 1000);
    }

    #[test]
    fn test_determinism() {
        let data1 = generate_sample_data(12345, 5000);
        let data2 = generate_sample_data(12345, 5000);

        assert_eq!(data1, data2);
    }

    #[test]
    fn test_different_seeds() {
        let data1 = generate_sample_data(1, 1000);
        let data2 = generate_sample_data(2, 1000);

        assert_ne!(data1, data2);
    }

    #[test]
    fn test_various_sizes() {
        for size in [0, 1, 100, 1000, 10000, 100000] {
            let data = generate_sample_data(999, size);
            assert_eq!(data.len(), size);
        }
    }

    #[test]
    fn test_text_like_alphabet() {
        let data = generate_sample_data(7, 20_000);
        assert!(data
            .iter()
            .all(|b| b.is_ascii_alphabetic() || b" .,!-\n".contains(b)));

        let e = data.iter().filter(|&&b| b == b'e').count();
        let z = data.iter().filter(|&&b| b == b'z').count();
        assert!(e > z);
    }

    #[test]
    fn test_sample_compresses() {
        let data = generate_sample_data(3, 32 * 1024);
        let result = huffpress_core::compress(&data).unwrap();
        assert!(result.compression_percentage > 20.0);
    }
}
