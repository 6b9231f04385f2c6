//! Character-bigram Markov chain used to dream up nomad words.

use std::collections::BTreeMap;

use rand::Rng;

use crate::linguistics::normalize_token;
use crate::rng::RngExt;

pub const START: char = '^';
pub const END: char = '$';

const PLACEHOLDER_WORD: &str = "placeholder";
const DEGENERATE_FALLBACK: &str = "nomad";
const SHORT_WALK_FALLBACK: &str = "echo";

/// Key: previous character. Value: every observed successor, duplicates kept
/// so that sampling is proportional to bigram frequency.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MarkovChain {
    transitions: BTreeMap<char, Vec<char>>,
}

impl MarkovChain {
    pub fn from_text(text: &str) -> Self {
        let mut words: Vec<String> = text
            .split_whitespace()
            .map(normalize_token)
            .filter(|word| !word.is_empty())
            .collect();
        if words.is_empty() {
            words.push(PLACEHOLDER_WORD.to_string());
        }

        let mut chain = Self::default();
        for word in &words {
            chain.learn(word);
        }
        chain
    }

    fn learn(&mut self, word: &str) {
        let chars: Vec<char> = std::iter::once(START)
            .chain(word.chars())
            .chain(std::iter::once(END))
            .collect();
        for pair in chars.windows(2) {
            self.transitions.entry(pair[0]).or_default().push(pair[1]);
        }
    }

    pub fn successors(&self, prev: char) -> &[char] {
        self.transitions
            .get(&prev)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn is_degenerate(&self) -> bool {
        self.successors(START).is_empty()
    }

    /// Random walk from the start marker.
    ///
    /// The end marker is ignored until `min_len` letters exist; the walk gives
    /// up after `max_len * 3` draws.
    pub fn generate<R: Rng>(&self, rng: &mut R, min_len: usize, max_len: usize) -> String {
        if self.is_degenerate() {
            return DEGENERATE_FALLBACK.to_string();
        }

        let mut current = START;
        let mut word = String::new();
        let mut length = 0;
        let mut attempts = max_len * 3;

        while length < max_len && attempts > 0 {
            attempts -= 1;
            let Some(&next) = rng.pick(self.successors(current)) else {
                break;
            };
            if next == END {
                if length >= min_len {
                    break;
                }
                continue;
            }
            word.push(next);
            current = next;
            length += 1;
        }

        if length >= min_len {
            word
        } else {
            SHORT_WALK_FALLBACK.to_string()
        }
    }
}
