//! Linguistic feature extraction
//!
//! A fixed-lexicon reading of a word or phrase: sentiment, letter counts and
//! a rare-letter flag. No randomness; identical text always yields identical
//! features.

use serde::Serialize;

const POSITIVE_WORDS: &[&str] = &["joy", "love", "happy", "bright", "good", "fun", "beauty"];
const NEGATIVE_WORDS: &[&str] = &["sad", "hate", "dark", "bad", "pain", "fear"];
const RARE_CHARS: &[char] = &['x', 'z', 'q'];
const VOWELS: &[char] = &['a', 'e', 'i', 'o', 'u'];

/// Inflectional endings peeled off when the bare stem is a lexicon word.
const SUFFIXES: &[&str] = &["ful", "ness", "ly", "ing", "ed", "s"];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureVector {
    pub sentiment: f64,
    pub length: usize,
    pub vowel_ratio: f64,
    pub has_rare_char: bool,
    pub word_count: usize,
    pub cleaned_words: Vec<String>,
}

impl FeatureVector {
    pub fn neutral() -> Self {
        Self {
            sentiment: 0.0,
            length: 0,
            vowel_ratio: 0.0,
            has_rare_char: false,
            word_count: 0,
            cleaned_words: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.length == 0
    }
}

impl Default for FeatureVector {
    fn default() -> Self {
        Self::neutral()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Polarity {
    Positive,
    Negative,
}

pub struct Lexicon {
    positive: &'static [&'static str],
    negative: &'static [&'static str],
    rare_chars: &'static [char],
}

impl Lexicon {
    pub fn new() -> Self {
        Self {
            positive: POSITIVE_WORDS,
            negative: NEGATIVE_WORDS,
            rare_chars: RARE_CHARS,
        }
    }

    /// Words keep their spelling in `cleaned_words`; sentiment and the letter
    /// statistics are read from their lexicon stems.
    pub fn analyze(&self, text: &str) -> FeatureVector {
        let cleaned_words: Vec<String> = text
            .split_whitespace()
            .map(normalize_token)
            .filter(|word| !word.is_empty())
            .collect();

        if cleaned_words.is_empty() {
            return FeatureVector::neutral();
        }
        let stems: Vec<&str> = cleaned_words
            .iter()
            .map(|word| self.reduce_to_stem(word))
            .collect();

        let mut score = 0.0;
        let mut scored = 0usize;
        for word in &stems {
            match self.polarity(word) {
                Some(Polarity::Positive) => {
                    score += 1.0;
                    scored += 1;
                }
                Some(Polarity::Negative) => {
                    score -= 1.0;
                    scored += 1;
                }
                None => {}
            }
        }
        let sentiment = if scored > 0 {
            score / scored as f64
        } else {
            0.0
        };

        let length: usize = stems.iter().map(|w| w.chars().count()).sum();
        let vowels = stems
            .iter()
            .flat_map(|w| w.chars())
            .filter(|c| VOWELS.contains(c))
            .count();
        let vowel_ratio = if length > 0 {
            vowels as f64 / length as f64
        } else {
            0.0
        };
        let has_rare_char = stems
            .iter()
            .flat_map(|w| w.chars())
            .any(|c| self.rare_chars.contains(&c));

        FeatureVector {
            sentiment,
            length,
            vowel_ratio,
            has_rare_char,
            word_count: cleaned_words.len(),
            cleaned_words,
        }
    }

    fn polarity(&self, word: &str) -> Option<Polarity> {
        if self.positive.contains(&word) {
            Some(Polarity::Positive)
        } else if self.negative.contains(&word) {
            Some(Polarity::Negative)
        } else {
            None
        }
    }

    fn reduce_to_stem<'a>(&self, word: &'a str) -> &'a str {
        if self.polarity(word).is_some() {
            return word;
        }
        SUFFIXES
            .iter()
            .filter_map(|suffix| word.strip_suffix(suffix))
            .find(|stem| self.polarity(stem).is_some())
            .unwrap_or(word)
    }
}

impl Default for Lexicon {
    fn default() -> Self {
        Self::new()
    }
}

/// Lowercase and keep only `a..z`.
pub fn normalize_token(token: &str) -> String {
    token
        .chars()
        .flat_map(char::to_lowercase)
        .filter(|c| c.is_ascii_lowercase())
        .collect()
}

/// Analyze with the built-in lexicon.
pub fn analyze(text: &str) -> FeatureVector {
    Lexicon::new().analyze(text)
}
