//! Word-level spelling correction for incoming questions.
//!
//! Candidates are the known words within edit distance 1, then 2, of an
//! unknown token (deletes, transposes, replaces, inserts over `a-z`); the
//! most frequent candidate wins. Tokens with digits, apostrophes, or
//! non-ASCII letters are never touched, and neither are very short ones.

use anyhow::{Context, Result};
use std::collections::HashMap;
use std::path::Path;

/// Frequency-ranked English word list, most common first.
const BUNDLED_WORDS: &str = include_str!("../data/words_en.txt");

const ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyz";
const MIN_WORD_LEN: usize = 3;
/// Second-order edits grow quadratically; longer tokens only try distance 1.
const MAX_EDIT2_LEN: usize = 12;

#[derive(Debug, Clone, Default)]
pub struct SpellCorrector {
    frequencies: HashMap<String, u64>,
}

impl SpellCorrector {
    /// Corrector over the bundled English word list.
    pub fn bundled() -> Self {
        Self::from_word_list(BUNDLED_WORDS)
    }

    /// Loads a word list from disk. See [`SpellCorrector::from_word_list`] for the format.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read dictionary: {}", path.display()))?;
        Ok(Self::from_word_list(&content))
    }

    /// Parses one `word [count]` entry per line; `#` starts a comment line.
    ///
    /// Without a count, earlier lines rank as more frequent than later ones.
    /// Repeated words keep their first (highest) ranking.
    pub fn from_word_list(content: &str) -> Self {
        let entries: Vec<(&str, Option<u64>)> = content
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty() && !l.starts_with('#'))
            .filter_map(|line| {
                let mut parts = line.split_whitespace();
                let word = parts.next()?;
                let count = parts.next().and_then(|c| c.parse().ok());
                Some((word, count))
            })
            .collect();

        let total = entries.len() as u64;
        let mut frequencies = HashMap::with_capacity(entries.len());
        for (rank, (word, count)) in entries.into_iter().enumerate() {
            let freq = count.unwrap_or(total - rank as u64);
            frequencies.entry(word.to_lowercase()).or_insert(freq);
        }
        Self { frequencies }
    }

    /// Lifts domain words (phrases are split on whitespace) to top frequency,
    /// so they outrank any general-English neighbor of a typo.
    pub fn with_vocabulary<'a>(mut self, phrases: impl IntoIterator<Item = &'a str>) -> Self {
        let top = self.frequencies.values().copied().max().unwrap_or(0) + 1;
        for phrase in phrases {
            for word in phrase.split_whitespace() {
                let word: String = word
                    .chars()
                    .filter(|c| c.is_ascii_alphabetic())
                    .collect::<String>()
                    .to_lowercase();
                if !word.is_empty() {
                    self.frequencies.insert(word, top);
                }
            }
        }
        self
    }

    pub fn len(&self) -> usize {
        self.frequencies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frequencies.is_empty()
    }

    pub fn is_known(&self, word: &str) -> bool {
        self.frequencies.contains_key(&word.to_lowercase())
    }

    /// Corrects every eligible token in `text`, leaving everything else verbatim.
    pub fn correct(&self, text: &str) -> String {
        let mut out = String::with_capacity(text.len());
        let mut token = String::new();
        for c in text.chars() {
            if c.is_alphanumeric() || c == '\'' {
                token.push(c);
            } else {
                self.flush(&mut token, &mut out);
                out.push(c);
            }
        }
        self.flush(&mut token, &mut out);
        out
    }

    fn flush(&self, token: &mut String, out: &mut String) {
        if token.is_empty() {
            return;
        }
        match self.correct_word(token) {
            Some(fixed) => out.push_str(&fixed),
            None => out.push_str(token),
        }
        token.clear();
    }

    /// Returns the replacement for `word`, or `None` when it should stay as is.
    pub fn correct_word(&self, word: &str) -> Option<String> {
        if word.len() < MIN_WORD_LEN || !word.chars().all(|c| c.is_ascii_alphabetic()) {
            return None;
        }
        let lower = word.to_ascii_lowercase();
        if self.frequencies.contains_key(&lower) {
            return None;
        }

        let first = edits1(&lower);
        let best = self.most_frequent(first.iter()).or_else(|| {
            if lower.len() > MAX_EDIT2_LEN {
                return None;
            }
            let second: Vec<String> = first.iter().flat_map(|e| edits1(e)).collect();
            self.most_frequent(second.iter())
        })?;

        Some(match_case(word, best))
    }

    fn most_frequent<'s, 'c>(
        &'s self,
        candidates: impl Iterator<Item = &'c String>,
    ) -> Option<&'s str> {
        let mut best: Option<(&'s str, u64)> = None;
        for candidate in candidates {
            if let Some((known, &freq)) = self.frequencies.get_key_value(candidate) {
                let better = match best {
                    None => true,
                    Some((w, f)) => freq > f || (freq == f && known.as_str() < w),
                };
                if better {
                    best = Some((known.as_str(), freq));
                }
            }
        }
        best.map(|(w, _)| w)
    }
}

fn edits1(word: &str) -> Vec<String> {
    let bytes = word.as_bytes();
    let n = bytes.len();
    let mut out = Vec::with_capacity(54 * n + 25);

    for i in 0..n {
        let mut w = bytes.to_vec();
        w.remove(i);
        out.push(w);
    }
    for i in 0..n.saturating_sub(1) {
        let mut w = bytes.to_vec();
        w.swap(i, i + 1);
        out.push(w);
    }
    for i in 0..n {
        for &c in ALPHABET {
            if c != bytes[i] {
                let mut w = bytes.to_vec();
                w[i] = c;
                out.push(w);
            }
        }
    }
    for i in 0..=n {
        for &c in ALPHABET {
            let mut w = bytes.to_vec();
            w.insert(i, c);
            out.push(w);
        }
    }

    out.into_iter()
        .filter_map(|w| String::from_utf8(w).ok())
        .collect()
}

fn match_case(original: &str, corrected: &str) -> String {
    let first_upper = original
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_uppercase());
    let all_upper = first_upper && original.chars().all(|c| c.is_ascii_uppercase());
    if all_upper {
        corrected.to_ascii_uppercase()
    } else if first_upper {
        let mut out = String::with_capacity(corrected.len());
        let mut cs = corrected.chars();
        if let Some(c) = cs.next() {
            out.push(c.to_ascii_uppercase());
        }
        out.extend(cs);
        out
    } else {
        corrected.to_string()
    }
}
