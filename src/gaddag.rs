//! GADDAG-backed dictionary: validates whole words in O(1) and enumerates
//! every word a rack can form across a fixed anchor letter.
//!
//! The flattened `nodes`/`labels`/`terminal` vectors are built by inserting
//! into a dynamic [`trievec::TrieVec`] and then flattening breadth-first.
//! The trie stores GADDAG arc sequences rather than plain forward-word
//! prefixes, so a query can walk bidirectionally from an anchor letter
//! instead of only scanning left to right.
use crate::error::Error;
use crate::labelset::{Label, LabelSet};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

mod trievec;
use trievec::TrieVec;

/// Arc label marking the boundary between the reversed left context and the
/// literal right context of a GADDAG path (the `⊢` symbol in the literature).
pub const DELIMITER: Label = 27;

fn letter_to_label(c: char) -> Option<Label> {
    if c.is_ascii_alphabetic() {
        Some((c.to_ascii_uppercase() as u8) - b'A' + 1)
    } else {
        None
    }
}

fn label_to_letter(label: Label) -> char {
    (label - 1 + b'A') as char
}

/// Builds the arc sequences inserted into the trie for one word: for every
/// split point `k`, `w[k]` followed by the reversed prefix `w[0..k]`, the
/// delimiter, then the literal suffix `w[k+1..]`.
fn gaddag_sequences(word: &[Label]) -> Vec<Vec<Label>> {
    let n = word.len();
    let mut sequences = Vec::with_capacity(n);
    for k in 0..n {
        let mut seq = Vec::with_capacity(n + 1);
        seq.push(word[k]);
        seq.extend(word[..k].iter().rev());
        seq.push(DELIMITER);
        seq.extend(&word[k + 1..]);
        sequences.push(seq);
    }
    sequences
}

/// Flattened, read-only GADDAG. Node 0 is the root; a node's outgoing arcs
/// are the labels set in its [`LabelSet`], and `labels[start..start+len]`
/// gives the matching child node indices in label order.
struct Gaddag {
    nodes: Vec<(u32, LabelSet)>,
    labels: Vec<u32>,
    terminal: Vec<bool>,
}

impl Gaddag {
    fn child(&self, node: usize, label: Label) -> Option<usize> {
        let (start, set) = self.nodes[node];
        let i = set.index_of(label)?;
        Some(self.labels[start as usize + i] as usize)
    }

    fn children(&self, node: usize) -> impl Iterator<Item = (Label, usize)> + '_ {
        let (start, set) = self.nodes[node];
        set.iter()
            .enumerate()
            .map(move |(i, label)| (label, self.labels[start as usize + i] as usize))
    }

    fn is_terminal(&self, node: usize) -> bool {
        self.terminal[node]
    }
}

impl From<TrieVec<Label>> for Gaddag {
    /// Flattens the dynamic trie breadth-first. A child's position in
    /// `labels` is resolved to its eventual index by exploiting that nodes
    /// are dequeued in the same order indices are handed out, starting at 1
    /// (0 is the root).
    fn from(trie: TrieVec<Label>) -> Self {
        let mut nodes = Vec::new();
        let mut labels = Vec::new();
        let mut terminal = Vec::new();
        let mut queue: std::collections::VecDeque<&TrieVec<Label>> = std::collections::VecDeque::new();
        queue.push_back(&trie);
        let mut next_index = 1u32;
        while let Some(node) = queue.pop_front() {
            let start = labels.len() as u32;
            let mut set = LabelSet::new();
            for (label, child) in node.children() {
                set.insert(*label);
                labels.push(next_index);
                next_index += 1;
                queue.push_back(child);
            }
            nodes.push((start, set));
            terminal.push(node.terminal());
        }
        Gaddag {
            nodes,
            labels,
            terminal,
        }
    }
}

/// The remaining tiles available to draw letters from while walking the
/// GADDAG. Blanks stand in for any letter once the matching letter itself is
/// exhausted.
#[derive(Clone)]
struct RackCounts {
    letters: [u8; 26],
    blanks: u8,
}

impl RackCounts {
    fn from_str(rack: &str) -> Self {
        let mut letters = [0u8; 26];
        let mut blanks = 0u8;
        for c in rack.chars() {
            if c == '*' || c == '?' {
                blanks += 1;
            } else if c.is_ascii_alphabetic() {
                letters[(c.to_ascii_uppercase() as u8 - b'A') as usize] += 1;
            }
        }
        RackCounts { letters, blanks }
    }

    /// Consumes one occurrence of `label`, preferring the literal letter over
    /// a blank. Returns whether a blank was used, or `None` if the rack has
    /// neither.
    fn take(&mut self, label: Label) -> Option<bool> {
        let idx = (label - 1) as usize;
        if self.letters[idx] > 0 {
            self.letters[idx] -= 1;
            Some(false)
        } else if self.blanks > 0 {
            self.blanks -= 1;
            Some(true)
        } else {
            None
        }
    }

    fn put_back(&mut self, label: Label, used_blank: bool) {
        if used_blank {
            self.blanks += 1;
        } else {
            self.letters[(label - 1) as usize] += 1;
        }
    }
}

/// The word dictionary: exact validation plus rack-constrained anchor search.
///
/// ```
/// # use scrabble_engine::Dictionary;
/// let dict = Dictionary::from_words(&["CAT", "CATS", "AT"]);
/// assert!(dict.is_valid_word("CAT"));
/// assert!(!dict.is_valid_word("DOG"));
/// ```
pub struct Dictionary {
    gaddag: Gaddag,
    words: HashSet<String>,
}

impl Dictionary {
    /// Builds a dictionary from an explicit word list. Words containing
    /// anything outside `A..=Z`, or shorter than two letters, are skipped.
    pub fn from_words<S: AsRef<str>>(words: &[S]) -> Self {
        let mut trie = TrieVec::new();
        let mut accepted = HashSet::new();
        for w in words {
            let upper = w.as_ref().trim().to_ascii_uppercase();
            if upper.len() < 2 || !upper.chars().all(|c| c.is_ascii_alphabetic()) {
                continue;
            }
            let labels: Vec<Label> = upper.chars().map(|c| letter_to_label(c).unwrap()).collect();
            for seq in gaddag_sequences(&labels) {
                trie.insert(&seq);
            }
            accepted.insert(upper);
        }
        Dictionary {
            gaddag: Gaddag::from(trie),
            words: accepted,
        }
    }

    /// Reads one uppercase word per line from `path`.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let path_ref = path.as_ref();
        let contents = fs::read_to_string(path_ref).map_err(|source| Error::DictionaryLoadError {
            path: path_ref.display().to_string(),
            source,
        })?;
        let words: Vec<&str> = contents.lines().collect();
        Ok(Self::from_words(&words))
    }

    /// Number of distinct words held in the dictionary.
    pub fn word_count(&self) -> usize {
        self.words.len()
    }

    /// Exact membership check, case-insensitive.
    pub fn is_valid_word(&self, word: &str) -> bool {
        self.words.contains(&word.trim().to_ascii_uppercase())
    }

    /// Every word the `rack_letters` can form through `anchor`, given
    /// whether letters may extend left of the anchor, right of it, or both.
    ///
    /// `rack_letters` is a string of `A..=Z` and `*`/`?` for blanks.
    pub fn words_from(
        &self,
        rack_letters: &str,
        anchor: char,
        allow_left: bool,
        allow_right: bool,
    ) -> HashSet<String> {
        let mut results = HashSet::new();
        let anchor_label = match letter_to_label(anchor) {
            Some(l) => l,
            None => return results,
        };
        if let Some(start) = self.gaddag.child(0, anchor_label) {
            let mut counts = RackCounts::from_str(rack_letters);
            let anchor_str = anchor.to_ascii_uppercase().to_string();
            self.walk(
                start,
                anchor_str,
                0,
                false,
                &mut counts,
                allow_left,
                allow_right,
                &mut results,
            );
        }
        results
    }

    #[allow(clippy::too_many_arguments)]
    fn walk(
        &self,
        node: usize,
        current: String,
        left_len: usize,
        crossed: bool,
        counts: &mut RackCounts,
        allow_left: bool,
        allow_right: bool,
        results: &mut HashSet<String>,
    ) {
        if crossed && self.gaddag.is_terminal(node) {
            results.insert(current.clone());
        }
        for (label, child) in self.gaddag.children(node) {
            if label == DELIMITER {
                if !crossed && (left_len == 0 || allow_left) {
                    self.walk(
                        child,
                        current.clone(),
                        left_len,
                        true,
                        counts,
                        allow_left,
                        allow_right,
                        results,
                    );
                }
                continue;
            }
            if !crossed {
                if !allow_left {
                    continue;
                }
                if let Some(used_blank) = counts.take(label) {
                    let mut next = current.clone();
                    next.insert(0, label_to_letter(label));
                    self.walk(
                        child,
                        next,
                        left_len + 1,
                        false,
                        counts,
                        allow_left,
                        allow_right,
                        results,
                    );
                    counts.put_back(label, used_blank);
                }
            } else {
                if !allow_right {
                    continue;
                }
                if let Some(used_blank) = counts.take(label) {
                    let mut next = current.clone();
                    next.push(label_to_letter(label));
                    self.walk(
                        child,
                        next,
                        left_len,
                        true,
                        counts,
                        allow_left,
                        allow_right,
                        results,
                    );
                    counts.put_back(label, used_blank);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dict() -> Dictionary {
        Dictionary::from_words(&["CAT", "CATS", "AT", "TA", "CATER", "RATE"])
    }

    #[test]
    fn validates_exact_words() {
        let d = dict();
        assert!(d.is_valid_word("cat"));
        assert!(d.is_valid_word("CATS"));
        assert!(!d.is_valid_word("DOG"));
        assert!(!d.is_valid_word("CA"));
    }

    #[test]
    fn finds_words_through_anchor_both_directions() {
        let d = dict();
        let found = d.words_from("CTS", 'A', true, true);
        assert!(found.contains("CAT"));
        assert!(found.contains("CATS"));
    }

    #[test]
    fn respects_allow_left_false() {
        let d = dict();
        // Anchor fixed at the rack's 'A'; disallow extending left means the
        // anchor must be the first letter of the formed word.
        let found = d.words_from("T", 'A', false, true);
        assert!(found.contains("AT"));
        assert!(!found.contains("CAT"));
    }

    #[test]
    fn respects_allow_right_false() {
        let d = dict();
        let found = d.words_from("C", 'A', true, false);
        assert!(found.contains("CA") == false); // "CA" isn't in the dictionary
        let found2 = d.words_from("T", 'A', true, false);
        assert!(found2.contains("TA"));
    }

    #[test]
    fn blank_stands_in_for_any_letter() {
        let d = dict();
        let found = d.words_from("*TS", 'A', true, true);
        assert!(found.contains("CATS") || found.contains("CAT"));
    }

    #[test]
    fn unknown_anchor_letter_returns_empty() {
        let d = dict();
        assert!(d.words_from("ABC", 'Z', true, true).is_empty());
    }

    #[test]
    fn enumerates_exact_set_around_anchor() {
        let d = Dictionary::from_words(&["CAT", "CATS", "ACT", "TACT", "ARTS"]);
        let found = d.words_from("CATSR", 'A', true, true);
        let expected: HashSet<String> = ["CAT", "CATS", "ACT", "ARTS"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(found, expected, "TACT needs a second T the rack doesn't have");
    }

    #[test]
    fn rejects_short_and_non_alphabetic_entries() {
        let d = Dictionary::from_words(&["A", "B2", "ok", "go"]);
        assert_eq!(d.word_count(), 1);
        assert!(d.is_valid_word("GO"));
    }
}
