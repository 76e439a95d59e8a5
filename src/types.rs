use ibig::UBig;
use std::collections::{BTreeMap, BTreeSet};

/// The anagram value: a wide unsigned integer fingerprint of a character
/// multiset. Two strings hash to the same value iff they are anagrams of
/// each other, and hashes are additive over concatenation:
/// `hash(xy) == hash(x) + hash(y)`.
pub type AnaValue = UBig;

/// A single Unicode scalar value, as read from the alphabet file.
pub type AlphabetChar = char;

/// One entry of the alphabet: how often the character occurred in the
/// corpus the alphabet was derived from, and the weight it contributes to
/// the anagram hash whenever it is encountered.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AlphabetEntry {
    pub frequency: u64,
    pub weight: u64,
}

/// Maps characters to their frequency/weight entry. Characters absent from
/// this table contribute a weight of zero to the hash (the identity
/// element of the anagram arithmetic).
pub type Alphabet = BTreeMap<AlphabetChar, AlphabetEntry>;

/// `hash -> { words sharing that anagram value }`. Iteration order is by
/// hash ascending and, within a bucket, by word collation ascending
/// (`BTreeMap`/`BTreeSet` give us both for free).
pub type AnagramTable = BTreeMap<AnaValue, BTreeSet<String>>;

/// `word -> frequency`.
pub type FreqTable = BTreeMap<String, u64>;

/// Same shape as [`AnagramTable`], holding only the low-frequency
/// "worth searching" subset of the vocabulary.
pub type FociTable = AnagramTable;

/// `diff -> { corpus hashes participating in a pair at that difference }`.
pub type IndexResult = BTreeMap<AnaValue, BTreeSet<AnaValue>>;

/// Configuration for the anahash builder, passed by value rather than
/// kept as process-wide globals.
#[derive(Clone, Debug)]
pub struct BuilderConfig {
    pub artifreq: u64,
    pub separator: char,
    pub ngrams: bool,
    pub list_mode: bool,
}

impl Default for BuilderConfig {
    fn default() -> Self {
        Self {
            artifreq: 0,
            separator: '_',
            ngrams: false,
            list_mode: false,
        }
    }
}
