use std::io::BufRead;

use crate::error::{Result, TiccltoolsError};
use crate::types::AnaValue;

/// An ordered set of anagram hashes, backed by a sorted vector. Supports
/// O(log n) membership and bidirectional iteration from a located
/// element, which is what the indexer's inner loop needs (§9).
#[derive(Clone, Debug, Default)]
pub struct OrderedHashSet {
    values: Vec<AnaValue>,
}

impl OrderedHashSet {
    pub fn from_sorted_dedup(mut values: Vec<AnaValue>) -> Self {
        values.sort();
        values.dedup();
        OrderedHashSet { values }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn contains(&self, value: &AnaValue) -> bool {
        self.values.binary_search(value).is_ok()
    }

    /// Finds the index of `value` in the set, if present.
    pub fn position(&self, value: &AnaValue) -> Option<usize> {
        self.values.binary_search(value).ok()
    }

    pub fn as_slice(&self) -> &[AnaValue] {
        &self.values
    }

    pub fn max(&self) -> Option<&AnaValue> {
        self.values.last()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, AnaValue> {
        self.values.iter()
    }
}

/// Reads the anahash file format (§4.2/§6) and returns the ordered set of
/// hashes whose *shortest* word in the bucket has a length in `[low, high]`
/// (inclusive). Buckets with no word in-band are skipped and counted.
pub fn read_anahash_set(
    reader: impl BufRead,
    low: usize,
    high: usize,
) -> Result<(OrderedHashSet, usize)> {
    let mut values = Vec::new();
    let mut skipped = 0usize;
    for line in reader.lines() {
        let line = line.map_err(TiccltoolsError::Io)?;
        if line.is_empty() {
            continue;
        }
        let (hash, words) = parse_anahash_line(&line)?;
        let in_band = words.iter().any(|w| {
            let len = w.chars().count();
            len >= low && len <= high
        });
        if in_band {
            values.push(hash);
        } else {
            skipped += 1;
        }
    }
    Ok((OrderedHashSet::from_sorted_dedup(values), skipped))
}

/// Parses one `<hash>~<word1>#<word2>#...` line.
pub(crate) fn parse_anahash_line(line: &str) -> Result<(AnaValue, Vec<String>)> {
    let (hash_field, words_field) = line.split_once('~').ok_or_else(|| TiccltoolsError::Format {
        line: line.to_string(),
        reason: "anahash line missing '~' separator".to_string(),
    })?;
    let hash: AnaValue = hash_field.parse().map_err(|_| TiccltoolsError::Format {
        line: line.to_string(),
        reason: "anahash line has a non-numeric hash field".to_string(),
    })?;
    let words = words_field.split('#').map(|w| w.to_string()).collect();
    Ok((hash, words))
}

/// Reads a confusion-difference file: one integer per line, with an
/// optional `#metadata` suffix that is ignored.
pub fn read_confusion_set(reader: impl BufRead) -> Result<OrderedHashSet> {
    let mut values = Vec::new();
    for line in reader.lines() {
        let line = line.map_err(TiccltoolsError::Io)?;
        if line.is_empty() {
            continue;
        }
        let field = line.split('#').next().unwrap_or("").trim();
        let value: AnaValue = field.parse().map_err(|_| TiccltoolsError::Format {
            line: line.to_string(),
            reason: "confusion file line is not an integer".to_string(),
        })?;
        values.push(value);
    }
    Ok(OrderedHashSet::from_sorted_dedup(values))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_read_anahash_set_band_filter() {
        // "abcdef" is 6 chars, "ab" is 2 chars
        let input = "10~ab\n20~abcdef\n";
        let (set, skipped) = read_anahash_set(Cursor::new(input), 5, 35).unwrap();
        assert_eq!(set.len(), 1);
        assert!(set.contains(&AnaValue::from(20u32)));
        assert_eq!(skipped, 1);
    }

    #[test]
    fn test_read_anahash_set_keeps_bucket_if_any_word_in_band() {
        let input = "10~ab#abcdef\n";
        let (set, skipped) = read_anahash_set(Cursor::new(input), 5, 35).unwrap();
        assert_eq!(set.len(), 1);
        assert_eq!(skipped, 0);
    }

    #[test]
    fn test_read_confusion_set_with_metadata() {
        let input = "7\n8#some metadata\n15\n";
        let set = read_confusion_set(Cursor::new(input)).unwrap();
        assert_eq!(set.len(), 3);
        assert_eq!(set.max(), Some(&AnaValue::from(15u32)));
    }

    #[test]
    fn test_ordered_hash_set_position() {
        let set = OrderedHashSet::from_sorted_dedup(vec![
            AnaValue::from(10u32),
            AnaValue::from(25u32),
            AnaValue::from(17u32),
            AnaValue::from(40u32),
        ]);
        assert_eq!(set.position(&AnaValue::from(17u32)), Some(1));
        assert_eq!(set.position(&AnaValue::from(99u32)), None);
    }
}
