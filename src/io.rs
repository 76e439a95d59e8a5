use std::io::{BufRead, Write};

use crate::error::{Result, TiccltoolsError};
use crate::hashset::parse_anahash_line;
use crate::types::{AnaValue, AnagramTable, FreqTable, IndexResult};

/// Serializes an anagram (or foci) table: one `<hash>~<word1>#<word2>#...`
/// line per bucket in ascending hash order, words in ascending collation
/// order, terminated by a blank line (§4.2).
pub fn write_anagram_table(mut writer: impl Write, table: &AnagramTable) -> Result<()> {
    for (hash, words) in table.iter() {
        let joined: Vec<&str> = words.iter().map(String::as_str).collect();
        writeln!(writer, "{}~{}", hash, joined.join("#")).map_err(TiccltoolsError::Io)?;
    }
    writeln!(writer).map_err(TiccltoolsError::Io)?;
    Ok(())
}

/// Parses an anagram (or foci) file back into its table, the inverse of
/// [`write_anagram_table`]. Used to verify the serialization round-trip.
pub fn read_anagram_table(reader: impl BufRead) -> Result<AnagramTable> {
    let mut table = AnagramTable::new();
    for line in reader.lines() {
        let line = line.map_err(TiccltoolsError::Io)?;
        if line.is_empty() {
            continue;
        }
        let (hash, words) = parse_anahash_line(&line)?;
        table.entry(hash).or_default().extend(words);
    }
    Ok(table)
}

/// Writes the merged-frequency table as `word\tfreq` lines, sorted by
/// collation (the `BTreeMap` iteration order already guarantees this).
pub fn write_merged_table(mut writer: impl Write, table: &FreqTable) -> Result<()> {
    for (word, freq) in table.iter() {
        writeln!(writer, "{}\t{}", word, freq).map_err(TiccltoolsError::Io)?;
    }
    Ok(())
}

/// Writes list-mode output: `word\thash` lines, in the order supplied
/// (input order, per §4.2).
pub fn write_list(mut writer: impl Write, entries: &[(String, AnaValue)]) -> Result<()> {
    for (word, hash) in entries {
        writeln!(writer, "{}\t{}", word, hash).map_err(TiccltoolsError::Io)?;
    }
    Ok(())
}

/// Writes the index file: one `<diff>#<h1>,<h2>,...` line per diff bucket
/// in ascending diff order, hashes in ascending numeric order (§4.6).
pub fn write_index(mut writer: impl Write, result: &IndexResult) -> Result<()> {
    for (diff, hashes) in result.iter() {
        if hashes.is_empty() {
            continue;
        }
        let joined: Vec<String> = hashes.iter().map(|h| h.to_string()).collect();
        writeln!(writer, "{}#{}", diff, joined.join(",")).map_err(TiccltoolsError::Io)?;
    }
    Ok(())
}

/// Writes the optional confusion-statistics file: `<diff>#<count>` per
/// line, ascending diff order.
pub fn write_confusion_stats(mut writer: impl Write, result: &IndexResult) -> Result<()> {
    for (diff, hashes) in result.iter() {
        if hashes.is_empty() {
            continue;
        }
        writeln!(writer, "{}#{}", diff, hashes.len()).map_err(TiccltoolsError::Io)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    #[test]
    fn test_anagram_roundtrip() {
        let mut table = AnagramTable::new();
        let mut bucket = BTreeSet::new();
        bucket.insert("abc".to_string());
        bucket.insert("bca".to_string());
        bucket.insert("cab".to_string());
        table.insert(AnaValue::from(6u32), bucket);

        let mut buf = Vec::new();
        write_anagram_table(&mut buf, &table).unwrap();
        assert_eq!(String::from_utf8(buf.clone()).unwrap(), "6~abc#bca#cab\n\n");

        let parsed = read_anagram_table(std::io::Cursor::new(buf)).unwrap();
        assert_eq!(parsed, table);
    }

    #[test]
    fn test_index_emission_format() {
        let mut result = IndexResult::new();
        let mut set = BTreeSet::new();
        set.insert(AnaValue::from(10u32));
        set.insert(AnaValue::from(17u32));
        result.insert(AnaValue::from(7u32), set);

        let mut buf = Vec::new();
        write_index(&mut buf, &result).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "7#10,17\n");
    }

    #[test]
    fn test_confusion_stats_format() {
        let mut result = IndexResult::new();
        let mut set = BTreeSet::new();
        set.insert(AnaValue::from(10u32));
        set.insert(AnaValue::from(17u32));
        result.insert(AnaValue::from(7u32), set);

        let mut buf = Vec::new();
        write_confusion_stats(&mut buf, &result).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "7#2\n");
    }
}
