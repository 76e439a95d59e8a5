use std::fs::File;
use std::io::{BufRead, BufReader};

use crate::error::{Result, TiccltoolsError};
use crate::types::{Alphabet, AlphabetEntry};

/// Reads an alphabet file: `char\tfreq\tweight` per line. Blank lines and
/// lines starting with `#` are comments. Entries whose frequency is
/// strictly below `clip` are dropped, unless the frequency is exactly
/// zero (the zero-frequency sentinel is never clipped).
pub fn read_alphabet(filename: &str, clip: u64) -> Result<Alphabet> {
    let f = File::open(filename).map_err(TiccltoolsError::Io)?;
    let reader = BufReader::new(f);
    let mut alphabet = Alphabet::new();
    for line in reader.lines() {
        let line = line.map_err(TiccltoolsError::Io)?;
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let fields: Vec<&str> = line.split('\t').collect();
        if fields.len() != 3 {
            return Err(TiccltoolsError::Format {
                line: line.clone(),
                reason: "alphabet file in wrong format, expected char\\tfreq\\tweight".to_string(),
            });
        }
        let c = decode_char_field(fields[0]).ok_or_else(|| TiccltoolsError::Format {
            line: line.clone(),
            reason: "alphabet character field must resolve to a single character".to_string(),
        })?;
        let frequency: u64 = fields[1].parse().map_err(|_| TiccltoolsError::Format {
            line: line.clone(),
            reason: "alphabet frequency should be a non-negative integer".to_string(),
        })?;
        let weight: u64 = fields[2].parse().map_err(|_| TiccltoolsError::Format {
            line: line.clone(),
            reason: "alphabet weight should be a non-negative integer".to_string(),
        })?;
        if frequency != 0 && frequency < clip {
            continue;
        }
        alphabet.insert(c, AlphabetEntry { frequency, weight });
    }
    Ok(alphabet)
}

/// Decodes the first column of an alphabet line, recognising the escape
/// sequences `\s`, `\t`, `\n` for characters that are awkward to put
/// literally in a TSV file.
fn decode_char_field(field: &str) -> Option<char> {
    let resolved = match field {
        "\\s" => " ".to_string(),
        "\\t" => "\t".to_string(),
        "\\n" => "\n".to_string(),
        _ => field.to_string(),
    };
    let mut chars = resolved.chars();
    let c = chars.next()?;
    if chars.next().is_some() {
        None
    } else {
        Some(c)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::TempFile;

    #[test]
    fn test_basic_alphabet() {
        let tmp = TempFile::new("a\t100\t1\nb\t100\t2\nc\t100\t3\n");
        let alphabet = read_alphabet(tmp.path(), 0).expect("read alphabet");
        assert_eq!(alphabet.len(), 3);
        assert_eq!(alphabet.get(&'a').unwrap().weight, 1);
        assert_eq!(alphabet.get(&'c').unwrap().weight, 3);
    }

    #[test]
    fn test_clip_drops_low_frequency() {
        let tmp = TempFile::new("a\t100\t1\nb\t2\t2\nc\t0\t3\n");
        let alphabet = read_alphabet(tmp.path(), 10).expect("read alphabet");
        // b is clipped (freq 2 < 10), c is never clipped despite freq 0
        assert!(alphabet.contains_key(&'a'));
        assert!(!alphabet.contains_key(&'b'));
        assert!(alphabet.contains_key(&'c'));
    }

    #[test]
    fn test_comments_and_blank_lines_ignored() {
        let tmp = TempFile::new("# comment\n\na\t100\t1\n");
        let alphabet = read_alphabet(tmp.path(), 0).expect("read alphabet");
        assert_eq!(alphabet.len(), 1);
    }

    #[test]
    fn test_escape_sequences() {
        let tmp = TempFile::new("\\s\t100\t1\n\\t\t100\t2\n");
        let alphabet = read_alphabet(tmp.path(), 0).expect("read alphabet");
        assert!(alphabet.contains_key(&' '));
        assert!(alphabet.contains_key(&'\t'));
    }
}
