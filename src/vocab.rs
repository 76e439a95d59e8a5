use std::io::BufRead;

use crate::anahash::Anahashable;
use crate::error::{Result, TiccltoolsError};
use crate::types::{AnaValue, AnagramTable, Alphabet, BuilderConfig, FreqTable};

/// Splits a frequency-list line into its word and optional frequency,
/// enforcing the "1 or 2 columns" format rule.
fn parse_freq_line(line: &str) -> Result<(String, Option<u64>)> {
    let fields: Vec<&str> = line.split('\t').collect();
    match fields.len() {
        1 => Ok((fields[0].to_string(), None)),
        2 => {
            let freq: u64 = fields[1].parse().map_err(|_| TiccltoolsError::Format {
                line: line.to_string(),
                reason: "frequency should be a valid non-negative integer".to_string(),
            })?;
            Ok((fields[0].to_string(), Some(freq)))
        }
        _ => Err(TiccltoolsError::Format {
            line: line.to_string(),
            reason: "frequency file in wrong format, expected word or word\\tfreq".to_string(),
        }),
    }
}

/// Reads a frequency list in list mode: emits `(original_word, hash)` in
/// input order, without touching any anagram or frequency tables.
pub fn read_as_list(alphabet: &Alphabet, reader: impl BufRead) -> Result<Vec<(String, AnaValue)>> {
    let mut out = Vec::new();
    for line in reader.lines() {
        let line = line.map_err(TiccltoolsError::Io)?;
        if line.is_empty() {
            continue;
        }
        let (word, _freq) = parse_freq_line(&line)?;
        let hash = word.anahash(alphabet);
        out.push((word, hash));
    }
    Ok(out)
}

/// Accumulates the anagram table, frequency table and (optionally) the
/// merged-frequency table from one or more frequency-list streams.
///
/// This is the stateful part of components B-D: the primary pass via
/// [`AnahashBuilder::ingest`], the background merge via
/// [`AnahashBuilder::merge_background`], and serialization/foci extraction
/// operate on the tables it accumulates.
pub struct AnahashBuilder {
    alphabet: Alphabet,
    config: BuilderConfig,
    background_configured: bool,
    pub anagrams: AnagramTable,
    pub freq_list: FreqTable,
    pub merged: FreqTable,
}

impl AnahashBuilder {
    pub fn new(alphabet: Alphabet, config: BuilderConfig, background_configured: bool) -> Self {
        Self {
            alphabet,
            config,
            background_configured,
            anagrams: AnagramTable::new(),
            freq_list: FreqTable::new(),
            merged: FreqTable::new(),
        }
    }

    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    /// Primary ingest pass (component C). Not valid in list mode; use
    /// [`read_as_list`] instead.
    pub fn ingest(&mut self, reader: impl BufRead) -> Result<()> {
        for line in reader.lines() {
            let line = line.map_err(TiccltoolsError::Io)?;
            if line.is_empty() {
                continue;
            }
            let (original_word, freq) = parse_freq_line(&line)?;
            let freq = freq.unwrap_or(1);
            let sanitized = original_word.sanitize();
            let hash = sanitized.anahash(&self.alphabet);
            self.anagrams.entry(hash).or_default().insert(sanitized.clone());
            self.freq_list.insert(sanitized, freq);
            // The merged table is only populated here when a background
            // corpus is configured *and* foci extraction was requested;
            // this mirrors the reference implementation's gate exactly.
            if self.background_configured && self.config.artifreq > 0 {
                self.merged.insert(original_word, freq);
            }
        }
        Ok(())
    }

    /// Background merge pass (component D). Inserts sanitized words into
    /// the anagram table and *accumulates* frequencies (as opposed to the
    /// primary pass, which assigns) into the merged table, keyed by the
    /// unsanitized original word.
    pub fn merge_background(&mut self, reader: impl BufRead) -> Result<()> {
        for line in reader.lines() {
            let line = line.map_err(TiccltoolsError::Io)?;
            if line.is_empty() {
                continue;
            }
            let (original_word, freq) = parse_freq_line(&line)?;
            let freq = freq.unwrap_or(1);
            let sanitized = original_word.sanitize();
            let hash = sanitized.anahash(&self.alphabet);
            self.anagrams.entry(hash).or_default().insert(sanitized);
            *self.merged.entry(original_word).or_insert(0) += freq;
        }
        Ok(())
    }

    /// Extracts the foci table (see [`crate::foci::extract_foci`]) using
    /// this builder's current frequency list and configuration.
    pub fn extract_foci(&self) -> crate::types::FociTable {
        crate::foci::extract_foci(&self.freq_list, &self.alphabet, &self.config)
    }
}
