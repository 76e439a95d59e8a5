use crate::anahash::Anahashable;
use crate::types::{Alphabet, BuilderConfig, FociTable, FreqTable};

/// Extracts the foci table from a fully-populated frequency list
/// (component C's low-frequency "worth searching" reduction, §4.2).
///
/// Only meaningful when `config.artifreq > 0`; callers should skip calling
/// this entirely otherwise (matching the reference tool, which never
/// produces a foci file when `--artifrq` is unset).
pub fn extract_foci(freq_list: &FreqTable, alphabet: &Alphabet, config: &BuilderConfig) -> FociTable {
    let mut foci = FociTable::new();
    for (word, &freq) in freq_list.iter() {
        // The hash is taken from the word's original (possibly mixed)
        // case, before any lowercasing below - this keeps foci hash
        // values aligned with the main anahash file's ordering even
        // though the stored word is lowercased.
        let hash = word.anahash(alphabet);
        if config.ngrams {
            let parts: Vec<&str> = word.split(config.separator).collect();
            if ngram_is_interesting(&parts, freq_list, config.artifreq) {
                foci.entry(hash).or_default().insert(word.to_lowercase());
            }
        } else if is_unigram_focus(word, freq, freq_list, config.artifreq) {
            foci.entry(hash).or_default().insert(word.to_lowercase());
        }
    }
    foci
}

fn is_unigram_focus(word: &str, freq: u64, freq_list: &FreqTable, artifreq: u64) -> bool {
    if freq >= artifreq {
        return false;
    }
    let lower = word.to_lowercase();
    match freq_list.get(&lower) {
        None => true,
        Some(&lower_freq) => lower_freq < artifreq,
    }
}

fn ngram_is_interesting(parts: &[&str], freq_list: &FreqTable, artifreq: u64) -> bool {
    parts.iter().any(|part| match freq_list.get(*part) {
        Some(&part_freq) => is_unigram_focus(part, part_freq, freq_list, artifreq),
        None => false,
    })
}
