//! Shared fixtures for unit and integration tests.

use std::fs::File;
use std::io::Write;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::types::{Alphabet, AlphabetEntry};

/// A fixed alphabet used throughout the test suite: `a`..`e` carry weights
/// `1`..`5`, matching the worked examples in the design documentation.
/// `_` is present with weight 0, as it is after sanitization.
pub fn get_test_alphabet() -> Alphabet {
    let mut alphabet = Alphabet::new();
    alphabet.insert('a', AlphabetEntry { frequency: 100, weight: 1 });
    alphabet.insert('b', AlphabetEntry { frequency: 100, weight: 2 });
    alphabet.insert('c', AlphabetEntry { frequency: 100, weight: 3 });
    alphabet.insert('d', AlphabetEntry { frequency: 100, weight: 4 });
    alphabet.insert('e', AlphabetEntry { frequency: 100, weight: 5 });
    alphabet.insert('_', AlphabetEntry { frequency: 100, weight: 0 });
    alphabet
}

static TEMPFILE_COUNTER: AtomicUsize = AtomicUsize::new(0);

/// A file written into the OS temp directory that removes itself on drop.
/// Used wherever a test needs a real path to hand to a reader function.
pub struct TempFile {
    path: PathBuf,
}

impl TempFile {
    pub fn new(contents: &str) -> Self {
        let id = TEMPFILE_COUNTER.fetch_add(1, Ordering::Relaxed);
        let mut path = std::env::temp_dir();
        path.push(format!("ticcl-anahash-test-{}-{}.tmp", std::process::id(), id));
        let mut f = File::create(&path).expect("create temp file");
        f.write_all(contents.as_bytes()).expect("write temp file");
        TempFile { path }
    }

    pub fn path(&self) -> &str {
        self.path.to_str().expect("utf8 path")
    }
}

impl Drop for TempFile {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.path);
    }
}
