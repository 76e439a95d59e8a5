use ibig::UBig;

use crate::types::*;

/// Trait for string-like objects that can be hashed into the additive
/// anagram arithmetic used throughout this crate.
pub trait Anahashable {
    /// Computes the anagram value of `self`: the sum, over code points, of
    /// the weight assigned to that code point by `alphabet`. Code points
    /// absent from the alphabet contribute zero.
    ///
    /// ```
    /// # use ticcl_anahash::*;
    /// # use ticcl_anahash::test::get_test_alphabet;
    /// let alphabet = get_test_alphabet();
    /// assert_eq!("abc".anahash(&alphabet), "cab".anahash(&alphabet));
    /// ```
    fn anahash(&self, alphabet: &Alphabet) -> AnaValue;

    /// Replaces the reserved delimiter bytes `~` and `#` with `_`. These
    /// are structural delimiters in the anagram/index file formats and
    /// must never appear literally inside a word field.
    fn sanitize(&self) -> String;
}

impl Anahashable for str {
    fn anahash(&self, alphabet: &Alphabet) -> AnaValue {
        let mut hash = AnaValue::from(0u32);
        for c in self.chars() {
            if let Some(entry) = alphabet.get(&c) {
                hash += UBig::from(entry.weight);
            }
        }
        hash
    }

    fn sanitize(&self) -> String {
        self.chars()
            .map(|c| if c == '~' || c == '#' { '_' } else { c })
            .collect()
    }
}
