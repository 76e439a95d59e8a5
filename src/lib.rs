extern crate ibig;

pub mod alphabet;
pub mod anahash;
pub mod error;
pub mod foci;
pub mod hashset;
pub mod index;
pub mod io;
pub mod test;
pub mod types;
pub mod vocab;

pub use crate::alphabet::read_alphabet;
pub use crate::anahash::Anahashable;
pub use crate::error::{Result, TiccltoolsError};
pub use crate::hashset::{read_anahash_set, read_confusion_set, OrderedHashSet};
pub use crate::index::{build_index, IndexerConfig};
pub use crate::types::*;
pub use crate::vocab::{read_as_list, AnahashBuilder};
