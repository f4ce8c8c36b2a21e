//! Zhuyin (Bopomofo) phonetic notation: symbols, syllables, and the
//! packed-key encoding used to index the phonetic lexicon.

mod bopomofo;
mod syllable;

pub use bopomofo::{Bopomofo, BopomofoKind, BopomofoParseError, EXTRA_INITIAL_GLYPHS};
pub use syllable::{DecodeSyllableError, SlotKind, Syllable, SyllableBuilder};
