//! Platform-independent core of a Zhuyin/Bopomofo Chinese input method
//! engine: phonetic symbol and syllable types, keyboard layouts, the
//! on-disk phonetic and generic-table lexicon formats, input methods built
//! on top of them, and the editing context that ties a method to an
//! application-facing preedit/candidate/commit session.

pub mod context;
pub mod conversion;
pub mod editor;
pub mod error;
pub mod keyboard;
pub mod lexicon;
pub mod settings;
pub mod zhuyin;
