//! Keyboard layouts: static tables mapping a printable character to the
//! syllable slot and index it fills, one table per supported layout.

mod tables;

use crate::zhuyin::SlotKind;
use tables::LayoutEntry;

/// The keyboard layouts the phonetic method can be configured for.
///
/// Values are stable and match the Host API's `KeyboardLayout` enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum KeyboardLayout {
    Standard = 0,
    Hsu = 1,
    ETen = 2,
    ETen26 = 3,
    Ibm = 4,
    Pinyin = 5,
    Dvorak = 6,
}

impl KeyboardLayout {
    /// Resolves a configuration name, case-insensitively, to a layout.
    ///
    /// Several layouts are commonly known by more than one name.
    pub fn from_name(name: &str) -> Option<KeyboardLayout> {
        match name.to_ascii_lowercase().as_str() {
            "standard" | "zo" | "dachen" => Some(KeyboardLayout::Standard),
            "hsu" => Some(KeyboardLayout::Hsu),
            "eten" | "et" => Some(KeyboardLayout::ETen),
            "eten26" | "et26" => Some(KeyboardLayout::ETen26),
            "ibm" => Some(KeyboardLayout::Ibm),
            "pinyin" | "hanyu" => Some(KeyboardLayout::Pinyin),
            "dvorak" => Some(KeyboardLayout::Dvorak),
            _ => None,
        }
    }

    fn table(&self) -> &'static [LayoutEntry] {
        match self {
            KeyboardLayout::Standard => tables::STANDARD,
            KeyboardLayout::Hsu => tables::HSU,
            KeyboardLayout::ETen => tables::STANDARD,
            KeyboardLayout::ETen26 => tables::ETEN26,
            KeyboardLayout::Ibm => tables::IBM,
            KeyboardLayout::Pinyin => tables::PINYIN,
            KeyboardLayout::Dvorak => tables::DVORAK,
        }
    }

    /// Looks up the slot `ch` fills under this layout. When more than one
    /// table entry matches the character, the last one wins.
    pub fn lookup(&self, ch: char) -> Option<(SlotKind, u8)> {
        let mut found = None;
        for entry in self.table() {
            if entry.ch == ch {
                found = Some((entry.kind, entry.index));
            }
        }
        found
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::zhuyin::SlotKind;

    #[test]
    fn from_name_resolves_aliases() {
        assert_eq!(
            KeyboardLayout::from_name("ZO"),
            Some(KeyboardLayout::Standard)
        );
        assert_eq!(KeyboardLayout::from_name("et26"), Some(KeyboardLayout::ETen26));
        assert_eq!(KeyboardLayout::from_name("hanyu"), Some(KeyboardLayout::Pinyin));
        assert_eq!(KeyboardLayout::from_name("dne"), None);
    }

    #[test]
    fn standard_maps_q_to_initial_p() {
        assert_eq!(
            KeyboardLayout::Standard.lookup('q'),
            Some((SlotKind::Initial, 2))
        );
    }

    #[test]
    fn standard_space_has_no_table_entry() {
        assert_eq!(KeyboardLayout::Standard.lookup(' '), None);
    }

    #[test]
    fn every_layout_reaches_all_five_tones() {
        for layout in [
            KeyboardLayout::Standard,
            KeyboardLayout::Hsu,
            KeyboardLayout::ETen,
            KeyboardLayout::ETen26,
            KeyboardLayout::Ibm,
            KeyboardLayout::Pinyin,
            KeyboardLayout::Dvorak,
        ] {
            let mut tones = layout
                .table()
                .iter()
                .filter(|entry| entry.kind == SlotKind::Tone)
                .map(|entry| entry.index)
                .collect::<Vec<_>>();
            tones.sort_unstable();
            tones.dedup();
            assert_eq!(tones, vec![2, 3, 4, 5], "layout {layout:?} missing a tone key");
        }
    }
}
