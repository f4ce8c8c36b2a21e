//! Traditional/Simplified character conversion: a lookup table over
//! `(simplified, traditional)` character pairs, applied one character at a
//! time to a UTF-8 string. The table's contents are data, not logic; this
//! module supplies the lookup engine and a small illustrative default.

use std::collections::HashMap;

/// A few dozen well-known pairs, enough to exercise the engine and serve as
/// a usable default. `济`/`濟` and `县`/`縣` are listed twice deliberately,
/// mirroring the duplicate keys known to exist in the historical bundled
/// table; [`ConversionTable::new`] keeps the first occurrence of each key.
pub const DEFAULT_PAIRS: &[(char, char)] = &[
    ('国', '國'),
    ('学', '學'),
    ('习', '習'),
    ('书', '書'),
    ('会', '會'),
    ('语', '語'),
    ('词', '詞'),
    ('汉', '漢'),
    ('电', '電'),
    ('脑', '腦'),
    ('网', '網'),
    ('络', '絡'),
    ('软', '軟'),
    ('件', '件'),
    ('码', '碼'),
    ('台', '臺'),
    ('湾', '灣'),
    ('简', '簡'),
    ('繁', '繁'),
    ('体', '體'),
    ('济', '濟'),
    ('济', '濟'),
    ('县', '縣'),
    ('县', '縣'),
    ('龙', '龍'),
    ('车', '車'),
    ('马', '馬'),
    ('鸟', '鳥'),
    ('鱼', '魚'),
    ('爱', '愛'),
];

/// A bidirectional simplified↔traditional lookup built from a table of
/// `(simplified, traditional)` pairs.
pub struct ConversionTable {
    simp_to_trad: HashMap<char, char>,
    trad_to_simp: HashMap<char, char>,
}

impl ConversionTable {
    /// Builds a table from `(simplified, traditional)` pairs. When a key
    /// repeats on either side, the first occurrence wins.
    pub fn new(pairs: &[(char, char)]) -> ConversionTable {
        let mut simp_to_trad = HashMap::new();
        let mut trad_to_simp = HashMap::new();
        for &(simp, trad) in pairs {
            simp_to_trad.entry(simp).or_insert(trad);
            trad_to_simp.entry(trad).or_insert(simp);
        }
        ConversionTable {
            simp_to_trad,
            trad_to_simp,
        }
    }

    /// Converts simplified characters in `text` to traditional, passing
    /// through anything not present in the table unchanged.
    pub fn simp_to_trad(&self, text: &str) -> String {
        text.chars()
            .map(|c| *self.simp_to_trad.get(&c).unwrap_or(&c))
            .collect()
    }

    /// Converts traditional characters in `text` to simplified, passing
    /// through anything not present in the table unchanged.
    pub fn trad_to_simp(&self, text: &str) -> String {
        text.chars()
            .map(|c| *self.trad_to_simp.get(&c).unwrap_or(&c))
            .collect()
    }
}

impl Default for ConversionTable {
    fn default() -> ConversionTable {
        ConversionTable::new(DEFAULT_PAIRS)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn round_trips_through_both_directions() {
        let table = ConversionTable::default();
        let trad = table.simp_to_trad("国学");
        assert_eq!(trad, "國學");
        assert_eq!(table.trad_to_simp(&trad), "国学");
    }

    #[test]
    fn unmapped_characters_pass_through() {
        let table = ConversionTable::default();
        assert_eq!(table.simp_to_trad("你好"), "你好");
    }

    #[test]
    fn duplicate_keys_keep_first_occurrence() {
        // Both directions resolve despite the deliberately duplicated
        // ('济', '濟') and ('县', '縣') pairs in the default table.
        let table = ConversionTable::default();
        assert_eq!(table.simp_to_trad("济"), "濟");
        assert_eq!(table.trad_to_simp("濟"), "济");
    }
}
