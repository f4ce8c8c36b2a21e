use thiserror::Error;

/// The category of a phonetic symbol within a syllable.
///
/// Zhuyin, or Bopomofo, consists of 37 letters and 5 tone marks. Each one
/// belongs to exactly one of the four slots a syllable is assembled from:
///
/// 1. Initial sounds: ㄅㄆㄇㄈㄉㄊㄋㄌㄍㄎㄏㄐㄑㄒㄓㄔㄕㄖㄗㄘㄙ
/// 2. Medial glides: ㄧㄨㄩ
/// 3. Finals (rimes): ㄚㄛㄜㄝㄞㄟㄠㄡㄢㄣㄤㄥㄦ
/// 4. Tonal marks: ˊˇˋ˙ (plus the unmarked first tone)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BopomofoKind {
    Initial = 0,
    Medial,
    Rime,
    Tone,
}

/// Zhuyin Fuhao, often shortened as zhuyin and commonly called bopomofo.
///
/// <https://simple.m.wikipedia.org/wiki/Zhuyin>
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bopomofo {
    /// ㄅ
    B = 0,
    /// ㄆ
    P,
    /// ㄇ
    M,
    /// ㄈ
    F,
    /// ㄉ
    D,
    /// ㄊ
    T,
    /// ㄋ
    N,
    /// ㄌ
    L,
    /// ㄍ
    G,
    /// ㄎ
    K,
    /// ㄏ
    H,
    /// ㄐ
    J,
    /// ㄑ
    Q,
    /// ㄒ
    X,
    /// ㄓ
    ZH,
    /// ㄔ
    CH,
    /// ㄕ
    SH,
    /// ㄖ
    R,
    /// ㄗ
    Z,
    /// ㄘ
    C,
    /// ㄙ
    S,
    /// ㄧ
    I,
    /// ㄨ
    U,
    /// ㄩ
    IU,
    /// ㄚ
    A,
    /// ㄛ
    O,
    /// ㄜ
    E,
    /// ㄝ
    EH,
    /// ㄞ
    AI,
    /// ㄟ
    EI,
    /// ㄠ
    AU,
    /// ㄡ
    OU,
    /// ㄢ
    AN,
    /// ㄣ
    EN,
    /// ㄤ
    ANG,
    /// ㄥ
    ENG,
    /// ㄦ
    ER,
    /// flat tone; renders as no diacritic
    Tone1,
    /// ˊ
    Tone2,
    /// ˇ
    Tone3,
    /// ˋ
    Tone4,
    /// ˙ (neutral tone)
    Tone5,
}

use Bopomofo::*;

const INITIAL_MAP: [Bopomofo; 21] = [
    B, P, M, F, D, T, N, L, G, K, H, J, Q, X, ZH, CH, SH, R, Z, C, S,
];
const MEDIAL_MAP: [Bopomofo; 3] = [I, U, IU];
const RIME_MAP: [Bopomofo; 13] = [A, O, E, EH, AI, EI, AU, OU, AN, EN, ANG, ENG, ER];
const TONE_MAP: [Bopomofo; 5] = [Tone1, Tone2, Tone3, Tone4, Tone5];

/// Extra initial-slot placeholders (indices 22..24) used by layouts that
/// repurpose the initial slot to carry an auxiliary, non-phonetic symbol.
/// Index 24 (backquote) gets a dedicated shortcut in the packed-key format.
pub const EXTRA_INITIAL_GLYPHS: [char; 3] = ['[', ']', '`'];

impl Bopomofo {
    pub const fn kind(&self) -> BopomofoKind {
        match self {
            B | P | M | F | D | T | N | L | G | K | H | J | Q | X | ZH | CH | SH | R | Z | C
            | S => BopomofoKind::Initial,
            I | U | IU => BopomofoKind::Medial,
            A | O | E | EH | AI | EI | AU | OU | AN | EN | ANG | ENG | ER => BopomofoKind::Rime,
            Tone1 | Tone2 | Tone3 | Tone4 | Tone5 => BopomofoKind::Tone,
        }
    }

    /// `index` is 1-based, matching the on-disk/packed-key slot values.
    pub fn from_initial(index: u8) -> Option<Bopomofo> {
        INITIAL_MAP.get((index as usize).checked_sub(1)?).copied()
    }
    pub fn from_medial(index: u8) -> Option<Bopomofo> {
        MEDIAL_MAP.get((index as usize).checked_sub(1)?).copied()
    }
    pub fn from_rime(index: u8) -> Option<Bopomofo> {
        RIME_MAP.get((index as usize).checked_sub(1)?).copied()
    }
    pub fn from_tone(index: u8) -> Option<Bopomofo> {
        TONE_MAP.get((index as usize).checked_sub(1)?).copied()
    }

    pub fn initial_index(&self) -> u8 {
        (INITIAL_MAP.iter().position(|b| b == self).expect("not an initial") + 1) as u8
    }
    pub fn medial_index(&self) -> u8 {
        (MEDIAL_MAP.iter().position(|b| b == self).expect("not a medial") + 1) as u8
    }
    pub fn rime_index(&self) -> u8 {
        (RIME_MAP.iter().position(|b| b == self).expect("not a final") + 1) as u8
    }
    pub fn tone_index(&self) -> u8 {
        (TONE_MAP.iter().position(|b| b == self).expect("not a tone") + 1) as u8
    }

    /// The glyph shown in the preedit string for this symbol.
    pub const fn glyph(&self) -> &'static str {
        match self {
            B => "ㄅ",
            P => "ㄆ",
            M => "ㄇ",
            F => "ㄈ",
            D => "ㄉ",
            T => "ㄊ",
            N => "ㄋ",
            L => "ㄌ",
            G => "ㄍ",
            K => "ㄎ",
            H => "ㄏ",
            J => "ㄐ",
            Q => "ㄑ",
            X => "ㄒ",
            ZH => "ㄓ",
            CH => "ㄔ",
            SH => "ㄕ",
            R => "ㄖ",
            Z => "ㄗ",
            C => "ㄘ",
            S => "ㄙ",
            I => "ㄧ",
            U => "ㄨ",
            IU => "ㄩ",
            A => "ㄚ",
            O => "ㄛ",
            E => "ㄜ",
            EH => "ㄝ",
            AI => "ㄞ",
            EI => "ㄟ",
            AU => "ㄠ",
            OU => "ㄡ",
            AN => "ㄢ",
            EN => "ㄣ",
            ANG => "ㄤ",
            ENG => "ㄥ",
            ER => "ㄦ",
            Tone1 => "",
            Tone2 => "ˊ",
            Tone3 => "ˇ",
            Tone4 => "ˋ",
            Tone5 => "˙",
        }
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum BopomofoParseError {
    #[error("unknown bopomofo symbol")]
    Unknown,
}

impl TryFrom<char> for Bopomofo {
    type Error = BopomofoParseError;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        match c {
            'ㄅ' => Ok(B),
            'ㄆ' => Ok(P),
            'ㄇ' => Ok(M),
            'ㄈ' => Ok(F),
            'ㄉ' => Ok(D),
            'ㄊ' => Ok(T),
            'ㄋ' => Ok(N),
            'ㄌ' => Ok(L),
            'ㄍ' => Ok(G),
            'ㄎ' => Ok(K),
            'ㄏ' => Ok(H),
            'ㄐ' => Ok(J),
            'ㄑ' => Ok(Q),
            'ㄒ' => Ok(X),
            'ㄓ' => Ok(ZH),
            'ㄔ' => Ok(CH),
            'ㄕ' => Ok(SH),
            'ㄖ' => Ok(R),
            'ㄗ' => Ok(Z),
            'ㄘ' => Ok(C),
            'ㄙ' => Ok(S),
            'ㄚ' => Ok(A),
            'ㄛ' => Ok(O),
            'ㄜ' => Ok(E),
            'ㄝ' => Ok(EH),
            'ㄞ' => Ok(AI),
            'ㄟ' => Ok(EI),
            'ㄠ' => Ok(AU),
            'ㄡ' => Ok(OU),
            'ㄢ' => Ok(AN),
            'ㄣ' => Ok(EN),
            'ㄤ' => Ok(ANG),
            'ㄥ' => Ok(ENG),
            'ㄦ' => Ok(ER),
            'ㄧ' => Ok(I),
            'ㄨ' => Ok(U),
            'ㄩ' => Ok(IU),
            'ˊ' => Ok(Tone2),
            'ˇ' => Ok(Tone3),
            'ˋ' => Ok(Tone4),
            '˙' => Ok(Tone5),
            _ => Err(BopomofoParseError::Unknown),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn initial_index_round_trips() {
        for (i, b) in INITIAL_MAP.iter().enumerate() {
            assert_eq!(b.initial_index(), (i + 1) as u8);
            assert_eq!(Bopomofo::from_initial((i + 1) as u8), Some(*b));
        }
    }

    #[test]
    fn tone_glyphs_match_spec_order() {
        assert_eq!(Bopomofo::from_tone(1).unwrap().glyph(), "");
        assert_eq!(Bopomofo::from_tone(2).unwrap().glyph(), "ˊ");
        assert_eq!(Bopomofo::from_tone(3).unwrap().glyph(), "ˇ");
        assert_eq!(Bopomofo::from_tone(4).unwrap().glyph(), "ˋ");
        assert_eq!(Bopomofo::from_tone(5).unwrap().glyph(), "˙");
    }

    #[test]
    fn parse_roundtrips_through_glyph() {
        for b in INITIAL_MAP.iter().chain(&MEDIAL_MAP).chain(&RIME_MAP) {
            let glyph = b.glyph();
            let c = glyph.chars().next().unwrap();
            assert_eq!(Bopomofo::try_from(c).unwrap(), *b);
        }
    }
}
