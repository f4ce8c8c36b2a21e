//! Input methods: phonetic (Bopomofo) syllable entry, the generic radical
//! table method, the hexadecimal internal-code method, and phrase
//! accumulation layered on top of the phonetic method.

pub mod gtab;
pub mod intcode;
pub mod phonetic;
pub mod tsin;

/// What a key press did, mirroring the Host API's stable `KeyResult` enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum KeyResult {
    Ignored = 0,
    Absorbed = 1,
    Commit = 2,
    Preedit = 3,
}

/// Events an embedding host may want to react to (a beep, a vibration, a
/// UI refresh hint). Mirrors the Host API's stable `FeedbackEvent` enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum FeedbackEvent {
    KeyPress = 0,
    KeyDelete = 1,
    KeyEnter = 2,
    KeySpace = 3,
    Candidate = 4,
    ModeChange = 5,
    Error = 6,
}

/// The input method a context is currently driving. Mirrors the Host
/// API's stable `Method` enum; `Anthy` and `Chewing` are reserved values
/// with no implementation behind them in this engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum MethodKind {
    Pho = 0,
    Tsin = 1,
    Gtab = 2,
    Anthy = 3,
    Chewing = 4,
    Intcode = 5,
}

impl MethodKind {
    pub fn is_supported(&self) -> bool {
        !matches!(self, MethodKind::Anthy | MethodKind::Chewing)
    }
}
