//! The internal-code method: accumulate hex digits and convert them to a
//! single character, either as a raw Unicode code point or as a legacy
//! Big5 two-byte code.

use encoding_rs::BIG5;

use crate::editor::KeyResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IntcodeMode {
    #[default]
    Unicode,
    Big5,
}

impl IntcodeMode {
    fn max_len(&self) -> usize {
        match self {
            IntcodeMode::Unicode => 6,
            IntcodeMode::Big5 => 4,
        }
    }
}

#[derive(Default)]
pub struct IntcodeState {
    mode: IntcodeMode,
    buffer: String,
}

impl IntcodeState {
    pub fn new() -> IntcodeState {
        IntcodeState::default()
    }

    pub fn mode(&self) -> IntcodeMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: IntcodeMode) {
        self.mode = mode;
        self.buffer.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
    }

    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    pub fn preedit(&self) -> String {
        if self.buffer.is_empty() {
            String::new()
        } else {
            format!("U+{}", self.buffer)
        }
    }

    fn convert(&self) -> Option<String> {
        if self.buffer.is_empty() {
            return None;
        }
        match self.mode {
            IntcodeMode::Unicode => {
                let code = u32::from_str_radix(&self.buffer, 16).ok()?;
                if code >= 0x0011_0000 {
                    return None;
                }
                char::from_u32(code).map(|c| c.to_string())
            }
            IntcodeMode::Big5 => {
                let code = u16::from_str_radix(&self.buffer, 16).ok()?;
                let (text, _, had_errors) = BIG5.decode(&code.to_be_bytes());
                if had_errors {
                    None
                } else {
                    Some(text.into_owned())
                }
            }
        }
    }

    /// Accepts one hex digit. `Absorbed` once the buffer is already full,
    /// or when the completed buffer fails to convert; otherwise `Preedit`,
    /// or `Commit` once the maximum length is reached and conversion
    /// succeeds (the caller should follow with [`IntcodeState::take_commit`]).
    pub fn key(&mut self, ch: char) -> KeyResult {
        if !ch.is_ascii_hexdigit() {
            return KeyResult::Ignored;
        }
        let max_len = self.mode.max_len();
        if self.buffer.len() >= max_len {
            return KeyResult::Absorbed;
        }
        self.buffer.push(ch.to_ascii_uppercase());
        if self.buffer.len() == max_len {
            if self.convert().is_some() {
                KeyResult::Commit
            } else {
                KeyResult::Absorbed
            }
        } else {
            KeyResult::Preedit
        }
    }

    pub fn take_commit(&mut self) -> Option<String> {
        let text = self.convert()?;
        self.buffer.clear();
        Some(text)
    }

    /// Converts and commits the current buffer, as Enter does. Leaves the
    /// buffer untouched if conversion fails, so the key can be corrected.
    pub fn enter(&mut self) -> Option<String> {
        if self.buffer.is_empty() {
            return None;
        }
        self.take_commit()
    }

    pub fn backspace(&mut self) -> KeyResult {
        if self.buffer.pop().is_none() {
            KeyResult::Ignored
        } else {
            KeyResult::Preedit
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn unicode_auto_commit_at_four_e_two_d() {
        let mut state = IntcodeState::new();
        assert_eq!(state.key('4'), KeyResult::Preedit);
        assert_eq!(state.key('E'), KeyResult::Preedit);
        assert_eq!(state.key('2'), KeyResult::Preedit);
        assert_eq!(state.key('d'), KeyResult::Commit);
        assert_eq!(state.take_commit().as_deref(), Some("中"));
    }

    #[test]
    fn non_hex_key_is_ignored() {
        let mut state = IntcodeState::new();
        assert_eq!(state.key('g'), KeyResult::Ignored);
    }

    #[test]
    fn enter_commits_partial_buffer() {
        let mut state = IntcodeState::new();
        state.key('4');
        state.key('e');
        // Enter before reaching the auto-commit length still converts
        // whatever hex digits have been typed so far.
        assert_eq!(state.enter().as_deref(), Some("N"));
    }

    #[test]
    fn backspace_shrinks_buffer() {
        let mut state = IntcodeState::new();
        state.key('4');
        state.key('e');
        assert_eq!(state.preedit(), "U+4E");
        assert_eq!(state.backspace(), KeyResult::Preedit);
        assert_eq!(state.preedit(), "U+4");
    }

    #[test]
    fn code_point_above_max_is_rejected() {
        let mut state = IntcodeState::new();
        for ch in ['1', '1', '0', '0', '0', '0'] {
            state.key(ch);
        }
        // U+110000 is out of range; the final key absorbs without commit.
        assert_eq!(state.buffer(), "110000");
    }
}
