//! The phonetic (PHO) method: one Bopomofo syllable at a time, resolved
//! against the loaded phonetic lexicon.

use crate::editor::KeyResult;
use crate::keyboard::KeyboardLayout;
use crate::lexicon::{self, PhoItem};
use crate::zhuyin::Syllable;

/// Outcome of a key press, with the extra detail the dispatcher needs to
/// decide whether to fire an `Error` feedback event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhoOutcome {
    pub result: KeyResult,
    /// Space completed a syllable that has no lexicon entry at all.
    pub invalid: bool,
}

/// Per-context state for the phonetic method.
#[derive(Default)]
pub struct PhoState {
    syllable: Syllable,
    candidates: Vec<PhoItem>,
    page: usize,
}

impl PhoState {
    pub fn new() -> PhoState {
        PhoState::default()
    }

    pub fn is_empty(&self) -> bool {
        self.syllable.is_empty() && self.candidates.is_empty()
    }

    pub fn clear(&mut self) {
        self.syllable.clear();
        self.candidates.clear();
        self.page = 0;
    }

    pub fn candidates(&self) -> &[PhoItem] {
        &self.candidates
    }

    pub fn page(&self) -> usize {
        self.page
    }

    /// Handles one printable key under `layout`. Letters are matched
    /// lowercased; unmatched non-space keys are left for another method
    /// (or the dispatcher) to deal with.
    pub fn key(&mut self, ch: char, layout: KeyboardLayout) -> PhoOutcome {
        let is_space = ch == ' ';
        let lowered = ch.to_ascii_lowercase();
        let matched = layout.lookup(lowered);

        if let Some((kind, index)) = matched {
            self.syllable.set_slot(kind, index);
        } else if !is_space {
            return PhoOutcome {
                result: KeyResult::Ignored,
                invalid: false,
            };
        }

        let complete = self.syllable.has_tone() || is_space;
        if !complete {
            self.candidates.clear();
            self.page = 0;
            return PhoOutcome {
                result: KeyResult::Preedit,
                invalid: false,
            };
        }

        let key = self.syllable.pack();
        self.candidates =
            lexicon::with_pho_lexicon(|lex| lex.map(|l| l.lookup(key).to_vec()).unwrap_or_default());
        self.page = 0;

        if self.candidates.len() == 1 {
            PhoOutcome {
                result: KeyResult::Commit,
                invalid: false,
            }
        } else if self.candidates.is_empty() {
            PhoOutcome {
                result: KeyResult::Preedit,
                invalid: true,
            }
        } else {
            PhoOutcome {
                result: KeyResult::Preedit,
                invalid: false,
            }
        }
    }

    /// Clears the single auto-committed candidate and returns its text.
    pub fn take_auto_commit(&mut self) -> Option<String> {
        if self.candidates.len() == 1 {
            let text = self.candidates[0].text.clone();
            self.clear();
            Some(text)
        } else {
            None
        }
    }

    /// Commits the candidate at page-relative `index` (0-based) and
    /// clears the syllable.
    pub fn commit_candidate(&mut self, index: usize, per_page: usize) -> Option<String> {
        let absolute = self.page * per_page + index;
        let text = self.candidates.get(absolute)?.text.clone();
        self.clear();
        Some(text)
    }

    /// Clears the highest-index non-empty slot. `Ignored` if already
    /// empty.
    pub fn backspace(&mut self) -> KeyResult {
        if self.syllable.pop().is_none() {
            return KeyResult::Ignored;
        }
        self.candidates.clear();
        self.page = 0;
        KeyResult::Preedit
    }

    pub fn page_count(&self, per_page: usize) -> usize {
        if self.candidates.is_empty() || per_page == 0 {
            0
        } else {
            (self.candidates.len() + per_page - 1) / per_page
        }
    }

    pub fn page_up(&mut self) -> bool {
        if self.page == 0 {
            false
        } else {
            self.page -= 1;
            true
        }
    }

    pub fn page_down(&mut self, per_page: usize) -> bool {
        if self.page + 1 >= self.page_count(per_page) {
            false
        } else {
            self.page += 1;
            true
        }
    }

    /// Bopomofo glyphs for the current syllable, plus numbered candidate
    /// labels for the current page when candidates are present.
    pub fn preedit(&self, per_page: usize) -> String {
        let mut out = self.syllable.render();
        if self.candidates.is_empty() || per_page == 0 {
            return out;
        }
        out.push(' ');
        let start = self.page * per_page;
        let end = (start + per_page).min(self.candidates.len());
        for (i, item) in self.candidates[start..end].iter().enumerate() {
            if i > 0 {
                out.push(' ');
            }
            out.push_str(&(i + 1).to_string());
            out.push('.');
            out.push_str(&item.text);
        }
        if end < self.candidates.len() {
            out.push('▶');
        }
        out
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn incomplete_syllable_has_no_candidates() {
        let mut state = PhoState::new();
        let outcome = state.key('a', KeyboardLayout::Standard);
        assert_eq!(outcome.result, KeyResult::Preedit);
        assert!(state.candidates().is_empty());
        assert_eq!(state.preedit(10), "ㄇ");
    }

    #[test]
    fn unmatched_key_is_ignored() {
        let mut state = PhoState::new();
        let outcome = state.key('!', KeyboardLayout::Standard);
        assert_eq!(outcome.result, KeyResult::Ignored);
    }

    #[test]
    fn backspace_on_empty_is_ignored() {
        let mut state = PhoState::new();
        assert_eq!(state.backspace(), KeyResult::Ignored);
    }

    #[test]
    fn backspace_shrinks_syllable() {
        let mut state = PhoState::new();
        state.key('a', KeyboardLayout::Standard);
        state.key('8', KeyboardLayout::Standard);
        assert_eq!(state.preedit(10), "ㄇㄚ");
        assert_eq!(state.backspace(), KeyResult::Preedit);
        assert_eq!(state.preedit(10), "ㄇ");
    }

    #[test]
    fn space_with_empty_lexicon_is_invalid() {
        let mut state = PhoState::new();
        state.key('a', KeyboardLayout::Standard);
        let outcome = state.key(' ', KeyboardLayout::Standard);
        assert_eq!(outcome.result, KeyResult::Preedit);
        assert!(outcome.invalid);
        // The syllable remains on-screen after an invalid completion.
        assert!(!state.is_empty());
    }
}
