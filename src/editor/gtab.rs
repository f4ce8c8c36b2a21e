//! The generic radical/shape-based table method (Cangjie, Boshiamy,
//! Array, …): accumulate up to `max_press` keystrokes, binary-search the
//! active table for prefix and exact matches.

use crate::editor::KeyResult;
use crate::lexicon::{self, GtabItem};

/// Per-context state for the GTAB method. Holds the filename of the
/// currently selected table (if any); the table itself lives in the
/// process-wide lexicon store.
#[derive(Default)]
pub struct GtabState {
    table_filename: Option<String>,
    keys: Vec<u8>,
    candidates: Vec<GtabItem>,
    page: usize,
}

impl GtabState {
    pub fn new() -> GtabState {
        GtabState::default()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty() && self.candidates.is_empty()
    }

    pub fn current_table_filename(&self) -> Option<&str> {
        self.table_filename.as_deref()
    }

    /// Switches the active table; any in-progress key sequence is
    /// discarded.
    pub fn select_table(&mut self, filename: &str) {
        self.table_filename = Some(filename.to_string());
        self.clear();
    }

    pub fn clear(&mut self) {
        self.keys.clear();
        self.candidates.clear();
        self.page = 0;
    }

    pub fn keys_len(&self) -> usize {
        self.keys.len()
    }

    pub fn candidates(&self) -> &[GtabItem] {
        &self.candidates
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn is_valid_key(&self, ch: char) -> bool {
        match &self.table_filename {
            Some(filename) => {
                lexicon::with_gtab_table(filename, |t| t.map(|t| t.is_valid_key(ch)).unwrap_or(false))
            }
            None => false,
        }
    }

    fn refresh(&mut self) {
        self.page = 0;
        self.candidates = match &self.table_filename {
            Some(filename) => lexicon::with_gtab_table(filename, |t| {
                t.map(|t| t.prefix(&self.keys).to_vec()).unwrap_or_default()
            }),
            None => Vec::new(),
        };
    }

    /// Accepts one printable key. `Ignored` if no table is selected or the
    /// key is not in the table's keymap. `Absorbed` if the buffer is
    /// already at `max_press`.
    pub fn key(&mut self, ch: char) -> KeyResult {
        let Some(filename) = self.table_filename.clone() else {
            return KeyResult::Ignored;
        };
        let accepted = lexicon::with_gtab_table(&filename, |t| {
            let table = t?;
            Some((table.symbol_index(ch)?, table.max_press))
        });
        let Some((symbol, max_press)) = accepted else {
            return KeyResult::Ignored;
        };
        if self.keys.len() >= max_press as usize {
            return KeyResult::Absorbed;
        }
        self.keys.push(symbol);
        self.refresh();

        if self.keys.len() == max_press as usize && self.candidates.len() == 1 {
            KeyResult::Commit
        } else {
            KeyResult::Preedit
        }
    }

    pub fn take_auto_commit(&mut self) -> Option<String> {
        if self.candidates.len() == 1 {
            let text = self.candidates[0].text.clone();
            self.clear();
            Some(text)
        } else {
            None
        }
    }

    pub fn commit_candidate(&mut self, index: usize, per_page: usize) -> Option<String> {
        let absolute = self.page * per_page + index;
        let text = self.candidates.get(absolute)?.text.clone();
        self.clear();
        Some(text)
    }

    /// Commits the first candidate, as pressing space does.
    pub fn commit_first(&mut self) -> Option<String> {
        let text = self.candidates.first()?.text.clone();
        self.clear();
        Some(text)
    }

    pub fn backspace(&mut self) -> KeyResult {
        if self.keys.pop().is_none() {
            return KeyResult::Ignored;
        }
        self.refresh();
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

    /// Radical glyphs typed so far, plus numbered candidate labels for
    /// the current page.
    pub fn preedit(&self, per_page: usize) -> String {
        let radicals = match &self.table_filename {
            Some(filename) => {
                lexicon::with_gtab_table(filename, |t| t.map(|t| t.render_keys(&self.keys)).unwrap_or_default())
            }
            None => String::new(),
        };
        let mut out = radicals;
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
    fn key_without_table_is_ignored() {
        let mut state = GtabState::new();
        assert_eq!(state.key('a'), KeyResult::Ignored);
    }

    #[test]
    fn backspace_on_empty_is_ignored() {
        let mut state = GtabState::new();
        assert_eq!(state.backspace(), KeyResult::Ignored);
    }
}
