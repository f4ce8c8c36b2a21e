//! The editing context: per-session state tying an active input method to
//! an application-facing preedit/candidate/commit session, plus the
//! dispatcher that routes key events to it.

use crate::editor::gtab::GtabState;
use crate::editor::intcode::{IntcodeMode, IntcodeState};
use crate::editor::phonetic::PhoState;
use crate::editor::tsin::TsinState;
use crate::editor::{FeedbackEvent, KeyResult, MethodKind};
use crate::keyboard::KeyboardLayout;
use crate::lexicon;
use crate::settings::{self, CandidateStyle, Charset, ColorScheme};

/// A key event as the safe core sees it: either a printable character or
/// one of the few control keys the dispatcher gives special treatment.
/// Stands in for the Host API's `(keycode, charcode, modifiers)` triple,
/// already resolved to the form the core's pre-dispatch steps care about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Escape,
    Enter,
    Backspace,
    PageUp,
    PageDown,
}

enum MethodState {
    Pho(PhoState),
    Tsin(TsinState),
    Gtab(GtabState),
    Intcode(IntcodeState),
}

impl MethodState {
    fn kind(&self) -> MethodKind {
        match self {
            MethodState::Pho(_) => MethodKind::Pho,
            MethodState::Tsin(_) => MethodKind::Tsin,
            MethodState::Gtab(_) => MethodKind::Gtab,
            MethodState::Intcode(_) => MethodKind::Intcode,
        }
    }

    fn is_empty(&self) -> bool {
        match self {
            MethodState::Pho(s) => s.is_empty(),
            MethodState::Tsin(s) => s.is_empty(),
            MethodState::Gtab(s) => s.is_empty(),
            MethodState::Intcode(s) => s.is_empty(),
        }
    }

    fn clear(&mut self) {
        match self {
            MethodState::Pho(s) => s.clear(),
            MethodState::Tsin(s) => s.clear(),
            MethodState::Gtab(s) => s.clear(),
            MethodState::Intcode(s) => s.clear(),
        }
    }

    fn candidate_count(&self) -> usize {
        match self {
            MethodState::Pho(s) => s.candidates().len(),
            MethodState::Tsin(s) => s.candidates().len(),
            MethodState::Gtab(s) => s.candidates().len(),
            MethodState::Intcode(_) => 0,
        }
    }

    fn candidate_text(&self, index: usize) -> Option<&str> {
        match self {
            MethodState::Pho(s) => s.candidates().get(index).map(|c| c.text.as_str()),
            MethodState::Tsin(s) => s.candidates().get(index).map(|c| c.text.as_str()),
            MethodState::Gtab(s) => s.candidates().get(index).map(|c| c.text.as_str()),
            MethodState::Intcode(_) => None,
        }
    }

    fn page(&self) -> usize {
        match self {
            MethodState::Pho(s) => s.page(),
            MethodState::Tsin(s) => s.page(),
            MethodState::Gtab(s) => s.page(),
            MethodState::Intcode(_) => 0,
        }
    }

    fn page_count(&self, per_page: usize) -> usize {
        match self {
            MethodState::Pho(s) => s.page_count(per_page),
            MethodState::Tsin(_) => 0,
            MethodState::Gtab(s) => s.page_count(per_page),
            MethodState::Intcode(_) => 0,
        }
    }

    fn page_up(&mut self) -> bool {
        match self {
            MethodState::Pho(s) => s.page_up(),
            MethodState::Tsin(_) => false,
            MethodState::Gtab(s) => s.page_up(),
            MethodState::Intcode(_) => false,
        }
    }

    fn page_down(&mut self, per_page: usize) -> bool {
        match self {
            MethodState::Pho(s) => s.page_down(per_page),
            MethodState::Tsin(_) => false,
            MethodState::Gtab(s) => s.page_down(per_page),
            MethodState::Intcode(_) => false,
        }
    }

    /// Selects candidate `index` (page-relative). Returns the top-level
    /// commit text, if this selection produces one — TSIN selection never
    /// does, since it appends to the phrase buffer instead.
    fn select(&mut self, index: usize, per_page: usize) -> (KeyResult, Option<String>) {
        match self {
            MethodState::Pho(s) => match s.commit_candidate(index, per_page) {
                Some(text) => (KeyResult::Commit, Some(text)),
                None => (KeyResult::Ignored, None),
            },
            MethodState::Tsin(s) => (s.select_candidate(index, per_page), None),
            MethodState::Gtab(s) => match s.commit_candidate(index, per_page) {
                Some(text) => (KeyResult::Commit, Some(text)),
                None => (KeyResult::Ignored, None),
            },
            MethodState::Intcode(_) => (KeyResult::Ignored, None),
        }
    }

    fn backspace(&mut self) -> KeyResult {
        match self {
            MethodState::Pho(s) => s.backspace(),
            MethodState::Tsin(s) => s.backspace(),
            MethodState::Gtab(s) => s.backspace(),
            MethodState::Intcode(s) => s.backspace(),
        }
    }

    fn preedit(&self, per_page: usize) -> String {
        match self {
            MethodState::Pho(s) => s.preedit(per_page),
            MethodState::Tsin(s) => s.preedit(per_page),
            MethodState::Gtab(s) => s.preedit(per_page),
            MethodState::Intcode(s) => s.preedit(),
        }
    }
}

/// Per-session engine state: the active method, keyboard layout, candidate
/// paging, selection keys, output charset, smart punctuation, and an
/// optional feedback callback. Owns all of its buffers; the lexicon and any
/// loaded GTAB tables it reads are process-wide and shared.
pub struct InputContext {
    chinese_mode: bool,
    layout: KeyboardLayout,
    method: MethodState,
    commit: Option<String>,
    candidates_per_page: u8,
    selection_keys: String,
    charset: Charset,
    candidate_style: CandidateStyle,
    color_scheme: ColorScheme,
    system_dark_mode: bool,
    smart_punctuation: bool,
    pinyin_annotation: bool,
    quote_open_double: bool,
    quote_open_single: bool,
    sound_enabled: bool,
    vibration_enabled: bool,
    vibration_duration_ms: u32,
    feedback: Option<Box<dyn FnMut(FeedbackEvent)>>,
}

impl Default for InputContext {
    fn default() -> InputContext {
        InputContext {
            chinese_mode: true,
            layout: KeyboardLayout::Standard,
            method: MethodState::Pho(PhoState::new()),
            commit: None,
            candidates_per_page: 10,
            selection_keys: settings::DEFAULT_SELECTION_KEYS.to_string(),
            charset: Charset::Traditional,
            candidate_style: CandidateStyle::Horizontal,
            color_scheme: ColorScheme::System,
            system_dark_mode: false,
            smart_punctuation: false,
            pinyin_annotation: false,
            quote_open_double: true,
            quote_open_single: true,
            sound_enabled: false,
            vibration_enabled: false,
            vibration_duration_ms: 50,
            feedback: None,
        }
    }
}

impl InputContext {
    pub fn new() -> InputContext {
        InputContext::default()
    }

    /// Resets every buffer and mode-independent setting to its default,
    /// keeping the context handle itself alive.
    pub fn reset(&mut self) {
        *self = InputContext::default();
    }

    pub fn set_feedback(&mut self, callback: impl FnMut(FeedbackEvent) + 'static) {
        self.feedback = Some(Box::new(callback));
    }

    pub fn clear_feedback(&mut self) {
        self.feedback = None;
    }

    fn emit(&mut self, event: FeedbackEvent) {
        if let Some(callback) = &mut self.feedback {
            callback(event);
        }
    }

    // -- Mode -------------------------------------------------------------

    pub fn is_chinese_mode(&self) -> bool {
        self.chinese_mode
    }

    pub fn set_chinese_mode(&mut self, enabled: bool) {
        self.chinese_mode = enabled;
        self.emit(FeedbackEvent::ModeChange);
    }

    pub fn toggle_chinese_mode(&mut self) -> bool {
        self.set_chinese_mode(!self.chinese_mode);
        self.chinese_mode
    }

    pub fn method_kind(&self) -> MethodKind {
        self.method.kind()
    }

    pub fn set_method(&mut self, kind: MethodKind) {
        if !kind.is_supported() {
            return;
        }
        self.method = match kind {
            MethodKind::Pho => MethodState::Pho(PhoState::new()),
            MethodKind::Tsin => MethodState::Tsin(TsinState::new()),
            MethodKind::Gtab => MethodState::Gtab(GtabState::new()),
            MethodKind::Intcode => MethodState::Intcode(IntcodeState::new()),
            MethodKind::Anthy | MethodKind::Chewing => return,
        };
        self.emit(FeedbackEvent::ModeChange);
    }

    /// A short label for the currently active method: `"en"` when not in
    /// Chinese mode, or the method's own glyph — the first character of the
    /// loaded GTAB table's Chinese name for GTAB.
    pub fn method_label(&self) -> String {
        if !self.chinese_mode {
            return "en".to_string();
        }
        match &self.method {
            MethodState::Pho(_) => "注".to_string(),
            MethodState::Tsin(_) => "詞".to_string(),
            MethodState::Intcode(_) => "碼".to_string(),
            MethodState::Gtab(s) => s
                .current_table_filename()
                .and_then(|filename| {
                    lexicon::with_gtab_table(filename, |t| t.and_then(|t| t.cname.chars().next()))
                })
                .map(|c| c.to_string())
                .unwrap_or_default(),
        }
    }

    // -- Layout -------------------------------------------------------------

    pub fn keyboard_layout(&self) -> KeyboardLayout {
        self.layout
    }

    pub fn set_keyboard_layout(&mut self, layout: KeyboardLayout) {
        self.layout = layout;
    }

    pub fn set_keyboard_layout_by_name(&mut self, name: &str) -> bool {
        match KeyboardLayout::from_name(name) {
            Some(layout) => {
                self.layout = layout;
                true
            }
            None => false,
        }
    }

    // -- GTAB -----------------------------------------------------------

    pub fn gtab_load_table(&mut self, filename: &str) -> bool {
        lexicon::load_table(filename).is_ok() && self.gtab_select_table(filename)
    }

    pub fn gtab_load_table_by_id(&mut self, id: u32) -> bool {
        lexicon::load_table_by_id(id).is_ok()
            && lexicon::find_by_id(id).is_some_and(|entry| self.gtab_select_table(entry.filename))
    }

    fn gtab_select_table(&mut self, filename: &str) -> bool {
        if let MethodState::Gtab(state) = &mut self.method {
            state.select_table(filename);
            true
        } else {
            false
        }
    }

    pub fn gtab_current_table(&self) -> Option<&str> {
        match &self.method {
            MethodState::Gtab(s) => s.current_table_filename(),
            _ => None,
        }
    }

    pub fn gtab_is_valid_key(&self, ch: char) -> bool {
        match &self.method {
            MethodState::Gtab(s) => s.is_valid_key(ch),
            _ => false,
        }
    }

    // -- Intcode ----------------------------------------------------------

    pub fn intcode_set_mode(&mut self, mode: IntcodeMode) {
        if let MethodState::Intcode(state) = &mut self.method {
            state.set_mode(mode);
        }
    }

    pub fn intcode_mode(&self) -> Option<IntcodeMode> {
        match &self.method {
            MethodState::Intcode(s) => Some(s.mode()),
            _ => None,
        }
    }

    pub fn intcode_buffer(&self) -> Option<&str> {
        match &self.method {
            MethodState::Intcode(s) => Some(s.buffer()),
            _ => None,
        }
    }

    // -- TSIN ---------------------------------------------------------------

    pub fn tsin_phrase(&self) -> Option<&str> {
        match &self.method {
            MethodState::Tsin(s) => Some(s.phrase()),
            _ => None,
        }
    }

    /// Commits the TSIN phrase buffer directly, as if Enter had been
    /// pressed, without going through [`InputContext::process_key`].
    pub fn tsin_commit_phrase(&mut self) -> Option<String> {
        match &mut self.method {
            MethodState::Tsin(s) => s.enter(),
            _ => None,
        }
    }

    // -- Candidates -----------------------------------------------------

    pub fn has_candidates(&self) -> bool {
        self.method.candidate_count() > 0
    }

    pub fn candidate_count(&self) -> usize {
        self.method.candidate_count()
    }

    /// The candidate text at absolute index `i` (not page-relative), or
    /// `None` if out of range.
    pub fn candidate(&self, i: usize) -> Option<&str> {
        self.method.candidate_text(i)
    }

    pub fn candidate_page(&self) -> usize {
        self.method.page()
    }

    pub fn candidates_per_page(&self) -> u8 {
        self.candidates_per_page
    }

    pub fn set_candidates_per_page(&mut self, n: u8) {
        self.candidates_per_page = settings::clamp_candidates_per_page(n);
    }

    /// Selects candidate `index` on the current page and returns the key
    /// result, committing if the active method treats selection as final.
    pub fn select_candidate(&mut self, index: usize) -> KeyResult {
        let per_page = self.candidates_per_page as usize;
        let (result, text) = self.method.select(index, per_page);
        if let Some(text) = text {
            self.commit = Some(text);
            self.emit(FeedbackEvent::Candidate);
        }
        result
    }

    pub fn page_up(&mut self) -> bool {
        self.method.page_up()
    }

    pub fn page_down(&mut self) -> bool {
        let per_page = self.candidates_per_page as usize;
        self.method.page_down(per_page)
    }

    // -- Settings ---------------------------------------------------------

    pub fn selection_keys(&self) -> &str {
        &self.selection_keys
    }

    pub fn set_selection_keys(&mut self, keys: &str) {
        if !keys.is_empty() {
            self.selection_keys = keys.to_string();
        }
    }

    pub fn charset(&self) -> Charset {
        self.charset
    }

    pub fn set_charset(&mut self, charset: Charset) {
        self.charset = charset;
    }

    pub fn candidate_style(&self) -> CandidateStyle {
        self.candidate_style
    }

    pub fn set_candidate_style(&mut self, style: CandidateStyle) {
        self.candidate_style = style;
    }

    pub fn color_scheme(&self) -> ColorScheme {
        self.color_scheme
    }

    pub fn set_color_scheme(&mut self, scheme: ColorScheme) {
        self.color_scheme = scheme;
    }

    pub fn system_dark_mode(&self) -> bool {
        self.system_dark_mode
    }

    pub fn set_system_dark_mode(&mut self, enabled: bool) {
        self.system_dark_mode = enabled;
    }

    pub fn pinyin_annotation(&self) -> bool {
        self.pinyin_annotation
    }

    pub fn set_pinyin_annotation(&mut self, enabled: bool) {
        self.pinyin_annotation = enabled;
    }

    pub fn sound_enabled(&self) -> bool {
        self.sound_enabled
    }

    pub fn set_sound_enabled(&mut self, enabled: bool) {
        self.sound_enabled = enabled;
    }

    pub fn vibration_enabled(&self) -> bool {
        self.vibration_enabled
    }

    pub fn set_vibration_enabled(&mut self, enabled: bool) {
        self.vibration_enabled = enabled;
    }

    pub fn vibration_duration_ms(&self) -> u32 {
        self.vibration_duration_ms
    }

    pub fn set_vibration_duration_ms(&mut self, ms: u32) {
        self.vibration_duration_ms = settings::clamp_vibration_ms(ms);
    }

    // -- Smart punctuation ------------------------------------------------

    pub fn smart_punctuation(&self) -> bool {
        self.smart_punctuation
    }

    pub fn set_smart_punctuation(&mut self, enabled: bool) {
        self.smart_punctuation = enabled;
    }

    pub fn reset_punctuation_state(&mut self) {
        self.quote_open_double = true;
        self.quote_open_single = true;
    }

    /// Converts an ASCII punctuation character to its Chinese equivalent,
    /// or `None` if smart punctuation is off or the character has no
    /// mapping. Quote characters alternate between opening and closing
    /// forms, tracked by `quote_open_double`/`quote_open_single`.
    pub fn convert_punctuation(&mut self, ch: char) -> Option<char> {
        if !self.smart_punctuation {
            return None;
        }
        match ch {
            '"' => {
                let opening = self.quote_open_double;
                self.quote_open_double = !self.quote_open_double;
                Some(if opening { '「' } else { '」' })
            }
            '\'' => {
                let opening = self.quote_open_single;
                self.quote_open_single = !self.quote_open_single;
                Some(if opening { '『' } else { '』' })
            }
            ',' => Some('，'),
            '.' => Some('。'),
            '!' => Some('!'),
            '?' => Some('?'),
            ':' => Some(':'),
            ';' => Some(';'),
            '(' => Some('('),
            ')' => Some(')'),
            _ => None,
        }
    }

    // -- Output -------------------------------------------------------------

    pub fn preedit(&self) -> String {
        self.method.preedit(self.candidates_per_page as usize)
    }

    pub fn commit(&self) -> Option<&str> {
        self.commit.as_deref()
    }

    pub fn clear_commit(&mut self) {
        self.commit = None;
    }

    // -- Key dispatch -------------------------------------------------------

    /// Drives one key event through the universal pre-dispatch steps, then
    /// the active method.
    pub fn process_key(&mut self, key: Key) -> KeyResult {
        if !self.chinese_mode {
            return KeyResult::Ignored;
        }

        if let Key::Char(ch) = key {
            if self.method.candidate_count() > 0 {
                if let Some(position) = self.selection_keys.find(ch) {
                    let per_page = self.candidates_per_page as usize;
                    let index = self.method.page() * per_page + position;
                    return self.select_candidate_absolute(index);
                }
            }
        }

        match key {
            Key::Escape => {
                if self.method.is_empty() {
                    KeyResult::Ignored
                } else {
                    self.method.clear();
                    self.emit(FeedbackEvent::KeyDelete);
                    KeyResult::Absorbed
                }
            }
            Key::Enter => {
                self.emit(FeedbackEvent::KeyEnter);
                match &mut self.method {
                    MethodState::Tsin(s) => match s.enter() {
                        Some(text) => {
                            self.commit = Some(text);
                            KeyResult::Commit
                        }
                        None => KeyResult::Ignored,
                    },
                    MethodState::Intcode(s) => match s.enter() {
                        Some(text) => {
                            self.commit = Some(text);
                            KeyResult::Commit
                        }
                        None => KeyResult::Ignored,
                    },
                    _ => KeyResult::Ignored,
                }
            }
            Key::Backspace => {
                self.emit(FeedbackEvent::KeyDelete);
                self.method.backspace()
            }
            Key::PageUp => {
                if self.method.page_up() {
                    KeyResult::Preedit
                } else {
                    KeyResult::Ignored
                }
            }
            Key::PageDown => {
                let per_page = self.candidates_per_page as usize;
                if self.method.page_down(per_page) {
                    KeyResult::Preedit
                } else {
                    KeyResult::Ignored
                }
            }
            Key::Char(ch) => self.dispatch_char(ch),
        }
    }

    fn select_candidate_absolute(&mut self, index: usize) -> KeyResult {
        let per_page = self.candidates_per_page as usize;
        let page = self.method.page();
        let relative = index.checked_sub(page * per_page);
        match relative {
            Some(relative) if relative < per_page => {
                let (result, text) = self.method.select(relative, per_page);
                if let Some(text) = text {
                    self.commit = Some(text);
                    self.emit(FeedbackEvent::Candidate);
                }
                result
            }
            _ => KeyResult::Ignored,
        }
    }

    fn dispatch_char(&mut self, ch: char) -> KeyResult {
        self.emit(FeedbackEvent::KeyPress);
        if ch == ' ' {
            self.emit(FeedbackEvent::KeySpace);
        }
        match &mut self.method {
            MethodState::Pho(s) => {
                let outcome = s.key(ch, self.layout);
                if outcome.invalid {
                    self.emit(FeedbackEvent::Error);
                }
                if outcome.result == KeyResult::Commit {
                    if let Some(text) = s.take_auto_commit() {
                        self.commit = Some(text);
                    }
                }
                outcome.result
            }
            MethodState::Tsin(s) => {
                let outcome = s.key(ch, self.layout);
                if outcome.invalid {
                    self.emit(FeedbackEvent::Error);
                }
                outcome.result
            }
            MethodState::Gtab(s) => {
                if ch == ' ' {
                    match s.commit_first() {
                        Some(text) => {
                            self.commit = Some(text);
                            KeyResult::Commit
                        }
                        None => KeyResult::Absorbed,
                    }
                } else {
                    let result = s.key(ch);
                    if result == KeyResult::Commit {
                        if let Some(text) = s.take_auto_commit() {
                            self.commit = Some(text);
                        }
                    }
                    result
                }
            }
            MethodState::Intcode(s) => {
                let result = s.key(ch);
                if result == KeyResult::Commit {
                    if let Some(text) = s.take_commit() {
                        self.commit = Some(text);
                    }
                }
                result
            }
        }
    }
}

/// Fuzzy-searches built-in methods and registered GTAB tables by name.
pub fn search(query: &str) -> Vec<settings::SearchHit> {
    settings::search(query)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn mode_passthrough_ignores_every_key() {
        let mut ctx = InputContext::new();
        ctx.set_chinese_mode(false);
        assert_eq!(ctx.process_key(Key::Char('a')), KeyResult::Ignored);
        assert_eq!(ctx.process_key(Key::Enter), KeyResult::Ignored);
        assert!(ctx.preedit().is_empty());
    }

    #[test]
    fn escape_clears_partial_syllable() {
        let mut ctx = InputContext::new();
        ctx.process_key(Key::Char('a'));
        assert!(!ctx.preedit().is_empty());
        assert_eq!(ctx.process_key(Key::Escape), KeyResult::Absorbed);
        assert!(ctx.preedit().is_empty());
        assert_eq!(ctx.process_key(Key::Escape), KeyResult::Ignored);
    }

    #[test]
    fn intcode_enter_commits_and_clears() {
        let mut ctx = InputContext::new();
        ctx.set_method(MethodKind::Intcode);
        ctx.process_key(Key::Char('4'));
        ctx.process_key(Key::Char('e'));
        assert_eq!(ctx.process_key(Key::Enter), KeyResult::Commit);
        assert_eq!(ctx.commit(), Some("N"));
    }

    #[test]
    fn tsin_enter_on_empty_phrase_is_ignored() {
        let mut ctx = InputContext::new();
        ctx.set_method(MethodKind::Tsin);
        assert_eq!(ctx.process_key(Key::Enter), KeyResult::Ignored);
    }

    #[test]
    fn method_label_reflects_mode_and_method() {
        let mut ctx = InputContext::new();
        assert_eq!(ctx.method_label(), "注");
        ctx.set_method(MethodKind::Tsin);
        assert_eq!(ctx.method_label(), "詞");
        ctx.set_chinese_mode(false);
        assert_eq!(ctx.method_label(), "en");
    }

    #[test]
    fn smart_quote_pairing_alternates() {
        let mut ctx = InputContext::new();
        ctx.set_smart_punctuation(true);
        assert_eq!(ctx.convert_punctuation('"'), Some('「'));
        assert_eq!(ctx.convert_punctuation('"'), Some('」'));
        assert_eq!(ctx.convert_punctuation('"'), Some('「'));
        assert_eq!(ctx.convert_punctuation('"'), Some('」'));
    }

    #[test]
    fn candidates_per_page_is_clamped() {
        let mut ctx = InputContext::new();
        ctx.set_candidates_per_page(0);
        assert_eq!(ctx.candidates_per_page(), 1);
        ctx.set_candidates_per_page(200);
        assert_eq!(ctx.candidates_per_page(), 10);
    }

    #[test]
    fn independent_contexts_do_not_share_state() {
        let mut a = InputContext::new();
        let b = InputContext::new();
        a.process_key(Key::Char('a'));
        assert!(!a.preedit().is_empty());
        assert!(b.preedit().is_empty());
    }
}
