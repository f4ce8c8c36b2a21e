//! C ABI surface for the HIME input-method engine core: an opaque context
//! handle, `process_key` driving the four-way key result, and getters for
//! preedit/commit/candidates. Every function tolerates a null context
//! pointer, returning the documented sentinel with no side effects —
//! `Result` is collapsed to these stable integers only at this boundary;
//! the safe core underneath never does.

use std::ffi::{c_char, CStr};
use std::os::raw::c_void;
use std::path::Path;
use std::ptr;

use hime::context::{InputContext, Key};
use hime::editor::intcode::IntcodeMode;
use hime::editor::{FeedbackEvent, KeyResult, MethodKind};
use hime::keyboard::KeyboardLayout;
use hime::lexicon;
use hime::settings::{CandidateStyle, Charset, ColorScheme};

/// Bitset passed alongside a key event: `Shift=1, Control=2, Alt=4,
/// CapsLock=8`. Unused by the core today; carried through for hosts that
/// want to inspect it later without an ABI break.
pub const HIME_MOD_SHIFT: u32 = 1;
pub const HIME_MOD_CONTROL: u32 = 2;
pub const HIME_MOD_ALT: u32 = 4;
pub const HIME_MOD_CAPSLOCK: u32 = 8;

fn key_result_code(result: KeyResult) -> i32 {
    result as i32
}

/// Copies as much of `s` as fits into `buf` (capacity `buf_len` bytes, not
/// NUL-terminated) and returns the number of bytes written, or `-1` if
/// `buf` is null.
fn write_str(s: &str, buf: *mut u8, buf_len: usize) -> isize {
    if buf.is_null() {
        return -1;
    }
    let bytes = s.as_bytes();
    let n = bytes.len().min(buf_len);
    unsafe {
        ptr::copy_nonoverlapping(bytes.as_ptr(), buf, n);
    }
    n as isize
}

unsafe fn c_str_to_rust<'a>(s: *const c_char) -> Option<&'a str> {
    if s.is_null() {
        return None;
    }
    CStr::from_ptr(s).to_str().ok()
}

// -- Lifecycle ------------------------------------------------------------

#[no_mangle]
pub extern "C" fn hime_version() -> *const c_char {
    static VERSION: &str = concat!(env!("CARGO_PKG_VERSION"), "\0");
    VERSION.as_ptr() as *const c_char
}

/// Loads the phonetic lexicon from `data_dir` (or the platform default
/// directory when null). Returns `0` on success, `-1` on failure.
#[no_mangle]
pub unsafe extern "C" fn hime_init(data_dir: *const c_char) -> i32 {
    let path = c_str_to_rust(data_dir);
    let result = lexicon::init(path.map(Path::new));
    if result.is_ok() {
        0
    } else {
        -1
    }
}

#[no_mangle]
pub extern "C" fn hime_cleanup() {
    lexicon::cleanup();
}

#[no_mangle]
pub extern "C" fn hime_context_new() -> *mut InputContext {
    Box::into_raw(Box::new(InputContext::new()))
}

/// Frees a context created by [`hime_context_new`]. A null pointer is a
/// no-op.
#[no_mangle]
pub unsafe extern "C" fn hime_context_free(ctx: *mut InputContext) {
    if !ctx.is_null() {
        drop(Box::from_raw(ctx));
    }
}

#[no_mangle]
pub unsafe extern "C" fn hime_context_reset(ctx: *mut InputContext) {
    if let Some(ctx) = ctx.as_mut() {
        ctx.reset();
    }
}

// -- Mode -------------------------------------------------------------------

#[no_mangle]
pub unsafe extern "C" fn hime_set_chinese_mode(ctx: *mut InputContext, enabled: i32) {
    if let Some(ctx) = ctx.as_mut() {
        ctx.set_chinese_mode(enabled != 0);
    }
}

#[no_mangle]
pub unsafe extern "C" fn hime_is_chinese_mode(ctx: *const InputContext) -> i32 {
    match ctx.as_ref() {
        Some(ctx) => ctx.is_chinese_mode() as i32,
        None => -1,
    }
}

#[no_mangle]
pub unsafe extern "C" fn hime_toggle_chinese_mode(ctx: *mut InputContext) -> i32 {
    match ctx.as_mut() {
        Some(ctx) => ctx.toggle_chinese_mode() as i32,
        None => -1,
    }
}

/// Sets the active method. `method` must be one of the `Method` enum
/// values (§6); `ANTHY`/`CHEWING` are rejected since nothing implements
/// them in this engine. Unrecognized or unsupported values are a no-op.
#[no_mangle]
pub unsafe extern "C" fn hime_set_input_method(ctx: *mut InputContext, method: i32) {
    let Some(ctx) = ctx.as_mut() else { return };
    let kind = match method {
        0 => MethodKind::Pho,
        1 => MethodKind::Tsin,
        2 => MethodKind::Gtab,
        5 => MethodKind::Intcode,
        _ => return,
    };
    ctx.set_method(kind);
}

#[no_mangle]
pub unsafe extern "C" fn hime_get_input_method(ctx: *const InputContext) -> i32 {
    match ctx.as_ref() {
        Some(ctx) => ctx.method_kind() as i32,
        None => -1,
    }
}

/// Writes the current method's short display label (e.g. `"en"`, `"注"`,
/// the first glyph of a loaded GTAB table's name) into `buf`.
#[no_mangle]
pub unsafe extern "C" fn hime_get_method_label(
    ctx: *const InputContext,
    buf: *mut u8,
    buf_len: usize,
) -> isize {
    match ctx.as_ref() {
        Some(ctx) => write_str(&ctx.method_label(), buf, buf_len),
        None => -1,
    }
}

// -- Keys ---------------------------------------------------------------

const VK_ESCAPE: i32 = 1;
const VK_ENTER: i32 = 2;
const VK_BACKSPACE: i32 = 3;
const VK_PAGE_UP: i32 = 4;
const VK_PAGE_DOWN: i32 = 5;

/// Drives one key event. `keycode` selects a control key (see the `VK_*`
/// constants) or `0` for an ordinary character, in which case `charcode`
/// (a Unicode scalar value) is what gets dispatched. `modifiers_mask` is
/// reserved (see `HIME_MOD_*`) and currently has no effect on dispatch.
#[no_mangle]
pub unsafe extern "C" fn hime_process_key(
    ctx: *mut InputContext,
    keycode: i32,
    charcode: u32,
    _modifiers_mask: u32,
) -> i32 {
    let Some(ctx) = ctx.as_mut() else {
        return key_result_code(KeyResult::Ignored);
    };
    let key = match keycode {
        VK_ESCAPE => Key::Escape,
        VK_ENTER => Key::Enter,
        VK_BACKSPACE => Key::Backspace,
        VK_PAGE_UP => Key::PageUp,
        VK_PAGE_DOWN => Key::PageDown,
        _ => match char::from_u32(charcode) {
            Some(ch) => Key::Char(ch),
            None => return key_result_code(KeyResult::Ignored),
        },
    };
    key_result_code(ctx.process_key(key))
}

// -- Output ---------------------------------------------------------------

#[no_mangle]
pub unsafe extern "C" fn hime_get_preedit(
    ctx: *const InputContext,
    buf: *mut u8,
    buf_len: usize,
) -> isize {
    match ctx.as_ref() {
        Some(ctx) => write_str(&ctx.preedit(), buf, buf_len),
        None => -1,
    }
}

#[no_mangle]
pub unsafe extern "C" fn hime_get_preedit_cursor(ctx: *const InputContext) -> isize {
    match ctx.as_ref() {
        Some(ctx) => ctx.preedit().chars().count() as isize,
        None => -1,
    }
}

#[no_mangle]
pub unsafe extern "C" fn hime_get_commit(
    ctx: *const InputContext,
    buf: *mut u8,
    buf_len: usize,
) -> isize {
    match ctx.as_ref() {
        Some(ctx) => match ctx.commit() {
            Some(text) => write_str(text, buf, buf_len),
            None => 0,
        },
        None => -1,
    }
}

#[no_mangle]
pub unsafe extern "C" fn hime_clear_commit(ctx: *mut InputContext) {
    if let Some(ctx) = ctx.as_mut() {
        ctx.clear_commit();
    }
}

// -- Candidates -----------------------------------------------------------

#[no_mangle]
pub unsafe extern "C" fn hime_has_candidates(ctx: *const InputContext) -> i32 {
    match ctx.as_ref() {
        Some(ctx) => ctx.has_candidates() as i32,
        None => 0,
    }
}

#[no_mangle]
pub unsafe extern "C" fn hime_get_candidate_count(ctx: *const InputContext) -> isize {
    match ctx.as_ref() {
        Some(ctx) => ctx.candidate_count() as isize,
        None => -1,
    }
}

#[no_mangle]
pub unsafe extern "C" fn hime_get_candidate(
    ctx: *const InputContext,
    index: usize,
    buf: *mut u8,
    buf_len: usize,
) -> isize {
    match ctx.as_ref().and_then(|ctx| ctx.candidate(index)) {
        Some(text) => write_str(text, buf, buf_len),
        None => -1,
    }
}

#[no_mangle]
pub unsafe extern "C" fn hime_get_candidate_page(ctx: *const InputContext) -> isize {
    match ctx.as_ref() {
        Some(ctx) => ctx.candidate_page() as isize,
        None => -1,
    }
}

#[no_mangle]
pub unsafe extern "C" fn hime_get_candidates_per_page(ctx: *const InputContext) -> isize {
    match ctx.as_ref() {
        Some(ctx) => ctx.candidates_per_page() as isize,
        None => -1,
    }
}

#[no_mangle]
pub unsafe extern "C" fn hime_set_candidates_per_page(ctx: *mut InputContext, n: u8) {
    if let Some(ctx) = ctx.as_mut() {
        ctx.set_candidates_per_page(n);
    }
}

#[no_mangle]
pub unsafe extern "C" fn hime_select_candidate(ctx: *mut InputContext, index: usize) -> i32 {
    match ctx.as_mut() {
        Some(ctx) => key_result_code(ctx.select_candidate(index)),
        None => key_result_code(KeyResult::Ignored),
    }
}

#[no_mangle]
pub unsafe extern "C" fn hime_page_up(ctx: *mut InputContext) -> i32 {
    match ctx.as_mut() {
        Some(ctx) => ctx.page_up() as i32,
        None => 0,
    }
}

#[no_mangle]
pub unsafe extern "C" fn hime_page_down(ctx: *mut InputContext) -> i32 {
    match ctx.as_mut() {
        Some(ctx) => ctx.page_down() as i32,
        None => 0,
    }
}

// -- Layout ---------------------------------------------------------------

fn layout_from_code(code: i32) -> Option<KeyboardLayout> {
    Some(match code {
        0 => KeyboardLayout::Standard,
        1 => KeyboardLayout::Hsu,
        2 => KeyboardLayout::ETen,
        3 => KeyboardLayout::ETen26,
        4 => KeyboardLayout::Ibm,
        5 => KeyboardLayout::Pinyin,
        6 => KeyboardLayout::Dvorak,
        _ => return None,
    })
}

#[no_mangle]
pub unsafe extern "C" fn hime_set_keyboard_layout(ctx: *mut InputContext, layout: i32) {
    let Some(ctx) = ctx.as_mut() else { return };
    if let Some(layout) = layout_from_code(layout) {
        ctx.set_keyboard_layout(layout);
    }
}

#[no_mangle]
pub unsafe extern "C" fn hime_get_keyboard_layout(ctx: *const InputContext) -> i32 {
    match ctx.as_ref() {
        Some(ctx) => ctx.keyboard_layout() as i32,
        None => -1,
    }
}

#[no_mangle]
pub unsafe extern "C" fn hime_set_keyboard_layout_by_name(
    ctx: *mut InputContext,
    name: *const c_char,
) -> i32 {
    let Some(ctx) = ctx.as_mut() else { return 0 };
    match c_str_to_rust(name) {
        Some(name) => ctx.set_keyboard_layout_by_name(name) as i32,
        None => 0,
    }
}

#[no_mangle]
pub unsafe extern "C" fn hime_set_selection_keys(ctx: *mut InputContext, keys: *const c_char) {
    let Some(ctx) = ctx.as_mut() else { return };
    if let Some(keys) = c_str_to_rust(keys) {
        ctx.set_selection_keys(keys);
    }
}

// -- GTAB -----------------------------------------------------------------

#[no_mangle]
pub extern "C" fn hime_gtab_get_table_count() -> usize {
    lexicon::BUILTIN_GTAB_TABLES.len()
}

/// Writes the `i`-th built-in table's Chinese name into `buf`. Returns
/// `-1` if `i` is out of range.
#[no_mangle]
pub unsafe extern "C" fn hime_gtab_get_table_info(i: usize, buf: *mut u8, buf_len: usize) -> isize {
    match lexicon::BUILTIN_GTAB_TABLES.get(i) {
        Some(entry) => write_str(entry.name, buf, buf_len),
        None => -1,
    }
}

#[no_mangle]
pub unsafe extern "C" fn hime_gtab_load_table(
    ctx: *mut InputContext,
    filename: *const c_char,
) -> i32 {
    let Some(ctx) = ctx.as_mut() else { return -1 };
    match c_str_to_rust(filename) {
        Some(filename) if ctx.gtab_load_table(filename) => 0,
        _ => -1,
    }
}

#[no_mangle]
pub unsafe extern "C" fn hime_gtab_load_table_by_id(ctx: *mut InputContext, id: u32) -> i32 {
    match ctx.as_mut() {
        Some(ctx) if ctx.gtab_load_table_by_id(id) => 0,
        _ => -1,
    }
}

#[no_mangle]
pub unsafe extern "C" fn hime_gtab_get_current_table(
    ctx: *const InputContext,
    buf: *mut u8,
    buf_len: usize,
) -> isize {
    match ctx.as_ref().and_then(|ctx| ctx.gtab_current_table()) {
        Some(filename) => write_str(filename, buf, buf_len),
        None => 0,
    }
}

#[no_mangle]
pub unsafe extern "C" fn hime_gtab_is_valid_key(ctx: *const InputContext, charcode: u32) -> i32 {
    let Some(ctx) = ctx.as_ref() else { return 0 };
    match char::from_u32(charcode) {
        Some(ch) => ctx.gtab_is_valid_key(ch) as i32,
        None => 0,
    }
}

// -- Intcode ----------------------------------------------------------------

#[no_mangle]
pub unsafe extern "C" fn hime_intcode_set_mode(ctx: *mut InputContext, mode: i32) {
    let Some(ctx) = ctx.as_mut() else { return };
    let mode = match mode {
        0 => IntcodeMode::Unicode,
        1 => IntcodeMode::Big5,
        _ => return,
    };
    ctx.intcode_set_mode(mode);
}

#[no_mangle]
pub unsafe extern "C" fn hime_intcode_get_mode(ctx: *const InputContext) -> i32 {
    match ctx.as_ref().and_then(|ctx| ctx.intcode_mode()) {
        Some(IntcodeMode::Unicode) => 0,
        Some(IntcodeMode::Big5) => 1,
        None => -1,
    }
}

#[no_mangle]
pub unsafe extern "C" fn hime_intcode_get_buffer(
    ctx: *const InputContext,
    buf: *mut u8,
    buf_len: usize,
) -> isize {
    match ctx.as_ref().and_then(|ctx| ctx.intcode_buffer()) {
        Some(text) => write_str(text, buf, buf_len),
        None => -1,
    }
}

// -- TSIN -------------------------------------------------------------------

#[no_mangle]
pub unsafe extern "C" fn hime_tsin_get_phrase(
    ctx: *const InputContext,
    buf: *mut u8,
    buf_len: usize,
) -> isize {
    match ctx.as_ref().and_then(|ctx| ctx.tsin_phrase()) {
        Some(text) => write_str(text, buf, buf_len),
        None => -1,
    }
}

#[no_mangle]
pub unsafe extern "C" fn hime_tsin_commit_phrase(
    ctx: *mut InputContext,
    buf: *mut u8,
    buf_len: usize,
) -> isize {
    match ctx.as_mut().and_then(|ctx| ctx.tsin_commit_phrase()) {
        Some(text) => write_str(&text, buf, buf_len),
        None => 0,
    }
}

// -- Settings ---------------------------------------------------------------

#[no_mangle]
pub unsafe extern "C" fn hime_set_charset(ctx: *mut InputContext, charset: i32) {
    let Some(ctx) = ctx.as_mut() else { return };
    let charset = match charset {
        0 => Charset::Traditional,
        1 => Charset::Simplified,
        _ => return,
    };
    ctx.set_charset(charset);
}

#[no_mangle]
pub unsafe extern "C" fn hime_get_charset(ctx: *const InputContext) -> i32 {
    match ctx.as_ref() {
        Some(ctx) => ctx.charset() as i32,
        None => -1,
    }
}

#[no_mangle]
pub unsafe extern "C" fn hime_set_candidate_style(ctx: *mut InputContext, style: i32) {
    let Some(ctx) = ctx.as_mut() else { return };
    let style = match style {
        0 => CandidateStyle::Horizontal,
        1 => CandidateStyle::Vertical,
        2 => CandidateStyle::Popup,
        _ => return,
    };
    ctx.set_candidate_style(style);
}

#[no_mangle]
pub unsafe extern "C" fn hime_set_color_scheme(ctx: *mut InputContext, scheme: i32) {
    let Some(ctx) = ctx.as_mut() else { return };
    let scheme = match scheme {
        0 => ColorScheme::Light,
        1 => ColorScheme::Dark,
        2 => ColorScheme::System,
        _ => return,
    };
    ctx.set_color_scheme(scheme);
}

#[no_mangle]
pub unsafe extern "C" fn hime_set_vibration_duration(ctx: *mut InputContext, ms: u32) {
    if let Some(ctx) = ctx.as_mut() {
        ctx.set_vibration_duration_ms(ms);
    }
}

// -- Smart punctuation ------------------------------------------------------

#[no_mangle]
pub unsafe extern "C" fn hime_set_smart_punctuation(ctx: *mut InputContext, enabled: i32) {
    if let Some(ctx) = ctx.as_mut() {
        ctx.set_smart_punctuation(enabled != 0);
    }
}

#[no_mangle]
pub unsafe extern "C" fn hime_reset_punctuation_state(ctx: *mut InputContext) {
    if let Some(ctx) = ctx.as_mut() {
        ctx.reset_punctuation_state();
    }
}

/// Converts one ASCII punctuation character to its smart-punctuation
/// equivalent, or returns `0` if there is no mapping (or smart punctuation
/// is off).
#[no_mangle]
pub unsafe extern "C" fn hime_convert_punctuation(ctx: *mut InputContext, charcode: u32) -> u32 {
    let Some(ctx) = ctx.as_mut() else { return 0 };
    match char::from_u32(charcode).and_then(|ch| ctx.convert_punctuation(ch)) {
        Some(converted) => converted as u32,
        None => 0,
    }
}

// -- Feedback -----------------------------------------------------------

pub type HimeFeedbackCallback = extern "C" fn(event: i32, user_data: *mut c_void);

struct FeedbackTrampoline {
    callback: HimeFeedbackCallback,
    user_data: usize,
}

impl FeedbackTrampoline {
    fn call(&self, event: FeedbackEvent) {
        (self.callback)(event as i32, self.user_data as *mut c_void);
    }
}

/// Installs a feedback callback invoked at the events listed in §4.D. Pass
/// a null `callback` to remove a previously installed one.
#[no_mangle]
pub unsafe extern "C" fn hime_set_feedback_callback(
    ctx: *mut InputContext,
    callback: Option<HimeFeedbackCallback>,
    user_data: *mut c_void,
) {
    let Some(ctx) = ctx.as_mut() else { return };
    match callback {
        Some(callback) => {
            let trampoline = FeedbackTrampoline {
                callback,
                user_data: user_data as usize,
            };
            ctx.set_feedback(move |event| trampoline.call(event));
        }
        None => ctx.clear_feedback(),
    }
}

// -- Search -----------------------------------------------------------------

/// Runs the fuzzy method/GTAB-table search and returns the hit count.
/// `hime_search_result_name`/`hime_search_result_score` re-run the same
/// query to fetch an individual hit; callers should treat a `(query,
/// index)` pair as stable only within one batch of calls.
#[no_mangle]
pub unsafe extern "C" fn hime_search_count(query: *const c_char) -> isize {
    match c_str_to_rust(query) {
        Some(query) => hime::context::search(query).len() as isize,
        None => -1,
    }
}

#[no_mangle]
pub unsafe extern "C" fn hime_search_result_name(
    query: *const c_char,
    index: usize,
    buf: *mut u8,
    buf_len: usize,
) -> isize {
    let Some(query) = c_str_to_rust(query) else { return -1 };
    match hime::context::search(query).get(index) {
        Some(hit) => write_str(&hit.name, buf, buf_len),
        None => -1,
    }
}

#[no_mangle]
pub unsafe extern "C" fn hime_search_result_score(query: *const c_char, index: usize) -> i32 {
    let Some(query) = c_str_to_rust(query) else { return -1 };
    match hime::context::search(query).get(index) {
        Some(hit) => hit.score,
        None => -1,
    }
}
