//! End-to-end coverage of the two on-disk binary formats through the
//! process-wide lexicon store, as opposed to the unit tests colocated with
//! the parsers that exercise `parse()` directly on in-memory byte buffers.

use std::fs;
use std::io::Write;
use std::path::Path;

use hime::context::{InputContext, Key};
use hime::editor::MethodKind;
use hime::lexicon;

fn write_minimal_pho_tab(path: &Path) {
    let mut file = fs::File::create(path).unwrap();
    file.write_all(&0u16.to_le_bytes()).unwrap(); // idxnum, written twice
    file.write_all(&1u16.to_le_bytes()).unwrap(); // idxnum
    file.write_all(&1i32.to_le_bytes()).unwrap(); // total_items
    file.write_all(&0i32.to_le_bytes()).unwrap(); // phrase_area_size
    file.write_all(&10u16.to_le_bytes()).unwrap(); // idx[0].key
    file.write_all(&0u16.to_le_bytes()).unwrap(); // idx[0].first_item
    let mut ch = [0u8; 4];
    let bytes = "好".as_bytes();
    ch[..bytes.len()].copy_from_slice(bytes);
    file.write_all(&ch).unwrap();
    file.write_all(&50i32.to_le_bytes()).unwrap(); // count
}

const V2_MAGIC: u32 = 0x4847_5432;
const CH_SZ: usize = 8;

fn write_minimal_gtab(path: &Path) {
    let key_count = 26u8;
    let keymap: Vec<u8> = (b'a'..=b'z').collect();
    let header_len = 72;
    let keymap_offset = header_len;
    let keyname_offset = keymap_offset + keymap.len();
    let items_offset = keyname_offset + keymap.len() * CH_SZ;
    let item_stride = 4 + CH_SZ; // keybits=5, max_press=4 -> 32-bit word.

    let mut bytes = vec![0u8; items_offset + item_stride];
    bytes[0..4].copy_from_slice(&V2_MAGIC.to_le_bytes());
    bytes[4..6].copy_from_slice(&2u16.to_le_bytes()); // version
    bytes[6..8].copy_from_slice(&0u16.to_le_bytes()); // flags
    bytes[8..40][..6].copy_from_slice("sample".as_bytes());
    bytes[52] = 0; // space_style
    bytes[53] = key_count;
    bytes[54] = 4; // max_press
    bytes[55] = 5; // keybits
    bytes[56..60].copy_from_slice(&1u32.to_le_bytes()); // item_count
    bytes[60..64].copy_from_slice(&(keymap_offset as u32).to_le_bytes());
    bytes[64..68].copy_from_slice(&(keyname_offset as u32).to_le_bytes());
    bytes[68..72].copy_from_slice(&(items_offset as u32).to_le_bytes());
    bytes[keymap_offset..keymap_offset + keymap.len()].copy_from_slice(&keymap);
    for (i, &k) in keymap.iter().enumerate() {
        bytes[keyname_offset + i * CH_SZ] = k;
    }
    // One entry: key sequence [1, 2] ("ab"), packed per GtabTable::pack's
    // formula for keybits=5, word_width=32 (6 five-bit slots, so the last
    // usable bit position is 25).
    let packed: u32 = (1u32 << 25) | (2u32 << 20);
    bytes[items_offset..items_offset + 4].copy_from_slice(&packed.to_le_bytes());
    bytes[items_offset + 4] = b'A';

    fs::write(path, bytes).unwrap();
}

const V1_HEADER_SIZE: usize = 600;
const V1_KEYMAP_LEN: usize = 128;
const V1_KEYBITS: u32 = 7;

/// A v1-format table with `max_press=5`: `keybits(7) * max_press(5) = 35 >
/// 32`, so this table packs its keys into 64-bit words, unlike
/// `write_minimal_gtab`'s 32-bit v2 table above.
fn write_minimal_v1_gtab(path: &Path) {
    let keymap: Vec<u8> = (b'a'..=b'z').collect();
    let radix_index_len = (1usize << V1_KEYBITS) * 4;
    let items_offset = V1_HEADER_SIZE + V1_KEYMAP_LEN + radix_index_len;
    let item_stride = 8 + CH_SZ; // 64-bit packed key + inline text.

    let mut bytes = vec![0u8; items_offset + item_stride];
    bytes[0..4].copy_from_slice(&1i32.to_le_bytes()); // version
    bytes[4..8].copy_from_slice(&0u32.to_le_bytes()); // flag
    bytes[8..40][..4].copy_from_slice(b"wide");
    bytes[52..56].copy_from_slice(&0i32.to_le_bytes()); // space_style
    bytes[56..60].copy_from_slice(&26i32.to_le_bytes()); // key_count
    bytes[60..64].copy_from_slice(&5i32.to_le_bytes()); // max_press
    bytes[64..68].copy_from_slice(&0i32.to_le_bytes()); // dup_sel
    bytes[68..72].copy_from_slice(&1i32.to_le_bytes()); // def_chars
    bytes[V1_HEADER_SIZE..V1_HEADER_SIZE + keymap.len()].copy_from_slice(&keymap);

    // key sequence [1] packed into a 64-bit word (7 slots of 7 bits,
    // last usable bit position is 7*6=42).
    let packed: u64 = 1u64 << 42;
    bytes[items_offset..items_offset + 8].copy_from_slice(&packed.to_le_bytes());
    let text = "寬".as_bytes();
    bytes[items_offset + 8..items_offset + 8 + text.len()].copy_from_slice(text);

    fs::write(path, bytes).unwrap();
}

#[test]
fn lexicon_store_round_trips_both_formats_through_disk() {
    let bad_dir = tempfile::tempdir().unwrap();
    fs::write(bad_dir.path().join("pho.tab2"), b"\x01\x02").unwrap();
    assert!(lexicon::init(Some(bad_dir.path())).is_err());

    let dir = tempfile::tempdir().unwrap();
    write_minimal_pho_tab(&dir.path().join("pho.tab2"));
    lexicon::init(Some(dir.path())).unwrap();
    lexicon::with_pho_lexicon(|pho| {
        let pho = pho.expect("lexicon should be loaded");
        let items = pho.lookup(10);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].text, "好");
        assert_eq!(items[0].count, 50);
    });

    write_minimal_gtab(&dir.path().join("sample.gtab"));
    lexicon::load_table("sample.gtab").unwrap();
    lexicon::with_gtab_table("sample.gtab", |t| {
        let t = t.expect("table should be loaded");
        assert_eq!(t.cname, "sample");
        assert_eq!(t.item_count(), 1);
        assert!(t.is_valid_key('a'));
        assert_eq!(t.symbol_index('b'), Some(2));
    });
    assert_eq!(lexicon::loaded_table_count(), 1);
    assert_eq!(lexicon::loaded_table_filename_at(0).as_deref(), Some("sample.gtab"));

    // Loading the same filename again is a no-op, not a duplicate entry.
    lexicon::load_table("sample.gtab").unwrap();
    assert_eq!(lexicon::loaded_table_count(), 1);

    // A v1-format, 64-bit-word-width table, driven through a live context:
    // type one key then backspace it away, down to an empty key buffer.
    // This is the exact path (`GtabState::backspace` -> `refresh` ->
    // `GtabTable::prefix(&[])`) that used to overflow a u64 shift.
    write_minimal_v1_gtab(&dir.path().join("wide.gtab"));
    let mut ctx = InputContext::new();
    ctx.set_method(MethodKind::Gtab);
    assert!(ctx.gtab_load_table("wide.gtab"));
    ctx.process_key(Key::Char('a'));
    assert!(ctx.preedit().starts_with('a'));
    // Backspacing down to an empty key buffer re-runs `prefix(&[])` on a
    // 64-bit-word table; it must not panic, and an empty prefix matches
    // every entry rather than narrowing to none.
    assert_eq!(ctx.process_key(Key::Backspace), hime::editor::KeyResult::Preedit);
    assert!(!ctx.preedit().starts_with('a'));
    assert!(ctx.has_candidates());

    lexicon::cleanup();
    lexicon::with_pho_lexicon(|pho| assert!(pho.is_none()));
    assert_eq!(lexicon::loaded_table_count(), 0);
}
