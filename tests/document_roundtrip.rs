//! Crate-level round-trip coverage: load a file, apply edits through the
//! public editing API, save, and check the bytes on disk against the §6
//! file-format contract (every row, including the last, contributes its raw
//! bytes followed by one LF; total length is `Σ raw[i].length + N`).

use oxi::cursor::Cursor;
use oxi::document::Document;
use oxi::editing::{insert_char, insert_newline};

#[test]
fn type_hi_newline_bang_then_save_writes_sum_of_row_lengths_plus_row_count() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("t.txt");

    let mut doc = Document::new();
    let mut cursor = Cursor::new();

    insert_char(&mut doc, &mut cursor, b'h');
    insert_char(&mut doc, &mut cursor, b'i');
    insert_newline(&mut doc, &mut cursor);
    insert_char(&mut doc, &mut cursor, b'!');

    let written = doc.save(Some(&path)).unwrap();
    assert_eq!(written, 5);
    assert_eq!(std::fs::read(&path).unwrap(), b"hi\n!\n".to_vec());
    assert!(!doc.dirty);
}

#[test]
fn tab_containing_file_round_trips_through_load_and_save() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("in.txt");
    std::fs::write(&path, b"\tabc\n").unwrap();

    let mut doc = Document::load(&path).unwrap();
    assert_eq!(doc.rows[0].raw, b"\tabc".to_vec());
    assert_eq!(doc.rows[0].render, b"        abc".to_vec());
    assert_eq!(doc.rows[0].cx_to_rx(1), 8);

    let out_path = dir.path().join("out.txt");
    doc.save(Some(&out_path)).unwrap();
    assert_eq!(std::fs::read(&out_path).unwrap(), b"\tabc\n".to_vec());
}

#[test]
fn edit_after_load_then_save_reflects_the_new_content() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("edit.txt");
    std::fs::write(&path, b"foo\nbar\n").unwrap();

    let mut doc = Document::load(&path).unwrap();
    let mut cursor = Cursor { cy: 0, cx: 3, ..Cursor::new() };
    insert_char(&mut doc, &mut cursor, b'!');
    doc.save(None).unwrap();

    assert_eq!(std::fs::read(&path).unwrap(), b"foo!\nbar\n".to_vec());
}
