//! Editing operations (spec §4.5): high-level edits layered over
//! [`Document`] and [`Cursor`].

use crate::cursor::Cursor;
use crate::document::Document;
use crate::key::Direction;

/// Insert `c` at `(cy, cx)`. If `cy == N`, an empty row is inserted at `N`
/// first.
pub fn insert_char(doc: &mut Document, cur: &mut Cursor, c: u8) {
    if cur.cy == doc.num_rows() {
        doc.insert_row(doc.num_rows(), Vec::new());
    }
    doc.row_insert_char(cur.cy, cur.cx, c);
    cur.cx += 1;
}

/// Insert a newline at `(cy, cx)`, splitting the row at `cx` when `cx > 0`.
pub fn insert_newline(doc: &mut Document, cur: &mut Cursor) {
    if cur.cx == 0 {
        doc.insert_row(cur.cy, Vec::new());
    } else {
        let tail = doc.rows[cur.cy].raw[cur.cx..].to_vec();
        doc.insert_row(cur.cy + 1, tail);
        doc.rows[cur.cy].raw.truncate(cur.cx);
        doc.rows[cur.cy].update_render();
        doc.dirty = true;
    }
    cur.cy += 1;
    cur.cx = 0;
}

/// Backspace at `(cy, cx)`: no-op at the virtual row or at the very start of
/// the document; otherwise deletes the byte before the cursor, joining the
/// current row into the previous one when `cx == 0`.
pub fn delete_backward(doc: &mut Document, cur: &mut Cursor) {
    if cur.cy == doc.num_rows() || (cur.cx == 0 && cur.cy == 0) {
        return;
    }
    if cur.cx > 0 {
        doc.row_delete_char(cur.cy, cur.cx - 1);
        cur.cx -= 1;
    } else {
        cur.cx = doc.rows[cur.cy - 1].raw.len();
        let tail = doc.rows[cur.cy].raw.clone();
        doc.row_append(cur.cy - 1, &tail);
        doc.delete_row(cur.cy);
        cur.cy -= 1;
    }
}

/// Forward delete: equivalent to moving right once then backspace; a no-op
/// at the end of the document.
pub fn delete_forward(doc: &mut Document, cur: &mut Cursor) {
    if cur.cy >= doc.num_rows() {
        return;
    }
    cur.move_cursor(Direction::Right, doc);
    delete_backward(doc, cur);
}
