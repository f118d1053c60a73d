//! Renderer (spec §4.7): produces one full frame (text area, status bar,
//! message bar, cursor position) into an [`AppendBuffer`], which is then
//! written to the output stream in a single write so no frame is ever torn.

use std::path::Path;
use std::time::Instant;

use crate::buffer::AppendBuffer;
use crate::config::{Config, KILO_VERSION};
use crate::cursor::Cursor;
use crate::document::Document;

pub struct StatusMessage {
    pub text: String,
    pub set_at: Instant,
}

impl StatusMessage {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into(), set_at: Instant::now() }
    }

    fn visible(&self) -> bool {
        self.set_at.elapsed() < Config::message_ttl()
    }
}

/// Render one frame of `doc`/`cursor` into `buf`. `screenrows`/`screencols`
/// are the text area's dimensions (window rows minus the status and
/// message bars).
#[allow(clippy::too_many_arguments)]
pub fn render_frame(
    buf: &mut AppendBuffer,
    doc: &Document,
    cursor: &Cursor,
    status: Option<&StatusMessage>,
    screenrows: usize,
    screencols: usize,
) {
    buf.clear();
    buf.push_str("\x1b[?25l"); // hide cursor
    buf.push_str("\x1b[H"); // cursor home

    draw_rows(buf, doc, cursor, screenrows, screencols);
    draw_status_bar(buf, doc, cursor, screencols);
    draw_message_bar(buf, status, screencols);

    let row = cursor.cy - cursor.rowoff + 1;
    let col = cursor.rx - cursor.coloff + 1;
    buf.push_str(&format!("\x1b[{row};{col}H"));
    buf.push_str("\x1b[?25h"); // show cursor
}

fn draw_rows(
    buf: &mut AppendBuffer,
    doc: &Document,
    cursor: &Cursor,
    screenrows: usize,
    screencols: usize,
) {
    for y in 0..screenrows {
        let filerow = y + cursor.rowoff;
        if filerow >= doc.num_rows() {
            if doc.num_rows() == 0 && y == screenrows / 3 {
                draw_welcome_banner(buf, screencols);
            } else {
                buf.push_str("~");
            }
        } else {
            let render = &doc.rows[filerow].render;
            let start = cursor.coloff.min(render.len());
            let end = (start + screencols).min(render.len());
            buf.append(&render[start..end]);
        }
        buf.push_str("\x1b[K");
        buf.push_str("\r\n");
    }
}

/// Truncate `s` to at most `max_bytes` bytes, backing off to the nearest
/// preceding UTF-8 char boundary instead of panicking when `max_bytes` would
/// otherwise land mid-character (spec §4.7 only asks for a byte count; a
/// filename or status message with multi-byte characters must never abort
/// the session over it).
fn truncate_bytes(s: &str, max_bytes: usize) -> &str {
    if s.len() <= max_bytes {
        return s;
    }
    let mut idx = max_bytes;
    while !s.is_char_boundary(idx) {
        idx -= 1;
    }
    &s[..idx]
}

fn draw_welcome_banner(buf: &mut AppendBuffer, screencols: usize) {
    let message = format!("Kilo editor -- version {KILO_VERSION}");
    let message = truncate_bytes(&message, screencols);
    let padding = screencols.saturating_sub(message.len()) / 2;
    if padding > 0 {
        buf.push_str("~");
    }
    buf.push_str(&" ".repeat(padding.saturating_sub(1)));
    buf.push_str(message);
}

fn draw_status_bar(buf: &mut AppendBuffer, doc: &Document, cursor: &Cursor, screencols: usize) {
    buf.push_str("\x1b[7m");

    let name = doc
        .filename
        .as_deref()
        .and_then(Path::to_str)
        .unwrap_or("[No name]");
    let name = truncate_bytes(name, 20);
    let modified = if doc.dirty { " (modified)" } else { "" };
    let left = format!("{} - {} lines{}", name, doc.num_rows(), modified);
    let right = format!("{}/{}", cursor.cy + 1, doc.num_rows());

    let left = truncate_bytes(&left, screencols);
    buf.push_str(left);

    let mut written = left.len();
    while written < screencols {
        if screencols - written == right.len() {
            buf.push_str(&right);
            break;
        }
        buf.push_str(" ");
        written += 1;
    }

    buf.push_str("\x1b[m");
    buf.push_str("\r\n");
}

fn draw_message_bar(buf: &mut AppendBuffer, status: Option<&StatusMessage>, screencols: usize) {
    buf.push_str("\x1b[K");
    if let Some(status) = status {
        if status.visible() {
            buf.push_str(truncate_bytes(&status.text, screencols));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc_with_rows(rows: &[&[u8]]) -> Document {
        let mut doc = Document::new();
        for (i, r) in rows.iter().enumerate() {
            doc.insert_row(i, r.to_vec());
        }
        doc.dirty = false;
        doc
    }

    #[test]
    fn empty_document_shows_welcome_banner_at_one_third() {
        let doc = Document::new();
        let cursor = Cursor::new();
        let mut buf = AppendBuffer::new();
        render_frame(&mut buf, &doc, &cursor, None, 9, 40);
        let s = String::from_utf8(buf.as_bytes().to_vec()).unwrap();
        assert!(s.contains("Kilo editor -- version"));
    }

    #[test]
    fn status_bar_shows_filename_and_line_count() {
        let mut doc = doc_with_rows(&[b"a", b"b"]);
        doc.filename = Some(std::path::PathBuf::from("t.txt"));
        let cursor = Cursor::new();
        let mut buf = AppendBuffer::new();
        render_frame(&mut buf, &doc, &cursor, None, 5, 40);
        let s = String::from_utf8(buf.as_bytes().to_vec()).unwrap();
        assert!(s.contains("t.txt - 2 lines"));
        assert!(s.contains("1/2"));
    }

    #[test]
    fn status_message_disappears_after_ttl() {
        let doc = doc_with_rows(&[b"a"]);
        let cursor = Cursor::new();
        let mut buf = AppendBuffer::new();
        let mut msg = StatusMessage::new("hello");
        msg.set_at = Instant::now() - Config::message_ttl() - std::time::Duration::from_secs(1);
        render_frame(&mut buf, &doc, &cursor, Some(&msg), 5, 40);
        let s = String::from_utf8(buf.as_bytes().to_vec()).unwrap();
        assert!(!s.contains("hello"));
    }

    #[test]
    fn modified_flag_appears_in_status_bar() {
        let mut doc = doc_with_rows(&[b"a"]);
        doc.dirty = true;
        let cursor = Cursor::new();
        let mut buf = AppendBuffer::new();
        render_frame(&mut buf, &doc, &cursor, None, 5, 40);
        let s = String::from_utf8(buf.as_bytes().to_vec()).unwrap();
        assert!(s.contains("(modified)"));
    }

    #[test]
    fn truncate_bytes_backs_off_to_the_nearest_char_boundary() {
        // "a" * 19 + "é" (2 bytes): byte 20 lands inside the 2-byte char.
        let s = format!("{}é", "a".repeat(19));
        assert_eq!(truncate_bytes(&s, 20), "a".repeat(19));
    }

    #[test]
    fn status_bar_does_not_panic_on_a_multibyte_filename_near_the_truncation_boundary() {
        let mut doc = doc_with_rows(&[b"a"]);
        let name = format!("{}é.txt", "a".repeat(19));
        doc.filename = Some(std::path::PathBuf::from(name));
        let cursor = Cursor::new();
        let mut buf = AppendBuffer::new();
        render_frame(&mut buf, &doc, &cursor, None, 5, 40);
    }
}
