//! Viewport & cursor (spec §4.6): logical cursor (raw coordinates) and
//! render cursor (visual coordinates); scroll offsets; window bounds.

use crate::document::Document;
use crate::key::Direction;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Cursor {
    /// Row index, `0..=numrows` (the virtual row past the last row is the
    /// legal append position, per spec §9 — never clamp `cy` to `N - 1`).
    pub cy: usize,
    /// Byte index into `row[cy].raw`.
    pub cx: usize,
    /// Derived render column.
    pub rx: usize,
    pub rowoff: usize,
    pub coloff: usize,
}

impl Cursor {
    pub fn new() -> Self {
        Self::default()
    }

    fn current_row_len(&self, doc: &Document) -> usize {
        doc.rows.get(self.cy).map_or(0, |r| r.raw.len())
    }

    /// Recompute `rx` and clamp `rowoff`/`coloff` so the cursor stays inside
    /// the visible window (spec §4.6, steps 1-5).
    pub fn scroll(&mut self, doc: &Document, screenrows: usize, screencols: usize) {
        self.rx = doc.rows.get(self.cy).map_or(0, |row| row.cx_to_rx(self.cx));

        if self.cy < self.rowoff {
            self.rowoff = self.cy;
        }
        if self.cy >= self.rowoff + screenrows {
            self.rowoff = self.cy - screenrows + 1;
        }
        if self.rx < self.coloff {
            self.coloff = self.rx;
        }
        if self.rx >= self.coloff + screencols {
            self.coloff = self.rx - screencols + 1;
        }
    }

    /// LEFT/RIGHT wrap across row boundaries; UP/DOWN clamp to `[0, N]` and
    /// then clamp `cx` to the new row's length (the virtual column is not
    /// preserved, per spec §4.6).
    pub fn move_cursor(&mut self, dir: Direction, doc: &Document) {
        let numrows = doc.num_rows();
        match dir {
            Direction::Left => {
                if self.cx > 0 {
                    self.cx -= 1;
                } else if self.cy > 0 {
                    self.cy -= 1;
                    self.cx = self.current_row_len(doc);
                }
            }
            Direction::Right => {
                if self.cy < numrows && self.cx < self.current_row_len(doc) {
                    self.cx += 1;
                } else if self.cy < numrows {
                    self.cy += 1;
                    self.cx = 0;
                }
            }
            Direction::Up => {
                self.cy = self.cy.saturating_sub(1);
            }
            Direction::Down => {
                if self.cy < numrows {
                    self.cy += 1;
                }
            }
        }
        self.clamp_cx(doc);
    }

    fn clamp_cx(&mut self, doc: &Document) {
        self.cx = self.cx.min(self.current_row_len(doc));
    }

    pub fn home(&mut self) {
        self.cx = 0;
    }

    pub fn end(&mut self, doc: &Document) {
        if self.cy < doc.num_rows() {
            self.cx = self.current_row_len(doc);
        }
    }

    /// `cy <- rowoff`, then repeat UP `screenrows` times.
    pub fn page_up(&mut self, doc: &Document, screenrows: usize) {
        self.cy = self.rowoff;
        for _ in 0..screenrows {
            self.move_cursor(Direction::Up, doc);
        }
    }

    /// `cy <- min(N, rowoff + screenrows - 1)`, then repeat DOWN `screenrows`
    /// times.
    pub fn page_down(&mut self, doc: &Document, screenrows: usize) {
        self.cy = doc.num_rows().min(self.rowoff + screenrows.saturating_sub(1));
        for _ in 0..screenrows {
            self.move_cursor(Direction::Down, doc);
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
        doc
    }

    #[test]
    fn left_at_row_start_wraps_to_previous_row_end() {
        let doc = doc_with_rows(&[b"abc", b"de"]);
        let mut cur = Cursor { cy: 1, cx: 0, ..Cursor::new() };
        cur.move_cursor(Direction::Left, &doc);
        assert_eq!((cur.cy, cur.cx), (0, 3));
    }

    #[test]
    fn right_at_row_end_wraps_to_next_row_start() {
        let doc = doc_with_rows(&[b"abc", b"de"]);
        let mut cur = Cursor { cy: 0, cx: 3, ..Cursor::new() };
        cur.move_cursor(Direction::Right, &doc);
        assert_eq!((cur.cy, cur.cx), (1, 0));
    }

    #[test]
    fn vertical_movement_clamps_cx_without_preserving_virtual_column() {
        let doc = doc_with_rows(&[b"abcdef", b"yz"]);
        let mut cur = Cursor { cy: 0, cx: 5, ..Cursor::new() };
        cur.move_cursor(Direction::Down, &doc);
        assert_eq!((cur.cy, cur.cx), (1, 2));
    }

    #[test]
    fn cy_can_reach_the_virtual_row_past_the_last_row() {
        let doc = doc_with_rows(&[b"abc"]);
        let mut cur = Cursor { cy: 0, cx: 3, ..Cursor::new() };
        cur.move_cursor(Direction::Right, &doc);
        assert_eq!((cur.cy, cur.cx), (1, 0));
        assert_eq!(doc.num_rows(), 1);
    }

    #[test]
    fn scroll_keeps_cursor_within_window_on_all_four_sides() {
        let doc = doc_with_rows(&[b"a", b"b", b"c", b"d", b"e"]);
        let mut cur = Cursor::new();
        cur.cy = 4;
        cur.scroll(&doc, 2, 10);
        assert_eq!(cur.rowoff, 3);

        cur.cy = 0;
        cur.scroll(&doc, 2, 10);
        assert_eq!(cur.rowoff, 0);
    }

    #[test]
    fn scroll_tracks_horizontal_position_via_coloff() {
        let doc = doc_with_rows(&[b"0123456789abcdef"]);
        let mut cur = Cursor::new();
        cur.cx = 15;
        cur.scroll(&doc, 5, 5);
        assert_eq!(cur.rx, 15);
        assert_eq!(cur.coloff, 11);
    }
}
