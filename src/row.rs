//! Row model (spec §4.3): a logical row with raw and rendered byte
//! representations, plus the mapping between them.

/// Fixed tab stop width (`T` in spec §3).
pub const TAB_STOP: usize = 8;

/// A single line of the document. `render` is always kept in sync with
/// `raw` by a call to [`Row::update_render`] after every mutation of `raw`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Row {
    pub raw: Vec<u8>,
    pub render: Vec<u8>,
}

impl Row {
    pub fn new(raw: Vec<u8>) -> Self {
        let mut row = Self { raw, render: Vec::new() };
        row.update_render();
        row
    }

    /// Recompute `render` from `raw`, expanding tabs to the next multiple of
    /// `TAB_STOP`. Must be called after every mutation to `raw`.
    pub fn update_render(&mut self) {
        let tabs = self.raw.iter().filter(|&&b| b == b'\t').count();
        self.render = Vec::with_capacity(self.raw.len() + tabs * (TAB_STOP - 1));
        let mut col = 0;
        for &b in &self.raw {
            if b == b'\t' {
                self.render.push(b' ');
                col += 1;
                while col % TAB_STOP != 0 {
                    self.render.push(b' ');
                    col += 1;
                }
            } else {
                self.render.push(b);
                col += 1;
            }
        }
    }

    /// Walk bytes `0..cx` of `raw`; each TAB contributes
    /// `T - (col mod T)` columns, every other byte contributes 1.
    pub fn cx_to_rx(&self, cx: usize) -> usize {
        let mut rx = 0;
        for &b in &self.raw[..cx.min(self.raw.len())] {
            if b == b'\t' {
                rx += TAB_STOP - (rx % TAB_STOP);
            } else {
                rx += 1;
            }
        }
        rx
    }

    /// The first raw index whose cumulative render column strictly exceeds
    /// `rx`; `raw.len()` if there is none.
    pub fn rx_to_cx(&self, rx: usize) -> usize {
        let mut cur_rx = 0;
        for (cx, &b) in self.raw.iter().enumerate() {
            if b == b'\t' {
                cur_rx += TAB_STOP - (cur_rx % TAB_STOP);
            } else {
                cur_rx += 1;
            }
            if cur_rx > rx {
                return cx;
            }
        }
        self.raw.len()
    }

    pub fn insert_char(&mut self, at: usize, byte: u8) {
        let at = at.min(self.raw.len());
        self.raw.insert(at, byte);
        self.update_render();
    }

    pub fn delete_char(&mut self, at: usize) {
        assert!(at < self.raw.len(), "row_delete_char: index out of bounds");
        self.raw.remove(at);
        self.update_render();
    }

    pub fn append(&mut self, bytes: &[u8]) {
        self.raw.extend_from_slice(bytes);
        self.update_render();
    }
}
