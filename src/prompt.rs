//! Prompt (spec §4.8) and incremental search (spec §4.9).
//!
//! The prompt is a small state machine the event loop drives one key at a
//! time (so the editor can keep rendering between keystrokes); the
//! incremental search session threads its own state across calls rather
//! than reaching for process-wide statics, per the "multiple prompt
//! sessions nest safely" note in spec §9.

use crate::config::Config;
use crate::cursor::Cursor;
use crate::document::Document;
use crate::key::Key;

/// What happened to the prompt's input buffer after processing one key.
pub enum PromptOutcome {
    /// Still editing; render again and read another key.
    Active,
    /// ESC was pressed; the prompt session is done, nothing was entered.
    Cancelled,
    /// Enter was pressed on a non-empty buffer; the prompt session is done.
    Confirmed,
}

/// A modal single-line prompt with a caller-supplied callback hook invoked
/// on every keystroke (spec §4.8), including the terminal ESC/Enter events.
pub struct Prompt {
    pub input: String,
}

impl Prompt {
    pub fn new(config: &Config) -> Self {
        Self { input: String::with_capacity(config.prompt_initial_capacity) }
    }

    /// Process one key. `on_key` is invoked after `input` has been updated,
    /// for every key including the terminal ESC/Enter events, mirroring the
    /// callback contract of spec §4.8.
    pub fn process_key(&mut self, key: Key, mut on_key: impl FnMut(&str, Key)) -> PromptOutcome {
        let outcome = match key {
            Key::Backspace | Key::Delete => {
                self.input.pop();
                PromptOutcome::Active
            }
            Key::Char(c) if c == crate::key::ctrl_key(b'h') => {
                self.input.pop();
                PromptOutcome::Active
            }
            Key::Escape => {
                let outcome = PromptOutcome::Cancelled;
                on_key(&self.input, key);
                return outcome;
            }
            Key::Char(b'\r') => {
                if self.input.is_empty() {
                    PromptOutcome::Active
                } else {
                    on_key(&self.input, key);
                    return PromptOutcome::Confirmed;
                }
            }
            Key::Char(c) if c < 0x80 && !(c as char).is_ascii_control() => {
                self.input.push(c as char);
                PromptOutcome::Active
            }
            other => {
                on_key(&self.input, other);
                return PromptOutcome::Active;
            }
        };
        on_key(&self.input, key);
        outcome
    }
}

/// Direction a search session is currently progressing in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchDirection {
    Forward,
    Backward,
}

/// Persistent state of one incremental search session (spec §4.9). Reset on
/// session start and on ENTER/ESC/empty query.
pub struct SearchState {
    pub start_y: usize,
    pub start_x: usize,
    pub direction: SearchDirection,
    saved_cursor: Cursor,
}

impl SearchState {
    pub fn new(cursor: &Cursor) -> Self {
        Self {
            start_y: cursor.cy,
            start_x: cursor.cx,
            direction: SearchDirection::Forward,
            saved_cursor: *cursor,
        }
    }

    /// The cursor position to restore if the search is cancelled.
    pub fn saved_cursor(&self) -> Cursor {
        self.saved_cursor
    }

    fn reset(&mut self, cursor: &Cursor) {
        self.start_y = cursor.cy;
        self.start_x = cursor.cx;
        self.direction = SearchDirection::Forward;
    }

    /// Incremental search callback: called after every keystroke while the
    /// find prompt is active. Advances `cursor` to the next match in the
    /// configured direction, wrapping cyclically across the document.
    ///
    /// Per spec §4.9, the session resets (anchor := current cursor,
    /// direction := forward) on every key that is not an arrow. An arrow
    /// key sets the direction and, since the cursor is already resting on
    /// the previous match, steps the anchor past that match before
    /// searching again ("switching" past the matched region) — without
    /// this step, repeated presses of the same arrow would re-find the
    /// match the cursor is already sitting on instead of advancing.
    pub fn on_key(&mut self, doc: &Document, cursor: &mut Cursor, query: &str, key: Key) {
        let mut stepped_past_match = false;
        match key {
            Key::Char(b'\r') | Key::Escape => {
                self.reset(cursor);
                return;
            }
            Key::Arrow(crate::key::Direction::Right) | Key::Arrow(crate::key::Direction::Down) => {
                self.direction = SearchDirection::Forward;
                stepped_past_match = true;
            }
            Key::Arrow(crate::key::Direction::Left) | Key::Arrow(crate::key::Direction::Up) => {
                self.direction = SearchDirection::Backward;
                stepped_past_match = true;
            }
            _ => {
                self.reset(cursor);
            }
        }

        if query.is_empty() || doc.num_rows() == 0 {
            return;
        }

        let numrows = doc.num_rows();
        let mut current_y = self.start_y.min(numrows.saturating_sub(1));

        match self.direction {
            SearchDirection::Forward => {
                let mut start_x = if stepped_past_match {
                    self.start_x + query.len()
                } else {
                    self.start_x
                };
                for _ in 0..numrows {
                    let render = &doc.rows[current_y].render;
                    if let Some(match_rx) = find_from(render, query, start_x) {
                        self.commit_match(doc, cursor, current_y, match_rx);
                        return;
                    }
                    current_y = (current_y + 1) % numrows;
                    start_x = 0;
                }
            }
            SearchDirection::Backward => {
                let mut start_x: isize = if stepped_past_match {
                    self.start_x as isize - query.len() as isize
                } else {
                    self.start_x as isize
                };
                for _ in 0..numrows {
                    let render = &doc.rows[current_y].render;
                    let found = if start_x >= 0 {
                        rfind_before(render, query, start_x as usize)
                    } else {
                        None
                    };
                    if let Some(match_rx) = found {
                        self.commit_match(doc, cursor, current_y, match_rx);
                        return;
                    }
                    current_y = if current_y == 0 { numrows - 1 } else { current_y - 1 };
                    start_x = doc.rows[current_y].render.len() as isize - query.len() as isize;
                }
            }
        }
    }

    fn commit_match(&mut self, doc: &Document, cursor: &mut Cursor, row: usize, match_rx: usize) {
        self.start_y = row;
        self.start_x = match_rx;
        cursor.cy = row;
        cursor.cx = doc.rows[row].rx_to_cx(match_rx);
    }
}

/// Find `query` in `render` at or after render-column `from`.
fn find_from(render: &[u8], query: &str, from: usize) -> Option<usize> {
    if from > render.len() {
        return None;
    }
    let needle = query.as_bytes();
    (from..=render.len().saturating_sub(needle.len())).find(|&i| &render[i..i + needle.len()] == needle)
}

/// Find `query` in `render` at or before render-column `from`, scanning
/// downward.
fn rfind_before(render: &[u8], query: &str, from: usize) -> Option<usize> {
    let needle = query.as_bytes();
    if needle.len() > render.len() {
        return None;
    }
    let max_start = render.len() - needle.len();
    let from = from.min(max_start);
    (0..=from).rev().find(|&i| &render[i..i + needle.len()] == needle)
}
