//! Event loop (spec §4.10): composes [`Document`], [`Cursor`], the terminal
//! raw-mode guard, the append buffer, the renderer, and the prompt/search
//! session into the single `Editor` value the spec's design notes ask for
//! ("encapsulate the Document, Viewport, Terminal, and Renderer as a
//! composite Editor value passed explicitly; the event loop owns it").

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::buffer::AppendBuffer;
use crate::config::Config;
use crate::cursor::Cursor;
use crate::document::Document;
use crate::editing::{delete_backward, delete_forward, insert_char, insert_newline};
use crate::error::Error;
use crate::key::{ctrl_key, Key};
use crate::prompt::{Prompt, PromptOutcome, SearchState};
use crate::render::{render_frame, StatusMessage};
use crate::terminal::{self, RawMode};

const HELP_MESSAGE: &str = "HELP: Ctrl-S = save | Ctrl-Q = quit | Ctrl-F = find";

pub struct Editor {
    document: Document,
    cursor: Cursor,
    config: Config,
    status: Option<StatusMessage>,
    quit_times: usize,
    screenrows: usize,
    screencols: usize,
    frame: AppendBuffer,
}

impl Editor {
    /// Query the window size and set up an empty, unnamed buffer. Fatal per
    /// spec §7 if the window size cannot be determined.
    pub fn new(config: Config) -> Result<Self, Error> {
        let (rows, cols) = terminal::get_window_size()?;
        if rows == 0 || cols == 0 {
            return Err(Error::InvalidWindowSize);
        }
        Ok(Self {
            document: Document::new(),
            cursor: Cursor::new(),
            quit_times: config.quit_times,
            config,
            status: Some(StatusMessage::new(HELP_MESSAGE)),
            screenrows: rows.saturating_sub(2),
            screencols: cols,
            frame: AppendBuffer::new(),
        })
    }

    /// Load `path` into the buffer, replacing whatever is currently open.
    pub fn open(&mut self, path: &Path) -> io::Result<()> {
        self.document = Document::load(path)?;
        Ok(())
    }

    /// Enter raw mode and run the event loop until the user quits or a
    /// fatal error occurs. The terminal is always left clean and raw mode is
    /// always restored, regardless of which path this returns by.
    pub fn run(&mut self) -> Result<(), Error> {
        let _raw_mode = RawMode::enable()?;
        let result = self.run_loop();
        let _ = self.clear_screen_for_exit();
        result
    }

    fn run_loop(&mut self) -> Result<(), Error> {
        loop {
            self.refresh_screen()?;
            let key = terminal::read_key(Config::read_timeout())?;
            if self.process_keypress(key)? {
                return Ok(());
            }
        }
    }

    fn clear_screen_for_exit(&self) -> io::Result<()> {
        let mut stdout = io::stdout();
        stdout.write_all(b"\x1b[2J\x1b[H")?;
        stdout.flush()
    }

    fn refresh_screen(&mut self) -> io::Result<()> {
        self.cursor.scroll(&self.document, self.screenrows, self.screencols);
        render_frame(
            &mut self.frame,
            &self.document,
            &self.cursor,
            self.status.as_ref(),
            self.screenrows,
            self.screencols,
        );
        let mut stdout = io::stdout();
        stdout.write_all(self.frame.as_bytes())?;
        stdout.flush()
    }

    /// Dispatch one decoded key per spec §4.10. Returns `Ok(true)` when the
    /// session should exit.
    fn process_keypress(&mut self, key: Key) -> Result<bool, Error> {
        if let Key::Char(c) = key {
            if c == ctrl_key(b'q') {
                if self.document.dirty && self.quit_times > 0 {
                    self.status = Some(StatusMessage::new(format!(
                        "WARNING!!! File has unsaved changes. Press Ctrl-Q {} more times to quit.",
                        self.quit_times
                    )));
                    self.quit_times -= 1;
                    return Ok(false);
                }
                return Ok(true);
            }
        }

        match key {
            Key::Char(b'\r') => insert_newline(&mut self.document, &mut self.cursor),
            Key::Char(c) if c == ctrl_key(b's') => self.save()?,
            Key::Char(c) if c == ctrl_key(b'f') => self.search()?,
            Key::Backspace => delete_backward(&mut self.document, &mut self.cursor),
            Key::Char(c) if c == ctrl_key(b'h') => delete_backward(&mut self.document, &mut self.cursor),
            Key::Delete => delete_forward(&mut self.document, &mut self.cursor),
            Key::Home => self.cursor.home(),
            Key::End => self.cursor.end(&self.document),
            Key::PageUp => self.cursor.page_up(&self.document, self.screenrows),
            Key::PageDown => self.cursor.page_down(&self.document, self.screenrows),
            Key::Arrow(dir) => self.cursor.move_cursor(dir, &self.document),
            Key::Char(c) if c == ctrl_key(b'l') => {}
            Key::Escape => {}
            Key::Char(_) => {
                if let Some(byte) = key.is_insertable_byte() {
                    insert_char(&mut self.document, &mut self.cursor, byte);
                }
            }
        }

        self.quit_times = self.config.quit_times;
        Ok(false)
    }

    fn save(&mut self) -> Result<(), Error> {
        if self.document.filename.is_none() {
            match self.prompt_save_as()? {
                Some(path) => self.document.filename = Some(path),
                None => return Ok(()),
            }
        }
        match self.document.save(None) {
            Ok(n) => self.status = Some(StatusMessage::new(format!("{n} bytes written to disk"))),
            Err(e) => self.status = Some(StatusMessage::new(format!("Can't save! I/O error: {e}"))),
        }
        Ok(())
    }

    fn prompt_save_as(&mut self) -> io::Result<Option<PathBuf>> {
        let mut prompt = Prompt::new(&self.config);
        loop {
            self.status = Some(StatusMessage::new(format!(
                "Save as: {} (ESC to cancel)",
                prompt.input
            )));
            self.refresh_screen()?;
            let key = terminal::read_key(Config::read_timeout())?;
            match prompt.process_key(key, |_, _| {}) {
                PromptOutcome::Active => {}
                PromptOutcome::Cancelled => {
                    self.status = Some(StatusMessage::new("Save aborted"));
                    return Ok(None);
                }
                PromptOutcome::Confirmed => return Ok(Some(PathBuf::from(prompt.input))),
            }
        }
    }

    fn search(&mut self) -> io::Result<()> {
        let mut prompt = Prompt::new(&self.config);
        let mut search_state = SearchState::new(&self.cursor);
        loop {
            self.status = Some(StatusMessage::new(format!(
                "Search: {} (ESC/Arrows/Enter)",
                prompt.input
            )));
            self.refresh_screen()?;
            let key = terminal::read_key(Config::read_timeout())?;
            let document = &self.document;
            let cursor = &mut self.cursor;
            let outcome = prompt.process_key(key, |input, k| {
                search_state.on_key(document, cursor, input, k);
            });
            match outcome {
                PromptOutcome::Active => {}
                PromptOutcome::Cancelled => {
                    self.cursor = search_state.saved_cursor();
                    return Ok(());
                }
                PromptOutcome::Confirmed => return Ok(()),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_editor_with_rows(rows: &[&[u8]]) -> Editor {
        let mut document = Document::new();
        for (i, r) in rows.iter().enumerate() {
            document.insert_row(i, r.to_vec());
        }
        document.dirty = false;
        Editor {
            document,
            cursor: Cursor::new(),
            config: Config::default(),
            status: None,
            quit_times: Config::default().quit_times,
            screenrows: 10,
            screencols: 40,
            frame: AppendBuffer::new(),
        }
    }

    #[test]
    fn ctrl_q_quits_immediately_on_a_clean_buffer() {
        let mut editor = new_editor_with_rows(&[b"hi"]);
        let quit = editor.process_keypress(Key::Char(ctrl_key(b'q'))).unwrap();
        assert!(quit);
    }

    #[test]
    fn ctrl_q_on_dirty_buffer_warns_and_decrements_counter() {
        let mut editor = new_editor_with_rows(&[b"hi"]);
        editor.document.dirty = true;
        let quit = editor.process_keypress(Key::Char(ctrl_key(b'q'))).unwrap();
        assert!(!quit);
        assert_eq!(editor.quit_times, Config::default().quit_times - 1);
    }

    #[test]
    fn any_other_key_resets_the_quit_counter() {
        let mut editor = new_editor_with_rows(&[b"hi"]);
        editor.document.dirty = true;
        editor.process_keypress(Key::Char(ctrl_key(b'q'))).unwrap();
        assert_eq!(editor.quit_times, Config::default().quit_times - 1);
        editor.process_keypress(Key::Arrow(crate::key::Direction::Left)).unwrap();
        assert_eq!(editor.quit_times, Config::default().quit_times);
    }

    #[test]
    fn printable_byte_inserts_and_advances_cursor() {
        let mut editor = new_editor_with_rows(&[]);
        editor.process_keypress(Key::Char(b'h')).unwrap();
        assert_eq!(editor.document.rows[0].raw, b"h".to_vec());
        assert_eq!(editor.cursor.cx, 1);
    }

    #[test]
    fn carriage_return_inserts_a_newline() {
        let mut editor = new_editor_with_rows(&[b"abc"]);
        editor.cursor.cx = 2;
        editor.process_keypress(Key::Char(b'\r')).unwrap();
        let raws: Vec<_> = editor.document.rows.iter().map(|r| r.raw.clone()).collect();
        assert_eq!(raws, vec![b"ab".to_vec(), b"c".to_vec()]);
    }

    #[test]
    fn ctrl_l_and_escape_are_no_ops() {
        let mut editor = new_editor_with_rows(&[b"abc"]);
        let before = editor.cursor;
        editor.process_keypress(Key::Char(ctrl_key(b'l'))).unwrap();
        editor.process_keypress(Key::Escape).unwrap();
        assert_eq!(editor.cursor, before);
    }
}
