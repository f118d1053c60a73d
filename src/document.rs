//! Document (spec §4.4): an ordered sequence of [`Row`]s, with structural
//! edit operations preserving the invariants of spec §3, plus load/save
//! (spec §6 File format — out of scope per spec §1 as a "byte-stream
//! source/sink", implemented here as the concrete collaborator the rest of
//! the editor needs to run).

use std::fs::OpenOptions;
use std::io::{self, Read, Write};
use std::os::unix::fs::OpenOptionsExt;
use std::path::{Path, PathBuf};

use crate::row::Row;

#[derive(Debug, Default)]
pub struct Document {
    pub rows: Vec<Row>,
    pub filename: Option<PathBuf>,
    pub dirty: bool,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    /// Read lines separated by LF or CRLF; strip any trailing CR and/or LF
    /// from each line; each resulting byte sequence becomes one row's `raw`.
    pub fn load(path: &Path) -> io::Result<Self> {
        let mut file = OpenOptions::new().read(true).write(true).create(true).mode(0o644).open(path)?;
        let mut contents = Vec::new();
        file.read_to_end(&mut contents)?;

        let mut rows = Vec::new();
        for mut line in contents.split(|&b| b == b'\n') {
            if let Some((&b'\r', rest)) = line.split_last() {
                line = rest;
            }
            rows.push(Row::new(line.to_vec()));
        }
        // `split` on a trailing LF (or an empty file) yields a trailing
        // empty slice; drop it so an empty file loads as zero rows and a
        // file ending in a single LF doesn't gain a phantom blank row.
        if contents.is_empty() {
            rows.clear();
        } else if rows.last().is_some_and(|r| r.raw.is_empty()) && contents.ends_with(b"\n") {
            rows.pop();
        }

        Ok(Self { rows, filename: Some(path.to_path_buf()), dirty: false })
    }

    /// Concatenate `row[i].raw` separated by LF; no trailing newline beyond
    /// the one after the last row.
    pub fn rows_to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::new();
        for row in &self.rows {
            out.extend_from_slice(&row.raw);
            out.push(b'\n');
        }
        out
    }

    /// Write the buffer back to `filename` (or `path` if given), truncating
    /// the file to the resulting byte length. Returns the number of bytes
    /// written.
    pub fn save(&mut self, path: Option<&Path>) -> io::Result<usize> {
        let path = match path.or(self.filename.as_deref()) {
            Some(p) => p.to_path_buf(),
            None => return Err(io::Error::new(io::ErrorKind::InvalidInput, "no filename")),
        };
        let bytes = self.rows_to_bytes();
        let mut file = OpenOptions::new().write(true).create(true).truncate(true).mode(0o644).open(&path)?;
        file.write_all(&bytes)?;
        file.set_len(bytes.len() as u64)?;
        self.filename = Some(path);
        self.dirty = false;
        Ok(bytes.len())
    }

    pub fn insert_row(&mut self, at: usize, bytes: Vec<u8>) {
        assert!(at <= self.rows.len(), "insert_row: index out of bounds");
        self.rows.insert(at, Row::new(bytes));
        self.dirty = true;
    }

    pub fn delete_row(&mut self, at: usize) {
        assert!(at < self.rows.len(), "delete_row: index out of bounds");
        self.rows.remove(at);
        self.dirty = true;
    }

    pub fn row_insert_char(&mut self, row: usize, at: usize, byte: u8) {
        self.rows[row].insert_char(at, byte);
        self.dirty = true;
    }

    pub fn row_append(&mut self, row: usize, bytes: &[u8]) {
        self.rows[row].append(bytes);
        self.dirty = true;
    }

    pub fn row_delete_char(&mut self, row: usize, at: usize) {
        self.rows[row].delete_char(at);
        self.dirty = true;
    }
}
