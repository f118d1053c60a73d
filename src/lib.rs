//! A minimalist modeless terminal text editor: a single in-memory document,
//! raw-mode keyboard editing with cursor/viewport tracking, incremental
//! bidirectional search, and save-as via a modal prompt.

pub mod buffer;
pub mod config;
pub mod cursor;
pub mod document;
pub mod editing;
pub mod editor;
pub mod error;
pub mod key;
pub mod prompt;
pub mod render;
pub mod row;
pub mod terminal;
