//! Process entry point (spec §6 CLI): `editor [path]`. Out of scope as a
//! collaborator per spec §1, but implemented here as the concrete glue the
//! rest of the crate needs to run.

use std::env;
use std::path::PathBuf;
use std::process::ExitCode;

use oxi::config::Config;
use oxi::editor::Editor;

fn main() -> ExitCode {
    let path = env::args().nth(1).map(PathBuf::from);

    let mut editor = match Editor::new(Config::default()) {
        Ok(editor) => editor,
        Err(e) => {
            eprintln!("oxi: {e}");
            return ExitCode::FAILURE;
        }
    };

    if let Some(path) = path {
        if let Err(e) = editor.open(&path) {
            eprintln!("oxi: {e}");
            return ExitCode::FAILURE;
        }
    }

    match editor.run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("oxi: {e}");
            ExitCode::FAILURE
        }
    }
}
