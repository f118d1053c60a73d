//! Terminal I/O (spec §4.2): raw-mode acquisition as a scoped RAII resource,
//! window size query, and the escape-sequence key decoder.
//!
//! Spec §1 treats terminal mode acquisition/restoration as an external
//! collaborator ("a scoped RAII-style resource") — this module is that
//! collaborator's concrete implementation, built the way the `aschey-kilo`
//! teacher wires `nix`'s termios API, generalized with the cursor-position
//! fallback and CSI/SS3 decoding the teacher's single `EditorKey::Other`
//! fallback didn't carry.

use std::io::{self, Read, Write};
use std::mem;
use std::os::fd::AsRawFd;
use std::time::{Duration, Instant};

use libc::{c_ushort, STDOUT_FILENO, TIOCGWINSZ};
use nix::ioctl_read_bad;
use nix::sys::termios::{
    tcgetattr, tcsetattr, ControlFlags, InputFlags, LocalFlags, OutputFlags, SetArg, Termios,
};

use crate::error::Error;
use crate::key::{Direction, Key};

ioctl_read_bad!(read_winsize, TIOCGWINSZ, WinSize);

#[derive(Debug)]
#[repr(C)]
struct WinSize {
    ws_row: c_ushort,
    ws_col: c_ushort,
    ws_xpixel: c_ushort,
    ws_ypixel: c_ushort,
}

/// Scoped resource acquired at startup and guaranteed released on any exit
/// path via `Drop`.
pub struct RawMode {
    fd: i32,
    orig_termios: Termios,
}

impl RawMode {
    /// Place the terminal in raw mode, capturing the prior termios settings
    /// so they can be restored later. See spec §4.2 for the exact disciplines
    /// disabled.
    pub fn enable() -> Result<Self, Error> {
        let fd = io::stdin().as_raw_fd();
        let orig_termios = tcgetattr(fd)?;
        let mut termios = orig_termios.clone();

        // Input: disable break-signal interrupts, CR->NL translation,
        // parity checking, high-bit stripping, software flow control.
        termios.input_flags &= !(InputFlags::BRKINT
            | InputFlags::ICRNL
            | InputFlags::INPCK
            | InputFlags::ISTRIP
            | InputFlags::IXON);

        // Output: disable NL->CRNL post-processing.
        termios.output_flags &= !OutputFlags::OPOST;

        // Local: disable echo, canonical (line-buffered) mode, extended
        // input processing, and signal generation for INTR/SUSP keys.
        termios.local_flags &=
            !(LocalFlags::ECHO | LocalFlags::ICANON | LocalFlags::IEXTEN | LocalFlags::ISIG);

        // Force an 8-bit character size.
        termios.control_flags |= ControlFlags::CS8;

        // Non-blocking read with ~100ms polling granularity: 0 minimum
        // bytes, 1 decisecond timer.
        termios.control_chars[nix::libc::VMIN] = 0;
        termios.control_chars[nix::libc::VTIME] = 1;

        tcsetattr(fd, SetArg::TCSAFLUSH, &termios)?;
        Ok(Self { fd, orig_termios })
    }

    fn restore(&self) -> Result<(), Error> {
        tcsetattr(self.fd, SetArg::TCSAFLUSH, &self.orig_termios)?;
        Ok(())
    }
}

impl Drop for RawMode {
    fn drop(&mut self) {
        let _ = self.restore();
    }
}

/// Query the terminal window size: `rows, cols`. Primary path is an ioctl;
/// fallback moves the cursor by a deliberately over-large offset (which the
/// terminal clamps to the bottom-right corner) and parses the resulting
/// cursor-position report.
pub fn get_window_size() -> Result<(usize, usize), Error> {
    unsafe {
        let mut size: WinSize = mem::zeroed();
        if read_winsize(STDOUT_FILENO, &mut size).is_ok() && size.ws_col != 0 {
            return Ok((size.ws_row as usize, size.ws_col as usize));
        }
    }
    get_window_size_via_cursor_report()
}

fn get_window_size_via_cursor_report() -> Result<(usize, usize), Error> {
    let mut stdout = io::stdout();
    stdout.write_all(b"\x1b[999C\x1b[999B")?;
    stdout.write_all(b"\x1b[6n")?;
    stdout.flush()?;

    let mut buf = Vec::new();
    let mut byte = [0u8; 1];
    let mut stdin = io::stdin();
    loop {
        if stdin.read(&mut byte)? == 0 {
            return Err(Error::InvalidWindowSize);
        }
        if byte[0] == b'R' {
            break;
        }
        buf.push(byte[0]);
        if buf.len() > 32 {
            return Err(Error::InvalidWindowSize);
        }
    }

    let report = std::str::from_utf8(&buf).map_err(|_| Error::InvalidWindowSize)?;
    let rest = report.strip_prefix("\x1b[").ok_or(Error::InvalidWindowSize)?;
    let (rows, cols) = rest.split_once(';').ok_or(Error::InvalidWindowSize)?;
    let rows: usize = rows.parse().map_err(|_| Error::InvalidWindowSize)?;
    let cols: usize = cols.parse().map_err(|_| Error::InvalidWindowSize)?;
    Ok((rows, cols))
}

/// Read one byte from stdin, honoring the raw-mode read timeout. Returns
/// `None` if no byte arrived within the timeout.
fn read_byte_with_timeout(deadline: Instant) -> io::Result<Option<u8>> {
    let mut byte = [0u8; 1];
    loop {
        match io::stdin().read(&mut byte) {
            Ok(1) => return Ok(Some(byte[0])),
            Ok(_) => {
                if Instant::now() >= deadline {
                    return Ok(None);
                }
            }
            Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
            Err(e) if e.kind() == io::ErrorKind::WouldBlock => {
                if Instant::now() >= deadline {
                    return Ok(None);
                }
            }
            Err(e) => return Err(e),
        }
    }
}

/// Read and decode one key. Blocks on the ~100ms-polled raw-mode read; an
/// escape sequence that doesn't complete within two further short reads
/// degrades to a bare `Key::Escape`.
pub fn read_key(read_timeout: Duration) -> io::Result<Key> {
    let mut byte = [0u8; 1];
    loop {
        match io::stdin().read(&mut byte) {
            Ok(1) => break,
            Ok(_) => continue,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }

    if byte[0] != 0x1b {
        return Ok(decode_plain_byte(byte[0]));
    }

    let deadline = Instant::now() + read_timeout;
    let b1 = match read_byte_with_timeout(deadline)? {
        Some(b) => b,
        None => return Ok(Key::Escape),
    };
    let b2 = match read_byte_with_timeout(deadline)? {
        Some(b) => b,
        None => return Ok(Key::Escape),
    };

    match (b1, b2) {
        (b'[', b'A') => Ok(Key::Arrow(Direction::Up)),
        (b'[', b'B') => Ok(Key::Arrow(Direction::Down)),
        (b'[', b'C') => Ok(Key::Arrow(Direction::Right)),
        (b'[', b'D') => Ok(Key::Arrow(Direction::Left)),
        (b'[', b'H') | (b'O', b'H') => Ok(Key::Home),
        (b'[', b'F') | (b'O', b'F') => Ok(Key::End),
        (b'[', digit @ b'0'..=b'9') => {
            let tilde = match read_byte_with_timeout(deadline)? {
                Some(b) => b,
                None => return Ok(Key::Escape),
            };
            if tilde != b'~' {
                return Ok(Key::Escape);
            }
            match digit {
                b'1' | b'7' => Ok(Key::Home),
                b'4' | b'8' => Ok(Key::End),
                b'3' => Ok(Key::Delete),
                b'5' => Ok(Key::PageUp),
                b'6' => Ok(Key::PageDown),
                _ => Ok(Key::Escape),
            }
        }
        _ => Ok(Key::Escape),
    }
}

fn decode_plain_byte(b: u8) -> Key {
    if b == 0x7f {
        Key::Backspace
    } else {
        Key::Char(b)
    }
}
