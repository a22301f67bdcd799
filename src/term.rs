//! Raw terminal mode, held for the duration of an interactive run so that
//! single keypresses reach the program without waiting for a newline.

use std::io;

use crossterm::terminal::{disable_raw_mode, enable_raw_mode};

/// Puts the terminal into raw mode on acquisition and restores it on drop.
pub struct RawModeGuard {
    _priv: (),
}

impl RawModeGuard {
    pub fn acquire() -> io::Result<Self> {
        enable_raw_mode()?;
        Ok(Self { _priv: () })
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        // Nothing useful to do with a failure during teardown.
        let _ = disable_raw_mode();
    }
}
