//! Error reporting for the command line: a colored one-line summary plus a
//! caret pointing at the offending spot in the source.

use std::io::{self, IsTerminal, Write};

use nu_ansi_term::Color::Red;

use crate::{CompileError, Program, RuntimeError};

/// Bytes of source shown on either side of the caret.
const WINDOW: usize = 32;

/// Prints a compile error with the source context around the unmatched
/// bracket.
pub fn report_compile_error(program_name: &str, source: &[u8], err: &CompileError) {
    eprintln!("{program_name}: {}", paint(&format!("compile error: {err}")));
    let (CompileError::UnmatchedClosingBracket { position }
    | CompileError::UnmatchedOpeningBracket { position }) = err;
    print_source_context(source, *position);
    let _ = io::stderr().flush();
}

/// Prints a runtime error; when the failing instruction maps back to a
/// source byte, the context around it is shown too.
pub fn report_runtime_error(
    program_name: &str,
    source: &[u8],
    compiled: &Program,
    err: &RuntimeError,
) {
    eprintln!("{program_name}: {}", paint(&format!("runtime error: {err}")));
    let (RuntimeError::OutOfBoundsPointer { ip, .. } | RuntimeError::Io { ip, .. }) = err;
    if let Some(position) = compiled.source_offset(*ip) {
        print_source_context(source, position);
    }
    let _ = io::stderr().flush();
}

fn print_source_context(source: &[u8], position: usize) {
    if position >= source.len() {
        return;
    }
    let start = position.saturating_sub(WINDOW);
    let end = (position + WINDOW + 1).min(source.len());
    let window: String = source[start..end].iter().map(|&b| printable(b)).collect();
    eprintln!("  {window}");
    let caret_offset = position - start;
    eprintln!("  {}^", " ".repeat(caret_offset));
}

/// Control bytes and non-ASCII render as '.' so the caret column lines up.
fn printable(byte: u8) -> char {
    if byte.is_ascii_graphic() || byte == b' ' {
        byte as char
    } else {
        '.'
    }
}

fn paint(message: &str) -> String {
    if io::stderr().is_terminal() {
        Red.bold().paint(message).to_string()
    } else {
        message.to_string()
    }
}
