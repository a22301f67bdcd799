//! Single-pass compiler from raw source bytes to a [`Program`].
//!
//! Everything outside the eight operator bytes is comment text and is
//! silently discarded. Runs of the same simple operator collapse into one
//! counted instruction, and bracket pairs are resolved into absolute jump
//! targets while scanning, so the machine never searches for a match at run
//! time.

use crate::program::{Instruction, Program};

/// Structural errors found while compiling. Both are terminal: no partial
/// program is produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum CompileError {
    /// A `]` with no `[` still open.
    #[error("unmatched ']' at source byte {position}")]
    UnmatchedClosingBracket { position: usize },

    /// End of input with at least one `[` still open.
    #[error("unmatched '[' at source byte {position}")]
    UnmatchedOpeningBracket { position: usize },
}

/// The eight significant source bytes; every other byte is a comment.
fn is_operator(byte: u8) -> bool {
    matches!(
        byte,
        b'>' | b'<' | b'+' | b'-' | b'.' | b',' | b'[' | b']'
    )
}

/// Compiles Brainfuck source into a run-length encoded instruction
/// sequence with resolved jump targets.
///
/// Consecutive identical simple operators (`+ - > < . ,`) merge into a
/// single instruction carrying the repeat count. `[` emits a placeholder
/// that is patched to point one past its `]` when the match arrives; `]`
/// itself points one past its `[`, i.e. at the first instruction of the
/// loop body, so a loop-back skips the redundant re-test of the cell the
/// `]` just found non-zero.
pub fn compile(source: &[u8]) -> Result<Program, CompileError> {
    let mut operators = source
        .iter()
        .copied()
        .enumerate()
        .filter(|&(_, byte)| is_operator(byte))
        .peekable();

    let mut code: Vec<Instruction> = Vec::new();
    let mut offsets: Vec<usize> = Vec::new();
    // Emission indices of `LoopStart`s still waiting for their `]`.
    let mut open_loops: Vec<usize> = Vec::new();

    while let Some((position, op)) = operators.next() {
        let instruction = match op {
            b'[' => {
                open_loops.push(code.len());
                // Target patched when the matching `]` arrives.
                Instruction::LoopStart(0)
            }
            b']' => {
                let Some(start) = open_loops.pop() else {
                    return Err(CompileError::UnmatchedClosingBracket { position });
                };
                let end = code.len();
                code[start] = Instruction::LoopStart(end + 1);
                Instruction::LoopEnd(start + 1)
            }
            _ => {
                let mut count = 1;
                while operators.next_if(|&(_, byte)| byte == op).is_some() {
                    count += 1;
                }
                match op {
                    b'+' => Instruction::Increment(count),
                    b'-' => Instruction::Decrement(count),
                    b'>' => Instruction::MoveRight(count),
                    b'<' => Instruction::MoveLeft(count),
                    b'.' => Instruction::Output(count),
                    // The filter admits eight bytes and the brackets are
                    // handled above; only `,` reaches here.
                    _ => Instruction::Input(count),
                }
            }
        };
        code.push(instruction);
        offsets.push(position);
    }

    // Report the innermost bracket left open.
    if let Some(&start) = open_loops.last() {
        return Err(CompileError::UnmatchedOpeningBracket {
            position: offsets[start],
        });
    }

    Ok(Program::new(code, offsets))
}
