//! Shared data model: the compiled instruction set and the [`Program`]
//! container the compiler produces and the machine executes.

use std::fmt;
use std::ops::Index;

/// The machine's cell type, a single fixed-width unsigned integer.
/// Widening the cells means changing this alias and nothing else.
pub type Cell = u8;

/// One compiled unit of work.
///
/// Simple operators carry the repeat count produced by run-length encoding
/// (always at least 1); the two loop instructions carry absolute jump
/// targets resolved at compile time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction {
    /// Add `n` to the current cell, wrapping.
    Increment(usize),
    /// Subtract `n` from the current cell, wrapping.
    Decrement(usize),
    /// Move the data pointer right by `n` cells.
    MoveRight(usize),
    /// Move the data pointer left by `n` cells.
    MoveLeft(usize),
    /// Write the current cell's byte to the output sink `n` times.
    Output(usize),
    /// Read `n` bytes from the input source; only the last one read lands
    /// in the current cell.
    Input(usize),
    /// Taken when the current cell is zero; the target is the instruction
    /// just past the matching [`Instruction::LoopEnd`].
    LoopStart(usize),
    /// Taken when the current cell is non-zero; the target is the first
    /// instruction of the loop body, one past the matching
    /// [`Instruction::LoopStart`].
    LoopEnd(usize),
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Instruction::Increment(n) => write!(f, "+ {n}"),
            Instruction::Decrement(n) => write!(f, "- {n}"),
            Instruction::MoveRight(n) => write!(f, "> {n}"),
            Instruction::MoveLeft(n) => write!(f, "< {n}"),
            Instruction::Output(n) => write!(f, ". {n}"),
            Instruction::Input(n) => write!(f, ", {n}"),
            Instruction::LoopStart(target) => write!(f, "[ {target}"),
            Instruction::LoopEnd(target) => write!(f, "] {target}"),
        }
    }
}

/// A compiled program: an ordered sequence of instructions, immutable once
/// the compiler hands it over.
///
/// Next to the instructions the program keeps the source byte offset of the
/// first operator merged into each instruction, so an error reported
/// against an instruction index can point back into the source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Program {
    code: Box<[Instruction]>,
    offsets: Box<[usize]>,
}

impl Program {
    pub(crate) fn new(code: Vec<Instruction>, offsets: Vec<usize>) -> Self {
        debug_assert_eq!(code.len(), offsets.len());
        Self {
            code: code.into_boxed_slice(),
            offsets: offsets.into_boxed_slice(),
        }
    }

    /// Number of compiled instructions.
    pub fn len(&self) -> usize {
        self.code.len()
    }

    pub fn is_empty(&self) -> bool {
        self.code.is_empty()
    }

    /// The compiled instruction sequence.
    pub fn instructions(&self) -> &[Instruction] {
        &self.code
    }

    /// Source byte offset of the instruction at `ip`, if `ip` is in range.
    pub fn source_offset(&self, ip: usize) -> Option<usize> {
        self.offsets.get(ip).copied()
    }

    /// Whether the program reads from its input source at all. The CLI uses
    /// this to decide whether the terminal needs raw mode.
    pub fn reads_input(&self) -> bool {
        self.code
            .iter()
            .any(|instruction| matches!(instruction, Instruction::Input(_)))
    }
}

impl Index<usize> for Program {
    type Output = Instruction;

    fn index(&self, index: usize) -> &Instruction {
        &self.code[index]
    }
}
