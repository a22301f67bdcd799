//! The bytecode execution engine: a fixed-size tape, a data pointer, and an
//! instruction pointer walking a compiled [`Program`].

use std::io::{self, Read, Write};

use crate::program::{Cell, Instruction, Program};

/// Tape length used by [`Machine::new`]: 1024 zero-initialized cells.
pub const DEFAULT_TAPE_LEN: usize = 1024;

/// Errors that abort a run. None of them is recoverable: the machine stops
/// at the failing instruction and stays there.
#[derive(Debug, thiserror::Error)]
pub enum RuntimeError {
    /// A pointer move would leave the tape. Never clamped, never wrapped.
    #[error("data pointer out of bounds at instruction {ip} (ptr={ptr}, tape={len})")]
    OutOfBoundsPointer { ip: usize, ptr: usize, len: usize },

    /// The input source or output sink failed. End of input is not a
    /// failure; it reads as a zero byte.
    #[error("I/O error at instruction {ip}: {source}")]
    Io {
        ip: usize,
        #[source]
        source: io::Error,
    },
}

/// A machine bound to one compiled program.
///
/// The machine owns its run-time state (tape and both pointers) plus the
/// byte input source and output sink, and borrows the program, which is
/// never mutated. Execution is synchronous and single-threaded; the only
/// blocking points are reads from `input` and writes to `output`.
pub struct Machine<'p, R, W> {
    program: &'p Program,
    tape: Vec<Cell>,
    /// Data pointer: index of the current tape cell.
    dp: usize,
    /// Instruction pointer: equals the program length once the run has
    /// terminated normally.
    ip: usize,
    input: R,
    output: W,
}

impl<'p, R: Read, W: Write> Machine<'p, R, W> {
    /// Creates a machine with the default tape of [`DEFAULT_TAPE_LEN`]
    /// zeroed cells.
    pub fn new(program: &'p Program, input: R, output: W) -> Self {
        Self::new_with_tape(program, input, output, DEFAULT_TAPE_LEN)
    }

    /// Creates a machine with a custom tape length. The tape is allocated
    /// once here and never resized.
    ///
    /// # Panics
    ///
    /// Panics if `tape_len` is zero; the data pointer needs at least one
    /// valid cell.
    pub fn new_with_tape(program: &'p Program, input: R, output: W, tape_len: usize) -> Self {
        assert!(tape_len > 0, "tape must hold at least one cell");
        Self {
            program,
            tape: vec![0; tape_len],
            dp: 0,
            ip: 0,
            input,
            output,
        }
    }

    /// Zeroes the tape and rewinds both pointers for a fresh run against
    /// the same program and streams.
    pub fn reset(&mut self) {
        self.tape.fill(0);
        self.dp = 0;
        self.ip = 0;
    }

    /// The tape contents. After a failed run this is the state as of the
    /// failing instruction.
    pub fn tape(&self) -> &[Cell] {
        &self.tape
    }

    /// Current data pointer.
    pub fn data_pointer(&self) -> usize {
        self.dp
    }

    /// Current instruction pointer.
    pub fn instruction_pointer(&self) -> usize {
        self.ip
    }

    /// Executes the program to completion or the first fatal error.
    ///
    /// A finished machine stays finished (running it again is a no-op);
    /// call [`Machine::reset`] to start over.
    pub fn run(&mut self) -> Result<(), RuntimeError> {
        self.execute(false)
    }

    /// Executes the program while printing a step-by-step table of
    /// operations instead of performing I/O: output bytes are narrated
    /// rather than written, and input reads are simulated as end of input
    /// (the cell is set to 0), so a debug run never blocks. The tape and
    /// pointers advance exactly as in a real run.
    pub fn run_debug(&mut self) -> Result<(), RuntimeError> {
        self.execute(true)
    }

    /// Internal executor shared by `run` and `run_debug`.
    fn execute(&mut self, debug: bool) -> Result<(), RuntimeError> {
        let mut step: usize = 0;
        if debug {
            println!("STEP  | IP    | PTR   | CELL | INSTR   | ACTION");
            println!("------+-------+-------+------+---------+------------------------------------");
        }

        while self.ip < self.program.len() {
            let instruction = self.program[self.ip];
            let (ip_before, ptr_before, cell_before) = (self.ip, self.dp, self.tape[self.dp]);
            let mut action: Option<String> = if debug { Some(String::new()) } else { None };

            match instruction {
                Instruction::Increment(count) => {
                    let after = self.tape[self.dp].wrapping_add(count as Cell);
                    self.tape[self.dp] = after;
                    if let Some(a) = action.as_mut() {
                        *a = format!("cell[{ptr_before}]: {cell_before} -> {after}");
                    }
                    self.ip += 1;
                }
                Instruction::Decrement(count) => {
                    let after = self.tape[self.dp].wrapping_sub(count as Cell);
                    self.tape[self.dp] = after;
                    if let Some(a) = action.as_mut() {
                        *a = format!("cell[{ptr_before}]: {cell_before} -> {after}");
                    }
                    self.ip += 1;
                }
                Instruction::MoveRight(count) => {
                    // The pointer must stay inside [0, len); reaching len
                    // is already out.
                    if count >= self.tape.len() - self.dp {
                        return Err(self.out_of_bounds());
                    }
                    self.dp += count;
                    if let Some(a) = action.as_mut() {
                        *a = format!("pointer -> {}", self.dp);
                    }
                    self.ip += 1;
                }
                Instruction::MoveLeft(count) => {
                    if count > self.dp {
                        return Err(self.out_of_bounds());
                    }
                    self.dp -= count;
                    if let Some(a) = action.as_mut() {
                        *a = format!("pointer -> {}", self.dp);
                    }
                    self.ip += 1;
                }
                Instruction::Output(count) => {
                    let byte = self.tape[self.dp];
                    if let Some(a) = action.as_mut() {
                        *a = format!("write byte {byte} x{count} (suppressed)");
                    } else {
                        for _ in 0..count {
                            if let Err(e) = self.output.write_all(&[byte]) {
                                return Err(self.io_error(e));
                            }
                        }
                        if let Err(e) = self.output.flush() {
                            return Err(self.io_error(e));
                        }
                    }
                    self.ip += 1;
                }
                Instruction::Input(count) => {
                    if let Some(a) = action.as_mut() {
                        // No real reads in a debug run; behave as if the
                        // source were exhausted.
                        self.tape[self.dp] = 0;
                        *a = format!("read x{count} simulated as end of input; cell[{ptr_before}] = 0");
                    } else {
                        let mut byte = 0;
                        for _ in 0..count {
                            byte = self.read_byte()?;
                        }
                        self.tape[self.dp] = byte;
                    }
                    self.ip += 1;
                }
                Instruction::LoopStart(target) => {
                    if self.tape[self.dp] == 0 {
                        if let Some(a) = action.as_mut() {
                            *a = format!("cell is 0; skip loop to {target}");
                        }
                        self.ip = target;
                    } else {
                        if let Some(a) = action.as_mut() {
                            *a = "enter loop".to_string();
                        }
                        self.ip += 1;
                    }
                }
                Instruction::LoopEnd(target) => {
                    if self.tape[self.dp] != 0 {
                        if let Some(a) = action.as_mut() {
                            *a = format!("cell != 0; loop back to {target}");
                        }
                        self.ip = target;
                    } else {
                        if let Some(a) = action.as_mut() {
                            *a = "exit loop".to_string();
                        }
                        self.ip += 1;
                    }
                }
            }

            if debug {
                let instr_text = instruction.to_string();
                println!(
                    "{step:<5} | {ip_before:<5} | {ptr_before:<5} | {cell_before:<4} | {instr_text:<7} | {}",
                    action.unwrap_or_default()
                );
                step += 1;
            }
        }

        Ok(())
    }

    /// Reads one byte from the input source. An exhausted source reads as
    /// zero rather than failing.
    fn read_byte(&mut self) -> Result<Cell, RuntimeError> {
        let mut buf = [0u8; 1];
        match self.input.read(&mut buf) {
            Ok(0) => Ok(0), // end of input
            Ok(_) => Ok(buf[0]),
            Err(e) => Err(self.io_error(e)),
        }
    }

    fn out_of_bounds(&self) -> RuntimeError {
        RuntimeError::OutOfBoundsPointer {
            ip: self.ip,
            ptr: self.dp,
            len: self.tape.len(),
        }
    }

    fn io_error(&self, source: io::Error) -> RuntimeError {
        RuntimeError::Io {
            ip: self.ip,
            source,
        }
    }
}
