//! A compiling Brainfuck interpreter.
//!
//! Source text is compiled in a single pass into run-length encoded
//! bytecode with absolute jump targets, then executed on a fixed-size tape
//! of byte cells. The observable behavior is the classic one:
//!
//! - cell arithmetic wraps modulo 256
//! - moving the data pointer off either end of the tape aborts the run;
//!   the pointer is never clamped or wrapped
//! - reading past the end of input stores a zero byte
//! - unbalanced brackets are rejected at compile time, before anything runs
//!
//! # Quick start
//!
//! ```
//! use bfc::{Machine, compile};
//!
//! let program = compile(b"+++.").unwrap();
//! let mut output = Vec::new();
//! let mut machine = Machine::new(&program, std::io::empty(), &mut output);
//! machine.run().unwrap();
//! assert_eq!(output, [3]);
//! ```

pub mod cli_util;
pub mod compiler;
pub mod config;
pub mod machine;
pub mod program;
pub mod term;

pub use compiler::{CompileError, compile};
pub use machine::{DEFAULT_TAPE_LEN, Machine, RuntimeError};
pub use program::{Cell, Instruction, Program};
