//! # bftape - A Brainfuck compiler and tape virtual machine
//!
//! Source is compiled in a single pass into a flat [`Program`] where every
//! loop bracket already knows the index of its partner. The [`Interpreter`]
//! then runs that program with a plain fetch-execute loop over a fixed size
//! [`tape::Tape`].
//!
//! **NOTE! This is primarily a command line program. The library API is not
//! considered stable.**

// Re-export some symbols.
pub use compiler::compile;
pub use compiler::CompileError;
pub use instruction::Instruction;
pub use instruction::Opcode;
pub use instruction::Program;
pub use interpreter::ExecuteCallbackData;
pub use interpreter::ExecuteCallbackResult;
pub use interpreter::ExecutionError;
pub use interpreter::Interpreter;
pub use types::Cell;
pub use types::TapeAddr;
pub use types::TapeAddrError;

mod compiler;
pub mod instruction;
mod interpreter;
pub mod settings;
pub mod tape;
#[doc(hidden)]
pub mod test_utils;
pub mod types;
