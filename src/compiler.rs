use thiserror::Error;
use tracing::debug;

use crate::instruction::{Instruction, Opcode, Program};

/// Errors during compilation
#[derive(Debug, Error, Copy, Clone, PartialEq, Eq, Hash)]
pub enum CompileError {
    /// A `]` with no open `[` before it.
    #[error("Unmatched end of loop (]) encountered")]
    UnmatchedClose,
    /// One or more `[` never closed.
    #[error("Unmatched start of loop ([) at end of input")]
    UnmatchedOpen,
}

/// Scans source code, producing a stream of opcodes.
fn lexer(source_code: &'_ [u8]) -> impl Iterator<Item = Opcode> + '_ {
    // Unknown characters are comments and never reach the compiler.
    source_code.iter().filter_map(|c| Opcode::from_symbol(*c))
}

/// Compile source code into a program with resolved jump targets.
///
/// This is a single pass: `[` is emitted with a placeholder operand and its
/// index pushed on a stack. The matching `]` pops it, points back at it, and
/// patches the `[` to point forward at the `]`.
pub fn compile(source_code: &[u8]) -> Result<Program, CompileError> {
    let mut instructions: Vec<Instruction> = vec![];
    let mut loop_stack: Vec<usize> = vec![];

    for opcode in lexer(source_code) {
        let pc = instructions.len();
        match opcode {
            Opcode::LoopFwd => {
                loop_stack.push(pc);
                instructions.push(Instruction::new(opcode));
            }
            Opcode::LoopBack => {
                let start = loop_stack.pop().ok_or(CompileError::UnmatchedClose)?;
                instructions.push(Instruction::with_target(opcode, start));
                instructions[start].operand = pc;
            }
            _ => instructions.push(Instruction::new(opcode)),
        }
    }
    if !loop_stack.is_empty() {
        return Err(CompileError::UnmatchedOpen);
    }

    debug!(
        source_len = source_code.len(),
        instructions = instructions.len(),
        "compiled program"
    );
    Ok(Program::from_instructions(instructions))
}
