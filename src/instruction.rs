//! Types and functions for compiled programs.

use std::fmt::{Display, Write};
use std::ops::Index;

/// The eight operations of the tape machine.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
pub enum Opcode {
    /// `>`
    IncPtr,
    /// `<`
    DecPtr,
    /// `+`
    IncVal,
    /// `-`
    DecVal,
    /// `.`
    Output,
    /// `,`
    Input,
    /// `[`: jump to the matching `]` if the current cell is zero
    LoopFwd,
    /// `]`: jump back to the matching `[` if the current cell is non-zero
    LoopBack,
}

impl Opcode {
    /// Map a source character to an opcode. Anything else is a comment.
    pub fn from_symbol(c: u8) -> Option<Self> {
        match c {
            b'>' => Some(Self::IncPtr),
            b'<' => Some(Self::DecPtr),
            b'+' => Some(Self::IncVal),
            b'-' => Some(Self::DecVal),
            b'.' => Some(Self::Output),
            b',' => Some(Self::Input),
            b'[' => Some(Self::LoopFwd),
            b']' => Some(Self::LoopBack),
            _ => None,
        }
    }

    pub fn symbol(&self) -> char {
        match self {
            Self::IncPtr => '>',
            Self::DecPtr => '<',
            Self::IncVal => '+',
            Self::DecVal => '-',
            Self::Output => '.',
            Self::Input => ',',
            Self::LoopFwd => '[',
            Self::LoopBack => ']',
        }
    }

    /// Is this one of the two jumping opcodes?
    pub fn is_jump(&self) -> bool {
        matches!(self, Self::LoopFwd | Self::LoopBack)
    }
}

impl Display for Opcode {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.write_char(self.symbol())
    }
}

/// A single compiled instruction.
///
/// `operand` is only meaningful for the loop opcodes, where it is the
/// absolute index of the matching bracket.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
pub struct Instruction {
    pub opcode: Opcode,
    pub operand: usize,
}

impl Instruction {
    pub fn new(opcode: Opcode) -> Self {
        Self { opcode, operand: 0 }
    }

    pub fn with_target(opcode: Opcode, target: usize) -> Self {
        Self {
            opcode,
            operand: target,
        }
    }
}

/// A compiled program. Only produced by [`crate::compile`].
#[derive(Debug, PartialEq, Eq, Clone, Default, Hash)]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
pub struct Program {
    instructions: Vec<Instruction>,
}

impl Program {
    pub(crate) fn from_instructions(instructions: Vec<Instruction>) -> Self {
        Self { instructions }
    }

    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    pub fn get(&self, pc: usize) -> Option<&Instruction> {
        self.instructions.get(pc)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Instruction> {
        self.instructions.iter()
    }

    /// Render the program back to source, without any comments.
    pub fn to_source(&self) -> String {
        self.iter().map(|instr| instr.opcode.symbol()).collect()
    }

    /// A human readable listing, one instruction per line.
    pub fn listing(&self) -> String {
        let width = self.len().max(1).to_string().len();
        let mut result = String::new();
        for (pc, instr) in self.iter().enumerate() {
            // Writing to a String cannot fail.
            let _ = if instr.opcode.is_jump() {
                writeln!(
                    result,
                    "{pc:>width$}  {}  {:?} -> {}",
                    instr.opcode, instr.opcode, instr.operand
                )
            } else {
                writeln!(result, "{pc:>width$}  {}  {:?}", instr.opcode, instr.opcode)
            };
        }
        result
    }
}

impl Index<usize> for Program {
    type Output = Instruction;

    fn index(&self, pc: usize) -> &Self::Output {
        &self.instructions[pc]
    }
}
