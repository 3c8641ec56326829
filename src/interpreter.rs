use std::io::Read;
use std::io::Write;

use thiserror::Error;
use tracing::debug;

use crate::instruction::{Instruction, Opcode, Program};
use crate::settings::{EofPolicy, Settings};
use crate::tape::Tape;
use crate::Cell;
use crate::TapeAddr;
use crate::TapeAddrError;

/// Error type for execution
#[derive(Debug, Error)]
pub enum ExecutionError {
    /// Tape pointer error.
    #[error("Tape pointer error: {0}")]
    TapeError(#[from] TapeAddrError),
    /// Io error during program execution.
    #[error("Unexpected IO Error: {0}")]
    IoError(#[from] std::io::Error),
    /// Aborted by callback
    #[error("Callback aborted execution")]
    Aborted,
    /// Settings asked for a tape without cells.
    #[error("Tape size must be at least one cell")]
    EmptyTape,
}

impl PartialEq for ExecutionError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::IoError(l0), Self::IoError(r0)) => l0.kind() == r0.kind(),
            (Self::TapeError(l0), Self::TapeError(r0)) => l0 == r0,
            _ => core::mem::discriminant(self) == core::mem::discriminant(other),
        }
    }
}

/// Data sent to execution callback, before the instruction runs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExecuteCallbackData<'program> {
    /// Program counter of the instruction
    pub pc: usize,
    pub instruction: &'program Instruction,
}

/// Reply type for callback
pub enum ExecuteCallbackResult {
    /// Continue execution
    Continue,
    /// Abort execution
    Abort,
}

/// The virtual machine: a tape and a data pointer.
#[derive(Debug, Clone)]
pub struct Interpreter {
    tape: Tape,
    tape_ptr: TapeAddr,
    settings: Settings,
}

impl Interpreter {
    pub fn new(settings: Settings) -> Result<Self, ExecutionError> {
        if settings.tape_size == 0 {
            return Err(ExecutionError::EmptyTape);
        }
        Ok(Self {
            tape: Tape::new(settings.tape_size, settings.pointer_policy),
            tape_ptr: TapeAddr::default(),
            settings,
        })
    }

    pub fn tape(&self) -> &Tape {
        &self.tape
    }

    pub fn tape_ptr(&self) -> TapeAddr {
        self.tape_ptr
    }

    pub fn into_parts(self) -> (Tape, TapeAddr) {
        (self.tape, self.tape_ptr)
    }

    /// Fetch-decode-execute loop.
    ///
    /// A taken jump sets `pc` to the matching bracket, and the increment at
    /// the end of every step then moves past it. Execution ends when `pc`
    /// reaches the end of the program.
    pub fn execute<'program, F>(
        &mut self,
        program: &'program Program,
        input: &mut impl Read,
        output: &mut impl Write,
        callback: &mut F,
    ) -> Result<(), ExecutionError>
    where
        F: FnMut(ExecuteCallbackData<'program>, &Tape, TapeAddr) -> ExecuteCallbackResult,
    {
        debug!(
            instructions = program.len(),
            tape_size = self.tape.len(),
            "executing program"
        );
        let mut pc = 0;
        let mut steps: u64 = 0;
        while let Some(instr) = program.get(pc) {
            match callback(
                ExecuteCallbackData {
                    pc,
                    instruction: instr,
                },
                &self.tape,
                self.tape_ptr,
            ) {
                ExecuteCallbackResult::Continue => (),
                ExecuteCallbackResult::Abort => return Err(ExecutionError::Aborted),
            }
            match instr.opcode {
                Opcode::IncPtr => self.tape_ptr = self.tape.right(self.tape_ptr)?,
                Opcode::DecPtr => self.tape_ptr = self.tape.left(self.tape_ptr)?,
                Opcode::IncVal => self.tape.try_modify(self.tape_ptr, 1.into())?,
                Opcode::DecVal => self.tape.try_modify(self.tape_ptr, (-1).into())?,
                Opcode::Output => {
                    let tmp: [u8; 1] = [self.tape.try_get(self.tape_ptr)?.low_byte()];
                    output.write_all(&tmp)?;
                }
                Opcode::Input => self.input(input, output)?,
                Opcode::LoopFwd => {
                    if self.tape.try_get(self.tape_ptr)?.is_zero() {
                        pc = instr.operand;
                    }
                }
                Opcode::LoopBack => {
                    if !self.tape.try_get(self.tape_ptr)?.is_zero() {
                        pc = instr.operand;
                    }
                }
            }
            // Operands of hand built programs are not bounded by the program length.
            pc = pc.saturating_add(1);
            steps += 1;
        }
        output.flush()?;
        debug!(steps, tape_ptr = %self.tape_ptr, "execution finished");
        Ok(())
    }

    fn input(
        &mut self,
        input: &mut impl Read,
        output: &mut impl Write,
    ) -> Result<(), ExecutionError> {
        let mut tmp: [u8; 1] = [0; 1];
        // We may need to flush output here if there wasn't a newline.
        output.flush()?;
        let value = match input.read(&mut tmp) {
            Ok(0) => match self.settings.eof_policy {
                EofPolicy::Zero => Some(Cell::ZERO),
                EofPolicy::Unchanged => None,
                EofPolicy::NegativeOne => Some((-1).into()),
            },
            Ok(_) => Some(tmp[0].into()),
            Err(err) => return Err(ExecutionError::IoError(err)),
        };
        if let Some(value) = value {
            self.tape.try_set(self.tape_ptr, value)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;

    use crate::compile;
    use crate::settings::{EofPolicy, PointerPolicy, Settings};
    use crate::{Cell, TapeAddr, TapeAddrError};

    use super::{ExecuteCallbackResult, ExecutionError, Interpreter};

    fn run(src: &[u8], input: &[u8], settings: Settings) -> (Interpreter, Vec<u8>) {
        let program = compile(src).unwrap();
        let mut interpreter = Interpreter::new(settings).unwrap();
        let mut input: VecDeque<u8> = input.iter().copied().collect();
        let mut output: Vec<u8> = Vec::new();
        interpreter
            .execute(
                &program,
                &mut input,
                &mut output,
                &mut |_, _, _| ExecuteCallbackResult::Continue,
            )
            .unwrap();
        (interpreter, output)
    }

    #[test]
    fn test_execute() {
        let (interpreter, output) = run(b"+++>-->++[-]>+<>>>>>,.<,,", b"A ", Settings::default());
        let tape = interpreter.tape();
        assert_eq!(interpreter.tape_ptr(), TapeAddr(6));
        assert_eq!(tape.get(TapeAddr(0)), 3.into());
        assert_eq!(tape.get(TapeAddr(1)), (-2).into());
        assert_eq!(tape.get(TapeAddr(2)), 0.into());
        assert_eq!(tape.get(TapeAddr(3)), 1.into());
        assert_eq!(tape.get(TapeAddr(6)), 0.into());
        assert_eq!(tape.get(TapeAddr(7)), 65.into());
        assert_eq!(output, vec![65]);
    }

    #[test]
    fn test_scenarios() {
        let (interpreter, _) = run(b"++++", b"", Settings::default());
        assert_eq!(interpreter.tape().get(TapeAddr(0)), 4.into());

        let (interpreter, _) = run(b"++>+", b"", Settings::default());
        assert_eq!(interpreter.tape().get(TapeAddr(0)), 2.into());
        assert_eq!(interpreter.tape().get(TapeAddr(1)), 1.into());
        assert_eq!(interpreter.tape_ptr(), TapeAddr(1));

        let (interpreter, _) = run(b"+[-]", b"", Settings::default());
        assert_eq!(interpreter.tape().get(TapeAddr(0)), Cell::ZERO);

        // Loop body skipped entirely on a zero cell.
        let (interpreter, output) = run(b"[+.]+", b"", Settings::default());
        assert_eq!(interpreter.tape().get(TapeAddr(0)), 1.into());
        assert!(output.is_empty());
    }

    #[test]
    fn test_nested_loops() {
        // 3 * 4 via nested loops, then echo input until end of input.
        let (interpreter, output) = run(b"+++[>++++<-]>.,[.,]", b"ok", Settings::default());
        assert_eq!(output, b"\x0cok");
        assert_eq!(interpreter.tape_ptr(), TapeAddr(1));
        assert_eq!(interpreter.tape().get(TapeAddr(0)), Cell::ZERO);
    }

    #[test]
    fn test_cell_wraps() {
        let (interpreter, output) = run(b"-.", b"", Settings::default());
        assert_eq!(interpreter.tape().get(TapeAddr(0)), (-1).into());
        assert_eq!(output, vec![0xff]);
    }

    #[test]
    fn test_eof_policies() {
        let (interpreter, _) = run(b"+++,", b"", Settings::default());
        assert_eq!(interpreter.tape().get(TapeAddr(0)), Cell::ZERO);

        let settings = Settings::default().with_eof_policy(EofPolicy::Unchanged);
        let (interpreter, _) = run(b"+++,", b"", settings);
        assert_eq!(interpreter.tape().get(TapeAddr(0)), 3.into());

        let settings = Settings::default().with_eof_policy(EofPolicy::NegativeOne);
        let (interpreter, _) = run(b"+++,>,", b"\xfe", settings);
        assert_eq!(interpreter.tape().get(TapeAddr(0)), 254.into());
        assert_eq!(interpreter.tape().get(TapeAddr(1)), (-1).into());
    }

    #[test]
    fn test_pointer_fault() {
        let program = compile(b"+<+").unwrap();
        let mut interpreter = Interpreter::new(Settings::default()).unwrap();
        let result = interpreter.execute(
            &program,
            &mut std::io::empty(),
            &mut std::io::sink(),
            &mut |_, _, _| ExecuteCallbackResult::Continue,
        );
        assert_eq!(
            result,
            Err(ExecutionError::TapeError(TapeAddrError::TapeAddrIsNegative))
        );
        // The first increment happened, the second did not.
        assert_eq!(interpreter.tape().get(TapeAddr(0)), 1.into());

        let program = compile(b">>>").unwrap();
        let mut interpreter = Interpreter::new(Settings::default().with_tape_size(3)).unwrap();
        let result = interpreter.execute(
            &program,
            &mut std::io::empty(),
            &mut std::io::sink(),
            &mut |_, _, _| ExecuteCallbackResult::Continue,
        );
        assert_eq!(
            result,
            Err(ExecutionError::TapeError(TapeAddrError::TapeAddrTooLarge))
        );
        assert_eq!(interpreter.tape_ptr(), TapeAddr(2));
    }

    #[test]
    fn test_pointer_wrap() {
        let settings = Settings::default()
            .with_tape_size(4)
            .with_pointer_policy(PointerPolicy::Wrap);
        let (interpreter, _) = run(b"<+>>+", b"", settings);
        assert_eq!(interpreter.tape_ptr(), TapeAddr(1));
        assert_eq!(interpreter.tape().get(TapeAddr(3)), 1.into());
        assert_eq!(interpreter.tape().get(TapeAddr(1)), 1.into());
    }

    #[test]
    fn test_empty_tape() {
        assert_eq!(
            Interpreter::new(Settings::default().with_tape_size(0)).unwrap_err(),
            ExecutionError::EmptyTape
        );
    }

    #[test]
    fn test_abort() {
        let program = compile(b"+[]").unwrap();
        let mut interpreter = Interpreter::new(Settings::default()).unwrap();
        let mut count = 0;
        let result = interpreter.execute(
            &program,
            &mut std::io::empty(),
            &mut std::io::sink(),
            &mut |data, _, _| {
                count += 1;
                if count > 100 {
                    ExecuteCallbackResult::Abort
                } else {
                    assert!(data.pc < 3);
                    ExecuteCallbackResult::Continue
                }
            },
        );
        assert_eq!(result, Err(ExecutionError::Aborted));
        assert_eq!(count, 101);
    }
}
