use crate::{
    instruction::Program,
    settings::{PointerPolicy, Settings},
    tape::Tape,
    ExecuteCallbackResult, ExecutionError, Interpreter, TapeAddr,
};

/// Programs are aborted after this many instructions.
pub const STEP_LIMIT: u64 = 500000;

#[derive(Debug, PartialEq)]
pub struct ExecutionState {
    pub result: Option<Result<(), ExecutionError>>,
    pub tape: Tape,
    pub tape_ptr: TapeAddr,
    pub output: Vec<u8>,
    pub steps: u64,
}

impl Default for ExecutionState {
    fn default() -> Self {
        Self {
            result: None,
            tape: Tape::new(0, PointerPolicy::Fault),
            tape_ptr: TapeAddr::default(),
            output: Default::default(),
            steps: 0,
        }
    }
}

pub fn test_execute(program: &Program, input: &mut impl std::io::Read) -> ExecutionState {
    test_execute_with(program, input, Settings::default())
}

pub fn test_execute_with(
    program: &Program,
    input: &mut impl std::io::Read,
    settings: Settings,
) -> ExecutionState {
    let mut exec = ExecutionState::default();
    let mut interpreter = match Interpreter::new(settings) {
        Ok(interpreter) => interpreter,
        Err(err) => {
            exec.result = Some(Err(err));
            return exec;
        }
    };
    let mut steps = 0;
    exec.result = Some(interpreter.execute(
        program,
        input,
        &mut exec.output,
        &mut |_, _, _| {
            steps += 1;
            if steps > STEP_LIMIT {
                ExecuteCallbackResult::Abort
            } else {
                ExecuteCallbackResult::Continue
            }
        },
    ));
    exec.steps = steps;
    (exec.tape, exec.tape_ptr) = interpreter.into_parts();

    exec
}
