#![no_main]

use bftape::settings::Settings;
use bftape::ExecuteCallbackResult;
use bftape::ExecutionError;
use bftape::Interpreter;
use bftape_fuzz::FuzzInputProgram;
use libfuzzer_sys::fuzz_target;

// Programs here do not come from the compiler, so jump targets can be anything.
fuzz_target!(|data: FuzzInputProgram| {
    let program = data.program;
    let mut input = data.input;

    let mut instr_count = 0;
    let mut interpreter = Interpreter::new(Settings::default().with_tape_size(64)).unwrap();
    let mut output: Vec<u8> = Vec::new();
    let exec_result = interpreter.execute(
        &program,
        &mut input,
        &mut output,
        &mut |_, _, _| {
            instr_count += 1;
            if instr_count > 500 {
                ExecuteCallbackResult::Abort
            } else {
                ExecuteCallbackResult::Continue
            }
        },
    );
    match exec_result {
        Ok(_) => (),
        Err(err) => match err {
            ExecutionError::TapeError(_) => (),
            ExecutionError::IoError(_) => (),
            ExecutionError::Aborted => (),
            ExecutionError::EmptyTape => unreachable!(),
        },
    }
});
