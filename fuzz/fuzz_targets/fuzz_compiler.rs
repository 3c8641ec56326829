#![no_main]

use libfuzzer_sys::fuzz_target;

use bftape::{compile, CompileError};

fn check_loop_balance(data: &[u8]) -> Option<CompileError> {
    let loop_counts = data.iter().filter_map(|v| match v {
        b'[' => Some(1),
        b']' => Some(-1),
        _ => None,
    });
    let mut acc = 0;
    for e in loop_counts {
        acc += e;
        if acc < 0 {
            return Some(CompileError::UnmatchedClose);
        }
    }
    if acc != 0 {
        return Some(CompileError::UnmatchedOpen);
    }
    None
}

fuzz_target!(|data: &[u8]| {
    match compile(data) {
        Ok(program) => {
            assert_eq!(check_loop_balance(data), None);
            let recognised = data.iter().filter(|c| b"><+-.,[]".contains(*c)).count();
            assert_eq!(program.len(), recognised);
            for (pc, instr) in program.iter().enumerate() {
                if instr.opcode.is_jump() {
                    assert_eq!(program[instr.operand].operand, pc);
                }
            }
        }
        Err(e @ CompileError::UnmatchedOpen) | Err(e @ CompileError::UnmatchedClose) => {
            assert_eq!(check_loop_balance(data), Some(e));
        }
    }
});
