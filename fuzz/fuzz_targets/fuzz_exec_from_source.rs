#![no_main]

use bftape::{compile, test_utils::test_execute};
use bftape_fuzz::FuzzInputSrc;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: FuzzInputSrc| {
    let Ok(program) = compile(&data.code) else {
        return;
    };
    // Stripping comments must not change behaviour.
    let canonical = compile(program.to_source().as_bytes()).unwrap();
    assert_eq!(canonical, program);

    let exec1 = test_execute(&program, &mut data.input.clone());
    let exec2 = test_execute(&canonical, &mut data.input.clone());
    assert_eq!(exec1, exec2);
});
