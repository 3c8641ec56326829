#[cfg(target_os = "linux")]
use std::os::linux::fs::MetadataExt;

use std::{
    io::{self, Read, Write},
    path::{Path, PathBuf},
    process::ExitCode,
};

use thiserror::Error;
use tracing::{debug, trace};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use bftape::{
    compile,
    settings::{EofPolicy, PointerPolicy, Settings, DEFAULT_TAPE_SIZE},
    CompileError, ExecuteCallbackResult, ExecutionError, Interpreter,
};
use clap::{Parser, ValueEnum};

#[derive(Debug, Error)]
pub enum ProgramError {
    #[error("IO error: {0}")]
    IoError(#[from] io::Error),
    #[error("Compile error: {0}")]
    CompileError(#[from] CompileError),
    #[error("Execution error: {0}")]
    ExecutionError(#[from] ExecutionError),
}

impl ProgramError {
    /// Process exit status for this error.
    fn exit_status(&self) -> u8 {
        match self {
            ProgramError::CompileError(_) => 1,
            ProgramError::IoError(_) => 2,
            ProgramError::ExecutionError(ExecutionError::EmptyTape) => 4,
            ProgramError::ExecutionError(_) => 3,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
enum Mode {
    /// Run the program
    Run,
    /// Print the compiled instructions with their jump targets
    Listing,
    /// Print the program source without comments
    Source,
}

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Input Brainfuck source file
    #[arg(default_value = "hw.bf")]
    input_file: PathBuf,

    /// Select program mode
    #[arg(short, long, value_name = "MODE")]
    mode: Option<Mode>,

    /// Number of cells on the tape
    #[arg(short, long, default_value_t = DEFAULT_TAPE_SIZE)]
    tape_size: usize,

    /// What to do when the data pointer leaves the tape
    #[arg(long, value_enum, default_value_t = PointerPolicy::Fault)]
    pointer_policy: PointerPolicy,

    /// What input stores once input is exhausted
    #[arg(long, value_enum, default_value_t = EofPolicy::Zero)]
    eof_policy: EofPolicy,

    /// Abort after executing this many instructions
    #[arg(long, value_name = "N")]
    max_steps: Option<u64>,

    /// Enable debug logging
    #[arg(long, default_value_t = false)]
    debug: bool,

    /// Log every executed instruction (very slow)
    #[arg(long, default_value_t = false)]
    trace: bool,
}

fn init_logging(args: &Args) {
    let default_filter = if args.trace {
        "bftape=trace"
    } else if args.debug {
        "bftape=debug"
    } else {
        "bftape=warn"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

fn load_source(path: &Path) -> Result<Vec<u8>, io::Error> {
    let mut file = std::fs::File::open(path)?;

    #[cfg(target_os = "linux")]
    let mut buf = Vec::with_capacity(file.metadata()?.st_size() as usize);
    #[cfg(not(target_os = "linux"))]
    let mut buf = Vec::new();

    file.read_to_end(&mut buf)?;
    Ok(buf)
}

fn run(
    args: &Args,
    input: &mut impl Read,
    output: &mut impl Write,
) -> Result<(), ProgramError> {
    let source = load_source(&args.input_file)?;
    let program = compile(source.as_slice())?;

    match args.mode.unwrap_or(Mode::Run) {
        Mode::Run => {
            let settings = Settings::default()
                .with_tape_size(args.tape_size)
                .with_pointer_policy(args.pointer_policy)
                .with_eof_policy(args.eof_policy);
            let mut interpreter = Interpreter::new(settings)?;
            let max_steps = args.max_steps.unwrap_or(u64::MAX);
            let mut steps: u64 = 0;
            interpreter.execute(
                &program,
                input,
                output,
                &mut |data, tape, tape_ptr| {
                    if steps >= max_steps {
                        return ExecuteCallbackResult::Abort;
                    }
                    steps += 1;
                    trace!(
                        pc = data.pc,
                        op = %data.instruction.opcode,
                        tape_ptr = %tape_ptr,
                        cell = %tape.get(tape_ptr),
                        "step"
                    );
                    ExecuteCallbackResult::Continue
                },
            )?;
        }
        Mode::Listing => write!(output, "{}", program.listing())?,
        Mode::Source => writeln!(output, "{}", program.to_source())?,
    }

    Ok(())
}

/// Errors are always printed, whatever the log filter says.
fn report_error(path: &Path, err: &ProgramError, out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "{}: {err}", path.display())
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(&args);

    match run(&args, &mut io::stdin().lock(), &mut io::stdout().lock()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            debug!(?err, "exiting with error");
            // Nothing useful left to do if stderr itself fails.
            let _ = report_error(&args.input_file, &err, &mut io::stderr().lock());
            ExitCode::from(err.exit_status())
        }
    }
}
