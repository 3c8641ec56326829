//! Settings defining how a program is executed

/// Default number of cells on the tape.
pub const DEFAULT_TAPE_SIZE: usize = 65535;

/// What happens when the data pointer leaves the tape.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Default, clap::ValueEnum)]
pub enum PointerPolicy {
    /// Moving before the first or past the last cell is a fatal error.
    #[default]
    Fault,
    /// The pointer wraps around modulo the tape size.
    Wrap,
}

/// What an input instruction stores once the input is exhausted.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Default, clap::ValueEnum)]
pub enum EofPolicy {
    /// Store 0.
    #[default]
    Zero,
    /// Leave the current cell as it is.
    Unchanged,
    /// Store -1.
    NegativeOne,
}

/// Interpreter configuration, fixed before execution begins.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct Settings {
    /// Number of cells. The tape is never resized.
    pub tape_size: usize,
    pub pointer_policy: PointerPolicy,
    pub eof_policy: EofPolicy,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tape_size: DEFAULT_TAPE_SIZE,
            pointer_policy: PointerPolicy::default(),
            eof_policy: EofPolicy::default(),
        }
    }
}

impl Settings {
    pub fn with_tape_size(self, tape_size: usize) -> Self {
        Self { tape_size, ..self }
    }

    pub fn with_pointer_policy(self, pointer_policy: PointerPolicy) -> Self {
        Self {
            pointer_policy,
            ..self
        }
    }

    pub fn with_eof_policy(self, eof_policy: EofPolicy) -> Self {
        Self { eof_policy, ..self }
    }
}

#[cfg(test)]
mod tests {
    use super::{EofPolicy, PointerPolicy, Settings, DEFAULT_TAPE_SIZE};

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.tape_size, DEFAULT_TAPE_SIZE);
        assert_eq!(settings.pointer_policy, PointerPolicy::Fault);
        assert_eq!(settings.eof_policy, EofPolicy::Zero);

        let settings = settings
            .with_tape_size(16)
            .with_pointer_policy(PointerPolicy::Wrap)
            .with_eof_policy(EofPolicy::Unchanged);
        assert_eq!(settings.tape_size, 16);
        assert_eq!(settings.pointer_policy, PointerPolicy::Wrap);
        assert_eq!(settings.eof_policy, EofPolicy::Unchanged);
    }
}
