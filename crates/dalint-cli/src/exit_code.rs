//! Exit codes for the dalint CLI.
//!
//! Distinct codes let scripts and CI systems tell validation findings apart
//! from infrastructure failures.

/// Exit codes used by the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Success - no errors in any checked file
    Success = 0,
    /// One or more validation errors found
    FindingsFound = 1,
    /// I/O error (file or directory could not be read)
    IoError = 2,
}

impl ExitCode {
    /// Exit the process with this exit code.
    pub fn exit(self) -> ! {
        std::process::exit(self as i32)
    }

    /// Get the numeric value of this exit code.
    #[must_use]
    pub const fn code(self) -> i32 {
        self as i32
    }
}

impl std::fmt::Display for ExitCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Success => write!(f, "success"),
            Self::FindingsFound => write!(f, "validation errors found"),
            Self::IoError => write!(f, "I/O error"),
        }
    }
}
