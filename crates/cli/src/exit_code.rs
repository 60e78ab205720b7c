//! Exit code definitions for the s3cp CLI
//!
//! Scripts (for example `find ... | xargs s3cp -d s3://bucket/dir/`) only
//! need to know whether everything was copied, so there are two codes.

/// Exit codes for the s3cp CLI application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Every source was copied
    Success = 0,

    /// A setup error occurred or at least one source failed
    GeneralError = 1,
}

impl ExitCode {
    /// Convert exit code to i32 for use with std::process::exit
    #[inline]
    pub const fn as_i32(self) -> i32 {
        self as i32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_code_values() {
        assert_eq!(ExitCode::Success.as_i32(), 0);
        assert_eq!(ExitCode::GeneralError.as_i32(), 1);
    }
}
