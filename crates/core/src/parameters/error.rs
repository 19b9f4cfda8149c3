//! Parameter error types
//!
//! Errors from parameter store operations and from saving the calibration
//! record.

/// Errors from parameter store operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParameterError {
    /// Name longer than [`PARAM_NAME_LEN`](super::PARAM_NAME_LEN)
    NameTooLong,
    /// `set` on a name that was never registered
    UnknownParameter,
    /// All [`MAX_PARAMS`](super::MAX_PARAMS) slots are taken
    StoreFull,
    /// Parameter is registered read-only
    ReadOnly,
    /// Backing storage rejected the write
    WriteFailed,
}

impl ParameterError {
    pub const fn as_str(&self) -> &'static str {
        match self {
            ParameterError::NameTooLong => "parameter name too long",
            ParameterError::UnknownParameter => "unknown parameter",
            ParameterError::StoreFull => "parameter store full",
            ParameterError::ReadOnly => "parameter is read-only",
            ParameterError::WriteFailed => "parameter write failed",
        }
    }
}

impl core::fmt::Display for ParameterError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}
