//! Error types for the library layer.
//!
//! Commands and the binary wrap these in `anyhow` with context.

use thiserror::Error;

/// The single error kind raised by [`crate::timecode::TimeCode`] operations.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeCodeError {
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),
}

/// Failure to read a `TimeCode` from `H:M:S` or `H:M` text.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TimeCodeParseError {
    #[error("expected H:M or H:M:S, got '{0}'")]
    Format(String),
    #[error("invalid number '{0}'")]
    Number(String),
    #[error("{0} must be less than 60")]
    OutOfRange(&'static str),
}

/// Why a launch record did not yield a time of day.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LaunchParseError {
    #[error("record has {found} fields, need column {column}")]
    MissingColumn { column: usize, found: usize },
    #[error("no '{0}' marker in datum")]
    MissingMarker(String),
    #[error("no time token before marker")]
    MissingTime,
    #[error("malformed time '{0}'")]
    MalformedTime(String),
    #[error("time {hours}:{minutes} is not a valid time of day")]
    OutOfRange { hours: u32, minutes: u32 },
}

/// Failure to summarize a launch data set.
#[derive(Error, Debug)]
pub enum LaunchError {
    #[error("No valid time data found.")]
    NoValidData,
    #[error("failed to read launch data")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    TimeCode(#[from] TimeCodeError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_argument_message() {
        let err = TimeCodeError::InvalidArgument("negative duration");
        assert_eq!(err.to_string(), "invalid argument: negative duration");
    }

    #[test]
    fn test_launch_error_from_timecode_error() {
        let err: LaunchError = TimeCodeError::InvalidArgument("division by zero").into();
        assert!(matches!(
            err,
            LaunchError::TimeCode(TimeCodeError::InvalidArgument(_))
        ));
    }
}
