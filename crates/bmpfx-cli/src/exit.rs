//! Process exit status per failure category.

use bmpfx_io::IoError;
use bmpfx_ops::OpsError;
use clap::error::ErrorKind;
use std::process::ExitCode;

/// Exit status of a `bmpfx` run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitStatus {
    /// Filter applied and output written.
    Success = 0,
    /// Bad arguments or unknown filter selector.
    Usage = 1,
    /// Input file could not be opened.
    InputOpen = 2,
    /// Output file could not be created.
    OutputCreate = 3,
    /// Input header truncated.
    MalformedHeader = 4,
    /// Input is not an uncompressed 24-bit BMP.
    UnsupportedFormat = 5,
    /// Pixel or scratch buffer allocation failed.
    Allocation = 6,
    /// Reading pixel data failed.
    ReadIo = 7,
    /// Writing the output failed.
    WriteIo = 8,
}

impl ExitStatus {
    /// Numeric process exit code.
    pub fn code(self) -> u8 {
        self as u8
    }

    /// Classifies an error by the first library error in its chain.
    ///
    /// Errors carrying no library error are treated as usage errors.
    pub fn from_error(err: &anyhow::Error) -> Self {
        for cause in err.chain() {
            if let Some(e) = cause.downcast_ref::<IoError>() {
                return Self::from(e);
            }
            if let Some(e) = cause.downcast_ref::<OpsError>() {
                return Self::from(e);
            }
            if let Some(e) = cause.downcast_ref::<bmpfx_core::Error>() {
                if e.is_allocation_error() {
                    return Self::Allocation;
                }
            }
        }
        Self::Usage
    }
}

/// Status for an argument parse failure. Help and version output succeed.
pub fn parse_status(err: &clap::Error) -> ExitStatus {
    match err.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ExitStatus::Success,
        _ => ExitStatus::Usage,
    }
}

impl From<&IoError> for ExitStatus {
    fn from(err: &IoError) -> Self {
        match err {
            IoError::Open { .. } => Self::InputOpen,
            IoError::Create { .. } => Self::OutputCreate,
            IoError::MalformedHeader(_) => Self::MalformedHeader,
            IoError::UnsupportedFormat(_) => Self::UnsupportedFormat,
            IoError::Read(_) => Self::ReadIo,
            IoError::Write(_) | IoError::HeaderMismatch { .. } => Self::WriteIo,
            // Dimensions too large to index count as allocation failures
            IoError::Allocation(_) => Self::Allocation,
        }
    }
}

impl From<&OpsError> for ExitStatus {
    fn from(err: &OpsError) -> Self {
        match err {
            OpsError::InvalidParameter(_) => Self::Usage,
            OpsError::Allocation(_) => Self::Allocation,
        }
    }
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        ExitCode::from(status.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;
    use std::io;
    use std::path::PathBuf;

    fn io_err() -> io::Error {
        io::Error::new(io::ErrorKind::UnexpectedEof, "eof")
    }

    #[test]
    fn test_codes_are_distinct() {
        let all = [
            ExitStatus::Success,
            ExitStatus::Usage,
            ExitStatus::InputOpen,
            ExitStatus::OutputCreate,
            ExitStatus::MalformedHeader,
            ExitStatus::UnsupportedFormat,
            ExitStatus::Allocation,
            ExitStatus::ReadIo,
            ExitStatus::WriteIo,
        ];
        let codes: Vec<u8> = all.iter().map(|s| s.code()).collect();
        assert_eq!(codes, (0..=8).collect::<Vec<u8>>());
    }

    #[test]
    fn test_io_errors_through_context() {
        let cases = [
            (IoError::Open { path: PathBuf::from("a"), source: io_err() }, ExitStatus::InputOpen),
            (IoError::Create { path: PathBuf::from("b"), source: io_err() }, ExitStatus::OutputCreate),
            (IoError::MalformedHeader("short".into()), ExitStatus::MalformedHeader),
            (IoError::UnsupportedFormat("32 bpp".into()), ExitStatus::UnsupportedFormat),
            (IoError::Read(io_err()), ExitStatus::ReadIo),
            (IoError::Write(io_err()), ExitStatus::WriteIo),
            (
                IoError::Allocation(bmpfx_core::Error::allocation_failed(1 << 40, "oom")),
                ExitStatus::Allocation,
            ),
        ];
        for (err, expected) in cases {
            let result: anyhow::Result<()> = Err(err.into());
            let wrapped = result.context("Failed to load: in.bmp").unwrap_err();
            assert_eq!(ExitStatus::from_error(&wrapped), expected);
        }
    }

    #[test]
    fn test_ops_errors() {
        let err = anyhow::Error::new(OpsError::InvalidParameter("q".into()));
        assert_eq!(ExitStatus::from_error(&err), ExitStatus::Usage);

        let err = anyhow::Error::new(OpsError::Allocation(
            bmpfx_core::Error::allocation_failed(9, "oom"),
        ))
        .context("Failed to apply blur");
        assert_eq!(ExitStatus::from_error(&err), ExitStatus::Allocation);
    }

    #[test]
    fn test_unclassified_is_usage() {
        let err = anyhow::anyhow!("something else");
        assert_eq!(ExitStatus::from_error(&err), ExitStatus::Usage);
    }

    #[test]
    fn test_parse_status() {
        assert_eq!(parse_status(&clap::Error::new(ErrorKind::DisplayHelp)), ExitStatus::Success);
        assert_eq!(parse_status(&clap::Error::new(ErrorKind::DisplayVersion)), ExitStatus::Success);
        for kind in [
            ErrorKind::UnknownArgument,
            ErrorKind::ArgumentConflict,
            ErrorKind::MissingRequiredArgument,
            ErrorKind::TooManyValues,
        ] {
            assert_eq!(parse_status(&clap::Error::new(kind)).code(), 1, "{kind:?}");
        }
    }
}
