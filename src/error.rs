use std::path::PathBuf;

/// Errors that stop the whole run.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("'{program}' not found, is exiftool installed and on the PATH?")]
    ToolNotFound { program: PathBuf },

    #[error("unable to run '{program}': {reason}")]
    ToolUnusable { program: PathBuf, reason: String },

    #[error("{failed} of {total} files could not be updated")]
    FilesFailed { failed: usize, total: usize },
}

/// Why a single file could not be updated. These never abort the batch.
#[derive(thiserror::Error, Debug)]
pub enum FileError {
    #[error("unable to run exiftool: {0}")]
    Spawn(#[from] std::io::Error),

    #[error("reading capture time failed: {stderr}")]
    ReadFailed { stderr: String },

    #[error("no capture time in metadata")]
    MissingTimestamp,

    #[error("unrecognised capture time '{0}'")]
    MalformedTimestamp(String),

    #[error("{year:04}-{month:02}-{day:02} is not a valid date")]
    InvalidDate { year: i32, month: u32, day: u32 },

    #[error("writing capture time failed: {stderr}")]
    WriteFailed { stderr: String },
}
