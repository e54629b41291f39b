use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
    process::{Command, Output, Stdio},
};

use crate::{Error, FileError};

/// Tag holding the moment the picture was taken.
pub const CAPTURE_TAG: &str = "DateTimeOriginal";
/// Written alongside the capture tag with `--all-dates`.
pub const EXTRA_DATE_TAGS: [&str; 2] = ["CreateDate", "ModifyDate"];

/// Handle on the external exiftool program.
#[derive(Debug, Clone)]
pub struct Exiftool {
    program: PathBuf,
}

impl Exiftool {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Exiftool {
            program: program.into(),
        }
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    /// Runs `exiftool -ver`, so a missing tool is caught before any file is touched.
    pub fn version(&self) -> Result<String, Error> {
        let output = Command::new(&self.program)
            .arg("-ver")
            .stdin(Stdio::null())
            .output()
            .map_err(|err| match err.kind() {
                ErrorKind::NotFound => Error::ToolNotFound {
                    program: self.program.clone(),
                },
                _ => Error::ToolUnusable {
                    program: self.program.clone(),
                    reason: err.to_string(),
                },
            })?;

        if !output.status.success() {
            return Err(Error::ToolUnusable {
                program: self.program.clone(),
                reason: diagnostic(&output),
            });
        }
        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }

    /// Prints the raw value of `tag`, empty when the file does not carry it.
    pub fn read_tag(&self, tag: &str, file: &Path) -> Result<String, FileError> {
        let output = Command::new(&self.program)
            .args(["-s", "-s", "-s"])
            .arg(format!("-{}", tag))
            .arg(file_arg(file))
            .stdin(Stdio::null())
            .output()?;

        if !output.status.success() {
            return Err(FileError::ReadFailed {
                stderr: diagnostic(&output),
            });
        }
        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }

    /// Command that sets every tag in `tags` to `value` on `file`.
    pub fn write_command(
        &self,
        tags: &[&str],
        value: &str,
        file: &Path,
        overwrite: bool,
    ) -> Command {
        let mut cmd = Command::new(&self.program);
        if overwrite {
            cmd.arg("-overwrite_original");
        }
        for tag in tags {
            cmd.arg(format!("-{}={}", tag, value));
        }
        cmd.arg(file_arg(file)).stdin(Stdio::null());
        cmd
    }

    pub fn write_tags(
        &self,
        tags: &[&str],
        value: &str,
        file: &Path,
        overwrite: bool,
    ) -> Result<(), FileError> {
        let output = self.write_command(tags, value, file, overwrite).output()?;
        if !output.status.success() {
            return Err(FileError::WriteFailed {
                stderr: diagnostic(&output),
            });
        }
        Ok(())
    }
}

impl Default for Exiftool {
    fn default() -> Self {
        Exiftool::new("exiftool")
    }
}

/// A relative path starting with `-` would be read as an option.
fn file_arg(file: &Path) -> PathBuf {
    if file.is_relative() && file.as_os_str().to_string_lossy().starts_with('-') {
        Path::new(".").join(file)
    } else {
        file.to_path_buf()
    }
}

/// stderr if there is any, otherwise stdout, otherwise the exit status.
fn diagnostic(output: &Output) -> String {
    let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
    if !stderr.is_empty() {
        return stderr;
    }
    let stdout = String::from_utf8_lossy(&output.stdout).trim().to_string();
    if !stdout.is_empty() {
        return stdout;
    }
    format!("exiftool exited with {}", output.status)
}
