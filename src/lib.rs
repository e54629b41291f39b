use std::path::{Path, PathBuf};

#[macro_use]
extern crate lazy_static;

use colored::Colorize;

mod cli;
pub use cli::Args;
mod date;
pub use date::{CaptureTime, DateSpec};
mod error;
pub use error::{Error, FileError};
mod exiftool;
pub use exiftool::{Exiftool, CAPTURE_TAG, EXTRA_DATE_TAGS};
mod expand;
pub use expand::expand_paths;

/// A file whose capture time was (or, in a dry run, would be) changed.
#[derive(Debug)]
pub struct Change {
    pub file: PathBuf,
    pub before: CaptureTime,
    pub after: String,
}

/// Outcome of a run that got past argument and tool checks.
#[derive(Debug, Default)]
pub struct Summary {
    pub changes: Vec<Change>,
    pub failures: Vec<(PathBuf, FileError)>,
}

impl Summary {
    pub fn total(&self) -> usize {
        self.changes.len() + self.failures.len()
    }

    /// Turns any per-file failure into an error for the exit status.
    pub fn check(self) -> Result<Self, Error> {
        if self.failures.is_empty() {
            Ok(self)
        } else {
            Err(Error::FilesFailed {
                failed: self.failures.len(),
                total: self.total(),
            })
        }
    }
}

/// Sets the date of every file in `args`, one after the other.
///
/// Bad arguments and a missing exiftool are returned as errors before any
/// file is looked at. Failures on single files are printed and collected in
/// the returned [`Summary`], the remaining files are still processed.
pub fn run(args: Args) -> Result<Summary, Error> {
    let (date, paths) = resolve_arguments(&args)?;
    let files = expand_paths(paths);

    let tool = Exiftool::new(&args.exiftool);
    let version = tool.version()?;
    if !args.quiet {
        println!(
            "{}",
            format!(
                "setting date {} on {} files with {} {}",
                date,
                files.len(),
                tool.program().display(),
                version
            )
            .blue()
        );
    }

    let mut tags = vec![CAPTURE_TAG];
    if args.all_dates {
        tags.extend(EXTRA_DATE_TAGS);
    }

    let mut summary = Summary::default();
    for file in files {
        match change_date(&tool, &date, &file, &tags, &args) {
            Ok(change) => {
                if !args.quiet {
                    println!(
                        "{}",
                        format!("[{}] {} -> {}", file.display(), change.before, change.after)
                            .green()
                    );
                }
                summary.changes.push(change);
            }
            Err(err) => {
                eprintln!(
                    "{}",
                    format!("[{}] error setting date: {}", file.display(), err).red()
                );
                summary.failures.push((file, err));
            }
        }
    }

    if !summary.failures.is_empty() {
        eprintln!(
            "{}",
            format!(
                "{} of {} files failed",
                summary.failures.len(),
                summary.total()
            )
            .red()
        );
    }
    Ok(summary)
}

fn change_date(
    tool: &Exiftool,
    date: &DateSpec,
    file: &Path,
    tags: &[&str],
    args: &Args,
) -> Result<Change, FileError> {
    let before = CaptureTime::parse(&tool.read_tag(CAPTURE_TAG, file)?)?;
    let after = date.apply(&before)?;

    if args.dryrun {
        let cmd = tool.write_command(tags, &after, file, args.overwrite);
        println!("{}", format!("[dryrun] {:?}", cmd).yellow());
    } else {
        tool.write_tags(tags, &after, file, args.overwrite)?;
    }

    Ok(Change {
        file: file.to_path_buf(),
        before,
        after,
    })
}

/// Validates day, month and year and splits off the file arguments.
///
/// Without `--year`, the first argument after the month is taken as the year
/// when it is all digits and more arguments follow it.
fn resolve_arguments(args: &Args) -> Result<(DateSpec, &[String]), Error> {
    let day = parse_number("day", &args.day)?;
    let month = parse_number("month", &args.month)?;

    let (year, files) = match &args.year {
        Some(year) => (Some(parse_number("year", year)?), &args.files[..]),
        None => match args.files.split_first() {
            Some((first, rest)) if !rest.is_empty() && is_year(first) => {
                (Some(parse_number("year", first)?), rest)
            }
            _ => (None, &args.files[..]),
        },
    };

    let date = DateSpec::new(day, month, year)?;
    if files.is_empty() {
        return Err(Error::InvalidArgument("no input files".to_string()));
    }
    Ok((date, files))
}

fn is_year(arg: &str) -> bool {
    !arg.is_empty() && arg.chars().all(|c| c.is_ascii_digit())
}

fn parse_number<T: std::str::FromStr>(what: &str, value: &str) -> Result<T, Error> {
    value
        .trim()
        .parse()
        .map_err(|_| Error::InvalidArgument(format!("{} '{}' is not a number", what, value)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(day: &str, month: &str, files: &[&str]) -> Args {
        Args {
            dryrun: false,
            overwrite: false,
            all_dates: false,
            quiet: true,
            year: None,
            exiftool: PathBuf::from("exiftool"),
            day: day.to_string(),
            month: month.to_string(),
            files: files.iter().map(|f| f.to_string()).collect(),
        }
    }

    #[test]
    fn test_resolve_arguments_year_detection() {
        // Arrange
        let cases = vec![
            (vec!["photo1.RAW", "photo2.RAW"], None, 2),
            (vec!["1999", "img.RAW"], Some(1999), 1),
            (vec!["2005", "1999", "img.RAW"], Some(2005), 2),
            (vec!["1999"], None, 1),
            (vec!["1999.RAW", "img.RAW"], None, 2),
        ];

        // Act/Assert
        for (files, year, count) in cases {
            let a = args("1", "1", &files);
            let (date, rest) = resolve_arguments(&a).unwrap();
            assert_eq!(year, date.year, "{:?}", files);
            assert_eq!(count, rest.len(), "{:?}", files);
        }
    }

    #[test]
    fn test_resolve_arguments_year_flag() {
        let mut a = args("1", "1", &["1999", "img.RAW"]);
        a.year = Some("2001".to_string());

        let (date, rest) = resolve_arguments(&a).unwrap();

        assert_eq!(Some(2001), date.year);
        assert_eq!(vec!["1999", "img.RAW"], rest);
    }

    #[test]
    fn test_resolve_arguments_invalid() {
        // Arrange
        let cases = vec![
            args("x", "1", &["img.RAW"]),
            args("1", "June", &["img.RAW"]),
            args("32", "1", &["img.RAW"]),
            args("1", "13", &["img.RAW"]),
            args("-1", "1", &["img.RAW"]),
            args("1", "1", &["0", "img.RAW"]),
            args("1", "1", &["99999999999", "img.RAW"]),
            args("1", "1", &[]),
            args("31", "4", &["img.RAW"]),
        ];

        // Act/Assert
        for a in cases {
            assert!(
                matches!(resolve_arguments(&a), Err(Error::InvalidArgument(_))),
                "{:?}",
                a
            );
        }
    }

    #[test]
    fn test_invalid_arguments_checked_before_tool() {
        let mut a = args("15", "6", &[]);
        a.exiftool = PathBuf::from("definitely-not-an-installed-exiftool-binary");

        assert!(matches!(run(a), Err(Error::InvalidArgument(_))));
    }

    #[test]
    fn test_summary_check() {
        let ok = Summary::default();
        assert!(ok.check().is_ok());

        let failed = Summary {
            changes: vec![],
            failures: vec![(PathBuf::from("a.RAW"), FileError::MissingTimestamp)],
        };
        assert!(matches!(
            failed.check(),
            Err(Error::FilesFailed {
                failed: 1,
                total: 1
            })
        ));
    }
}
