use std::path::PathBuf;

use clap::Parser;

/// Change the date of image capture timestamps, keeping their time of day.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// just show what changes would be made to files, do not actually make them
    #[arg(short, long)]
    pub dryrun: bool,

    /// overwrite files when setting their date, or if false, exiftool keeps a copy of the original.
    #[arg(short, long)]
    pub overwrite: bool,

    /// also set CreateDate and ModifyDate to the new capture time
    #[arg(short, long)]
    pub all_dates: bool,

    /// only report failures
    #[arg(short, long)]
    pub quiet: bool,

    /// year to set, instead of giving it before the files
    #[arg(long, value_name = "YEAR")]
    pub year: Option<String>,

    /// exiftool program to run
    #[arg(long, value_name = "PATH", default_value = "exiftool")]
    pub exiftool: PathBuf,

    /// day of the month, 1-31
    pub day: String,

    /// month, 1-12
    pub month: String,

    /// optional four digit year followed by the files to set the date for
    #[arg(value_name = "[YEAR] FILES")]
    pub files: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_positional_arguments() {
        let args = Args::parse_from(["exif-chdate", "15", "6", "photo1.RAW", "photo2.RAW"]);

        assert_eq!("15", args.day);
        assert_eq!("6", args.month);
        assert_eq!(vec!["photo1.RAW", "photo2.RAW"], args.files);
        assert_eq!(PathBuf::from("exiftool"), args.exiftool);
        assert!(!args.dryrun && !args.overwrite && !args.all_dates && !args.quiet);
    }

    #[test]
    fn test_parse_flags() {
        let args = Args::parse_from([
            "exif-chdate",
            "-do",
            "--all-dates",
            "--year",
            "1999",
            "--exiftool",
            "/usr/local/bin/exiftool",
            "1",
            "1",
            "img.RAW",
        ]);

        assert!(args.dryrun && args.overwrite && args.all_dates);
        assert_eq!(Some("1999".to_string()), args.year);
        assert_eq!(PathBuf::from("/usr/local/bin/exiftool"), args.exiftool);
        assert_eq!(vec!["img.RAW"], args.files);
    }

    #[test]
    fn test_day_and_month_are_required() {
        assert!(Args::try_parse_from(["exif-chdate", "15"]).is_err());
    }
}
