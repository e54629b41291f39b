use std::fmt;

use chrono::NaiveDate;
use regex::Regex;

use crate::{Error, FileError};

/// The date a run moves every file to. The time of day is never part of it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateSpec {
    pub day: u32,
    pub month: u32,
    /// `None` keeps each file's own year.
    pub year: Option<i32>,
}

impl DateSpec {
    pub fn new(day: u32, month: u32, year: Option<i32>) -> Result<Self, Error> {
        if !(1..=31).contains(&day) {
            return Err(Error::InvalidArgument(format!(
                "day must be between 1 and 31, got {}",
                day
            )));
        }
        if !(1..=12).contains(&month) {
            return Err(Error::InvalidArgument(format!(
                "month must be between 1 and 12, got {}",
                month
            )));
        }

        match year {
            Some(year) => {
                if !(1..=9999).contains(&year) {
                    return Err(Error::InvalidArgument(format!(
                        "year must be between 1 and 9999, got {}",
                        year
                    )));
                }
                if NaiveDate::from_ymd_opt(year, month, day).is_none() {
                    return Err(Error::InvalidArgument(format!(
                        "{:04}-{:02}-{:02} is not a valid date",
                        year, month, day
                    )));
                }
            }
            // 2000 is a leap year, so 29/2 passes here and is checked per file
            None => {
                if NaiveDate::from_ymd_opt(2000, month, day).is_none() {
                    return Err(Error::InvalidArgument(format!(
                        "month {} has no day {}",
                        month, day
                    )));
                }
            }
        }

        Ok(DateSpec { day, month, year })
    }

    /// Builds the replacement timestamp for `current`, keeping its time of day
    /// (fraction and offset included) exactly as it was.
    pub fn apply(&self, current: &CaptureTime) -> Result<String, FileError> {
        let year = self.year.unwrap_or(current.year);
        if NaiveDate::from_ymd_opt(year, self.month, self.day).is_none() {
            return Err(FileError::InvalidDate {
                year,
                month: self.month,
                day: self.day,
            });
        }
        Ok(format!(
            "{:04}:{:02}:{:02}{}",
            year, self.month, self.day, current.time
        ))
    }
}

impl fmt::Display for DateSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.year {
            Some(year) => write!(f, "{:04}-{:02}-{:02}", year, self.month, self.day),
            None => write!(f, "<year>-{:02}-{:02}", self.month, self.day),
        }
    }
}

/// A capture timestamp as exiftool prints it, e.g. `2020:01:03 14:22:10+02:00`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptureTime {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    /// Everything after the date, starting with the separating space.
    pub time: String,
}

impl CaptureTime {
    pub fn parse(input: &str) -> Result<Self, FileError> {
        lazy_static! {
            static ref EXIF_DATETIME: Regex = Regex::new(
                r"^(\d{4}):(\d{2}):(\d{2})( \d{2}:\d{2}:\d{2}(?:\.\d+)?(?:Z|[+-]\d{2}:\d{2})?)$"
            )
            .unwrap();
        }
        let input = input.trim();

        // blank tags come back as "" or "    :  :     :  :  "
        if !input.chars().any(|c| c.is_ascii_digit()) {
            return Err(FileError::MissingTimestamp);
        }

        let cap = EXIF_DATETIME
            .captures(input)
            .ok_or_else(|| FileError::MalformedTimestamp(input.to_string()))?;
        let number = |i: usize| {
            cap[i]
                .parse::<u32>()
                .map_err(|_| FileError::MalformedTimestamp(input.to_string()))
        };

        let (year, month, day) = (number(1)?, number(2)?, number(3)?);
        if year == 0 && month == 0 && day == 0 {
            return Err(FileError::MissingTimestamp);
        }

        Ok(CaptureTime {
            year: year as i32,
            month,
            day,
            time: cap[4].to_string(),
        })
    }
}

impl fmt::Display for CaptureTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:04}:{:02}:{:02}{}",
            self.year, self.month, self.day, self.time
        )
    }
}
