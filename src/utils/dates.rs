//! Small date helpers with no tie to the fee report.

use crate::utils::error::{ReportError, Result};
use chrono::{Days, NaiveDate};
use regex::Regex;
use serde::Deserialize;

pub const ISO_DATE_FORMAT: &str = "%Y-%m-%d";
pub const DISPLAY_DATE_FORMAT: &str = "%d %b %Y";

/// Parses dates with a strftime format, with strict field widths.
///
/// chrono's `%Y` takes any number of digits and an optional sign, so
/// `01/05/20` would silently become year 20. Input is first matched against
/// a pattern built from the format: `%Y` must be exactly four digits, `%y`
/// two, and day/month fields one or two.
#[derive(Debug, Clone)]
pub struct DateParser {
    format: String,
    pattern: Regex,
}

fn format_to_pattern(format: &str) -> String {
    let mut pattern = String::from("^");
    let mut chars = format.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '%' {
            pattern.push_str(&regex::escape(&c.to_string()));
            continue;
        }

        // padding modifiers (%-d, %_m, %0e) do not change what we accept
        if matches!(chars.peek(), Some('-') | Some('_') | Some('0')) {
            chars.next();
        }

        let piece = match chars.next() {
            Some('Y') => r"\d{4}",
            Some('y') | Some('C') => r"\d{2}",
            Some('e') => r"\s?\d{1,2}",
            Some('m') | Some('d') | Some('H') | Some('M') | Some('S') => r"\d{1,2}",
            Some('j') => r"\d{1,3}",
            Some('b') | Some('h') | Some('a') => r"[A-Za-z]{3}",
            Some('B') | Some('A') => r"[A-Za-z]+",
            Some('%') => "%",
            _ => ".+?",
        };
        pattern.push_str(piece);
    }

    pattern.push('$');
    pattern
}

impl DateParser {
    pub fn new(format: &str) -> Result<Self> {
        let pattern = Regex::new(&format_to_pattern(format)).map_err(|e| ReportError::ConfigError {
            message: format!("Unsupported date format '{}': {}", format, e),
        })?;

        Ok(Self {
            format: format.to_string(),
            pattern,
        })
    }

    pub fn iso() -> Result<Self> {
        Self::new(ISO_DATE_FORMAT)
    }

    pub fn parse(&self, field: &str, value: &str) -> Result<NaiveDate> {
        if !self.pattern.is_match(value) {
            return Err(ReportError::date_parse(
                field,
                value,
                format!("does not match '{}'", self.format),
            ));
        }

        NaiveDate::parse_from_str(value, &self.format)
            .map_err(|e| ReportError::date_parse(field, value, e))
    }
}

/// Re-formats `yyyy-mm-dd` strings as `dd Mon yyyy`, e.g. `01 Jan 2001`.
///
/// Order and length are preserved. The first element that does not parse
/// fails the whole call.
pub fn reformat_dates<S: AsRef<str>>(old_dates: &[S]) -> Result<Vec<String>> {
    let parser = DateParser::iso()?;

    old_dates
        .iter()
        .map(|old| {
            parser
                .parse("date", old.as_ref())
                .map(|date| date.format(DISPLAY_DATE_FORMAT).to_string())
        })
        .collect()
}

/// Returns `n` consecutive days starting at `start` (`yyyy-mm-dd`).
///
/// `start` is only looked at when there is at least one day to produce.
pub fn date_range(start: &str, n: usize) -> Result<Vec<NaiveDate>> {
    if n == 0 {
        return Ok(Vec::new());
    }

    let first = DateParser::iso()?.parse("start", start)?;

    (0..n)
        .map(|offset| {
            first
                .checked_add_days(Days::new(offset as u64))
                .ok_or_else(|| ReportError::DateRangeError {
                    message: format!("{} days after {} is out of range", offset, start),
                })
        })
        .collect()
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct DateRangeRequest {
    start: String,
    n: i64,
}

/// Untyped entry point for [`date_range`], taking `{"start": "...", "n": ...}`.
///
/// A `start` that is not a string or an `n` that is not an integer is
/// reported as [`ReportError::TypeError`]. Zero or negative `n` gives an
/// empty range.
pub fn date_range_from_json(request: &str) -> Result<Vec<NaiveDate>> {
    let request: DateRangeRequest = serde_json::from_str(request).map_err(|e| match e.classify() {
        serde_json::error::Category::Data => ReportError::TypeError {
            message: e.to_string(),
        },
        _ => ReportError::SerializationError(e),
    })?;

    if request.n <= 0 {
        return Ok(Vec::new());
    }

    let n = usize::try_from(request.n).map_err(|_| ReportError::DateRangeError {
        message: format!("{} days is more than this platform can hold", request.n),
    })?;

    date_range(&request.start, n)
}

/// Pairs each value with a day, starting at `start_date` and moving forward
/// one day per value.
pub fn add_date_range<T>(values: Vec<T>, start_date: &str) -> Result<Vec<(NaiveDate, T)>> {
    let dates = date_range(start_date, values.len())?;
    Ok(dates.into_iter().zip(values).collect())
}
