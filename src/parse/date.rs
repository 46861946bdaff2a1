// src/parse/date.rs

use chrono::{Month, NaiveDate};
use std::str::FromStr;

/// Which of the three date layouts a cell uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatePrecision {
    /// `June 5, 1999`
    Day,
    /// `June 1999`
    Month,
    /// `1999`
    Year,
}

impl DatePrecision {
    /// Pick the layout by content: a comma means day precision, a space means
    /// month precision, anything else is treated as a bare year.
    pub fn detect(s: &str) -> Self {
        if s.contains(',') {
            Self::Day
        } else if s.contains(' ') {
            Self::Month
        } else {
            Self::Year
        }
    }
}

/// Drop a Wikipedia footnote suffix: everything from the first `[`.
pub fn strip_notes(s: &str) -> &str {
    s.split('[').next().unwrap_or(s)
}

/// Drop the footnote suffix and a parenthesised qualifier prefix such as
/// `(shorts) `, keeping only the text after the last `)`.
pub fn strip_notes_and_qualifier(s: &str) -> &str {
    let s = strip_notes(s);
    s.rsplit(')').next().unwrap_or(s)
}

/// Parse a cell with the three-format grammar. Anything that does not fit
/// comes back as `None`.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    parse_with(s, DatePrecision::detect(s))
}

/// Parse `s` with an explicit grammar. Month and year precision resolve to
/// the first day of the period.
pub fn parse_with(s: &str, precision: DatePrecision) -> Option<NaiveDate> {
    match precision {
        DatePrecision::Day => NaiveDate::parse_from_str(s, "%B %d, %Y").ok(),
        DatePrecision::Month => {
            let (month, year) = s.split_once(' ')?;
            let month = Month::from_str(month).ok()?;
            NaiveDate::from_ymd_opt(parse_year(year)?, month.number_from_month(), 1)
        }
        DatePrecision::Year => NaiveDate::from_ymd_opt(parse_year(s)?, 1, 1),
    }
}

fn parse_year(s: &str) -> Option<i32> {
    if s.len() != 4 || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

fn looks_like_year(s: &str) -> bool {
    s.chars().count() == 4 && matches!(s.chars().next(), Some('1' | '2'))
}

/// Heuristic used by the former-programming tables to decide whether a cell
/// holds a date. Tuned to the source page; the checks are deliberately loose
/// (no trimming, no digit checks on the day).
pub fn is_date(v: &str) -> bool {
    let v = strip_notes_and_qualifier(v);

    if looks_like_year(v) {
        return true;
    }

    if v.contains(',') {
        let by_comma: Vec<&str> = v.split(',').collect();
        if by_comma.len() != 2 {
            return false;
        }
        // " 1999"
        if by_comma[1].chars().count() != 5 {
            return false;
        }
        match by_comma[0].split(' ').nth(1) {
            Some(day) => (1..=2).contains(&day.chars().count()),
            None => false,
        }
    } else {
        let by_space: Vec<&str> = v.split(' ').collect();
        by_space.len() == 2 && looks_like_year(by_space[1])
    }
}

pub fn count_dates<S: AsRef<str>>(cells: &[S]) -> usize {
    cells.iter().filter(|c| is_date(c.as_ref())).count()
}
