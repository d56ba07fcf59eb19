//! Fiscal quarter calendar.
//!
//! Every date-like input — report dates, quarterly table headers, annual
//! table headers — normalizes to a single canonical [`Quarter`] key rendered
//! as `YYYY/Qn`. All lookback and lookahead features step through quarters
//! with [`Quarter::offset`], so the year-boundary arithmetic here is the
//! foundation every derived series stands on.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};

use crate::error::QuarryError;

/// A fiscal quarter, canonically rendered as `YYYY/Qn`.
///
/// Totally ordered by `(year, index)`. Construction goes through
/// [`Quarter::new`], the parsers, or [`Quarter::offset`]; an in-range index
/// is an invariant of the type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Quarter {
    year: i32,
    index: u8,
}

impl Quarter {
    /// Create a quarter from a year and a quarter index in `1..=4`.
    pub fn new(year: i32, index: u8) -> Result<Self, QuarryError> {
        if !(1..=4).contains(&index) {
            return Err(QuarryError::InvalidQuarter(format!("{year}/Q{index}")));
        }
        Ok(Self { year, index })
    }

    /// Reporting year.
    pub const fn year(self) -> i32 {
        self.year
    }

    /// Quarter index within the year, `1..=4`.
    pub const fn index(self) -> u8 {
        self.index
    }

    /// Parse a report date in `DD.MM.YYYY` form.
    ///
    /// Only quarter-end reporting months (March, June, September, December)
    /// map to a quarter. Any other month — and any unparseable text — yields
    /// `None`; callers skip such rows rather than rounding the date into a
    /// neighbouring quarter.
    pub fn from_report_date(text: &str) -> Option<Self> {
        let date = NaiveDate::parse_from_str(text.trim(), "%d.%m.%Y").ok()?;
        let index = quarter_of_month(date.month())?;
        Some(Self {
            year: date.year(),
            index,
        })
    }

    /// The quarter `steps` positions after `self`; negative steps move
    /// backward.
    ///
    /// Euclidean division carries the year: the quarter index is
    /// `(index - 1 + steps).rem_euclid(4) + 1` and the year moves by
    /// `(index - 1 + steps).div_euclid(4)`, which floors forward steps and
    /// ceils backward ones. `q.offset(n).offset(-n) == q` for all `n`.
    #[must_use]
    pub const fn offset(self, steps: i32) -> Self {
        let total = self.index as i32 - 1 + steps;
        Self {
            year: self.year + total.div_euclid(4),
            index: (total.rem_euclid(4) + 1) as u8,
        }
    }

    /// Parse a quarterly column header.
    ///
    /// Headers carry decoration around the key (whitespace, report notes);
    /// whitespace is dropped and the first seven characters are expected to
    /// spell `YYYY/Qn`.
    pub fn from_quarter_header(text: &str) -> Option<Self> {
        header_head(text)?.parse().ok()
    }

    /// Parse an annual column header of the `YYYY(ab…` form.
    ///
    /// Entities reporting once a year label columns with the year plus an
    /// abbreviated reporting-month name; the abbreviation maps onto the same
    /// four fiscal quarters.
    pub fn from_annual_header(text: &str) -> Option<Self> {
        let head = header_head(text)?;
        let (year, abbrev) = head.split_at(4);
        let year: i32 = year.parse().ok()?;
        let index = match abbrev {
            "(ma" => 1,
            "(cz" => 2,
            "(wr" => 3,
            "(gr" => 4,
            _ => return None,
        };
        Some(Self { year, index })
    }
}

/// Whitespace-stripped first seven characters of a header label.
fn header_head(text: &str) -> Option<String> {
    let head: String = text
        .chars()
        .filter(|c| !c.is_whitespace())
        .take(7)
        .collect();
    if head.len() == 7 && head.is_ascii() {
        Some(head)
    } else {
        None
    }
}

/// Quarter index of a quarter-end reporting month.
const fn quarter_of_month(month: u32) -> Option<u8> {
    match month {
        3 => Some(1),
        6 => Some(2),
        9 => Some(3),
        12 => Some(4),
        _ => None,
    }
}

impl fmt::Display for Quarter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}/Q{}", self.year, self.index)
    }
}

impl FromStr for Quarter {
    type Err = QuarryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (year, quarter) = s
            .split_once('/')
            .ok_or_else(|| QuarryError::InvalidQuarter(s.to_string()))?;
        let index = quarter
            .strip_prefix('Q')
            .ok_or_else(|| QuarryError::InvalidQuarter(s.to_string()))?;
        let year: i32 = year
            .parse()
            .map_err(|_| QuarryError::InvalidQuarter(s.to_string()))?;
        let index: u8 = index
            .parse()
            .map_err(|_| QuarryError::InvalidQuarter(s.to_string()))?;
        Self::new(year, index)
    }
}
