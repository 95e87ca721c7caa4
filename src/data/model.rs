use std::fmt;

use chrono::{Datelike, NaiveDate};

// ---------------------------------------------------------------------------
// Record – one day of bike sharing usage
// ---------------------------------------------------------------------------

/// A single row of the dataset.
///
/// `cnt == registered + casual` is expected to hold for source data but is
/// never checked. Counts are `u32` so that sums over a table fit in `u64`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Record {
    /// Calendar day. `None` when the source text could not be parsed.
    pub date: Option<NaiveDate>,
    /// Season code, 1..=4.
    pub season: u8,
    /// Weather situation code, 1..=4.
    pub weather: u8,
    /// Working-day flag, 0 or 1.
    pub working_day: u8,
    pub registered: u32,
    pub casual: u32,
    pub cnt: u32,
}

// ---------------------------------------------------------------------------
// DateRange – inclusive filter bounds
// ---------------------------------------------------------------------------

/// Inclusive `[start, end]` date range. `start > end` is allowed and matches
/// nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// A range covering a single day.
    pub fn single(day: NaiveDate) -> Self {
        Self::new(day, day)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    pub fn is_inverted(&self) -> bool {
        self.start > self.end
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} to {}", self.start, self.end)
    }
}

// ---------------------------------------------------------------------------
// YearMonth – monthly grouping key
// ---------------------------------------------------------------------------

/// Calendar month key. Field order makes the derived `Ord` chronological.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    pub year: i32,
    pub month: u32,
}

impl YearMonth {
    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

// ---------------------------------------------------------------------------
// BaseTable – the complete loaded dataset
// ---------------------------------------------------------------------------

/// All records loaded at startup. Never mutated after construction.
#[derive(Debug, Clone, Default)]
pub struct BaseTable {
    records: Vec<Record>,
}

impl BaseTable {
    pub fn from_records(records: Vec<Record>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Earliest and latest valid dates, or `None` if no record has one.
    pub fn date_span(&self) -> Option<DateRange> {
        let mut dates = self.records.iter().filter_map(|r| r.date);
        let first = dates.next()?;
        let (start, end) = dates.fold((first, first), |(lo, hi), d| (lo.min(d), hi.max(d)));
        Some(DateRange::new(start, end))
    }

    /// Records whose date failed to parse.
    pub fn invalid_date_count(&self) -> usize {
        self.records.iter().filter(|r| r.date.is_none()).count()
    }
}
