use std::collections::BTreeMap;

use super::filter::{filter_by_date, FilteredTable};
use super::model::{BaseTable, DateRange, Record, YearMonth};

// ---------------------------------------------------------------------------
// Derived view rows
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthlyTotal {
    pub month: YearMonth,
    pub total: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeasonTotals {
    pub season: u8,
    pub registered: u64,
    pub casual: u64,
}

/// Sum of `cnt` for one category code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryTotal {
    pub code: u8,
    pub total: u64,
}

/// The five chart views computed from one filtered table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DerivedViews {
    pub monthly_trend: Vec<MonthlyTotal>,
    pub season_pattern: Vec<SeasonTotals>,
    pub weather_pattern: Vec<CategoryTotal>,
    pub working_day_pattern: Vec<CategoryTotal>,
    pub weather_count: Vec<CategoryTotal>,
}

impl DerivedViews {
    pub fn from_filtered(filtered: &FilteredTable) -> Self {
        let rows = filtered.records();
        Self {
            monthly_trend: monthly_trend(rows),
            season_pattern: season_pattern(rows),
            weather_pattern: weather_pattern(rows),
            working_day_pattern: working_day_pattern(rows),
            weather_count: weather_count(rows),
        }
    }
}

/// Result of one filter-and-aggregate pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterOutcome {
    /// No record falls in the range (including inverted ranges).
    Empty,
    Data {
        filtered: FilteredTable,
        views: DerivedViews,
    },
}

impl FilterOutcome {
    pub fn views(&self) -> Option<&DerivedViews> {
        match self {
            FilterOutcome::Empty => None,
            FilterOutcome::Data { views, .. } => Some(views),
        }
    }

    pub fn row_count(&self) -> usize {
        match self {
            FilterOutcome::Empty => 0,
            FilterOutcome::Data { filtered, .. } => filtered.len(),
        }
    }
}

// ---------------------------------------------------------------------------
// Pipeline
// ---------------------------------------------------------------------------

/// Filter `table` to `range` and build every derived view.
///
/// Pure: the same inputs always produce the same outcome.
pub fn filter_and_aggregate(table: &BaseTable, range: &DateRange) -> FilterOutcome {
    let filtered = filter_by_date(table, range);
    if filtered.is_empty() {
        return FilterOutcome::Empty;
    }
    let views = DerivedViews::from_filtered(&filtered);
    FilterOutcome::Data { filtered, views }
}

/// Sum `cnt` per calendar month, chronologically.
pub fn monthly_trend(rows: &[Record]) -> Vec<MonthlyTotal> {
    let mut groups: BTreeMap<YearMonth, u64> = BTreeMap::new();
    for r in rows {
        if let Some(date) = r.date {
            *groups.entry(YearMonth::of(date)).or_default() += u64::from(r.cnt);
        }
    }
    groups
        .into_iter()
        .map(|(month, total)| MonthlyTotal { month, total })
        .collect()
}

/// Sum `registered` and `casual` per season.
pub fn season_pattern(rows: &[Record]) -> Vec<SeasonTotals> {
    let mut groups: BTreeMap<u8, (u64, u64)> = BTreeMap::new();
    for r in rows {
        let entry = groups.entry(r.season).or_default();
        entry.0 += u64::from(r.registered);
        entry.1 += u64::from(r.casual);
    }
    groups
        .into_iter()
        .map(|(season, (registered, casual))| SeasonTotals {
            season,
            registered,
            casual,
        })
        .collect()
}

pub fn weather_pattern(rows: &[Record]) -> Vec<CategoryTotal> {
    sum_cnt_by(rows, |r| r.weather)
}

pub fn working_day_pattern(rows: &[Record]) -> Vec<CategoryTotal> {
    sum_cnt_by(rows, |r| r.working_day)
}

/// Same grouping as [`weather_pattern`]; every code present is summed,
/// whether or not its chart has a label for it.
pub fn weather_count(rows: &[Record]) -> Vec<CategoryTotal> {
    sum_cnt_by(rows, |r| r.weather)
}

fn sum_cnt_by(rows: &[Record], key: impl Fn(&Record) -> u8) -> Vec<CategoryTotal> {
    let mut groups: BTreeMap<u8, u64> = BTreeMap::new();
    for r in rows {
        *groups.entry(key(r)).or_default() += u64::from(r.cnt);
    }
    groups
        .into_iter()
        .map(|(code, total)| CategoryTotal { code, total })
        .collect()
}
