use super::model::{BaseTable, DateRange, Record};

// ---------------------------------------------------------------------------
// Date-range filter
// ---------------------------------------------------------------------------

/// Records of the base table that fall inside a [`DateRange`], in table order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilteredTable {
    records: Vec<Record>,
}

impl FilteredTable {
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Sum of `cnt` over all rows.
    pub fn total_cnt(&self) -> u64 {
        self.records.iter().map(|r| u64::from(r.cnt)).sum()
    }
}

/// Keep every record with a valid date inside `range` (inclusive).
///
/// Records with an unparseable date never pass. An inverted range matches
/// nothing.
pub fn filter_by_date(table: &BaseTable, range: &DateRange) -> FilteredTable {
    let records = table
        .records()
        .iter()
        .filter(|r| r.date.is_some_and(|d| range.contains(d)))
        .copied()
        .collect();
    FilteredTable { records }
}
