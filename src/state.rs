use chrono::Local;

use crate::data::aggregate::{filter_and_aggregate, FilterOutcome};
use crate::data::labels::ChartLabels;
use crate::data::model::{BaseTable, DateRange};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Dataset loaded at startup; never mutated afterwards.
    table: BaseTable,

    /// Full date span of the table, used for the initial and reset range.
    full_range: DateRange,

    /// Current filter bounds, edited by the date pickers.
    pub range: DateRange,

    /// Result of the last filter-and-aggregate pass.
    pub outcome: FilterOutcome,

    /// Static code → label tables for the charts.
    pub labels: ChartLabels,

    /// Notice about weather codes the daily-rentals chart has no label for.
    pub unlabeled_notice: Option<String>,

    /// Status message shown in the top bar.
    pub status_message: Option<String>,
}

impl AppState {
    /// Take ownership of the loaded table and compute the first outcome over
    /// its full date span.
    pub fn new(table: BaseTable, labels: ChartLabels) -> Self {
        let full_range = table.date_span().unwrap_or_else(|| {
            log::warn!("Dataset has no valid dates; every range will be empty");
            DateRange::single(Local::now().date_naive())
        });

        let mut state = Self {
            table,
            full_range,
            range: full_range,
            outcome: FilterOutcome::Empty,
            labels,
            unlabeled_notice: None,
            status_message: None,
        };
        state.refilter();
        state
    }

    pub fn table(&self) -> &BaseTable {
        &self.table
    }

    pub fn full_range(&self) -> DateRange {
        self.full_range
    }

    /// Replace the range and recompute if it changed.
    pub fn set_range(&mut self, range: DateRange) {
        if range != self.range {
            self.range = range;
            self.refilter();
        }
    }

    /// Restore the full date span.
    pub fn reset_range(&mut self) {
        self.set_range(self.full_range);
    }

    /// Recompute the filtered table and all views from scratch.
    pub fn refilter(&mut self) {
        self.outcome = filter_and_aggregate(&self.table, &self.range);
        log::debug!(
            "Range {} selects {} of {} records",
            self.range,
            self.outcome.row_count(),
            self.table.len()
        );

        self.unlabeled_notice = self.check_weather_count_labels();
        self.status_message = match &self.outcome {
            FilterOutcome::Empty if self.range.is_inverted() => {
                Some("Start date is after end date".to_string())
            }
            _ => None,
        };
    }

    /// Weather codes summed into the daily-rentals view that its three-label
    /// table cannot name.
    fn check_weather_count_labels(&self) -> Option<String> {
        let views = self.outcome.views()?;
        let unlabeled: Vec<String> = views
            .weather_count
            .iter()
            .filter(|c| !self.labels.weather_count.contains(c.code))
            .map(|c| format!("{} ({} users)", c.code, c.total))
            .collect();
        if unlabeled.is_empty() {
            return None;
        }

        let notice = format!(
            "Weather codes without a label in this chart: {}",
            unlabeled.join(", ")
        );
        log::warn!("{notice}");
        Some(notice)
    }
}
