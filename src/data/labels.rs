use std::borrow::Cow;

// ---------------------------------------------------------------------------
// Static code → label tables
// ---------------------------------------------------------------------------

/// A fixed mapping from category code to display label.
///
/// The order of the entries is the order of the chart slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LabelTable {
    entries: &'static [(u8, &'static str)],
}

impl LabelTable {
    pub const fn new(entries: &'static [(u8, &'static str)]) -> Self {
        Self { entries }
    }

    pub fn get(&self, code: u8) -> Option<&'static str> {
        self.entries
            .iter()
            .find(|(c, _)| *c == code)
            .map(|(_, label)| *label)
    }

    /// Label for `code`, falling back to the raw code for unknown values.
    pub fn label_for(&self, code: u8) -> Cow<'static, str> {
        match self.get(code) {
            Some(label) => Cow::Borrowed(label),
            None => Cow::Owned(code.to_string()),
        }
    }

    pub fn contains(&self, code: u8) -> bool {
        self.get(code).is_some()
    }

    /// Slot position of each code on a categorical axis: labelled codes
    /// first in table order, then any unknown codes ascending.
    /// Returns `(code, label)` per slot.
    pub fn axis_slots(&self, present: impl IntoIterator<Item = u8>) -> Vec<(u8, Cow<'static, str>)> {
        let mut extra: Vec<u8> = present.into_iter().filter(|c| !self.contains(*c)).collect();
        extra.sort_unstable();
        extra.dedup();

        self.entries
            .iter()
            .map(|(c, label)| (*c, Cow::Borrowed(*label)))
            .chain(extra.into_iter().map(|c| (c, Cow::Owned(c.to_string()))))
            .collect()
    }
}

pub const SEASON_LABELS: LabelTable =
    LabelTable::new(&[(1, "Spring"), (2, "Summer"), (3, "Fall"), (4, "Winter")]);

pub const WEATHER_LABELS: LabelTable = LabelTable::new(&[
    (1, "Clear"),
    (2, "Mist + Cloudy"),
    (3, "Light Snow/Rain"),
    (4, "Heavy Rain/Snow"),
]);

pub const WORKING_DAY_LABELS: LabelTable =
    LabelTable::new(&[(0, "Non-Working Day"), (1, "Working Day")]);

/// The daily-rentals chart only labels the three milder weather codes.
pub const WEATHER_COUNT_LABELS: LabelTable =
    LabelTable::new(&[(1, "Clear"), (2, "Mist + Cloudy"), (3, "Light Snow/Rain")]);

/// The label tables handed to the chart renderer.
#[derive(Debug, Clone, Copy)]
pub struct ChartLabels {
    pub season: LabelTable,
    pub weather: LabelTable,
    pub working_day: LabelTable,
    pub weather_count: LabelTable,
}

impl Default for ChartLabels {
    fn default() -> Self {
        Self {
            season: SEASON_LABELS,
            weather: WEATHER_LABELS,
            working_day: WORKING_DAY_LABELS,
            weather_count: WEATHER_COUNT_LABELS,
        }
    }
}
