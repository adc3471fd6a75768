use std::collections::BTreeSet;

use super::model::{CategoryRecord, DatasetSnapshot};

// ---------------------------------------------------------------------------
// Year selection: a single slider year, or an explicit set
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum YearSelection {
    Single(String),
    Many(BTreeSet<String>),
}

impl YearSelection {
    pub fn contains(&self, year: &str) -> bool {
        match self {
            YearSelection::Single(y) => y == year,
            YearSelection::Many(set) => set.contains(year),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            YearSelection::Single(y) => y.is_empty(),
            YearSelection::Many(set) => set.is_empty(),
        }
    }

    /// The selected years that exist in the snapshot, ascending.
    pub fn resolve(&self, snapshot: &DatasetSnapshot) -> Vec<String> {
        snapshot
            .years()
            .iter()
            .filter(|y| self.contains(y))
            .cloned()
            .collect()
    }
}

impl<S: Into<String>> FromIterator<S> for YearSelection {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        YearSelection::Many(iter.into_iter().map(Into::into).collect())
    }
}

// ---------------------------------------------------------------------------
// Filtering
// ---------------------------------------------------------------------------

/// Return the records for the selected categories, each trimmed to the
/// selected years.
///
/// * Records come back in snapshot order regardless of selection order.
/// * Series keep their chronological order.
/// * Names unknown to the snapshot are ignored.
/// * An empty category or year selection yields an empty list.
pub fn filter_records<S: AsRef<str>>(
    snapshot: &DatasetSnapshot,
    categories: &[S],
    years: &YearSelection,
) -> Vec<CategoryRecord> {
    if categories.is_empty() || years.is_empty() {
        return Vec::new();
    }

    snapshot
        .records()
        .iter()
        .filter(|rec| categories.iter().any(|c| c.as_ref() == rec.name))
        .map(|rec| CategoryRecord {
            code: rec.code.clone(),
            name: rec.name.clone(),
            series: rec
                .series
                .iter()
                .filter(|yv| years.contains(&yv.gregorian_year))
                .cloned()
                .collect(),
        })
        .filter(|rec| !rec.series.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::source::{RawCell, RawTable};

    fn snapshot() -> DatasetSnapshot {
        let table = RawTable::new(["a", "b", "c"], ["2020/21", "2021/22", "2022/23"])
            .with_category("A", "Alpha", [RawCell::from(1.0), RawCell::from(2.0), RawCell::Missing])
            .with_category("B", "Beta", [4_i64, 5, 6])
            .with_category("C", "Gamma", [7_i64, 8, 9]);
        DatasetSnapshot::from_raw(&table).unwrap()
    }

    #[test]
    fn keeps_snapshot_order_not_selection_order() {
        let snap = snapshot();
        let out = filter_records(&snap, &["Gamma", "Alpha"], &YearSelection::Single("2021/22".into()));
        let names: Vec<_> = out.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["Alpha", "Gamma"]);
    }

    #[test]
    fn trims_series_to_selected_years_in_order() {
        let snap = snapshot();
        let years: YearSelection = ["2022/23", "2020/21"].into_iter().collect();
        let out = filter_records(&snap, &["Beta"], &years);
        let labels: Vec<_> = out[0].series.iter().map(|yv| yv.gregorian_year.as_str()).collect();
        assert_eq!(labels, ["2020/21", "2022/23"]);
    }

    #[test]
    fn unknown_categories_are_dropped() {
        let snap = snapshot();
        let out = filter_records(&snap, &["Alpha", "Zeta"], &YearSelection::Single("2020/21".into()));
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].name, "Alpha");
    }

    #[test]
    fn empty_selections_yield_nothing() {
        let snap = snapshot();
        let none: [&str; 0] = [];
        assert!(filter_records(&snap, &none, &YearSelection::Single("2020/21".into())).is_empty());
        assert!(filter_records(&snap, &["Alpha"], &YearSelection::Many(BTreeSet::new())).is_empty());
        assert!(filter_records(&snap, &["Alpha"], &YearSelection::Single(String::new())).is_empty());
    }

    #[test]
    fn null_values_survive_filtering() {
        let snap = snapshot();
        let out = filter_records(&snap, &["Alpha"], &YearSelection::Single("2022/23".into()));
        assert_eq!(out[0].series.len(), 1);
        assert_eq!(out[0].series[0].value, None);
    }

    #[test]
    fn resolve_ignores_unknown_years() {
        let snap = snapshot();
        let years: YearSelection = ["2021/22", "1999/00"].into_iter().collect();
        assert_eq!(years.resolve(&snap), vec!["2021/22".to_string()]);
    }
}
