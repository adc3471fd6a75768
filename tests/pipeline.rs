//! Normalise → filter → project, end to end.

use gva_dashboard::data::filter::{filter_records, YearSelection};
use gva_dashboard::data::model::DatasetSnapshot;
use gva_dashboard::data::projection::{project, Cell, ChartMode, Projection, ProjectionMode};
use gva_dashboard::data::source::{gva_table, RawCell, RawTable};
use gva_dashboard::error::DatasetError;
use proptest::prelude::*;

fn small_snapshot() -> DatasetSnapshot {
    let table = RawTable::new(["2077/78", "2078/79 R", "2079/80 P"], ["2020/21", "2021/22", "2022/23"])
        .with_category("A", "Agriculture", [RawCell::from(10_i64), RawCell::Missing, RawCell::from("1,250")])
        .with_category("B", "Mining", [1_i64, 2, 3])
        .with_category("C", "Construction", [7_i64, 8, 9]);
    DatasetSnapshot::from_raw(&table).unwrap()
}

fn all_years(snapshot: &DatasetSnapshot) -> YearSelection {
    snapshot.years().iter().cloned().collect()
}

// ============================================================================
// Embedded dataset
// ============================================================================

#[test]
fn embedded_table_normalises() {
    let snapshot = DatasetSnapshot::from_raw(&gva_table()).unwrap();
    assert_eq!(snapshot.len(), 23);
    assert_eq!(snapshot.years().len(), 15);
    assert_eq!(snapshot.years().first().map(String::as_str), Some("2010/11"));
    assert_eq!(snapshot.years().last().map(String::as_str), Some("2024/25"));
    assert_eq!(snapshot.year_status("2023/24"), (true, false));
    assert_eq!(snapshot.year_status("2024/25"), (false, true));
    assert_eq!(snapshot.year_status("2015/16"), (false, false));
    assert_eq!(
        snapshot.record("Education").and_then(|r| r.value_for("2022/23")),
        Some(140055.0)
    );
}

#[test]
fn malformed_tables_are_rejected() {
    let short = RawTable::new(["2077/78", "2078/79"], ["2020/21", "2021/22"]).with_category("A", "Agriculture", [1_i64]);
    assert!(matches!(
        DatasetSnapshot::from_raw(&short),
        Err(DatasetError::LengthMismatch { expected: 2, found: 1, .. })
    ));

    let headers = RawTable::new(["2077/78"], ["2020/21", "2021/22"]);
    assert!(matches!(
        DatasetSnapshot::from_raw(&headers),
        Err(DatasetError::HeaderMismatch { nepali: 1, gregorian: 2 })
    ));
}

// ============================================================================
// Filter + table projection
// ============================================================================

#[test]
fn two_by_three_grid_keeps_gaps() {
    let snapshot = small_snapshot();
    let years = snapshot.years().to_vec();
    let records = filter_records(&snapshot, &["Mining", "Agriculture"], &all_years(&snapshot));
    let Projection::Table(table) = project(&records, ProjectionMode::Table, &years) else {
        panic!("expected table projection");
    };

    assert_eq!(table.cell_count(), 6);
    let expected = [
        ("Agriculture", [Cell::Value(10.0), Cell::NoData, Cell::Value(1250.0)]),
        ("Mining", [Cell::Value(1.0), Cell::Value(2.0), Cell::Value(3.0)]),
    ];
    assert_eq!(table.rows.len(), expected.len());
    for (row, (name, cells)) in table.rows.iter().zip(&expected) {
        assert_eq!(row.category, *name);
        assert_eq!(row.cells, cells.to_vec());
        for (year, cell) in years.iter().zip(cells) {
            assert_eq!(table.cell(name, year), Some(*cell));
        }
    }
    assert_eq!(table.cell("Agriculture", "2022/23").map(|c| c.to_string()).as_deref(), Some("1,250"));
}

#[test]
fn unknown_category_is_ignored() {
    let snapshot = small_snapshot();
    let records = filter_records(&snapshot, &["Agriculture", "Zoology"], &all_years(&snapshot));
    let names: Vec<&str> = records.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, ["Agriculture"]);
}

#[test]
fn empty_selections_project_to_nothing() {
    let snapshot = small_snapshot();
    let none: [&str; 0] = [];
    assert!(filter_records(&snapshot, &none, &all_years(&snapshot)).is_empty());

    let no_years = YearSelection::Many(Default::default());
    assert!(filter_records(&snapshot, &["Mining"], &no_years).is_empty());

    let chart = ProjectionMode::Chart(ChartMode::Bar);
    assert!(project(&[], chart, &["2020/21".to_string()]).is_empty());
}

// ============================================================================
// Chart projections
// ============================================================================

#[test]
fn bar_mode_with_one_year_is_a_single_year_chart() {
    let snapshot = small_snapshot();
    let year = "2021/22".to_string();
    let records = filter_records(&snapshot, snapshot.category_names(), &YearSelection::Single(year.clone()));
    let Projection::SingleYearChart(chart) = project(&records, ProjectionMode::Chart(ChartMode::Bar), &[year])
    else {
        panic!("expected single-year chart");
    };
    assert_eq!(chart.bars.len(), 3);
    assert_eq!(chart.bars[0].value, None);
    assert_eq!(chart.bars[1].value, Some(2.0));
}

#[test]
fn line_mode_covers_every_year() {
    let snapshot = small_snapshot();
    let years = snapshot.years().to_vec();
    let records = filter_records(&snapshot, &["Agriculture", "Construction"], &all_years(&snapshot));
    let Projection::MultiYearChart(chart) = project(&records, ProjectionMode::Chart(ChartMode::Line), &years)
    else {
        panic!("expected multi-year chart");
    };
    assert_eq!(chart.points.len(), 3);
    assert_eq!(chart.series.len(), 2);
    let key = &chart.series[0].key;
    assert_eq!(chart.series_values(key), vec![Some(10.0), None, Some(1250.0)]);
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #[test]
    fn table_has_one_cell_per_category_and_year(
        picks in proptest::collection::vec(any::<bool>(), 23),
        first in 0usize..15,
        span in 1usize..15,
    ) {
        let snapshot = DatasetSnapshot::from_raw(&gva_table()).unwrap();
        let categories: Vec<String> = snapshot
            .category_names()
            .iter()
            .zip(&picks)
            .filter(|(_, keep)| **keep)
            .map(|(name, _)| name.clone())
            .collect();
        let last = (first + span).min(15);
        let years: Vec<String> = snapshot.years()[first..last].to_vec();

        let records = filter_records(&snapshot, &categories, &years.iter().cloned().collect());
        prop_assert_eq!(records.len(), categories.len());

        match project(&records, ProjectionMode::Table, &years) {
            Projection::Table(table) => {
                prop_assert_eq!(table.cell_count(), categories.len() * years.len());
                for row in &table.rows {
                    prop_assert_eq!(row.cells.len(), years.len());
                }
            }
            other => prop_assert!(false, "unexpected projection {:?}", other),
        }
    }
}
