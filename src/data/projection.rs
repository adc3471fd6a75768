use std::collections::BTreeMap;
use std::fmt;

use crate::color::ColorMap;
use crate::format::{abbreviate_name, format_thousands, unique_keys};

use super::model::CategoryRecord;

// ---------------------------------------------------------------------------
// Modes
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChartMode {
    /// Time series over every year.
    Line,
    /// Categories side by side for the selected year.
    #[default]
    Bar,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    #[default]
    Chart,
    Table,
}

/// What the projection is being built for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectionMode {
    Table,
    Chart(ChartMode),
}

impl ProjectionMode {
    pub fn new(view: ViewMode, chart: ChartMode) -> Self {
        match view {
            ViewMode::Table => ProjectionMode::Table,
            ViewMode::Chart => ProjectionMode::Chart(chart),
        }
    }
}

// ---------------------------------------------------------------------------
// Table shape
// ---------------------------------------------------------------------------

/// A table cell: a value or the explicit no-data marker.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Cell {
    Value(f64),
    NoData,
}

impl From<Option<f64>> for Cell {
    fn from(v: Option<f64>) -> Self {
        v.map(Cell::Value).unwrap_or(Cell::NoData)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Value(v) => write!(f, "{}", format_thousands(*v)),
            Cell::NoData => write!(f, "-"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TableRow {
    pub category: String,
    pub code: String,
    /// One cell per column year, same order as [`TableProjection::years`].
    pub cells: Vec<Cell>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TableProjection {
    pub years: Vec<String>,
    pub rows: Vec<TableRow>,
}

impl TableProjection {
    /// Cell addressed by category name and year label.
    pub fn cell(&self, category: &str, year: &str) -> Option<Cell> {
        let col = self.years.iter().position(|y| y == year)?;
        let row = self.rows.iter().find(|r| r.category == category)?;
        row.cells.get(col).copied()
    }

    pub fn cell_count(&self) -> usize {
        self.rows.iter().map(|r| r.cells.len()).sum()
    }
}

// ---------------------------------------------------------------------------
// Chart shapes
// ---------------------------------------------------------------------------

/// One bar of the single-year chart.
#[derive(Debug, Clone, PartialEq)]
pub struct BarEntry {
    /// Abbreviated axis label.
    pub display_label: String,
    pub full_name: String,
    pub color_key: String,
    pub value: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SingleYearChart {
    pub year: String,
    pub bars: Vec<BarEntry>,
    pub colors: ColorMap,
}

/// Legend entry of the time-series chart.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesInfo {
    pub key: String,
    pub full_name: String,
}

/// One x position of the time-series chart: series key → value.
#[derive(Debug, Clone, PartialEq)]
pub struct YearPoint {
    pub year: String,
    pub values: BTreeMap<String, Option<f64>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MultiYearChart {
    pub series: Vec<SeriesInfo>,
    pub points: Vec<YearPoint>,
    pub colors: ColorMap,
}

impl MultiYearChart {
    /// Values of one series in year order; `None` where a point has no data.
    pub fn series_values(&self, key: &str) -> Vec<Option<f64>> {
        self.points
            .iter()
            .map(|p| p.values.get(key).copied().flatten())
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Projection
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub enum Projection {
    Table(TableProjection),
    SingleYearChart(SingleYearChart),
    MultiYearChart(MultiYearChart),
}

impl Projection {
    /// Whether there is nothing to draw.
    pub fn is_empty(&self) -> bool {
        match self {
            Projection::Table(t) => t.rows.is_empty() || t.years.is_empty(),
            Projection::SingleYearChart(c) => c.bars.is_empty(),
            Projection::MultiYearChart(c) => c.series.is_empty() || c.points.is_empty(),
        }
    }
}

/// Reshape filtered records for presentation.
///
/// Tables get one row per record and one column per entry of `years`.
/// Charts get the single-year bar shape when exactly one year is shown in
/// bar mode, and the per-year time-series shape otherwise. Colours are
/// assigned by record position.
pub fn project(records: &[CategoryRecord], mode: ProjectionMode, years: &[String]) -> Projection {
    match mode {
        ProjectionMode::Table => Projection::Table(table(records, years)),
        ProjectionMode::Chart(ChartMode::Bar) if years.len() == 1 => {
            Projection::SingleYearChart(single_year_chart(records, &years[0]))
        }
        ProjectionMode::Chart(_) => Projection::MultiYearChart(multi_year_chart(records, years)),
    }
}

fn table(records: &[CategoryRecord], years: &[String]) -> TableProjection {
    let rows = records
        .iter()
        .map(|rec| TableRow {
            category: rec.name.clone(),
            code: rec.code.clone(),
            cells: years.iter().map(|y| Cell::from(rec.value_for(y))).collect(),
        })
        .collect();
    TableProjection {
        years: years.to_vec(),
        rows,
    }
}

fn series_keys(records: &[CategoryRecord]) -> Vec<String> {
    let names: Vec<&str> = records.iter().map(|r| r.name.as_str()).collect();
    unique_keys(&names)
}

fn single_year_chart(records: &[CategoryRecord], year: &str) -> SingleYearChart {
    let keys = series_keys(records);
    let bars = records
        .iter()
        .zip(&keys)
        .map(|(rec, key)| BarEntry {
            display_label: abbreviate_name(&rec.name),
            full_name: rec.name.clone(),
            color_key: key.clone(),
            value: rec.value_for(year),
        })
        .collect();
    SingleYearChart {
        year: year.to_string(),
        bars,
        colors: ColorMap::new(&keys),
    }
}

fn multi_year_chart(records: &[CategoryRecord], years: &[String]) -> MultiYearChart {
    let keys = series_keys(records);
    let series = records
        .iter()
        .zip(&keys)
        .map(|(rec, key)| SeriesInfo {
            key: key.clone(),
            full_name: rec.name.clone(),
        })
        .collect();
    let points = years
        .iter()
        .map(|year| YearPoint {
            year: year.clone(),
            values: records
                .iter()
                .zip(&keys)
                .map(|(rec, key)| (key.clone(), rec.value_for(year)))
                .collect(),
        })
        .collect();
    MultiYearChart {
        series,
        points,
        colors: ColorMap::new(&keys),
    }
}
