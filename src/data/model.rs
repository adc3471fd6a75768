use std::collections::BTreeSet;

use crate::error::DatasetError;

use super::source::{RawCell, RawTable};

// ---------------------------------------------------------------------------
// YearValue – one observation
// ---------------------------------------------------------------------------

/// A single yearly observation for one category.
#[derive(Debug, Clone, PartialEq)]
pub struct YearValue {
    /// Nepali fiscal year with any status marker stripped, e.g. `"2080/81"`.
    pub nepali_year: String,
    /// Gregorian fiscal year, `"YYYY/YY"`.
    pub gregorian_year: String,
    /// `None` marks a gap in the source.
    pub value: Option<f64>,
    pub is_revised: bool,
    pub is_preliminary: bool,
}

// ---------------------------------------------------------------------------
// CategoryRecord – one industrial division or aggregate
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct CategoryRecord {
    /// NSIC code or aggregate identifier (`"A"`, `"GDP_TOTAL"`, ...).
    pub code: String,
    pub name: String,
    /// Chronologically ascending, one entry per snapshot year.
    pub series: Vec<YearValue>,
}

impl CategoryRecord {
    /// Look up the observation for a Gregorian year label.
    pub fn observation(&self, year: &str) -> Option<&YearValue> {
        self.series.iter().find(|yv| yv.gregorian_year == year)
    }

    /// Value for a year; `None` both for gaps and for years outside the series.
    pub fn value_for(&self, year: &str) -> Option<f64> {
        self.observation(year).and_then(|yv| yv.value)
    }
}

// ---------------------------------------------------------------------------
// DatasetSnapshot – the immutable, normalised dataset
// ---------------------------------------------------------------------------

/// Normalised dataset built once at startup and shared read-only afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct DatasetSnapshot {
    years: Vec<String>,
    category_names: Vec<String>,
    records: Vec<CategoryRecord>,
}

impl DatasetSnapshot {
    /// Normalise a raw table.
    ///
    /// Every row is zipped positionally against the year headers, status
    /// markers are stripped from the Nepali labels into the revised /
    /// preliminary flags, and delimited numeric strings are parsed. Any shape
    /// problem is returned as a [`DatasetError`]; callers treat it as fatal.
    pub fn from_raw(table: &RawTable) -> Result<Self, DatasetError> {
        if table.nepali_years.len() != table.gregorian_years.len() {
            return Err(DatasetError::HeaderMismatch {
                nepali: table.nepali_years.len(),
                gregorian: table.gregorian_years.len(),
            });
        }

        let years = checked_years(&table.gregorian_years)?;
        let headers: Vec<(String, bool, bool)> = table
            .nepali_years
            .iter()
            .map(|label| strip_status_marker(label))
            .collect();

        let mut seen_names = BTreeSet::new();
        let mut category_names = Vec::with_capacity(table.categories.len());
        let mut records = Vec::with_capacity(table.categories.len());

        for raw in &table.categories {
            if !seen_names.insert(raw.name.as_str()) {
                return Err(DatasetError::DuplicateCategory(raw.name.clone()));
            }
            if raw.values.len() != years.len() {
                return Err(DatasetError::LengthMismatch {
                    category: raw.name.clone(),
                    expected: years.len(),
                    found: raw.values.len(),
                });
            }

            let mut series = Vec::with_capacity(years.len());
            for (cell, ((nepali, revised, preliminary), gregorian)) in
                raw.values.iter().zip(headers.iter().zip(years.iter()))
            {
                let value = parse_cell(cell).map_err(|literal| DatasetError::InvalidNumber {
                    category: raw.name.clone(),
                    year: gregorian.clone(),
                    literal,
                })?;
                series.push(YearValue {
                    nepali_year: nepali.clone(),
                    gregorian_year: gregorian.clone(),
                    value,
                    is_revised: *revised,
                    is_preliminary: *preliminary,
                });
            }

            category_names.push(raw.name.clone());
            records.push(CategoryRecord {
                code: raw.code.clone(),
                name: raw.name.clone(),
                series,
            });
        }

        log::debug!(
            "Normalised {} categories over {} years",
            records.len(),
            years.len()
        );

        Ok(DatasetSnapshot {
            years,
            category_names,
            records,
        })
    }

    /// All Gregorian years, ascending.
    pub fn years(&self) -> &[String] {
        &self.years
    }

    /// All category names in source order.
    pub fn category_names(&self) -> &[String] {
        &self.category_names
    }

    pub fn records(&self) -> &[CategoryRecord] {
        &self.records
    }

    pub fn record(&self, name: &str) -> Option<&CategoryRecord> {
        self.records.iter().find(|r| r.name == name)
    }

    pub fn year_index(&self, year: &str) -> Option<usize> {
        self.years.iter().position(|y| y == year)
    }

    /// Revised / preliminary status of a year, read from the first record.
    pub fn year_status(&self, year: &str) -> (bool, bool) {
        self.records
            .first()
            .and_then(|r| r.observation(year))
            .map(|yv| (yv.is_revised, yv.is_preliminary))
            .unwrap_or((false, false))
    }

    /// Number of categories.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the snapshot has no categories.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

// -- Normalisation helpers --

fn checked_years(labels: &[String]) -> Result<Vec<String>, DatasetError> {
    let mut years: Vec<String> = Vec::with_capacity(labels.len());
    for label in labels {
        let label = label.trim();
        if years.iter().any(|y| y == label) {
            return Err(DatasetError::DuplicateYear(label.to_string()));
        }
        if let Some(previous) = years.last() {
            if previous.as_str() > label {
                return Err(DatasetError::UnsortedYears {
                    previous: previous.clone(),
                    next: label.to_string(),
                });
            }
        }
        years.push(label.to_string());
    }
    Ok(years)
}

/// Split `"2080/81 R"` into `("2080/81", revised, preliminary)`.
fn strip_status_marker(label: &str) -> (String, bool, bool) {
    let mut parts = label.split_whitespace();
    let canonical = parts.next().unwrap_or_default().to_string();
    let mut revised = false;
    let mut preliminary = false;
    for marker in parts {
        match marker {
            "R" => revised = true,
            "P" => preliminary = true,
            other => log::warn!("Ignoring unknown year marker '{other}' on '{label}'"),
        }
    }
    (canonical, revised, preliminary)
}

/// Parse a raw cell; the error carries the offending literal.
fn parse_cell(cell: &RawCell) -> Result<Option<f64>, String> {
    match cell {
        RawCell::Missing => Ok(None),
        RawCell::Number(v) if v.is_finite() => Ok(Some(*v)),
        RawCell::Number(v) => Err(v.to_string()),
        RawCell::Text(s) => {
            let cleaned: String = s.trim().chars().filter(|c| *c != ',').collect();
            cleaned
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .map(Some)
                .ok_or_else(|| s.clone())
        }
    }
}
