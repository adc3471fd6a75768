use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};

use crate::data::model::CategoryRecord;
use crate::error::SelectionError;
use crate::format::display_year;

/// Header of the category column.
pub const CATEGORY_HEADER: &str = "Industrial Division";

/// Refuse exports that would produce an empty file.
pub fn check_exportable(records: &[CategoryRecord], years: &[String]) -> Result<(), SelectionError> {
    if records.is_empty() {
        return Err(SelectionError::NoCategories);
    }
    if years.is_empty() {
        return Err(SelectionError::NoYears);
    }
    Ok(())
}

/// Default file name for an export of `years`.
pub fn suggested_file_name(years: &[String]) -> String {
    match years {
        [] => "gva_data.csv".to_string(),
        [only] => format!("gva_data_{}.csv", display_year(only)),
        [first, .., last] => format!(
            "gva_data_{}_to_{}.csv",
            display_year(first),
            display_year(last)
        ),
    }
}

/// Source-style number: integers without a decimal point.
fn plain_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}

/// Write one header row and one row per record; gaps are empty fields.
pub fn write_csv<W: Write>(writer: W, records: &[CategoryRecord], years: &[String]) -> Result<()> {
    check_exportable(records, years)?;

    let mut wtr = csv::Writer::from_writer(writer);

    let mut header = Vec::with_capacity(years.len() + 1);
    header.push(CATEGORY_HEADER.to_string());
    header.extend(years.iter().map(|y| format!("GVA ({})", display_year(y))));
    wtr.write_record(&header).context("writing CSV header")?;

    for rec in records {
        let mut row = Vec::with_capacity(years.len() + 1);
        row.push(rec.name.clone());
        row.extend(
            years
                .iter()
                .map(|y| rec.value_for(y).map(plain_number).unwrap_or_default()),
        );
        wtr.write_record(&row)
            .with_context(|| format!("writing CSV row for '{}'", rec.name))?;
    }

    wtr.flush().context("flushing CSV output")?;
    Ok(())
}

/// Export to a file on disk.
pub fn export_csv_file(path: &Path, records: &[CategoryRecord], years: &[String]) -> Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("creating {}", path.display()))?;
    write_csv(file, records, years)?;
    log::info!(
        "Exported {} rows x {} years to {}",
        records.len(),
        years.len(),
        path.display()
    );
    Ok(())
}
