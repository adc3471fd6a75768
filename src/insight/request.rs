use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::data::model::CategoryRecord;
use crate::error::SelectionError;
use crate::format::numeric_year;

/// Body sent to the text-generation service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsightRequest {
    /// Leading numeric year of each selected fiscal year, ascending.
    pub years: Vec<i32>,
    /// Names of the categories included in `data`.
    pub categories: Vec<String>,
    /// JSON array of `{ name, code, values: [{ year, value }] }`.
    pub data: String,
}

/// Service reply.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsightSummary {
    pub summary: String,
}

/// Build the service request for the current filtered records.
///
/// Refuses empty selections so the service never sees a degenerate request.
pub fn build_insight_request(
    records: &[CategoryRecord],
    years: &[String],
) -> Result<InsightRequest, SelectionError> {
    if records.is_empty() {
        return Err(SelectionError::NoCategories);
    }
    if years.is_empty() {
        return Err(SelectionError::NoYears);
    }

    let payload: Vec<Value> = records
        .iter()
        .map(|rec| {
            let values: Vec<Value> = rec
                .series
                .iter()
                .filter(|yv| years.contains(&yv.gregorian_year))
                .map(|yv| json!({ "year": numeric_year(&yv.gregorian_year), "value": yv.value }))
                .collect();
            json!({ "name": rec.name, "code": rec.code, "values": values })
        })
        .collect();

    Ok(InsightRequest {
        years: years.iter().filter_map(|y| numeric_year(y)).collect(),
        categories: records.iter().map(|r| r.name.clone()).collect(),
        data: Value::Array(payload).to_string(),
    })
}
