//! Label and number formatting shared by the chart, table, export and
//! insight paths.

use std::collections::HashSet;

use crate::data::model::DatasetSnapshot;

// ---------------------------------------------------------------------------
// Numbers
// ---------------------------------------------------------------------------

/// Compact axis label: `2.5M`, `1.5K`, or the plain integer below 1,000.
pub fn format_axis_value(value: f64) -> String {
    if value >= 1_000_000.0 {
        format!("{:.1}M", value / 1_000_000.0)
    } else if value >= 1_000.0 {
        format!("{:.1}K", value / 1_000.0)
    } else {
        format!("{value:.0}")
    }
}

/// Thousands-separated value with at most two decimals: `1,436,072`, `12.5`.
pub fn format_thousands(value: f64) -> String {
    let rounded = (value.abs() * 100.0).round() / 100.0;
    let int_part = rounded.trunc() as u64;
    let cents = ((rounded - rounded.trunc()) * 100.0).round() as u64;

    let digits = int_part.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 4);
    if value < 0.0 && (int_part > 0 || cents > 0) {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    if cents > 0 {
        let frac = format!("{cents:02}");
        out.push('.');
        out.push_str(frac.trim_end_matches('0'));
    }
    out
}

// ---------------------------------------------------------------------------
// Years
// ---------------------------------------------------------------------------

/// `"2022/23"` → `"2022-23"`.
pub fn display_year(year: &str) -> String {
    year.replacen('/', "-", 1)
}

/// Display label with the revision status appended, e.g. `"2023-24 (R)"`.
pub fn year_label_with_status(snapshot: &DatasetSnapshot, year: &str) -> String {
    let (revised, preliminary) = snapshot.year_status(year);
    let mut label = display_year(year);
    if revised {
        label.push_str(" (R)");
    }
    if preliminary {
        label.push_str(" (P)");
    }
    label
}

/// Leading numeric component of a fiscal year: `"2022/23"` → `2022`.
pub fn numeric_year(year: &str) -> Option<i32> {
    year.split('/').next()?.trim().parse().ok()
}

// ---------------------------------------------------------------------------
// Category names
// ---------------------------------------------------------------------------

/// Names at or below this many characters are shown verbatim.
pub const ABBREVIATION_THRESHOLD: usize = 20;

const WORD_PREFIX_LEN: usize = 5;
const FALLBACK_PREFIX_LEN: usize = 18;
const ELLIPSIS: &str = "...";

const ABBREVIATIONS: [(&str, &str); 23] = [
    ("Agriculture, forestry and fishing", "Agri, Forest, Fish"),
    ("Mining and quarrying", "Mining & Quarrying"),
    ("Manufacturing", "Manufacturing"),
    ("Electricity and gas", "Electricity & Gas"),
    ("Water supply; sewerage and waste management", "Water & Waste Mgmt"),
    ("Construction", "Construction"),
    (
        "Wholesale and retail trade; repair of motor vehicles and motorcycles",
        "Wholesale/Retail Trade",
    ),
    ("Transportation and storage", "Transport & Storage"),
    ("Accommodation and food service activities", "Accommodation & Food"),
    ("Information and communication", "Info & Comms"),
    ("Financial and insurance activities", "Finance & Insurance"),
    ("Real estate activities", "Real Estate"),
    ("Professional, scientific and technical activities", "Professional Services"),
    ("Administrative and support service activities", "Admin Services"),
    (
        "Public administration and defence; compulsory social security",
        "Public Admin & Defence",
    ),
    ("Education", "Education"),
    ("Human health and social work activities", "Health & Social Work"),
    ("Other Services", "Other Services"),
    ("Total Agriculture, Forestry and Fishing", "Total Agri."),
    ("Total Non-Agriculture", "Total Non-Agri."),
    ("Gross Domestic Product (GDP) at basic prices", "GDP (Basic Prices)"),
    ("Taxes less subsidies on products", "Taxes less Subsidies"),
    ("Gross Domestic Product (GDP)", "Total GDP"),
];

/// Short axis label for a category name.
///
/// Short names pass through; known names use the lookup table; anything
/// else keeps the first five characters of its first two words (or the
/// first eighteen characters of a one- or two-word name) plus `...`.
pub fn abbreviate_name(name: &str) -> String {
    if name.chars().count() <= ABBREVIATION_THRESHOLD {
        return name.to_string();
    }
    if let Some((_, short)) = ABBREVIATIONS.iter().find(|(full, _)| *full == name) {
        return short.to_string();
    }

    let words: Vec<&str> = name.split_whitespace().collect();
    if words.len() > 2 {
        let head: Vec<String> = words[..2]
            .iter()
            .map(|w| w.chars().take(WORD_PREFIX_LEN).collect())
            .collect();
        format!("{}{ELLIPSIS}", head.join(" "))
    } else {
        let head: String = name.chars().take(FALLBACK_PREFIX_LEN).collect();
        format!("{head}{ELLIPSIS}")
    }
}

/// Identifier-safe key: every character outside `[A-Za-z0-9_]` becomes `_`
/// and runs of `_` collapse to one.
///
/// Distinct names can map to the same key (`"A&B"` and `"A B"`); use
/// [`unique_keys`] when keys must be unique within one chart.
pub fn sanitize_key(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for ch in name.chars() {
        let ch = if ch.is_ascii_alphanumeric() { ch } else { '_' };
        if ch == '_' && out.ends_with('_') {
            continue;
        }
        out.push(ch);
    }
    out
}

/// Sanitised keys for an ordered list of names; later collisions get
/// `_2`, `_3`, ... appended.
pub fn unique_keys<S: AsRef<str>>(names: &[S]) -> Vec<String> {
    let mut taken: HashSet<String> = HashSet::with_capacity(names.len());
    names
        .iter()
        .map(|name| {
            let base = sanitize_key(name.as_ref());
            let mut key = base.clone();
            let mut n = 2;
            while taken.contains(&key) {
                key = format!("{base}_{n}");
                n += 1;
            }
            taken.insert(key.clone());
            key
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn axis_values() {
        assert_eq!(format_axis_value(950.0), "950");
        assert_eq!(format_axis_value(1500.0), "1.5K");
        assert_eq!(format_axis_value(2_500_000.0), "2.5M");
        assert_eq!(format_axis_value(1_000.0), "1.0K");
        assert_eq!(format_axis_value(0.0), "0");
    }

    #[test]
    fn thousands() {
        assert_eq!(format_thousands(1_436_072.0), "1,436,072");
        assert_eq!(format_thousands(999.0), "999");
        assert_eq!(format_thousands(1000.0), "1,000");
        assert_eq!(format_thousands(12.5), "12.5");
        assert_eq!(format_thousands(-2500.25), "-2,500.25");
        assert_eq!(format_thousands(0.0), "0");
    }

    #[test]
    fn years() {
        assert_eq!(display_year("2022/23"), "2022-23");
        assert_eq!(numeric_year("2022/23"), Some(2022));
        assert_eq!(numeric_year("n/a"), None);
    }

    #[test]
    fn short_names_pass_through() {
        assert_eq!(abbreviate_name("Education"), "Education");
        assert_eq!(abbreviate_name("Mining and quarrying"), "Mining and quarrying");
        assert_eq!(abbreviate_name("exactly twenty chars"), "exactly twenty chars");
    }

    #[test]
    fn lookup_table_wins_for_long_names() {
        assert_eq!(abbreviate_name("Gross Domestic Product (GDP)"), "Total GDP");
        assert_eq!(
            abbreviate_name("Accommodation and food service activities"),
            "Accommodation & Food"
        );
    }

    #[test]
    fn generic_abbreviation_truncates() {
        let name = "Extraterritorial organizations and bodies";
        let short = abbreviate_name(name);
        assert_eq!(short, "Extra organ...");
        assert_ne!(short, name);

        let two_words = "Supercalifragilistic expialidocious";
        assert_eq!(abbreviate_name(two_words), "Supercalifragilist...");
    }

    #[test]
    fn sanitizes_and_collapses() {
        assert_eq!(
            sanitize_key("Water supply; sewerage and waste management"),
            "Water_supply_sewerage_and_waste_management"
        );
        assert_eq!(sanitize_key("Gross Domestic Product (GDP)"), "Gross_Domestic_Product_GDP_");
        assert_eq!(sanitize_key("a__b"), "a_b");
    }

    #[test]
    fn colliding_keys_get_suffixes() {
        assert_eq!(sanitize_key("A&B"), sanitize_key("A B"));
        let keys = unique_keys(&["A&B", "A B", "A-B", "C"]);
        assert_eq!(keys, ["A_B", "A_B_2", "A_B_3", "C"]);
    }

    #[test]
    fn unique_keys_skip_names_already_taken() {
        let keys = unique_keys(&["x y", "x_y_2", "x-y"]);
        assert_eq!(keys, ["x_y", "x_y_2", "x_y_3"]);
    }
}
