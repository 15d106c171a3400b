//! Declarative cleaning rules applied to staged tables.
//!
//! Each staged table key maps to one [`CleaningRule`]; tables without a
//! rule pass through unmodified. Adding a new table (including the
//! still-missing fact tables) means registering a rule, not writing new
//! control flow.

use std::collections::BTreeMap;

use crate::error::Result;
use crate::table::Table;

/// Cleaning specification for one table key.
///
/// Steps are applied in a fixed order: derive the month column, filter,
/// drop columns, sort. The filter and date source columns may themselves
/// be dropped afterwards.
#[derive(Debug, Default, Clone)]
pub struct CleaningRule {
    /// `(source, target)`: parse `source` as `mmm-yy` into an ISO date
    /// column named `target`.
    pub derive_month: Option<(&'static str, &'static str)>,

    /// `(column, value)`: keep only rows where `column` equals `value`.
    pub keep_only: Option<(&'static str, &'static str)>,

    /// Columns to drop.
    pub drop_columns: &'static [&'static str],

    /// Column to sort by (lexicographic, stable).
    pub sort_by: Option<&'static str>,
}

/// Cleaning rules for staged dimension tables.
pub fn dimension_rules() -> BTreeMap<&'static str, CleaningRule> {
    let drop_dimension_tag = CleaningRule {
        drop_columns: &["dimension"],
        ..CleaningRule::default()
    };

    BTreeMap::from([
        (
            "calendar-years",
            CleaningRule {
                drop_columns: &["dimension"],
                sort_by: Some("code"),
                ..CleaningRule::default()
            },
        ),
        (
            "cpih",
            CleaningRule {
                derive_month: Some(("mmm-yy", "month_start")),
                keep_only: Some(("cpih1dim1aggid", "CP00")),
                drop_columns: &["cpih1dim1aggid", "Aggregate", "Geography", "mmm-yy", "Time"],
                sort_by: Some("month_start"),
            },
        ),
        ("parliamentary-constituencies", drop_dimension_tag.clone()),
        ("sex", drop_dimension_tag.clone()),
        ("working-pattern", drop_dimension_tag.clone()),
        ("workplace-or-residence", drop_dimension_tag),
    ])
}

/// Cleaning rules for staged fact tables.
///
/// None registered yet; observation extracts currently pass through
/// unmodified.
pub fn fact_rules() -> BTreeMap<&'static str, CleaningRule> {
    BTreeMap::new()
}

/// Apply a cleaning rule to a table in place.
pub fn apply(rule: &CleaningRule, table: &mut Table) -> Result<()> {
    if let Some((source, target)) = rule.derive_month {
        table.derive_month(source, target)?;
    }
    if let Some((column, value)) = rule.keep_only {
        table.retain_eq(column, value)?;
    }
    if !rule.drop_columns.is_empty() {
        table.drop_columns(rule.drop_columns)?;
    }
    if let Some(column) = rule.sort_by {
        table.sort_by(column)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn row(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| (*v).to_string()).collect()
    }

    #[test]
    fn test_calendar_years_rule() {
        let rules = dimension_rules();
        let rule = rules.get("calendar-years").unwrap();

        let mut table = Table::new(
            "calendar-years",
            row(&["code", "label", "dimension"]),
        );
        table.push_row(row(&["2021", "2021", "calendar-years"]));
        table.push_row(row(&["2019", "2019", "calendar-years"]));

        apply(rule, &mut table).unwrap();

        assert_eq!(table.headers(), &["code", "label"]);
        let codes: Vec<&str> = table.rows().iter().map(|r| r[0].as_str()).collect();
        assert_eq!(codes, vec!["2019", "2021"]);
    }

    #[test]
    fn test_cpih_rule() {
        let rules = dimension_rules();
        let rule = rules.get("cpih").unwrap();

        let mut table = Table::new(
            "cpih",
            row(&["v4_0", "mmm-yy", "Time", "Geography", "cpih1dim1aggid", "Aggregate"]),
        );
        table.push_row(row(&["104.2", "Mar-21", "Mar-21", "K02000001", "CP00", "Overall Index"]));
        table.push_row(row(&["101.6", "Jan-20", "Jan-20", "K02000001", "CP00", "Overall Index"]));
        table.push_row(row(&["98.7", "Feb-20", "Feb-20", "K02000001", "CP01", "Food"]));

        apply(rule, &mut table).unwrap();

        // Only the overall-index rows survive, with the derived month
        // column, API bookkeeping columns dropped, sorted by month.
        assert_eq!(table.headers(), &["v4_0", "month_start"]);
        assert_eq!(
            table.rows(),
            &[row(&["101.6", "2020-01-01"]), row(&["104.2", "2021-03-01"])]
        );
    }

    #[test]
    fn test_all_dimension_rules_have_known_keys() {
        let rules = dimension_rules();
        let keys: Vec<&str> = rules.keys().copied().collect();
        assert_eq!(
            keys,
            vec![
                "calendar-years",
                "cpih",
                "parliamentary-constituencies",
                "sex",
                "working-pattern",
                "workplace-or-residence",
            ]
        );
    }

    #[test]
    fn test_fact_rules_currently_empty() {
        assert!(fact_rules().is_empty());
    }
}
