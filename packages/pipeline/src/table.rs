//! Minimal string-typed table passed between pipeline stages.
//!
//! Staged files are small (dimension code lists and observation
//! extracts), so everything is held in memory as strings and only the
//! operations the cleaning rules need are implemented.

use std::path::Path;

use chrono::NaiveDate;

use crate::error::{PipelineError, Result};

/// An in-memory table: a header row plus string cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    name: String,
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    /// Create an empty table with the given headers.
    pub fn new(name: impl Into<String>, headers: Vec<String>) -> Self {
        Self {
            name: name.into(),
            headers,
            rows: Vec::new(),
        }
    }

    /// Table key, derived from the staged file stem.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    #[must_use]
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Append a row. The row must match the header width.
    pub fn push_row(&mut self, row: Vec<String>) {
        debug_assert_eq!(row.len(), self.headers.len(), "row width mismatch");
        self.rows.push(row);
    }

    /// Read a CSV file with a header row.
    pub fn read_csv(name: &str, path: &Path) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_path(path)?;

        let headers = reader.headers()?.iter().map(String::from).collect();
        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record?;
            rows.push(record.iter().map(String::from).collect());
        }

        Ok(Self {
            name: name.to_string(),
            headers,
            rows,
        })
    }

    /// Write the table as CSV with a header row.
    pub fn write_csv(&self, path: &Path) -> Result<()> {
        let mut writer = csv::Writer::from_path(path)?;
        writer.write_record(&self.headers)?;
        for row in &self.rows {
            writer.write_record(row)?;
        }
        writer.flush()?;
        Ok(())
    }

    /// Index of a named column.
    fn column_index(&self, column: &str) -> Result<usize> {
        self.headers
            .iter()
            .position(|header| header == column)
            .ok_or_else(|| PipelineError::MissingColumn {
                table: self.name.clone(),
                column: column.to_string(),
            })
    }

    /// Drop the named columns from headers and every row.
    pub fn drop_columns(&mut self, columns: &[&str]) -> Result<()> {
        let dropped: Vec<usize> = columns
            .iter()
            .map(|column| self.column_index(column))
            .collect::<Result<_>>()?;

        let keep = |index: &usize| !dropped.contains(index);
        self.headers = take_indexed(&mut self.headers, keep);
        for row in &mut self.rows {
            *row = take_indexed(row, keep);
        }
        Ok(())
    }

    /// Keep only the rows whose `column` cell equals `value`.
    pub fn retain_eq(&mut self, column: &str, value: &str) -> Result<()> {
        let index = self.column_index(column)?;
        self.rows.retain(|row| row[index] == value);
        Ok(())
    }

    /// Sort rows lexicographically by the named column (stable).
    pub fn sort_by(&mut self, column: &str) -> Result<()> {
        let index = self.column_index(column)?;
        self.rows.sort_by(|a, b| a[index].cmp(&b[index]));
        Ok(())
    }

    /// Append a `target` column holding the ISO date of the first day of
    /// the month named in `source` (e.g. `Mar-21` -> `2021-03-01`).
    pub fn derive_month(&mut self, source: &str, target: &str) -> Result<()> {
        let index = self.column_index(source)?;

        let mut parsed = Vec::with_capacity(self.rows.len());
        for row in &self.rows {
            let value = &row[index];
            let date = NaiveDate::parse_from_str(&format!("01-{value}"), "%d-%b-%y").map_err(
                |_| PipelineError::MonthParse {
                    column: source.to_string(),
                    value: value.clone(),
                },
            )?;
            parsed.push(date.format("%Y-%m-%d").to_string());
        }

        self.headers.push(target.to_string());
        for (row, month) in self.rows.iter_mut().zip(parsed) {
            row.push(month);
        }
        Ok(())
    }
}

/// Rebuild a row keeping only the cells whose index passes the filter.
fn take_indexed(cells: &mut Vec<String>, keep: impl Fn(&usize) -> bool) -> Vec<String> {
    std::mem::take(cells)
        .into_iter()
        .enumerate()
        .filter(|(index, _)| keep(index))
        .map(|(_, cell)| cell)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn headers(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| (*v).to_string()).collect()
    }

    fn sample() -> Table {
        let mut table = Table::new("sample", headers(&["code", "label", "dimension"]));
        table.push_row(headers(&["2021", "2021", "calendar-years"]));
        table.push_row(headers(&["2019", "2019", "calendar-years"]));
        table.push_row(headers(&["2020", "2020", "calendar-years"]));
        table
    }

    #[test]
    fn test_drop_columns() {
        let mut table = sample();
        table.drop_columns(&["dimension"]).unwrap();
        assert_eq!(table.headers(), &["code", "label"]);
        assert_eq!(table.rows()[0], vec!["2021", "2021"]);
    }

    #[test]
    fn test_drop_missing_column_errors() {
        let mut table = sample();
        let result = table.drop_columns(&["no-such-column"]);
        assert!(matches!(
            result,
            Err(PipelineError::MissingColumn { .. })
        ));
    }

    #[test]
    fn test_sort_by() {
        let mut table = sample();
        table.sort_by("code").unwrap();
        let codes: Vec<&str> = table.rows().iter().map(|r| r[0].as_str()).collect();
        assert_eq!(codes, vec!["2019", "2020", "2021"]);
    }

    #[test]
    fn test_retain_eq() {
        let mut table = Table::new("t", headers(&["aggregate", "value"]));
        table.push_row(headers(&["CP00", "1"]));
        table.push_row(headers(&["CP01", "2"]));
        table.push_row(headers(&["CP00", "3"]));

        table.retain_eq("aggregate", "CP00").unwrap();
        assert_eq!(table.len(), 2);
        assert!(table.rows().iter().all(|r| r[0] == "CP00"));
    }

    #[test]
    fn test_derive_month() {
        let mut table = Table::new("t", headers(&["mmm-yy"]));
        table.push_row(headers(&["Mar-21"]));
        table.push_row(headers(&["Dec-19"]));

        table.derive_month("mmm-yy", "month_start").unwrap();
        assert_eq!(table.headers(), &["mmm-yy", "month_start"]);
        assert_eq!(table.rows()[0][1], "2021-03-01");
        assert_eq!(table.rows()[1][1], "2019-12-01");
    }

    #[test]
    fn test_derive_month_bad_value() {
        let mut table = Table::new("t", headers(&["mmm-yy"]));
        table.push_row(headers(&["not-a-month"]));

        let result = table.derive_month("mmm-yy", "month_start");
        assert!(matches!(result, Err(PipelineError::MonthParse { .. })));
    }

    #[test]
    fn test_csv_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sample.csv");

        let table = sample();
        table.write_csv(&path).unwrap();
        let loaded = Table::read_csv("sample", &path).unwrap();

        assert_eq!(loaded, table);
    }
}
