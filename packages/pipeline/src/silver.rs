//! Load staged bronze tables, apply cleaning rules, write silver tables.

use std::collections::BTreeMap;
use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};

use ons_harvester::Staging;

use crate::clean::{self, CleaningRule};
use crate::error::Result;
use crate::table::Table;

/// Summary of a completed transform pass.
#[derive(Debug, Default)]
pub struct TransformReport {
    /// Table keys that had a cleaning rule applied.
    pub cleaned: Vec<String>,

    /// Table keys written through unmodified.
    pub passthrough: Vec<String>,
}

/// Transform every staged table into the silver area.
///
/// Dimension and fact tables are processed with their respective rule
/// registries; tables without a rule pass through unmodified.
pub fn run_transform(staging: &Staging) -> Result<TransformReport> {
    staging.ensure_layout()?;

    let mut report = TransformReport::default();
    transform_dir(
        &staging.dimensions_dir(),
        &staging.clean_dimensions_dir(),
        &clean::dimension_rules(),
        &mut report,
    )?;
    transform_dir(
        &staging.facts_dir(),
        &staging.clean_facts_dir(),
        &clean::fact_rules(),
        &mut report,
    )?;

    tracing::info!(
        cleaned = report.cleaned.len(),
        passthrough = report.passthrough.len(),
        "Transform complete"
    );
    Ok(report)
}

/// Transform every `.csv` file in `source` into `dest`.
fn transform_dir(
    source: &Path,
    dest: &Path,
    rules: &BTreeMap<&'static str, CleaningRule>,
    report: &mut TransformReport,
) -> Result<()> {
    let mut paths: Vec<PathBuf> = fs::read_dir(source)?
        .collect::<std::io::Result<Vec<_>>>()?
        .into_iter()
        .map(|entry| entry.path())
        .filter(|path| path.extension() == Some(OsStr::new("csv")))
        .collect();
    paths.sort();

    for path in paths {
        let Some(key) = path.file_stem().and_then(OsStr::to_str) else {
            continue;
        };

        let mut table = Table::read_csv(key, &path)?;
        match rules.get(key) {
            Some(rule) => {
                clean::apply(rule, &mut table)?;
                tracing::debug!(table = key, rows = table.len(), "Cleaned table");
                report.cleaned.push(key.to_string());
            }
            None => {
                tracing::debug!(table = key, "No cleaning rule, passing through");
                report.passthrough.push(key.to_string());
            }
        }

        table.write_csv(&dest.join(format!("{key}.csv")))?;
    }

    Ok(())
}
