// src/analysis/mod.rs

use anyhow::{Context, Result};
use arrow::{
    array::{ArrayRef, BooleanArray, Date32Array, Int64Array, StringArray},
    csv::WriterBuilder,
    datatypes::{DataType, Field, Schema as ArrowSchema},
    record_batch::RecordBatch,
};
use chrono::NaiveDate;
use std::{fs::File, path::Path, sync::Arc};
use tracing::{debug, info};

use crate::parse::Dialect;
use crate::record::{read_parquet, to_date32, NormalizedRecord};

/// How long one show ran, for the "longest running" report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunLength {
    pub title: String,
    /// `Some(true)` while still on air, `None` for sections that are neither
    /// current nor former programming.
    pub active: Option<bool>,
    pub premiere_date: Option<NaiveDate>,
    pub finale_date: Option<NaiveDate>,
    pub delta_days: Option<i64>,
}

/// Run lengths of every show listed under the given H4 section, longest
/// first. Shows still on air run until `today`. Shows without a premiere
/// date sort last.
pub fn longest_running(
    records: &[NormalizedRecord],
    section: &str,
    today: NaiveDate,
) -> Vec<RunLength> {
    let mut runs: Vec<RunLength> = records
        .iter()
        .filter(|r| r.h4.as_deref() == Some(section))
        .map(|r| {
            let finale = r.finale_date.unwrap_or(today);
            RunLength {
                title: r.title.clone(),
                active: r
                    .h2
                    .as_deref()
                    .and_then(Dialect::from_h2)
                    .map(|d| d == Dialect::Current),
                premiere_date: r.premiere_date,
                finale_date: Some(finale),
                delta_days: r.premiere_date.map(|p| (finale - p).num_days()),
            }
        })
        .collect();

    // stable: ties keep page order
    runs.sort_by(|a, b| match (a.delta_days, b.delta_days) {
        (Some(x), Some(y)) => y.cmp(&x),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => std::cmp::Ordering::Equal,
    });
    debug!(section, shows = runs.len(), "computed run lengths");
    runs
}

pub fn run_lengths_to_batch(runs: &[RunLength]) -> Result<RecordBatch> {
    let schema = ArrowSchema::new(vec![
        Field::new("Title", DataType::Utf8, false),
        Field::new("Active", DataType::Boolean, true),
        Field::new("PremiereDate", DataType::Date32, true),
        Field::new("FinaleDate", DataType::Date32, true),
        Field::new("DeltaDays", DataType::Int64, true),
    ]);
    let columns: Vec<ArrayRef> = vec![
        Arc::new(StringArray::from_iter_values(runs.iter().map(|r| r.title.as_str()))),
        Arc::new(runs.iter().map(|r| r.active).collect::<BooleanArray>()),
        Arc::new(
            runs.iter()
                .map(|r| r.premiere_date.map(to_date32))
                .collect::<Date32Array>(),
        ),
        Arc::new(
            runs.iter()
                .map(|r| r.finale_date.map(to_date32))
                .collect::<Date32Array>(),
        ),
        Arc::new(runs.iter().map(|r| r.delta_days).collect::<Int64Array>()),
    ];
    RecordBatch::try_new(Arc::new(schema), columns).map_err(Into::into)
}

/// Write the report as CSV with a header row.
pub fn write_run_lengths_csv(runs: &[RunLength], path: &Path) -> Result<()> {
    let batch = run_lengths_to_batch(runs)?;
    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    let mut writer = WriterBuilder::new().with_header(true).build(file);
    writer.write(&batch)?;
    debug!(path = %path.display(), rows = batch.num_rows(), "wrote csv");
    Ok(())
}

/// Rebuild the run-length report from a record set already on disk.
pub fn report_from_parquet(
    records_path: &Path,
    section: &str,
    today: NaiveDate,
    out_path: &Path,
) -> Result<Vec<RunLength>> {
    let records = read_parquet(records_path)?;
    info!(rows = records.len(), path = %records_path.display(), "loaded records");
    let runs = longest_running(&records, section, today);
    write_run_lengths_csv(&runs, out_path)?;
    Ok(runs)
}
