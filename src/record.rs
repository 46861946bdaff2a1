// src/record.rs

use anyhow::{anyhow, Context, Result};
use arrow::{
    array::{Array, ArrayRef, Date32Array, StringArray, UInt16Array, UInt32Array},
    datatypes::{DataType, Field, Schema as ArrowSchema},
    record_batch::RecordBatch,
};
use chrono::{Days, NaiveDate};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use parquet::arrow::ArrowWriter;
use parquet::file::properties::WriterProperties;
use std::{
    fs::{self, File},
    io::BufWriter,
    path::Path,
    sync::Arc,
};
use tracing::debug;

/// One programme row, stamped with the headings it was listed under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedRecord {
    pub h2: Option<String>,
    pub h3: Option<String>,
    pub h4: Option<String>,
    pub h5: Option<String>,
    /// Position within the source table, after empty rows were dropped.
    pub sub_index: u32,
    pub title: String,
    pub premiere_date: Option<NaiveDate>,
    /// Only former programming has ended.
    pub finale_date: Option<NaiveDate>,
    /// Only current programming lists a season count.
    pub number_seasons: Option<u16>,
}

fn epoch() -> NaiveDate {
    NaiveDate::from_ymd_opt(1970, 1, 1).expect("unix epoch is a valid date")
}

pub(crate) fn to_date32(d: NaiveDate) -> i32 {
    (d - epoch()).num_days() as i32
}

pub(crate) fn from_date32(days: i32) -> Option<NaiveDate> {
    if days >= 0 {
        epoch().checked_add_days(Days::new(days as u64))
    } else {
        epoch().checked_sub_days(Days::new(days.unsigned_abs() as u64))
    }
}

/// Column layout written to disk. Names match the downstream queries.
pub fn schema() -> ArrowSchema {
    ArrowSchema::new(vec![
        Field::new("H2", DataType::Utf8, true),
        Field::new("H3", DataType::Utf8, true),
        Field::new("H4", DataType::Utf8, true),
        Field::new("H5", DataType::Utf8, true),
        Field::new("SubIndex", DataType::UInt32, false),
        Field::new("Title", DataType::Utf8, false),
        Field::new("PremiereDate", DataType::Date32, true),
        Field::new("FinaleDate", DataType::Date32, true),
        Field::new("NumberSeasons", DataType::UInt16, true),
    ])
}

pub fn records_to_batch(records: &[NormalizedRecord]) -> Result<RecordBatch> {
    let text = |f: fn(&NormalizedRecord) -> Option<&str>| -> ArrayRef {
        Arc::new(records.iter().map(f).collect::<StringArray>())
    };
    let date = |f: fn(&NormalizedRecord) -> Option<NaiveDate>| -> ArrayRef {
        Arc::new(
            records
                .iter()
                .map(|r| f(r).map(to_date32))
                .collect::<Date32Array>(),
        )
    };

    let columns: Vec<ArrayRef> = vec![
        text(|r| r.h2.as_deref()),
        text(|r| r.h3.as_deref()),
        text(|r| r.h4.as_deref()),
        text(|r| r.h5.as_deref()),
        Arc::new(UInt32Array::from_iter_values(
            records.iter().map(|r| r.sub_index),
        )),
        Arc::new(StringArray::from_iter_values(
            records.iter().map(|r| r.title.as_str()),
        )),
        date(|r| r.premiere_date),
        date(|r| r.finale_date),
        Arc::new(
            records
                .iter()
                .map(|r| r.number_seasons)
                .collect::<UInt16Array>(),
        ),
    ];

    RecordBatch::try_new(Arc::new(schema()), columns).map_err(Into::into)
}

/// Write the record set as a single Parquet file. The file is written next
/// to its destination and renamed into place once closed.
pub fn write_parquet(records: &[NormalizedRecord], path: &Path) -> Result<()> {
    let batch = records_to_batch(records)?;
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    }

    let props = WriterProperties::builder()
        .set_dictionary_enabled(true)
        .build();
    let tmp = path.with_extension("tmp");
    let file = File::create(&tmp).with_context(|| format!("creating {}", tmp.display()))?;
    let mut writer = ArrowWriter::try_new(BufWriter::new(file), batch.schema(), Some(props))?;
    writer.write(&batch)?;
    writer.close()?;
    fs::rename(&tmp, path)
        .with_context(|| format!("renaming {} to {}", tmp.display(), path.display()))?;

    debug!(path = %path.display(), rows = batch.num_rows(), "wrote parquet");
    Ok(())
}

fn column<'a, T: 'static>(batch: &'a RecordBatch, name: &str) -> Result<&'a T> {
    batch
        .column_by_name(name)
        .ok_or_else(|| anyhow!("missing column `{}`", name))?
        .as_any()
        .downcast_ref::<T>()
        .ok_or_else(|| anyhow!("column `{}` has an unexpected type", name))
}

fn opt_str(arr: &StringArray, i: usize) -> Option<String> {
    (!arr.is_null(i)).then(|| arr.value(i).to_string())
}

fn opt_date(arr: &Date32Array, i: usize) -> Option<NaiveDate> {
    if arr.is_null(i) {
        None
    } else {
        from_date32(arr.value(i))
    }
}

/// Load a record set previously written by [`write_parquet`].
pub fn read_parquet(path: &Path) -> Result<Vec<NormalizedRecord>> {
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    let reader = ParquetRecordBatchReaderBuilder::try_new(file)?
        .with_batch_size(1024)
        .build()?;

    let mut records = Vec::new();
    for batch in reader {
        let batch = batch?;
        let h2 = column::<StringArray>(&batch, "H2")?;
        let h3 = column::<StringArray>(&batch, "H3")?;
        let h4 = column::<StringArray>(&batch, "H4")?;
        let h5 = column::<StringArray>(&batch, "H5")?;
        let sub_index = column::<UInt32Array>(&batch, "SubIndex")?;
        let title = column::<StringArray>(&batch, "Title")?;
        let premiere = column::<Date32Array>(&batch, "PremiereDate")?;
        let finale = column::<Date32Array>(&batch, "FinaleDate")?;
        let seasons = column::<UInt16Array>(&batch, "NumberSeasons")?;

        for i in 0..batch.num_rows() {
            records.push(NormalizedRecord {
                h2: opt_str(h2, i),
                h3: opt_str(h3, i),
                h4: opt_str(h4, i),
                h5: opt_str(h5, i),
                sub_index: sub_index.value(i),
                title: title.value(i).to_string(),
                premiere_date: opt_date(premiere, i),
                finale_date: opt_date(finale, i),
                number_seasons: (!seasons.is_null(i)).then(|| seasons.value(i)),
            });
        }
    }
    Ok(records)
}
