// src/parse/table.rs

use chrono::NaiveDate;

use super::error::ParseError;
use super::header::HeaderSnapshot;
use crate::record::NormalizedRecord;

/// Field a table column feeds into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Title,
    PremiereDate,
    FinaleDate,
    NumberSeasons,
    Notes,
}

impl Field {
    /// Map a header label as it appears on the page.
    pub fn from_label(label: &str) -> Result<Self, ParseError> {
        match label.trim() {
            "Title" => Ok(Self::Title),
            "Premiere date" => Ok(Self::PremiereDate),
            "Finale date" => Ok(Self::FinaleDate),
            "Current season" => Ok(Self::NumberSeasons),
            "Notes" | "Note(s)" => Ok(Self::Notes),
            other => Err(ParseError::UnknownColumn(other.to_string())),
        }
    }
}

/// A table's text, split into its header and body rows.
///
/// Rows are separated by blank lines and cells by single newlines. Whatever
/// precedes the first blank line (usually nothing, or a caption) is not part
/// of the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawTable {
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    pub fn from_text(text: &str) -> Result<Self, ParseError> {
        let mut blocks = text
            .split("\n\n")
            .skip(1)
            .map(str::trim)
            .filter(|b| !b.is_empty());

        let header = blocks
            .next()
            .ok_or(ParseError::MissingHeader)?
            .split('\n')
            .map(str::to_string)
            .collect();
        let rows = blocks
            .map(|b| b.split('\n').map(str::to_string).collect())
            .collect();

        Ok(Self { header, rows })
    }
}

/// Column layout of one table, resolved from its header labels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Columns {
    fields: Vec<Field>,
}

impl Columns {
    pub fn from_labels<S: AsRef<str>>(labels: &[S]) -> Result<Self, ParseError> {
        let fields = labels
            .iter()
            .map(|l| Field::from_label(l.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        if !fields.contains(&Field::Title) {
            return Err(ParseError::MissingColumn("Title"));
        }
        Ok(Self { fields })
    }

    pub fn push(&mut self, field: Field) {
        self.fields.push(field);
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn position(&self, field: Field) -> Option<usize> {
        self.fields.iter().position(|f| *f == field)
    }

    /// Reconcile a row with the header. A row exactly one cell short lost its
    /// trailing cell (usually an empty Notes cell) and is padded with `None`;
    /// any other mismatch is fatal.
    pub fn align(&self, row_idx: usize, cells: Vec<String>) -> Result<Vec<Option<String>>, ParseError> {
        let expected = self.len();
        let found = cells.len();
        if found == 0 || (found != expected && found + 1 != expected) {
            return Err(ParseError::StructuralMismatch {
                row: row_idx,
                expected,
                found,
                cells,
            });
        }
        let mut aligned: Vec<Option<String>> = cells.into_iter().map(Some).collect();
        aligned.resize(expected, None);
        Ok(aligned)
    }

    /// Cell of `field` in an aligned row, if the table has that column.
    pub fn cell<'a>(&self, row: &'a [Option<String>], field: Field) -> Option<&'a str> {
        self.position(field)
            .and_then(|i| row.get(i))
            .and_then(|c| c.as_deref())
    }
}

/// A row after dialect-specific decoding, before it is stamped with headings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedRow {
    pub title: String,
    pub premiere_date: Option<NaiveDate>,
    pub finale_date: Option<NaiveDate>,
    pub number_seasons: Option<u16>,
}

/// Stamp decoded rows with the heading chain active when the table was seen.
/// Rows without a title are dropped before `SubIndex` is assigned.
pub fn assemble(rows: Vec<DecodedRow>, headers: &HeaderSnapshot) -> Vec<NormalizedRecord> {
    rows.into_iter()
        .filter(|r| !r.title.trim().is_empty())
        .enumerate()
        .map(|(i, r)| NormalizedRecord {
            h2: headers.h2().map(str::to_string),
            h3: headers.h3().map(str::to_string),
            h4: headers.h4().map(str::to_string),
            h5: headers.h5().map(str::to_string),
            sub_index: i as u32,
            title: r.title,
            premiere_date: r.premiere_date,
            finale_date: r.finale_date,
            number_seasons: r.number_seasons,
        })
        .collect()
}
