// src/parse/current.rs

use tracing::trace;

use super::date::{parse_date, strip_notes};
use super::error::ParseError;
use super::table::{Columns, DecodedRow, Field, RawTable};

/// Decode a table listed under "Current programming".
///
/// These shows have not ended, so there is no finale date. Some tables carry a
/// "Current season" column and some do not.
pub fn decode(table: RawTable) -> Result<Vec<DecodedRow>, ParseError> {
    let RawTable { header, mut rows } = table;
    let mut cols = Columns::from_labels(&header)?;

    // The Notes header cell is sometimes rendered as its own block.
    if rows.first().is_some_and(|r| r.iter().any(|c| c.contains("Notes"))) {
        cols.push(Field::Notes);
        rows.remove(0);
    }

    let mut out = Vec::with_capacity(rows.len());
    for (idx, cells) in rows.into_iter().enumerate() {
        let row = cols.align(idx, cells)?;
        let title = cols
            .cell(&row, Field::Title)
            .map(|t| strip_notes(t).to_string())
            .unwrap_or_default();
        let premiere_date = cols.cell(&row, Field::PremiereDate).and_then(parse_date);
        let number_seasons = cols
            .cell(&row, Field::NumberSeasons)
            .and_then(|s| s.trim().parse::<u16>().ok());
        trace!(row = idx, %title, ?premiere_date, ?number_seasons, "current row");

        out.push(DecodedRow {
            title,
            premiere_date,
            finale_date: None,
            number_seasons,
        });
    }
    Ok(out)
}
