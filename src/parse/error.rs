use thiserror::Error;

/// Fatal failures while turning a table into records.
///
/// Unparseable dates and season counts are not errors; those fields come out
/// as `None`.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("row {row} has {found} cells but the header has {expected}: {cells:?}")]
    StructuralMismatch {
        row: usize,
        expected: usize,
        found: usize,
        cells: Vec<String>,
    },

    #[error("date row {row} arrived without any pending titles: {cells:?}")]
    OrphanDateRow { row: usize, cells: Vec<String> },

    #[error("grouping closed with {titles} title(s) still waiting for dates")]
    UnterminatedGrouping { titles: usize },

    #[error("heading level h{0} is not one of h2..h5")]
    UnrecognizedHeadingLevel(u8),

    #[error("unknown column `{0}` in table header")]
    UnknownColumn(String),

    #[error("table header has no `{0}` column")]
    MissingColumn(&'static str),

    #[error("table has no header block")]
    MissingHeader,
}
