// src/parse/mod.rs

pub mod current;
pub mod date;
pub mod error;
pub mod former;
pub mod header;
pub mod table;

use serde::Deserialize;
use tracing::{debug, info};

use crate::document::{Node, NodeKind};
use crate::record::NormalizedRecord;
pub use error::ParseError;
pub use header::{HeaderContext, HeaderSnapshot, HeadingLevel};
use table::RawTable;

pub const CURRENT_PROGRAMMING: &str = "Current programming";
pub const FORMER_PROGRAMMING: &str = "Former programming";

/// Row encoding of a table, chosen by the H2 section it sits under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    Current,
    Former,
}

impl Dialect {
    /// `None` for sections whose tables are not parsed.
    pub fn from_h2(h2: &str) -> Option<Self> {
        match h2 {
            CURRENT_PROGRAMMING => Some(Self::Current),
            FORMER_PROGRAMMING => Some(Self::Former),
            _ => None,
        }
    }

    pub fn decode(self, table: RawTable) -> Result<Vec<table::DecodedRow>, ParseError> {
        match self {
            Dialect::Current => current::decode(table),
            Dialect::Former => former::decode(table),
        }
    }
}

/// Heading that marks the end of the content worth parsing.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StopAt {
    pub level: HeadingLevel,
    pub text: String,
}

impl Default for StopAt {
    fn default() -> Self {
        Self {
            level: HeadingLevel::H3,
            text: "Former acquired programming".to_string(),
        }
    }
}

/// Decode one table's text under the given heading chain. Tables outside the
/// two programming sections yield `None`.
pub fn parse_table(
    text: &str,
    headers: &HeaderSnapshot,
) -> Result<Option<Vec<NormalizedRecord>>, ParseError> {
    let Some(dialect) = headers.h2().and_then(Dialect::from_h2) else {
        return Ok(None);
    };
    let raw = RawTable::from_text(text)?;
    let rows = dialect.decode(raw)?;
    Ok(Some(table::assemble(rows, headers)))
}

/// Walk the page's nodes once, in order, and collect the records of every
/// programming table. Any table that fails to decode fails the whole run.
#[tracing::instrument(level = "info", skip(nodes, stop_at), fields(stop_at = %stop_at.text))]
pub fn parse_nodes<I>(nodes: I, stop_at: &StopAt) -> Result<Vec<NormalizedRecord>, ParseError>
where
    I: IntoIterator<Item = Node>,
{
    let mut ctx = HeaderContext::new();
    let mut records = Vec::new();
    let mut tables = 0usize;

    for node in nodes {
        match node.kind {
            NodeKind::Heading(n) => {
                let level = HeadingLevel::from_tag_level(n)?;
                ctx.observe(level, node.text);
            }
            NodeKind::Table => {
                let snapshot = ctx.snapshot();
                match parse_table(&node.text, &snapshot)? {
                    Some(recs) => {
                        debug!(
                            depth = ctx.current_depth(),
                            headers = %snapshot,
                            rows = recs.len(),
                            "parsed table"
                        );
                        tables += 1;
                        records.extend(recs);
                    }
                    None => debug!(headers = %snapshot, "skipping table outside programming sections"),
                }
            }
            NodeKind::Other => {}
        }

        if ctx.get(stop_at.level) == Some(stop_at.text.as_str()) {
            debug!(level = %stop_at.level, "reached end marker");
            break;
        }
    }

    info!(tables, records = records.len(), "parsed page");
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use tracing_subscriber::{EnvFilter, FmtSubscriber};

    fn init_test_logging() {
        let subscriber = FmtSubscriber::builder()
            .with_env_filter(
                EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| EnvFilter::new("info,nickscraper::parse=debug")),
            )
            .with_test_writer()
            .finish();
        let _ = tracing::subscriber::set_global_default(subscriber);
    }

    fn heading(n: u8, text: &str) -> Node {
        Node::new(NodeKind::Heading(n), text)
    }

    fn table(text: &str) -> Node {
        Node::new(NodeKind::Table, text)
    }

    const CURRENT_TABLE: &str = "\n\nTitle\nPremiere date\nCurrent season\nNotes\n\n\
        SpongeBob SquarePants[a]\nMay 1, 1999\n15\nCo-production\n\n\
        The Loud House\nMay 2, 2016\n9\n";

    const FORMER_TABLE: &str = "\n\nTitle\nPremiere date\nFinale date\nNotes\n\n\
        Doug\nAugust 11, 1991\nJanuary 2, 1994\nMoved to ABC\n\n\
        ShowA\n\nShowB\n\n\
        January 1, 1990\nDecember 31, 1990\n\n\
        Rocko's Modern Life\nSeptember 18, 1993\nNovember 24, 1996\n";

    fn document() -> Vec<Node> {
        vec![
            Node::new(NodeKind::Other, "intro"),
            heading(2, CURRENT_PROGRAMMING),
            heading(3, "Original programming"),
            heading(4, "Animated"),
            table(CURRENT_TABLE),
            heading(2, FORMER_PROGRAMMING),
            heading(3, "Original programming"),
            heading(4, "Animated"),
            table(FORMER_TABLE),
            heading(2, "See also"),
            table("\n\nWhatever\nShape\n\nNot\nparsed\n"),
        ]
    }

    #[test]
    fn three_table_document() {
        init_test_logging();
        let records = parse_nodes(document(), &StopAt::default()).unwrap();
        // 2 current + (Doug + 2 grouped + Rocko) former + 0 unrecognised
        assert_eq!(records.len(), 6);
        assert!(records.iter().all(|r| !r.title.is_empty()));

        let titles: Vec<&str> = records.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(
            titles,
            vec![
                "SpongeBob SquarePants",
                "The Loud House",
                "Doug",
                "ShowA",
                "ShowB",
                "Rocko's Modern Life"
            ]
        );

        assert_eq!(records[1].sub_index, 1);
        assert_eq!(records[1].h2.as_deref(), Some(CURRENT_PROGRAMMING));
        assert_eq!(records[1].number_seasons, Some(9));

        let show_b = &records[4];
        assert_eq!(show_b.h2.as_deref(), Some(FORMER_PROGRAMMING));
        assert_eq!(show_b.h4.as_deref(), Some("Animated"));
        assert_eq!(show_b.sub_index, 2);
        assert_eq!(show_b.premiere_date, NaiveDate::from_ymd_opt(1990, 1, 1));
        assert_eq!(show_b.finale_date, NaiveDate::from_ymd_opt(1990, 12, 31));
        assert_eq!(records[5].sub_index, 3);
    }

    #[test]
    fn stops_at_end_marker() {
        let mut nodes = document();
        nodes.insert(5, heading(3, "Former acquired programming"));
        let records = parse_nodes(nodes, &StopAt::default()).unwrap();
        assert_eq!(records.len(), 2);

        let stop_at_h2 = StopAt {
            level: HeadingLevel::H2,
            text: FORMER_PROGRAMMING.to_string(),
        };
        let records = parse_nodes(document(), &stop_at_h2).unwrap();
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn tables_before_any_heading_are_skipped() {
        let nodes = vec![table(CURRENT_TABLE), heading(2, CURRENT_PROGRAMMING)];
        assert!(parse_nodes(nodes, &StopAt::default()).unwrap().is_empty());
    }

    #[test]
    fn unsupported_heading_level_aborts() {
        let nodes = vec![heading(2, CURRENT_PROGRAMMING), heading(6, "Deep")];
        assert!(matches!(
            parse_nodes(nodes, &StopAt::default()),
            Err(ParseError::UnrecognizedHeadingLevel(6))
        ));
    }

    #[test]
    fn one_bad_table_fails_the_run() {
        init_test_logging();
        let nodes = vec![
            heading(2, CURRENT_PROGRAMMING),
            table(CURRENT_TABLE),
            heading(2, FORMER_PROGRAMMING),
            table("\n\nTitle\nPremiere date\nFinale date\n\nDoug\n1991\n1994\n\nShowA\n"),
        ];
        assert!(matches!(
            parse_nodes(nodes, &StopAt::default()),
            Err(ParseError::UnterminatedGrouping { titles: 1 })
        ));
    }

    #[test]
    fn dialect_lookup() {
        assert_eq!(Dialect::from_h2("Current programming"), Some(Dialect::Current));
        assert_eq!(Dialect::from_h2("Former programming"), Some(Dialect::Former));
        assert_eq!(Dialect::from_h2("Programming blocks"), None);
    }
}
