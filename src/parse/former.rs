// src/parse/former.rs

use tracing::{debug, trace};

use super::date::{count_dates, is_date, parse_date, strip_notes, strip_notes_and_qualifier};
use super::error::ParseError;
use super::table::{Columns, DecodedRow, Field, RawTable};

/// Premiere/finale pair as raw cell text.
pub type DatePair = (String, String);

/// Raw title with its raw premiere and finale cells.
pub type GroupedRow = (String, String, String);

/// Pending grouped-date state for one former-programming table.
///
/// When several shows share the same dates the page merges the date cells,
/// and the table text comes out as one or more title-only rows followed by
/// one or more rows holding only a date pair. The titles and pairs are
/// queued here until the group is closed, then paired up positionally.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Cluster {
    #[default]
    Idle,
    Collecting {
        titles: Vec<String>,
        dates: Vec<DatePair>,
    },
}

impl Cluster {
    pub fn is_idle(&self) -> bool {
        matches!(self, Cluster::Idle)
    }

    /// Queue title-only cells. If the current group already received dates,
    /// that group is closed first and its rows are returned.
    pub fn push_titles(&mut self, cells: Vec<String>) -> Vec<GroupedRow> {
        let closed = self.flush();
        if let Cluster::Collecting { titles, .. } = self {
            titles.extend(cells);
        } else {
            *self = Cluster::Collecting {
                titles: cells,
                dates: Vec::new(),
            };
        }
        closed
    }

    /// Queue a date pair for the pending titles.
    pub fn push_dates(&mut self, row: usize, cells: &[String]) -> Result<(), ParseError> {
        match (self, cells) {
            (Cluster::Collecting { dates, .. }, [premiere, finale, ..]) => {
                dates.push((premiere.clone(), finale.clone()));
                Ok(())
            }
            (Cluster::Collecting { .. }, _) => Err(ParseError::StructuralMismatch {
                row,
                expected: 2,
                found: cells.len(),
                cells: cells.to_vec(),
            }),
            (Cluster::Idle, _) => Err(ParseError::OrphanDateRow {
                row,
                cells: cells.to_vec(),
            }),
        }
    }

    /// Close the group if it has dates, returning one row per pairing and
    /// going back to `Idle`. A group still waiting for dates is left alone.
    pub fn flush(&mut self) -> Vec<GroupedRow> {
        match self {
            Cluster::Collecting { dates, .. } if !dates.is_empty() => {}
            _ => return Vec::new(),
        }
        match std::mem::take(self) {
            Cluster::Collecting { titles, dates } => pair_up(&titles, &dates),
            Cluster::Idle => Vec::new(),
        }
    }

    /// Close the group for good: a following titled row or the end of the
    /// table. Titles that never got dates cannot be reconciled.
    pub fn close(&mut self) -> Result<Vec<GroupedRow>, ParseError> {
        let rows = self.flush();
        match self {
            Cluster::Idle => Ok(rows),
            Cluster::Collecting { titles, .. } => Err(ParseError::UnterminatedGrouping {
                titles: titles.len(),
            }),
        }
    }

    /// End of table.
    pub fn finish(mut self) -> Result<Vec<GroupedRow>, ParseError> {
        self.close()
    }
}

/// Pair titles with date pairs front to front. Once the shorter side is down
/// to its last element, that element is reused until the longer side runs out:
/// several shows sharing one date pair, or one show aired over several runs.
pub fn pair_up(titles: &[String], dates: &[DatePair]) -> Vec<GroupedRow> {
    if titles.is_empty() || dates.is_empty() {
        return Vec::new();
    }
    let n = titles.len().max(dates.len());
    (0..n)
        .map(|i| {
            let title = &titles[i.min(titles.len() - 1)];
            let (premiere, finale) = &dates[i.min(dates.len() - 1)];
            (title.clone(), premiere.clone(), finale.clone())
        })
        .collect()
}

fn finish_row(title: &str, premiere: Option<&str>, finale: Option<&str>) -> DecodedRow {
    let date = |s: Option<&str>| s.and_then(|v| parse_date(strip_notes_and_qualifier(v)));
    DecodedRow {
        title: strip_notes(title).to_string(),
        premiere_date: date(premiere),
        finale_date: date(finale),
        number_seasons: None,
    }
}

fn finish_grouped(rows: Vec<GroupedRow>) -> impl Iterator<Item = DecodedRow> {
    rows.into_iter()
        .map(|(t, p, f)| finish_row(&t, Some(p.as_str()), Some(f.as_str())))
}

/// Decode a table listed under "Former programming".
///
/// Each row is classified by how many of its cells look like dates:
/// two is an ordinary row, one means the premiere cell was merged into the
/// row above and is restored from the last premiere seen, zero means a
/// title-only row that belongs to a grouped-date cluster.
pub fn decode(table: RawTable) -> Result<Vec<DecodedRow>, ParseError> {
    let RawTable { header, rows } = table;
    let cols = Columns::from_labels(&header)?;

    let mut out = Vec::with_capacity(rows.len());
    let mut last_premiere = String::new();
    let mut cluster = Cluster::default();

    for (idx, mut cells) in rows.into_iter().enumerate() {
        match count_dates(&cells) {
            0 => {
                trace!(row = idx, titles = cells.len(), "queueing grouped titles");
                let closed = cluster.push_titles(cells);
                out.extend(finish_grouped(closed));
                continue;
            }
            1 => {
                let at = cells.len().min(1);
                cells.insert(at, last_premiere.clone());
            }
            2 => last_premiere = cells[1].clone(),
            _ => {}
        }

        if cells.first().is_some_and(|c| is_date(c)) {
            trace!(row = idx, "queueing grouped dates");
            cluster.push_dates(idx, &cells)?;
            continue;
        }

        if !cluster.is_idle() {
            let closed = cluster.close()?;
            debug!(row = idx, rows = closed.len(), "closed grouped-date cluster");
            out.extend(finish_grouped(closed));
        }

        let row = cols.align(idx, cells)?;
        let title = cols.cell(&row, Field::Title).unwrap_or_default();
        out.push(finish_row(
            title,
            cols.cell(&row, Field::PremiereDate),
            cols.cell(&row, Field::FinaleDate),
        ));
    }

    let closed = cluster.finish()?;
    out.extend(finish_grouped(closed));
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    const HEADER: &[&str] = &["Title", "Premiere date", "Finale date", "Notes"];

    fn raw(rows: &[&[&str]]) -> RawTable {
        RawTable {
            header: HEADER.iter().map(|s| s.to_string()).collect(),
            rows: rows
                .iter()
                .map(|r| r.iter().map(|s| s.to_string()).collect())
                .collect(),
        }
    }

    fn ymd(y: i32, m: u32, d: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(y, m, d)
    }

    fn strings(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn ordinary_rows() {
        let rows = decode(raw(&[
            &["Doug[4]", "August 11, 1991", "January 2, 1994", "Moved to ABC"],
            &["Rocko's Modern Life", "September 18, 1993", "November 24, 1996"],
        ]))
        .unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].title, "Doug");
        assert_eq!(rows[0].premiere_date, ymd(1991, 8, 11));
        assert_eq!(rows[0].finale_date, ymd(1994, 1, 2));
        assert_eq!(rows[1].finale_date, ymd(1996, 11, 24));
        assert!(rows.iter().all(|r| r.number_seasons.is_none()));
    }

    #[test]
    fn grouped_titles_share_one_date_pair() {
        let rows = decode(raw(&[
            &["ShowA"],
            &["ShowB"],
            &["January 1, 1990", "December 31, 1990"],
        ]))
        .unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].title, "ShowA");
        assert_eq!(rows[1].title, "ShowB");
        for r in &rows {
            assert_eq!(r.premiere_date, ymd(1990, 1, 1));
            assert_eq!(r.finale_date, ymd(1990, 12, 31));
        }
    }

    #[test]
    fn missing_premiere_is_restored_from_previous_row() {
        let rows = decode(raw(&[
            &["ShowX", "1985", "1990"],
            &["ShowC", "December 1, 1999"],
        ]))
        .unwrap();
        assert_eq!(rows[1].title, "ShowC");
        assert_eq!(rows[1].premiere_date, ymd(1985, 1, 1));
        assert_eq!(rows[1].finale_date, ymd(1999, 12, 1));
    }

    #[test]
    fn cluster_is_closed_by_next_titled_row() {
        let rows = decode(raw(&[
            &["Kenan & Kel", "The Journey of Allen Strange"],
            &["July 15, 1996", "July 15, 2000"],
            &["Cousin Skeeter", "August 1998", "November 2001"],
        ]))
        .unwrap();
        let titles: Vec<&str> = rows.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(
            titles,
            vec!["Kenan & Kel", "The Journey of Allen Strange", "Cousin Skeeter"]
        );
        assert_eq!(rows[1].finale_date, ymd(2000, 7, 15));
        assert_eq!(rows[2].premiere_date, ymd(1998, 8, 1));
    }

    #[test]
    fn one_title_with_several_runs() {
        let rows = decode(raw(&[
            &["Rugrats"],
            &["August 11, 1991", "May 22, 1994"],
            &["1997", "August 1, 2004"],
        ]))
        .unwrap();
        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|r| r.title == "Rugrats"));
        assert_eq!(rows[0].finale_date, ymd(1994, 5, 22));
        assert_eq!(rows[1].premiere_date, ymd(1997, 1, 1));
        assert_eq!(rows[1].finale_date, ymd(2004, 8, 1));
    }

    #[test]
    fn shorts_qualifier_is_stripped_before_parsing() {
        let rows = decode(raw(&[
            &["Hey Dude", "1989", "1991"],
            &["The Adventures of Pete & Pete", "(shorts) December 1, 1999[2]"],
        ]))
        .unwrap();
        // the qualified cell does not count as a date, so the premiere is restored
        assert_eq!(rows[1].premiere_date, ymd(1989, 1, 1));
        assert_eq!(rows[1].finale_date, ymd(1999, 12, 1));
    }

    #[test]
    fn titles_without_dates_at_table_end_are_fatal() {
        let err = decode(raw(&[&["ShowA", "1990", "1991"], &["ShowB"]])).unwrap_err();
        assert!(matches!(err, ParseError::UnterminatedGrouping { titles: 1 }));
    }

    #[test]
    fn titled_row_before_grouped_dates_is_fatal() {
        let err = decode(raw(&[
            &["ShowA"],
            &["ShowB", "1990", "1991"],
            &["ShowC"],
            &["1992", "1993"],
        ]))
        .unwrap_err();
        assert!(matches!(err, ParseError::UnterminatedGrouping { titles: 1 }));
    }

    #[test]
    fn date_row_without_titles_is_fatal() {
        let err = decode(raw(&[&["January 1, 1990", "December 31, 1990"]])).unwrap_err();
        assert!(matches!(err, ParseError::OrphanDateRow { row: 0, .. }));
    }

    #[test]
    fn pairing_reuses_the_last_element_of_the_shorter_side() {
        let titles = strings(&["A", "B", "C"]);
        let dates = vec![("1".to_string(), "2".to_string())];
        let rows = pair_up(&titles, &dates);
        assert_eq!(rows.len(), 3);
        assert!(rows.iter().all(|(_, p, f)| p == "1" && f == "2"));

        let titles = strings(&["A", "B"]);
        let dates = vec![
            ("1".to_string(), "2".to_string()),
            ("3".to_string(), "4".to_string()),
            ("5".to_string(), "6".to_string()),
        ];
        let rows = pair_up(&titles, &dates);
        let got: Vec<(&str, &str)> = rows.iter().map(|(t, p, _)| (t.as_str(), p.as_str())).collect();
        assert_eq!(got, vec![("A", "1"), ("B", "3"), ("B", "5")]);
    }

    #[test]
    fn cluster_state_transitions() {
        let mut cluster = Cluster::default();
        assert!(cluster.is_idle());
        assert!(cluster.flush().is_empty());

        assert!(cluster.push_titles(strings(&["A"])).is_empty());
        // nothing to pair with yet
        assert!(cluster.flush().is_empty());
        assert!(!cluster.is_idle());
        let mut waiting = cluster.clone();
        assert!(matches!(
            waiting.close(),
            Err(ParseError::UnterminatedGrouping { titles: 1 })
        ));

        cluster.push_dates(1, &strings(&["1990", "1991"])).unwrap();
        assert!(cluster.push_dates(2, &strings(&["1990"])).is_err());

        // a new title-only row closes the dated group and opens another
        let closed = cluster.push_titles(strings(&["B"]));
        assert_eq!(
            closed,
            vec![("A".to_string(), "1990".to_string(), "1991".to_string())]
        );
        assert_eq!(
            cluster,
            Cluster::Collecting {
                titles: strings(&["B"]),
                dates: vec![]
            }
        );
        assert!(matches!(
            cluster.finish(),
            Err(ParseError::UnterminatedGrouping { titles: 1 })
        ));
    }
}
