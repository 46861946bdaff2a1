// src/parse/header.rs

use serde::Deserialize;
use std::fmt;

use super::error::ParseError;

/// One of the four heading levels the page nests its tables under.
/// Ordered by depth: H2 is the outermost.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
pub enum HeadingLevel {
    #[default]
    H2,
    H3,
    H4,
    H5,
}

impl HeadingLevel {
    /// Position in the header array (H2 = 0 … H5 = 3).
    pub fn index(self) -> usize {
        self as usize
    }

    /// Map an HTML `hN` level to a HeadingLevel. Anything outside 2..=5 is rejected.
    pub fn from_tag_level(n: u8) -> Result<Self, ParseError> {
        match n {
            2 => Ok(Self::H2),
            3 => Ok(Self::H3),
            4 => Ok(Self::H4),
            5 => Ok(Self::H5),
            other => Err(ParseError::UnrecognizedHeadingLevel(other)),
        }
    }
}

impl fmt::Display for HeadingLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "h{}", self.index() + 2)
    }
}

/// Owned copy of the heading chain at the moment a table was seen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderSnapshot {
    values: [Option<String>; 4],
}

impl HeaderSnapshot {
    pub fn get(&self, level: HeadingLevel) -> Option<&str> {
        self.values[level.index()].as_deref()
    }

    pub fn h2(&self) -> Option<&str> {
        self.get(HeadingLevel::H2)
    }

    pub fn h3(&self) -> Option<&str> {
        self.get(HeadingLevel::H3)
    }

    pub fn h4(&self) -> Option<&str> {
        self.get(HeadingLevel::H4)
    }

    pub fn h5(&self) -> Option<&str> {
        self.get(HeadingLevel::H5)
    }
}

impl fmt::Display for HeaderSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<&str> = self
            .values
            .iter()
            .map(|v| v.as_deref().unwrap_or("None"))
            .collect();
        write!(f, "({})", parts.join(", "))
    }
}

/// Tracks the current heading hierarchy while the page is walked.
///
/// The page lists its headings sequentially before each table, so the
/// context only ever moves forward: a new heading at level L replaces the
/// value at L and forgets everything nested below it.
#[derive(Debug, Clone, Default)]
pub struct HeaderContext {
    values: [Option<String>; 4],
    depth: HeadingLevel,
}

impl HeaderContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn observe(&mut self, level: HeadingLevel, text: impl Into<String>) {
        for deeper in &mut self.values[level.index() + 1..] {
            *deeper = None;
        }
        self.values[level.index()] = Some(text.into());
        self.depth = level;
    }

    pub fn get(&self, level: HeadingLevel) -> Option<&str> {
        self.values[level.index()].as_deref()
    }

    pub fn snapshot(&self) -> HeaderSnapshot {
        HeaderSnapshot {
            values: self.values.clone(),
        }
    }

    /// Depth as an HTML heading number (2..=5).
    pub fn current_depth(&self) -> usize {
        self.depth.index() + 2
    }
}
