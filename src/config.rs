// src/config.rs

use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::Deserialize;
use std::{env, fs, path::PathBuf};

use crate::fetch::NICKELODEON_PROGRAMS_URL;
use crate::parse::StopAt;

pub const CONFIG_ENV: &str = "NICKSCRAPER_CONFIG";

/// Run settings. Every field has a default, so an empty file (or no file)
/// scrapes the live Nickelodeon page into `./data`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub source_url: String,
    /// Read the page from disk instead of fetching it.
    pub source_path: Option<PathBuf>,
    pub content_selector: String,
    pub stop_at: StopAt,
    pub out_dir: PathBuf,
    /// H4 section the run-length report is computed over.
    pub animated_section: String,
    /// End date for shows still on air; today when unset.
    pub reference_date: Option<NaiveDate>,
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source_url: NICKELODEON_PROGRAMS_URL.to_string(),
            source_path: None,
            content_selector: "div.mw-content-ltr.mw-parser-output".to_string(),
            stop_at: StopAt::default(),
            out_dir: PathBuf::from("data"),
            animated_section: "Animated (\"Nicktoons\")".to_string(),
            reference_date: None,
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    pub fn from_yaml_str(text: &str) -> Result<Self> {
        serde_yaml::from_str(text).context("parsing config yaml")
    }

    /// Defaults, overlaid with the YAML file named by `NICKSCRAPER_CONFIG`
    /// (if set) and then the `LOG_LEVEL` / `OUT_DIR` environment variables.
    pub fn load() -> Result<Self> {
        let mut cfg = match env::var(CONFIG_ENV) {
            Ok(path) => {
                let text = fs::read_to_string(&path)
                    .with_context(|| format!("reading config {}", path))?;
                Self::from_yaml_str(&text).with_context(|| format!("in {}", path))?
            }
            Err(_) => Self::default(),
        };
        cfg.apply_overrides(|key| env::var(key).ok());
        Ok(cfg)
    }

    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(level) = lookup("LOG_LEVEL") {
            self.log_level = level;
        }
        if let Some(dir) = lookup("OUT_DIR") {
            self.out_dir = PathBuf::from(dir);
        }
    }

    pub fn records_path(&self) -> PathBuf {
        self.out_dir.join("nick.parquet")
    }

    pub fn run_lengths_path(&self) -> PathBuf {
        self.out_dir.join("animated_length.csv")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::HeadingLevel;

    #[test]
    fn empty_yaml_is_default() -> Result<()> {
        assert_eq!(Config::from_yaml_str("{}")?, Config::default());
        Ok(())
    }

    #[test]
    fn partial_yaml_overrides_fields() -> Result<()> {
        let cfg = Config::from_yaml_str(
            r#"
source_path: ./page.html
stop_at:
  level: H2
  text: See also
reference_date: 2024-05-19
"#,
        )?;
        assert_eq!(cfg.source_path, Some(PathBuf::from("./page.html")));
        assert_eq!(cfg.stop_at.level, HeadingLevel::H2);
        assert_eq!(cfg.stop_at.text, "See also");
        assert_eq!(cfg.reference_date, NaiveDate::from_ymd_opt(2024, 5, 19));
        assert_eq!(cfg.out_dir, PathBuf::from("data"));
        Ok(())
    }

    #[test]
    fn unknown_heading_level_is_rejected() {
        assert!(Config::from_yaml_str("stop_at: {level: H6, text: x}").is_err());
    }

    #[test]
    fn env_overrides() {
        let mut cfg = Config::default();
        cfg.apply_overrides(|key| match key {
            "LOG_LEVEL" => Some("debug".to_string()),
            "OUT_DIR" => Some("/tmp/nick".to_string()),
            _ => None,
        });
        assert_eq!(cfg.log_level, "debug");
        assert_eq!(cfg.records_path(), PathBuf::from("/tmp/nick/nick.parquet"));
    }
}
