// src/anime/mod.rs

pub mod data;

use serde::Serialize;
use std::collections::{BTreeSet, HashMap};

/// A story arc, with episode numbers relative to the first Shippuden episode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoryArc {
    pub arc_id: u32,
    pub episode_start: u32,
    pub episode_end: u32,
    pub name: String,
    pub anime_original: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Episode {
    pub episode_id: u32,
    pub season_id: u8,
    pub arc_id: Option<u32>,
    pub arc_name: Option<String>,
    pub anime_original: Option<bool>,
    pub apple_tv: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArcSummary {
    pub arc_id: u32,
    pub arc_name: Option<String>,
    pub episode_count: u32,
    /// Season the arc starts in.
    pub season_id: u8,
    pub anime_original: Option<bool>,
    pub apple_tv: Option<bool>,
}

pub fn arcs() -> Vec<StoryArc> {
    data::ARCS
        .iter()
        .enumerate()
        .map(|(i, &(start, end, name, original))| StoryArc {
            arc_id: i as u32 + 1,
            episode_start: start - data::EPISODE_OFFSET,
            episode_end: end - data::EPISODE_OFFSET,
            name: name.to_string(),
            anime_original: original,
        })
        .collect()
}

/// Every episode with its season, its arc and the season's availability.
///
/// Episodes are numbered consecutively across seasons. An episode belongs to
/// the most recent arc that started at or before it.
pub fn episodes(
    seasons: &[(u8, u32)],
    arcs: &[StoryArc],
    availability: &[(u8, bool)],
) -> Vec<Episode> {
    let starts: HashMap<u32, &StoryArc> = arcs.iter().map(|a| (a.episode_start, a)).collect();
    let apple: HashMap<u8, bool> = availability.iter().copied().collect();

    let mut out = Vec::new();
    let mut current: Option<&StoryArc> = None;
    let mut episode_id = 0u32;
    for &(season_id, count) in seasons {
        for _ in 0..count {
            episode_id += 1;
            if let Some(arc) = starts.get(&episode_id) {
                current = Some(*arc);
            }
            out.push(Episode {
                episode_id,
                season_id,
                arc_id: current.map(|a| a.arc_id),
                arc_name: current.map(|a| a.name.clone()),
                anime_original: current.map(|a| a.anime_original),
                apple_tv: apple.get(&season_id).copied(),
            });
        }
    }
    out
}

/// One row per arc, in order of first appearance, taking the first episode's
/// season and availability. Episodes before the first arc are not counted.
pub fn arc_summaries(episodes: &[Episode]) -> Vec<ArcSummary> {
    let mut out: Vec<ArcSummary> = Vec::new();
    for ep in episodes {
        let Some(arc_id) = ep.arc_id else { continue };
        match out.iter_mut().find(|s| s.arc_id == arc_id) {
            Some(summary) => summary.episode_count += 1,
            None => out.push(ArcSummary {
                arc_id,
                arc_name: ep.arc_name.clone(),
                episode_count: 1,
                season_id: ep.season_id,
                anime_original: ep.anime_original,
                apple_tv: ep.apple_tv,
            }),
        }
    }
    out
}

/// Seasons needed to follow the canon story on Apple TV.
pub fn core_seasons(summaries: &[ArcSummary]) -> Vec<u8> {
    summaries
        .iter()
        .filter(|s| s.anime_original == Some(false) && s.apple_tv == Some(true))
        .map(|s| s.season_id)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Canon arcs that start in a season Apple TV does not carry.
pub fn missing_canon(summaries: &[ArcSummary]) -> Vec<&ArcSummary> {
    summaries
        .iter()
        .filter(|s| s.anime_original == Some(false) && s.apple_tv == Some(false))
        .collect()
}
