//! State ties: where candidates were born and where they built their careers.

use std::collections::HashMap;

use log::{debug, info, warn};
use rand::Rng;

use crate::config::*;
use crate::normalize::portrait_path;
use crate::patterns::{CategoryPattern, CategoryPatternSet};

pub const DEMOCRAT: &str = "democrat";
pub const REPUBLICAN: &str = "republican";
pub const DEMOCRAT_COLOR: &str = "#3377FF";
pub const REPUBLICAN_COLOR: &str = "#FF4633";

/// Spellings used by the profiles that neither the name nor the abbreviation of the
/// state catch.
pub const SUPPLEMENTAL_PATTERNS: &[(&str, &[&str])] = &[
    ("Pennsylvania", &[r"Pa\."]),
    ("Massachusetts", &[r"Mass\."]),
    ("California", &["Oakland"]),
    ("Florida", &[r"Fla\."]),
    ("Texas", &["Houston", "San Antonio"]),
];

/// Dotted abbreviation as a regular expression: `NY` -> `N\.Y\.`
pub fn abbreviation_pattern(state_po: &str) -> String {
    state_po
        .chars()
        .map(|c| format!("{}\\.", regex::escape(&c.to_string())))
        .collect()
}

/// Center of the bounding box of a ring.
///
/// This is not the centroid of the area: a crescent-shaped state gets a center outside of
/// its outline.
pub fn polygon_center(ring: &[Point]) -> Option<Point> {
    let first = ring.first()?;
    let (mut min_x, mut min_y, mut max_x, mut max_y) = (first[0], first[1], first[0], first[1]);
    for p in ring.iter().skip(1) {
        min_x = min_x.min(p[0]);
        max_x = max_x.max(p[0]);
        min_y = min_y.min(p[1]);
        max_y = max_y.max(p[1]);
    }
    Some([
        min_x + (max_x - min_x) / 2.0,
        min_y + (max_y - min_y) / 2.0,
    ])
}

/// Center of a state, computed on the first ring of its first polygon only.
pub fn geometry_center(geometry: &Geometry) -> Option<Point> {
    geometry.first_ring().and_then(polygon_center)
}

pub fn midpoint(a: Point, b: Point) -> Point {
    [(a[0] + b[0]) / 2.0, (a[1] + b[1]) / 2.0]
}

/// Attaches the historical results of the target year to every state, and computes the
/// centers.
pub fn summarize_states(
    states: &[StateFeature],
    results: &[ElectionResultRow],
    year: u32,
) -> Vec<StateSummary> {
    let mut summaries: Vec<StateSummary> = states
        .iter()
        .map(|s| StateSummary {
            name: s.name.clone(),
            abbreviation_pattern: None,
            year: None,
            dem_votes: None,
            rep_votes: None,
            total_votes: None,
            color: None,
            center: geometry_center(&s.geometry),
        })
        .collect();

    for row in results.iter() {
        if row.year != year || (row.party != DEMOCRAT && row.party != REPUBLICAN) {
            continue;
        }
        let summary = match summaries.iter_mut().find(|s| s.name == row.state) {
            Some(s) => s,
            None => {
                debug!("summarize_states: no feature for state {:?}", row.state);
                continue;
            }
        };
        summary.year = Some(row.year);
        // An empty abbreviation would match any text.
        let state_po = row.state_po.trim();
        if !state_po.is_empty() {
            summary.abbreviation_pattern = Some(abbreviation_pattern(state_po));
        }
        summary.total_votes = Some(row.total_votes);
        let votes = if row.party == DEMOCRAT {
            &mut summary.dem_votes
        } else {
            &mut summary.rep_votes
        };
        *votes = Some(votes.unwrap_or(0) + row.candidate_votes);
    }

    for summary in summaries.iter_mut() {
        if summary.dem_votes.is_none() && summary.rep_votes.is_none() {
            continue;
        }
        let color = if summary.dem_votes.unwrap_or(0) > summary.rep_votes.unwrap_or(0) {
            DEMOCRAT_COLOR
        } else {
            REPUBLICAN_COLOR
        };
        summary.color = Some(color.to_string());
    }
    summaries
}

/// One pattern set per state: the dotted abbreviation, the name, and the supplemental
/// spellings.
pub fn state_table(states: &[StateSummary]) -> Result<Vec<CategoryPatternSet>, StoryErrors> {
    let mut table: Vec<CategoryPatternSet> = Vec::new();
    for state in states.iter() {
        let mut patterns: Vec<CategoryPattern> = Vec::new();
        if let Some(abbr) = &state.abbreviation_pattern {
            patterns.push(CategoryPattern::new(abbr)?);
        }
        patterns.push(CategoryPattern::new(&regex::escape(&state.name))?);
        for (name, extra) in SUPPLEMENTAL_PATTERNS.iter() {
            if *name == state.name {
                for p in extra.iter() {
                    patterns.push(CategoryPattern::new(p)?);
                }
            }
        }
        table.push(CategoryPatternSet {
            name: state.name.clone(),
            patterns,
            image: None,
        });
    }
    Ok(table)
}

/// All the states matched in the profile of a candidate, in table order.
#[derive(Eq, PartialEq, Debug, Clone, Default)]
pub struct StateTies {
    pub born: Vec<String>,
    pub ties: Vec<String>,
}

impl StateTies {
    /// Only the first state of each list is placed on the map.
    pub fn first_born(&self) -> Option<&str> {
        self.born.first().map(|s| s.as_str())
    }

    pub fn first_tie(&self) -> Option<&str> {
        self.ties.first().map(|s| s.as_str())
    }
}

/// Matches the raw (not case-folded) text of the birth and position fields against the
/// state table.
///
/// The birth field only contributes to the birth states; the current position and the
/// previous roles only contribute to the ties.
pub fn resolve_states(record: &CandidateRecord, table: &[CategoryPatternSet]) -> StateTies {
    let mut res = StateTies::default();
    let born = record.field(BORN);
    let positions: Vec<&str> = [CURRENT_POSITION, PREVIOUS_ROLES]
        .iter()
        .filter_map(|h| record.field(h))
        .collect();
    for state in table.iter() {
        if born.map(|t| state.matches(t)).unwrap_or(false) {
            res.born.push(state.name.clone());
        }
        if positions.iter().any(|t| state.matches(t)) {
            res.ties.push(state.name.clone());
        }
    }
    debug!("resolve_states: {}: {:?}", record.name, res);
    res
}

/// Puts a marker for a candidate in a state: halfway between the center of the state and
/// a vertex of its outline drawn at random.
fn place_in_state<R: Rng + ?Sized>(
    state: &str,
    states: &[StateFeature],
    summaries: &[StateSummary],
    drawn: &mut HashMap<String, Point>,
    rng: &mut R,
) -> Option<MarkerPlacement> {
    let feature = states.iter().find(|f| f.name == state)?;
    let ring = feature.geometry.first_ring().filter(|r| !r.is_empty());
    let ring = match ring {
        Some(r) => r,
        None => {
            warn!("place_in_state: state {} has an empty outline", state);
            return None;
        }
    };
    let center = summaries
        .iter()
        .find(|s| s.name == state)
        .and_then(|s| s.center)
        .or_else(|| polygon_center(ring))?;
    let vertex = *drawn
        .entry(state.to_string())
        .or_insert_with(|| ring[rng.random_range(0..ring.len())]);
    Some(MarkerPlacement {
        state: state.to_string(),
        center,
        vertex,
        coords: midpoint(center, vertex),
    })
}

/// Markers of every candidate, for the birth view and the professional view.
///
/// The random vertex is drawn once per candidate and state: when a candidate was born in
/// the state of their career, both markers are at the same place.
pub fn place_markers<R: Rng + ?Sized>(
    candidates: &[CandidateRecord],
    states: &[StateFeature],
    summaries: &[StateSummary],
    table: &[CategoryPatternSet],
    rng: &mut R,
) -> Vec<GeoMarkers> {
    let mut res: Vec<GeoMarkers> = Vec::new();
    for record in candidates.iter() {
        let ties = resolve_states(record, table);
        let mut drawn: HashMap<String, Point> = HashMap::new();
        let born = ties
            .first_born()
            .and_then(|s| place_in_state(s, states, summaries, &mut drawn, rng));
        let role = ties
            .first_tie()
            .and_then(|s| place_in_state(s, states, summaries, &mut drawn, rng));
        res.push(GeoMarkers {
            name: record.name.clone(),
            img: portrait_path(&record.name),
            born,
            role,
        });
    }
    info!(
        "place_markers: {} candidates, {} born markers, {} role markers",
        res.len(),
        res.iter().filter(|m| m.born.is_some()).count(),
        res.iter().filter(|m| m.role.is_some()).count()
    );
    res
}
