// ********* Input data structures ***********

use std::error::Error;
use std::fmt::Display;

use indexmap::{IndexMap, IndexSet};

/// Value used by the source profiles when a field has no content.
pub const NOT_APPLICABLE: &str = "n/a";

/// Leading character of a heading that belongs to the "Key criticisms" section.
pub const CRITICISM_MARKER: char = '*';

pub const CURRENT_POSITION: &str = "Current position";
pub const PREVIOUS_ROLES: &str = "Previous roles";
pub const BORN: &str = "Born";

/// The profile of one candidate.
///
/// The fields are kept in the order in which they appear in the source document.
/// This order matters: when several headings could fall into the same category,
/// the first one encountered is processed first.
#[derive(PartialEq, Debug, Clone)]
pub struct CandidateRecord {
    pub name: String,
    pub fields: Vec<(String, String)>,
}

impl CandidateRecord {
    pub fn new(name: &str) -> CandidateRecord {
        CandidateRecord {
            name: name.to_string(),
            fields: Vec::new(),
        }
    }

    /// The value associated with a heading, if present.
    pub fn field(&self, heading: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(h, _)| h == heading)
            .map(|(_, v)| v.as_str())
    }

    pub fn headings(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(h, _)| h.as_str())
    }
}

/// A row of the voter choice table: the share of primary voters choosing this
/// candidate first.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct RankedEntry {
    pub name: String,
    pub percentage: u32,
}

#[derive(Eq, PartialEq, Debug, Clone)]
pub struct FavorabilityEntry {
    pub name: String,
    pub favorable: i32,
    pub unfavorable: i32,
}

/// A row of the historical presidential results, one per (year, state, candidate).
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct ElectionResultRow {
    pub year: u32,
    pub state: String,
    pub state_po: String,
    pub party: String,
    pub candidate_votes: u64,
    pub total_votes: u64,
}

pub type Point = [f64; 2];

/// Outline of a state, in the coordinate system of the source feature collection.
#[derive(PartialEq, Debug, Clone)]
pub enum Geometry {
    /// Rings of a single polygon. The first ring is the exterior.
    Polygon(Vec<Vec<Point>>),
    MultiPolygon(Vec<Vec<Vec<Point>>>),
}

impl Geometry {
    /// The ring used for all the placement computations.
    ///
    /// Only the exterior ring of the first polygon is considered. Islands and holes are ignored.
    pub fn first_ring(&self) -> Option<&[Point]> {
        match self {
            Geometry::Polygon(rings) => rings.first().map(|r| r.as_slice()),
            Geometry::MultiPolygon(polys) => polys
                .first()
                .and_then(|rings| rings.first())
                .map(|r| r.as_slice()),
        }
    }
}

#[derive(PartialEq, Debug, Clone)]
pub struct StateFeature {
    pub name: String,
    pub geometry: Geometry,
}

/// Everything loaded from the input files, before any transformation.
#[derive(PartialEq, Debug, Clone, Default)]
pub struct StoryDataset {
    /// Canonical ordering of the candidates.
    pub names: Vec<String>,
    pub candidates: Vec<CandidateRecord>,
    pub ranks: Vec<RankedEntry>,
    pub favorability: Vec<FavorabilityEntry>,
    pub results: Vec<ElectionResultRow>,
    pub states: Vec<StateFeature>,
}

// ******** Output data structures *********

#[derive(PartialEq, Debug, Clone)]
pub enum ExperienceNode {
    /// One node per experience category, pinned at a fixed position.
    Category {
        id: String,
        img: String,
        candidates: Vec<String>,
        size: u32,
        fx: f64,
        fy: f64,
    },
    /// One node per candidate. The position is left to the layout engine.
    Candidate {
        id: String,
        img: String,
        text: String,
        size: u32,
        opacity: f64,
    },
}

impl ExperienceNode {
    pub fn id(&self) -> &str {
        match self {
            ExperienceNode::Category { id, .. } => id,
            ExperienceNode::Candidate { id, .. } => id,
        }
    }
}

#[derive(PartialEq, Debug, Clone)]
pub struct ExperienceLink {
    pub id: String,
    pub source: String,
    pub target: String,
    pub color: String,
    pub opacity: f64,
}

#[derive(PartialEq, Debug, Clone)]
pub struct ExperienceGraph {
    pub nodes: Vec<ExperienceNode>,
    pub links: Vec<ExperienceLink>,
    /// category -> candidates, in category table order and candidate order.
    pub membership: IndexMap<String, IndexSet<String>>,
}

#[derive(PartialEq, Debug, Clone)]
pub struct IssueLeaf {
    pub name: String,
    pub img: String,
    pub size: u32,
    pub text: String,
}

#[derive(PartialEq, Debug, Clone)]
pub struct IssueBranch {
    pub name: String,
    pub img: String,
    pub children: Vec<IssueLeaf>,
}

#[derive(PartialEq, Debug, Clone)]
pub struct IssueHierarchy {
    pub name: String,
    pub children: Vec<IssueBranch>,
}

#[derive(PartialEq, Debug, Clone)]
pub struct CriticismEntry {
    pub name: String,
    pub img: String,
    pub size: usize,
    pub crit_keys: Vec<String>,
    pub crit_values: Vec<String>,
}

#[derive(Eq, PartialEq, Debug, Clone)]
pub struct BucketEntry {
    pub name: String,
    pub percentage: u32,
    pub img: Option<String>,
}

#[derive(Eq, PartialEq, Debug, Clone)]
pub struct PercentageBuckets {
    /// The entries above the threshold, followed by the synthetic "Other" entry.
    pub major: Vec<BucketEntry>,
    pub long_tail: Vec<BucketEntry>,
    /// For each long-tail member, the major view with this member broken out of "Other".
    pub alternates: IndexMap<String, Vec<BucketEntry>>,
}

#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash)]
pub enum FavorabilityRank {
    Unfavorable,
    None,
    Favorable,
}

impl FavorabilityRank {
    pub const ALL: [FavorabilityRank; 3] = [
        FavorabilityRank::Unfavorable,
        FavorabilityRank::None,
        FavorabilityRank::Favorable,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            FavorabilityRank::Unfavorable => "Unfavorable",
            FavorabilityRank::None => "None",
            FavorabilityRank::Favorable => "Favorable",
        }
    }
}

#[derive(PartialEq, Debug, Clone)]
pub struct FavorabilityBox {
    pub rank: FavorabilityRank,
    pub name: String,
    pub x0: f64,
    pub x1: f64,
    /// Total of all the boxes of a row.
    pub total: u32,
    pub n: i32,
}

#[derive(PartialEq, Debug, Clone)]
pub struct FavorabilityRow {
    pub name: String,
    pub img: String,
    pub unfavorable: i32,
    pub none: i32,
    pub favorable: i32,
    pub x0: f64,
    pub boxes: Vec<FavorabilityBox>,
}

#[derive(PartialEq, Debug, Clone)]
pub struct FavorabilityChart {
    pub rows: Vec<FavorabilityRow>,
    /// (left-most x0, right-most x1) over all the rows.
    pub extent: Option<(f64, f64)>,
}

#[derive(PartialEq, Debug, Clone)]
pub struct StateSummary {
    pub name: String,
    /// Dotted abbreviation (N.Y.) as a regular expression.
    pub abbreviation_pattern: Option<String>,
    pub year: Option<u32>,
    pub dem_votes: Option<u64>,
    pub rep_votes: Option<u64>,
    pub total_votes: Option<u64>,
    pub color: Option<String>,
    pub center: Option<Point>,
}

#[derive(PartialEq, Debug, Clone)]
pub struct MarkerPlacement {
    pub state: String,
    pub center: Point,
    pub vertex: Point,
    /// Final position of the marker: midway between the center and the vertex.
    pub coords: Point,
}

#[derive(PartialEq, Debug, Clone)]
pub struct GeoMarkers {
    pub name: String,
    pub img: String,
    pub born: Option<MarkerPlacement>,
    pub role: Option<MarkerPlacement>,
}

#[derive(PartialEq, Debug, Clone)]
pub struct StoryMap {
    pub states: Vec<StateSummary>,
    pub markers: Vec<GeoMarkers>,
}

impl StoryMap {
    /// The candidates that have a known state of birth.
    pub fn born_markers(&self) -> impl Iterator<Item = &GeoMarkers> {
        self.markers.iter().filter(|m| m.born.is_some())
    }

    /// The candidates that have a known state of professional ties.
    pub fn role_markers(&self) -> impl Iterator<Item = &GeoMarkers> {
        self.markers.iter().filter(|m| m.role.is_some())
    }
}

#[derive(PartialEq, Debug, Clone)]
pub struct StoryOutput {
    pub experience: ExperienceGraph,
    pub issues: IssueHierarchy,
    pub criticisms: Vec<CriticismEntry>,
    pub buckets: PercentageBuckets,
    pub favorability: FavorabilityChart,
    pub map: StoryMap,
}

/// Errors that prevent the pipeline from completing.
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum StoryErrors {
    /// A pattern of one of the category tables failed to compile.
    InvalidPattern(String),
    /// A name listed in the names table has no profile.
    UnknownCandidate(String),
    EmptyDataset,
}

impl Error for StoryErrors {}

impl Display for StoryErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoryErrors::InvalidPattern(p) => write!(f, "invalid category pattern: {}", p),
            StoryErrors::UnknownCandidate(n) => write!(f, "no profile for candidate {}", n),
            StoryErrors::EmptyDataset => write!(f, "the names table is empty"),
        }
    }
}

// ********* Configuration **********

#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub struct BucketRules {
    /// Entries at or below this percentage are folded into "Other".
    pub long_tail_threshold: u32,
    /// Share of voters choosing someone who is not listed at all.
    pub other_adjustment: u32,
}

impl BucketRules {
    pub const DEFAULT_RULES: BucketRules = BucketRules {
        long_tail_threshold: 1,
        other_adjustment: 2,
    };
}

#[derive(PartialEq, Debug, Clone)]
pub struct StoryRules {
    pub buckets: BucketRules,
    /// Only the historical results of this year are put on the map.
    pub election_year: u32,
    pub canvas_width: f64,
    pub canvas_height: f64,
}

impl StoryRules {
    pub const DEFAULT_RULES: StoryRules = StoryRules {
        buckets: BucketRules::DEFAULT_RULES,
        election_year: 2016,
        canvas_width: 600.0,
        canvas_height: 520.0,
    };
}
