use log::{debug, info, warn};

use candidate_story::*;
use snafu::{prelude::*, Snafu};

use std::fs;
use std::path::Path;

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde_json::json;
use serde_json::Map as JSMap;
use serde_json::Value as JSValue;
use text_diff::print_diff;

use crate::story::config_reader::*;

mod config_reader;
mod io_common;
mod io_csv;
mod io_geo;
mod io_json;

#[derive(Debug, Snafu)]
pub enum StoryError {
    #[snafu(display("Error opening file {path}"))]
    OpeningJson {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error parsing the JSON file {path}"))]
    ParsingJson {
        source: serde_json::Error,
        path: String,
    },
    #[snafu(display("Could not read the number in field {field}"))]
    ParsingJsonNumber { field: String },
    #[snafu(display("Unexpected content for {name} in the candidates file {path}"))]
    CandidatesFormat { path: String, name: String },
    #[snafu(display("The outline of {name} has a position with fewer than two coordinates"))]
    GeoJsonGeometry { name: String },
    #[snafu(display("Error opening the CSV file {path}"))]
    CsvOpen { source: csv::Error, path: String },
    #[snafu(display("Error reading line {lineno} of {path}"))]
    CsvLineParse {
        source: csv::Error,
        path: String,
        lineno: usize,
    },
    #[snafu(display("Line {lineno} of {path} is too short"))]
    CsvLineTooShort { path: String, lineno: usize },
    #[snafu(display("Missing column {column} in {path}"))]
    CsvMissingColumn { path: String, column: String },
    #[snafu(display("Line {lineno} of {path}: {value:?} is not a percentage"))]
    ParsingPercentage {
        path: String,
        lineno: usize,
        value: String,
    },
    #[snafu(display("Line {lineno} of {path}: {value:?} is not a number"))]
    ParsingNumber {
        path: String,
        lineno: usize,
        value: String,
    },
    #[snafu(display("The configuration file has no parent directory"))]
    MissingParentDir {},
    #[snafu(display("Error while preparing the story"))]
    Pipeline { source: StoryErrors },
    #[snafu(display("Error writing the summary to {path}"))]
    WritingOutput {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Difference detected between the computed summary and the reference summary"))]
    ReferenceMismatch {},

    #[snafu(whatever, display("{message}"))]
    Whatever {
        message: String,
        #[snafu(source(from(Box<dyn std::error::Error>, Some)))]
        source: Option<Box<dyn std::error::Error>>,
    },
}

pub type StoryResult<T> = Result<T, StoryError>;
pub type BStoryResult<T> = Result<T, Box<StoryError>>;

fn load_dataset(root: &Path, sources: &DataSources) -> BStoryResult<StoryDataset> {
    let names = io_csv::read_names(&io_common::source_path(root, &sources.names_file))?;
    let candidates =
        io_json::read_candidates(&io_common::source_path(root, &sources.candidates_file))?;
    let (ranks, favorability) =
        io_csv::read_ranks(&io_common::source_path(root, &sources.ranks_file))?;
    let results = io_csv::read_results(&io_common::source_path(root, &sources.results_file))?;
    let states = io_geo::read_states(&io_common::source_path(root, &sources.states_file))?;
    Ok(StoryDataset {
        names,
        candidates,
        ranks,
        favorability,
        results,
        states,
    })
}

fn experience_to_json(graph: &ExperienceGraph) -> JSValue {
    let nodes: Vec<JSValue> = graph
        .nodes
        .iter()
        .map(|n| match n {
            ExperienceNode::Category {
                id,
                img,
                candidates,
                size,
                fx,
                fy,
            } => json!({
                "id": id,
                "img": img,
                "candidates": candidates,
                "size": size,
                "fx": fx,
                "fy": fy
            }),
            ExperienceNode::Candidate {
                id,
                img,
                text,
                size,
                opacity,
            } => json!({
                "id": id,
                "img": img,
                "text": text,
                "size": size,
                "opacity": opacity
            }),
        })
        .collect();
    let links: Vec<JSValue> = graph
        .links
        .iter()
        .map(|l| {
            json!({
                "id": l.id,
                "source": l.source,
                "target": l.target,
                "color": l.color,
                "opacity": l.opacity
            })
        })
        .collect();
    json!({"nodes": nodes, "links": links})
}

fn issues_to_json(issues: &IssueHierarchy) -> JSValue {
    let children: Vec<JSValue> = issues
        .children
        .iter()
        .map(|b| {
            let leaves: Vec<JSValue> = b
                .children
                .iter()
                .map(|l| json!({"name": l.name, "img": l.img, "size": l.size, "text": l.text}))
                .collect();
            json!({"name": b.name, "img": b.img, "children": leaves})
        })
        .collect();
    json!({"name": issues.name, "children": children})
}

fn criticisms_to_json(criticisms: &[CriticismEntry]) -> Vec<JSValue> {
    criticisms
        .iter()
        .map(|c| {
            json!({
                "name": c.name,
                "img": c.img,
                "size": c.size,
                "critKeys": c.crit_keys,
                "critValues": c.crit_values
            })
        })
        .collect()
}

fn bucket_view_to_json(view: &[BucketEntry]) -> Vec<JSValue> {
    view.iter()
        .map(|e| json!({"name": e.name, "percentage": e.percentage, "img": e.img}))
        .collect()
}

fn pie_to_json(buckets: &PercentageBuckets) -> JSValue {
    let icons: Vec<JSValue> = buckets
        .long_tail_icons()
        .iter()
        .map(|(name, img)| json!({"name": name, "img": img}))
        .collect();
    let mut alternates: JSMap<String, JSValue> = JSMap::new();
    for (name, view) in buckets.alternates.iter() {
        alternates.insert(name.clone(), json!(bucket_view_to_json(view)));
    }
    json!({
        "major": bucket_view_to_json(&buckets.major),
        "longTail": icons,
        "alternates": alternates
    })
}

fn favorability_to_json(chart: &FavorabilityChart) -> JSValue {
    let rows: Vec<JSValue> = chart
        .rows
        .iter()
        .map(|r| {
            let boxes: Vec<JSValue> = r
                .boxes
                .iter()
                .map(|b| {
                    json!({
                        "rank": b.rank.label(),
                        "name": b.name,
                        "x0": b.x0,
                        "x1": b.x1,
                        "N": b.total,
                        "n": b.n
                    })
                })
                .collect();
            json!({
                "name": r.name,
                "img": r.img,
                "Unfavorable": r.unfavorable,
                "None": r.none,
                "Favorable": r.favorable,
                "x0": r.x0,
                "boxes": boxes
            })
        })
        .collect();
    json!({"rows": rows, "extent": chart.extent.map(|(a, b)| vec![a, b])})
}

fn placement_to_json(m: &GeoMarkers, p: &MarkerPlacement) -> JSValue {
    json!({
        "name": m.name,
        "img": m.img,
        "state": p.state,
        "center": p.center,
        "vertex": p.vertex,
        "coords": p.coords
    })
}

fn map_to_json(map: &StoryMap) -> JSValue {
    let states: Vec<JSValue> = map
        .states
        .iter()
        .map(|s| {
            json!({
                "name": s.name,
                "abbreviation": s.abbreviation_pattern,
                "year": s.year,
                "demVotes": s.dem_votes,
                "repVotes": s.rep_votes,
                "totalVotes": s.total_votes,
                "color": s.color,
                "center": s.center
            })
        })
        .collect();
    let born: Vec<JSValue> = map
        .born_markers()
        .filter_map(|m| m.born.as_ref().map(|p| placement_to_json(m, p)))
        .collect();
    let roles: Vec<JSValue> = map
        .role_markers()
        .filter_map(|m| m.role.as_ref().map(|p| placement_to_json(m, p)))
        .collect();
    json!({"states": states, "born": born, "roles": roles})
}

fn build_summary_js(config: &OutputConfig, output: &StoryOutput) -> JSValue {
    json!({
        "config": config,
        "experience": experience_to_json(&output.experience),
        "issues": issues_to_json(&output.issues),
        "criticisms": criticisms_to_json(&output.criticisms),
        "pie": pie_to_json(&output.buckets),
        "favorability": favorability_to_json(&output.favorability),
        "map": map_to_json(&output.map)
    })
}

fn write_summary(out: Option<String>, pretty_js: &str) -> BStoryResult<()> {
    match out.as_deref() {
        None | Some("") | Some("stdout") => {
            println!("{}", pretty_js);
        }
        Some(path) => {
            info!("write_summary: writing summary to {}", path);
            fs::write(path, pretty_js).context(WritingOutputSnafu { path })?;
        }
    }
    Ok(())
}

/// Loads the inputs listed in a configuration file, runs all the transformations and writes
/// the summary.
///
/// `out` and `seed` override the values of the configuration. If `reference` is given, the
/// summary is compared with the content of this file.
pub fn run_story(
    config_path: &str,
    out: Option<String>,
    reference: Option<String>,
    seed: Option<u64>,
) -> BStoryResult<()> {
    let config = read_config(config_path)?;
    info!("config: {:?}", config);

    let rules = validate_rules(&config.rules)?;
    let seed = match seed {
        Some(x) => Some(x),
        None => config.rules.random_seed()?,
    };
    let mut rng = match seed {
        Some(x) => StdRng::seed_from_u64(x),
        None => StdRng::from_os_rng(),
    };

    let root = Path::new(config_path)
        .parent()
        .context(MissingParentDirSnafu {})?;
    let dataset = load_dataset(root, &config.data_sources)?;
    debug!("dataset: {:?}", dataset);

    let output = run_story_pipeline(&dataset, &rules, &mut rng).context(PipelineSnafu {})?;

    let output_config = OutputConfig {
        story: config.output_settings.story_name.clone(),
        election_year: rules.election_year,
        random_seed: seed,
    };
    let result_js = build_summary_js(&output_config, &output);
    let pretty_js_stats =
        serde_json::to_string_pretty(&result_js).context(ParsingJsonSnafu { path: "<summary>" })?;

    write_summary(
        out.or_else(|| config.output_settings.output_path.clone()),
        &pretty_js_stats,
    )?;

    // The reference summary, if provided for comparison
    if let Some(summary_p) = reference {
        let summary_ref = read_summary(&summary_p)?;
        let pretty_js_summary_ref = serde_json::to_string_pretty(&summary_ref)
            .context(ParsingJsonSnafu { path: summary_p })?;
        if pretty_js_summary_ref != pretty_js_stats {
            warn!("Found differences with the reference string");
            print_diff(
                pretty_js_summary_ref.as_str(),
                pretty_js_stats.as_ref(),
                "\n",
            );
            return Err(Box::new(StoryError::ReferenceMismatch {}));
        }
    }

    Ok(())
}
