//! Candidate backgrounds: which candidates have a legal, entrepreneurial, political
//! or military past, as a graph for a force layout.

use indexmap::{IndexMap, IndexSet};
use log::{debug, info, warn};

use crate::config::*;
use crate::normalize::{portrait_path, split_fragments, BulletSplitter};
use crate::patterns::CategoryPatternSet;

const CATEGORY_NODE_SIZE: u32 = 100000;
const CANDIDATE_NODE_SIZE: u32 = 40000;

/// Color of the links leaving a category node.
pub fn experience_color(category: &str) -> Option<&'static str> {
    match category {
        "military" => Some("#FF4633"),
        "legal" => Some("#FFBE33"),
        "entrepreneurial" => Some("#10CDA3"),
        "political" => Some("#3377FF"),
        _ => None,
    }
}

/// Pinned position of a category node on a canvas of the given size.
pub fn category_position(category: &str, width: f64, height: f64) -> Option<Point> {
    match category {
        "legal" => Some([0.0, 0.0]),
        "entrepreneurial" => Some([0.0, height]),
        "political" => Some([width * 0.8, height * 0.45]),
        "military" => Some([width, height]),
        _ => None,
    }
}

/// The fragments of the position fields of a candidate.
fn position_fragments(record: &CandidateRecord) -> Vec<String> {
    [CURRENT_POSITION, PREVIOUS_ROLES]
        .iter()
        .filter_map(|h| record.field(h))
        .flat_map(split_fragments)
        .collect()
}

/// category -> candidates with a matching position fragment.
///
/// Every category of the table has an entry, possibly empty. Candidates appear in the
/// order of `candidates`.
pub fn experience_membership(
    candidates: &[CandidateRecord],
    categories: &[CategoryPatternSet],
) -> IndexMap<String, IndexSet<String>> {
    let mut membership: IndexMap<String, IndexSet<String>> = categories
        .iter()
        .map(|c| (c.name.clone(), IndexSet::new()))
        .collect();
    for record in candidates.iter() {
        let fragments = position_fragments(record);
        for category in categories.iter() {
            for fragment in fragments.iter() {
                if category.matches(fragment) {
                    debug!(
                        "experience_membership: {} -> {} (fragment {:?})",
                        record.name, category.name, fragment
                    );
                    if let Some(members) = membership.get_mut(&category.name) {
                        members.insert(record.name.clone());
                    }
                }
            }
        }
    }
    membership
}

/// Builds the nodes and the links of the background graph.
///
/// The links are rebuilt from scratch: ids are numbered from `link0`, category by category,
/// then in candidate order.
pub fn build_experience_graph(
    candidates: &[CandidateRecord],
    categories: &[CategoryPatternSet],
    splitter: &BulletSplitter,
    rules: &StoryRules,
) -> ExperienceGraph {
    let membership = experience_membership(candidates, categories);

    let mut nodes: Vec<ExperienceNode> = Vec::new();
    for category in categories.iter() {
        let [fx, fy] = category_position(&category.name, rules.canvas_width, rules.canvas_height)
            .unwrap_or_else(|| {
                warn!(
                    "build_experience_graph: no position for category {}, using the center",
                    category.name
                );
                [rules.canvas_width / 2.0, rules.canvas_height / 2.0]
            });
        let members: Vec<String> = membership
            .get(&category.name)
            .map(|m| m.iter().cloned().collect())
            .unwrap_or_default();
        nodes.push(ExperienceNode::Category {
            id: category.name.clone(),
            img: category
                .image
                .clone()
                .unwrap_or_else(|| format!("experience/{}.png", category.name)),
            candidates: members,
            size: CATEGORY_NODE_SIZE,
            fx,
            fy,
        });
    }
    for record in candidates.iter() {
        nodes.push(ExperienceNode::Candidate {
            id: record.name.clone(),
            img: portrait_path(&record.name),
            text: splitter.candidate_tooltip(record),
            size: CANDIDATE_NODE_SIZE,
            opacity: 1.0,
        });
    }

    let mut links: Vec<ExperienceLink> = Vec::new();
    let mut link_id: usize = 0;
    for (category, members) in membership.iter() {
        let color = experience_color(category).unwrap_or("#000000");
        for name in members.iter() {
            links.push(ExperienceLink {
                id: format!("link{}", link_id),
                source: category.clone(),
                target: name.clone(),
                color: color.to_string(),
                opacity: 1.0,
            });
            link_id += 1;
        }
    }
    info!(
        "build_experience_graph: {} nodes, {} links",
        nodes.len(),
        links.len()
    );

    ExperienceGraph {
        nodes,
        links,
        membership,
    }
}

/// Ids of the links leaving a category node.
pub fn links_from_category<'a>(graph: &'a ExperienceGraph, category: &str) -> Vec<&'a str> {
    graph
        .links
        .iter()
        .filter(|l| l.source == category)
        .map(|l| l.id.as_str())
        .collect()
}

/// Ids of the links reaching a candidate node.
pub fn links_to_candidate<'a>(graph: &'a ExperienceGraph, name: &str) -> Vec<&'a str> {
    graph
        .links
        .iter()
        .filter(|l| l.target == name)
        .map(|l| l.id.as_str())
        .collect()
}
