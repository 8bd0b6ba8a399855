//! Stances on the critical issues and key criticisms.

use std::collections::HashSet;

use log::{debug, info};

use crate::config::*;
use crate::normalize::{normalize_fragment, portrait_path, strip_criticism_marker};
use crate::patterns::CategoryPatternSet;

pub const ISSUES_ROOT: &str = "Candidates";
const LEAF_SIZE: u32 = 3000;

fn issue_text(heading: &str, value: &str) -> String {
    format!("{}{}: {}", CRITICISM_MARKER, heading, value)
}

/// Builds the root -> issue -> candidate tree.
///
/// For every candidate, the categories are tried in table order, then their patterns, then
/// the headings of the profile. The first category to match a heading claims it: a claimed
/// heading is not offered to any other category for this candidate. A candidate has at most
/// one leaf per issue; later headings are appended to the text of the leaf.
pub fn build_issue_hierarchy(
    candidates: &[CandidateRecord],
    categories: &[CategoryPatternSet],
) -> IssueHierarchy {
    let mut children: Vec<IssueBranch> = categories
        .iter()
        .map(|c| IssueBranch {
            name: c.name.clone(),
            img: c
                .image
                .clone()
                .unwrap_or_else(|| format!("issues/{}.png", c.name)),
            children: Vec::new(),
        })
        .collect();

    for record in candidates.iter() {
        let mut claimed: HashSet<&str> = HashSet::new();
        for (category, branch) in categories.iter().zip(children.iter_mut()) {
            for pattern in category.patterns.iter() {
                for (heading, value) in record.fields.iter() {
                    if claimed.contains(heading.as_str()) {
                        continue;
                    }
                    let (stripped, _) = strip_criticism_marker(heading);
                    if !pattern.is_match(&normalize_fragment(stripped)) {
                        continue;
                    }
                    debug!(
                        "build_issue_hierarchy: {}: {:?} -> {} (pattern {:?})",
                        record.name, heading, category.name, pattern.source
                    );
                    let text = issue_text(stripped, value);
                    match branch.children.iter_mut().find(|l| l.name == record.name) {
                        Some(leaf) => {
                            leaf.text.push(' ');
                            leaf.text.push_str(&text);
                        }
                        None => branch.children.push(IssueLeaf {
                            name: record.name.clone(),
                            img: portrait_path(&record.name),
                            size: LEAF_SIZE,
                            text,
                        }),
                    }
                    claimed.insert(heading.as_str());
                }
            }
        }
    }
    info!(
        "build_issue_hierarchy: {} leaves over {} issues",
        children.iter().map(|b| b.children.len()).sum::<usize>(),
        children.len()
    );
    IssueHierarchy {
        name: ISSUES_ROOT.to_string(),
        children,
    }
}

/// The key criticisms of a candidate, in the order of the profile.
pub fn criticism_entry(record: &CandidateRecord) -> CriticismEntry {
    let mut crit_keys: Vec<String> = Vec::new();
    let mut crit_values: Vec<String> = Vec::new();
    for (heading, value) in record.fields.iter() {
        if let (stripped, true) = strip_criticism_marker(heading) {
            crit_keys.push(stripped.to_string());
            crit_values.push(value.clone());
        }
    }
    CriticismEntry {
        name: record.name.clone(),
        img: portrait_path(&record.name),
        size: crit_keys.len(),
        crit_keys,
        crit_values,
    }
}

pub fn build_criticisms(candidates: &[CandidateRecord]) -> Vec<CriticismEntry> {
    candidates.iter().map(criticism_entry).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::patterns::issue_categories;

    fn record(name: &str, fields: &[(&str, &str)]) -> CandidateRecord {
        CandidateRecord {
            name: name.to_string(),
            fields: fields
                .iter()
                .map(|(h, v)| (h.to_string(), v.to_string()))
                .collect(),
        }
    }

    fn branch<'a>(h: &'a IssueHierarchy, name: &str) -> &'a IssueBranch {
        h.children.iter().find(|b| b.name == name).unwrap()
    }

    #[test]
    fn headings_merge_into_one_leaf() {
        let h = build_issue_hierarchy(
            &[record(
                "Alice",
                &[
                    ("Student debt", "cancel it"),
                    ("Pre-K", "universal"),
                    ("Born", "1949"),
                ],
            )],
            &issue_categories().unwrap(),
        );
        assert_eq!(h.name, "Candidates");
        assert_eq!(h.children.len(), 11);
        let edu = branch(&h, "education");
        assert_eq!(edu.children.len(), 1);
        assert_eq!(edu.children[0].size, 3000);
        assert_eq!(
            edu.children[0].text,
            "*Student debt: cancel it *Pre-K: universal"
        );
    }

    #[test]
    fn a_heading_is_claimed_once() {
        // "carbon tax" matches both environment and economy.
        let h = build_issue_hierarchy(
            &[record("Bob", &[("Carbon tax", "yes"), ("Tax the rich", "yes")])],
            &issue_categories().unwrap(),
        );
        let env = branch(&h, "environment");
        assert_eq!(env.children[0].text, "*Carbon tax: yes");
        let eco = branch(&h, "economy");
        assert_eq!(eco.children[0].text, "*Tax the rich: yes");

        let mut seen: HashSet<String> = HashSet::new();
        for b in h.children.iter() {
            for leaf in b.children.iter() {
                for piece in leaf.text.split(" *") {
                    assert!(seen.insert(piece.trim_start_matches('*').to_string()));
                }
            }
        }
    }

    #[test]
    fn electoral_college_is_not_education() {
        let h = build_issue_hierarchy(
            &[record(
                "Carol",
                &[("Electoral college", "abolish"), ("College tuition", "free")],
            )],
            &issue_categories().unwrap(),
        );
        let edu = branch(&h, "education");
        assert_eq!(edu.children[0].text, "*College tuition: free");
        assert!(h
            .children
            .iter()
            .all(|b| b.children.iter().all(|l| !l.text.contains("Electoral"))));
    }

    #[test]
    fn criticism_headings_are_stripped() {
        let r = record(
            "Dan",
            &[
                ("Born", "1960"),
                ("*Health care flip", "n/a"),
                ("*Criticism 2", "too old"),
            ],
        );
        let h = build_issue_hierarchy(&[r.clone()], &issue_categories().unwrap());
        assert_eq!(
            branch(&h, "health_care").children[0].text,
            "*Health care flip: n/a"
        );

        let c = criticism_entry(&r);
        assert_eq!(c.size, 2);
        assert_eq!(c.crit_keys, vec!["Health care flip", "Criticism 2"]);
        assert_eq!(c.crit_values, vec!["n/a", "too old"]);
        assert_eq!(c.img, "portraits/dan.png");
    }

    #[test]
    fn unmatched_headings_are_omitted() {
        let h = build_issue_hierarchy(
            &[record("Eve", &[("Born", "1970"), ("Family", "two kids")])],
            &issue_categories().unwrap(),
        );
        assert!(h.children.iter().all(|b| b.children.is_empty()));
        assert_eq!(build_criticisms(&[record("Eve", &[])])[0].size, 0);
    }
}
