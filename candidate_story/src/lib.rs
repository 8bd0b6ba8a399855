mod config;
use indexmap::IndexMap;
use log::{debug, info};
use rand::Rng;

pub use crate::config::*;

pub mod buckets;
pub mod builder;
pub mod experience;
pub mod favorability;
pub mod geo;
pub mod issues;
pub mod manual;
pub mod normalize;
pub mod patterns;

use crate::normalize::{portrait_path, BulletSplitter};

/// Runs all the transformations over a loaded dataset.
///
/// Arguments:
/// * `dataset` the content of the input files
/// * `rules` the thresholds and constants of the story
/// * `rng` the source used to place the markers on the map. Pass a seeded generator
///   to get reproducible placements.
///
/// The candidates are processed in the order of `dataset.names`. Every listed name must
/// have a profile; profiles of unlisted candidates are ignored.
pub fn run_story_pipeline<R: Rng + ?Sized>(
    dataset: &StoryDataset,
    rules: &StoryRules,
    rng: &mut R,
) -> Result<StoryOutput, StoryErrors> {
    info!(
        "run_story_pipeline: {} candidates, {} profiles, {} ranks, {} states, rules: {:?}",
        dataset.names.len(),
        dataset.candidates.len(),
        dataset.ranks.len(),
        dataset.states.len(),
        rules
    );
    if dataset.names.is_empty() {
        return Err(StoryErrors::EmptyDataset);
    }

    let mut candidates: Vec<CandidateRecord> = Vec::new();
    for name in dataset.names.iter() {
        let record = dataset
            .candidates
            .iter()
            .find(|r| r.name == *name)
            .ok_or_else(|| StoryErrors::UnknownCandidate(name.clone()))?;
        candidates.push(record.clone());
    }
    let images: IndexMap<String, String> = dataset
        .names
        .iter()
        .map(|n| (n.clone(), portrait_path(n)))
        .collect();
    debug!("run_story_pipeline: images: {:?}", images);

    let splitter = BulletSplitter::new()?;
    let experience_table = patterns::experience_categories()?;
    let issue_table = patterns::issue_categories()?;

    let experience =
        experience::build_experience_graph(&candidates, &experience_table, &splitter, rules);
    let issues = issues::build_issue_hierarchy(&candidates, &issue_table);
    let criticisms = issues::build_criticisms(&candidates);
    let buckets = buckets::bucket_percentages(&dataset.ranks, &images, &rules.buckets);
    let favorability = favorability::build_favorability(&dataset.favorability, &images);

    let states = geo::summarize_states(&dataset.states, &dataset.results, rules.election_year);
    let state_table = geo::state_table(&states)?;
    let markers = geo::place_markers(&candidates, &dataset.states, &states, &state_table, rng);

    Ok(StoryOutput {
        experience,
        issues,
        criticisms,
        buckets,
        favorability,
        map: StoryMap { states, markers },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::Builder;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn init() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    #[test]
    fn two_candidates_end_to_end() {
        init();
        let mut b = Builder::new(&StoryRules::DEFAULT_RULES)
            .unwrap()
            .candidates(&["Alice".to_string(), "Bob".to_string()])
            .unwrap();
        b.add_field("Alice", CURRENT_POSITION, "Senator").unwrap();
        b.add_field("Alice", BORN, "1949 in Oklahoma City, Oklahoma").unwrap();
        b.add_field("Alice", "*Electability", "doubts").unwrap();
        b.add_field("Bob", CURRENT_POSITION, "CEO of Acme, N.Y.").unwrap();
        b.add_field("Bob", "Medicare for All", "against").unwrap();
        b.add_ranked("Alice", 40);
        b.add_ranked("Bob", 1);
        b.add_ranked("Carl", 59);
        b.add_favorability("Alice", 50, 30);
        b.add_favorability("Carl", 50, 30);
        b.add_state(&StateFeature {
            name: "Oklahoma".to_string(),
            geometry: Geometry::Polygon(vec![vec![[0.0, 0.0], [2.0, 0.0], [2.0, 2.0], [0.0, 2.0]]]),
        });

        b.add_state(&StateFeature {
            name: "New York".to_string(),
            geometry: Geometry::Polygon(vec![vec![[10.0, 10.0], [12.0, 10.0], [12.0, 12.0]]]),
        });
        b.add_result(&ElectionResultRow {
            year: 2016,
            state: "New York".to_string(),
            state_po: "NY".to_string(),
            party: "democrat".to_string(),
            candidate_votes: 60,
            total_votes: 100,
        });

        let out = b.run(&mut StdRng::seed_from_u64(3)).unwrap();

        assert!(out.experience.membership["political"].contains("Alice"));
        assert!(out.experience.membership["entrepreneurial"].contains("Bob"));
        assert_eq!(out.experience.links.len(), 2);

        let health = out
            .issues
            .children
            .iter()
            .find(|b| b.name == "health_care")
            .unwrap();
        assert_eq!(health.children[0].name, "Bob");

        assert_eq!(out.criticisms[0].crit_keys, vec!["Electability"]);
        assert_eq!(out.criticisms[1].size, 0);

        assert_eq!(out.buckets.major.last().unwrap().percentage, 3);
        assert_eq!(out.buckets.major[0].img.as_deref(), Some("portraits/alice.png"));
        assert_eq!(out.favorability.rows.len(), 1);

        assert_eq!(out.map.markers[0].born.as_ref().unwrap().state, "Oklahoma");
        assert!(out.map.markers[1].born.is_none());
        // Only the dotted abbreviation ties Bob to New York.
        assert_eq!(out.map.markers[1].role.as_ref().unwrap().state, "New York");
        assert_eq!(out.map.states[1].color.as_deref(), Some("#3377FF"));
        assert_eq!(out.map.states[0].color, None);
    }

    #[test]
    fn missing_profile_is_fatal() {
        let dataset = StoryDataset {
            names: vec!["Ghost".to_string()],
            ..StoryDataset::default()
        };
        let res = run_story_pipeline(
            &dataset,
            &StoryRules::DEFAULT_RULES,
            &mut StdRng::seed_from_u64(0),
        );
        assert_eq!(res, Err(StoryErrors::UnknownCandidate("Ghost".to_string())));
        let res = run_story_pipeline(
            &StoryDataset::default(),
            &StoryRules::DEFAULT_RULES,
            &mut StdRng::seed_from_u64(0),
        );
        assert_eq!(res, Err(StoryErrors::EmptyDataset));
    }
}
