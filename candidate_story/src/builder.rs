pub use crate::config::*;

use indexmap::IndexMap;
use rand::Rng;

/// A builder for assembling a dataset record by record.
///
/// ```
/// pub use candidate_story::builder::Builder;
/// pub use candidate_story::StoryRules;
/// # use candidate_story::StoryErrors;
/// # use rand::SeedableRng;
///
/// let mut builder = Builder::new(&StoryRules::DEFAULT_RULES)?
///     .candidates(&["Anna".to_string(), "Bob".to_string()])?;
///
/// builder.add_field("Anna", "Current position", "Senator from Ohio")?;
/// builder.add_field("Bob", "Current position", "CEO of Acme")?;
/// builder.add_ranked("Anna", 40);
///
/// let output = builder.run(&mut rand::rngs::StdRng::seed_from_u64(1))?;
/// assert_eq!(output.experience.links.len(), 2);
///
/// # Ok::<(), StoryErrors>(())
/// ```
pub struct Builder {
    pub(crate) _rules: StoryRules,
    pub(crate) _names: Vec<String>,
    pub(crate) _records: IndexMap<String, CandidateRecord>,
    pub(crate) _dataset: StoryDataset,
}

impl Builder {
    pub fn new(rules: &StoryRules) -> Result<Builder, StoryErrors> {
        Ok(Builder {
            _rules: rules.clone(),
            _names: Vec::new(),
            _records: IndexMap::new(),
            _dataset: StoryDataset::default(),
        })
    }

    /// Declares the candidates, in their canonical order. Every candidate starts with an
    /// empty profile.
    pub fn candidates(self, names: &[String]) -> Result<Builder, StoryErrors> {
        if names.is_empty() {
            return Err(StoryErrors::EmptyDataset);
        }
        Ok(Builder {
            _rules: self._rules,
            _names: names.to_vec(),
            _records: names
                .iter()
                .map(|n| (n.clone(), CandidateRecord::new(n)))
                .collect(),
            _dataset: self._dataset,
        })
    }

    /// Adds a heading to the profile of a declared candidate.
    ///
    /// A heading given twice keeps its first position and takes the last value.
    pub fn add_field(
        &mut self,
        candidate: &str,
        heading: &str,
        value: &str,
    ) -> Result<(), StoryErrors> {
        let record = self
            ._records
            .get_mut(candidate)
            .ok_or_else(|| StoryErrors::UnknownCandidate(candidate.to_string()))?;
        match record.fields.iter_mut().find(|(h, _)| h == heading) {
            Some((_, v)) => *v = value.to_string(),
            None => record
                .fields
                .push((heading.to_string(), value.to_string())),
        }
        Ok(())
    }

    pub fn add_ranked(&mut self, name: &str, percentage: u32) {
        self._dataset.ranks.push(RankedEntry {
            name: name.to_string(),
            percentage,
        });
    }

    pub fn add_favorability(&mut self, name: &str, favorable: i32, unfavorable: i32) {
        self._dataset.favorability.push(FavorabilityEntry {
            name: name.to_string(),
            favorable,
            unfavorable,
        });
    }

    pub fn add_result(&mut self, row: &ElectionResultRow) {
        self._dataset.results.push(row.clone());
    }

    pub fn add_state(&mut self, feature: &StateFeature) {
        self._dataset.states.push(feature.clone());
    }

    pub fn dataset(&self) -> StoryDataset {
        StoryDataset {
            names: self._names.clone(),
            candidates: self._records.values().cloned().collect(),
            ..self._dataset.clone()
        }
    }

    pub fn run<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<StoryOutput, StoryErrors> {
        crate::run_story_pipeline(&self.dataset(), &self._rules, rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fields_keep_their_order() {
        let mut b = Builder::new(&StoryRules::DEFAULT_RULES)
            .unwrap()
            .candidates(&["A".to_string()])
            .unwrap();
        b.add_field("A", "Born", "1950").unwrap();
        b.add_field("A", "*Age", "old").unwrap();
        b.add_field("A", "Born", "1951").unwrap();
        let d = b.dataset();
        assert_eq!(
            d.candidates[0].fields,
            vec![
                ("Born".to_string(), "1951".to_string()),
                ("*Age".to_string(), "old".to_string())
            ]
        );
        assert_eq!(
            b.add_field("Z", "Born", "1"),
            Err(StoryErrors::UnknownCandidate("Z".to_string()))
        );
    }

    #[test]
    fn no_candidates() {
        let b = Builder::new(&StoryRules::DEFAULT_RULES).unwrap();
        assert!(matches!(b.candidates(&[]), Err(StoryErrors::EmptyDataset)));
    }
}
