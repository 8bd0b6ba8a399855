//! Voter choice percentages: the leading candidates, plus an "Other" slice that can be
//! broken down one candidate at a time.

use indexmap::IndexMap;
use log::{debug, info};

use crate::config::*;

pub const OTHER: &str = "Other";

/// Splits the entries into the major group and the long tail.
///
/// An entry is in the long tail when its percentage is at most the threshold (with the
/// default threshold of 1, both 0% and 1% are in the long tail). The major group gets a
/// synthetic "Other" entry worth the long tail plus the share of voters choosing an
/// unlisted candidate.
///
/// `images` gives the image of the known candidates. Entries without an image are still
/// counted.
pub fn bucket_percentages(
    entries: &[RankedEntry],
    images: &IndexMap<String, String>,
    rules: &BucketRules,
) -> PercentageBuckets {
    let mut major: Vec<BucketEntry> = Vec::new();
    let mut long_tail: Vec<BucketEntry> = Vec::new();
    for e in entries.iter() {
        let entry = BucketEntry {
            name: e.name.clone(),
            percentage: e.percentage,
            img: images.get(&e.name).cloned(),
        };
        if e.percentage <= rules.long_tail_threshold {
            long_tail.push(entry);
        } else {
            major.push(entry);
        }
    }

    let tail_sum: u32 = long_tail.iter().map(|e| e.percentage).sum();
    major.push(BucketEntry {
        name: OTHER.to_string(),
        percentage: tail_sum + rules.other_adjustment,
        img: None,
    });

    let mut alternates: IndexMap<String, Vec<BucketEntry>> = IndexMap::new();
    for member in long_tail.iter() {
        let mut view = major.clone();
        for e in view.iter_mut().filter(|e| e.name == OTHER) {
            e.percentage -= member.percentage;
        }
        view.push(member.clone());
        debug!("bucket_percentages: alternate view for {}: {:?}", member.name, view);
        alternates.insert(member.name.clone(), view);
    }
    info!(
        "bucket_percentages: {} major entries, {} in the long tail",
        major.len() - 1,
        long_tail.len()
    );

    PercentageBuckets {
        major,
        long_tail,
        alternates,
    }
}

impl PercentageBuckets {
    /// The view to show when a long-tail member is selected.
    pub fn alternate(&self, name: &str) -> Option<&[BucketEntry]> {
        self.alternates.get(name).map(|v| v.as_slice())
    }

    /// The long-tail members that can be shown as an icon.
    pub fn long_tail_icons(&self) -> Vec<(&str, &str)> {
        self.long_tail
            .iter()
            .filter_map(|e| e.img.as_deref().map(|img| (e.name.as_str(), img)))
            .collect()
    }
}

pub fn total(view: &[BucketEntry]) -> u32 {
    view.iter().map(|e| e.percentage).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entries(xs: &[(&str, u32)]) -> Vec<RankedEntry> {
        xs.iter()
            .map(|(n, p)| RankedEntry {
                name: n.to_string(),
                percentage: *p,
            })
            .collect()
    }

    fn simple(view: &[BucketEntry]) -> Vec<(&str, u32)> {
        view.iter().map(|e| (e.name.as_str(), e.percentage)).collect()
    }

    #[test]
    fn other_and_alternates() {
        let b = bucket_percentages(
            &entries(&[("A", 40), ("B", 1), ("C", 59)]),
            &IndexMap::new(),
            &BucketRules::DEFAULT_RULES,
        );
        assert_eq!(simple(&b.major), vec![("A", 40), ("C", 59), ("Other", 3)]);
        assert_eq!(
            simple(b.alternate("B").unwrap()),
            vec![("A", 40), ("C", 59), ("Other", 2), ("B", 1)]
        );
        assert!(b.alternate("A").is_none());
    }

    #[test]
    fn threshold_boundary() {
        let b = bucket_percentages(
            &entries(&[("One", 1), ("Two", 2), ("Zero", 0)]),
            &IndexMap::new(),
            &BucketRules::DEFAULT_RULES,
        );
        assert_eq!(simple(&b.major), vec![("Two", 2), ("Other", 3)]);
        assert_eq!(simple(&b.long_tail), vec![("One", 1), ("Zero", 0)]);
    }

    #[test]
    fn alternates_keep_the_total() {
        let b = bucket_percentages(
            &entries(&[("A", 30), ("B", 1), ("C", 25), ("D", 0), ("E", 1), ("F", 12)]),
            &IndexMap::new(),
            &BucketRules::DEFAULT_RULES,
        );
        assert_eq!(b.alternates.len(), 3);
        for view in b.alternates.values() {
            assert_eq!(total(view), total(&b.major));
        }
    }

    #[test]
    fn icons_for_known_candidates() {
        let mut images: IndexMap<String, String> = IndexMap::new();
        images.insert("B".to_string(), "portraits/b.png".to_string());
        let b = bucket_percentages(
            &entries(&[("A", 40), ("B", 1), ("Someone", 1)]),
            &images,
            &BucketRules::DEFAULT_RULES,
        );
        assert_eq!(b.long_tail_icons(), vec![("B", "portraits/b.png")]);
        assert_eq!(b.major[1].percentage, 4);
        assert_eq!(b.alternates.len(), 2);
    }
}
