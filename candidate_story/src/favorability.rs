//! Favorability as a diverging stacked bar chart centered on the "no opinion" share.

use indexmap::IndexMap;
use log::warn;

use crate::config::*;

const ROW_TOTAL: u32 = 100;

/// Lays out the three boxes of a candidate row.
///
/// The row starts at `-(none / 2 + unfavorable)` so that the middle of the "None" box sits
/// on zero.
pub fn favorability_row(entry: &FavorabilityEntry, img: &str) -> FavorabilityRow {
    let unfavorable = entry.unfavorable;
    let favorable = entry.favorable;
    let none = ROW_TOTAL as i32 - (favorable + unfavorable);
    let x0 = -(none as f64 / 2.0 + unfavorable as f64);

    let mut boxes: Vec<FavorabilityBox> = Vec::new();
    let mut cursor = x0;
    for rank in FavorabilityRank::ALL.iter() {
        let n = match rank {
            FavorabilityRank::Unfavorable => unfavorable,
            FavorabilityRank::None => none,
            FavorabilityRank::Favorable => favorable,
        };
        let start = cursor;
        cursor += n as f64;
        boxes.push(FavorabilityBox {
            rank: *rank,
            name: entry.name.clone(),
            x0: start,
            x1: cursor,
            total: ROW_TOTAL,
            n,
        });
    }

    FavorabilityRow {
        name: entry.name.clone(),
        img: img.to_string(),
        unfavorable,
        none,
        favorable,
        x0,
        boxes,
    }
}

/// Rows for the known candidates. Entries for names missing from `images` are dropped.
pub fn build_favorability(
    entries: &[FavorabilityEntry],
    images: &IndexMap<String, String>,
) -> FavorabilityChart {
    let mut rows: Vec<FavorabilityRow> = Vec::new();
    for e in entries.iter() {
        match images.get(&e.name) {
            Some(img) => rows.push(favorability_row(e, img)),
            None => warn!("build_favorability: dropping unknown candidate {:?}", e.name),
        }
    }
    let extent = rows
        .iter()
        .filter_map(|r| Some((r.boxes.first()?.x0, r.boxes.last()?.x1)))
        .reduce(|(a0, a1), (b0, b1)| (a0.min(b0), a1.max(b1)));
    FavorabilityChart { rows, extent }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str, favorable: i32, unfavorable: i32) -> FavorabilityEntry {
        FavorabilityEntry {
            name: name.to_string(),
            favorable,
            unfavorable,
        }
    }

    #[test]
    fn boxes_are_contiguous() {
        let row = favorability_row(&entry("A", 50, 30), "portraits/a.png");
        assert_eq!(row.none, 20);
        assert_eq!(row.x0, -40.0);
        let spans: Vec<(f64, f64, i32)> = row.boxes.iter().map(|b| (b.x0, b.x1, b.n)).collect();
        assert_eq!(spans, vec![(-40.0, -10.0, 30), (-10.0, 10.0, 20), (10.0, 60.0, 50)]);
        assert_eq!(row.boxes[1].rank.label(), "None");
        assert!(row.boxes.iter().all(|b| b.total == 100));
    }

    #[test]
    fn odd_none_share() {
        let row = favorability_row(&entry("B", 40, 29), "");
        assert_eq!(row.none, 31);
        assert_eq!(row.x0, -44.5);
        assert_eq!(row.boxes[2].x1, 55.5);
    }

    #[test]
    fn unknown_candidates_dropped() {
        let mut images: IndexMap<String, String> = IndexMap::new();
        images.insert("A".to_string(), "portraits/a.png".to_string());
        images.insert("C".to_string(), "portraits/c.png".to_string());
        let chart = build_favorability(
            &[entry("A", 50, 30), entry("Z", 10, 10), entry("C", 20, 60)],
            &images,
        );
        assert_eq!(chart.rows.len(), 2);
        assert_eq!(chart.rows[1].img, "portraits/c.png");
        // C: none = 20, x0 = -70, x1 = 30. A: x0 = -40, x1 = 60.
        assert_eq!(chart.extent, Some((-70.0, 60.0)));
        assert_eq!(build_favorability(&[], &images).extent, None);
    }
}
