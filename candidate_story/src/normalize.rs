//! Cleaning of the free-text fields of the candidate profiles.

use log::debug;
use regex::Regex;

use crate::config::*;

/// Whether a raw value is the "no data" sentinel.
pub fn is_not_applicable(raw: &str) -> bool {
    raw.trim().eq_ignore_ascii_case(NOT_APPLICABLE)
}

/// Trimmed, lower-cased version of a fragment, ready for pattern testing.
///
/// The sentinel value becomes the empty string.
pub fn normalize_fragment(raw: &str) -> String {
    if is_not_applicable(raw) {
        return String::new();
    }
    raw.trim().to_lowercase()
}

/// Splits a multi-item field on commas and normalizes every item.
/// Empty items are dropped.
pub fn split_fragments(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(normalize_fragment)
        .filter(|s| !s.is_empty())
        .collect()
}

/// Removes the criticism marker of a heading.
///
/// Returns the heading without its marker, and whether the marker was present.
pub fn strip_criticism_marker(heading: &str) -> (&str, bool) {
    match heading.strip_prefix(CRITICISM_MARKER) {
        Some(rest) => (rest, true),
        None => (heading, false),
    }
}

/// The image of a candidate: `portraits/beto_orourke.png`.
pub fn portrait_path(name: &str) -> String {
    format!("portraits/{}.png", name.to_lowercase().replace('\'', ""))
}

/// Cuts a long biography into list items.
///
/// The source text is a run-on paragraph. A sentence break is only recognized when the
/// next sentence starts with a capitalized word followed by two other words (to avoid
/// cutting after abbreviations such as "D.C."). A comma or a semicolon starts a new item
/// only when followed by at least two words (to keep "Queens, New York" together).
pub struct BulletSplitter {
    sentence_break: Regex,
    clause_break: Regex,
}

impl BulletSplitter {
    pub fn new() -> Result<BulletSplitter, StoryErrors> {
        let sentence = r"(\s[A-Za-z0-9]+)([.?!])(\s[A-Z][a-z\-]+\s[A-Za-z\-]+\s[A-Za-z\-]+\s)";
        let clause = r"([A-Za-z0-9)])([;,])(\s[a-zA-Z0-9.\-]+\s[a-zA-Z0-9\-]+\s)";
        Ok(BulletSplitter {
            sentence_break: Regex::new(sentence)
                .map_err(|_| StoryErrors::InvalidPattern(sentence.to_string()))?,
            clause_break: Regex::new(clause)
                .map_err(|_| StoryErrors::InvalidPattern(clause.to_string()))?,
        })
    }

    pub fn bullets(&self, text: &str) -> Vec<String> {
        let text = text.trim();
        let text = self.sentence_break.replace_all(text, "${1}${2}|${3}");
        let text = self.clause_break.replace_all(&text, "${1} |${3}");
        text.split('|')
            .map(|s| s.trim())
            .filter(|s| !s.is_empty() && *s != NOT_APPLICABLE)
            .map(capitalize_first)
            .collect()
    }

    /// `<li>` items for a biography.
    pub fn format_html(&self, text: &str) -> String {
        self.bullets(text)
            .iter()
            .map(|b| format!("<li>{}</li>", b))
            .collect()
    }

    /// The text shown when a candidate node is selected: the current position and the
    /// itemized previous roles, as an unordered list.
    pub fn candidate_tooltip(&self, record: &CandidateRecord) -> String {
        let mut res = String::from("<ul>");
        if let Some(current) = record.field(CURRENT_POSITION) {
            let current = current.trim();
            if current != NOT_APPLICABLE {
                res.push_str(&format!("<li>{}</li>", current));
            }
        }
        if let Some(previous) = record.field(PREVIOUS_ROLES) {
            res.push_str(&self.format_html(previous));
        }
        res.push_str("</ul>");
        debug!("candidate_tooltip: {}: {}", record.name, res);
        res
    }
}

fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) => c.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sentinel_is_no_data() {
        assert_eq!(normalize_fragment("  n/a "), "");
        assert_eq!(normalize_fragment(" Senator "), "senator");
        assert!(split_fragments("n/a").is_empty());
    }

    #[test]
    fn split_on_commas() {
        assert_eq!(
            split_fragments("Mayor of South Bend, Navy Reserve ,"),
            vec!["mayor of south bend".to_string(), "navy reserve".to_string()]
        );
    }

    #[test]
    fn criticism_marker() {
        assert_eq!(strip_criticism_marker("*Flip-flopping"), ("Flip-flopping", true));
        assert_eq!(strip_criticism_marker("Born"), ("Born", false));
    }

    #[test]
    fn portraits() {
        assert_eq!(portrait_path("Beto_O'Rourke"), "portraits/beto_orourke.png");
    }

    #[test]
    fn bullets_on_clauses_and_sentences() {
        let s = BulletSplitter::new().unwrap();
        let b = s.bullets("attorney general of California, district attorney of San Francisco");
        assert_eq!(
            b,
            vec![
                "Attorney general of California".to_string(),
                "District attorney of San Francisco".to_string()
            ]
        );
        // A location stays in one piece.
        assert_eq!(s.bullets("lawyer in Queens, New York"), vec!["Lawyer in Queens, New York"]);
        let b = s.bullets("He was a lawyer. He then became a senator ");
        assert_eq!(
            b,
            vec!["He was a lawyer.".to_string(), "He then became a senator".to_string()]
        );
    }

    #[test]
    fn tooltip_skips_sentinel() {
        let s = BulletSplitter::new().unwrap();
        let mut r = CandidateRecord::new("Alice");
        r.fields.push((CURRENT_POSITION.to_string(), "n/a ".to_string()));
        r.fields.push((PREVIOUS_ROLES.to_string(), "n/a".to_string()));
        assert_eq!(s.candidate_tooltip(&r), "<ul></ul>");

        let mut r = CandidateRecord::new("Bob");
        r.fields.push((CURRENT_POSITION.to_string(), "Senator".to_string()));
        assert_eq!(s.candidate_tooltip(&r), "<ul><li>Senator</li></ul>");
    }
}
