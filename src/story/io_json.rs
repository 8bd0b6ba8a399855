// The candidate profiles, as produced by the scraper.

use serde_json::Value as JSValue;

use crate::story::io_common::simplify_file_name;
use crate::story::*;

pub fn read_candidates(path: &str) -> BStoryResult<Vec<CandidateRecord>> {
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu { path })?;
    let res = parse_candidates(&contents, path)?;
    info!(
        "read_candidates: {} profiles in {}",
        res.len(),
        simplify_file_name(path)
    );
    Ok(res)
}

/// Reads a JSON object of name -> {heading -> text}.
///
/// The order of the candidates and of the headings is the order of the file. Null values
/// are read as the "n/a" sentinel, and numbers are kept as their text.
pub fn parse_candidates(contents: &str, path: &str) -> BStoryResult<Vec<CandidateRecord>> {
    let js: JSValue = serde_json::from_str(contents).context(ParsingJsonSnafu { path })?;
    let profiles = js.as_object().context(CandidatesFormatSnafu {
        path,
        name: "<root>",
    })?;
    let mut res: Vec<CandidateRecord> = Vec::new();
    for (name, profile) in profiles.iter() {
        let headings = profile
            .as_object()
            .context(CandidatesFormatSnafu { path, name })?;
        let mut record = CandidateRecord::new(name);
        for (heading, value) in headings.iter() {
            let text = match value {
                JSValue::String(s) => s.clone(),
                JSValue::Null => NOT_APPLICABLE.to_string(),
                JSValue::Number(n) => n.to_string(),
                JSValue::Bool(b) => b.to_string(),
                _ => {
                    return Err(Box::new(StoryError::CandidatesFormat {
                        path: path.to_string(),
                        name: format!("{}/{}", name, heading),
                    }))
                }
            };
            record.fields.push((heading.clone(), text));
        }
        debug!("parse_candidates: {}: {:?}", name, record.fields);
        res.push(record);
    }
    Ok(res)
}
