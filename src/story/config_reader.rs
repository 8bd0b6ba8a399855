use crate::story::*;

use serde::{Deserialize, Serialize};
use serde_json::Value as JSValue;

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct OutputSettings {
    #[serde(rename = "storyName")]
    pub story_name: String,
    #[serde(rename = "outputPath")]
    pub output_path: Option<String>,
}

/// The input files, relative to the directory of the configuration file.
#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct DataSources {
    #[serde(rename = "namesFile")]
    pub names_file: String,
    #[serde(rename = "candidatesFile")]
    pub candidates_file: String,
    #[serde(rename = "ranksFile")]
    pub ranks_file: String,
    #[serde(rename = "resultsFile")]
    pub results_file: String,
    #[serde(rename = "statesFile")]
    pub states_file: String,
}

#[derive(PartialEq, Debug, Clone, Default, Serialize, Deserialize)]
pub struct RuleSettings {
    #[serde(rename = "longTailThreshold")]
    pub long_tail_threshold: Option<u32>,
    #[serde(rename = "otherAdjustment")]
    pub other_adjustment: Option<u32>,
    #[serde(rename = "electionYear")]
    _election_year: Option<JSValue>,
    #[serde(rename = "randomSeed")]
    _random_seed: Option<JSValue>,
    #[serde(rename = "canvasWidth")]
    pub canvas_width: Option<f64>,
    #[serde(rename = "canvasHeight")]
    pub canvas_height: Option<f64>,
}

impl RuleSettings {
    pub fn election_year(&self) -> StoryResult<Option<u32>> {
        read_js_int(&self._election_year, "electionYear").map(|x| x.map(|y| y as u32))
    }

    pub fn random_seed(&self) -> StoryResult<Option<u64>> {
        read_js_int(&self._random_seed, "randomSeed")
    }
}

#[derive(PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct StoryConfig {
    #[serde(rename = "outputSettings")]
    pub output_settings: OutputSettings,
    #[serde(rename = "dataSources")]
    pub data_sources: DataSources,
    #[serde(default)]
    pub rules: RuleSettings,
}

/// The summary of the configuration, as written in the output.
#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub story: String,
    #[serde(rename = "electionYear")]
    pub election_year: u32,
    #[serde(rename = "randomSeed")]
    pub random_seed: Option<u64>,
}

pub fn read_config(path: &str) -> BStoryResult<StoryConfig> {
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu { path })?;
    let config: StoryConfig =
        serde_json::from_str(&contents).context(ParsingJsonSnafu { path })?;
    Ok(config)
}

pub fn read_summary(path: &str) -> BStoryResult<JSValue> {
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu { path })?;
    let js: JSValue = serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu { path })?;
    Ok(js)
}

pub fn validate_rules(settings: &RuleSettings) -> StoryResult<StoryRules> {
    let defaults = StoryRules::DEFAULT_RULES;
    let canvas_width = settings.canvas_width.unwrap_or(defaults.canvas_width);
    let canvas_height = settings.canvas_height.unwrap_or(defaults.canvas_height);
    if !(canvas_width > 0.0 && canvas_height > 0.0) {
        whatever!(
            "The canvas must have a positive size, got {}x{}",
            canvas_width,
            canvas_height
        )
    }
    Ok(StoryRules {
        buckets: BucketRules {
            long_tail_threshold: settings
                .long_tail_threshold
                .unwrap_or(defaults.buckets.long_tail_threshold),
            other_adjustment: settings
                .other_adjustment
                .unwrap_or(defaults.buckets.other_adjustment),
        },
        election_year: settings.election_year()?.unwrap_or(defaults.election_year),
        canvas_width,
        canvas_height,
    })
}

// Numbers may be written as JSON numbers or as strings.
fn read_js_int(x: &Option<JSValue>, field: &str) -> StoryResult<Option<u64>> {
    match x {
        None | Some(JSValue::Null) => Ok(None),
        Some(JSValue::Number(n)) => n
            .as_u64()
            .map(Some)
            .context(ParsingJsonNumberSnafu { field }),
        Some(JSValue::String(s)) => s
            .trim()
            .parse::<u64>()
            .ok()
            .map(Some)
            .context(ParsingJsonNumberSnafu { field }),
        _ => None.context(ParsingJsonNumberSnafu { field }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_when_rules_are_missing() {
        let config: StoryConfig = serde_json::from_str(
            r#"{
                "outputSettings": {"storyName": "test"},
                "dataSources": {
                    "namesFile": "names.csv",
                    "candidatesFile": "candidates.json",
                    "ranksFile": "ranks.csv",
                    "resultsFile": "results.csv",
                    "statesFile": "states.json"
                }
            }"#,
        )
        .unwrap();
        assert_eq!(config.output_settings.output_path, None);
        let rules = validate_rules(&config.rules).unwrap();
        assert_eq!(rules, StoryRules::DEFAULT_RULES);
        assert_eq!(config.rules.random_seed().unwrap(), None);
    }

    #[test]
    fn numbers_as_strings() {
        let settings: RuleSettings = serde_json::from_str(
            r#"{"electionYear": "2012", "randomSeed": 42, "longTailThreshold": 2}"#,
        )
        .unwrap();
        let rules = validate_rules(&settings).unwrap();
        assert_eq!(rules.election_year, 2012);
        assert_eq!(rules.buckets.long_tail_threshold, 2);
        assert_eq!(rules.buckets.other_adjustment, 2);
        assert_eq!(settings.random_seed().unwrap(), Some(42));
    }

    #[test]
    fn bad_rules() {
        let settings: RuleSettings = serde_json::from_str(r#"{"electionYear": "last"}"#).unwrap();
        assert!(matches!(
            validate_rules(&settings),
            Err(StoryError::ParsingJsonNumber { .. })
        ));
        let settings: RuleSettings = serde_json::from_str(r#"{"canvasWidth": 0}"#).unwrap();
        assert!(matches!(
            validate_rules(&settings),
            Err(StoryError::Whatever { .. })
        ));
    }
}
