use clap::Parser;

/// Prepares the data of the 2020 primary candidates story.
#[derive(Parser, Debug, Clone)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// (file path) The JSON configuration of the story. It lists the input files and the rules.
    /// For more information about the file format, read the manual of the candidate_story crate.
    #[clap(short, long, value_parser)]
    pub config: String,

    /// (file path) A reference summary in JSON format. If provided, storyprep will check that
    /// the computed summary matches the reference and print the differences otherwise.
    #[clap(short, long, value_parser)]
    pub reference: Option<String>,

    /// (file path, 'stdout' or empty) If specified, the summary of the story will be written in
    /// JSON format to the given location. Setting this option overrides the path that may be
    /// specified in the configuration.
    #[clap(short, long, value_parser)]
    pub out: Option<String>,

    /// (integer) The seed used to place the markers on the map. Setting this option overrides
    /// the seed that may be specified in the configuration.
    #[clap(long, value_parser)]
    pub seed: Option<u64>,

    // Other arguments
    /// If passed as an argument, will turn on verbose logging to the standard error.
    #[clap(long, takes_value = false)]
    pub verbose: bool,
}
