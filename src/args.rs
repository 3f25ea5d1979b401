use clap::Parser;

/// An interactive voting program: register candidates, cast votes and show the results.
#[derive(Parser, Debug, Clone)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// (file path, optional) A JSON file with the limits of the election and the candidates to
    /// register before starting. See the manual for the format.
    #[clap(short, long, value_parser)]
    pub config: Option<String>,

    /// (default 10) The maximum number of candidates. Overrides the value of the --config file.
    #[clap(long, value_parser)]
    pub capacity: Option<usize>,

    /// (default 63) Candidate names longer than this are truncated. Overrides the value of the
    /// --config file.
    #[clap(long, value_parser)]
    pub max_name_length: Option<usize>,

    /// (repeatable) Registers a candidate before the menu starts, after the candidates of the
    /// --config file.
    #[clap(long, value_parser)]
    pub candidates: Option<Vec<String>>,

    /// If passed as an argument, the results are printed in JSON format.
    #[clap(long, takes_value = false)]
    pub json: bool,

    // Other arguments
    /// If passed as an argument, will turn on verbose logging to the standard error.
    #[clap(long, takes_value = false)]
    pub verbose: bool,
}
