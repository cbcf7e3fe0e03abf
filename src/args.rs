use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "fetch-page")]
#[command(about = "Fetch a URL or run a web search and render the result as text")]
#[command(version)]
pub struct Args {
    /// Make an HTTP request to URL and print the page text
    #[arg(short = 'u', long = "url", value_name = "URL")]
    pub url: Option<String>,

    /// Search terms; prints the top result links and prompts for a pick
    #[arg(short = 's', long = "search", value_name = "TERM", num_args = 1..)]
    pub search: Option<Vec<String>>,

    /// Load client settings from a JSON file
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Directory to persist fetched responses under
    #[arg(long, value_name = "DIR")]
    pub cache_dir: Option<String>,
}
