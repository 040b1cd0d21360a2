use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(about = "Country Info - look up countries from the Country Info API")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Print the raw record as JSON instead of a card
    #[arg(long, global = true)]
    pub json: bool,

    /// Log every HTTP exchange, bodies included, to stderr
    #[arg(short, long, global = true, env = "COUNTRYINFO_VERBOSE")]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Look a country up by name
    Search {
        /// Country name (multiple words are joined with spaces)
        #[arg(required = true)]
        name: Vec<String>,
    },
    /// Show a random country
    Random,
    /// Show the API endpoint this build talks to
    Endpoint,
}

impl Command {
    pub fn search_name(words: &[String]) -> String {
        words.join(" ")
    }
}
