use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "berdybot")]
#[command(author, version, about = "Telegram bot for weather, exchange rates and crypto prices", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Run the bot (default)
    Run {
        /// Use webhook mode instead of long polling
        #[arg(long)]
        webhook: bool,
    },

    /// Fetch the upstream data once, print it and exit
    Snapshot {
        /// Place slug for the weather report (defaults to WEATHER_PLACE)
        #[arg(short, long)]
        place: Option<String>,
    },
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
