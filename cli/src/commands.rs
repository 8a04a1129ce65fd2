pub mod select;
pub mod sweep;

use clap::{ArgAction, Parser};

#[derive(Parser)]
#[command(name = "pingsweep")]
#[command(about = "Find the hosts that answer ping on a local IPv4 subnet.")]
pub struct CommandLine {
    /// Print diagnostics to stderr (-v for progress, -vv for every failed probe)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
