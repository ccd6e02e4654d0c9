use clap::{Parser, Subcommand};
use clap_complete::Shell;

use crate::domain::Player;

#[derive(Parser, Debug)]
#[command(author, version, about = "foosball scoreboard")]
pub struct Cli {
    /// Command
    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
#[clap(rename_all = "kebab-case")]
pub enum Command {
    /// Start the HTTP API server
    Serve {
        /// Port number (optional, defaults to 3000)
        #[arg(short, long, default_value_t = 3000)]
        port: u16,
    },
    /// Record a win (or undo one) for a player
    Record {
        /// Player: "a" or "b"
        player: Player,
        /// Record an undo (-1) instead of a win
        #[arg(short, long)]
        undo: bool,
    },
    /// Print totals, the daily breakdown and recent games
    Stats {
        /// Trailing window in days (defaults to HISTORY_DAYS or 30)
        #[arg(short, long)]
        days: Option<i64>,
    },
    /// Print the cumulative score after every event
    Trend,
    /// Drop all recorded events and recreate the schema
    InitDb,
    /// Generate shell completions on stdout
    Completions {
        shell: Shell,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_record_undo() {
        let cli = Cli::try_parse_from(["foosball_scoreboard", "record", "b", "--undo"]).unwrap();
        assert_eq!(cli.command, Command::Record { player: Player::B, undo: true });
    }

    #[test]
    fn test_parse_rejects_unknown_player() {
        assert!(Cli::try_parse_from(["foosball_scoreboard", "record", "c"]).is_err());
    }

    #[test]
    fn test_serve_default_port() {
        let cli = Cli::try_parse_from(["foosball_scoreboard", "serve"]).unwrap();
        assert_eq!(cli.command, Command::Serve { port: 3000 });
    }
}
