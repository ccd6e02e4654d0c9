use anyhow::Result;

use foosball_scoreboard::cli::Command;
use foosball_scoreboard::{
    handle_completions, handle_init_db, handle_record, handle_serve, handle_stats, handle_trend,
    interpret,
};

fn main() {
    setup_logging();
    parse_and_execute().unwrap_or_else(|e| {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    });
}

fn setup_logging() {
    sensible_env_logger::init!();
}

fn parse_and_execute() -> Result<()> {
    let command = interpret();
    execute_command(&command)
}

fn execute_command(command: &Command) -> Result<()> {
    match command {
        Command::Serve { port } => handle_serve(*port),
        Command::Record { player, undo } => handle_record(*player, *undo),
        Command::Stats { days } => handle_stats(*days),
        Command::Trend => handle_trend(),
        Command::InitDb => handle_init_db(),
        Command::Completions { shell } => handle_completions(*shell),
    }
}
