//! CLI for freqstat — reset-relative CPU frequency-residency tables.

mod commands;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "freqstat")]
#[command(about = "freqstat — reset-relative CPU frequency residency from time-in-state counters")]
#[command(version = freqstat_core::VERSION)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Paths shared by every subcommand.
#[derive(Args)]
struct PathArgs {
    /// Time-in-state counter file to read
    #[arg(long, default_value = freqstat_core::TIME_IN_STATE_PATH)]
    file: String,

    /// Where the reset baseline is persisted
    #[arg(long, default_value = "cpu_state_offsets.json")]
    offsets: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Print one corrected residency table and exit
    Show {
        #[command(flatten)]
        paths: PathArgs,

        /// Emit the snapshot as JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Poll on a fixed interval and reprint the table until Ctrl+C
    Watch {
        #[command(flatten)]
        paths: PathArgs,

        /// Seconds between polls
        #[arg(long, default_value_t = 20)]
        interval: u64,
    },

    /// Capture the current counters as the new baseline
    Reset {
        #[command(flatten)]
        paths: PathArgs,
    },
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Show { paths, json } => commands::show::run(&paths.file, &paths.offsets, json),
        Commands::Watch { paths, interval } => {
            commands::watch::run(&paths.file, &paths.offsets, interval);
        }
        Commands::Reset { paths } => commands::reset::run(&paths.file, &paths.offsets),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn watch_interval_defaults_to_20s() {
        let cli = Cli::parse_from(["freqstat", "watch"]);
        match cli.command {
            Commands::Watch { interval, .. } => assert_eq!(interval, 20),
            _ => panic!("expected watch"),
        }
    }
}
