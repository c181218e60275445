//! Command-line grammar, kept apart from dispatch so tests can parse
//! arguments without running anything.

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "handscope",
    version,
    about = "Parse, replay and verify online poker hand histories"
)]
pub struct HandscopeCli {
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum Commands {
    /// Find hand boundaries in an export and report what was skipped
    Split {
        /// Hand history file, `.zst` archive, or `-` for stdin
        #[arg(long)]
        input: String,
    },
    /// Parse every hand and print a summary per hand
    Parse {
        #[arg(long)]
        input: String,
        /// Print the normalised hands as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print the table state after every action
    Replay {
        #[arg(long)]
        input: String,
        /// 1-based hand number within the input
        #[arg(long)]
        hand: Option<usize>,
        #[arg(long)]
        json: bool,
    },
    /// Parse and replay every hand, reporting each failure with its code
    Verify {
        #[arg(long)]
        input: String,
    },
    /// Monte Carlo equity of one holding against another
    Equity {
        /// Hero hole cards, e.g. AhKs
        #[arg(long)]
        hero: String,
        #[arg(long)]
        villain: String,
        /// 0, 3, 4 or 5 board cards
        #[arg(long, default_value = "")]
        board: String,
        #[arg(long)]
        iterations: Option<usize>,
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long)]
        json: bool,
    },
    /// Show the resolved configuration and where each value came from
    Cfg,
}

impl Commands {
    pub const NAMES: [&'static str; 6] = ["split", "parse", "replay", "verify", "equity", "cfg"];

    pub fn name(&self) -> &'static str {
        match self {
            Commands::Split { .. } => "split",
            Commands::Parse { .. } => "parse",
            Commands::Replay { .. } => "replay",
            Commands::Verify { .. } => "verify",
            Commands::Equity { .. } => "equity",
            Commands::Cfg => "cfg",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replay_takes_an_optional_hand_number() {
        let cli =
            HandscopeCli::try_parse_from(["handscope", "replay", "--input", "h.txt", "--hand", "3"])
                .unwrap();
        assert_eq!(
            cli.cmd,
            Commands::Replay {
                input: "h.txt".into(),
                hand: Some(3),
                json: false
            }
        );
    }

    #[test]
    fn equity_board_defaults_to_preflop() {
        let cli = HandscopeCli::try_parse_from([
            "handscope",
            "equity",
            "--hero",
            "AhKs",
            "--villain",
            "QdQc",
        ])
        .unwrap();
        match cli.cmd {
            Commands::Equity {
                board, iterations, ..
            } => {
                assert_eq!(board, "");
                assert_eq!(iterations, None);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn input_is_required() {
        assert!(HandscopeCli::try_parse_from(["handscope", "verify"]).is_err());
    }

    #[test]
    fn names_cover_every_command() {
        let cfg = HandscopeCli::try_parse_from(["handscope", "cfg"]).unwrap();
        assert!(Commands::NAMES.contains(&cfg.cmd.name()));
    }
}
