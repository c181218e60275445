//! Shared plumbing for the CLI integration tests: run the library entry
//! point with captured streams and stage fixtures on disk.

#![allow(dead_code)]

use std::path::PathBuf;

use tempfile::TempDir;

pub const POKERSTARS_TOURNAMENT: &str =
    include_str!("../../../engine/tests/fixtures/pokerstars_tournament.txt");
pub const POKERSTARS_SIDE_POTS: &str =
    include_str!("../../../engine/tests/fixtures/pokerstars_side_pots.txt");
pub const GGPOKER_CASH: &str = include_str!("../../../engine/tests/fixtures/ggpoker_cash.txt");
pub const PARTYPOKER_TOURNAMENT: &str =
    include_str!("../../../engine/tests/fixtures/partypoker_tournament.txt");
pub const IGNITION_CASH: &str = include_str!("../../../engine/tests/fixtures/ignition_cash.txt");
pub const PACIFIC_CASH: &str = include_str!("../../../engine/tests/fixtures/pacific_cash.txt");

pub const ALL_FIXTURES: [&str; 6] = [
    POKERSTARS_TOURNAMENT,
    POKERSTARS_SIDE_POTS,
    GGPOKER_CASH,
    PARTYPOKER_TOURNAMENT,
    IGNITION_CASH,
    PACIFIC_CASH,
];

/// A hand whose summary claims a pot of 9 while only 4 chips went in.
pub const WRONG_TOTAL: &str = "PokerStars Hand #7: Hold'em No Limit (1/2) - 2021/01/01 10:00:00 ET\n\
Table 'T' 6-max Seat #1 is the button\n\
Seat 1: A (100 in chips)\n\
Seat 2: B (100 in chips)\n\
A: posts small blind 1\n\
B: posts big blind 2\n\
*** HOLE CARDS ***\n\
A: raises 4 to 6\n\
B: folds\n\
Uncalled bet (4) returned to A\n\
A collected 4 from pot\n\
*** SUMMARY ***\n\
Total pot 9 | Rake 0\n";

/// A hand that replays cleanly but has two unreadable lines.
pub const WITH_WARNINGS: &str = "PokerStars Hand #1: Hold'em No Limit (1/2) - 2021/01/01 10:00:00 ET\n\
Table 'T' 6-max Seat #1 is the button\n\
Seat 1: A (100 in chips)\n\
Seat 2: B (100 in chips)\n\
A: posts small blind 1\n\
B: posts big blind 2\n\
*** HOLE CARDS ***\n\
A: juggles\n\
Ghost: calls 2\n\
A: folds\n\
B collected 3 from pot\n";

#[derive(Debug)]
pub struct CliOutput {
    pub code: i32,
    pub stdout: String,
    pub stderr: String,
}

pub fn run_cli(args: &[&str]) -> CliOutput {
    let mut out = Vec::new();
    let mut err = Vec::new();
    let argv = std::iter::once("handscope").chain(args.iter().copied());
    let code = handscope_cli::run(argv, &mut out, &mut err);
    CliOutput {
        code,
        stdout: String::from_utf8(out).expect("utf8 stdout"),
        stderr: String::from_utf8(err).expect("utf8 stderr"),
    }
}

/// Joins hands the way rooms write them to one file.
pub fn joined(hands: &[&str]) -> String {
    hands
        .iter()
        .map(|h| h.trim())
        .collect::<Vec<_>>()
        .join("\n\n\n")
}

pub struct Scratch {
    dir: TempDir,
}

impl Scratch {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("temp dir"),
        }
    }

    pub fn write(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        std::fs::write(&path, contents).expect("write fixture");
        path
    }

    pub fn write_zst(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        let packed = zstd::bulk::compress(contents.as_bytes(), 3).expect("compress");
        std::fs::write(&path, packed).expect("write fixture");
        path
    }

    pub fn path(&self, name: &str) -> String {
        self.dir.path().join(name).to_string_lossy().into_owned()
    }
}
