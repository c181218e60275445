mod helpers;

use helpers::*;

#[test]
fn split_counts_every_room() {
    let scratch = Scratch::new();
    let input = scratch.write("all.txt", &joined(&ALL_FIXTURES));
    let res = run_cli(&["split", "--input", input.to_str().unwrap()]);
    assert_eq!(res.code, 0, "stderr: {}", res.stderr);
    assert!(res.stdout.starts_with("Split: 6 hand(s), 0 skipped"));
    for site in ["PokerStars", "GGPoker", "PartyPoker", "Ignition", "888poker"] {
        assert!(res.stdout.contains(site), "missing {}", site);
    }
    assert!(res.stderr.is_empty());
}

#[test]
fn split_warns_about_truncated_tail() {
    let scratch = Scratch::new();
    let truncated: String = POKERSTARS_TOURNAMENT.lines().take(8).collect::<Vec<_>>().join("\n");
    let text = format!("{}\n\n{}\n", POKERSTARS_SIDE_POTS.trim(), truncated);
    let input = scratch.write("cut.txt", &text);
    let res = run_cli(&["split", "--input", input.to_str().unwrap()]);
    assert_eq!(res.code, 0);
    assert!(res.stdout.starts_with("Split: 1 hand(s), 1 skipped"));
    assert!(res.stderr.contains("WARNING: "));
    assert!(res.stderr.contains("no result section"));
}

#[test]
fn split_rejects_text_without_hands() {
    let scratch = Scratch::new();
    let input = scratch.write("notes.txt", "just some notes\nnothing to see\n");
    let res = run_cli(&["split", "--input", input.to_str().unwrap()]);
    assert_eq!(res.code, 2);
    assert!(res.stderr.contains("VALIDATION_INVALID_FORMAT"));
}

#[test]
fn split_reads_zstd_archives() {
    let scratch = Scratch::new();
    let input = scratch.write_zst("hands.txt.zst", &joined(&[GGPOKER_CASH, IGNITION_CASH]));
    let res = run_cli(&["split", "--input", input.to_str().unwrap()]);
    assert_eq!(res.code, 0, "stderr: {}", res.stderr);
    assert!(res.stdout.starts_with("Split: 2 hand(s)"));
}

#[test]
fn parse_prints_a_summary_per_hand() {
    let scratch = Scratch::new();
    let input = scratch.write("t.txt", POKERSTARS_TOURNAMENT);
    let res = run_cli(&["parse", "--input", input.to_str().unwrap()]);
    assert_eq!(res.code, 0, "stderr: {}", res.stderr);
    assert!(res.stdout.contains("Hand #231081011721 (PokerStars tournament)"));
    assert!(res.stdout.contains("Blinds: 100/200"));
    assert!(res.stdout.contains("Seat 3: Hero 5000 (hero)"));
    assert!(res.stdout.contains("Pot: 6100 (rake 0)"));
    assert!(res.stdout.contains("Hero wins 6100"));
}

#[test]
fn parse_shows_cash_amounts_in_currency_units() {
    let scratch = Scratch::new();
    let input = scratch.write("s.txt", POKERSTARS_SIDE_POTS);
    let res = run_cli(&["parse", "--input", input.to_str().unwrap()]);
    assert_eq!(res.code, 0, "stderr: {}", res.stderr);
    assert!(res.stdout.contains("(PokerStars cash)"));
    assert!(res.stdout.contains("Blinds: 0.50/1.00"));
    assert!(res.stdout.contains("ShortStack wins 59.18"));
}

#[test]
fn parse_json_round_trips_through_the_model() {
    let scratch = Scratch::new();
    let input = scratch.write("all.txt", &joined(&ALL_FIXTURES));
    let res = run_cli(&["parse", "--input", input.to_str().unwrap(), "--json"]);
    assert_eq!(res.code, 0, "stderr: {}", res.stderr);
    let hands: Vec<handscope_engine::model::HandHistory> =
        serde_json::from_str(&res.stdout).expect("valid hand json");
    assert_eq!(hands.len(), 6);
    assert_eq!(hands[0].id, "231081011721");
    assert_eq!(hands[4].table_name.as_deref(), Some("21563048"));
}

#[test]
fn parse_reports_line_warnings_on_stderr() {
    let scratch = Scratch::new();
    let input = scratch.write("w.txt", WITH_WARNINGS);
    let res = run_cli(&["parse", "--input", input.to_str().unwrap()]);
    assert_eq!(res.code, 0);
    assert!(res.stderr.contains("WARNING: hand 1 line 8: [PARSE_MALFORMED_ACTION]"));
    assert!(res.stderr.contains("WARNING: hand 1 line 9: [PARSE_MISSING_PLAYER]"));
}
