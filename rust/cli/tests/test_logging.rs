use handscope_cli::logging::init_test_logging;
use tracing::Level;

const MALFORMED: &str = "PokerStars Hand #1: Hold'em No Limit (1/2) - 2021/01/01 10:00:00 ET\n\
Table 'T' 6-max Seat #1 is the button\n\
Seat 1: A (100 in chips)\n\
Seat 2: B (100 in chips)\n\
A: posts small blind 1\n\
B: posts big blind 2\n\
*** HOLE CARDS ***\n\
A: juggles\n\
A: folds\n\
B collected 3 from pot\n";

#[test]
fn skipped_lines_are_logged_as_warnings() {
    let logs = init_test_logging();
    let parsed = handscope_engine::parser::parse_hand(MALFORMED).unwrap();
    assert_eq!(parsed.warnings.len(), 1);

    let warnings: Vec<_> = logs
        .entries()
        .into_iter()
        .filter(|e| e.level == Level::WARN)
        .collect();
    assert_eq!(warnings.len(), 1, "{:?}", warnings);
    assert!(warnings[0].message.contains("skipped hand history line"));
    assert_eq!(warnings[0].field("site"), Some("PokerStars"));
    assert!(warnings[0].target.starts_with("handscope_engine"));
}
