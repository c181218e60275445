use handscope_engine::errors::{Diagnostic, HandError, ValidationError};
use handscope_engine::parser::{parse_hand, parse_single};
use handscope_engine::splitter::{split_hands, SplitWarning};

const FIXTURES: [&str; 6] = [
    include_str!("fixtures/pokerstars_tournament.txt"),
    include_str!("fixtures/pokerstars_side_pots.txt"),
    include_str!("fixtures/ggpoker_cash.txt"),
    include_str!("fixtures/partypoker_tournament.txt"),
    include_str!("fixtures/ignition_cash.txt"),
    include_str!("fixtures/pacific_cash.txt"),
];

#[test]
fn concatenated_hands_split_back_apart() {
    let blob = FIXTURES.join("\n\n\n");
    let split = split_hands(&blob).unwrap();
    assert!(split.warnings.is_empty(), "{:?}", split.warnings);
    assert_eq!(split.hands.len(), FIXTURES.len());
    for (piece, original) in split.hands.iter().zip(FIXTURES) {
        assert_eq!(parse_hand(piece).unwrap(), parse_hand(original).unwrap());
    }
}

#[test]
fn hands_without_blank_separators_still_split() {
    let blob = format!("{}{}", FIXTURES[2], FIXTURES[4]);
    let split = split_hands(&blob).unwrap();
    assert_eq!(split.hands.len(), 2);
    assert!(split.hands[1].starts_with("Ignition Hand #4412345678"));
}

#[test]
fn pacific_double_header_stays_one_hand() {
    let blob = [FIXTURES[5]; 3].join("\n");
    let split = split_hands(&blob).unwrap();
    assert_eq!(split.hands.len(), 3);
    let original = parse_hand(FIXTURES[5]).unwrap();
    for piece in &split.hands {
        assert!(piece.starts_with("#Game No"));
        assert_eq!(parse_hand(piece).unwrap(), original);
    }
}

#[test]
fn repeated_hand_splits_into_equal_copies() {
    let blob = [FIXTURES[0]; 4].join("\n\n");
    let split = split_hands(&blob).unwrap();
    assert!(split.warnings.is_empty(), "{:?}", split.warnings);
    assert_eq!(split.hands.len(), 4);
    let original = parse_hand(FIXTURES[0]).unwrap();
    for piece in &split.hands {
        assert_eq!(parse_hand(piece).unwrap(), original);
    }
}

#[test]
fn header_only_fragment_is_not_merged_into_the_next_hand() {
    let header = FIXTURES[1].lines().next().unwrap();
    let blob = format!("{}\n\n{}", header, FIXTURES[0]);
    let split = split_hands(&blob).unwrap();
    assert_eq!(split.hands.len(), 1);
    assert_eq!(
        parse_hand(split.hands[0]).unwrap(),
        parse_hand(FIXTURES[0]).unwrap()
    );
    assert!(matches!(
        split.warnings[..],
        [SplitWarning::Incomplete { line: 1, reason: "no seat list", .. }]
    ));
}

#[test]
fn truncated_hand_is_reported_and_skipped() {
    let truncated: String = FIXTURES[0].lines().take(6).collect::<Vec<_>>().join("\n");
    let blob = format!("{}\n\n{}", truncated, FIXTURES[3]);
    let split = split_hands(&blob).unwrap();
    assert_eq!(split.hands.len(), 1);
    assert_eq!(split.warnings.len(), 1);
    assert!(matches!(
        split.warnings[0],
        SplitWarning::Incomplete { line: 1, reason: "no result section", .. }
    ));
}

#[test]
fn single_hand_entry_point_rejects_many() {
    let blob = format!("{}\n\n{}", FIXTURES[0], FIXTURES[1]);
    let err = parse_single(&blob).unwrap_err();
    assert_eq!(
        err,
        HandError::Validation(ValidationError::MultipleHands { found: 2 })
    );
    assert_eq!(err.code(), "VALIDATION_MULTIPLE_HANDS");
    assert!(parse_single(FIXTURES[0]).is_ok());
}

#[test]
fn empty_input_is_a_validation_error() {
    assert_eq!(
        parse_single("\n   \n").unwrap_err(),
        HandError::Validation(ValidationError::EmptyInput)
    );
}
