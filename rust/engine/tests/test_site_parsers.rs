use handscope_engine::amount::MoneyUnit;
use handscope_engine::cards::{format_cards, parse_cards};
use handscope_engine::errors::{Diagnostic, ParseError};
use handscope_engine::model::{ActionKind, LimitKind, Site, Street};
use handscope_engine::parser::{parse_hand, SiteGrammar};

const STARS_MTT: &str = include_str!("fixtures/pokerstars_tournament.txt");
const STARS_SIDE: &str = include_str!("fixtures/pokerstars_side_pots.txt");
const GG: &str = include_str!("fixtures/ggpoker_cash.txt");
const PARTY: &str = include_str!("fixtures/partypoker_tournament.txt");
const IGNITION: &str = include_str!("fixtures/ignition_cash.txt");
const PACIFIC: &str = include_str!("fixtures/pacific_cash.txt");

#[test]
fn every_fixture_is_sniffed_to_its_room() {
    let cases = [
        (STARS_MTT, Site::PokerStars),
        (STARS_SIDE, Site::PokerStars),
        (GG, Site::GgPoker),
        (PARTY, Site::PartyPoker),
        (IGNITION, Site::Ignition),
        (PACIFIC, Site::Pacific888),
    ];
    for (text, site) in cases {
        assert_eq!(SiteGrammar::sniff(text).map(SiteGrammar::site), Some(site));
        let parsed = parse_hand(text).unwrap();
        assert!(parsed.warnings.is_empty(), "{}: {:?}", site, parsed.warnings);
        assert_eq!(parsed.value.site, site);
    }
}

#[test]
fn pokerstars_tournament_header_and_seats() {
    let hand = parse_hand(STARS_MTT).unwrap().value;
    assert_eq!(hand.id, "231081011721");
    assert!(hand.context.is_tournament);
    assert!(!hand.context.conversion_needed);
    let t = hand.tournament.as_ref().unwrap();
    assert_eq!(t.id, "3145926535");
    assert_eq!(t.level.as_deref(), Some("III"));
    assert_eq!(t.buy_in.as_deref(), Some("$1.40+$0.10 USD"));
    assert_eq!((hand.stakes.small_blind, hand.stakes.big_blind), (100, 200));
    assert_eq!(hand.table_name.as_deref(), Some("3145926535 1"));
    assert_eq!(hand.max_seats, Some(9));
    assert_eq!(hand.button_seat, Some(1));
    assert_eq!(hand.limit, LimitKind::NoLimit);
    assert_eq!(
        hand.timestamp.map(|t| t.to_string()).as_deref(),
        Some("2021-03-14 20:15:32")
    );

    let positions: Vec<_> = hand
        .players
        .iter()
        .map(|p| (p.name.as_str(), p.position.as_deref()))
        .collect();
    assert_eq!(
        positions,
        [
            ("Villain", Some("BTN")),
            ("SmallFish", Some("SB")),
            ("Hero", Some("BB"))
        ]
    );
    let hero = hand.hero().unwrap();
    assert_eq!(hero.name, "Hero");
    assert_eq!(format_cards(hero.hole_cards.as_deref().unwrap()), "AhKh");
}

#[test]
fn pokerstars_streets_and_summary() {
    let hand = parse_hand(STARS_MTT).unwrap().value;
    assert_eq!(hand.blinds.len(), 2);
    assert!(hand.antes.is_empty());
    assert_eq!(format_cards(&hand.board()), "2h7hTcJdQh");
    assert_eq!(format_cards(&hand.board_at(Street::Turn)), "2h7hTcJd");

    let preflop = hand.actions_on(Street::Preflop);
    assert_eq!(preflop.len(), 3);
    assert_eq!(preflop[0].kind, ActionKind::Raise);
    assert_eq!(preflop[0].amount, Some(400));
    assert_eq!(preflop[0].raise_to, Some(600));

    assert_eq!(hand.total_pot(), Some(6100));
    assert_eq!(hand.rake(), 0);
    assert_eq!(hand.winners(), ["Hero"]);
    let summary = hand.summary.as_ref().unwrap();
    assert_eq!(format_cards(&summary.shown["Villain"]), "9s9d");
}

#[test]
fn pokerstars_cash_side_pots_and_all_ins() {
    let hand = parse_hand(STARS_SIDE).unwrap().value;
    assert_eq!(hand.context.currency.as_deref(), Some("USD"));
    assert_eq!(hand.context.unit(), MoneyUnit::Cents);
    assert_eq!((hand.stakes.small_blind, hand.stakes.big_blind), (50, 100));

    let shove = &hand.actions_on(Street::Preflop)[1];
    assert_eq!(shove.player, "ShortStack");
    assert!(shove.all_in);
    assert_eq!(shove.raise_to, Some(2_000));

    let flop = hand.actions_on(Street::Flop);
    let returned = flop.last().unwrap();
    assert_eq!(returned.kind, ActionKind::UncalledReturn);
    assert_eq!(returned.player, "BigStack");
    assert_eq!(returned.amount, Some(5_000));

    let summary = hand.summary.as_ref().unwrap();
    assert_eq!(summary.total_pot, Some(22_000));
    assert_eq!(summary.rake, Some(300));
    assert_eq!(summary.side_pots, [5_918, 15_782]);
    assert_eq!(summary.winnings["ShortStack"], 5_918);
    assert_eq!(summary.winnings["Hero"], 15_782);
}

#[test]
fn ggpoker_house_cuts_sum_into_rake() {
    let hand = parse_hand(GG).unwrap().value;
    assert_eq!(hand.id, "HD1234567");
    assert_eq!((hand.stakes.small_blind, hand.stakes.big_blind), (2, 5));
    assert_eq!(hand.rake(), 5);
    assert_eq!(hand.total_pot(), Some(72));
    assert_eq!(hand.hero().map(|p| p.name.as_str()), Some("Hero"));
    // Other players' deal lines carry no cards.
    assert!(hand.player("a81b2c").unwrap().hole_cards.is_none());
}

#[test]
fn partypoker_tournament_with_antes() {
    let hand = parse_hand(PARTY).unwrap().value;
    assert_eq!(hand.id, "22446688");
    assert!(hand.context.is_tournament);
    assert_eq!(hand.tournament.as_ref().map(|t| t.id.as_str()), Some("4455"));
    assert_eq!(hand.stakes.ante, Some(10));
    assert_eq!(hand.antes.len(), 4);
    assert_eq!(hand.max_seats, Some(6));
    assert_eq!(hand.table_name.as_deref(), Some("Sunday Special"));
    assert_eq!(hand.player("Hero").unwrap().stack, 4_100);
    assert_eq!(
        hand.timestamp.map(|t| t.to_string()).as_deref(),
        Some("2023-03-06 19:45:12")
    );

    let preflop = hand.actions_on(Street::Preflop);
    let shove = preflop.iter().find(|a| a.player == "Delta").unwrap();
    assert_eq!(shove.kind, ActionKind::AllIn);
    assert_eq!(shove.amount, Some(790));
    assert_eq!(format_cards(&hand.board()), "5c9dJh2s6h");
    assert_eq!(hand.summary.as_ref().unwrap().winnings["Hero"], 1_920);
    assert_eq!(
        hand.player("Delta").unwrap().hole_cards,
        Some(parse_cards("Ah Qs").unwrap())
    );
}

#[test]
fn ignition_anonymous_seats_and_hero_marker() {
    let hand = parse_hand(IGNITION).unwrap().value;
    assert_eq!(hand.id, "4412345678");
    assert_eq!(hand.table_name.as_deref(), Some("21563048"));
    assert_eq!(hand.button_seat, Some(4));
    assert_eq!(hand.context.currency.as_deref(), Some("USD"));
    assert_eq!((hand.stakes.small_blind, hand.stakes.big_blind), (10, 25));

    let hero = hand.hero().unwrap();
    assert_eq!(hero.name, "Big Blind");
    assert_eq!(hero.stack, 2_530);
    assert_eq!(format_cards(hero.hole_cards.as_deref().unwrap()), "AhAd");

    let jam = hand
        .actions_on(Street::Preflop)
        .iter()
        .find(|a| a.kind == ActionKind::AllIn)
        .unwrap();
    assert_eq!(jam.raise_to, Some(2_530));
    assert_eq!(hand.total_pot(), Some(160));
}

#[test]
fn pacific_double_header_and_bracketed_amounts() {
    let hand = parse_hand(PACIFIC).unwrap().value;
    assert_eq!(hand.id, "778899001");
    assert_eq!(hand.table_name.as_deref(), Some("Athens"));
    assert_eq!(hand.max_seats, Some(6));
    assert_eq!((hand.stakes.small_blind, hand.stakes.big_blind), (5, 10));
    assert_eq!(hand.player("Hero").unwrap().stack, 1_240);
    let flop = hand.actions_on(Street::Flop);
    assert_eq!(flop[2].kind, ActionKind::Raise);
    assert_eq!(flop[2].amount, Some(135));
    assert_eq!(flop[2].raise_to, None);
    assert_eq!(
        hand.summary.as_ref().unwrap().shown["NitKing"],
        parse_cards("Ks Qd").unwrap()
    );
}

#[test]
fn unknown_text_is_unknown_site() {
    let err = parse_hand("Welcome to the table\nSeat 1: A (100)").unwrap_err();
    assert_eq!(err, ParseError::UnknownSite);
    assert_eq!(err.code(), "PARSE_UNKNOWN_SITE");
}

#[test]
fn missing_seats_is_fatal() {
    let text = "PokerStars Hand #1: Hold'em No Limit (1/2) - 2021/01/01 10:00:00 ET\n\
                Table 'T' 6-max Seat #1 is the button\n";
    assert_eq!(parse_hand(text).unwrap_err(), ParseError::MissingSeats);
}

#[test]
fn hand_without_blinds_or_antes_is_rejected() {
    let text = "PokerStars Hand #1: Hold'em No Limit (1/2) - 2021/01/01 10:00:00 ET\n\
                Table 'T' 6-max Seat #1 is the button\n\
                Seat 1: A (100 in chips)\n\
                Seat 2: B (100 in chips)\n\
                *** HOLE CARDS ***\n\
                A: folds\n";
    assert_eq!(parse_hand(text).unwrap_err(), ParseError::MissingBlinds);
}

#[test]
fn bad_lines_become_warnings_with_line_numbers() {
    let text = "PokerStars Hand #1: Hold'em No Limit (1/2) - 2021/01/01 10:00:00 ET\n\
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
    let parsed = parse_hand(text).unwrap();
    let codes: Vec<_> = parsed
        .warnings
        .iter()
        .map(|w| (w.line, w.error.code()))
        .collect();
    assert_eq!(
        codes,
        [(8, "PARSE_MALFORMED_ACTION"), (9, "PARSE_MISSING_PLAYER")]
    );
    assert!(parsed.warnings.iter().all(|w| w.error.is_recoverable()));
    assert_eq!(parsed.value.actions_on(Street::Preflop).len(), 1);
}

#[test]
fn non_ascii_card_is_a_warning_not_a_crash() {
    let text = "PokerStars Hand #1: Hold'em No Limit (1/2) - 2021/01/01 10:00:00 ET\n\
                Table 'T' 6-max Seat #1 is the button\n\
                Seat 1: A (100 in chips)\n\
                Seat 2: B (100 in chips)\n\
                A: posts small blind 1\n\
                B: posts big blind 2\n\
                *** HOLE CARDS ***\n\
                Dealt to A [Ah \u{e9}]\n\
                A: folds\n\
                B collected 3 from pot\n";
    let parsed = parse_hand(text).unwrap();
    let codes: Vec<_> = parsed
        .warnings
        .iter()
        .map(|w| (w.line, w.error.code()))
        .collect();
    assert_eq!(codes, [(8, "PARSE_INVALID_CARD")]);
    assert!(parsed.value.players.iter().all(|p| p.hole_cards.is_none()));
}
