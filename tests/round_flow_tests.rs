//! Round scoring, the spy bonus, multi-round flow and match end.
//!
//! Each test rigs a near-finished round and drives it over the edge
//! through the public API, then checks the scoring and the shape of the
//! next round (or the ended match).

use billet_doux::{
    Card, CardId, CardKind, ChancellorChoice, Deck, EngineError, GameConfig, GameEngine,
    GameState, PlayRequest, PlayerId, DECK_SIZE,
};

fn card(id: u32, kind: CardKind) -> Card {
    Card::new(CardId::new(id), kind)
}

fn seat(i: u8) -> PlayerId {
    PlayerId::new(i)
}

/// Engine over a hand-built round: given hands, given deck laid out
/// bottom first, no hidden card.
fn rigged(hands: &[&[CardKind]], deck: &[CardKind]) -> GameEngine {
    let names = (0..hands.len()).map(|i| format!("P{i}"));
    let mut state = GameState::new(&GameConfig::new("rig").with_players(names));
    state.current_round = 1;

    let mut next_id = 0;
    for (i, hand) in hands.iter().enumerate() {
        for kind in *hand {
            state.players[seat(i as u8)].hand.push(card(next_id, *kind));
            next_id += 1;
        }
    }

    let deck_cards = deck
        .iter()
        .map(|kind| {
            let c = card(next_id, *kind);
            next_id += 1;
            c
        })
        .collect();
    state.deck = Deck::from_cards(deck_cards);

    GameEngine::from_state(state, 0)
}

#[test]
fn test_exhausting_the_deck_scores_the_highest_hand() {
    let mut engine = rigged(
        &[&[CardKind::Spy, CardKind::King], &[CardKind::Guard]],
        &[CardKind::Priest],
    );

    engine
        .play_card(seat(0), CardKind::Spy, PlayRequest::simple())
        .unwrap();
    engine.start_turn();
    engine
        .play_card(
            seat(1),
            CardKind::Guard,
            PlayRequest::guessing(seat(0), CardKind::Priest),
        )
        .unwrap();

    // the deck ran out with seat 0 holding King 7 over Priest 2; the
    // round point and the lone-spy bonus both land on seat 0
    let state = engine.state();
    assert_eq!(state.round_winners, vec![seat(0)]);
    assert_eq!(state.players[seat(0)].points, 2);
    assert_eq!(state.players[seat(1)].points, 0);
    assert_eq!(engine.scores()[&seat(0)], 2);

    // nobody is at the win target yet, so round 2 is already dealt
    assert!(!engine.is_ended());
    assert_eq!(state.current_round, 2);
    assert_eq!(engine.current_player_id(), seat(1));
    assert_eq!(state.deck.len(), DECK_SIZE - 3);
    assert_eq!(state.card_count(), DECK_SIZE);
}

#[test]
fn test_two_surviving_spies_cancel_the_bonus() {
    let mut engine = rigged(
        &[&[CardKind::Spy, CardKind::King], &[CardKind::Spy]],
        &[CardKind::Priest],
    );

    engine
        .play_card(seat(0), CardKind::Spy, PlayRequest::simple())
        .unwrap();
    engine.start_turn();
    engine
        .play_card(seat(1), CardKind::Spy, PlayRequest::simple())
        .unwrap();

    // both survivors played a Spy: no bonus, just the round point
    let state = engine.state();
    assert_eq!(state.round_winners, vec![seat(0)]);
    assert_eq!(state.players[seat(0)].points, 1);
    assert_eq!(state.players[seat(1)].points, 0);
}

#[test]
fn test_eliminated_spy_earns_no_bonus() {
    let mut engine = rigged(
        &[
            &[CardKind::Spy, CardKind::Guard],
            &[CardKind::Baron],
            &[CardKind::Handmaid],
        ],
        // drawn from the tail: Priest, Guard, Priest, Baron
        &[
            CardKind::Baron,
            CardKind::Priest,
            CardKind::Guard,
            CardKind::Priest,
        ],
    );

    // seat 0 plays the Spy, then gets knocked out by seat 1's Baron
    engine
        .play_card(seat(0), CardKind::Spy, PlayRequest::simple())
        .unwrap();
    engine.start_turn();
    engine
        .play_card(seat(1), CardKind::Baron, PlayRequest::targeted(seat(0)))
        .unwrap();
    assert!(engine.state().players[seat(0)].eliminated);

    // the survivors trade harmless plays until seat 2's Baron wins the
    // last duel of the round
    engine.start_turn();
    engine
        .play_card(
            seat(2),
            CardKind::Guard,
            PlayRequest::guessing(seat(1), CardKind::Princess),
        )
        .unwrap();
    engine.start_turn();
    engine
        .play_card(seat(1), CardKind::Priest, PlayRequest::targeted(seat(2)))
        .unwrap();
    engine.start_turn();
    engine
        .play_card(seat(2), CardKind::Baron, PlayRequest::targeted(seat(1)))
        .unwrap();

    // the round's only spy sits eliminated, so nobody takes the bonus
    let state = engine.state();
    assert_eq!(state.players[seat(0)].points, 0);
    assert_eq!(state.round_winners, vec![seat(2)]);
    assert_eq!(state.players[seat(2)].points, 1);
}

#[test]
fn test_last_player_standing_wins_the_round() {
    let mut engine = rigged(
        &[&[CardKind::Guard, CardKind::Spy], &[CardKind::Princess]],
        &[CardKind::Handmaid, CardKind::King],
    );

    engine
        .play_card(
            seat(0),
            CardKind::Guard,
            PlayRequest::guessing(seat(1), CardKind::Princess),
        )
        .unwrap();

    // seat 1 is out; the round settles immediately for seat 0
    let state = engine.state();
    assert_eq!(state.round_winners, vec![seat(0)]);
    assert_eq!(state.players[seat(0)].points, 1);
    assert_eq!(state.current_round, 2);
}

#[test]
fn test_new_round_resets_round_state_but_keeps_points() {
    let mut engine = rigged(
        &[&[CardKind::Guard, CardKind::Spy], &[CardKind::Princess]],
        &[CardKind::Handmaid, CardKind::King],
    );
    engine
        .play_card(
            seat(0),
            CardKind::Guard,
            PlayRequest::guessing(seat(1), CardKind::Princess),
        )
        .unwrap();

    let state = engine.state();
    assert_eq!(state.current_round, 2);
    // eliminations, discards and spy registrations do not carry over
    assert!(!state.players[seat(1)].eliminated);
    assert!(state.discard.is_empty());
    assert!(state.played_spies.is_empty());
    assert!(state.hidden_card.is_some());
    for (_, player) in state.players.iter() {
        assert_eq!(player.hand.len(), 1);
        assert!(!player.protected);
    }
    // points and the round-1 verdict do carry over
    assert_eq!(state.players[seat(0)].points, 1);
    assert_eq!(state.round_winners, vec![seat(0)]);
}

#[test]
fn test_next_round_starter_rotates() {
    let mut engine = rigged(
        &[&[CardKind::Guard, CardKind::Spy], &[CardKind::Princess]],
        &[CardKind::Handmaid, CardKind::King],
    );
    assert_eq!(engine.current_player_id(), seat(0));

    engine
        .play_card(
            seat(0),
            CardKind::Guard,
            PlayRequest::guessing(seat(1), CardKind::Princess),
        )
        .unwrap();

    // seat 0 opened round 1, so round 2 opens at seat 1
    assert_eq!(engine.state().current_round, 2);
    assert_eq!(engine.current_player_id(), seat(1));
}

#[test]
fn test_tied_high_cards_split_the_round() {
    let mut engine = rigged(
        &[&[CardKind::Priest, CardKind::Handmaid], &[CardKind::Priest]],
        &[CardKind::Guard],
    );

    engine
        .play_card(seat(0), CardKind::Handmaid, PlayRequest::simple())
        .unwrap();
    engine.start_turn();
    // seat 0 is protected, so the drawn Guard goes down without a target
    engine
        .play_card(seat(1), CardKind::Guard, PlayRequest::simple())
        .unwrap();

    // Priest against Priest: both seats take a point
    let state = engine.state();
    assert_eq!(state.round_winners, vec![seat(0), seat(1)]);
    assert_eq!(state.players[seat(0)].points, 1);
    assert_eq!(state.players[seat(1)].points, 1);
    assert_eq!(state.current_round, 2);
}

#[test]
fn test_shared_match_win() {
    let engine = rigged(
        &[&[CardKind::Priest, CardKind::Handmaid], &[CardKind::Priest]],
        &[CardKind::Guard],
    );
    let mut state = engine.snapshot();
    state.points_to_win = 1;
    let mut engine = GameEngine::from_state(state, 0);

    engine
        .play_card(seat(0), CardKind::Handmaid, PlayRequest::simple())
        .unwrap();
    engine.start_turn();
    engine
        .play_card(seat(1), CardKind::Guard, PlayRequest::simple())
        .unwrap();

    // the tied round puts both seats at the target together
    let state = engine.state();
    assert!(engine.is_ended());
    assert_eq!(state.game_winners, vec![seat(0), seat(1)]);
    // no further round is dealt
    assert_eq!(state.current_round, 1);
}

#[test]
fn test_spy_bonus_can_close_the_match() {
    let engine = rigged(
        &[&[CardKind::Spy, CardKind::King], &[CardKind::Guard]],
        &[CardKind::Priest],
    );
    let mut state = engine.snapshot();
    state.players[seat(0)].points = 1;
    let mut engine = GameEngine::from_state(state, 0);

    engine
        .play_card(seat(0), CardKind::Spy, PlayRequest::simple())
        .unwrap();
    engine.start_turn();
    engine
        .play_card(
            seat(1),
            CardKind::Guard,
            PlayRequest::guessing(seat(0), CardKind::Priest),
        )
        .unwrap();

    // 1 carried + 1 spy bonus + 1 round win reaches the default target
    let state = engine.state();
    assert!(engine.is_ended());
    assert_eq!(state.players[seat(0)].points, 3);
    assert_eq!(state.game_winners, vec![seat(0)]);
}

#[test]
fn test_ended_match_rejects_further_play() {
    let engine = rigged(
        &[&[CardKind::Guard, CardKind::Spy], &[CardKind::Princess]],
        &[CardKind::Handmaid, CardKind::King],
    );
    let mut state = engine.snapshot();
    state.points_to_win = 1;
    let mut engine = GameEngine::from_state(state, 0);

    engine
        .play_card(
            seat(0),
            CardKind::Guard,
            PlayRequest::guessing(seat(1), CardKind::Princess),
        )
        .unwrap();
    assert!(engine.is_ended());
    let frozen = engine.snapshot();

    assert_eq!(
        engine.play_card(seat(0), CardKind::Spy, PlayRequest::simple()),
        Err(EngineError::InvalidTurn(seat(0)))
    );
    engine.start_turn();

    // neither call moved anything
    assert_eq!(engine.snapshot(), frozen);
    assert_eq!(engine.state().game_winners, vec![seat(0)]);
}

#[test]
fn test_resumed_spent_deck_settles_on_turn_open() {
    let mut engine = rigged(&[&[CardKind::King], &[CardKind::Priest]], &[]);

    // a stored round can come back with nothing left to draw; opening
    // the next turn runs the scoring instead of dealing a card
    engine.start_turn();

    let state = engine.state();
    assert_eq!(state.round_winners, vec![seat(0)]);
    assert_eq!(state.players[seat(0)].points, 1);
    assert_eq!(state.current_round, 2);
}

#[test]
fn test_play_log_spans_rounds() {
    let mut engine = rigged(
        &[&[CardKind::Guard, CardKind::Spy], &[CardKind::Princess]],
        &[CardKind::Handmaid, CardKind::King],
    );

    engine
        .play_card(
            seat(0),
            CardKind::Guard,
            PlayRequest::guessing(seat(1), CardKind::Princess),
        )
        .unwrap();
    assert_eq!(engine.state().current_round, 2);
    assert_eq!(engine.state().actions.len(), 1);

    // the next round keeps appending to the same log
    engine.start_turn();
    let actor = engine.current_player_id();
    let kind = engine.playable_kinds(actor)[0];
    engine.play_card(actor, kind, PlayRequest::simple()).unwrap();

    let record = engine.state().actions.last().unwrap();
    assert_eq!(record.sequence, 1);
    assert_eq!(record.player, actor);
    assert_eq!(record.kind, kind);
}

#[test]
fn test_card_conservation_across_a_full_round() {
    let mut engine = rigged(
        &[
            &[CardKind::Chancellor, CardKind::Spy],
            &[CardKind::Baron],
            &[CardKind::Guard],
        ],
        &[CardKind::Priest, CardKind::Handmaid, CardKind::King],
    );
    let total = engine.state().card_count();

    engine
        .play_card(seat(0), CardKind::Chancellor, PlayRequest::simple())
        .unwrap();
    assert_eq!(engine.state().card_count(), total);

    engine
        .play_card(
            seat(0),
            CardKind::Chancellor,
            PlayRequest::chancellor(ChancellorChoice::keep_with_top(0, 0)),
        )
        .unwrap();
    assert_eq!(engine.state().card_count(), total);

    engine.start_turn();
    engine
        .play_card(seat(1), CardKind::Baron, PlayRequest::targeted(seat(2)))
        .unwrap();
    assert_eq!(engine.state().card_count(), total);
}
