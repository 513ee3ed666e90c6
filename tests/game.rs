//! Game session integration tests.

mod common;

use std::time::Duration;

use bjbot::{
    Control, DECK_SIZE, GameSession, GameState, Hand, Outcome, Rank, StartError, TableOptions,
    TransitionError,
};
use common::{Call, PLAYER, Recorder, STRANGER, SURFACE, fast_options, session_with_draws};

fn ranks(hand: &Hand) -> Vec<Rank> {
    hand.cards().iter().map(|c| c.rank).collect()
}

#[tokio::test]
async fn deal_goes_player_player_dealer() {
    let (mut session, recorder) = session_with_draws(&[Rank::Five, Rank::Six, Rank::Nine]);

    session.request_start(PLAYER).await.unwrap();

    assert_eq!(session.state(), GameState::Waiting);
    assert_eq!(session.player(), Some(PLAYER));
    assert_eq!(session.surface(), Some(SURFACE));
    assert_eq!(ranks(session.player_hand()), [Rank::Five, Rank::Six]);
    assert_eq!(ranks(session.dealer_hand()), [Rank::Nine]);
    assert_eq!(session.deck().remaining(), DECK_SIZE - 3);
    assert_eq!(session.outcome(), None);

    let calls = recorder.calls();
    let Call::Render(first) = &calls[0] else {
        panic!("expected the surface to be rendered first, got {calls:?}");
    };
    assert_eq!(first.state, GameState::Dealing);
    assert_eq!(first.cards_remaining, DECK_SIZE);
    assert!(first.player_cards.is_empty());
    assert!(first.dealer_cards.is_empty());

    let updates = recorder.updates();
    let sizes: Vec<(usize, usize)> = updates
        .iter()
        .map(|v| (v.player_cards.len(), v.dealer_cards.len()))
        .collect();
    assert_eq!(sizes, [(1, 0), (2, 0), (2, 1), (2, 1)]);
    assert_eq!(updates.last().unwrap().state, GameState::Waiting);
    assert_eq!(
        recorder.last_controls(),
        Some(vec![Control::Hit, Control::Stand, Control::Cancel])
    );
}

#[tokio::test]
async fn natural_blackjack_wins_without_dealer_turn() {
    let (mut session, recorder) =
        session_with_draws(&[Rank::Ace, Rank::King, Rank::Seven, Rank::Two]);

    session.request_start(PLAYER).await.unwrap();

    assert_eq!(session.state(), GameState::Over);
    assert_eq!(session.outcome(), Some(Outcome::Win));
    assert_eq!(session.player_hand().totals().copied().collect::<Vec<_>>(), [11, 21]);
    assert_eq!(session.dealer_hand().len(), 1);
    assert_eq!(session.deck().remaining(), DECK_SIZE - 3);
    assert_eq!(
        recorder.last_controls(),
        Some(vec![Control::Restart, Control::Cancel])
    );
}

#[tokio::test]
async fn hit_into_bust_loses_and_stops_drawing() {
    let (mut session, _) = session_with_draws(&[Rank::Ten, Rank::Six, Rank::Nine, Rank::Ten]);
    session.request_start(PLAYER).await.unwrap();

    session.hit().await.unwrap();

    assert_eq!(session.state(), GameState::Over);
    assert_eq!(session.outcome(), Some(Outcome::Loss));
    assert!(session.player_hand().is_bust());
    assert_eq!(session.dealer_hand().len(), 1);
    assert_eq!(session.deck().remaining(), DECK_SIZE - 4);
    assert_eq!(
        session.hit().await.unwrap_err(),
        TransitionError::InvalidState {
            control: Control::Hit,
            state: GameState::Over,
        }
    );
    assert_eq!(session.deck().remaining(), DECK_SIZE - 4);
}

#[tokio::test]
async fn hit_to_twenty_one_wins() {
    let (mut session, _) = session_with_draws(&[Rank::Five, Rank::Six, Rank::Nine, Rank::Ten]);
    session.request_start(PLAYER).await.unwrap();

    session.hit().await.unwrap();

    assert_eq!(session.state(), GameState::Over);
    assert_eq!(session.outcome(), Some(Outcome::Win));
    assert_eq!(session.dealer_hand().len(), 1);
}

#[tokio::test]
async fn hit_below_twenty_one_keeps_waiting() {
    let (mut session, recorder) =
        session_with_draws(&[Rank::Two, Rank::Three, Rank::Nine, Rank::Four]);
    session.request_start(PLAYER).await.unwrap();
    recorder.clear();

    session.hit().await.unwrap();

    assert_eq!(session.state(), GameState::Waiting);
    assert_eq!(session.player_hand().best_total(), Some(9));
    let states: Vec<GameState> = recorder.updates().iter().map(|v| v.state).collect();
    assert_eq!(
        states,
        [GameState::Dealing, GameState::Dealing, GameState::Waiting]
    );
}

#[tokio::test]
async fn stand_without_draws_when_dealer_already_ahead() {
    let (mut session, _) = session_with_draws(&[Rank::Two, Rank::Three, Rank::Ace]);
    session.request_start(PLAYER).await.unwrap();

    session.stand().await.unwrap();

    assert_eq!(session.dealer_hand().len(), 1);
    assert_eq!(session.state(), GameState::Over);
    assert_eq!(session.outcome(), Some(Outcome::Loss));
}

#[tokio::test]
async fn stand_without_draws_when_dealer_already_level() {
    // Player 11, dealer Ace counts 11: the loop is never entered.
    let (mut session, _) = session_with_draws(&[Rank::Five, Rank::Six, Rank::Ace]);
    session.request_start(PLAYER).await.unwrap();
    let remaining = session.deck().remaining();

    session.stand().await.unwrap();

    assert_eq!(session.dealer_hand().len(), 1);
    assert_eq!(session.deck().remaining(), remaining);
    assert_eq!(session.outcome(), Some(Outcome::Loss));
}

#[tokio::test]
async fn dealer_draws_until_meeting_player() {
    // Player 18, dealer 9 draws a ten to reach 19.
    let (mut session, _) =
        session_with_draws(&[Rank::Ten, Rank::Eight, Rank::Nine, Rank::Ten, Rank::Two]);
    session.request_start(PLAYER).await.unwrap();

    session.stand().await.unwrap();

    assert_eq!(ranks(session.dealer_hand()), [Rank::Nine, Rank::Ten]);
    assert_eq!(session.outcome(), Some(Outcome::Loss));
}

#[tokio::test]
async fn tie_goes_to_the_dealer() {
    let (mut session, _) =
        session_with_draws(&[Rank::Ten, Rank::Queen, Rank::Ten, Rank::Queen, Rank::Ace]);
    session.request_start(PLAYER).await.unwrap();

    session.stand().await.unwrap();

    assert_eq!(session.player_hand().best_total(), Some(20));
    assert_eq!(session.dealer_hand().best_total(), Some(20));
    assert_eq!(session.dealer_hand().len(), 2);
    assert_eq!(session.outcome(), Some(Outcome::Loss));
}

#[tokio::test]
async fn soft_dealer_total_counts_the_ace_high() {
    // Dealer Ace then 7 makes a soft 18, meeting the player's 18.
    let (mut session, _) =
        session_with_draws(&[Rank::Ten, Rank::Eight, Rank::Ace, Rank::Seven, Rank::Five]);
    session.request_start(PLAYER).await.unwrap();

    session.stand().await.unwrap();

    assert_eq!(session.dealer_hand().len(), 2);
    assert_eq!(session.dealer_hand().best_total(), Some(18));
    assert_eq!(session.outcome(), Some(Outcome::Loss));
}

#[tokio::test]
async fn dealer_bust_wins() {
    let (mut session, recorder) = session_with_draws(&[
        Rank::Ten,
        Rank::Nine,
        Rank::Six,
        Rank::Ten,
        Rank::Ten,
        Rank::Two,
    ]);
    session.request_start(PLAYER).await.unwrap();

    session.stand().await.unwrap();

    assert!(session.dealer_hand().is_bust());
    assert_eq!(session.dealer_hand().len(), 3);
    assert_eq!(session.outcome(), Some(Outcome::Win));
    assert_eq!(recorder.updates().last().unwrap().outcome, Some(Outcome::Win));
}

#[tokio::test]
async fn cancel_from_any_active_state_returns_to_idle() {
    // Waiting
    let (mut session, recorder) = session_with_draws(&[Rank::Five, Rank::Six, Rank::Nine]);
    session.request_start(PLAYER).await.unwrap();
    session.cancel().await.unwrap();

    assert_eq!(session.state(), GameState::Idle);
    assert_eq!(session.player(), None);
    assert_eq!(session.surface(), None);
    assert!(session.player_hand().is_empty());
    assert!(session.dealer_hand().is_empty());
    assert_eq!(session.outcome(), Some(Outcome::Cancelled));
    let calls = recorder.calls();
    assert_eq!(
        &calls[calls.len() - 2..],
        [
            Call::Controls(SURFACE, vec![]),
            Call::Close(SURFACE, Outcome::Cancelled),
        ]
    );

    // Over
    let (mut session, _) = session_with_draws(&[Rank::Ace, Rank::Queen, Rank::Seven]);
    session.request_start(PLAYER).await.unwrap();
    assert_eq!(session.state(), GameState::Over);
    session.cancel().await.unwrap();
    assert_eq!(session.state(), GameState::Idle);
    assert_eq!(session.player(), None);
    assert!(session.player_hand().is_empty());

    // Idle
    assert_eq!(
        session.cancel().await.unwrap_err(),
        TransitionError::InvalidState {
            control: Control::Cancel,
            state: GameState::Idle,
        }
    );
}

#[tokio::test]
async fn start_is_rejected_while_a_game_runs() {
    let (mut session, _) = session_with_draws(&[Rank::Five, Rank::Six, Rank::Nine]);
    session.request_start(PLAYER).await.unwrap();

    let before = session.snapshot();
    assert_eq!(
        session.request_start(STRANGER).await.unwrap_err(),
        StartError::AlreadyInProgress
    );
    assert_eq!(
        session.request_start(PLAYER).await.unwrap_err(),
        StartError::AlreadyInProgress
    );
    assert_eq!(session.snapshot(), before);
}

#[tokio::test]
async fn finished_game_restarts_only_for_its_player() {
    let (mut session, recorder) =
        session_with_draws(&[Rank::Ten, Rank::Six, Rank::Nine, Rank::Ten]);
    session.request_start(PLAYER).await.unwrap();
    session.hit().await.unwrap();
    assert_eq!(session.state(), GameState::Over);

    assert_eq!(
        session.request_start(STRANGER).await.unwrap_err(),
        StartError::AlreadyInProgress
    );

    session
        .deck_mut()
        .prearrange([Rank::Four, Rank::Four, Rank::Eight]);
    recorder.clear();
    session.request_start(PLAYER).await.unwrap();

    assert_eq!(session.state(), GameState::Waiting);
    assert_eq!(session.outcome(), None);
    assert_eq!(ranks(session.player_hand()), [Rank::Four, Rank::Four]);
    assert_eq!(session.deck().remaining(), DECK_SIZE - 3);

    // The surface is reused and shown empty before the first card.
    let calls = recorder.calls();
    assert!(!calls.iter().any(|c| matches!(c, Call::Render(_))));
    let first = &recorder.updates()[0];
    assert_eq!(first.cards_remaining, DECK_SIZE);
    assert!(first.player_cards.is_empty());
}

#[tokio::test]
async fn restart_requires_a_finished_game() {
    let (mut session, _) = session_with_draws(&[Rank::Five, Rank::Six, Rank::Nine]);
    assert_eq!(
        session.restart().await.unwrap_err(),
        TransitionError::InvalidState {
            control: Control::Restart,
            state: GameState::Idle,
        }
    );

    session.request_start(PLAYER).await.unwrap();
    assert!(session.restart().await.is_err());

    session.stand().await.unwrap();
    assert_eq!(session.state(), GameState::Over);
    session.restart().await.unwrap();
    assert_eq!(session.player(), Some(PLAYER));
    assert_eq!(session.player_hand().len(), 2);
    assert_eq!(session.dealer_hand().len(), 1);
}

#[tokio::test]
async fn failed_render_leaves_session_idle() {
    let mut session = GameSession::new(fast_options(), Recorder::failing_render());

    let err = session.request_start(PLAYER).await.unwrap_err();

    assert!(matches!(err, StartError::Surface(_)));
    assert_eq!(session.state(), GameState::Idle);
    assert_eq!(session.player(), None);
    assert_eq!(session.surface(), None);
}

#[tokio::test]
async fn failed_updates_do_not_break_the_game() {
    let recorder = Recorder::failing_updates();
    let mut session = GameSession::new(fast_options(), recorder.clone());
    session
        .deck_mut()
        .prearrange([Rank::Two, Rank::Two, Rank::Three]);

    session.request_start(PLAYER).await.unwrap();
    assert_eq!(session.state(), GameState::Waiting);
    session.stand().await.unwrap();
    assert_eq!(session.state(), GameState::Over);
    assert!(!recorder.updates().is_empty());
}

#[tokio::test(start_paused = true)]
async fn cards_are_paced_by_the_deal_delay() {
    let options = TableOptions::default()
        .with_deal_delay(Duration::from_millis(250))
        .with_seed(Some(4));
    let mut session = GameSession::new(options, Recorder::new());
    session
        .deck_mut()
        .prearrange([Rank::Two, Rank::Three, Rank::Four]);

    let started = tokio::time::Instant::now();
    session.request_start(PLAYER).await.unwrap();

    assert!(started.elapsed() >= Duration::from_millis(750));
    assert_eq!(session.state(), GameState::Waiting);
}

async fn start_then_empty_deck(draws: &[Rank]) -> (GameSession<Recorder>, Recorder) {
    let (mut session, recorder) = session_with_draws(draws);
    session.request_start(PLAYER).await.unwrap();
    assert_eq!(session.state(), GameState::Waiting);
    while session.deck_mut().draw().is_ok() {}
    recorder.clear();
    (session, recorder)
}

fn assert_aborted(session: &GameSession<Recorder>, recorder: &Recorder) {
    assert_eq!(session.state(), GameState::Idle);
    assert_eq!(session.outcome(), Some(Outcome::Aborted));
    assert_eq!(session.player(), None);
    assert_eq!(session.surface(), None);
    assert!(session.player_hand().is_empty());
    assert!(session.dealer_hand().is_empty());
    let calls = recorder.calls();
    assert_eq!(
        &calls[calls.len() - 2..],
        [
            Call::Controls(SURFACE, Vec::new()),
            Call::Close(SURFACE, Outcome::Aborted),
        ]
    );
}

#[tokio::test]
async fn hit_on_empty_deck_aborts_the_game() {
    let (mut session, recorder) =
        start_then_empty_deck(&[Rank::Two, Rank::Three, Rank::Nine]).await;

    session.hit().await.unwrap();

    assert_aborted(&session, &recorder);
}

#[tokio::test]
async fn dealer_draw_on_empty_deck_aborts_the_game() {
    // Player 18 against a dealer Two forces a dealer draw.
    let (mut session, recorder) =
        start_then_empty_deck(&[Rank::Ten, Rank::Eight, Rank::Two]).await;

    session.stand().await.unwrap();

    assert_aborted(&session, &recorder);
}

#[tokio::test]
async fn aborted_table_can_start_again() {
    let (mut session, recorder) =
        start_then_empty_deck(&[Rank::Two, Rank::Three, Rank::Nine]).await;
    session.hit().await.unwrap();
    recorder.clear();

    session.request_start(PLAYER).await.unwrap();

    assert_eq!(session.outcome(), None);
    assert_eq!(session.deck().remaining(), DECK_SIZE - 3);
    assert!(matches!(recorder.calls()[0], Call::Render(_)));
}
