use pounce_game::{
    Direction, GamePhase, GameState, HuntGame, LevelCatalog, MoveOutcome, TickOutcome,
};

#[test]
fn pausing_freezes_the_countdown_without_drift() {
    let mut game = HuntGame::with_builtin_catalog().unwrap();
    for _ in 0..4 {
        let _ = game.tick();
    }
    let before_pause = game.state().seconds_remaining;
    assert!(game.toggle_pause());
    assert_eq!(game.state().phase(), GamePhase::Paused);
    for _ in 0..25 {
        assert_eq!(game.tick(), TickOutcome::Idle);
    }
    assert_eq!(game.state().seconds_remaining, before_pause);
    assert!(!game.toggle_pause());
    let _ = game.tick();
    assert_eq!(game.state().seconds_remaining, before_pause - 1);
}

#[test]
fn pause_leaves_position_and_score_untouched() {
    let mut game = HuntGame::with_builtin_catalog().unwrap();
    let _ = game.move_cat(Direction::Right);
    let position = game.state().cat;
    let score = game.state().total_score;
    let _ = game.toggle_pause();
    let _ = game.toggle_pause();
    assert_eq!(game.state().cat, position);
    assert_eq!(game.state().total_score, score);
}

#[test]
fn setup_level_reenters_cleanly_after_any_terminal_state() {
    let mut game = HuntGame::with_builtin_catalog().unwrap();
    // Terminal by timeout.
    while game.tick() != TickOutcome::TimeExpired {}
    assert_eq!(game.state().phase(), GamePhase::GameOver);
    game.setup_level(0).unwrap();
    assert_eq!(game.state().phase(), GamePhase::Playing);
    assert!(game.state().timer_running);

    // Terminal by capture.
    loop {
        if game.move_cat(Direction::Right) == MoveOutcome::Captured {
            break;
        }
    }
    assert_eq!(game.state().phase(), GamePhase::LevelComplete);
    game.setup_level(0).unwrap();
    assert_eq!(game.state().phase(), GamePhase::Playing);
    assert!(!game.state().rat_found);
    assert_eq!(game.state().level_score, 0);
}

#[test]
fn highlight_follows_the_cat_and_never_doubles() {
    let mut game = HuntGame::with_builtin_catalog().unwrap();
    for _ in 0..8 {
        let _ = game.move_cat(Direction::Right);
        let highlighted = game
            .state()
            .rooms
            .iter()
            .filter(|room| room.highlighted)
            .count();
        assert!(highlighted <= 1, "more than one room highlighted");
    }
}

#[test]
fn game_complete_only_fires_once_per_exhaustion() {
    let catalog = LevelCatalog::builtin();
    let mut state = GameState::default();
    let last = catalog.len() - 1;
    state.setup_level(&catalog, last).unwrap();
    assert!(!state.next_level(&catalog).unwrap());
    assert!(state.take_game_complete());
    assert!(!state.take_game_complete());
    // The flag can re-arm only through another exhausted advance.
    state.setup_level(&catalog, last).unwrap();
    assert!(!state.next_level(&catalog).unwrap());
    assert!(state.take_game_complete());
}

#[test]
fn commands_are_inert_while_the_level_is_complete() {
    let mut game = HuntGame::with_builtin_catalog().unwrap();
    loop {
        if game.move_cat(Direction::Right) == MoveOutcome::Captured {
            break;
        }
    }
    let snapshot = game.state().clone();
    assert_eq!(game.move_cat(Direction::Left), MoveOutcome::Ignored);
    assert_eq!(game.tick(), TickOutcome::Idle);
    assert_eq!(game.state().cat, snapshot.cat);
    assert_eq!(game.state().seconds_remaining, snapshot.seconds_remaining);
    assert_eq!(game.state().total_score, snapshot.total_score);
}

#[test]
fn replaying_a_cleared_level_adds_score_but_not_unlocks() {
    let mut game = HuntGame::with_builtin_catalog().unwrap();
    loop {
        if game.move_cat(Direction::Right) == MoveOutcome::Captured {
            break;
        }
    }
    let first_score = game.state().total_score;
    assert_eq!(game.state().unlocked_levels, 2);
    game.reset_level().unwrap();
    loop {
        if game.move_cat(Direction::Right) == MoveOutcome::Captured {
            break;
        }
    }
    assert_eq!(game.state().total_score, first_score * 2);
    assert_eq!(game.state().unlocked_levels, 2);
    assert_eq!(game.summary().levels_cleared, 1);
}

#[test]
fn status_line_tracks_the_most_recent_event() {
    let mut game = HuntGame::with_builtin_catalog().unwrap();
    let intro = game.state().status.clone();
    assert!(intro.contains("Level 1"));
    let _ = game.toggle_pause();
    assert_eq!(game.state().status, "Hunt paused.");
    let _ = game.toggle_pause();
    assert_eq!(game.state().status, "Back to the hunt!");
    let _ = game.move_cat(Direction::Up);
    let _ = game.move_cat(Direction::Up);
    let blocked = game.move_cat(Direction::Up);
    assert_eq!(blocked, MoveOutcome::Blocked);
    assert_eq!(game.state().status, "The cat can't go that way.");
    assert_eq!(game.state().logs.last(), Some(&game.state().status));
}
