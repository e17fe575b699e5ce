//! Tests for the move-selection state machine.

use flagfall::{Game, Geometry, Point, SelectionState, Token, TokenType};

fn token(x: i32, y: i32, token_type: TokenType, player_owned: bool) -> Token {
    Token {
        position: Point::new(x, y),
        token_type,
        player_owned,
    }
}

fn game(tokens: Vec<Token>) -> Game {
    Game {
        game_id: "g1".to_string(),
        player_id: "p1".to_string(),
        player_name: "Alice".to_string(),
        other_player_name: "Bob".to_string(),
        is_player_turn: true,
        is_game_over: false,
        winner_name: None,
        board: Geometry {
            rows: 5,
            columns: 5,
        },
        tokens,
        recent_moves: Vec::new(),
        version: 5,
    }
}

#[test]
fn test_no_selection_when_not_players_turn() {
    let mut g = game(vec![token(1, 1, TokenType::Rock, true)]);
    g.is_player_turn = false;

    let mut selection = SelectionState::default();
    assert_eq!(selection.on_cell(&g, Point::new(1, 1)), None);
    assert_eq!(selection, SelectionState::Idle);
}

#[test]
fn test_no_selection_when_game_over() {
    let mut g = game(vec![token(1, 1, TokenType::Rock, true)]);
    g.is_game_over = true;

    let mut selection = SelectionState::default();
    selection.on_cell(&g, Point::new(1, 1));
    assert_eq!(selection, SelectionState::Idle);
}

#[test]
fn test_opponent_token_cannot_be_selected() {
    let g = game(vec![token(2, 2, TokenType::Rock, false)]);

    let mut selection = SelectionState::default();
    selection.on_cell(&g, Point::new(2, 2));
    assert_eq!(selection, SelectionState::Idle);
}

#[test]
fn test_immovable_token_cannot_be_selected() {
    let g = game(vec![token(2, 2, TokenType::Flag, true)]);

    let mut selection = SelectionState::default();
    selection.on_cell(&g, Point::new(2, 2));
    assert_eq!(selection, SelectionState::Idle);
}

#[test]
fn test_selecting_a_token_populates_targets() {
    let g = game(vec![token(2, 2, TokenType::Rock, true)]);

    let mut selection = SelectionState::default();
    selection.on_cell(&g, Point::new(2, 2));

    let selected = selection.selected_token().expect("token selected");
    assert_eq!(selected.position, Point::new(2, 2));
    assert_eq!(selection.target_points().len(), 4);
}

#[test]
fn test_reselecting_the_selected_token_clears_selection() {
    let g = game(vec![token(2, 2, TokenType::Rock, true)]);

    let mut selection = SelectionState::default();
    selection.on_cell(&g, Point::new(2, 2));
    assert!(selection.selected_token().is_some());

    // Round-trip back to Idle.
    selection.on_cell(&g, Point::new(2, 2));
    assert_eq!(selection, SelectionState::Idle);
}

#[test]
fn test_selecting_another_token_replaces_selection() {
    let g = game(vec![
        token(0, 0, TokenType::Rock, true),
        token(3, 3, TokenType::Paper, true),
    ]);

    let mut selection = SelectionState::default();
    selection.on_cell(&g, Point::new(0, 0));
    selection.on_cell(&g, Point::new(3, 3));

    assert_eq!(
        selection.selected_token().map(|t| t.position),
        Some(Point::new(3, 3))
    );
    assert_eq!(selection.target_points().len(), 4);
}

#[test]
fn test_clicking_a_target_submits_the_move() {
    let g = game(vec![token(1, 1, TokenType::Rock, true)]);

    let mut selection = SelectionState::default();
    selection.on_cell(&g, Point::new(1, 1));

    let mv = selection
        .on_cell(&g, Point::new(1, 2))
        .expect("move submitted");
    assert_eq!(mv.from, Point::new(1, 1));
    assert_eq!(mv.to, Point::new(1, 2));
    assert_eq!(mv.version, 5);
    assert!(selection.is_in_flight());
}

#[test]
fn test_clicking_a_non_target_keeps_the_selection() {
    let g = game(vec![token(1, 1, TokenType::Rock, true)]);

    let mut selection = SelectionState::default();
    selection.on_cell(&g, Point::new(1, 1));

    // Two squares away, not a target.
    assert_eq!(selection.on_cell(&g, Point::new(3, 1)), None);
    assert!(selection.selected_token().is_some());
}

#[test]
fn test_attack_on_enemy_token_is_submittable() {
    let g = game(vec![
        token(1, 1, TokenType::Rock, true),
        token(1, 2, TokenType::Flag, false),
    ]);

    let mut selection = SelectionState::default();
    selection.on_cell(&g, Point::new(1, 1));
    let mv = selection
        .on_cell(&g, Point::new(1, 2))
        .expect("attack submitted");
    assert_eq!(mv.to, Point::new(1, 2));
}

#[test]
fn test_interactions_ignored_while_move_in_flight() {
    let g = game(vec![
        token(1, 1, TokenType::Rock, true),
        token(3, 3, TokenType::Paper, true),
    ]);

    let mut selection = SelectionState::default();
    selection.on_cell(&g, Point::new(1, 1));
    selection.on_cell(&g, Point::new(1, 2)).expect("first move");

    // A second submission attempt must be ignored until resolution.
    assert_eq!(selection.on_cell(&g, Point::new(3, 3)), None);
    assert!(selection.is_in_flight());

    selection.clear();
    assert_eq!(selection, SelectionState::Idle);
}
