//! Move legality and target computation.
//!
//! Everything here is a pure predicate over a `Game` snapshot, so the same
//! functions serve UI affordance (which cells to highlight), pre-submission
//! validation, and tests. Combat is never evaluated client-side; it is a
//! server-side consequence of an accepted move.

use crate::model::{Game, Geometry, Move, Point, Token, TokenType};
use tracing::instrument;

/// Returns true if `p` lies within the board bounds.
pub fn is_valid_point(board: &Geometry, p: Point) -> bool {
    p.x >= 0 && p.x < board.columns && p.y >= 0 && p.y < board.rows
}

/// Returns the token occupying `p`, if any.
pub fn token_at(game: &Game, p: Point) -> Option<&Token> {
    game.tokens.iter().find(|t| t.position == p)
}

/// Returns true if the move is legal for the local player.
///
/// Requires a player-owned token at the origin, both endpoints in bounds,
/// and a destination that is empty or holds an enemy token. Moving onto an
/// enemy bomb or flag is an attack and therefore legal; capturing the flag
/// is the win condition. The move's version tag is not consulted.
#[instrument(skip(game), level = "debug")]
pub fn is_valid_move(game: &Game, mv: &Move) -> bool {
    match token_at(game, mv.from) {
        Some(t) if t.player_owned => {}
        _ => return false,
    }

    if !is_valid_point(&game.board, mv.from) || !is_valid_point(&game.board, mv.to) {
        return false;
    }

    match token_at(game, mv.to) {
        Some(t) => !t.player_owned,
        None => true,
    }
}

/// Returns true if the local player may move at all right now.
pub fn can_move(game: &Game) -> bool {
    game.is_player_turn && !game.is_game_over
}

/// Returns true for the movable token types (rock, paper, scissor).
pub fn is_movable_token_type(token_type: TokenType) -> bool {
    matches!(
        token_type,
        TokenType::Rock | TokenType::Paper | TokenType::Scissor
    )
}

/// Returns true if the token is movable and has at least one legal
/// destination from its current position.
#[instrument(skip(game), level = "debug")]
pub fn can_move_token(game: &Game, token: &Token) -> bool {
    if !token.player_owned || !is_movable_token_type(token.token_type) {
        return false;
    }
    !target_points(game, token.position).is_empty()
}

/// Enumerates the legal destinations from `origin`.
///
/// Candidates are the four orthogonal neighbors in stable order (up, down,
/// left, right), filtered by [`is_valid_move`]. The result must be
/// recomputed whenever the selection or the authoritative game changes;
/// legality can shift after reconciliation, so it is never cached across a
/// move submission.
#[instrument(skip(game), level = "debug")]
pub fn target_points(game: &Game, origin: Point) -> Vec<Point> {
    let candidates = [
        Point::new(origin.x, origin.y + 1),
        Point::new(origin.x, origin.y - 1),
        Point::new(origin.x - 1, origin.y),
        Point::new(origin.x + 1, origin.y),
    ];

    candidates
        .into_iter()
        .filter(|p| is_valid_move(game, &Move::new(origin, *p, game.version)))
        .collect()
}
