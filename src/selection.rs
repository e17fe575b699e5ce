//! Move-selection state machine.
//!
//! Tracks which token the player has picked up and which destinations are
//! highlighted, and turns board-cell interactions into move submissions.
//! The machine enforces at-most-one-in-flight-move: once a submission is
//! emitted, further interactions are ignored until the submission resolves.

use crate::model::{Game, Move, Point, Token};
use crate::rules;
use tracing::debug;

/// Ephemeral, client-local selection state. Never persisted.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum SelectionState {
    /// No selection.
    #[default]
    Idle,
    /// A movable, player-owned token is selected.
    TokenSelected {
        /// The selected token.
        token: Token,
        /// Legal destinations from the token's position.
        target_points: Vec<Point>,
    },
    /// A move has been submitted and awaits resolution.
    MoveInFlight,
}

impl SelectionState {
    /// Handles an interaction with the board cell at `p`.
    ///
    /// Returns a move to submit when the interaction completes a selection,
    /// in which case the machine transitions to [`SelectionState::MoveInFlight`].
    /// All other interactions either update the selection or are no-ops.
    pub fn on_cell(&mut self, game: &Game, p: Point) -> Option<Move> {
        if !rules::can_move(game) {
            return None;
        }

        match self {
            SelectionState::MoveInFlight => None,
            SelectionState::TokenSelected {
                token,
                target_points,
            } => {
                if token.position == p {
                    debug!(?p, "deselecting token");
                    *self = SelectionState::Idle;
                    return None;
                }
                if target_points.contains(&p) {
                    let mv = Move::new(token.position, p, game.version);
                    debug!(?mv, "submitting move");
                    *self = SelectionState::MoveInFlight;
                    return Some(mv);
                }
                self.try_select(game, p);
                None
            }
            SelectionState::Idle => {
                self.try_select(game, p);
                None
            }
        }
    }

    /// Selects the token at `p` if it is the player's and can move.
    fn try_select(&mut self, game: &Game, p: Point) {
        if let Some(token) = rules::token_at(game, p).copied() {
            if token.player_owned && rules::can_move_token(game, &token) {
                let target_points = rules::target_points(game, p);
                debug!(?p, targets = target_points.len(), "selecting token");
                *self = SelectionState::TokenSelected {
                    token,
                    target_points,
                };
            }
        }
    }

    /// Clears any selection, returning to [`SelectionState::Idle`].
    ///
    /// Called when a submission resolves (successfully or not) and when the
    /// game state is replaced wholesale.
    pub fn clear(&mut self) {
        *self = SelectionState::Idle;
    }

    /// Returns true if a move submission is outstanding.
    pub fn is_in_flight(&self) -> bool {
        matches!(self, SelectionState::MoveInFlight)
    }

    /// Returns the currently selected token, if any.
    pub fn selected_token(&self) -> Option<&Token> {
        match self {
            SelectionState::TokenSelected { token, .. } => Some(token),
            _ => None,
        }
    }

    /// Returns the highlighted destinations, if a token is selected.
    pub fn target_points(&self) -> &[Point] {
        match self {
            SelectionState::TokenSelected { target_points, .. } => target_points,
            _ => &[],
        }
    }
}
