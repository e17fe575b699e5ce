//! Flagfall - client-side interaction engine for a rock-paper-scissor
//! capture-the-flag board game.
//!
//! The server is authoritative for combat resolution and win detection;
//! this crate predicts move legality, drives the player's selection state
//! machine, applies moves optimistically with animated reconciliation
//! against server-confirmed history, and recovers from state divergence.
//!
//! # Architecture
//!
//! - **Rules**: pure legality predicates and target computation over a
//!   `Game` snapshot
//! - **Selection**: the token-selection state machine fed by board
//!   interactions
//! - **Sequencer**: cancellable, epoch-keyed replay of confirmed move
//!   history
//! - **Store**: game lifecycle operations and the conflict/session
//!   recovery policy
//! - **Service**: the remote game server seam, with an HTTP implementation
//!
//! # Example
//!
//! ```no_run
//! use flagfall::{GameStore, RestGameService, SessionState, SessionStore};
//! use std::sync::Arc;
//!
//! # async fn example() {
//! let session = SessionStore::new();
//! session.update(SessionState {
//!     token: "token-from-auth-flow".to_string(),
//!     player_name: "Alice".to_string(),
//!     game_id: None,
//! });
//!
//! let service = Arc::new(RestGameService::new("https://example.net/api", session.clone()));
//! let store = GameStore::new(service, session);
//!
//! store.initialize_session();
//! store.initialize_game_app().await;
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod error;
mod model;
mod rest;
mod rules;
mod selection;
mod sequencer;
mod service;
mod session;
mod store;

// Crate-level exports - domain model
pub use model::{
    CombatSummary, Game, GameOverview, GamesOverview, Geometry, Move, Point, RecentMove, Token,
    TokenType,
};

// Crate-level exports - rule model and target computation
pub use rules::{
    can_move, can_move_token, is_movable_token_type, is_valid_move, is_valid_point, target_points,
    token_at,
};

// Crate-level exports - selection state machine
pub use selection::SelectionState;

// Crate-level exports - reconciliation sequencer
pub use sequencer::{apply_step, replay_plan, ReplayEpoch, ReplayStep, ReplayTiming};

// Crate-level exports - error taxonomy and recovery policy
pub use error::{RecoveryAction, ServiceError};

// Crate-level exports - service seam
pub use rest::RestGameService;
pub use service::GameService;

// Crate-level exports - session state
pub use session::{SessionState, SessionStore};

// Crate-level exports - application store
pub use store::{GameStore, NavState};
