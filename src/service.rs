//! The game-service seam.
//!
//! The server is the authority for combat resolution, turn order, and win
//! detection; the client consumes it through this trait. Implementations
//! must classify failures per [`ServiceError`](crate::ServiceError) so the
//! store can apply the recovery policy uniformly.

use crate::error::ServiceError;
use crate::model::{Game, GamesOverview, Move};
use async_trait::async_trait;

/// Remote game operations used by the interaction engine.
#[async_trait]
pub trait GameService: Send + Sync {
    /// Lists the player's games.
    async fn list_games(&self) -> Result<GamesOverview, ServiceError>;

    /// Loads one game, or `None` if it no longer exists.
    async fn load_game(&self, id: &str) -> Result<Option<Game>, ServiceError>;

    /// Creates a new game for the player.
    async fn create_game(&self) -> Result<Game, ServiceError>;

    /// Deletes a game.
    async fn delete_game(&self, id: &str) -> Result<(), ServiceError>;

    /// Submits a move and returns the new authoritative state, including
    /// the confirmed moves since the submitted version.
    async fn submit_move(&self, id: &str, mv: Move) -> Result<Game, ServiceError>;
}
