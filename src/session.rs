//! Session state shared between the store and the HTTP client.
//!
//! The engine never acquires credentials itself; some outer auth flow
//! deposits a token here, and the recovery policy clears it when the server
//! rejects it. Storage is in-memory; durable persistence is the embedding
//! application's concern.

use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};
use tracing::{debug, info};

/// Credentials plus the player's resumable game, if any.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionState {
    /// Opaque bearer token presented on every request.
    pub token: String,
    /// The player's display name.
    pub player_name: String,
    /// The game to resume on initialization, if one is in progress.
    pub game_id: Option<String>,
}

/// Shared, cloneable holder for the current session.
#[derive(Debug, Clone, Default)]
pub struct SessionStore {
    state: Arc<Mutex<Option<SessionState>>>,
}

impl SessionStore {
    /// Creates an empty session store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of the current session, if logged in.
    pub fn get(&self) -> Option<SessionState> {
        self.state.lock().unwrap().clone()
    }

    /// Returns the current token, if logged in.
    pub fn token(&self) -> Option<String> {
        self.state.lock().unwrap().as_ref().map(|s| s.token.clone())
    }

    /// Replaces the current session.
    pub fn update(&self, state: SessionState) {
        debug!(player = %state.player_name, "updating session state");
        *self.state.lock().unwrap() = Some(state);
    }

    /// Records the game to resume, if a session is present.
    pub fn set_game_id(&self, game_id: Option<String>) {
        if let Some(state) = self.state.lock().unwrap().as_mut() {
            state.game_id = game_id;
        }
    }

    /// Clears the session entirely.
    pub fn clear(&self) {
        info!("clearing session state");
        *self.state.lock().unwrap() = None;
    }
}
