//! Optimistic apply and reconciliation replay.
//!
//! After the server accepts a move it returns the new authoritative game
//! plus every confirmed move since the client's last sync. Snapping the
//! board straight to the new state would hide cause and effect, so the
//! store replays the history step by step with per-step delays: the local
//! player's own move lands almost instantly, the opponent's perceptibly
//! later.
//!
//! Each replay belongs to a [`ReplayEpoch`] value captured when the plan is
//! built. Any fresh game load bumps the epoch, and a pending step checks it
//! before applying, so stale timers never mutate a superseded game.

use crate::model::{Game, Point, RecentMove, Token};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, instrument};

/// Per-step replay delays.
///
/// The asymmetry is deliberate: the player's own move should feel
/// instantaneous while the opponent's is slow enough to be seen.
#[derive(Debug, Clone, Copy)]
pub struct ReplayTiming {
    /// Delay before replaying one of the local player's moves.
    pub player_step: Duration,
    /// Delay before replaying one of the opponent's moves.
    pub opponent_step: Duration,
}

impl Default for ReplayTiming {
    fn default() -> Self {
        Self {
            player_step: Duration::from_millis(50),
            opponent_step: Duration::from_millis(500),
        }
    }
}

/// Monotonic counter identifying which game load a replay belongs to.
#[derive(Debug, Clone, Default)]
pub struct ReplayEpoch {
    counter: Arc<AtomicU64>,
}

impl ReplayEpoch {
    /// Creates a fresh epoch counter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current epoch value.
    pub fn current(&self) -> u64 {
        self.counter.load(Ordering::SeqCst)
    }

    /// Invalidates all pending replay steps and returns the new epoch.
    pub fn bump(&self) -> u64 {
        self.counter.fetch_add(1, Ordering::SeqCst) + 1
    }
}

/// One delayed relocation in a replay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReplayStep {
    /// Delay to wait before applying this step.
    pub delay: Duration,
    /// Where the confirmed move started.
    pub from: Point,
    /// Where the confirmed move ended.
    pub to: Point,
}

/// Builds the ordered replay plan from a confirmed game's recent moves.
///
/// Order is the server's; it is never reordered or coalesced.
#[instrument(skip(confirmed, timing), fields(moves = confirmed.recent_moves.len()))]
pub fn replay_plan(confirmed: &Game, timing: &ReplayTiming) -> Vec<ReplayStep> {
    confirmed
        .recent_moves
        .iter()
        .map(|mv| ReplayStep {
            delay: step_delay(mv, &confirmed.player_id, timing),
            from: mv.from,
            to: mv.to,
        })
        .collect()
}

fn step_delay(mv: &RecentMove, player_id: &str, timing: &ReplayTiming) -> Duration {
    if mv.player_id == player_id {
        timing.player_step
    } else {
        timing.opponent_step
    }
}

/// Applies one replay step to the local token set.
///
/// Relocates the token at `from` to `to`, removing whatever occupied `to`.
/// This is display-only: it trusts the server's resolved positions and
/// never re-derives combat. A missing origin token means the local replica
/// already diverged; the step is skipped and the authoritative commit will
/// correct it.
pub fn apply_step(tokens: &mut Vec<Token>, from: Point, to: Point) {
    if !tokens.iter().any(|t| t.position == from) {
        debug!(?from, ?to, "no token at replay origin; skipping step");
        return;
    }

    tokens.retain(|t| t.position != to);
    if let Some(token) = tokens.iter_mut().find(|t| t.position == from) {
        token.position = to;
    }
}
