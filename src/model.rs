//! Core domain types for the board game client.
//!
//! Field names serialize in camelCase to match the game server's wire
//! shapes. The `Game` value is a read replica of server-owned state; the
//! client never derives combat outcomes from it.

use serde::{Deserialize, Serialize};

/// An integer board coordinate. Equality is structural.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point {
    /// Column index (0-based, increasing rightward).
    pub x: i32,
    /// Row index (0-based, increasing upward).
    pub y: i32,
}

impl Point {
    /// Creates a new point.
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Board bounds. Both dimensions are positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Geometry {
    /// Number of rows.
    pub rows: i32,
    /// Number of columns.
    pub columns: i32,
}

/// The closed set of token types.
///
/// Rock, paper, and scissor are movable; bomb and flag never move and are
/// only ever attacked.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumIter,
)]
pub enum TokenType {
    /// Beats scissor, loses to paper.
    Rock,
    /// Beats rock, loses to scissor.
    Paper,
    /// Beats paper, loses to rock.
    Scissor,
    /// Immovable; destroys most attackers.
    Bomb,
    /// Immovable; capturing it wins the game.
    Flag,
}

/// A game piece on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Token {
    /// Where the token sits. At most one token occupies a point.
    pub position: Point,
    /// What kind of piece this is.
    pub token_type: TokenType,
    /// True if the local player owns this token.
    pub player_owned: bool,
}

/// A proposed relocation, tagged with the client's last-known game version
/// for optimistic-concurrency control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Move {
    /// Origin point.
    pub from: Point,
    /// Destination point.
    pub to: Point,
    /// The game version this move was computed against.
    pub version: u64,
}

impl Move {
    /// Creates a new move.
    pub fn new(from: Point, to: Point, version: u64) -> Self {
        Self { from, to, version }
    }
}

/// Server-resolved outcome of an attack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CombatSummary {
    /// Type of the attacking token.
    pub attacker_token_type: TokenType,
    /// Type of the defending token.
    pub defender_token_type: TokenType,
    /// Surviving type, or `None` on mutual destruction.
    pub winner_token_type: Option<TokenType>,
}

/// A server-confirmed historical move.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentMove {
    /// The player who moved.
    pub player_id: String,
    /// Origin point.
    pub from: Point,
    /// Destination point.
    pub to: Point,
    /// Present only if the destination was occupied.
    pub combat_summary: Option<CombatSummary>,
}

/// Authoritative game state as last reported by the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Game {
    /// Server-assigned game identifier.
    pub game_id: String,
    /// The local player's identifier.
    pub player_id: String,
    /// The local player's display name.
    pub player_name: String,
    /// The opponent's display name.
    pub other_player_name: String,
    /// True if the local player moves next.
    pub is_player_turn: bool,
    /// Terminal: once true, no further moves are accepted.
    pub is_game_over: bool,
    /// Winner's display name once the game is over.
    pub winner_name: Option<String>,
    /// Board bounds.
    pub board: Geometry,
    /// All tokens visible to the local player.
    pub tokens: Vec<Token>,
    /// Confirmed moves since the client's last sync, oldest first.
    pub recent_moves: Vec<RecentMove>,
    /// Monotonic version counter for conflict detection.
    pub version: u64,
}

/// Summary of one game in the overview list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameOverview {
    /// Game identifier.
    pub id: String,
    /// The local player's identifier within that game.
    pub player_id: String,
    /// The local player's display name.
    pub player_name: String,
    /// The opponent's display name.
    pub other_player_name: String,
    /// Whether the game has ended.
    pub is_game_over: bool,
    /// Winner's display name once the game is over.
    pub winner_name: Option<String>,
}

/// The player's list of games.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GamesOverview {
    /// Games the player participates in.
    pub games: Vec<GameOverview>,
}
