pub mod types;

pub use types::{BombStatusType, MatchType, RoundEndReason, RoundType, Weapon};

/// A fully reconstructed match, the root of the aggregate. Rounds and teams
/// are owned by value; cross-entity links are steam ids or team handles.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Match {
    pub external_id: String,
    pub match_type: MatchType,
    pub type_extended: Option<String>,
    pub map: String,
    pub tickrate: f32,
    pub duration_ticks: u32,
    pub date: chrono::DateTime<chrono::Utc>,
    pub players: Vec<Player>,
    pub teams: Vec<Team>,
    pub rounds: Vec<Round>,
}

impl Match {
    /// An empty shell carrying only the external metadata. The header fields
    /// and the nested collections are filled in while the demo is processed.
    pub fn shell<S>(external_id: S, match_type: MatchType, type_extended: Option<String>) -> Self
    where
        S: Into<String>,
    {
        Self {
            external_id: external_id.into(),
            match_type,
            type_extended,
            map: String::new(),
            tickrate: 0.0,
            duration_ticks: 0,
            date: chrono::Utc::now(),
            players: Vec::new(),
            teams: Vec::new(),
            rounds: Vec::new(),
        }
    }
}

/// Global player identity, keyed by the 17-digit platform id and shared
/// across matches.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Player {
    pub steam_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Team {
    pub name: String,
    /// Stable side identifier, used to re-identify the team across halftime
    /// side swaps.
    pub handle: i64,
    /// Roster as steam ids, resolved against the match player set.
    pub players: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Round {
    pub start_tick: u32,
    pub end_tick: Option<u32>,
    pub official_end_tick: Option<u32>,
    pub end_reason: Option<RoundEndReason>,
    pub round_type: RoundType,
    /// Handle of the winning match team, if it could be resolved.
    pub winning_team: Option<i64>,
    pub kills: Vec<Kill>,
    pub bomb_status_changes: Vec<BombStatusChange>,
}

impl Round {
    pub fn new(start_tick: u32) -> Self {
        Self {
            start_tick,
            end_tick: None,
            official_end_tick: None,
            end_reason: None,
            round_type: RoundType::Normal,
            winning_team: None,
            kills: Vec::new(),
            bomb_status_changes: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Kill {
    pub tick: u32,
    pub through_smoke: bool,
    pub through_wall: bool,
    pub while_blind: bool,
    pub attacker: PlayerInfo,
    pub victim: PlayerInfo,
    pub assister: Option<PlayerInfo>,
}

/// Immutable snapshot of a player at a single tick. Snapshots are always
/// newly created, never shared between events.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PlayerInfo {
    /// Steam id of the matching persistent player. `None` for bots and
    /// participants that never resolved to a valid platform id.
    pub player: Option<String>,
    pub position: Position,
    pub health: i32,
    pub armour: i32,
    pub cash_spent_in_round: i32,
    pub equipment_value: i32,
    pub freeze_time_end_equipment_value: i32,
    pub has_c4: bool,
    pub is_scoped: bool,
    pub weapon: Option<Weapon>,
    pub bullets_in_magazine: i32,
    pub tick: u32,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct BombStatusChange {
    pub change_type: BombStatusType,
    pub tick: u32,
    pub player: Option<PlayerInfo>,
    pub position: Option<Position>,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Position {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Position {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// An exact all-zero position is the decoder's "never seen" sentinel.
    pub fn is_origin(&self) -> bool {
        self.x == 0.0 && self.y == 0.0 && self.z == 0.0
    }
}
