use common::Position;

/// The upstream decoder failed; the whole run is discarded.
#[derive(Debug, thiserror::Error)]
#[error("decoding demo stream: {0}")]
pub struct DecodeError(pub String);

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct DemoHeader {
    pub map: String,
    pub tick_rate: f32,
    pub playback_ticks: u32,
}

/// One element of the decoded, ordered demo stream. State events
/// (`PlayerUpdate`, `TeamUpdate`, `BombUpdate`, `Tick`) keep [`LiveState`]
/// current; `Game` events carry the domain actions the detectors consume.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum DemoEvent {
    Start(DemoHeader),
    Tick(u32),
    PlayerUpdate(PlayerState),
    PlayerRemove(i32),
    TeamUpdate(TeamState),
    BombUpdate(Option<Position>),
    Game(GameEvent),
    End,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum GameEvent {
    RoundStart,
    RoundEnd {
        reason: i32,
        winner: i32,
    },
    RoundOfficiallyEnded,
    RoundAnnounceLastRoundHalf,
    PlayerDeath {
        victim: i32,
        attacker: Option<i32>,
        assister: Option<i32>,
        through_smoke: bool,
        penetrated: i32,
        attacker_blind: bool,
    },
    BombPlanted { user: Option<i32>, site: Option<String> },
    BombDefused { user: Option<i32>, site: Option<String> },
    BombExploded { user: Option<i32>, site: Option<String> },
    BombDropped { user: Option<i32> },
    BombPickup { user: Option<i32> },
    BombBeginDefuse { user: Option<i32> },
    BombAbortDefuse { user: Option<i32> },
}

/// Decoder-maintained view of one connected participant.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PlayerState {
    pub user_id: i32,
    pub steam_id: String,
    pub name: String,
    pub position: Position,
    pub health: i32,
    pub armour: i32,
    pub cash_spent_in_round: i32,
    pub equipment_value: i32,
    pub freeze_time_end_equipment_value: i32,
    pub has_c4: bool,
    pub is_scoped: bool,
    /// Class name of the active weapon, e.g. `weapon_ak47`.
    pub weapon: Option<String>,
    pub clip_ammo: i32,
}

/// Decoder-maintained view of one team slot.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TeamState {
    pub index: usize,
    /// Side number (2 = T, 3 = CT); this is what `RoundEnd::winner` refers to.
    pub team_number: i32,
    pub clan_name: String,
    pub handle: i64,
    /// Roster as steam ids.
    pub members: Vec<String>,
}

/// Queryable live state, rebuilt by applying state events in stream order.
#[derive(Debug, Default, Clone)]
pub struct LiveState {
    pub current_tick: u32,
    pub players: std::collections::BTreeMap<i32, PlayerState>,
    pub teams: std::collections::BTreeMap<usize, TeamState>,
    pub bomb: Option<Position>,
}

impl LiveState {
    pub fn apply(&mut self, event: &DemoEvent) {
        match event {
            DemoEvent::Tick(tick) => {
                self.current_tick = *tick;
            }
            DemoEvent::PlayerUpdate(state) => {
                self.players.insert(state.user_id, state.clone());
            }
            DemoEvent::PlayerRemove(user_id) => {
                self.players.remove(user_id);
            }
            DemoEvent::TeamUpdate(state) => {
                self.teams.insert(state.index, state.clone());
            }
            DemoEvent::BombUpdate(position) => {
                self.bomb = position.clone();
            }
            _ => {}
        }
    }

    pub fn player(&self, user_id: i32) -> Option<&PlayerState> {
        self.players.get(&user_id)
    }

    pub fn team_by_number(&self, team_number: i32) -> Option<&TeamState> {
        self.teams.values().find(|team| team.team_number == team_number)
    }
}
