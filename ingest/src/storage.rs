use common::{
    BombStatusChange, BombStatusType, Kill, Match, MatchType, Player, PlayerInfo, Position, Round,
    RoundEndReason, RoundType, Team,
};

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("storage backend: {0}")]
    Backend(String),
}

/// Persistence collaborator for the reconstruction run. Implementations must
/// make every write upsert-safe: saving the same match twice may not
/// duplicate rows.
#[async_trait::async_trait]
pub trait MatchStorage: Send + Sync {
    async fn find_player(&self, steam_id: &str) -> Result<Option<Player>, StorageError>;

    async fn upsert_player(&self, player: &Player) -> Result<(), StorageError>;

    async fn save_match(&self, match_: &Match) -> Result<(), StorageError>;

    async fn save_match_players(
        &self,
        external_id: &str,
        players: &[Player],
    ) -> Result<(), StorageError>;

    async fn save_team(&self, external_id: &str, team: &Team) -> Result<(), StorageError>;

    /// The in-memory model only holds the forward team -> player direction;
    /// the reverse relation is written explicitly at save time.
    async fn link_player_team(
        &self,
        steam_id: &str,
        external_id: &str,
        handle: i64,
    ) -> Result<(), StorageError>;

    async fn save_round(&self, external_id: &str, round: &Round) -> Result<(), StorageError>;

    async fn save_position(&self, position: &Position) -> Result<u64, StorageError>;

    async fn save_player_info(
        &self,
        external_id: &str,
        info: &PlayerInfo,
    ) -> Result<u64, StorageError>;

    #[allow(clippy::too_many_arguments)]
    async fn save_kill(
        &self,
        external_id: &str,
        round_start_tick: u32,
        attacker: u64,
        victim: u64,
        assister: Option<u64>,
        kill: &Kill,
    ) -> Result<(), StorageError>;

    async fn save_bomb_status(
        &self,
        external_id: &str,
        round_start_tick: u32,
        position: Option<u64>,
        player: Option<u64>,
        change: &BombStatusChange,
    ) -> Result<(), StorageError>;
}

#[derive(Debug, Clone, PartialEq)]
pub struct MatchRow {
    pub external_id: String,
    pub match_type: MatchType,
    pub type_extended: Option<String>,
    pub map: String,
    pub tickrate: f32,
    pub duration_ticks: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamRow {
    pub handle: i64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RoundRow {
    pub start_tick: u32,
    pub end_tick: u32,
    pub official_end_tick: u32,
    pub end_reason: Option<RoundEndReason>,
    pub round_type: RoundType,
    pub winning_team: Option<i64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct KillRow {
    pub round_start_tick: u32,
    pub tick: u32,
    pub through_smoke: bool,
    pub through_wall: bool,
    pub while_blind: bool,
    pub attacker: u64,
    pub victim: u64,
    pub assister: Option<u64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BombStatusRow {
    pub round_start_tick: u32,
    pub change_type: BombStatusType,
    pub tick: u32,
    pub position: Option<u64>,
    pub player: Option<u64>,
}

#[derive(Debug, Default)]
struct Inner {
    players: std::collections::BTreeMap<String, Player>,
    matches: std::collections::BTreeMap<String, MatchRow>,
    match_players: std::collections::BTreeSet<(String, String)>,
    teams: std::collections::BTreeMap<(String, i64), TeamRow>,
    team_links: std::collections::BTreeSet<(String, String, i64)>,
    rounds: std::collections::BTreeMap<(String, u32), RoundRow>,
    positions: Vec<Position>,
    player_infos: Vec<(String, PlayerInfo)>,
    kills: Vec<(String, KillRow)>,
    bomb_statuses: Vec<(String, BombStatusRow)>,
}

/// In-memory reference implementation. Keyed and value-deduplicated writes
/// keep repeated saves of the same match from growing any table.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    inner: std::sync::Mutex<Inner>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn players(&self) -> Vec<Player> {
        self.lock().players.values().cloned().collect()
    }

    pub fn match_row(&self, external_id: &str) -> Option<MatchRow> {
        self.lock().matches.get(external_id).cloned()
    }

    pub fn match_players(&self, external_id: &str) -> Vec<String> {
        self.lock()
            .match_players
            .iter()
            .filter(|(match_id, _)| match_id == external_id)
            .map(|(_, steam_id)| steam_id.clone())
            .collect()
    }

    pub fn teams(&self, external_id: &str) -> Vec<TeamRow> {
        self.lock()
            .teams
            .iter()
            .filter(|((match_id, _), _)| match_id == external_id)
            .map(|(_, row)| row.clone())
            .collect()
    }

    pub fn team_links(&self, external_id: &str) -> Vec<(String, i64)> {
        self.lock()
            .team_links
            .iter()
            .filter(|(_, match_id, _)| match_id == external_id)
            .map(|(steam_id, _, handle)| (steam_id.clone(), *handle))
            .collect()
    }

    /// Rounds of one match, ordered by start tick.
    pub fn rounds(&self, external_id: &str) -> Vec<RoundRow> {
        self.lock()
            .rounds
            .iter()
            .filter(|((match_id, _), _)| match_id == external_id)
            .map(|(_, row)| row.clone())
            .collect()
    }

    pub fn kills(&self, external_id: &str) -> Vec<KillRow> {
        self.lock()
            .kills
            .iter()
            .filter(|(match_id, _)| match_id == external_id)
            .map(|(_, row)| row.clone())
            .collect()
    }

    pub fn bomb_statuses(&self, external_id: &str) -> Vec<BombStatusRow> {
        self.lock()
            .bomb_statuses
            .iter()
            .filter(|(match_id, _)| match_id == external_id)
            .map(|(_, row)| row.clone())
            .collect()
    }

    pub fn player_info(&self, id: u64) -> Option<PlayerInfo> {
        self.lock().player_infos.get(id as usize).map(|(_, info)| info.clone())
    }

    pub fn player_info_count(&self) -> usize {
        self.lock().player_infos.len()
    }

    pub fn position(&self, id: u64) -> Option<Position> {
        self.lock().positions.get(id as usize).cloned()
    }

    pub fn position_count(&self) -> usize {
        self.lock().positions.len()
    }
}

#[async_trait::async_trait]
impl MatchStorage for MemoryStorage {
    async fn find_player(&self, steam_id: &str) -> Result<Option<Player>, StorageError> {
        Ok(self.lock().players.get(steam_id).cloned())
    }

    async fn upsert_player(&self, player: &Player) -> Result<(), StorageError> {
        self.lock().players.insert(player.steam_id.clone(), player.clone());
        Ok(())
    }

    async fn save_match(&self, match_: &Match) -> Result<(), StorageError> {
        self.lock().matches.insert(
            match_.external_id.clone(),
            MatchRow {
                external_id: match_.external_id.clone(),
                match_type: match_.match_type,
                type_extended: match_.type_extended.clone(),
                map: match_.map.clone(),
                tickrate: match_.tickrate,
                duration_ticks: match_.duration_ticks,
            },
        );
        Ok(())
    }

    async fn save_match_players(
        &self,
        external_id: &str,
        players: &[Player],
    ) -> Result<(), StorageError> {
        let mut inner = self.lock();
        for player in players {
            inner
                .match_players
                .insert((external_id.to_owned(), player.steam_id.clone()));
        }
        Ok(())
    }

    async fn save_team(&self, external_id: &str, team: &Team) -> Result<(), StorageError> {
        self.lock().teams.insert(
            (external_id.to_owned(), team.handle),
            TeamRow {
                handle: team.handle,
                name: team.name.clone(),
            },
        );
        Ok(())
    }

    async fn link_player_team(
        &self,
        steam_id: &str,
        external_id: &str,
        handle: i64,
    ) -> Result<(), StorageError> {
        self.lock()
            .team_links
            .insert((steam_id.to_owned(), external_id.to_owned(), handle));
        Ok(())
    }

    async fn save_round(&self, external_id: &str, round: &Round) -> Result<(), StorageError> {
        let end_tick = round
            .end_tick
            .ok_or_else(|| StorageError::Backend("round has no end tick".to_owned()))?;
        self.lock().rounds.insert(
            (external_id.to_owned(), round.start_tick),
            RoundRow {
                start_tick: round.start_tick,
                end_tick,
                official_end_tick: round.official_end_tick.unwrap_or(end_tick),
                end_reason: round.end_reason,
                round_type: round.round_type,
                winning_team: round.winning_team,
            },
        );
        Ok(())
    }

    async fn save_position(&self, position: &Position) -> Result<u64, StorageError> {
        let mut inner = self.lock();
        if let Some(id) = inner.positions.iter().position(|existing| existing == position) {
            return Ok(id as u64);
        }
        inner.positions.push(position.clone());
        Ok((inner.positions.len() - 1) as u64)
    }

    async fn save_player_info(
        &self,
        external_id: &str,
        info: &PlayerInfo,
    ) -> Result<u64, StorageError> {
        let mut inner = self.lock();
        if let Some(id) = inner
            .player_infos
            .iter()
            .position(|(match_id, existing)| match_id == external_id && existing == info)
        {
            return Ok(id as u64);
        }
        inner.player_infos.push((external_id.to_owned(), info.clone()));
        Ok((inner.player_infos.len() - 1) as u64)
    }

    async fn save_kill(
        &self,
        external_id: &str,
        round_start_tick: u32,
        attacker: u64,
        victim: u64,
        assister: Option<u64>,
        kill: &Kill,
    ) -> Result<(), StorageError> {
        let row = KillRow {
            round_start_tick,
            tick: kill.tick,
            through_smoke: kill.through_smoke,
            through_wall: kill.through_wall,
            while_blind: kill.while_blind,
            attacker,
            victim,
            assister,
        };
        let mut inner = self.lock();
        if !inner
            .kills
            .iter()
            .any(|(match_id, existing)| match_id == external_id && *existing == row)
        {
            inner.kills.push((external_id.to_owned(), row));
        }
        Ok(())
    }

    async fn save_bomb_status(
        &self,
        external_id: &str,
        round_start_tick: u32,
        position: Option<u64>,
        player: Option<u64>,
        change: &BombStatusChange,
    ) -> Result<(), StorageError> {
        let row = BombStatusRow {
            round_start_tick,
            change_type: change.change_type,
            tick: change.tick,
            position,
            player,
        };
        let mut inner = self.lock();
        if !inner
            .bomb_statuses
            .iter()
            .any(|(match_id, existing)| match_id == external_id && *existing == row)
        {
            inner.bomb_statuses.push((external_id.to_owned(), row));
        }
        Ok(())
    }
}
