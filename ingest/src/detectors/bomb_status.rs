use common::{BombStatusChange, BombStatusType, Position};

use super::*;
use crate::demo::{GameEvent, PlayerState};
use crate::player_info;

pub struct BombStatus {
    // Where the bomb was planted this round; the entity disappears once it
    // explodes, so the explosion falls back to this.
    last_planted: Option<Position>,
}

impl BombStatus {
    pub fn new() -> Self {
        Self { last_planted: None }
    }

    fn resolve_position(
        &self,
        change_type: BombStatusType,
        actor: Option<&PlayerState>,
        live: &LiveState,
    ) -> Option<Position> {
        let mut position = live.bomb.clone();

        if change_type == BombStatusType::Exploded && position.is_none() {
            position = self.last_planted.clone();
        }

        if change_type == BombStatusType::PickedUp {
            position = actor.map(|state| state.position.clone()).or(position);
        }

        if position.as_ref().is_some_and(Position::is_origin) {
            position = actor.map(|state| state.position.clone());
        }

        if position.is_none() {
            position = actor.map(|state| state.position.clone());
        }

        position
    }

    fn record(
        &mut self,
        change_type: BombStatusType,
        user: Option<i32>,
        match_: &mut Match,
        live: &LiveState,
    ) {
        if match_.rounds.is_empty() {
            return;
        }

        let actor = user.and_then(|user_id| live.player(user_id));
        let position = self.resolve_position(change_type, actor, live);
        if change_type == BombStatusType::Planted {
            self.last_planted = position.clone();
        }

        let change = BombStatusChange {
            change_type,
            tick: live.current_tick,
            player: actor.map(|state| player_info::create(live, state, &match_.players)),
            position,
        };

        if let Some(round) = match_.rounds.last_mut() {
            round.bomb_status_changes.push(change);
        }
    }
}

impl Default for BombStatus {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl Detector for BombStatus {
    fn name(&self) -> &'static str {
        "Bomb status changes"
    }

    fn save_priority(&self) -> u32 {
        2400
    }

    async fn process(
        &mut self,
        match_: &mut Match,
        live: &LiveState,
        event: &DemoEvent,
        _storage: &dyn MatchStorage,
    ) -> Result<(), StorageError> {
        let event = match event {
            DemoEvent::Game(game) => game,
            _ => return Ok(()),
        };

        match event {
            GameEvent::RoundStart => {
                self.last_planted = None;
            }
            GameEvent::BombPlanted { user, site } => {
                tracing::debug!("Bomb planted {:?}", site);
                self.record(BombStatusType::Planted, *user, match_, live);
            }
            GameEvent::BombDefused { user, site } => {
                tracing::debug!("Bomb defused {:?}", site);
                self.record(BombStatusType::Defused, *user, match_, live);
            }
            GameEvent::BombExploded { user, site } => {
                tracing::debug!("Bomb exploded {:?}", site);
                self.record(BombStatusType::Exploded, *user, match_, live);
            }
            GameEvent::BombDropped { user } => {
                tracing::debug!("Bomb dropped");
                self.record(BombStatusType::Dropped, *user, match_, live);
            }
            GameEvent::BombPickup { user } => {
                tracing::debug!("Bomb picked up");
                self.record(BombStatusType::PickedUp, *user, match_, live);
            }
            GameEvent::BombBeginDefuse { user } => {
                tracing::debug!("Bomb started defusing");
                self.record(BombStatusType::StartDefuse, *user, match_, live);
            }
            GameEvent::BombAbortDefuse { user } => {
                tracing::debug!("Bomb stopped defusing");
                self.record(BombStatusType::StopDefuse, *user, match_, live);
            }
            _ => {}
        }

        Ok(())
    }

    #[tracing::instrument(name = "BombStatus", skip_all)]
    async fn save_data(
        &mut self,
        match_: &mut Match,
        storage: &dyn MatchStorage,
    ) -> Result<(), StorageError> {
        for round in match_.rounds.iter() {
            for change in round.bomb_status_changes.iter() {
                let position = match change.position.as_ref() {
                    Some(position) => Some(storage.save_position(position).await?),
                    None => None,
                };
                let player = match change.player.as_ref() {
                    Some(info) => Some(storage.save_player_info(&match_.external_id, info).await?),
                    None => None,
                };
                storage
                    .save_bomb_status(
                        &match_.external_id,
                        round.start_tick,
                        position,
                        player,
                        change,
                    )
                    .await?;
            }
        }
        Ok(())
    }
}
