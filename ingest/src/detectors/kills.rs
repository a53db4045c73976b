use common::Kill;

use super::*;
use crate::demo::GameEvent;
use crate::player_info;

pub struct Kills {}

impl Kills {
    pub fn new() -> Self {
        Self {}
    }
}

impl Default for Kills {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl Detector for Kills {
    fn name(&self) -> &'static str {
        "Kills"
    }

    fn save_priority(&self) -> u32 {
        2500
    }

    async fn process(
        &mut self,
        match_: &mut Match,
        live: &LiveState,
        event: &DemoEvent,
        _storage: &dyn MatchStorage,
    ) -> Result<(), StorageError> {
        let DemoEvent::Game(GameEvent::PlayerDeath {
            victim,
            attacker,
            assister,
            through_smoke,
            penetrated,
            attacker_blind,
        }) = event
        else {
            return Ok(());
        };

        // Deaths before the first round started are warmup noise.
        if match_.rounds.is_empty() {
            return Ok(());
        }

        let attacker_state = attacker.and_then(|user_id| live.player(user_id));
        let victim_state = live.player(*victim);
        let (attacker_state, victim_state) = match (attacker_state, victim_state) {
            (Some(attacker_state), Some(victim_state)) => (attacker_state, victim_state),
            // Without both ends the kill data is not trustworthy.
            _ => return Ok(()),
        };

        tracing::debug!(
            "{} killed {} on tick {}",
            attacker_state.name,
            victim_state.name,
            live.current_tick
        );

        let kill = Kill {
            tick: live.current_tick,
            through_smoke: *through_smoke,
            through_wall: *penetrated > 0,
            while_blind: *attacker_blind,
            attacker: player_info::create(live, attacker_state, &match_.players),
            victim: player_info::create(live, victim_state, &match_.players),
            assister: assister
                .and_then(|user_id| live.player(user_id))
                .map(|state| player_info::create(live, state, &match_.players)),
        };

        if let Some(round) = match_.rounds.last_mut() {
            round.kills.push(kill);
        }

        Ok(())
    }

    #[tracing::instrument(name = "Kills", skip_all)]
    async fn save_data(
        &mut self,
        match_: &mut Match,
        storage: &dyn MatchStorage,
    ) -> Result<(), StorageError> {
        for round in match_.rounds.iter() {
            for kill in round.kills.iter() {
                // The kill row references its snapshots, so children first.
                let attacker = storage
                    .save_player_info(&match_.external_id, &kill.attacker)
                    .await?;
                let victim = storage
                    .save_player_info(&match_.external_id, &kill.victim)
                    .await?;
                let assister = match kill.assister.as_ref() {
                    Some(info) => Some(storage.save_player_info(&match_.external_id, info).await?),
                    None => None,
                };
                storage
                    .save_kill(
                        &match_.external_id,
                        round.start_tick,
                        attacker,
                        victim,
                        assister,
                        kill,
                    )
                    .await?;
            }
        }
        Ok(())
    }
}
