use common::types::ROUND_END_REASON;
use common::{Round, RoundType, Team, Weapon};

use super::*;
use crate::demo::GameEvent;

pub struct Rounds {
    active: Option<usize>,
    // At halftime the sides swap; while set, winning-team resolution flips
    // from handle-equality to handle-inequality.
    invert_teams: bool,
}

impl Rounds {
    pub fn new() -> Self {
        Self {
            active: None,
            invert_teams: false,
        }
    }

    fn matching_team<'t>(&self, handle: i64, teams: &'t [Team]) -> Option<&'t Team> {
        if self.invert_teams {
            teams.iter().find(|team| team.handle != handle)
        } else {
            teams.iter().find(|team| team.handle == handle)
        }
    }
}

impl Default for Rounds {
    fn default() -> Self {
        Self::new()
    }
}

fn classify(number: usize, round: &Round) -> RoundType {
    if number == 0 {
        return RoundType::Knife;
    }

    let all_knife = round.kills.iter().all(|kill| {
        kill.attacker.player.is_none() || kill.attacker.weapon == Some(Weapon::Knife)
    });
    if all_knife {
        RoundType::Knife
    } else {
        RoundType::Normal
    }
}

#[async_trait::async_trait]
impl Detector for Rounds {
    fn name(&self) -> &'static str {
        "Rounds"
    }

    fn save_priority(&self) -> u32 {
        3000
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
                tracing::debug!("Round {} started", match_.rounds.len() + 1);
                match_.rounds.push(Round::new(live.current_tick));
                self.active = Some(match_.rounds.len() - 1);
            }
            GameEvent::RoundEnd { reason, winner } => {
                // Some demos report a round end without a matching start.
                let Some(index) = self.active else {
                    return Ok(());
                };
                tracing::debug!("Round {} ended", match_.rounds.len());

                let end_reason = ROUND_END_REASON.get(reason).copied();
                if end_reason.is_none() {
                    tracing::warn!("Unknown round end reason {}", reason);
                }
                let winning_team = live
                    .team_by_number(*winner)
                    .and_then(|live_team| self.matching_team(live_team.handle, &match_.teams))
                    .map(|team| team.handle);

                let round = &mut match_.rounds[index];
                round.end_tick = Some(live.current_tick);
                round.end_reason = end_reason;
                round.winning_team = winning_team;
            }
            GameEvent::RoundOfficiallyEnded => {
                if let Some(index) = self.active {
                    tracing::debug!("Round {} officially ended", match_.rounds.len());
                    match_.rounds[index].official_end_tick = Some(live.current_tick);
                }
            }
            GameEvent::RoundAnnounceLastRoundHalf => {
                tracing::debug!("Half time! Switching teams");
                self.invert_teams = !self.invert_teams;
            }
            _ => {}
        }

        Ok(())
    }

    #[tracing::instrument(name = "Rounds", skip_all)]
    async fn save_data(
        &mut self,
        match_: &mut Match,
        storage: &dyn MatchStorage,
    ) -> Result<(), StorageError> {
        // A round without an end tick never actually concluded; a round
        // without kills is config/map-vote filler between the real ones.
        match_
            .rounds
            .retain(|round| round.end_tick.is_some() && !round.kills.is_empty());

        for (number, round) in match_.rounds.iter_mut().enumerate() {
            round.round_type = classify(number, round);
            if round.official_end_tick.is_none() {
                round.official_end_tick = round.end_tick;
            }
        }

        for round in match_.rounds.iter() {
            if let Err(error) = storage.save_round(&match_.external_id, round).await {
                tracing::error!(%error, start_tick = round.start_tick, "Failed to save round");
            }
        }

        Ok(())
    }
}
