use common::Team;

use super::*;
use crate::demo::GameEvent;

pub struct Teams {
    registered: std::collections::BTreeMap<usize, Team>,
}

impl Teams {
    pub fn new() -> Self {
        Self {
            registered: std::collections::BTreeMap::new(),
        }
    }
}

impl Default for Teams {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl Detector for Teams {
    fn name(&self) -> &'static str {
        "Teams"
    }

    fn save_priority(&self) -> u32 {
        2000
    }

    async fn process(
        &mut self,
        match_: &mut Match,
        live: &LiveState,
        event: &DemoEvent,
        _storage: &dyn MatchStorage,
    ) -> Result<(), StorageError> {
        if !matches!(event, DemoEvent::Game(GameEvent::RoundOfficiallyEnded)) {
            return Ok(());
        }

        for (index, state) in live.teams.iter() {
            // A slot keeps the identity it had the first time it showed up
            // with players; later roster churn does not re-register it.
            if self.registered.contains_key(index) || state.members.is_empty() {
                continue;
            }

            let players: Vec<String> = state
                .members
                .iter()
                .filter(|member| match_.players.iter().any(|player| player.steam_id == **member))
                .cloned()
                .collect();

            let team = Team {
                name: state.clan_name.clone(),
                handle: state.handle,
                players,
            };
            tracing::info!(
                "Detected team {} in match - {} players",
                team.name,
                team.players.len()
            );
            self.registered.insert(*index, team);
        }

        match_.teams = self.registered.values().cloned().collect();

        Ok(())
    }

    #[tracing::instrument(name = "Teams", skip_all)]
    async fn save_data(
        &mut self,
        match_: &mut Match,
        storage: &dyn MatchStorage,
    ) -> Result<(), StorageError> {
        for team in match_.teams.iter() {
            storage.save_team(&match_.external_id, team).await?;
            for steam_id in team.players.iter() {
                storage
                    .link_player_team(steam_id, &match_.external_id, team.handle)
                    .await?;
            }
        }
        Ok(())
    }
}
