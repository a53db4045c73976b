use common::Player;

use super::*;
use crate::demo::GameEvent;

pub struct Players {
    seen: std::collections::HashSet<String>,
}

impl Players {
    pub fn new() -> Self {
        Self {
            seen: std::collections::HashSet::new(),
        }
    }
}

impl Default for Players {
    fn default() -> Self {
        Self::new()
    }
}

/// Platform ids are 17 decimal digits. Bots and spectator slots report
/// placeholders like `BOT`, which must never become global players.
fn is_platform_id(raw: &str) -> bool {
    let mut run = 0;
    for byte in raw.bytes() {
        if byte.is_ascii_digit() {
            run += 1;
            if run >= 17 {
                return true;
            }
        } else {
            run = 0;
        }
    }
    false
}

#[async_trait::async_trait]
impl Detector for Players {
    fn name(&self) -> &'static str {
        "Players"
    }

    fn save_priority(&self) -> u32 {
        1000
    }

    async fn process(
        &mut self,
        match_: &mut Match,
        live: &LiveState,
        event: &DemoEvent,
        storage: &dyn MatchStorage,
    ) -> Result<(), StorageError> {
        if !matches!(event, DemoEvent::Game(GameEvent::RoundStart)) {
            return Ok(());
        }

        for state in live.players.values() {
            let steam_id = state.steam_id.as_str();
            if self.seen.contains(steam_id) || !is_platform_id(steam_id) {
                continue;
            }
            self.seen.insert(steam_id.to_owned());

            let player = match storage.find_player(steam_id).await? {
                Some(existing) => existing,
                None => {
                    let created = Player {
                        steam_id: steam_id.to_owned(),
                    };
                    storage.upsert_player(&created).await?;
                    created
                }
            };

            tracing::info!("Detected player {} in match", steam_id);
            match_.players.push(player);
        }

        Ok(())
    }

    #[tracing::instrument(name = "Players", skip_all)]
    async fn save_data(
        &mut self,
        match_: &mut Match,
        storage: &dyn MatchStorage,
    ) -> Result<(), StorageError> {
        for player in match_.players.iter() {
            storage.upsert_player(player).await?;
        }
        storage
            .save_match_players(&match_.external_id, &match_.players)
            .await
    }
}
