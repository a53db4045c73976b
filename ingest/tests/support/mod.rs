#![allow(dead_code)]

use std::sync::Arc;

use common::{Match, MatchType, Position};
use ingest::demo::{DecodeError, DemoEvent, DemoHeader, GameEvent, PlayerState, TeamState};
use ingest::storage::MatchStorage;
use ingest::{DemoSession, HandleError};

pub const MATCH_ID: &str = "faceit-5v5-0001";
pub const MAP: &str = "de_mirage";

/// Handle of the side entity team Alpha is first seen on.
pub const ALPHA_HANDLE: i64 = 101;
/// Handle of the side entity team Bravo is first seen on.
pub const BRAVO_HANDLE: i64 = 102;

pub fn steam_id(n: u32) -> String {
    format!("765611980000000{:02}", n)
}

pub fn player_state(user_id: i32, steam_id: &str, weapon: &str) -> PlayerState {
    PlayerState {
        user_id,
        steam_id: steam_id.to_owned(),
        name: format!("player-{}", user_id),
        position: Position::new(100.0 + user_id as f32, 200.0 + user_id as f32 * 2.0, 8.0),
        health: 100,
        armour: 100,
        cash_spent_in_round: 2700,
        equipment_value: 3900,
        freeze_time_end_equipment_value: 4100,
        has_c4: false,
        is_scoped: false,
        weapon: Some(weapon.to_owned()),
        clip_ammo: 17,
    }
}

pub fn shell() -> Match {
    Match::shell(MATCH_ID, MatchType::Faceit, Some("hub-europe".to_owned()))
}

pub async fn run(
    events: Vec<Result<DemoEvent, DecodeError>>,
    storage: Arc<dyn MatchStorage>,
) -> Result<Match, HandleError> {
    DemoSession::new(storage).run(events, shell()).await
}

pub struct StreamBuilder {
    events: Vec<Result<DemoEvent, DecodeError>>,
    tick: u32,
}

impl StreamBuilder {
    pub fn new() -> Self {
        Self {
            events: vec![Ok(DemoEvent::Start(DemoHeader {
                map: MAP.to_owned(),
                tick_rate: 64.0,
                playback_ticks: 400_000,
            }))],
            tick: 0,
        }
    }

    pub fn tick(&self) -> u32 {
        self.tick
    }

    pub fn advance(&mut self, ticks: u32) -> &mut Self {
        self.tick += ticks;
        self.push(DemoEvent::Tick(self.tick))
    }

    pub fn push(&mut self, event: DemoEvent) -> &mut Self {
        self.events.push(Ok(event));
        self
    }

    pub fn game(&mut self, event: GameEvent) -> &mut Self {
        self.push(DemoEvent::Game(event))
    }

    pub fn player(&mut self, state: PlayerState) -> &mut Self {
        self.push(DemoEvent::PlayerUpdate(state))
    }

    pub fn team(
        &mut self,
        index: usize,
        team_number: i32,
        clan_name: &str,
        handle: i64,
        members: &[String],
    ) -> &mut Self {
        self.push(DemoEvent::TeamUpdate(TeamState {
            index,
            team_number,
            clan_name: clan_name.to_owned(),
            handle,
            members: members.to_vec(),
        }))
    }

    pub fn bomb(&mut self, position: Option<Position>) -> &mut Self {
        self.push(DemoEvent::BombUpdate(position))
    }

    pub fn finish(mut self) -> Vec<Result<DemoEvent, DecodeError>> {
        self.events.push(Ok(DemoEvent::End));
        self.events
    }

    /// A stream that dies without its end signal.
    pub fn finish_truncated(self) -> Vec<Result<DemoEvent, DecodeError>> {
        self.events
    }

    pub fn finish_with_decode_failure(mut self, message: &str) -> Vec<Result<DemoEvent, DecodeError>> {
        self.events.push(Err(DecodeError(message.to_owned())));
        self.events
    }
}

pub fn alpha_members() -> Vec<String> {
    (1..=5).map(steam_id).collect()
}

pub fn bravo_members() -> Vec<String> {
    (6..=10).map(steam_id).collect()
}

/// Connect the ten fixture participants, users 0-4 on Alpha and 5-9 on
/// Bravo, all holding `weapon`.
pub fn connect_players(stream: &mut StreamBuilder, weapon: &str) {
    for user_id in 0..10 {
        stream.player(player_state(user_id, &steam_id(user_id as u32 + 1), weapon));
    }
}

pub fn first_half_teams(stream: &mut StreamBuilder) {
    stream.team(1, 2, "Alpha", ALPHA_HANDLE, &alpha_members());
    stream.team(2, 3, "Bravo", BRAVO_HANDLE, &bravo_members());
}

pub fn second_half_teams(stream: &mut StreamBuilder) {
    stream.team(1, 2, "Bravo", ALPHA_HANDLE, &bravo_members());
    stream.team(2, 3, "Alpha", BRAVO_HANDLE, &alpha_members());
}

fn death(victim: i32, attacker: i32, assister: Option<i32>, kill_index: u32) -> GameEvent {
    GameEvent::PlayerDeath {
        victim,
        attacker: Some(attacker),
        assister,
        through_smoke: kill_index % 5 == 0,
        penetrated: if kill_index % 4 == 0 { 1 } else { 0 },
        attacker_blind: kill_index % 6 == 0,
    }
}

fn alpha_wins(round: u32) -> bool {
    round <= 9 || (16..=22).contains(&round)
}

/// The reference 31-round match: one knife round, 15 + 15 scored rounds
/// around a halftime swap, 207 kills in total, one interstitial zero-kill
/// round and one round that never ends. Alpha takes 16 scored rounds,
/// Bravo 14.
pub fn full_match_stream() -> Vec<Result<DemoEvent, DecodeError>> {
    let mut stream = StreamBuilder::new();
    stream.advance(100);
    connect_players(&mut stream, "weapon_knife");
    first_half_teams(&mut stream);

    // Warmup death; no round is open yet, so it must be dropped.
    stream.advance(50).game(death(5, 0, None, 0));

    // Knife round. The round ends before any team is registered, so it gets
    // no winner attribution.
    stream.advance(100).game(GameEvent::RoundStart);
    for kill in 0..9u32 {
        let attacker = (kill % 5) as i32;
        let victim = 5 + ((kill + 2) % 5) as i32;
        stream.advance(40).game(death(victim, attacker, None, kill));
    }
    stream.advance(60).game(GameEvent::RoundEnd { reason: 9, winner: 2 });
    stream.advance(30).game(GameEvent::RoundOfficiallyEnded);

    // Buy rounds from here on.
    connect_players(&mut stream, "weapon_ak47");

    for round in 1..=30u32 {
        if round == 16 {
            stream.game(GameEvent::RoundAnnounceLastRoundHalf);
            second_half_teams(&mut stream);
        }

        stream.advance(200).game(GameEvent::RoundStart);

        let kills = if round <= 18 { 7 } else { 6 };
        let (attackers, victims): (i32, i32) = if alpha_wins(round) { (0, 5) } else { (5, 0) };
        for kill in 0..kills {
            let attacker = attackers + (kill % 5) as i32;
            let victim = victims + ((kill + round) % 5) as i32;
            let assister = (kill % 3 == 2).then(|| attackers + ((kill + 1) % 5) as i32);
            stream.advance(40).game(death(victim, attacker, assister, kill));
        }

        // The Alpha T side plants in its first-half wins; the bomb entity
        // disappears before the explosion is reported.
        let reason = if alpha_wins(round) && round <= 9 {
            let site = Position::new(-320.0, 1480.0, 12.0);
            stream.advance(20).bomb(Some(site.clone()));
            stream.game(GameEvent::BombPlanted {
                user: Some(0),
                site: Some("A".to_owned()),
            });
            stream.advance(320).bomb(None);
            stream.game(GameEvent::BombExploded {
                user: Some(0),
                site: Some("A".to_owned()),
            });
            1
        } else if alpha_wins(round) {
            8
        } else {
            9
        };

        let winner = match (alpha_wins(round), round <= 15) {
            (true, true) | (false, false) => 2,
            _ => 3,
        };
        stream.advance(60).game(GameEvent::RoundEnd { reason, winner });
        stream.advance(30).game(GameEvent::RoundOfficiallyEnded);
    }

    // Interstitial config round without kills; must not be persisted.
    stream.advance(120).game(GameEvent::RoundStart);
    stream.advance(40).game(GameEvent::RoundEnd { reason: 10, winner: 2 });
    stream.advance(20).game(GameEvent::RoundOfficiallyEnded);

    // Map-vote round that never concludes.
    stream.advance(80).game(GameEvent::RoundStart);

    stream.finish()
}
