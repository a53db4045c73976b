use std::sync::Arc;

use ingest::demo::GameEvent;
use ingest::storage::MemoryStorage;
use pretty_assertions::assert_eq;

mod support;

use support::{
    alpha_members, bravo_members, connect_players, player_state, run, steam_id, StreamBuilder,
    ALPHA_HANDLE, BRAVO_HANDLE, MATCH_ID,
};

fn scored_round(stream: &mut StreamBuilder) {
    stream.advance(200).game(GameEvent::RoundStart);
    stream.advance(40).game(GameEvent::PlayerDeath {
        victim: 5,
        attacker: Some(0),
        assister: None,
        through_smoke: false,
        penetrated: 0,
        attacker_blind: false,
    });
    stream.advance(60).game(GameEvent::RoundEnd { reason: 8, winner: 2 });
    stream.advance(30).game(GameEvent::RoundOfficiallyEnded);
}

#[tokio::test]
async fn a_slot_keeps_its_first_seen_identity() {
    let storage = Arc::new(MemoryStorage::new());

    let mut stream = StreamBuilder::new();
    stream.advance(100);
    connect_players(&mut stream, "weapon_ak47");
    stream.team(1, 2, "Alpha", ALPHA_HANDLE, &alpha_members());
    stream.team(2, 3, "Bravo", BRAVO_HANDLE, &bravo_members());

    scored_round(&mut stream);

    // The slot mutates after registration; the identity must not change.
    stream.team(1, 2, "Renamed", ALPHA_HANDLE, &bravo_members());
    scored_round(&mut stream);

    let result = run(stream.finish(), storage.clone()).await.unwrap();

    assert_eq!(2, result.teams.len());
    let alpha = result
        .teams
        .iter()
        .find(|team| team.handle == ALPHA_HANDLE)
        .unwrap();
    assert_eq!("Alpha", alpha.name);
    assert_eq!(alpha_members(), alpha.players);

    let rows = storage.teams(MATCH_ID);
    assert!(rows.iter().any(|row| row.name == "Alpha"));
    assert!(!rows.iter().any(|row| row.name == "Renamed"));
}

#[tokio::test]
async fn empty_slots_register_once_they_have_a_roster() {
    let storage = Arc::new(MemoryStorage::new());

    let mut stream = StreamBuilder::new();
    stream.advance(100);
    connect_players(&mut stream, "weapon_ak47");
    stream.team(1, 2, "Alpha", ALPHA_HANDLE, &alpha_members());
    stream.team(2, 3, "", BRAVO_HANDLE, &[]);

    scored_round(&mut stream);

    stream.team(2, 3, "Bravo", BRAVO_HANDLE, &bravo_members());
    scored_round(&mut stream);

    let result = run(stream.finish(), storage).await.unwrap();

    assert_eq!(2, result.teams.len());
    let bravo = result
        .teams
        .iter()
        .find(|team| team.handle == BRAVO_HANDLE)
        .unwrap();
    assert_eq!("Bravo", bravo.name);
    assert_eq!(5, bravo.players.len());
}

#[tokio::test]
async fn unresolved_roster_members_are_dropped() {
    let storage = Arc::new(MemoryStorage::new());

    let mut stream = StreamBuilder::new();
    stream.advance(100);
    connect_players(&mut stream, "weapon_ak47");
    stream.player(player_state(20, "BOT", "weapon_ak47"));

    let mut members = alpha_members();
    members.push("BOT".to_owned());
    // This one never connects at all.
    members.push(steam_id(42));
    stream.team(1, 2, "Alpha", ALPHA_HANDLE, &members);
    stream.team(2, 3, "Bravo", BRAVO_HANDLE, &bravo_members());

    scored_round(&mut stream);

    let result = run(stream.finish(), storage).await.unwrap();

    let alpha = result
        .teams
        .iter()
        .find(|team| team.handle == ALPHA_HANDLE)
        .unwrap();
    assert_eq!(alpha_members(), alpha.players);
}

#[tokio::test]
async fn the_reverse_player_team_relation_is_backfilled() {
    let storage = Arc::new(MemoryStorage::new());

    let mut stream = StreamBuilder::new();
    stream.advance(100);
    connect_players(&mut stream, "weapon_ak47");
    stream.team(1, 2, "Alpha", ALPHA_HANDLE, &alpha_members());
    stream.team(2, 3, "Bravo", BRAVO_HANDLE, &bravo_members());

    scored_round(&mut stream);

    run(stream.finish(), storage.clone()).await.unwrap();

    let mut links = storage.team_links(MATCH_ID);
    links.sort();
    let mut expected: Vec<(String, i64)> = alpha_members()
        .into_iter()
        .map(|steam_id| (steam_id, ALPHA_HANDLE))
        .chain(
            bravo_members()
                .into_iter()
                .map(|steam_id| (steam_id, BRAVO_HANDLE)),
        )
        .collect();
    expected.sort();
    assert_eq!(expected, links);
}
