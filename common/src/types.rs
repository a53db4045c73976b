/// Where the match record came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum MatchType {
    Matchmaking,
    Faceit,
    Esea,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum RoundType {
    Knife,
    Normal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum BombStatusType {
    Planted,
    Defused,
    Exploded,
    Dropped,
    PickedUp,
    StartDefuse,
    StopDefuse,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum RoundEndReason {
    StillInProgress,
    BombExploded,
    VipEscaped,
    VipKilled,
    TSaved,
    CtStoppedEscape,
    RoundEndReasonTerroristsStopped,
    BombDefused,
    TKilled,
    CTKilled,
    Draw,
    HostageRescued,
    TimeRanOut,
    RoundEndReasonHostagesNotRescued,
    TerroristsNotEscaped,
    VipNotEscaped,
    GameStart,
    TSurrender,
    CTSurrender,
    TPlanted,
    CTReachedHostage,
}

// https://github.com/markus-wa/demoinfocs-golang/blob/205b0bb25e9f3e96e1d306d154199b4a6292940e/pkg/demoinfocs/events/events.go#L53
pub static ROUND_END_REASON: phf::Map<i32, RoundEndReason> = phf::phf_map! {
    0_i32 => RoundEndReason::StillInProgress,
    1_i32 => RoundEndReason::BombExploded,
    2_i32 => RoundEndReason::VipEscaped,
    3_i32 => RoundEndReason::VipKilled,
    4_i32 => RoundEndReason::TSaved,
    5_i32 => RoundEndReason::CtStoppedEscape,
    6_i32 => RoundEndReason::RoundEndReasonTerroristsStopped,
    7_i32 => RoundEndReason::BombDefused,
    8_i32 => RoundEndReason::TKilled,
    9_i32 => RoundEndReason::CTKilled,
    10_i32 => RoundEndReason::Draw,
    11_i32 => RoundEndReason::HostageRescued,
    12_i32 => RoundEndReason::TimeRanOut,
    13_i32 => RoundEndReason::RoundEndReasonHostagesNotRescued,
    14_i32 => RoundEndReason::TerroristsNotEscaped,
    15_i32 => RoundEndReason::VipNotEscaped,
    16_i32 => RoundEndReason::GameStart,
    17_i32 => RoundEndReason::TSurrender,
    18_i32 => RoundEndReason::CTSurrender,
    19_i32 => RoundEndReason::TPlanted,
    20_i32 => RoundEndReason::CTReachedHostage,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Weapon {
    AK47,
    AUG,
    AWP,
    C4,
    CZ75,
    Decoy,
    DesertEagle,
    DualBerettas,
    Famas,
    FiveSeven,
    Flashbang,
    G3SG1,
    Galil,
    Glock,
    HEGrenade,
    Healthshot,
    IncendiaryGrenade,
    Knife,
    M249,
    M4A1S,
    M4A4,
    MAC10,
    MP5,
    MP7,
    MP9,
    Mag7,
    Molotov,
    Negev,
    Nova,
    P2000,
    P250,
    P90,
    PPBizon,
    R8Revolver,
    SCAR20,
    SG556,
    SSG08,
    SawedOff,
    SmokeGrenade,
    TAGrenade,
    Taser,
    Tec9,
    UMP45,
    USP,
    XM1014,
}
