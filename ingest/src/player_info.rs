use common::{Player, PlayerInfo, Weapon};

use crate::demo::{LiveState, PlayerState};

static WEAPON_CLASSES: phf::Map<&'static str, Weapon> = phf::phf_map! {
    "weapon_ak47" => Weapon::AK47,
    "weapon_aug" => Weapon::AUG,
    "weapon_awp" => Weapon::AWP,
    "weapon_bizon" => Weapon::PPBizon,
    "weapon_c4" => Weapon::C4,
    "weapon_cz75a" => Weapon::CZ75,
    "weapon_deagle" => Weapon::DesertEagle,
    "weapon_decoy" => Weapon::Decoy,
    "weapon_elite" => Weapon::DualBerettas,
    "weapon_famas" => Weapon::Famas,
    "weapon_fiveseven" => Weapon::FiveSeven,
    "weapon_flashbang" => Weapon::Flashbang,
    "weapon_g3sg1" => Weapon::G3SG1,
    "weapon_galilar" => Weapon::Galil,
    "weapon_glock" => Weapon::Glock,
    "weapon_healthshot" => Weapon::Healthshot,
    "weapon_hegrenade" => Weapon::HEGrenade,
    "weapon_hkp2000" => Weapon::P2000,
    "weapon_incgrenade" => Weapon::IncendiaryGrenade,
    "weapon_knife" => Weapon::Knife,
    "weapon_knifegg" => Weapon::Knife,
    "weapon_m249" => Weapon::M249,
    "weapon_m4a1" => Weapon::M4A4,
    "weapon_m4a1_silencer" => Weapon::M4A1S,
    "weapon_mac10" => Weapon::MAC10,
    "weapon_mag7" => Weapon::Mag7,
    "weapon_molotov" => Weapon::Molotov,
    "weapon_mp5sd" => Weapon::MP5,
    "weapon_mp7" => Weapon::MP7,
    "weapon_mp9" => Weapon::MP9,
    "weapon_negev" => Weapon::Negev,
    "weapon_nova" => Weapon::Nova,
    "weapon_p250" => Weapon::P250,
    "weapon_p90" => Weapon::P90,
    "weapon_revolver" => Weapon::R8Revolver,
    "weapon_sawedoff" => Weapon::SawedOff,
    "weapon_scar20" => Weapon::SCAR20,
    "weapon_sg556" => Weapon::SG556,
    "weapon_smokegrenade" => Weapon::SmokeGrenade,
    "weapon_ssg08" => Weapon::SSG08,
    "weapon_tagrenade" => Weapon::TAGrenade,
    "weapon_taser" => Weapon::Taser,
    "weapon_tec9" => Weapon::Tec9,
    "weapon_ump45" => Weapon::UMP45,
    "weapon_usp_silencer" => Weapon::USP,
    "weapon_xm1014" => Weapon::XM1014,
};

/// Unknown class names are reported and mapped to `None` rather than failing
/// the record that carries them.
pub fn translate_weapon(class_name: &str) -> Option<Weapon> {
    if let Some(weapon) = WEAPON_CLASSES.get(class_name) {
        return Some(*weapon);
    }

    // Skin variants carry their own class names.
    if class_name.contains("weapon_knife") || class_name.contains("weapon_bayonet") {
        return Some(Weapon::Knife);
    }

    tracing::error!("Unknown weapon - {}", class_name);
    None
}

/// Snapshot a participant at the current tick, linked to its persistent
/// player when the steam id matches one in the match player set.
pub fn create(live: &LiveState, state: &PlayerState, players: &[Player]) -> PlayerInfo {
    PlayerInfo {
        player: players
            .iter()
            .find(|player| player.steam_id == state.steam_id)
            .map(|player| player.steam_id.clone()),
        position: state.position.clone(),
        health: state.health,
        armour: state.armour,
        cash_spent_in_round: state.cash_spent_in_round,
        equipment_value: state.equipment_value,
        freeze_time_end_equipment_value: state.freeze_time_end_equipment_value,
        has_c4: state.has_c4,
        is_scoped: state.is_scoped,
        weapon: state.weapon.as_deref().and_then(translate_weapon),
        bullets_in_magazine: if state.weapon.is_some() { state.clip_ammo } else { 0 },
        tick: live.current_tick,
    }
}
