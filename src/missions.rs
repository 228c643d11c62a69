use serde::Serialize;

/// One selectable scenario. The catalog is fixed at build time; the running
/// server only ever references entries by id.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct MissionEntry {
    pub id: &'static str,
    pub name: &'static str,
}

pub const CATALOG: &[MissionEntry] = &[
    // Everon
    MissionEntry { id: "{ECC61978EDCC2B5A}Missions/23_Campaign.conf", name: "Conflict — Everon" },
    MissionEntry { id: "{C700DB41F0C546E1}Missions/23_Campaign_NorthCentral.conf", name: "Conflict — Northern Everon" },
    MissionEntry { id: "{28802845ADA64D52}Missions/23_Campaign_SWCoast.conf", name: "Conflict — Southern Everon" },
    MissionEntry { id: "{94992A3D7CE4FF8A}Missions/23_Campaign_Western.conf", name: "Conflict — Western Everon" },
    MissionEntry { id: "{FDE33AFE2ED7875B}Missions/23_Campaign_Montignac.conf", name: "Conflict — Montignac" },
    MissionEntry { id: "{0220741028718E7F}Missions/23_Campaign_HQC_Everon.conf", name: "Conflict: HQ Commander — Everon" },
    MissionEntry { id: "{59AD59368755F41A}Missions/21_GM_Eden.conf", name: "Game Master — Everon" },
    MissionEntry { id: "{DFAC5FABD11F2390}Missions/26_CombatOpsEveron.conf", name: "Combat Ops — Everon" },
    // Capture & Hold
    MissionEntry { id: "{3F2E005F43DBD2F8}Missions/CAH_Briars_Coast.conf", name: "Capture & Hold — Briars Coast" },
    MissionEntry { id: "{F1A1BEA67132113E}Missions/CAH_Castle.conf", name: "Capture & Hold — Montfort Castle" },
    MissionEntry { id: "{589945FB9FA7B97D}Missions/CAH_Concrete_Plant.conf", name: "Capture & Hold — Concrete Plant" },
    MissionEntry { id: "{9405201CBD22A30C}Missions/CAH_Factory.conf", name: "Capture & Hold — Almara Factory" },
    MissionEntry { id: "{1CD06B409C6FAE56}Missions/CAH_Forest.conf", name: "Capture & Hold — Simon's Wood" },
    MissionEntry { id: "{7C491B1FCC0FF0E1}Missions/CAH_LeMoule.conf", name: "Capture & Hold — Le Moule" },
    MissionEntry { id: "{6EA2E454519E5869}Missions/CAH_Military_Base.conf", name: "Capture & Hold — Camp Blake" },
    // Showcase / SP
    MissionEntry { id: "{C47A1A6245A13B26}Missions/SP01_ReginaV2.conf", name: "Elimination" },
    MissionEntry { id: "{0648CDB32D6B02B3}Missions/SP02_AirSupport.conf", name: "Air Support" },
    // Arland
    MissionEntry { id: "{C41618FD18E9D714}Missions/23_Campaign_Arland.conf", name: "Conflict — Arland" },
    MissionEntry { id: "{68D1240A11492545}Missions/23_Campaign_HQC_Arland.conf", name: "Conflict: HQ Commander — Arland" },
    MissionEntry { id: "{2BBBE828037C6F4B}Missions/22_GM_Arland.conf", name: "Game Master — Arland" },
    MissionEntry { id: "{DAA03C6E6099D50F}Missions/24_CombatOps.conf", name: "Combat Ops — Arland" },
    // Kolguyev
    MissionEntry { id: "{F45C6C15D31252E6}Missions/27_GM_Cain.conf", name: "Game Master — Kolguyev" },
    MissionEntry { id: "{BB5345C22DD2B655}Missions/23_Campaign_HQC_Cain.conf", name: "Conflict: HQ Commander — Kolguyev" },
    MissionEntry { id: "{CB347F2F10065C9C}Missions/CombatOpsCain.conf", name: "Combat Ops — Kolguyev" },
    MissionEntry { id: "{2B4183DF23E88249}Missions/CAH_Morton.conf", name: "Capture & Hold — Morton" },
    // Operation Omega
    MissionEntry { id: "{10B8582BAD9F7040}Missions/Scenario01_Intro.conf", name: "Operation Omega 01: Over The Hills And Far Away" },
    MissionEntry { id: "{1D76AF6DC4DF0577}Missions/Scenario02_Steal.conf", name: "Operation Omega 02: Radio Check" },
    MissionEntry { id: "{D1647575BCEA5A05}Missions/Scenario03_Villa.conf", name: "Operation Omega 03: Light In The Dark" },
    MissionEntry { id: "{6D224A109B973DD8}Missions/Scenario04_Sabotage.conf", name: "Operation Omega 04: Red Silence" },
    MissionEntry { id: "{FA2AB0181129CB16}Missions/Scenario05_Hill.conf", name: "Operation Omega 05: Cliffhanger" },
    // RHS — Status Quo (requires mod)
    MissionEntry { id: "{AAD43C10045857C1}Missions/RHS_Conflict.conf", name: "RHS — Conflict Everon" },
    MissionEntry { id: "{B694A77592CB69E0}Missions/RHS_ConflictWithoutAIs.conf", name: "RHS — Conflict Everon (No AI)" },
    MissionEntry { id: "{9909DB7ECEA05535}Missions/RHS_Conflict_East.conf", name: "RHS — Conflict Everon East" },
    MissionEntry { id: "{2F5DD5ACC14120A9}Missions/RHS_Conflict_NorthCentral.conf", name: "RHS — Conflict Everon North Central" },
    MissionEntry { id: "{57B154A20B8B283E}Missions/RHS_Conflict_SWCoast.conf", name: "RHS — Conflict Everon SW Coast" },
    MissionEntry { id: "{367A7800D147878A}Missions/RHS_Conflict_West.conf", name: "RHS — Conflict Everon West" },
    MissionEntry { id: "{7577640CD42A00BD}Missions/RHS_Conflict_Arland.conf", name: "RHS — Conflict Arland" },
    MissionEntry { id: "{C5EAD55037EB4751}Missions/RHS_CombatOps_MSV.conf", name: "RHS — Combat Ops Arland (MSV vs FIA)" },
    MissionEntry { id: "{D10B11A71A36FCF5}Missions/RHS_CombatOps_USMC_vs_MSV.conf", name: "RHS — Combat Ops Arland (USMC vs MSV)" },
    MissionEntry { id: "{68A6FBF43B801FF6}Missions/RHS_ShowcaseBasic.conf", name: "RHS — Showcase Mission" },
    MissionEntry { id: "{217436B52D34E4BD}Missions/RHS_Showcase_GM.conf", name: "RHS — Showcase Mission (Game Master)" },
];

pub fn lookup(scenario_id: &str) -> Option<&'static str> {
    CATALOG
        .iter()
        .find(|mission| mission.id == scenario_id)
        .map(|mission| mission.name)
}

pub fn is_known(scenario_id: &str) -> bool {
    lookup(scenario_id).is_some()
}

/// Resolves a scenario id to a display name. Unknown path-like ids fall back
/// to the trailing path segment with the `.conf` suffix stripped.
pub fn map_name(scenario_id: &str) -> String {
    if scenario_id.is_empty() {
        return "Unknown".to_string();
    }
    if let Some(name) = lookup(scenario_id) {
        return name.to_string();
    }
    let tail = scenario_id.rsplit('/').next().unwrap_or(scenario_id);
    tail.strip_suffix(".conf").unwrap_or(tail).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_id_resolves_to_display_name() {
        assert_eq!(
            map_name("{ECC61978EDCC2B5A}Missions/23_Campaign.conf"),
            "Conflict — Everon"
        );
    }

    #[test]
    fn unknown_path_like_id_falls_back_to_trailing_segment() {
        assert_eq!(map_name("Missions/Foo.conf"), "Foo");
    }

    #[test]
    fn empty_id_is_unknown() {
        assert_eq!(map_name(""), "Unknown");
    }

    #[test]
    fn catalog_ids_are_unique() {
        let mut ids: Vec<&str> = CATALOG.iter().map(|mission| mission.id).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), CATALOG.len());
    }
}
