//! Content loading and session setup shared between district_cli and district_daemon.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use district_core::{
    rank_entries, ActionRule, ArenaDef, Building, BuildingKind, Constants, Counters, District,
    DistrictDef, Difficulty, EnergyBoostDef, EventLog, GameContent, GameState, HealTier,
    HealTierDef, MetaState, Player, PlayerSeed, RestTier, RestTierDef, Role, SeasonalLeader,
    Severity, ShopDef, WorldState,
};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::collections::{BTreeSet, HashSet};
use std::path::Path;

#[derive(Deserialize)]
struct ActionsFile {
    content_version: String,
    actions: Vec<ActionRule>,
}

#[derive(Deserialize)]
struct BuildingsFile {
    layout: Vec<Building>,
    hotel: Vec<RestTierDef>,
    hospital: Vec<HealTierDef>,
    energy_boost: EnergyBoostDef,
    shop: ShopDef,
    arena: ArenaDef,
}

#[derive(Deserialize)]
struct DistrictsFile {
    districts: Vec<DistrictDef>,
    #[serde(default)]
    seasonal_leaderboard: Vec<SeasonalLeader>,
    player: PlayerSeed,
}

/// Validates cross-references in loaded content, panicking on any authoring error.
///
/// Catches mistakes like: a role with no actions, a building placed off the
/// map, or a player seed pointing at a district that does not exist.
pub fn validate_content(content: &GameContent) {
    let c = &content.constants;
    assert!(c.influence_xp_divisor > 0, "influence_xp_divisor must be positive");
    assert!(c.event_log_capacity > 0, "event_log_capacity must be positive");
    assert!(
        c.spawn.x < c.map_width && c.spawn.y < c.map_height,
        "spawn ({}, {}) is outside the {}x{} map",
        c.spawn.x,
        c.spawn.y,
        c.map_width,
        c.map_height,
    );

    // Role actions: unique per role, every role playable.
    let mut seen = HashSet::new();
    for rule in &content.actions {
        assert!(
            seen.insert((rule.role, rule.action)),
            "action {:?} is defined twice for {:?}",
            rule.action,
            rule.role,
        );
        assert!(
            rule.message.contains("{reward}"),
            "action {:?} message has no {{reward}} placeholder",
            rule.action,
        );
    }
    for role in Role::ALL {
        assert!(
            content.actions.iter().any(|r| r.role == role),
            "role {role:?} has no actions",
        );
    }

    // Building layout: inside the map, one per tile, one per kind.
    let mut tiles = HashSet::new();
    let mut kinds: HashSet<BuildingKind> = HashSet::new();
    for building in &content.buildings {
        let p = building.position;
        assert!(
            p.x < c.map_width && p.y < c.map_height,
            "building '{}' at ({}, {}) is outside the map",
            building.name,
            p.x,
            p.y,
        );
        assert!(tiles.insert(p), "two buildings share tile ({}, {})", p.x, p.y);
        assert!(kinds.insert(building.kind), "building kind '{}' placed twice", building.kind);
    }

    // Tier tables cover every tier the commands can name.
    for tier in [RestTier::Quick, RestTier::Full, RestTier::Luxury] {
        assert!(
            content.hotel.iter().any(|d| d.tier == tier),
            "hotel tier {tier:?} is not priced",
        );
    }
    for tier in [HealTier::Basic, HealTier::Advanced, HealTier::Full] {
        assert!(
            content.hospital.iter().any(|d| d.tier == tier),
            "hospital tier {tier:?} is not priced",
        );
    }
    for difficulty in [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard] {
        assert!(
            content.arena.battles.iter().any(|b| b.difficulty == difficulty),
            "arena difficulty {difficulty:?} is not defined",
        );
    }
    for threshold in [content.arena.win_threshold, content.arena.leader.win_threshold] {
        assert!(
            (0.0..1.0).contains(&threshold),
            "arena win threshold {threshold} is outside [0, 1)",
        );
    }

    // Districts: unique ids, indices in range, the player starts somewhere real.
    let mut ids = HashSet::new();
    for district in &content.districts {
        assert!(ids.insert(district.id), "district id {} is used twice", district.id);
        assert!(
            district.crime <= 100 && district.prosperity <= 100,
            "district '{}' has an index above 100",
            district.name,
        );
    }
    assert!(
        ids.contains(&content.player.district),
        "player starts in unknown district {}",
        content.player.district,
    );
}

fn read_json<T: DeserializeOwned>(dir: &Path, file: &str) -> Result<T> {
    let text = std::fs::read_to_string(dir.join(file)).with_context(|| format!("reading {file}"))?;
    serde_json::from_str(&text).with_context(|| format!("parsing {file}"))
}

pub fn load_content(content_dir: &str) -> Result<GameContent> {
    let dir = Path::new(content_dir);
    let constants: Constants = read_json(dir, "constants.json")?;
    let actions: ActionsFile = read_json(dir, "actions.json")?;
    let buildings: BuildingsFile = read_json(dir, "buildings.json")?;
    let districts: DistrictsFile = read_json(dir, "districts.json")?;
    let content = GameContent {
        content_version: actions.content_version,
        actions: actions.actions,
        hotel: buildings.hotel,
        hospital: buildings.hospital,
        energy_boost: buildings.energy_boost,
        shop: buildings.shop,
        arena: buildings.arena,
        districts: districts.districts,
        seasonal_leaderboard: districts.seasonal_leaderboard,
        buildings: buildings.layout,
        player: districts.player,
        constants,
    };
    validate_content(&content);
    Ok(content)
}

/// Fresh session: every district stamped with the shared building layout,
/// the player at spawn in their seed district with no role chosen.
pub fn build_initial_state(content: &GameContent, seed: u64, now: DateTime<Utc>) -> GameState {
    let c = &content.constants;
    let p = &content.player;

    let districts = content
        .districts
        .iter()
        .map(|def| {
            let mut leaderboard = def.leaderboard.clone();
            rank_entries(&mut leaderboard);
            District {
                id: def.id,
                name: def.name.clone(),
                crime: def.crime,
                prosperity: def.prosperity,
                world_state: WorldState::Neutral,
                leaderboard,
                buildings: content.buildings.clone(),
            }
        })
        .collect();

    let mut log = EventLog::new(c.event_log_capacity);
    log.push("Game started!", Severity::Info);

    GameState {
        meta: MetaState {
            tick: 0,
            seed,
            content_version: content.content_version.clone(),
        },
        player: Player {
            role: None,
            crown: p.crown,
            emz: 0,
            health: p.health,
            max_health: p.health,
            energy: p.energy,
            max_energy: p.energy,
            xp: 0,
            max_xp: p.max_xp,
            influence: 0,
            position: c.spawn,
            inventory: p.inventory.clone(),
            district_id: p.district,
            badges: BTreeSet::new(),
            season_pass_active: false,
            season_pass_expiry: None,
        },
        districts,
        world_state: WorldState::Neutral,
        world_state_updated_at: now,
        seasonal_leaderboard: content.seasonal_leaderboard.clone(),
        season_pass_price: c.season_pass_price,
        seasonal_reward_pool: 0,
        log,
        counters: Counters { next_event_id: 0 },
    }
}
