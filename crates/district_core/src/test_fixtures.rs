//! Shared test fixtures for district_core and downstream crates.
//!
//! `base_content()` mirrors the shipped rule tables so tests exercise the real
//! numbers. `base_state()` is a fresh session in Downtown with no role chosen.

use std::collections::BTreeSet;

use chrono::{DateTime, TimeZone, Utc};
use rand::rngs::mock::StepRng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::{
    ActionKind, ActionRule, ArenaDef, BattleDef, Building, BuildingKind, Constants, Counters,
    Difficulty, District, DistrictDef, DistrictId, EnergyBoostDef, EventLog, GameContent,
    GameState, HealTier, HealTierDef, InventoryItem, ItemCategory, ItemId, LeaderChallengeDef,
    MetaState, OpponentDef, OpponentId, Player, PlayerSeed, Position, RestTier, RestTierDef,
    Restore, Role, Severity, ShopDef, ShopDiscountDef, ShopItemDef, WorldState,
};

#[allow(clippy::too_many_arguments)]
fn action(
    role: Role,
    action: ActionKind,
    name: &str,
    energy_cost: u32,
    reward: (u64, u64),
    xp: u32,
    deltas: (i32, i32),
    message: &str,
) -> ActionRule {
    ActionRule {
        role,
        action,
        name: name.to_string(),
        energy_cost,
        reward_min: reward.0,
        reward_spread: reward.1,
        xp,
        crime_delta: deltas.0,
        prosperity_delta: deltas.1,
        message: message.to_string(),
    }
}

fn building(kind: BuildingKind, icon: &str, x: u32, y: u32, name: &str) -> Building {
    Building {
        kind,
        icon: icon.to_string(),
        position: Position { x, y },
        name: name.to_string(),
    }
}

fn district(id: u32, name: &str, crime: u8, prosperity: u8) -> DistrictDef {
    DistrictDef {
        id: DistrictId(id),
        name: name.to_string(),
        crime,
        prosperity,
        leaderboard: vec![],
    }
}

fn opponent(id: &str, name: &str, icon: &str, level: u32, role: Role) -> OpponentDef {
    OpponentDef {
        id: OpponentId(id.to_string()),
        name: name.to_string(),
        icon: icon.to_string(),
        level,
        role,
    }
}

fn shop_item(id: &str, icon: &str, name: &str, price: u64) -> ShopItemDef {
    ShopItemDef {
        id: ItemId(id.to_string()),
        icon: icon.to_string(),
        name: name.to_string(),
        price,
    }
}

pub fn base_constants() -> Constants {
    Constants {
        map_width: 16,
        map_height: 12,
        spawn: Position { x: 8, y: 6 },
        background_tick_secs: 5,
        drift_probability: 0.1,
        regen_probability: 0.05,
        regen_prosperity_threshold: 70,
        influence_xp_divisor: 5,
        level_max_xp_step: 20,
        level_max_health_step: 10,
        level_max_energy_step: 5,
        hotel_gangster_price_pct: 130,
        hotel_detective_price_pct: 80,
        education_price: 200,
        education_max_xp_bonus: 50,
        tax_min: 50,
        tax_spread: 100,
        travel_price: 100,
        season_pass_price: 5,
        season_pass_days: 30,
        season_pool_pct: 80,
        world_state_period_hours: 24,
        leaderboard_top_n: 10,
        event_log_capacity: 10,
    }
}

pub fn base_content() -> GameContent {
    use ActionKind::{Adapt, Bribe, Confiscate, Extort, Invest, Patrol, Report, Smuggle, Trade};
    use Role::{Civilian, Detective, Gangster};

    GameContent {
        content_version: "test".to_string(),
        actions: vec![
            action(Gangster, Extort, "Extort", 10, (50, 100), 15, (5, 0),
                "Extorted {reward} CROWN from a local business!"),
            action(Gangster, Smuggle, "Smuggle", 15, (100, 200), 25, (7, -3),
                "Smuggled goods successfully! Earned {reward} CROWN!"),
            action(Gangster, Bribe, "Bribe", 8, (30, 80), 10, (3, 0),
                "Bribed an official for {reward} CROWN in benefits!"),
            action(Detective, Patrol, "Patrol", 8, (40, 70), 12, (-4, 2),
                "Patrol successful! Earned {reward} CROWN!"),
            action(Detective, Confiscate, "Confiscate", 12, (80, 150), 20, (-6, 0),
                "Confiscated illegal goods! Earned {reward} CROWN!"),
            action(Detective, Report, "Report", 10, (50, 100), 15, (-3, 3),
                "Filed crime report. Earned {reward} CROWN!"),
            action(Civilian, Trade, "Trade", 5, (30, 60), 8, (0, 4),
                "Completed trade! Earned {reward} CROWN!"),
            action(Civilian, Invest, "Invest", 20, (150, 300), 30, (0, 8),
                "Investment paid off! Earned {reward} CROWN!"),
            action(Civilian, Adapt, "Adapt", 7, (40, 80), 12, (0, 3),
                "Adapted to market conditions! Earned {reward} CROWN!"),
        ],
        hotel: vec![
            RestTierDef {
                tier: RestTier::Quick,
                base_price: 50,
                energy: Restore::Points(20),
                health: Restore::Untouched,
            },
            RestTierDef {
                tier: RestTier::Full,
                base_price: 150,
                energy: Restore::Full,
                health: Restore::Untouched,
            },
            RestTierDef {
                tier: RestTier::Luxury,
                base_price: 300,
                energy: Restore::Full,
                health: Restore::Full,
            },
        ],
        hospital: vec![
            HealTierDef {
                tier: HealTier::Basic,
                price: 80,
                detective_price: 70,
                heal: Restore::Points(30),
            },
            HealTierDef {
                tier: HealTier::Advanced,
                price: 150,
                detective_price: 130,
                heal: Restore::Points(60),
            },
            HealTierDef {
                tier: HealTier::Full,
                price: 250,
                detective_price: 220,
                heal: Restore::Full,
            },
        ],
        energy_boost: EnergyBoostDef {
            price: 400,
            max_energy_bonus: 10,
        },
        shop: ShopDef {
            items: vec![
                shop_item("weapon", "⚔️", "Combat Knife", 200),
                shop_item("armor", "🛡️", "Body Armor", 300),
                shop_item("medkit", "💊", "Med Kit", 100),
                shop_item("gadget", "📱", "Tech Gadget", 500),
            ],
            discounts: vec![
                ShopDiscountDef {
                    role: Gangster,
                    world_state: WorldState::CrimeHub,
                    price_pct: 80,
                },
                ShopDiscountDef {
                    role: Civilian,
                    world_state: WorldState::Neutral,
                    price_pct: 85,
                },
            ],
            prosperity_bonus: 2,
        },
        arena: ArenaDef {
            battles: vec![
                BattleDef { difficulty: Difficulty::Easy, energy: 10, reward: 150, xp: 20, damage: 10 },
                BattleDef { difficulty: Difficulty::Medium, energy: 15, reward: 300, xp: 40, damage: 20 },
                BattleDef { difficulty: Difficulty::Hard, energy: 20, reward: 500, xp: 70, damage: 30 },
            ],
            leader: LeaderChallengeDef {
                energy: 30,
                reward: 1000,
                xp: 150,
                influence: 50,
                damage: 40,
                win_threshold: 0.6,
            },
            opponents: vec![
                opponent("1", "Street Fighter", "🥊", 5, Gangster),
                opponent("2", "Rookie Cop", "👮", 3, Detective),
                opponent("3", "Business Tycoon", "👔", 4, Civilian),
                opponent("4", "Veteran Gangster", "🔫", 7, Gangster),
                opponent("5", "Detective Chief", "🕵️", 6, Detective),
                opponent("6", "Elite Civilian", "💼", 5, Civilian),
            ],
            win_threshold: 0.3,
            gangster_reward_pct: 125,
            gangster_win_crime_delta: 3,
            detective_win_crime_delta: -2,
        },
        districts: vec![
            district(1, "Downtown", 45, 60),
            district(2, "Uptown", 20, 80),
            district(3, "Industrial Zone", 70, 35),
            district(4, "Waterfront", 55, 50),
            district(5, "Suburbs", 15, 85),
            district(6, "Financial District", 30, 75),
            district(7, "Old Town", 60, 40),
            district(8, "Tech Park", 25, 70),
            district(9, "Harbor District", 50, 55),
        ],
        seasonal_leaderboard: vec![],
        buildings: vec![
            building(BuildingKind::Hotel, "🏨", 2, 2, "Grand Hotel"),
            building(BuildingKind::Shop, "🏪", 13, 2, "Black Market"),
            building(BuildingKind::Hospital, "🏥", 2, 9, "City Hospital"),
            building(BuildingKind::Arena, "🏟️", 13, 9, "Combat Arena"),
            building(BuildingKind::Education, "🎓", 7, 5, "Training Center"),
            building(BuildingKind::Government, "🏛️", 8, 2, "City Hall"),
            building(BuildingKind::Commercial, "🏬", 8, 8, "Shopping Mall"),
            building(BuildingKind::Airport, "✈️", 8, 11, "Transit Station"),
        ],
        player: PlayerSeed {
            crown: 1000,
            health: 100,
            energy: 50,
            max_xp: 100,
            district: DistrictId(1),
            inventory: vec![
                InventoryItem {
                    id: ItemId("pistol".to_string()),
                    icon: "🔫".to_string(),
                    name: "Pistol".to_string(),
                    category: Some(ItemCategory::Weapon),
                },
                InventoryItem {
                    id: ItemId("medkit".to_string()),
                    icon: "💊".to_string(),
                    name: "Med Kit".to_string(),
                    category: Some(ItemCategory::Item),
                },
            ],
        },
        constants: base_constants(),
    }
}

/// Fixed session start used by every fixture.
pub fn epoch() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap()
}

pub fn base_state(content: &GameContent) -> GameState {
    let seed = &content.player;
    let mut log = EventLog::new(content.constants.event_log_capacity);
    log.push("Game started!", Severity::Info);

    GameState {
        meta: MetaState {
            tick: 0,
            seed: 42,
            content_version: content.content_version.clone(),
        },
        player: Player {
            role: None,
            crown: seed.crown,
            emz: 0,
            health: seed.health,
            max_health: seed.health,
            energy: seed.energy,
            max_energy: seed.energy,
            xp: 0,
            max_xp: seed.max_xp,
            influence: 0,
            position: content.constants.spawn,
            inventory: seed.inventory.clone(),
            district_id: seed.district,
            badges: BTreeSet::new(),
            season_pass_active: false,
            season_pass_expiry: None,
        },
        districts: content
            .districts
            .iter()
            .map(|d| District {
                id: d.id,
                name: d.name.clone(),
                crime: d.crime,
                prosperity: d.prosperity,
                world_state: WorldState::Neutral,
                leaderboard: d.leaderboard.clone(),
                buildings: content.buildings.clone(),
            })
            .collect(),
        world_state: WorldState::Neutral,
        world_state_updated_at: epoch(),
        seasonal_leaderboard: content.seasonal_leaderboard.clone(),
        season_pass_price: content.constants.season_pass_price,
        seasonal_reward_pool: 0,
        log,
        counters: Counters { next_event_id: 0 },
    }
}

/// `base_state` with a role already chosen.
pub fn state_with_role(content: &GameContent, role: Role) -> GameState {
    let mut state = base_state(content);
    state.player.role = Some(role);
    state
}

pub fn make_rng() -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(42)
}

/// Generator whose every `f64` draw is exactly `0.5`.
pub fn half_rng() -> StepRng {
    StepRng::new(1 << 63, 0)
}

/// Generator whose every `f64` draw is `0.0`: battles lose, chances hit.
pub fn low_rng() -> StepRng {
    StepRng::new(0, 0)
}

/// Generator whose every `f64` draw is just below `1.0`.
pub fn high_rng() -> StepRng {
    StepRng::new(u64::MAX, 0)
}

