//! Type definitions for `district_core`.
//!
//! All public state, command, event, and content types used by the game core.

use std::collections::{BTreeSet, VecDeque};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// ID newtypes
// ---------------------------------------------------------------------------

macro_rules! string_id {
    ($name:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name(pub String);

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

string_id!(EventId);
string_id!(ItemId);
string_id!(OpponentId);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DistrictId(pub u32);

impl std::fmt::Display for DistrictId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Core enums
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Gangster,
    Detective,
    Civilian,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Gangster, Role::Detective, Role::Civilian];

    pub fn badge(self) -> &'static str {
        match self {
            Role::Gangster => "🔫 Gangster",
            Role::Detective => "👮 Detective",
            Role::Civilian => "👔 Civilian",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Role::Gangster => "gangster",
            Role::Detective => "detective",
            Role::Civilian => "civilian",
        }
    }
}

impl std::str::FromStr for Role {
    type Err = crate::GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::ALL
            .into_iter()
            .find(|role| role.as_str() == s)
            .ok_or_else(|| crate::GameError::InvalidTarget(format!("Unknown role {s}.")))
    }
}

/// Global classification derived from leaderboard role shares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum WorldState {
    #[serde(rename = "Crime Hub")]
    CrimeHub,
    #[serde(rename = "Lawful City")]
    LawfulCity,
    #[default]
    Neutral,
}

impl std::fmt::Display for WorldState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            WorldState::CrimeHub => "Crime Hub",
            WorldState::LawfulCity => "Lawful City",
            WorldState::Neutral => "Neutral",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BuildingKind {
    Hotel,
    Shop,
    Hospital,
    Arena,
    Education,
    Government,
    Commercial,
    Airport,
}

impl std::fmt::Display for BuildingKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            BuildingKind::Hotel => "hotel",
            BuildingKind::Shop => "shop",
            BuildingKind::Hospital => "hospital",
            BuildingKind::Arena => "arena",
            BuildingKind::Education => "education",
            BuildingKind::Government => "government",
            BuildingKind::Commercial => "commercial",
            BuildingKind::Airport => "airport",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemCategory {
    Weapon,
    Item,
    Perk,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Info,
    Success,
    Warning,
    Danger,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub fn delta(self) -> (i64, i64) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }
}

// ---------------------------------------------------------------------------
// State types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: u32,
    pub y: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryItem {
    pub id: ItemId,
    pub icon: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<ItemCategory>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Building {
    #[serde(rename = "type")]
    pub kind: BuildingKind,
    pub icon: String,
    pub position: Position,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub name: String,
    pub score: u64,
    /// 1 is best.
    pub rank: u32,
    pub role: Role,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeasonalLeader {
    pub name: String,
    pub score: u64,
    pub rank: u32,
    pub role: Role,
    pub districts_held: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub role: Option<Role>,
    pub crown: u64,
    /// Secondary currency. No rule reads or writes it yet.
    pub emz: u64,
    pub health: u32,
    pub max_health: u32,
    pub energy: u32,
    pub max_energy: u32,
    pub xp: u32,
    pub max_xp: u32,
    pub influence: u64,
    pub position: Position,
    pub inventory: Vec<InventoryItem>,
    pub district_id: DistrictId,
    /// Declared for display; nothing awards badges yet.
    pub badges: BTreeSet<String>,
    pub season_pass_active: bool,
    pub season_pass_expiry: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct District {
    pub id: DistrictId,
    pub name: String,
    /// 0..=100
    pub crime: u8,
    /// 0..=100
    pub prosperity: u8,
    /// Local copy of the global label. Lags until the next reclassification.
    pub world_state: WorldState,
    pub leaderboard: Vec<LeaderboardEntry>,
    /// Placed at creation, never relocated.
    pub buildings: Vec<Building>,
}

impl District {
    pub fn building(&self, kind: BuildingKind) -> Option<&Building> {
        self.buildings.iter().find(|b| b.kind == kind)
    }

    pub fn building_at(&self, position: Position) -> Option<&Building> {
        self.buildings.iter().find(|b| b.position == position)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    pub message: String,
    pub severity: Severity,
}

/// Most-recent-first feed of player-facing messages, capped in length.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventLog {
    pub(crate) entries: VecDeque<LogEntry>,
    pub(crate) capacity: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetaState {
    pub tick: u64,
    pub seed: u64,
    pub content_version: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Counters {
    pub next_event_id: u64,
}

/// The single owner of all session state. Every resolver takes it by `&mut`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    pub meta: MetaState,
    pub player: Player,
    pub districts: Vec<District>,
    pub world_state: WorldState,
    pub world_state_updated_at: DateTime<Utc>,
    pub seasonal_leaderboard: Vec<SeasonalLeader>,
    pub season_pass_price: u64,
    pub seasonal_reward_pool: u64,
    pub log: EventLog,
    pub counters: Counters,
}

// ---------------------------------------------------------------------------
// Command types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    Extort,
    Smuggle,
    Bribe,
    Patrol,
    Confiscate,
    Report,
    Trade,
    Invest,
    Adapt,
}

impl ActionKind {
    pub const ALL: [ActionKind; 9] = [
        ActionKind::Extort,
        ActionKind::Smuggle,
        ActionKind::Bribe,
        ActionKind::Patrol,
        ActionKind::Confiscate,
        ActionKind::Report,
        ActionKind::Trade,
        ActionKind::Invest,
        ActionKind::Adapt,
    ];

    /// Wire name, as accepted by `RoleAction`.
    pub fn as_str(self) -> &'static str {
        match self {
            ActionKind::Extort => "extort",
            ActionKind::Smuggle => "smuggle",
            ActionKind::Bribe => "bribe",
            ActionKind::Patrol => "patrol",
            ActionKind::Confiscate => "confiscate",
            ActionKind::Report => "report",
            ActionKind::Trade => "trade",
            ActionKind::Invest => "invest",
            ActionKind::Adapt => "adapt",
        }
    }
}

impl std::str::FromStr for ActionKind {
    type Err = crate::GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ActionKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| crate::GameError::UnknownAction(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RestTier {
    Quick,
    Full,
    Luxury,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HealTier {
    Basic,
    Advanced,
    Full,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "building", rename_all = "snake_case")]
pub enum BuildingAction {
    Rest { tier: RestTier },
    Buy { item: ItemId },
    Heal { tier: HealTier },
    EnergyBoost,
    Battle { difficulty: Difficulty },
    ChallengeOpponent { opponent: OpponentId },
    ChallengeLeader,
    Train,
    PayTax,
    Fly { destination: DistrictId },
}

impl BuildingAction {
    /// The building type that offers this sub-action.
    pub fn building_kind(&self) -> BuildingKind {
        match self {
            BuildingAction::Rest { .. } => BuildingKind::Hotel,
            BuildingAction::Buy { .. } => BuildingKind::Shop,
            BuildingAction::Heal { .. } | BuildingAction::EnergyBoost => BuildingKind::Hospital,
            BuildingAction::Battle { .. }
            | BuildingAction::ChallengeOpponent { .. }
            | BuildingAction::ChallengeLeader => BuildingKind::Arena,
            BuildingAction::Train => BuildingKind::Education,
            BuildingAction::PayTax => BuildingKind::Government,
            BuildingAction::Fly { .. } => BuildingKind::Airport,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoveTarget {
    Step(Direction),
    To(Position),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Command {
    SelectRole {
        role: Role,
    },
    Move {
        target: MoveTarget,
    },
    /// Interact key: use the building under the player, if any.
    Interact {
        action: BuildingAction,
    },
    RoleAction {
        action: String,
    },
    Building {
        action: BuildingAction,
    },
    /// Travel through the current district's airport.
    Travel {
        destination: DistrictId,
    },
    PurchaseSeasonPass,
    PostScore {
        district: DistrictId,
        name: String,
        score: u64,
        role: Role,
    },
}

// ---------------------------------------------------------------------------
// Event types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventEnvelope {
    pub id: EventId,
    pub tick: u64,
    pub event: Event,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BattleKind {
    Standard(Difficulty),
    Leader,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Event {
    RoleSelected {
        role: Role,
    },
    Moved {
        from: Position,
        to: Position,
        energy: u32,
    },
    ArrivedAtBuilding {
        kind: BuildingKind,
        name: String,
    },
    ActionResolved {
        action: ActionKind,
        energy_cost: u32,
        reward: u64,
        xp: u32,
        influence: u64,
    },
    DistrictShifted {
        district: DistrictId,
        crime: u8,
        prosperity: u8,
    },
    Rested {
        tier: RestTier,
        cost: u64,
        energy: u32,
        health: u32,
    },
    ItemPurchased {
        item: ItemId,
        price: u64,
    },
    Healed {
        tier: HealTier,
        cost: u64,
        amount: u32,
    },
    EnergyBoosted {
        cost: u64,
        max_energy: u32,
    },
    BattleWon {
        battle: BattleKind,
        reward: u64,
        xp: u32,
    },
    BattleLost {
        battle: BattleKind,
        damage: u32,
    },
    Trained {
        cost: u64,
        max_xp: u32,
    },
    TaxPaid {
        amount: u64,
    },
    Traveled {
        from: DistrictId,
        to: DistrictId,
        cost: u64,
    },
    SeasonPassPurchased {
        price: u64,
        expires_at: DateTime<Utc>,
    },
    SeasonPassExpired,
    LeveledUp {
        max_xp: u32,
        max_health: u32,
        max_energy: u32,
    },
    DistrictDrifted {
        district: DistrictId,
        crime_delta: i32,
        prosperity_delta: i32,
    },
    EnergyRegenerated {
        energy: u32,
    },
    WorldStateChanged {
        from: WorldState,
        to: WorldState,
    },
    ScorePosted {
        district: DistrictId,
        name: String,
        rank: u32,
    },
}

// ---------------------------------------------------------------------------
// Content types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameContent {
    pub content_version: String,
    pub actions: Vec<ActionRule>,
    pub hotel: Vec<RestTierDef>,
    pub hospital: Vec<HealTierDef>,
    pub energy_boost: EnergyBoostDef,
    pub shop: ShopDef,
    pub arena: ArenaDef,
    pub districts: Vec<DistrictDef>,
    /// Display-only standings carried into the initial state.
    #[serde(default)]
    pub seasonal_leaderboard: Vec<SeasonalLeader>,
    /// Layout stamped into every district at creation.
    pub buildings: Vec<Building>,
    pub player: PlayerSeed,
    pub constants: Constants,
}

/// One row of the role × action table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionRule {
    pub role: Role,
    pub action: ActionKind,
    pub name: String,
    pub energy_cost: u32,
    pub reward_min: u64,
    /// Reward is drawn from `[reward_min, reward_min + reward_spread)`.
    pub reward_spread: u64,
    pub xp: u32,
    #[serde(default)]
    pub crime_delta: i32,
    #[serde(default)]
    pub prosperity_delta: i32,
    /// Log line; `{reward}` is replaced with the amount earned.
    pub message: String,
}

/// Either a fixed number of points or a refill to the maximum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Restore {
    Untouched,
    Points(u32),
    Full,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RestTierDef {
    pub tier: RestTier,
    pub base_price: u64,
    pub energy: Restore,
    pub health: Restore,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealTierDef {
    pub tier: HealTier,
    pub price: u64,
    pub detective_price: u64,
    pub heal: Restore,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnergyBoostDef {
    pub price: u64,
    pub max_energy_bonus: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShopDef {
    pub items: Vec<ShopItemDef>,
    pub discounts: Vec<ShopDiscountDef>,
    pub prosperity_bonus: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShopItemDef {
    pub id: ItemId,
    pub icon: String,
    pub name: String,
    pub price: u64,
}

/// Price multiplier (percent) for a role while its district carries `world_state`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShopDiscountDef {
    pub role: Role,
    pub world_state: WorldState,
    pub price_pct: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArenaDef {
    pub battles: Vec<BattleDef>,
    pub leader: LeaderChallengeDef,
    pub opponents: Vec<OpponentDef>,
    /// A battle is won when the draw is strictly greater than this.
    pub win_threshold: f64,
    /// Gangster payout multiplier on wins, in percent.
    pub gangster_reward_pct: u64,
    pub gangster_win_crime_delta: i32,
    pub detective_win_crime_delta: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BattleDef {
    pub difficulty: Difficulty,
    pub energy: u32,
    pub reward: u64,
    pub xp: u32,
    pub damage: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaderChallengeDef {
    pub energy: u32,
    pub reward: u64,
    pub xp: u32,
    pub influence: u64,
    pub damage: u32,
    pub win_threshold: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpponentDef {
    pub id: OpponentId,
    pub name: String,
    pub icon: String,
    pub level: u32,
    pub role: Role,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DistrictDef {
    pub id: DistrictId,
    pub name: String,
    pub crime: u8,
    pub prosperity: u8,
    #[serde(default)]
    pub leaderboard: Vec<LeaderboardEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerSeed {
    pub crown: u64,
    pub health: u32,
    pub energy: u32,
    pub max_xp: u32,
    pub district: DistrictId,
    pub inventory: Vec<InventoryItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Constants {
    pub map_width: u32,
    pub map_height: u32,
    pub spawn: Position,
    pub background_tick_secs: u64,
    pub drift_probability: f64,
    pub regen_probability: f64,
    pub regen_prosperity_threshold: u8,
    pub influence_xp_divisor: u32,
    pub level_max_xp_step: u32,
    pub level_max_health_step: u32,
    pub level_max_energy_step: u32,
    pub hotel_gangster_price_pct: u64,
    pub hotel_detective_price_pct: u64,
    pub education_price: u64,
    pub education_max_xp_bonus: u32,
    pub tax_min: u64,
    pub tax_spread: u64,
    pub travel_price: u64,
    pub season_pass_price: u64,
    pub season_pass_days: i64,
    pub season_pool_pct: u64,
    pub world_state_period_hours: i64,
    pub leaderboard_top_n: usize,
    pub event_log_capacity: usize,
}
