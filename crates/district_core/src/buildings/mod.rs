//! Building interactions. Each sub-resolver checks affordability before it
//! touches the state.

mod airport;
mod arena;
mod education;
mod government;
mod hospital;
mod hotel;
mod shop;

use rand::Rng;

use crate::{BuildingAction, BuildingKind, GameContent, GameError, GameState, Outcome, Restore};

pub(crate) use airport::fly;
pub use hospital::hospital_price;
pub use hotel::hotel_price;
pub use shop::shop_price;

impl Restore {
    /// Resulting value after restoring `current` toward `max`.
    pub fn apply(self, current: u32, max: u32) -> u32 {
        match self {
            Restore::Untouched => current,
            Restore::Points(points) => crate::bounds::add_capped(current, points, max),
            Restore::Full => max,
        }
    }
}

/// Run a building sub-action. The current district must contain a building
/// of the kind that offers it.
pub(crate) fn resolve_building(
    state: &mut GameState,
    content: &GameContent,
    action: &BuildingAction,
    rng: &mut impl Rng,
) -> Result<Outcome, GameError> {
    let kind = action.building_kind();
    let district = state.current_district()?;
    if district.building(kind).is_none() {
        return Err(GameError::InvalidTarget(format!(
            "There is no {kind} in {}.",
            district.name
        )));
    }
    dispatch(state, content, action, rng)
}

/// Use the building under the player's position.
pub(crate) fn interact(
    state: &mut GameState,
    content: &GameContent,
    action: &BuildingAction,
    rng: &mut impl Rng,
) -> Result<Outcome, GameError> {
    let district = state.current_district()?;
    let building = district
        .building_at(state.player.position)
        .ok_or_else(|| GameError::InvalidTarget("There is no building here.".to_string()))?;
    if building.kind == BuildingKind::Commercial {
        return Err(GameError::UnknownBuildingType(building.kind));
    }
    if building.kind != action.building_kind() {
        return Err(GameError::InvalidTarget(format!(
            "The {} does not offer that.",
            building.name
        )));
    }
    dispatch(state, content, action, rng)
}

fn dispatch(
    state: &mut GameState,
    content: &GameContent,
    action: &BuildingAction,
    rng: &mut impl Rng,
) -> Result<Outcome, GameError> {
    match action {
        BuildingAction::Rest { tier } => hotel::rest(state, content, *tier),
        BuildingAction::Buy { item } => shop::buy(state, content, item),
        BuildingAction::Heal { tier } => hospital::heal(state, content, *tier),
        BuildingAction::EnergyBoost => hospital::boost_energy(state, content),
        BuildingAction::Battle { difficulty } => arena::battle(state, content, *difficulty, rng),
        BuildingAction::ChallengeOpponent { opponent } => {
            arena::challenge_opponent(state, content, opponent, rng)
        }
        BuildingAction::ChallengeLeader => arena::challenge_leader(state, content, rng),
        BuildingAction::Train => education::train(state, content),
        BuildingAction::PayTax => government::pay_tax(state, content, rng),
        BuildingAction::Fly { destination } => airport::fly(state, content, *destination),
    }
}
