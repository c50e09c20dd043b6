use crate::bounds::scale_pct;
use crate::{
    BuildingKind, Constants, Event, GameContent, GameError, GameState, Outcome, RestTier,
    RestTierDef, Role, Severity,
};

/// Room price for a role: gangsters pay a surcharge, detectives a discount.
pub fn hotel_price(def: &RestTierDef, role: Option<Role>, constants: &Constants) -> u64 {
    match role {
        Some(Role::Gangster) => scale_pct(def.base_price, constants.hotel_gangster_price_pct),
        Some(Role::Detective) => scale_pct(def.base_price, constants.hotel_detective_price_pct),
        Some(Role::Civilian) | None => def.base_price,
    }
}

pub(super) fn rest(
    state: &mut GameState,
    content: &GameContent,
    tier: RestTier,
) -> Result<Outcome, GameError> {
    let def = content
        .hotel
        .iter()
        .find(|d| d.tier == tier)
        .ok_or_else(|| GameError::InvalidTarget(format!("No {tier:?} room available.")))?;
    let price = hotel_price(def, state.player.role, &content.constants);
    GameError::check_funds(price, state.player.crown)?;

    let hotel_name = state
        .current_district()?
        .building(BuildingKind::Hotel)
        .map_or_else(|| "the hotel".to_string(), |b| b.name.clone());

    let player = &mut state.player;
    player.crown -= price;
    player.energy = def.energy.apply(player.energy, player.max_energy);
    player.health = def.health.apply(player.health, player.max_health);

    let mut outcome = Outcome::default();
    outcome
        .event(Event::Rested {
            tier,
            cost: price,
            energy: player.energy,
            health: player.health,
        })
        .say(
            format!("Rested at {hotel_name}. Energy restored!"),
            Severity::Success,
        );
    Ok(outcome)
}
