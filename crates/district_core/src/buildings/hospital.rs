use crate::bounds::add_capped;
use crate::{
    Event, GameContent, GameError, GameState, HealTier, HealTierDef, Outcome, Role, Severity,
};

pub fn hospital_price(def: &HealTierDef, role: Option<Role>) -> u64 {
    if role == Some(Role::Detective) {
        def.detective_price
    } else {
        def.price
    }
}

pub(super) fn heal(
    state: &mut GameState,
    content: &GameContent,
    tier: HealTier,
) -> Result<Outcome, GameError> {
    let def = content
        .hospital
        .iter()
        .find(|d| d.tier == tier)
        .ok_or_else(|| GameError::InvalidTarget(format!("No {tier:?} treatment available.")))?;
    let price = hospital_price(def, state.player.role);
    GameError::check_funds(price, state.player.crown)?;

    let player = &mut state.player;
    let before = player.health;
    player.crown -= price;
    player.health = def.heal.apply(player.health, player.max_health);
    let amount = player.health.saturating_sub(before);

    let mut outcome = Outcome::default();
    outcome
        .event(Event::Healed {
            tier,
            cost: price,
            amount,
        })
        .say(format!("Healed {amount} HP!"), Severity::Success);
    Ok(outcome)
}

/// Permanent energy upgrade: raises the cap and tops up by the same amount.
pub(super) fn boost_energy(
    state: &mut GameState,
    content: &GameContent,
) -> Result<Outcome, GameError> {
    let boost = &content.energy_boost;
    GameError::check_funds(boost.price, state.player.crown)?;

    let player = &mut state.player;
    player.crown -= boost.price;
    player.max_energy += boost.max_energy_bonus;
    player.energy = add_capped(player.energy, boost.max_energy_bonus, player.max_energy);

    let mut outcome = Outcome::default();
    outcome
        .event(Event::EnergyBoosted {
            cost: boost.price,
            max_energy: player.max_energy,
        })
        .say(
            format!("Max energy increased by {}!", boost.max_energy_bonus),
            Severity::Success,
        );
    Ok(outcome)
}
