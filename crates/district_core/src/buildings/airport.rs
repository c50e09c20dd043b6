use crate::{BuildingKind, DistrictId, Event, GameContent, GameError, GameState, Outcome, Severity};

/// Fly to another district. Position resets to the spawn tile on arrival.
pub(crate) fn fly(
    state: &mut GameState,
    content: &GameContent,
    destination: DistrictId,
) -> Result<Outcome, GameError> {
    let origin = state.current_district()?;
    if origin.id == destination {
        return Err(GameError::InvalidTarget(format!(
            "You are already in {}.",
            origin.name
        )));
    }
    if origin.building(BuildingKind::Airport).is_none() {
        return Err(GameError::InvalidTarget(format!(
            "There is no airport in {}.",
            origin.name
        )));
    }
    let from = origin.id;
    let target = state
        .district(destination)
        .ok_or_else(|| GameError::InvalidTarget(format!("District {destination} does not exist.")))?;
    let name = target.name.clone();
    let price = content.constants.travel_price;
    GameError::check_funds(price, state.player.crown)?;

    let player = &mut state.player;
    player.crown -= price;
    player.district_id = destination;
    player.position = content.constants.spawn;

    let mut outcome = Outcome::default();
    outcome
        .event(Event::Traveled {
            from,
            to: destination,
            cost: price,
        })
        .say(format!("Traveled to {name}!"), Severity::Success);
    Ok(outcome)
}
