//! Passive district drift and energy regeneration between player actions.

use rand::Rng;

use crate::bounds::{add_capped, shift_percent};
use crate::{dice, Constants, Event, GameState};

/// One background step for the player's current district. Does nothing until
/// a role has been chosen.
///
/// Draw order is fixed: drift chance, crime drift, prosperity drift, then the
/// regeneration chance when prosperity is above the threshold.
pub(crate) fn background_step(
    state: &mut GameState,
    constants: &Constants,
    rng: &mut impl Rng,
) -> Vec<Event> {
    let mut events = Vec::new();
    if state.player.role.is_none() {
        return events;
    }
    let Ok((player, district)) = state.player_and_district_mut() else {
        return events;
    };

    if dice::chance(rng, constants.drift_probability) {
        let crime_delta = dice::roll_drift(rng);
        let prosperity_delta = dice::roll_drift(rng);
        district.crime = shift_percent(district.crime, crime_delta);
        district.prosperity = shift_percent(district.prosperity, prosperity_delta);
        events.push(Event::DistrictDrifted {
            district: district.id,
            crime_delta,
            prosperity_delta,
        });
    }

    if district.prosperity > constants.regen_prosperity_threshold
        && dice::chance(rng, constants.regen_probability)
    {
        let before = player.energy;
        player.energy = add_capped(player.energy, 1, player.max_energy);
        if player.energy != before {
            events.push(Event::EnergyRegenerated {
                energy: player.energy,
            });
        }
    }
    events
}
