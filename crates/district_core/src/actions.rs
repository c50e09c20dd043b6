//! Role actions: the role × action table applied to the player and their district.

use rand::Rng;

use crate::bounds::shift_percent;
use crate::progression::gain_xp;
use crate::{dice, ActionKind, Event, GameContent, GameError, GameState, Outcome, Severity};

/// Resolve a named role action for the current player.
///
/// Validation happens up front so a rejection leaves the state untouched.
/// Energy is paid before the reward is drawn.
pub(crate) fn resolve_action(
    state: &mut GameState,
    content: &GameContent,
    action: &str,
    rng: &mut impl Rng,
) -> Result<Outcome, GameError> {
    let role = state.player.role.ok_or(GameError::RoleNotSelected)?;
    let kind: ActionKind = action.parse()?;
    let rule = content
        .actions
        .iter()
        .find(|r| r.role == role && r.action == kind)
        .ok_or_else(|| GameError::UnknownAction(action.to_string()))?;
    GameError::check_energy(rule.energy_cost, state.player.energy)?;

    let constants = &content.constants;
    let (player, district) = state.player_and_district_mut()?;

    player.energy -= rule.energy_cost;
    let reward = dice::roll_span(rng, rule.reward_min, rule.reward_spread);
    player.crown += reward;

    district.crime = shift_percent(district.crime, rule.crime_delta);
    district.prosperity = shift_percent(district.prosperity, rule.prosperity_delta);

    let influence = u64::from(rule.xp / constants.influence_xp_divisor.max(1));
    player.influence += influence;

    let mut outcome = Outcome::default();
    outcome
        .event(Event::ActionResolved {
            action: kind,
            energy_cost: rule.energy_cost,
            reward,
            xp: rule.xp,
            influence,
        })
        .say(rule.message.replace("{reward}", &reward.to_string()), Severity::Success);
    if rule.crime_delta != 0 || rule.prosperity_delta != 0 {
        outcome.event(Event::DistrictShifted {
            district: district.id,
            crime: district.crime,
            prosperity: district.prosperity,
        });
    }
    if let Some(level) = gain_xp(player, rule.xp, constants) {
        outcome
            .event(level)
            .say("🎉 LEVEL UP! Stats increased!", Severity::Success);
    }
    Ok(outcome)
}
