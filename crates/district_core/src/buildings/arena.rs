//! Arena battles. Energy is paid up front; the dice decide the rest.

use rand::Rng;

use crate::bounds::{scale_pct, shift_percent};
use crate::progression::gain_xp;
use crate::{
    dice, BattleKind, Difficulty, Event, GameContent, GameError, GameState, OpponentId, Outcome,
    Role, Severity,
};

/// Opponent challenges are fought at this tier.
const OPPONENT_DIFFICULTY: Difficulty = Difficulty::Medium;

struct Fight {
    kind: BattleKind,
    energy: u32,
    reward: u64,
    xp: u32,
    influence: u64,
    damage: u32,
    win_threshold: f64,
}

pub(super) fn battle(
    state: &mut GameState,
    content: &GameContent,
    difficulty: Difficulty,
    rng: &mut impl Rng,
) -> Result<Outcome, GameError> {
    let def = content
        .arena
        .battles
        .iter()
        .find(|b| b.difficulty == difficulty)
        .ok_or_else(|| GameError::InvalidTarget(format!("No {difficulty:?} battle scheduled.")))?;
    let fight = Fight {
        kind: BattleKind::Standard(difficulty),
        energy: def.energy,
        reward: def.reward,
        xp: def.xp,
        influence: 0,
        damage: def.damage,
        win_threshold: content.arena.win_threshold,
    };
    resolve_fight(state, content, &fight, rng)
}

pub(super) fn challenge_opponent(
    state: &mut GameState,
    content: &GameContent,
    opponent: &OpponentId,
    rng: &mut impl Rng,
) -> Result<Outcome, GameError> {
    let def = content
        .arena
        .opponents
        .iter()
        .find(|o| &o.id == opponent)
        .ok_or_else(|| GameError::InvalidTarget(format!("Unknown opponent {opponent}.")))?;
    let mut outcome = battle(state, content, OPPONENT_DIFFICULTY, rng)?;
    outcome
        .messages
        .insert(0, (format!("Challenging {}...", def.name), Severity::Warning));
    Ok(outcome)
}

pub(super) fn challenge_leader(
    state: &mut GameState,
    content: &GameContent,
    rng: &mut impl Rng,
) -> Result<Outcome, GameError> {
    let leader = &content.arena.leader;
    let fight = Fight {
        kind: BattleKind::Leader,
        energy: leader.energy,
        reward: leader.reward,
        xp: leader.xp,
        influence: leader.influence,
        damage: leader.damage,
        win_threshold: leader.win_threshold,
    };
    resolve_fight(state, content, &fight, rng)
}

fn resolve_fight(
    state: &mut GameState,
    content: &GameContent,
    fight: &Fight,
    rng: &mut impl Rng,
) -> Result<Outcome, GameError> {
    GameError::check_energy(fight.energy, state.player.energy)?;
    let arena = &content.arena;
    let (player, district) = state.player_and_district_mut()?;

    player.energy -= fight.energy;
    let mut outcome = Outcome::default();

    if !dice::roll_above(rng, fight.win_threshold) {
        player.health = player.health.saturating_sub(fight.damage);
        let message = match fight.kind {
            BattleKind::Leader => format!("The leader was too strong! Lost {} HP.", fight.damage),
            BattleKind::Standard(_) => format!("Defeated! Lost {} HP.", fight.damage),
        };
        outcome
            .event(Event::BattleLost {
                battle: fight.kind,
                damage: fight.damage,
            })
            .say(message, Severity::Danger);
        return Ok(outcome);
    }

    // Leader purses are flat: no role multiplier, no district effect.
    let role = match fight.kind {
        BattleKind::Standard(_) => player.role,
        BattleKind::Leader => None,
    };
    let (reward, crime_delta) = match role {
        Some(Role::Gangster) => (
            scale_pct(fight.reward, arena.gangster_reward_pct),
            arena.gangster_win_crime_delta,
        ),
        Some(Role::Detective) => (fight.reward, arena.detective_win_crime_delta),
        Some(Role::Civilian) | None => (fight.reward, 0),
    };
    player.crown += reward;
    player.influence += fight.influence;

    let message = match fight.kind {
        BattleKind::Leader => format!(
            "🏆 Defeated the leader! Earned {reward} CROWN, {} XP and {} influence!",
            fight.xp, fight.influence
        ),
        BattleKind::Standard(_) => {
            format!("Victory! Earned {reward} CROWN and {} XP!", fight.xp)
        }
    };
    outcome
        .event(Event::BattleWon {
            battle: fight.kind,
            reward,
            xp: fight.xp,
        })
        .say(message, Severity::Success);

    if crime_delta != 0 {
        district.crime = shift_percent(district.crime, crime_delta);
        outcome.event(Event::DistrictShifted {
            district: district.id,
            crime: district.crime,
            prosperity: district.prosperity,
        });
    }
    if let Some(level) = gain_xp(player, fight.xp, &content.constants) {
        outcome
            .event(level)
            .say("🎉 LEVEL UP! Stats increased!", Severity::Success);
    }
    Ok(outcome)
}
