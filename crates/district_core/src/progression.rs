//! Level-up rule.

use crate::{Constants, Event, Player};

/// Add experience, then apply at most one level-up.
///
/// A single gain large enough to cross two thresholds still levels once; the
/// surplus stays in `xp` and may leave it at or above the new cap until the
/// next gain.
pub(crate) fn gain_xp(player: &mut Player, xp: u32, constants: &Constants) -> Option<Event> {
    player.xp = player.xp.saturating_add(xp);
    level_up(player, constants)
}

/// Single-step check: subtract the old cap, raise the caps, refill health and energy.
pub fn level_up(player: &mut Player, constants: &Constants) -> Option<Event> {
    if player.xp < player.max_xp {
        return None;
    }
    player.xp -= player.max_xp;
    player.max_xp += constants.level_max_xp_step;
    player.max_health += constants.level_max_health_step;
    player.health = player.max_health;
    player.max_energy += constants.level_max_energy_step;
    player.energy = player.max_energy;
    Some(Event::LeveledUp {
        max_xp: player.max_xp,
        max_health: player.max_health,
        max_energy: player.max_energy,
    })
}
