use district_core::{
    hospital_price, hotel_price, ActionRule, BuildingAction, Command, Difficulty, GameContent,
    GameState, HealTier, RestTier, Role,
};
use serde::{Deserialize, Serialize};

pub trait CommandSource {
    fn generate_commands(&mut self, state: &GameState, content: &GameContent) -> Vec<Command>;
}

/// Plays one role headlessly, one command per call:
/// 1. Pick the role if none is set.
/// 2. Heal when health drops below the threshold.
/// 3. Rest when energy cannot cover the cheapest action.
/// 4. Train once the purse is comfortably above the reserve.
/// 5. Fight an easy arena battle every few ticks while healthy.
/// 6. Otherwise run the best role action energy allows.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AutopilotController {
    pub role: Role,
    /// Heal below this share of max health, in percent.
    pub heal_below_pct: u32,
    /// CROWN kept back from training.
    pub reserve: u64,
    /// Fight on ticks where `tick % battle_every == 0`. Zero disables fighting.
    pub battle_every: u64,
}

impl AutopilotController {
    pub fn new(role: Role) -> Self {
        Self {
            role,
            heal_below_pct: 40,
            reserve: 1_500,
            battle_every: 4,
        }
    }

    fn next_command(&self, state: &GameState, content: &GameContent) -> Option<Command> {
        let player = &state.player;
        let Some(role) = player.role else {
            return Some(Command::SelectRole { role: self.role });
        };

        if player.health * 100 < player.max_health * self.heal_below_pct {
            if let Some(tier) = affordable_heal(state, content, role) {
                return Some(building(BuildingAction::Heal { tier }));
            }
        }

        let actions: Vec<&ActionRule> = content.actions.iter().filter(|r| r.role == role).collect();
        let cheapest = actions.iter().map(|r| r.energy_cost).min()?;
        if player.energy < cheapest {
            return affordable_rest(state, content, role)
                .map(|tier| building(BuildingAction::Rest { tier }));
        }

        if player.crown >= self.reserve + content.constants.education_price {
            return Some(building(BuildingAction::Train));
        }

        if self.battle_every > 0
            && state.meta.tick % self.battle_every == 0
            && player.health * 100 >= player.max_health * 80
        {
            let easy = content
                .arena
                .battles
                .iter()
                .find(|b| b.difficulty == Difficulty::Easy);
            if easy.is_some_and(|b| player.energy >= b.energy) {
                return Some(building(BuildingAction::Battle {
                    difficulty: Difficulty::Easy,
                }));
            }
        }

        actions
            .into_iter()
            .filter(|r| r.energy_cost <= player.energy)
            .max_by_key(|r| r.reward_min * 2 + r.reward_spread)
            .map(|r| Command::RoleAction {
                action: r.action.as_str().to_string(),
            })
    }
}

impl CommandSource for AutopilotController {
    fn generate_commands(&mut self, state: &GameState, content: &GameContent) -> Vec<Command> {
        self.next_command(state, content).into_iter().collect()
    }
}

// ---------------------------------------------------------------------------
// Private helpers
// ---------------------------------------------------------------------------

fn building(action: BuildingAction) -> Command {
    Command::Building { action }
}

/// Strongest treatment the purse covers.
fn affordable_heal(state: &GameState, content: &GameContent, role: Role) -> Option<HealTier> {
    [HealTier::Advanced, HealTier::Basic].into_iter().find(|tier| {
        content
            .hospital
            .iter()
            .find(|d| d.tier == *tier)
            .is_some_and(|d| hospital_price(d, Some(role)) <= state.player.crown)
    })
}

fn affordable_rest(state: &GameState, content: &GameContent, role: Role) -> Option<RestTier> {
    [RestTier::Full, RestTier::Quick].into_iter().find(|tier| {
        content
            .hotel
            .iter()
            .find(|d| d.tier == *tier)
            .is_some_and(|d| hotel_price(d, Some(role), &content.constants) * 4 <= state.player.crown)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use district_core::test_fixtures::{base_content, base_state, state_with_role};

    #[test]
    fn picks_role_first() {
        let content = base_content();
        let state = base_state(&content);
        let mut autopilot = AutopilotController::new(Role::Detective);

        let commands = autopilot.generate_commands(&state, &content);

        assert_eq!(
            commands,
            vec![Command::SelectRole {
                role: Role::Detective
            }]
        );
    }

    #[test]
    fn heals_when_hurt() {
        let content = base_content();
        let mut state = state_with_role(&content, Role::Civilian);
        state.player.health = 30;
        let mut autopilot = AutopilotController::new(Role::Civilian);

        let commands = autopilot.generate_commands(&state, &content);

        assert_eq!(
            commands,
            vec![building(BuildingAction::Heal {
                tier: HealTier::Advanced
            })]
        );
    }

    #[test]
    fn rests_when_tired() {
        let content = base_content();
        let mut state = state_with_role(&content, Role::Gangster);
        state.player.energy = 7;
        let mut autopilot = AutopilotController::new(Role::Gangster);

        let commands = autopilot.generate_commands(&state, &content);

        assert_eq!(
            commands,
            vec![building(BuildingAction::Rest {
                tier: RestTier::Full
            })]
        );
    }

    #[test]
    fn broke_and_tired_waits() {
        let content = base_content();
        let mut state = state_with_role(&content, Role::Gangster);
        state.player.energy = 7;
        state.player.crown = 100;
        let mut autopilot = AutopilotController::new(Role::Gangster);

        assert!(autopilot.generate_commands(&state, &content).is_empty());
    }

    #[test]
    fn prefers_highest_paying_action() {
        let content = base_content();
        let mut state = state_with_role(&content, Role::Civilian);
        state.meta.tick = 1;
        let mut autopilot = AutopilotController::new(Role::Civilian);

        let commands = autopilot.generate_commands(&state, &content);

        assert_eq!(
            commands,
            vec![Command::RoleAction {
                action: "invest".to_string()
            }]
        );
    }

    #[test]
    fn fights_on_battle_ticks() {
        let content = base_content();
        let state = state_with_role(&content, Role::Civilian);
        let mut autopilot = AutopilotController::new(Role::Civilian);

        let commands = autopilot.generate_commands(&state, &content);

        assert_eq!(
            commands,
            vec![building(BuildingAction::Battle {
                difficulty: Difficulty::Easy
            })]
        );
    }
}
