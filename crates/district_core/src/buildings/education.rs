use crate::{Event, GameContent, GameError, GameState, Outcome, Severity};

pub(super) fn train(state: &mut GameState, content: &GameContent) -> Result<Outcome, GameError> {
    let constants = &content.constants;
    GameError::check_funds(constants.education_price, state.player.crown)?;

    let player = &mut state.player;
    player.crown -= constants.education_price;
    player.max_xp += constants.education_max_xp_bonus;

    let mut outcome = Outcome::default();
    outcome
        .event(Event::Trained {
            cost: constants.education_price,
            max_xp: player.max_xp,
        })
        .say("Training complete! Max XP increased!", Severity::Success);
    Ok(outcome)
}
