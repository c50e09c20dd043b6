use rand::Rng;

use crate::{dice, Event, GameContent, GameError, GameState, Outcome, Severity};

/// The tax bill is rolled before the funds check, so a rejected payment
/// still advances the generator.
pub(super) fn pay_tax(
    state: &mut GameState,
    content: &GameContent,
    rng: &mut impl Rng,
) -> Result<Outcome, GameError> {
    let constants = &content.constants;
    let tax = dice::roll_span(rng, constants.tax_min, constants.tax_spread);
    let available = state.player.crown;
    if available < tax {
        return Err(GameError::TaxUnpaid { tax, available });
    }

    state.player.crown -= tax;

    let mut outcome = Outcome::default();
    outcome
        .event(Event::TaxPaid { amount: tax })
        .say(format!("Paid {tax} CROWN in taxes."), Severity::Warning);
    Ok(outcome)
}
