//! Season pass purchase and expiry.

use chrono::{DateTime, Duration, Utc};

use crate::bounds::scale_pct;
use crate::{Event, GameContent, GameError, GameState, Outcome, Severity};

pub(crate) fn purchase(
    state: &mut GameState,
    content: &GameContent,
    now: DateTime<Utc>,
) -> Result<Outcome, GameError> {
    if state.player.season_pass_active {
        return Err(GameError::SeasonPassAlreadyActive);
    }
    let price = state.season_pass_price;
    GameError::check_funds(price, state.player.crown)?;

    let expires_at = now + Duration::days(content.constants.season_pass_days);
    let player = &mut state.player;
    player.crown -= price;
    player.season_pass_active = true;
    player.season_pass_expiry = Some(expires_at);
    state.seasonal_reward_pool += scale_pct(price, content.constants.season_pool_pct);

    let mut outcome = Outcome::default();
    outcome
        .event(Event::SeasonPassPurchased { price, expires_at })
        .say(
            "Season Pass purchased! You are now eligible for seasonal rewards!",
            Severity::Success,
        );
    Ok(outcome)
}

/// Clear the pass once `now` is past its expiry.
pub(crate) fn expire(state: &mut GameState, now: DateTime<Utc>) -> Option<Event> {
    let player = &mut state.player;
    match player.season_pass_expiry {
        Some(expiry) if player.season_pass_active && now > expiry => {
            player.season_pass_active = false;
            player.season_pass_expiry = None;
            Some(Event::SeasonPassExpired)
        }
        _ => None,
    }
}
