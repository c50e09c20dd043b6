use crate::bounds::clamp_coord;
use crate::{Event, GameContent, GameError, GameState, MoveTarget, Outcome, Position, Severity};

/// Step or jump on the district grid. Costs one energy; the target is
/// clamped into the map.
pub(crate) fn move_player(
    state: &mut GameState,
    content: &GameContent,
    target: MoveTarget,
) -> Result<Outcome, GameError> {
    GameError::check_energy(1, state.player.energy)?;
    let constants = &content.constants;
    let from = state.player.position;
    let (x, y) = match target {
        MoveTarget::Step(direction) => {
            let (dx, dy) = direction.delta();
            (i64::from(from.x) + dx, i64::from(from.y) + dy)
        }
        MoveTarget::To(position) => (i64::from(position.x), i64::from(position.y)),
    };
    let to = Position {
        x: clamp_coord(x, constants.map_width),
        y: clamp_coord(y, constants.map_height),
    };
    let arrival = if to == from {
        None
    } else {
        state
            .current_district()?
            .building_at(to)
            .map(|b| (b.kind, b.name.clone()))
    };

    state.player.energy -= 1;
    state.player.position = to;

    let mut outcome = Outcome::default();
    outcome.event(Event::Moved {
        from,
        to,
        energy: state.player.energy,
    });
    if let Some((kind, name)) = arrival {
        outcome.say(
            format!("You arrived at {name}. Press Enter or E to interact!"),
            Severity::Warning,
        );
        outcome.event(Event::ArrivedAtBuilding { kind, name });
    }
    Ok(outcome)
}
