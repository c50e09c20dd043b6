use crate::{
    DistrictId, Event, GameError, GameState, LeaderboardEntry, Outcome, Role, Severity,
};

/// Sort by score descending and renumber ranks from 1. Equal scores keep
/// their existing order.
pub fn rank_entries(entries: &mut [LeaderboardEntry]) {
    entries.sort_by(|a, b| b.score.cmp(&a.score));
    for (i, entry) in entries.iter_mut().enumerate() {
        entry.rank = i as u32 + 1;
    }
}

/// Insert or update a named entry on a district board, then re-rank.
/// Classification only picks this up on its next scheduled pass.
pub(crate) fn post_score(
    state: &mut GameState,
    district: DistrictId,
    name: &str,
    score: u64,
    role: Role,
) -> Result<Outcome, GameError> {
    if name.trim().is_empty() {
        return Err(GameError::InvalidTarget(
            "Leaderboard names cannot be empty.".to_string(),
        ));
    }
    let board = &mut state
        .districts
        .iter_mut()
        .find(|d| d.id == district)
        .ok_or(GameError::UnknownDistrict(district))?
        .leaderboard;

    match board.iter_mut().find(|e| e.name == name) {
        Some(entry) => {
            entry.score = score;
            entry.role = role;
        }
        None => board.push(LeaderboardEntry {
            name: name.to_string(),
            score,
            rank: 0,
            role,
        }),
    }
    rank_entries(board);
    let rank = board
        .iter()
        .find(|e| e.name == name)
        .map_or(0, |e| e.rank);

    let mut outcome = Outcome::default();
    outcome
        .event(Event::ScorePosted {
            district,
            name: name.to_string(),
            rank,
        })
        .say(format!("{name} is now rank #{rank}."), Severity::Info);
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str, score: u64) -> LeaderboardEntry {
        LeaderboardEntry {
            name: name.to_string(),
            score,
            rank: 0,
            role: Role::Civilian,
        }
    }

    #[test]
    fn ranks_by_score_descending() {
        let mut board = vec![entry("a", 10), entry("b", 30), entry("c", 20)];
        rank_entries(&mut board);
        let order: Vec<(&str, u32)> = board.iter().map(|e| (e.name.as_str(), e.rank)).collect();
        assert_eq!(order, vec![("b", 1), ("c", 2), ("a", 3)]);
    }

    #[test]
    fn ties_keep_insertion_order() {
        let mut board = vec![entry("first", 50), entry("second", 50)];
        rank_entries(&mut board);
        assert_eq!(board[0].name, "first");
        assert_eq!(board[1].rank, 2);
    }
}
