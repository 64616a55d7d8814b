//! Stable Sort Key Utilities
//!
//! Deterministic tie-breakers for "nearest player" selections.
//!
//! ## Problem
//! Picking the nearest player by floating-point distance leaves ties to
//! iteration order, which makes possession and chaser selection depend on how
//! the roster happens to be stored.
//!
//! ## Solution
//! Compare by distance first and fall back to the immutable player id
//! (lower id wins). `total_cmp` keeps NaN from poisoning the ordering.

use std::cmp::Ordering;

use crate::engine::types::Position;
use crate::models::{Player, PlayerId};

/// Stable tie-breaker key for a player.
#[inline]
pub const fn stable_key(id: PlayerId) -> u32 {
    id.0 as u32
}

/// Ascending distance, then ascending id.
#[inline]
pub fn compare_by_distance(a_dist: f32, a_id: PlayerId, b_dist: f32, b_id: PlayerId) -> Ordering {
    match a_dist.total_cmp(&b_dist) {
        Ordering::Equal => stable_key(a_id).cmp(&stable_key(b_id)),
        other => other,
    }
}

/// Nearest player to `point` among those accepted by `filter`.
pub fn nearest_player<'a, F>(players: &'a [Player], point: &Position, filter: F) -> Option<&'a Player>
where
    F: Fn(&Player) -> bool,
{
    players
        .iter()
        .filter(|p| filter(p))
        .map(|p| (p, p.distance_to(point)))
        .min_by(|(a, da), (b, db)| compare_by_distance(*da, a.id, *db, b.id))
        .map(|(p, _)| p)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::match_sim::test_fixtures::player_at;

    #[test]
    fn test_distance_dominates() {
        assert_eq!(compare_by_distance(1.0, PlayerId(9), 2.0, PlayerId(1)), Ordering::Less);
    }

    #[test]
    fn test_tie_broken_by_lower_id() {
        assert_eq!(compare_by_distance(2.0, PlayerId(3), 2.0, PlayerId(14)), Ordering::Less);
        assert_eq!(compare_by_distance(2.0, PlayerId(14), 2.0, PlayerId(3)), Ordering::Greater);
    }

    #[test]
    fn test_nearest_player_tie_is_stable_regardless_of_order() {
        let a = player_at(15, 11.0, 10.0);
        let b = player_at(4, 9.0, 10.0);
        let point = Position::new(10.0, 10.0);

        let forward = vec![a.clone(), b.clone()];
        let reversed = vec![b, a];
        assert_eq!(nearest_player(&forward, &point, |_| true).map(|p| p.id), Some(PlayerId(4)));
        assert_eq!(nearest_player(&reversed, &point, |_| true).map(|p| p.id), Some(PlayerId(4)));
    }

    #[test]
    fn test_nearest_player_respects_filter() {
        let players = vec![player_at(0, 10.0, 10.0), player_at(12, 30.0, 10.0)];
        let nearest = nearest_player(&players, &Position::new(10.0, 10.0), |p| p.id.0 >= 11);
        assert_eq!(nearest.map(|p| p.id), Some(PlayerId(12)));
        assert!(nearest_player(&players, &Position::ZERO, |_| false).is_none());
    }
}
