use serde::{Deserialize, Serialize};

use crate::api::types::{BallId, Group};
use crate::core::ball_set::BallSet;
use crate::rules::mode::{GameMode, MatchState};
use crate::rules::shot::ShotData;

/// Shot fouls, in the order they are checked. A scratch is tracked separately.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Foul {
    /// The cue ball touched nothing.
    NoContact,
    /// The first ball touched was not a legal target.
    WrongBall,
    /// After contact nothing was pocketed and no ball reached a cushion.
    NoRail,
}

/// Classify the finished shot. `balls` is the table after the shot settled.
///
/// Pure: the same shot, match state and table always give the same answer.
/// Free play never fouls.
pub fn check_foul(shot: &ShotData, game: &MatchState, balls: &BallSet) -> Option<Foul> {
    if game.mode == GameMode::FreePlay {
        return None;
    }

    let first = match shot.first_hit {
        Some(id) => id,
        None => return Some(Foul::NoContact),
    };

    let legal_first = match game.mode {
        GameMode::NineBall => lowest_on_table_at_start(shot, balls).map_or(true, |lowest| first == lowest),
        GameMode::EightBall => match game.shooter_group() {
            None => true,
            Some(group) if group_cleared_before_shot(group, shot, balls) => first == BallId::EIGHT,
            Some(group) => group.contains(first),
        },
        GameMode::FreePlay => true,
    };
    if !legal_first {
        return Some(Foul::WrongBall);
    }

    // Simplified rail rule: any ball, any cushion.
    if shot.pocketed.is_empty() && !shot.any_cushion_after_contact() {
        return Some(Foul::NoRail);
    }

    None
}

/// Lowest-numbered object ball that was on the table when the shot started:
/// still active now, or pocketed during this shot.
pub fn lowest_on_table_at_start(shot: &ShotData, balls: &BallSet) -> Option<BallId> {
    balls
        .iter()
        .map(|b| b.id)
        .filter(|id| !id.is_cue())
        .filter(|id| balls.is_active(*id) || shot.pocketed_ball(*id))
        .min()
}

/// Every ball of `group` was already off the table before this shot began.
pub fn group_cleared_before_shot(group: Group, shot: &ShotData, balls: &BallSet) -> bool {
    balls
        .iter()
        .filter(|b| group.contains(b.id))
        .all(|b| !b.active && !shot.pocketed_ball(b.id))
}

/// Every ball of `group` is off the table now.
pub fn group_cleared(group: Group, balls: &BallSet) -> bool {
    balls.iter().filter(|b| group.contains(b.id)).all(|b| !b.active)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::Player;
    use crate::components::ball::Ball;
    use glam::Vec2;

    fn table_with(ids: &[u8]) -> BallSet {
        BallSet::from_balls(
            ids.iter()
                .enumerate()
                .map(|(i, &n)| Ball::new(BallId(n), Vec2::new(50.0 + i as f32 * 30.0, 100.0), 12.0))
                .collect(),
        )
    }

    fn game(mode: GameMode) -> MatchState {
        let mut m = MatchState::new();
        m.start(mode);
        m.is_break_shot = false;
        m
    }

    fn shot(first: Option<u8>, pocketed: &[u8], cushions: &[u8]) -> ShotData {
        let mut data = ShotData {
            first_hit: first.map(BallId),
            pocketed: pocketed.iter().map(|&n| BallId(n)).collect(),
            ..ShotData::default()
        };
        for &n in cushions {
            data.cushion_after_contact.insert(BallId(n));
        }
        data
    }

    #[test]
    fn no_contact_wins_over_everything() {
        let balls = table_with(&[0, 1, 2, 3]);
        let s = shot(None, &[], &[]);
        assert_eq!(check_foul(&s, &game(GameMode::NineBall), &balls), Some(Foul::NoContact));
        assert_eq!(check_foul(&s, &game(GameMode::FreePlay), &balls), None);
    }

    #[test]
    fn nine_ball_must_hit_lowest_first_even_if_it_drops() {
        let mut balls = table_with(&[0, 1, 2, 3, 9]);
        balls.get_mut(BallId(1)).unwrap().pocket();
        // 2 hit first, 1 pocketed later in the same shot: 1 was still the lowest at start.
        let s = shot(Some(2), &[1], &[2]);
        assert_eq!(check_foul(&s, &game(GameMode::NineBall), &balls), Some(Foul::WrongBall));

        let legal = shot(Some(1), &[1], &[]);
        assert_eq!(check_foul(&legal, &game(GameMode::NineBall), &balls), None);
    }

    #[test]
    fn eight_ball_open_table_allows_any_first_ball() {
        let balls = table_with(&[0, 3, 8, 12]);
        let s = shot(Some(12), &[], &[12]);
        assert_eq!(check_foul(&s, &game(GameMode::EightBall), &balls), None);
    }

    #[test]
    fn eight_ball_wrong_group() {
        let balls = table_with(&[0, 3, 8, 12]);
        let mut g = game(GameMode::EightBall);
        g.groups = [Some(Group::Solids), Some(Group::Stripes)];
        assert_eq!(check_foul(&shot(Some(12), &[], &[12]), &g, &balls), Some(Foul::WrongBall));
        assert_eq!(check_foul(&shot(Some(8), &[], &[8]), &g, &balls), Some(Foul::WrongBall));
        assert_eq!(check_foul(&shot(Some(3), &[], &[3]), &g, &balls), None);
    }

    #[test]
    fn eight_ball_after_clearing_group_must_hit_the_eight() {
        let mut balls = table_with(&[0, 3, 8, 12]);
        balls.get_mut(BallId(3)).unwrap().pocket();
        let mut g = game(GameMode::EightBall);
        g.groups = [Some(Group::Solids), Some(Group::Stripes)];
        assert_eq!(g.player, Player::One);
        assert_eq!(check_foul(&shot(Some(8), &[], &[0]), &g, &balls), None);
        assert_eq!(check_foul(&shot(Some(12), &[], &[12]), &g, &balls), Some(Foul::WrongBall));
    }

    #[test]
    fn no_rail_when_nothing_happens_after_contact() {
        let balls = table_with(&[0, 1, 2]);
        let g = game(GameMode::NineBall);
        assert_eq!(check_foul(&shot(Some(1), &[], &[]), &g, &balls), Some(Foul::NoRail));
        assert_eq!(check_foul(&shot(Some(1), &[], &[0]), &g, &balls), None);
    }

    #[test]
    fn same_inputs_same_verdict() {
        let balls = table_with(&[0, 1, 2, 3]);
        let g = game(GameMode::NineBall);
        let s = shot(Some(3), &[], &[3]);
        let first = check_foul(&s, &g, &balls);
        for _ in 0..10 {
            assert_eq!(check_foul(&s, &g, &balls), first);
        }
    }
}
