//! Geometry helpers for hit-testing markers and shaping route segments.

use bevy::prelude::*;

use crate::constants::{
    ARROW_HEAD_LENGTH, ARROW_HEAD_SPREAD, FORMATION_MAX_X, FORMATION_MAX_Y, FORMATION_MIN_X,
    FORMATION_MIN_Y,
};

use super::model::Player;

/// Check if a point lies strictly inside a marker of the given radius
pub fn hit_test(player: &Player, point: Vec2, radius: f32) -> bool {
    player.position.distance(point) < radius
}

/// Re-derive the cursor position from the last fixed point via its heading and length.
///
/// The result always lies on the straight line from `last_fixed` through `cursor`,
/// so re-applying it with the same cursor yields the same point.
pub fn extend_constrained(last_fixed: Vec2, cursor: Vec2) -> Vec2 {
    let delta = cursor - last_fixed;
    let angle = delta.y.atan2(delta.x);
    let length = delta.x.hypot(delta.y);
    last_fixed + Vec2::new(angle.cos(), angle.sin()) * length
}

/// The two stroke end points of an arrowhead drawn at `end`, pointing away from `start`
pub fn arrowhead(start: Vec2, end: Vec2) -> [Vec2; 2] {
    let delta = end - start;
    let angle = delta.y.atan2(delta.x);
    let stroke = |a: f32| end - Vec2::new(a.cos(), a.sin()) * ARROW_HEAD_LENGTH;
    [
        stroke(angle - ARROW_HEAD_SPREAD),
        stroke(angle + ARROW_HEAD_SPREAD),
    ]
}

/// Axis-aligned region that dragged markers must stay within
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FormationZone {
    pub min: Vec2,
    pub max: Vec2,
}

impl Default for FormationZone {
    fn default() -> Self {
        Self {
            min: Vec2::new(FORMATION_MIN_X, FORMATION_MIN_Y),
            max: Vec2::new(FORMATION_MAX_X, FORMATION_MAX_Y),
        }
    }
}

impl FormationZone {
    /// Bounds are inclusive on every edge
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::model::PlayerId;

    fn player_at(x: f32, y: f32) -> Player {
        Player::new(PlayerId(1), Vec2::new(x, y), Color::WHITE)
    }

    fn approx_eq(a: Vec2, b: Vec2) -> bool {
        a.distance(b) < 0.001
    }

    #[test]
    fn test_hit_test_inside() {
        let player = player_at(100.0, 100.0);
        assert!(hit_test(&player, Vec2::new(105.0, 105.0), 15.0));
        assert!(hit_test(&player, Vec2::new(100.0, 100.0), 15.0));
    }

    #[test]
    fn test_hit_test_boundary_is_a_miss() {
        let player = player_at(100.0, 100.0);
        assert!(!hit_test(&player, Vec2::new(115.0, 100.0), 15.0));
        assert!(!hit_test(&player, Vec2::new(100.0, 85.0), 15.0));
        assert!(hit_test(&player, Vec2::new(114.9, 100.0), 15.0));
    }

    #[test]
    fn test_hit_test_outside() {
        let player = player_at(100.0, 100.0);
        assert!(!hit_test(&player, Vec2::new(120.0, 120.0), 15.0));
    }

    #[test]
    fn test_extend_constrained_reaches_cursor() {
        let anchor = Vec2::new(300.0, 725.0);
        let cursor = Vec2::new(320.0, 700.0);
        assert!(approx_eq(extend_constrained(anchor, cursor), cursor));
    }

    #[test]
    fn test_extend_constrained_is_idempotent() {
        let anchor = Vec2::new(10.0, 20.0);
        let cursor = Vec2::new(-40.0, 95.5);
        let once = extend_constrained(anchor, cursor);
        let twice = extend_constrained(anchor, once);
        assert!(approx_eq(once, twice));
    }

    #[test]
    fn test_extend_constrained_zero_length() {
        let anchor = Vec2::new(50.0, 50.0);
        assert!(approx_eq(extend_constrained(anchor, anchor), anchor));
    }

    #[test]
    fn test_arrowhead_points_back_along_heading() {
        // Heading straight right: strokes fan back to the left, above and below
        let [a, b] = arrowhead(Vec2::new(0.0, 0.0), Vec2::new(100.0, 0.0));
        assert!(a.x < 100.0 && b.x < 100.0);
        assert!((a.y + b.y).abs() < 0.001);
        assert!((a.distance(Vec2::new(100.0, 0.0)) - ARROW_HEAD_LENGTH).abs() < 0.001);
        assert!((b.distance(Vec2::new(100.0, 0.0)) - ARROW_HEAD_LENGTH).abs() < 0.001);
    }

    #[test]
    fn test_formation_zone_is_inclusive() {
        let zone = FormationZone::default();
        assert!(zone.contains(Vec2::new(10.0, 640.0)));
        assert!(zone.contains(Vec2::new(590.0, 790.0)));
        assert!(!zone.contains(Vec2::new(9.9, 700.0)));
        assert!(!zone.contains(Vec2::new(300.0, 639.0)));
        assert!(!zone.contains(Vec2::new(300.0, 791.0)));
    }
}
