use bevy::prelude::*;

use crate::constants::{SURFACE_HEIGHT, SURFACE_WIDTH, TOOLBAR_HEIGHT};

#[derive(Component)]
pub struct BoardCamera;

/// The surface is centered on the world origin; lift the camera so the
/// toolbar panel sits above the surface instead of covering it.
pub fn spawn_camera(mut commands: Commands) {
    commands.spawn((
        Camera2d,
        BoardCamera,
        Transform::from_translation(Vec3::new(0.0, TOOLBAR_HEIGHT / 2.0, 1000.0)),
    ));
}

/// Convert a world position to surface coordinates (origin top-left, y down)
pub fn world_to_surface(world: Vec2) -> Vec2 {
    Vec2::new(world.x + SURFACE_WIDTH / 2.0, SURFACE_HEIGHT / 2.0 - world.y)
}

/// Convert surface coordinates to a world position (origin centered, y up)
pub fn surface_to_world(surface: Vec2) -> Vec2 {
    Vec2::new(surface.x - SURFACE_WIDTH / 2.0, SURFACE_HEIGHT / 2.0 - surface.y)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_surface_corners_map_to_world() {
        assert_eq!(surface_to_world(Vec2::ZERO), Vec2::new(-300.0, 400.0));
        assert_eq!(
            surface_to_world(Vec2::new(600.0, 800.0)),
            Vec2::new(300.0, -400.0)
        );
        assert_eq!(surface_to_world(Vec2::new(300.0, 400.0)), Vec2::ZERO);
    }

    #[test]
    fn test_world_to_surface_inverts() {
        let p = Vec2::new(300.0, 725.0);
        assert_eq!(world_to_surface(surface_to_world(p)), p);
    }
}
