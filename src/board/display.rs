//! Live display: the board is rasterized into the texture of a single sprite.

use bevy::prelude::*;
use bevy::render::render_resource::{Extent3d, TextureDimension, TextureFormat};

use crate::constants::{SURFACE_HEIGHT, SURFACE_WIDTH};

use super::camera::surface_to_world;
use super::model::Board;
use super::raster::rasterize;
use super::render::{render, RenderMode};

#[derive(Component)]
pub struct BoardSurface;

pub fn spawn_board_surface(
    mut commands: Commands,
    board: Res<Board>,
    mut images: ResMut<Assets<Image>>,
) {
    let handle = images.add(display_image(&board));
    let center = surface_to_world(Vec2::new(SURFACE_WIDTH / 2.0, SURFACE_HEIGHT / 2.0));
    commands.spawn((
        Sprite::from_image(handle),
        Transform::from_translation(center.extend(0.0)),
        BoardSurface,
    ));
}

/// Re-rasterize after every board change
pub fn redraw_board_surface(
    board: Res<Board>,
    mut images: ResMut<Assets<Image>>,
    mut surfaces: Query<&mut Sprite, With<BoardSurface>>,
) {
    let Ok(mut sprite) = surfaces.single_mut() else {
        return;
    };
    // Replacing the handle drops the previous frame's texture
    sprite.image = images.add(display_image(&board));
}

fn display_image(board: &Board) -> Image {
    let pixels = rasterize(&render(board, RenderMode::Display));
    let (width, height) = pixels.dimensions();
    Image::new(
        Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        },
        TextureDimension::D2,
        pixels.into_raw(),
        TextureFormat::Rgba8UnormSrgb,
        default(),
    )
}
