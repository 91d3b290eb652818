//! The play diagram: players, their routes, and the editor that manipulates them.
//!
//! The model, controller and renderer are plain Rust with no ECS dependencies,
//! so the whole interaction state machine can be driven from tests.
//!
//! ## Module Structure
//!
//! - [`model`] - Players, routes, interaction state and the [`Board`] context
//! - [`geometry`] - Hit-testing, constrained extension and arrowhead math
//! - [`input`] - The closed [`BoardInput`] event set
//! - [`controller`] - [`Board::apply`], the single transition function
//! - [`render`] - Board to [`render::Frame`] draw commands, for display or export
//! - [`raster`] - Frame to RGBA pixels
//! - [`pointer`] - Bevy systems bridging mouse/keyboard into [`BoardInput`]
//! - [`display`] - Sprite that shows the rasterized display frame

mod camera;
mod conditions;
mod controller;
mod display;
pub mod geometry;
pub mod input;
pub mod model;
mod params;
mod pointer;
pub mod raster;
pub mod render;


pub use input::{BoardCommand, BoardInput};
pub use model::{Board, RoutePolicy};
pub use raster::rasterize;
pub use render::{render, RenderMode};

use bevy::prelude::*;

use crate::config::{AppConfig, ConfigLoaded, SetRoutePolicyRequest};

/// Use the persisted authoring policy for the session's board
fn apply_config_policy(config: Res<AppConfig>, mut board: ResMut<Board>) {
    board.policy = config.data.route_policy;
    debug!("Route policy: {}", board.policy.display_name());
}

/// Follow route policy changes made from the toolbar
fn sync_route_policy(mut events: MessageReader<SetRoutePolicyRequest>, mut board: ResMut<Board>) {
    for event in events.read() {
        board.policy = event.policy;
    }
}

pub struct BoardPlugin;

impl Plugin for BoardPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<Board>()
            .add_message::<BoardInput>()
            .add_systems(
                Startup,
                (
                    camera::spawn_camera,
                    (apply_config_policy, display::spawn_board_surface)
                        .chain()
                        .after(ConfigLoaded),
                ),
            )
            .add_systems(
                Update,
                (
                    pointer::collect_board_input,
                    pointer::handle_board_shortcuts.run_if(conditions::no_dialog_open),
                    pointer::apply_board_input,
                    display::redraw_board_surface.run_if(resource_changed::<Board>),
                )
                    .chain(),
            )
            .add_systems(
                Update,
                sync_route_policy.run_if(on_message::<SetRoutePolicyRequest>),
            )
            .add_systems(Last, pointer::teardown_on_exit);
    }
}
