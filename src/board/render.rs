//! Pure rendering: turns a board into an ordered list of draw commands.
//!
//! The same frame feeds the live display and image export, so the only
//! difference between them is the [`RenderMode`] passed in.

use bevy::prelude::*;

use crate::constants::{
    FIELD_LINE_COUNT, FIELD_LINE_WIDTH, HIGHLIGHT_OUTLINE_WIDTH, MARKER_OUTLINE_WIDTH,
    MARKER_RADIUS, ROUTE_STROKE_WIDTH, SURFACE_HEIGHT, SURFACE_WIDTH,
};
use crate::theme;

use super::geometry::arrowhead;
use super::model::{Board, Player, Route};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderMode {
    /// Dark live view in full color
    #[default]
    Display,
    /// Light background for saved images, optionally all-black ink
    Export { monochrome: bool },
}

impl RenderMode {
    fn is_export(&self) -> bool {
        matches!(self, RenderMode::Export { .. })
    }

    fn is_monochrome(&self) -> bool {
        matches!(self, RenderMode::Export { monochrome: true })
    }

    fn background(&self) -> Color {
        if self.is_export() {
            theme::EXPORT_BACKGROUND
        } else {
            theme::FIELD_BACKGROUND
        }
    }

    fn field_line(&self) -> Color {
        if self.is_export() {
            theme::EXPORT_INK
        } else {
            theme::FIELD_LINE
        }
    }

    /// Item colors survive everywhere except monochrome export
    fn ink(&self, color: Color) -> Color {
        if self.is_monochrome() {
            theme::EXPORT_INK
        } else {
            color
        }
    }

    fn neutral_outline(&self) -> Color {
        if self.is_export() {
            theme::EXPORT_INK
        } else {
            theme::MARKER_OUTLINE
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Fill the whole surface
    Clear { color: Color },
    /// Straight stroke with round ends
    Line {
        from: Vec2,
        to: Vec2,
        color: Color,
        width: f32,
    },
    /// Connected strokes with round caps and joins
    Polyline {
        points: Vec<Vec2>,
        color: Color,
        width: f32,
    },
    /// Filled disc with a centered outline stroke
    Disc {
        center: Vec2,
        radius: f32,
        fill: Color,
        stroke: Color,
        stroke_width: f32,
    },
}

/// A rendered snapshot of the board, in draw order
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub width: u32,
    pub height: u32,
    pub commands: Vec<DrawCommand>,
}

/// Render field, then routes, then players so markers sit above route lines
pub fn render(board: &Board, mode: RenderMode) -> Frame {
    let mut commands = Vec::new();

    draw_field(&mut commands, mode);
    for route in &board.routes {
        draw_route(&mut commands, route, mode);
    }
    for player in &board.players {
        let highlighted = board.interaction.highlighted == Some(player.id);
        draw_player(&mut commands, player, highlighted, mode);
    }

    Frame {
        width: SURFACE_WIDTH as u32,
        height: SURFACE_HEIGHT as u32,
        commands,
    }
}

fn draw_field(commands: &mut Vec<DrawCommand>, mode: RenderMode) {
    commands.push(DrawCommand::Clear {
        color: mode.background(),
    });

    let spacing = SURFACE_HEIGHT / (FIELD_LINE_COUNT + 1) as f32;
    for i in 1..=FIELD_LINE_COUNT {
        let y = spacing * i as f32;
        commands.push(DrawCommand::Line {
            from: Vec2::new(0.0, y),
            to: Vec2::new(SURFACE_WIDTH, y),
            color: mode.field_line(),
            width: FIELD_LINE_WIDTH,
        });
    }
}

fn draw_route(commands: &mut Vec<DrawCommand>, route: &Route, mode: RenderMode) {
    if !route.is_visible() {
        return;
    }

    let color = mode.ink(route.color);
    commands.push(DrawCommand::Polyline {
        points: route.points.clone(),
        color,
        width: ROUTE_STROKE_WIDTH,
    });

    let n = route.points.len();
    let (before, end) = (route.points[n - 2], route.points[n - 1]);
    for tip in arrowhead(before, end) {
        commands.push(DrawCommand::Line {
            from: end,
            to: tip,
            color,
            width: ROUTE_STROKE_WIDTH,
        });
    }
}

fn draw_player(
    commands: &mut Vec<DrawCommand>,
    player: &Player,
    highlighted: bool,
    mode: RenderMode,
) {
    let (stroke, stroke_width) = if highlighted {
        (mode.ink(theme::HIGHLIGHT_OUTLINE), HIGHLIGHT_OUTLINE_WIDTH)
    } else {
        (mode.neutral_outline(), MARKER_OUTLINE_WIDTH)
    };

    commands.push(DrawCommand::Disc {
        center: player.position,
        radius: MARKER_RADIUS,
        fill: mode.ink(player.color),
        stroke,
        stroke_width,
    });
}
