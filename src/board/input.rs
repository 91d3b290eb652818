//! Closed set of inputs the board controller understands.

use bevy::prelude::*;

/// Discrete triggers coming from the toolbar or keyboard shortcuts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardCommand {
    ToggleAuthoringMode,
    DeleteHighlightedRoutes,
    ResetBoard,
}

/// Every event that can mutate the board. Positions are in surface coordinates.
#[derive(Message, Debug, Clone, Copy, PartialEq)]
pub enum BoardInput {
    PointerPress { pos: Vec2 },
    PointerMove { pos: Vec2 },
    PointerRelease,
    ModifierDown,
    ModifierUp,
    Command(BoardCommand),
}
