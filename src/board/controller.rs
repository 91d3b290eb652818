//! State transitions driven by pointer, modifier and command inputs.
//!
//! Every transition is total: inputs that do not apply to the current state are
//! swallowed and reported as "no change".

use bevy::prelude::*;

use crate::constants::MARKER_RADIUS;

use super::geometry::{extend_constrained, hit_test};
use super::input::{BoardCommand, BoardInput};
use super::model::{AuthoringMode, Board, PlayerId, RoutePolicy};

impl Board {
    /// Apply one input. Returns true when the board needs to be redrawn.
    pub fn apply(&mut self, input: BoardInput) -> bool {
        match input {
            BoardInput::PointerPress { pos } => self.pointer_press(pos),
            BoardInput::PointerMove { pos } => self.pointer_move(pos),
            BoardInput::PointerRelease => self.pointer_release(),
            BoardInput::ModifierDown => self.modifier_down(),
            BoardInput::ModifierUp => self.modifier_up(),
            BoardInput::Command(command) => self.command(command),
        }
    }

    fn pointer_press(&mut self, pos: Vec2) -> bool {
        if self.interaction.shift_held {
            return self.grab_player(pos);
        }

        let Some(owner) = self.interaction.highlighted else {
            return false;
        };
        self.begin_authoring(owner, pos)
    }

    fn pointer_move(&mut self, pos: Vec2) -> bool {
        if self.interaction.shift_held {
            return match self.interaction.dragged {
                Some(id) => self.drag_player(id, pos),
                None => false,
            };
        }

        if self.interaction.is_drawing && self.interaction.highlighted.is_some() {
            return self.extend_active_route(pos);
        }

        false
    }

    fn pointer_release(&mut self) -> bool {
        let released_drag = self.interaction.dragged.take().is_some();
        let ended_gesture = !self.interaction.shift_held && self.end_gesture();
        released_drag || ended_gesture
    }

    fn modifier_down(&mut self) -> bool {
        if self.interaction.shift_held {
            return false;
        }
        self.interaction.shift_held = true;
        // Drawing never continues while the drag modifier is held
        self.end_gesture();
        true
    }

    fn modifier_up(&mut self) -> bool {
        if !self.interaction.shift_held {
            return false;
        }
        self.interaction.shift_held = false;
        self.interaction.dragged = None;
        true
    }

    fn command(&mut self, command: BoardCommand) -> bool {
        match command {
            BoardCommand::ToggleAuthoringMode => {
                self.interaction.mode = self.interaction.mode.toggled();
                debug!("Authoring mode: {}", self.interaction.mode.display_name());
                true
            }
            BoardCommand::DeleteHighlightedRoutes => self.delete_highlighted_routes(),
            BoardCommand::ResetBoard => {
                debug!("Resetting board ({} routes cleared)", self.routes.len());
                self.reset();
                true
            }
        }
    }

    /// Highlight (and start dragging) the first player under the pointer
    fn grab_player(&mut self, pos: Vec2) -> bool {
        let Some(id) = self
            .players
            .iter()
            .find(|p| hit_test(p, pos, MARKER_RADIUS))
            .map(|p| p.id)
        else {
            return false;
        };

        if self.interaction.highlighted != Some(id) {
            debug!("Highlighted player {}", id.0);
        }
        self.interaction.highlighted = Some(id);
        self.interaction.dragged = Some(id);
        true
    }

    /// Move a dragged player, carrying its routes along.
    /// Targets outside the formation zone are ignored.
    fn drag_player(&mut self, id: PlayerId, target: Vec2) -> bool {
        if !self.zone.contains(target) {
            return false;
        }

        let Some(player) = self.player_mut(id) else {
            return false;
        };
        let delta = target - player.position;
        if delta == Vec2::ZERO {
            return false;
        }
        player.position = target;

        for route in self.routes.iter_mut().filter(|r| r.owner == id) {
            route.translate(delta);
        }
        true
    }

    fn begin_authoring(&mut self, owner: PlayerId, pos: Vec2) -> bool {
        let reusable = match self.policy {
            RoutePolicy::ContinuePerPlayer => self
                .active_route()
                .filter(|r| r.owner == owner)
                .map(|r| r.id),
            RoutePolicy::NewPerGesture => None,
        };

        let route_id = match reusable {
            Some(id) => id,
            None => {
                let seed = match self.policy {
                    RoutePolicy::ContinuePerPlayer => match self.player(owner) {
                        Some(player) => player.position,
                        None => return false,
                    },
                    RoutePolicy::NewPerGesture => pos,
                };
                let Some(id) = self.start_route(owner, seed) else {
                    return false;
                };
                debug!("Started route {} for player {}", id.0, owner.0);
                self.interaction.active_route = Some(id);
                id
            }
        };

        if let Some(route) = self.route_mut(route_id)
            && route.points.last() != Some(&pos)
        {
            route.points.push(pos);
        }

        self.interaction.is_drawing = true;
        true
    }

    fn extend_active_route(&mut self, cursor: Vec2) -> bool {
        let mode = self.interaction.mode;
        let Some(id) = self.interaction.active_route else {
            return false;
        };
        let Some(route) = self.route_mut(id) else {
            return false;
        };

        match mode {
            AuthoringMode::Freehand => route.points.push(cursor),
            AuthoringMode::Geometric => {
                let len = route.points.len();
                let Some(&anchor) = route.points.get(len.saturating_sub(2)) else {
                    return false;
                };
                let end = extend_constrained(anchor, cursor);
                if len < 2 {
                    route.points.push(end);
                } else {
                    route.points[len - 1] = end;
                }
            }
        }
        true
    }

    fn delete_highlighted_routes(&mut self) -> bool {
        let Some(owner) = self.interaction.highlighted else {
            return false;
        };

        let before = self.routes.len();
        self.routes.retain(|r| r.owner != owner);
        self.interaction.active_route = None;
        self.interaction.is_drawing = false;
        debug!(
            "Deleted {} routes of player {}",
            before - self.routes.len(),
            owner.0
        );
        true
    }

    /// Finish the current authoring gesture, if any
    fn end_gesture(&mut self) -> bool {
        if !self.interaction.is_drawing {
            return false;
        }
        self.interaction.is_drawing = false;
        if self.policy == RoutePolicy::NewPerGesture {
            self.interaction.active_route = None;
        }
        true
    }
}
