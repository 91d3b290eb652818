//! Players, routes and the interaction state that ties them together.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::theme::PLAYER_COLORS;

use super::geometry::FormationZone;

/// Stable player identity for the lifetime of a board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PlayerId(pub u32);

/// Identity of a route within its board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RouteId(pub u64);

#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    pub id: PlayerId,
    pub position: Vec2,
    pub home: Vec2,
    pub color: Color,
}

impl Player {
    pub fn new(id: PlayerId, home: Vec2, color: Color) -> Self {
        Self {
            id,
            position: home,
            home,
            color,
        }
    }
}

/// Initial layout: four markers on the line of scrimmage plus one behind the center
pub fn default_players() -> Vec<Player> {
    let homes = [
        Vec2::new(125.0, 640.0),
        Vec2::new(220.0, 640.0),
        Vec2::new(300.0, 640.0),
        Vec2::new(450.0, 640.0),
        Vec2::new(300.0, 725.0),
    ];

    homes
        .into_iter()
        .zip(PLAYER_COLORS)
        .enumerate()
        .map(|(i, (home, color))| Player::new(PlayerId(i as u32 + 1), home, color))
        .collect()
}

/// A polyline owned by one player. The color is copied from the owner at creation.
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    pub id: RouteId,
    pub owner: PlayerId,
    pub color: Color,
    pub points: Vec<Vec2>,
}

impl Route {
    /// Routes with fewer than two points exist but draw nothing
    pub fn is_visible(&self) -> bool {
        self.points.len() >= 2
    }

    pub fn translate(&mut self, delta: Vec2) {
        for point in &mut self.points {
            *point += delta;
        }
    }
}

/// How pointer motion extends the active route
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthoringMode {
    /// Every move sample becomes a new point
    #[default]
    Freehand,
    /// The trailing segment is a single straight line to the cursor
    Geometric,
}

impl AuthoringMode {
    pub fn display_name(&self) -> &'static str {
        match self {
            AuthoringMode::Freehand => "Freehand",
            AuthoringMode::Geometric => "Geometric",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            AuthoringMode::Freehand => AuthoringMode::Geometric,
            AuthoringMode::Geometric => AuthoringMode::Freehand,
        }
    }
}

/// Whether successive press gestures extend one route per player or start new ones
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RoutePolicy {
    /// Presses keep appending to the highlighted player's active route.
    /// A new route starts at the player's marker.
    #[default]
    ContinuePerPlayer,
    /// Every press starts a fresh route at the press point
    NewPerGesture,
}

impl RoutePolicy {
    pub fn display_name(&self) -> &'static str {
        match self {
            RoutePolicy::ContinuePerPlayer => "Continue route",
            RoutePolicy::NewPerGesture => "New route per stroke",
        }
    }

    pub fn all() -> &'static [RoutePolicy] {
        &[RoutePolicy::ContinuePerPlayer, RoutePolicy::NewPerGesture]
    }
}

/// Transient pointer/keyboard state
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InteractionState {
    pub highlighted: Option<PlayerId>,
    pub dragged: Option<PlayerId>,
    pub active_route: Option<RouteId>,
    pub is_drawing: bool,
    pub mode: AuthoringMode,
    pub shift_held: bool,
}

/// The state the controller is in, derived from the interaction flags
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractionPhase {
    Idle,
    Highlighting,
    Authoring(AuthoringMode),
    Dragging,
}

impl InteractionPhase {
    pub fn display_name(&self) -> &'static str {
        match self {
            InteractionPhase::Idle => "Shift+click a player to select",
            InteractionPhase::Highlighting => "Click and drag to draw a route",
            InteractionPhase::Authoring(AuthoringMode::Freehand) => "Drawing (freehand)",
            InteractionPhase::Authoring(AuthoringMode::Geometric) => "Drawing (geometric)",
            InteractionPhase::Dragging => "Moving player",
        }
    }
}

/// The whole editable diagram: players, their routes and the interaction state.
#[derive(Resource, Debug, Clone)]
pub struct Board {
    pub players: Vec<Player>,
    pub routes: Vec<Route>,
    pub interaction: InteractionState,
    pub policy: RoutePolicy,
    pub zone: FormationZone,
    next_route_id: u64,
}

impl Default for Board {
    fn default() -> Self {
        Self::new(RoutePolicy::default())
    }
}

impl Board {
    pub fn new(policy: RoutePolicy) -> Self {
        Self {
            players: default_players(),
            routes: Vec::new(),
            interaction: InteractionState::default(),
            policy,
            zone: FormationZone::default(),
            next_route_id: 0,
        }
    }

    /// Restore every player to its home, drop all routes and clear the selection.
    /// Authoring mode and the held modifier survive.
    pub fn reset(&mut self) {
        for player in &mut self.players {
            player.position = player.home;
        }
        self.routes.clear();
        self.interaction.highlighted = None;
        self.interaction.dragged = None;
        self.interaction.active_route = None;
        self.interaction.is_drawing = false;
    }

    /// Release routes and transient state ahead of shutdown.
    /// Returns how many routes were discarded.
    pub fn teardown(&mut self) -> usize {
        let discarded = self.routes.len();
        self.routes.clear();
        self.interaction = InteractionState::default();
        discarded
    }

    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    pub fn player_mut(&mut self, id: PlayerId) -> Option<&mut Player> {
        self.players.iter_mut().find(|p| p.id == id)
    }

    pub fn highlighted_player(&self) -> Option<&Player> {
        self.interaction.highlighted.and_then(|id| self.player(id))
    }

    pub fn route(&self, id: RouteId) -> Option<&Route> {
        self.routes.iter().find(|r| r.id == id)
    }

    pub fn route_mut(&mut self, id: RouteId) -> Option<&mut Route> {
        self.routes.iter_mut().find(|r| r.id == id)
    }

    pub fn active_route(&self) -> Option<&Route> {
        self.interaction.active_route.and_then(|id| self.route(id))
    }

    pub fn routes_of(&self, owner: PlayerId) -> impl Iterator<Item = &Route> {
        self.routes.iter().filter(move |r| r.owner == owner)
    }

    pub fn mode(&self) -> AuthoringMode {
        self.interaction.mode
    }

    pub fn phase(&self) -> InteractionPhase {
        let state = &self.interaction;
        if state.dragged.is_some() {
            InteractionPhase::Dragging
        } else if state.is_drawing {
            InteractionPhase::Authoring(state.mode)
        } else if state.highlighted.is_some() {
            InteractionPhase::Highlighting
        } else {
            InteractionPhase::Idle
        }
    }

    /// Append a new route for `owner` seeded with `seed` and return its id
    pub(super) fn start_route(&mut self, owner: PlayerId, seed: Vec2) -> Option<RouteId> {
        let color = self.player(owner)?.color;
        let id = RouteId(self.next_route_id);
        self.next_route_id += 1;
        self.routes.push(Route {
            id,
            owner,
            color,
            points: vec![seed],
        });
        Some(id)
    }
}
