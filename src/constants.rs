//! Centralized constants used across the application.
//!
//! This module contains magic numbers and configuration values that are used
//! in multiple places or would benefit from being named constants.

/// Drawing surface width in surface units (pixels at 1:1 export scale)
pub const SURFACE_WIDTH: f32 = 600.0;

/// Drawing surface height in surface units
pub const SURFACE_HEIGHT: f32 = 800.0;

/// Height reserved above the surface for the toolbar panel
pub const TOOLBAR_HEIGHT: f32 = 48.0;

/// Default window width in pixels
pub const DEFAULT_WINDOW_WIDTH: f32 = SURFACE_WIDTH;

/// Default window height in pixels (surface plus toolbar)
pub const DEFAULT_WINDOW_HEIGHT: f32 = SURFACE_HEIGHT + TOOLBAR_HEIGHT;

/// Marker radius, used both for drawing and hit-testing.
/// The smaller 10-unit preset is not exposed.
pub const MARKER_RADIUS: f32 = 15.0;

/// Length of each arrowhead stroke
pub const ARROW_HEAD_LENGTH: f32 = 10.0;

/// Arrowhead spread on each side of the route heading (30 degrees)
pub const ARROW_HEAD_SPREAD: f32 = std::f32::consts::PI / 6.0;

/// Stroke width for routes and arrowheads
pub const ROUTE_STROKE_WIDTH: f32 = 4.0;

/// Stroke width for the horizontal field lines
pub const FIELD_LINE_WIDTH: f32 = 2.0;

/// Number of evenly spaced field lines
pub const FIELD_LINE_COUNT: u32 = 4;

/// Outline width for the highlighted marker
pub const HIGHLIGHT_OUTLINE_WIDTH: f32 = 4.0;

/// Outline width for every other marker
pub const MARKER_OUTLINE_WIDTH: f32 = 2.0;

/// Formation zone bounds (inclusive) that dragged markers must stay within
pub const FORMATION_MIN_X: f32 = 10.0;
pub const FORMATION_MAX_X: f32 = 590.0;
pub const FORMATION_MIN_Y: f32 = 640.0;
pub const FORMATION_MAX_Y: f32 = 790.0;

/// First play number handed out when no counter has been persisted yet
pub const FIRST_PLAY_INDEX: u32 = 1;
