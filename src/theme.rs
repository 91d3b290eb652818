//! Centralized color theme for the application.
//!
//! This module provides all colors used throughout the editor UI and rendering.
//! Modify values here to change the application's color scheme.

use bevy::prelude::Color;
use bevy_egui::egui;

// ============================================================================
// Field Colors
// ============================================================================

/// Dark field background for the live display
pub const FIELD_BACKGROUND: Color = Color::srgb_u8(0x1a, 0x1a, 0x1a);

/// White field lines on the dark display background
pub const FIELD_LINE: Color = Color::WHITE;

// ============================================================================
// Marker Colors
// ============================================================================

/// Outline for the highlighted marker
pub const HIGHLIGHT_OUTLINE: Color = Color::srgb_u8(0xff, 0xff, 0x00);

/// Thin outline for every other marker on the live display
pub const MARKER_OUTLINE: Color = Color::WHITE;

/// Marker colors, in player creation order
pub const PLAYER_COLORS: [Color; 5] = [
    Color::srgb_u8(0xff, 0x80, 0x00),
    Color::srgb_u8(0xad, 0x1e, 0xad),
    Color::srgb_u8(0x69, 0x61, 0x61),
    Color::srgb_u8(0x14, 0xc1, 0x9c),
    Color::srgb_u8(0xb5, 0x00, 0x00),
];

// ============================================================================
// Export Colors
// ============================================================================

/// Exported images always sit on a light background
pub const EXPORT_BACKGROUND: Color = Color::WHITE;

/// Ink for field lines and outlines in every export, and for everything in
/// monochrome exports
pub const EXPORT_INK: Color = Color::BLACK;

// ============================================================================
// UI Colors (egui)
// ============================================================================

pub mod ui {
    use bevy_egui::egui;

    /// Light grey for label text
    pub const LABEL_TEXT: egui::Color32 = egui::Color32::LIGHT_GRAY;

    /// Grey for help/hint text
    pub const HINT_TEXT: egui::Color32 = egui::Color32::GRAY;

    /// Red for error messages
    pub const ERROR_TEXT: egui::Color32 = egui::Color32::RED;

    /// Green for the last successful export
    pub const SUCCESS_TEXT: egui::Color32 = egui::Color32::from_rgb(100, 200, 100);
}

// ============================================================================
// Color Conversion Utilities
// ============================================================================

/// Convert a Bevy Color to egui Color32 (fully opaque)
pub fn bevy_to_egui_opaque(color: Color) -> egui::Color32 {
    let [r, g, b, _] = color_to_rgba8(color);
    egui::Color32::from_rgb(r, g, b)
}

/// Convert a Bevy Color to 8-bit sRGBA channels
pub fn color_to_rgba8(color: Color) -> [u8; 4] {
    let srgba = color.to_srgba();
    let channel = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
    [
        channel(srgba.red),
        channel(srgba.green),
        channel(srgba.blue),
        channel(srgba.alpha),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_to_rgba8_primaries() {
        assert_eq!(color_to_rgba8(Color::WHITE), [255, 255, 255, 255]);
        assert_eq!(color_to_rgba8(Color::BLACK), [0, 0, 0, 255]);
    }

    #[test]
    fn test_player_colors_roundtrip_to_hex() {
        assert_eq!(color_to_rgba8(PLAYER_COLORS[0]), [0xff, 0x80, 0x00, 255]);
        assert_eq!(color_to_rgba8(PLAYER_COLORS[4]), [0xb5, 0x00, 0x00, 255]);
    }

    #[test]
    fn test_background_is_dark_for_display() {
        let [r, g, b, _] = color_to_rgba8(FIELD_BACKGROUND);
        assert_eq!((r, g, b), (0x1a, 0x1a, 0x1a));
    }
}
