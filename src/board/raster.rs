//! Software rasterizer for [`Frame`]s.
//!
//! Strokes are drawn by stamping discs along each segment, which gives round
//! caps and joins for free.

use bevy::prelude::*;
use image::{Rgba, RgbaImage};

use crate::theme::color_to_rgba8;

use super::render::{DrawCommand, Frame};

/// Rasterize a frame into a new RGBA image of the frame's size
pub fn rasterize(frame: &Frame) -> RgbaImage {
    let mut img = RgbaImage::new(frame.width, frame.height);

    for command in &frame.commands {
        match command {
            DrawCommand::Clear { color } => {
                let pixel = Rgba(color_to_rgba8(*color));
                for p in img.pixels_mut() {
                    *p = pixel;
                }
            }
            DrawCommand::Line {
                from,
                to,
                color,
                width,
            } => draw_line(&mut img, *from, *to, *color, *width),
            DrawCommand::Polyline {
                points,
                color,
                width,
            } => {
                for pair in points.windows(2) {
                    draw_line(&mut img, pair[0], pair[1], *color, *width);
                }
            }
            DrawCommand::Disc {
                center,
                radius,
                fill,
                stroke,
                stroke_width,
            } => {
                fill_disc(&mut img, *center, *radius, *fill);
                stroke_ring(&mut img, *center, *radius, *stroke, *stroke_width);
            }
        }
    }

    img
}

fn blend_pixel(img: &mut RgbaImage, x: u32, y: u32, color: [u8; 4]) {
    let [r, g, b, a] = color;
    if a == 0 {
        return;
    }
    if a == 255 {
        img.put_pixel(x, y, Rgba(color));
        return;
    }
    let dst = img.get_pixel(x, y).0;
    let src_a = a as f32 / 255.0;
    let dst_a = dst[3] as f32 / 255.0;
    let out_a = src_a + dst_a * (1.0 - src_a);
    if out_a <= 0.0 {
        return;
    }
    let blend = |src: u8, dst: u8| {
        let src_f = src as f32 / 255.0;
        let dst_f = dst as f32 / 255.0;
        ((src_f * src_a + dst_f * dst_a * (1.0 - src_a)) / out_a * 255.0)
            .round()
            .clamp(0.0, 255.0) as u8
    };
    img.put_pixel(
        x,
        y,
        Rgba([
            blend(r, dst[0]),
            blend(g, dst[1]),
            blend(b, dst[2]),
            (out_a * 255.0) as u8,
        ]),
    );
}

/// Visit every pixel whose center lies within `reach` of `center`
fn for_each_pixel_near(
    img: &RgbaImage,
    center: Vec2,
    reach: f32,
    mut visit: impl FnMut(u32, u32, f32),
) {
    if img.width() == 0 || img.height() == 0 {
        return;
    }
    let max_x = (img.width() - 1) as f32;
    let max_y = (img.height() - 1) as f32;
    let min_px = (center.x - reach).floor().clamp(0.0, max_x) as u32;
    let max_px = (center.x + reach).ceil().clamp(0.0, max_x) as u32;
    let min_py = (center.y - reach).floor().clamp(0.0, max_y) as u32;
    let max_py = (center.y + reach).ceil().clamp(0.0, max_y) as u32;

    for y in min_py..=max_py {
        for x in min_px..=max_px {
            let d = Vec2::new(x as f32 + 0.5, y as f32 + 0.5).distance(center);
            if d <= reach {
                visit(x, y, d);
            }
        }
    }
}

fn fill_disc(img: &mut RgbaImage, center: Vec2, radius: f32, color: Color) {
    if radius <= 0.0 {
        return;
    }
    let rgba = color_to_rgba8(color);
    let mut hits = Vec::new();
    for_each_pixel_near(img, center, radius, |x, y, _| hits.push((x, y)));
    for (x, y) in hits {
        blend_pixel(img, x, y, rgba);
    }
}

/// Outline centered on the circle's edge, half inside and half outside
fn stroke_ring(img: &mut RgbaImage, center: Vec2, radius: f32, color: Color, width: f32) {
    if width <= 0.0 {
        return;
    }
    let rgba = color_to_rgba8(color);
    let half = width / 2.0;
    let mut hits = Vec::new();
    for_each_pixel_near(img, center, radius + half, |x, y, d| {
        if (d - radius).abs() <= half {
            hits.push((x, y));
        }
    });
    for (x, y) in hits {
        blend_pixel(img, x, y, rgba);
    }
}

fn draw_line(img: &mut RgbaImage, start: Vec2, end: Vec2, color: Color, width: f32) {
    let delta = end - start;
    let steps = delta.x.abs().max(delta.y.abs()).ceil().max(1.0) as i32;
    let radius = (width / 2.0).max(0.5);
    for i in 0..=steps {
        let t = i as f32 / steps as f32;
        fill_disc(img, start + delta * t, radius, color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::model::{Board, PlayerId};
    use crate::board::render::{render, RenderMode};
    use crate::board::BoardInput;

    fn pixel(img: &RgbaImage, x: u32, y: u32) -> [u8; 4] {
        img.get_pixel(x, y).0
    }

    #[test]
    fn test_frame_size_matches_surface() {
        let img = rasterize(&render(&Board::default(), RenderMode::Display));
        assert_eq!(img.width(), 600);
        assert_eq!(img.height(), 800);
    }

    #[test]
    fn test_display_background_is_dark() {
        let img = rasterize(&render(&Board::default(), RenderMode::Display));
        assert_eq!(pixel(&img, 5, 5), [0x1a, 0x1a, 0x1a, 255]);
    }

    #[test]
    fn test_export_background_is_white() {
        for monochrome in [true, false] {
            let img = rasterize(&render(&Board::default(), RenderMode::Export { monochrome }));
            assert_eq!(pixel(&img, 5, 5), [255, 255, 255, 255]);
        }
    }

    #[test]
    fn test_field_lines_are_drawn() {
        let img = rasterize(&render(&Board::default(), RenderMode::Display));
        // Lines sit at y = 160, 320, 480, 640
        assert_eq!(pixel(&img, 50, 160), [255, 255, 255, 255]);
        assert_eq!(pixel(&img, 50, 320), [255, 255, 255, 255]);
        assert_eq!(pixel(&img, 50, 240), [0x1a, 0x1a, 0x1a, 255]);
    }

    #[test]
    fn test_marker_center_uses_player_color() {
        let board = Board::default();
        let img = rasterize(&render(&board, RenderMode::Display));
        // Player 5 sits at (300, 725)
        assert_eq!(pixel(&img, 300, 725), [0xb5, 0x00, 0x00, 255]);
    }

    #[test]
    fn test_monochrome_marker_is_black() {
        let img = rasterize(&render(&Board::default(), RenderMode::Export { monochrome: true }));
        assert_eq!(pixel(&img, 300, 725), [0, 0, 0, 255]);
    }

    #[test]
    fn test_route_stroke_is_rasterized() {
        let mut board = Board::default();
        board.interaction.highlighted = Some(PlayerId(1));
        // Player 1 sits at (125, 640); draw straight up to (125, 400)
        board.apply(BoardInput::PointerPress {
            pos: Vec2::new(125.0, 500.0),
        });
        board.apply(BoardInput::PointerMove {
            pos: Vec2::new(125.0, 400.0),
        });
        let img = rasterize(&render(&board, RenderMode::Display));
        assert_eq!(pixel(&img, 125, 450), [0xff, 0x80, 0x00, 255]);
    }

    #[test]
    fn test_lines_outside_surface_are_clipped() {
        let frame = Frame {
            width: 10,
            height: 10,
            commands: vec![DrawCommand::Line {
                from: Vec2::new(-50.0, 5.0),
                to: Vec2::new(50.0, 5.0),
                color: Color::WHITE,
                width: 2.0,
            }],
        };
        let img = rasterize(&frame);
        assert_eq!(pixel(&img, 9, 5), [255, 255, 255, 255]);
    }
}
