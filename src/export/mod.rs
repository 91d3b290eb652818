//! Saving the current play as a numbered PNG.
//!
//! The board is rendered in export mode and rasterized; a [`FrameSink`] writes
//! the pixels, and a [`PlayCounter`] supplies the number embedded in the
//! filename. A failed write never uses up a number.

use bevy::prelude::*;
use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder, RgbaImage};
use std::fs::OpenOptions;
use std::io::{BufWriter, ErrorKind, Write};
use std::path::PathBuf;

use crate::board::{rasterize, render, Board, RenderMode};
use crate::config::{AppConfig, SaveConfigRequest};
use crate::constants::FIRST_PLAY_INDEX;

/// Source of play numbers for exported filenames
pub trait PlayCounter {
    /// The number the next export will use
    fn peek(&self) -> u32;
    /// Return the current number and persist its successor
    fn next(&mut self) -> u32;
}

impl PlayCounter for AppConfig {
    fn peek(&self) -> u32 {
        self.data.play_index()
    }

    fn next(&mut self) -> u32 {
        let current = self.data.play_index();
        self.data.next_play_index = current.saturating_add(1);
        self.dirty = true;
        current
    }
}

/// Destination for rasterized frames
pub trait FrameSink {
    /// Write a new file. Never replaces an existing one.
    fn export_frame(&mut self, image: &RgbaImage, filename: &str) -> Result<PathBuf, String>;

    /// Whether `filename` already holds an earlier export
    fn is_taken(&self, _filename: &str) -> bool {
        false
    }
}

/// Writes frames as PNG files into a directory, creating it on demand
pub struct PngFileSink {
    pub dir: PathBuf,
}

impl FrameSink for PngFileSink {
    fn export_frame(&mut self, image: &RgbaImage, filename: &str) -> Result<PathBuf, String> {
        std::fs::create_dir_all(&self.dir)
            .map_err(|e| format!("Failed to create export directory {:?}: {}", self.dir, e))?;
        let path = self.dir.join(filename);

        let file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .map_err(|e| match e.kind() {
                ErrorKind::AlreadyExists => format!("{:?} already exists", path),
                _ => format!("Failed to create {:?}: {}", path, e),
            })?;

        let (width, height) = image.dimensions();
        let mut writer = BufWriter::new(file);
        let encoded = PngEncoder::new(&mut writer)
            .write_image(image.as_raw(), width, height, ExtendedColorType::Rgba8)
            .map_err(|e| e.to_string())
            .and_then(|_| writer.flush().map_err(|e| e.to_string()));
        if let Err(e) = encoded {
            // Don't leave a truncated image behind under a play number
            let _ = std::fs::remove_file(&path);
            return Err(format!("Failed to write {:?}: {}", path, e));
        }
        Ok(path)
    }

    fn is_taken(&self, filename: &str) -> bool {
        self.dir.join(filename).exists()
    }
}

pub fn play_filename(index: u32) -> String {
    format!("playbook_play {}.png", index)
}

/// Render, rasterize and write the board, then advance the counter.
///
/// Numbers whose file already exists (e.g. after the config was reset) are
/// skipped. Returns where the image went. On a failed write the counter is left
/// untouched so the next attempt reuses the same number.
pub fn export_play(
    board: &Board,
    monochrome: bool,
    counter: &mut impl PlayCounter,
    sink: &mut impl FrameSink,
) -> Result<PathBuf, String> {
    let frame = render(board, RenderMode::Export { monochrome });
    let image = rasterize(&frame);

    let mut index = counter.peek().max(FIRST_PLAY_INDEX);
    while sink.is_taken(&play_filename(index)) {
        if index == u32::MAX {
            return Err("No free play number left".to_string());
        }
        debug!("Skipping play {}, file already exists", index);
        counter.next();
        index = counter.peek().max(FIRST_PLAY_INDEX);
    }

    let path = sink.export_frame(&image, &play_filename(index))?;
    counter.next();
    Ok(path)
}

/// Message sent by the save dialog once the user picked an export style
#[derive(Message, Debug, Clone, Copy)]
pub struct ExportPlayRequest {
    pub monochrome: bool,
}

/// Outcome of the most recent export, shown by the toolbar and error dialog
#[derive(Resource, Default)]
pub struct ExportStatus {
    pub last_path: Option<PathBuf>,
    pub error: Option<String>,
}

fn export_play_system(
    mut events: MessageReader<ExportPlayRequest>,
    board: Res<Board>,
    mut config: ResMut<AppConfig>,
    mut status: ResMut<ExportStatus>,
    mut save_events: MessageWriter<SaveConfigRequest>,
) {
    for event in events.read() {
        let mut sink = PngFileSink {
            dir: config.data.export_dir(),
        };
        match export_play(&board, event.monochrome, &mut *config, &mut sink) {
            Ok(path) => {
                info!(
                    "Exported {} play to {:?}",
                    if event.monochrome { "monochrome" } else { "color" },
                    path
                );
                status.last_path = Some(path);
                status.error = None;
                save_events.write(SaveConfigRequest);
            }
            Err(e) => {
                error!("Export failed: {}", e);
                status.error = Some(e);
            }
        }
    }
}

pub struct ExportPlugin;

impl Plugin for ExportPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ExportStatus>()
            .add_message::<ExportPlayRequest>()
            .add_systems(
                Update,
                export_play_system.run_if(on_message::<ExportPlayRequest>),
            );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::BoardInput;

    struct MemoryCounter(u32);

    impl PlayCounter for MemoryCounter {
        fn peek(&self) -> u32 {
            self.0
        }

        fn next(&mut self) -> u32 {
            let current = self.0;
            self.0 += 1;
            current
        }
    }

    #[derive(Default)]
    struct RecordingSink {
        written: Vec<(String, RgbaImage)>,
        fail: bool,
    }

    impl FrameSink for RecordingSink {
        fn export_frame(&mut self, image: &RgbaImage, filename: &str) -> Result<PathBuf, String> {
            if self.fail {
                return Err("disk full".to_string());
            }
            self.written.push((filename.to_string(), image.clone()));
            Ok(PathBuf::from(filename))
        }

        fn is_taken(&self, filename: &str) -> bool {
            self.written.iter().any(|(name, _)| name == filename)
        }
    }

    fn embedded_index(filename: &str) -> u32 {
        filename
            .trim_start_matches("playbook_play ")
            .trim_end_matches(".png")
            .parse()
            .unwrap()
    }

    #[test]
    fn test_play_filename_pattern() {
        assert_eq!(play_filename(1), "playbook_play 1.png");
        assert_eq!(play_filename(42), "playbook_play 42.png");
    }

    #[test]
    fn test_consecutive_exports_differ_by_one_regardless_of_style() {
        let board = Board::default();
        let mut counter = MemoryCounter(1);
        let mut sink = RecordingSink::default();

        for monochrome in [true, false, false, true] {
            export_play(&board, monochrome, &mut counter, &mut sink).unwrap();
        }

        let indices: Vec<u32> = sink
            .written
            .iter()
            .map(|(name, _)| embedded_index(name))
            .collect();
        assert_eq!(indices, vec![1, 2, 3, 4]);
        assert_eq!(counter.peek(), 5);
    }

    #[test]
    fn test_failed_write_keeps_counter() {
        let board = Board::default();
        let mut counter = MemoryCounter(3);
        let mut sink = RecordingSink {
            fail: true,
            ..Default::default()
        };

        assert!(export_play(&board, false, &mut counter, &mut sink).is_err());
        assert_eq!(counter.peek(), 3);

        sink.fail = false;
        export_play(&board, false, &mut counter, &mut sink).unwrap();
        assert_eq!(sink.written[0].0, "playbook_play 3.png");
    }

    #[test]
    fn test_exported_image_has_light_background() {
        let board = Board::default();
        let mut counter = MemoryCounter(1);
        let mut sink = RecordingSink::default();

        export_play(&board, true, &mut counter, &mut sink).unwrap();

        let (_, image) = &sink.written[0];
        assert_eq!(image.dimensions(), (600, 800));
        assert_eq!(image.get_pixel(5, 5).0, [255, 255, 255, 255]);
    }

    #[test]
    fn test_export_does_not_touch_board() {
        let mut board = Board::default();
        board.apply(BoardInput::PointerPress {
            pos: Vec2::new(300.0, 725.0),
        });
        let before = board.clone();
        let mut counter = MemoryCounter(1);
        let mut sink = RecordingSink::default();

        export_play(&board, false, &mut counter, &mut sink).unwrap();

        assert_eq!(board.routes, before.routes);
        assert_eq!(board.interaction.highlighted, before.interaction.highlighted);
    }

    #[test]
    fn test_app_config_counter_treats_zero_as_first() {
        let mut config = AppConfig::default();
        config.data.next_play_index = 0;

        assert_eq!(config.peek(), 1);
        assert_eq!(config.next(), 1);
        assert_eq!(config.data.next_play_index, 2);
        assert!(config.dirty);
    }

    #[test]
    fn test_reset_counter_skips_existing_plays() {
        let board = Board::default();
        let mut sink = RecordingSink::default();
        let mut first_session = MemoryCounter(1);
        export_play(&board, false, &mut first_session, &mut sink).unwrap();
        export_play(&board, false, &mut first_session, &mut sink).unwrap();

        // Counter lost, e.g. the config file was deleted
        let mut second_session = MemoryCounter(1);
        let path = export_play(&board, true, &mut second_session, &mut sink).unwrap();

        assert_eq!(path, PathBuf::from("playbook_play 3.png"));
        assert_eq!(second_session.peek(), 4);
        assert_eq!(sink.written.len(), 3);
    }

    #[test]
    fn test_png_sink_never_replaces_existing_file() {
        let dir = std::env::temp_dir().join(format!("playbook-noclobber-{}", std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        let mut sink = PngFileSink { dir: dir.clone() };
        let white = RgbaImage::from_pixel(2, 2, image::Rgba([255, 255, 255, 255]));
        let black = RgbaImage::from_pixel(2, 2, image::Rgba([0, 0, 0, 255]));

        let path = sink.export_frame(&white, &play_filename(1)).unwrap();
        assert!(sink.is_taken(&play_filename(1)));
        assert!(sink.export_frame(&black, &play_filename(1)).is_err());

        let kept = image::open(&path).unwrap().to_rgba8();
        assert_eq!(kept.get_pixel(0, 0).0, [255, 255, 255, 255]);

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_png_sink_export_after_reset_keeps_first_file() {
        let dir = std::env::temp_dir().join(format!("playbook-reset-{}", std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        let board = Board::default();

        let mut sink = PngFileSink { dir: dir.clone() };
        let first = export_play(&board, false, &mut MemoryCounter(1), &mut sink).unwrap();
        let second = export_play(&board, true, &mut MemoryCounter(1), &mut sink).unwrap();

        assert!(first.ends_with("playbook_play 1.png"));
        assert!(second.ends_with("playbook_play 2.png"));
        assert!(first.exists() && second.exists());

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_png_sink_writes_file() {
        let dir = std::env::temp_dir().join(format!("playbook-export-{}", std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        let mut sink = PngFileSink { dir: dir.clone() };
        let image = RgbaImage::from_pixel(4, 4, image::Rgba([0, 0, 0, 255]));

        let path = sink.export_frame(&image, &play_filename(9)).unwrap();

        assert!(path.ends_with("playbook_play 9.png"));
        let loaded = image::open(&path).unwrap().to_rgba8();
        assert_eq!(loaded.dimensions(), (4, 4));

        let _ = std::fs::remove_dir_all(&dir);
    }
}
