//! Per-epoch belief snapshots and their export as frames or an animated GIF

use crate::io::error::{InpaintError, Result};
use crate::io::image::{export_grayscale, to_gray_image};
use image::{Delay, DynamicImage, Frame};
use ndarray::Array2;
use std::path::{Path, PathBuf};

/// Belief matrices recorded after each completed epoch
#[derive(Debug, Clone, Default)]
pub struct SnapshotCapture {
    frames: Vec<Array2<u8>>,
}

impl SnapshotCapture {
    /// Create an empty capture with room for `epochs` frames
    pub fn new(epochs: usize) -> Self {
        Self {
            frames: Vec::with_capacity(epochs),
        }
    }

    /// Append the beliefs of the epoch that just finished
    pub fn record(&mut self, beliefs: Array2<u8>) {
        self.frames.push(beliefs);
    }

    /// Recorded frames, first epoch first
    pub fn frames(&self) -> &[Array2<u8>] {
        &self.frames
    }

    /// Number of recorded frames
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Whether nothing was recorded
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Write every frame as `<prefix><epoch>.png` in `directory`
    ///
    /// Epoch numbers start at 1. Returns the written paths in epoch order.
    ///
    /// # Errors
    ///
    /// Returns an error if no frames were recorded or a frame cannot be saved.
    pub fn export_frames(&self, directory: &Path, prefix: &str) -> Result<Vec<PathBuf>> {
        self.ensure_frames()?;

        let mut written = Vec::with_capacity(self.frames.len());
        for (index, frame) in self.frames.iter().enumerate() {
            let path = directory.join(format!("{prefix}{}.png", index + 1));
            export_grayscale(frame, &path)?;
            written.push(path);
        }
        Ok(written)
    }

    /// Write all frames as one animated GIF
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No frames were recorded
    /// - File system operations fail
    /// - GIF encoding fails
    pub fn export_gif(&self, output_path: &Path, frame_delay_ms: u32) -> Result<()> {
        self.ensure_frames()?;

        let mut frames = Vec::with_capacity(self.frames.len());
        for beliefs in &self.frames {
            let rgba = DynamicImage::ImageLuma8(to_gray_image(beliefs.view())?).to_rgba8();
            frames.push(Frame::from_parts(
                rgba,
                0,
                0,
                Delay::from_numer_denom_ms(frame_delay_ms, 1),
            ));
        }

        if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| InpaintError::FileSystem {
                path: parent.to_path_buf(),
                operation: "create directory",
                source: e,
            })?;
        }

        let file = std::fs::File::create(output_path).map_err(|e| InpaintError::FileSystem {
            path: output_path.to_path_buf(),
            operation: "create file",
            source: e,
        })?;

        let mut encoder = image::codecs::gif::GifEncoder::new(file);
        encoder
            .encode_frames(frames)
            .map_err(|e| InpaintError::ImageExport {
                path: output_path.to_path_buf(),
                source: e,
            })
    }

    fn ensure_frames(&self) -> Result<()> {
        if self.frames.is_empty() {
            return Err(InpaintError::InvalidSourceData {
                reason: "No epoch snapshots were captured".to_string(),
            });
        }
        Ok(())
    }
}
