//! Thumbnail rendering with half-block characters.
//!
//! Each terminal cell shows two vertically stacked pixels: the upper one as
//! the foreground of `▀`, the lower one as the background.

use std::path::{Path, PathBuf};

use image::{RgbImage, imageops::FilterType};
use ratatui::{
    style::{Color, Style},
    text::{Line, Span},
};
use tracing::debug;

pub struct Preview {
    source: PathBuf,
    image: RgbImage,
}

impl Preview {
    pub fn load(path: &Path) -> Option<Self> {
        match image::open(path) {
            Ok(img) => Some(Self {
                source: path.to_path_buf(),
                image: img.to_rgb8(),
            }),
            Err(e) => {
                debug!(path = %path.display(), error = %e, "cannot decode thumbnail");
                None
            }
        }
    }

    #[cfg(test)]
    pub fn from_image(source: PathBuf, image: RgbImage) -> Self {
        Self { source, image }
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    /// Render into at most `width` x `height` cells, keeping the aspect ratio.
    pub fn lines(&self, width: u16, height: u16) -> Vec<Line<'static>> {
        let (iw, ih) = self.image.dimensions();
        if width == 0 || height == 0 || iw == 0 || ih == 0 {
            return Vec::new();
        }

        let max_w = f64::from(width);
        let max_h = f64::from(height) * 2.0;
        let scale = (max_w / f64::from(iw)).min(max_h / f64::from(ih));
        let tw = ((f64::from(iw) * scale).floor() as u32).max(1);
        let th = ((f64::from(ih) * scale).floor() as u32).max(1);

        let scaled;
        let img = if (tw, th) == (iw, ih) {
            &self.image
        } else {
            scaled = image::imageops::resize(&self.image, tw, th, FilterType::Triangle);
            &scaled
        };

        (0..th)
            .step_by(2)
            .map(|y| {
                let spans: Vec<Span<'static>> = (0..tw)
                    .map(|x| {
                        let top = img.get_pixel(x, y).0;
                        let bottom = if y + 1 < th {
                            img.get_pixel(x, y + 1).0
                        } else {
                            top
                        };
                        Span::styled(
                            "▀",
                            Style::default()
                                .fg(Color::Rgb(top[0], top[1], top[2]))
                                .bg(Color::Rgb(bottom[0], bottom[1], bottom[2])),
                        )
                    })
                    .collect();
                Line::from(spans)
            })
            .collect()
    }
}

/// Keeps the decoded thumbnail of the current selection around between
/// frames, reloading only when the selection's thumbnail changes.
#[derive(Default)]
pub struct PreviewCache {
    current: Option<Preview>,
    failed: Option<PathBuf>,
}

impl PreviewCache {
    pub fn sync(&mut self, thumbnail: Option<&Path>) {
        let Some(path) = thumbnail else {
            self.current = None;
            self.failed = None;
            return;
        };

        let loaded = self.current.as_ref().is_some_and(|p| p.source() == path);
        if loaded || self.failed.as_deref() == Some(path) {
            return;
        }

        self.current = Preview::load(path);
        self.failed = if self.current.is_none() {
            Some(path.to_path_buf())
        } else {
            None
        };
    }

    pub fn get(&self) -> Option<&Preview> {
        self.current.as_ref()
    }
}
