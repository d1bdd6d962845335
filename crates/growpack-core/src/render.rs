//! Drawing packed layouts: an SVG document with outlined frames and rotated
//! labels, and (feature `image`) a raster preview without text.

use crate::config::RenderOptions;
use crate::error::Result;
use crate::model::{Layout, Rect};
use std::path::Path;
use svg::Document;
use svg::node::element::{Group, Rectangle, Text, Title};

/// Words of a label that get drawn, each with its slot index.
///
/// The label is split on single spaces. Drawing stops at the first word
/// starting with `(`, so parenthesised annotations stay off the layout. Empty
/// words from repeated spaces are skipped but keep their slot.
pub fn label_words(label: &str) -> Vec<(usize, &str)> {
    label
        .split(' ')
        .take_while(|w| !w.starts_with('('))
        .enumerate()
        .filter(|(_, w)| !w.is_empty())
        .collect()
}

/// A single label word and its anchor in canvas units.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelAnchor {
    pub word: String,
    pub x: f64,
    pub y: f64,
}

/// Anchors for the label words of a frame: slot `j` sits one text line
/// further along x than slot `j - 1`, which stacks rotated words side by side.
pub fn label_anchors(label: &str, frame: &Rect, opts: &RenderOptions) -> Vec<LabelAnchor> {
    label_words(label)
        .into_iter()
        .map(|(j, word)| LabelAnchor {
            word: word.to_string(),
            x: frame.x + opts.text_padding_x + opts.text_size * (j + 1) as f64,
            y: frame.y + opts.text_padding_y,
        })
        .collect()
}

pub fn render_svg<K: ToString>(layout: &Layout<K>, opts: &RenderOptions) -> Document {
    let mut frames = Group::new()
        .set("id", "frames")
        .set("fill", "none")
        .set("stroke", "black")
        .set("stroke-width", opts.stroke_width);
    let mut labels = Group::new()
        .set("id", "labels")
        .set("font-size", opts.text_size)
        .set("font-family", "sans-serif");

    for fr in &layout.frames {
        let label = fr.label.to_string();
        frames = frames.add(
            Rectangle::new()
                .set("x", fr.frame.x)
                .set("y", fr.frame.y)
                .set("width", fr.frame.w)
                .set("height", fr.frame.h)
                .add(Title::new(label.clone())),
        );
        for anchor in label_anchors(&label, &fr.frame, opts) {
            labels = labels.add(
                Text::new(anchor.word)
                    .set("x", anchor.x)
                    .set("y", anchor.y)
                    .set(
                        "transform",
                        format!("rotate({} {} {})", opts.text_angle_deg, anchor.x, anchor.y),
                    ),
            );
        }
    }

    Document::new()
        .set("viewBox", (0.0, 0.0, layout.width, layout.height))
        .set("width", layout.width)
        .set("height", layout.height)
        .add(frames)
        .add(labels)
}

pub fn save_svg(path: impl AsRef<Path>, doc: &Document) -> Result<()> {
    svg::save(path, doc)?;
    Ok(())
}

#[cfg(feature = "image")]
pub use preview::*;

#[cfg(feature = "image")]
mod preview {
    use crate::error::{GrowPackError, Result};
    use crate::model::Layout;
    use image::{Rgba, RgbaImage};
    use std::path::Path;

    /// Upper bound on preview pixels.
    pub const MAX_PREVIEW_PIXELS: u64 = 64 * 1024 * 1024;

    const FILLS: [[u8; 4]; 6] = [
        [166, 206, 227, 255],
        [178, 223, 138, 255],
        [251, 154, 153, 255],
        [253, 191, 111, 255],
        [202, 178, 214, 255],
        [255, 255, 153, 255],
    ];
    const OUTLINE: Rgba<u8> = Rgba([0, 0, 0, 255]);
    const BACKGROUND: Rgba<u8> = Rgba([255, 255, 255, 255]);

    /// Rasterises frames as filled, outlined boxes at `px_per_unit` pixels per canvas unit.
    pub fn render_preview<K>(layout: &Layout<K>, px_per_unit: f64) -> Result<RgbaImage> {
        if !(px_per_unit.is_finite() && px_per_unit > 0.0) {
            return Err(GrowPackError::InvalidConfig(format!(
                "px_per_unit must be finite and positive, got {px_per_unit}"
            )));
        }
        let width = ((layout.width * px_per_unit).ceil() as u32).max(1);
        let height = ((layout.height * px_per_unit).ceil() as u32).max(1);
        if (width as u64) * (height as u64) > MAX_PREVIEW_PIXELS {
            return Err(GrowPackError::InvalidConfig(format!(
                "preview of {width}x{height} px exceeds {MAX_PREVIEW_PIXELS} pixels; lower px_per_unit"
            )));
        }

        let mut img = RgbaImage::from_pixel(width, height, BACKGROUND);
        for (i, fr) in layout.frames.iter().enumerate() {
            let x0 = ((fr.frame.x * px_per_unit).round() as u32).min(width);
            let y0 = ((fr.frame.y * px_per_unit).round() as u32).min(height);
            let x1 = ((fr.frame.right() * px_per_unit).round() as u32).min(width);
            let y1 = ((fr.frame.bottom() * px_per_unit).round() as u32).min(height);
            if x1 <= x0 || y1 <= y0 {
                continue;
            }
            let fill = Rgba(FILLS[i % FILLS.len()]);
            for y in y0..y1 {
                for x in x0..x1 {
                    let edge = x == x0 || y == y0 || x + 1 == x1 || y + 1 == y1;
                    img.put_pixel(x, y, if edge { OUTLINE } else { fill });
                }
            }
        }
        Ok(img)
    }

    pub fn save_preview(path: impl AsRef<Path>, img: &RgbaImage) -> Result<()> {
        img.save(path.as_ref())?;
        Ok(())
    }
}
