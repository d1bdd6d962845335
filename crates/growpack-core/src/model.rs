use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle in canvas units. `x,y` is the origin; `w,h` are sizes.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self { x, y, w, h }
    }
    /// Exclusive right edge (`x + w`).
    pub fn right(&self) -> f64 {
        self.x + self.w
    }
    /// Exclusive bottom edge (`y + h`).
    pub fn bottom(&self) -> f64 {
        self.y + self.h
    }
    pub fn area(&self) -> f64 {
        self.w * self.h
    }
    /// True if the interiors overlap. Rectangles sharing an edge do not intersect.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }
    /// Returns true if `r` is fully inside `self` (edges may touch).
    pub fn contains(&self, r: &Rect) -> bool {
        r.x >= self.x && r.y >= self.y && r.right() <= self.right() && r.bottom() <= self.bottom()
    }
}

/// True if a `w x h` block can be packed: both sides finite and strictly positive.
pub fn is_valid_size(w: f64, h: f64) -> bool {
    w.is_finite() && h.is_finite() && w > 0.0 && h > 0.0
}

/// Origin assigned to a packed block. The extent is the block's own size.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Placement {
    pub x: f64,
    pub y: f64,
}

/// A named rectangle to pack, annotated with its placement once packed.
///
/// `fit` is `None` until the block has been placed; after a packing run a
/// `None` means the block could not be packed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Block<K = String> {
    pub label: K,
    pub w: f64,
    pub h: f64,
    #[serde(default)]
    pub fit: Option<Placement>,
}

impl<K> Block<K> {
    pub fn new(label: K, w: f64, h: f64) -> Self {
        Self {
            label,
            w,
            h,
            fit: None,
        }
    }

    /// Both sides finite and strictly positive.
    pub fn has_valid_size(&self) -> bool {
        is_valid_size(self.w, self.h)
    }

    pub fn is_placed(&self) -> bool {
        self.fit.is_some()
    }

    /// Placed rectangle, if the block was packed.
    pub fn rect(&self) -> Option<Rect> {
        self.fit.map(|p| Rect::new(p.x, p.y, self.w, self.h))
    }
}

/// A placed block within the layout canvas.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Frame<K = String> {
    pub label: K,
    pub frame: Rect,
}

/// Result of a packing run: the grown canvas, placed frames (in packing order)
/// and the blocks that could not be placed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Layout<K = String> {
    pub width: f64,
    pub height: f64,
    pub frames: Vec<Frame<K>>,
    pub unplaced: Vec<Block<K>>,
    /// Number of times the canvas grew during packing.
    pub growth_events: usize,
}

/// Statistics about layout packing efficiency.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct LayoutStats {
    /// Blocks handed to the packer (placed + unplaced).
    pub num_blocks: usize,
    pub num_placed: usize,
    pub num_unplaced: usize,
    /// Final canvas area (width * height).
    pub canvas_area: f64,
    /// Sum of placed frame areas.
    pub used_area: f64,
    /// Occupancy ratio: used_area / canvas_area (0.0 to 1.0).
    /// Higher is better (less wasted space).
    pub occupancy: f64,
    pub canvas_width: f64,
    pub canvas_height: f64,
    pub growth_events: usize,
}

impl<K> Layout<K> {
    /// An empty layout with a degenerate 0x0 canvas.
    pub fn empty() -> Self {
        Self {
            width: 0.0,
            height: 0.0,
            frames: Vec::new(),
            unplaced: Vec::new(),
            growth_events: 0,
        }
    }

    pub fn canvas(&self) -> Rect {
        Rect::new(0.0, 0.0, self.width, self.height)
    }

    pub fn is_complete(&self) -> bool {
        self.unplaced.is_empty()
    }

    /// Fails with [`GrowPackError::Unplaced`](crate::GrowPackError::Unplaced) if any
    /// block was left unplaced.
    pub fn ensure_complete(&self) -> crate::error::Result<()> {
        if self.unplaced.is_empty() {
            Ok(())
        } else {
            Err(crate::error::GrowPackError::Unplaced {
                unplaced: self.unplaced.len(),
                total: self.frames.len() + self.unplaced.len(),
            })
        }
    }

    /// Computes packing statistics for this layout.
    pub fn stats(&self) -> LayoutStats {
        let used_area: f64 = self.frames.iter().map(|f| f.frame.area()).sum();
        let canvas_area = self.width * self.height;
        let occupancy = if canvas_area > 0.0 {
            used_area / canvas_area
        } else {
            0.0
        };
        LayoutStats {
            num_blocks: self.frames.len() + self.unplaced.len(),
            num_placed: self.frames.len(),
            num_unplaced: self.unplaced.len(),
            canvas_area,
            used_area,
            occupancy,
            canvas_width: self.width,
            canvas_height: self.height,
            growth_events: self.growth_events,
        }
    }
}

impl LayoutStats {
    /// Returns a human-readable summary of the statistics.
    pub fn summary(&self) -> String {
        format!(
            "Blocks: {}, Placed: {}, Unplaced: {}, Canvas: {:.3}x{:.3}, Occupancy: {:.2}%, Growth events: {}",
            self.num_blocks,
            self.num_placed,
            self.num_unplaced,
            self.canvas_width,
            self.canvas_height,
            self.occupancy * 100.0,
            self.growth_events,
        )
    }

    /// Returns canvas area not covered by any frame.
    pub fn wasted_area(&self) -> f64 {
        (self.canvas_area - self.used_area).max(0.0)
    }

    /// Returns wasted space as a percentage (0.0 to 100.0).
    pub fn waste_percentage(&self) -> f64 {
        if self.canvas_area > 0.0 {
            (self.wasted_area() / self.canvas_area) * 100.0
        } else {
            0.0
        }
    }
}
