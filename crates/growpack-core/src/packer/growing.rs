use super::{Packer, Slot, validate_blocks};
use crate::error::{GrowPackError, Result};
use crate::model::{Block, Placement, is_valid_size};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, trace, warn};

/// Side of the canvas a growth event extended.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum GrowDirection {
    Right,
    Down,
}

/// One growth of the canvas; `width`/`height` are the canvas size after it.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct GrowthEvent {
    pub direction: GrowDirection,
    pub width: f64,
    pub height: f64,
}

/// Binary-tree packer whose canvas starts at the size of the first block and
/// grows right or down whenever no free slot is large enough.
///
/// Growth always wraps the old root as a child of a new root at the origin, so
/// blocks placed earlier keep their absolute coordinates. One instance serves
/// one packing run.
#[derive(Debug, Clone)]
pub struct GrowingPacker {
    root: Slot,
    growth: Vec<GrowthEvent>,
}

impl Default for GrowingPacker {
    fn default() -> Self {
        Self::new()
    }
}

impl GrowingPacker {
    /// An unseeded packer with a degenerate 0x0 canvas.
    pub fn new() -> Self {
        Self {
            root: Slot::free(0.0, 0.0, 0.0, 0.0),
            growth: Vec::new(),
        }
    }

    /// A packer whose canvas starts as a free `w x h` region.
    ///
    /// Both sides must be finite and non-negative; `0 x 0` is the same as [`GrowingPacker::new`].
    pub fn with_canvas(w: f64, h: f64) -> Result<Self> {
        if !(w.is_finite() && h.is_finite() && w >= 0.0 && h >= 0.0) {
            return Err(GrowPackError::InvalidConfig(format!(
                "canvas must be finite and non-negative, got {w}x{h}"
            )));
        }
        Ok(Self {
            root: Slot::free(0.0, 0.0, w, h),
            growth: Vec::new(),
        })
    }

    /// Current canvas size `(width, height)`.
    pub fn canvas(&self) -> (f64, f64) {
        (self.root.width(), self.root.height())
    }

    pub fn root(&self) -> &Slot {
        &self.root
    }

    /// Growth events in the order they happened.
    pub fn growth_log(&self) -> &[GrowthEvent] {
        &self.growth
    }

    fn reset(&mut self, w: f64, h: f64) {
        self.root = Slot::free(0.0, 0.0, w, h);
        self.growth.clear();
    }

    fn is_unseeded(&self) -> bool {
        !self.root.is_used() && self.root.width() == 0.0 && self.root.height() == 0.0
    }

    fn grow(&mut self, w: f64, h: f64) -> Option<Placement> {
        let (root_w, root_h) = self.canvas();
        let can_grow_down = w <= root_w;
        let can_grow_right = h <= root_h;

        // Keep the canvas square-ish: widen a tall canvas, deepen a wide one.
        let should_grow_right = can_grow_right && root_h >= root_w + w;
        let should_grow_down = can_grow_down && root_w >= root_h + h;

        let direction = if should_grow_right {
            GrowDirection::Right
        } else if should_grow_down {
            GrowDirection::Down
        } else if can_grow_right {
            GrowDirection::Right
        } else if can_grow_down {
            GrowDirection::Down
        } else {
            debug!(w, h, root_w, root_h, "block exceeds canvas on both axes; cannot grow");
            return None;
        };
        self.extend(direction, w, h);

        let placed = self.root.insert(w, h);
        if placed.is_none() {
            warn!(w, h, ?direction, "no free slot after growing canvas");
        }
        placed
    }

    fn extend(&mut self, direction: GrowDirection, w: f64, h: f64) {
        let old = std::mem::replace(&mut self.root, Slot::free(0.0, 0.0, 0.0, 0.0));
        let (old_w, old_h) = (old.width(), old.height());
        self.root = match direction {
            GrowDirection::Right => {
                Slot::joined(old_w + w, old_h, Slot::free(old_w, 0.0, w, old_h), old)
            }
            GrowDirection::Down => {
                Slot::joined(old_w, old_h + h, old, Slot::free(0.0, old_h, old_w, h))
            }
        };
        let event = GrowthEvent {
            direction,
            width: self.root.width(),
            height: self.root.height(),
        };
        debug!(direction = ?event.direction, width = event.width, height = event.height, "canvas grew");
        self.growth.push(event);
    }
}

impl Packer for GrowingPacker {
    fn can_pack(&self, w: f64, h: f64) -> bool {
        is_valid_size(w, h) && self.root.find(w, h).is_some()
    }

    fn pack(&mut self, w: f64, h: f64) -> Option<Placement> {
        if !is_valid_size(w, h) {
            warn!(w, h, "rejected block size; width and height must be finite and positive");
            return None;
        }
        if self.is_unseeded() {
            self.reset(w, h);
        }
        self.root.insert(w, h).or_else(|| self.grow(w, h))
    }

    #[instrument(skip_all, fields(blocks = blocks.len()))]
    fn fit<K: ToString>(&mut self, blocks: &mut [Block<K>]) -> Result<()> {
        validate_blocks(blocks)?;

        let (w, h) = blocks.first().map_or((0.0, 0.0), |b| (b.w, b.h));
        self.reset(w, h);

        let mut unplaced = 0usize;
        for block in blocks.iter_mut() {
            block.fit = self.pack(block.w, block.h);
            match block.fit {
                Some(p) => trace!(label = %block.label.to_string(), x = p.x, y = p.y, "placed"),
                None => {
                    unplaced += 1;
                    warn!(label = %block.label.to_string(), w = block.w, h = block.h, "block left unplaced");
                }
            }
        }
        let (canvas_w, canvas_h) = self.canvas();
        debug!(
            canvas_w,
            canvas_h,
            unplaced,
            growth = self.growth.len(),
            "fit finished"
        );
        Ok(())
    }
}
