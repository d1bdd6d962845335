use crate::error::{GrowPackError, Result};
use crate::model::{Block, Placement};

pub mod growing;
pub mod slot;

pub use growing::{GrowDirection, GrowingPacker, GrowthEvent};
pub use slot::Slot;

/// A packer places blocks onto a canvas.
///
/// Implementations must ensure no overlaps and keep every placement inside the
/// canvas. `pack` returns `None` if the block cannot be placed; that is a
/// per-block result, not an error. Sizes that are not finite and positive are
/// never placed and leave the packer untouched.
pub trait Packer {
    /// True if a `w x h` block fits into existing free space without growing.
    fn can_pack(&self, w: f64, h: f64) -> bool;
    fn pack(&mut self, w: f64, h: f64) -> Option<Placement>;
    /// Packs `blocks` in order, attaching each placement to its block.
    fn fit<K: ToString>(&mut self, blocks: &mut [Block<K>]) -> Result<()>;
}

/// Rejects the first block whose width or height is not finite and positive.
pub fn validate_blocks<K: ToString>(blocks: &[Block<K>]) -> Result<()> {
    match blocks.iter().position(|b| !b.has_valid_size()) {
        Some(index) => {
            let b = &blocks[index];
            Err(GrowPackError::InvalidBlock {
                index,
                label: b.label.to_string(),
                width: b.w,
                height: b.h,
            })
        }
        None => Ok(()),
    }
}
