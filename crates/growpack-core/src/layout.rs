use crate::config::{PackerConfig, SortOrder};
use crate::error::Result;
use crate::model::{Block, Frame, Layout};
use crate::packer::{GrowingPacker, Packer, validate_blocks};
use tracing::{debug, instrument};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

#[instrument(skip_all, fields(blocks = blocks.len()))]
/// Sorts `blocks` per `cfg` and packs them onto a single growing canvas.
///
/// Notes:
/// - Sorting is stable: blocks that compare equal keep their input order.
/// - Empty input yields an empty layout with a 0x0 canvas.
/// - Blocks that cannot be placed are returned in `Layout::unplaced`; use
///   `Layout::ensure_complete` to turn them into an error.
/// - `SortOrder::Auto` tries `SortOrder::PORTFOLIO` and keeps the best layout.
pub fn pack_layout<K>(mut blocks: Vec<Block<K>>, cfg: PackerConfig) -> Result<Layout<K>>
where
    K: Clone + ToString + Send + Sync,
{
    validate_blocks(&blocks)?;

    if blocks.is_empty() {
        return Ok(Layout::empty());
    }

    if matches!(cfg.sort_order, SortOrder::Auto) {
        return pack_auto(&blocks, &cfg);
    }

    sort_blocks(&mut blocks, cfg.sort_order);
    pack_sorted(blocks)
}

/// Stable in-place sort of `blocks` by `order`. `None` and `Auto` leave the order untouched.
pub fn sort_blocks<K: ToString>(blocks: &mut [Block<K>], order: SortOrder) {
    match order {
        SortOrder::None | SortOrder::Auto => {}
        SortOrder::HeightDesc => blocks.sort_by(|a, b| b.h.total_cmp(&a.h)),
        SortOrder::WidthDesc => blocks.sort_by(|a, b| b.w.total_cmp(&a.w)),
        SortOrder::AreaDesc => blocks.sort_by(|a, b| (b.w * b.h).total_cmp(&(a.w * a.h))),
        SortOrder::MaxSideDesc => blocks.sort_by(|a, b| b.w.max(b.h).total_cmp(&a.w.max(a.h))),
        SortOrder::NameAsc => {
            blocks.sort_by(|a, b| a.label.to_string().cmp(&b.label.to_string()))
        }
    }
}

fn pack_sorted<K: ToString>(mut blocks: Vec<Block<K>>) -> Result<Layout<K>> {
    let mut packer = GrowingPacker::new();
    packer.fit(&mut blocks)?;
    Ok(into_layout(blocks, &packer))
}

fn into_layout<K>(blocks: Vec<Block<K>>, packer: &GrowingPacker) -> Layout<K> {
    let (width, height) = packer.canvas();
    let mut frames = Vec::with_capacity(blocks.len());
    let mut unplaced = Vec::new();
    for block in blocks {
        match block.rect() {
            Some(frame) => frames.push(Frame {
                label: block.label,
                frame,
            }),
            None => unplaced.push(block),
        }
    }
    Layout {
        width,
        height,
        frames,
        unplaced,
        growth_events: packer.growth_log().len(),
    }
}

fn pack_candidate<K>(blocks: &[Block<K>], order: SortOrder) -> Result<Layout<K>>
where
    K: Clone + ToString,
{
    let mut sorted = blocks.to_vec();
    sort_blocks(&mut sorted, order);
    pack_sorted(sorted)
}

// Fewest unplaced blocks first, then smallest canvas area.
fn is_better<K>(candidate: &Layout<K>, best: &Layout<K>) -> bool {
    let (cu, bu) = (candidate.unplaced.len(), best.unplaced.len());
    cu < bu || (cu == bu && candidate.width * candidate.height < best.width * best.height)
}

#[cfg(feature = "parallel")]
fn run_candidates<K>(blocks: &[Block<K>], orders: &[SortOrder], parallel: bool) -> Vec<Result<Layout<K>>>
where
    K: Clone + ToString + Send + Sync,
{
    if parallel {
        orders
            .par_iter()
            .map(|order| pack_candidate(blocks, *order))
            .collect()
    } else {
        orders
            .iter()
            .map(|order| pack_candidate(blocks, *order))
            .collect()
    }
}

#[cfg(not(feature = "parallel"))]
fn run_candidates<K>(blocks: &[Block<K>], orders: &[SortOrder], _parallel: bool) -> Vec<Result<Layout<K>>>
where
    K: Clone + ToString,
{
    orders
        .iter()
        .map(|order| pack_candidate(blocks, *order))
        .collect()
}

fn pack_auto<K>(blocks: &[Block<K>], cfg: &PackerConfig) -> Result<Layout<K>>
where
    K: Clone + ToString + Send + Sync,
{
    let candidates = SortOrder::PORTFOLIO;
    let results = run_candidates(blocks, &candidates, cfg.parallel);

    // Results are in portfolio order, so ties go to the earlier candidate.
    let mut best: Option<(SortOrder, Layout<K>)> = None;
    for (order, result) in candidates.into_iter().zip(results) {
        let layout = result?;
        if best.as_ref().is_none_or(|(_, b)| is_better(&layout, b)) {
            best = Some((order, layout));
        }
    }
    let (order, layout) = best.unwrap_or_else(|| (SortOrder::None, Layout::empty()));
    debug!(
        order = order.as_str(),
        width = layout.width,
        height = layout.height,
        unplaced = layout.unplaced.len(),
        "auto order selected"
    );
    Ok(layout)
}
