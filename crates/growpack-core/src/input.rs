//! Delimited cut-list input: `name,width,height,quantity` per line.

use crate::config::InputConfig;
use crate::error::{GrowPackError, Result};
use crate::model::Block;
use std::path::Path;
use tracing::{debug, instrument};

/// Largest quantity a single row may request.
pub const MAX_QUANTITY: usize = 100_000;

/// One parsed row before quantity expansion, in canvas units.
#[derive(Debug, Clone, PartialEq)]
pub struct InputItem {
    pub name: String,
    pub w: f64,
    pub h: f64,
    pub quantity: usize,
}

/// Reads and parses a cut list from disk.
pub fn read_items(path: impl AsRef<Path>, cfg: &InputConfig) -> Result<Vec<Block>> {
    let text = std::fs::read_to_string(path.as_ref())?;
    parse_items(&text, cfg)
}

/// Parses a cut list and expands each row into `quantity` blocks, in file order.
#[instrument(skip_all)]
pub fn parse_items(text: &str, cfg: &InputConfig) -> Result<Vec<Block>> {
    let rows = parse_rows(text, cfg)?;
    let total = rows
        .iter()
        .try_fold(0usize, |acc, r| acc.checked_add(r.quantity))
        .ok_or_else(|| GrowPackError::InvalidConfig("total quantity overflows".into()))?;
    let mut blocks = Vec::new();
    blocks.try_reserve(total).map_err(|e| {
        GrowPackError::InvalidConfig(format!("cannot allocate {total} blocks: {e}"))
    })?;
    for row in &rows {
        for _ in 0..row.quantity {
            blocks.push(Block::new(row.name.clone(), row.w, row.h));
        }
    }
    debug!(rows = rows.len(), blocks = blocks.len(), "parsed cut list");
    Ok(blocks)
}

/// Parses rows without expanding quantities.
pub fn parse_rows(text: &str, cfg: &InputConfig) -> Result<Vec<InputItem>> {
    cfg.validate()?;
    let mut rows = Vec::new();
    let mut header_pending = cfg.skip_header;
    for (idx, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }
        if header_pending {
            header_pending = false;
            continue;
        }
        rows.push(parse_row(line, idx + 1, cfg)?);
    }
    Ok(rows)
}

fn parse_row(line: &str, line_no: usize, cfg: &InputConfig) -> Result<InputItem> {
    let fields: Vec<&str> = line.split(cfg.delimiter).map(str::trim).collect();
    if fields.len() < 4 {
        return Err(parse_err(
            line_no,
            format!("expected 4 fields (name, width, height, quantity), found {}", fields.len()),
        ));
    }
    let name = fields[0].to_string();
    let raw_w = parse_dimension(fields[1], "width", line_no)?;
    let raw_h = parse_dimension(fields[2], "height", line_no)?;
    let quantity: usize = fields[3]
        .parse()
        .map_err(|_| parse_err(line_no, format!("invalid quantity '{}'", fields[3])))?;
    if quantity > MAX_QUANTITY {
        return Err(parse_err(
            line_no,
            format!("quantity {quantity} exceeds the limit of {MAX_QUANTITY}"),
        ));
    }

    let mut w = cfg.convert(raw_w);
    let mut h = cfg.convert(raw_h);
    if cfg.orient_tall && h < w {
        std::mem::swap(&mut w, &mut h);
    }
    if !(w.is_finite() && h.is_finite() && w > 0.0 && h > 0.0) {
        return Err(parse_err(
            line_no,
            format!("'{name}' converts to a degenerate size {w}x{h}"),
        ));
    }
    Ok(InputItem {
        name,
        w,
        h,
        quantity,
    })
}

fn parse_dimension(field: &str, what: &str, line_no: usize) -> Result<f64> {
    let v: f64 = field
        .parse()
        .map_err(|_| parse_err(line_no, format!("invalid {what} '{field}'")))?;
    if !(v.is_finite() && v > 0.0) {
        return Err(parse_err(
            line_no,
            format!("{what} must be finite and positive, got {v}"),
        ));
    }
    Ok(v)
}

fn parse_err(line: usize, message: String) -> GrowPackError {
    GrowPackError::Parse { line, message }
}
