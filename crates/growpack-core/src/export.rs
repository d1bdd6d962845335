use crate::config::{InputConfig, PackerConfig};
use crate::model::Layout;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

/// Layout-level metadata carried alongside exported placements.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Meta {
    /// Schema version for the JSON layout format; current: "1".
    pub schema_version: String,
    pub app: String,
    pub version: String,
    pub sort_order: String,
    pub scale: f64,
    pub scale_factor: f64,
    pub orient_tall: bool,
}

impl Meta {
    pub fn new(packer: &PackerConfig, input: &InputConfig) -> Self {
        Self {
            schema_version: "1".into(),
            app: "growpack".into(),
            version: env!("CARGO_PKG_VERSION").into(),
            sort_order: packer.sort_order.as_str().into(),
            scale: input.scale,
            scale_factor: input.scale_factor,
            orient_tall: input.orient_tall,
        }
    }
}

/// Serialize a layout as `{ canvas, frames, unplaced, meta }`.
///
/// Frames keep packing order; each carries its label, origin and size.
pub fn to_json<K: ToString>(layout: &Layout<K>, meta: &Meta) -> Value {
    let frames: Vec<Value> = layout
        .frames
        .iter()
        .map(|fr| {
            json!({
                "label": fr.label.to_string(),
                "x": fr.frame.x,
                "y": fr.frame.y,
                "w": fr.frame.w,
                "h": fr.frame.h,
            })
        })
        .collect();
    let unplaced: Vec<Value> = layout
        .unplaced
        .iter()
        .map(|b| json!({"label": b.label.to_string(), "w": b.w, "h": b.h}))
        .collect();
    json!({
        "canvas": {"w": layout.width, "h": layout.height},
        "frames": frames,
        "unplaced": unplaced,
        "meta": meta,
    })
}

/// Packing statistics as a flat JSON object.
pub fn stats_to_json<K>(layout: &Layout<K>) -> Value {
    let s = layout.stats();
    json!({
        "blocks": s.num_blocks,
        "placed": s.num_placed,
        "unplaced": s.num_unplaced,
        "canvas": {"w": s.canvas_width, "h": s.canvas_height},
        "canvas_area": s.canvas_area,
        "used_area": s.used_area,
        "occupancy": s.occupancy,
        "growth_events": s.growth_events,
    })
}
