use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Orderings applied to blocks before packing.
/// The growth heuristics are tuned for `HeightDesc`; other orders stay correct
/// but usually pack looser.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    HeightDesc,
    WidthDesc,
    AreaDesc,
    MaxSideDesc,
    NameAsc,
    None,
    /// Try a small portfolio of orders and keep the best layout
    /// (fewest unplaced, then smallest canvas area).
    Auto,
}

impl FromStr for SortOrder {
    type Err = ();
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "height_desc" => Ok(Self::HeightDesc),
            "width_desc" => Ok(Self::WidthDesc),
            "area_desc" => Ok(Self::AreaDesc),
            "max_side_desc" => Ok(Self::MaxSideDesc),
            "name_asc" => Ok(Self::NameAsc),
            "none" => Ok(Self::None),
            "auto" => Ok(Self::Auto),
            _ => Err(()),
        }
    }
}

impl SortOrder {
    /// Orders evaluated by `Auto`, in tie-break priority.
    pub const PORTFOLIO: [SortOrder; 4] = [
        SortOrder::HeightDesc,
        SortOrder::MaxSideDesc,
        SortOrder::AreaDesc,
        SortOrder::WidthDesc,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::HeightDesc => "height_desc",
            Self::WidthDesc => "width_desc",
            Self::AreaDesc => "area_desc",
            Self::MaxSideDesc => "max_side_desc",
            Self::NameAsc => "name_asc",
            Self::None => "none",
            Self::Auto => "auto",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackerConfig {
    #[serde(default = "default_sort_order")]
    pub sort_order: SortOrder,
    /// Evaluate `Auto` candidates in parallel when feature "parallel" is on.
    #[serde(default = "default_parallel")]
    pub parallel: bool,
}

impl Default for PackerConfig {
    fn default() -> Self {
        Self {
            sort_order: default_sort_order(),
            parallel: default_parallel(),
        }
    }
}

impl PackerConfig {
    /// Create a fluent builder for `PackerConfig`.
    pub fn builder() -> PackerConfigBuilder {
        PackerConfigBuilder::new()
    }
}

/// How raw delimited rows become blocks.
///
/// A raw dimension `v` becomes `v / scale * scale_factor`. The defaults take
/// centimetres to metres and then enlarge threefold for drawing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputConfig {
    #[serde(default = "default_scale")]
    pub scale: f64,
    #[serde(default = "default_scale_factor")]
    pub scale_factor: f64,
    /// Swap width/height so the taller side is always the height.
    #[serde(default = "default_orient_tall")]
    pub orient_tall: bool,
    #[serde(default = "default_delimiter")]
    pub delimiter: char,
    /// Ignore the first non-blank line.
    #[serde(default)]
    pub skip_header: bool,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            scale: default_scale(),
            scale_factor: default_scale_factor(),
            orient_tall: default_orient_tall(),
            delimiter: default_delimiter(),
            skip_header: false,
        }
    }
}

impl InputConfig {
    /// Validates the unit conversion parameters.
    pub fn validate(&self) -> crate::error::Result<()> {
        use crate::error::GrowPackError;

        if !(self.scale.is_finite() && self.scale > 0.0) {
            return Err(GrowPackError::InvalidConfig(format!(
                "scale must be finite and positive, got {}",
                self.scale
            )));
        }
        if !(self.scale_factor.is_finite() && self.scale_factor > 0.0) {
            return Err(GrowPackError::InvalidConfig(format!(
                "scale_factor must be finite and positive, got {}",
                self.scale_factor
            )));
        }
        if self.delimiter.is_whitespace() {
            return Err(GrowPackError::InvalidConfig(
                "delimiter must not be whitespace; labels may contain spaces".into(),
            ));
        }
        Ok(())
    }

    /// Converts a raw dimension into canvas units.
    pub fn convert(&self, raw: f64) -> f64 {
        raw / self.scale * self.scale_factor
    }
}

/// Drawing parameters for rendered layouts (canvas units).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderOptions {
    #[serde(default = "default_text_size")]
    pub text_size: f64,
    #[serde(default = "default_text_padding_x")]
    pub text_padding_x: f64,
    #[serde(default = "default_text_padding_y")]
    pub text_padding_y: f64,
    /// Label rotation in degrees.
    #[serde(default = "default_text_angle_deg")]
    pub text_angle_deg: f64,
    #[serde(default = "default_stroke_width")]
    pub stroke_width: f64,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            text_size: default_text_size(),
            text_padding_x: default_text_padding_x(),
            text_padding_y: default_text_padding_y(),
            text_angle_deg: default_text_angle_deg(),
            stroke_width: default_stroke_width(),
        }
    }
}

impl RenderOptions {
    pub fn validate(&self) -> crate::error::Result<()> {
        use crate::error::GrowPackError;

        if !(self.text_size.is_finite() && self.text_size > 0.0) {
            return Err(GrowPackError::InvalidConfig(format!(
                "text_size must be finite and positive, got {}",
                self.text_size
            )));
        }
        if !(self.stroke_width.is_finite() && self.stroke_width >= 0.0) {
            return Err(GrowPackError::InvalidConfig(format!(
                "stroke_width must be finite and non-negative, got {}",
                self.stroke_width
            )));
        }
        Ok(())
    }
}

fn default_sort_order() -> SortOrder {
    SortOrder::HeightDesc
}
fn default_parallel() -> bool {
    false
}
fn default_scale() -> f64 {
    100.0
}
fn default_scale_factor() -> f64 {
    3.0
}
fn default_orient_tall() -> bool {
    true
}
fn default_delimiter() -> char {
    ','
}
fn default_text_size() -> f64 {
    0.4
}
fn default_text_padding_x() -> f64 {
    0.1
}
fn default_text_padding_y() -> f64 {
    0.02
}
fn default_text_angle_deg() -> f64 {
    90.0
}
fn default_stroke_width() -> f64 {
    0.02
}

/// Builder for `PackerConfig` for ergonomic construction.
#[derive(Debug, Default, Clone)]
pub struct PackerConfigBuilder {
    cfg: PackerConfig,
}

impl PackerConfigBuilder {
    pub fn new() -> Self {
        Self {
            cfg: PackerConfig::default(),
        }
    }
    pub fn sort_order(mut self, v: SortOrder) -> Self {
        self.cfg.sort_order = v;
        self
    }
    pub fn parallel(mut self, v: bool) -> Self {
        self.cfg.parallel = v;
        self
    }
    pub fn build(self) -> PackerConfig {
        self.cfg
    }
}
