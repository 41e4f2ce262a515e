use anyhow::{Result, ensure};
use serde::{Deserialize, Serialize};

use seampack::entities::PageSpec;
use seampack::io::svg::SvgDrawOptions;

/// Configuration for the FFD paginator
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct FFDConfig {
    /// Sheet on which the pieces are printed
    pub page: PageSpec,
    /// Seam allowance added around every outline (mm), 0 disables the allowance
    pub allowance_mm: f64,
    /// Spacing between pieces without allowance (mm)
    pub default_margin: f64,
    /// Step of the first, coarse position scan (mm)
    pub coarse_step: f64,
    /// Step of the second scan, only used if the coarse one found nothing (mm)
    pub fine_step: f64,
    /// SVG class which tags a path as a sewing outline
    pub outline_class: String,
    /// Uniform scale applied to all document coordinates to obtain mm
    pub scale_factor: f64,
    /// Optional SVG drawing options
    pub svg_draw_options: SvgDrawOptions,
}

impl Default for FFDConfig {
    fn default() -> Self {
        Self {
            page: PageSpec::default(),
            allowance_mm: 0.0,
            default_margin: 2.0,
            coarse_step: 10.0,
            fine_step: 1.0,
            outline_class: "seam".to_string(),
            scale_factor: 1.0,
            svg_draw_options: SvgDrawOptions::default(),
        }
    }
}

impl FFDConfig {
    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.allowance_mm.is_finite() && self.allowance_mm >= 0.0,
            "seam allowance must be a non-negative number of mm, got {}",
            self.allowance_mm
        );
        ensure!(
            self.default_margin.is_finite() && self.default_margin >= 0.0,
            "default margin must be non-negative, got {}",
            self.default_margin
        );
        ensure!(
            self.coarse_step > 0.0 && self.fine_step > 0.0,
            "grid steps must be positive, got {} and {}",
            self.coarse_step,
            self.fine_step
        );
        ensure!(
            self.scale_factor.is_finite() && self.scale_factor > 0.0,
            "scale factor must be positive, got {}",
            self.scale_factor
        );
        ensure!(!self.outline_class.is_empty(), "outline class is empty");
        Ok(())
    }
}
