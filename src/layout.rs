//! Paper presets and the name-length font tiers.
//!
//! Everything the rasterizer needs is decided here; it only applies values.

use crate::consts::{LONG_NAME_CHARS, NAME_MAX_LINES, SHORT_NAME_CHARS};
use crate::settings::{FontSize, PaperSize};

/// Physical size plus base font sizes (px at 203 dpi) for one stock.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PaperSpec {
    pub width_mm: f32,
    pub height_mm: f32,
    pub width_dots: u32,
    pub height_dots: u32,
    pub header_px: f32,
    pub price_px: f32,
    /// Large, medium, small.
    pub name_px: [f32; 3],
    pub detail_px: f32,
}

pub fn paper_spec(paper: PaperSize) -> PaperSpec {
    match paper {
        PaperSize::OneHalfByOneIn => PaperSpec {
            width_mm: 38.1,
            height_mm: 25.4,
            width_dots: 305,
            height_dots: 203,
            header_px: 20.0,
            price_px: 64.0,
            name_px: [30.0, 24.0, 18.0],
            detail_px: 16.0,
        },
        PaperSize::TwoByOneIn => PaperSpec {
            width_mm: 50.8,
            height_mm: 25.4,
            width_dots: 406,
            height_dots: 203,
            header_px: 22.0,
            price_px: 72.0,
            name_px: [34.0, 26.0, 20.0],
            detail_px: 18.0,
        },
        PaperSize::FiftyByTwentyFiveMm => PaperSpec {
            width_mm: 50.0,
            height_mm: 25.0,
            width_dots: 400,
            height_dots: 200,
            header_px: 22.0,
            price_px: 70.0,
            name_px: [32.0, 26.0, 20.0],
            detail_px: 18.0,
        },
    }
}

/// Length-based name size bucket. No text measurement involved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameTier {
    Large,
    Medium,
    Small,
}

impl NameTier {
    pub fn for_name(name: &str) -> Self {
        let n = name.chars().count();
        if n < SHORT_NAME_CHARS {
            NameTier::Large
        } else if n < LONG_NAME_CHARS {
            NameTier::Medium
        } else {
            NameTier::Small
        }
    }

    fn index(self) -> usize {
        match self {
            NameTier::Large => 0,
            NameTier::Medium => 1,
            NameTier::Small => 2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutParams {
    pub paper: PaperSize,
    pub width_mm: f32,
    pub height_mm: f32,
    pub width_dots: u32,
    pub height_dots: u32,
    pub header_px: f32,
    pub price_px: f32,
    /// Size of the ".xx" part in split-decimal mode.
    pub price_decimal_px: f32,
    pub name_tier: NameTier,
    pub name_px: f32,
    pub name_max_lines: u32,
    pub detail_px: f32,
}

impl LayoutParams {
    /// Apply the user's font size preference to every font size.
    pub fn scaled(mut self, font_size: FontSize) -> Self {
        let k = font_size.scale();
        self.header_px *= k;
        self.price_px *= k;
        self.price_decimal_px *= k;
        self.name_px *= k;
        self.detail_px *= k;
        self
    }
}

pub fn compute_layout(paper: PaperSize, display_name: &str) -> LayoutParams {
    let spec = paper_spec(paper);
    let tier = NameTier::for_name(display_name);
    LayoutParams {
        paper,
        width_mm: spec.width_mm,
        height_mm: spec.height_mm,
        width_dots: spec.width_dots,
        height_dots: spec.height_dots,
        header_px: spec.header_px,
        price_px: spec.price_px,
        price_decimal_px: (spec.price_px * 0.5).round(),
        name_tier: tier,
        name_px: spec.name_px[tier.index()],
        name_max_lines: NAME_MAX_LINES,
        detail_px: spec.detail_px,
    }
}

/// Like [`compute_layout`] for a raw paper size string; unsupported values
/// get the default preset's layout.
pub fn compute_layout_str(paper: &str, display_name: &str) -> LayoutParams {
    compute_layout(PaperSize::parse_or_default(paper), display_name)
}
