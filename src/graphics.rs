//! Rasterize a [`RenderedLabel`] into a 1-bit label image.
//! - Arabic/RTL runs reordered and shaped before drawing
//! - Hard ink threshold, no gray
//! - Bold by double-drawing with a 1px offset
//! - Blocks stacked top to bottom, each centered, stack centered vertically

use image::{GrayImage, Luma};
use rusttype::{point, Font, Scale};
use ar_reshaper::{ArabicReshaper, ReshaperConfig};
use unicode_bidi::BidiInfo;

use crate::barcode::center_x_for_ean13;
use crate::consts::{BLOCK_GAP, INK_THRESHOLD, NARROW, PAD};
use crate::error::{LabelError, Result};
use crate::render::{LabelBlock, RenderedLabel};

const ELLIPSIS: &str = "...";
/// Room under the bars for the human readable digits.
const BARCODE_HRI: u32 = 22;

/// Visual-order string: BiDi runs; reshape and reverse RTL runs, keep LTR as is.
fn bidi_then_shape(text: &str, reshaper: &ArabicReshaper) -> String {
    let info = BidiInfo::new(text, None);
    let mut out = String::new();
    for para in &info.paragraphs {
        let (levels, runs) = info.visual_runs(para, para.range.clone());
        for run in runs {
            let slice = &text[run.clone()];
            if levels[run.start].is_rtl() {
                out.extend(reshaper.reshape(slice).chars().rev());
            } else {
                out.push_str(slice);
            }
        }
    }
    out
}

/// A loaded font plus the drawing routines built on it.
#[derive(Clone)]
pub struct TextPainter {
    font: Font<'static>,
}

impl TextPainter {
    pub fn from_bytes(font_bytes: Vec<u8>) -> Result<Self> {
        let font = Font::try_from_vec(font_bytes).ok_or(LabelError::InvalidFont)?;
        Ok(TextPainter { font })
    }

    pub fn line_height(&self, px: f32) -> u32 {
        let vm = self.font.v_metrics(Scale::uniform(px));
        (vm.ascent - vm.descent).ceil().max(1.0) as u32
    }

    /// Ink width of an already visual-ordered string.
    fn visual_width(&self, visual: &str, px: f32) -> u32 {
        self.font
            .layout(visual, Scale::uniform(px), point(0.0, 0.0))
            .filter_map(|g| g.pixel_bounding_box().map(|bb| bb.max.x))
            .max()
            .unwrap_or(0)
            .max(0) as u32
    }

    /// Draw `visual` with its top edge at `top`.
    fn draw(&self, img: &mut GrayImage, visual: &str, x: i32, top: i32, px: f32, bold: bool) {
        let scale = Scale::uniform(px);
        let baseline = top as f32 + self.font.v_metrics(scale).ascent;
        let (w, h) = img.dimensions();
        let passes: &[(i32, i32)] = if bold { &[(0, 0), (1, 0)] } else { &[(0, 0)] };
        for &(dx, dy) in passes {
            for g in self.font.layout(visual, scale, point((x + dx) as f32, baseline + dy as f32)) {
                if let Some(bb) = g.pixel_bounding_box() {
                    g.draw(|gx, gy, v| {
                        if v > INK_THRESHOLD {
                            let px = gx as i32 + bb.min.x;
                            let py = gy as i32 + bb.min.y;
                            if px >= 0 && py >= 0 && (px as u32) < w && (py as u32) < h {
                                img.put_pixel(px as u32, py as u32, Luma([0]));
                            }
                        }
                    });
                }
            }
        }
    }
}

/// Greedy word wrap clamped to `max_lines`; a cut or overlong line ends in "...".
pub fn wrap_clamped(
    text: &str,
    max_lines: usize,
    max_width: u32,
    measure: impl Fn(&str) -> u32,
) -> Vec<String> {
    if max_lines == 0 {
        return Vec::new();
    }
    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        if current.is_empty() {
            current.push_str(word);
            continue;
        }
        let candidate = format!("{current} {word}");
        if measure(&candidate) <= max_width {
            current = candidate;
        } else {
            lines.push(std::mem::replace(&mut current, word.to_string()));
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }

    let overflow = lines.len() > max_lines;
    lines.truncate(max_lines);
    let last = lines.len().saturating_sub(1);
    for (i, line) in lines.iter_mut().enumerate() {
        if measure(line.as_str()) > max_width || (overflow && i == last) {
            *line = ellipsize(line, max_width, &measure);
        }
    }
    lines
}

fn ellipsize(line: &str, max_width: u32, measure: &impl Fn(&str) -> u32) -> String {
    let mut chars: Vec<char> = line.chars().collect();
    loop {
        let head: String = chars.iter().collect();
        let candidate = format!("{}{ELLIPSIS}", head.trim_end());
        if chars.is_empty() || measure(&candidate) <= max_width {
            return candidate;
        }
        chars.pop();
    }
}

/// Where the EPL barcode command goes; bars are not part of the bitmap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BarcodePlacement {
    pub x: u32,
    pub y: u32,
    pub ean13: String,
    pub height: u32,
}

#[derive(Debug, Clone)]
pub struct LabelCanvas {
    pub image: GrayImage,
    pub barcode: Option<BarcodePlacement>,
}

enum Row {
    Lines { lines: Vec<String>, px: f32, bold: bool },
    Price { integer: String, decimal: Option<String>, px: f32, decimal_px: f32, bold: bool },
    Barcode { ean13: String, height: u32 },
    Footer { left: String, right: String, px: f32 },
}

pub fn rasterize(label: &RenderedLabel, painter: &TextPainter) -> LabelCanvas {
    let reshaper = ArabicReshaper::new(ReshaperConfig::default());
    let visual = |s: &str| bidi_then_shape(s, &reshaper);
    let (w, h) = (label.layout.width_dots, label.layout.height_dots);
    let content_w = w.saturating_sub(2 * PAD);

    let rows = collect_rows(label, painter, content_w, &visual);
    let row_h = |row: &Row| match row {
        Row::Lines { lines, px, .. } => painter.line_height(*px) * lines.len() as u32,
        Row::Price { px, .. } => painter.line_height(*px),
        Row::Barcode { height, .. } => height + BARCODE_HRI,
        Row::Footer { px, .. } => painter.line_height(*px),
    };
    let total: u32 = rows.iter().map(row_h).sum::<u32>() + BLOCK_GAP * rows.len().saturating_sub(1) as u32;
    // Center vertically when it fits; otherwise start at the margin and clip the bottom.
    let mut y = PAD + h.saturating_sub(2 * PAD).saturating_sub(total) / 2;

    let mut image = GrayImage::from_pixel(w, h, Luma([255]));
    let mut barcode = None;
    let centered = |text_w: u32| ((w.saturating_sub(text_w)) / 2) as i32;

    for row in &rows {
        match row {
            Row::Lines { lines, px, bold } => {
                let lh = painter.line_height(*px);
                for (i, line) in lines.iter().enumerate() {
                    let v = visual(line.as_str());
                    let x = centered(painter.visual_width(&v, *px));
                    painter.draw(&mut image, &v, x, (y + lh * i as u32) as i32, *px, *bold);
                }
            }
            Row::Price { integer, decimal, px, decimal_px, bold } => {
                let int_w = painter.visual_width(integer, *px);
                let dec_w = decimal.as_deref().map_or(0, |d| painter.visual_width(d, *decimal_px) + 2);
                let x = centered(int_w + dec_w);
                painter.draw(&mut image, integer, x, y as i32, *px, *bold);
                if let Some(d) = decimal {
                    // top-aligned with the integer part
                    painter.draw(&mut image, d, x + int_w as i32 + 2, y as i32, *decimal_px, *bold);
                }
            }
            Row::Barcode { ean13, height } => {
                barcode = Some(BarcodePlacement {
                    x: center_x_for_ean13(w, NARROW),
                    y,
                    ean13: ean13.clone(),
                    height: *height,
                });
            }
            Row::Footer { left, right, px } => {
                let (l, r) = (visual(left.as_str()), visual(right.as_str()));
                match (l.is_empty(), r.is_empty()) {
                    (false, true) | (true, false) => {
                        let only = if l.is_empty() { &r } else { &l };
                        let x = centered(painter.visual_width(only, *px));
                        painter.draw(&mut image, only, x, y as i32, *px, false);
                    }
                    _ => {
                        painter.draw(&mut image, &l, PAD as i32, y as i32, *px, false);
                        let rx = w.saturating_sub(PAD + painter.visual_width(&r, *px));
                        painter.draw(&mut image, &r, rx as i32, y as i32, *px, false);
                    }
                }
            }
        }
        y += row_h(row) + BLOCK_GAP;
    }

    LabelCanvas { image, barcode }
}

fn collect_rows(
    label: &RenderedLabel,
    painter: &TextPainter,
    content_w: u32,
    visual: &impl Fn(&str) -> String,
) -> Vec<Row> {
    let mut rows = Vec::new();
    let mut sku = String::new();
    let mut date = String::new();
    for block in &label.blocks {
        match block {
            LabelBlock::Header { text, font_px } => {
                let lines = wrap_clamped(text, 1, content_w, |s| painter.visual_width(&visual(s), *font_px));
                rows.push(Row::Lines { lines, px: *font_px, bold: true });
            }
            LabelBlock::Price { price, font_px, decimal_font_px, bold } => rows.push(Row::Price {
                integer: format!("{}{}", price.symbol, price.integer),
                decimal: price.decimal.clone(),
                px: *font_px,
                decimal_px: *decimal_font_px,
                bold: *bold,
            }),
            LabelBlock::Name { text, font_px, max_lines } => {
                let lines = wrap_clamped(text, *max_lines as usize, content_w, |s| {
                    painter.visual_width(&visual(s), *font_px)
                });
                rows.push(Row::Lines { lines, px: *font_px, bold: true });
            }
            LabelBlock::Barcode { ean13, height } => {
                rows.push(Row::Barcode { ean13: ean13.clone(), height: *height })
            }
            LabelBlock::Sku { text, .. } => sku = text.clone(),
            LabelBlock::Date { text, .. } => date = text.clone(),
        }
    }
    // sku and date share one footer line
    let footer_px = label.blocks.iter().find_map(|b| match b {
        LabelBlock::Sku { font_px, .. } | LabelBlock::Date { font_px, .. } => Some(*font_px),
        _ => None,
    });
    if let Some(px) = footer_px {
        rows.push(Row::Footer { left: sku, right: date, px });
    }
    rows
}
