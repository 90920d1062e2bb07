//! EPL2 job encoding: raster as binary `GW`, barcodes as `B`, `P1` per label.

use image::GrayImage;

use crate::consts::{DARKNESS, INVERT_BITS, NARROW, SPEED};
use crate::error::Result;
use crate::graphics::{rasterize, LabelCanvas, TextPainter};
use crate::render::{DocumentPart, PrintDocument};

/// Printer tuning; defaults come from [`crate::consts`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EplOptions {
    pub darkness: u8,
    pub speed: u8,
    /// Flip GW bits for printers that treat 1 as white.
    pub invert_bits: bool,
}

impl Default for EplOptions {
    fn default() -> Self {
        EplOptions { darkness: DARKNESS, speed: SPEED, invert_bits: INVERT_BITS }
    }
}

/// Helper to append an EPL ASCII command line terminated with CRLF
pub fn epl_line(buf: &mut Vec<u8>, s: &str) {
    buf.extend_from_slice(s.as_bytes());
    buf.extend_from_slice(b"\r\n");
}

/// Convert a 1-bit image (Luma 0=black, 255=white) into row-packed bytes, MSB first.
/// Returns (width, height, rows)
pub fn image_to_row_bytes(img: &GrayImage, invert: bool) -> (u32, u32, Vec<u8>) {
    let (w, h) = img.dimensions();
    let bpr = w.div_ceil(8) as usize;
    let mut out = vec![0u8; bpr * h as usize];

    for (x, y, px) in img.enumerate_pixels() {
        if px.0[0] < 128 {
            let idx = y as usize * bpr + (x as usize / 8);
            out[idx] |= 1 << (7 - (x % 8));
        }
    }
    if invert {
        for b in &mut out { *b = !*b; }
    }
    (w, h, out)
}

/// Append GW header + raw binary rows + CRLF
pub fn gw_bytes(buf: &mut Vec<u8>, x: u32, y: u32, w: u32, h: u32, rows: &[u8]) {
    let bpr = w.div_ceil(8);
    epl_line(buf, &format!("GW{},{},{},{}", x, y, bpr, h));
    buf.extend_from_slice(rows);
    buf.extend_from_slice(b"\r\n");
}

/// Commands for one label, without the trailing print command.
pub fn encode_canvas(buf: &mut Vec<u8>, canvas: &LabelCanvas, opts: &EplOptions) {
    let (w, h, rows) = image_to_row_bytes(&canvas.image, opts.invert_bits);
    epl_line(buf, "N");
    epl_line(buf, &format!("q{}", w));
    epl_line(buf, &format!("Q{},24", h));
    epl_line(buf, &format!("D{}", opts.darkness));
    epl_line(buf, &format!("S{}", opts.speed));
    gw_bytes(buf, 0, 0, w, h, &rows);
    if let Some(bc) = &canvas.barcode {
        // EPL computes the check digit itself from the first 12
        epl_line(buf, &format!("B{},{},0,E30,{},{},{},B,\"{}\"",
            bc.x, bc.y, NARROW, 3, bc.height, bc.ean13.get(..12).unwrap_or(bc.ean13.as_str())));
    }
}

/// Print-ready bytes for a whole document.
pub trait JobEncoder: Send + Sync {
    fn encode(&self, doc: &PrintDocument) -> Result<Vec<u8>>;
}

pub struct EplEncoder {
    painter: TextPainter,
    opts: EplOptions,
}

impl EplEncoder {
    pub fn new(painter: TextPainter, opts: EplOptions) -> Self {
        EplEncoder { painter, opts }
    }

    pub fn from_font_bytes(font_bytes: Vec<u8>) -> Result<Self> {
        Ok(Self::new(TextPainter::from_bytes(font_bytes)?, EplOptions::default()))
    }
}

impl JobEncoder for EplEncoder {
    fn encode(&self, doc: &PrintDocument) -> Result<Vec<u8>> {
        let canvases: Vec<_> = doc.labels().map(|l| rasterize(l, &self.painter)).collect();
        Ok(encode_canvases(doc, &canvases, &self.opts))
    }
}

/// `canvases` holds one entry per label in `doc`, in order.
///
/// `P1` both prints the current label and starts the next page; the last
/// label still needs one to print at all.
pub fn encode_canvases(doc: &PrintDocument, canvases: &[LabelCanvas], opts: &EplOptions) -> Vec<u8> {
    let mut buf = Vec::new();
    let mut next = canvases.iter();
    for part in &doc.parts {
        match part {
            DocumentPart::Label(_) => {
                if let Some(canvas) = next.next() {
                    encode_canvas(&mut buf, canvas, opts);
                }
            }
            DocumentPart::PageBreak => epl_line(&mut buf, "P1"),
        }
    }
    if !doc.is_empty() {
        epl_line(&mut buf, "P1");
    }
    tracing::debug!(labels = canvases.len(), bytes = buf.len(), "encoded EPL job");
    buf
}
