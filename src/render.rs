//! Label structure: which blocks appear, with what text and sizes.
//!
//! [`render`] turns a product and the current configuration into a
//! [`RenderedLabel`]. It is recomputed on every product or settings change
//! and never stored. Rasterizing it is [`crate::graphics`]'s job.

use chrono::{Local, NaiveDate};

use crate::barcode::normalize_ean13;
use crate::consts::{BARCODE_HEIGHT, DATE_FORMAT, DEFAULT_PRINT_TITLE};
use crate::layout::{compute_layout, LayoutParams};
use crate::name::resolve_name;
use crate::price::{format_price, PriceDisplay};
use crate::product::Product;
use crate::settings::LabelConfiguration;

#[derive(Debug, Clone, PartialEq)]
pub enum LabelBlock {
    Header { text: String, font_px: f32 },
    Price { price: PriceDisplay, font_px: f32, decimal_font_px: f32, bold: bool },
    /// Already uppercased; drawn on at most `max_lines` lines.
    Name { text: String, font_px: f32, max_lines: u32 },
    Barcode { ean13: String, height: u32 },
    Sku { text: String, font_px: f32 },
    Date { text: String, font_px: f32 },
}

#[derive(Debug, Clone, PartialEq)]
pub struct RenderedLabel {
    pub layout: LayoutParams,
    /// Top to bottom. Hidden blocks are simply absent.
    pub blocks: Vec<LabelBlock>,
    /// Suggested document name when printed on its own.
    pub title: String,
}

impl RenderedLabel {
    pub fn price(&self) -> Option<&PriceDisplay> {
        self.blocks.iter().find_map(|b| match b {
            LabelBlock::Price { price, .. } => Some(price),
            _ => None,
        })
    }

    pub fn name(&self) -> Option<&str> {
        self.blocks.iter().find_map(|b| match b {
            LabelBlock::Name { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}

/// Render dated today. `None` in, `None` out.
pub fn render(product: Option<&Product>, settings: &LabelConfiguration) -> Option<RenderedLabel> {
    render_on(product, settings, Local::now().date_naive())
}

pub fn render_on(
    product: Option<&Product>,
    settings: &LabelConfiguration,
    date: NaiveDate,
) -> Option<RenderedLabel> {
    let product = product?;
    let resolved = resolve_name(product, settings.name_source);
    let name = resolved.trim();
    let layout = compute_layout(settings.paper_size, name).scaled(settings.font_size);

    let mut blocks = Vec::new();
    if let Some(company) = settings.company_header() {
        blocks.push(LabelBlock::Header { text: company.to_string(), font_px: layout.header_px });
    }
    if settings.show_price {
        blocks.push(LabelBlock::Price {
            price: format_price(product.raw_price(), settings.decimal_style, &settings.currency_symbol),
            font_px: layout.price_px,
            decimal_font_px: layout.price_decimal_px,
            bold: settings.bold_price,
        });
    }
    if settings.show_name && !name.is_empty() {
        blocks.push(LabelBlock::Name {
            text: name.to_uppercase(),
            font_px: layout.name_px,
            max_lines: layout.name_max_lines,
        });
    }
    if settings.show_barcode {
        if let Some(upc) = product.upc.as_deref() {
            match normalize_ean13(upc) {
                Ok(ean13) => blocks.push(LabelBlock::Barcode { ean13, height: BARCODE_HEIGHT }),
                Err(e) => tracing::debug!(error = %e, "skipping barcode"),
            }
        }
    }
    if settings.show_sku {
        if let Some(sku) = product.sku.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            blocks.push(LabelBlock::Sku { text: sku.to_string(), font_px: layout.detail_px });
        }
    }
    if settings.show_date {
        blocks.push(LabelBlock::Date {
            text: date.format(DATE_FORMAT).to_string(),
            font_px: layout.detail_px,
        });
    }

    let title = match name {
        "" => DEFAULT_PRINT_TITLE.to_string(),
        n => n.to_string(),
    };
    Some(RenderedLabel { layout, blocks, title })
}

/// One part of a batch print job.
#[derive(Debug, Clone, PartialEq)]
pub enum DocumentPart {
    Label(RenderedLabel),
    PageBreak,
}

/// Labels laid out one per page.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PrintDocument {
    pub parts: Vec<DocumentPart>,
}

impl PrintDocument {
    /// A page break goes between consecutive labels; none after the last.
    pub fn compose(labels: impl IntoIterator<Item = RenderedLabel>) -> Self {
        let mut parts = Vec::new();
        for label in labels {
            if !parts.is_empty() {
                parts.push(DocumentPart::PageBreak);
            }
            parts.push(DocumentPart::Label(label));
        }
        PrintDocument { parts }
    }

    pub fn single(label: RenderedLabel) -> Self {
        Self::compose([label])
    }

    pub fn labels(&self) -> impl Iterator<Item = &RenderedLabel> {
        self.parts.iter().filter_map(|p| match p {
            DocumentPart::Label(l) => Some(l),
            DocumentPart::PageBreak => None,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// `(i, i + 1)` for each break between label `i` and label `i + 1`.
    pub fn page_breaks(&self) -> Vec<(usize, usize)> {
        let mut seen = 0;
        let mut breaks = Vec::new();
        for part in &self.parts {
            match part {
                DocumentPart::Label(_) => seen += 1,
                DocumentPart::PageBreak => breaks.push((seen - 1, seen)),
            }
        }
        breaks
    }
}
