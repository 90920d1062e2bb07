//! Price labels for 203 dpi EPL2 label printers.
//! - Persisted label settings, merged over defaults on every load
//! - Name source policy (product name / alias / alias if available)
//! - Paper presets and length-tiered name fonts
//! - Rounded or split-decimal prices
//! - Arabic shaping + direction for RTL product names
//! - Single and batch print jobs, dispatched off the caller's thread
//!
//! Data flows `SettingsStore` → `render` → `PrintDispatcher`:
//!
//! ```no_run
//! use std::sync::Arc;
//! use price_label_printer::{
//!     render, EplEncoder, FileBackend, PrintDispatcher, Product, SettingsStore, SpoolerSink,
//! };
//!
//! # fn main() -> price_label_printer::Result<()> {
//! let store = SettingsStore::new(FileBackend::from_env());
//! let encoder = EplEncoder::from_font_bytes(std::fs::read("Amiri-Regular.ttf")?)?;
//! let (printer, events) = PrintDispatcher::new(Arc::new(encoder), Arc::new(SpoolerSink::new("Zebra LP2824")));
//!
//! let product = Product::named("Aceite de oliva 500ml").with_price(129.9);
//! if let Some(label) = render(Some(&product), &store.load()) {
//!     printer.print(&label, None);
//! }
//! println!("{:?}", events.recv());
//! # Ok(())
//! # }
//! ```

pub mod barcode;
pub mod consts;
pub mod dispatch;
pub mod epl;
pub mod error;
pub mod graphics;
pub mod layout;
pub mod name;
pub mod price;
pub mod printer;
pub mod product;
pub mod render;
pub mod settings;
pub mod store;

pub use dispatch::{PrintDispatcher, PrintEvent};
pub use epl::{EplEncoder, EplOptions, JobEncoder};
pub use error::{LabelError, Result};
pub use graphics::{rasterize, LabelCanvas, TextPainter};
pub use layout::{compute_layout, compute_layout_str, LayoutParams, NameTier};
pub use name::resolve_name;
pub use price::{format_price, PriceDisplay};
pub use printer::{FileSink, PrintSink, SpoolerSink};
pub use product::Product;
pub use render::{render, render_on, DocumentPart, LabelBlock, PrintDocument, RenderedLabel};
pub use settings::{DecimalStyle, FontSize, LabelConfiguration, LabelSettingsPatch, NameSource, PaperSize};
pub use store::{FileBackend, MemoryBackend, SettingsBackend, SettingsStore};
