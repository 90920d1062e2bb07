// Label and printer tuning constants

/// Printer resolution (Zebra LP-2824 class, 203 dpi).
pub const DPI: f32 = 203.0;

pub const DARKNESS: u8 = 8;      // D0..D15
pub const SPEED: u8 = 2;         // S1..S6
pub const INVERT_BITS: bool = true;     // flip GW bits → black text on white

pub const NARROW: u32 = 2;       // EAN-13 module width (2–3)
pub const BARCODE_HEIGHT: u32 = 30;

pub const PAD: u32 = 8;          // inner margin on every side, dots
pub const BLOCK_GAP: u32 = 4;    // vertical space between blocks
pub const INK_THRESHOLD: f32 = 0.5;

// Name tiers: below SHORT → large, below LONG → medium, otherwise small.
pub const SHORT_NAME_CHARS: usize = 15;
pub const LONG_NAME_CHARS: usize = 30;
pub const NAME_MAX_LINES: u32 = 2;

/// Versioned storage key. Bump on incompatible schema changes.
pub const SETTINGS_KEY: &str = "label_settings_v2";
pub const SETTINGS_DIR_ENV: &str = "PRICE_LABEL_SETTINGS_DIR";

pub const DATE_FORMAT: &str = "%d/%m/%Y";

pub const DEFAULT_PRINT_TITLE: &str = "Price label";
pub const DEFAULT_BATCH_TITLE: &str = "Price labels";
