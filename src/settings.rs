//! Label configuration: the persisted shape, its enums, and partial patches.
//!
//! Every enum deserializes from a plain string and falls back to its default
//! on an unknown spelling, so a blob written by a newer or older build never
//! fails to load over a single field.

use serde::{Deserialize, Serialize};

/// Supported label stock.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PaperSize {
    /// 1.5in × 1in
    OneHalfByOneIn,
    /// 2in × 1in
    #[default]
    TwoByOneIn,
    /// 50mm × 25mm
    FiftyByTwentyFiveMm,
}

impl PaperSize {
    pub const ALL: [PaperSize; 3] = [
        PaperSize::OneHalfByOneIn,
        PaperSize::TwoByOneIn,
        PaperSize::FiftyByTwentyFiveMm,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            PaperSize::OneHalfByOneIn => "1.5x1in",
            PaperSize::TwoByOneIn => "2x1in",
            PaperSize::FiftyByTwentyFiveMm => "50x25mm",
        }
    }

    /// Human label for pickers.
    pub fn display_name(self) -> &'static str {
        match self {
            PaperSize::OneHalfByOneIn => "1.5\" × 1\"",
            PaperSize::TwoByOneIn => "2\" × 1\"",
            PaperSize::FiftyByTwentyFiveMm => "50mm × 25mm",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        let key: String = s
            .chars()
            .filter(|c| !c.is_whitespace())
            .map(|c| if c == '×' { 'x' } else { c.to_ascii_lowercase() })
            .collect();
        // "2in×1in" and "2x1in" name the same stock
        let key = match key.split_once('x') {
            Some((w, h)) => {
                let w = w.strip_suffix("in").or_else(|| w.strip_suffix("mm")).unwrap_or(w);
                format!("{w}x{h}")
            }
            None => key,
        };
        match key.as_str() {
            "1.5x1in" | "1.5x1" => Some(PaperSize::OneHalfByOneIn),
            "2x1in" | "2x1" => Some(PaperSize::TwoByOneIn),
            "50x25mm" | "50x25" => Some(PaperSize::FiftyByTwentyFiveMm),
            _ => None,
        }
    }

    /// Unsupported values land on the default preset.
    pub fn parse_or_default(s: &str) -> Self {
        Self::parse(s).unwrap_or_else(|| {
            tracing::debug!(paper_size = %s, "unsupported paper size, using default");
            Self::default()
        })
    }
}

impl From<String> for PaperSize {
    fn from(s: String) -> Self {
        Self::parse_or_default(&s)
    }
}

impl From<PaperSize> for String {
    fn from(p: PaperSize) -> Self {
        p.as_str().to_string()
    }
}

/// Which text labels the product.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum NameSource {
    AlwaysProductName,
    AlwaysAlias,
    #[default]
    AliasIfAvailable,
}

impl NameSource {
    pub fn as_str(self) -> &'static str {
        match self {
            NameSource::AlwaysProductName => "product",
            NameSource::AlwaysAlias => "alias",
            NameSource::AliasIfAvailable => "alias_if_available",
        }
    }
}

impl From<String> for NameSource {
    fn from(s: String) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "product" | "always_product_name" | "name" => NameSource::AlwaysProductName,
            "alias" | "always_alias" => NameSource::AlwaysAlias,
            "alias_if_available" => NameSource::AliasIfAvailable,
            other => {
                tracing::debug!(name_source = %other, "unknown name source, using default");
                NameSource::default()
            }
        }
    }
}

impl From<NameSource> for String {
    fn from(n: NameSource) -> Self {
        n.as_str().to_string()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FontSize {
    Small,
    #[default]
    Normal,
    Large,
}

impl FontSize {
    pub fn as_str(self) -> &'static str {
        match self {
            FontSize::Small => "small",
            FontSize::Normal => "normal",
            FontSize::Large => "large",
        }
    }

    /// Multiplier applied to every computed font size.
    pub fn scale(self) -> f32 {
        match self {
            FontSize::Small => 0.85,
            FontSize::Normal => 1.0,
            FontSize::Large => 1.15,
        }
    }
}

impl From<String> for FontSize {
    fn from(s: String) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "small" => FontSize::Small,
            "large" => FontSize::Large,
            _ => FontSize::Normal,
        }
    }
}

impl From<FontSize> for String {
    fn from(f: FontSize) -> Self {
        f.as_str().to_string()
    }
}

/// How the fractional part of a price is shown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DecimalStyle {
    /// Whole units only, rounded half away from zero.
    Rounded,
    /// Integer part large, ".xx" smaller beside it.
    #[default]
    SplitDecimal,
}

impl DecimalStyle {
    pub fn as_str(self) -> &'static str {
        match self {
            DecimalStyle::Rounded => "rounded",
            DecimalStyle::SplitDecimal => "split-decimal",
        }
    }
}

impl From<String> for DecimalStyle {
    fn from(s: String) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "rounded" => DecimalStyle::Rounded,
            _ => DecimalStyle::SplitDecimal,
        }
    }
}

impl From<DecimalStyle> for String {
    fn from(d: DecimalStyle) -> Self {
        d.as_str().to_string()
    }
}

/// The persisted label configuration, one per installation.
///
/// `#[serde(default)]` backfills any field the stored blob lacks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LabelConfiguration {
    pub paper_size: PaperSize,
    pub company_name: String,
    pub name_source: NameSource,
    pub show_price: bool,
    pub show_name: bool,
    pub show_sku: bool,
    pub show_date: bool,
    pub show_barcode: bool,
    pub bold_price: bool,
    pub font_size: FontSize,
    pub decimal_style: DecimalStyle,
    pub currency_symbol: String,
}

impl Default for LabelConfiguration {
    fn default() -> Self {
        LabelConfiguration {
            paper_size: PaperSize::default(),
            company_name: String::new(),
            name_source: NameSource::default(),
            show_price: true,
            show_name: true,
            show_sku: false,
            show_date: false,
            show_barcode: false,
            bold_price: true,
            font_size: FontSize::default(),
            decimal_style: DecimalStyle::default(),
            currency_symbol: "$".to_string(),
        }
    }
}

impl LabelConfiguration {
    /// `{...self, ...patch}`
    pub fn merged(&self, patch: &LabelSettingsPatch) -> Self {
        let mut out = self.clone();
        if let Some(v) = patch.paper_size { out.paper_size = v; }
        if let Some(v) = &patch.company_name { out.company_name = v.clone(); }
        if let Some(v) = patch.name_source { out.name_source = v; }
        if let Some(v) = patch.show_price { out.show_price = v; }
        if let Some(v) = patch.show_name { out.show_name = v; }
        if let Some(v) = patch.show_sku { out.show_sku = v; }
        if let Some(v) = patch.show_date { out.show_date = v; }
        if let Some(v) = patch.show_barcode { out.show_barcode = v; }
        if let Some(v) = patch.bold_price { out.bold_price = v; }
        if let Some(v) = patch.font_size { out.font_size = v; }
        if let Some(v) = patch.decimal_style { out.decimal_style = v; }
        if let Some(v) = &patch.currency_symbol { out.currency_symbol = v.clone(); }
        out
    }

    /// Company header text, if one should be drawn.
    pub fn company_header(&self) -> Option<&str> {
        let name = self.company_name.trim();
        (!name.is_empty()).then_some(name)
    }
}

/// A partial update. `None` leaves the current value untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LabelSettingsPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paper_size: Option<PaperSize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name_source: Option<NameSource>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_price: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_name: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_sku: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_date: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_barcode: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bold_price: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<FontSize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub decimal_style: Option<DecimalStyle>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency_symbol: Option<String>,
}

impl LabelSettingsPatch {
    /// `{...self, ...later}`: fields set in `later` win.
    pub fn then(&self, later: &LabelSettingsPatch) -> Self {
        LabelSettingsPatch {
            paper_size: later.paper_size.or(self.paper_size),
            company_name: later.company_name.clone().or_else(|| self.company_name.clone()),
            name_source: later.name_source.or(self.name_source),
            show_price: later.show_price.or(self.show_price),
            show_name: later.show_name.or(self.show_name),
            show_sku: later.show_sku.or(self.show_sku),
            show_date: later.show_date.or(self.show_date),
            show_barcode: later.show_barcode.or(self.show_barcode),
            bold_price: later.bold_price.or(self.bold_price),
            font_size: later.font_size.or(self.font_size),
            decimal_style: later.decimal_style.or(self.decimal_style),
            currency_symbol: later.currency_symbol.clone().or_else(|| self.currency_symbol.clone()),
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == LabelSettingsPatch::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paper_size_accepts_loose_spellings() {
        assert_eq!(PaperSize::parse("1.5in×1in"), Some(PaperSize::OneHalfByOneIn));
        assert_eq!(PaperSize::parse("2X1in"), Some(PaperSize::TwoByOneIn));
        assert_eq!(PaperSize::parse("50 x 25 mm"), Some(PaperSize::FiftyByTwentyFiveMm));
        assert_eq!(PaperSize::parse("2in×1in"), Some(PaperSize::TwoByOneIn));
        assert_eq!(PaperSize::parse("50mm×25mm"), Some(PaperSize::FiftyByTwentyFiveMm));
        assert_eq!(PaperSize::parse("1.5in x 1in"), Some(PaperSize::OneHalfByOneIn));
        assert_eq!(PaperSize::parse("A4"), None);
        assert_eq!(PaperSize::parse("xin"), None);
        assert_eq!(PaperSize::parse_or_default("A4"), PaperSize::TwoByOneIn);
    }

    #[test]
    fn unit_per_dimension_spellings_load_from_json() {
        for (raw, paper) in [
            ("1.5in×1in", PaperSize::OneHalfByOneIn),
            ("2in×1in", PaperSize::TwoByOneIn),
            ("50mm×25mm", PaperSize::FiftyByTwentyFiveMm),
        ] {
            let json = format!(r#"{{"paperSize":"{raw}"}}"#);
            let cfg: LabelConfiguration = serde_json::from_str(&json).unwrap();
            assert_eq!(cfg.paper_size, paper, "{raw}");
        }
    }

    #[test]
    fn unknown_enum_spellings_fall_back() {
        let json = r#"{"paperSize":"4x6in","nameSource":"nickname","fontSize":"huge","decimalStyle":"??"}"#;
        let cfg: LabelConfiguration = serde_json::from_str(json).unwrap();
        assert_eq!(cfg, LabelConfiguration::default());
    }

    #[test]
    fn legacy_name_source_spellings() {
        let n: NameSource = serde_json::from_str("\"product\"").unwrap();
        assert_eq!(n, NameSource::AlwaysProductName);
        let n: NameSource = serde_json::from_str("\"always_alias\"").unwrap();
        assert_eq!(n, NameSource::AlwaysAlias);
    }

    #[test]
    fn missing_fields_are_backfilled() {
        let cfg: LabelConfiguration =
            serde_json::from_str(r#"{"companyName":"Abarrotes Lupita","showSku":true}"#).unwrap();
        assert_eq!(cfg.company_name, "Abarrotes Lupita");
        assert!(cfg.show_sku);
        assert!(cfg.show_price);
        assert_eq!(cfg.currency_symbol, "$");
    }

    #[test]
    fn serializes_camel_case_with_enum_strings() {
        let json = serde_json::to_value(LabelConfiguration::default()).unwrap();
        assert_eq!(json["paperSize"], "2x1in");
        assert_eq!(json["nameSource"], "alias_if_available");
        assert_eq!(json["decimalStyle"], "split-decimal");
        assert_eq!(json["boldPrice"], true);
    }

    #[test]
    fn merge_only_touches_set_fields() {
        let patch = LabelSettingsPatch { show_date: Some(true), ..Default::default() };
        let merged = LabelConfiguration::default().merged(&patch);
        assert!(merged.show_date);
        assert_eq!(merged.paper_size, PaperSize::TwoByOneIn);
    }

    #[test]
    fn later_patch_wins() {
        let a = LabelSettingsPatch { font_size: Some(FontSize::Small), show_sku: Some(true), ..Default::default() };
        let b = LabelSettingsPatch { font_size: Some(FontSize::Large), ..Default::default() };
        let ab = a.then(&b);
        assert_eq!(ab.font_size, Some(FontSize::Large));
        assert_eq!(ab.show_sku, Some(true));
    }

    #[test]
    fn company_header_skips_blank() {
        let mut cfg = LabelConfiguration::default();
        assert_eq!(cfg.company_header(), None);
        cfg.company_name = "   ".into();
        assert_eq!(cfg.company_header(), None);
        cfg.company_name = " Ferretería Sol ".into();
        assert_eq!(cfg.company_header(), Some("Ferretería Sol"));
    }
}
