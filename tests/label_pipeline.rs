use std::sync::mpsc::Receiver;
use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use price_label_printer::consts::SETTINGS_KEY;
use price_label_printer::{
    compute_layout, compute_layout_str, render_on, DecimalStyle, DocumentPart, FileSink, FontSize,
    JobEncoder, LabelConfiguration, LabelSettingsPatch, MemoryBackend, NameSource, NameTier,
    PaperSize, PrintDispatcher, PrintDocument, PrintEvent, Product, Result, SettingsBackend,
    SettingsStore,
};
use proptest::prelude::*;

fn patch_strategy() -> impl Strategy<Value = LabelSettingsPatch> {
    let paper = prop::option::of(prop::sample::select(PaperSize::ALL.to_vec()));
    let source = prop::option::of(prop::sample::select(vec![
        NameSource::AlwaysProductName,
        NameSource::AlwaysAlias,
        NameSource::AliasIfAvailable,
    ]));
    let font = prop::option::of(prop::sample::select(vec![FontSize::Small, FontSize::Normal, FontSize::Large]));
    let style = prop::option::of(prop::sample::select(vec![DecimalStyle::Rounded, DecimalStyle::SplitDecimal]));
    let flags = prop::collection::vec(prop::option::of(any::<bool>()), 6);
    let text = prop::option::of("[a-zA-Z ]{0,12}");
    let symbol = prop::option::of(prop::sample::select(vec!["$".to_string(), "S/".to_string()]));
    (paper, source, font, style, flags, text, symbol).prop_map(|(paper, source, font, style, f, company, symbol)| {
        LabelSettingsPatch {
            paper_size: paper,
            company_name: company,
            name_source: source,
            show_price: f[0],
            show_name: f[1],
            show_sku: f[2],
            show_date: f[3],
            show_barcode: f[4],
            bold_price: f[5],
            font_size: font,
            decimal_style: style,
            currency_symbol: symbol,
        }
    })
}

proptest! {
    #[test]
    fn sequential_updates_equal_one_combined_update(p1 in patch_strategy(), p2 in patch_strategy()) {
        let stepwise = SettingsStore::new(MemoryBackend::new());
        stepwise.update(&p1).unwrap();
        let a = stepwise.update(&p2).unwrap();

        let combined = SettingsStore::new(MemoryBackend::new());
        let b = combined.update(&p1.then(&p2)).unwrap();

        prop_assert_eq!(&a, &b);
        prop_assert_eq!(
            stepwise.backend().read(SETTINGS_KEY).unwrap(),
            combined.backend().read(SETTINGS_KEY).unwrap()
        );
    }

    #[test]
    fn persisted_settings_survive_a_restart(p in patch_strategy()) {
        let first = SettingsStore::new(MemoryBackend::new());
        let saved = first.update(&p).unwrap();
        let raw = first.backend().read(SETTINGS_KEY).unwrap().unwrap();

        let restarted = SettingsStore::new(MemoryBackend::with_entry(SETTINGS_KEY, &raw));
        prop_assert_eq!(restarted.load(), saved);
    }

    #[test]
    fn names_past_the_long_threshold_are_never_large(name in "[A-Z ]{30,60}") {
        for paper in PaperSize::ALL {
            prop_assert_eq!(compute_layout(paper, &name).name_tier, NameTier::Small);
        }
    }
}

#[test]
fn older_schema_blob_gets_new_fields() {
    // written before showBarcode / decimalStyle existed, with the old "product" spelling
    let old = r#"{"paperSize":"1.5x1in","companyName":"Mini Súper","nameSource":"product","showSku":true}"#;
    let store = SettingsStore::new(MemoryBackend::with_entry(SETTINGS_KEY, old));
    let cfg = store.load();
    assert_eq!(cfg.paper_size, PaperSize::OneHalfByOneIn);
    assert_eq!(cfg.name_source, NameSource::AlwaysProductName);
    assert!(cfg.show_sku);
    assert!(!cfg.show_barcode);
    assert_eq!(cfg.decimal_style, DecimalStyle::SplitDecimal);
}

#[test]
fn blob_under_an_older_key_is_ignored() {
    let store = SettingsStore::new(MemoryBackend::with_entry("label_settings_v1", r#"{"showDate":true}"#));
    assert_eq!(store.load(), LabelConfiguration::default());
}

#[test]
fn unsupported_paper_string_matches_default_layout() {
    assert_eq!(compute_layout_str("4x6in", "Tortillas"), compute_layout(PaperSize::TwoByOneIn, "Tortillas"));
}

struct TitleEncoder;

impl JobEncoder for TitleEncoder {
    fn encode(&self, doc: &PrintDocument) -> Result<Vec<u8>> {
        let mut out = Vec::new();
        for part in &doc.parts {
            match part {
                DocumentPart::Label(l) => out.extend_from_slice(l.title.as_bytes()),
                DocumentPart::PageBreak => out.push(b'|'),
            }
        }
        Ok(out)
    }
}

fn wait(rx: &Receiver<PrintEvent>) -> PrintEvent {
    rx.recv_timeout(Duration::from_secs(5)).expect("print event")
}

#[test]
fn settings_change_flows_into_the_next_print() {
    let day = NaiveDate::from_ymd_opt(2026, 10, 17).unwrap();
    let store = SettingsStore::new(MemoryBackend::new());
    let product = Product::named("Refresco de cola 600ml").with_alias("Cola 600").with_price(79.9);

    let before = render_on(Some(&product), &store.load(), day).unwrap();
    assert_eq!(before.name(), Some("COLA 600"));
    let price = before.price().unwrap();
    assert_eq!((price.integer.as_str(), price.decimal.as_deref()), ("79", Some(".90")));

    store
        .update(&LabelSettingsPatch {
            decimal_style: Some(DecimalStyle::Rounded),
            name_source: Some(NameSource::AlwaysProductName),
            ..Default::default()
        })
        .unwrap();
    let after = render_on(Some(&product), &store.load(), day).unwrap();
    assert_eq!(after.name(), Some("REFRESCO DE COLA 600ML"));
    assert_eq!(after.price().unwrap().to_string(), "$80");
    assert_eq!(after.layout.name_tier, NameTier::Medium);

    let dir = tempfile::tempdir().unwrap();
    let (printer, rx) = PrintDispatcher::new(Arc::new(TitleEncoder), Arc::new(FileSink::new(dir.path())));
    printer.print(&after, Some("cola"));
    assert_eq!(wait(&rx), PrintEvent::Completed { title: "cola".into() });
    assert_eq!(std::fs::read(dir.path().join("cola.epl")).unwrap(), b"Refresco de cola 600ml");
}

#[test]
fn batch_of_three_has_two_page_breaks() {
    let cfg = LabelConfiguration::default();
    let day = NaiveDate::from_ymd_opt(2026, 10, 17).unwrap();
    let labels: Vec<_> = ["Frijol", "Arroz", "Azúcar"]
        .into_iter()
        .filter_map(|n| render_on(Some(&Product::named(n)), &cfg, day))
        .collect();

    let dir = tempfile::tempdir().unwrap();
    let (printer, rx) = PrintDispatcher::new(Arc::new(TitleEncoder), Arc::new(FileSink::new(dir.path())));
    printer.print_batch(labels, Some("despensa"));
    assert_eq!(wait(&rx), PrintEvent::Completed { title: "despensa".into() });
    assert_eq!(
        std::fs::read_to_string(dir.path().join("despensa.epl")).unwrap(),
        "Frijol|Arroz|Azúcar"
    );
}
