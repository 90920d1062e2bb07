use crate::product::Product;
use crate::settings::NameSource;

/// Pick the text that labels `product`. Total over any product shape.
///
/// `AlwaysAlias` returns an empty string when there is no alias; the
/// renderer drops an empty name block.
pub fn resolve_name(product: &Product, source: NameSource) -> String {
    let name = || product.name.clone().unwrap_or_default();
    let alias = product.alias.as_deref().map(str::trim).unwrap_or("");
    match source {
        NameSource::AlwaysProductName => name(),
        NameSource::AlwaysAlias => alias.to_string(),
        NameSource::AliasIfAvailable if !alias.is_empty() => alias.to_string(),
        NameSource::AliasIfAvailable => name(),
    }
}
