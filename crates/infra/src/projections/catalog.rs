use serde::{Deserialize, Serialize};

use omnistock_inventory::StockFilter;
use omnistock_products::Product;

/// Catalog search: free text plus a stock filter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogQuery {
    /// Matches a case-insensitive substring of the name or a substring of the
    /// barcode. Blank matches everything.
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub stock: StockFilter,
}

impl CatalogQuery {
    pub fn matches(&self, product: &Product) -> bool {
        let needle = self.text.trim();
        let text_match = needle.is_empty()
            || product.name().to_lowercase().contains(&needle.to_lowercase())
            || product.barcode().contains(needle);
        text_match && self.stock.matches(&product.stock())
    }
}

pub fn filter_catalog<'a>(products: &'a [Product], query: &CatalogQuery) -> Vec<&'a Product> {
    products.iter().filter(|p| query.matches(p)).collect()
}

/// Products at or below their minimum stock (out of stock included).
pub fn restock_alerts(products: &[Product]) -> Vec<&Product> {
    products.iter().filter(|p| p.stock().needs_restock()).collect()
}
