use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use omnistock_auth::User;
use omnistock_products::Product;
use omnistock_sales::Sale;

/// How many products the dashboard ranks.
pub const TOP_PRODUCTS: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductRevenue {
    pub product_name: String,
    pub revenue: Decimal,
    pub units_sold: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailyRevenue {
    pub date: NaiveDate,
    pub revenue: Decimal,
}

/// Admin dashboard for one organization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Dashboard {
    pub revenue: Decimal,
    pub sales_count: usize,
    pub units_in_stock: u64,
    pub user_count: usize,
    pub restock_alert_count: usize,
    pub top_products: Vec<ProductRevenue>,
    pub revenue_by_day: Vec<DailyRevenue>,
}

impl Dashboard {
    pub fn compute(products: &[Product], sales: &[Sale], users: &[User]) -> Self {
        Self {
            revenue: total_revenue(sales),
            sales_count: sales.len(),
            units_in_stock: products
                .iter()
                .fold(0u64, |acc, p| acc.saturating_add(p.stock_quantity())),
            user_count: users.len(),
            restock_alert_count: products.iter().filter(|p| p.stock().needs_restock()).count(),
            top_products: top_products(sales, TOP_PRODUCTS),
            revenue_by_day: revenue_by_day(sales),
        }
    }
}

/// Sums saturate at the type's maximum instead of overflowing; every stock
/// level and sale total is individually valid, their sum need not be.
pub fn total_revenue(sales: &[Sale]) -> Decimal {
    sales
        .iter()
        .fold(Decimal::ZERO, |acc, s| acc.saturating_add(s.total))
}

/// Best sellers by revenue, grouped by the product name captured on each
/// sale. Ties are broken by name, ascending.
pub fn top_products(sales: &[Sale], limit: usize) -> Vec<ProductRevenue> {
    let mut by_name: BTreeMap<&str, (Decimal, u64)> = BTreeMap::new();
    for sale in sales {
        let entry = by_name.entry(sale.product_name.as_str()).or_default();
        entry.0 = entry.0.saturating_add(sale.total);
        entry.1 = entry.1.saturating_add(sale.quantity);
    }

    let mut ranked: Vec<ProductRevenue> = by_name
        .into_iter()
        .map(|(name, (revenue, units_sold))| ProductRevenue {
            product_name: name.to_string(),
            revenue,
            units_sold,
        })
        .collect();
    // Stable sort keeps the name order from the BTreeMap among equal revenues.
    ranked.sort_by(|a, b| b.revenue.cmp(&a.revenue));
    ranked.truncate(limit);
    ranked
}

/// Revenue per UTC calendar day, oldest first.
pub fn revenue_by_day(sales: &[Sale]) -> Vec<DailyRevenue> {
    let mut by_day: BTreeMap<NaiveDate, Decimal> = BTreeMap::new();
    for sale in sales {
        let revenue = by_day.entry(sale.timestamp.date_naive()).or_default();
        *revenue = revenue.saturating_add(sale.total);
    }
    by_day
        .into_iter()
        .map(|(date, revenue)| DailyRevenue { date, revenue })
        .collect()
}
