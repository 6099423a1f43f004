use omnistock_sales::Sale;

/// Sales, newest first. Sales recorded at the same instant keep reverse
/// recording order.
pub fn sales_history(sales: &[Sale]) -> Vec<&Sale> {
    let mut history: Vec<&Sale> = sales.iter().rev().collect();
    history.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    history
}
