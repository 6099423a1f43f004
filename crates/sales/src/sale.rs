use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use omnistock_core::{Aggregate, AggregateId, DomainError, DomainResult, Entity, OrgCode, UserId};
use omnistock_events::{Event, TenantScoped};
use omnistock_products::{Product, ProductCommand, ProductEvent, ProductId, StockWithdrawn, WithdrawStock};

/// Sale identifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SaleId(pub AggregateId);

impl SaleId {
    pub fn new(id: AggregateId) -> Self {
        Self(id)
    }

    pub fn generate() -> Self {
        Self(AggregateId::new())
    }
}

impl core::fmt::Display for SaleId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// A recorded sale (append-only).
///
/// `product_name` is a snapshot taken at sale time so reports keep working
/// after the product is renamed or deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sale {
    pub id: SaleId,
    pub org_code: OrgCode,
    pub product_id: ProductId,
    pub product_name: String,
    pub quantity: u64,
    pub unit_price: Decimal,
    pub total: Decimal,
    pub timestamp: DateTime<Utc>,
    pub seller_id: UserId,
    pub seller_email: String,
}

impl Entity for Sale {
    type Id = SaleId;

    fn entity_id(&self) -> &Self::Id {
        &self.id
    }
}

impl TenantScoped for Sale {
    fn org_code(&self) -> &OrgCode {
        &self.org_code
    }
}

/// Command: RegisterSale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterSale {
    pub org_code: OrgCode,
    pub sale_id: SaleId,
    pub product_id: ProductId,
    pub quantity: u64,
    /// Defaults to the product's current selling price.
    pub unit_price: Option<Decimal>,
    pub seller_id: UserId,
    pub seller_email: String,
    pub occurred_at: DateTime<Utc>,
}

/// Event: SaleRecorded. Carries the sale and the stock withdrawal it caused.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaleRecorded {
    pub sale: Sale,
    pub withdrawal: StockWithdrawn,
}

impl Event for SaleRecorded {
    fn event_type(&self) -> &'static str {
        "sales.sale.recorded"
    }

    fn version(&self) -> u32 {
        1
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        self.sale.timestamp
    }
}

/// Record a sale against `product`.
///
/// Every check runs before anything is mutated: on `Err` the product is left
/// exactly as it was. On success the stock withdrawal has been applied to
/// `product` and the returned event holds the new sale.
pub fn register_sale(product: &mut Product, cmd: &RegisterSale) -> DomainResult<SaleRecorded> {
    if cmd.product_id != product.id_typed() {
        return Err(DomainError::invariant("product_id mismatch"));
    }

    let withdraw = ProductCommand::WithdrawStock(WithdrawStock {
        org_code: cmd.org_code.clone(),
        product_id: cmd.product_id,
        quantity: cmd.quantity,
        occurred_at: cmd.occurred_at,
    });
    let events = product.handle(&withdraw)?;

    let unit_price = cmd.unit_price.unwrap_or(product.selling_price());
    if unit_price <= Decimal::ZERO {
        return Err(DomainError::validation("unit price must be positive"));
    }
    let total = unit_price
        .checked_mul(Decimal::from(cmd.quantity))
        .ok_or_else(|| DomainError::validation("sale total out of range"))?;

    let withdrawal = events
        .iter()
        .find_map(|e| match e {
            ProductEvent::StockWithdrawn(w) => Some(w.clone()),
            _ => None,
        })
        .ok_or_else(|| DomainError::invariant("stock withdrawal not produced"))?;

    let sale = Sale {
        id: cmd.sale_id,
        org_code: cmd.org_code.clone(),
        product_id: cmd.product_id,
        product_name: product.name().to_string(),
        quantity: cmd.quantity,
        unit_price: unit_price.normalize(),
        total: total.normalize(),
        timestamp: cmd.occurred_at,
        seller_id: cmd.seller_id,
        seller_email: cmd.seller_email.clone(),
    };

    for event in &events {
        product.apply(event);
    }

    tracing::debug!(
        org_code = %sale.org_code,
        product_id = %sale.product_id,
        quantity = sale.quantity,
        remaining = withdrawal.stock.quantity(),
        "sale registered"
    );

    Ok(SaleRecorded { sale, withdrawal })
}

#[cfg(test)]
mod tests {
    use super::*;
    use omnistock_core::AggregateRoot;
    use omnistock_products::{CreateProduct, ProductDraft};

    fn org() -> OrgCode {
        OrgCode::parse("OMNI-DEMO").unwrap()
    }

    fn monitor(stock: u64) -> Product {
        let id = ProductId::generate();
        let mut product = Product::empty(id, org());
        product
            .execute(&ProductCommand::CreateProduct(CreateProduct {
                org_code: org(),
                product_id: id,
                details: ProductDraft {
                    name: "Monitor 24\"".to_string(),
                    category: Some("Monitors".to_string()),
                    barcode: "789123456002".to_string(),
                    cost_price: Decimal::new(800, 0),
                    margin: Decimal::new(30, 0),
                    selling_price: Some(Decimal::new(1100, 0)),
                    notes: String::new(),
                },
                stock_quantity: stock,
                min_stock: 5,
                occurred_at: Utc::now(),
            }))
            .unwrap();
        product
    }

    fn sale_of(product: &Product, quantity: u64) -> RegisterSale {
        RegisterSale {
            org_code: org(),
            sale_id: SaleId::generate(),
            product_id: product.id_typed(),
            quantity,
            unit_price: None,
            seller_id: UserId::new(),
            seller_email: "seller@omnistock.com".to_string(),
            occurred_at: Utc::now(),
        }
    }

    #[test]
    fn sale_decrements_stock_and_captures_price() {
        let mut product = monitor(4);
        let cmd = sale_of(&product, 3);
        let recorded = register_sale(&mut product, &cmd).unwrap();

        assert_eq!(product.stock_quantity(), 1);
        assert_eq!(recorded.sale.unit_price, Decimal::new(1100, 0));
        assert_eq!(recorded.sale.total, Decimal::new(3300, 0));
        assert_eq!(recorded.sale.product_name, "Monitor 24\"");
        assert_eq!(recorded.withdrawal.stock.quantity(), 1);
        assert_eq!(recorded.event_type(), "sales.sale.recorded");
    }

    #[test]
    fn sale_of_entire_stock_leaves_zero() {
        let mut product = monitor(4);
        let cmd = sale_of(&product, 4);
        register_sale(&mut product, &cmd).unwrap();
        assert_eq!(product.stock_quantity(), 0);
    }

    #[test]
    fn insufficient_stock_rejects_without_mutation() {
        let mut product = monitor(4);
        let before = product.clone();

        let cmd = sale_of(&product, 5);
        let err = register_sale(&mut product, &cmd).unwrap_err();

        assert_eq!(err, DomainError::insufficient_stock(5, 4));
        assert_eq!(product, before);
    }

    #[test]
    fn zero_quantity_is_rejected() {
        let mut product = monitor(4);
        let cmd = sale_of(&product, 0);
        let err = register_sale(&mut product, &cmd).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
        assert_eq!(product.stock_quantity(), 4);
    }

    #[test]
    fn explicit_unit_price_is_used() {
        let mut product = monitor(4);
        let mut cmd = sale_of(&product, 2);
        cmd.unit_price = Some(Decimal::new(99950, 2));

        let recorded = register_sale(&mut product, &cmd).unwrap();
        assert_eq!(recorded.sale.total, Decimal::new(1999, 0));
    }

    #[test]
    fn non_positive_price_is_rejected_without_mutation() {
        let mut product = monitor(4);
        let before = product.clone();
        let mut cmd = sale_of(&product, 1);
        cmd.unit_price = Some(Decimal::ZERO);

        let err = register_sale(&mut product, &cmd).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
        assert_eq!(product, before);
    }

    #[test]
    fn other_tenant_cannot_sell() {
        let mut product = monitor(4);
        let mut cmd = sale_of(&product, 1);
        cmd.org_code = OrgCode::parse("ORG-OTHER").unwrap();

        assert!(register_sale(&mut product, &cmd).is_err());
        assert_eq!(product.stock_quantity(), 4);
        assert_eq!(product.version(), 1);
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Property: a sale either succeeds and removes exactly q units, or
            /// fails and leaves the product untouched.
            #[test]
            fn sale_and_stock_change_together(stock in 0u64..50, quantity in 0u64..60) {
                let mut product = monitor(stock);
                let before = product.clone();

                match register_sale(&mut product, &sale_of(&before, quantity)) {
                    Ok(recorded) => {
                        prop_assert!(quantity > 0 && quantity <= stock);
                        prop_assert_eq!(product.stock_quantity(), stock - quantity);
                        prop_assert_eq!(recorded.sale.quantity, quantity);
                        prop_assert_eq!(
                            recorded.sale.total,
                            recorded.sale.unit_price * Decimal::from(quantity)
                        );
                    }
                    Err(_) => {
                        prop_assert!(quantity == 0 || quantity > stock);
                        prop_assert_eq!(product, before);
                    }
                }
            }
        }
    }
}
