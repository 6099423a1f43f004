use chrono::Utc;
use rust_decimal::Decimal;

use omnistock_auth::Permission;
use omnistock_core::DomainError;
use omnistock_events::Event;
use omnistock_products::ProductId;
use omnistock_sales::{RegisterSale, Sale, SaleId, register_sale};

use super::{InventoryService, ServiceError};
use crate::persistence::SnapshotStore;

impl<S> InventoryService<S>
where
    S: SnapshotStore,
{
    /// Sell `quantity` units of a product.
    ///
    /// The sale and the stock withdrawal are committed together: on any error
    /// neither the product nor the sales list changes.
    pub fn register_sale(
        &mut self,
        product_id: ProductId,
        quantity: u64,
        unit_price: Option<Decimal>,
    ) -> Result<Sale, ServiceError> {
        let principal = self.require(&Permission::SALES_CREATE)?;
        let cmd = RegisterSale {
            org_code: principal.org_code.clone(),
            sale_id: SaleId::generate(),
            product_id,
            quantity,
            unit_price,
            seller_id: principal.user_id,
            seller_email: principal.email.clone(),
            occurred_at: Utc::now(),
        };

        let recorded = self.commit(|state| {
            let product = state
                .products
                .get_mut(&cmd.org_code, &cmd.product_id)
                .ok_or(DomainError::NotFound)?;
            let recorded = register_sale(product, &cmd)?;
            state.sales.upsert(recorded.sale.clone());
            Ok(recorded)
        })?;

        tracing::info!(
            org_code = %recorded.sale.org_code,
            product_id = %recorded.sale.product_id,
            sale_id = %recorded.sale.id,
            total = %recorded.sale.total,
            event_type = recorded.event_type(),
            "sale recorded"
        );
        Ok(recorded.sale)
    }
}
