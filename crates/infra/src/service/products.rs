use chrono::Utc;
use serde::{Deserialize, Serialize};

use omnistock_ai::PricingSnapshot;
use omnistock_auth::Permission;
use omnistock_core::{Aggregate, DomainError};
use omnistock_events::{Event, TenantScoped};
use omnistock_products::{
    AdjustStock, CreateProduct, Product, ProductCommand, ProductDraft, ProductEvent, ProductId,
    UpdateProduct, resolve_category,
};

use super::{InventoryService, ServiceError};
use crate::persistence::SnapshotStore;

/// Product create/update form: the catalog fields plus stock levels.
///
/// Absent stock levels are zero on create and unchanged on update.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductForm {
    #[serde(flatten)]
    pub draft: ProductDraft,
    #[serde(default)]
    pub stock_quantity: Option<u64>,
    #[serde(default)]
    pub min_stock: Option<u64>,
}

/// Answer to "delete this product?".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    Confirmed,
    Declined,
}

fn log_events(events: &[ProductEvent], product: &Product) {
    for event in events {
        tracing::info!(
            org_code = %product.org_code(),
            product_id = %product.id_typed(),
            event_type = event.event_type(),
            "product event"
        );
    }
}

impl<S> InventoryService<S>
where
    S: SnapshotStore,
{
    pub fn create_product(&mut self, form: ProductForm) -> Result<Product, ServiceError> {
        let principal = self.require(&Permission::PRODUCTS_WRITE)?;
        let product_id = ProductId::generate();

        self.commit(|state| {
            let mut product = Product::empty(product_id, principal.org_code.clone());
            let events = product.execute(&ProductCommand::CreateProduct(CreateProduct {
                org_code: principal.org_code.clone(),
                product_id,
                details: form.draft,
                stock_quantity: form.stock_quantity.unwrap_or(0),
                min_stock: form.min_stock.unwrap_or(0),
                occurred_at: Utc::now(),
            }))?;
            log_events(&events, &product);
            state.products.upsert(product.clone());
            Ok(product)
        })
    }

    pub fn update_product(&mut self, product_id: ProductId, form: ProductForm) -> Result<Product, ServiceError> {
        let principal = self.require(&Permission::PRODUCTS_WRITE)?;

        self.commit(|state| {
            let product = state
                .products
                .get_mut(&principal.org_code, &product_id)
                .ok_or(DomainError::NotFound)?;
            let events = product.execute(&ProductCommand::UpdateProduct(UpdateProduct {
                org_code: principal.org_code.clone(),
                product_id,
                details: form.draft,
                stock_quantity: form.stock_quantity,
                min_stock: form.min_stock,
                occurred_at: Utc::now(),
            }))?;
            log_events(&events, product);
            Ok(product.clone())
        })
    }

    /// Delete a product. Recorded sales keep their product name snapshot.
    ///
    /// The product must exist in the caller's organization either way.
    /// Returns `false` (and changes nothing) when the deletion was declined.
    pub fn delete_product(&mut self, product_id: ProductId, confirmation: Confirmation) -> Result<bool, ServiceError> {
        let principal = self.require(&Permission::PRODUCTS_WRITE)?;
        if self.state.products.get(&principal.org_code, &product_id).is_none() {
            return Err(DomainError::NotFound.into());
        }
        if confirmation == Confirmation::Declined {
            return Ok(false);
        }

        self.commit(|state| {
            state
                .products
                .remove(&principal.org_code, &product_id)
                .ok_or(DomainError::NotFound)?;
            tracing::info!(org_code = %principal.org_code, product_id = %product_id, "product deleted");
            Ok(true)
        })
    }

    /// Manual stock correction by a signed delta, clamped at zero.
    pub fn adjust_stock(&mut self, product_id: ProductId, delta: i64) -> Result<Product, ServiceError> {
        let principal = self.require(&Permission::STOCK_ADJUST)?;

        self.commit(|state| {
            let product = state
                .products
                .get_mut(&principal.org_code, &product_id)
                .ok_or(DomainError::NotFound)?;
            let events = product.execute(&ProductCommand::AdjustStock(AdjustStock {
                org_code: principal.org_code.clone(),
                product_id,
                delta,
                occurred_at: Utc::now(),
            }))?;
            log_events(&events, product);
            Ok(product.clone())
        })
    }

    /// Pricing advice for a saved product.
    pub fn pricing_advice(&self, product_id: ProductId) -> Result<String, ServiceError> {
        let principal = self.require(&Permission::PRICING_ADVISE)?;
        let product = self
            .state
            .products
            .get(&principal.org_code, &product_id)
            .ok_or(DomainError::NotFound)?;

        let snapshot = PricingSnapshot {
            name: product.name().to_string(),
            category: product.category().to_string(),
            cost_price: product.cost_price(),
            margin: product.margin(),
        };
        Ok(self.advisor.advise(&principal.org_code, snapshot))
    }

    /// Pricing advice for a form that has not been saved yet.
    pub fn pricing_advice_for_draft(&self, draft: &ProductDraft) -> Result<String, ServiceError> {
        let principal = self.require(&Permission::PRICING_ADVISE)?;
        let snapshot = PricingSnapshot {
            name: draft.name.trim().to_string(),
            category: resolve_category(draft.category.as_deref())?,
            cost_price: draft.cost_price,
            margin: draft.margin,
        };
        Ok(self.advisor.advise(&principal.org_code, snapshot))
    }
}
