use serde::Serialize;

use omnistock_auth::{Permission, View};
use omnistock_products::Product;
use omnistock_sales::Sale;

use super::{InventoryService, ServiceError, UserSummary};
use crate::persistence::SnapshotStore;
use crate::projections::{CatalogQuery, Dashboard, filter_catalog, restock_alerts, sales_history};

/// Data behind one view, for the signed-in organization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "view", content = "data", rename_all = "lowercase")]
pub enum ViewData {
    Dashboard(Dashboard),
    Products(Vec<Product>),
    Sales(Vec<Sale>),
    /// Restock alerts first, then the full list for adjustments.
    Stock {
        alerts: Vec<Product>,
        products: Vec<Product>,
    },
    Users(Vec<UserSummary>),
}

impl<S> InventoryService<S>
where
    S: SnapshotStore,
{
    pub fn list_products(&self, query: &CatalogQuery) -> Result<Vec<Product>, ServiceError> {
        let principal = self.require(&Permission::PRODUCTS_READ)?;
        let products = self.state.products.list(&principal.org_code);
        Ok(filter_catalog(products, query).into_iter().cloned().collect())
    }

    pub fn restock_alerts(&self) -> Result<Vec<Product>, ServiceError> {
        let principal = self.require(&Permission::STOCK_READ)?;
        let products = self.state.products.list(&principal.org_code);
        Ok(restock_alerts(products).into_iter().cloned().collect())
    }

    pub fn dashboard(&self) -> Result<Dashboard, ServiceError> {
        let principal = self.require(&Permission::DASHBOARD_READ)?;
        let org = &principal.org_code;
        Ok(Dashboard::compute(
            self.state.products.list(org),
            self.state.sales.list(org),
            self.state.users.list(org),
        ))
    }

    /// Sales of the organization, newest first.
    pub fn sales_history(&self) -> Result<Vec<Sale>, ServiceError> {
        let principal = self.require(&Permission::SALES_READ)?;
        let sales = self.state.sales.list(&principal.org_code);
        Ok(sales_history(sales).into_iter().cloned().collect())
    }

    /// Data for the view the session is on.
    pub fn current_view_data(&self) -> Result<ViewData, ServiceError> {
        let view = self.current_view().ok_or(ServiceError::NotAuthenticated)?;
        self.view_data(view)
    }

    pub fn view_data(&self, view: View) -> Result<ViewData, ServiceError> {
        Ok(match view {
            View::Dashboard => ViewData::Dashboard(self.dashboard()?),
            View::Products => ViewData::Products(self.list_products(&CatalogQuery::default())?),
            View::Sales => ViewData::Sales(self.sales_history()?),
            View::Stock => {
                let alerts = self.restock_alerts()?;
                let principal = self.require(&Permission::STOCK_READ)?;
                ViewData::Stock {
                    alerts,
                    products: self.state.products.list(&principal.org_code).to_vec(),
                }
            }
            View::Users => ViewData::Users(self.list_users()?),
        })
    }
}
