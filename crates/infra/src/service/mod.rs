//! Service facade: the operations a UI would call.
//!
//! Every mutation runs against a clone of the state; the clone is persisted
//! and only then swapped in, so the in-memory and on-disk state never diverge
//! and a failed operation changes nothing.

mod error;
mod products;
mod queries;
mod sales;
mod session;
mod users;

use std::sync::Arc;

use omnistock_ai::{GeminiClient, PricingAdvisor};
use omnistock_auth::{CredentialHasher, Permission, Principal, Session, authorize};

use crate::config::OmniStockConfig;
use crate::persistence::{JsonFileSnapshotStore, PersistenceError, SnapshotStore};
use crate::seed;
use crate::store::InventoryState;

pub use error::ServiceError;
pub use products::{Confirmation, ProductForm};
pub use queries::ViewData;
pub use users::UserSummary;

pub struct InventoryService<S> {
    state: InventoryState,
    store: S,
    session: Option<Session>,
    hasher: CredentialHasher,
    advisor: PricingAdvisor,
}

impl<S> core::fmt::Debug for InventoryService<S> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("InventoryService")
            .field("products", &self.state.products.len())
            .field("sales", &self.state.sales.len())
            .field("users", &self.state.users.len())
            .field("session", &self.session)
            .field("advisor", &self.advisor)
            .finish_non_exhaustive()
    }
}

impl<S> InventoryService<S>
where
    S: SnapshotStore,
{
    /// Load the saved state from `store`.
    ///
    /// With nothing saved (or an unreadable snapshot, which the store moves
    /// aside) the engine starts from the demo seed when `seed_demo` is set,
    /// otherwise empty.
    pub fn open(
        store: S,
        hasher: CredentialHasher,
        advisor: PricingAdvisor,
        seed_demo: bool,
    ) -> Result<Self, ServiceError> {
        let loaded = match store.load() {
            Ok(snapshot) => snapshot,
            Err(PersistenceError::Corrupt(reason)) => {
                tracing::error!(reason = %reason, "starting without the saved state");
                None
            }
            Err(e) => return Err(e.into()),
        };

        let state = match loaded {
            Some(snapshot) => InventoryState::from_snapshot(snapshot),
            None if seed_demo => {
                let state = seed::demo_state(&hasher, chrono::Utc::now())?;
                store.save(&state.to_snapshot())?;
                tracing::info!(org_code = seed::DEMO_ORG, "demo data seeded");
                state
            }
            None => InventoryState::default(),
        };

        Ok(Self::new(state, store, hasher, advisor))
    }

    pub fn new(state: InventoryState, store: S, hasher: CredentialHasher, advisor: PricingAdvisor) -> Self {
        Self {
            state,
            store,
            session: None,
            hasher,
            advisor,
        }
    }

    pub fn state(&self) -> &InventoryState {
        &self.state
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn principal(&self) -> Result<&Principal, ServiceError> {
        self.session
            .as_ref()
            .map(Session::principal)
            .ok_or(ServiceError::NotAuthenticated)
    }

    /// Signed-in principal holding `permission`.
    fn require(&self, permission: &Permission) -> Result<Principal, ServiceError> {
        let principal = self.principal()?;
        authorize(principal, permission)?;
        Ok(principal.clone())
    }

    /// Apply `change` to a copy of the state, persist it, then swap it in.
    fn commit<T, F>(&mut self, change: F) -> Result<T, ServiceError>
    where
        F: FnOnce(&mut InventoryState) -> Result<T, ServiceError>,
    {
        let mut next = self.state.clone();
        let out = change(&mut next)?;
        self.store.save(&next.to_snapshot())?;
        self.state = next;
        Ok(out)
    }
}

/// Build the service described by `config`, backed by its JSON snapshot file.
pub fn bootstrap(config: &OmniStockConfig) -> Result<InventoryService<JsonFileSnapshotStore>, ServiceError> {
    let hasher = CredentialHasher::new(config.hashing)?;
    let advisor = match &config.ai {
        Some(ai) => PricingAdvisor::new(Arc::new(GeminiClient::new(ai.clone())?)),
        None => PricingAdvisor::disabled(),
    };
    let store = JsonFileSnapshotStore::new(config.data_path.clone());

    tracing::info!(
        path = %config.data_path.display(),
        ai_enabled = advisor.is_configured(),
        "opening inventory store"
    );
    InventoryService::open(store, hasher, advisor, config.seed_demo)
}
