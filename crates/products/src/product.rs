use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use omnistock_core::{Aggregate, AggregateId, AggregateRoot, DomainError, Entity, OrgCode};
use omnistock_events::{Event, TenantScoped};
use omnistock_inventory::{StockLevel, StockStatus};

use crate::category::resolve_category;
use crate::pricing::{resolve_selling_price, suggested_price};

/// Product identifier (tenant-scoped via `org_code` fields in events/commands).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(pub AggregateId);

impl ProductId {
    pub fn new(id: AggregateId) -> Self {
        Self(id)
    }

    pub fn generate() -> Self {
        Self(AggregateId::new())
    }
}

impl core::fmt::Display for ProductId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// Editable catalog fields as submitted by a create/update form.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ProductDraft {
    pub name: String,
    pub category: Option<String>,
    pub barcode: String,
    pub cost_price: Decimal,
    /// Margin in percent (40 means +40 %).
    pub margin: Decimal,
    /// `None` (or zero) means "use the suggested price".
    pub selling_price: Option<Decimal>,
    pub notes: String,
}

/// Validated catalog fields with derived pricing.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub name: String,
    pub category: String,
    pub barcode: String,
    pub cost_price: Decimal,
    pub margin: Decimal,
    pub suggested_price: Decimal,
    pub selling_price: Decimal,
    /// True when `selling_price` was set by hand and must not follow
    /// cost/margin changes.
    pub price_overridden: bool,
    pub notes: String,
}

impl CatalogEntry {
    fn resolve(details: &ProductDraft, previous: Option<&CatalogEntry>) -> Result<Self, DomainError> {
        let name = details.name.trim();
        if name.is_empty() {
            return Err(DomainError::validation("name cannot be empty"));
        }
        let barcode = details.barcode.trim();
        if barcode.is_empty() {
            return Err(DomainError::validation("barcode cannot be empty"));
        }
        if details.cost_price < Decimal::ZERO {
            return Err(DomainError::validation("cost price cannot be negative"));
        }
        if details.margin < -Decimal::ONE_HUNDRED {
            return Err(DomainError::validation("margin cannot be below -100%"));
        }

        let category = resolve_category(details.category.as_deref())?;
        let suggested = suggested_price(details.cost_price, details.margin)?;
        let (selling_price, price_overridden) = resolve_selling_price(
            details.selling_price,
            suggested,
            previous.map(|e| (e.selling_price, e.price_overridden)),
        )?;

        Ok(Self {
            name: name.to_string(),
            category,
            barcode: barcode.to_string(),
            cost_price: details.cost_price,
            margin: details.margin,
            suggested_price: suggested,
            selling_price,
            price_overridden,
            notes: details.notes.clone(),
        })
    }
}

/// Aggregate root: Product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    id: ProductId,
    org_code: OrgCode,
    #[serde(flatten)]
    entry: CatalogEntry,
    stock: StockLevel,
    date_added: DateTime<Utc>,
    version: u64,
    created: bool,
}

impl Product {
    /// Create an empty, not-yet-created product owned by `org_code`.
    pub fn empty(id: ProductId, org_code: OrgCode) -> Self {
        Self {
            id,
            org_code,
            entry: CatalogEntry::default(),
            stock: StockLevel::default(),
            date_added: DateTime::<Utc>::default(),
            version: 0,
            created: false,
        }
    }

    pub fn id_typed(&self) -> ProductId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.entry.name
    }

    pub fn category(&self) -> &str {
        &self.entry.category
    }

    pub fn barcode(&self) -> &str {
        &self.entry.barcode
    }

    pub fn cost_price(&self) -> Decimal {
        self.entry.cost_price
    }

    pub fn margin(&self) -> Decimal {
        self.entry.margin
    }

    pub fn suggested_price(&self) -> Decimal {
        self.entry.suggested_price
    }

    pub fn selling_price(&self) -> Decimal {
        self.entry.selling_price
    }

    pub fn price_overridden(&self) -> bool {
        self.entry.price_overridden
    }

    pub fn notes(&self) -> &str {
        &self.entry.notes
    }

    pub fn stock(&self) -> StockLevel {
        self.stock
    }

    pub fn stock_quantity(&self) -> u64 {
        self.stock.quantity()
    }

    pub fn min_stock(&self) -> u64 {
        self.stock.min_stock()
    }

    pub fn stock_status(&self) -> StockStatus {
        self.stock.status()
    }

    pub fn date_added(&self) -> DateTime<Utc> {
        self.date_added
    }

    pub fn is_created(&self) -> bool {
        self.created
    }

    /// Current fields as an editable draft (for round-tripping through a form).
    pub fn draft(&self) -> ProductDraft {
        ProductDraft {
            name: self.entry.name.clone(),
            category: Some(self.entry.category.clone()),
            barcode: self.entry.barcode.clone(),
            cost_price: self.entry.cost_price,
            margin: self.entry.margin,
            selling_price: Some(self.entry.selling_price),
            notes: self.entry.notes.clone(),
        }
    }
}

impl AggregateRoot for Product {
    type Id = ProductId;

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn version(&self) -> u64 {
        self.version
    }
}

impl Entity for Product {
    type Id = ProductId;

    fn entity_id(&self) -> &Self::Id {
        &self.id
    }
}

impl TenantScoped for Product {
    fn org_code(&self) -> &OrgCode {
        &self.org_code
    }
}

/// Command: CreateProduct.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateProduct {
    pub org_code: OrgCode,
    pub product_id: ProductId,
    pub details: ProductDraft,
    pub stock_quantity: u64,
    pub min_stock: u64,
    pub occurred_at: DateTime<Utc>,
}

/// Command: UpdateProduct. Absent stock fields keep their current value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateProduct {
    pub org_code: OrgCode,
    pub product_id: ProductId,
    pub details: ProductDraft,
    pub stock_quantity: Option<u64>,
    pub min_stock: Option<u64>,
    pub occurred_at: DateTime<Utc>,
}

/// Command: AdjustStock (manual +/-, clamped at zero).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdjustStock {
    pub org_code: OrgCode,
    pub product_id: ProductId,
    pub delta: i64,
    pub occurred_at: DateTime<Utc>,
}

/// Command: WithdrawStock (sale; rejected when stock is insufficient).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WithdrawStock {
    pub org_code: OrgCode,
    pub product_id: ProductId,
    pub quantity: u64,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProductCommand {
    CreateProduct(CreateProduct),
    UpdateProduct(UpdateProduct),
    AdjustStock(AdjustStock),
    WithdrawStock(WithdrawStock),
}

/// Event: ProductCreated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductCreated {
    pub org_code: OrgCode,
    pub product_id: ProductId,
    pub entry: CatalogEntry,
    pub stock: StockLevel,
    pub occurred_at: DateTime<Utc>,
}

/// Event: ProductUpdated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductUpdated {
    pub org_code: OrgCode,
    pub product_id: ProductId,
    pub entry: CatalogEntry,
    pub stock: StockLevel,
    pub occurred_at: DateTime<Utc>,
}

/// Event: StockAdjusted. `stock` is the level after clamping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockAdjusted {
    pub org_code: OrgCode,
    pub product_id: ProductId,
    pub delta: i64,
    pub stock: StockLevel,
    pub occurred_at: DateTime<Utc>,
}

/// Event: StockWithdrawn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockWithdrawn {
    pub org_code: OrgCode,
    pub product_id: ProductId,
    pub quantity: u64,
    pub stock: StockLevel,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProductEvent {
    ProductCreated(ProductCreated),
    ProductUpdated(ProductUpdated),
    StockAdjusted(StockAdjusted),
    StockWithdrawn(StockWithdrawn),
}

impl Event for ProductEvent {
    fn event_type(&self) -> &'static str {
        match self {
            ProductEvent::ProductCreated(_) => "products.product.created",
            ProductEvent::ProductUpdated(_) => "products.product.updated",
            ProductEvent::StockAdjusted(_) => "products.stock.adjusted",
            ProductEvent::StockWithdrawn(_) => "products.stock.withdrawn",
        }
    }

    fn version(&self) -> u32 {
        1
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            ProductEvent::ProductCreated(e) => e.occurred_at,
            ProductEvent::ProductUpdated(e) => e.occurred_at,
            ProductEvent::StockAdjusted(e) => e.occurred_at,
            ProductEvent::StockWithdrawn(e) => e.occurred_at,
        }
    }
}

impl Aggregate for Product {
    type Command = ProductCommand;
    type Event = ProductEvent;
    type Error = DomainError;

    fn apply(&mut self, event: &Self::Event) {
        match event {
            ProductEvent::ProductCreated(e) => {
                self.id = e.product_id;
                self.org_code = e.org_code.clone();
                self.entry = e.entry.clone();
                self.stock = e.stock;
                self.date_added = e.occurred_at;
                self.created = true;
            }
            ProductEvent::ProductUpdated(e) => {
                self.entry = e.entry.clone();
                self.stock = e.stock;
            }
            ProductEvent::StockAdjusted(e) => {
                self.stock = e.stock;
            }
            ProductEvent::StockWithdrawn(e) => {
                self.stock = e.stock;
            }
        }

        // Deterministic version tracking: +1 per applied event.
        self.version += 1;
    }

    fn handle(&self, command: &Self::Command) -> Result<Vec<Self::Event>, Self::Error> {
        match command {
            ProductCommand::CreateProduct(cmd) => self.handle_create(cmd),
            ProductCommand::UpdateProduct(cmd) => self.handle_update(cmd),
            ProductCommand::AdjustStock(cmd) => self.handle_adjust(cmd),
            ProductCommand::WithdrawStock(cmd) => self.handle_withdraw(cmd),
        }
    }
}

impl Product {
    fn ensure_tenant(&self, org_code: &OrgCode) -> Result<(), DomainError> {
        if &self.org_code != org_code {
            return Err(DomainError::invariant("tenant mismatch"));
        }
        Ok(())
    }

    fn ensure_product_id(&self, product_id: ProductId) -> Result<(), DomainError> {
        if self.id != product_id {
            return Err(DomainError::invariant("product_id mismatch"));
        }
        Ok(())
    }

    fn ensure_existing(&self, org_code: &OrgCode, product_id: ProductId) -> Result<(), DomainError> {
        if !self.created {
            return Err(DomainError::not_found());
        }
        self.ensure_tenant(org_code)?;
        self.ensure_product_id(product_id)
    }

    fn handle_create(&self, cmd: &CreateProduct) -> Result<Vec<ProductEvent>, DomainError> {
        if self.created {
            return Err(DomainError::conflict("product already exists"));
        }
        self.ensure_tenant(&cmd.org_code)?;
        self.ensure_product_id(cmd.product_id)?;

        let entry = CatalogEntry::resolve(&cmd.details, None)?;

        Ok(vec![ProductEvent::ProductCreated(ProductCreated {
            org_code: cmd.org_code.clone(),
            product_id: cmd.product_id,
            entry,
            stock: StockLevel::new(cmd.stock_quantity, cmd.min_stock),
            occurred_at: cmd.occurred_at,
        })])
    }

    fn handle_update(&self, cmd: &UpdateProduct) -> Result<Vec<ProductEvent>, DomainError> {
        self.ensure_existing(&cmd.org_code, cmd.product_id)?;

        let entry = CatalogEntry::resolve(&cmd.details, Some(&self.entry))?;
        let stock = StockLevel::new(
            cmd.stock_quantity.unwrap_or(self.stock.quantity()),
            cmd.min_stock.unwrap_or(self.stock.min_stock()),
        );

        Ok(vec![ProductEvent::ProductUpdated(ProductUpdated {
            org_code: cmd.org_code.clone(),
            product_id: cmd.product_id,
            entry,
            stock,
            occurred_at: cmd.occurred_at,
        })])
    }

    fn handle_adjust(&self, cmd: &AdjustStock) -> Result<Vec<ProductEvent>, DomainError> {
        self.ensure_existing(&cmd.org_code, cmd.product_id)?;

        if cmd.delta == 0 {
            return Err(DomainError::validation("delta cannot be zero"));
        }

        Ok(vec![ProductEvent::StockAdjusted(StockAdjusted {
            org_code: cmd.org_code.clone(),
            product_id: cmd.product_id,
            delta: cmd.delta,
            stock: self.stock.adjusted(cmd.delta),
            occurred_at: cmd.occurred_at,
        })])
    }

    fn handle_withdraw(&self, cmd: &WithdrawStock) -> Result<Vec<ProductEvent>, DomainError> {
        self.ensure_existing(&cmd.org_code, cmd.product_id)?;

        let stock = self.stock.withdraw(cmd.quantity)?;

        Ok(vec![ProductEvent::StockWithdrawn(StockWithdrawn {
            org_code: cmd.org_code.clone(),
            product_id: cmd.product_id,
            quantity: cmd.quantity,
            stock,
            occurred_at: cmd.occurred_at,
        })])
    }
}
