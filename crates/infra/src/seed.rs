//! Demo tenant used on first boot.

use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;

use omnistock_auth::{CredentialHasher, DeactivateUser, RegisterUser, Role, User, UserCommand};
use omnistock_core::{Aggregate, OrgCode, UserId};
use omnistock_products::{CreateProduct, Product, ProductCommand, ProductDraft, ProductId};

use crate::service::ServiceError;
use crate::store::InventoryState;

pub const DEMO_ORG: &str = "OMNI-DEMO";
pub const DEMO_PASSWORD: &str = "omnistock-demo";

pub const DEMO_ADMIN_EMAIL: &str = "admin@omnistock.com";
pub const DEMO_SELLER_EMAIL: &str = "seller@omnistock.com";
pub const DEMO_INACTIVE_EMAIL: &str = "inactive@omnistock.com";

struct DemoProduct {
    name: &'static str,
    category: &'static str,
    barcode: &'static str,
    cost_price: i64,
    margin: i64,
    selling_price: i64,
    stock: u64,
    min_stock: u64,
    notes: &'static str,
    age_days: i64,
}

const DEMO_PRODUCTS: [DemoProduct; 2] = [
    DemoProduct {
        name: "Mechanical Keyboard RGB",
        category: "Peripherals",
        barcode: "789123456001",
        cost_price: 150,
        margin: 40,
        selling_price: 220,
        stock: 15,
        min_stock: 5,
        notes: "Fast mover",
        age_days: 45,
    },
    DemoProduct {
        name: "Monitor 24\" 144Hz",
        category: "Monitors",
        barcode: "789123456002",
        cost_price: 800,
        margin: 30,
        selling_price: 1100,
        stock: 4,
        min_stock: 5,
        notes: "Critical stock",
        age_days: 30,
    },
];

/// The `OMNI-DEMO` organization: an admin, a seller, an inactive former
/// employee and two products (one below its minimum stock).
pub fn demo_state(hasher: &CredentialHasher, now: DateTime<Utc>) -> Result<InventoryState, ServiceError> {
    let org = OrgCode::parse(DEMO_ORG)?;
    let mut state = InventoryState::default();

    let admin = demo_user(hasher, &org, DEMO_ADMIN_EMAIL, "Demo Admin", Role::Admin, now)?;
    let seller = demo_user(hasher, &org, DEMO_SELLER_EMAIL, "Demo Seller", Role::Employee, now)?;
    let mut inactive = demo_user(hasher, &org, DEMO_INACTIVE_EMAIL, "Former Employee", Role::Employee, now)?;
    inactive.execute(&UserCommand::Deactivate(DeactivateUser {
        org_code: org.clone(),
        user_id: inactive.id_typed(),
        actor_id: admin.id_typed(),
        occurred_at: now,
    }))?;

    for user in [admin, seller, inactive] {
        state.users.upsert(user);
    }

    for demo in &DEMO_PRODUCTS {
        state.products.upsert(demo_product(&org, demo, now)?);
    }

    Ok(state)
}

fn demo_user(
    hasher: &CredentialHasher,
    org: &OrgCode,
    email: &str,
    name: &str,
    role: Role,
    now: DateTime<Utc>,
) -> Result<User, ServiceError> {
    let id = UserId::new();
    let mut user = User::empty(id, org.clone());
    user.execute(&UserCommand::Register(RegisterUser {
        org_code: org.clone(),
        user_id: id,
        email: email.to_string(),
        name: name.to_string(),
        role,
        password_hash: hasher.hash(DEMO_PASSWORD)?,
        occurred_at: now,
    }))?;
    Ok(user)
}

fn demo_product(org: &OrgCode, demo: &DemoProduct, now: DateTime<Utc>) -> Result<Product, ServiceError> {
    let id = ProductId::generate();
    let mut product = Product::empty(id, org.clone());
    product.execute(&ProductCommand::CreateProduct(CreateProduct {
        org_code: org.clone(),
        product_id: id,
        details: ProductDraft {
            name: demo.name.to_string(),
            category: Some(demo.category.to_string()),
            barcode: demo.barcode.to_string(),
            cost_price: Decimal::from(demo.cost_price),
            margin: Decimal::from(demo.margin),
            selling_price: Some(Decimal::from(demo.selling_price)),
            notes: demo.notes.to_string(),
        },
        stock_quantity: demo.stock,
        min_stock: demo.min_stock,
        occurred_at: now - Duration::days(demo.age_days),
    }))?;
    Ok(product)
}
