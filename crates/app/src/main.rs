//! Headless entry point.
//!
//! Opens the store described by the environment (seeding the demo tenant on
//! first boot), optionally signs in with `OMNISTOCK_EMAIL` /
//! `OMNISTOCK_PASSWORD` and prints the requested view as JSON.

use anyhow::Context;

use omnistock_auth::View;

const EMAIL_ENV: &str = "OMNISTOCK_EMAIL";
const PASSWORD_ENV: &str = "OMNISTOCK_PASSWORD";
const VIEW_ENV: &str = "OMNISTOCK_VIEW";

fn main() -> anyhow::Result<()> {
    let config = omnistock_infra::OmniStockConfig::from_env().context("reading configuration")?;
    omnistock_observability::init_with(config.log_format);

    let mut service = omnistock_infra::bootstrap(&config).context("opening the inventory store")?;

    let (Ok(email), Ok(password)) = (std::env::var(EMAIL_ENV), std::env::var(PASSWORD_ENV)) else {
        tracing::info!(
            products = service.state().products.len(),
            sales = service.state().sales.len(),
            users = service.state().users.len(),
            "store ready; set {EMAIL_ENV} and {PASSWORD_ENV} to sign in"
        );
        return Ok(());
    };

    service.sign_in(&email, &password).context("signing in")?;

    if let Ok(raw) = std::env::var(VIEW_ENV) {
        let view: View = raw.parse().with_context(|| format!("unknown view '{raw}'"))?;
        service.navigate(view).context("opening view")?;
    }

    let data = service.current_view_data().context("loading view")?;
    println!("{}", serde_json::to_string_pretty(&data)?);
    Ok(())
}
