//! Pricing advice: a short justification for keeping or changing a
//! product's selling price.

use std::sync::Arc;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use omnistock_core::OrgCode;

use crate::generator::TextGenerator;
use crate::job::AiJob;
use crate::result::{AiError, AiResult};
use crate::scheduler::{AiScheduler, LocalAiScheduler};

/// Shown when the model answered with nothing.
pub const NO_SUGGESTIONS: &str = "No automatic pricing suggestions at the moment.";

/// Shown when the model could not be reached (or is not configured).
pub const UNAVAILABLE: &str = "Could not reach the pricing AI.";

/// Product fields the advisor looks at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingSnapshot {
    pub name: String,
    pub category: String,
    pub cost_price: Decimal,
    pub margin: Decimal,
}

impl PricingSnapshot {
    fn prompt(&self) -> String {
        format!(
            "Analyze this product for a strategic price suggestion:\n\
             Name: {}\n\
             Category: {}\n\
             Cost price: {}\n\
             Current margin: {}%\n\n\
             Give a short justification (at most 2 sentences) for keeping or \
             changing the selling price based on competitiveness and a healthy margin.",
            self.name, self.category, self.cost_price, self.margin
        )
    }
}

/// One pricing-advice request, scoped to the organization that asked.
pub struct PricingAdviceJob {
    org_code: OrgCode,
    snapshot: PricingSnapshot,
    generator: Arc<dyn TextGenerator>,
}

impl PricingAdviceJob {
    pub fn new(org_code: OrgCode, snapshot: PricingSnapshot, generator: Arc<dyn TextGenerator>) -> Self {
        Self {
            org_code,
            snapshot,
            generator,
        }
    }
}

impl AiJob for PricingAdviceJob {
    fn org_code(&self) -> &OrgCode {
        &self.org_code
    }

    fn run(&self) -> Result<AiResult, AiError> {
        if self.snapshot.name.trim().is_empty() {
            return Err(AiError::InvalidInput("product name is empty".to_string()));
        }
        let text = self.generator.generate(&self.snapshot.prompt())?;
        Ok(AiResult::new(text.trim()))
    }
}

/// Stateless front door for pricing advice.
///
/// Never fails: every error turns into one of the fixed fallback strings.
#[derive(Clone, Default)]
pub struct PricingAdvisor {
    generator: Option<Arc<dyn TextGenerator>>,
}

impl core::fmt::Debug for PricingAdvisor {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("PricingAdvisor")
            .field("configured", &self.is_configured())
            .finish()
    }
}

impl PricingAdvisor {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self {
            generator: Some(generator),
        }
    }

    /// Advisor without a backend: always answers `UNAVAILABLE`.
    pub fn disabled() -> Self {
        Self::default()
    }

    pub fn is_configured(&self) -> bool {
        self.generator.is_some()
    }

    pub fn advise(&self, org_code: &OrgCode, snapshot: PricingSnapshot) -> String {
        let Some(generator) = self.generator.clone() else {
            tracing::debug!(org_code = %org_code, "pricing advisor not configured");
            return UNAVAILABLE.to_string();
        };

        let scheduler = LocalAiScheduler::for_tenant(org_code.clone());
        let job = PricingAdviceJob::new(org_code.clone(), snapshot, generator);

        match scheduler.run(job) {
            Ok(result) if result.text.is_empty() => NO_SUGGESTIONS.to_string(),
            Ok(result) => result.text,
            Err(err) => {
                tracing::warn!(org_code = %org_code, error = %err, "pricing advice failed");
                UNAVAILABLE.to_string()
            }
        }
    }
}
