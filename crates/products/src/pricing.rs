//! Pricing rules: suggested price from cost and margin, selling price
//! resolution.

use rust_decimal::Decimal;

use omnistock_core::{DomainError, DomainResult};

/// `cost × (1 + margin / 100)`.
pub fn suggested_price(cost: Decimal, margin_pct: Decimal) -> DomainResult<Decimal> {
    let factor = margin_pct
        .checked_div(Decimal::ONE_HUNDRED)
        .and_then(|m| Decimal::ONE.checked_add(m))
        .ok_or_else(|| DomainError::validation("margin out of range"))?;
    cost.checked_mul(factor)
        .map(|p| p.normalize())
        .ok_or_else(|| DomainError::validation("cost price out of range"))
}

/// Decide the selling price for a create/update.
///
/// - A positive `requested` price that differs from the automatic one is a
///   manual override and is kept as-is.
/// - No price (or zero) keeps an existing manual override, otherwise follows
///   `suggested`.
/// - Re-submitting the current automatic price is not an override, so form
///   round-trips keep following cost/margin changes.
///
/// Returns the price and whether it is a manual override.
pub fn resolve_selling_price(
    requested: Option<Decimal>,
    suggested: Decimal,
    previous: Option<(Decimal, bool)>,
) -> DomainResult<(Decimal, bool)> {
    let requested = match requested {
        Some(p) if p < Decimal::ZERO => {
            return Err(DomainError::validation("selling price cannot be negative"));
        }
        Some(p) if p.is_zero() => None,
        other => other,
    };

    let resolved = match (requested, previous) {
        (Some(p), _) if p == suggested => (suggested, false),
        (Some(p), Some((prev, false))) if p == prev => (suggested, false),
        (Some(p), _) => (p.normalize(), true),
        (None, Some((prev, true))) => (prev, true),
        (None, _) => (suggested, false),
    };
    Ok(resolved)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(units: i64, scale: u32) -> Decimal {
        Decimal::new(units, scale)
    }

    #[test]
    fn suggested_price_applies_margin() {
        assert_eq!(suggested_price(d(15000, 2), d(40, 0)).unwrap(), d(210, 0));
        assert_eq!(suggested_price(d(800, 0), d(30, 0)).unwrap(), d(1040, 0));
        assert_eq!(suggested_price(d(100, 0), Decimal::ZERO).unwrap(), d(100, 0));
    }

    #[test]
    fn missing_price_defaults_to_suggested() {
        let (price, manual) = resolve_selling_price(None, d(210, 0), None).unwrap();
        assert_eq!(price, d(210, 0));
        assert!(!manual);

        let (price, manual) = resolve_selling_price(Some(Decimal::ZERO), d(210, 0), None).unwrap();
        assert_eq!(price, d(210, 0));
        assert!(!manual);
    }

    #[test]
    fn explicit_price_is_an_override() {
        let (price, manual) = resolve_selling_price(Some(d(220, 0)), d(210, 0), None).unwrap();
        assert_eq!(price, d(220, 0));
        assert!(manual);
    }

    #[test]
    fn override_survives_an_update_without_price() {
        let (price, manual) =
            resolve_selling_price(None, d(300, 0), Some((d(220, 0), true))).unwrap();
        assert_eq!(price, d(220, 0));
        assert!(manual);
    }

    #[test]
    fn resubmitted_automatic_price_follows_new_suggestion() {
        let (price, manual) =
            resolve_selling_price(Some(d(210, 0)), d(300, 0), Some((d(210, 0), false))).unwrap();
        assert_eq!(price, d(300, 0));
        assert!(!manual);
    }

    #[test]
    fn negative_price_is_rejected() {
        assert!(resolve_selling_price(Some(d(-1, 0)), d(10, 0), None).is_err());
    }
}
