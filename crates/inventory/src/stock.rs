use serde::{Deserialize, Serialize};

use omnistock_core::{DomainError, DomainResult};

/// Classification of a stock level.
///
/// Mutually exclusive and exhaustive:
/// - `Out`: nothing on hand
/// - `Low`: on hand but at or below the minimum threshold
/// - `Normal`: above the minimum threshold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StockStatus {
    Out,
    Low,
    Normal,
}

/// Stock filter used by catalog listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StockFilter {
    #[default]
    All,
    /// Low but not out.
    Low,
    Out,
}

impl StockFilter {
    pub fn matches(self, level: &StockLevel) -> bool {
        match self {
            StockFilter::All => true,
            StockFilter::Low => level.status() == StockStatus::Low,
            StockFilter::Out => level.status() == StockStatus::Out,
        }
    }
}

/// Units on hand plus the restock threshold.
///
/// Quantities are unsigned, so a negative stock level cannot be represented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StockLevel {
    quantity: u64,
    min_stock: u64,
}

impl StockLevel {
    pub fn new(quantity: u64, min_stock: u64) -> Self {
        Self {
            quantity,
            min_stock,
        }
    }

    pub fn quantity(&self) -> u64 {
        self.quantity
    }

    pub fn min_stock(&self) -> u64 {
        self.min_stock
    }

    pub fn status(&self) -> StockStatus {
        if self.quantity == 0 {
            StockStatus::Out
        } else if self.quantity <= self.min_stock {
            StockStatus::Low
        } else {
            StockStatus::Normal
        }
    }

    /// Restock alert: low and out collapsed into one flag.
    pub fn needs_restock(&self) -> bool {
        self.quantity <= self.min_stock
    }

    /// Manual adjustment by a signed delta, clamped at zero.
    pub fn adjusted(&self, delta: i64) -> Self {
        Self {
            quantity: self.quantity.saturating_add_signed(delta),
            min_stock: self.min_stock,
        }
    }

    /// Take `quantity` units out of stock (e.g. for a sale).
    ///
    /// Unlike `adjusted`, this never clamps: asking for more than is on hand
    /// is an error.
    pub fn withdraw(&self, quantity: u64) -> DomainResult<Self> {
        if quantity == 0 {
            return Err(DomainError::validation("quantity must be positive"));
        }
        let remaining = self
            .quantity
            .checked_sub(quantity)
            .ok_or_else(|| DomainError::insufficient_stock(quantity, self.quantity))?;
        Ok(Self {
            quantity: remaining,
            min_stock: self.min_stock,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classification_boundaries() {
        assert_eq!(StockLevel::new(0, 5).status(), StockStatus::Out);
        assert_eq!(StockLevel::new(0, 0).status(), StockStatus::Out);
        assert_eq!(StockLevel::new(1, 5).status(), StockStatus::Low);
        assert_eq!(StockLevel::new(5, 5).status(), StockStatus::Low);
        assert_eq!(StockLevel::new(6, 5).status(), StockStatus::Normal);
    }

    #[test]
    fn restock_alert_covers_low_and_out() {
        assert!(StockLevel::new(0, 5).needs_restock());
        assert!(StockLevel::new(4, 5).needs_restock());
        assert!(!StockLevel::new(15, 5).needs_restock());
    }

    #[test]
    fn filters_distinguish_low_from_out() {
        let out = StockLevel::new(0, 5);
        let low = StockLevel::new(3, 5);
        let normal = StockLevel::new(10, 5);

        assert!(StockFilter::Out.matches(&out));
        assert!(!StockFilter::Out.matches(&low));
        assert!(StockFilter::Low.matches(&low));
        assert!(!StockFilter::Low.matches(&out));
        assert!(!StockFilter::Low.matches(&normal));
        assert!([out, low, normal].iter().all(|l| StockFilter::All.matches(l)));
    }

    #[test]
    fn adjustment_clamps_at_zero() {
        let level = StockLevel::new(3, 1);
        assert_eq!(level.adjusted(-10).quantity(), 0);
        assert_eq!(level.adjusted(2).quantity(), 5);
        assert_eq!(level.adjusted(-10).min_stock(), 1);
    }

    #[test]
    fn withdraw_rejects_more_than_on_hand() {
        let level = StockLevel::new(4, 5);
        assert_eq!(
            level.withdraw(5).unwrap_err(),
            DomainError::InsufficientStock {
                requested: 5,
                available: 4
            }
        );
        assert_eq!(level.withdraw(4).unwrap().quantity(), 0);
    }

    #[test]
    fn withdraw_rejects_zero_quantity() {
        let err = StockLevel::new(4, 0).withdraw(0).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[cfg(test)]
    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Property: manual adjustment never drives stock below zero and
            /// otherwise adds the delta exactly.
            #[test]
            fn adjustment_never_goes_negative(
                quantity in 0u64..10_000,
                min_stock in 0u64..100,
                delta in -20_000i64..20_000
            ) {
                let adjusted = StockLevel::new(quantity, min_stock).adjusted(delta);
                let expected = (quantity as i64 + delta).max(0) as u64;
                prop_assert_eq!(adjusted.quantity(), expected);
            }

            /// Property: exactly one status applies to every level.
            #[test]
            fn classification_is_exclusive_and_exhaustive(
                quantity in 0u64..1_000,
                min_stock in 0u64..1_000
            ) {
                let level = StockLevel::new(quantity, min_stock);
                let matches = [
                    quantity == 0,
                    quantity > 0 && quantity <= min_stock,
                    quantity > min_stock,
                ];
                prop_assert_eq!(matches.iter().filter(|m| **m).count(), 1);
                let expected = if matches[0] {
                    StockStatus::Out
                } else if matches[1] {
                    StockStatus::Low
                } else {
                    StockStatus::Normal
                };
                prop_assert_eq!(level.status(), expected);
            }

            /// Property: withdrawing q <= s leaves s - q; q > s is rejected.
            #[test]
            fn withdraw_is_exact_or_rejected(
                quantity in 0u64..1_000,
                requested in 1u64..2_000
            ) {
                let level = StockLevel::new(quantity, 0);
                match level.withdraw(requested) {
                    Ok(next) => {
                        prop_assert!(requested <= quantity);
                        prop_assert_eq!(next.quantity(), quantity - requested);
                    }
                    Err(err) => {
                        prop_assert!(requested > quantity);
                        prop_assert_eq!(err, DomainError::insufficient_stock(requested, quantity));
                    }
                }
            }
        }
    }
}
