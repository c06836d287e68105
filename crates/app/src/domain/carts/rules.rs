//! Cart quantity rules.
//!
//! Pure checks applied to a cart line before anything is written. Callers load
//! the authoritative stock and order limit inside the same transaction that
//! performs the write.

use thiserror::Error;

/// Why a requested quantity cannot be stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CartRuleViolation {
    #[error("quantity must be at least 1")]
    InvalidQuantity,

    #[error("only {available} items available in stock")]
    InsufficientStock { available: u32 },

    #[error("maximum order quantity is {max}")]
    QuantityExceedsLimit { max: u32 },
}

/// Stock and order cap that bound a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineLimits {
    pub available_stock: u32,
    pub max_order_quantity: u32,
}

/// The quantity change to apply after an update request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantityChange {
    Set(u32),
    Remove,
}

/// Quantity to store when adding `requested` units to a line holding
/// `existing` units.
///
/// The request on its own must fit in stock. The combined quantity is clamped
/// to the order cap and must still fit in stock.
///
/// # Errors
///
/// Returns [`CartRuleViolation::InvalidQuantity`] for requests below one and
/// [`CartRuleViolation::InsufficientStock`] when stock cannot cover the line.
pub fn plan_add(
    requested: i64,
    existing: Option<u32>,
    limits: LineLimits,
) -> Result<u32, CartRuleViolation> {
    if requested < 1 {
        return Err(CartRuleViolation::InvalidQuantity);
    }

    let insufficient = CartRuleViolation::InsufficientStock {
        available: limits.available_stock,
    };

    let requested = u32::try_from(requested).unwrap_or(u32::MAX);

    if requested > limits.available_stock {
        return Err(insufficient);
    }

    let combined = existing
        .unwrap_or(0)
        .saturating_add(requested)
        .min(limits.max_order_quantity);

    if combined > limits.available_stock {
        return Err(insufficient);
    }

    Ok(combined)
}

/// Change to apply when a line's quantity is overwritten with `requested`.
///
/// Zero or less removes the line. Stock is checked before the order cap.
///
/// # Errors
///
/// Returns [`CartRuleViolation::InsufficientStock`] or
/// [`CartRuleViolation::QuantityExceedsLimit`].
pub fn plan_update(requested: i64, limits: LineLimits) -> Result<QuantityChange, CartRuleViolation> {
    if requested <= 0 {
        return Ok(QuantityChange::Remove);
    }

    let insufficient = CartRuleViolation::InsufficientStock {
        available: limits.available_stock,
    };

    let requested = u32::try_from(requested).unwrap_or(u32::MAX);

    if requested > limits.available_stock {
        return Err(insufficient);
    }

    if requested > limits.max_order_quantity {
        return Err(CartRuleViolation::QuantityExceedsLimit {
            max: limits.max_order_quantity,
        });
    }

    Ok(QuantityChange::Set(requested))
}

#[cfg(test)]
mod tests {
    use super::*;

    const LIMITS: LineLimits = LineLimits {
        available_stock: 5,
        max_order_quantity: 10,
    };

    #[test]
    fn add_rejects_non_positive_quantities() {
        assert_eq!(plan_add(0, None, LIMITS), Err(CartRuleViolation::InvalidQuantity));
        assert_eq!(plan_add(-3, Some(2), LIMITS), Err(CartRuleViolation::InvalidQuantity));
    }

    #[test]
    fn add_creates_line_with_requested_quantity() {
        assert_eq!(plan_add(3, None, LIMITS), Ok(3));
    }

    #[test]
    fn add_accumulates_existing_quantity() {
        assert_eq!(plan_add(2, Some(3), LIMITS), Ok(5));
    }

    #[test]
    fn add_beyond_stock_is_rejected() {
        assert_eq!(
            plan_add(6, None, LIMITS),
            Err(CartRuleViolation::InsufficientStock { available: 5 })
        );
    }

    #[test]
    fn add_rejects_combined_quantity_beyond_stock() {
        assert_eq!(
            plan_add(3, Some(3), LIMITS),
            Err(CartRuleViolation::InsufficientStock { available: 5 })
        );
    }

    #[test]
    fn add_clamps_to_order_cap() {
        let limits = LineLimits {
            available_stock: 50,
            max_order_quantity: 10,
        };

        assert_eq!(plan_add(8, Some(6), limits), Ok(10));
        assert_eq!(plan_add(25, None, limits), Ok(10));
    }

    #[test]
    fn add_of_huge_quantity_is_insufficient_stock() {
        assert_eq!(
            plan_add(i64::MAX, None, LIMITS),
            Err(CartRuleViolation::InsufficientStock { available: 5 })
        );
    }

    #[test]
    fn update_to_zero_removes() {
        assert_eq!(plan_update(0, LIMITS), Ok(QuantityChange::Remove));
        assert_eq!(plan_update(-1, LIMITS), Ok(QuantityChange::Remove));
    }

    #[test]
    fn update_checks_stock_before_cap() {
        assert_eq!(
            plan_update(10, LIMITS),
            Err(CartRuleViolation::InsufficientStock { available: 5 })
        );

        let plenty = LineLimits {
            available_stock: 100,
            max_order_quantity: 10,
        };

        assert_eq!(
            plan_update(11, plenty),
            Err(CartRuleViolation::QuantityExceedsLimit { max: 10 })
        );
    }

    #[test]
    fn update_within_limits_sets_quantity() {
        assert_eq!(plan_update(4, LIMITS), Ok(QuantityChange::Set(4)));
    }
}
