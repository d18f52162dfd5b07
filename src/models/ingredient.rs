//! Ingredient model
//!
//! A (food id, amount) pair. The food is resolved through the catalog when
//! nutrition is computed; an ingredient never owns a `Food`.

use serde::{Deserialize, Serialize};

/// A food reference plus an amount in grams
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    pub food_id: String,
    pub amount: f64,
}

impl Ingredient {
    pub fn new(food_id: impl Into<String>, amount: f64) -> Self {
        Self {
            food_id: food_id.into(),
            amount,
        }
    }

    /// Amounts must be finite and strictly positive
    pub fn is_valid_amount(amount: f64) -> bool {
        amount.is_finite() && amount > 0.0
    }

    pub fn is_valid(&self) -> bool {
        !self.food_id.trim().is_empty() && Self::is_valid_amount(self.amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validity() {
        assert!(Ingredient::new("rice", 150.0).is_valid());
        assert!(!Ingredient::new("rice", 0.0).is_valid());
        assert!(!Ingredient::new("rice", -5.0).is_valid());
        assert!(!Ingredient::new("rice", f64::NAN).is_valid());
        assert!(!Ingredient::new("  ", 10.0).is_valid());
    }
}
