//! Shared nutrition data structure
//!
//! Used across foods, recipes, day plans and goals.

use serde::{Deserialize, Serialize};

/// Nutritional information
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Nutrition {
    pub calories: f64, // kcal
    pub protein: f64,  // grams
    pub fat: f64,      // grams
    pub carbs: f64,    // grams
    pub fiber: f64,    // grams
    pub sodium: f64,   // grams of salt equivalent
}

impl Nutrition {
    /// Create a new Nutrition with all zeros
    pub fn zero() -> Self {
        Self::default()
    }

    /// True when every field is zero
    pub fn is_zero(&self) -> bool {
        *self == Self::zero()
    }

    /// Scale nutrition values by a multiplier (no rounding)
    pub fn scale(&self, multiplier: f64) -> Self {
        self.map(|v| v * multiplier)
    }

    /// Add another nutrition to this one (no rounding)
    pub fn add(&self, other: &Nutrition) -> Self {
        self.zip(other, |a, b| a + b)
    }

    /// Field-wise `self - other`, floored at zero
    pub fn saturating_sub(&self, other: &Nutrition) -> Self {
        self.zip(other, |a, b| (a - b).max(0.0))
    }

    /// Apply `f` to every field
    pub fn map<F: Fn(f64) -> f64>(&self, f: F) -> Self {
        Self {
            calories: f(self.calories),
            protein: f(self.protein),
            fat: f(self.fat),
            carbs: f(self.carbs),
            fiber: f(self.fiber),
            sodium: f(self.sodium),
        }
    }

    /// Combine two values field by field
    pub fn zip<F: Fn(f64, f64) -> f64>(&self, other: &Nutrition, f: F) -> Self {
        Self {
            calories: f(self.calories, other.calories),
            protein: f(self.protein, other.protein),
            fat: f(self.fat, other.fat),
            carbs: f(self.carbs, other.carbs),
            fiber: f(self.fiber, other.fiber),
            sodium: f(self.sodium, other.sodium),
        }
    }
}

impl std::ops::Add for Nutrition {
    type Output = Nutrition;

    fn add(self, other: Nutrition) -> Nutrition {
        Nutrition::add(&self, &other)
    }
}

impl std::ops::Mul<f64> for Nutrition {
    type Output = Nutrition;

    fn mul(self, multiplier: f64) -> Nutrition {
        self.scale(multiplier)
    }
}
