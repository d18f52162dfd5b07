//! Nutriplan Tools module
//!
//! Read models assembled from the stores for display.

pub mod foods;
pub mod plans;
pub mod recipes;
