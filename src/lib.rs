//! Nutriplan Library
//!
//! Recipe nutrition math, a food catalog, and the recipe and meal-plan
//! stores built on top of them.

pub mod build_info;
pub mod catalog;
pub mod config;
pub mod db;
pub mod models;
pub mod nutrition;
pub mod stores;
pub mod tools;
