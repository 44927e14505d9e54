//! Core domain types and logic.

pub mod normalize;
pub mod sheet;
pub mod catalog;
pub mod earnings;
pub mod owner_benefit;
pub mod valuation;
pub mod engine;
pub mod export;
pub mod breakdown;
pub mod session;
pub mod config_validation;
pub mod error;
