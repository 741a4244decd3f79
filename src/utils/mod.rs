//! Utility modules for soil scoring
//!
//! - Normalization: distance-based falloff from the optimal band
//! - Format: number rendering for advice text and reports

pub mod normalization;
pub mod format;

pub use normalization::falloff_score;
pub use format::{format_one_decimal, format_reading};
