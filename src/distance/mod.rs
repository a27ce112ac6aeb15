//! Travel-cost matrix and optional per-location preference weights.
//!
//! Both types are dense, read-only inputs to [`crate::ga::GaSolver`]: the
//! solver never computes distances itself, never fetches or decodes
//! geometry, and treats whatever matrix it is given as ground truth.

mod matrix;
mod profit;

pub use matrix::DistanceMatrix;
pub use profit::ProfitVector;
