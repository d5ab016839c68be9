// Pure domain services: bucketing and derived read-side views

pub mod aggregator;
pub mod insights;

pub use aggregator::*;
pub use insights::*;
