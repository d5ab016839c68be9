// Domain entities

pub mod chart;
pub mod model;
pub mod report;
pub mod stats;

pub use chart::*;
pub use model::*;
pub use report::*;
pub use stats::*;
