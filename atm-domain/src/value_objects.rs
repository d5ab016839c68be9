// Domain value objects
pub mod chart_mode;
pub mod locations;
pub mod timestamp;

pub use chart_mode::*;
pub use locations::*;
pub use timestamp::*;
