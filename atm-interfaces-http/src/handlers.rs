pub mod ops_handlers;
pub mod report_handlers;
pub mod stats_handlers;

pub use ops_handlers::*;
pub use report_handlers::*;
pub use stats_handlers::*;
