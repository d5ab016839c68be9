pub mod sqlite_reports;

pub use sqlite_reports::*;
