pub mod chart_queries;
pub mod report_queries;
pub mod stats_queries;
