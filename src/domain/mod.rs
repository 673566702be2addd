// Domain layer - Salary records and the pure transforms over them
pub mod charts;
pub mod dashboard;
pub mod dataset;
pub mod filter;
pub mod metrics;
pub mod salary;
