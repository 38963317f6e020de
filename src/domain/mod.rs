// Domain layer - Pure business types
pub mod chart;
pub mod dashboard;
pub mod error;
pub mod filter;
pub mod number_format;
pub mod summary;
pub mod transaction;
