// Application layer - Use cases and the pure dashboard pipeline
pub mod aggregation;
pub mod chart_builder;
pub mod dashboard_composer;
pub mod dashboard_service;
pub mod pipeline;
pub mod sales_repository;
pub mod streaming_service;
