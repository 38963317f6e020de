// Presentation layer - HTTP handlers and page rendering
pub mod app_state;
pub mod handlers;
pub mod page;
pub mod params;
