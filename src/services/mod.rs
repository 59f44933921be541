pub mod analytics_service;
pub mod board_service;
