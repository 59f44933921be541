pub mod app_state;
pub mod config;
pub mod handlers;
pub mod models;
pub mod openapi;
pub mod services;
pub mod upstream;
