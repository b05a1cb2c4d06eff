pub mod app;
pub mod config;
pub mod error;
pub mod group_handler;
pub mod middleware;
pub mod user_store_handler;
