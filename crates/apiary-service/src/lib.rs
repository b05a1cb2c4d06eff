pub mod audit;
pub mod auth;
pub mod error;
pub mod group;
pub mod store;
