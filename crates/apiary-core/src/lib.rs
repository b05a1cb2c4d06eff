pub mod config;
pub mod constants;
pub mod de;
pub mod error;
pub mod model;
pub mod types;
