pub mod audit;
pub mod group;
pub mod project;
pub mod user;
