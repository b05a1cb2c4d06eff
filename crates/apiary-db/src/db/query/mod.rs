//! Query functions grouped by table.
//!
//! Every function takes a plain `AsyncPgConnection` so it can run on a pooled
//! connection or inside `with_transaction`.

pub mod audit;
pub mod group;
pub mod interface;
pub mod project;
pub mod user;
