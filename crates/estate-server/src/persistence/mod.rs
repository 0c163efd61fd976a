//! Persistence layer for the estate server.
//!
//! Provides SQLite-backed storage for estates and trees.
//! The in-memory store in `state` writes through to these tables.

pub mod db;
pub mod estates;
pub mod trees;

pub use db::{init_database, Database};
