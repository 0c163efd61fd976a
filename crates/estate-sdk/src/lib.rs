//! Estate SDK - client library for the estate server
//!
//! Provides a small async API for creating estates, planting trees and
//! reading statistics and drone plans.

pub mod client;

pub use client::EstateClient;
pub use estate_core::models::{
    CreateEstateRequest, CreateTreeRequest, Estate, EstateStats, Tree,
};
