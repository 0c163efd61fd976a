//! Estate CLI - command line tools for the estate drone planner.
//!
//! The `estate` binary talks to a running server through `estate-sdk`, or
//! plans a survey offline from a JSON layout file.

pub mod layout;

pub use layout::{EstateLayout, LayoutReport};
