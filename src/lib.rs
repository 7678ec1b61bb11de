//! EAMCET College Finder Library
//!
//! Core search logic and dataset loading for the college finder CLI

pub mod loader;
pub mod models;
pub mod search;

pub use models::*;
