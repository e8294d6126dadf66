//! # leavedesk-core
//!
//! Core crate for LeaveDesk. Contains configuration schemas, the unified
//! error system and the small set of traits shared by every other crate.
//!
//! This crate has **no** internal dependencies on other LeaveDesk crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;

pub use error::AppError;
pub use result::AppResult;
