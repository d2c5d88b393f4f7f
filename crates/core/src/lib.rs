//! Billfold Core - Shared types library.
//!
//! This crate provides common types used across all Billfold components:
//! - `server` - HTTP/JSON API for the invoicing and inventory dashboard
//! - `cli` - Command-line tools for migrations and account management
//!
//! # Architecture
//!
//! The core crate contains only types and traits - no I/O, no database access,
//! no HTTP clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, coordinates, money-adjacent
//!   values, and pagination

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
