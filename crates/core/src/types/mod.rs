//! Core types for Billfold.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod email;
pub mod geo;
pub mod id;
pub mod page;
pub mod phone;
pub mod status;

pub use email::{Email, EmailError};
pub use geo::{Coordinate, METERS_PER_KM};
pub use id::*;
pub use page::{PageParams, Pagination};
pub use phone::{Phone, PhoneError};
pub use status::InvoiceStatus;
