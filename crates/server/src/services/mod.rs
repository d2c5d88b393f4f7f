//! Business logic independent of HTTP and storage.

pub mod auth;
pub mod dues;
