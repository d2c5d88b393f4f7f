//! Domain types for the server.
//!
//! These types represent validated domain objects separate from database row types.

pub mod business;
pub mod client;
pub mod invoice;
pub mod product;
pub mod session;
pub mod user;

pub use business::NearbyMerchant;
pub use client::{Client, ClientWithDues, UpsertClientInput};
pub use invoice::InvoiceSummary;
pub use product::{CreateProductInput, NearbyProduct, Product};
pub use session::{CurrentUser, keys as session_keys};
pub use user::User;
