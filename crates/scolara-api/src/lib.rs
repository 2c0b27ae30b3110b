// scolara-api: Async Rust client for the Scolara student-information-system API

pub mod auth;
pub mod client;
pub mod error;
pub mod token;
pub mod transport;
pub mod types;

// Endpoint modules: inherent methods on `ApiClient`, one file per
// resource collection.
mod classrooms;
mod enrollments;
mod rooms;
mod students;
mod subjects;
mod years;

pub use client::{ApiClient, Body};
pub use error::Error;
pub use token::{MemoryTokenStore, TokenStore};
pub use transport::TransportConfig;
