//! # Storage Module
//!
//! The data-access layer between the dashboards and the tracker backend.
//!
//! The backend owns persistence; this module only decides how records are
//! fetched and shared once they arrive.
//!
//! ## Key Responsibilities
//!
//! - **Storage Seam**: `ActivityStorage` and `BabyStorage` traits so services
//!   never talk to HTTP directly
//! - **REST Implementation**: the traits implemented over [`RestClient`](crate::backend::io::rest::RestClient)
//! - **Record Cache**: one shared copy per `(record kind, baby id)`; concurrent
//!   readers wait on a single request and successful writes invalidate
//! - **Cancellation**: a [`CancelToken`] threaded through every read

pub mod cache;
pub mod cancel;
pub mod rest;
pub mod traits;

#[cfg(test)]
pub mod test_utils;

pub use cache::CachedActivityStorage;
pub use cancel::CancelToken;
pub use traits::{ActivityStorage, BabyStorage};
