//! Shared test utilities for documind integration tests.
//!
//! - `builders`: config builder and sample documents
//! - `harness`: stub remote services that count their calls
//! - `server`: a tiny local HTTP server for exercising the real clients

pub mod builders;
pub mod harness;
pub mod server;

pub use builders::*;
pub use harness::*;
pub use server::MockServer;
